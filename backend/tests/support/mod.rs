//! Shared support for the HTTP behaviour suites.

pub(crate) mod harness;
pub(crate) mod steps;
