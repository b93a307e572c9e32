//! Request middleware: trace identifiers and form method override.

pub mod method_override;
pub mod trace;

pub use method_override::MethodOverride;
pub use trace::Trace;
