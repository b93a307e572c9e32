//! Server settings loaded with OrthoConfig.
//!
//! Every field can come from the command line, a config file, or an
//! `ORCHARD_*` environment variable.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Bind address, store selection and startup seeding.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ORCHARD")]
pub struct ServerSettings {
    /// Interface to bind; all IPv4 interfaces when unset.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// PostgreSQL URL. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Replace the catalogue with the starter fruits at startup.
    #[ortho_config(default = false)]
    pub seed_on_start: bool,
}

impl ServerSettings {
    /// Host and port to bind, with defaults applied.
    pub fn bind_addr(&self) -> (&str, u16) {
        (
            self.host.as_deref().unwrap_or(DEFAULT_HOST),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// The database URL, ignoring a blank value.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "ORCHARD_HOST",
        "ORCHARD_PORT",
        "ORCHARD_DATABASE_URL",
        "ORCHARD_SEED_ON_START",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("orchard")]).expect("config should load")
    }

    #[rstest]
    fn defaults_bind_all_interfaces_in_memory() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), ("0.0.0.0", 8080));
        assert!(settings.database_url().is_none());
        assert!(!settings.seed_on_start);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ORCHARD_HOST", Some("127.0.0.1".to_owned())),
            ("ORCHARD_PORT", Some("9000".to_owned())),
            (
                "ORCHARD_DATABASE_URL",
                Some("postgres://localhost/orchard".to_owned()),
            ),
            ("ORCHARD_SEED_ON_START", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr(), ("127.0.0.1", 9000));
        assert_eq!(settings.database_url(), Some("postgres://localhost/orchard"));
        assert!(settings.seed_on_start);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([
            ("ORCHARD_HOST", None),
            ("ORCHARD_PORT", None),
            ("ORCHARD_DATABASE_URL", Some("   ".to_owned())),
            ("ORCHARD_SEED_ON_START", None),
        ]);

        assert!(load_from_empty_args().database_url().is_none());
    }
}
