//! Environment-driven session cookie settings.
//!
//! Debug builds fall back to defaults with a warning; release builds refuse to
//! start on anything missing or malformed.
//!
//! | variable | meaning |
//! |---|---|
//! | `SESSION_SECRET` | inline key material, takes precedence over the key file |
//! | `SESSION_KEY_FILE` | path to key material |
//! | `SESSION_COOKIE_SECURE` | mark the cookie `Secure` |
//! | `SESSION_SAMESITE` | `Strict`, `Lax` or `None` |
//! | `SESSION_ALLOW_EPHEMERAL` | permit a random per-process key |

use std::path::PathBuf;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroizing;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

const SECRET_ENV: &str = "SESSION_SECRET";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics below this length, so even debug builds enforce it.
const KEY_MIN_LEN_DEBUG: usize = 32;
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode governing how strictly settings are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults with warnings.
    Debug,
    /// Everything explicit and valid.
    Release,
}

impl BuildMode {
    /// Debug when compiled with `debug_assertions`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated session cookie settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

impl SessionSettings {
    /// Cookie-session middleware configured from these settings.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(self.same_site)
            .build()
    }
}

/// Errors raised while validating session settings.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key from {origin} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        origin: String,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Read and validate session settings from `env`.
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = read_flag(env, mode, COOKIE_SECURE_ENV, true)?;
    let same_site = read_same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = read_flag(env, mode, ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = read_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Boolean toggle: required in release, `default` with a warning in debug.
fn read_flag<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default, "session toggle not set; using default");
            return Ok(default);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };

    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(variable = name, %value, default, "invalid session toggle; using default");
            Ok(default)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn read_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let Some(value) = env.string(SAMESITE_ENV) else {
        if mode.is_debug() {
            warn!("SESSION_SAMESITE not set; using default");
            return Ok(default);
        }
        return Err(SessionConfigError::MissingEnv { name: SAMESITE_ENV });
    };

    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ if mode.is_debug() => {
            warn!(%value, "invalid SESSION_SAMESITE; using default");
            Ok(default)
        }
        _ => Err(SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            value,
            expected: SAMESITE_EXPECTED,
        }),
    }
}

/// Key material from `SESSION_SECRET`, else the key file, else (when
/// permitted) a random key.
fn read_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    if let Some(secret) = env.string(SECRET_ENV) {
        let secret = Zeroizing::new(secret.into_bytes());
        return derive_key(&secret, SECRET_ENV.to_owned(), mode);
    }

    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| KEY_FILE_DEFAULT_PATH.to_owned()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            derive_key(&bytes, path.display().to_string(), mode)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                %error,
                "using temporary session key; sessions will not survive a restart"
            );
            Ok(Key::generate())
        }
        Err(source) => Err(SessionConfigError::KeyRead { path, source }),
    }
}

fn derive_key(material: &[u8], origin: String, mode: BuildMode) -> Result<Key, SessionConfigError> {
    let min_len = if mode.is_debug() {
        KEY_MIN_LEN_DEBUG
    } else {
        KEY_MIN_LEN
    };
    if material.len() < min_len {
        return Err(SessionConfigError::KeyTooShort {
            origin,
            length: material.len(),
            min_len,
        });
    }
    Ok(Key::derive_from(material))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
