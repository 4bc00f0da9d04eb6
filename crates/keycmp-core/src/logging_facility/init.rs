//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use serde::Deserialize;
use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

use crate::errors::CmpError;

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

impl FromStr for Profile {
    type Err = CmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "production" | "prod" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(CmpError::InvalidArgument {
                reason: format!(
                    "unknown log profile '{}', expected development, production or test",
                    other
                ),
            }),
        }
    }
}

const DEFAULT_DEV_FILTER: &str = "keycmp=debug,keycmp_core=debug";
const DEFAULT_PROD_FILTER: &str = "keycmp=info,keycmp_core=info";

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// Later calls are no-ops. Events go to stderr so that stdout stays free for
/// rendered results. `RUST_LOG` overrides the profile's default filter.
///
/// # Profiles
///
/// - **Development**: Human-readable logs with debug level
/// - **Production**: JSON structured logs with info level
/// - **Test**: Bare registry; use `init_test_capture()` to record events
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DEV_FILTER)),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_PROD_FILTER)),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().try_init().ok();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Test);
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("development".parse::<Profile>().ok(), Some(Profile::Development));
        assert_eq!("PROD".parse::<Profile>().ok(), Some(Profile::Production));
        assert_eq!(" test ".parse::<Profile>().ok(), Some(Profile::Test));
    }

    #[test]
    fn test_profile_from_str_rejects_unknown() {
        let err = "verbose".parse::<Profile>().unwrap_err();
        assert!(matches!(err, CmpError::InvalidArgument { .. }));
    }
}
