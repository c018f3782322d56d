//! Runtime settings resolved from CLI flags and environment variables.
//!
//! [`Settings::resolve`] checks the parsed [`RunArgs`](crate::cli::RunArgs)
//! for values that parse but cannot work (port 0, zero-sized rate limit
//! window) and fails startup before the listener binds.

use std::time::Duration;

use crate::cli::RunArgs;
use crate::error::IntakeError;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Deployment mode string, echoed verbatim in health check output.
    pub environment: String,
    pub rate_limit_max: u32,
    pub rate_limit_window: Duration,
}

impl Settings {
    pub fn resolve(args: &RunArgs) -> Result<Self, IntakeError> {
        if args.port == 0 {
            return Err(IntakeError::InvalidSetting {
                field: "port",
                message: "port must be between 1 and 65535".into(),
            });
        }
        if args.rate_limit_max == 0 {
            return Err(IntakeError::InvalidSetting {
                field: "rate-limit-max",
                message: "at least one request per window must be allowed".into(),
            });
        }
        if args.rate_limit_window_secs == 0 {
            return Err(IntakeError::InvalidSetting {
                field: "rate-limit-window-secs",
                message: "window length must be at least one second".into(),
            });
        }

        Ok(Self {
            environment: args.environment.clone(),
            rate_limit_max: args.rate_limit_max,
            rate_limit_window: Duration::from_secs(args.rate_limit_window_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> RunArgs {
        RunArgs {
            port: 3000,
            host: "0.0.0.0".into(),
            environment: "development".into(),
            log_level: crate::cli::LogLevel::Info,
            pretty: false,
            json: false,
            rate_limit_max: 100,
            rate_limit_window_secs: 900,
        }
    }

    #[test]
    fn default_args_resolve() {
        let settings = Settings::resolve(&default_args()).unwrap();
        assert_eq!(settings.environment, "development");
        assert_eq!(settings.rate_limit_max, 100);
        assert_eq!(settings.rate_limit_window, Duration::from_secs(900));
    }

    #[test]
    fn port_zero_is_fatal() {
        let mut args = default_args();
        args.port = 0;
        let err = Settings::resolve(&args).unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn zero_rate_limit_is_fatal() {
        let mut args = default_args();
        args.rate_limit_max = 0;
        assert!(Settings::resolve(&args).is_err());
    }

    #[test]
    fn zero_window_is_fatal() {
        let mut args = default_args();
        args.rate_limit_window_secs = 0;
        assert!(Settings::resolve(&args).is_err());
    }
}
