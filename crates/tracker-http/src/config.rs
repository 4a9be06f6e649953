use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub shutdown_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve settings through `lookup`, which returns a variable's value if set.
    ///
    /// `TRACKER_ADDR` wins over `PORT`; `PORT` binds on all interfaces.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = match (lookup("TRACKER_ADDR"), lookup("PORT")) {
            (Some(addr), _) => parse("TRACKER_ADDR", addr)?,
            (None, Some(port)) => {
                let port: u16 = parse("PORT", port)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => parse("TRACKER_ADDR", DEFAULT_ADDR.to_string())?,
        };

        let shutdown_timeout = match lookup("TRACKER_SHUTDOWN_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(parse("TRACKER_SHUTDOWN_TIMEOUT_SECS", secs)?),
            None => Duration::from_secs(DEFAULT_SHUTDOWN_TIMEOUT_SECS),
        };

        Ok(Self {
            bind_addr: addr,
            shutdown_timeout,
        })
    }
}

fn parse<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::Invalid {
        var,
        reason: e.to_string(),
        value,
    })
}
