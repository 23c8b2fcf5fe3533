//! Application configuration for the hosted identity and data SDK.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser has no process environment, so values are captured when the
//! crate is compiled (`TASKFLOW_PROJECT_ID`, `TASKFLOW_PUBLIC_KEY`). Tests
//! build configs through [`AppConfig::from_lookup`] instead.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const PROJECT_ID_VAR: &str = "TASKFLOW_PROJECT_ID";
pub const PUBLIC_KEY_VAR: &str = "TASKFLOW_PUBLIC_KEY";
pub const NOTICE_TIMEOUT_VAR: &str = "TASKFLOW_NOTICE_TIMEOUT_MS";

/// CSS selector of the element hosted auth surfaces mount into.
pub const DEFAULT_AUTH_TARGET: &str = "#authentication";
pub const DEFAULT_NOTICE_TIMEOUT_MS: u32 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing config value: {var} not set")]
    Missing { var: &'static str },
    #[error("invalid config value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub project_id: String,
    pub public_key: String,
    pub auth_target: String,
    pub notice_timeout_ms: u32,
}

impl AppConfig {
    /// Build config from the values captured at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the project id or public key was
    /// not set for the build.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| match var {
            PROJECT_ID_VAR => option_env!("TASKFLOW_PROJECT_ID").map(str::to_owned),
            PUBLIC_KEY_VAR => option_env!("TASKFLOW_PUBLIC_KEY").map(str::to_owned),
            NOTICE_TIMEOUT_VAR => option_env!("TASKFLOW_NOTICE_TIMEOUT_MS").map(str::to_owned),
            _ => None,
        })
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// Required: `TASKFLOW_PROJECT_ID`, `TASKFLOW_PUBLIC_KEY`.
    /// Optional: `TASKFLOW_NOTICE_TIMEOUT_MS` (default 3000).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required value is missing or blank, or the
    /// notice timeout is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_id = required(&lookup, PROJECT_ID_VAR)?;
        let public_key = required(&lookup, PUBLIC_KEY_VAR)?;
        let notice_timeout_ms = parse_timeout(lookup(NOTICE_TIMEOUT_VAR).as_deref())?;
        Ok(Self {
            project_id,
            public_key,
            auth_target: DEFAULT_AUTH_TARGET.to_owned(),
            notice_timeout_ms,
        })
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing { var })
}

fn parse_timeout(raw: Option<&str>) -> Result<u32, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(DEFAULT_NOTICE_TIMEOUT_MS);
    };
    match raw.parse::<u32>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError::Invalid { var: NOTICE_TIMEOUT_VAR, value: raw.to_owned() }),
    }
}
