use crate::outbound::feature_flags::StaticFeatureFlags;
use anyhow::Context;
use std::{fmt::Display, path::PathBuf, str::FromStr};
use thiserror::Error;

/// The current environment the application is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running on a developer machine
    Local,
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error)]
#[error("Could not convert {0} into an environment value")]
pub struct UnknownValue(String);

impl Environment {
    /// Read `ENVIRONMENT`, falling back to production when it is missing or unknown
    pub fn new_or_prod() -> Self {
        std::env::var("ENVIRONMENT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(Environment::Production)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Production => write!(f, "prod"),
            Environment::Develop => write!(f, "dev"),
            Environment::Local => write!(f, "local"),
        }
    }
}

impl FromStr for Environment {
    type Err = UnknownValue;

    fn from_str(environment: &str) -> Result<Self, UnknownValue> {
        match environment {
            "prod" => Ok(Environment::Production),
            "dev" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            s => Err(UnknownValue(s.to_string())),
        }
    }
}

/// Configuration parameters for the dry run binary.
#[derive(Debug)]
pub struct Config {
    /// The environment we are in
    pub environment: Environment,
    /// Flags gating the selectable kinds, from `PROPERTY_TYPES_FEATURE_FLAGS`
    pub feature_flags: StaticFeatureFlags,
    /// JSON file describing the edit session, from `PROPERTY_TYPES_SESSION_FILE`
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::new_or_prod();
        let feature_flags = std::env::var("PROPERTY_TYPES_FEATURE_FLAGS")
            .unwrap_or_default()
            .parse::<StaticFeatureFlags>()
            .context("PROPERTY_TYPES_FEATURE_FLAGS is invalid")?;
        let session_file = std::env::var("PROPERTY_TYPES_SESSION_FILE")
            .context("PROPERTY_TYPES_SESSION_FILE must be provided")?
            .into();

        Ok(Config {
            environment,
            feature_flags,
            session_file,
        })
    }
}
