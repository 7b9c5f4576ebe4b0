//! Feature flags fixed at startup.

use crate::domain::{models::FeatureFlag, ports::FeatureFlagProvider};
use std::{collections::HashSet, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown feature flag {0}")]
pub struct UnknownFeatureFlag(String);

/// A fixed set of enabled flags, usually read from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticFeatureFlags {
    enabled: HashSet<FeatureFlag>,
}

impl StaticFeatureFlags {
    pub fn new(flags: impl IntoIterator<Item = FeatureFlag>) -> Self {
        StaticFeatureFlags {
            enabled: flags.into_iter().collect(),
        }
    }
}

impl FeatureFlagProvider for StaticFeatureFlags {
    fn is_enabled(&self, flag: FeatureFlag) -> bool {
        self.enabled.contains(&flag)
    }
}

/// Parses a comma separated list such as `services,work_order_properties`
impl FromStr for StaticFeatureFlags {
    type Err = UnknownFeatureFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|flag| !flag.is_empty())
            .map(|flag| {
                FeatureFlag::from_str(flag).map_err(|_| UnknownFeatureFlag(flag.to_string()))
            })
            .collect::<Result<HashSet<_>, _>>()
            .map(|enabled| StaticFeatureFlags { enabled })
    }
}
