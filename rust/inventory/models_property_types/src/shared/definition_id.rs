//! Identifier of a property type row.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Prefix of ids generated locally for rows that were never persisted.
pub const TEMP_ID_PREFIX: &str = "tmp-";

/// Identifies a property type inside an edit session.
///
/// Rows added by the user carry a [DefinitionId::Temp] id until the persistence gateway
/// returns the real one. Every string of the form `tmp-<digits>` is reserved for temp ids:
/// it parses as [DefinitionId::Temp] or is rejected, so a persisted id can never carry the
/// temp marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DefinitionId {
    /// Locally generated id, rendered as `tmp-<n>`
    Temp(u32),
    /// Id assigned by the persistence gateway
    Persisted(String),
}

impl DefinitionId {
    /// Whether this row has never been persisted
    pub fn is_temp(&self) -> bool {
        matches!(self, DefinitionId::Temp(_))
    }

    /// The gateway assigned id, if any
    pub fn persisted_id(&self) -> Option<&str> {
        match self {
            DefinitionId::Persisted(id) => Some(id.as_str()),
            DefinitionId::Temp(_) => None,
        }
    }

    /// Checks a raw wire id against the temp id pattern
    pub fn is_temp_str(raw: &str) -> bool {
        temp_digits(raw).is_some()
    }
}

fn temp_digits(raw: &str) -> Option<&str> {
    let digits = raw.strip_prefix(TEMP_ID_PREFIX)?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// `Ok(None)` for ids outside the temp pattern. Temp ids must be canonical so they render
/// back to the same string.
fn parse_temp(raw: &str) -> Result<Option<u32>, DefinitionIdError> {
    let Some(digits) = temp_digits(raw) else {
        return Ok(None);
    };
    let n: u32 = digits
        .parse()
        .map_err(|_| DefinitionIdError::MalformedTemp(raw.to_string()))?;
    if n.to_string() != digits {
        return Err(DefinitionIdError::MalformedTemp(raw.to_string()));
    }
    Ok(Some(n))
}

/// Errors that can occur when parsing a [DefinitionId]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DefinitionIdError {
    #[error("Property type id cannot be empty")]
    Empty,
    #[error("Property type id {0} is reserved for unsaved rows")]
    MalformedTemp(String),
}

impl FromStr for DefinitionId {
    type Err = DefinitionIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.is_empty() {
            return Err(DefinitionIdError::Empty);
        }
        Ok(match parse_temp(raw)? {
            Some(n) => DefinitionId::Temp(n),
            None => DefinitionId::Persisted(raw.to_string()),
        })
    }
}

impl TryFrom<String> for DefinitionId {
    type Error = DefinitionIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if raw.is_empty() {
            return Err(DefinitionIdError::Empty);
        }
        Ok(match parse_temp(&raw)? {
            Some(n) => DefinitionId::Temp(n),
            None => DefinitionId::Persisted(raw),
        })
    }
}

impl From<DefinitionId> for String {
    fn from(id: DefinitionId) -> Self {
        match id {
            DefinitionId::Temp(n) => format!("{TEMP_ID_PREFIX}{n}"),
            DefinitionId::Persisted(id) => id,
        }
    }
}

impl fmt::Display for DefinitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionId::Temp(n) => write!(f, "{TEMP_ID_PREFIX}{n}"),
            DefinitionId::Persisted(id) => write!(f, "{id}"),
        }
    }
}
