//! Logfile name patterns
//!
//! Users write strftime directives with `@` instead of `%` so the pattern
//! survives shells and init scripts untouched. `temp_@Y-@m-@d.log` names one
//! file per day.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use contracts::ContractError;

/// Character standing in for `%` in user patterns
pub const DIRECTIVE_MARKER: char = '@';

/// Validated strftime pattern for destination names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenamePattern {
    source: String,
    strftime: String,
}

impl FilenamePattern {
    /// Build from a user pattern using `@` directives
    ///
    /// A literal `%` in the user pattern stays literal.
    pub fn from_user(pattern: &str) -> Result<Self, ContractError> {
        let strftime = pattern.replace('%', "%%").replace(DIRECTIVE_MARKER, "%");
        Self::build(pattern, strftime)
    }

    /// Build from a plain strftime pattern
    pub fn from_strftime(pattern: &str) -> Result<Self, ContractError> {
        Self::build(pattern, pattern.to_string())
    }

    fn build(source: &str, strftime: String) -> Result<Self, ContractError> {
        if strftime.trim().is_empty() {
            return Err(ContractError::invalid_pattern(source, "pattern is empty"));
        }
        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(ContractError::invalid_pattern(
                source,
                "unknown or incomplete date/time directive",
            ));
        }
        Ok(Self {
            source: source.to_string(),
            strftime,
        })
    }

    /// Pattern as given by the user
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Pattern translated to strftime syntax
    pub fn as_strftime(&self) -> &str {
        &self.strftime
    }

    /// Destination name for `ts`
    pub fn render(&self, ts: &DateTime<Utc>) -> Result<String, ContractError> {
        let mut name = String::new();
        write!(name, "{}", ts.format(&self.strftime))
            .map_err(|_| ContractError::invalid_pattern(&self.source, "cannot format timestamp"))?;
        if name.is_empty() {
            return Err(ContractError::invalid_pattern(
                &self.source,
                "pattern renders an empty name",
            ));
        }
        Ok(name)
    }
}
