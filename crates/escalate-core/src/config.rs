//! Tracker configuration
//!
//! Everything tunable about a session lives here: identifier format,
//! classifier vocabularies, field defaults and the import column profile.
//! Configs deserialize from TOML; every section is optional.
//!
//! ```toml
//! [ids]
//! prefix = "CESI"
//! width = 6
//!
//! [vocabulary]
//! urgency = ["urgent", "critical", "business impact"]
//!
//! [import]
//! profile = "strict"
//! ```

use crate::error::ConfigError;
use crate::intake::ImportProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Default identifier prefix
pub const DEFAULT_ID_PREFIX: &str = "CESI";

/// Default zero-padded identifier width
pub const DEFAULT_ID_WIDTH: usize = 6;

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrackerConfig {
    /// Identifier rendering
    pub ids: IdFormat,
    /// Classifier vocabularies
    pub vocabulary: Vocabulary,
    /// Field defaults for manual entry and import
    pub defaults: FieldDefaults,
    /// Import column requirements
    pub import: ImportSettings,
}

impl TrackerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns error if the TOML is malformed or fails validation
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded tracker config");
        Ok(config)
    }

    /// Check identifier format and vocabulary terms
    ///
    /// # Errors
    /// Returns the first violation found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ids.width == 0 || self.ids.width > 12 {
            return Err(ConfigError::InvalidIdWidth(self.ids.width));
        }
        if self.ids.prefix.trim().is_empty() || self.ids.prefix.contains('-') {
            return Err(ConfigError::InvalidIdPrefix(self.ids.prefix.clone()));
        }
        if self.vocabulary.negative.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyTerm { vocabulary: "negative" });
        }
        if self.vocabulary.urgency.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::EmptyTerm { vocabulary: "urgency" });
        }
        Ok(())
    }

    /// With identifier prefix
    #[inline]
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ids.prefix = prefix.into();
        self
    }

    /// With vocabulary
    #[inline]
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// With import profile
    #[inline]
    #[must_use]
    pub fn with_import_profile(mut self, profile: ProfileName) -> Self {
        self.import.profile = profile;
        self
    }
}

/// Identifier rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdFormat {
    /// Text before the dash
    pub prefix: String,
    /// Zero-padded digit count
    pub width: usize,
}

impl Default for IdFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_ID_PREFIX.to_string(),
            width: DEFAULT_ID_WIDTH,
        }
    }
}

/// Classifier vocabularies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Words and phrases signalling negative sentiment
    pub negative: Vec<String>,
    /// Words and phrases signalling urgency
    pub urgency: Vec<String>,
}

impl Vocabulary {
    /// Build from borrowed term lists
    #[must_use]
    pub fn new(negative: &[&str], urgency: &[&str]) -> Self {
        Self {
            negative: negative.iter().map(|t| (*t).to_string()).collect(),
            urgency: urgency.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            &[
                "delay",
                "delayed",
                "delays",
                "delaying",
                "issue",
                "issues",
                "problem",
                "problems",
                "fail",
                "failed",
                "fails",
                "failing",
                "failure",
                "dissatisfaction",
                "dissatisfied",
                "unhappy",
                "complaint",
                "broken",
                "not working",
                "frustrated",
            ],
            &[
                "urgent",
                "urgently",
                "critical",
                "immediately",
                "asap",
                "emergency",
                "business impact",
                "as soon as possible",
            ],
        )
    }
}

/// Field values used when the operator or the sheet leaves them out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub manual_customer: String,
    pub import_customer: String,
    pub manual_owner: String,
    pub import_owner: String,
    pub action_taken: String,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            manual_customer: "Manual Entry".to_string(),
            import_customer: "N/A".to_string(),
            manual_owner: "Unassigned".to_string(),
            import_owner: "N/A".to_string(),
            action_taken: "N/A".to_string(),
        }
    }
}

/// Named import profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    /// Only the issue text column is required
    #[default]
    Minimal,
    /// Issue, customer, date, status, owner and criticality are required
    Strict,
}

/// Import column requirements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ImportSettings {
    /// Named profile
    pub profile: ProfileName,
    /// Explicit required columns, overriding the profile when set
    pub required_columns: Option<Vec<String>>,
}

impl ImportSettings {
    /// Resolve into an import profile
    #[must_use]
    pub fn profile(&self) -> ImportProfile {
        match (&self.required_columns, self.profile) {
            (Some(cols), _) => ImportProfile::Custom(cols.iter().cloned().collect::<BTreeSet<_>>()),
            (None, ProfileName::Minimal) => ImportProfile::Minimal,
            (None, ProfileName::Strict) => ImportProfile::Strict,
        }
    }
}
