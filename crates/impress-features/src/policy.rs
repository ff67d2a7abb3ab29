//! Distance policy: norms, alignment and mismatch penalties.
//!
//! Non-numeric features contribute a fixed penalty when their data differ and
//! zero otherwise. The penalties are a table rather than constants so callers
//! can tune them per schema. A policy can be loaded from TOML:
//!
//! ```toml
//! alignment = "positional"
//! dense = "elementwise"
//!
//! [penalties]
//! boolean = 1.0
//! bag_of_words = 2.0
//! sparse = 1.0
//! ```
//!
//! Missing keys keep their defaults.

use crate::form::FeatureForm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregation rule for per-feature differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "native", derive(uniffi::Enum))]
pub enum Norm {
    /// Sum of absolute differences
    One,
    /// Root of the sum of squared differences
    Two,
}

/// How positions of two vectors are matched before computing terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "native", derive(uniffi::Enum))]
pub enum Alignment {
    /// Tag name, form and dictionary must match at every position
    #[default]
    Tagged,
    /// Only form and dictionary must match; tag names are ignored
    Positional,
}

/// Distance rule for dense features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "native", derive(uniffi::Enum))]
pub enum DenseDistance {
    /// Equality indicator scaled by the dense penalty
    #[default]
    Indicator,
    /// Per-element absolute or squared difference
    Elementwise,
}

/// Penalty contributed by a mismatching non-numeric feature.
///
/// The same value is added for both norms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MismatchPenalties {
    pub boolean: f64,
    pub bounded: f64,
    pub unbounded: f64,
    pub bag_of_words: f64,
    pub dense: f64,
    pub sparse: f64,
}

impl Default for MismatchPenalties {
    fn default() -> Self {
        Self {
            boolean: 1.0,
            bounded: 1.0,
            unbounded: 1.0,
            // Two one-hot vectors that differ disagree in two positions.
            bag_of_words: 2.0,
            dense: 1.0,
            sparse: 1.0,
        }
    }
}

impl MismatchPenalties {
    /// Penalty for a form, or `None` for numeric features which use the
    /// algebraic difference instead.
    pub fn for_form(&self, form: FeatureForm) -> Option<f64> {
        match form {
            FeatureForm::Numeric => None,
            FeatureForm::Boolean => Some(self.boolean),
            FeatureForm::Bounded => Some(self.bounded),
            FeatureForm::Unbounded => Some(self.unbounded),
            FeatureForm::BagOfWords => Some(self.bag_of_words),
            FeatureForm::Dense => Some(self.dense),
            FeatureForm::Sparse => Some(self.sparse),
        }
    }

    fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("boolean", self.boolean),
            ("bounded", self.bounded),
            ("unbounded", self.unbounded),
            ("bag_of_words", self.bag_of_words),
            ("dense", self.dense),
            ("sparse", self.sparse),
        ]
    }
}

/// Errors that can occur when loading a distance policy
#[derive(Debug, thiserror::Error)]
pub enum PolicyLoadError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid penalty for {form}: {value}")]
    InvalidPenalty { form: String, value: f64 },

    #[error("TOML serialize error: {0}")]
    Serialize(String),
}

/// Complete distance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DistancePolicy {
    pub alignment: Alignment,
    pub dense: DenseDistance,
    pub penalties: MismatchPenalties,
}

impl DistancePolicy {
    /// Policy that trusts positional alignment, as used when comparing
    /// vectors built by different generators over the same layout.
    pub fn positional() -> Self {
        Self {
            alignment: Alignment::Positional,
            ..Self::default()
        }
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_dense(mut self, dense: DenseDistance) -> Self {
        self.dense = dense;
        self
    }

    pub fn with_penalties(mut self, penalties: MismatchPenalties) -> Self {
        self.penalties = penalties;
        self
    }

    /// Parse a policy from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, PolicyLoadError> {
        let policy: DistancePolicy =
            toml::from_str(content).map_err(|e| PolicyLoadError::Parse(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Load a policy from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyLoadError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| PolicyLoadError::Io(e.to_string()))?;
        Self::from_toml_str(&content).inspect_err(|e| {
            tracing::warn!("Rejected distance policy {:?}: {}", path, e);
        })
    }

    /// Penalties must be finite and non-negative so distances stay non-negative.
    pub fn validate(&self) -> Result<(), PolicyLoadError> {
        for (form, value) in self.penalties.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyLoadError::InvalidPenalty {
                    form: form.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, PolicyLoadError> {
        toml::to_string(self).map_err(|e| PolicyLoadError::Serialize(e.to_string()))
    }

    /// [`DistancePolicy::validate`] as a feature error, for policies built in code.
    pub(crate) fn check(&self) -> crate::error::Result<()> {
        self.validate()
            .map_err(|e| crate::error::FeatureError::validation("policy", e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_penalties() {
        let p = MismatchPenalties::default();
        assert_eq!(p.for_form(FeatureForm::Numeric), None);
        assert_eq!(p.for_form(FeatureForm::Boolean), Some(1.0));
        assert_eq!(p.for_form(FeatureForm::BagOfWords), Some(2.0));
        assert_eq!(p.for_form(FeatureForm::Sparse), Some(1.0));
    }

    #[test]
    fn parse_partial_policy() {
        let policy = DistancePolicy::from_toml_str(
            r#"
alignment = "positional"

[penalties]
sparse = 2.0
"#,
        )
        .unwrap();
        assert_eq!(policy.alignment, Alignment::Positional);
        assert_eq!(policy.dense, DenseDistance::Indicator);
        assert_eq!(policy.penalties.sparse, 2.0);
        assert_eq!(policy.penalties.bag_of_words, 2.0);
    }

    #[test]
    fn parse_empty_policy_is_default() {
        let policy = DistancePolicy::from_toml_str("").unwrap();
        assert_eq!(policy, DistancePolicy::default());
    }

    #[test]
    fn reject_negative_penalty() {
        let err = DistancePolicy::from_toml_str("[penalties]\nboolean = -1.0\n").unwrap_err();
        assert!(matches!(err, PolicyLoadError::InvalidPenalty { ref form, .. } if form == "boolean"));
    }

    #[test]
    fn check_rejects_policy_built_in_code() {
        let policy = DistancePolicy::default().with_penalties(MismatchPenalties {
            boolean: -1.0,
            ..MismatchPenalties::default()
        });
        let err = policy.check().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Validation);

        let policy = DistancePolicy::default().with_penalties(MismatchPenalties {
            sparse: f64::NAN,
            ..MismatchPenalties::default()
        });
        assert!(policy.check().is_err());
        assert!(DistancePolicy::default().check().is_ok());
    }

    #[test]
    fn reject_unknown_alignment() {
        let err = DistancePolicy::from_toml_str("alignment = \"diagonal\"\n").unwrap_err();
        assert!(matches!(err, PolicyLoadError::Parse(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let policy = DistancePolicy::positional().with_dense(DenseDistance::Elementwise);
        let text = policy.to_toml_string().unwrap();
        assert_eq!(DistancePolicy::from_toml_str(&text).unwrap(), policy);
    }

    #[test]
    fn serialize_errors_are_not_parse_errors() {
        let err = PolicyLoadError::Serialize("unsupported value".to_string());
        assert_eq!(err.to_string(), "TOML serialize error: unsupported value");
        assert!(!matches!(err, PolicyLoadError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.toml");
        std::fs::write(&path, "dense = \"elementwise\"\n").unwrap();
        let policy = DistancePolicy::from_path(&path).unwrap();
        assert_eq!(policy.dense, DenseDistance::Elementwise);

        let missing = DistancePolicy::from_path(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, PolicyLoadError::Io(_)));
    }
}
