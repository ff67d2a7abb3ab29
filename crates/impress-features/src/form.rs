//! Feature forms.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The form of a feature, recorded on its tag and on every value built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "native", derive(uniffi::Enum))]
pub enum FeatureForm {
    /// A single finite real number
    Numeric,
    /// A single bit
    Boolean,
    /// A category from a declared dictionary
    Bounded,
    /// A category with no declared domain
    Unbounded,
    /// A word from a declared dictionary
    BagOfWords,
    /// Pre-expanded numeric sub-features
    Dense,
    /// An opaque identifier compared only for equality
    Sparse,
}

impl FeatureForm {
    pub const ALL: [FeatureForm; 7] = [
        FeatureForm::Numeric,
        FeatureForm::Boolean,
        FeatureForm::Bounded,
        FeatureForm::Unbounded,
        FeatureForm::BagOfWords,
        FeatureForm::Dense,
        FeatureForm::Sparse,
    ];

    /// Parse from a single character shorthand.
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'n' => Some(Self::Numeric),
            'z' => Some(Self::Boolean),
            'b' => Some(Self::Bounded),
            'u' => Some(Self::Unbounded),
            'w' => Some(Self::BagOfWords),
            'p' => Some(Self::Dense),
            's' => Some(Self::Sparse),
            _ => None,
        }
    }

    /// Shorthand character.
    pub fn code(&self) -> char {
        match self {
            Self::Numeric => 'n',
            Self::Boolean => 'z',
            Self::Bounded => 'b',
            Self::Unbounded => 'u',
            Self::BagOfWords => 'w',
            Self::Dense => 'p',
            Self::Sparse => 's',
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Bounded => "bounded",
            Self::Unbounded => "unbounded",
            Self::BagOfWords => "bag_of_words",
            Self::Dense => "dense",
            Self::Sparse => "sparse",
        }
    }

    /// Whether values of this form have a canonical numeric expansion.
    pub fn is_densifiable(&self) -> bool {
        match self {
            Self::Numeric | Self::Boolean | Self::Bounded | Self::BagOfWords | Self::Dense => true,
            Self::Unbounded | Self::Sparse => false,
        }
    }
}

impl fmt::Display for FeatureForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
