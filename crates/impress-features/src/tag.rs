//! Feature tags.

use crate::error::Result;
use crate::feature::{Feature, FeatureValue};
use crate::form::FeatureForm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The identity of a feature: a name plus the form every value must have.
///
/// Cloning is cheap, so one tag can be shared by every vector of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureTag {
    name: Arc<str>,
    form: FeatureForm,
}

impl FeatureTag {
    pub fn new(name: impl AsRef<str>, form: FeatureForm) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            form,
        }
    }

    pub fn numeric(name: impl AsRef<str>) -> Self {
        Self::new(name, FeatureForm::Numeric)
    }

    pub fn boolean(name: impl AsRef<str>) -> Self {
        Self::new(name, FeatureForm::Boolean)
    }

    pub fn bounded(name: impl AsRef<str>) -> Self {
        Self::new(name, FeatureForm::Bounded)
    }

    pub fn unbounded(name: impl AsRef<str>) -> Self {
        Self::new(name, FeatureForm::Unbounded)
    }

    pub fn bag_of_words(name: impl AsRef<str>) -> Self {
        Self::new(name, FeatureForm::BagOfWords)
    }

    pub fn dense(name: impl AsRef<str>) -> Self {
        Self::new(name, FeatureForm::Dense)
    }

    pub fn sparse(name: impl AsRef<str>) -> Self {
        Self::new(name, FeatureForm::Sparse)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn form(&self) -> FeatureForm {
        self.form
    }

    /// Build a feature bound to this tag.
    ///
    /// Fails with a validation error if the value's form differs from the tag's.
    pub fn feature(&self, value: FeatureValue) -> Result<Feature> {
        Feature::new(self.clone(), value)
    }
}

impl fmt::Display for FeatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.form.code())
    }
}
