//! Feature values.
//!
//! A [`Feature`] is a tag plus a typed payload. Construction validates the
//! structural invariants (form match, dictionary membership, finiteness), so
//! every live `Feature` is well formed and immutable.
//!
//! Per-variant behavior (densify, difference terms) lives in a single match
//! over [`FeatureValue`]; adding a variant fails to compile until each
//! operation decides how to handle it.

use crate::category::{Category, Dictionary};
use crate::error::{FeatureError, Result};
use crate::form::FeatureForm;
use crate::policy::{Alignment, DenseDistance, DistancePolicy, Norm};
use crate::tag::FeatureTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Numeric sub-features stored pre-expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseValues {
    values: Arc<[f64]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    offsets: Option<Arc<BTreeMap<String, usize>>>,
}

impl DenseValues {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values: Vec<f64> = values.into();
        Self {
            values: values.into(),
            offsets: None,
        }
    }

    /// Attach a label → offset lookup.
    pub fn with_offsets<I, S>(mut self, offsets: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let map: BTreeMap<String, usize> =
            offsets.into_iter().map(|(k, v)| (k.into(), v)).collect();
        self.offsets = Some(Arc::new(map));
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a labelled offset.
    ///
    /// `None` if the label is unknown or its offset is past the stored values.
    pub fn get(&self, label: &str) -> Option<f64> {
        let offset = *self.offsets.as_ref()?.get(label)?;
        self.values.get(offset).copied()
    }

    /// Label for a position, falling back to the position itself.
    fn label_at(&self, index: usize) -> String {
        self.offsets
            .as_ref()
            .and_then(|m| m.iter().find(|(_, o)| **o == index).map(|(k, _)| k.clone()))
            .unwrap_or_else(|| index.to_string())
    }
}

/// The typed payload of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", content = "data", rename_all = "snake_case")]
pub enum FeatureValue {
    Numeric(f64),
    Boolean(bool),
    Bounded {
        value: Category,
        dictionary: Dictionary,
    },
    Unbounded(Category),
    BagOfWords {
        word: Category,
        dictionary: Dictionary,
    },
    Dense(DenseValues),
    Sparse(String),
}

impl FeatureValue {
    pub fn bounded(value: impl Into<Category>, dictionary: Dictionary) -> Self {
        FeatureValue::Bounded {
            value: value.into(),
            dictionary,
        }
    }

    pub fn bag_of_words(word: impl Into<Category>, dictionary: Dictionary) -> Self {
        FeatureValue::BagOfWords {
            word: word.into(),
            dictionary,
        }
    }

    pub fn form(&self) -> FeatureForm {
        match self {
            FeatureValue::Numeric(_) => FeatureForm::Numeric,
            FeatureValue::Boolean(_) => FeatureForm::Boolean,
            FeatureValue::Bounded { .. } => FeatureForm::Bounded,
            FeatureValue::Unbounded(_) => FeatureForm::Unbounded,
            FeatureValue::BagOfWords { .. } => FeatureForm::BagOfWords,
            FeatureValue::Dense(_) => FeatureForm::Dense,
            FeatureValue::Sparse(_) => FeatureForm::Sparse,
        }
    }

    /// Dictionary of a categorical value, if it declares one.
    pub fn dictionary(&self) -> Option<&Dictionary> {
        match self {
            FeatureValue::Bounded { dictionary, .. }
            | FeatureValue::BagOfWords { dictionary, .. } => Some(dictionary),
            _ => None,
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(x: f64) -> Self {
        FeatureValue::Numeric(x)
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        FeatureValue::Boolean(b)
    }
}

impl From<DenseValues> for FeatureValue {
    fn from(d: DenseValues) -> Self {
        FeatureValue::Dense(d)
    }
}

/// A single named, typed observation about an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeature")]
pub struct Feature {
    tag: FeatureTag,
    value: FeatureValue,
}

#[derive(Deserialize)]
struct RawFeature {
    tag: FeatureTag,
    value: FeatureValue,
}

impl TryFrom<RawFeature> for Feature {
    type Error = FeatureError;

    fn try_from(raw: RawFeature) -> Result<Self> {
        Feature::new(raw.tag, raw.value)
    }
}

impl Feature {
    /// Create a feature, validating it against its tag.
    pub fn new(tag: FeatureTag, value: FeatureValue) -> Result<Self> {
        if tag.form() != value.form() {
            return Err(FeatureError::validation(
                tag.name(),
                format!(
                    "tag declares form {} but value has form {}",
                    tag.form(),
                    value.form()
                ),
            ));
        }

        match &value {
            FeatureValue::Numeric(x) if !x.is_finite() => {
                return Err(FeatureError::validation(
                    tag.name(),
                    format!("numeric value {} is not finite", x),
                ));
            }
            FeatureValue::Bounded { value, dictionary }
            | FeatureValue::BagOfWords {
                word: value,
                dictionary,
            } if !dictionary.contains(value) => {
                return Err(FeatureError::validation(
                    tag.name(),
                    format!("{} is not in the dictionary", value),
                ));
            }
            FeatureValue::Dense(dense) if dense.values().iter().any(|x| !x.is_finite()) => {
                return Err(FeatureError::validation(
                    tag.name(),
                    "dense values must be finite",
                ));
            }
            _ => {}
        }

        Ok(Self { tag, value })
    }

    pub fn numeric(name: &str, value: f64) -> Result<Self> {
        Self::new(FeatureTag::numeric(name), FeatureValue::Numeric(value))
    }

    pub fn boolean(name: &str, value: bool) -> Self {
        Self {
            tag: FeatureTag::boolean(name),
            value: FeatureValue::Boolean(value),
        }
    }

    pub fn bounded(name: &str, value: impl Into<Category>, dictionary: Dictionary) -> Result<Self> {
        Self::new(
            FeatureTag::bounded(name),
            FeatureValue::bounded(value, dictionary),
        )
    }

    pub fn unbounded(name: &str, value: impl Into<Category>) -> Self {
        Self {
            tag: FeatureTag::unbounded(name),
            value: FeatureValue::Unbounded(value.into()),
        }
    }

    pub fn bag_of_words(
        name: &str,
        word: impl Into<Category>,
        dictionary: Dictionary,
    ) -> Result<Self> {
        Self::new(
            FeatureTag::bag_of_words(name),
            FeatureValue::bag_of_words(word, dictionary),
        )
    }

    pub fn dense(name: &str, values: impl Into<Vec<f64>>) -> Result<Self> {
        Self::new(
            FeatureTag::dense(name),
            FeatureValue::Dense(DenseValues::new(values)),
        )
    }

    pub fn dense_with_offsets<I, S>(
        name: &str,
        values: impl Into<Vec<f64>>,
        offsets: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self::new(
            FeatureTag::dense(name),
            FeatureValue::Dense(DenseValues::new(values).with_offsets(offsets)),
        )
    }

    pub fn sparse(name: &str, value: impl Into<String>) -> Self {
        Self {
            tag: FeatureTag::sparse(name),
            value: FeatureValue::Sparse(value.into()),
        }
    }

    pub fn tag(&self) -> &FeatureTag {
        &self.tag
    }

    pub fn name(&self) -> &str {
        self.tag.name()
    }

    pub fn form(&self) -> FeatureForm {
        self.tag.form()
    }

    pub fn value(&self) -> &FeatureValue {
        &self.value
    }

    /// Labelled lookup into a dense feature.
    pub fn dense_get(&self, label: &str) -> Option<f64> {
        match &self.value {
            FeatureValue::Dense(dense) => dense.get(label),
            _ => None,
        }
    }

    fn unsupported(&self, operation: &'static str) -> FeatureError {
        FeatureError::UnsupportedOperation {
            tag: self.name().to_string(),
            form: self.form(),
            operation,
        }
    }

    /// Expand into numeric sub-features.
    ///
    /// Numeric and boolean give one value, bounded and bag-of-words a one-hot
    /// over the dictionary, dense its stored values. Unbounded and sparse
    /// features have no numeric expansion and fail.
    pub fn densify(&self) -> Result<Vec<f64>> {
        match &self.value {
            FeatureValue::Numeric(x) => Ok(vec![*x]),
            FeatureValue::Boolean(b) => Ok(vec![if *b { 1.0 } else { 0.0 }]),
            FeatureValue::Bounded { value, dictionary } => Ok(dictionary.one_hot(value)),
            FeatureValue::BagOfWords { word, dictionary } => Ok(dictionary.one_hot(word)),
            FeatureValue::Dense(dense) => Ok(dense.values().to_vec()),
            FeatureValue::Unbounded(_) | FeatureValue::Sparse(_) => {
                Err(self.unsupported("densify"))
            }
        }
    }

    /// Number of values [`Feature::densify`] produces.
    pub fn densified_width(&self) -> Result<usize> {
        match &self.value {
            FeatureValue::Numeric(_) | FeatureValue::Boolean(_) => Ok(1),
            FeatureValue::Bounded { dictionary, .. }
            | FeatureValue::BagOfWords { dictionary, .. } => Ok(dictionary.len()),
            FeatureValue::Dense(dense) => Ok(dense.len()),
            FeatureValue::Unbounded(_) | FeatureValue::Sparse(_) => {
                Err(self.unsupported("densify"))
            }
        }
    }

    /// Names of the densified sub-features, aligned with [`Feature::densify`].
    pub fn densified_names(&self) -> Result<Vec<String>> {
        let name = self.name();
        match &self.value {
            FeatureValue::Numeric(_) | FeatureValue::Boolean(_) => Ok(vec![name.to_string()]),
            FeatureValue::Bounded { dictionary, .. }
            | FeatureValue::BagOfWords { dictionary, .. } => Ok(dictionary
                .iter()
                .map(|c| format!("{}_{}", name, c))
                .collect()),
            FeatureValue::Dense(dense) => Ok((0..dense.len())
                .map(|i| format!("{}_{}", name, dense.label_at(i)))
                .collect()),
            FeatureValue::Unbounded(_) | FeatureValue::Sparse(_) => {
                Err(self.unsupported("densify"))
            }
        }
    }

    fn mismatch(&self, other: &Feature) -> FeatureError {
        FeatureError::TypeMismatch {
            position: 0,
            left: self.tag.to_string(),
            right: other.tag.to_string(),
        }
    }

    /// Check that two features can be compared.
    ///
    /// Forms and dictionaries must always match; tag names must match unless
    /// `alignment` is positional.
    pub fn check_comparable(&self, other: &Feature, alignment: Alignment) -> Result<()> {
        if self.form() != other.form() {
            return Err(self.mismatch(other));
        }
        if alignment == Alignment::Tagged && self.name() != other.name() {
            return Err(self.mismatch(other));
        }
        let same_dictionary = match (self.value.dictionary(), other.value.dictionary()) {
            (Some(a), Some(b)) => a.ptr_eq(b) || a == b,
            (a, b) => a == b,
        };
        if !same_dictionary {
            return Err(self.mismatch(other));
        }
        Ok(())
    }

    /// Squared difference under the default policy.
    pub fn squared_diff(&self, other: &Feature) -> Result<f64> {
        self.term(other, Norm::Two, &DistancePolicy::default())
    }

    /// Absolute difference under the default policy.
    pub fn abs_diff(&self, other: &Feature) -> Result<f64> {
        self.term(other, Norm::One, &DistancePolicy::default())
    }

    pub fn squared_diff_with(&self, other: &Feature, policy: &DistancePolicy) -> Result<f64> {
        policy.check()?;
        self.term(other, Norm::Two, policy)
    }

    pub fn abs_diff_with(&self, other: &Feature, policy: &DistancePolicy) -> Result<f64> {
        policy.check()?;
        self.term(other, Norm::One, policy)
    }

    /// Per-feature distance term: absolute difference for the one-norm,
    /// squared difference for the two-norm. Non-numeric forms contribute
    /// their mismatch penalty or zero.
    pub(crate) fn term(&self, other: &Feature, norm: Norm, policy: &DistancePolicy) -> Result<f64> {
        self.check_comparable(other, policy.alignment)?;

        let penalties = &policy.penalties;
        let indicator = |equal: bool, penalty: f64| if equal { 0.0 } else { penalty };

        let term = match (&self.value, &other.value) {
            (FeatureValue::Numeric(a), FeatureValue::Numeric(b)) => numeric_term(a - b, norm),
            (FeatureValue::Boolean(a), FeatureValue::Boolean(b)) => {
                indicator(a == b, penalties.boolean)
            }
            (FeatureValue::Bounded { value: a, .. }, FeatureValue::Bounded { value: b, .. }) => {
                indicator(a == b, penalties.bounded)
            }
            (FeatureValue::Unbounded(a), FeatureValue::Unbounded(b)) => {
                indicator(a == b, penalties.unbounded)
            }
            (
                FeatureValue::BagOfWords { word: a, .. },
                FeatureValue::BagOfWords { word: b, .. },
            ) => indicator(a == b, penalties.bag_of_words),
            (FeatureValue::Dense(a), FeatureValue::Dense(b)) => match policy.dense {
                DenseDistance::Indicator => indicator(a.values() == b.values(), penalties.dense),
                DenseDistance::Elementwise => {
                    if a.len() != b.len() {
                        return Err(FeatureError::ShapeMismatch {
                            expected: a.len(),
                            actual: b.len(),
                        });
                    }
                    a.values()
                        .iter()
                        .zip(b.values())
                        .map(|(x, y)| numeric_term(x - y, norm))
                        .sum::<f64>()
                }
            },
            (FeatureValue::Sparse(a), FeatureValue::Sparse(b)) => {
                indicator(a == b, penalties.sparse)
            }
            _ => return Err(self.mismatch(other)),
        };

        Ok(term)
    }

    /// `(tag name, value)` view for debugging and serialization.
    pub fn as_pair(&self) -> (&str, serde_json::Value) {
        let value = match &self.value {
            FeatureValue::Numeric(x) => serde_json::Value::from(*x),
            FeatureValue::Boolean(b) => serde_json::Value::Bool(*b),
            FeatureValue::Bounded { value, .. } => value.to_json(),
            FeatureValue::Unbounded(value) => value.to_json(),
            FeatureValue::BagOfWords { word, .. } => word.to_json(),
            FeatureValue::Dense(dense) => serde_json::Value::from(dense.values().to_vec()),
            FeatureValue::Sparse(s) => serde_json::Value::String(s.clone()),
        };
        (self.name(), value)
    }
}

fn numeric_term(diff: f64, norm: Norm) -> f64 {
    match norm {
        Norm::One => diff.abs(),
        Norm::Two => diff * diff,
    }
}
