//! Feature vectors.
//!
//! A [`FeatureVector`] is an ordered, immutable list of features describing
//! one entity. Order is significant: densify concatenates in order and
//! distance compares position by position.
//!
//! Vectors built with [`FeatureVector::indexed`] also guarantee unique tag
//! names and answer lookups through a name index. Plain vectors answer
//! lookups by scanning and return the first feature with that name.

use crate::category::{Category, Dictionary};
use crate::error::{FeatureError, Result};
use crate::feature::{DenseValues, Feature, FeatureValue};
use crate::form::FeatureForm;
use crate::policy::{DistancePolicy, Norm};
use crate::tag::FeatureTag;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// An ordered collection of features describing one entity.
///
/// Equality compares the features only; whether a vector carries a name
/// index does not matter.
#[derive(Debug, Clone, Default)]
pub struct FeatureVector {
    features: Vec<Feature>,
    index: Option<HashMap<String, usize>>,
}

impl FeatureVector {
    /// Create a positional vector. Duplicate tag names are allowed.
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            index: None,
        }
    }

    /// Create a tag-indexed vector, rejecting duplicate tag names.
    pub fn indexed(features: Vec<Feature>) -> Result<Self> {
        let mut index = HashMap::with_capacity(features.len());
        for (i, feature) in features.iter().enumerate() {
            if index.insert(feature.name().to_string(), i).is_some() {
                return Err(FeatureError::validation(
                    feature.name(),
                    "duplicate tag in feature vector",
                ));
            }
        }
        Ok(Self {
            features,
            index: Some(index),
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn get(&self, position: usize) -> Option<&Feature> {
        self.features.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Concatenate the densified form of every feature, in order.
    pub fn densify(&self) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.len());
        for feature in &self.features {
            out.extend(feature.densify()?);
        }
        tracing::debug!(features = self.len(), width = out.len(), "densified feature vector");
        Ok(out)
    }

    /// Length of [`FeatureVector::densify`]'s output.
    pub fn densified_width(&self) -> Result<usize> {
        self.features.iter().map(Feature::densified_width).sum()
    }

    /// Densify, pairing every value with its sub-feature name.
    pub fn densify_named(&self) -> Result<Vec<(String, f64)>> {
        let mut out = Vec::with_capacity(self.len());
        for feature in &self.features {
            out.extend(feature.densified_names()?.into_iter().zip(feature.densify()?));
        }
        Ok(out)
    }

    /// Distance under the default policy.
    pub fn distance(&self, other: &FeatureVector, norm: Norm) -> Result<f64> {
        self.distance_with(other, norm, &DistancePolicy::default())
    }

    /// Distance between two vectors of the same schema.
    ///
    /// The one-norm sums per-position absolute terms; the two-norm takes the
    /// root of the summed squared terms. Lengths are checked before any term
    /// is computed, and every position is checked for comparability under
    /// the policy's alignment. A policy with a negative or non-finite
    /// penalty is rejected with a validation error.
    pub fn distance_with(
        &self,
        other: &FeatureVector,
        norm: Norm,
        policy: &DistancePolicy,
    ) -> Result<f64> {
        policy.check()?;
        if self.len() != other.len() {
            return Err(FeatureError::ShapeMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }

        let mut sum = 0.0;
        for (i, (a, b)) in self.features.iter().zip(&other.features).enumerate() {
            let term = a.term(b, norm, policy).map_err(|e| e.at_position(i))?;
            tracing::trace!(position = i, tag = a.name(), term, "distance term");
            sum += term;
        }

        let distance = match norm {
            Norm::One => sum,
            Norm::Two => sum.sqrt(),
        };
        tracing::debug!(?norm, features = self.len(), distance, "computed distance");
        Ok(distance)
    }

    /// Whether `other` shares this vector's schema.
    pub fn is_comparable(&self, other: &FeatureVector) -> bool {
        self.schema() == other.schema()
    }

    /// Find a feature by tag name.
    pub fn lookup(&self, name: &str) -> Result<&Feature> {
        let found = match &self.index {
            Some(index) => index.get(name).map(|&i| &self.features[i]),
            None => self.features.iter().find(|f| f.name() == name),
        };
        found.ok_or_else(|| FeatureError::NotFound(name.to_string()))
    }

    /// Find a feature by tag, requiring the tag's declared form to be `form`.
    fn lookup_as(&self, tag: &FeatureTag, form: FeatureForm) -> Result<&FeatureValue> {
        if tag.form() != form {
            return Err(FeatureError::FormMismatch {
                tag: tag.name().to_string(),
                expected: form,
                found: tag.form(),
            });
        }
        let feature = self.lookup(tag.name())?;
        if feature.form() != form {
            return Err(FeatureError::FormMismatch {
                tag: tag.name().to_string(),
                expected: form,
                found: feature.form(),
            });
        }
        Ok(feature.value())
    }

    pub fn numeric(&self, tag: &FeatureTag) -> Result<f64> {
        match self.lookup_as(tag, FeatureForm::Numeric)? {
            FeatureValue::Numeric(x) => Ok(*x),
            other => Err(unexpected(tag, FeatureForm::Numeric, other)),
        }
    }

    pub fn boolean(&self, tag: &FeatureTag) -> Result<bool> {
        match self.lookup_as(tag, FeatureForm::Boolean)? {
            FeatureValue::Boolean(b) => Ok(*b),
            other => Err(unexpected(tag, FeatureForm::Boolean, other)),
        }
    }

    pub fn bounded(&self, tag: &FeatureTag) -> Result<(&Category, &Dictionary)> {
        match self.lookup_as(tag, FeatureForm::Bounded)? {
            FeatureValue::Bounded { value, dictionary } => Ok((value, dictionary)),
            other => Err(unexpected(tag, FeatureForm::Bounded, other)),
        }
    }

    pub fn unbounded(&self, tag: &FeatureTag) -> Result<&Category> {
        match self.lookup_as(tag, FeatureForm::Unbounded)? {
            FeatureValue::Unbounded(value) => Ok(value),
            other => Err(unexpected(tag, FeatureForm::Unbounded, other)),
        }
    }

    pub fn bag_of_words(&self, tag: &FeatureTag) -> Result<(&Category, &Dictionary)> {
        match self.lookup_as(tag, FeatureForm::BagOfWords)? {
            FeatureValue::BagOfWords { word, dictionary } => Ok((word, dictionary)),
            other => Err(unexpected(tag, FeatureForm::BagOfWords, other)),
        }
    }

    pub fn dense(&self, tag: &FeatureTag) -> Result<&DenseValues> {
        match self.lookup_as(tag, FeatureForm::Dense)? {
            FeatureValue::Dense(dense) => Ok(dense),
            other => Err(unexpected(tag, FeatureForm::Dense, other)),
        }
    }

    pub fn sparse(&self, tag: &FeatureTag) -> Result<&str> {
        match self.lookup_as(tag, FeatureForm::Sparse)? {
            FeatureValue::Sparse(s) => Ok(s.as_str()),
            other => Err(unexpected(tag, FeatureForm::Sparse, other)),
        }
    }

    /// Apply `f` to every feature in order.
    pub fn map<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&Feature) -> T,
    {
        self.features.iter().map(f).collect()
    }

    /// Tag name → value view. Later duplicates overwrite earlier ones.
    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        self.features
            .iter()
            .map(|f| {
                let (name, value) = f.as_pair();
                (name.to_string(), value)
            })
            .collect()
    }

    pub fn schema(&self) -> Schema {
        Schema {
            entries: self.features.iter().map(SchemaEntry::of).collect(),
        }
    }
}

impl PartialEq for FeatureVector {
    fn eq(&self, other: &Self) -> bool {
        self.features == other.features
    }
}

// Only reachable if a feature's value disagrees with its tag, which
// construction rules out.
fn unexpected(tag: &FeatureTag, expected: FeatureForm, found: &FeatureValue) -> FeatureError {
    FeatureError::FormMismatch {
        tag: tag.name().to_string(),
        expected,
        found: found.form(),
    }
}

impl FromIterator<Feature> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        FeatureVector::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FeatureVector {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.features.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FeatureVector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<Feature>::deserialize(deserializer).map(FeatureVector::new)
    }
}

/// One position of a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    pub tag: FeatureTag,
    /// Dictionary for bounded and bag-of-words features
    pub dictionary: Option<Dictionary>,
    /// Stored length for dense features
    pub dense_len: Option<usize>,
}

impl SchemaEntry {
    fn of(feature: &Feature) -> Self {
        let dense_len = match feature.value() {
            FeatureValue::Dense(dense) => Some(dense.len()),
            _ => None,
        };
        Self {
            tag: feature.tag().clone(),
            dictionary: feature.value().dictionary().cloned(),
            dense_len,
        }
    }

    /// Densified width of any feature with this entry, if it can be densified.
    pub fn densified_width(&self) -> Option<usize> {
        match self.tag.form() {
            FeatureForm::Numeric | FeatureForm::Boolean => Some(1),
            FeatureForm::Bounded | FeatureForm::BagOfWords => {
                self.dictionary.as_ref().map(Dictionary::len)
            }
            FeatureForm::Dense => self.dense_len,
            FeatureForm::Unbounded | FeatureForm::Sparse => None,
        }
    }
}

/// The ordered tags, forms and dictionaries a vector was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Schema {
    pub entries: Vec<SchemaEntry>,
}

impl Schema {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Width every vector of this schema densifies to, or `None` if some
    /// entry cannot be densified.
    pub fn densified_width(&self) -> Option<usize> {
        self.entries.iter().map(SchemaEntry::densified_width).sum()
    }
}
