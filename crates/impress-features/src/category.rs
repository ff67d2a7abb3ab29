//! Categorical payloads and dictionaries.

use crate::error::{FeatureError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// A categorical value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Flag(bool),
    Integer(i64),
    Text(String),
}

impl Category {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Category::Text(s) => Some(s),
            _ => None,
        }
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        match self {
            Category::Flag(b) => serde_json::Value::Bool(*b),
            Category::Integer(i) => serde_json::Value::from(*i),
            Category::Text(s) => serde_json::Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Flag(b) => write!(f, "{}", b),
            Category::Integer(i) => write!(f, "{}", i),
            Category::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::Text(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::Text(s)
    }
}

impl From<i64> for Category {
    fn from(i: i64) -> Self {
        Category::Integer(i)
    }
}

impl From<i32> for Category {
    fn from(i: i32) -> Self {
        Category::Integer(i64::from(i))
    }
}

impl From<bool> for Category {
    fn from(b: bool) -> Self {
        Category::Flag(b)
    }
}

/// The ordered, exhaustive set of admissible categories for a feature.
///
/// Order is the one-hot order used by densify. Entries are unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Category>", into = "Vec<Category>")]
pub struct Dictionary {
    entries: Arc<[Category]>,
}

impl Dictionary {
    /// Create a dictionary, rejecting empty or duplicated entries.
    pub fn new<I, C>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        let entries: Vec<Category> = entries.into_iter().map(Into::into).collect();
        if entries.is_empty() {
            return Err(FeatureError::validation("dictionary", "dictionary is empty"));
        }
        {
            let mut seen = HashSet::with_capacity(entries.len());
            for entry in &entries {
                if !seen.insert(entry) {
                    return Err(FeatureError::validation(
                        "dictionary",
                        format!("duplicate entry {}", entry),
                    ));
                }
            }
        }
        Ok(Self {
            entries: entries.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, category: &Category) -> Option<usize> {
        self.entries.iter().position(|c| c == category)
    }

    pub fn contains(&self, category: &Category) -> bool {
        self.index_of(category).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.entries.get(index)
    }

    /// Whether both dictionaries share the same storage.
    pub fn ptr_eq(&self, other: &Dictionary) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter()
    }

    /// One-hot encoding of `category` over this dictionary.
    pub fn one_hot(&self, category: &Category) -> Vec<f64> {
        self.entries
            .iter()
            .map(|c| if c == category { 1.0 } else { 0.0 })
            .collect()
    }
}

impl TryFrom<Vec<Category>> for Dictionary {
    type Error = FeatureError;

    fn try_from(entries: Vec<Category>) -> Result<Self> {
        Dictionary::new(entries)
    }
}

impl From<Dictionary> for Vec<Category> {
    fn from(dictionary: Dictionary) -> Self {
        dictionary.entries.to_vec()
    }
}
