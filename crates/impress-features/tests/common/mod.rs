//! Shared fixtures for integration tests

#![allow(dead_code)]

use impress_features::{Dictionary, Feature, FeatureVector};

pub fn words() -> Dictionary {
    Dictionary::new(["foo", "bar", "baz"]).unwrap()
}

/// `[bag_of_words f1=bar, numeric f2=42, boolean f3=false]`
pub fn fvec() -> FeatureVector {
    FeatureVector::new(vec![
        Feature::bag_of_words("f1", "bar", words()).unwrap(),
        Feature::numeric("f2", 42.0).unwrap(),
        Feature::boolean("f3", false),
    ])
}

/// `[bag_of_words g1=foo, numeric g2=41, boolean g3=true]`
pub fn gvec() -> FeatureVector {
    FeatureVector::new(vec![
        Feature::bag_of_words("g1", "foo", words()).unwrap(),
        Feature::numeric("g2", 41.0).unwrap(),
        Feature::boolean("g3", true),
    ])
}

/// A small text document, split on single spaces.
pub struct Document {
    words: Vec<String>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            words: text.to_lowercase().split(' ').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn freq(&self, word: &str) -> f64 {
        let count = self.words.iter().filter(|w| *w == word).count();
        count as f64 / self.words.len() as f64
    }

    pub fn first(&self) -> &str {
        &self.words[0]
    }
}
