//! Feature generators over domain data

mod common;

use common::Document;
use impress_features::{
    densify_batch, format_vowpal_wabbit_labeled, pairwise_distances, DistancePolicy,
    FeatureGenerator, FeatureTag, FeatureValue, FeatureVector, Norm, Result,
};

/// Word-frequency features for topic classification.
struct DocumentGenerator {
    len: FeatureTag,
    first: FeatureTag,
    words: Vec<(String, FeatureTag)>,
}

impl DocumentGenerator {
    fn new(words: &[&str]) -> Self {
        Self {
            len: FeatureTag::numeric("len"),
            first: FeatureTag::unbounded("first"),
            words: words
                .iter()
                .map(|w| (w.to_string(), FeatureTag::numeric(format!("word_{}", w))))
                .collect(),
        }
    }

    /// Numeric-only view suitable for densify.
    fn numeric(&self, doc: &Document) -> Result<FeatureVector> {
        let mut features = vec![self.len.feature(FeatureValue::Numeric(doc.len() as f64))?];
        for (word, tag) in &self.words {
            features.push(tag.feature(FeatureValue::Numeric(doc.freq(word)))?);
        }
        FeatureVector::indexed(features)
    }
}

impl FeatureGenerator<Document> for DocumentGenerator {
    fn generate(&self, doc: &Document) -> Result<FeatureVector> {
        let mut features = self.numeric(doc)?.features().to_vec();
        features.push(
            self.first
                .feature(FeatureValue::Unbounded(doc.first().into()))?,
        );
        FeatureVector::indexed(features)
    }
}

fn corpus() -> Vec<Document> {
    vec![
        Document::new("the car needs a new wheel part"),
        Document::new("god spoke of the ark and the verse"),
        Document::new("a fast car"),
    ]
}

#[test]
fn test_generated_vectors_share_schema() {
    let gen = DocumentGenerator::new(&["car", "god", "wheel"]);
    let vecs = gen.generate_batch(&corpus()).unwrap();
    assert_eq!(vecs.len(), 3);
    assert!(vecs[0].is_comparable(&vecs[1]));
    assert!(vecs[1].is_comparable(&vecs[2]));
    assert_eq!(vecs[2].numeric(&FeatureTag::numeric("len")).unwrap(), 3.0);
    assert_eq!(vecs[2].unbounded(&gen.first).unwrap().to_string(), "a");
}

#[test]
fn test_training_rows() {
    let gen = DocumentGenerator::new(&["car", "god"]);
    let numeric: Vec<FeatureVector> = corpus()
        .iter()
        .map(|d| gen.numeric(d))
        .collect::<Result<_>>()
        .unwrap();

    let rows = densify_batch(&numeric).unwrap();
    assert!(rows.iter().all(|r| r.len() == 3));
    assert_eq!(rows[2], vec![3.0, 1.0 / 3.0, 0.0]);

    let line = format_vowpal_wabbit_labeled(1.0, &numeric[2]).unwrap();
    assert!(line.starts_with("1 | len:3 word_car:0.333"));
    assert!(line.ends_with(" word_god:0"));
}

#[test]
fn test_full_vectors_cannot_densify() {
    let gen = DocumentGenerator::new(&["car"]);
    let vecs = gen.generate_batch(&corpus()).unwrap();
    assert!(densify_batch(&vecs).is_err());
}

#[test]
fn test_pairwise_document_distances() {
    let gen = DocumentGenerator::new(&["car", "god", "wheel", "ark"]);
    let vecs = gen.generate_batch(&corpus()).unwrap();
    let m = pairwise_distances(&vecs, Norm::Two, &DistancePolicy::default()).unwrap();
    assert_eq!(m[0][1], m[1][0]);
    assert_eq!(m[2][2], 0.0);
}
