//! Property-based tests for densify width, distance symmetry and identity

mod common;

use common::words;
use impress_features::{
    Dictionary, DenseDistance, DistancePolicy, Feature, FeatureVector, Norm,
};
use proptest::prelude::*;

fn colors() -> Dictionary {
    Dictionary::new(["red", "amber", "blue", "gray"]).unwrap()
}

/// A vector over the fixed schema
/// `[numeric x, boolean b, bounded color, bag_of_words w, dense d(3), unbounded u, sparse s]`.
fn schema_vector(
    x: f64,
    b: bool,
    color: usize,
    word: usize,
    dense: Vec<f64>,
    u: String,
    s: String,
) -> FeatureVector {
    let colors = colors();
    let words = words();
    let color = colors.get(color).unwrap().clone();
    let word = words.get(word).unwrap().clone();
    FeatureVector::indexed(vec![
        Feature::numeric("x", x).unwrap(),
        Feature::boolean("b", b),
        Feature::bounded("color", color, colors).unwrap(),
        Feature::bag_of_words("w", word, words).unwrap(),
        Feature::dense("d", dense).unwrap(),
        Feature::unbounded("u", u),
        Feature::sparse("s", s),
    ])
    .unwrap()
}

fn arb_vector() -> impl Strategy<Value = FeatureVector> {
    (
        -1e6f64..1e6,
        any::<bool>(),
        0usize..4,
        0usize..3,
        prop::collection::vec(-1e3f64..1e3, 3),
        "[a-z]{1,4}",
        "/[a-z]{1,6}",
    )
        .prop_map(|(x, b, c, w, d, u, s)| schema_vector(x, b, c, w, d, u, s))
}

/// The densifiable prefix of a schema vector.
fn densifiable(v: &FeatureVector) -> FeatureVector {
    FeatureVector::new(v.features()[..5].to_vec())
}

fn norms() -> impl Strategy<Value = Norm> {
    prop_oneof![Just(Norm::One), Just(Norm::Two)]
}

proptest! {
    #[test]
    fn test_densify_width_is_schema_determined(a in arb_vector(), b in arb_vector()) {
        let da = densifiable(&a).densify().unwrap();
        let db = densifiable(&b).densify().unwrap();
        prop_assert_eq!(da.len(), db.len());
        prop_assert_eq!(da.len(), 1 + 1 + 4 + 3 + 3);
        prop_assert_eq!(Some(da.len()), densifiable(&a).schema().densified_width());
    }

    #[test]
    fn test_vectors_of_one_schema_are_comparable(a in arb_vector(), b in arb_vector()) {
        prop_assert!(a.is_comparable(&b));
    }

    #[test]
    fn test_distance_symmetric(a in arb_vector(), b in arb_vector(), norm in norms()) {
        let ab = a.distance(&b, norm).unwrap();
        let ba = b.distance(&a, norm).unwrap();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn test_distance_symmetric_elementwise_dense(a in arb_vector(), b in arb_vector(), norm in norms()) {
        let policy = DistancePolicy::default().with_dense(DenseDistance::Elementwise);
        let ab = a.distance_with(&b, norm, &policy).unwrap();
        let ba = b.distance_with(&a, norm, &policy).unwrap();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn test_distance_identity(a in arb_vector(), norm in norms()) {
        prop_assert_eq!(a.distance(&a, norm).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_non_negative(a in arb_vector(), b in arb_vector(), norm in norms()) {
        prop_assert!(a.distance(&b, norm).unwrap() >= 0.0);
    }

    #[test]
    fn test_one_hot_has_single_one(c in 0usize..4) {
        let dict = colors();
        let f = Feature::bounded("color", dict.get(c).unwrap().clone(), dict).unwrap();
        let dense = f.densify().unwrap();
        prop_assert_eq!(dense.iter().filter(|&&x| x == 1.0).count(), 1);
        prop_assert_eq!(dense[c], 1.0);
    }
}
