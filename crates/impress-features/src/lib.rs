//! impress-features: Typed feature vectors, densification and distance.
//!
//! A feature is a named, typed observation about an entity (a document, a
//! command, an event). Features are collected into a [`FeatureVector`],
//! which can be:
//!
//! - **densified** into a fixed-width `Vec<f64>` for a numeric consumer
//!   such as a classifier
//! - **compared** with another vector of the same schema under the one- or
//!   two-norm
//!
//! # Forms
//!
//! | Form        | Payload                         | Densified width |
//! |-------------|---------------------------------|-----------------|
//! | numeric     | finite `f64`                    | 1               |
//! | boolean     | `bool`                          | 1               |
//! | bounded     | category from a dictionary      | dictionary size |
//! | unbounded   | category, no declared domain    | not densifiable |
//! | bag_of_words| word from a dictionary          | dictionary size |
//! | dense       | pre-expanded `f64` values       | value count     |
//! | sparse      | opaque identifier               | not densifiable |
//!
//! # Example
//!
//! ```
//! use impress_features::{Dictionary, Feature, FeatureVector, Norm};
//!
//! let words = Dictionary::new(["foo", "bar", "baz"]).unwrap();
//! let f = FeatureVector::new(vec![
//!     Feature::bag_of_words("f1", "bar", words).unwrap(),
//!     Feature::numeric("f2", 42.0).unwrap(),
//!     Feature::boolean("f3", false),
//! ]);
//! assert_eq!(f.densify().unwrap(), vec![0.0, 1.0, 0.0, 42.0, 0.0]);
//! assert_eq!(f.distance(&f, Norm::Two).unwrap(), 0.0);
//! ```

#[cfg(feature = "native")]
uniffi::setup_scaffolding!();

pub mod category;
pub mod error;
pub mod feature;
pub mod form;
pub mod format;
pub mod generator;
pub mod metrics;
pub mod policy;
pub mod tag;
pub mod vector;

pub use category::*;
pub use error::*;
pub use feature::*;
pub use form::*;
pub use format::*;
pub use generator::*;
pub use metrics::*;
pub use policy::*;
pub use tag::*;
pub use vector::*;
