//! Text formats for external numeric consumers.
//!
//! Only the line format is produced here; running the consumer is the
//! caller's business.

use crate::error::Result;
use crate::vector::FeatureVector;

/// Format a vector as a Vowpal Wabbit input line: `| name:value ...`.
///
/// # Examples
/// ```
/// use impress_features::{format_vowpal_wabbit, Feature, FeatureVector};
/// let v = FeatureVector::new(vec![
///     Feature::numeric("cmdroot_ls", 1.0).unwrap(),
///     Feature::numeric("dir_depth", 10.0).unwrap(),
/// ]);
/// assert_eq!(format_vowpal_wabbit(&v).unwrap(), "| cmdroot_ls:1 dir_depth:10");
/// ```
pub fn format_vowpal_wabbit(vector: &FeatureVector) -> Result<String> {
    let mut line = String::from("|");
    for (name, value) in vector.densify_named()? {
        line.push(' ');
        line.push_str(&sanitize_name(&name));
        line.push(':');
        line.push_str(&value.to_string());
    }
    Ok(line)
}

/// Format a labelled training example: `label | name:value ...`.
pub fn format_vowpal_wabbit_labeled(label: f64, vector: &FeatureVector) -> Result<String> {
    Ok(format!("{} {}", label, format_vowpal_wabbit(vector)?))
}

/// Whitespace, `:` and `|` are structural in the line format.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() || c == ':' || c == '|' { '_' } else { c })
        .collect()
}
