//! Producers of feature vectors from domain data.

use crate::error::Result;
use crate::vector::FeatureVector;

/// Turns a domain item (a document, a command, an event) into a feature
/// vector. Every vector a generator produces should share one schema.
pub trait FeatureGenerator<T> {
    fn generate(&self, item: &T) -> Result<FeatureVector>;

    /// Generate vectors for many items, stopping at the first failure.
    fn generate_batch(&self, items: &[T]) -> Result<Vec<FeatureVector>> {
        items.iter().map(|item| self.generate(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;
    use crate::tag::FeatureTag;
    use crate::FeatureValue;

    struct ShellCommand {
        root: String,
        depth: usize,
    }

    struct CommandGenerator {
        root: FeatureTag,
        depth: FeatureTag,
    }

    impl FeatureGenerator<ShellCommand> for CommandGenerator {
        fn generate(&self, cmd: &ShellCommand) -> Result<FeatureVector> {
            FeatureVector::indexed(vec![
                Feature::new(self.root.clone(), FeatureValue::Unbounded(cmd.root.as_str().into()))?,
                self.depth.feature(FeatureValue::Numeric(cmd.depth as f64))?,
            ])
        }
    }

    #[test]
    fn batch_generation_shares_schema() {
        let gen = CommandGenerator {
            root: FeatureTag::unbounded("cmdroot"),
            depth: FeatureTag::numeric("dir_depth"),
        };
        let cmds = vec![
            ShellCommand {
                root: "ls".to_string(),
                depth: 10,
            },
            ShellCommand {
                root: "cd".to_string(),
                depth: 3,
            },
        ];
        let vecs = gen.generate_batch(&cmds).unwrap();
        assert_eq!(vecs.len(), 2);
        assert!(vecs[0].is_comparable(&vecs[1]));
        assert_eq!(vecs[1].numeric(&gen.depth).unwrap(), 3.0);
    }
}
