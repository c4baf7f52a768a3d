//! Behavior tree loader.

use std::path::Path;

use behavior_tree::NodeSpec;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`NodeSpec`] trees from RON files. Leaf names are bound later,
/// when a controller compiles the tree.
pub struct TreeLoader;

impl TreeLoader {
    pub fn load(path: &Path) -> LoadResult<NodeSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<NodeSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse behavior tree RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use behavior_tree::builder::{action, condition, selector, sequence};
    use std::io::Write;

    #[test]
    fn loads_tree_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"Selector([
                Sequence([Condition("is_hurt"), Action("heal_self")]),
                Action("idle"),
            ])"#
        )
        .unwrap();

        let tree = TreeLoader::load(file.path()).unwrap();
        assert_eq!(
            tree,
            selector(vec![
                sequence(vec![condition("is_hurt"), action("heal_self")]),
                action("idle"),
            ])
        );
    }

    #[test]
    fn malformed_tree_is_an_error() {
        assert!(TreeLoader::parse("Selector([Action(idle)])").is_err());
    }
}
