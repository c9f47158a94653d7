use crate::models::{ConfigurationPath, TreeItem};

/// Flattens the selectable paths into a depth-annotated list for the tree view.
pub(crate) fn build_tree_items(paths: &[ConfigurationPath]) -> Vec<TreeItem> {
    let mut root = TreeNode::new("");
    for path in paths {
        root.insert(&path.tree_segments(), *path);
    }

    let mut items = Vec::new();
    root.flatten(0, &mut items);
    items
}

#[derive(Clone, Debug)]
struct TreeNode {
    name: String,
    path: Option<ConfigurationPath>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: None,
            children: Vec::new(),
        }
    }

    fn insert(&mut self, parts: &[&str], path: ConfigurationPath) {
        let Some((part, rest)) = parts.split_first() else {
            self.path = Some(path);
            return;
        };
        match self.children.iter_mut().find(|child| child.name == *part) {
            Some(node) => node.insert(rest, path),
            None => {
                let mut node = TreeNode::new(part);
                node.insert(rest, path);
                self.children.push(node);
            }
        }
    }

    fn flatten(&self, depth: usize, items: &mut Vec<TreeItem>) {
        for child in &self.children {
            items.push(TreeItem {
                label: child.name.clone(),
                depth,
                path: child.path,
            });
            child.flatten(depth + 1, items);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_tree_layout() {
        let items = build_tree_items(&ConfigurationPath::ALL);
        let outline: Vec<(usize, &str, bool)> = items
            .iter()
            .map(|item| (item.depth, item.label.as_str(), item.path.is_some()))
            .collect();
        assert_eq!(
            outline,
            vec![
                (0, "Configuration WANLink", false),
                (1, "FTTH", false),
                (2, "Orange", true),
                (2, "Axione", false),
                (3, "FTTH Pro", true),
                (3, "FTTH Opera", true),
                (2, "IFT", true),
                (1, "FTTO", true),
                (0, "Configuration SBC", true),
            ]
        );
    }

    #[test]
    fn every_path_has_exactly_one_leaf() {
        let items = build_tree_items(&ConfigurationPath::ALL);
        for path in ConfigurationPath::ALL {
            assert_eq!(
                items.iter().filter(|item| item.path == Some(path)).count(),
                1
            );
        }
    }
}
