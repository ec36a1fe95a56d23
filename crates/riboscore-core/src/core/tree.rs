/// Node label in the tree form of a secondary structure.
///
/// Matching `()` pairs become interior `Pair` nodes; every other position
/// becomes an `Unpaired` leaf. Pseudoknot braces have no nested tree form
/// (their pairs may cross the parenthesis nesting), so they are folded into
/// the unpaired leaves; their balance is enforced separately by the
/// validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeLabel {
    Root,
    Pair,
    Unpaired,
}

#[derive(Debug, Clone)]
pub struct TreeNode {
    pub label: NodeLabel,
    pub children: Vec<usize>,
}

/// Ordered labeled tree representation of a dot-bracket structure, as
/// consumed by the tree-edit-distance oracle.
///
/// Nodes live in an owned arena indexed by `usize`; the virtual root ties
/// the exterior loop together so that every structure maps to exactly one
/// tree.
#[derive(Debug, Clone)]
pub struct StructureTree {
    nodes: Vec<TreeNode>,
}

impl StructureTree {
    /// Builds the tree for a structure that already passed
    /// [`validate_structure`](crate::core::validate::validate_structure).
    pub fn from_dot_bracket(structure: &str) -> Self {
        let mut nodes = vec![TreeNode {
            label: NodeLabel::Root,
            children: Vec::new(),
        }];
        let mut open: Vec<usize> = vec![0];

        for b in structure.bytes() {
            match b {
                b'(' => {
                    let id = nodes.len();
                    nodes.push(TreeNode {
                        label: NodeLabel::Pair,
                        children: Vec::new(),
                    });
                    let parent = open.last().copied().unwrap_or(0);
                    nodes[parent].children.push(id);
                    open.push(id);
                }
                b')' => {
                    // The virtual root never pops; balance is the
                    // validator's job.
                    if open.len() > 1 {
                        open.pop();
                    }
                }
                _ => {
                    let id = nodes.len();
                    nodes.push(TreeNode {
                        label: NodeLabel::Unpaired,
                        children: Vec::new(),
                    });
                    let parent = open.last().copied().unwrap_or(0);
                    nodes[parent].children.push(id);
                }
            }
        }

        Self { nodes }
    }

    /// Arena index of the virtual root.
    pub fn root(&self) -> usize {
        0
    }

    pub fn node(&self, id: usize) -> &TreeNode {
        &self.nodes[id]
    }

    /// Total node count, including the virtual root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child_labels(tree: &StructureTree, id: usize) -> Vec<NodeLabel> {
        tree.node(id)
            .children
            .iter()
            .map(|&c| tree.node(c).label)
            .collect()
    }

    #[test]
    fn unpaired_positions_become_leaves_under_the_root() {
        let tree = StructureTree::from_dot_bracket("...");
        assert_eq!(tree.node_count(), 4);
        assert_eq!(
            child_labels(&tree, tree.root()),
            vec![NodeLabel::Unpaired; 3]
        );
    }

    #[test]
    fn a_pair_nests_its_enclosed_positions() {
        let tree = StructureTree::from_dot_bracket("(..)");
        let root_children = tree.node(tree.root()).children.clone();
        assert_eq!(root_children.len(), 1);

        let pair = root_children[0];
        assert_eq!(tree.node(pair).label, NodeLabel::Pair);
        assert_eq!(child_labels(&tree, pair), vec![NodeLabel::Unpaired; 2]);
    }

    #[test]
    fn sibling_pairs_stay_ordered() {
        let tree = StructureTree::from_dot_bracket("().()");
        assert_eq!(
            child_labels(&tree, tree.root()),
            vec![NodeLabel::Pair, NodeLabel::Unpaired, NodeLabel::Pair]
        );
    }

    #[test]
    fn pseudoknot_braces_are_treated_as_unpaired_leaves() {
        let with_knot = StructureTree::from_dot_bracket("({.})");
        let root_children = with_knot.node(with_knot.root()).children.clone();
        assert_eq!(root_children.len(), 1);
        assert_eq!(
            child_labels(&with_knot, root_children[0]),
            vec![NodeLabel::Unpaired; 3]
        );
    }
}
