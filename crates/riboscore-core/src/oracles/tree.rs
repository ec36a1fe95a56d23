use parking_lot::Mutex;

use super::OracleError;
use crate::core::tree::{NodeLabel, StructureTree};

/// Tree-edit-distance oracle over structure trees.
///
/// Implementations are not assumed to be reentrant, hence `&mut self`; all
/// engine calls go through [`TreeDistanceService`], whose lock is distinct
/// from the melting lock.
pub trait TreeDistanceOracle: Send {
    fn distance(&mut self, a: &StructureTree, b: &StructureTree) -> Result<f64, OracleError>;
}

/// Process-wide, lock-protected access to a tree-distance oracle.
pub struct TreeDistanceService {
    oracle: Mutex<Box<dyn TreeDistanceOracle>>,
}

impl TreeDistanceService {
    pub fn new(oracle: Box<dyn TreeDistanceOracle>) -> Self {
        Self {
            oracle: Mutex::new(oracle),
        }
    }

    /// Service backed by the built-in Zhang-Shasha implementation.
    pub fn zhang_shasha() -> Self {
        Self::new(Box::new(ZhangShasha))
    }

    pub fn distance(&self, a: &StructureTree, b: &StructureTree) -> Result<f64, OracleError> {
        self.oracle.lock().distance(a, b)
    }
}

/// Built-in tree-edit-distance oracle: the Zhang-Shasha ordered-tree
/// algorithm with unit insert/delete/relabel costs.
pub struct ZhangShasha;

/// Postorder view of a structure tree: labels, leftmost-leaf descendants
/// and keyroots, the three arrays the forest-distance recurrence runs on.
struct Postorder {
    labels: Vec<NodeLabel>,
    lld: Vec<usize>,
    keyroots: Vec<usize>,
}

impl Postorder {
    fn build(tree: &StructureTree) -> Self {
        let count = tree.node_count();
        let mut labels = Vec::with_capacity(count);
        let mut lld = Vec::with_capacity(count);
        let mut post_index = vec![0usize; count];

        // Iterative postorder; frames hold (node, next child to visit).
        let mut stack: Vec<(usize, usize)> = vec![(tree.root(), 0)];
        while let Some(frame) = stack.last_mut() {
            let (id, cursor) = *frame;
            let children = &tree.node(id).children;
            if cursor < children.len() {
                frame.1 += 1;
                stack.push((children[cursor], 0));
            } else {
                stack.pop();
                let index = labels.len();
                labels.push(tree.node(id).label);
                let leftmost = match children.first() {
                    Some(&first_child) => lld[post_index[first_child]],
                    None => index,
                };
                lld.push(leftmost);
                post_index[id] = index;
            }
        }

        // A node is a keyroot when no later node shares its leftmost leaf.
        let n = labels.len();
        let mut last_for_lld = vec![usize::MAX; n];
        for (i, &l) in lld.iter().enumerate() {
            last_for_lld[l] = i;
        }
        let mut keyroots: Vec<usize> = last_for_lld
            .into_iter()
            .filter(|&i| i != usize::MAX)
            .collect();
        keyroots.sort_unstable();

        Self {
            labels,
            lld,
            keyroots,
        }
    }

    fn len(&self) -> usize {
        self.labels.len()
    }
}

fn relabel_cost(a: NodeLabel, b: NodeLabel) -> f64 {
    if a == b { 0.0 } else { 1.0 }
}

/// Fills `tree_dist[i][j]` for all subtree pairs rooted at keyroots `i`
/// and `j`, via the forest-distance recurrence.
fn keyroot_distance(a: &Postorder, b: &Postorder, i: usize, j: usize, tree_dist: &mut [Vec<f64>]) {
    let li = a.lld[i];
    let lj = b.lld[j];
    let rows = i - li + 2;
    let cols = j - lj + 2;

    let mut forest = vec![vec![0.0f64; cols]; rows];
    for x in 1..rows {
        forest[x][0] = forest[x - 1][0] + 1.0;
    }
    for y in 1..cols {
        forest[0][y] = forest[0][y - 1] + 1.0;
    }

    for x in 1..rows {
        for y in 1..cols {
            let ai = li + x - 1;
            let bj = lj + y - 1;
            let delete = forest[x - 1][y] + 1.0;
            let insert = forest[x][y - 1] + 1.0;

            if a.lld[ai] == li && b.lld[bj] == lj {
                // Both prefixes are whole trees; the match case is a
                // relabel and the cell doubles as a subtree distance.
                let rename = forest[x - 1][y - 1] + relabel_cost(a.labels[ai], b.labels[bj]);
                forest[x][y] = delete.min(insert).min(rename);
                tree_dist[ai][bj] = forest[x][y];
            } else {
                let px = a.lld[ai] - li;
                let py = b.lld[bj] - lj;
                let bridge = forest[px][py] + tree_dist[ai][bj];
                forest[x][y] = delete.min(insert).min(bridge);
            }
        }
    }
}

impl TreeDistanceOracle for ZhangShasha {
    fn distance(&mut self, a: &StructureTree, b: &StructureTree) -> Result<f64, OracleError> {
        let a = Postorder::build(a);
        let b = Postorder::build(b);

        let mut tree_dist = vec![vec![0.0f64; b.len()]; a.len()];
        for &i in &a.keyroots {
            for &j in &b.keyroots {
                keyroot_distance(&a, &b, i, j, &mut tree_dist);
            }
        }

        Ok(tree_dist[a.len() - 1][b.len() - 1])
    }
}
