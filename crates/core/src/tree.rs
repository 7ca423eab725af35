//! Huffman code tree construction and code derivation.
//!
//! The tree is built by repeatedly merging the two lightest nodes. Ties are
//! broken by insertion sequence, latest first: leaves are numbered in
//! ascending unit order, and each merged node gets the next number after
//! every existing node. Among equal weights the highest number is taken, so a
//! merged node goes before the leaves it ties with, and a higher unit before a
//! lower one. The first node popped becomes the left child. Rebuilding from
//! the same frequency table therefore yields the same tree on both sides of
//! the container, and the same tree as existing `.huf` files were written with.
//!
//! Walking left appends a `0` bit and walking right appends a `1` bit.
//!
//! A table with a single distinct unit produces a tree that is one leaf.
//! That unit is assigned the one-bit code `0` rather than an empty code.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::error::{Result, TreeError};
use crate::frequency::FrequencyTable;
use crate::Symbol;

/// Path from the root to a leaf; `false` is left, `true` is right.
pub type Code = Vec<bool>;

/// Prefix code for every unit of a tree, in ascending unit order.
pub type CodeTable = BTreeMap<Symbol, Code>;

/// Render a code as a string of '0' and '1'.
pub fn code_to_string(code: &[bool]) -> String {
    code.iter().map(|&b| if b { '1' } else { '0' }).collect()
}

/// A node of the code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        symbol: Symbol,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn weight(&self) -> u64 {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    /// Join two subtrees; `left` is the one selected first.
    fn merge(left: Node, right: Node) -> Node {
        Node::Internal {
            weight: left.weight() + right.weight(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Depth-first search for `symbol`, extending `path` on the way down and
    /// restoring it on the way back up.
    fn find(&self, symbol: Symbol, path: &mut Code) -> bool {
        match self {
            Node::Leaf { symbol: s, .. } => *s == symbol,
            Node::Internal { left, right, .. } => {
                path.push(false);
                if left.find(symbol, path) {
                    return true;
                }
                path.pop();

                path.push(true);
                if right.find(symbol, path) {
                    return true;
                }
                path.pop();
                false
            }
        }
    }

    fn collect_codes(&self, path: &mut Code, table: &mut CodeTable) {
        match self {
            Node::Leaf { symbol, .. } => {
                table.insert(*symbol, path.clone());
            }
            Node::Internal { left, right, .. } => {
                path.push(false);
                left.collect_codes(path, table);
                path.pop();

                path.push(true);
                right.collect_codes(path, table);
                path.pop();
            }
        }
    }
}

/// Heap entry ordered by weight, then by sequence descending; wrapped in
/// `Reverse` for a min-heap.
struct Pending {
    weight: u64,
    seq: usize,
    node: Node,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl Pending {
    fn key(&self) -> (u64, Reverse<usize>) {
        (self.weight, Reverse(self.seq))
    }
}

/// A complete Huffman code tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
    root: Node,
}

impl CodeTree {
    /// Build the tree for a frequency table.
    ///
    /// # Errors
    /// Returns `TreeError::EmptyFrequencyTable` if the table has no entries.
    pub fn build(frequencies: &FrequencyTable) -> Result<Self> {
        Self::from_weights(frequencies.iter().map(|(s, c)| (s, c as u64)))
    }

    /// Build the tree from `(unit, weight)` pairs in the given order.
    ///
    /// The order of the pairs is the tie-break order for equal weights.
    pub fn from_weights<I>(weights: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Symbol, u64)>,
    {
        let mut heap: BinaryHeap<Reverse<Pending>> = weights
            .into_iter()
            .enumerate()
            .map(|(seq, (symbol, weight))| {
                Reverse(Pending {
                    weight,
                    seq,
                    node: Node::Leaf { symbol, weight },
                })
            })
            .collect();

        let mut next_seq = heap.len();
        loop {
            let Reverse(first) = heap.pop().ok_or(TreeError::EmptyFrequencyTable)?;
            let Some(Reverse(second)) = heap.pop() else {
                let tree = CodeTree { root: first.node };
                log::debug!(
                    "built code tree: {} leaves, depth {}, weight {}",
                    tree.leaf_count(),
                    tree.depth(),
                    tree.weight()
                );
                return Ok(tree);
            };

            let node = Node::merge(first.node, second.node);
            heap.push(Reverse(Pending {
                weight: node.weight(),
                seq: next_seq,
                node,
            }));
            next_seq += 1;
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Total weight, equal to the text length in units.
    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// True when the tree is one leaf (a single distinct unit).
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.root, Node::Leaf { .. })
    }

    /// Code for one unit, found by depth-first search.
    ///
    /// # Errors
    /// Returns `TreeError::SymbolNotFound` if `symbol` is not a leaf.
    pub fn code_for(&self, symbol: Symbol) -> Result<Code> {
        let mut path = Code::new();
        if !self.root.find(symbol, &mut path) {
            return Err(TreeError::SymbolNotFound { symbol }.into());
        }
        if path.is_empty() {
            path.push(false);
        }
        Ok(path)
    }

    /// Codes for every leaf in one traversal.
    pub fn code_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        let mut path = Code::new();
        self.root.collect_codes(&mut path, &mut table);

        if let Node::Leaf { symbol, .. } = self.root {
            table.insert(symbol, vec![false]);
        }

        if log::log_enabled!(log::Level::Trace) {
            for (symbol, code) in &table {
                log::trace!("code {:#06x} -> {}", symbol, code_to_string(code));
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sym(c: char) -> Symbol {
        c as Symbol
    }

    fn check_weights(node: &Node) {
        if let Node::Internal {
            weight,
            left,
            right,
        } = node
        {
            assert_eq!(*weight, left.weight() + right.weight());
            check_weights(left);
            check_weights(right);
        }
    }

    #[test]
    fn test_aab_tree_shape() {
        let freqs = FrequencyTable::count("aab").unwrap();
        let tree = CodeTree::build(&freqs).unwrap();

        // b (weight 1) is popped first and becomes the left child
        match tree.root() {
            Node::Internal {
                weight,
                left,
                right,
            } => {
                assert_eq!(*weight, 3);
                assert_eq!(**left, Node::Leaf { symbol: sym('b'), weight: 1 });
                assert_eq!(**right, Node::Leaf { symbol: sym('a'), weight: 2 });
            }
            other => panic!("expected internal root, got {:?}", other),
        }

        let table = tree.code_table();
        assert_eq!(code_to_string(&table[&sym('a')]), "1");
        assert_eq!(code_to_string(&table[&sym('b')]), "0");
    }

    #[test]
    fn test_equal_weights_take_latest_first() {
        // y was inserted last, so it is popped first and goes left
        let tree = CodeTree::from_weights([(sym('x'), 1), (sym('y'), 1)]).unwrap();
        assert_eq!(tree.code_for(sym('y')).unwrap(), vec![false]);
        assert_eq!(tree.code_for(sym('x')).unwrap(), vec![true]);
    }

    #[test]
    fn test_merged_node_taken_before_equal_leaves() {
        // b+a merge to weight 2 and tie with c and d; the merged node and d go next
        let tree =
            CodeTree::from_weights([(sym('a'), 1), (sym('b'), 1), (sym('c'), 2), (sym('d'), 2)])
                .unwrap();
        let table = tree.code_table();

        assert_eq!(code_to_string(&table[&sym('c')]), "0");
        assert_eq!(code_to_string(&table[&sym('b')]), "100");
        assert_eq!(code_to_string(&table[&sym('a')]), "101");
        assert_eq!(code_to_string(&table[&sym('d')]), "11");
    }

    #[test]
    fn test_all_equal_weights() {
        // d+c, then b+a, then the newer pair (b+a) goes left
        let tree = CodeTree::from_weights([
            (sym('a'), 1),
            (sym('b'), 1),
            (sym('c'), 1),
            (sym('d'), 1),
        ])
        .unwrap();
        let table = tree.code_table();

        assert_eq!(code_to_string(&table[&sym('b')]), "00");
        assert_eq!(code_to_string(&table[&sym('a')]), "01");
        assert_eq!(code_to_string(&table[&sym('d')]), "10");
        assert_eq!(code_to_string(&table[&sym('c')]), "11");
    }

    #[test]
    fn test_weight_invariant() {
        let text = "the quick brown fox jumps over the lazy dog";
        let freqs = FrequencyTable::count(text).unwrap();
        let tree = CodeTree::build(&freqs).unwrap();

        check_weights(tree.root());
        assert_eq!(tree.weight(), text.encode_utf16().count() as u64);
        assert_eq!(tree.leaf_count(), freqs.len());
    }

    #[test]
    fn test_prefix_free() {
        let freqs = FrequencyTable::count("mississippi river banks").unwrap();
        let table = CodeTree::build(&freqs).unwrap().code_table();
        let codes: Vec<&Code> = table.values().collect();

        for (i, a) in codes.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a), "{:?} is a prefix of {:?}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_code_for_matches_table() {
        let freqs = FrequencyTable::count("abracadabra").unwrap();
        let tree = CodeTree::build(&freqs).unwrap();
        let table = tree.code_table();

        for (symbol, _) in freqs.iter() {
            assert_eq!(tree.code_for(symbol).unwrap(), table[&symbol]);
        }
    }

    #[test]
    fn test_frequent_units_get_shorter_codes() {
        let freqs = FrequencyTable::count("aaaaaaaabbbbccd").unwrap();
        let table = CodeTree::build(&freqs).unwrap().code_table();
        assert!(table[&sym('a')].len() <= table[&sym('c')].len());
        assert!(table[&sym('c')].len() <= table[&sym('d')].len());
    }

    #[test]
    fn test_deterministic_rebuild() {
        let freqs = FrequencyTable::count("deterministic rebuilds agree").unwrap();
        let first = CodeTree::build(&freqs).unwrap();
        let second = CodeTree::build(&freqs.clone()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.code_table(), second.code_table());
    }

    #[test]
    fn test_single_symbol() {
        let freqs = FrequencyTable::count("zzzz").unwrap();
        let tree = CodeTree::build(&freqs).unwrap();

        assert!(tree.is_single_leaf());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.code_for(sym('z')).unwrap(), vec![false]);
        assert_eq!(tree.code_table()[&sym('z')], vec![false]);
    }

    #[test]
    fn test_empty_table() {
        let result = CodeTree::build(&FrequencyTable::new());
        assert!(matches!(
            result,
            Err(Error::Tree(TreeError::EmptyFrequencyTable))
        ));
    }

    #[test]
    fn test_missing_symbol() {
        let freqs = FrequencyTable::count("ab").unwrap();
        let tree = CodeTree::build(&freqs).unwrap();
        assert!(matches!(
            tree.code_for(sym('q')),
            Err(Error::Tree(TreeError::SymbolNotFound { .. }))
        ));
    }
}
