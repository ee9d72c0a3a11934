//! AVL tree ordered by record coordinates.
//!
//! Nodes own their children exclusively and carry no parent links. Every
//! mutating helper takes a subtree by value and hands back the (possibly new)
//! subtree root, which is how rotations propagate upward. Heights are cached
//! per node and recomputed bottom-up along the mutated path only.
//!
//! ```rust
//! use obstacle_index::tree::AvlTree;
//! use obstacle_index::Coord;
//!
//! let mut tree = AvlTree::new();
//! for x in 1..=7 {
//!     tree.insert(Coord::new(x, 0));
//! }
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.root(), Some(&Coord::new(4, 0)));
//! ```

use crate::error::{IndexError, Result};
use obstacle_types::{Bounds, Coord, Keyed};
use std::cmp::Ordering;
use std::fmt::{self, Write};

type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug, Clone)]
struct Node<T> {
    record: T,
    left: Link<T>,
    right: Link<T>,
    height: usize,
}

impl<T: Keyed> Node<T> {
    fn leaf(record: T) -> Self {
        Self {
            record,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn key(&self) -> Coord {
        self.record.coord()
    }
}

impl<T> Node<T> {
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Must run on every node whose children changed, children first.
    fn recompute_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }
}

fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn balance_factor<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(0, |node| node.balance_factor())
}

/// Visit order for full traversals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Left, node, right. Sorted by coordinate.
    Inorder,
    /// Node, left, right.
    Preorder,
    /// Left, right, node.
    Postorder,
}

/// Self-balancing binary search tree keyed by [`Coord`].
///
/// Not internally synchronized. Query results borrow from the tree, so the
/// borrow checker enforces that a result set is consumed (or cloned into a
/// snapshot) before the next mutation.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
}

impl<T> Default for AvlTree<T> {
    fn default() -> Self {
        Self { root: None }
    }
}

impl<T: Keyed> AvlTree<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.root = None;
    }

    /// Insert a record under its coordinate.
    ///
    /// Returns `false` and leaves the tree untouched when the coordinate is
    /// already indexed; the existing record is kept.
    pub fn insert(&mut self, record: T) -> bool {
        let mut inserted = false;
        self.root = Some(insert_at(self.root.take(), record, &mut inserted));
        inserted
    }

    /// Remove the record stored under `key`, if any.
    pub fn remove(&mut self, key: Coord) -> Option<T> {
        let mut removed = None;
        self.root = remove_at(self.root.take(), key, &mut removed);
        removed
    }

    pub fn get(&self, key: Coord) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.record),
            };
        }
        None
    }

    pub fn contains(&self, key: Coord) -> bool {
        self.get(key).is_some()
    }

    /// All records inside the closed box.
    ///
    /// Subtrees are pruned on `x` only, since `y` carries no ordering across
    /// subtrees. Each node is reported before its left and right subtrees.
    pub fn range_search(&self, bounds: &Bounds) -> Vec<&T> {
        let mut found = Vec::new();
        collect_range(&self.root, bounds, &mut found);
        found
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<&T> {
        let mut out = Vec::new();
        collect(&self.root, order, &mut out);
        out
    }

    pub fn inorder(&self) -> Vec<&T> {
        self.traverse(TraversalOrder::Inorder)
    }

    pub fn preorder(&self) -> Vec<&T> {
        self.traverse(TraversalOrder::Preorder)
    }

    pub fn postorder(&self) -> Vec<&T> {
        self.traverse(TraversalOrder::Postorder)
    }

    /// Height of the root, 0 when empty.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Number of nodes. Walks the whole tree on every call.
    pub fn count(&self) -> usize {
        count(&self.root)
    }

    pub fn root(&self) -> Option<&T> {
        self.root.as_ref().map(|node| &node.record)
    }

    /// Balance factor of the root, 0 when empty.
    pub fn balance_factor(&self) -> isize {
        balance_factor(&self.root)
    }

    /// Check cached heights, the balance bound and strict key ordering.
    pub fn verify(&self) -> Result<()> {
        verify_at(&self.root, None, None).map(|_| ())
    }

    /// Indented dump of the tree with per-node height and balance factor.
    pub fn structure(&self) -> String
    where
        T: fmt::Display,
    {
        let mut out = String::new();
        if let Some(root) = self.root.as_deref() {
            // Writing into a String cannot fail.
            let _ = render(root, 0, "Root: ", &mut out);
        }
        out
    }
}

fn rotate_right<T>(mut y: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.recompute_height();
    x.right = Some(y);
    x.recompute_height();
    x
}

fn rotate_left<T>(mut x: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.recompute_height();
    y.left = Some(x);
    y.recompute_height();
    y
}

fn insert_at<T: Keyed>(link: Link<T>, record: T, inserted: &mut bool) -> Box<Node<T>> {
    let Some(mut node) = link else {
        *inserted = true;
        return Box::new(Node::leaf(record));
    };

    let key = record.coord();
    match key.cmp(&node.key()) {
        Ordering::Less => node.left = Some(insert_at(node.left.take(), record, inserted)),
        Ordering::Greater => node.right = Some(insert_at(node.right.take(), record, inserted)),
        Ordering::Equal => return node,
    }

    if !*inserted {
        return node;
    }

    node.recompute_height();
    rebalance_after_insert(node, key)
}

/// Case selection compares the inserted key with the heavy child's key.
fn rebalance_after_insert<T: Keyed>(mut node: Box<Node<T>>, key: Coord) -> Box<Node<T>> {
    let balance = node.balance_factor();

    if balance > 1 {
        let Some(left_key) = node.left.as_ref().map(|left| left.key()) else {
            return node;
        };
        if key < left_key {
            return rotate_right(node);
        }
        if key > left_key {
            node.left = node.left.take().map(rotate_left);
            return rotate_right(node);
        }
    } else if balance < -1 {
        let Some(right_key) = node.right.as_ref().map(|right| right.key()) else {
            return node;
        };
        if key > right_key {
            return rotate_left(node);
        }
        if key < right_key {
            node.right = node.right.take().map(rotate_right);
            return rotate_left(node);
        }
    }

    node
}

fn remove_at<T: Keyed>(link: Link<T>, key: Coord, removed: &mut Option<T>) -> Link<T> {
    let mut node = link?;

    match key.cmp(&node.key()) {
        Ordering::Less => node.left = remove_at(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove_at(node.right.take(), key, removed),
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => {
                let node = *node;
                *removed = Some(node.record);
                return child;
            }
            (Some(left), Some(right)) => {
                // Splice in the in-order successor, then delete it from the
                // right subtree so exactly one node goes away.
                let successor_key = min_key(&right);
                let mut successor = None;
                node.left = Some(left);
                node.right = remove_at(Some(right), successor_key, &mut successor);
                if let Some(successor) = successor {
                    *removed = Some(std::mem::replace(&mut node.record, successor));
                }
            }
        },
    }

    if removed.is_none() {
        return Some(node);
    }

    node.recompute_height();
    Some(rebalance_after_delete(node))
}

/// No inserted key to compare against, so cases follow child balance.
fn rebalance_after_delete<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let balance = node.balance_factor();

    if balance > 1 {
        if balance_factor(&node.left) < 0 {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if balance_factor(&node.right) > 0 {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn min_key<T: Keyed>(node: &Node<T>) -> Coord {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current.key()
}

fn collect_range<'a, T: Keyed>(link: &'a Link<T>, bounds: &Bounds, found: &mut Vec<&'a T>) {
    let Some(node) = link.as_deref() else {
        return;
    };
    let key = node.key();

    if bounds.contains(key) {
        found.push(&node.record);
    }
    if bounds.x_min <= key.x {
        collect_range(&node.left, bounds, found);
    }
    if bounds.x_max >= key.x {
        collect_range(&node.right, bounds, found);
    }
}

fn collect<'a, T>(link: &'a Link<T>, order: TraversalOrder, out: &mut Vec<&'a T>) {
    let Some(node) = link.as_deref() else {
        return;
    };

    match order {
        TraversalOrder::Inorder => {
            collect(&node.left, order, out);
            out.push(&node.record);
            collect(&node.right, order, out);
        }
        TraversalOrder::Preorder => {
            out.push(&node.record);
            collect(&node.left, order, out);
            collect(&node.right, order, out);
        }
        TraversalOrder::Postorder => {
            collect(&node.left, order, out);
            collect(&node.right, order, out);
            out.push(&node.record);
        }
    }
}

fn count<T>(link: &Link<T>) -> usize {
    link.as_ref()
        .map_or(0, |node| 1 + count(&node.left) + count(&node.right))
}

/// Returns the recomputed height of the subtree.
fn verify_at<T: Keyed>(
    link: &Link<T>,
    lower: Option<Coord>,
    upper: Option<Coord>,
) -> Result<usize> {
    let Some(node) = link.as_deref() else {
        return Ok(0);
    };
    let key = node.key();

    if lower.is_some_and(|lower| key <= lower) || upper.is_some_and(|upper| key >= upper) {
        return Err(IndexError::InvariantViolation(format!(
            "key {} is out of order",
            key
        )));
    }

    let left = verify_at(&node.left, lower, Some(key))?;
    let right = verify_at(&node.right, Some(key), upper)?;

    let expected = 1 + left.max(right);
    if node.height != expected {
        return Err(IndexError::InvariantViolation(format!(
            "node {} caches height {} but has height {}",
            key, node.height, expected
        )));
    }

    if left.abs_diff(right) > 1 {
        return Err(IndexError::InvariantViolation(format!(
            "node {} has balance factor {}",
            key,
            left as isize - right as isize
        )));
    }

    Ok(expected)
}

fn render<T: fmt::Display>(
    node: &Node<T>,
    level: usize,
    prefix: &str,
    out: &mut String,
) -> fmt::Result {
    writeln!(
        out,
        "{}{}{} (h={}, b={})",
        " ".repeat(level * 4),
        prefix,
        node.record,
        node.height,
        node.balance_factor()
    )?;

    if node.left.is_none() && node.right.is_none() {
        return Ok(());
    }

    let child_indent = " ".repeat((level + 1) * 4);
    match node.left.as_deref() {
        Some(left) => render(left, level + 1, "L--- ", out)?,
        None => writeln!(out, "{}L--- None", child_indent)?,
    }
    match node.right.as_deref() {
        Some(right) => render(right, level + 1, "R--- ", out)?,
        None => writeln!(out, "{}R--- None", child_indent)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: i64) -> Coord {
        Coord::new(x, 0)
    }

    fn tree_of(xs: &[i64]) -> AvlTree<Coord> {
        let mut tree = AvlTree::new();
        for &x in xs {
            assert!(tree.insert(c(x)));
        }
        tree.verify().unwrap();
        tree
    }

    fn xs(records: Vec<&Coord>) -> Vec<i64> {
        records.into_iter().map(|coord| coord.x).collect()
    }

    fn leaf(x: i64) -> Link<Coord> {
        Some(Box::new(Node::leaf(c(x))))
    }

    #[test]
    fn test_empty_tree() {
        let tree: AvlTree<Coord> = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.count(), 0);
        assert_eq!(tree.balance_factor(), 0);
        assert!(tree.root().is_none());
        assert!(tree.inorder().is_empty());
        assert!(tree.structure().is_empty());
        assert!(tree.verify().is_ok());
    }

    #[test]
    fn test_rotate_right_moves_inner_subtree() {
        // y(4) with left x(2) whose children are 1 and 3
        let mut x = Box::new(Node::leaf(c(2)));
        x.left = leaf(1);
        x.right = leaf(3);
        x.recompute_height();
        let mut y = Box::new(Node::leaf(c(4)));
        y.left = Some(x);
        y.recompute_height();
        assert_eq!(y.height, 3);

        let root = rotate_right(y);
        assert_eq!(root.record, c(2));
        assert_eq!(root.height, 3);
        let right = root.right.as_deref().unwrap();
        assert_eq!(right.record, c(4));
        assert_eq!(right.left.as_deref().unwrap().record, c(3));
        assert_eq!(right.height, 2);
    }

    #[test]
    fn test_rotate_left_moves_inner_subtree() {
        let mut y = Box::new(Node::leaf(c(4)));
        y.left = leaf(3);
        y.right = leaf(5);
        y.recompute_height();
        let mut x = Box::new(Node::leaf(c(2)));
        x.right = Some(y);
        x.recompute_height();

        let root = rotate_left(x);
        assert_eq!(root.record, c(4));
        let left = root.left.as_deref().unwrap();
        assert_eq!(left.record, c(2));
        assert_eq!(left.right.as_deref().unwrap().record, c(3));
        assert_eq!(left.height, 2);
        assert_eq!(root.height, 3);
    }

    #[test]
    fn test_insert_left_left() {
        let tree = tree_of(&[3, 2, 1]);
        assert_eq!(xs(tree.preorder()), vec![2, 1, 3]);
        assert_eq!(tree.height(), 2);
    }

    #[test]
    fn test_insert_right_right() {
        let tree = tree_of(&[1, 2, 3]);
        assert_eq!(xs(tree.preorder()), vec![2, 1, 3]);
    }

    #[test]
    fn test_insert_left_right() {
        let tree = tree_of(&[3, 1, 2]);
        assert_eq!(xs(tree.preorder()), vec![2, 1, 3]);
    }

    #[test]
    fn test_insert_right_left() {
        let tree = tree_of(&[1, 3, 2]);
        assert_eq!(xs(tree.preorder()), vec![2, 1, 3]);
    }

    #[test]
    fn test_y_breaks_ties() {
        let mut tree = AvlTree::new();
        tree.insert(Coord::new(10, 1));
        tree.insert(Coord::new(10, 0));
        tree.insert(Coord::new(10, 2));
        tree.insert(Coord::new(9, 5));

        let ordered: Vec<Coord> = tree.inorder().into_iter().copied().collect();
        assert_eq!(
            ordered,
            vec![
                Coord::new(9, 5),
                Coord::new(10, 0),
                Coord::new(10, 1),
                Coord::new(10, 2),
            ]
        );
        tree.verify().unwrap();
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let mut tree = tree_of(&[5, 3, 8]);
        let before = xs(tree.preorder());

        assert!(!tree.insert(c(3)));
        assert_eq!(xs(tree.preorder()), before);
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_remove_leaf_and_single_child() {
        let mut tree = tree_of(&[5, 3, 8, 9]);

        assert_eq!(tree.remove(c(3)), Some(c(3)));
        tree.verify().unwrap();
        // 5 now has only the right chain 8 -> 9 and must rotate
        assert_eq!(xs(tree.preorder()), vec![8, 5, 9]);

        assert_eq!(tree.remove(c(8)), Some(c(8)));
        tree.verify().unwrap();
        assert_eq!(xs(tree.inorder()), vec![5, 9]);
    }

    #[test]
    fn test_remove_missing_key() {
        let mut tree = tree_of(&[5, 3, 8]);
        assert_eq!(tree.remove(c(99)), None);
        assert_eq!(xs(tree.preorder()), vec![5, 3, 8]);

        let mut empty: AvlTree<Coord> = AvlTree::new();
        assert_eq!(empty.remove(c(1)), None);
    }

    #[test]
    fn test_remove_rebalances_left_left() {
        let mut tree = tree_of(&[2, 1, 3, 0]);
        tree.remove(c(3));
        tree.verify().unwrap();
        assert_eq!(xs(tree.preorder()), vec![1, 0, 2]);
    }

    #[test]
    fn test_remove_rebalances_left_with_even_child() {
        let mut tree = tree_of(&[3, 1, 4, 0, 2]);
        tree.remove(c(4));
        tree.verify().unwrap();
        assert_eq!(xs(tree.preorder()), vec![1, 0, 3, 2]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_remove_rebalances_left_right() {
        let mut tree = tree_of(&[2, 0, 3, 1]);
        tree.remove(c(3));
        tree.verify().unwrap();
        assert_eq!(xs(tree.preorder()), vec![1, 0, 2]);
    }

    #[test]
    fn test_remove_rebalances_right_left() {
        let mut tree = tree_of(&[1, 0, 3, 2]);
        tree.remove(c(0));
        tree.verify().unwrap();
        assert_eq!(xs(tree.preorder()), vec![2, 1, 3]);
    }

    #[test]
    fn test_remove_two_children_uses_successor() {
        let mut tree = tree_of(&[50, 30, 70, 60, 80, 65]);
        // Inserting 65 triggers a right-left rotation that lifts 60 to the root.
        assert_eq!(tree.root(), Some(&c(60)));

        assert_eq!(tree.remove(c(60)), Some(c(60)));
        tree.verify().unwrap();
        assert_eq!(tree.root(), Some(&c(65)));
        assert_eq!(xs(tree.inorder()), vec![30, 50, 65, 70, 80]);
        assert_eq!(tree.count(), 5);
    }

    #[test]
    fn test_range_search_prunes_on_x() {
        let tree = tree_of(&[40, 20, 60, 10, 30, 50, 70]);
        let found = xs(tree.range_search(&Bounds::new(25, 55, 0, 0)));
        assert_eq!(found, vec![40, 30, 50]);

        assert!(tree.range_search(&Bounds::new(25, 55, 1, 3)).is_empty());
        assert!(tree.range_search(&Bounds::new(55, 25, 0, 0)).is_empty());
    }

    #[test]
    fn test_traversal_orders() {
        let tree = tree_of(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(xs(tree.inorder()), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(xs(tree.preorder()), vec![4, 2, 1, 3, 6, 5, 7]);
        assert_eq!(xs(tree.postorder()), vec![1, 3, 2, 5, 7, 6, 4]);
    }

    #[test]
    fn test_get() {
        let tree = tree_of(&[4, 2, 6]);
        assert_eq!(tree.get(c(6)), Some(&c(6)));
        assert_eq!(tree.get(Coord::new(6, 1)), None);
    }

    #[test]
    fn test_verify_detects_bad_order() {
        let mut root = Box::new(Node::leaf(c(1)));
        root.left = leaf(2);
        root.recompute_height();
        let tree = AvlTree { root: Some(root) };

        assert!(matches!(
            tree.verify(),
            Err(IndexError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_verify_detects_stale_height() {
        let mut root = Box::new(Node::leaf(c(2)));
        root.left = leaf(1);
        let tree = AvlTree { root: Some(root) };

        assert!(tree.verify().is_err());
    }

    #[test]
    fn test_verify_detects_imbalance() {
        let mut middle = Box::new(Node::leaf(c(2)));
        middle.right = leaf(3);
        middle.recompute_height();
        let mut root = Box::new(Node::leaf(c(1)));
        root.right = Some(middle);
        root.recompute_height();
        let tree = AvlTree { root: Some(root) };

        assert!(tree.verify().is_err());
    }

    #[test]
    fn test_structure_dump() {
        let tree = tree_of(&[2, 1]);
        let expected = "Root: (2, 0) (h=2, b=1)\n    L--- (1, 0) (h=1, b=0)\n    R--- None\n";
        assert_eq!(tree.structure(), expected);
    }
}
