// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Courier Simulation Suite - AVL Tree

//! Height-balanced binary search tree with owned child links.
//!
//! Insertion checks equality before ordering: an equal key hands its payload
//! to a caller-supplied merge closure and leaves the shape untouched.

use std::cmp::Ordering;

type Link<K, V> = Option<Box<AvlNode<K, V>>>;

#[derive(Debug, Clone)]
struct AvlNode<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: usize,
}

impl<K, V> AvlNode<K, V> {
    fn leaf(key: K, value: V) -> Box<Self> {
        Box::new(Self { key, value, left: None, right: None, height: 1 })
    }
}

/// Outcome of [`AvlTree::insert_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new node was created.
    Inserted,
    /// An equal key existed; its payload was merged in place.
    Merged,
}

#[derive(Debug, Clone)]
pub struct AvlTree<K, V> {
    root: Link<K, V>,
    len: usize,
}

impl<K: Ord, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Insert `key → value`; on an equal key, call `on_match` with the
    /// existing payload instead.
    pub fn insert_with<F>(&mut self, key: K, value: V, on_match: F) -> Insertion
    where
        F: FnOnce(&mut V),
    {
        let mut outcome = Insertion::Merged;
        let root = self.root.take();
        self.root = Some(insert(root, key, value, on_match, &mut outcome));
        if outcome == Insertion::Inserted {
            self.len += 1;
        }
        outcome
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Entries in ascending key order.
    pub fn in_order(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&AvlNode<K, V>> = Vec::new();
        let mut cursor = self.root.as_deref();
        while cursor.is_some() || !stack.is_empty() {
            while let Some(node) = cursor {
                stack.push(node);
                cursor = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                out.push((&node.key, &node.value));
                cursor = node.right.as_deref();
            }
        }
        out
    }

    /// Every node has a balance factor in [-1, 1], a correct cached height,
    /// and keys in search-tree order.
    pub fn is_balanced(&self) -> bool {
        fn check<K: Ord, V>(link: &Link<K, V>, lo: Option<&K>, hi: Option<&K>) -> Option<usize> {
            let Some(node) = link else { return Some(0) };
            if lo.is_some_and(|lo| node.key <= *lo) || hi.is_some_and(|hi| node.key >= *hi) {
                return None;
            }
            let l = check(&node.left, lo, Some(&node.key))?;
            let r = check(&node.right, Some(&node.key), hi)?;
            let h = 1 + l.max(r);
            (l.abs_diff(r) <= 1 && node.height == h).then_some(h)
        }
        check(&self.root, None, None).is_some()
    }
}

// ─── Internal ────────────────────────────────────────────────────────────────

fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_factor<K, V>(node: &AvlNode<K, V>) -> isize {
    height(&node.left) as isize - height(&node.right) as isize
}

fn update_height<K, V>(node: &mut AvlNode<K, V>) {
    node.height = 1 + height(&node.left).max(height(&node.right));
}

fn rotate_right<K, V>(mut y: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
    let Some(mut x) = y.left.take() else { return y };
    y.left = x.right.take();
    update_height(&mut y);
    x.right = Some(y);
    update_height(&mut x);
    x
}

fn rotate_left<K, V>(mut x: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
    let Some(mut y) = x.right.take() else { return x };
    x.right = y.left.take();
    update_height(&mut x);
    y.left = Some(x);
    update_height(&mut y);
    y
}

fn rebalance<K, V>(mut node: Box<AvlNode<K, V>>) -> Box<AvlNode<K, V>> {
    update_height(&mut node);
    let balance = balance_factor(&node);

    if balance > 1 {
        // Left-right case first becomes left-left.
        if node.left.as_ref().is_some_and(|l| balance_factor(l) < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }
    if balance < -1 {
        if node.right.as_ref().is_some_and(|r| balance_factor(r) > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }
    node
}

fn insert<K: Ord, V, F: FnOnce(&mut V)>(
    link: Link<K, V>,
    key: K,
    value: V,
    on_match: F,
    outcome: &mut Insertion,
) -> Box<AvlNode<K, V>> {
    let Some(mut node) = link else {
        *outcome = Insertion::Inserted;
        return AvlNode::leaf(key, value);
    };

    if key == node.key {
        on_match(&mut node.value);
        return node;
    }
    if key < node.key {
        node.left = Some(insert(node.left.take(), key, value, on_match, outcome));
    } else {
        node.right = Some(insert(node.right.take(), key, value, on_match, outcome));
    }
    rebalance(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = AvlTree::new();
        for i in 0..1000u32 {
            tree.insert_with(i, i * 2, |_| {});
        }
        assert_eq!(tree.len(), 1000);
        assert!(tree.is_balanced());
        // 1.44 * log2(1001) bound for AVL trees
        assert!(tree.height() <= 14, "height {}", tree.height());
        assert_eq!(tree.get(&500), Some(&1000));
    }

    #[test]
    fn zig_zag_inserts_trigger_double_rotations() {
        let mut tree = AvlTree::new();
        for k in [30, 10, 20, 50, 40, 45, 5, 7] {
            tree.insert_with(k, (), |_| {});
            assert!(tree.is_balanced(), "unbalanced after {k}");
        }
        let keys: Vec<i32> = tree.in_order().into_iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![5, 7, 10, 20, 30, 40, 45, 50]);
    }

    #[test]
    fn equal_key_merges_without_new_node() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert_with("a", 1, |v| *v += 1), Insertion::Inserted);
        assert_eq!(tree.insert_with("a", 1, |v| *v += 1), Insertion::Merged);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&"a"), Some(&2));
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn empty_tree() {
        let tree: AvlTree<u8, ()> = AvlTree::default();
        assert!(tree.is_empty());
        assert!(tree.in_order().is_empty());
        assert!(tree.is_balanced());
        assert_eq!(tree.get(&1), None);
    }
}
