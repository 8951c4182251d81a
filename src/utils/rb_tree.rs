use alloc::vec::Vec;
use core::cmp::Ordering;
use ordered_float::{FloatCore, OrderedFloat};

/// Index standing in for an absent node
const NIL: usize = usize::MAX;

/// Red-Black tree node colors used to maintain tree balance properties.
///
/// Red-Black trees maintain balance by ensuring:
/// - Red nodes have black children
/// - All paths from root to leaves have equal black node counts
#[derive(Debug, Clone, Copy, PartialEq)]
enum Color {
    Red,
    Black,
}

/// A node in the Red-Black tree containing data and structural information.
#[derive(Debug, Clone)]
struct Node<T> {
    /// The stored value, totally ordered
    value: OrderedFloat<T>,

    /// Number of occurrences of `value` (multiset behavior)
    count: usize,

    parent: usize,
    left: usize,
    right: usize,
    color: Color,

    /// Total count of elements in this node's subtree (including duplicates)
    subtree_count: usize,
}

/// An order-statistics Red-Black tree over floating point values.
///
/// Every distinct value occupies one node carrying its multiplicity, and every
/// node caches the number of elements in its subtree. That gives O(log n)
/// duplicate-aware insert, remove-one-occurrence, rank (count strictly less)
/// and select (k-th smallest).
///
/// Nodes live in an index arena; removed slots go onto a free list and are
/// reused, so a tree that slides over a window stops allocating once it has
/// seen its largest population.
#[derive(Debug, Clone)]
pub struct RbTree<T> {
    /// Node arena; slots listed in `free_list` are dead
    nodes: Vec<Node<T>>,

    /// Dead slots available for reuse
    free_list: Vec<usize>,

    /// Number of distinct values currently stored
    len: usize,

    /// Total number of elements including all duplicates
    total_count: usize,

    /// Index of the root node, `NIL` when the tree is empty
    root: usize,
}

impl<T: FloatCore> RbTree<T> {
    /// Creates an empty tree with room for `capacity` distinct values before growing.
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free_list: Vec::with_capacity(capacity),
            len: 0,
            total_count: 0,
            root: NIL,
        }
    }

    /// Number of distinct values
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Number of elements, duplicates included
    #[inline]
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Returns `true` when no element is stored
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts one occurrence of `value`.
    pub fn insert(&mut self, value: T) {
        let ordered_value = OrderedFloat(value);

        if let Some(existing_idx) = self.find_node(ordered_value) {
            self.node_at_mut(existing_idx).count += 1;
            self.total_count += 1;
            self.update_subtree_counts_to_root(existing_idx);
            return;
        }

        let parent_idx = self.find_insertion_parent(ordered_value);
        let new_idx = self.allocate_node(Node {
            value: ordered_value,
            count: 1,
            parent: parent_idx,
            left: NIL,
            right: NIL,
            color: Color::Red,
            subtree_count: 1,
        });
        self.link_to_parent(new_idx, parent_idx, ordered_value);

        self.len += 1;
        self.total_count += 1;

        self.update_subtree_counts_to_root(parent_idx);
        self.fix_insertion_violations(new_idx);

        #[cfg(debug_assertions)]
        debug_assert!(
            self.verify_rb_invariants(),
            "RB tree invariants violated after insertion"
        );
    }

    /// Removes exactly one occurrence of `value`.
    ///
    /// # Returns
    ///
    /// * `bool` - `false` if the value was not present
    pub fn remove(&mut self, value: T) -> bool {
        let Some(node_idx) = self.find_node(OrderedFloat(value)) else {
            return false;
        };

        if self.node_at(node_idx).count > 1 {
            self.node_at_mut(node_idx).count -= 1;
            self.update_subtree_counts_to_root(node_idx);
        } else {
            self.delete_node(node_idx);
            self.len -= 1;
        }
        self.total_count -= 1;
        debug_assert!(self.len() <= self.total_count());

        #[cfg(debug_assertions)]
        debug_assert!(
            self.verify_rb_invariants(),
            "RB tree invariants violated after removal"
        );

        true
    }

    /// Number of stored elements strictly less than `value`
    pub fn rank(&self, value: T) -> usize {
        let value = OrderedFloat(value);
        let mut current = self.root;
        let mut below = 0;

        while current != NIL {
            let node = self.node_at(current);
            match value.cmp(&node.value) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return below + self.get_subtree_count(node.left),
                Ordering::Greater => {
                    below += self.get_subtree_count(node.left) + node.count;
                    current = node.right;
                }
            }
        }
        below
    }

    /// The `k`-th smallest element (zero based), duplicates counted
    pub fn select(&self, k: usize) -> Option<T> {
        if k >= self.total_count {
            return None;
        }

        let mut current = self.root;
        let mut remaining_rank = k;

        while current != NIL {
            let node = self.node_at(current);
            let left_count = self.get_subtree_count(node.left);

            if remaining_rank < left_count {
                current = node.left;
            } else if remaining_rank < left_count + node.count {
                return Some(node.value.into_inner());
            } else {
                remaining_rank -= left_count + node.count;
                current = node.right;
            }
        }
        None
    }

    /// Smallest stored element
    pub fn min(&self) -> Option<T> {
        (!self.is_empty()).then(|| self.node_at(self.find_minimum(self.root)).value.into_inner())
    }

    /// Largest stored element
    pub fn max(&self) -> Option<T> {
        (!self.is_empty()).then(|| self.node_at(self.find_maximum(self.root)).value.into_inner())
    }

    /// Removes every element, keeping the arena allocation.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.len = 0;
        self.total_count = 0;
        self.root = NIL;
    }

    #[inline]
    fn allocate_node(&mut self, node: Node<T>) -> usize {
        match self.free_list.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    #[inline]
    fn deallocate_node(&mut self, node_idx: usize) {
        self.free_list.push(node_idx);
    }

    #[inline]
    fn node_at(&self, idx: usize) -> &Node<T> {
        &self.nodes[idx]
    }

    #[inline]
    fn node_at_mut(&mut self, idx: usize) -> &mut Node<T> {
        &mut self.nodes[idx]
    }

    fn link_to_parent(&mut self, node_idx: usize, parent_idx: usize, value: OrderedFloat<T>) {
        if parent_idx == NIL {
            self.root = node_idx;
        } else if value < self.node_at(parent_idx).value {
            self.node_at_mut(parent_idx).left = node_idx;
        } else {
            self.node_at_mut(parent_idx).right = node_idx;
        }
    }

    fn find_node(&self, value: OrderedFloat<T>) -> Option<usize> {
        let mut current = self.root;

        while current != NIL {
            let node = self.node_at(current);
            match value.cmp(&node.value) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    fn find_insertion_parent(&self, value: OrderedFloat<T>) -> usize {
        let mut current = self.root;
        let mut parent = NIL;

        while current != NIL {
            parent = current;
            let node = self.node_at(current);
            current = if value < node.value {
                node.left
            } else {
                node.right
            };
        }
        parent
    }

    fn find_minimum(&self, mut node: usize) -> usize {
        while self.get_left(node) != NIL {
            node = self.get_left(node);
        }
        node
    }

    fn find_maximum(&self, mut node: usize) -> usize {
        while self.get_right(node) != NIL {
            node = self.get_right(node);
        }
        node
    }

    fn update_subtree_counts_to_root(&mut self, mut node: usize) {
        while node != NIL {
            self.recalculate_subtree_count(node);
            node = self.node_at(node).parent;
        }
    }

    fn recalculate_subtree_count(&mut self, node_idx: usize) {
        if node_idx == NIL {
            return;
        }

        let node = self.node_at(node_idx);
        let total = node.count + self.get_subtree_count(node.left) + self.get_subtree_count(node.right);
        self.node_at_mut(node_idx).subtree_count = total;
    }

    #[inline]
    fn get_subtree_count(&self, node_idx: usize) -> usize {
        if node_idx == NIL {
            0
        } else {
            self.node_at(node_idx).subtree_count
        }
    }

    #[inline]
    fn get_color(&self, node_idx: usize) -> Color {
        if node_idx == NIL {
            Color::Black
        } else {
            self.node_at(node_idx).color
        }
    }

    #[inline]
    fn set_color(&mut self, node_idx: usize, color: Color) {
        if node_idx != NIL {
            self.node_at_mut(node_idx).color = color;
        }
    }

    #[inline]
    fn is_red(&self, node_idx: usize) -> bool {
        self.get_color(node_idx) == Color::Red
    }

    #[inline]
    fn is_black(&self, node_idx: usize) -> bool {
        self.get_color(node_idx) == Color::Black
    }

    #[inline]
    fn get_parent(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).parent
        }
    }

    #[inline]
    fn get_left(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).left
        }
    }

    #[inline]
    fn get_right(&self, node: usize) -> usize {
        if node == NIL {
            NIL
        } else {
            self.node_at(node).right
        }
    }

    /// Puts `new_node` where `old_node` hangs from its parent
    fn transplant(&mut self, old_node: usize, new_node: usize) {
        let parent = self.node_at(old_node).parent;

        if parent == NIL {
            self.root = new_node;
        } else if old_node == self.node_at(parent).left {
            self.node_at_mut(parent).left = new_node;
        } else {
            self.node_at_mut(parent).right = new_node;
        }

        if new_node != NIL {
            self.node_at_mut(new_node).parent = parent;
        }
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.get_right(x);
        if x == NIL || y == NIL {
            return;
        }

        let y_left = self.node_at(y).left;
        self.node_at_mut(x).right = y_left;
        if y_left != NIL {
            self.node_at_mut(y_left).parent = x;
        }

        self.transplant(x, y);
        self.node_at_mut(y).left = x;
        self.node_at_mut(x).parent = y;

        self.recalculate_subtree_count(x);
        self.recalculate_subtree_count(y);
    }

    fn rotate_right(&mut self, y: usize) {
        let x = self.get_left(y);
        if y == NIL || x == NIL {
            return;
        }

        let x_right = self.node_at(x).right;
        self.node_at_mut(y).left = x_right;
        if x_right != NIL {
            self.node_at_mut(x_right).parent = y;
        }

        self.transplant(y, x);
        self.node_at_mut(x).right = y;
        self.node_at_mut(y).parent = x;

        self.recalculate_subtree_count(y);
        self.recalculate_subtree_count(x);
    }

    fn fix_insertion_violations(&mut self, mut node: usize) {
        while node != self.root && self.is_red(self.get_parent(node)) {
            let parent = self.get_parent(node);
            let grandparent = self.get_parent(parent);

            if parent == self.get_left(grandparent) {
                let uncle = self.get_right(grandparent);

                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.get_parent(node);
                    let grandparent = self.get_parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.get_left(grandparent);

                if self.is_red(uncle) {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                } else {
                    if node == self.get_left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.get_parent(node);
                    let grandparent = self.get_parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }
        self.set_color(self.root, Color::Black);
    }

    fn delete_node(&mut self, node: usize) {
        let left = self.node_at(node).left;
        let right = self.node_at(node).right;
        let mut removed_color = self.get_color(node);
        let fixup_node;
        let fixup_parent;

        if left == NIL {
            fixup_node = right;
            fixup_parent = self.node_at(node).parent;
            self.transplant(node, right);
        } else if right == NIL {
            fixup_node = left;
            fixup_parent = self.node_at(node).parent;
            self.transplant(node, left);
        } else {
            let successor = self.find_minimum(right);
            removed_color = self.get_color(successor);
            fixup_node = self.node_at(successor).right;

            if self.node_at(successor).parent == node {
                fixup_parent = successor;
            } else {
                fixup_parent = self.node_at(successor).parent;
                self.transplant(successor, fixup_node);
                self.node_at_mut(successor).right = right;
                self.node_at_mut(right).parent = successor;
            }

            self.transplant(node, successor);
            self.node_at_mut(successor).left = left;
            self.node_at_mut(left).parent = successor;
            self.node_at_mut(successor).color = self.node_at(node).color;
        }

        // every node whose subtree lost the element lies on this path;
        // settle counts first so the rebalancing rotations see exact values
        self.update_subtree_counts_to_root(fixup_parent);

        if removed_color == Color::Black {
            self.fix_deletion_violations(fixup_node, fixup_parent);
        }

        self.deallocate_node(node);
    }

    fn fix_deletion_violations(&mut self, mut fixup_node: usize, mut fixup_parent: usize) {
        while fixup_node != self.root && self.is_black(fixup_node) && fixup_parent != NIL {
            if fixup_node == self.get_left(fixup_parent) {
                let mut sibling = self.get_right(fixup_parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(fixup_parent, Color::Red);
                    self.rotate_left(fixup_parent);
                    sibling = self.get_right(fixup_parent);
                }

                if self.is_black(self.get_left(sibling)) && self.is_black(self.get_right(sibling)) {
                    self.set_color(sibling, Color::Red);
                    fixup_node = fixup_parent;
                    fixup_parent = self.get_parent(fixup_node);
                } else {
                    if self.is_black(self.get_right(sibling)) {
                        self.set_color(self.get_left(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.get_right(fixup_parent);
                    }

                    self.set_color(sibling, self.get_color(fixup_parent));
                    self.set_color(fixup_parent, Color::Black);
                    self.set_color(self.get_right(sibling), Color::Black);
                    self.rotate_left(fixup_parent);
                    fixup_node = self.root;
                    fixup_parent = NIL;
                }
            } else {
                let mut sibling = self.get_left(fixup_parent);

                if self.is_red(sibling) {
                    self.set_color(sibling, Color::Black);
                    self.set_color(fixup_parent, Color::Red);
                    self.rotate_right(fixup_parent);
                    sibling = self.get_left(fixup_parent);
                }

                if self.is_black(self.get_right(sibling)) && self.is_black(self.get_left(sibling)) {
                    self.set_color(sibling, Color::Red);
                    fixup_node = fixup_parent;
                    fixup_parent = self.get_parent(fixup_node);
                } else {
                    if self.is_black(self.get_left(sibling)) {
                        self.set_color(self.get_right(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.get_left(fixup_parent);
                    }

                    self.set_color(sibling, self.get_color(fixup_parent));
                    self.set_color(fixup_parent, Color::Black);
                    self.set_color(self.get_left(sibling), Color::Black);
                    self.rotate_right(fixup_parent);
                    fixup_node = self.root;
                    fixup_parent = NIL;
                }
            }
        }

        self.set_color(fixup_node, Color::Black);
    }

    #[cfg(debug_assertions)]
    fn verify_rb_invariants(&self) -> bool {
        if self.root == NIL {
            return self.total_count == 0;
        }

        self.is_black(self.root)
            && self.verify_black_height(self.root).is_some()
            && self.get_subtree_count(self.root) == self.total_count
    }

    #[cfg(debug_assertions)]
    fn verify_black_height(&self, node: usize) -> Option<usize> {
        if node == NIL {
            return Some(1);
        }

        let node_ref = self.node_at(node);

        if self.is_red(node) && (self.is_red(node_ref.left) || self.is_red(node_ref.right)) {
            return None;
        }

        let expected_count = node_ref.count
            + self.get_subtree_count(node_ref.left)
            + self.get_subtree_count(node_ref.right);
        if node_ref.subtree_count != expected_count {
            return None;
        }

        let left_height = self.verify_black_height(node_ref.left)?;
        let right_height = self.verify_black_height(node_ref.right)?;

        if left_height != right_height {
            return None;
        }

        Some(left_height + usize::from(self.is_black(node)))
    }
}
