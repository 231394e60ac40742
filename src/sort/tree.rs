//! Binary search tree sort.
//!
//! Items are inserted one by one into an unbalanced binary search tree and
//! read back by in-order traversal. Equal items descend to the right, so
//! insertion order is kept among ties.
//!
//! The tree is not rebalanced: sorted or reverse-sorted input degenerates it
//! into a list and the sort into O(n²) comparisons. The order produced is
//! still correct, and because nodes live in an arena and both insertion and
//! traversal are loops, a degenerate tree cannot overflow the call stack.

use std::cmp::Ordering;

#[derive(Debug)]
struct Node<T> {
    item: Option<T>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Arena-backed binary search tree.
#[derive(Debug)]
struct SearchTree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> SearchTree<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn insert<F>(&mut self, item: T, compare: &mut F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let index = self.nodes.len();
        if index > 0 {
            let mut current = 0;
            loop {
                let node = &self.nodes[current];
                let goes_left = node
                    .item
                    .as_ref()
                    .is_some_and(|existing| compare(&item, existing) == Ordering::Less);
                let slot = if goes_left { node.left } else { node.right };
                match slot {
                    Some(child) => current = child,
                    None => {
                        let node = &mut self.nodes[current];
                        if goes_left {
                            node.left = Some(index);
                        } else {
                            node.right = Some(index);
                        }
                        break;
                    }
                }
            }
        }

        self.nodes.push(Node {
            item: Some(item),
            left: None,
            right: None,
        });
    }

    /// Consumes the tree, yielding items in order.
    fn into_sorted(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut current = if self.nodes.is_empty() { None } else { Some(0) };

        while current.is_some() || !stack.is_empty() {
            while let Some(index) = current {
                stack.push(index);
                current = self.nodes[index].left;
            }
            if let Some(index) = stack.pop() {
                if let Some(item) = self.nodes[index].item.take() {
                    sorted.push(item);
                }
                current = self.nodes[index].right;
            }
        }

        sorted
    }
}

pub fn sort_by<T, F>(items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut tree = SearchTree::with_capacity(items.len());
    for item in items {
        tree.insert(item, &mut compare);
    }
    tree.into_sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sorts() {
        let sorted = sort_by(vec![50, 30, 70, 20, 40, 60, 80, 30], |a, b| a.cmp(b));
        assert_eq!(sorted, vec![20, 30, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let sorted = sort_by(vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')], |a, b| a.0.cmp(&b.0));
        assert_eq!(sorted, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    }

    #[test]
    fn test_degenerate_tree_does_not_overflow() {
        let input: Vec<u32> = (0..5_000).collect();
        let sorted = sort_by(input.clone(), |a, b| a.cmp(b));
        assert_eq!(sorted, input);
    }

    #[test]
    fn test_empty() {
        assert!(sort_by(Vec::<i32>::new(), |a, b| a.cmp(b)).is_empty());
    }
}
