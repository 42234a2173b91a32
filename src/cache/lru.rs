//! Recency List Module
//!
//! Slab-backed doubly linked list that keeps cache nodes in recency order.

// == Handle ==
/// Stable index of a node inside a [`RecencyList`].
///
/// A handle stays valid until its node is removed; slots are reused after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug)]
struct Node<T> {
    item: T,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Tracks access order for LRU eviction.
///
/// - Front = least recently used
/// - Back = most recently used
///
/// Push, remove and move-to-back are O(1).
#[derive(Debug)]
pub struct RecencyList<T> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    // == Push Back ==
    /// Appends an item at the most-recent position.
    pub fn push_back(&mut self, item: T) -> Handle {
        let node = Node {
            item,
            prev: self.tail,
            next: None,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(t) = self.slots[tail].as_mut() {
                    t.next = Some(idx);
                }
            }
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;

        Handle(idx)
    }

    // == Remove ==
    /// Unlinks a node and returns its item. Stale handles yield None.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        self.unlink(handle.0)?;
        let node = self.slots[handle.0].take()?;
        self.free.push(handle.0);
        self.len -= 1;
        Some(node.item)
    }

    // == Move To Back ==
    /// Marks a node as most recently used.
    pub fn move_to_back(&mut self, handle: Handle) {
        let idx = handle.0;
        if self.tail == Some(idx) || self.unlink(idx).is_none() {
            return;
        }

        if let Some(node) = self.slots[idx].as_mut() {
            node.prev = self.tail;
            node.next = None;
        }
        if let Some(tail) = self.tail {
            if let Some(t) = self.slots[tail].as_mut() {
                t.next = Some(idx);
            }
        } else {
            self.head = Some(idx);
        }
        self.tail = Some(idx);
    }

    // == Pop Front ==
    /// Removes and returns the least recently used item.
    pub fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        self.remove(Handle(head))
    }

    // == Get ==
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.0)?.as_ref().map(|n| &n.item)
    }

    // == Length ==
    /// Returns the number of linked nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates items oldest first.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    /// Iterates handles oldest first, alongside their items.
    pub fn iter_handles(&self) -> impl Iterator<Item = (Handle, &T)> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let idx = cursor?;
            let node = self.slots[idx].as_ref()?;
            cursor = node.next;
            Some((Handle(idx), &node.item))
        })
    }

    fn unlink(&mut self, idx: usize) -> Option<()> {
        let (prev, next) = {
            let node = self.slots.get(idx)?.as_ref()?;
            (node.prev, node.next)
        };

        match prev {
            Some(p) => {
                if let Some(n) = self.slots[p].as_mut() {
                    n.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.slots[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        Some(())
    }
}

// == Iterator ==
/// Oldest-first iterator over a [`RecencyList`].
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.slots[idx].as_ref()?;
        self.cursor = node.next;
        Some(&node.item)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn items(list: &RecencyList<&'static str>) -> Vec<&'static str> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_list_new() {
        let list: RecencyList<u32> = RecencyList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.iter().next().is_none());
    }

    #[test]
    fn test_push_back_keeps_insertion_order() {
        let mut list = RecencyList::new();
        list.push_back("a");
        list.push_back("b");
        list.push_back("c");

        assert_eq!(list.len(), 3);
        assert_eq!(items(&list), vec!["a", "b", "c"]);
        let (first, _) = list.iter_handles().next().unwrap();
        assert_eq!(list.get(first), Some(&"a"));
    }

    #[test]
    fn test_move_to_back() {
        let mut list = RecencyList::new();
        let a = list.push_back("a");
        list.push_back("b");
        list.push_back("c");

        list.move_to_back(a);

        assert_eq!(items(&list), vec!["b", "c", "a"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_move_tail_to_back_is_noop() {
        let mut list = RecencyList::new();
        list.push_back("a");
        let b = list.push_back("b");

        list.move_to_back(b);

        assert_eq!(items(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_move_middle_to_back() {
        let mut list = RecencyList::new();
        list.push_back("a");
        let b = list.push_back("b");
        list.push_back("c");

        list.move_to_back(b);

        assert_eq!(items(&list), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_pop_front() {
        let mut list = RecencyList::new();
        list.push_back("a");
        list.push_back("b");

        assert_eq!(list.pop_front(), Some("a"));
        assert_eq!(list.pop_front(), Some("b"));
        assert_eq!(list.pop_front(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_reuses_slot() {
        let mut list = RecencyList::new();
        list.push_back("a");
        let b = list.push_back("b");
        list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(list.remove(b), None, "stale handle");
        assert_eq!(items(&list), vec!["a", "c"]);

        let d = list.push_back("d");
        assert_eq!(d, b, "freed slot is reused");
        assert_eq!(items(&list), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_remove_only_node() {
        let mut list = RecencyList::new();
        let a = list.push_back("a");

        assert_eq!(list.remove(a), Some("a"));
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);

        list.push_back("b");
        assert_eq!(items(&list), vec!["b"]);
    }

    #[test]
    fn test_order_after_multiple_touches() {
        let mut list = RecencyList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        list.move_to_back(a);
        list.move_to_back(c);
        list.move_to_back(b);

        assert_eq!(list.pop_front(), Some("a"));
        assert_eq!(list.pop_front(), Some("c"));
        assert_eq!(list.pop_front(), Some("b"));
    }

    #[test]
    fn test_iter_handles_match_get() {
        let mut list = RecencyList::new();
        list.push_back(1);
        list.push_back(2);

        for (h, item) in list.iter_handles() {
            assert_eq!(list.get(h), Some(item));
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_clear() {
        let mut list = RecencyList::new();
        list.push_back("a");
        list.push_back("b");

        list.clear();

        assert!(list.is_empty());
        assert_eq!(items(&list), Vec::<&str>::new());
    }
}
