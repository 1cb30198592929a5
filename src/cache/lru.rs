//! Recency List Module
//!
//! Arena-backed doubly linked list ordering live entries from most recently
//! used (front) to least recently used (back).
//!
//! ```text
//!   slot 0 (head) ◄──► [MRU] ◄──► ... ◄──► [LRU] ◄──► slot 1 (tail)
//! ```
//!
//! Nodes are addressed by [`SlotId`] rather than by reference, so splicing
//! stays O(1) without aliasing. The two sentinel slots never hold data, are
//! never handed out, and are never evicted; `head.next == tail` iff the list
//! is empty. Freed slots are recycled through a free list.

const HEAD: usize = 0;
const TAIL: usize = 1;

// == Slot Id ==
/// Stable handle to a node in a [`RecencyList`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
}

// == Recency List ==
/// Ordering structure for live cache entries.
///
/// A slot is either UNLINKED (allocated by [`insert`](Self::insert), no
/// links) or LINKED (between the sentinels). Only linked slots count
/// towards [`len`](Self::len).
#[derive(Debug)]
pub struct RecencyList<T> {
    nodes: Vec<Node<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> RecencyList<T> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` entries besides the
    /// two sentinels.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity + 2);
        nodes.push(Node {
            value: None,
            prev: None,
            next: Some(TAIL),
        });
        nodes.push(Node {
            value: None,
            prev: Some(HEAD),
            next: None,
        });
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Insert ==
    /// Stores `value` in a fresh UNLINKED slot and returns its handle.
    pub fn insert(&mut self, value: T) -> SlotId {
        let node = Node {
            value: Some(value),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        SlotId(idx)
    }

    // == Link Front ==
    /// Splices an unlinked slot between `head` and `head.next`.
    ///
    /// Anything other than a live, unlinked slot is ignored.
    pub fn link_front(&mut self, id: SlotId) {
        let idx = id.0;
        match self.nodes.get(idx) {
            Some(node) if !is_sentinel(idx) && node.value.is_some() => {
                if node.prev.is_some() || node.next.is_some() {
                    return;
                }
            }
            _ => return,
        }

        let first = self.nodes[HEAD].next.unwrap_or(TAIL);
        self.nodes[idx].prev = Some(HEAD);
        self.nodes[idx].next = Some(first);
        self.nodes[first].prev = Some(idx);
        self.nodes[HEAD].next = Some(idx);
        self.len += 1;
    }

    // == Unlink ==
    /// Detaches a linked slot, clearing its own links. The value stays in
    /// the slot.
    pub fn unlink(&mut self, id: SlotId) {
        let idx = id.0;
        debug_assert!(!is_sentinel(idx), "sentinels are never unlinked");

        let (prev, next) = match (self.nodes[idx].prev.take(), self.nodes[idx].next.take()) {
            (Some(prev), Some(next)) => (prev, next),
            _ => return,
        };
        self.nodes[prev].next = Some(next);
        self.nodes[next].prev = Some(prev);
        self.len -= 1;
    }

    // == Move To Front ==
    /// Marks a linked slot as most recently used.
    pub fn move_to_front(&mut self, id: SlotId) {
        if self.nodes[HEAD].next == Some(id.0) {
            return;
        }
        self.unlink(id);
        self.link_front(id);
    }

    // == Remove ==
    /// Unlinks a slot and releases it, returning the stored value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        if is_sentinel(id.0) || self.get(id).is_none() {
            return None;
        }
        self.unlink(id);
        let value = self.nodes[id.0].value.take();
        self.free.push(id.0);
        value
    }

    // == Evict LRU ==
    /// Unlinks and releases the least recently used slot.
    ///
    /// Returns `None` when `tail.prev` is the head sentinel, i.e. no live
    /// entries remain.
    pub fn evict_lru(&mut self) -> Option<T> {
        let lru = self.back_id()?;
        self.remove(lru)
    }

    // == Accessors ==
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        if is_sentinel(id.0) {
            return None;
        }
        self.nodes.get_mut(id.0).and_then(|node| node.value.as_mut())
    }

    /// Handle of the least recently used live slot.
    pub fn back_id(&self) -> Option<SlotId> {
        match self.nodes[TAIL].prev {
            Some(HEAD) | None => None,
            Some(idx) => Some(SlotId(idx)),
        }
    }

    /// Number of linked slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Iterates linked slots from most to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.nodes[HEAD].next.unwrap_or(TAIL),
        }
    }

    /// Walks the list front to back and checks link symmetry.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let mut forward = 0usize;
        let mut idx = HEAD;
        while idx != TAIL {
            let next = self.nodes[idx]
                .next
                .ok_or_else(|| format!("slot {} has no next link", idx))?;
            if self.nodes[next].prev != Some(idx) {
                return Err(format!("slot {} does not point back to {}", next, idx));
            }
            if next != TAIL {
                if self.nodes[next].value.is_none() {
                    return Err(format!("linked slot {} is vacant", next));
                }
                forward += 1;
                if forward > self.len {
                    return Err(format!("list is longer than its length {}", self.len));
                }
            }
            idx = next;
        }
        if forward != self.len {
            return Err(format!(
                "walked {} linked slots but length is {}",
                forward, self.len
            ));
        }
        Ok(())
    }
}

fn is_sentinel(idx: usize) -> bool {
    idx == HEAD || idx == TAIL
}

// == Iterator ==
/// Front-to-back iterator over `(SlotId, &T)`.
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    current: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == TAIL {
            return None;
        }
        let idx = self.current;
        let node = &self.list.nodes[idx];
        self.current = node.next.unwrap_or(TAIL);
        node.value.as_ref().map(|value| (SlotId(idx), value))
    }
}
