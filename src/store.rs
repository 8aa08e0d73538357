//! The ordered collection of named matrices the user sees.
//!
//! Entries live in an arena and are threaded together by index into a doubly
//! linked list with two permanent sentinels. A [`Position`] is just an index
//! plus the generation of the slot it was handed out for, so inserting or
//! deleting one entry never invalidates the position of another, and a
//! position to something which has since been deleted is detected instead of
//! silently pointing at whatever reused the slot.
//!
//! Names are positional. A new entry is named after whatever comes
//! immediately before it (see [`next_name()`]) and nothing is renamed when the
//! list changes shape unless [`Store::rename_from_predecessor()`] is called.

use crate::matrix::Matrix;
use smol_str::SmolStr;

const HEAD: usize = 0;
const TAIL: usize = 1;

/// A stable handle to somewhere in the [`Store`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    index: usize,
    generation: u32,
}

/// A named matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: SmolStr,
    pub matrix: Matrix,
}

#[derive(Debug, Clone)]
struct Node {
    prev: usize,
    next: usize,
    generation: u32,
    /// Always `None` for the sentinels and for slots on the free list.
    entry: Option<Entry>,
}

impl Node {
    fn sentinel(prev: usize, next: usize) -> Self {
        Node {
            prev,
            next,
            generation: 0,
            entry: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    nodes: Vec<Node>,
    free: Vec<usize>,
    len: usize,
}

impl Store {
    pub fn new() -> Self {
        Store {
            nodes: vec![Node::sentinel(HEAD, TAIL), Node::sentinel(HEAD, TAIL)],
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// The first entry, or [`Store::end()`] when the store is empty.
    pub fn begin(&self) -> Position { self.position(self.nodes[HEAD].next) }

    /// The one-past-the-end sentinel. It never holds a value but it's always
    /// a valid place to insert before.
    pub fn end(&self) -> Position { self.position(TAIL) }

    /// The position after `position`, or `None` when `position` is the end
    /// or no longer valid.
    pub fn next(&self, position: Position) -> Option<Position> {
        let ix = self.resolve_entry(position)?;
        Some(self.position(self.nodes[ix].next))
    }

    /// The position before `position`, or `None` when there is nothing
    /// before it.
    pub fn prev(&self, position: Position) -> Option<Position> {
        let ix = self.resolve(position)?;
        let prev = self.nodes[ix].prev;

        if prev == HEAD {
            None
        } else {
            Some(self.position(prev))
        }
    }

    pub fn entry(&self, position: Position) -> Option<&Entry> {
        let ix = self.resolve_entry(position)?;
        self.nodes[ix].entry.as_ref()
    }

    pub fn value(&self, position: Position) -> Option<&Matrix> {
        self.entry(position).map(|entry| &entry.matrix)
    }

    pub fn value_mut(&mut self, position: Position) -> Option<&mut Matrix> {
        let ix = self.resolve_entry(position)?;
        self.nodes[ix].entry.as_mut().map(|entry| &mut entry.matrix)
    }

    pub fn name(&self, position: Position) -> Option<&str> {
        self.entry(position).map(|entry| entry.name.as_str())
    }

    /// Swap out the matrix at `position`, handing back the old one.
    pub fn replace(
        &mut self,
        position: Position,
        matrix: Matrix,
    ) -> Option<Matrix> {
        self.value_mut(position)
            .map(|existing| std::mem::replace(existing, matrix))
    }

    /// Find the first entry with this name.
    pub fn find(&self, name: &str) -> Option<Position> {
        self.iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(position, _)| position)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            store: self,
            current: self.nodes[HEAD].next,
        }
    }

    /// Insert a matrix immediately before `before`, naming it after its new
    /// predecessor. Returns `None` if `before` is no longer valid.
    pub fn insert(
        &mut self,
        before: Position,
        matrix: Matrix,
    ) -> Option<Position> {
        let next = self.resolve(before)?;
        Some(self.link_before(next, matrix))
    }

    pub fn insert_front(&mut self, matrix: Matrix) -> Position {
        let first = self.nodes[HEAD].next;
        self.link_before(first, matrix)
    }

    pub fn insert_back(&mut self, matrix: Matrix) -> Position {
        self.link_before(TAIL, matrix)
    }

    /// Delete the entry at `position`, returning the position that followed
    /// it. Deleting at [`Store::end()`] removes the last entry.
    pub fn delete(&mut self, position: Position) -> Option<Position> {
        let ix = self.resolve(position)?;

        let target = if ix == TAIL {
            let last = self.nodes[TAIL].prev;
            if last == HEAD {
                return None;
            }
            last
        } else {
            ix
        };

        let next = self.nodes[target].next;
        self.unlink(target)?;

        Some(self.position(next))
    }

    /// Take an entry out of the store.
    pub fn remove(&mut self, position: Position) -> Option<Entry> {
        let ix = self.resolve_entry(position)?;
        self.unlink(ix)
    }

    /// Delete every entry.
    pub fn destroy_all(&mut self) {
        while self.nodes[HEAD].next != TAIL {
            let first = self.nodes[HEAD].next;
            let _ = self.unlink(first);
        }
    }

    /// Recompute an entry's name from whatever now comes before it.
    pub fn rename_from_predecessor(
        &mut self,
        position: Position,
    ) -> Option<&str> {
        let ix = self.resolve_entry(position)?;
        let prev = self.nodes[ix].prev;
        let name = next_name(self.entry_name(prev));

        let entry = self.nodes[ix].entry.as_mut()?;
        tracing::trace!(from = %entry.name, to = %name, "Renamed");
        entry.name = name;

        Some(entry.name.as_str())
    }

    fn position(&self, index: usize) -> Position {
        Position {
            index,
            generation: self.nodes[index].generation,
        }
    }

    /// Turn a position into an index, accepting the tail sentinel.
    fn resolve(&self, position: Position) -> Option<usize> {
        let node = self.nodes.get(position.index)?;

        if node.generation != position.generation {
            return None;
        }

        if position.index == TAIL || node.entry.is_some() {
            Some(position.index)
        } else {
            None
        }
    }

    /// Turn a position into the index of a real entry.
    fn resolve_entry(&self, position: Position) -> Option<usize> {
        self.resolve(position).filter(|&ix| ix != TAIL)
    }

    fn entry_name(&self, index: usize) -> Option<&str> {
        self.nodes[index].entry.as_ref().map(|entry| entry.name.as_str())
    }

    fn link_before(&mut self, next: usize, matrix: Matrix) -> Position {
        let prev = self.nodes[next].prev;
        let name = next_name(self.entry_name(prev));
        tracing::trace!(
            %name,
            rows = matrix.row_count(),
            columns = matrix.column_count(),
            "Inserted"
        );

        let entry = Entry { name, matrix };

        let ix = match self.free.pop() {
            Some(ix) => {
                let node = &mut self.nodes[ix];
                node.prev = prev;
                node.next = next;
                node.entry = Some(entry);
                ix
            },
            None => {
                self.nodes.push(Node {
                    prev,
                    next,
                    generation: 0,
                    entry: Some(entry),
                });
                self.nodes.len() - 1
            },
        };

        self.nodes[prev].next = ix;
        self.nodes[next].prev = ix;
        self.len += 1;

        self.position(ix)
    }

    fn unlink(&mut self, ix: usize) -> Option<Entry> {
        let entry = self.nodes[ix].entry.take()?;
        let Node { prev, next, .. } = self.nodes[ix];

        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;

        // invalidate any positions still pointing at this slot
        let node = &mut self.nodes[ix];
        node.generation = node.generation.wrapping_add(1);
        node.prev = ix;
        node.next = ix;
        self.free.push(ix);
        self.len -= 1;

        tracing::trace!(name = %entry.name, "Deleted");

        Some(entry)
    }
}

impl Default for Store {
    fn default() -> Self { Store::new() }
}

/// Iterate over every entry in order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    store: &'a Store,
    current: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Position, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.store.nodes.get(self.current)?;
        let entry = node.entry.as_ref()?;
        let position = self.store.position(self.current);
        self.current = node.next;

        Some((position, entry))
    }
}

/// Work out the name of an entry given the name of the entry before it.
///
/// The first entry is `"A"` and each entry after that bumps the last letter.
/// Once the last letter is `'Z'` the name becomes a run of `'A'`s one letter
/// longer, so `"Z"` is followed by `"AA"` and `"AZ"` is followed by `"AAA"`.
pub fn next_name(previous: Option<&str>) -> SmolStr {
    let previous = previous.unwrap_or("");

    match previous.char_indices().last() {
        None => SmolStr::new("A"),
        Some((_, 'Z')) => {
            SmolStr::new("A".repeat(previous.chars().count() + 1))
        },
        Some((ix, letter)) => {
            let bumped =
                std::char::from_u32(u32::from(letter) + 1).unwrap_or('A');
            SmolStr::new(format!("{}{}", &previous[..ix], bumped))
        },
    }
}
