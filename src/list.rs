//! Immutable singly-linked list with shared tails.
//!
//! Every structure the reader and evaluator build sits on top of this type.
//! `cons` never mutates: it allocates a new head node pointing at the existing
//! tail, so any number of lists may share storage. The handle caches its
//! length, making `len` and the `cdr` of a known-length list O(1).

use itertools::Itertools;
use std::fmt;
use std::iter::FromIterator;
use std::rc::Rc;

struct Node<T> {
    value: T,
    next: Option<Rc<Node<T>>>,
}

pub struct List<T> {
    head: Option<Rc<Node<T>>>,
    len: usize,
}

/// Raised by [`List::nth`] when the index meets or exceeds the length.
#[derive(Debug, PartialEq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl fmt::Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index {} out of bounds for list of length {}",
            self.index, self.len
        )
    }
}

impl<T> List<T> {
    pub fn new() -> Self {
        List { head: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// New list with `value` at the front, sharing this list as its tail.
    pub fn cons(&self, value: T) -> Self {
        List {
            head: Some(Rc::new(Node {
                value,
                next: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub fn car(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.value)
    }

    /// Everything after the head. The cdr of the empty list is empty.
    pub fn cdr(&self) -> Self {
        match self.head.as_deref() {
            None => Self::new(),
            Some(node) => List {
                head: node.next.clone(),
                len: self.len - 1,
            },
        }
    }

    pub fn iter(&self) -> Iter<T> {
        Iter {
            node: self.head.as_deref(),
        }
    }

    pub fn nth(&self, index: usize) -> Result<&T, IndexOutOfBounds> {
        self.iter().nth(index).ok_or(IndexOutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Seeded left fold.
    pub fn fold<A>(&self, seed: A, mut f: impl FnMut(A, &T) -> A) -> A {
        let mut acc = seed;
        for item in self.iter() {
            acc = f(acc, item);
        }
        acc
    }

    /// Left fold using the first element as the seed. Returns `None` on the
    /// empty list so the caller supplies its own default.
    pub fn reduce(&self, f: impl FnMut(T, &T) -> T) -> Option<T>
    where
        T: Clone,
    {
        let first = self.car()?.clone();
        Some(self.cdr().fold(first, f))
    }

    /// Order-preserving map into a freshly allocated list.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> List<U> {
        self.iter().map(f).collect()
    }

    pub fn reverse(&self) -> Self
    where
        T: Clone,
    {
        self.fold(List::new(), |acc, item| acc.cons(item.clone()))
    }

    /// New list with the *first* element equal to `target` swapped for
    /// `replacement`. Returns `None` when no element matches: absence is
    /// signalled through the return value, never by mutating the receiver.
    /// The tail beyond the replaced element is shared with the original.
    pub fn replace(&self, target: &T, replacement: T) -> Option<Self>
    where
        T: Clone + PartialEq,
    {
        let mut prefix = Vec::new();
        let mut rest = self.clone();
        loop {
            let value = rest.car()?.clone();
            rest = rest.cdr();
            if value == *target {
                let mut out = rest.cons(replacement);
                for kept in prefix.into_iter().rev() {
                    out = out.cons(kept);
                }
                return Some(out);
            }
            prefix.push(value);
        }
    }
}

pub struct Iter<'a, T> {
    node: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(List::new(), |acc, item| acc.cons(item))
    }
}

// Not derived: deriving would demand T: Clone, but cloning a handle only
// bumps the head's reference count.
impl<T> Clone for List<T> {
    fn clone(&self) -> Self {
        List {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.iter().join(" "))
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

// Structural equality against plain ordered sequences as well: a list equals
// any slice of the same length whose elements are pairwise equal.
impl<T, U> PartialEq<[U]> for List<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.len == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T, U> PartialEq<Vec<U>> for List<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        *self == other[..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i32]) -> List<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn cons_grows_without_touching_the_tail() {
        let tail = ints(&[2, 3]);
        let grown = tail.cons(1);

        assert_eq!(grown.len(), 3);
        assert_eq!(grown.car(), Some(&1));
        assert_eq!(grown.cdr(), tail);
        assert_eq!(tail, vec![2, 3]);
    }

    #[test]
    fn empty_list_has_length_zero() {
        let empty: List<i32> = List::new();
        assert!(empty.is_empty());
        assert_eq!(empty.car(), None);
        assert!(empty.cdr().is_empty());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(ints(&[1, 2, 3]), ints(&[1, 2, 3]));
        assert_ne!(ints(&[1, 2, 3]), ints(&[42, 2, 3]));
        assert_ne!(ints(&[1, 2, 3]), ints(&[0, 1, 2, 3]));
        assert_eq!(ints(&[1, 2, 3]), vec![1, 2, 3]);
        assert_ne!(ints(&[1, 2, 3]), vec![1, 2]);
    }

    #[test]
    fn map_preserves_order() {
        let incremented = ints(&[1, 2, 3]).map(|x| x + 1);
        assert_eq!(incremented, vec![2, 3, 4]);
    }

    #[test]
    fn reduce_uses_first_element_as_seed() {
        assert_eq!(ints(&[3, 2, 1, 1]).reduce(|a, b| a + b), Some(7));
        assert_eq!(ints(&[42]).reduce(|a, b| a + b), Some(42));
        assert_eq!(ints(&[]).reduce(|a, b| a + b), None);
    }

    #[test]
    fn fold_returns_seed_on_empty_list() {
        assert_eq!(ints(&[]).fold(5, |a, b| a + b), 5);
        assert_eq!(ints(&[3, 2, 1, 1]).fold(5, |a, b| a + b), 12);
    }

    #[test]
    fn reverse_round_trips() {
        assert_eq!(ints(&[1, 2, 3]).reverse(), vec![3, 2, 1]);
        assert_eq!(ints(&[1, 2, 3]).reverse().reverse(), vec![1, 2, 3]);
    }

    #[test]
    fn replace_swaps_the_first_match() {
        let original = ints(&[3, 2, 1]);
        let replaced = original.replace(&2, 42).unwrap();

        assert_eq!(replaced, vec![3, 42, 1]);
        // receiver untouched
        assert_eq!(original, vec![3, 2, 1]);
    }

    #[test]
    fn replace_signals_absence_with_none() {
        assert_eq!(ints(&[1, 2, 3]).replace(&9, 42), None);
    }

    #[test]
    fn nth_is_zero_indexed() {
        let list = ints(&[42, 2, 1]);
        assert_eq!(list.nth(0), Ok(&42));
        assert_eq!(list.nth(1), Ok(&2));
        assert_eq!(list.nth(2), Ok(&1));
    }

    #[test]
    fn nth_reports_overruns() {
        let list = ints(&[42, 2, 1]);
        assert_eq!(list.nth(3), Err(IndexOutOfBounds { index: 3, len: 3 }));
    }
}
