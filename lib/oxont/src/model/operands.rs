use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::slice;
use std::vec;

/// The operands of an n-ary axiom or the annotations of an axiom.
///
/// Operands keep the order they were given in (so that writing reproduces the same RDF lists)
/// but duplicates are dropped and equality and hashing ignore the order.
///
/// ```
/// use oxont::model::Operands;
///
/// let a = Operands::from(vec![1, 2, 3, 2]);
/// let b = Operands::from(vec![3, 1, 2]);
/// assert_eq!(a.len(), 3);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct Operands<T>(Vec<T>);

impl<T: PartialEq> Operands<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut result = Vec::new();
        for item in items {
            if !result.contains(&item) {
                result.push(item);
            }
        }
        Self(result)
    }

    /// Adds an element if it is not already present.
    pub fn insert(&mut self, item: T) -> bool {
        if self.0.contains(&item) {
            return false;
        }
        self.0.push(item);
        true
    }
}

impl<T> Operands<T> {
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T> Default for Operands<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Operands<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Operands<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|item| other.0.contains(item))
    }
}

impl<T: Eq> Eq for Operands<T> {}

impl<T: Hash> Hash for Operands<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut hashes = self
            .0
            .iter()
            .map(|item| {
                let mut hasher = FxHasher::default();
                item.hash(&mut hasher);
                hasher.finish()
            })
            .collect::<Vec<_>>();
        hashes.sort_unstable();
        hashes.hash(state);
    }
}

impl<T: PartialEq> From<Vec<T>> for Operands<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: PartialEq> FromIterator<T> for Operands<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> IntoIterator for Operands<T> {
    type Item = T;
    type IntoIter = vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Operands<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
