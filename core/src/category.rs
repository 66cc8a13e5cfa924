//! Failure categories and the `is-a` relation between them
//!
//! A category is a node in a single-rooted hierarchy. Membership checks walk
//! the explicit parent chain instead of relying on a language type system, so
//! any closed enum can serve as a failure taxonomy.

use std::fmt::Debug;
use std::hash::Hash;
use std::io;

/// A node in a single-rooted failure hierarchy
///
/// # Examples
///
/// ```rust
/// use failure_interpreter::{Category, FailureKind};
///
/// assert!(FailureKind::Timeout.is_a(&FailureKind::Io));
/// assert!(FailureKind::Timeout.is_a(&FailureKind::Any));
/// assert!(!FailureKind::Io.is_a(&FailureKind::Timeout));
/// ```
pub trait Category: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// The "any failure" category every other category descends from
    fn root() -> Self;

    /// Direct parent, `None` only for the root
    fn parent(&self) -> Option<Self>;

    /// Reflexive subtype check: `self` equals `other` or descends from it
    fn is_a(&self, other: &Self) -> bool {
        self.ancestors().any(|c| c == *other)
    }

    /// Iterate from `self` up to the root, `self` first
    fn ancestors(&self) -> Ancestors<Self> {
        Ancestors { next: Some(*self) }
    }
}

/// Iterator over a category and its ancestors
#[derive(Debug, Clone)]
pub struct Ancestors<C> {
    next: Option<C>,
}

impl<C: Category> Iterator for Ancestors<C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Anything that can report the category of failure it represents
pub trait Failure {
    type Category: Category;

    fn category(&self) -> Self::Category;
}

/// Built-in failure taxonomy for callers without their own
///
/// ```text
/// Any
/// ├── Error
/// │   ├── Io
/// │   │   ├── Timeout
/// │   │   ├── ConnectionRefused
/// │   │   ├── ConnectionReset
/// │   │   ├── NotFound
/// │   │   └── PermissionDenied
/// │   └── Runtime
/// │       ├── InvalidArgument
/// │       ├── InvalidState
/// │       └── Unsupported
/// └── Fatal
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum FailureKind {
    Any,
    Error,
    Io,
    Timeout,
    ConnectionRefused,
    ConnectionReset,
    NotFound,
    PermissionDenied,
    Runtime,
    InvalidArgument,
    InvalidState,
    Unsupported,
    Fatal,
}

impl Category for FailureKind {
    fn root() -> Self {
        FailureKind::Any
    }

    fn parent(&self) -> Option<Self> {
        use FailureKind::*;

        match self {
            Any => None,
            Error | Fatal => Some(Any),
            Io | Runtime => Some(Error),
            Timeout | ConnectionRefused | ConnectionReset | NotFound | PermissionDenied => Some(Io),
            InvalidArgument | InvalidState | Unsupported => Some(Runtime),
        }
    }
}

impl Failure for FailureKind {
    type Category = FailureKind;

    fn category(&self) -> FailureKind {
        *self
    }
}

impl From<io::ErrorKind> for FailureKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::TimedOut => FailureKind::Timeout,
            io::ErrorKind::ConnectionRefused => FailureKind::ConnectionRefused,
            io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
                FailureKind::ConnectionReset
            }
            io::ErrorKind::NotFound => FailureKind::NotFound,
            io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            _ => FailureKind::Io,
        }
    }
}

impl Failure for io::Error {
    type Category = FailureKind;

    fn category(&self) -> FailureKind {
        self.kind().into()
    }
}

/// Unordered set of categories, deduplicated on insert
///
/// Insertion order is kept so that validation reports conflicts
/// deterministically.
#[derive(Debug, Clone)]
pub struct CategorySet<C> {
    members: Vec<C>,
}

impl<C: Category> CategorySet<C> {
    /// Empty set
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Set holding a single category
    pub fn singleton(category: C) -> Self {
        Self {
            members: vec![category],
        }
    }

    /// Set holding only the root category, i.e. matching every failure
    pub fn root() -> Self {
        Self::singleton(C::root())
    }

    /// Build a set from any iterator, dropping duplicates
    pub fn of(categories: impl IntoIterator<Item = C>) -> Self {
        categories.into_iter().collect()
    }

    /// Add a category; returns `false` if it was already present
    pub fn insert(&mut self, category: C) -> bool {
        if self.members.contains(&category) {
            return false;
        }
        self.members.push(category);
        true
    }

    /// Exact membership (no `is-a`)
    pub fn contains(&self, category: &C) -> bool {
        self.members.contains(category)
    }

    /// True if `category` is-a any member
    pub fn matches(&self, category: &C) -> bool {
        self.members.iter().any(|m| category.is_a(m))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.members.iter()
    }
}

impl<C: Category> Default for CategorySet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> PartialEq for CategorySet<C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|c| other.contains(c))
    }
}

impl<C: Category> Eq for CategorySet<C> {}

impl<C: Category> FromIterator<C> for CategorySet<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut set = Self::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl<C: Category> From<C> for CategorySet<C> {
    fn from(category: C) -> Self {
        Self::singleton(category)
    }
}

impl<C: Category, const N: usize> From<[C; N]> for CategorySet<C> {
    fn from(categories: [C; N]) -> Self {
        Self::of(categories)
    }
}

impl<C> IntoIterator for CategorySet<C> {
    type Item = C;
    type IntoIter = std::vec::IntoIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, C> IntoIterator for &'a CategorySet<C> {
    type Item = &'a C;
    type IntoIter = std::slice::Iter<'a, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

#[cfg(feature = "serde")]
impl<C: Category + serde::Serialize> serde::Serialize for CategorySet<C> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.members)
    }
}

#[cfg(feature = "serde")]
impl<'de, C: Category + serde::Deserialize<'de>> serde::Deserialize<'de> for CategorySet<C> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<C>::deserialize(deserializer).map(Self::of)
    }
}
