//! Thread-safe RDF graphs and their composition into import closures.

mod list;
mod union;

pub use list::{RdfList, read_list};
pub(crate) use list::build_list;
pub use union::{Scope, UnionGraph, UnionTripleIter};

use oxrdf::{
    Graph, NamedNodeRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef,
};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier, shared by graphs and anonymous ontology ids.
pub(crate) fn fresh_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// An in-memory [`Graph`] behind a read/write lock that can be shared between ontologies.
///
/// Every graph gets a process-unique id and a version counter that is bumped by each
/// effective mutation. Queries return owned snapshots so that no lock is held once they return.
///
/// ```
/// use oxont::graph::SharedGraph;
/// use oxrdf::{NamedNodeRef, TripleRef};
///
/// let ex = NamedNodeRef::new("http://example.com")?;
/// let graph = SharedGraph::new();
/// let version = graph.version();
/// assert!(graph.insert(TripleRef::new(ex, ex, ex)));
/// assert!(!graph.insert(TripleRef::new(ex, ex, ex)));
/// assert_eq!(graph.version(), version + 1);
/// assert_eq!(graph.find(Some(ex.into()), None, None).len(), 1);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone)]
pub struct SharedGraph {
    inner: Arc<GraphCell>,
}

struct GraphCell {
    id: u64,
    version: AtomicU64,
    graph: RwLock<Graph>,
}

impl SharedGraph {
    pub fn new() -> Self {
        Self::from_graph(Graph::new())
    }

    pub fn from_graph(graph: Graph) -> Self {
        Self {
            inner: Arc::new(GraphCell {
                id: fresh_id(),
                version: AtomicU64::new(0),
                graph: RwLock::new(graph),
            }),
        }
    }

    /// The process-unique identifier of this graph.
    #[inline]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// The number of effective mutations since creation.
    #[inline]
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Returns `true` if both handles point to the same graph.
    #[inline]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.inner
            .graph
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Graph> {
        self.inner
            .graph
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.inner.version.fetch_add(1, Ordering::AcqRel);
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        self.read().contains(triple)
    }

    /// Adds a triple, returns `false` if it was already there.
    pub fn insert<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        let mut graph = self.write();
        let inserted = graph.insert(triple);
        if inserted {
            self.bump();
        }
        inserted
    }

    /// Removes a triple, returns `false` if it was not there.
    pub fn remove<'a>(&self, triple: impl Into<TripleRef<'a>>) -> bool {
        let mut graph = self.write();
        let removed = graph.remove(triple);
        if removed {
            self.bump();
        }
        removed
    }

    /// Adds all the triples under a single lock acquisition and returns how many were new.
    pub fn extend<'a>(&self, triples: impl IntoIterator<Item = &'a Triple>) -> usize {
        let mut graph = self.write();
        let mut count = 0;
        for triple in triples {
            if graph.insert(triple) {
                count += 1;
            }
        }
        if count > 0 {
            self.bump();
        }
        count
    }

    /// Removes all the triples under a single lock acquisition and returns how many were there.
    pub fn remove_all<'a>(&self, triples: impl IntoIterator<Item = &'a Triple>) -> usize {
        let mut graph = self.write();
        let mut count = 0;
        for triple in triples {
            if graph.remove(triple) {
                count += 1;
            }
        }
        if count > 0 {
            self.bump();
        }
        count
    }

    /// Returns the triples matching the pattern, `None` being a wildcard.
    pub fn find(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Vec<Triple> {
        let graph = self.read();
        match (subject, predicate, object) {
            (Some(s), Some(p), Some(o)) => {
                let triple = TripleRef::new(s, p, o);
                if graph.contains(triple) {
                    vec![triple.into_owned()]
                } else {
                    Vec::new()
                }
            }
            (Some(s), Some(p), None) => graph
                .objects_for_subject_predicate(s, p)
                .map(|o| Triple::new(s.into_owned(), p.into_owned(), o.into_owned()))
                .collect(),
            (Some(s), None, Some(o)) => graph
                .triples_for_subject(s)
                .filter(|t| t.object == o)
                .map(TripleRef::into_owned)
                .collect(),
            (Some(s), None, None) => graph
                .triples_for_subject(s)
                .map(TripleRef::into_owned)
                .collect(),
            (None, Some(p), Some(o)) => graph
                .subjects_for_predicate_object(p, o)
                .map(|s| Triple::new(s.into_owned(), p.into_owned(), o.into_owned()))
                .collect(),
            (None, Some(p), None) => graph
                .triples_for_predicate(p)
                .map(TripleRef::into_owned)
                .collect(),
            (None, None, Some(o)) => graph
                .triples_for_object(o)
                .map(TripleRef::into_owned)
                .collect(),
            (None, None, None) => graph.iter().map(TripleRef::into_owned).collect(),
        }
    }

    /// A snapshot of all the triples.
    pub fn triples(&self) -> Vec<Triple> {
        self.find(None, None, None)
    }

    /// Copies the content into a plain [`Graph`].
    pub fn to_graph(&self) -> Graph {
        self.read().iter().collect()
    }
}

impl Default for SharedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Graph> for SharedGraph {
    fn from(graph: Graph) -> Self {
        Self::from_graph(graph)
    }
}

impl fmt::Debug for SharedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedGraph")
            .field("id", &self.id())
            .field("version", &self.version())
            .field("len", &self.len())
            .finish()
    }
}

/// Views a term as a triple subject if it is an IRI or a blank node.
pub(crate) fn as_subject(term: &Term) -> Option<SubjectRef<'_>> {
    match term {
        Term::NamedNode(node) => Some(node.as_ref().into()),
        Term::BlankNode(node) => Some(node.as_ref().into()),
        _ => None,
    }
}

pub(crate) fn to_subject(term: Term) -> Option<Subject> {
    match term {
        Term::NamedNode(node) => Some(node.into()),
        Term::BlankNode(node) => Some(node.into()),
        _ => None,
    }
}

/// Returns `true` if the term is the given IRI.
#[inline]
pub(crate) fn is_iri(term: &Term, iri: NamedNodeRef<'_>) -> bool {
    matches!(term, Term::NamedNode(node) if node.as_ref() == iri)
}
