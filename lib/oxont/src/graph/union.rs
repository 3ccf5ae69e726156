use crate::graph::SharedGraph;
use oxrdf::{NamedNode, NamedNodeRef, Subject, SubjectRef, Term, TermRef, Triple, TripleRef};
use rustc_hash::FxHashSet;
use std::vec;

/// Which part of a [`UnionGraph`] a query looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    /// Only the base graph of the ontology.
    #[default]
    Local,
    /// The base graph and all the graphs of the transitive import closure.
    Global,
}

/// A base graph composed with the union graphs of its imports.
///
/// The composition is a tree of values over shared graphs: the same [`SharedGraph`] may appear
/// several times (diamond or cyclic imports) but each graph is only queried once.
#[derive(Debug, Clone)]
pub struct UnionGraph {
    base: SharedGraph,
    imports: Vec<UnionGraph>,
}

impl UnionGraph {
    pub fn new(base: SharedGraph) -> Self {
        Self {
            base,
            imports: Vec::new(),
        }
    }

    #[inline]
    pub fn base(&self) -> &SharedGraph {
        &self.base
    }

    /// The direct imports.
    #[inline]
    pub fn imports(&self) -> &[UnionGraph] {
        &self.imports
    }

    /// Attaches an import, returns `false` if its base graph is already directly attached.
    pub fn add_import(&mut self, import: UnionGraph) -> bool {
        if import.base.is_same(&self.base)
            || self.imports.iter().any(|i| i.base.is_same(&import.base))
        {
            return false;
        }
        self.imports.push(import);
        true
    }

    /// Detaches the direct import whose base graph has the given id.
    pub fn remove_import(&mut self, graph_id: u64) -> bool {
        let len = self.imports.len();
        self.imports.retain(|i| i.base.id() != graph_id);
        len != self.imports.len()
    }

    /// Returns `true` if a graph with this id is part of the closure.
    pub fn contains_graph(&self, graph_id: u64) -> bool {
        self.graphs(Scope::Global)
            .iter()
            .any(|g| g.id() == graph_id)
    }

    /// The distinct graphs of the scope, base graph first then imports in depth-first order.
    pub fn graphs(&self, scope: Scope) -> Vec<SharedGraph> {
        let mut result = vec![self.base.clone()];
        if scope == Scope::Global {
            let mut seen = FxHashSet::default();
            seen.insert(self.base.id());
            for import in &self.imports {
                import.collect_graphs(&mut seen, &mut result);
            }
        }
        result
    }

    fn collect_graphs(&self, seen: &mut FxHashSet<u64>, result: &mut Vec<SharedGraph>) {
        if !seen.insert(self.base.id()) {
            return;
        }
        result.push(self.base.clone());
        for import in &self.imports {
            import.collect_graphs(seen, result);
        }
    }

    /// Returns the distinct triples matching the pattern, `None` being a wildcard.
    pub fn find(
        &self,
        scope: Scope,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Vec<Triple> {
        self.find_iter(scope, subject, predicate, object).collect()
    }

    /// Lazily yields the distinct triples matching the pattern, `None` being a wildcard.
    ///
    /// The graphs are queried one after the other, each when the triples of the previous one
    /// are exhausted.
    pub fn find_iter(
        &self,
        scope: Scope,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> UnionTripleIter {
        let graphs = self.graphs(scope);
        UnionTripleIter {
            seen: (graphs.len() > 1).then(FxHashSet::default),
            graphs: graphs.into_iter(),
            current: Vec::new().into_iter(),
            subject: subject.map(SubjectRef::into_owned),
            predicate: predicate.map(NamedNodeRef::into_owned),
            object: object.map(TermRef::into_owned),
        }
    }

    pub fn contains<'a>(&self, scope: Scope, triple: impl Into<TripleRef<'a>>) -> bool {
        let triple = triple.into();
        if self.base.contains(triple) {
            return true;
        }
        scope == Scope::Global
            && self
                .graphs(scope)
                .iter()
                .skip(1)
                .any(|g| g.contains(triple))
    }

    /// All the distinct triples of the scope.
    pub fn triples(&self, scope: Scope) -> Vec<Triple> {
        self.find(scope, None, None, None)
    }

    /// `(id, version)` of every graph of the closure.
    ///
    /// Any mutation of any graph of the closure, or any change of the composition, changes it.
    pub fn fingerprint(&self) -> Vec<(u64, u64)> {
        self.graphs(Scope::Global)
            .iter()
            .map(|g| (g.id(), g.version()))
            .collect()
    }
}

/// An iterator over the distinct triples of a [`UnionGraph`] matching a pattern.
///
/// Each graph is read from a snapshot of its matching triples, taken when the iteration
/// reaches it.
#[must_use]
pub struct UnionTripleIter {
    graphs: vec::IntoIter<SharedGraph>,
    current: vec::IntoIter<Triple>,
    subject: Option<Subject>,
    predicate: Option<NamedNode>,
    object: Option<Term>,
    /// `None` when a single graph is queried
    seen: Option<FxHashSet<Triple>>,
}

impl Iterator for UnionTripleIter {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        loop {
            for triple in self.current.by_ref() {
                if self
                    .seen
                    .as_mut()
                    .is_none_or(|seen| seen.insert(triple.clone()))
                {
                    return Some(triple);
                }
            }
            let graph = self.graphs.next()?;
            self.current = graph
                .find(
                    self.subject.as_ref().map(Subject::as_ref),
                    self.predicate.as_ref().map(NamedNode::as_ref),
                    self.object.as_ref().map(Term::as_ref),
                )
                .into_iter();
        }
    }
}

impl From<SharedGraph> for UnionGraph {
    #[inline]
    fn from(base: SharedGraph) -> Self {
        Self::new(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(s: &str) -> Triple {
        Triple::new(
            NamedNode::new_unchecked(format!("http://example.com/{s}")),
            NamedNode::new_unchecked("http://example.com/p"),
            NamedNode::new_unchecked("http://example.com/o"),
        )
    }

    #[test]
    fn local_and_global_views() {
        let (a, b) = (SharedGraph::new(), SharedGraph::new());
        a.insert(&triple("a"));
        b.insert(&triple("b"));
        b.insert(&triple("a"));
        let mut union = UnionGraph::new(a);
        union.add_import(UnionGraph::new(b));
        assert_eq!(union.triples(Scope::Local).len(), 1);
        assert_eq!(union.triples(Scope::Global).len(), 2);
        assert!(!union.contains(Scope::Local, &triple("b")));
        assert!(union.contains(Scope::Global, &triple("b")));
    }

    #[test]
    fn imports_are_read_when_reached() {
        let (a, b) = (SharedGraph::new(), SharedGraph::new());
        a.insert(&triple("a"));
        b.insert(&triple("a"));
        let mut union = UnionGraph::new(a.clone());
        union.add_import(UnionGraph::new(b.clone()));

        let mut triples = union.find_iter(Scope::Global, None, None, None);
        assert_eq!(triples.next(), Some(triple("a")));
        a.insert(&triple("late-a"));
        b.insert(&triple("b"));
        assert_eq!(triples.collect::<Vec<_>>(), vec![triple("b")]);
    }

    #[test]
    fn shared_graphs_are_visited_once() {
        let (a, b, c) = (SharedGraph::new(), SharedGraph::new(), SharedGraph::new());
        c.insert(&triple("c"));
        // a -> b -> c and a -> c
        let mut ub = UnionGraph::new(b.clone());
        ub.add_import(UnionGraph::new(c.clone()));
        // b -> a closes a cycle
        ub.add_import(UnionGraph::new(a.clone()));
        let mut ua = UnionGraph::new(a.clone());
        ua.add_import(ub);
        ua.add_import(UnionGraph::new(c.clone()));
        let ids = ua
            .graphs(Scope::Global)
            .iter()
            .map(SharedGraph::id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![a.id(), b.id(), c.id()]);
        assert_eq!(ua.find(Scope::Global, None, None, None).len(), 1);
    }

    #[test]
    fn fingerprint_tracks_imports() {
        let (a, b) = (SharedGraph::new(), SharedGraph::new());
        let mut union = UnionGraph::new(a);
        union.add_import(UnionGraph::new(b.clone()));
        let before = union.fingerprint();
        b.insert(&triple("x"));
        assert_ne!(before, union.fingerprint());
        let before = union.fingerprint();
        assert!(union.remove_import(b.id()));
        assert_ne!(before, union.fingerprint());
        assert!(!union.add_import(UnionGraph::new(union.base().clone())));
    }
}
