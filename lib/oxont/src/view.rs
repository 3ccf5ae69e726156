use crate::config::OntConfig;
use crate::factory::{ObjectKind, OntObject, Personality};
use crate::graph::{Scope, UnionGraph, UnionTripleIter, as_subject};
use oxrdf::vocab::rdf;
use oxrdf::{NamedNodeRef, SubjectRef, Term, TermRef, Triple, TripleRef};

/// Everything needed to interpret a graph as an ontology: the graph itself, the typed-view
/// registry and the configuration.
#[derive(Clone, Copy)]
pub struct ModelView<'a> {
    graph: &'a UnionGraph,
    personality: &'a Personality,
    config: &'a OntConfig,
}

impl<'a> ModelView<'a> {
    pub fn new(graph: &'a UnionGraph, personality: &'a Personality, config: &'a OntConfig) -> Self {
        Self {
            graph,
            personality,
            config,
        }
    }

    #[inline]
    pub fn graph(&self) -> &'a UnionGraph {
        self.graph
    }

    #[inline]
    pub fn personality(&self) -> &'a Personality {
        self.personality
    }

    #[inline]
    pub fn config(&self) -> &'a OntConfig {
        self.config
    }

    #[inline]
    pub fn find(
        &self,
        scope: Scope,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Vec<Triple> {
        self.graph.find(scope, subject, predicate, object)
    }

    #[inline]
    pub fn find_iter(
        &self,
        scope: Scope,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> UnionTripleIter {
        self.graph.find_iter(scope, subject, predicate, object)
    }

    /// The objects of `node` for `predicate` in the whole closure.
    pub fn objects(&self, node: &Term, predicate: NamedNodeRef<'_>) -> Vec<Term> {
        let Some(subject) = as_subject(node) else {
            return Vec::new();
        };
        self.graph
            .find(Scope::Global, Some(subject), Some(predicate), None)
            .into_iter()
            .map(|t| t.object)
            .collect()
    }

    pub fn has_type(&self, node: &Term, rdf_type: NamedNodeRef<'_>) -> bool {
        as_subject(node).is_some_and(|subject| {
            self.graph.contains(
                Scope::Global,
                TripleRef::new(subject, rdf::TYPE, rdf_type),
            )
        })
    }

    pub fn has_predicate(&self, node: &Term, predicate: NamedNodeRef<'_>) -> bool {
        as_subject(node).is_some_and(|subject| {
            !self
                .graph
                .find(Scope::Global, Some(subject), Some(predicate), None)
                .is_empty()
        })
    }

    #[inline]
    pub fn can_as(&self, node: &Term, kind: ObjectKind) -> bool {
        self.personality.can_as(node, kind, self)
    }

    #[inline]
    pub fn get_as(&self, node: &Term, kind: ObjectKind) -> Option<OntObject> {
        self.personality.get_as(node, kind, self)
    }
}
