use crate::factory::ObjectKind;
use crate::graph::{Scope, UnionTripleIter};
use crate::view::ModelView;
use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, NamedNodeRef, Term};
use rustc_hash::FxHashSet;
use std::iter;
use std::sync::Arc;

/// A side-effect free predicate over a graph node.
///
/// Filters are small and composable so that factories and translators can describe the
/// shape they accept without repeating graph walks.
#[derive(Debug, Clone)]
pub enum OntFilter {
    True,
    Blank,
    Uri,
    Literal,
    /// `node rdf:type T` is in the graph
    HasType(NamedNode),
    /// `node rdf:type T` is in the graph for one of the given types
    HasAnyType(Vec<NamedNode>),
    /// `node P ?o` is in the graph
    HasPredicate(NamedNode),
    /// one of the objects of `node P ?o` passes the inner filter
    HasObject {
        predicate: NamedNode,
        filter: Box<OntFilter>,
    },
    /// the node is one of the given IRIs
    InSet(Arc<FxHashSet<NamedNode>>),
    /// the node can be viewed as the given kind by the personality
    Kind(ObjectKind),
    Not(Box<OntFilter>),
    And(Vec<OntFilter>),
    Or(Vec<OntFilter>),
}

impl OntFilter {
    pub fn has_type(rdf_type: NamedNodeRef<'_>) -> Self {
        Self::HasType(rdf_type.into_owned())
    }

    pub fn has_any_type<'a>(types: impl IntoIterator<Item = NamedNodeRef<'a>>) -> Self {
        Self::HasAnyType(types.into_iter().map(NamedNodeRef::into_owned).collect())
    }

    pub fn has_predicate(predicate: NamedNodeRef<'_>) -> Self {
        Self::HasPredicate(predicate.into_owned())
    }

    pub fn has_object(predicate: NamedNodeRef<'_>, filter: OntFilter) -> Self {
        Self::HasObject {
            predicate: predicate.into_owned(),
            filter: Box::new(filter),
        }
    }

    #[must_use]
    pub fn and(self, other: OntFilter) -> Self {
        match self {
            Self::True => other,
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            filter => Self::And(vec![filter, other]),
        }
    }

    #[must_use]
    pub fn or(self, other: OntFilter) -> Self {
        match self {
            Self::Or(mut filters) => {
                filters.push(other);
                Self::Or(filters)
            }
            filter => Self::Or(vec![filter, other]),
        }
    }

    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::Not(filter) => *filter,
            filter => Self::Not(Box::new(filter)),
        }
    }

    pub fn test(&self, node: &Term, view: &ModelView<'_>) -> bool {
        match self {
            Self::True => true,
            Self::Blank => node.is_blank_node(),
            Self::Uri => node.is_named_node(),
            Self::Literal => node.is_literal(),
            Self::HasType(rdf_type) => view.has_type(node, rdf_type.as_ref()),
            Self::HasAnyType(types) => types.iter().any(|t| view.has_type(node, t.as_ref())),
            Self::HasPredicate(predicate) => view.has_predicate(node, predicate.as_ref()),
            Self::HasObject { predicate, filter } => view
                .objects(node, predicate.as_ref())
                .iter()
                .any(|o| filter.test(o, view)),
            Self::InSet(set) => matches!(node, Term::NamedNode(n) if set.contains(n)),
            Self::Kind(kind) => view.can_as(node, *kind),
            Self::Not(filter) => !filter.test(node, view),
            Self::And(filters) => filters.iter().all(|f| f.test(node, view)),
            Self::Or(filters) => filters.iter().any(|f| f.test(node, view)),
        }
    }
}

/// A strategy to list the candidate nodes of a factory without scanning the whole graph.
#[derive(Debug, Clone)]
pub enum OntFinder {
    /// every subject and object of the graph
    Any,
    /// subjects of `?s rdf:type T`
    ByType(NamedNode),
    /// subjects of `?s rdf:type T` for any of the types
    ByTypes(Vec<NamedNode>),
    /// subjects of `?s P ?o`
    ByPredicate(NamedNode),
}

impl OntFinder {
    pub fn by_type(rdf_type: NamedNodeRef<'_>) -> Self {
        Self::ByType(rdf_type.into_owned())
    }

    /// The distinct candidates in the whole import closure, in graph order.
    ///
    /// The graphs are only queried as the iterator is consumed.
    pub fn find(&self, view: &ModelView<'_>) -> Box<dyn Iterator<Item = Term>> {
        let nodes: Box<dyn Iterator<Item = Term>> = match self {
            Self::Any => Box::new(view.find_iter(Scope::Global, None, None, None).flat_map(
                |triple| {
                    let object = (!triple.object.is_literal()).then_some(triple.object);
                    iter::once(Term::from(triple.subject)).chain(object)
                },
            )),
            Self::ByType(rdf_type) => {
                Box::new(typed(view, rdf_type).map(|triple| Term::from(triple.subject)))
            }
            Self::ByTypes(types) => {
                let by_type = types
                    .iter()
                    .map(|rdf_type| typed(view, rdf_type))
                    .collect::<Vec<_>>();
                Box::new(
                    by_type
                        .into_iter()
                        .flatten()
                        .map(|triple| Term::from(triple.subject)),
                )
            }
            Self::ByPredicate(predicate) => Box::new(
                view.find_iter(Scope::Global, None, Some(predicate.as_ref()), None)
                    .map(|triple| Term::from(triple.subject)),
            ),
        };
        let mut seen = FxHashSet::default();
        Box::new(nodes.filter(move |node| seen.insert(node.clone())))
    }
}

fn typed(view: &ModelView<'_>, rdf_type: &NamedNode) -> UnionTripleIter {
    view.find_iter(
        Scope::Global,
        None,
        Some(rdf::TYPE),
        Some(rdf_type.as_ref().into()),
    )
}
