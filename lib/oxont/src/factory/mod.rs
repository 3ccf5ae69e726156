//! Typed views over graph nodes.
//!
//! A [`Personality`] maps each [`ObjectKind`] to an [`ObjectFactory`] able to test whether a
//! node can be viewed as that kind, to wrap it and to enumerate all such nodes.

mod filter;
mod multi;
mod personality;

pub use filter::{OntFilter, OntFinder};
pub use multi::MultiFactory;
pub use personality::{Builtins, Personality};
pub(crate) use personality::entity_kind;

use crate::error::ConversionError;
use crate::view::ModelView;
use oxrdf::Term;
use std::fmt;
use std::sync::Arc;

/// The kinds of typed views a node can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    // Entities
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
    // Anonymous objects
    AnonymousIndividual,
    InverseObjectProperty,
    ObjectSomeValuesFrom,
    ObjectAllValuesFrom,
    ObjectHasValue,
    ObjectHasSelf,
    ObjectMinCardinality,
    ObjectMaxCardinality,
    ObjectExactCardinality,
    DataSomeValuesFrom,
    DataAllValuesFrom,
    DataHasValue,
    DataMinCardinality,
    DataMaxCardinality,
    DataExactCardinality,
    ObjectUnionOf,
    ObjectIntersectionOf,
    ObjectComplementOf,
    ObjectOneOf,
    DataUnionOf,
    DataIntersectionOf,
    DataComplementOf,
    DataOneOf,
    DatatypeRestriction,
    // Composite kinds
    Entity,
    Individual,
    ObjectPropertyExpression,
    ClassExpression,
    DataRange,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A graph node viewed as a given kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OntObject {
    node: Term,
    kind: ObjectKind,
}

impl OntObject {
    #[inline]
    pub fn new(node: Term, kind: ObjectKind) -> Self {
        Self { node, kind }
    }

    #[inline]
    pub fn node(&self) -> &Term {
        &self.node
    }

    /// The concrete kind, never a composite one.
    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[inline]
    pub fn into_node(self) -> Term {
        self.node
    }
}

/// A strategy to test, wrap and enumerate the nodes that can be viewed as one kind.
///
/// `can_wrap` and `create_instance` must agree: `create_instance` returns `Some` exactly when
/// `can_wrap` returns `true`.
pub trait ObjectFactory: fmt::Debug + Send + Sync {
    /// The kind this factory is registered for.
    fn kind(&self) -> ObjectKind;

    fn can_wrap(&self, node: &Term, view: &ModelView<'_>) -> bool;

    /// Views the node or returns `None` if it does not qualify.
    fn create_instance(&self, node: &Term, view: &ModelView<'_>) -> Option<OntObject>;

    /// Views the node or fails with a [`ConversionError`] if it does not qualify.
    fn wrap(&self, node: &Term, view: &ModelView<'_>) -> Result<OntObject, ConversionError> {
        self.create_instance(node, view).ok_or_else(|| {
            ConversionError::new(node.clone(), format!("it is not a {}", self.kind()))
        })
    }

    /// All the distinct nodes of the import closure that can be viewed by this factory.
    ///
    /// Each call starts a new enumeration.
    fn iter<'a>(&'a self, view: ModelView<'a>) -> Box<dyn Iterator<Item = OntObject> + 'a>;

    /// The delegates of a composite factory.
    fn sub_factories(&self) -> Option<&[Arc<dyn ObjectFactory>]> {
        None
    }
}

/// A factory defined by a finder for enumeration and a filter for testing.
#[derive(Debug)]
pub struct CommonFactory {
    kind: ObjectKind,
    finder: OntFinder,
    filter: OntFilter,
}

impl CommonFactory {
    pub fn new(kind: ObjectKind, finder: OntFinder, filter: OntFilter) -> Self {
        Self {
            kind,
            finder,
            filter,
        }
    }

    #[inline]
    pub fn filter(&self) -> &OntFilter {
        &self.filter
    }
}

impl ObjectFactory for CommonFactory {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn can_wrap(&self, node: &Term, view: &ModelView<'_>) -> bool {
        self.filter.test(node, view)
    }

    fn create_instance(&self, node: &Term, view: &ModelView<'_>) -> Option<OntObject> {
        self.can_wrap(node, view)
            .then(|| OntObject::new(node.clone(), self.kind))
    }

    fn iter<'a>(&'a self, view: ModelView<'a>) -> Box<dyn Iterator<Item = OntObject> + 'a> {
        Box::new(
            self.finder
                .find(&view)
                .filter(move |node| self.filter.test(node, &view))
                .map(|node| OntObject::new(node, self.kind)),
        )
    }
}
