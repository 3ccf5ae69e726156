//! The OWL 2 structural model: entities, expressions, annotations and axioms.

mod annotation;
mod axiom;
mod entity;
mod expression;
mod operands;

pub use annotation::{Annotation, AnnotationSubject, AnnotationValue};
pub use axiom::{AnnotatedAxiom, Axiom, AxiomType};
pub use entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, EntityType, Individual, ObjectProperty,
    OwlClass,
};
pub use expression::{ClassExpression, DataRange, FacetRestriction, ObjectPropertyExpression};
pub use operands::Operands;

use oxrdf::{BlankNode, Literal, NamedNode, Term, Triple};
use std::fmt;

/// Something an axiom can refer to, used to search axioms by their content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    Entity(Entity),
    Anonymous(BlankNode),
    Literal(Literal),
    /// An IRI used without entity type, like an annotation subject.
    Iri(NamedNode),
}

impl Primitive {
    /// The graph node of the primitive.
    pub fn to_term(&self) -> Term {
        match self {
            Self::Entity(entity) => entity.iri().clone().into(),
            Self::Anonymous(node) => node.clone().into(),
            Self::Literal(literal) => literal.clone().into(),
            Self::Iri(iri) => iri.clone().into(),
        }
    }
}

impl From<Entity> for Primitive {
    fn from(entity: Entity) -> Self {
        Self::Entity(entity)
    }
}

impl From<Individual> for Primitive {
    fn from(individual: Individual) -> Self {
        match individual {
            Individual::Named(iri) => Self::Entity(Entity::NamedIndividual(iri)),
            Individual::Anonymous(node) => Self::Anonymous(node),
        }
    }
}

impl From<AnnotationValue> for Primitive {
    fn from(value: AnnotationValue) -> Self {
        match value {
            AnnotationValue::Iri(iri) => Self::Iri(iri),
            AnnotationValue::Anonymous(node) => Self::Anonymous(node),
            AnnotationValue::Literal(literal) => Self::Literal(literal),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(entity) => write!(f, "{entity}"),
            _ => write!(f, "{}", self.to_term()),
        }
    }
}

/// A value paired with the triples it has been read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrapped<T> {
    pub value: T,
    pub triples: Vec<Triple>,
}

impl<T> Wrapped<T> {
    pub fn new(value: T, triples: Vec<Triple>) -> Self {
        Self { value, triples }
    }

    /// A value that is not backed by any triple, like a named entity.
    pub fn bare(value: T) -> Self {
        Self {
            value,
            triples: Vec::new(),
        }
    }

    /// Moves the triples into `triples` and returns the value.
    pub fn drain_into(self, triples: &mut Vec<Triple>) -> T {
        triples.extend(self.triples);
        self.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Wrapped<U> {
        Wrapped {
            value: f(self.value),
            triples: self.triples,
        }
    }
}
