use crate::model::entity::AnnotationProperty;
use oxrdf::{BlankNode, Literal, NamedNode, Subject, Term};
use std::fmt;

/// The value of an annotation: an IRI, an anonymous individual or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationValue {
    Iri(NamedNode),
    Anonymous(BlankNode),
    Literal(Literal),
}

impl AnnotationValue {
    pub fn to_term(&self) -> Term {
        match self {
            Self::Iri(node) => node.clone().into(),
            Self::Anonymous(node) => node.clone().into(),
            Self::Literal(literal) => literal.clone().into(),
        }
    }

    pub fn from_term(term: Term) -> Option<Self> {
        match term {
            Term::NamedNode(node) => Some(Self::Iri(node)),
            Term::BlankNode(node) => Some(Self::Anonymous(node)),
            Term::Literal(literal) => Some(Self::Literal(literal)),
            #[allow(unreachable_patterns, reason = "RDF 1.2 triple terms")]
            _ => None,
        }
    }
}

impl From<Literal> for AnnotationValue {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<NamedNode> for AnnotationValue {
    fn from(node: NamedNode) -> Self {
        Self::Iri(node)
    }
}

impl fmt::Display for AnnotationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_term())
    }
}

/// The subject of an annotation assertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationSubject {
    Iri(NamedNode),
    Anonymous(BlankNode),
}

impl AnnotationSubject {
    pub fn to_subject(&self) -> Subject {
        match self {
            Self::Iri(node) => node.clone().into(),
            Self::Anonymous(node) => node.clone().into(),
        }
    }

    pub fn to_term(&self) -> Term {
        self.to_subject().into()
    }
}

impl From<NamedNode> for AnnotationSubject {
    fn from(node: NamedNode) -> Self {
        Self::Iri(node)
    }
}

/// An annotation `(property, value)` attached to an axiom or an ontology.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    pub property: AnnotationProperty,
    pub value: AnnotationValue,
}

impl Annotation {
    pub fn new(property: impl Into<AnnotationProperty>, value: impl Into<AnnotationValue>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Annotation({} {})", self.property, self.value)
    }
}
