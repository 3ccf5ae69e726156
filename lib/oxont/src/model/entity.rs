//! OWL 2 entities: classes, datatypes, properties and individuals.

use crate::vocab::owl;
use oxiri::IriParseError;
use oxrdf::vocab::rdfs;
use oxrdf::{BlankNode, NamedNode, NamedNodeRef, Subject, Term};
use std::fmt;

macro_rules! named_entity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(NamedNode);

        impl $name {
            #[inline]
            pub fn new(iri: NamedNode) -> Self {
                Self(iri)
            }

            #[inline]
            pub fn new_from_iri(iri: impl Into<String>) -> Result<Self, IriParseError> {
                Ok(Self(NamedNode::new(iri)?))
            }

            #[inline]
            pub fn iri(&self) -> &NamedNode {
                &self.0
            }

            #[inline]
            pub fn as_ref(&self) -> NamedNodeRef<'_> {
                self.0.as_ref()
            }

            #[inline]
            pub fn into_inner(self) -> NamedNode {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<NamedNode> for $name {
            #[inline]
            fn from(iri: NamedNode) -> Self {
                Self(iri)
            }
        }

        impl From<NamedNodeRef<'_>> for $name {
            #[inline]
            fn from(iri: NamedNodeRef<'_>) -> Self {
                Self(iri.into_owned())
            }
        }

        impl From<$name> for NamedNode {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0
            }
        }

        impl From<$name> for Term {
            #[inline]
            fn from(entity: $name) -> Self {
                entity.0.into()
            }
        }
    };
}

named_entity!(
    /// An OWL class (`owl:Class`).
    OwlClass
);
named_entity!(
    /// A datatype (`rdfs:Datatype`).
    Datatype
);
named_entity!(
    /// An object property (`owl:ObjectProperty`), relating individuals to individuals.
    ObjectProperty
);
named_entity!(
    /// A data property (`owl:DatatypeProperty`), relating individuals to literals.
    DataProperty
);
named_entity!(
    /// An annotation property (`owl:AnnotationProperty`).
    AnnotationProperty
);

/// An individual, either named or anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Individual {
    Named(NamedNode),
    Anonymous(BlankNode),
}

impl Individual {
    pub fn to_term(&self) -> Term {
        match self {
            Self::Named(node) => node.clone().into(),
            Self::Anonymous(node) => node.clone().into(),
        }
    }

    pub fn to_subject(&self) -> Subject {
        match self {
            Self::Named(node) => node.clone().into(),
            Self::Anonymous(node) => node.clone().into(),
        }
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(node) => write!(f, "{node}"),
            Self::Anonymous(node) => write!(f, "{node}"),
        }
    }
}

impl From<NamedNode> for Individual {
    #[inline]
    fn from(node: NamedNode) -> Self {
        Self::Named(node)
    }
}

impl From<BlankNode> for Individual {
    #[inline]
    fn from(node: BlankNode) -> Self {
        Self::Anonymous(node)
    }
}

/// The kind of an [`Entity`], matching one of the OWL declaration types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    Class,
    Datatype,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
    NamedIndividual,
}

impl EntityType {
    pub const ALL: [Self; 6] = [
        Self::Class,
        Self::Datatype,
        Self::ObjectProperty,
        Self::DataProperty,
        Self::AnnotationProperty,
        Self::NamedIndividual,
    ];

    /// The `rdf:type` object of a declaration of this kind.
    pub fn rdf_type(self) -> NamedNodeRef<'static> {
        match self {
            Self::Class => owl::CLASS,
            Self::Datatype => rdfs::DATATYPE,
            Self::ObjectProperty => owl::OBJECT_PROPERTY,
            Self::DataProperty => owl::DATATYPE_PROPERTY,
            Self::AnnotationProperty => owl::ANNOTATION_PROPERTY,
            Self::NamedIndividual => owl::NAMED_INDIVIDUAL,
        }
    }

    pub fn from_rdf_type(rdf_type: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.rdf_type() == rdf_type)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Class => "Class",
            Self::Datatype => "Datatype",
            Self::ObjectProperty => "ObjectProperty",
            Self::DataProperty => "DataProperty",
            Self::AnnotationProperty => "AnnotationProperty",
            Self::NamedIndividual => "NamedIndividual",
        })
    }
}

/// An IRI used as one of the OWL entity kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Entity {
    Class(OwlClass),
    Datatype(Datatype),
    ObjectProperty(ObjectProperty),
    DataProperty(DataProperty),
    AnnotationProperty(AnnotationProperty),
    NamedIndividual(NamedNode),
}

impl Entity {
    pub fn new(entity_type: EntityType, iri: NamedNode) -> Self {
        match entity_type {
            EntityType::Class => Self::Class(iri.into()),
            EntityType::Datatype => Self::Datatype(iri.into()),
            EntityType::ObjectProperty => Self::ObjectProperty(iri.into()),
            EntityType::DataProperty => Self::DataProperty(iri.into()),
            EntityType::AnnotationProperty => Self::AnnotationProperty(iri.into()),
            EntityType::NamedIndividual => Self::NamedIndividual(iri),
        }
    }

    pub fn iri(&self) -> &NamedNode {
        match self {
            Self::Class(e) => e.iri(),
            Self::Datatype(e) => e.iri(),
            Self::ObjectProperty(e) => e.iri(),
            Self::DataProperty(e) => e.iri(),
            Self::AnnotationProperty(e) => e.iri(),
            Self::NamedIndividual(e) => e,
        }
    }

    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Class(_) => EntityType::Class,
            Self::Datatype(_) => EntityType::Datatype,
            Self::ObjectProperty(_) => EntityType::ObjectProperty,
            Self::DataProperty(_) => EntityType::DataProperty,
            Self::AnnotationProperty(_) => EntityType::AnnotationProperty,
            Self::NamedIndividual(_) => EntityType::NamedIndividual,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.entity_type(), self.iri())
    }
}

impl From<OwlClass> for Entity {
    fn from(e: OwlClass) -> Self {
        Self::Class(e)
    }
}

impl From<Datatype> for Entity {
    fn from(e: Datatype) -> Self {
        Self::Datatype(e)
    }
}

impl From<ObjectProperty> for Entity {
    fn from(e: ObjectProperty) -> Self {
        Self::ObjectProperty(e)
    }
}

impl From<DataProperty> for Entity {
    fn from(e: DataProperty) -> Self {
        Self::DataProperty(e)
    }
}

impl From<AnnotationProperty> for Entity {
    fn from(e: AnnotationProperty) -> Self {
        Self::AnnotationProperty(e)
    }
}
