//! OWL 2 class expressions, object property expressions and data ranges.

use crate::model::entity::{DataProperty, Datatype, Entity, Individual, ObjectProperty, OwlClass};
use crate::model::Primitive;
use oxrdf::{Literal, NamedNode};

/// An OWL 2 class expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassExpression {
    /// A named class
    Class(OwlClass),
    /// ObjectIntersectionOf(C1, ..., Cn)
    ObjectIntersectionOf(Vec<ClassExpression>),
    /// ObjectUnionOf(C1, ..., Cn)
    ObjectUnionOf(Vec<ClassExpression>),
    /// ObjectComplementOf(C)
    ObjectComplementOf(Box<ClassExpression>),
    /// ObjectOneOf(a1, ..., an)
    ObjectOneOf(Vec<Individual>),
    /// ObjectSomeValuesFrom(P, C)
    ObjectSomeValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    /// ObjectAllValuesFrom(P, C)
    ObjectAllValuesFrom {
        property: ObjectPropertyExpression,
        filler: Box<ClassExpression>,
    },
    /// ObjectHasValue(P, a)
    ObjectHasValue {
        property: ObjectPropertyExpression,
        individual: Individual,
    },
    /// ObjectHasSelf(P)
    ObjectHasSelf(ObjectPropertyExpression),
    /// ObjectMinCardinality(n, P) or ObjectMinCardinality(n, P, C)
    ObjectMinCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// ObjectMaxCardinality(n, P) or ObjectMaxCardinality(n, P, C)
    ObjectMaxCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// ObjectExactCardinality(n, P) or ObjectExactCardinality(n, P, C)
    ObjectExactCardinality {
        cardinality: u32,
        property: ObjectPropertyExpression,
        filler: Option<Box<ClassExpression>>,
    },
    /// DataSomeValuesFrom(P, D)
    DataSomeValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    /// DataAllValuesFrom(P, D)
    DataAllValuesFrom {
        property: DataProperty,
        filler: DataRange,
    },
    /// DataHasValue(P, v)
    DataHasValue { property: DataProperty, value: Literal },
    /// DataMinCardinality(n, P) or DataMinCardinality(n, P, D)
    DataMinCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    /// DataMaxCardinality(n, P) or DataMaxCardinality(n, P, D)
    DataMaxCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
    /// DataExactCardinality(n, P) or DataExactCardinality(n, P, D)
    DataExactCardinality {
        cardinality: u32,
        property: DataProperty,
        filler: Option<DataRange>,
    },
}

impl ClassExpression {
    pub fn class(c: impl Into<OwlClass>) -> Self {
        Self::Class(c.into())
    }

    pub fn intersection(classes: Vec<ClassExpression>) -> Self {
        Self::ObjectIntersectionOf(classes)
    }

    pub fn union(classes: Vec<ClassExpression>) -> Self {
        Self::ObjectUnionOf(classes)
    }

    pub fn complement(class: ClassExpression) -> Self {
        Self::ObjectComplementOf(Box::new(class))
    }

    pub fn some_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectSomeValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    pub fn all_values_from(
        property: impl Into<ObjectPropertyExpression>,
        filler: ClassExpression,
    ) -> Self {
        Self::ObjectAllValuesFrom {
            property: property.into(),
            filler: Box::new(filler),
        }
    }

    /// Returns the named class if this expression is atomic.
    pub fn as_class(&self) -> Option<&OwlClass> {
        match self {
            Self::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Returns `true` if this expression or one of its sub-expressions is an object
    /// cardinality restriction without a filler, i.e. implicitly qualified by `owl:Thing`.
    pub fn has_unqualified_object_cardinality(&self) -> bool {
        match self {
            Self::ObjectMinCardinality { filler, .. }
            | Self::ObjectMaxCardinality { filler, .. }
            | Self::ObjectExactCardinality { filler, .. } => filler
                .as_ref()
                .is_none_or(|f| f.has_unqualified_object_cardinality()),
            Self::ObjectIntersectionOf(operands) | Self::ObjectUnionOf(operands) => operands
                .iter()
                .any(Self::has_unqualified_object_cardinality),
            Self::ObjectComplementOf(operand) => operand.has_unqualified_object_cardinality(),
            Self::ObjectSomeValuesFrom { filler, .. }
            | Self::ObjectAllValuesFrom { filler, .. } => {
                filler.has_unqualified_object_cardinality()
            }
            _ => false,
        }
    }

    pub(crate) fn collect_primitives(&self, out: &mut Vec<Primitive>) {
        match self {
            Self::Class(c) => out.push(Primitive::Entity(c.clone().into())),
            Self::ObjectIntersectionOf(operands) | Self::ObjectUnionOf(operands) => {
                for operand in operands {
                    operand.collect_primitives(out);
                }
            }
            Self::ObjectComplementOf(operand) => operand.collect_primitives(out),
            Self::ObjectOneOf(individuals) => {
                for individual in individuals {
                    out.push(Primitive::from(individual.clone()));
                }
            }
            Self::ObjectSomeValuesFrom { property, filler }
            | Self::ObjectAllValuesFrom { property, filler } => {
                property.collect_primitives(out);
                filler.collect_primitives(out);
            }
            Self::ObjectHasValue {
                property,
                individual,
            } => {
                property.collect_primitives(out);
                out.push(Primitive::from(individual.clone()));
            }
            Self::ObjectHasSelf(property) => property.collect_primitives(out),
            Self::ObjectMinCardinality {
                property, filler, ..
            }
            | Self::ObjectMaxCardinality {
                property, filler, ..
            }
            | Self::ObjectExactCardinality {
                property, filler, ..
            } => {
                property.collect_primitives(out);
                if let Some(filler) = filler {
                    filler.collect_primitives(out);
                }
            }
            Self::DataSomeValuesFrom { property, filler }
            | Self::DataAllValuesFrom { property, filler } => {
                out.push(Primitive::Entity(property.clone().into()));
                filler.collect_primitives(out);
            }
            Self::DataHasValue { property, value } => {
                out.push(Primitive::Entity(property.clone().into()));
                out.push(Primitive::Literal(value.clone()));
            }
            Self::DataMinCardinality {
                property, filler, ..
            }
            | Self::DataMaxCardinality {
                property, filler, ..
            }
            | Self::DataExactCardinality {
                property, filler, ..
            } => {
                out.push(Primitive::Entity(property.clone().into()));
                if let Some(filler) = filler {
                    filler.collect_primitives(out);
                }
            }
        }
    }
}

impl From<OwlClass> for ClassExpression {
    fn from(c: OwlClass) -> Self {
        Self::Class(c)
    }
}

/// An object property or the inverse of an object property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectPropertyExpression {
    ObjectProperty(ObjectProperty),
    /// ObjectInverseOf(P)
    InverseObjectProperty(ObjectProperty),
}

impl ObjectPropertyExpression {
    /// The named property this expression is built on.
    pub fn named_property(&self) -> &ObjectProperty {
        match self {
            Self::ObjectProperty(p) | Self::InverseObjectProperty(p) => p,
        }
    }

    pub fn is_inverse(&self) -> bool {
        matches!(self, Self::InverseObjectProperty(_))
    }

    pub(crate) fn collect_primitives(&self, out: &mut Vec<Primitive>) {
        out.push(Primitive::Entity(Entity::ObjectProperty(
            self.named_property().clone(),
        )));
    }
}

impl From<ObjectProperty> for ObjectPropertyExpression {
    fn from(p: ObjectProperty) -> Self {
        Self::ObjectProperty(p)
    }
}

/// A restriction of a datatype facet, like `xsd:minInclusive 5`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacetRestriction {
    pub facet: NamedNode,
    pub value: Literal,
}

/// An OWL 2 data range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataRange {
    Datatype(Datatype),
    /// DataIntersectionOf(D1, ..., Dn)
    DataIntersectionOf(Vec<DataRange>),
    /// DataUnionOf(D1, ..., Dn)
    DataUnionOf(Vec<DataRange>),
    /// DataComplementOf(D)
    DataComplementOf(Box<DataRange>),
    /// DataOneOf(v1, ..., vn)
    DataOneOf(Vec<Literal>),
    /// DatatypeRestriction(DT, f1 v1, ..., fn vn)
    DatatypeRestriction {
        datatype: Datatype,
        restrictions: Vec<FacetRestriction>,
    },
}

impl DataRange {
    pub fn datatype(dt: impl Into<Datatype>) -> Self {
        Self::Datatype(dt.into())
    }

    pub(crate) fn collect_primitives(&self, out: &mut Vec<Primitive>) {
        match self {
            Self::Datatype(dt) => out.push(Primitive::Entity(dt.clone().into())),
            Self::DataIntersectionOf(operands) | Self::DataUnionOf(operands) => {
                for operand in operands {
                    operand.collect_primitives(out);
                }
            }
            Self::DataComplementOf(operand) => operand.collect_primitives(out),
            Self::DataOneOf(values) => {
                out.extend(values.iter().cloned().map(Primitive::Literal));
            }
            Self::DatatypeRestriction {
                datatype,
                restrictions,
            } => {
                out.push(Primitive::Entity(datatype.clone().into()));
                out.extend(
                    restrictions
                        .iter()
                        .map(|r| Primitive::Literal(r.value.clone())),
                );
            }
        }
    }
}

impl From<Datatype> for DataRange {
    fn from(dt: Datatype) -> Self {
        Self::Datatype(dt)
    }
}
