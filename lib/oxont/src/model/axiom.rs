//! OWL 2 axioms.

use crate::model::annotation::{Annotation, AnnotationSubject, AnnotationValue};
use crate::model::entity::{
    AnnotationProperty, DataProperty, Datatype, Entity, Individual, ObjectProperty, OwlClass,
};
use crate::model::expression::{ClassExpression, DataRange, ObjectPropertyExpression};
use crate::model::{Operands, Primitive};
use oxrdf::{Literal, NamedNode};
use std::fmt;

/// An OWL 2 axiom.
///
/// N-ary operands use [`Operands`] so that two axioms listing the same operands in a
/// different order are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axiom {
    /// Declaration(Entity)
    Declaration(Entity),

    // Class axioms
    /// SubClassOf(sub, super)
    SubClassOf {
        sub_class: ClassExpression,
        super_class: ClassExpression,
    },
    /// EquivalentClasses(C1, C2, ...)
    EquivalentClasses(Operands<ClassExpression>),
    /// DisjointClasses(C1, C2, ...)
    DisjointClasses(Operands<ClassExpression>),
    /// DisjointUnion(C, C1, ..., Cn)
    DisjointUnion {
        class: OwlClass,
        disjoint_classes: Operands<ClassExpression>,
    },

    // Object property axioms
    /// SubObjectPropertyOf(sub, super)
    SubObjectPropertyOf {
        sub_property: ObjectPropertyExpression,
        super_property: ObjectPropertyExpression,
    },
    /// SubObjectPropertyOf(ObjectPropertyChain(P1, ..., Pn), P)
    SubPropertyChainOf {
        property_chain: Vec<ObjectPropertyExpression>,
        super_property: ObjectPropertyExpression,
    },
    /// EquivalentObjectProperties(P1, P2, ...)
    EquivalentObjectProperties(Operands<ObjectPropertyExpression>),
    /// DisjointObjectProperties(P1, P2, ...)
    DisjointObjectProperties(Operands<ObjectPropertyExpression>),
    /// InverseObjectProperties(P1, P2)
    InverseObjectProperties(ObjectPropertyExpression, ObjectPropertyExpression),
    /// ObjectPropertyDomain(P, C)
    ObjectPropertyDomain {
        property: ObjectPropertyExpression,
        domain: ClassExpression,
    },
    /// ObjectPropertyRange(P, C)
    ObjectPropertyRange {
        property: ObjectPropertyExpression,
        range: ClassExpression,
    },
    FunctionalObjectProperty(ObjectPropertyExpression),
    InverseFunctionalObjectProperty(ObjectPropertyExpression),
    ReflexiveObjectProperty(ObjectPropertyExpression),
    IrreflexiveObjectProperty(ObjectPropertyExpression),
    SymmetricObjectProperty(ObjectPropertyExpression),
    AsymmetricObjectProperty(ObjectPropertyExpression),
    TransitiveObjectProperty(ObjectPropertyExpression),

    // Data property axioms
    /// SubDataPropertyOf(sub, super)
    SubDataPropertyOf {
        sub_property: DataProperty,
        super_property: DataProperty,
    },
    /// EquivalentDataProperties(P1, P2, ...)
    EquivalentDataProperties(Operands<DataProperty>),
    /// DisjointDataProperties(P1, P2, ...)
    DisjointDataProperties(Operands<DataProperty>),
    /// DataPropertyDomain(P, C)
    DataPropertyDomain {
        property: DataProperty,
        domain: ClassExpression,
    },
    /// DataPropertyRange(P, D)
    DataPropertyRange {
        property: DataProperty,
        range: DataRange,
    },
    FunctionalDataProperty(DataProperty),

    /// DatatypeDefinition(DT, D)
    DatatypeDefinition {
        datatype: Datatype,
        data_range: DataRange,
    },
    /// HasKey(C, (OP1, ..., OPn), (DP1, ..., DPm))
    HasKey {
        class: ClassExpression,
        object_properties: Operands<ObjectPropertyExpression>,
        data_properties: Operands<DataProperty>,
    },

    // Assertions
    /// ClassAssertion(C, a)
    ClassAssertion {
        class: ClassExpression,
        individual: Individual,
    },
    /// ObjectPropertyAssertion(P, a, b)
    ObjectPropertyAssertion {
        property: ObjectProperty,
        source: Individual,
        target: Individual,
    },
    /// NegativeObjectPropertyAssertion(P, a, b)
    NegativeObjectPropertyAssertion {
        property: ObjectPropertyExpression,
        source: Individual,
        target: Individual,
    },
    /// DataPropertyAssertion(P, a, v)
    DataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },
    /// NegativeDataPropertyAssertion(P, a, v)
    NegativeDataPropertyAssertion {
        property: DataProperty,
        source: Individual,
        target: Literal,
    },
    /// SameIndividual(a1, a2, ...)
    SameIndividual(Operands<Individual>),
    /// DifferentIndividuals(a1, a2, ...)
    DifferentIndividuals(Operands<Individual>),

    // Annotation axioms
    /// AnnotationAssertion(P, s, v)
    AnnotationAssertion {
        property: AnnotationProperty,
        subject: AnnotationSubject,
        value: AnnotationValue,
    },
    /// SubAnnotationPropertyOf(sub, super)
    SubAnnotationPropertyOf {
        sub_property: AnnotationProperty,
        super_property: AnnotationProperty,
    },
    /// AnnotationPropertyDomain(P, IRI)
    AnnotationPropertyDomain {
        property: AnnotationProperty,
        domain: NamedNode,
    },
    /// AnnotationPropertyRange(P, IRI)
    AnnotationPropertyRange {
        property: AnnotationProperty,
        range: NamedNode,
    },
}

impl Axiom {
    pub fn declaration(entity: impl Into<Entity>) -> Self {
        Self::Declaration(entity.into())
    }

    pub fn subclass_of(sub_class: ClassExpression, super_class: ClassExpression) -> Self {
        Self::SubClassOf {
            sub_class,
            super_class,
        }
    }

    pub fn disjoint_classes(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::DisjointClasses(classes.into_iter().collect())
    }

    pub fn equivalent_classes(classes: impl IntoIterator<Item = ClassExpression>) -> Self {
        Self::EquivalentClasses(classes.into_iter().collect())
    }

    pub fn class_assertion(class: ClassExpression, individual: impl Into<Individual>) -> Self {
        Self::ClassAssertion {
            class,
            individual: individual.into(),
        }
    }

    pub fn axiom_type(&self) -> AxiomType {
        match self {
            Self::Declaration(_) => AxiomType::Declaration,
            Self::SubClassOf { .. } => AxiomType::SubClassOf,
            Self::EquivalentClasses(_) => AxiomType::EquivalentClasses,
            Self::DisjointClasses(_) => AxiomType::DisjointClasses,
            Self::DisjointUnion { .. } => AxiomType::DisjointUnion,
            Self::SubObjectPropertyOf { .. } => AxiomType::SubObjectPropertyOf,
            Self::SubPropertyChainOf { .. } => AxiomType::SubPropertyChainOf,
            Self::EquivalentObjectProperties(_) => AxiomType::EquivalentObjectProperties,
            Self::DisjointObjectProperties(_) => AxiomType::DisjointObjectProperties,
            Self::InverseObjectProperties(..) => AxiomType::InverseObjectProperties,
            Self::ObjectPropertyDomain { .. } => AxiomType::ObjectPropertyDomain,
            Self::ObjectPropertyRange { .. } => AxiomType::ObjectPropertyRange,
            Self::FunctionalObjectProperty(_) => AxiomType::FunctionalObjectProperty,
            Self::InverseFunctionalObjectProperty(_) => AxiomType::InverseFunctionalObjectProperty,
            Self::ReflexiveObjectProperty(_) => AxiomType::ReflexiveObjectProperty,
            Self::IrreflexiveObjectProperty(_) => AxiomType::IrreflexiveObjectProperty,
            Self::SymmetricObjectProperty(_) => AxiomType::SymmetricObjectProperty,
            Self::AsymmetricObjectProperty(_) => AxiomType::AsymmetricObjectProperty,
            Self::TransitiveObjectProperty(_) => AxiomType::TransitiveObjectProperty,
            Self::SubDataPropertyOf { .. } => AxiomType::SubDataPropertyOf,
            Self::EquivalentDataProperties(_) => AxiomType::EquivalentDataProperties,
            Self::DisjointDataProperties(_) => AxiomType::DisjointDataProperties,
            Self::DataPropertyDomain { .. } => AxiomType::DataPropertyDomain,
            Self::DataPropertyRange { .. } => AxiomType::DataPropertyRange,
            Self::FunctionalDataProperty(_) => AxiomType::FunctionalDataProperty,
            Self::DatatypeDefinition { .. } => AxiomType::DatatypeDefinition,
            Self::HasKey { .. } => AxiomType::HasKey,
            Self::ClassAssertion { .. } => AxiomType::ClassAssertion,
            Self::ObjectPropertyAssertion { .. } => AxiomType::ObjectPropertyAssertion,
            Self::NegativeObjectPropertyAssertion { .. } => {
                AxiomType::NegativeObjectPropertyAssertion
            }
            Self::DataPropertyAssertion { .. } => AxiomType::DataPropertyAssertion,
            Self::NegativeDataPropertyAssertion { .. } => AxiomType::NegativeDataPropertyAssertion,
            Self::SameIndividual(_) => AxiomType::SameIndividual,
            Self::DifferentIndividuals(_) => AxiomType::DifferentIndividuals,
            Self::AnnotationAssertion { .. } => AxiomType::AnnotationAssertion,
            Self::SubAnnotationPropertyOf { .. } => AxiomType::SubAnnotationPropertyOf,
            Self::AnnotationPropertyDomain { .. } => AxiomType::AnnotationPropertyDomain,
            Self::AnnotationPropertyRange { .. } => AxiomType::AnnotationPropertyRange,
        }
    }

    /// Entities, anonymous individuals, literals and IRIs the axiom refers to.
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut out = Vec::new();
        self.collect_primitives(&mut out);
        out
    }

    /// Returns `true` if one of the class expressions of the axiom is an object cardinality
    /// restriction without filler.
    pub fn uses_implicit_thing(&self) -> bool {
        let mut classes = Vec::new();
        self.collect_class_expressions(&mut classes);
        classes
            .into_iter()
            .any(ClassExpression::has_unqualified_object_cardinality)
    }

    fn collect_class_expressions<'a>(&'a self, out: &mut Vec<&'a ClassExpression>) {
        match self {
            Self::SubClassOf {
                sub_class,
                super_class,
            } => {
                out.push(sub_class);
                out.push(super_class);
            }
            Self::EquivalentClasses(classes) | Self::DisjointClasses(classes) => {
                out.extend(classes.iter());
            }
            Self::DisjointUnion {
                disjoint_classes, ..
            } => out.extend(disjoint_classes.iter()),
            Self::ObjectPropertyDomain { domain, .. } | Self::DataPropertyDomain { domain, .. } => {
                out.push(domain);
            }
            Self::ObjectPropertyRange { range, .. } => out.push(range),
            Self::HasKey { class, .. } | Self::ClassAssertion { class, .. } => out.push(class),
            _ => (),
        }
    }

    fn collect_primitives(&self, out: &mut Vec<Primitive>) {
        fn entity(out: &mut Vec<Primitive>, entity: impl Into<Entity>) {
            out.push(Primitive::Entity(entity.into()));
        }
        match self {
            Self::Declaration(e) => out.push(Primitive::Entity(e.clone())),
            Self::SubClassOf {
                sub_class,
                super_class,
            } => {
                sub_class.collect_primitives(out);
                super_class.collect_primitives(out);
            }
            Self::EquivalentClasses(classes) | Self::DisjointClasses(classes) => {
                for c in classes {
                    c.collect_primitives(out);
                }
            }
            Self::DisjointUnion {
                class,
                disjoint_classes,
            } => {
                entity(out, class.clone());
                for c in disjoint_classes {
                    c.collect_primitives(out);
                }
            }
            Self::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => {
                sub_property.collect_primitives(out);
                super_property.collect_primitives(out);
            }
            Self::SubPropertyChainOf {
                property_chain,
                super_property,
            } => {
                for p in property_chain {
                    p.collect_primitives(out);
                }
                super_property.collect_primitives(out);
            }
            Self::EquivalentObjectProperties(properties)
            | Self::DisjointObjectProperties(properties) => {
                for p in properties {
                    p.collect_primitives(out);
                }
            }
            Self::InverseObjectProperties(first, second) => {
                first.collect_primitives(out);
                second.collect_primitives(out);
            }
            Self::ObjectPropertyDomain { property, domain: c }
            | Self::ObjectPropertyRange { property, range: c } => {
                property.collect_primitives(out);
                c.collect_primitives(out);
            }
            Self::FunctionalObjectProperty(p)
            | Self::InverseFunctionalObjectProperty(p)
            | Self::ReflexiveObjectProperty(p)
            | Self::IrreflexiveObjectProperty(p)
            | Self::SymmetricObjectProperty(p)
            | Self::AsymmetricObjectProperty(p)
            | Self::TransitiveObjectProperty(p) => p.collect_primitives(out),
            Self::SubDataPropertyOf {
                sub_property,
                super_property,
            } => {
                entity(out, sub_property.clone());
                entity(out, super_property.clone());
            }
            Self::EquivalentDataProperties(properties)
            | Self::DisjointDataProperties(properties) => {
                for p in properties {
                    entity(out, p.clone());
                }
            }
            Self::DataPropertyDomain { property, domain } => {
                entity(out, property.clone());
                domain.collect_primitives(out);
            }
            Self::DataPropertyRange { property, range } => {
                entity(out, property.clone());
                range.collect_primitives(out);
            }
            Self::FunctionalDataProperty(p) => entity(out, p.clone()),
            Self::DatatypeDefinition {
                datatype,
                data_range,
            } => {
                entity(out, datatype.clone());
                data_range.collect_primitives(out);
            }
            Self::HasKey {
                class,
                object_properties,
                data_properties,
            } => {
                class.collect_primitives(out);
                for p in object_properties {
                    p.collect_primitives(out);
                }
                for p in data_properties {
                    entity(out, p.clone());
                }
            }
            Self::ClassAssertion { class, individual } => {
                class.collect_primitives(out);
                out.push(individual.clone().into());
            }
            Self::ObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                entity(out, property.clone());
                out.push(source.clone().into());
                out.push(target.clone().into());
            }
            Self::NegativeObjectPropertyAssertion {
                property,
                source,
                target,
            } => {
                property.collect_primitives(out);
                out.push(source.clone().into());
                out.push(target.clone().into());
            }
            Self::DataPropertyAssertion {
                property,
                source,
                target,
            }
            | Self::NegativeDataPropertyAssertion {
                property,
                source,
                target,
            } => {
                entity(out, property.clone());
                out.push(source.clone().into());
                out.push(Primitive::Literal(target.clone()));
            }
            Self::SameIndividual(individuals) | Self::DifferentIndividuals(individuals) => {
                out.extend(individuals.iter().cloned().map(Primitive::from));
            }
            Self::AnnotationAssertion {
                property,
                subject,
                value,
            } => {
                entity(out, property.clone());
                out.push(match subject {
                    AnnotationSubject::Iri(iri) => Primitive::Iri(iri.clone()),
                    AnnotationSubject::Anonymous(node) => Primitive::Anonymous(node.clone()),
                });
                out.push(value.clone().into());
            }
            Self::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => {
                entity(out, sub_property.clone());
                entity(out, super_property.clone());
            }
            Self::AnnotationPropertyDomain {
                property,
                domain: iri,
            }
            | Self::AnnotationPropertyRange {
                property,
                range: iri,
            } => {
                entity(out, property.clone());
                out.push(Primitive::Iri(iri.clone()));
            }
        }
    }
}

/// The kind of an [`Axiom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AxiomType {
    Declaration,
    SubClassOf,
    EquivalentClasses,
    DisjointClasses,
    DisjointUnion,
    SubObjectPropertyOf,
    SubPropertyChainOf,
    EquivalentObjectProperties,
    DisjointObjectProperties,
    InverseObjectProperties,
    ObjectPropertyDomain,
    ObjectPropertyRange,
    FunctionalObjectProperty,
    InverseFunctionalObjectProperty,
    ReflexiveObjectProperty,
    IrreflexiveObjectProperty,
    SymmetricObjectProperty,
    AsymmetricObjectProperty,
    TransitiveObjectProperty,
    SubDataPropertyOf,
    EquivalentDataProperties,
    DisjointDataProperties,
    DataPropertyDomain,
    DataPropertyRange,
    FunctionalDataProperty,
    DatatypeDefinition,
    HasKey,
    ClassAssertion,
    ObjectPropertyAssertion,
    NegativeObjectPropertyAssertion,
    DataPropertyAssertion,
    NegativeDataPropertyAssertion,
    SameIndividual,
    DifferentIndividuals,
    AnnotationAssertion,
    SubAnnotationPropertyOf,
    AnnotationPropertyDomain,
    AnnotationPropertyRange,
}

impl AxiomType {
    pub const ALL: [Self; 38] = [
        Self::Declaration,
        Self::SubClassOf,
        Self::EquivalentClasses,
        Self::DisjointClasses,
        Self::DisjointUnion,
        Self::SubObjectPropertyOf,
        Self::SubPropertyChainOf,
        Self::EquivalentObjectProperties,
        Self::DisjointObjectProperties,
        Self::InverseObjectProperties,
        Self::ObjectPropertyDomain,
        Self::ObjectPropertyRange,
        Self::FunctionalObjectProperty,
        Self::InverseFunctionalObjectProperty,
        Self::ReflexiveObjectProperty,
        Self::IrreflexiveObjectProperty,
        Self::SymmetricObjectProperty,
        Self::AsymmetricObjectProperty,
        Self::TransitiveObjectProperty,
        Self::SubDataPropertyOf,
        Self::EquivalentDataProperties,
        Self::DisjointDataProperties,
        Self::DataPropertyDomain,
        Self::DataPropertyRange,
        Self::FunctionalDataProperty,
        Self::DatatypeDefinition,
        Self::HasKey,
        Self::ClassAssertion,
        Self::ObjectPropertyAssertion,
        Self::NegativeObjectPropertyAssertion,
        Self::DataPropertyAssertion,
        Self::NegativeDataPropertyAssertion,
        Self::SameIndividual,
        Self::DifferentIndividuals,
        Self::AnnotationAssertion,
        Self::SubAnnotationPropertyOf,
        Self::AnnotationPropertyDomain,
        Self::AnnotationPropertyRange,
    ];

    /// Annotation axioms are only read when annotation axioms loading is enabled.
    pub fn is_annotation_axiom(self) -> bool {
        matches!(
            self,
            Self::AnnotationAssertion
                | Self::SubAnnotationPropertyOf
                | Self::AnnotationPropertyDomain
                | Self::AnnotationPropertyRange
        )
    }
}

impl fmt::Display for AxiomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// An axiom with its (unordered) annotations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotatedAxiom {
    pub axiom: Axiom,
    pub annotations: Operands<Annotation>,
}

impl AnnotatedAxiom {
    pub fn new(axiom: Axiom) -> Self {
        Self {
            axiom,
            annotations: Operands::default(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.insert(annotation);
        self
    }

    #[must_use]
    pub fn with_annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        for annotation in annotations {
            self.annotations.insert(annotation);
        }
        self
    }

    #[inline]
    pub fn axiom_type(&self) -> AxiomType {
        self.axiom.axiom_type()
    }

    /// The primitives of the axiom and of its annotations.
    pub fn primitives(&self) -> Vec<Primitive> {
        let mut out = self.axiom.primitives();
        for annotation in &self.annotations {
            out.push(Primitive::Entity(annotation.property.clone().into()));
            out.push(annotation.value.clone().into());
        }
        out
    }

    /// Returns `true` if the axiom or its annotations refer to the primitive.
    pub fn references(&self, primitive: &Primitive) -> bool {
        self.primitives().contains(primitive)
    }
}

impl From<Axiom> for AnnotatedAxiom {
    fn from(axiom: Axiom) -> Self {
        Self::new(axiom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(OwlClass::new(NamedNode::new_unchecked(format!(
            "http://example.com/{name}"
        ))))
    }

    #[test]
    fn nary_axioms_ignore_operand_order() {
        assert_eq!(
            Axiom::disjoint_classes([class("A"), class("B"), class("C")]),
            Axiom::disjoint_classes([class("C"), class("A"), class("B")])
        );
        assert_ne!(
            Axiom::disjoint_classes([class("A"), class("B")]),
            Axiom::equivalent_classes([class("A"), class("B")])
        );
    }

    #[test]
    fn annotations_are_part_of_equality() {
        let axiom = AnnotatedAxiom::new(Axiom::subclass_of(class("A"), class("B")));
        let comment = Annotation::new(
            NamedNode::new_unchecked("http://www.w3.org/2000/01/rdf-schema#comment"),
            Literal::new_simple_literal("c"),
        );
        assert_ne!(axiom, axiom.clone().with_annotation(comment.clone()));
        assert_eq!(
            axiom.clone().with_annotation(comment.clone()),
            axiom.with_annotations([comment.clone(), comment])
        );
    }

    #[test]
    fn implicit_thing_detection() {
        let property = ObjectProperty::new(NamedNode::new_unchecked("http://example.com/p"));
        let restriction = ClassExpression::ObjectMinCardinality {
            cardinality: 1,
            property: property.into(),
            filler: None,
        };
        assert!(Axiom::subclass_of(class("A"), restriction).uses_implicit_thing());
        assert!(!Axiom::subclass_of(class("A"), class("B")).uses_implicit_thing());
    }
}
