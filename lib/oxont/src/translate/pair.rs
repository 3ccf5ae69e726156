//! Axioms defined by a single `s p o` triple with a fixed predicate.

use crate::error::OntError;
use crate::factory::ObjectKind;
use crate::graph::Scope;
use crate::model::{Axiom, AxiomType, ObjectPropertyExpression, Operands, Wrapped};
use crate::translate::{
    AxiomTranslator, ObjectReader, ObjectWriter, claimed_by, subject_term, unexpected,
    with_predicate,
};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::rdfs;
use oxrdf::{NamedNodeRef, Term, Triple};

/// What a side of the triple must be.
#[derive(Debug, Clone, Copy)]
enum Operand {
    Kind(ObjectKind),
    /// any IRI
    Iri,
}

impl Operand {
    fn accepts(self, term: &Term, view: &ModelView<'_>) -> bool {
        match self {
            Self::Kind(kind) => view.can_as(term, kind),
            Self::Iri => term.is_named_node(),
        }
    }
}

#[derive(Debug)]
pub(super) struct PairTranslator {
    axiom_type: AxiomType,
    predicate: NamedNodeRef<'static>,
    subject: Operand,
    object: Operand,
    /// Sibling types that take the triple first when both shapes match.
    yields_to: &'static [AxiomType],
}

const CE: Operand = Operand::Kind(ObjectKind::ClassExpression);
const OPE: Operand = Operand::Kind(ObjectKind::ObjectPropertyExpression);
const DP: Operand = Operand::Kind(ObjectKind::DataProperty);
const AP: Operand = Operand::Kind(ObjectKind::AnnotationProperty);

pub(super) static SUB_CLASS_OF: PairTranslator = PairTranslator {
    axiom_type: AxiomType::SubClassOf,
    predicate: rdfs::SUB_CLASS_OF,
    subject: CE,
    object: CE,
    yields_to: &[],
};

pub(super) static EQUIVALENT_CLASSES: PairTranslator = PairTranslator {
    axiom_type: AxiomType::EquivalentClasses,
    predicate: owl::EQUIVALENT_CLASS,
    subject: CE,
    object: CE,
    yields_to: &[],
};

pub(super) static SUB_OBJECT_PROPERTY_OF: PairTranslator = PairTranslator {
    axiom_type: AxiomType::SubObjectPropertyOf,
    predicate: rdfs::SUB_PROPERTY_OF,
    subject: OPE,
    object: OPE,
    yields_to: &[],
};

pub(super) static SUB_DATA_PROPERTY_OF: PairTranslator = PairTranslator {
    axiom_type: AxiomType::SubDataPropertyOf,
    predicate: rdfs::SUB_PROPERTY_OF,
    subject: DP,
    object: DP,
    yields_to: &[AxiomType::SubObjectPropertyOf],
};

pub(super) static SUB_ANNOTATION_PROPERTY_OF: PairTranslator = PairTranslator {
    axiom_type: AxiomType::SubAnnotationPropertyOf,
    predicate: rdfs::SUB_PROPERTY_OF,
    subject: AP,
    object: AP,
    yields_to: &[AxiomType::SubObjectPropertyOf, AxiomType::SubDataPropertyOf],
};

pub(super) static EQUIVALENT_OBJECT_PROPERTIES: PairTranslator = PairTranslator {
    axiom_type: AxiomType::EquivalentObjectProperties,
    predicate: owl::EQUIVALENT_PROPERTY,
    subject: OPE,
    object: OPE,
    yields_to: &[],
};

pub(super) static EQUIVALENT_DATA_PROPERTIES: PairTranslator = PairTranslator {
    axiom_type: AxiomType::EquivalentDataProperties,
    predicate: owl::EQUIVALENT_PROPERTY,
    subject: DP,
    object: DP,
    yields_to: &[AxiomType::EquivalentObjectProperties],
};

pub(super) static INVERSE_OBJECT_PROPERTIES: PairTranslator = PairTranslator {
    axiom_type: AxiomType::InverseObjectProperties,
    predicate: owl::INVERSE_OF,
    subject: Operand::Kind(ObjectKind::ObjectProperty),
    object: OPE,
    yields_to: &[],
};

pub(super) static OBJECT_PROPERTY_DOMAIN: PairTranslator = PairTranslator {
    axiom_type: AxiomType::ObjectPropertyDomain,
    predicate: rdfs::DOMAIN,
    subject: OPE,
    object: CE,
    yields_to: &[],
};

pub(super) static OBJECT_PROPERTY_RANGE: PairTranslator = PairTranslator {
    axiom_type: AxiomType::ObjectPropertyRange,
    predicate: rdfs::RANGE,
    subject: OPE,
    object: CE,
    yields_to: &[],
};

pub(super) static DATA_PROPERTY_DOMAIN: PairTranslator = PairTranslator {
    axiom_type: AxiomType::DataPropertyDomain,
    predicate: rdfs::DOMAIN,
    subject: DP,
    object: CE,
    yields_to: &[AxiomType::ObjectPropertyDomain],
};

pub(super) static DATA_PROPERTY_RANGE: PairTranslator = PairTranslator {
    axiom_type: AxiomType::DataPropertyRange,
    predicate: rdfs::RANGE,
    subject: DP,
    object: Operand::Kind(ObjectKind::DataRange),
    yields_to: &[AxiomType::ObjectPropertyRange],
};

pub(super) static ANNOTATION_PROPERTY_DOMAIN: PairTranslator = PairTranslator {
    axiom_type: AxiomType::AnnotationPropertyDomain,
    predicate: rdfs::DOMAIN,
    subject: AP,
    object: Operand::Iri,
    yields_to: &[AxiomType::ObjectPropertyDomain, AxiomType::DataPropertyDomain],
};

pub(super) static ANNOTATION_PROPERTY_RANGE: PairTranslator = PairTranslator {
    axiom_type: AxiomType::AnnotationPropertyRange,
    predicate: rdfs::RANGE,
    subject: AP,
    object: Operand::Iri,
    yields_to: &[AxiomType::ObjectPropertyRange, AxiomType::DataPropertyRange],
};

pub(super) static DATATYPE_DEFINITION: PairTranslator = PairTranslator {
    axiom_type: AxiomType::DatatypeDefinition,
    predicate: owl::EQUIVALENT_CLASS,
    subject: Operand::Kind(ObjectKind::Datatype),
    object: Operand::Kind(ObjectKind::DataRange),
    yields_to: &[AxiomType::EquivalentClasses],
};

pub(super) static SAME_INDIVIDUAL: PairTranslator = PairTranslator {
    axiom_type: AxiomType::SameIndividual,
    predicate: owl::SAME_AS,
    subject: Operand::Kind(ObjectKind::Individual),
    object: Operand::Kind(ObjectKind::Individual),
    yields_to: &[],
};

impl AxiomTranslator for PairTranslator {
    fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        Box::new(with_predicate(view, scope, self.predicate))
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        triple.predicate == self.predicate
            && self.subject.accepts(&subject_term(triple), view)
            && self.object.accepts(&triple.object, view)
            && !claimed_by(triple, view, self.yields_to)
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        let mut triples = vec![triple.clone()];
        let s = subject_term(triple);
        let o = &triple.object;
        let axiom = match self.axiom_type {
            AxiomType::SubClassOf => Axiom::SubClassOf {
                sub_class: reader.class_expression(&s)?.drain_into(&mut triples),
                super_class: reader.class_expression(o)?.drain_into(&mut triples),
            },
            AxiomType::EquivalentClasses => Axiom::EquivalentClasses(Operands::new([
                reader.class_expression(&s)?.drain_into(&mut triples),
                reader.class_expression(o)?.drain_into(&mut triples),
            ])),
            AxiomType::SubObjectPropertyOf => Axiom::SubObjectPropertyOf {
                sub_property: reader.object_property_expression(&s)?.drain_into(&mut triples),
                super_property: reader.object_property_expression(o)?.drain_into(&mut triples),
            },
            AxiomType::SubDataPropertyOf => Axiom::SubDataPropertyOf {
                sub_property: reader.data_property(&s)?,
                super_property: reader.data_property(o)?,
            },
            AxiomType::SubAnnotationPropertyOf => Axiom::SubAnnotationPropertyOf {
                sub_property: reader.annotation_property(&s)?,
                super_property: reader.annotation_property(o)?,
            },
            AxiomType::EquivalentObjectProperties => {
                Axiom::EquivalentObjectProperties(Operands::new([
                    reader.object_property_expression(&s)?.drain_into(&mut triples),
                    reader.object_property_expression(o)?.drain_into(&mut triples),
                ]))
            }
            AxiomType::EquivalentDataProperties => Axiom::EquivalentDataProperties(Operands::new([
                reader.data_property(&s)?,
                reader.data_property(o)?,
            ])),
            AxiomType::InverseObjectProperties => Axiom::InverseObjectProperties(
                reader.object_property(&s)?.into(),
                reader.object_property_expression(o)?.drain_into(&mut triples),
            ),
            AxiomType::ObjectPropertyDomain => Axiom::ObjectPropertyDomain {
                property: reader.object_property_expression(&s)?.drain_into(&mut triples),
                domain: reader.class_expression(o)?.drain_into(&mut triples),
            },
            AxiomType::ObjectPropertyRange => Axiom::ObjectPropertyRange {
                property: reader.object_property_expression(&s)?.drain_into(&mut triples),
                range: reader.class_expression(o)?.drain_into(&mut triples),
            },
            AxiomType::DataPropertyDomain => Axiom::DataPropertyDomain {
                property: reader.data_property(&s)?,
                domain: reader.class_expression(o)?.drain_into(&mut triples),
            },
            AxiomType::DataPropertyRange => Axiom::DataPropertyRange {
                property: reader.data_property(&s)?,
                range: reader.data_range(o)?.drain_into(&mut triples),
            },
            AxiomType::AnnotationPropertyDomain => Axiom::AnnotationPropertyDomain {
                property: reader.annotation_property(&s)?,
                domain: reader.iri(o)?,
            },
            AxiomType::AnnotationPropertyRange => Axiom::AnnotationPropertyRange {
                property: reader.annotation_property(&s)?,
                range: reader.iri(o)?,
            },
            AxiomType::DatatypeDefinition => Axiom::DatatypeDefinition {
                datatype: reader.datatype(&s)?,
                data_range: reader.data_range(o)?.drain_into(&mut triples),
            },
            AxiomType::SameIndividual => Axiom::SameIndividual(Operands::new([
                reader.individual(&s)?,
                reader.individual(o)?,
            ])),
            axiom_type => {
                return Err(OntError::InvalidAxiom(format!(
                    "{axiom_type} is not defined by a single triple"
                )));
            }
        };
        Ok(Wrapped::new(axiom, triples))
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        if axiom.axiom_type() != self.axiom_type {
            return Err(unexpected(self.axiom_type, axiom));
        }
        let (subject, object) = match axiom {
            Axiom::SubClassOf {
                sub_class,
                super_class,
            } => (
                writer.class_expression(sub_class),
                writer.class_expression(super_class),
            ),
            Axiom::EquivalentClasses(classes) => {
                let terms = classes
                    .iter()
                    .map(|c| writer.class_expression(c))
                    .collect::<Vec<_>>();
                return star(writer, self.predicate, &terms);
            }
            Axiom::SubObjectPropertyOf {
                sub_property,
                super_property,
            } => (
                writer.object_property_expression(sub_property),
                writer.object_property_expression(super_property),
            ),
            Axiom::SubDataPropertyOf {
                sub_property,
                super_property,
            } => (
                sub_property.iri().clone().into(),
                super_property.iri().clone().into(),
            ),
            Axiom::SubAnnotationPropertyOf {
                sub_property,
                super_property,
            } => (
                sub_property.iri().clone().into(),
                super_property.iri().clone().into(),
            ),
            Axiom::EquivalentObjectProperties(properties) => {
                let terms = properties
                    .iter()
                    .map(|p| writer.object_property_expression(p))
                    .collect::<Vec<_>>();
                return star(writer, self.predicate, &terms);
            }
            Axiom::EquivalentDataProperties(properties) => {
                let terms = properties
                    .iter()
                    .map(|p| Term::from(p.iri().clone()))
                    .collect::<Vec<_>>();
                return star(writer, self.predicate, &terms);
            }
            Axiom::InverseObjectProperties(first, second) => {
                let (named, other) = match (first, second) {
                    (ObjectPropertyExpression::ObjectProperty(_), _) => (first, second),
                    (_, ObjectPropertyExpression::ObjectProperty(_)) => (second, first),
                    _ => {
                        return Err(OntError::InvalidAxiom(
                            "one of two inverse properties must be a named property".into(),
                        ));
                    }
                };
                (
                    named.named_property().iri().clone().into(),
                    writer.object_property_expression(other),
                )
            }
            Axiom::ObjectPropertyDomain { property, domain } => (
                writer.object_property_expression(property),
                writer.class_expression(domain),
            ),
            Axiom::ObjectPropertyRange { property, range } => (
                writer.object_property_expression(property),
                writer.class_expression(range),
            ),
            Axiom::DataPropertyDomain { property, domain } => (
                property.iri().clone().into(),
                writer.class_expression(domain),
            ),
            Axiom::DataPropertyRange { property, range } => {
                (property.iri().clone().into(), writer.data_range(range))
            }
            Axiom::AnnotationPropertyDomain { property, domain } => {
                (property.iri().clone().into(), domain.clone().into())
            }
            Axiom::AnnotationPropertyRange { property, range } => {
                (property.iri().clone().into(), range.clone().into())
            }
            Axiom::DatatypeDefinition {
                datatype,
                data_range,
            } => (datatype.iri().clone().into(), writer.data_range(data_range)),
            Axiom::SameIndividual(individuals) => {
                let terms = individuals
                    .iter()
                    .map(|i| i.to_term())
                    .collect::<Vec<_>>();
                return star(writer, self.predicate, &terms);
            }
            _ => return Err(unexpected(self.axiom_type, axiom)),
        };
        Ok(vec![writer.add_term(&subject, self.predicate, object)?])
    }
}

/// Writes an n-ary axiom as binary triples from the first operand to each other one.
fn star(
    writer: &mut ObjectWriter<'_>,
    predicate: NamedNodeRef<'_>,
    operands: &[Term],
) -> Result<Vec<Triple>, OntError> {
    let [first, others @ ..] = operands else {
        return Err(OntError::InvalidAxiom("an n-ary axiom needs two operands".into()));
    };
    if others.is_empty() {
        return Err(OntError::InvalidAxiom("an n-ary axiom needs two operands".into()));
    }
    others
        .iter()
        .map(|other| writer.add_term(first, predicate, other.clone()))
        .collect()
}
