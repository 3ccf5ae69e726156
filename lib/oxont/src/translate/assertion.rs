use crate::error::OntError;
use crate::factory::ObjectKind;
use crate::graph::{Scope, is_iri};
use crate::model::{AnnotationSubject, Axiom, AxiomType, Wrapped};
use crate::translate::{
    AxiomTranslator, ObjectReader, ObjectWriter, claimed_by, object_is, subject_is, subject_term,
    unexpected, with_predicate, with_type,
};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedNodeRef, Subject, Term, Triple};

/// `a rdf:type C`
#[derive(Debug)]
pub(super) struct ClassAssertionTranslator;

pub(super) static CLASS_ASSERTION: ClassAssertionTranslator = ClassAssertionTranslator;

impl AxiomTranslator for ClassAssertionTranslator {
    fn axiom_type(&self) -> AxiomType {
        AxiomType::ClassAssertion
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        Box::new(with_predicate(view, scope, rdf::TYPE))
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        triple.predicate == rdf::TYPE
            && subject_is(triple, view, ObjectKind::Individual)
            && object_is(triple, view, ObjectKind::ClassExpression)
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        let mut triples = vec![triple.clone()];
        let individual = reader.individual(&subject_term(triple))?;
        let class = reader
            .class_expression(&triple.object)?
            .drain_into(&mut triples);
        Ok(Wrapped::new(Axiom::ClassAssertion { class, individual }, triples))
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        let Axiom::ClassAssertion { class, individual } = axiom else {
            return Err(unexpected(AxiomType::ClassAssertion, axiom));
        };
        let class = writer.class_expression(class);
        Ok(vec![writer.add_term(&individual.to_term(), rdf::TYPE, class)?])
    }
}

/// `s P o` where the predicate is a declared property.
///
/// The same triple shape is shared by object property, data property and annotation
/// assertions: object properties win over data properties, which win over annotation
/// properties.
#[derive(Debug)]
pub(super) struct PropertyAssertionTranslator {
    axiom_type: AxiomType,
    property: ObjectKind,
    yields_to: &'static [AxiomType],
}

pub(super) static OBJECT_PROPERTY_ASSERTION: PropertyAssertionTranslator =
    PropertyAssertionTranslator {
        axiom_type: AxiomType::ObjectPropertyAssertion,
        property: ObjectKind::ObjectProperty,
        yields_to: &[],
    };

pub(super) static DATA_PROPERTY_ASSERTION: PropertyAssertionTranslator =
    PropertyAssertionTranslator {
        axiom_type: AxiomType::DataPropertyAssertion,
        property: ObjectKind::DataProperty,
        yields_to: &[AxiomType::ObjectPropertyAssertion],
    };

pub(super) static ANNOTATION_ASSERTION: PropertyAssertionTranslator =
    PropertyAssertionTranslator {
        axiom_type: AxiomType::AnnotationAssertion,
        property: ObjectKind::AnnotationProperty,
        yields_to: &[
            AxiomType::ObjectPropertyAssertion,
            AxiomType::DataPropertyAssertion,
        ],
    };

impl PropertyAssertionTranslator {
    fn has_valid_operands(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        match self.axiom_type {
            AxiomType::ObjectPropertyAssertion => {
                subject_is(triple, view, ObjectKind::Individual)
                    && object_is(triple, view, ObjectKind::Individual)
            }
            AxiomType::DataPropertyAssertion => {
                subject_is(triple, view, ObjectKind::Individual) && triple.object.is_literal()
            }
            _ => match &triple.subject {
                // the annotations of the ontology header are not axioms
                Subject::NamedNode(_) => !view.has_type(&subject_term(triple), owl::ONTOLOGY),
                Subject::BlankNode(_) => {
                    subject_is(triple, view, ObjectKind::AnonymousIndividual)
                }
                #[allow(unreachable_patterns, reason = "RDF 1.2 triple terms")]
                _ => false,
            },
        }
    }
}

impl AxiomTranslator for PropertyAssertionTranslator {
    fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        Box::new(view.find_iter(scope, None, None, None))
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        view.can_as(&Term::from(triple.predicate.clone()), self.property)
            && self.has_valid_operands(triple, view)
            && !claimed_by(triple, view, self.yields_to)
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        let subject = subject_term(triple);
        let property = Term::from(triple.predicate.clone());
        let axiom = match self.axiom_type {
            AxiomType::ObjectPropertyAssertion => Axiom::ObjectPropertyAssertion {
                property: reader.object_property(&property)?,
                source: reader.individual(&subject)?,
                target: reader.individual(&triple.object)?,
            },
            AxiomType::DataPropertyAssertion => Axiom::DataPropertyAssertion {
                property: reader.data_property(&property)?,
                source: reader.individual(&subject)?,
                target: reader.literal(&triple.object)?,
            },
            _ => Axiom::AnnotationAssertion {
                property: reader.annotation_property(&property)?,
                subject: match &triple.subject {
                    Subject::NamedNode(iri) => AnnotationSubject::Iri(iri.clone()),
                    Subject::BlankNode(node) => AnnotationSubject::Anonymous(node.clone()),
                    #[allow(unreachable_patterns, reason = "RDF 1.2 triple terms")]
                    _ => {
                        return Err(OntError::InvalidAxiom(format!(
                            "{subject} can't be annotated"
                        )));
                    }
                },
                value: reader.annotation_value(&triple.object)?,
            },
        };
        Ok(Wrapped::new(axiom, vec![triple.clone()]))
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        let triple = match (self.axiom_type, axiom) {
            (
                AxiomType::ObjectPropertyAssertion,
                Axiom::ObjectPropertyAssertion {
                    property,
                    source,
                    target,
                },
            ) => writer.add_term(&source.to_term(), property.as_ref(), target.to_term())?,
            (
                AxiomType::DataPropertyAssertion,
                Axiom::DataPropertyAssertion {
                    property,
                    source,
                    target,
                },
            ) => writer.add_term(&source.to_term(), property.as_ref(), target.clone())?,
            (
                AxiomType::AnnotationAssertion,
                Axiom::AnnotationAssertion {
                    property,
                    subject,
                    value,
                },
            ) => writer.add(subject.to_subject(), property.as_ref(), value.to_term()),
            _ => return Err(unexpected(self.axiom_type, axiom)),
        };
        Ok(vec![triple])
    }
}

/// `_:x rdf:type owl:NegativePropertyAssertion` with its source, property and target.
#[derive(Debug)]
pub(super) struct NegativeAssertionTranslator {
    axiom_type: AxiomType,
    property: ObjectKind,
    target: NamedNodeRef<'static>,
}

pub(super) static NEGATIVE_OBJECT_PROPERTY_ASSERTION: NegativeAssertionTranslator =
    NegativeAssertionTranslator {
        axiom_type: AxiomType::NegativeObjectPropertyAssertion,
        property: ObjectKind::ObjectPropertyExpression,
        target: owl::TARGET_INDIVIDUAL,
    };

pub(super) static NEGATIVE_DATA_PROPERTY_ASSERTION: NegativeAssertionTranslator =
    NegativeAssertionTranslator {
        axiom_type: AxiomType::NegativeDataPropertyAssertion,
        property: ObjectKind::DataProperty,
        target: owl::TARGET_VALUE,
    };

/// The single object of `node predicate ?o`.
fn single(view: &ModelView<'_>, node: &Term, predicate: NamedNodeRef<'_>) -> Option<Term> {
    match <[Term; 1]>::try_from(view.objects(node, predicate)) {
        Ok([value]) => Some(value),
        Err(_) => None,
    }
}

impl AxiomTranslator for NegativeAssertionTranslator {
    fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        Box::new(with_type(view, scope, owl::NEGATIVE_PROPERTY_ASSERTION))
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        if triple.predicate != rdf::TYPE
            || !is_iri(&triple.object, owl::NEGATIVE_PROPERTY_ASSERTION)
            || !matches!(triple.subject, Subject::BlankNode(_))
        {
            return false;
        }
        let node = subject_term(triple);
        let source = single(view, &node, owl::SOURCE_INDIVIDUAL);
        let property = single(view, &node, owl::ASSERTION_PROPERTY);
        let target = single(view, &node, self.target);
        match (source, property, target) {
            (Some(source), Some(property), Some(target)) => {
                view.can_as(&source, ObjectKind::Individual)
                    && view.can_as(&property, self.property)
                    && if self.axiom_type == AxiomType::NegativeDataPropertyAssertion {
                        target.is_literal()
                    } else {
                        view.can_as(&target, ObjectKind::Individual)
                    }
            }
            _ => false,
        }
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        let node = subject_term(triple);
        let (source, source_triple) = reader.value(&node, owl::SOURCE_INDIVIDUAL)?;
        let (property, property_triple) = reader.value(&node, owl::ASSERTION_PROPERTY)?;
        let (target, target_triple) = reader.value(&node, self.target)?;
        let mut triples = vec![triple.clone(), source_triple, property_triple, target_triple];
        let source = reader.individual(&source)?;
        let axiom = if self.axiom_type == AxiomType::NegativeDataPropertyAssertion {
            Axiom::NegativeDataPropertyAssertion {
                property: reader.data_property(&property)?,
                source,
                target: reader.literal(&target)?,
            }
        } else {
            Axiom::NegativeObjectPropertyAssertion {
                property: reader
                    .object_property_expression(&property)?
                    .drain_into(&mut triples),
                source,
                target: reader.individual(&target)?,
            }
        };
        Ok(Wrapped::new(axiom, triples))
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        let (source, property, target) = match (self.axiom_type, axiom) {
            (
                AxiomType::NegativeObjectPropertyAssertion,
                Axiom::NegativeObjectPropertyAssertion {
                    property,
                    source,
                    target,
                },
            ) => (
                source.to_term(),
                writer.object_property_expression(property),
                target.to_term(),
            ),
            (
                AxiomType::NegativeDataPropertyAssertion,
                Axiom::NegativeDataPropertyAssertion {
                    property,
                    source,
                    target,
                },
            ) => (
                source.to_term(),
                property.iri().clone().into(),
                target.clone().into(),
            ),
            _ => return Err(unexpected(self.axiom_type, axiom)),
        };
        let node = BlankNode::default();
        writer.add(node.clone(), owl::SOURCE_INDIVIDUAL, source);
        writer.add(node.clone(), owl::ASSERTION_PROPERTY, property);
        writer.add(node.clone(), self.target, target);
        Ok(vec![writer.add(
            node,
            rdf::TYPE,
            owl::NEGATIVE_PROPERTY_ASSERTION,
        )])
    }
}
