use crate::error::OntError;
use crate::graph::{build_list, to_subject};
use crate::model::{ClassExpression, DataRange, Individual, ObjectPropertyExpression};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{BlankNode, Literal, NamedNodeRef, Subject, Term, Triple};

/// Turns model values into triples.
///
/// Nothing is written to the graph: the collected triples are committed by the caller once the
/// whole axiom has been translated, so that a failing write leaves the graph untouched.
pub struct ObjectWriter<'a> {
    view: ModelView<'a>,
    triples: Vec<Triple>,
}

impl<'a> ObjectWriter<'a> {
    pub fn new(view: ModelView<'a>) -> Self {
        Self {
            view,
            triples: Vec::new(),
        }
    }

    #[inline]
    pub fn view(&self) -> &ModelView<'a> {
        &self.view
    }

    /// Queues a triple and returns it.
    pub fn add(
        &mut self,
        subject: impl Into<Subject>,
        predicate: NamedNodeRef<'_>,
        object: impl Into<Term>,
    ) -> Triple {
        let triple = Triple::new(subject, predicate, object);
        if !self.triples.contains(&triple) {
            self.triples.push(triple.clone());
        }
        triple
    }

    /// Queues a triple whose subject is a term.
    pub fn add_term(
        &mut self,
        subject: &Term,
        predicate: NamedNodeRef<'_>,
        object: impl Into<Term>,
    ) -> Result<Triple, OntError> {
        let subject = to_subject(subject.clone()).ok_or_else(|| {
            OntError::InvalidAxiom(format!("the literal {subject} can't be a subject"))
        })?;
        Ok(self.add(subject, predicate, object))
    }

    /// Writes an RDF collection and returns its head.
    pub fn list(&mut self, items: &[Term]) -> Term {
        let (head, triples) = build_list(items);
        self.triples.extend(triples);
        head
    }

    #[inline]
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    #[inline]
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    pub fn individual(&self, individual: &Individual) -> Term {
        individual.to_term()
    }

    pub fn object_property_expression(&mut self, property: &ObjectPropertyExpression) -> Term {
        match property {
            ObjectPropertyExpression::ObjectProperty(p) => p.iri().clone().into(),
            ObjectPropertyExpression::InverseObjectProperty(p) => {
                let node = BlankNode::default();
                self.add(node.clone(), owl::INVERSE_OF, p.iri().clone());
                node.into()
            }
        }
    }

    pub fn class_expression(&mut self, expression: &ClassExpression) -> Term {
        let node = BlankNode::default();
        match expression {
            ClassExpression::Class(c) => return c.iri().clone().into(),
            ClassExpression::ObjectIntersectionOf(operands)
            | ClassExpression::ObjectUnionOf(operands) => {
                let items = operands
                    .iter()
                    .map(|c| self.class_expression(c))
                    .collect::<Vec<_>>();
                let head = self.list(&items);
                let predicate = if matches!(expression, ClassExpression::ObjectUnionOf(_)) {
                    owl::UNION_OF
                } else {
                    owl::INTERSECTION_OF
                };
                self.add(node.clone(), rdf::TYPE, owl::CLASS);
                self.add(node.clone(), predicate, head);
            }
            ClassExpression::ObjectComplementOf(operand) => {
                let operand = self.class_expression(operand);
                self.add(node.clone(), rdf::TYPE, owl::CLASS);
                self.add(node.clone(), owl::COMPLEMENT_OF, operand);
            }
            ClassExpression::ObjectOneOf(individuals) => {
                let items = individuals.iter().map(Individual::to_term).collect::<Vec<_>>();
                let head = self.list(&items);
                self.add(node.clone(), rdf::TYPE, owl::CLASS);
                self.add(node.clone(), owl::ONE_OF, head);
            }
            ClassExpression::ObjectSomeValuesFrom { property, filler }
            | ClassExpression::ObjectAllValuesFrom { property, filler } => {
                let property = self.object_property_expression(property);
                let filler = self.class_expression(filler);
                let predicate = if matches!(
                    expression,
                    ClassExpression::ObjectSomeValuesFrom { .. }
                ) {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                self.restriction(&node, property);
                self.add(node.clone(), predicate, filler);
            }
            ClassExpression::ObjectHasValue {
                property,
                individual,
            } => {
                let property = self.object_property_expression(property);
                self.restriction(&node, property);
                self.add(node.clone(), owl::HAS_VALUE, individual.to_term());
            }
            ClassExpression::ObjectHasSelf(property) => {
                let property = self.object_property_expression(property);
                self.restriction(&node, property);
                self.add(node.clone(), owl::HAS_SELF, Literal::from(true));
            }
            ClassExpression::ObjectMinCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::ObjectMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::ObjectExactCardinality {
                cardinality,
                property,
                filler,
            } => {
                let property = self.object_property_expression(property);
                let filler = filler.as_ref().map(|f| self.class_expression(f));
                let (plain, qualified) = cardinality_predicates(expression);
                self.restriction(&node, property);
                match filler {
                    Some(filler) => {
                        self.add(node.clone(), qualified, cardinality_literal(*cardinality));
                        self.add(node.clone(), owl::ON_CLASS, filler);
                    }
                    None => {
                        self.add(node.clone(), plain, cardinality_literal(*cardinality));
                    }
                }
            }
            ClassExpression::DataSomeValuesFrom { property, filler }
            | ClassExpression::DataAllValuesFrom { property, filler } => {
                let filler = self.data_range(filler);
                let predicate = if matches!(
                    expression,
                    ClassExpression::DataSomeValuesFrom { .. }
                ) {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                self.restriction(&node, property.iri().clone().into());
                self.add(node.clone(), predicate, filler);
            }
            ClassExpression::DataHasValue { property, value } => {
                self.restriction(&node, property.iri().clone().into());
                self.add(node.clone(), owl::HAS_VALUE, value.clone());
            }
            ClassExpression::DataMinCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::DataMaxCardinality {
                cardinality,
                property,
                filler,
            }
            | ClassExpression::DataExactCardinality {
                cardinality,
                property,
                filler,
            } => {
                let filler = filler.as_ref().map(|f| self.data_range(f));
                let (plain, qualified) = cardinality_predicates(expression);
                self.restriction(&node, property.iri().clone().into());
                match filler {
                    Some(filler) => {
                        self.add(node.clone(), qualified, cardinality_literal(*cardinality));
                        self.add(node.clone(), owl::ON_DATA_RANGE, filler);
                    }
                    None => {
                        self.add(node.clone(), plain, cardinality_literal(*cardinality));
                    }
                }
            }
        }
        node.into()
    }

    fn restriction(&mut self, node: &BlankNode, property: Term) {
        self.add(node.clone(), rdf::TYPE, owl::RESTRICTION);
        self.add(node.clone(), owl::ON_PROPERTY, property);
    }

    pub fn data_range(&mut self, range: &DataRange) -> Term {
        let node = BlankNode::default();
        match range {
            DataRange::Datatype(dt) => return dt.iri().clone().into(),
            DataRange::DataIntersectionOf(operands) | DataRange::DataUnionOf(operands) => {
                let items = operands
                    .iter()
                    .map(|r| self.data_range(r))
                    .collect::<Vec<_>>();
                let head = self.list(&items);
                let predicate = if matches!(range, DataRange::DataUnionOf(_)) {
                    owl::UNION_OF
                } else {
                    owl::INTERSECTION_OF
                };
                self.add(node.clone(), predicate, head);
            }
            DataRange::DataComplementOf(operand) => {
                let operand = self.data_range(operand);
                self.add(node.clone(), owl::DATATYPE_COMPLEMENT_OF, operand);
            }
            DataRange::DataOneOf(values) => {
                let items = values.iter().cloned().map(Term::from).collect::<Vec<_>>();
                let head = self.list(&items);
                self.add(node.clone(), owl::ONE_OF, head);
            }
            DataRange::DatatypeRestriction {
                datatype,
                restrictions,
            } => {
                let facets = restrictions
                    .iter()
                    .map(|r| {
                        let facet = BlankNode::default();
                        self.add(facet.clone(), r.facet.as_ref(), r.value.clone());
                        facet.into()
                    })
                    .collect::<Vec<Term>>();
                let head = self.list(&facets);
                self.add(node.clone(), owl::ON_DATATYPE, datatype.iri().clone());
                self.add(node.clone(), owl::WITH_RESTRICTIONS, head);
            }
        }
        self.add(node.clone(), rdf::TYPE, rdfs::DATATYPE);
        node.into()
    }
}

fn cardinality_predicates(
    expression: &ClassExpression) -> (NamedNodeRef<'static>, NamedNodeRef<'static>,
) {
    match expression {
        ClassExpression::ObjectMinCardinality { .. }
        | ClassExpression::DataMinCardinality { .. } => {
            (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY)
        }
        ClassExpression::ObjectMaxCardinality { .. }
        | ClassExpression::DataMaxCardinality { .. } => {
            (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY)
        }
        _ => (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
    }
}

fn cardinality_literal(cardinality: u32) -> Literal {
    Literal::new_typed_literal(cardinality.to_string(), xsd::NON_NEGATIVE_INTEGER)
}
