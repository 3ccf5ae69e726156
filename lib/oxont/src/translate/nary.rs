//! Axioms over a set or a list of operands.
//!
//! Disjointness and difference axioms have two encodings: a binary triple (`C owl:disjointWith D`)
//! or a typed blank node listing its members (`_:x rdf:type owl:AllDisjointClasses`). Both are
//! read, two operands are written as a binary triple and more as the collection form.
//! Disjoint unions, property chains and keys always hang a list off a subject.

use crate::error::OntError;
use crate::factory::ObjectKind;
use crate::graph::{Scope, is_iri, read_list};
use crate::model::{Axiom, AxiomType, DataProperty, ObjectPropertyExpression, Operands, Wrapped};
use crate::translate::{
    AxiomTranslator, ObjectReader, ObjectWriter, claimed_by, subject_is, subject_term, unexpected,
    with_predicate, with_type,
};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedNodeRef, Subject, Term, Triple};

#[derive(Debug)]
pub(super) struct NaryTranslator {
    axiom_type: AxiomType,
    binary: NamedNodeRef<'static>,
    collection: NamedNodeRef<'static>,
    /// Accepted member predicates, the first one is written.
    members: &'static [NamedNodeRef<'static>],
    operand: ObjectKind,
    yields_to: &'static [AxiomType],
}

pub(super) static DISJOINT_CLASSES: NaryTranslator = NaryTranslator {
    axiom_type: AxiomType::DisjointClasses,
    binary: owl::DISJOINT_WITH,
    collection: owl::ALL_DISJOINT_CLASSES,
    members: &[owl::MEMBERS],
    operand: ObjectKind::ClassExpression,
    yields_to: &[],
};

pub(super) static DISJOINT_OBJECT_PROPERTIES: NaryTranslator = NaryTranslator {
    axiom_type: AxiomType::DisjointObjectProperties,
    binary: owl::PROPERTY_DISJOINT_WITH,
    collection: owl::ALL_DISJOINT_PROPERTIES,
    members: &[owl::MEMBERS],
    operand: ObjectKind::ObjectPropertyExpression,
    yields_to: &[],
};

pub(super) static DISJOINT_DATA_PROPERTIES: NaryTranslator = NaryTranslator {
    axiom_type: AxiomType::DisjointDataProperties,
    binary: owl::PROPERTY_DISJOINT_WITH,
    collection: owl::ALL_DISJOINT_PROPERTIES,
    members: &[owl::MEMBERS],
    operand: ObjectKind::DataProperty,
    yields_to: &[AxiomType::DisjointObjectProperties],
};

pub(super) static DIFFERENT_INDIVIDUALS: NaryTranslator = NaryTranslator {
    axiom_type: AxiomType::DifferentIndividuals,
    binary: owl::DIFFERENT_FROM,
    collection: owl::ALL_DIFFERENT,
    members: &[owl::DISTINCT_MEMBERS, owl::MEMBERS],
    operand: ObjectKind::Individual,
    yields_to: &[],
};

impl NaryTranslator {
    /// The member list of a collection node, if there is exactly one.
    fn member_list(&self, node: &Term, view: &ModelView<'_>) -> Option<Term> {
        let mut heads = self
            .members
            .iter()
            .flat_map(|p| view.objects(node, *p));
        let head = heads.next()?;
        heads.next().is_none().then_some(head)
    }

    fn is_collection(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        if triple.predicate != rdf::TYPE
            || !is_iri(&triple.object, self.collection)
            || !matches!(triple.subject, Subject::BlankNode(_))
        {
            return false;
        }
        let Some(head) = self.member_list(&subject_term(triple), view) else {
            return false;
        };
        // a broken list is still claimed so that reading it reports the corruption
        let Ok(list) = read_list(view.graph(), Scope::Global, head.as_ref()) else {
            return true;
        };
        list.len() >= 2 && list.items().iter().all(|item| view.can_as(item, self.operand))
    }

    fn read_operands(
        &self,
        nodes: &[Term],
        reader: &mut ObjectReader<'_>,
        triples: &mut Vec<Triple>,
    ) -> Result<Axiom, OntError> {
        Ok(match self.axiom_type {
            AxiomType::DisjointClasses => {
                let mut classes = Vec::with_capacity(nodes.len());
                for node in nodes {
                    classes.push(reader.class_expression(node)?.drain_into(triples));
                }
                Axiom::DisjointClasses(Operands::new(classes))
            }
            AxiomType::DisjointObjectProperties => {
                let mut properties = Vec::with_capacity(nodes.len());
                for node in nodes {
                    properties.push(reader.object_property_expression(node)?.drain_into(triples));
                }
                Axiom::DisjointObjectProperties(Operands::new(properties))
            }
            AxiomType::DisjointDataProperties => Axiom::DisjointDataProperties(Operands::new(
                nodes
                    .iter()
                    .map(|node| reader.data_property(node))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            AxiomType::DifferentIndividuals => Axiom::DifferentIndividuals(Operands::new(
                nodes
                    .iter()
                    .map(|node| reader.individual(node))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            axiom_type => {
                return Err(OntError::InvalidAxiom(format!(
                    "{axiom_type} is not a disjointness axiom"
                )));
            }
        })
    }
}

impl AxiomTranslator for NaryTranslator {
    fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        Box::new(
            with_predicate(view, scope, self.binary).chain(with_type(view, scope, self.collection)),
        )
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        let shape = if triple.predicate == self.binary {
            subject_is(triple, view, self.operand) && view.can_as(&triple.object, self.operand)
        } else {
            self.is_collection(triple, view)
        };
        shape && !claimed_by(triple, view, self.yields_to)
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        let mut triples = vec![triple.clone()];
        let subject = subject_term(triple);
        let nodes = if triple.predicate == self.binary {
            vec![subject, triple.object.clone()]
        } else {
            let head = self.member_list(&subject, reader.view()).ok_or_else(|| {
                OntError::InvalidAxiom(format!("{subject} has no single member list"))
            })?;
            let predicate = self
                .members
                .iter()
                .copied()
                .find(|p| reader.view().objects(&subject, *p).contains(&head))
                .unwrap_or(self.members[0]);
            let (_, member_triple) = reader.value(&subject, predicate)?;
            triples.push(member_triple);
            reader.list(&head)?.drain_into(&mut triples)
        };
        let axiom = self.read_operands(&nodes, reader, &mut triples)?;
        Ok(Wrapped::new(axiom, triples))
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        let operands = match (self.axiom_type, axiom) {
            (AxiomType::DisjointClasses, Axiom::DisjointClasses(classes)) => classes
                .iter()
                .map(|c| writer.class_expression(c))
                .collect::<Vec<_>>(),
            (AxiomType::DisjointObjectProperties, Axiom::DisjointObjectProperties(properties)) => {
                properties
                    .iter()
                    .map(|p| writer.object_property_expression(p))
                    .collect()
            }
            (AxiomType::DisjointDataProperties, Axiom::DisjointDataProperties(properties)) => {
                properties
                    .iter()
                    .map(|p| Term::from(p.iri().clone()))
                    .collect()
            }
            (AxiomType::DifferentIndividuals, Axiom::DifferentIndividuals(individuals)) => {
                individuals.iter().map(|i| i.to_term()).collect()
            }
            _ => return Err(unexpected(self.axiom_type, axiom)),
        };
        match operands.as_slice() {
            [first, second] => Ok(vec![writer.add_term(first, self.binary, second.clone())?]),
            [_, _, ..] => {
                let node = BlankNode::default();
                let head = writer.list(&operands);
                writer.add(node.clone(), self.members[0], head);
                Ok(vec![writer.add(node, rdf::TYPE, self.collection)])
            }
            _ => Err(OntError::InvalidAxiom(format!(
                "{} needs at least two operands",
                self.axiom_type
            ))),
        }
    }
}

/// `S p (x1 ... xn)`: an axiom defined by a subject and an RDF list.
#[derive(Debug)]
pub(super) struct ListTranslator {
    axiom_type: AxiomType,
    predicate: NamedNodeRef<'static>,
    subject: ObjectKind,
    min_items: usize,
}

pub(super) static DISJOINT_UNION: ListTranslator = ListTranslator {
    axiom_type: AxiomType::DisjointUnion,
    predicate: owl::DISJOINT_UNION_OF,
    subject: ObjectKind::Class,
    min_items: 2,
};

pub(super) static SUB_PROPERTY_CHAIN_OF: ListTranslator = ListTranslator {
    axiom_type: AxiomType::SubPropertyChainOf,
    predicate: owl::PROPERTY_CHAIN_AXIOM,
    subject: ObjectKind::ObjectPropertyExpression,
    min_items: 2,
};

pub(super) static HAS_KEY: ListTranslator = ListTranslator {
    axiom_type: AxiomType::HasKey,
    predicate: owl::HAS_KEY,
    subject: ObjectKind::ClassExpression,
    min_items: 1,
};

impl ListTranslator {
    fn accepts_item(&self, item: &Term, view: &ModelView<'_>) -> bool {
        match self.axiom_type {
            AxiomType::DisjointUnion => view.can_as(item, ObjectKind::ClassExpression),
            AxiomType::SubPropertyChainOf => {
                view.can_as(item, ObjectKind::ObjectPropertyExpression)
            }
            _ => {
                view.can_as(item, ObjectKind::ObjectPropertyExpression)
                    || view.can_as(item, ObjectKind::DataProperty)
            }
        }
    }

    fn write_items(
        &self,
        writer: &mut ObjectWriter<'_>,
        subject: Term,
        items: &[Term],
    ) -> Result<Vec<Triple>, OntError> {
        if items.len() < self.min_items {
            return Err(OntError::InvalidAxiom(format!(
                "{} needs at least {} operands",
                self.axiom_type, self.min_items
            )));
        }
        let head = writer.list(items);
        Ok(vec![writer.add_term(&subject, self.predicate, head)?])
    }
}

impl AxiomTranslator for ListTranslator {
    fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>> {
        Box::new(with_predicate(view, scope, self.predicate))
    }

    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        if triple.predicate != self.predicate || !subject_is(triple, view, self.subject) {
            return false;
        }
        let Ok(list) = read_list(view.graph(), Scope::Global, triple.object.as_ref()) else {
            return true;
        };
        list.len() >= self.min_items
            && list.items().iter().all(|item| self.accepts_item(item, view))
    }

    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError> {
        let mut triples = vec![triple.clone()];
        let subject = subject_term(triple);
        let items = reader.list(&triple.object)?.drain_into(&mut triples);
        let axiom = match self.axiom_type {
            AxiomType::DisjointUnion => {
                let class = reader.class(&subject)?;
                let mut classes = Vec::with_capacity(items.len());
                for item in &items {
                    classes.push(reader.class_expression(item)?.drain_into(&mut triples));
                }
                Axiom::DisjointUnion {
                    class,
                    disjoint_classes: Operands::new(classes),
                }
            }
            AxiomType::SubPropertyChainOf => {
                let super_property = reader
                    .object_property_expression(&subject)?
                    .drain_into(&mut triples);
                let mut property_chain = Vec::with_capacity(items.len());
                for item in &items {
                    property_chain.push(
                        reader
                            .object_property_expression(item)?
                            .drain_into(&mut triples),
                    );
                }
                Axiom::SubPropertyChainOf {
                    property_chain,
                    super_property,
                }
            }
            AxiomType::HasKey => {
                let class = reader.class_expression(&subject)?.drain_into(&mut triples);
                let mut object_properties = Operands::default();
                let mut data_properties = Operands::default();
                for item in &items {
                    if reader
                        .view()
                        .can_as(item, ObjectKind::ObjectPropertyExpression)
                    {
                        object_properties.insert(
                            reader.object_property_expression(item)?.drain_into(&mut triples),
                        );
                    } else {
                        data_properties.insert(reader.data_property(item)?);
                    }
                }
                Axiom::HasKey {
                    class,
                    object_properties,
                    data_properties,
                }
            }
            axiom_type => {
                return Err(OntError::InvalidAxiom(format!(
                    "{axiom_type} is not defined by a list"
                )));
            }
        };
        Ok(Wrapped::new(axiom, triples))
    }

    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>) -> Result<Vec<Triple>, OntError> {
        match (self.axiom_type, axiom) {
            (
                AxiomType::DisjointUnion,
                Axiom::DisjointUnion {
                    class,
                    disjoint_classes,
                },
            ) => {
                let items = disjoint_classes
                    .iter()
                    .map(|c| writer.class_expression(c))
                    .collect::<Vec<_>>();
                self.write_items(writer, class.iri().clone().into(), &items)
            }
            (
                AxiomType::SubPropertyChainOf,
                Axiom::SubPropertyChainOf {
                    property_chain,
                    super_property,
                },
            ) => {
                let subject = writer.object_property_expression(super_property);
                let items = property_chain
                    .iter()
                    .map(|p| writer.object_property_expression(p))
                    .collect::<Vec<_>>();
                self.write_items(writer, subject, &items)
            }
            (
                AxiomType::HasKey,
                Axiom::HasKey {
                    class,
                    object_properties,
                    data_properties,
                },
            ) => {
                let subject = writer.class_expression(class);
                let items = object_properties
                    .iter()
                    .map(|p: &ObjectPropertyExpression| writer.object_property_expression(p))
                    .chain(
                        data_properties
                            .iter()
                            .map(|p: &DataProperty| Term::from(p.iri().clone())),
                    )
                    .collect::<Vec<_>>();
                self.write_items(writer, subject, &items)
            }
            _ => Err(unexpected(self.axiom_type, axiom)),
        }
    }
}
