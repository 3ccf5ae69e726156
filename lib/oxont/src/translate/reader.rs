use crate::error::{ConversionError, OntError};
use crate::factory::ObjectKind;
use crate::graph::{Scope, read_list, to_subject};
use crate::model::{
    AnnotationProperty, AnnotationValue, ClassExpression, DataProperty, DataRange, Datatype,
    FacetRestriction, Individual, ObjectProperty, ObjectPropertyExpression, OwlClass, Wrapped,
};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{Literal, NamedNode, NamedNodeRef, Subject, Term, Triple};
use rustc_hash::FxHashSet;

/// Resolves graph nodes into model values, keeping the triples each value is read from.
///
/// Operands are always resolved in the whole import closure.
pub struct ObjectReader<'a> {
    view: ModelView<'a>,
    visiting: FxHashSet<Term>,
}

impl<'a> ObjectReader<'a> {
    pub fn new(view: ModelView<'a>) -> Self {
        Self {
            view,
            visiting: FxHashSet::default(),
        }
    }

    #[inline]
    pub fn view(&self) -> &ModelView<'a> {
        &self.view
    }

    /// The concrete kind of the node viewed as `kind`.
    fn kind_of(&self, node: &Term, kind: ObjectKind) -> Result<ObjectKind, OntError> {
        Ok(self
            .view
            .personality()
            .as_kind(node, kind, &self.view)?
            .kind())
    }

    fn named(node: &Term, kind: ObjectKind) -> Result<NamedNode, OntError> {
        match node {
            Term::NamedNode(node) => Ok(node.clone()),
            _ => Err(ConversionError::new(node.clone(), format!("a {kind} must be an IRI")).into()),
        }
    }

    fn entity<T: From<NamedNode>>(&self, node: &Term, kind: ObjectKind) -> Result<T, OntError> {
        self.kind_of(node, kind)?;
        Ok(Self::named(node, kind)?.into())
    }

    pub fn class(&self, node: &Term) -> Result<OwlClass, OntError> {
        self.entity(node, ObjectKind::Class)
    }

    pub fn datatype(&self, node: &Term) -> Result<Datatype, OntError> {
        self.entity(node, ObjectKind::Datatype)
    }

    pub fn object_property(&self, node: &Term) -> Result<ObjectProperty, OntError> {
        self.entity(node, ObjectKind::ObjectProperty)
    }

    pub fn data_property(&self, node: &Term) -> Result<DataProperty, OntError> {
        self.entity(node, ObjectKind::DataProperty)
    }

    pub fn annotation_property(&self, node: &Term) -> Result<AnnotationProperty, OntError> {
        self.entity(node, ObjectKind::AnnotationProperty)
    }

    pub fn named_individual(&self, node: &Term) -> Result<NamedNode, OntError> {
        self.entity(node, ObjectKind::NamedIndividual)
    }

    pub fn individual(&self, node: &Term) -> Result<Individual, OntError> {
        match (self.kind_of(node, ObjectKind::Individual)?, node) {
            (ObjectKind::NamedIndividual, Term::NamedNode(node)) => Ok(node.clone().into()),
            (ObjectKind::AnonymousIndividual, Term::BlankNode(node)) => Ok(node.clone().into()),
            _ => Err(ConversionError::new(node.clone(), "it is not an individual").into()),
        }
    }

    pub fn literal(&self, node: &Term) -> Result<Literal, OntError> {
        match node {
            Term::Literal(literal) => Ok(literal.clone()),
            _ => Err(ConversionError::new(node.clone(), "it is not a literal").into()),
        }
    }

    pub fn annotation_value(&self, node: &Term) -> Result<AnnotationValue, OntError> {
        AnnotationValue::from_term(node.clone()).ok_or_else(|| {
            ConversionError::new(node.clone(), "it is not an annotation value").into()
        })
    }

    /// Any IRI, used by annotation property domains and ranges.
    pub fn iri(&self, node: &Term) -> Result<NamedNode, OntError> {
        match node {
            Term::NamedNode(node) => Ok(node.clone()),
            _ => Err(ConversionError::new(node.clone(), "it is not an IRI").into()),
        }
    }

    /// Reads the RDF collection at `head`.
    pub fn list(&self, head: &Term) -> Result<Wrapped<Vec<Term>>, OntError> {
        let (items, triples) =
            read_list(self.view.graph(), Scope::Global, head.as_ref())?.into_parts();
        Ok(Wrapped::new(items, triples))
    }

    /// The single object of `node predicate ?o` and the triple it comes from.
    pub fn value(
        &self,
        node: &Term,
        predicate: NamedNodeRef<'_>,
    ) -> Result<(Term, Triple), OntError> {
        let Some(subject) = to_subject(node.clone()) else {
            return Err(ConversionError::new(node.clone(), "a literal has no property").into());
        };
        let found = self
            .view
            .find(Scope::Global, Some(subject.as_ref()), Some(predicate), None);
        match <[Triple; 1]>::try_from(found) {
            Ok([triple]) => Ok((triple.object.clone(), triple)),
            Err(found) => Err(ConversionError::new(
                node.clone(),
                format!("expected one value for {predicate}, found {}", found.len()),
            )
            .into()),
        }
    }

    fn take(
        &self,
        node: &Term,
        predicate: NamedNodeRef<'_>,
        triples: &mut Vec<Triple>,
    ) -> Result<Term, OntError> {
        let (value, triple) = self.value(node, predicate)?;
        triples.push(triple);
        Ok(value)
    }

    fn has(&self, node: &Term, predicate: NamedNodeRef<'_>) -> bool {
        self.view.has_predicate(node, predicate)
    }

    fn enter(&mut self, node: &Term) -> Result<(), OntError> {
        if self.visiting.insert(node.clone()) {
            Ok(())
        } else {
            Err(ConversionError::new(node.clone(), "the expression refers to itself").into())
        }
    }

    pub fn class_expression(&mut self, node: &Term) -> Result<Wrapped<ClassExpression>, OntError> {
        let kind = self.kind_of(node, ObjectKind::ClassExpression)?;
        if kind == ObjectKind::Class {
            return Ok(Wrapped::bare(ClassExpression::Class(
                Self::named(node, kind)?.into(),
            )));
        }
        self.enter(node)?;
        let result = self.anonymous_class_expression(node, kind);
        self.visiting.remove(node);
        result
    }

    fn anonymous_class_expression(
        &mut self,
        node: &Term,
        kind: ObjectKind,
    ) -> Result<Wrapped<ClassExpression>, OntError> {
        let mut triples = Vec::new();
        let expression = match kind {
            ObjectKind::ObjectUnionOf | ObjectKind::ObjectIntersectionOf => {
                triples.push(type_triple(node, owl::CLASS)?);
                let predicate = if kind == ObjectKind::ObjectUnionOf {
                    owl::UNION_OF
                } else {
                    owl::INTERSECTION_OF
                };
                let head = self.take(node, predicate, &mut triples)?;
                let mut operands = Vec::new();
                for item in self.list(&head)?.drain_into(&mut triples) {
                    operands.push(self.class_expression(&item)?.drain_into(&mut triples));
                }
                if kind == ObjectKind::ObjectUnionOf {
                    ClassExpression::ObjectUnionOf(operands)
                } else {
                    ClassExpression::ObjectIntersectionOf(operands)
                }
            }
            ObjectKind::ObjectComplementOf => {
                triples.push(type_triple(node, owl::CLASS)?);
                let operand = self.take(node, owl::COMPLEMENT_OF, &mut triples)?;
                let operand = self.class_expression(&operand)?.drain_into(&mut triples);
                ClassExpression::ObjectComplementOf(Box::new(operand))
            }
            ObjectKind::ObjectOneOf => {
                triples.push(type_triple(node, owl::CLASS)?);
                let head = self.take(node, owl::ONE_OF, &mut triples)?;
                let individuals = self
                    .list(&head)?
                    .drain_into(&mut triples)
                    .iter()
                    .map(|item| self.individual(item))
                    .collect::<Result<Vec<_>, _>>()?;
                ClassExpression::ObjectOneOf(individuals)
            }
            _ => return self.restriction(node, kind),
        };
        Ok(Wrapped::new(expression, triples))
    }

    fn restriction(
        &mut self,
        node: &Term,
        kind: ObjectKind,
    ) -> Result<Wrapped<ClassExpression>, OntError> {
        let mut triples = vec![type_triple(node, owl::RESTRICTION)?];
        let property = self.take(node, owl::ON_PROPERTY, &mut triples)?;
        let expression = match kind {
            ObjectKind::ObjectSomeValuesFrom | ObjectKind::ObjectAllValuesFrom => {
                let property = self
                    .object_property_expression(&property)?
                    .drain_into(&mut triples);
                let predicate = if kind == ObjectKind::ObjectSomeValuesFrom {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                let filler = self.take(node, predicate, &mut triples)?;
                let filler = Box::new(self.class_expression(&filler)?.drain_into(&mut triples));
                if kind == ObjectKind::ObjectSomeValuesFrom {
                    ClassExpression::ObjectSomeValuesFrom { property, filler }
                } else {
                    ClassExpression::ObjectAllValuesFrom { property, filler }
                }
            }
            ObjectKind::ObjectHasValue => ClassExpression::ObjectHasValue {
                property: self
                    .object_property_expression(&property)?
                    .drain_into(&mut triples),
                individual: {
                    let value = self.take(node, owl::HAS_VALUE, &mut triples)?;
                    self.individual(&value)?
                },
            },
            ObjectKind::ObjectHasSelf => {
                self.take(node, owl::HAS_SELF, &mut triples)?;
                ClassExpression::ObjectHasSelf(
                    self.object_property_expression(&property)?
                        .drain_into(&mut triples),
                )
            }
            ObjectKind::ObjectMinCardinality
            | ObjectKind::ObjectMaxCardinality
            | ObjectKind::ObjectExactCardinality => {
                let property = self
                    .object_property_expression(&property)?
                    .drain_into(&mut triples);
                let (plain, qualified) = cardinality_predicates(kind);
                let (cardinality, filler) = if self.has(node, qualified) {
                    let cardinality = self.cardinality(node, qualified, &mut triples)?;
                    let filler = self.take(node, owl::ON_CLASS, &mut triples)?;
                    let filler = self.class_expression(&filler)?.drain_into(&mut triples);
                    (cardinality, Some(Box::new(filler)))
                } else {
                    (self.cardinality(node, plain, &mut triples)?, None)
                };
                match kind {
                    ObjectKind::ObjectMinCardinality => ClassExpression::ObjectMinCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    ObjectKind::ObjectMaxCardinality => ClassExpression::ObjectMaxCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    _ => ClassExpression::ObjectExactCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                }
            }
            ObjectKind::DataSomeValuesFrom | ObjectKind::DataAllValuesFrom => {
                let property = self.data_property(&property)?;
                let predicate = if kind == ObjectKind::DataSomeValuesFrom {
                    owl::SOME_VALUES_FROM
                } else {
                    owl::ALL_VALUES_FROM
                };
                let filler = self.take(node, predicate, &mut triples)?;
                let filler = self.data_range(&filler)?.drain_into(&mut triples);
                if kind == ObjectKind::DataSomeValuesFrom {
                    ClassExpression::DataSomeValuesFrom { property, filler }
                } else {
                    ClassExpression::DataAllValuesFrom { property, filler }
                }
            }
            ObjectKind::DataHasValue => ClassExpression::DataHasValue {
                property: self.data_property(&property)?,
                value: {
                    let value = self.take(node, owl::HAS_VALUE, &mut triples)?;
                    self.literal(&value)?
                },
            },
            ObjectKind::DataMinCardinality
            | ObjectKind::DataMaxCardinality
            | ObjectKind::DataExactCardinality => {
                let property = self.data_property(&property)?;
                let (plain, qualified) = cardinality_predicates(kind);
                let (cardinality, filler) = if self.has(node, qualified) {
                    let cardinality = self.cardinality(node, qualified, &mut triples)?;
                    let filler = self.take(node, owl::ON_DATA_RANGE, &mut triples)?;
                    (cardinality, Some(self.data_range(&filler)?.drain_into(&mut triples)))
                } else {
                    (self.cardinality(node, plain, &mut triples)?, None)
                };
                match kind {
                    ObjectKind::DataMinCardinality => ClassExpression::DataMinCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    ObjectKind::DataMaxCardinality => ClassExpression::DataMaxCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                    _ => ClassExpression::DataExactCardinality {
                        cardinality,
                        property,
                        filler,
                    },
                }
            }
            _ => {
                return Err(ConversionError::new(
                    node.clone(),
                    format!("{kind} is not a class expression"),
                )
                .into());
            }
        };
        Ok(Wrapped::new(expression, triples))
    }

    fn cardinality(
        &self,
        node: &Term,
        predicate: NamedNodeRef<'_>,
        triples: &mut Vec<Triple>,
    ) -> Result<u32, OntError> {
        let value = self.take(node, predicate, triples)?;
        self.literal(&value)?
            .value()
            .parse()
            .map_err(|_| ConversionError::new(value, "it is not a valid cardinality").into())
    }

    pub fn data_range(&mut self, node: &Term) -> Result<Wrapped<DataRange>, OntError> {
        let kind = self.kind_of(node, ObjectKind::DataRange)?;
        if kind == ObjectKind::Datatype {
            return Ok(Wrapped::bare(DataRange::Datatype(Self::named(node, kind)?.into())));
        }
        self.enter(node)?;
        let result = self.anonymous_data_range(node, kind);
        self.visiting.remove(node);
        result
    }

    fn anonymous_data_range(
        &mut self,
        node: &Term,
        kind: ObjectKind,
    ) -> Result<Wrapped<DataRange>, OntError> {
        let mut triples = vec![type_triple(node, rdfs::DATATYPE)?];
        let range = match kind {
            ObjectKind::DataUnionOf | ObjectKind::DataIntersectionOf => {
                let predicate = if kind == ObjectKind::DataUnionOf {
                    owl::UNION_OF
                } else {
                    owl::INTERSECTION_OF
                };
                let head = self.take(node, predicate, &mut triples)?;
                let mut operands = Vec::new();
                for item in self.list(&head)?.drain_into(&mut triples) {
                    operands.push(self.data_range(&item)?.drain_into(&mut triples));
                }
                if kind == ObjectKind::DataUnionOf {
                    DataRange::DataUnionOf(operands)
                } else {
                    DataRange::DataIntersectionOf(operands)
                }
            }
            ObjectKind::DataComplementOf => {
                let operand = self.take(node, owl::DATATYPE_COMPLEMENT_OF, &mut triples)?;
                DataRange::DataComplementOf(Box::new(
                    self.data_range(&operand)?.drain_into(&mut triples),
                ))
            }
            ObjectKind::DataOneOf => {
                let head = self.take(node, owl::ONE_OF, &mut triples)?;
                let values = self
                    .list(&head)?
                    .drain_into(&mut triples)
                    .iter()
                    .map(|item| self.literal(item))
                    .collect::<Result<Vec<_>, _>>()?;
                DataRange::DataOneOf(values)
            }
            ObjectKind::DatatypeRestriction => {
                let datatype = self.take(node, owl::ON_DATATYPE, &mut triples)?;
                let datatype = self.datatype(&datatype)?;
                let head = self.take(node, owl::WITH_RESTRICTIONS, &mut triples)?;
                let mut restrictions = Vec::new();
                for item in self.list(&head)?.drain_into(&mut triples) {
                    restrictions.push(self.facet_restriction(&item, &mut triples)?);
                }
                DataRange::DatatypeRestriction {
                    datatype,
                    restrictions,
                }
            }
            _ => {
                return Err(
                    ConversionError::new(node.clone(), format!("{kind} is not a data range"))
                        .into(),
                );
            }
        };
        Ok(Wrapped::new(range, triples))
    }

    fn facet_restriction(
        &self,
        node: &Term,
        triples: &mut Vec<Triple>,
    ) -> Result<FacetRestriction, OntError> {
        let Some(subject) = to_subject(node.clone()) else {
            return Err(
                ConversionError::new(node.clone(), "a facet restriction can't be a literal").into(),
            );
        };
        let found = self.view.find(Scope::Global, Some(subject.as_ref()), None, None);
        let Ok([triple]) = <[Triple; 1]>::try_from(found) else {
            return Err(ConversionError::new(
                node.clone(),
                "a facet restriction has exactly one facet",
            )
            .into());
        };
        let restriction = FacetRestriction {
            facet: triple.predicate.clone(),
            value: self.literal(&triple.object)?,
        };
        triples.push(triple);
        Ok(restriction)
    }

    pub fn object_property_expression(
        &mut self,
        node: &Term,
    ) -> Result<Wrapped<ObjectPropertyExpression>, OntError> {
        match self.kind_of(node, ObjectKind::ObjectPropertyExpression)? {
            ObjectKind::InverseObjectProperty => {
                let mut triples = Vec::new();
                let property = self.take(node, owl::INVERSE_OF, &mut triples)?;
                Ok(Wrapped::new(
                    ObjectPropertyExpression::InverseObjectProperty(
                        self.object_property(&property)?,
                    ),
                    triples,
                ))
            }
            kind => Ok(Wrapped::bare(ObjectPropertyExpression::ObjectProperty(
                Self::named(node, kind)?.into(),
            ))),
        }
    }
}

pub(crate) fn cardinality_predicates(
    kind: ObjectKind,
) -> (NamedNodeRef<'static>, NamedNodeRef<'static>) {
    match kind {
        ObjectKind::ObjectMinCardinality | ObjectKind::DataMinCardinality => {
            (owl::MIN_CARDINALITY, owl::MIN_QUALIFIED_CARDINALITY)
        }
        ObjectKind::ObjectMaxCardinality | ObjectKind::DataMaxCardinality => {
            (owl::MAX_CARDINALITY, owl::MAX_QUALIFIED_CARDINALITY)
        }
        _ => (owl::CARDINALITY, owl::QUALIFIED_CARDINALITY),
    }
}

/// The `node rdf:type rdf_type` triple.
pub(crate) fn type_triple(node: &Term, rdf_type: NamedNodeRef<'_>) -> Result<Triple, OntError> {
    let subject: Subject = to_subject(node.clone())
        .ok_or_else(|| ConversionError::new(node.clone(), "a literal can't be typed"))?;
    Ok(Triple::new(subject, rdf::TYPE, rdf_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OntConfig;
    use crate::factory::Personality;
    use crate::graph::{SharedGraph, UnionGraph};
    use crate::model::EntityType;
    use oxrdf::BlankNode;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn declare(graph: &SharedGraph, name: &str, entity_type: EntityType) {
        graph.insert(&Triple::new(iri(name), rdf::TYPE, entity_type.rdf_type()));
    }

    #[test]
    fn reads_qualified_cardinality() {
        let graph = SharedGraph::new();
        declare(&graph, "p", EntityType::ObjectProperty);
        declare(&graph, "C", EntityType::Class);
        let r = BlankNode::default();
        for triple in [
            Triple::new(r.clone(), rdf::TYPE, owl::RESTRICTION),
            Triple::new(r.clone(), owl::ON_PROPERTY, iri("p")),
            Triple::new(
                r.clone(),
                owl::MIN_QUALIFIED_CARDINALITY,
                Literal::new_typed_literal("2", oxrdf::vocab::xsd::NON_NEGATIVE_INTEGER),
            ),
            Triple::new(r.clone(), owl::ON_CLASS, iri("C")),
        ] {
            graph.insert(&triple);
        }
        let union = UnionGraph::new(graph);
        let personality = Personality::new(Default::default());
        let config = OntConfig::default();
        let mut reader = ObjectReader::new(ModelView::new(&union, &personality, &config));
        let expression = reader.class_expression(&r.into()).unwrap();
        assert_eq!(
            expression.value,
            ClassExpression::ObjectMinCardinality {
                cardinality: 2,
                property: ObjectProperty::new(iri("p")).into(),
                filler: Some(Box::new(ClassExpression::class(OwlClass::new(iri("C"))))),
            }
        );
        assert_eq!(expression.triples.len(), 4);
    }

    #[test]
    fn rejects_undeclared_class() {
        let union = UnionGraph::new(SharedGraph::new());
        let personality = Personality::new(Default::default());
        let config = OntConfig::default();
        let mut reader = ObjectReader::new(ModelView::new(&union, &personality, &config));
        assert!(matches!(
            reader.class_expression(&iri("Undeclared").into()),
            Err(OntError::Conversion(_))
        ));
        assert!(reader.class_expression(&owl::THING.into_owned().into()).is_ok());
    }
}
