//! Every axiom type written to a graph and read back.

use oxont::graph::SharedGraph;
use oxont::model::{
    AnnotatedAxiom, Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom,
    AxiomType, ClassExpression, DataProperty, DataRange, Datatype, Entity, EntityType,
    FacetRestriction, Individual, ObjectProperty, ObjectPropertyExpression, OwlClass,
};
use oxont::vocab::owl;
use oxont::{OntConfig, Ontology, Scope};
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{Literal, NamedNode, NamedNodeRef, Triple, TripleRef};

fn iri(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{name}"))
}

fn class(name: &str) -> ClassExpression {
    ClassExpression::class(OwlClass::new(iri(name)))
}

fn object_property(name: &str) -> ObjectPropertyExpression {
    ObjectProperty::new(iri(name)).into()
}

fn data_property(name: &str) -> DataProperty {
    DataProperty::new(iri(name))
}

fn annotation_property(name: &str) -> AnnotationProperty {
    AnnotationProperty::new(iri(name))
}

fn individual(name: &str) -> Individual {
    iri(name).into()
}

fn integer(value: &str) -> Literal {
    Literal::new_typed_literal(value, xsd::INTEGER)
}

fn comment(text: &str) -> Annotation {
    Annotation::new(AnnotationProperty::new(rdfs::COMMENT.into_owned()), Literal::from(text))
}

/// An ontology where every entity used by the samples is declared.
fn declared(config: OntConfig) -> Ontology {
    let mut ontology = Ontology::new(config);
    let declarations: [(EntityType, &[&str]); 6] = [
        (EntityType::Class, &["A", "B", "C"]),
        (EntityType::ObjectProperty, &["p", "q", "r"]),
        (EntityType::DataProperty, &["d", "e"]),
        (EntityType::AnnotationProperty, &["note", "alt"]),
        (EntityType::Datatype, &["Age"]),
        (EntityType::NamedIndividual, &["i", "j", "k"]),
    ];
    for (entity_type, names) in declarations {
        for name in names {
            let declaration = Axiom::declaration(Entity::new(entity_type, iri(name)));
            assert!(ontology.add_axiom(declaration).unwrap());
        }
    }
    ontology
}

fn samples() -> Vec<AnnotatedAxiom> {
    let axioms = vec![
        Axiom::declaration(Entity::new(EntityType::Class, iri("Extra"))),
        Axiom::subclass_of(class("A"), class("B")),
        Axiom::subclass_of(
            class("A"),
            ClassExpression::ObjectMinCardinality {
                cardinality: 2,
                property: object_property("p"),
                filler: Some(Box::new(class("B"))),
            },
        ),
        Axiom::subclass_of(
            class("A"),
            ClassExpression::DataSomeValuesFrom {
                property: data_property("d"),
                filler: DataRange::datatype(Datatype::new(xsd::STRING.into_owned())),
            },
        ),
        Axiom::subclass_of(
            ClassExpression::intersection(vec![class("A"), class("B")]),
            class("C"),
        ),
        Axiom::equivalent_classes([
            class("A"),
            ClassExpression::union(vec![class("B"), class("C")]),
        ]),
        Axiom::equivalent_classes([
            class("A"),
            ClassExpression::ObjectHasValue {
                property: object_property("p"),
                individual: individual("i"),
            },
        ]),
        Axiom::disjoint_classes([class("A"), class("B")]),
        Axiom::DisjointUnion {
            class: OwlClass::new(iri("A")),
            disjoint_classes: [class("B"), class("C")].into_iter().collect(),
        },
        Axiom::SubObjectPropertyOf {
            sub_property: object_property("p"),
            super_property: object_property("q"),
        },
        Axiom::SubPropertyChainOf {
            property_chain: vec![object_property("p"), object_property("q")],
            super_property: object_property("r"),
        },
        Axiom::EquivalentObjectProperties(
            [object_property("p"), object_property("q")].into_iter().collect(),
        ),
        Axiom::DisjointObjectProperties(
            [object_property("p"), object_property("q")].into_iter().collect(),
        ),
        Axiom::InverseObjectProperties(object_property("p"), object_property("q")),
        Axiom::ObjectPropertyDomain {
            property: object_property("p"),
            domain: class("A"),
        },
        Axiom::ObjectPropertyRange {
            property: object_property("p"),
            range: class("B"),
        },
        Axiom::FunctionalObjectProperty(object_property("p")),
        Axiom::InverseFunctionalObjectProperty(object_property("p")),
        Axiom::ReflexiveObjectProperty(object_property("p")),
        Axiom::IrreflexiveObjectProperty(object_property("p")),
        Axiom::SymmetricObjectProperty(object_property("p")),
        Axiom::AsymmetricObjectProperty(object_property("p")),
        Axiom::TransitiveObjectProperty(object_property("p")),
        Axiom::SubDataPropertyOf {
            sub_property: data_property("d"),
            super_property: data_property("e"),
        },
        Axiom::EquivalentDataProperties(
            [data_property("d"), data_property("e")].into_iter().collect(),
        ),
        Axiom::DisjointDataProperties(
            [data_property("d"), data_property("e")].into_iter().collect(),
        ),
        Axiom::DataPropertyDomain {
            property: data_property("d"),
            domain: class("A"),
        },
        Axiom::DataPropertyRange {
            property: data_property("d"),
            range: DataRange::datatype(Datatype::new(xsd::INTEGER.into_owned())),
        },
        Axiom::FunctionalDataProperty(data_property("d")),
        Axiom::DatatypeDefinition {
            datatype: Datatype::new(iri("Age")),
            data_range: DataRange::DatatypeRestriction {
                datatype: Datatype::new(xsd::INTEGER.into_owned()),
                restrictions: vec![FacetRestriction {
                    facet: NamedNode::new_unchecked(
                        "http://www.w3.org/2001/XMLSchema#minInclusive",
                    ),
                    value: integer("0"),
                }],
            },
        },
        Axiom::HasKey {
            class: class("A"),
            object_properties: [object_property("p")].into_iter().collect(),
            data_properties: [data_property("d")].into_iter().collect(),
        },
        Axiom::class_assertion(class("A"), iri("i")),
        Axiom::class_assertion(ClassExpression::complement(class("B")), iri("j")),
        Axiom::ObjectPropertyAssertion {
            property: ObjectProperty::new(iri("p")),
            source: individual("i"),
            target: individual("j"),
        },
        Axiom::NegativeObjectPropertyAssertion {
            property: object_property("p"),
            source: individual("i"),
            target: individual("k"),
        },
        Axiom::DataPropertyAssertion {
            property: data_property("d"),
            source: individual("i"),
            target: integer("42"),
        },
        Axiom::NegativeDataPropertyAssertion {
            property: data_property("d"),
            source: individual("j"),
            target: integer("7"),
        },
        Axiom::SameIndividual([individual("i"), individual("j")].into_iter().collect()),
        Axiom::DifferentIndividuals(
            [individual("i"), individual("j"), individual("k")]
                .into_iter()
                .collect(),
        ),
        Axiom::AnnotationAssertion {
            property: annotation_property("note"),
            subject: AnnotationSubject::Iri(iri("A")),
            value: AnnotationValue::Literal(Literal::new_language_tagged_literal_unchecked(
                "a note", "en",
            )),
        },
        Axiom::SubAnnotationPropertyOf {
            sub_property: annotation_property("note"),
            super_property: annotation_property("alt"),
        },
        Axiom::AnnotationPropertyDomain {
            property: annotation_property("note"),
            domain: iri("A"),
        },
        Axiom::AnnotationPropertyRange {
            property: annotation_property("note"),
            range: xsd::STRING.into_owned(),
        },
    ];
    let mut samples = axioms
        .into_iter()
        .map(AnnotatedAxiom::new)
        .collect::<Vec<_>>();
    // reified and directly annotated forms
    samples.push(
        AnnotatedAxiom::new(Axiom::subclass_of(
            class("A"),
            ClassExpression::some_values_from(ObjectProperty::new(iri("p")), class("B")),
        ))
        .with_annotation(comment("every A has a B")),
    );
    samples.push(
        AnnotatedAxiom::new(Axiom::disjoint_classes([class("A"), class("B"), class("C")]))
            .with_annotation(comment("pairwise disjoint"))
            .with_annotation(Annotation::new(annotation_property("note"), iri("B"))),
    );
    samples
}

#[test]
fn every_axiom_type_has_a_sample() {
    let samples = samples();
    for axiom_type in AxiomType::ALL {
        assert!(
            samples.iter().any(|s| s.axiom_type() == axiom_type),
            "no sample for {axiom_type}"
        );
    }
}

#[test]
fn written_axioms_are_read_back() {
    for config in [
        OntConfig::default(),
        OntConfig::default().with_cache_content(false),
    ] {
        for sample in samples() {
            let mut ontology = declared(config.clone());
            assert!(ontology.add_axiom(sample.clone()).unwrap(), "{sample:?}");
            assert!(
                ontology.contains_axiom(&sample, Scope::Local).unwrap(),
                "{sample:?} is not found"
            );
            let read = ontology
                .axioms_by_type(sample.axiom_type(), Scope::Local)
                .unwrap();
            if sample.axiom_type() == AxiomType::Declaration {
                assert!(read.contains(&sample));
            } else {
                assert_eq!(read, vec![sample.clone()]);
            }
            // a second write is a no-op
            let len = ontology.graph().base().len();
            assert!(!ontology.add_axiom(sample.clone()).unwrap());
            assert_eq!(ontology.graph().base().len(), len);
        }
    }
}

#[test]
fn removal_erases_the_written_triples() {
    for sample in samples() {
        let mut ontology = declared(OntConfig::default());
        let before = ontology.graph().base().triples();
        ontology.add_axiom(sample.clone()).unwrap();
        assert!(ontology.remove_axiom(&sample).unwrap(), "{sample:?}");
        assert!(!ontology.contains_axiom(&sample, Scope::Local).unwrap());
        let mut after = ontology.graph().base().triples();
        let mut before = before;
        after.sort_by_key(ToString::to_string);
        before.sort_by_key(ToString::to_string);
        assert_eq!(after, before, "{sample:?} left statements behind");
    }
}

#[test]
fn removal_needs_the_exact_annotations() {
    let mut ontology = declared(OntConfig::default());
    let annotated = AnnotatedAxiom::new(Axiom::subclass_of(class("A"), class("B")))
        .with_annotation(comment("kept"));
    ontology.add_axiom(annotated.clone()).unwrap();
    let bare = AnnotatedAxiom::new(annotated.axiom.clone());
    assert!(!ontology.contains_axiom(&bare, Scope::Local).unwrap());
    assert!(!ontology.remove_axiom(&bare).unwrap());
    assert!(ontology.contains_axiom(&annotated, Scope::Local).unwrap());
}

#[test]
fn subclass_removal_keeps_the_declarations() {
    let graph = SharedGraph::new();
    graph.extend(&[
        Triple::new(iri("a"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("b"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("a"), rdfs::SUB_CLASS_OF, iri("b")),
    ]);
    let mut ontology = Ontology::from_graph(graph.clone(), OntConfig::default());

    let axioms = ontology
        .axioms_by_type(AxiomType::SubClassOf, Scope::Local)
        .unwrap();
    let expected = AnnotatedAxiom::new(Axiom::subclass_of(class("a"), class("b")));
    assert_eq!(axioms, vec![expected.clone()]);

    assert!(ontology.remove_axiom(&expected).unwrap());
    assert!(!graph.contains(TripleRef::new(
        NamedNodeRef::new_unchecked("http://example.com/a"),
        rdfs::SUB_CLASS_OF,
        NamedNodeRef::new_unchecked("http://example.com/b"),
    )));
    for name in ["http://example.com/a", "http://example.com/b"] {
        assert!(graph.contains(TripleRef::new(
            NamedNodeRef::new_unchecked(name),
            rdf::TYPE,
            owl::CLASS,
        )));
    }
    assert_eq!(graph.len(), 2);
}

#[test]
fn three_disjoint_classes_are_written_as_one_collection() {
    let mut ontology = declared(OntConfig::default());
    let base = ontology.graph().base().clone();
    let before = base.len();
    let axiom = Axiom::disjoint_classes([class("A"), class("B"), class("C")]);
    ontology.add_axiom(axiom).unwrap();

    // one typed node, its members link and a three cells list
    assert_eq!(base.len(), before + 8);
    assert_eq!(
        base.find(None, Some(rdf::TYPE), Some(owl::ALL_DISJOINT_CLASSES.into()))
            .len(),
        1
    );
    assert_eq!(base.find(None, Some(owl::MEMBERS), None).len(), 1);
    assert_eq!(base.find(None, Some(rdf::FIRST), None).len(), 3);

    let read = ontology
        .axioms_by_type(AxiomType::DisjointClasses, Scope::Local)
        .unwrap();
    assert_eq!(
        read,
        vec![AnnotatedAxiom::new(Axiom::disjoint_classes([
            class("C"),
            class("A"),
            class("B"),
        ]))]
    );
}
