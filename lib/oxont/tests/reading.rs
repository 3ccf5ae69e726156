//! Reading options: ignored read errors and annotation handling.

use oxont::graph::SharedGraph;
use oxont::model::{
    AnnotatedAxiom, Annotation, AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom,
    AxiomType, ClassExpression, Entity, EntityType, OwlClass,
};
use oxont::vocab::owl;
use oxont::{OntConfig, OntError, Ontology, Scope};
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{BlankNode, Literal, NamedNode, Triple};

fn iri(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{name}"))
}

fn class(name: &str) -> ClassExpression {
    ClassExpression::class(OwlClass::new(iri(name)))
}

fn graph(triples: &[Triple]) -> SharedGraph {
    let graph = SharedGraph::new();
    graph.extend(triples);
    graph
}

/// `A owl:disjointUnionOf (B C ...)` where the collection loops back on itself.
fn cyclic_disjoint_union() -> SharedGraph {
    let (first, second) = (BlankNode::default(), BlankNode::default());
    graph(&[
        Triple::new(iri("A"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("B"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("C"), rdf::TYPE, owl::CLASS),
        Triple::new(first.clone(), rdf::FIRST, iri("B")),
        Triple::new(first.clone(), rdf::REST, second.clone()),
        Triple::new(second.clone(), rdf::FIRST, iri("C")),
        Triple::new(second, rdf::REST, first.clone()),
        Triple::new(iri("A"), owl::DISJOINT_UNION_OF, first),
    ])
}

/// `A rdfs:subClassOf _:r` where `_:r` is an existential restriction with two fillers.
fn ambiguous_restriction() -> (SharedGraph, Triple, BlankNode) {
    let restriction = BlankNode::default();
    let defining = Triple::new(iri("A"), rdfs::SUB_CLASS_OF, restriction.clone());
    let graph = graph(&[
        Triple::new(iri("A"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("B"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("C"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("p"), rdf::TYPE, owl::OBJECT_PROPERTY),
        Triple::new(restriction.clone(), rdf::TYPE, owl::RESTRICTION),
        Triple::new(restriction.clone(), owl::ON_PROPERTY, iri("p")),
        Triple::new(restriction.clone(), owl::SOME_VALUES_FROM, iri("B")),
        Triple::new(restriction.clone(), owl::SOME_VALUES_FROM, iri("C")),
        defining.clone(),
    ]);
    (graph, defining, restriction)
}

fn lenient(cache_content: bool) -> OntConfig {
    OntConfig::default()
        .with_ignore_axioms_read_errors(true)
        .with_cache_content(cache_content)
}

#[test]
fn cyclic_collection_fails_the_read() {
    for cache_content in [true, false] {
        let ontology = Ontology::from_graph(
            cyclic_disjoint_union(),
            OntConfig::default().with_cache_content(cache_content),
        );
        match ontology.axioms_by_type(AxiomType::DisjointUnion, Scope::Local) {
            Err(OntError::AxiomRead(error)) => {
                assert_eq!(error.axiom_type(), AxiomType::DisjointUnion);
                assert_eq!(error.statement().predicate, owl::DISJOINT_UNION_OF);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}

#[test]
fn cyclic_collection_is_skipped_when_read_errors_are_ignored() {
    for cache_content in [true, false] {
        let ontology = Ontology::from_graph(cyclic_disjoint_union(), lenient(cache_content));
        assert!(
            ontology
                .axioms_by_type(AxiomType::DisjointUnion, Scope::Local)
                .unwrap()
                .is_empty()
        );
        let skipped = ontology.skipped_statements();
        assert_eq!(skipped.len(), 1, "cache: {cache_content}");
        assert_eq!(skipped[0].axiom_type(), AxiomType::DisjointUnion);
        assert_eq!(skipped[0].statement().predicate, owl::DISJOINT_UNION_OF);
    }
}

#[test]
fn skipped_statements_are_kept_with_and_without_cache() {
    for cache_content in [true, false] {
        let (graph, defining, restriction) = ambiguous_restriction();
        let ontology = Ontology::from_graph(graph.clone(), lenient(cache_content));
        assert!(
            ontology
                .axioms_by_type(AxiomType::SubClassOf, Scope::Local)
                .unwrap()
                .is_empty()
        );
        // Repeated reads do not report the statement twice
        ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local).unwrap();
        let skipped = ontology.skipped_statements();
        assert_eq!(skipped.len(), 1, "cache: {cache_content}");
        assert_eq!(skipped[0].statement(), &defining);
        assert_eq!(skipped[0].axiom_type(), AxiomType::SubClassOf);
        assert!(!skipped[0].reason().is_empty());

        // Once repaired, the next read forgets it
        graph.remove(&Triple::new(restriction, owl::SOME_VALUES_FROM, iri("C")));
        assert_eq!(
            ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local).unwrap().len(),
            1
        );
        assert!(ontology.skipped_statements().is_empty(), "cache: {cache_content}");
    }
}

#[test]
fn read_errors_are_raised_by_default() {
    let (graph, _, _) = ambiguous_restriction();
    let ontology = Ontology::from_graph(graph, OntConfig::default().with_cache_content(false));
    assert!(matches!(
        ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local),
        Err(OntError::AxiomRead(_))
    ));
    assert!(ontology.skipped_statements().is_empty());
}

fn annotated_ontology() -> (Ontology, Axiom) {
    let mut ontology = Ontology::new(OntConfig::default());
    for name in ["A", "B"] {
        ontology
            .add_axiom(Axiom::declaration(Entity::new(EntityType::Class, iri(name))))
            .unwrap();
    }
    ontology.add_axiom(Axiom::subclass_of(class("A"), class("B"))).unwrap();
    let comment = Axiom::AnnotationAssertion {
        property: AnnotationProperty::new(rdfs::COMMENT.into_owned()),
        subject: AnnotationSubject::Iri(iri("B")),
        value: AnnotationValue::Literal(Literal::from("a class")),
    };
    ontology
        .add_axiom(AnnotatedAxiom::new(comment.clone()).with_annotation(Annotation::new(
            AnnotationProperty::new(rdfs::LABEL.into_owned()),
            Literal::from("note"),
        )))
        .unwrap();
    (ontology, comment)
}

#[test]
fn annotation_axioms_can_be_left_out() {
    let (source, _) = annotated_ontology();
    let ontology = Ontology::from_graph(
        source.graph().base().clone(),
        OntConfig::default().with_load_annotation_axioms(false),
    );
    assert!(
        ontology
            .axioms_by_type(AxiomType::AnnotationAssertion, Scope::Local)
            .unwrap()
            .is_empty()
    );
    assert_eq!(
        ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local).unwrap(),
        vec![AnnotatedAxiom::new(Axiom::subclass_of(class("A"), class("B")))]
    );
    assert_eq!(
        source
            .axioms_by_type(AxiomType::AnnotationAssertion, Scope::Local)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn annotation_assertions_without_bulk_annotations() {
    let (source, comment) = annotated_ontology();
    let read = source
        .axioms_by_type(AxiomType::AnnotationAssertion, Scope::Local)
        .unwrap();
    let annotated = read.iter().find(|a| a.axiom == comment).unwrap();
    assert_eq!(annotated.annotations.len(), 1);

    let ontology = Ontology::from_graph(
        source.graph().base().clone(),
        OntConfig::default().with_allow_bulk_annotation_assertions(false),
    );
    let read = ontology
        .axioms_by_type(AxiomType::AnnotationAssertion, Scope::Local)
        .unwrap();
    let plain = read.iter().find(|a| a.axiom == comment).unwrap();
    assert!(plain.annotations.is_empty());
    assert_eq!(
        ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local).unwrap().len(),
        1
    );
}
