//! Typed views of graph nodes.

use oxont::factory::ObjectKind;
use oxont::graph::{Scope, SharedGraph, UnionGraph, read_list};
use oxont::vocab::owl;
use oxont::{ModelView, OntConfig, Personality, PunningMode};
use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{BlankNode, NamedNode, Term, Triple};

fn iri(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{name}"))
}

/// Appends the RDF collection of `items` and returns its head.
fn list(triples: &mut Vec<Triple>, items: &[Term]) -> Term {
    let mut head = Term::from(rdf::NIL.into_owned());
    for item in items.iter().rev() {
        let node = BlankNode::default();
        triples.push(Triple::new(node.clone(), rdf::FIRST, item.clone()));
        triples.push(Triple::new(node.clone(), rdf::REST, head));
        head = node.into();
    }
    head
}

fn graph(triples: &[Triple]) -> UnionGraph {
    let graph = SharedGraph::new();
    graph.extend(triples);
    graph.into()
}

#[test]
fn union_is_preferred_over_intersection() {
    let node = BlankNode::default();
    let mut triples = vec![
        Triple::new(iri("A"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("B"), rdf::TYPE, owl::CLASS),
        Triple::new(node.clone(), rdf::TYPE, owl::CLASS),
    ];
    let members = [iri("A").into(), iri("B").into()];
    let union = list(&mut triples, &members);
    let intersection = list(&mut triples, &members);
    triples.push(Triple::new(node.clone(), owl::UNION_OF, union));
    triples.push(Triple::new(node.clone(), owl::INTERSECTION_OF, intersection));
    let graph = graph(&triples);
    let personality = Personality::new(PunningMode::Medium);
    let config = OntConfig::default();
    let view = ModelView::new(&graph, &personality, &config);

    let node = Term::from(node);
    for _ in 0..10 {
        let object = view.get_as(&node, ObjectKind::ClassExpression).unwrap();
        assert_eq!(object.kind(), ObjectKind::ObjectUnionOf);
    }
    assert!(view.can_as(&node, ObjectKind::ObjectIntersectionOf));
}

#[test]
fn anonymous_datatype_with_union_is_a_data_union() {
    let node = BlankNode::default();
    let mut triples = vec![Triple::new(node.clone(), rdf::TYPE, rdfs::DATATYPE)];
    let head = list(&mut triples, &[xsd::STRING.into(), xsd::INTEGER.into()]);
    triples.push(Triple::new(node.clone(), owl::UNION_OF, head.clone()));
    let graph = graph(&triples);
    let personality = Personality::new(PunningMode::Medium);
    let config = OntConfig::default();
    let view = ModelView::new(&graph, &personality, &config);

    let node = Term::from(node);
    let object = view.get_as(&node, ObjectKind::DataRange).unwrap();
    assert_eq!(object.kind(), ObjectKind::DataUnionOf);
    assert!(view.get_as(&node, ObjectKind::ClassExpression).is_none());
    let members = read_list(&graph, Scope::Global, head.as_ref()).unwrap();
    assert_eq!(
        members.items(),
        [Term::from(xsd::STRING.into_owned()), xsd::INTEGER.into_owned().into()]
    );
}

#[test]
fn punned_properties_are_rejected_by_medium_punning() {
    let triples = [
        Triple::new(iri("p"), rdf::TYPE, owl::OBJECT_PROPERTY),
        Triple::new(iri("p"), rdf::TYPE, owl::DATATYPE_PROPERTY),
        Triple::new(iri("C"), rdf::TYPE, owl::CLASS),
        Triple::new(iri("C"), rdf::TYPE, owl::NAMED_INDIVIDUAL),
    ];
    let graph = graph(&triples);
    let config = OntConfig::default();

    let medium = Personality::new(PunningMode::Medium);
    let view = ModelView::new(&graph, &medium, &config);
    assert!(!view.can_as(&iri("p").into(), ObjectKind::ObjectProperty));
    assert!(!view.can_as(&iri("p").into(), ObjectKind::DataProperty));
    assert!(view.can_as(&iri("C").into(), ObjectKind::Class));
    assert!(view.can_as(&iri("C").into(), ObjectKind::NamedIndividual));

    let lax = Personality::new(PunningMode::Lax);
    let view = ModelView::new(&graph, &lax, &config);
    assert!(view.can_as(&iri("p").into(), ObjectKind::ObjectProperty));
    assert!(view.can_as(&iri("p").into(), ObjectKind::DataProperty));
}

#[test]
fn undeclared_and_reserved_iris_are_not_entities() {
    let graph = graph(&[Triple::new(iri("A"), rdf::TYPE, owl::CLASS)]);
    let personality = Personality::new(PunningMode::Medium);
    let config = OntConfig::default();
    let view = ModelView::new(&graph, &personality, &config);

    assert!(view.can_as(&iri("A").into(), ObjectKind::Class));
    assert!(!view.can_as(&iri("B").into(), ObjectKind::Class));
    assert!(view.can_as(&owl::THING.into_owned().into(), ObjectKind::Class));
    assert!(!view.can_as(&owl::CLASS.into_owned().into(), ObjectKind::Class));
    assert!(view.can_as(&xsd::STRING.into_owned().into(), ObjectKind::Datatype));
    assert!(
        view.can_as(
            &rdfs::LABEL.into_owned().into(),
            ObjectKind::AnnotationProperty
        )
    );
}
