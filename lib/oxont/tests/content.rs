//! Axiom content of an ontology under random edits, with and without the cache.

use oxont::model::{
    AnnotatedAxiom, AnnotationProperty, AnnotationSubject, AnnotationValue, Axiom, AxiomType,
    ClassExpression, DataProperty, DataRange, Datatype, Entity, EntityType, ObjectProperty,
    OwlClass,
};
use oxont::translate::axiom_types_of;
use oxont::{ModelView, OntConfig, Ontology, Scope};
use oxrdf::vocab::{rdfs, xsd};
use oxrdf::{Literal, NamedNode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

fn iri(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{name}"))
}

fn class(name: &str) -> ClassExpression {
    ClassExpression::class(OwlClass::new(iri(name)))
}

fn declared(config: OntConfig) -> Ontology {
    let mut ontology = Ontology::new(config);
    let declarations: [(EntityType, &[&str]); 4] = [
        (EntityType::Class, &["A", "B", "C"]),
        (EntityType::ObjectProperty, &["p", "q"]),
        (EntityType::DataProperty, &["d"]),
        (EntityType::NamedIndividual, &["i", "j"]),
    ];
    for (entity_type, names) in declarations {
        for name in names {
            ontology
                .add_axiom(Axiom::declaration(Entity::new(entity_type, iri(name))))
                .unwrap();
        }
    }
    ontology
}

/// Axioms read from distinct defining statements.
fn pool() -> Vec<AnnotatedAxiom> {
    let p = ObjectProperty::new(iri("p"));
    vec![
        Axiom::subclass_of(class("A"), class("B")).into(),
        Axiom::subclass_of(class("B"), class("C")).into(),
        Axiom::subclass_of(
            class("C"),
            ClassExpression::some_values_from(p.clone(), class("A")),
        )
        .into(),
        Axiom::disjoint_classes([class("A"), class("C")]).into(),
        Axiom::disjoint_classes([class("A"), class("B"), class("C")]).into(),
        Axiom::class_assertion(class("A"), iri("i")).into(),
        Axiom::ObjectPropertyAssertion {
            property: p.clone(),
            source: iri("i").into(),
            target: iri("j").into(),
        }
        .into(),
        Axiom::DataPropertyAssertion {
            property: DataProperty::new(iri("d")),
            source: iri("j").into(),
            target: Literal::new_typed_literal("42", xsd::INTEGER),
        }
        .into(),
        Axiom::AnnotationAssertion {
            property: AnnotationProperty::new(rdfs::COMMENT.into_owned()),
            subject: AnnotationSubject::Iri(iri("B")),
            value: AnnotationValue::Literal(Literal::from("a class")),
        }
        .into(),
        Axiom::FunctionalObjectProperty(p.clone().into()).into(),
        Axiom::ObjectPropertyDomain {
            property: p.clone().into(),
            domain: class("A"),
        }
        .into(),
        Axiom::SubObjectPropertyOf {
            sub_property: p.into(),
            super_property: ObjectProperty::new(iri("q")).into(),
        }
        .into(),
        Axiom::DataPropertyRange {
            property: DataProperty::new(iri("d")),
            range: DataRange::datatype(Datatype::new(xsd::INTEGER.into_owned())),
        }
        .into(),
    ]
}

fn assert_content(
    ontology: &Ontology,
    expected: &HashSet<AnnotatedAxiom>,
    pool: &[AnnotatedAxiom],
) {
    for axiom in pool {
        assert_eq!(
            ontology.contains_axiom(axiom, Scope::Local).unwrap(),
            expected.contains(axiom),
            "{axiom:?}"
        );
    }
    for axiom_type in pool.iter().map(AnnotatedAxiom::axiom_type) {
        let actual = ontology
            .axioms_by_type(axiom_type, Scope::Local)
            .unwrap()
            .into_iter()
            .collect::<HashSet<_>>();
        let wanted = expected
            .iter()
            .filter(|a| a.axiom_type() == axiom_type)
            .cloned()
            .collect::<HashSet<_>>();
        assert_eq!(actual, wanted, "{axiom_type}");
    }
}

#[test]
fn cached_and_uncached_content_agree() {
    let pool = pool();
    let mut rng = StdRng::seed_from_u64(42);
    let mut cached = declared(OntConfig::default());
    let mut uncached = declared(OntConfig::default().with_cache_content(false));
    let mut expected = HashSet::new();
    for _ in 0..200 {
        let axiom = &pool[rng.gen_range(0..pool.len())];
        if rng.gen_bool(0.6) {
            let added = expected.insert(axiom.clone());
            assert_eq!(cached.add_axiom(axiom.clone()).unwrap(), added);
            assert_eq!(uncached.add_axiom(axiom.clone()).unwrap(), added);
        } else {
            let removed = expected.remove(axiom);
            assert_eq!(cached.remove_axiom(axiom).unwrap(), removed);
            assert_eq!(uncached.remove_axiom(axiom).unwrap(), removed);
        }
        assert_eq!(cached.graph().base().len(), uncached.graph().base().len());
    }
    assert_content(&cached, &expected, &pool);
    assert_content(&uncached, &expected, &pool);
}

#[test]
fn cache_follows_direct_graph_edits() {
    let pool = pool();
    let mut ontology = declared(OntConfig::default());
    for axiom in &pool {
        ontology.add_axiom(axiom.clone()).unwrap();
    }
    assert_eq!(
        ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local).unwrap().len(),
        3
    );

    // Statements removed behind the ontology's back
    let removed = ontology
        .graph()
        .base()
        .find(None, Some(rdfs::SUB_CLASS_OF), None);
    assert_eq!(ontology.graph().base().remove_all(&removed), 3);
    assert!(
        ontology
            .axioms_by_type(AxiomType::SubClassOf, Scope::Local)
            .unwrap()
            .is_empty()
    );
    assert!(
        !ontology
            .contains_axiom(&Axiom::subclass_of(class("A"), class("B")).into(), Scope::Local)
            .unwrap()
    );
}

#[test]
fn every_statement_defines_at_most_one_axiom_type() {
    let mut ontology = declared(OntConfig::default());
    for axiom in pool() {
        ontology.add_axiom(axiom).unwrap();
    }
    let view = ModelView::new(ontology.graph(), ontology.personality(), ontology.config());
    for triple in ontology.graph().base().triples() {
        let types = axiom_types_of(&triple, &view);
        assert!(types.len() <= 1, "{triple} is read as {types:?}");
    }
}
