//! Loading of documents with their import closure.

use oxont::model::{Entity, EntityType};
use oxont::{
    DocumentSource, MissingImportHandling, MissingOntologyHeaderHandling, OntConfig, OntError,
    OntologyId, OntologyManager, Scope,
};
use oxont::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, Triple};
use std::fs;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

fn iri(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{name}"))
}

/// A Turtle document for the ontology `name` declaring the class `class` and importing `imports`.
fn document(name: &str, class: &str, imports: &[&str]) -> DocumentSource {
    let mut turtle = format!(
        "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
         <http://example.com/{name}> a owl:Ontology .\n\
         <http://example.com/{class}> a owl:Class .\n"
    );
    for import in imports {
        turtle.push_str(&format!(
            "<http://example.com/{name}> owl:imports <http://example.com/{import}> .\n"
        ));
    }
    DocumentSource::from_bytes(turtle)
}

fn class(name: &str) -> Entity {
    Entity::new(EntityType::Class, iri(name))
}

#[test]
fn import_cycle_is_loaded_once() {
    init_logging();
    let manager = OntologyManager::new();
    manager.add_document_mapping("http://example.com/b", document("b", "B", &["c"]));
    manager.add_document_mapping("http://example.com/c", document("c", "C", &["a"]));
    let a = manager.load(document("a", "A", &["b"])).unwrap();

    assert_eq!(manager.len(), 3);
    assert_eq!(a.read().import_ids(), vec![OntologyId::named(iri("b"))]);
    for ontology in manager.ontologies() {
        let ontology = ontology.read();
        let classes = ontology.entities(EntityType::Class, Scope::Global).unwrap();
        for name in ["A", "B", "C"] {
            assert!(
                classes.contains(&class(name)),
                "{name} is not seen from {}",
                ontology.id()
            );
        }
        assert_eq!(
            ontology.entities(EntityType::Class, Scope::Local).unwrap().len(),
            1
        );
    }
}

#[test]
fn shared_import_is_loaded_once() {
    let manager = OntologyManager::new();
    manager.add_document_mapping("http://example.com/b", document("b", "B", &["d"]));
    manager.add_document_mapping("http://example.com/c", document("c", "C", &["d"]));
    manager.add_document_mapping("http://example.com/d", document("d", "D", &[]));
    manager.load(document("a", "A", &["b", "c"])).unwrap();
    assert_eq!(manager.len(), 4);

    // The graph of d is shared, a class declared through c is seen from b
    let d = manager.get_by_iri("http://example.com/d").unwrap();
    let c = manager.get_by_iri("http://example.com/c").unwrap();
    c.read()
        .graph()
        .imports()[0]
        .base()
        .insert(&Triple::new(iri("E"), rdf::TYPE, owl::CLASS));
    assert!(
        d.read()
            .entities(EntityType::Class, Scope::Local)
            .unwrap()
            .contains(&class("E"))
    );
    let b = manager.get_by_iri("http://example.com/b").unwrap();
    assert!(
        b.read()
            .entities(EntityType::Class, Scope::Global)
            .unwrap()
            .contains(&class("E"))
    );
}

#[test]
fn already_managed_import_is_reused() {
    let manager = OntologyManager::new();
    let b = manager.load(document("b", "B", &[])).unwrap();
    let a = manager.load(document("a", "A", &["b"])).unwrap();
    assert_eq!(manager.len(), 2);
    assert_eq!(a.read().import_ids(), vec![b.read().id()]);
    assert!(
        a.read()
            .entities(EntityType::Class, Scope::Global)
            .unwrap()
            .contains(&class("B"))
    );
}

#[test]
fn missing_import_fails_the_load() {
    let manager = OntologyManager::new();
    let result = manager.load(document("a", "A", &["nowhere"]));
    assert!(matches!(result, Err(OntError::MissingImport { .. })));
    assert!(manager.is_empty());
}

#[test]
fn missing_import_can_be_skipped() {
    let manager = OntologyManager::with_config(
        OntConfig::default().with_missing_import_handling(MissingImportHandling::Silent),
    );
    let a = manager.load(document("a", "A", &["nowhere"])).unwrap();
    assert_eq!(manager.len(), 1);
    let a = a.read();
    assert!(a.import_ids().is_empty());
    assert_eq!(a.imports(), vec![iri("nowhere")]);
}

#[test]
fn ignored_import_is_not_fetched() {
    let manager = OntologyManager::with_config(
        OntConfig::default().with_ignored_import("http://example.com/nowhere"),
    );
    let a = manager.load(document("a", "A", &["nowhere"])).unwrap();
    assert!(a.read().import_ids().is_empty());
}

const HEADERLESS: &str = "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
    <http://example.com/Part> a owl:Class .";

#[test]
fn headerless_import_is_merged_into_its_importer() {
    let manager = OntologyManager::with_config(
        OntConfig::default()
            .with_missing_ontology_header_handling(MissingOntologyHeaderHandling::MergeIntoParent),
    );
    manager.add_document_mapping("http://example.com/part", DocumentSource::from_bytes(HEADERLESS));
    let a = manager.load(document("a", "A", &["part"])).unwrap();
    assert_eq!(manager.len(), 1);
    let a = a.read();
    assert!(a.imports().is_empty());
    assert!(
        a.entities(EntityType::Class, Scope::Local)
            .unwrap()
            .contains(&class("Part"))
    );
}

#[test]
fn headerless_import_is_kept_separate_by_default() {
    let manager = OntologyManager::new();
    manager.add_document_mapping("http://example.com/part", DocumentSource::from_bytes(HEADERLESS));
    let a = manager.load(document("a", "A", &["part"])).unwrap();
    assert_eq!(manager.len(), 2);
    let a = a.read();
    assert_eq!(a.imports(), vec![iri("part")]);
    assert!(
        !a.entities(EntityType::Class, Scope::Local)
            .unwrap()
            .contains(&class("Part"))
    );
    assert!(
        a.entities(EntityType::Class, Scope::Global)
            .unwrap()
            .contains(&class("Part"))
    );
}

#[test]
fn file_imports_are_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("b.ttl");
    fs::write(
        &path,
        "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
         <http://example.com/b> a owl:Ontology .\n\
         <http://example.com/B> a owl:Class .",
    )
    .unwrap();
    let location = format!("file://{}", path.display());
    let manager = OntologyManager::new();
    let a = manager
        .load(DocumentSource::from_bytes(format!(
            "@prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
             <http://example.com/a> a owl:Ontology ; owl:imports <{location}> ."
        )))
        .unwrap();
    assert_eq!(manager.len(), 2);
    assert_eq!(a.read().import_ids(), vec![OntologyId::named(iri("b"))]);
}

#[test]
fn conflicting_documents_with_the_same_id_are_rejected() {
    let manager = OntologyManager::new();
    manager.load(document("a", "A", &[])).unwrap();
    assert!(matches!(
        manager.load(document("a", "Other", &[])),
        Err(OntError::DuplicateOntology(_))
    ));
    let same = manager.load(document("a", "A", &[])).unwrap();
    assert_eq!(manager.len(), 1);
    assert_eq!(same.read().id(), OntologyId::named(iri("a")));
}
