//! OWL 2 ontologies over RDF graphs.
//!
//! An [`Ontology`] is a view over a [`UnionGraph`](graph::UnionGraph): a base graph with the
//! graphs of its imports. The RDF graph stays the single source of truth. Axioms are read from
//! it on demand by the [translators](translate) of each [axiom type](model::AxiomType) and
//! written back to it as triples, with an optional per-type cache in between.
//!
//! An [`OntologyManager`] keeps ontologies with unique ids and loads documents together with
//! their `owl:imports` closure.
//!
//! # Example
//! ```
//! use oxont::model::{AxiomType, EntityType};
//! use oxont::{DocumentSource, OntologyManager, Scope};
//!
//! let manager = OntologyManager::new();
//! manager.add_document_mapping(
//!     "http://example.com/animals",
//!     DocumentSource::from_bytes(
//!         "@prefix owl: <http://www.w3.org/2002/07/owl#> .
//!          <http://example.com/animals> a owl:Ontology .
//!          <http://example.com/Animal> a owl:Class .",
//!     ),
//! );
//! let ontology = manager.load(DocumentSource::from_bytes(
//!     "@prefix owl: <http://www.w3.org/2002/07/owl#> .
//!      @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
//!      <http://example.com/pets> a owl:Ontology ; owl:imports <http://example.com/animals> .
//!      <http://example.com/Dog> a owl:Class ; rdfs:subClassOf <http://example.com/Animal> .",
//! ))?;
//! let ontology = ontology.read();
//!
//! assert_eq!(ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local)?.len(), 1);
//! assert_eq!(ontology.entities(EntityType::Class, Scope::Global)?.len(), 2);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod config;
mod content;
mod error;
pub mod factory;
pub mod graph;
mod id;
mod io;
mod loader;
mod manager;
pub mod model;
mod ontology;
pub mod translate;
mod view;
pub mod vocab;

pub use config::{MissingImportHandling, MissingOntologyHeaderHandling, OntConfig, PunningMode};
pub use content::{CacheState, SkippedStatement};
pub use error::{AxiomReadError, ConversionError, OntError, UnsupportedFormatError};
pub use factory::{Builtins, Personality};
pub use graph::Scope;
pub use id::OntologyId;
pub use io::DocumentSource;
pub use manager::{OntologyManager, OntologyRef};
pub use ontology::Ontology;
pub use view::ModelView;
