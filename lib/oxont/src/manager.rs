use crate::config::OntConfig;
use crate::error::OntError;
use crate::graph::SharedGraph;
use crate::id::OntologyId;
use crate::io::DocumentSource;
use crate::loader::{Loaded, Loader};
use crate::ontology::{Ontology, ontology_id, rename};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// A shared handle on an ontology owned by an [`OntologyManager`].
///
/// Cloning the handle is cheap. Reads and edits go through a read/write lock.
#[derive(Clone)]
pub struct OntologyRef {
    inner: Arc<RwLock<Ontology>>,
    /// the base graph of the ontology, which is never replaced
    base: SharedGraph,
}

impl OntologyRef {
    fn new(ontology: Ontology) -> Self {
        Self {
            base: ontology.graph().base().clone(),
            inner: Arc::new(RwLock::new(ontology)),
        }
    }

    /// The id of the ontology, read from its graph without locking the ontology.
    pub fn id(&self) -> OntologyId {
        ontology_id(&self.base)
    }

    #[inline]
    pub(crate) fn base(&self) -> &SharedGraph {
        &self.base
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Ontology> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the ontology.
    ///
    /// The id must be changed with [`OntologyManager::set_ontology_id`] to keep ids unique.
    pub fn write(&self) -> RwLockWriteGuard<'_, Ontology> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if both handles point to the same ontology.
    #[inline]
    pub fn is_same(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for OntologyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OntologyRef").field(&self.id()).finish()
    }
}

/// A collection of ontologies with unique ids, and the loader of documents with their imports.
///
/// The manager can be shared between threads: lookups by id are done under a read lock and
/// insertions, removals and renames under a write lock, so a change is visible to every lookup
/// that starts after it returns.
///
/// The ids are read from the ontology graphs, never through the [`OntologyRef`] locks. The
/// manager only takes its own locks and then the graph locks, so it can be used by a thread
/// that holds the write lock of one of its ontologies.
///
/// ```
/// use oxont::{DocumentSource, OntologyId, OntologyManager};
///
/// let manager = OntologyManager::new();
/// let ontology = manager.load(DocumentSource::from_bytes(
///     "<http://example.com/o> a <http://www.w3.org/2002/07/owl#Ontology> .",
/// ))?;
/// let id = OntologyId::parse("http://example.com/o")?;
/// assert_eq!(ontology.read().id(), id);
/// assert!(manager.contains(&id));
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct OntologyManager {
    config: OntConfig,
    ontologies: RwLock<Vec<OntologyRef>>,
    mappings: RwLock<FxHashMap<String, DocumentSource>>,
}

impl OntologyManager {
    pub fn new() -> Self {
        Self::with_config(OntConfig::default())
    }

    pub fn with_config(config: OntConfig) -> Self {
        Self {
            config,
            ontologies: RwLock::default(),
            mappings: RwLock::default(),
        }
    }

    /// The configuration given to every ontology created or loaded by this manager.
    #[inline]
    pub fn config(&self) -> &OntConfig {
        &self.config
    }

    fn ontologies_read(&self) -> RwLockReadGuard<'_, Vec<OntologyRef>> {
        self.ontologies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn ontologies_write(&self) -> RwLockWriteGuard<'_, Vec<OntologyRef>> {
        self.ontologies
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn mappings_read(&self) -> RwLockReadGuard<'_, FxHashMap<String, DocumentSource>> {
        self.mappings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn mappings_write(&self) -> RwLockWriteGuard<'_, FxHashMap<String, DocumentSource>> {
        self.mappings.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Creates an empty ontology.
    pub fn create(&self, id: OntologyId) -> Result<OntologyRef, OntError> {
        let mut ontology = Ontology::new(self.config.clone());
        if !id.is_anonymous() {
            ontology.set_id(id)?;
        }
        self.add(ontology)
    }

    /// Takes ownership of the ontology, fails if its id is already used.
    pub fn add(&self, ontology: Ontology) -> Result<OntologyRef, OntError> {
        let mut ontologies = self.ontologies_write();
        let id = ontology.id();
        if ontologies.iter().any(|o| o.id() == id) {
            return Err(OntError::DuplicateOntology(id));
        }
        let ontology = OntologyRef::new(ontology);
        ontologies.push(ontology.clone());
        Ok(ontology)
    }

    pub fn get(&self, id: &OntologyId) -> Option<OntologyRef> {
        self.ontologies_read()
            .iter()
            .find(|o| o.id() == *id)
            .cloned()
    }

    /// The ontology whose ontology IRI or version IRI is `iri`.
    pub fn get_by_iri(&self, iri: &str) -> Option<OntologyRef> {
        let ontologies = self.ontologies_read();
        ontologies
            .iter()
            .find(|o| o.id().iri().is_some_and(|i| i.as_str() == iri))
            .or_else(|| ontologies.iter().find(|o| o.id().matches_iri(iri)))
            .cloned()
    }

    pub fn contains(&self, id: &OntologyId) -> bool {
        self.get(id).is_some()
    }

    /// Removes the ontology with this id.
    ///
    /// The ontologies importing it keep their view of its graph.
    pub fn remove(&self, id: &OntologyId) -> Option<OntologyRef> {
        let mut ontologies = self.ontologies_write();
        let position = ontologies.iter().position(|o| o.id() == *id)?;
        Some(ontologies.remove(position))
    }

    pub fn ontologies(&self) -> Vec<OntologyRef> {
        self.ontologies_read().clone()
    }

    pub fn len(&self) -> usize {
        self.ontologies_read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ontologies_read().is_empty()
    }

    /// Renames an ontology, fails if another ontology of the manager has this id.
    ///
    /// The header is rewritten in the graph directly, the lock of the ontology is not taken.
    pub fn set_ontology_id(&self, ontology: &OntologyRef, id: OntologyId) -> Result<(), OntError> {
        let ontologies = self.ontologies_write();
        if ontologies
            .iter()
            .any(|o| !o.is_same(ontology) && o.id() == id)
        {
            return Err(OntError::DuplicateOntology(id));
        }
        rename(ontology.base(), &id);
        Ok(())
    }

    /// Makes the loads resolve `iri` to the given source.
    pub fn add_document_mapping(&self, iri: impl Into<String>, source: DocumentSource) {
        self.mappings_write().insert(iri.into(), source);
    }

    pub fn remove_document_mapping(&self, iri: &str) -> Option<DocumentSource> {
        self.mappings_write().remove(iri)
    }

    /// Loads a document and its imports.
    ///
    /// The imported ontologies are added to the manager too. An imported ontology already in
    /// the manager is reused instead of being read again. If the document itself has the id
    /// and the content of an ontology of the manager, this ontology is returned.
    pub fn load(&self, source: DocumentSource) -> Result<OntologyRef, OntError> {
        let existing = self.ontologies();
        let mappings = self.mappings_read().clone();
        let (root, imports) = Loader::new(&self.config, &mappings, &existing).load(&source)?;

        let mut ontologies = self.ontologies_write();
        let mut added = Vec::with_capacity(imports.len() + 1);
        let root = match root {
            Loaded::Existing(ontology) => ontology,
            Loaded::New(ontology) => {
                let ontology = OntologyRef::new(ontology);
                added.push(ontology.clone());
                ontology
            }
        };
        added.extend(imports.into_iter().map(OntologyRef::new));
        for ontology in &added {
            let id = ontology.id();
            if ontologies.iter().any(|o| o.id() == id) {
                return Err(OntError::DuplicateOntology(id));
            }
        }
        for ontology in added {
            debug!("Added the ontology {}", ontology.id());
            ontologies.push(ontology);
        }
        Ok(root)
    }

    /// Returns the ontology with this IRI, loading it if needed.
    pub fn load_from_iri(&self, iri: &str) -> Result<OntologyRef, OntError> {
        if let Some(ontology) = self.get_by_iri(iri) {
            return Ok(ontology);
        }
        self.load(DocumentSource::from_iri(iri))
    }
}

impl Default for OntologyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OntologyManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OntologyManager")
            .field("ontologies", &*self.ontologies_read())
            .field("mappings", &self.mappings_read().keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
