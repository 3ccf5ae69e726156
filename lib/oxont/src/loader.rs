//! Assembly of an ontology and its import closure from documents.
//!
//! Loading goes in two phases. The documents are first collected: the root one, then every
//! `owl:imports` target, each resolved once even when imported several times or through a
//! cycle. The union graphs are then built by a depth-first walk of the collected imports that
//! does not descend into a document already on the current path, so that every ontology of a
//! cycle sees the whole closure while each base graph exists only once.

use crate::config::{MissingImportHandling, MissingOntologyHeaderHandling, OntConfig};
use crate::error::OntError;
use crate::graph::{SharedGraph, UnionGraph, is_iri};
use crate::io::{DocumentSource, LoadedDocument, read_document};
use crate::manager::OntologyRef;
use crate::ontology::{Ontology, header, import_declarations, ontology_id};
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{NamedNode, Subject, Term, Triple};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// An ontology produced by a load.
#[derive(Debug)]
pub(crate) enum Loaded {
    /// Already owned by the manager, with the same id and content.
    Existing(OntologyRef),
    New(Ontology),
}

#[derive(Debug)]
enum Origin {
    Document,
    Existing(OntologyRef),
}

#[derive(Debug)]
struct Node {
    graph: SharedGraph,
    origin: Origin,
    /// indexes of the direct imports
    imports: Vec<usize>,
}

enum Import {
    Node(usize),
    /// the import has been copied into the importer, with these import declarations
    Merged(Vec<NamedNode>),
    Skipped,
}

pub(crate) struct Loader<'a> {
    config: &'a OntConfig,
    mappings: &'a FxHashMap<String, DocumentSource>,
    existing: &'a [OntologyRef],
    nodes: Vec<Node>,
    /// node index by document IRI, import IRI, ontology IRI and version IRI
    keys: FxHashMap<String, usize>,
}

impl<'a> Loader<'a> {
    pub fn new(
        config: &'a OntConfig,
        mappings: &'a FxHashMap<String, DocumentSource>,
        existing: &'a [OntologyRef],
    ) -> Self {
        Self {
            config,
            mappings,
            existing,
            nodes: Vec::new(),
            keys: FxHashMap::default(),
        }
    }

    /// Loads the document and its imports.
    ///
    /// Returns the root ontology and the imported ontologies that are not owned by the manager
    /// yet.
    pub fn load(mut self, source: &DocumentSource) -> Result<(Loaded, Vec<Ontology>), OntError> {
        let document = self.fetch(source)?;
        let root = self.register(document.graph, source.iri())?;
        self.resolve_imports(root)?;
        Ok(self.assemble(root))
    }

    /// Reads the source, following the document mappings of IRI sources.
    fn fetch(&self, source: &DocumentSource) -> Result<LoadedDocument, OntError> {
        let mut source = source.clone();
        let mut seen = FxHashSet::default();
        while let Some(iri) = source.iri().map(str::to_owned) {
            let Some(mapped) = self.mappings.get(&iri) else {
                break;
            };
            if !seen.insert(iri.clone()) {
                return Err(OntError::Cycle(iri));
            }
            source = mapped.clone();
        }
        let document = read_document(&source, self.config)?;
        if let Some(format) = document.format {
            debug!(
                "Read {} statements from {} as {}",
                document.graph.len(),
                source.iri().unwrap_or("an in-memory document"),
                format.name()
            );
        }
        Ok(document)
    }

    fn push(&mut self, node: Node, key: Option<&str>) -> usize {
        let index = self.nodes.len();
        let id = ontology_id(&node.graph);
        for iri in [id.iri(), id.version_iri()].into_iter().flatten() {
            self.keys.entry(iri.as_str().to_owned()).or_insert(index);
        }
        if let Some(key) = key {
            self.keys.entry(key.to_owned()).or_insert(index);
        }
        self.nodes.push(node);
        index
    }

    /// Adds a fetched graph, or reuses the node or the ontology with the same id.
    fn register(&mut self, graph: SharedGraph, key: Option<&str>) -> Result<usize, OntError> {
        let id = ontology_id(&graph);
        if let Some(iri) = id.iri() {
            if let Some(&index) = self.keys.get(iri.as_str()) {
                let node = &self.nodes[index];
                if ontology_id(&node.graph) != id || !similar(&node.graph, &graph) {
                    return Err(OntError::DuplicateOntology(id));
                }
                if let Some(key) = key {
                    self.keys.entry(key.to_owned()).or_insert(index);
                }
                return Ok(index);
            }
            let existing = self.existing;
            if let Some(ontology) = existing.iter().find(|o| o.id() == id) {
                let base = ontology.base().clone();
                if !similar(&base, &graph) {
                    return Err(OntError::DuplicateOntology(id));
                }
                debug!("Reusing the loaded ontology {id}");
                let node = Node {
                    graph: base,
                    origin: Origin::Existing(ontology.clone()),
                    imports: Vec::new(),
                };
                return Ok(self.push(node, key));
            }
        }
        let node = Node {
            graph,
            origin: Origin::Document,
            imports: Vec::new(),
        };
        Ok(self.push(node, key))
    }

    fn resolve_imports(&mut self, root: usize) -> Result<(), OntError> {
        let mut queue = vec![root];
        while let Some(index) = queue.pop() {
            if matches!(self.nodes[index].origin, Origin::Existing(_)) {
                continue;
            }
            let mut declared = import_declarations(&self.nodes[index].graph);
            let mut next = 0;
            while let Some(iri) = declared.get(next).cloned() {
                next += 1;
                let len = self.nodes.len();
                match self.import(index, &iri)? {
                    Import::Node(import) => {
                        if import == index {
                            debug!("Skipping the import <{iri}> of an ontology by itself");
                            continue;
                        }
                        if !self.nodes[index].imports.contains(&import) {
                            self.nodes[index].imports.push(import);
                        }
                        if import >= len {
                            queue.push(import);
                        }
                    }
                    Import::Merged(imports) => declared.extend(imports),
                    Import::Skipped => (),
                }
            }
        }
        Ok(())
    }

    fn import(&mut self, importer: usize, iri: &NamedNode) -> Result<Import, OntError> {
        if self.config.is_ignored_import(iri.as_str()) {
            debug!("Skipping the ignored import <{iri}>");
            return Ok(Import::Skipped);
        }
        if let Some(&index) = self.keys.get(iri.as_str()) {
            return Ok(Import::Node(index));
        }
        let existing = self.existing;
        if let Some(ontology) = existing.iter().find(|o| o.id().matches_iri(iri.as_str())) {
            let node = Node {
                graph: ontology.base().clone(),
                origin: Origin::Existing(ontology.clone()),
                imports: Vec::new(),
            };
            return Ok(Import::Node(self.push(node, Some(iri.as_str()))));
        }

        let source = DocumentSource::from_iri(iri.as_str());
        let document = match self.fetch(&source) {
            Ok(document) => document,
            Err(cause) => {
                return match self.config.missing_import_handling() {
                    MissingImportHandling::Throw => Err(OntError::MissingImport {
                        iri: iri.as_str().to_owned(),
                        cause: Box::new(cause),
                    }),
                    MissingImportHandling::Silent => {
                        debug!("Skipping the missing import <{iri}>: {cause}");
                        Ok(Import::Skipped)
                    }
                };
            }
        };
        if self.config.missing_ontology_header_handling()
            == MissingOntologyHeaderHandling::MergeIntoParent
            && ontology_id(&document.graph).is_anonymous()
        {
            return Ok(Import::Merged(self.merge(importer, iri, &document.graph)));
        }
        Ok(Import::Node(
            self.register(document.graph, Some(iri.as_str()))?,
        ))
    }

    /// Copies an anonymous document into the importer in place of its import declaration.
    ///
    /// The statements about the document header move to the importer header.
    fn merge(&mut self, importer: usize, iri: &NamedNode, graph: &SharedGraph) -> Vec<NamedNode> {
        let target = self.nodes[importer].graph.clone();
        let target_header = header(&target);
        let source_header = header(graph);
        let imports = import_declarations(graph);
        for triple in graph.triples() {
            let on_header = source_header.as_ref() == Some(&triple.subject);
            match &target_header {
                Some(target_header) if on_header => {
                    if triple.predicate != rdf::TYPE || !is_iri(&triple.object, owl::ONTOLOGY) {
                        target.insert(&Triple::new(
                            target_header.clone(),
                            triple.predicate,
                            triple.object,
                        ));
                    }
                }
                _ => {
                    target.insert(&triple);
                }
            }
        }
        if let Some(target_header) = target_header {
            target.remove(&Triple::new(target_header, owl::IMPORTS, iri.clone()));
        }
        debug!(
            "Merged the anonymous import <{iri}> ({} triples) into its importer",
            graph.len()
        );
        imports
    }

    fn assemble(&self, root: usize) -> (Loaded, Vec<Ontology>) {
        let loaded = match &self.nodes[root].origin {
            Origin::Existing(ontology) => Loaded::Existing(ontology.clone()),
            Origin::Document => Loaded::New(self.ontology(root)),
        };
        let imports = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(index, node)| *index != root && matches!(node.origin, Origin::Document))
            .map(|(index, _)| self.ontology(index))
            .collect();
        (loaded, imports)
    }

    fn ontology(&self, index: usize) -> Ontology {
        let ontology =
            Ontology::from_graph(self.union(index, &mut Vec::new()), self.config.clone());
        debug!(
            "Set up the ontology {} with {} imports",
            ontology.id(),
            self.nodes[index].imports.len()
        );
        ontology
    }

    fn union(&self, index: usize, path: &mut Vec<usize>) -> UnionGraph {
        let node = &self.nodes[index];
        if let Origin::Existing(ontology) = &node.origin {
            return ontology.read().graph().clone();
        }
        let mut graph = UnionGraph::new(node.graph.clone());
        path.push(index);
        for &import in &node.imports {
            if path.contains(&import) {
                debug!(
                    "Import cycle back to {}, not descending",
                    ontology_id(&self.nodes[import].graph)
                );
                continue;
            }
            graph.add_import(self.union(import, path));
        }
        path.pop();
        graph
    }
}

/// Compares two graphs up to blank node renaming.
///
/// The blank nodes are all replaced by the same placeholder: isomorphic graphs are always
/// similar, the converse is not guaranteed.
fn similar(a: &SharedGraph, b: &SharedGraph) -> bool {
    if a.is_same(b) {
        return true;
    }
    if a.len() != b.len() {
        return false;
    }
    let shape = |graph: &SharedGraph| {
        let mut shapes = graph
            .triples()
            .into_iter()
            .map(|t| {
                let subject = match &t.subject {
                    Subject::BlankNode(_) => "[]".to_owned(),
                    subject => subject.to_string(),
                };
                let object = match &t.object {
                    Term::BlankNode(_) => "[]".to_owned(),
                    object => object.to_string(),
                };
                format!("{subject} {} {object}", t.predicate)
            })
            .collect::<Vec<_>>();
        shapes.sort_unstable();
        shapes
    };
    shape(a) == shape(b)
}
