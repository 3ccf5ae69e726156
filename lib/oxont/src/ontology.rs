use crate::config::OntConfig;
use crate::content::{self, CacheState, ContentCache, SkippedStatement};
use crate::error::OntError;
use crate::factory::{ObjectKind, Personality};
use crate::graph::{Scope, SharedGraph, UnionGraph};
use crate::id::OntologyId;
use crate::io;
use crate::model::{
    AnnotatedAxiom, Annotation, AnnotationValue, AxiomType, Entity, EntityType, Primitive,
};
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedNode, Subject, Term, Triple};
use oxrdfio::RdfFormat;
use std::cmp::Reverse;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// An OWL 2 ontology backed by an RDF graph.
///
/// The graph is the only storage: the ontology id, annotations, imports and axioms are all read
/// from its triples and every edit is written back as triples. Axioms are read lazily and kept
/// in a cache that follows the edits made through this API and is rebuilt when the graph is
/// changed by other means.
///
/// Usage example:
/// ```
/// use oxont::model::{AnnotatedAxiom, Axiom, AxiomType, ClassExpression, OwlClass};
/// use oxont::{OntConfig, Ontology, OntologyId, Scope};
///
/// let mut ontology = Ontology::new(OntConfig::default());
/// ontology.set_id(OntologyId::parse("http://example.com/o")?)?;
///
/// let a = ClassExpression::class(OwlClass::new_from_iri("http://example.com/A")?);
/// let b = ClassExpression::class(OwlClass::new_from_iri("http://example.com/B")?);
/// assert!(ontology.add_axiom(Axiom::subclass_of(a, b))?);
/// assert_eq!(
///     ontology.axioms_by_type(AxiomType::SubClassOf, Scope::Local)?.len(),
///     1
/// );
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
pub struct Ontology {
    graph: UnionGraph,
    personality: Arc<Personality>,
    config: OntConfig,
    content: Mutex<ContentCache>,
}

impl Ontology {
    /// An empty anonymous ontology.
    pub fn new(config: OntConfig) -> Self {
        Self::from_graph(UnionGraph::new(SharedGraph::new()), config)
    }

    /// The ontology stored in the graph.
    pub fn from_graph(graph: impl Into<UnionGraph>, config: OntConfig) -> Self {
        Self {
            graph: graph.into(),
            personality: Personality::shared(config.punning_mode()),
            config,
            content: Mutex::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &OntConfig {
        &self.config
    }

    #[inline]
    pub fn graph(&self) -> &UnionGraph {
        &self.graph
    }

    #[inline]
    pub fn personality(&self) -> &Arc<Personality> {
        &self.personality
    }

    fn view(&self) -> ModelView<'_> {
        ModelView::new(&self.graph, &self.personality, &self.config)
    }

    fn content(&self) -> MutexGuard<'_, ContentCache> {
        self.content.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The id read from the `rdf:type owl:Ontology` header of the base graph.
    ///
    /// An ontology without named header is anonymous, with the base graph id as key.
    pub fn id(&self) -> OntologyId {
        ontology_id(self.graph.base())
    }

    /// Renames the ontology header, keeping its statements.
    ///
    /// Use [`OntologyManager::set_ontology_id`](crate::OntologyManager::set_ontology_id) for
    /// an ontology owned by a manager, it checks that the id is not used by another one.
    pub fn set_id(&mut self, id: OntologyId) -> Result<(), OntError> {
        rename(self.graph.base(), &id);
        Ok(())
    }

    /// The subject of the header, created as a blank node if missing.
    fn ensure_header(&self) -> Subject {
        let base = self.graph.base();
        header(base).unwrap_or_else(|| {
            let node = BlankNode::default();
            base.insert(&Triple::new(node.clone(), rdf::TYPE, owl::ONTOLOGY));
            node.into()
        })
    }

    /// The annotations of the ontology header.
    pub fn annotations(&self) -> Vec<Annotation> {
        let Some(header) = header(self.graph.base()) else {
            return Vec::new();
        };
        let view = self.view();
        self.graph
            .base()
            .find(Some(header.as_ref()), None, None)
            .into_iter()
            .filter(|t| {
                view.can_as(&Term::from(t.predicate.clone()), ObjectKind::AnnotationProperty)
            })
            .filter_map(|t| {
                Some(Annotation::new(
                    t.predicate,
                    AnnotationValue::from_term(t.object)?,
                ))
            })
            .collect()
    }

    pub fn add_annotation(&mut self, annotation: &Annotation) -> bool {
        let header = self.ensure_header();
        self.graph.base().insert(&Triple::new(
            header,
            annotation.property.iri().clone(),
            annotation.value.to_term(),
        ))
    }

    pub fn remove_annotation(&mut self, annotation: &Annotation) -> bool {
        header(self.graph.base()).is_some_and(|header| {
            self.graph.base().remove(&Triple::new(
                header,
                annotation.property.iri().clone(),
                annotation.value.to_term(),
            ))
        })
    }

    /// The IRIs declared with `owl:imports` in the header.
    pub fn imports(&self) -> Vec<NamedNode> {
        import_declarations(self.graph.base())
    }

    /// The ids of the directly attached imports.
    pub fn import_ids(&self) -> Vec<OntologyId> {
        self.graph
            .imports()
            .iter()
            .map(|import| ontology_id(import.base()))
            .collect()
    }

    /// Declares the import in the header and attaches its graph.
    pub fn add_import(&mut self, import: &Ontology) -> Result<bool, OntError> {
        let id = import.id();
        let Some(iri) = id.iri() else {
            return Err(OntError::InvalidId(format!(
                "the anonymous ontology {id} can't be imported"
            )));
        };
        let header = self.ensure_header();
        let declared = self
            .graph
            .base()
            .insert(&Triple::new(header, owl::IMPORTS, iri.clone()));
        let attached = self.graph.add_import(import.graph.clone());
        Ok(declared || attached)
    }

    /// Removes the import declaration and detaches the imported graphs with this IRI.
    pub fn remove_import(&mut self, iri: &NamedNode) -> bool {
        let mut removed = false;
        if let Some(header) = header(self.graph.base()) {
            removed = self
                .graph
                .base()
                .remove(&Triple::new(header, owl::IMPORTS, iri.clone()));
        }
        let detached = self
            .graph
            .imports()
            .iter()
            .filter(|import| ontology_id(import.base()).matches_iri(iri.as_str()))
            .map(|import| import.base().id())
            .collect::<Vec<_>>();
        for graph_id in detached {
            removed |= self.graph.remove_import(graph_id);
        }
        removed
    }

    /// All the axioms of the base graph.
    pub fn axioms(&self) -> Result<Vec<AnnotatedAxiom>, OntError> {
        self.axioms_in_scope(Scope::Local)
    }

    pub fn axioms_in_scope(&self, scope: Scope) -> Result<Vec<AnnotatedAxiom>, OntError> {
        let mut content = self.content();
        let mut result = Vec::new();
        for axiom_type in AxiomType::ALL {
            result.extend(content.axioms(self.view(), scope, axiom_type)?);
        }
        Ok(result)
    }

    pub fn axioms_by_type(
        &self,
        axiom_type: AxiomType,
        scope: Scope,
    ) -> Result<Vec<AnnotatedAxiom>, OntError> {
        self.content().axioms(self.view(), scope, axiom_type)
    }

    pub fn contains_axiom(&self, axiom: &AnnotatedAxiom, scope: Scope) -> Result<bool, OntError> {
        self.content().contains(self.view(), scope, axiom)
    }

    /// The axioms referring to the entity, anonymous individual, literal or IRI.
    pub fn referencing_axioms(
        &self,
        primitive: &Primitive,
        scope: Scope,
    ) -> Result<Vec<AnnotatedAxiom>, OntError> {
        self.content().referencing(self.view(), scope, primitive)
    }

    /// Writes the axiom to the base graph, returns `false` if it is already there.
    pub fn add_axiom(&mut self, axiom: impl Into<AnnotatedAxiom>) -> Result<bool, OntError> {
        self.content().add(self.view(), &axiom.into())
    }

    /// Removes the axiom from the base graph, returns `false` if it is not there.
    ///
    /// Statements shared with other axioms (declarations, lists, expressions) are kept.
    pub fn remove_axiom(&mut self, axiom: &AnnotatedAxiom) -> Result<bool, OntError> {
        self.content().remove(self.view(), axiom)
    }

    /// The entities of the type: declared, builtin and used, or imported and used.
    pub fn entities(&self, entity_type: EntityType, scope: Scope) -> Result<Vec<Entity>, OntError> {
        content::entities(&mut self.content(), self.view(), entity_type, scope)
    }

    /// Forces the axioms to be read again from the graph.
    pub fn clear_cache(&self) {
        self.content().clear();
    }

    pub fn cache_state(&self, axiom_type: AxiomType, scope: Scope) -> CacheState {
        self.content().state(scope, axiom_type)
    }

    /// The statements skipped by the last reads when axiom read errors are ignored.
    ///
    /// A full read of an axiom type replaces the statements previously skipped for it.
    pub fn skipped_statements(&self) -> Vec<SkippedStatement> {
        self.content().skipped()
    }

    /// Serializes the base graph.
    pub fn save<W: Write>(&self, writer: W, format: RdfFormat) -> Result<W, OntError> {
        io::write_graph(self.graph.base(), writer, format)
    }

    /// Serializes the base graph to a file, replacing it only once the whole document is
    /// written.
    pub fn save_to_file(&self, path: impl AsRef<Path>, format: RdfFormat) -> Result<(), OntError> {
        io::save_to_file(self.graph.base(), path.as_ref(), format)
    }
}

impl fmt::Debug for Ontology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ontology")
            .field("id", &self.id())
            .field("graph", &self.graph)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The subject of the `rdf:type owl:Ontology` header.
///
/// With several headers the named one with the most statements is chosen.
pub(crate) fn header(graph: &SharedGraph) -> Option<Subject> {
    let mut headers = graph
        .find(None, Some(rdf::TYPE), Some(owl::ONTOLOGY.into()))
        .into_iter()
        .map(|t| {
            let size = graph.find(Some(t.subject.as_ref()), None, None).len();
            (t.subject, size)
        })
        .collect::<Vec<_>>();
    headers.sort_by_cached_key(|(subject, size)| {
        (
            matches!(subject, Subject::BlankNode(_)),
            Reverse(*size),
            subject.to_string(),
        )
    });
    headers.into_iter().next().map(|(subject, _)| subject)
}

/// Moves the header statements to the subject of `id`.
pub(crate) fn rename(base: &SharedGraph, id: &OntologyId) {
    let old = header(base);
    let new = match (id, &old) {
        (OntologyId::Named { iri, .. }, _) => Subject::from(iri.clone()),
        (OntologyId::Anonymous(_), Some(old @ Subject::BlankNode(_))) => old.clone(),
        (OntologyId::Anonymous(_), _) => BlankNode::default().into(),
    };
    if let Some(old) = old.filter(|old| *old != new) {
        for triple in base.find(Some(old.as_ref()), None, None) {
            base.remove(&triple);
            base.insert(&Triple::new(new.clone(), triple.predicate, triple.object));
        }
        let old = Term::from(old);
        for triple in base.find(None, None, Some(old.as_ref())) {
            base.remove(&triple);
            base.insert(&Triple::new(
                triple.subject,
                triple.predicate,
                Term::from(new.clone()),
            ));
        }
    }
    base.insert(&Triple::new(new.clone(), rdf::TYPE, owl::ONTOLOGY));
    for triple in base.find(Some(new.as_ref()), Some(owl::VERSION_IRI), None) {
        base.remove(&triple);
    }
    if let Some(version_iri) = id.version_iri() {
        base.insert(&Triple::new(new, owl::VERSION_IRI, version_iri.clone()));
    }
}

pub(crate) fn ontology_id(graph: &SharedGraph) -> OntologyId {
    let Some(Subject::NamedNode(iri)) = header(graph) else {
        return OntologyId::Anonymous(graph.id());
    };
    let version_iri = graph
        .find(Some(iri.as_ref().into()), Some(owl::VERSION_IRI), None)
        .into_iter()
        .find_map(|t| match t.object {
            Term::NamedNode(version_iri) => Some(version_iri),
            _ => None,
        });
    OntologyId::Named { iri, version_iri }
}

pub(crate) fn import_declarations(graph: &SharedGraph) -> Vec<NamedNode> {
    let Some(header) = header(graph) else {
        return Vec::new();
    };
    graph
        .find(Some(header.as_ref()), Some(owl::IMPORTS), None)
        .into_iter()
        .filter_map(|t| match t.object {
            Term::NamedNode(iri) => Some(iri),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Axiom, ClassExpression, OwlClass};
    use oxrdf::Literal;
    use oxrdf::vocab::rdfs;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(OwlClass::new(iri(name)))
    }

    #[test]
    fn id_follows_the_header() {
        let mut ontology = Ontology::new(OntConfig::default());
        assert!(ontology.id().is_anonymous());
        assert_eq!(
            ontology.id(),
            OntologyId::Anonymous(ontology.graph().base().id())
        );

        let comment = Annotation::new(rdfs::COMMENT, Literal::from("draft"));
        assert!(ontology.add_annotation(&comment));
        ontology
            .set_id(OntologyId::with_version(iri("o"), iri("o/1")))
            .unwrap();
        assert_eq!(
            ontology.id(),
            OntologyId::with_version(iri("o"), iri("o/1"))
        );
        assert_eq!(ontology.annotations(), vec![comment.clone()]);

        ontology.set_id(OntologyId::named(iri("p"))).unwrap();
        assert_eq!(ontology.id(), OntologyId::named(iri("p")));
        assert_eq!(ontology.annotations(), vec![comment.clone()]);
        // header type + comment
        assert_eq!(ontology.graph().base().len(), 2);

        assert!(ontology.remove_annotation(&comment));
        assert!(ontology.annotations().is_empty());
    }

    #[test]
    fn header_annotations_are_not_axioms() {
        let mut ontology = Ontology::new(OntConfig::default());
        ontology.set_id(OntologyId::named(iri("o"))).unwrap();
        ontology.add_annotation(&Annotation::new(rdfs::LABEL, Literal::from("o")));
        assert!(
            ontology
                .axioms_by_type(AxiomType::AnnotationAssertion, Scope::Local)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn imports_are_declared_and_attached() {
        let mut imported = Ontology::new(OntConfig::default());
        imported.set_id(OntologyId::named(iri("b"))).unwrap();
        imported
            .add_axiom(Axiom::declaration(OwlClass::new(iri("B"))))
            .unwrap();
        let mut ontology = Ontology::new(OntConfig::default());
        ontology.set_id(OntologyId::named(iri("a"))).unwrap();

        assert!(ontology.add_import(&imported).unwrap());
        assert!(!ontology.add_import(&imported).unwrap());
        assert_eq!(ontology.imports(), vec![iri("b")]);
        assert_eq!(ontology.import_ids(), vec![OntologyId::named(iri("b"))]);
        let declarations = |ontology: &Ontology, scope| {
            ontology
                .axioms_by_type(AxiomType::Declaration, scope)
                .unwrap()
                .len()
        };
        assert_eq!(declarations(&ontology, Scope::Local), 0);
        assert_eq!(declarations(&ontology, Scope::Global), 1);

        assert!(ontology.remove_import(&iri("b")));
        assert!(ontology.imports().is_empty());
        assert_eq!(declarations(&ontology, Scope::Global), 0);

        assert!(matches!(
            ontology.add_import(&Ontology::new(OntConfig::default())),
            Err(OntError::InvalidId(_))
        ));
    }

    #[test]
    fn add_and_remove_axioms() {
        let mut ontology = Ontology::new(OntConfig::default());
        for name in ["A", "B"] {
            ontology
                .add_axiom(Axiom::declaration(OwlClass::new(iri(name))))
                .unwrap();
        }
        let axiom = AnnotatedAxiom::new(Axiom::subclass_of(class("A"), class("B")))
            .with_annotation(Annotation::new(rdfs::COMMENT, Literal::from("why")));
        assert!(ontology.add_axiom(axiom.clone()).unwrap());
        assert!(ontology.contains_axiom(&axiom, Scope::Local).unwrap());
        assert_eq!(
            ontology
                .referencing_axioms(
                    &Primitive::Entity(Entity::new(EntityType::Class, iri("B"))),
                    Scope::Local
                )
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            ontology.cache_state(AxiomType::SubClassOf, Scope::Local),
            CacheState::Populated
        );

        assert!(ontology.remove_axiom(&axiom).unwrap());
        assert!(!ontology.remove_axiom(&axiom).unwrap());
        // the two declarations
        assert_eq!(ontology.graph().base().len(), 2);
        assert_eq!(ontology.axioms().unwrap().len(), 2);
    }

    #[test]
    fn save_writes_the_base_graph() {
        let mut ontology = Ontology::new(OntConfig::default());
        ontology.set_id(OntologyId::named(iri("o"))).unwrap();
        let output = ontology.save(Vec::new(), RdfFormat::NTriples).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "<http://example.com/o> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2002/07/owl#Ontology> .\n"
        );
    }
}
