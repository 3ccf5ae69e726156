//! Bidirectional mapping between RDF triples and OWL 2 axioms.
//!
//! Each [`AxiomType`] has one stateless [`AxiomTranslator`], returned by [`translator`]. A
//! translator recognizes the *defining triple* of its axioms (e.g. `C rdfs:subClassOf D`) and
//! resolves the operands of the axiom through the [`Personality`](crate::Personality) of the
//! model.

mod annotations;
mod assertion;
mod characteristic;
mod declaration;
mod nary;
mod pair;
mod reader;
mod writer;

pub use reader::ObjectReader;
pub use writer::ObjectWriter;

use crate::error::{AxiomReadError, OntError};
use crate::factory::ObjectKind;
use crate::graph::{Scope, UnionTripleIter};
use crate::model::{AnnotatedAxiom, Axiom, AxiomType, Wrapped};
use crate::view::ModelView;
use oxrdf::{NamedNodeRef, Term, Triple};
use std::fmt;
use tracing::trace;

/// The translator of one axiom type.
///
/// `list_statements` and `test_statement` always agree: a triple is listed if and only if it
/// passes `test_statement`.
pub trait AxiomTranslator: fmt::Debug + Send + Sync {
    fn axiom_type(&self) -> AxiomType;

    /// The triples that may be defining triples, before any shape check.
    ///
    /// The graphs are only queried as the iterator is consumed.
    fn candidates(&self, view: &ModelView<'_>, scope: Scope) -> Box<dyn Iterator<Item = Triple>>;

    /// Checks the shape of a candidate, ignoring the configuration.
    fn matches(&self, triple: &Triple, view: &ModelView<'_>) -> bool;

    /// Reads the axiom defined by the triple, without its annotations.
    fn to_axiom(
        &self,
        triple: &Triple,
        reader: &mut ObjectReader<'_>,
    ) -> Result<Wrapped<Axiom>, OntError>;

    /// Writes the axiom, without its annotations, and returns its defining triples.
    fn write(&self, axiom: &Axiom, writer: &mut ObjectWriter<'_>)
    -> Result<Vec<Triple>, OntError>;

    /// Returns `true` if the triple is the defining triple of an axiom of this type.
    fn test_statement(&self, triple: &Triple, view: &ModelView<'_>) -> bool {
        is_enabled(self.axiom_type(), view) && self.matches(triple, view)
    }

    /// The defining triples of all the axioms of this type.
    fn list_statements<'a>(
        &'a self,
        view: ModelView<'a>,
        scope: Scope,
    ) -> Box<dyn Iterator<Item = Triple> + 'a> {
        if !is_enabled(self.axiom_type(), &view) {
            return Box::new(std::iter::empty());
        }
        Box::new(
            self.candidates(&view, scope)
                .filter(move |triple| self.matches(triple, &view)),
        )
    }
}

fn is_enabled(axiom_type: AxiomType, view: &ModelView<'_>) -> bool {
    !axiom_type.is_annotation_axiom() || view.config().load_annotation_axioms()
}

/// The translator of the given axiom type.
pub fn translator(axiom_type: AxiomType) -> &'static dyn AxiomTranslator {
    match axiom_type {
        AxiomType::Declaration => &declaration::DECLARATION,
        AxiomType::SubClassOf => &pair::SUB_CLASS_OF,
        AxiomType::EquivalentClasses => &pair::EQUIVALENT_CLASSES,
        AxiomType::DisjointClasses => &nary::DISJOINT_CLASSES,
        AxiomType::DisjointUnion => &nary::DISJOINT_UNION,
        AxiomType::SubObjectPropertyOf => &pair::SUB_OBJECT_PROPERTY_OF,
        AxiomType::SubPropertyChainOf => &nary::SUB_PROPERTY_CHAIN_OF,
        AxiomType::EquivalentObjectProperties => &pair::EQUIVALENT_OBJECT_PROPERTIES,
        AxiomType::DisjointObjectProperties => &nary::DISJOINT_OBJECT_PROPERTIES,
        AxiomType::InverseObjectProperties => &pair::INVERSE_OBJECT_PROPERTIES,
        AxiomType::ObjectPropertyDomain => &pair::OBJECT_PROPERTY_DOMAIN,
        AxiomType::ObjectPropertyRange => &pair::OBJECT_PROPERTY_RANGE,
        AxiomType::FunctionalObjectProperty => &characteristic::FUNCTIONAL_OBJECT_PROPERTY,
        AxiomType::InverseFunctionalObjectProperty => {
            &characteristic::INVERSE_FUNCTIONAL_OBJECT_PROPERTY
        }
        AxiomType::ReflexiveObjectProperty => &characteristic::REFLEXIVE_OBJECT_PROPERTY,
        AxiomType::IrreflexiveObjectProperty => &characteristic::IRREFLEXIVE_OBJECT_PROPERTY,
        AxiomType::SymmetricObjectProperty => &characteristic::SYMMETRIC_OBJECT_PROPERTY,
        AxiomType::AsymmetricObjectProperty => &characteristic::ASYMMETRIC_OBJECT_PROPERTY,
        AxiomType::TransitiveObjectProperty => &characteristic::TRANSITIVE_OBJECT_PROPERTY,
        AxiomType::SubDataPropertyOf => &pair::SUB_DATA_PROPERTY_OF,
        AxiomType::EquivalentDataProperties => &pair::EQUIVALENT_DATA_PROPERTIES,
        AxiomType::DisjointDataProperties => &nary::DISJOINT_DATA_PROPERTIES,
        AxiomType::DataPropertyDomain => &pair::DATA_PROPERTY_DOMAIN,
        AxiomType::DataPropertyRange => &pair::DATA_PROPERTY_RANGE,
        AxiomType::FunctionalDataProperty => &characteristic::FUNCTIONAL_DATA_PROPERTY,
        AxiomType::DatatypeDefinition => &pair::DATATYPE_DEFINITION,
        AxiomType::HasKey => &nary::HAS_KEY,
        AxiomType::ClassAssertion => &assertion::CLASS_ASSERTION,
        AxiomType::ObjectPropertyAssertion => &assertion::OBJECT_PROPERTY_ASSERTION,
        AxiomType::NegativeObjectPropertyAssertion => {
            &assertion::NEGATIVE_OBJECT_PROPERTY_ASSERTION
        }
        AxiomType::DataPropertyAssertion => &assertion::DATA_PROPERTY_ASSERTION,
        AxiomType::NegativeDataPropertyAssertion => &assertion::NEGATIVE_DATA_PROPERTY_ASSERTION,
        AxiomType::SameIndividual => &pair::SAME_INDIVIDUAL,
        AxiomType::DifferentIndividuals => &nary::DIFFERENT_INDIVIDUALS,
        AxiomType::AnnotationAssertion => &assertion::ANNOTATION_ASSERTION,
        AxiomType::SubAnnotationPropertyOf => &pair::SUB_ANNOTATION_PROPERTY_OF,
        AxiomType::AnnotationPropertyDomain => &pair::ANNOTATION_PROPERTY_DOMAIN,
        AxiomType::AnnotationPropertyRange => &pair::ANNOTATION_PROPERTY_RANGE,
    }
}

/// The axiom types whose translators accept the triple.
pub fn axiom_types_of(triple: &Triple, view: &ModelView<'_>) -> Vec<AxiomType> {
    AxiomType::ALL
        .into_iter()
        .filter(|t| translator(*t).test_statement(triple, view))
        .collect()
}

/// Reads the annotated axiom defined by `triple`.
///
/// The triple must have passed the `test_statement` of the axiom type translator.
pub fn read_axiom(
    axiom_type: AxiomType,
    triple: &Triple,
    view: ModelView<'_>,
) -> Result<Wrapped<AnnotatedAxiom>, OntError> {
    let mut reader = ObjectReader::new(view);
    read_with(axiom_type, triple, &mut reader)
        .map_err(|e| AxiomReadError::new(triple.clone(), axiom_type, e).into())
}

fn read_with(
    axiom_type: AxiomType,
    triple: &Triple,
    reader: &mut ObjectReader<'_>,
) -> Result<Wrapped<AnnotatedAxiom>, OntError> {
    let axiom = translator(axiom_type).to_axiom(triple, reader)?;
    let mut triples = axiom.triples;
    let mut annotated = AnnotatedAxiom::new(axiom.value);
    if axiom_type != AxiomType::AnnotationAssertion
        || reader.view().config().allow_bulk_annotation_assertions()
    {
        annotated.annotations =
            annotations::read_annotations(reader, triple)?.drain_into(&mut triples);
    }
    trace!("Read {axiom_type} from {triple}");
    Ok(Wrapped::new(annotated, triples))
}

/// The triples of an axiom.
#[derive(Debug, Clone, Default)]
pub struct Written {
    /// Every triple to insert.
    pub triples: Vec<Triple>,
    /// The defining triples among them.
    pub defining: Vec<Triple>,
}

/// Translates an annotated axiom into triples without touching the graph.
pub fn write_axiom(axiom: &AnnotatedAxiom, view: ModelView<'_>) -> Result<Written, OntError> {
    let mut writer = ObjectWriter::new(view);
    let defining = translator(axiom.axiom_type()).write(&axiom.axiom, &mut writer)?;
    for triple in &defining {
        annotations::write_annotations(&mut writer, triple, &axiom.annotations)?;
    }
    Ok(Written {
        triples: writer.into_triples(),
        defining,
    })
}

/// Triples of the scope with the given predicate.
fn with_predicate(
    view: &ModelView<'_>,
    scope: Scope,
    predicate: NamedNodeRef<'_>,
) -> UnionTripleIter {
    view.find_iter(scope, None, Some(predicate), None)
}

/// `rdf:type` triples of the scope with the given object.
fn with_type(view: &ModelView<'_>, scope: Scope, rdf_type: NamedNodeRef<'_>) -> UnionTripleIter {
    view.find_iter(
        scope,
        None,
        Some(oxrdf::vocab::rdf::TYPE),
        Some(rdf_type.into()),
    )
}

fn subject_term(triple: &Triple) -> Term {
    triple.subject.clone().into()
}

fn subject_is(triple: &Triple, view: &ModelView<'_>, kind: ObjectKind) -> bool {
    view.can_as(&subject_term(triple), kind)
}

fn object_is(triple: &Triple, view: &ModelView<'_>, kind: ObjectKind) -> bool {
    view.can_as(&triple.object, kind)
}

/// Returns `true` if one of the given axiom types claims the triple first.
fn claimed_by(triple: &Triple, view: &ModelView<'_>, types: &[AxiomType]) -> bool {
    types
        .iter()
        .any(|t| translator(*t).matches(triple, view))
}

fn unexpected(expected: AxiomType, axiom: &Axiom) -> OntError {
    OntError::InvalidAxiom(format!(
        "the {expected} translator can't write a {} axiom",
        axiom.axiom_type()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OntConfig, PunningMode};
    use crate::factory::Personality;
    use crate::graph::{SharedGraph, UnionGraph};
    use crate::vocab::owl;
    use oxrdf::NamedNode;
    use oxrdf::vocab::{rdf, rdfs};
    use std::collections::HashSet;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn subclass(graph: &SharedGraph, sub: &str, sup: &str) -> Triple {
        let triple = Triple::new(iri(sub), rdfs::SUB_CLASS_OF, iri(sup));
        graph.extend(&[
            Triple::new(iri(sub), rdf::TYPE, owl::CLASS),
            Triple::new(iri(sup), rdf::TYPE, owl::CLASS),
            triple.clone(),
        ]);
        triple
    }

    #[test]
    fn imports_are_listed_when_reached() {
        let (base, import) = (SharedGraph::new(), SharedGraph::new());
        let local = subclass(&base, "A", "B");
        let imported = subclass(&import, "C", "D");
        let mut graph = UnionGraph::new(base);
        graph.add_import(UnionGraph::new(import.clone()));
        let personality = Personality::new(PunningMode::Medium);
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);

        let mut statements =
            translator(AxiomType::SubClassOf).list_statements(view, Scope::Global);
        assert_eq!(statements.next(), Some(local));
        let late = subclass(&import, "E", "D");
        assert_eq!(
            statements.collect::<HashSet<_>>(),
            HashSet::from([imported, late])
        );
    }
}
