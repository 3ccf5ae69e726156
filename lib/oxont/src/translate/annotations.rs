//! Axiom annotations, either reified with an `owl:Axiom` node or attached directly to the blank
//! subject of an n-ary construct.

use crate::error::OntError;
use crate::factory::ObjectKind;
use crate::graph::{Scope, is_iri};
use crate::model::{Annotation, Operands, Wrapped};
use crate::translate::reader::ObjectReader;
use crate::translate::writer::ObjectWriter;
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, NamedNodeRef, Subject, Term, Triple, TripleRef};

/// Types of the blank nodes that carry their annotations directly.
const DIRECTLY_ANNOTATED: [NamedNodeRef<'static>; 4] = [
    owl::ALL_DISJOINT_CLASSES,
    owl::ALL_DISJOINT_PROPERTIES,
    owl::ALL_DIFFERENT,
    owl::NEGATIVE_PROPERTY_ASSERTION,
];

fn is_directly_annotated(triple: &Triple) -> bool {
    triple.predicate == rdf::TYPE
        && matches!(triple.subject, Subject::BlankNode(_))
        && DIRECTLY_ANNOTATED
            .iter()
            .any(|t| is_iri(&triple.object, *t))
}

/// The `owl:Axiom` nodes reifying the triple.
fn reifications(view: &ModelView<'_>, scope: Scope, triple: &Triple) -> Vec<BlankNode> {
    let source = Term::from(triple.subject.clone());
    view.find(scope, None, Some(owl::ANNOTATED_SOURCE), Some(source.as_ref()))
        .into_iter()
        .filter_map(|t| match t.subject {
            Subject::BlankNode(node) => Some(node),
            _ => None,
        })
        .filter(|node| {
            let graph = view.graph();
            graph.contains(scope, TripleRef::new(node, rdf::TYPE, owl::AXIOM))
                && graph.contains(
                    scope,
                    TripleRef::new(node, owl::ANNOTATED_PROPERTY, triple.predicate.as_ref()),
                )
                && graph.contains(
                    scope,
                    TripleRef::new(node, owl::ANNOTATED_TARGET, triple.object.as_ref()),
                )
        })
        .collect()
}

/// The annotations carried by `node` as `node P v` triples with an annotation property P.
fn annotations_of(
    reader: &ObjectReader<'_>,
    scope: Scope,
    node: &Subject,
    triples: &mut Vec<Triple>,
) -> Result<Vec<Annotation>, OntError> {
    let view = reader.view();
    let mut annotations = Vec::new();
    for triple in view.find(scope, Some(node.as_ref()), None, None) {
        let property = Term::from(triple.predicate.clone());
        if !view.can_as(&property, ObjectKind::AnnotationProperty) {
            continue;
        }
        annotations.push(Annotation::new(
            reader.annotation_property(&property)?,
            reader.annotation_value(&triple.object)?,
        ));
        triples.push(triple);
    }
    Ok(annotations)
}

/// Reads the annotations of the axiom defined by `triple`.
///
/// Annotations of several reifications of the same triple are merged.
pub(crate) fn read_annotations(
    reader: &ObjectReader<'_>,
    triple: &Triple,
) -> Result<Wrapped<Operands<Annotation>>, OntError> {
    let scope = Scope::Global;
    let mut triples = Vec::new();
    let mut annotations = Operands::default();
    if is_directly_annotated(triple) {
        for annotation in annotations_of(reader, scope, &triple.subject, &mut triples)? {
            annotations.insert(annotation);
        }
    }
    for node in reifications(reader.view(), scope, triple) {
        let subject = Subject::from(node.clone());
        triples.extend([
            Triple::new(node.clone(), rdf::TYPE, owl::AXIOM),
            Triple::new(node.clone(), owl::ANNOTATED_SOURCE, triple.subject.clone()),
            Triple::new(node.clone(), owl::ANNOTATED_PROPERTY, triple.predicate.clone()),
            Triple::new(node, owl::ANNOTATED_TARGET, triple.object.clone()),
        ]);
        for annotation in annotations_of(reader, scope, &subject, &mut triples)? {
            annotations.insert(annotation);
        }
    }
    Ok(Wrapped::new(annotations, triples))
}

/// Writes the annotations of the axiom defined by `triple`.
///
/// A reification of the triple that already carries exactly the same annotations is reused.
pub(crate) fn write_annotations(
    writer: &mut ObjectWriter<'_>,
    triple: &Triple,
    annotations: &Operands<Annotation>,
) -> Result<(), OntError> {
    if annotations.is_empty() {
        return Ok(());
    }
    if is_directly_annotated(triple) {
        for annotation in annotations {
            writer.add(
                triple.subject.clone(),
                annotation.property.as_ref(),
                annotation.value.to_term(),
            );
        }
        return Ok(());
    }
    let reader = ObjectReader::new(*writer.view());
    for node in reifications(writer.view(), Scope::Local, triple) {
        let mut ignored = Vec::new();
        let existing = annotations_of(&reader, Scope::Local, &node.into(), &mut ignored)?;
        if Operands::new(existing) == *annotations {
            return Ok(());
        }
    }
    let node = BlankNode::default();
    writer.add(node.clone(), rdf::TYPE, owl::AXIOM);
    writer.add(node.clone(), owl::ANNOTATED_SOURCE, triple.subject.clone());
    writer.add(node.clone(), owl::ANNOTATED_PROPERTY, triple.predicate.clone());
    writer.add(node.clone(), owl::ANNOTATED_TARGET, triple.object.clone());
    for annotation in annotations {
        writer.add(
            node.clone(),
            annotation.property.as_ref(),
            annotation.value.to_term(),
        );
    }
    Ok(())
}
