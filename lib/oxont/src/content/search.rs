use crate::content::{Entry, SkippedStatement, read_entry};
use crate::error::OntError;
use crate::graph::{Scope, as_subject, to_subject};
use crate::model::{AxiomType, Primitive};
use crate::translate::axiom_types_of;
use crate::view::ModelView;
use crate::vocab::owl;
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, Subject, Term, Triple, TripleRef};
use rustc_hash::FxHashSet;

/// The axioms of the scope that refer to the primitive, read from the statements around it
/// instead of scanning whole buckets.
///
/// `only` restricts the search to one axiom type.
pub(crate) fn referencing(
    view: ModelView<'_>,
    scope: Scope,
    primitive: &Primitive,
    only: Option<AxiomType>,
    skipped: &mut Vec<SkippedStatement>,
) -> Result<Vec<Entry>, OntError> {
    let mut entries = Vec::new();
    for triple in candidates(&view, scope, &primitive.to_term()) {
        for axiom_type in axiom_types_of(&triple, &view) {
            if only.is_some_and(|t| t != axiom_type) {
                continue;
            }
            if let Some(entry) = read_entry(view, axiom_type, &triple, skipped)? {
                if entry.axiom.references(primitive) {
                    entries.push(entry);
                }
            }
        }
    }
    Ok(entries)
}

/// The statements of the scope that may define an axiom using `node`.
///
/// Starting from the statements mentioning the node, blank subjects are climbed up to the
/// statements using them, and reified annotations lead to their annotated statement.
fn candidates(view: &ModelView<'_>, scope: Scope, node: &Term) -> Vec<Triple> {
    let graph = view.graph();
    let mut collector = Collector::default();
    if let Some(subject) = as_subject(node) {
        collector.extend(graph.find(Scope::Global, Some(subject), None, None));
    }
    if let Term::NamedNode(predicate) = node {
        collector.extend(graph.find(Scope::Global, None, Some(predicate.as_ref()), None));
    }
    collector.extend(graph.find(Scope::Global, None, None, Some(node.as_ref())));

    while let Some(blank) = collector.queue.pop() {
        let term = Term::from(blank.clone());
        collector.extend(graph.find(Scope::Global, Some(blank.as_ref().into()), None, None));
        collector.extend(graph.find(Scope::Global, None, None, Some(term.as_ref())));
        if view.has_type(&term, owl::AXIOM) {
            collector.extend(annotated_statement(view, &term));
        }
    }
    collector
        .triples
        .into_iter()
        .filter(|t| graph.contains(scope, t))
        .collect()
}

/// The statement an `owl:Axiom` node annotates, if it is in the graph.
fn annotated_statement(view: &ModelView<'_>, node: &Term) -> Option<Triple> {
    let single = |predicate| match <[Term; 1]>::try_from(view.objects(node, predicate)) {
        Ok([value]) => Some(value),
        Err(_) => None,
    };
    let source = to_subject(single(owl::ANNOTATED_SOURCE)?)?;
    let Term::NamedNode(property) = single(owl::ANNOTATED_PROPERTY)? else {
        return None;
    };
    let target = single(owl::ANNOTATED_TARGET)?;
    let triple = Triple::new(source, property, target);
    view.graph()
        .contains(Scope::Global, TripleRef::from(&triple))
        .then_some(triple)
}

#[derive(Default)]
struct Collector {
    triples: Vec<Triple>,
    seen: FxHashSet<Triple>,
    visited: FxHashSet<BlankNode>,
    queue: Vec<BlankNode>,
}

impl Collector {
    fn extend(&mut self, triples: impl IntoIterator<Item = Triple>) {
        for triple in triples {
            if !self.seen.insert(triple.clone()) {
                continue;
            }
            if let Subject::BlankNode(blank) = &triple.subject {
                if self.visited.insert(blank.clone()) {
                    self.queue.push(blank.clone());
                }
            }
            // list cells are climbed through but never define an axiom
            if triple.predicate != rdf::FIRST && triple.predicate != rdf::REST {
                self.triples.push(triple);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OntConfig;
    use crate::factory::Personality;
    use crate::graph::{SharedGraph, UnionGraph, build_list};
    use crate::model::{Entity, EntityType};
    use oxrdf::NamedNode;
    use oxrdf::vocab::rdfs;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    #[test]
    fn finds_axioms_through_lists_and_restrictions() {
        let graph = SharedGraph::new();
        for name in ["A", "B", "C"] {
            graph.insert(&Triple::new(iri(name), rdf::TYPE, owl::CLASS));
        }
        graph.insert(&Triple::new(iri("p"), rdf::TYPE, owl::OBJECT_PROPERTY));
        let restriction = BlankNode::default();
        graph.extend(&[
            Triple::new(restriction.clone(), rdf::TYPE, owl::RESTRICTION),
            Triple::new(restriction.clone(), owl::ON_PROPERTY, iri("p")),
            Triple::new(restriction.clone(), owl::SOME_VALUES_FROM, iri("C")),
        ]);
        let (head, list) = build_list(&[iri("B").into(), restriction.into()]);
        graph.extend(&list);
        let intersection = BlankNode::default();
        graph.extend(&[
            Triple::new(intersection.clone(), rdf::TYPE, owl::CLASS),
            Triple::new(intersection.clone(), owl::INTERSECTION_OF, head),
            Triple::new(iri("A"), rdfs::SUB_CLASS_OF, intersection),
        ]);
        let graph = UnionGraph::new(graph);
        let personality = Personality::new(Default::default());
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);

        let property = Primitive::Entity(Entity::new(EntityType::ObjectProperty, iri("p")));
        let found = referencing(view, Scope::Local, &property, None, &mut Vec::new()).unwrap();
        let types = found
            .iter()
            .map(|e| e.axiom.axiom_type())
            .collect::<FxHashSet<_>>();
        let expected: FxHashSet<_> = [AxiomType::SubClassOf, AxiomType::Declaration]
            .into_iter()
            .collect();
        assert_eq!(types, expected);
        assert!(
            referencing(
                view,
                Scope::Local,
                &property,
                Some(AxiomType::SubClassOf),
                &mut Vec::new()
            )
            .unwrap()
                .iter()
                .all(|e| e.axiom.axiom_type() == AxiomType::SubClassOf)
        );
    }
}
