use crate::error::OntError;
use crate::graph::{Scope, UnionGraph, as_subject, is_iri};
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, Term, TermRef, Triple};
use rustc_hash::FxHashSet;

/// An RDF collection read from a graph together with the triples that encode it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdfList {
    head: Term,
    items: Vec<Term>,
    triples: Vec<Triple>,
}

impl RdfList {
    /// The head node (`rdf:nil` for an empty list).
    #[inline]
    pub fn head(&self) -> &Term {
        &self.head
    }

    #[inline]
    pub fn items(&self) -> &[Term] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The `rdf:first`/`rdf:rest` triples of the list.
    #[inline]
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    #[inline]
    pub fn into_parts(self) -> (Vec<Term>, Vec<Triple>) {
        (self.items, self.triples)
    }
}

/// Reads the RDF collection starting at `head`.
///
/// Each node must have exactly one `rdf:first` and one `rdf:rest` and the chain must end with
/// `rdf:nil`, anything else (including a cycle) is an [`OntError::MalformedList`].
pub fn read_list(graph: &UnionGraph, scope: Scope, head: TermRef<'_>) -> Result<RdfList, OntError> {
    let head = head.into_owned();
    let mut items = Vec::new();
    let mut triples = Vec::new();
    let mut visited = FxHashSet::default();
    let mut current = head.clone();
    while !is_iri(&current, rdf::NIL) {
        if !visited.insert(current.clone()) {
            return Err(OntError::MalformedList(format!(
                "the list starting at {head} is cyclic at {current}"
            )));
        }
        let next = {
            let Some(subject) = as_subject(&current) else {
                return Err(OntError::MalformedList(format!(
                    "the literal {current} is used as a list node"
                )));
            };
            let firsts = graph.find(scope, Some(subject), Some(rdf::FIRST), None);
            let rests = graph.find(scope, Some(subject), Some(rdf::REST), None);
            let ([first], [rest]) = (firsts.as_slice(), rests.as_slice()) else {
                return Err(OntError::MalformedList(format!(
                    "the list node {current} has {} rdf:first and {} rdf:rest values",
                    firsts.len(),
                    rests.len()
                )));
            };
            items.push(first.object.clone());
            triples.push(first.clone());
            triples.push(rest.clone());
            rest.object.clone()
        };
        current = next;
    }
    Ok(RdfList {
        head,
        items,
        triples,
    })
}

/// Builds the triples of a fresh RDF collection, returns its head and the triples to insert.
pub(crate) fn build_list(items: &[Term]) -> (Term, Vec<Triple>) {
    let mut triples = Vec::with_capacity(items.len() * 2);
    let mut rest: Term = rdf::NIL.into_owned().into();
    for item in items.iter().rev() {
        let node = BlankNode::default();
        triples.push(Triple::new(node.clone(), rdf::FIRST, item.clone()));
        triples.push(Triple::new(node.clone(), rdf::REST, rest));
        rest = node.into();
    }
    triples.reverse();
    (rest, triples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SharedGraph;
    use oxrdf::{Literal, NamedNode};

    fn iri(suffix: &str) -> Term {
        NamedNode::new_unchecked(format!("http://example.com/{suffix}")).into()
    }

    #[test]
    fn build_then_read() {
        let graph = SharedGraph::new();
        let items = vec![iri("a"), iri("b"), Literal::from(1).into()];
        let (head, triples) = build_list(&items);
        assert_eq!(triples.len(), 6);
        graph.extend(&triples);
        let list = read_list(&UnionGraph::new(graph), Scope::Local, head.as_ref()).unwrap();
        assert_eq!(list.items(), items.as_slice());
        assert_eq!(list.triples().len(), 6);
    }

    #[test]
    fn empty_list() {
        let (head, triples) = build_list(&[]);
        assert!(triples.is_empty());
        let list =
            read_list(&UnionGraph::new(SharedGraph::new()), Scope::Local, head.as_ref()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn cyclic_list_is_rejected() {
        let graph = SharedGraph::new();
        let (n1, n2) = (BlankNode::default(), BlankNode::default());
        graph.insert(&Triple::new(n1.clone(), rdf::FIRST, iri("a")));
        graph.insert(&Triple::new(n1.clone(), rdf::REST, n2.clone()));
        graph.insert(&Triple::new(n2.clone(), rdf::FIRST, iri("b")));
        graph.insert(&Triple::new(n2, rdf::REST, n1.clone()));
        let result = read_list(&UnionGraph::new(graph), Scope::Local, n1.as_ref().into());
        assert!(matches!(result, Err(OntError::MalformedList(_))));
    }

    #[test]
    fn missing_rest_is_rejected() {
        let graph = SharedGraph::new();
        let n1 = BlankNode::default();
        graph.insert(&Triple::new(n1.clone(), rdf::FIRST, iri("a")));
        let result = read_list(&UnionGraph::new(graph), Scope::Local, n1.as_ref().into());
        assert!(matches!(result, Err(OntError::MalformedList(_))));
    }
}
