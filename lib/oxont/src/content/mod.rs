//! The axioms of an ontology, read lazily from its graph and kept per axiom type.
//!
//! Each `(scope, axiom type)` pair has a bucket that goes through the [`CacheState`] states:
//! it is populated by a scan of the translator on first read, updated in place by
//! [`ContentCache::add`] and [`ContentCache::remove`], and becomes stale when the graph has
//! been changed by other means or on [`ContentCache::clear`].
//!
//! When caching is disabled no axiom is kept: listings scan the graph and containment checks
//! search the statements around one primitive of the axiom. Both paths give the same answers.
//! The statements skipped by these uncached reads are still kept per axiom type, each full read
//! of a type replacing those of the previous one.

mod entities;
mod search;

pub(crate) use entities::entities;
pub(crate) use search::referencing;

use crate::error::OntError;
use crate::graph::Scope;
use crate::model::{AnnotatedAxiom, AxiomType, Primitive};
use crate::translate::{axiom_types_of, read_axiom, translator, write_axiom};
use crate::view::ModelView;
use oxrdf::vocab::rdf;
use oxrdf::{Subject, Triple};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use tracing::{debug, warn};

/// The state of the cached axioms of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheState {
    /// Never read.
    #[default]
    Uninitialized,
    /// In sync with the graph.
    Populated,
    /// Will be rebuilt on the next read.
    Stale,
}

/// A statement that matched an axiom pattern but could not be read, kept when read errors are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStatement {
    statement: Triple,
    axiom_type: AxiomType,
    reason: String,
}

impl SkippedStatement {
    #[inline]
    pub fn statement(&self) -> &Triple {
        &self.statement
    }

    #[inline]
    pub fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for SkippedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} skipped as {}: {}",
            self.statement, self.axiom_type, self.reason
        )
    }
}

/// An axiom with its defining statement and every statement it has been read from.
#[derive(Debug, Clone)]
pub(crate) struct Entry {
    pub defining: Triple,
    pub axiom: AnnotatedAxiom,
    pub triples: Vec<Triple>,
}

/// Reads the axiom defined by `triple`, or records it as skipped in lenient mode.
pub(crate) fn read_entry(
    view: ModelView<'_>,
    axiom_type: AxiomType,
    triple: &Triple,
    skipped: &mut Vec<SkippedStatement>,
) -> Result<Option<Entry>, OntError> {
    match read_axiom(axiom_type, triple, view) {
        Ok(wrapped) => {
            let mut triples = Vec::with_capacity(wrapped.triples.len());
            for t in wrapped.triples {
                if !triples.contains(&t) {
                    triples.push(t);
                }
            }
            Ok(Some(Entry {
                defining: triple.clone(),
                axiom: wrapped.value,
                triples,
            }))
        }
        Err(e) if view.config().ignore_axioms_read_errors() => {
            warn!("Skipping statement {triple}: {e}");
            skipped.push(SkippedStatement {
                statement: triple.clone(),
                axiom_type,
                reason: e.to_string(),
            });
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Reads every axiom of the type from the graph.
pub(crate) fn scan(
    view: ModelView<'_>,
    scope: Scope,
    axiom_type: AxiomType,
    skipped: &mut Vec<SkippedStatement>,
) -> Result<Vec<Entry>, OntError> {
    let mut entries = Vec::new();
    for triple in translator(axiom_type).list_statements(view, scope) {
        if let Some(entry) = read_entry(view, axiom_type, &triple, skipped)? {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn distinct(entries: &[Entry]) -> Vec<AnnotatedAxiom> {
    let mut seen = FxHashSet::default();
    entries
        .iter()
        .filter(|e| seen.insert(&e.axiom))
        .map(|e| e.axiom.clone())
        .collect()
}

#[derive(Debug, Default)]
struct Bucket {
    state: CacheState,
    entries: Vec<Entry>,
    /// number of entries per axiom
    index: FxHashMap<AnnotatedAxiom, usize>,
    skipped: Vec<SkippedStatement>,
}

impl Bucket {
    fn fill(&mut self, entries: Vec<Entry>, skipped: Vec<SkippedStatement>) {
        self.index.clear();
        for entry in &entries {
            *self.index.entry(entry.axiom.clone()).or_default() += 1;
        }
        self.entries = entries;
        self.skipped = skipped;
        self.state = CacheState::Populated;
    }

    fn push(&mut self, entry: Option<Entry>, skipped: Vec<SkippedStatement>) {
        if let Some(entry) = entry {
            *self.index.entry(entry.axiom.clone()).or_default() += 1;
            self.entries.push(entry);
        }
        self.skipped.extend(skipped);
    }

    /// Drops the entries defined by one of the triples.
    fn evict(&mut self, defining: &FxHashSet<Triple>) {
        let index = &mut self.index;
        self.entries.retain(|entry| {
            if !defining.contains(&entry.defining) {
                return true;
            }
            if let Some(count) = index.get_mut(&entry.axiom) {
                *count -= 1;
                if *count == 0 {
                    index.remove(&entry.axiom);
                }
            }
            false
        });
        self.skipped.retain(|s| !defining.contains(&s.statement));
    }

    fn contains(&self, axiom: &AnnotatedAxiom) -> bool {
        self.index.contains_key(axiom)
    }
}

/// The per-type axiom buckets of one ontology.
#[derive(Debug, Default)]
pub(crate) struct ContentCache {
    buckets: FxHashMap<(Scope, AxiomType), Bucket>,
    /// fingerprint of the graph the buckets are in sync with
    fingerprint: Vec<(u64, u64)>,
    /// statements skipped by the reads done without the buckets
    uncached_skipped: FxHashMap<(Scope, AxiomType), Vec<SkippedStatement>>,
}

impl ContentCache {
    pub fn state(&self, scope: Scope, axiom_type: AxiomType) -> CacheState {
        self.buckets
            .get(&(scope, axiom_type))
            .map_or(CacheState::Uninitialized, |b| b.state)
    }

    /// Marks every populated bucket as stale.
    pub fn clear(&mut self) {
        self.invalidate("explicit clear");
    }

    fn invalidate(&mut self, reason: &str) {
        let mut invalidated = 0;
        for bucket in self.buckets.values_mut() {
            if bucket.state == CacheState::Populated {
                bucket.state = CacheState::Stale;
                invalidated += 1;
            }
        }
        if invalidated > 0 {
            debug!("Invalidated {invalidated} axiom buckets: {reason}");
        }
    }

    /// Checks that the graph has only been changed through this cache.
    fn refresh(&mut self, view: &ModelView<'_>) {
        let fingerprint = view.graph().fingerprint();
        if fingerprint != self.fingerprint {
            self.invalidate("the graph has been modified");
            self.fingerprint = fingerprint;
        }
    }

    /// The populated bucket of the type, scanning the graph if needed.
    fn bucket(
        &mut self,
        view: ModelView<'_>,
        scope: Scope,
        axiom_type: AxiomType,
    ) -> Result<&Bucket, OntError> {
        self.refresh(&view);
        let bucket = self.buckets.entry((scope, axiom_type)).or_default();
        if bucket.state != CacheState::Populated {
            let mut skipped = Vec::new();
            let entries = scan(view, scope, axiom_type, &mut skipped)?;
            debug!(
                "Populated the {axiom_type} bucket ({scope:?}) with {} statements",
                entries.len()
            );
            bucket.fill(entries, skipped);
        }
        Ok(bucket)
    }

    fn scan_uncached(
        &mut self,
        view: ModelView<'_>,
        scope: Scope,
        axiom_type: AxiomType,
    ) -> Result<Vec<Entry>, OntError> {
        let mut skipped = Vec::new();
        let entries = scan(view, scope, axiom_type, &mut skipped)?;
        self.uncached_skipped.insert((scope, axiom_type), skipped);
        Ok(entries)
    }

    fn search_uncached(
        &mut self,
        view: ModelView<'_>,
        scope: Scope,
        primitive: &Primitive,
        only: Option<AxiomType>,
    ) -> Result<Vec<Entry>, OntError> {
        let mut skipped = Vec::new();
        let entries = referencing(view, scope, primitive, only, &mut skipped)?;
        for statement in skipped {
            let known = self
                .uncached_skipped
                .entry((scope, statement.axiom_type))
                .or_default();
            if !known.contains(&statement) {
                known.push(statement);
            }
        }
        Ok(entries)
    }

    fn entries(
        &mut self,
        view: ModelView<'_>,
        scope: Scope,
        axiom_type: AxiomType,
    ) -> Result<Vec<Entry>, OntError> {
        if view.config().cache_content() {
            Ok(self.bucket(view, scope, axiom_type)?.entries.clone())
        } else {
            self.scan_uncached(view, scope, axiom_type)
        }
    }

    /// The distinct axioms of the type.
    pub fn axioms(
        &mut self,
        view: ModelView<'_>,
        scope: Scope,
        axiom_type: AxiomType,
    ) -> Result<Vec<AnnotatedAxiom>, OntError> {
        if view.config().cache_content() {
            Ok(distinct(&self.bucket(view, scope, axiom_type)?.entries))
        } else {
            Ok(distinct(&self.scan_uncached(view, scope, axiom_type)?))
        }
    }

    pub fn contains(
        &mut self,
        view: ModelView<'_>,
        scope: Scope,
        axiom: &AnnotatedAxiom,
    ) -> Result<bool, OntError> {
        let axiom_type = axiom.axiom_type();
        if view.config().cache_content() {
            return Ok(self.bucket(view, scope, axiom_type)?.contains(axiom));
        }
        let found = match axiom.primitives().into_iter().next() {
            Some(primitive) => self.search_uncached(view, scope, &primitive, Some(axiom_type))?,
            None => self.scan_uncached(view, scope, axiom_type)?,
        };
        Ok(found.iter().any(|e| e.axiom == *axiom))
    }

    /// The distinct axioms of all types referring to the primitive.
    pub fn referencing(
        &mut self,
        view: ModelView<'_>,
        scope: Scope,
        primitive: &Primitive,
    ) -> Result<Vec<AnnotatedAxiom>, OntError> {
        if !view.config().cache_content() {
            return Ok(distinct(&self.search_uncached(view, scope, primitive, None)?));
        }
        let mut result = Vec::new();
        for axiom_type in AxiomType::ALL {
            let bucket = self.bucket(view, scope, axiom_type)?;
            result.extend(
                bucket
                    .entries
                    .iter()
                    .filter(|e| e.axiom.references(primitive))
                    .cloned(),
            );
        }
        Ok(distinct(&result))
    }

    /// The statements skipped by the populated buckets and by the uncached reads.
    pub fn skipped(&self) -> Vec<SkippedStatement> {
        let mut result = Vec::<SkippedStatement>::new();
        for scope in [Scope::Local, Scope::Global] {
            for axiom_type in AxiomType::ALL {
                let key = (scope, axiom_type);
                let cached = self
                    .buckets
                    .get(&key)
                    .filter(|b| b.state == CacheState::Populated)
                    .map(|b| b.skipped.as_slice());
                let uncached = self.uncached_skipped.get(&key).map(Vec::as_slice);
                for statement in [cached, uncached].into_iter().flatten().flatten() {
                    if !result.contains(statement) {
                        result.push(statement.clone());
                    }
                }
            }
        }
        result
    }

    /// Writes the axiom into the base graph, returns `false` if it is already there.
    pub fn add(&mut self, view: ModelView<'_>, axiom: &AnnotatedAxiom) -> Result<bool, OntError> {
        if self.contains(view, Scope::Local, axiom)? {
            return Ok(false);
        }
        let written = write_axiom(axiom, view)?;
        let base = view.graph().base();
        let inserted = written
            .triples
            .iter()
            .filter(|t| base.insert(*t))
            .cloned()
            .collect::<Vec<_>>();
        debug!(
            "Added {} axiom with {} new statements",
            axiom.axiom_type(),
            inserted.len()
        );
        if view.config().cache_content() {
            self.apply(view, &written.defining, &inserted)?;
        }
        Ok(true)
    }

    /// Removes every occurrence of the axiom from the base graph, keeping the statements that
    /// other axioms are read from.
    pub fn remove(
        &mut self,
        view: ModelView<'_>,
        axiom: &AnnotatedAxiom,
    ) -> Result<bool, OntError> {
        let mut targets = Vec::new();
        let mut kept = FxHashSet::default();
        for axiom_type in AxiomType::ALL {
            for entry in self.entries(view, Scope::Local, axiom_type)? {
                if entry.axiom == *axiom {
                    targets.push(entry);
                } else {
                    kept.extend(entry.triples);
                }
            }
        }
        if targets.is_empty() {
            return Ok(false);
        }
        let base = view.graph().base();
        let mut removed = Vec::new();
        for triple in targets.iter().flat_map(|e| &e.triples) {
            if !kept.contains(triple) && base.remove(triple) {
                removed.push(triple.clone());
            }
        }
        debug!(
            "Removed {} axiom with {} statements",
            axiom.axiom_type(),
            removed.len()
        );
        if view.config().cache_content() {
            let defining = targets.into_iter().map(|e| e.defining).collect::<Vec<_>>();
            self.apply(view, &defining, &removed)?;
        }
        Ok(true)
    }

    /// Brings the populated buckets in sync after the given statements have been inserted or
    /// removed by this cache.
    fn apply(
        &mut self,
        view: ModelView<'_>,
        defining: &[Triple],
        changed: &[Triple],
    ) -> Result<(), OntError> {
        let fingerprint = view.graph().fingerprint();
        // a typed IRI may change how any other statement is viewed
        if changed
            .iter()
            .any(|t| t.predicate == rdf::TYPE && matches!(t.subject, Subject::NamedNode(_)))
        {
            self.invalidate("an IRI type changed");
            self.fingerprint = fingerprint;
            return Ok(());
        }
        let changed_set = changed.iter().collect::<FxHashSet<_>>();
        let mut rescan = defining.iter().cloned().collect::<FxHashSet<_>>();
        rescan.extend(changed.iter().cloned());
        for bucket in self.buckets.values() {
            if bucket.state == CacheState::Populated {
                rescan.extend(
                    bucket
                        .entries
                        .iter()
                        .filter(|e| e.triples.iter().any(|t| changed_set.contains(t)))
                        .map(|e| e.defining.clone()),
                );
            }
        }
        for bucket in self.buckets.values_mut() {
            if bucket.state == CacheState::Populated {
                bucket.evict(&rescan);
            }
        }
        for scope in [Scope::Local, Scope::Global] {
            for triple in &rescan {
                if !view.graph().contains(scope, triple) {
                    continue;
                }
                for axiom_type in axiom_types_of(triple, &view) {
                    let Some(bucket) = self.buckets.get_mut(&(scope, axiom_type)) else {
                        continue;
                    };
                    if bucket.state != CacheState::Populated {
                        continue;
                    }
                    let mut skipped = Vec::new();
                    match read_entry(view, axiom_type, triple, &mut skipped) {
                        Ok(entry) => bucket.push(entry, skipped),
                        Err(e) => {
                            // raised again by the next read of the bucket
                            debug!("Unable to update the {axiom_type} bucket: {e}");
                            bucket.state = CacheState::Stale;
                        }
                    }
                }
            }
        }
        self.fingerprint = fingerprint;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OntConfig;
    use crate::factory::Personality;
    use crate::graph::{SharedGraph, UnionGraph};
    use crate::model::{Axiom, ClassExpression, EntityType, OwlClass};
    use crate::vocab::owl;
    use oxrdf::NamedNode;
    use oxrdf::vocab::rdfs;

    fn iri(name: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://example.com/{name}"))
    }

    fn class(name: &str) -> ClassExpression {
        ClassExpression::class(OwlClass::new(iri(name)))
    }

    fn graph() -> UnionGraph {
        let graph = SharedGraph::new();
        for name in ["A", "B", "C"] {
            graph.insert(&Triple::new(iri(name), rdf::TYPE, EntityType::Class.rdf_type()));
        }
        graph.insert(&Triple::new(iri("A"), rdfs::SUB_CLASS_OF, iri("B")));
        UnionGraph::new(graph)
    }

    #[test]
    fn bucket_lifecycle() {
        let graph = graph();
        let personality = Personality::new(Default::default());
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);
        let mut cache = ContentCache::default();
        assert_eq!(
            cache.state(Scope::Local, AxiomType::SubClassOf),
            CacheState::Uninitialized
        );
        assert_eq!(
            cache.axioms(view, Scope::Local, AxiomType::SubClassOf).unwrap(),
            vec![AnnotatedAxiom::new(Axiom::subclass_of(class("A"), class("B")))]
        );
        assert_eq!(
            cache.state(Scope::Local, AxiomType::SubClassOf),
            CacheState::Populated
        );

        graph
            .base()
            .insert(&Triple::new(iri("B"), rdfs::SUB_CLASS_OF, iri("C")));
        assert_eq!(
            cache.axioms(view, Scope::Local, AxiomType::SubClassOf).unwrap().len(),
            2
        );

        cache.clear();
        assert_eq!(
            cache.state(Scope::Local, AxiomType::SubClassOf),
            CacheState::Stale
        );
    }

    #[test]
    fn incremental_add_and_remove() {
        let graph = graph();
        let personality = Personality::new(Default::default());
        let config = OntConfig::default();
        let view = ModelView::new(&graph, &personality, &config);
        let mut cache = ContentCache::default();
        assert_eq!(
            cache.axioms(view, Scope::Local, AxiomType::DisjointClasses).unwrap(),
            Vec::new()
        );
        let axiom = AnnotatedAxiom::new(Axiom::disjoint_classes([
            class("A"),
            class("B"),
            class("C"),
        ]));
        assert!(cache.add(view, &axiom).unwrap());
        assert!(!cache.add(view, &axiom).unwrap());
        assert_eq!(
            cache.state(Scope::Local, AxiomType::DisjointClasses),
            CacheState::Populated
        );
        assert!(cache.contains(view, Scope::Local, &axiom).unwrap());
        assert_eq!(
            graph
                .base()
                .find(None, Some(rdf::TYPE), Some(owl::ALL_DISJOINT_CLASSES.into()))
                .len(),
            1
        );

        assert!(cache.remove(view, &axiom).unwrap());
        assert!(!cache.contains(view, Scope::Local, &axiom).unwrap());
        assert!(graph.base().find(None, Some(rdf::FIRST), None).is_empty());
        assert_eq!(graph.base().len(), 4);
    }
}
