use crate::error::{ConversionError, OntError};
use crate::factory::{ObjectFactory, ObjectKind, OntFilter, OntFinder, OntObject};
use crate::view::ModelView;
use oxrdf::Term;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// A composite factory that delegates to an ordered list of factories.
///
/// The first sub-factory accepting a node wins, which gives priority between overlapping
/// shapes. The optional filter rejects nodes before any delegation and the optional finder
/// replaces the merge of the sub-factories enumerations.
#[derive(Debug)]
pub struct MultiFactory {
    kind: ObjectKind,
    finder: Option<OntFinder>,
    filter: Option<OntFilter>,
    factories: Vec<Arc<dyn ObjectFactory>>,
}

impl MultiFactory {
    /// Builds a composite factory, composite delegates are replaced by their own delegates.
    ///
    /// Fails if there is no delegate.
    pub fn new(
        kind: ObjectKind,
        finder: Option<OntFinder>,
        filter: Option<OntFilter>,
        factories: impl IntoIterator<Item = Arc<dyn ObjectFactory>>,
    ) -> Result<Self, OntError> {
        let factories = flatten(factories);
        if factories.is_empty() {
            return Err(OntError::ConfigMismatch(format!(
                "the composite factory for {kind} has no delegate"
            )));
        }
        Ok(Self {
            kind,
            finder,
            filter,
            factories,
        })
    }

    /// The flattened delegates in priority order.
    #[inline]
    pub fn factories(&self) -> &[Arc<dyn ObjectFactory>] {
        &self.factories
    }

    fn accepts(&self, node: &Term, view: &ModelView<'_>) -> bool {
        self.filter.as_ref().is_none_or(|f| f.test(node, view))
    }
}

fn flatten(
    factories: impl IntoIterator<Item = Arc<dyn ObjectFactory>>,
) -> Vec<Arc<dyn ObjectFactory>> {
    let mut result = Vec::new();
    for factory in factories {
        if let Some(delegates) = factory.sub_factories() {
            result.extend(delegates.iter().cloned());
        } else {
            result.push(factory);
        }
    }
    result
}

impl ObjectFactory for MultiFactory {
    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn can_wrap(&self, node: &Term, view: &ModelView<'_>) -> bool {
        self.accepts(node, view) && self.factories.iter().any(|f| f.can_wrap(node, view))
    }

    fn create_instance(&self, node: &Term, view: &ModelView<'_>) -> Option<OntObject> {
        if !self.accepts(node, view) {
            return None;
        }
        self.factories
            .iter()
            .find_map(|f| f.create_instance(node, view))
    }

    fn wrap(&self, node: &Term, view: &ModelView<'_>) -> Result<OntObject, ConversionError> {
        self.create_instance(node, view).ok_or_else(|| {
            ConversionError::new(
                node.clone(),
                format!("no {} view applies. Use direct factory.", self.kind),
            )
        })
    }

    fn iter<'a>(&'a self, view: ModelView<'a>) -> Box<dyn Iterator<Item = OntObject> + 'a> {
        if let Some(finder) = &self.finder {
            return Box::new(
                finder
                    .find(&view)
                    .filter_map(move |node| self.create_instance(&node, &view)),
            );
        }
        let mut seen = FxHashSet::default();
        Box::new(
            self.factories
                .iter()
                .flat_map(move |f| f.iter(view))
                .filter(move |o| seen.insert(o.node().clone()))
                .filter_map(move |o| self.create_instance(o.node(), &view)),
        )
    }

    fn sub_factories(&self) -> Option<&[Arc<dyn ObjectFactory>]> {
        Some(&self.factories)
    }
}
