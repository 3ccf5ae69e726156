use crate::error::OntError;
use crate::graph::fresh_id;
use oxrdf::NamedNode;
use std::fmt;

/// The identity of an ontology: an ontology IRI with an optional version IRI, or an anonymous key.
///
/// An anonymous ontology read from a graph gets the graph id as its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OntologyId {
    Anonymous(u64),
    Named {
        iri: NamedNode,
        version_iri: Option<NamedNode>,
    },
}

impl OntologyId {
    /// Builds an id from its optional parts.
    ///
    /// A version IRI without ontology IRI is rejected, no IRI at all gives a fresh anonymous id.
    ///
    /// ```
    /// use oxont::OntologyId;
    /// use oxrdf::NamedNode;
    ///
    /// let version = NamedNode::new("http://example.com/o/1.0")?;
    /// assert!(OntologyId::new(None, Some(version)).is_err());
    /// assert!(OntologyId::new(None, None)?.is_anonymous());
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn new(iri: Option<NamedNode>, version_iri: Option<NamedNode>) -> Result<Self, OntError> {
        match (iri, version_iri) {
            (Some(iri), version_iri) => Ok(Self::Named { iri, version_iri }),
            (None, Some(version_iri)) => Err(OntError::InvalidId(format!(
                "the version IRI {version_iri} is set without ontology IRI"
            ))),
            (None, None) => Ok(Self::anonymous()),
        }
    }

    /// A fresh anonymous id.
    pub fn anonymous() -> Self {
        Self::Anonymous(fresh_id())
    }

    pub fn named(iri: NamedNode) -> Self {
        Self::Named {
            iri,
            version_iri: None,
        }
    }

    pub fn with_version(iri: NamedNode, version_iri: NamedNode) -> Self {
        Self::Named {
            iri,
            version_iri: Some(version_iri),
        }
    }

    /// Parses an ontology IRI.
    pub fn parse(iri: impl Into<String>) -> Result<Self, OntError> {
        Ok(Self::named(NamedNode::new(iri)?))
    }

    pub fn iri(&self) -> Option<&NamedNode> {
        match self {
            Self::Anonymous(_) => None,
            Self::Named { iri, .. } => Some(iri),
        }
    }

    pub fn version_iri(&self) -> Option<&NamedNode> {
        match self {
            Self::Anonymous(_) => None,
            Self::Named { version_iri, .. } => version_iri.as_ref(),
        }
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous(_))
    }

    /// Returns `true` if the ontology IRI or the version IRI is `iri`.
    pub fn matches_iri(&self, iri: &str) -> bool {
        self.iri().is_some_and(|i| i.as_str() == iri)
            || self.version_iri().is_some_and(|v| v.as_str() == iri)
    }
}

impl fmt::Display for OntologyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous(key) => write!(f, "anonymous-{key}"),
            Self::Named {
                iri,
                version_iri: None,
            } => write!(f, "{iri}"),
            Self::Named {
                iri,
                version_iri: Some(version_iri),
            } => write!(f, "{iri} {version_iri}"),
        }
    }
}

impl From<NamedNode> for OntologyId {
    fn from(iri: NamedNode) -> Self {
        Self::named(iri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_ids_are_distinct() {
        assert_ne!(OntologyId::anonymous(), OntologyId::anonymous());
    }

    #[test]
    fn matches_ontology_and_version_iri() {
        let id = OntologyId::with_version(
            NamedNode::new_unchecked("http://example.com/o"),
            NamedNode::new_unchecked("http://example.com/o/2"),
        );
        assert!(id.matches_iri("http://example.com/o"));
        assert!(id.matches_iri("http://example.com/o/2"));
        assert!(!id.matches_iri("http://example.com/p"));
        assert_eq!(
            id.to_string(),
            "<http://example.com/o> <http://example.com/o/2>"
        );
    }
}
