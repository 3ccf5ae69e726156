use crate::id::OntologyId;
use crate::model::AxiomType;
use oxiri::IriParseError;
use oxrdf::{Term, Triple};
use oxrdfio::RdfFormat;
use std::fmt;
use std::io;
use thiserror::Error;

/// An error raised by ontology loading, translation or management operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OntError {
    /// The configuration forbids the operation (e.g. an unsupported IRI scheme).
    #[error("Configuration mismatch: {0}")]
    ConfigMismatch(String),
    /// No available RDF parser could read the document.
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),
    /// A node does not have the shape required by the requested view.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// A broken or cyclic RDF collection.
    #[error("Malformed RDF list: {0}")]
    MalformedList(String),
    /// A statement could not be read as an axiom.
    #[error(transparent)]
    AxiomRead(#[from] AxiomReadError),
    /// An ontology with the same id is already known.
    #[error("An ontology with id {0} already exists")]
    DuplicateOntology(OntologyId),
    /// A document is being loaded while its own loading is in progress.
    #[error("Recursive loading of document <{0}>")]
    Cycle(String),
    /// An import could not be resolved.
    #[error("Unable to load the import <{iri}>: {cause}")]
    MissingImport {
        /// The imported IRI.
        iri: String,
        /// The reason why it could not be resolved.
        #[source]
        cause: Box<OntError>,
    },
    /// An ontology id that violates the id rules.
    #[error("Invalid ontology id: {0}")]
    InvalidId(String),
    /// An axiom that has no RDF representation (e.g. an n-ary axiom with a single operand).
    #[error("Invalid axiom: {0}")]
    InvalidAxiom(String),
    /// An invalid IRI.
    #[error(transparent)]
    InvalidIri(#[from] IriParseError),
    /// Error from the OS I/O layer.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<OntError> for io::Error {
    #[inline]
    fn from(error: OntError) -> Self {
        match error {
            OntError::Io(error) => error,
            OntError::ConfigMismatch(_) | OntError::InvalidId(_) | OntError::InvalidIri(_) => {
                Self::new(io::ErrorKind::InvalidInput, error)
            }
            OntError::DuplicateOntology(_) => Self::new(io::ErrorKind::AlreadyExists, error),
            OntError::MissingImport { .. } => Self::new(io::ErrorKind::NotFound, error),
            _ => Self::new(io::ErrorKind::InvalidData, error),
        }
    }
}

/// Raised when a graph node cannot be viewed as the requested object kind.
#[derive(Debug, Clone, Error)]
#[error("Can't wrap node {node}: {reason}")]
pub struct ConversionError {
    node: Term,
    reason: String,
}

impl ConversionError {
    #[inline]
    pub(crate) fn new(node: impl Into<Term>, reason: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            reason: reason.into(),
        }
    }

    /// The node that could not be wrapped.
    #[inline]
    pub fn node(&self) -> &Term {
        &self.node
    }
}

/// Raised when a statement matched an axiom pattern but its operands could not be resolved.
#[derive(Debug, Error)]
#[error("Unable to read {statement} as {axiom_type}: {cause}")]
pub struct AxiomReadError {
    statement: Triple,
    axiom_type: AxiomType,
    #[source]
    cause: Box<OntError>,
}

impl AxiomReadError {
    #[inline]
    pub(crate) fn new(statement: Triple, axiom_type: AxiomType, cause: OntError) -> Self {
        Self {
            statement,
            axiom_type,
            cause: Box::new(cause),
        }
    }

    /// The defining statement that failed.
    #[inline]
    pub fn statement(&self) -> &Triple {
        &self.statement
    }

    /// The axiom type whose translator rejected the statement.
    #[inline]
    pub fn axiom_type(&self) -> AxiomType {
        self.axiom_type
    }
}

/// Raised when no RDF parser accepted a document.
///
/// It keeps every attempted format with the reason of its failure.
#[derive(Debug, Clone)]
pub struct UnsupportedFormatError {
    attempts: Vec<(RdfFormat, String)>,
}

impl UnsupportedFormatError {
    #[inline]
    pub(crate) fn new(attempts: Vec<(RdfFormat, String)>) -> Self {
        Self { attempts }
    }

    /// The attempted formats in order with the error each one raised.
    #[inline]
    pub fn attempts(&self) -> &[(RdfFormat, String)] {
        &self.attempts
    }
}

impl fmt::Display for UnsupportedFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attempts.is_empty() {
            return f.write_str("No RDF format has been attempted");
        }
        f.write_str("No RDF format is able to read the document")?;
        for (format, reason) in &self.attempts {
            write!(f, "; {}: {reason}", format.name())?;
        }
        Ok(())
    }
}

impl std::error::Error for UnsupportedFormatError {}

#[cfg(test)]
mod tests {
    use super::*;
    use oxrdf::BlankNode;

    #[test]
    fn unsupported_format_lists_attempts() {
        let error = UnsupportedFormatError::new(vec![
            (RdfFormat::Turtle, "unexpected token".to_owned()),
            (RdfFormat::RdfXml, "not XML".to_owned()),
        ]);
        let message = error.to_string();
        assert!(message.contains("Turtle: unexpected token"), "{message}");
        assert!(message.contains("RDF/XML: not XML"), "{message}");
        assert_eq!(error.attempts().len(), 2);
    }

    #[test]
    fn conversion_error_to_io() {
        let error = OntError::from(ConversionError::new(BlankNode::default(), "not a class"));
        let io_error = io::Error::from(error);
        assert_eq!(io_error.kind(), io::ErrorKind::InvalidData);
    }
}
