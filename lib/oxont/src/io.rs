//! Reading documents into graphs and writing graphs back.

use crate::config::OntConfig;
use crate::error::{OntError, UnsupportedFormatError};
use crate::graph::SharedGraph;
use oxiri::Iri;
use oxrdf::{Graph, Triple};
use oxrdfio::{RdfFormat, RdfParser, RdfSerializer};
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// The formats tried, in order, when a document has no usable format hint.
const FALLBACK_FORMATS: [RdfFormat; 6] = [
    RdfFormat::Turtle,
    RdfFormat::RdfXml,
    RdfFormat::TriG,
    RdfFormat::NQuads,
    RdfFormat::NTriples,
    RdfFormat::N3,
];

#[derive(Debug, Clone)]
enum Content {
    Bytes(Arc<[u8]>),
    Iri(String),
    Graph(SharedGraph),
}

/// Where the triples of an ontology come from: some bytes, a resolvable IRI or an already
/// built graph, with optional format hints.
///
/// ```
/// use oxont::DocumentSource;
/// use oxrdfio::RdfFormat;
///
/// let source = DocumentSource::from_bytes(
///     "<http://example.com/o> a <http://www.w3.org/2002/07/owl#Ontology> .",
/// )
/// .with_format(RdfFormat::Turtle);
/// assert_eq!(source.format(), Some(RdfFormat::Turtle));
/// assert_eq!(source.iri(), None);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentSource {
    content: Content,
    base_iri: Option<String>,
    format: Option<RdfFormat>,
    media_type: Option<String>,
}

impl DocumentSource {
    fn new(content: Content) -> Self {
        Self {
            content,
            base_iri: None,
            format: None,
            media_type: None,
        }
    }

    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::new(Content::Bytes(bytes.as_ref().into()))
    }

    /// A document to fetch. Only `file:` IRIs are resolved, other documents must be
    /// registered as document mappings.
    pub fn from_iri(iri: impl Into<String>) -> Self {
        Self::new(Content::Iri(iri.into()))
    }

    /// A local file, addressed by its `file:` IRI.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OntError> {
        let path = std::path::absolute(path)?;
        Ok(Self::from_iri(format!("file://{}", path.display())))
    }

    /// A graph that is used as is, without copy.
    pub fn from_graph(graph: impl Into<SharedGraph>) -> Self {
        Self::new(Content::Graph(graph.into()))
    }

    /// The base IRI used to resolve relative IRIs, the document IRI by default.
    #[must_use]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    /// The declared format, tried first.
    #[must_use]
    pub fn with_format(mut self, format: RdfFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// The document IRI, if the source is fetched from one.
    pub fn iri(&self) -> Option<&str> {
        match &self.content {
            Content::Iri(iri) => Some(iri),
            Content::Bytes(_) | Content::Graph(_) => None,
        }
    }

    #[inline]
    pub fn format(&self) -> Option<RdfFormat> {
        self.format
    }

    /// The formats to try in order: the declared one, the one of the media type, the one of
    /// the file extension and then all the others.
    fn candidate_formats(&self) -> Vec<RdfFormat> {
        let extension = self.iri().and_then(|iri| {
            Path::new(iri)
                .extension()
                .and_then(OsStr::to_str)
                .and_then(RdfFormat::from_extension)
        });
        let mut formats = Vec::with_capacity(FALLBACK_FORMATS.len());
        for format in [
            self.format,
            self.media_type.as_deref().and_then(RdfFormat::from_media_type),
            extension,
        ]
        .into_iter()
        .flatten()
        .chain(FALLBACK_FORMATS)
        {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    }
}

/// A graph read from a document.
#[derive(Debug, Clone)]
pub(crate) struct LoadedDocument {
    pub graph: SharedGraph,
    /// `None` when the source already was a graph
    pub format: Option<RdfFormat>,
}

/// Reads the document into a new graph.
pub(crate) fn read_document(
    source: &DocumentSource,
    config: &OntConfig,
) -> Result<LoadedDocument, OntError> {
    let (data, base_iri) = match &source.content {
        Content::Graph(graph) => {
            return Ok(LoadedDocument {
                graph: graph.clone(),
                format: None,
            });
        }
        Content::Bytes(bytes) => (Arc::clone(bytes), source.base_iri.clone()),
        Content::Iri(iri) => {
            let path = resolve(iri, config)?;
            let data = fs::read(&path)?;
            (
                data.into(),
                Some(source.base_iri.clone().unwrap_or_else(|| iri.clone())),
            )
        }
    };

    let mut attempts = Vec::new();
    for format in source.candidate_formats() {
        match parse(&data, format, base_iri.as_deref()) {
            Ok(graph) => {
                debug!(
                    "Read {} triples from <{}> as {}",
                    graph.len(),
                    source.iri().unwrap_or("bytes"),
                    format.name()
                );
                return Ok(LoadedDocument {
                    graph: graph.into(),
                    format: Some(format),
                });
            }
            Err(reason) => attempts.push((format, reason)),
        }
    }
    Err(UnsupportedFormatError::new(attempts).into())
}

/// The local path of a document IRI.
fn resolve(iri: &str, config: &OntConfig) -> Result<PathBuf, OntError> {
    let parsed = Iri::parse(iri)?;
    let scheme = parsed.scheme();
    if !config.is_supported_scheme(scheme) {
        return Err(OntError::ConfigMismatch(format!(
            "the scheme {scheme} of <{iri}> is not supported"
        )));
    }
    if scheme != "file" {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no document is mapped to <{iri}>"),
        )
        .into());
    }
    Ok(PathBuf::from(parsed.path()))
}

fn parse(data: &[u8], format: RdfFormat, base_iri: Option<&str>) -> Result<Graph, String> {
    let mut parser = RdfParser::from_format(format).rename_blank_nodes();
    if let Some(base_iri) = base_iri {
        parser = parser.with_base_iri(base_iri).map_err(|e| e.to_string())?;
    }
    let mut graph = Graph::new();
    for quad in parser.for_reader(data) {
        let quad = quad.map_err(|e| e.to_string())?;
        // only the default graph of a dataset is an ontology document
        if quad.graph_name.is_default_graph() {
            graph.insert(&Triple::new(quad.subject, quad.predicate, quad.object));
        }
    }
    Ok(graph)
}

fn serialize(graph: &SharedGraph, format: RdfFormat) -> Result<Vec<u8>, OntError> {
    let mut serializer = RdfSerializer::from_format(format).for_writer(Vec::new());
    for triple in graph.triples() {
        serializer.serialize_triple(&triple)?;
    }
    Ok(serializer.finish()?)
}

/// Writes the graph to the writer.
///
/// Nothing is written if the serialization fails.
pub(crate) fn write_graph<W: Write>(
    graph: &SharedGraph,
    mut writer: W,
    format: RdfFormat,
) -> Result<W, OntError> {
    let buffer = serialize(graph, format)?;
    writer.write_all(&buffer)?;
    writer.flush()?;
    Ok(writer)
}

/// Writes the graph to a file through a sibling temporary file, so that an existing file is
/// only replaced by a complete document.
pub(crate) fn save_to_file(
    graph: &SharedGraph,
    path: &Path,
    format: RdfFormat,
) -> Result<(), OntError> {
    let buffer = serialize(graph, format)?;
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file path", path.display()),
        )
    })?;
    let mut temp_name = file_name.to_os_string();
    temp_name.push(".tmp");
    let temp = path.with_file_name(temp_name);
    if let Err(e) = fs::write(&temp, &buffer).and_then(|()| fs::rename(&temp, path)) {
        fs::remove_file(&temp).ok();
        return Err(e.into());
    }
    debug!("Saved {} triples to {}", graph.len(), path.display());
    Ok(())
}
