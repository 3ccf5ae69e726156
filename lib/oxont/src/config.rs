//! Loading and translation options.

use std::collections::BTreeSet;
use std::fmt;

/// What to do when an `owl:imports` target can't be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissingImportHandling {
    /// Abort the whole load with [`OntError::MissingImport`](crate::OntError::MissingImport).
    #[default]
    Throw,
    /// Skip the import and log it.
    Silent,
}

/// What to do with an imported document that has no `owl:Ontology` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MissingOntologyHeaderHandling {
    /// Keep the document as an anonymous imported ontology.
    #[default]
    KeepSeparate,
    /// Copy its triples into the importing graph and drop the import declaration.
    MergeIntoParent,
}

/// Which type combinations are forbidden for a single IRI.
///
/// * `Strict`: classes and datatypes are exclusive, and an IRI carries at most one of the
///   object, data and annotation property types.
/// * `Medium`: classes and datatypes are exclusive, object and data properties are exclusive.
/// * `Lax`: any punning is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PunningMode {
    Strict,
    #[default]
    Medium,
    Lax,
}

/// Immutable configuration consumed by the loader, the translators and the content cache.
///
/// Use the `with_*` methods to derive a modified copy:
/// ```
/// use oxont::{MissingImportHandling, OntConfig};
///
/// let config = OntConfig::default()
///     .with_missing_import_handling(MissingImportHandling::Silent)
///     .with_cache_content(false);
/// assert!(!config.cache_content());
/// assert_eq!(config.missing_import_handling(), MissingImportHandling::Silent);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntConfig {
    load_annotation_axioms: bool,
    allow_bulk_annotation_assertions: bool,
    ignore_axioms_read_errors: bool,
    missing_import_handling: MissingImportHandling,
    missing_ontology_header_handling: MissingOntologyHeaderHandling,
    supported_schemes: BTreeSet<String>,
    cache_content: bool,
    punning_mode: PunningMode,
    ignored_imports: BTreeSet<String>,
}

impl Default for OntConfig {
    fn default() -> Self {
        Self {
            load_annotation_axioms: true,
            allow_bulk_annotation_assertions: true,
            ignore_axioms_read_errors: false,
            missing_import_handling: MissingImportHandling::default(),
            missing_ontology_header_handling: MissingOntologyHeaderHandling::default(),
            supported_schemes: ["file", "http", "https", "urn", "mem"]
                .into_iter()
                .map(ToOwned::to_owned)
                .collect(),
            cache_content: true,
            punning_mode: PunningMode::default(),
            ignored_imports: BTreeSet::new(),
        }
    }
}

impl OntConfig {
    /// Whether annotation axioms (assertions, sub-properties, domains and ranges) are read.
    #[inline]
    pub fn load_annotation_axioms(&self) -> bool {
        self.load_annotation_axioms
    }

    #[inline]
    #[must_use]
    pub fn with_load_annotation_axioms(mut self, value: bool) -> Self {
        self.load_annotation_axioms = value;
        self
    }

    /// Whether annotation assertions may carry their own reified annotations.
    #[inline]
    pub fn allow_bulk_annotation_assertions(&self) -> bool {
        self.allow_bulk_annotation_assertions
    }

    #[inline]
    #[must_use]
    pub fn with_allow_bulk_annotation_assertions(mut self, value: bool) -> Self {
        self.allow_bulk_annotation_assertions = value;
        self
    }

    /// Whether statements that fail to be read as axioms are skipped instead of aborting.
    #[inline]
    pub fn ignore_axioms_read_errors(&self) -> bool {
        self.ignore_axioms_read_errors
    }

    #[inline]
    #[must_use]
    pub fn with_ignore_axioms_read_errors(mut self, value: bool) -> Self {
        self.ignore_axioms_read_errors = value;
        self
    }

    #[inline]
    pub fn missing_import_handling(&self) -> MissingImportHandling {
        self.missing_import_handling
    }

    #[inline]
    #[must_use]
    pub fn with_missing_import_handling(mut self, value: MissingImportHandling) -> Self {
        self.missing_import_handling = value;
        self
    }

    #[inline]
    pub fn missing_ontology_header_handling(&self) -> MissingOntologyHeaderHandling {
        self.missing_ontology_header_handling
    }

    #[inline]
    #[must_use]
    pub fn with_missing_ontology_header_handling(
        mut self,
        value: MissingOntologyHeaderHandling,
    ) -> Self {
        self.missing_ontology_header_handling = value;
        self
    }

    /// IRI schemes documents may be loaded from.
    #[inline]
    pub fn supported_schemes(&self) -> impl Iterator<Item = &str> {
        self.supported_schemes.iter().map(String::as_str)
    }

    #[inline]
    pub fn is_supported_scheme(&self, scheme: &str) -> bool {
        self.supported_schemes.contains(&scheme.to_ascii_lowercase())
    }

    #[inline]
    #[must_use]
    pub fn with_supported_schemes<S: Into<String>>(
        mut self,
        schemes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.supported_schemes = schemes
            .into_iter()
            .map(|s| s.into().to_ascii_lowercase())
            .collect();
        self
    }

    /// Whether axioms are kept in per-type buckets between reads.
    #[inline]
    pub fn cache_content(&self) -> bool {
        self.cache_content
    }

    #[inline]
    #[must_use]
    pub fn with_cache_content(mut self, value: bool) -> Self {
        self.cache_content = value;
        self
    }

    #[inline]
    pub fn punning_mode(&self) -> PunningMode {
        self.punning_mode
    }

    #[inline]
    #[must_use]
    pub fn with_punning_mode(mut self, value: PunningMode) -> Self {
        self.punning_mode = value;
        self
    }

    /// Returns `true` if the import IRI must never be resolved.
    #[inline]
    pub fn is_ignored_import(&self, iri: &str) -> bool {
        self.ignored_imports.contains(iri)
    }

    #[inline]
    #[must_use]
    pub fn with_ignored_import(mut self, iri: impl Into<String>) -> Self {
        self.ignored_imports.insert(iri.into());
        self
    }
}

impl fmt::Display for OntConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "load-annotation-axioms: {}", self.load_annotation_axioms)?;
        writeln!(
            f,
            "allow-bulk-annotation-assertions: {}",
            self.allow_bulk_annotation_assertions
        )?;
        writeln!(
            f,
            "ignore-axioms-read-errors: {}",
            self.ignore_axioms_read_errors
        )?;
        writeln!(
            f,
            "missing-import-handling: {:?}",
            self.missing_import_handling
        )?;
        writeln!(
            f,
            "missing-ontology-header-handling: {:?}",
            self.missing_ontology_header_handling
        )?;
        let schemes = self
            .supported_schemes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        writeln!(f, "supported-schemes: {}", schemes.join(", "))?;
        writeln!(f, "cache-content: {}", self.cache_content)?;
        writeln!(f, "punning-mode: {:?}", self.punning_mode)?;
        let ignored = self
            .ignored_imports
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>();
        write!(f, "ignored-imports: {}", ignored.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = OntConfig::default();
        assert!(config.load_annotation_axioms());
        assert!(config.allow_bulk_annotation_assertions());
        assert!(!config.ignore_axioms_read_errors());
        assert_eq!(
            config.missing_import_handling(),
            MissingImportHandling::Throw
        );
        assert_eq!(
            config.missing_ontology_header_handling(),
            MissingOntologyHeaderHandling::KeepSeparate
        );
        assert!(config.cache_content());
        assert_eq!(config.punning_mode(), PunningMode::Medium);
        assert!(config.is_supported_scheme("HTTP"));
        assert!(!config.is_supported_scheme("ftp"));
    }

    #[test]
    fn copy_with_override_keeps_original() {
        let base = OntConfig::default();
        let modified = base
            .clone()
            .with_supported_schemes(["file"])
            .with_ignored_import("http://example.com/skip");
        assert!(base.is_supported_scheme("http"));
        assert!(!modified.is_supported_scheme("http"));
        assert!(modified.is_ignored_import("http://example.com/skip"));
        assert_ne!(base, modified);
    }

    #[test]
    fn display_lists_every_option() {
        let text = OntConfig::default().to_string();
        for key in [
            "load-annotation-axioms",
            "allow-bulk-annotation-assertions",
            "ignore-axioms-read-errors",
            "missing-import-handling",
            "missing-ontology-header-handling",
            "supported-schemes",
            "cache-content",
            "punning-mode",
            "ignored-imports",
        ] {
            assert!(text.contains(key), "{key} missing in {text}");
        }
    }
}
