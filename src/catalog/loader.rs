use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::path::Path;

use super::error::CatalogError;
use super::freshness::{file_modified, header_timestamp};
use super::parser::{split_blocks, ParseDiagnostics, RejectedRecord};
use crate::propagate::{Propagator, PropagatorFactory};

/// One parsed element set together with the propagator built from it.
pub struct CatalogRecord {
    pub name: String,
    pub line1: String,
    pub line2: String,
    propagator: Box<dyn Propagator>,
}

impl CatalogRecord {
    pub fn new(
        name: impl Into<String>,
        line1: impl Into<String>,
        line2: impl Into<String>,
        propagator: Box<dyn Propagator>,
    ) -> Self {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
            propagator,
        }
    }

    pub fn propagator(&self) -> &dyn Propagator {
        self.propagator.as_ref()
    }
}

impl fmt::Debug for CatalogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogRecord")
            .field("name", &self.name)
            .field("line1", &self.line1)
            .field("line2", &self.line2)
            .finish_non_exhaustive()
    }
}

/// The full set of records currently loaded. Never mutated after parsing;
/// a reload builds a new catalog.
#[derive(Debug)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
    freshness: DateTime<Utc>,
    loaded_at: DateTime<Utc>,
    diagnostics: ParseDiagnostics,
}

impl Catalog {
    /// Parses TLE text. Fails only when no usable record is left.
    pub fn parse(text: &str, factory: &dyn PropagatorFactory) -> Result<Self, CatalogError> {
        Self::parse_with_fallback(text, factory, None)
    }

    /// Loads a TLE file. Freshness comes from the header line, then the
    /// file's modification time, then the load time.
    pub fn from_file(path: &Path, factory: &dyn PropagatorFactory) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        let catalog = Self::parse_with_fallback(&text, factory, file_modified(path))?;
        log::info!(
            "Loaded {} TLE records from {} ({} lines skipped, {} rejected)",
            catalog.len(),
            path.display(),
            catalog.diagnostics.skipped_lines,
            catalog.diagnostics.rejected.len()
        );
        Ok(catalog)
    }

    fn parse_with_fallback(
        text: &str,
        factory: &dyn PropagatorFactory,
        modified: Option<DateTime<Utc>>,
    ) -> Result<Self, CatalogError> {
        let loaded_at = Utc::now();
        let scan = split_blocks(text);

        let mut diagnostics = ParseDiagnostics {
            lines: scan.lines,
            blocks: scan.blocks.len(),
            skipped_lines: scan.skipped_lines,
            rejected: Vec::new(),
        };
        let mut records = Vec::with_capacity(scan.blocks.len());

        for block in scan.blocks {
            match factory.build(&block.name, &block.line1, &block.line2) {
                Ok(propagator) => records.push(CatalogRecord::new(
                    block.name,
                    block.line1,
                    block.line2,
                    propagator,
                )),
                Err(e) => {
                    log::warn!("Rejected TLE record {}: {}", block.name, e);
                    diagnostics.rejected.push(RejectedRecord {
                        name: block.name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        if records.is_empty() {
            return Err(CatalogError::NoRecords {
                lines: diagnostics.lines,
                skipped: diagnostics.skipped_lines,
                rejected: diagnostics.rejected.len(),
            });
        }

        let freshness = header_timestamp(text)
            .or(modified)
            .unwrap_or(loaded_at);

        Ok(Self {
            records,
            freshness,
            loaded_at,
            diagnostics,
        })
    }

    #[cfg(test)]
    pub(crate) fn from_records(records: Vec<CatalogRecord>) -> Self {
        let now = Utc::now();
        Self {
            diagnostics: ParseDiagnostics {
                lines: records.len() * 3,
                blocks: records.len(),
                ..Default::default()
            },
            records,
            freshness: now,
            loaded_at: now,
        }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// When the element data itself was last updated.
    pub fn freshness(&self) -> DateTime<Utc> {
        self.freshness
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }
}
