use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("No TLEs parsed ({lines} lines, {skipped} skipped, {rejected} rejected)")]
    NoRecords {
        lines: usize,
        skipped: usize,
        rejected: usize,
    },
}
