mod error;
mod freshness;
mod handle;
mod loader;
mod parser;

pub use error::CatalogError;
pub use freshness::format_age;
pub use handle::CatalogHandle;
pub use loader::{Catalog, CatalogRecord};
pub use parser::ParseDiagnostics;
