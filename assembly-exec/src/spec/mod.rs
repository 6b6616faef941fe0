mod download;
mod fetch;
mod resolver;
mod workbook;

pub use download::{validate_document, SpecDocumentDownloader, CONTAINER_MAGIC, MIN_DOCUMENT_BYTES};
pub use fetch::{DocumentSpecFetcher, SpecFetcher};
pub use resolver::SpecResolver;
pub use workbook::{read_rows, SHEET_NAME};
