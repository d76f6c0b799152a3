pub mod ingest;
pub mod timeline;
