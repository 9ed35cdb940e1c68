// src/ingest/providers/mod.rs
pub mod http_table;
pub mod static_table;

pub use http_table::HttpTableProvider;
pub use static_table::StaticTableProvider;
