pub mod ingest;
pub mod podcast;
pub mod script;
pub mod speech;
