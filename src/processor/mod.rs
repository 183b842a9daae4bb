pub mod ingest;
pub mod message_processor;
pub mod normalizer;

pub use ingest::ingest_batch;
pub use normalizer::Normalizer;
