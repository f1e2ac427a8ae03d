// Adapters layer: concrete implementations for external systems (gateway http,
// pdf endpoint, object storage, in-memory store for tests).

pub mod gateway;
pub mod memory;
pub mod pdf;
pub mod s3;
