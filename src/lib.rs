pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::memory::MemoryStore;
pub use config::{AppConfig, AttachmentMode};
pub use core::dispatch::WhatsappService;
pub use utils::error::{Result, WhatsappError};
