pub mod attachment;
pub mod contacts;
pub mod dispatch;
pub mod fields;
pub mod phone;
pub mod template;

pub use crate::domain::model::{ContactEntry, FieldInfo, RenderedMessage, SendOutcome};
pub use crate::domain::ports::DocumentStore;
pub use crate::utils::error::Result;
