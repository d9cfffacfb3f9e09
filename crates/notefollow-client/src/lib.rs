pub mod client;
pub mod error;
pub mod types;

pub use client::NoteClient;
pub use error::ClientError;
pub use types::{CreatorData, CreatorResponse};
