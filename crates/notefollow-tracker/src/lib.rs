//! Tracking workflow shared by the CLI and the HTTP server.
//!
//! Each operation loads the stored dataset, applies one pure transition from
//! `notefollow_core::store`, and saves the result as the last step. A failed
//! fetch, decode or confirmation check therefore leaves storage untouched.

pub mod error;
pub mod source;
pub mod tracker;

pub use error::TrackerError;
pub use source::CreatorSource;
pub use tracker::{Export, Import, Tracker};
