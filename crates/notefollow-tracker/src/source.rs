use std::future::Future;

use notefollow_client::{ClientError, NoteClient};
use notefollow_core::Creator;

/// Where fresh creator profiles come from.
pub trait CreatorSource: Send + Sync {
    fn fetch_creator(
        &self,
        creator_id: &str,
    ) -> impl Future<Output = Result<Creator, ClientError>> + Send;
}

impl CreatorSource for NoteClient {
    fn fetch_creator(
        &self,
        creator_id: &str,
    ) -> impl Future<Output = Result<Creator, ClientError>> + Send {
        NoteClient::fetch_creator(self, creator_id)
    }
}
