//! Blob (file attachment) endpoints.

use std::path::Path;

use bytes::Bytes;

use crate::params::ensure_present;
use crate::{Blob, Params, QuipClient, Result};

impl QuipClient {
    /// Downloads the raw content of a blob.
    pub async fn get_blob(&self, thread_id: &str, blob_id: &str) -> Result<Bytes> {
        ensure_present("thread_id", thread_id, "blob/{thread_id}/{blob_id}")?;
        ensure_present("blob_id", blob_id, "blob/{thread_id}/{blob_id}")?;
        self.get_bytes(&format!("blob/{thread_id}/{blob_id}"), &Params::new())
            .await
    }

    /// Uploads a local file to a thread.
    pub async fn new_blob(&self, thread_id: &str, path: impl AsRef<Path>) -> Result<Blob> {
        ensure_present("thread_id", thread_id, "blob/{thread_id}")?;
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "blob".to_owned());
        self.new_blob_from_bytes(thread_id, file_name, bytes).await
    }

    /// Uploads in-memory content to a thread.
    pub async fn new_blob_from_bytes(
        &self,
        thread_id: &str,
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Result<Blob> {
        ensure_present("thread_id", thread_id, "blob/{thread_id}")?;
        self.upload_object(&format!("blob/{thread_id}"), file_name.into(), bytes.into())
            .await
    }
}
