//! Message endpoints.

use crate::params::ensure_present;
use crate::{Message, Params, QuipClient, Result};

/// Paging parameters for [`QuipClient::get_recent_messages`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecentMessagesParams {
    pub count: Option<u32>,
    pub max_updated_usec: Option<i64>,
}

impl QuipClient {
    /// Lists the most recent messages of a thread, newest first.
    pub async fn get_recent_messages(
        &self,
        thread_id: &str,
        params: &RecentMessagesParams,
    ) -> Result<Vec<Message>> {
        ensure_present("thread_id", thread_id, "messages/{thread_id}")?;
        let params = Params::new()
            .optional_opt("count", params.count.map(|count| count.to_string()))
            .optional_opt(
                "max_updated_usec",
                params.max_updated_usec.map(|usec| usec.to_string()),
            );
        self.get_array(&format!("messages/{thread_id}"), &params)
            .await
    }

    /// Posts a message to a thread. `silent` suppresses notifications.
    pub async fn new_message(
        &self,
        thread_id: &str,
        content: &str,
        silent: bool,
    ) -> Result<Message> {
        let params = Params::new()
            .required("thread_id", thread_id, "messages/new")?
            .required("content", content, "messages/new")?
            .optional_opt("silent", silent.then_some("true"));
        self.post_object("messages/new", params).await
    }
}
