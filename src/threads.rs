//! Thread and document endpoints.

use crate::params::ensure_present;
use crate::{Params, QuipClient, Result, Thread};

/// Where `threads/edit-document` places the new content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Location {
    #[default]
    Append,
    Prepend,
    AfterSection,
    BeforeSection,
    ReplaceSection,
    DeleteSection,
}

impl Location {
    /// Numeric code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Self::Append => "0",
            Self::Prepend => "1",
            Self::AfterSection => "2",
            Self::BeforeSection => "3",
            Self::ReplaceSection => "4",
            Self::DeleteSection => "5",
        }
    }
}

/// Content format of document bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Html,
    Markdown,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
        }
    }
}

/// Paging parameters for [`QuipClient::get_recent_threads`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecentThreadsParams {
    pub count: Option<u32>,
    pub max_updated_usec: Option<i64>,
}

/// Parameters for [`QuipClient::new_document`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewDocumentParams {
    pub content: String,
    pub format: Option<DocumentFormat>,
    pub title: Option<String>,
    pub member_ids: Vec<String>,
}

impl NewDocumentParams {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub(crate) fn to_params(&self) -> Result<Params> {
        Ok(Params::new()
            .required("content", &self.content, "threads/new-document")?
            .optional_opt("format", self.format.map(DocumentFormat::as_str))
            .optional_opt("title", self.title.as_deref())
            .optional("member_ids", &self.member_ids))
    }
}

/// Parameters for [`QuipClient::edit_document`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditDocumentParams {
    pub thread_id: String,
    pub content: String,
    pub format: Option<DocumentFormat>,
    pub location: Option<Location>,
    /// Target section for the section-relative locations.
    pub section_id: Option<String>,
}

impl EditDocumentParams {
    pub(crate) fn to_params(&self) -> Result<Params> {
        Ok(Params::new()
            .required("thread_id", &self.thread_id, "threads/edit-document")?
            .required("content", &self.content, "threads/edit-document")?
            .optional_opt("format", self.format.map(DocumentFormat::as_str))
            .optional_opt("location", self.location.map(Location::code))
            .optional_opt("section_id", self.section_id.as_deref()))
    }
}

impl QuipClient {
    /// Fetches one thread by ID.
    pub async fn get_thread(&self, id: &str) -> Result<Thread> {
        ensure_present("id", id, "threads/{id}")?;
        self.get_object(&format!("threads/{id}"), &Params::new())
            .await
    }

    /// Fetches several threads in one request. Order is unspecified; an empty
    /// `ids` list yields an empty vector without a request.
    pub async fn get_threads(&self, ids: &[String]) -> Result<Vec<Thread>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let params = Params::new().required("ids", ids, "threads/")?;
        self.get_keyed("threads/", &params).await
    }

    /// Lists the threads most recently updated for the authenticated user.
    pub async fn get_recent_threads(
        &self,
        params: &RecentThreadsParams,
    ) -> Result<Vec<Thread>> {
        let params = Params::new()
            .optional_opt("count", params.count.map(|count| count.to_string()))
            .optional_opt(
                "max_updated_usec",
                params.max_updated_usec.map(|usec| usec.to_string()),
            );
        self.get_keyed("threads/recent", &params).await
    }

    pub async fn new_document(&self, params: &NewDocumentParams) -> Result<Thread> {
        let params = params.to_params()?;
        self.post_object("threads/new-document", params).await
    }

    pub async fn edit_document(&self, params: &EditDocumentParams) -> Result<Thread> {
        let params = params.to_params()?;
        self.post_object("threads/edit-document", params).await
    }

    pub async fn add_thread_members(
        &self,
        thread_id: &str,
        member_ids: &[String],
    ) -> Result<Thread> {
        let params = membership_params(thread_id, member_ids, "threads/add-members")?;
        self.post_object("threads/add-members", params).await
    }

    pub async fn remove_thread_members(
        &self,
        thread_id: &str,
        member_ids: &[String],
    ) -> Result<Thread> {
        let params = membership_params(thread_id, member_ids, "threads/remove-members")?;
        self.post_object("threads/remove-members", params).await
    }
}

fn membership_params(
    thread_id: &str,
    member_ids: &[String],
    endpoint: &str,
) -> Result<Params> {
    Params::new()
        .required("thread_id", thread_id, endpoint)?
        .required("member_ids", member_ids, endpoint)
}
