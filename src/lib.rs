//! `quip-http` is an async HTTP client for the Quip REST API.
//!
//! Every resource method funnels through [`QuipClient::execute`], which:
//! - adds `Authorization: Bearer <token>` to each attempt
//! - retries throttled requests (`503` + `X-RateLimit-Reset`,
//!   `429` + `Retry-After`) according to [`RateLimitPolicy`]
//! - turns error statuses into [`QuipError`] values
//!
//! Responses are decoded into the typed records in [`types`].

mod blobs;
mod client;
pub mod decode;
mod error;
mod folders;
mod messages;
mod options;
mod params;
pub mod rate_limit;
mod threads;
pub mod types;
mod users;

pub use client::{
    OAuthCredentials, QuipClient, RequestBody, RequestDescriptor, DEFAULT_API_URL,
};
pub use error::QuipError;
pub use folders::{FolderColor, NewFolderParams};
pub use messages::RecentMessagesParams;
pub use options::{ClientOptions, DECODE_PREFIX_LEN_ENV, DEFAULT_DECODE_PREFIX_LEN};
pub use params::{ParamValue, Params};
pub use rate_limit::{RateLimitPolicy, RetryDecision};
pub use threads::{
    DocumentFormat, EditDocumentParams, Location, NewDocumentParams, RecentThreadsParams,
};
pub use types::{
    Blob, Folder, FolderChild, FolderInfo, Message, Thread, ThreadDetails, ThreadSharing, User,
};

pub type Result<T> = std::result::Result<T, QuipError>;
