use serde::{Deserialize, Serialize};

/// Document or chat thread with its membership lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thread {
    pub expanded_user_ids: Vec<String>,
    pub user_ids: Vec<String>,
    pub shared_folder_ids: Vec<String>,
    pub html: String,
    pub thread: ThreadDetails,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadDetails {
    pub id: String,
    pub author_id: String,
    pub thread_class: String,
    pub created_usec: i64,
    pub updated_usec: i64,
    pub title: String,
    pub link: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub sharing: ThreadSharing,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreadSharing {
    pub company_id: String,
    pub company_mode: String,
}

/// Folder with its members and children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Folder {
    #[serde(rename = "folder")]
    pub info: FolderInfo,
    pub member_ids: Vec<String>,
    pub children: Vec<FolderChild>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderInfo {
    pub id: String,
    pub title: String,
    pub created_usec: i64,
    pub updated_usec: i64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

/// Entry of a folder listing; exactly one of the IDs is normally set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderChild {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub id: String,
    pub author_id: String,
    pub created_usec: i64,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity: Option<f64>,
    pub chat_thread_id: String,
    pub desktop_folder_id: String,
    pub archive_folder_id: String,
}

/// Uploaded file attached to a thread.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blob {
    pub id: String,
    pub url: String,
}
