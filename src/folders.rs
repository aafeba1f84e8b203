//! Folder endpoints.

use crate::params::ensure_present;
use crate::{Folder, Params, QuipClient, Result};

/// Folder color accepted by `folders/new`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FolderColor {
    Manila,
    Red,
    Orange,
    Green,
    Blue,
}

impl FolderColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manila => "manila",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

/// Parameters for [`QuipClient::new_folder`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewFolderParams {
    pub title: String,
    pub parent_id: Option<String>,
    pub color: Option<FolderColor>,
    pub member_ids: Vec<String>,
}

impl NewFolderParams {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl QuipClient {
    /// Fetches one folder by ID.
    pub async fn get_folder(&self, id: &str) -> Result<Folder> {
        ensure_present("id", id, "folders/{id}")?;
        self.get_object(&format!("folders/{id}"), &Params::new())
            .await
    }

    /// Fetches several folders in one request. Order is unspecified.
    pub async fn get_folders(&self, ids: &[String]) -> Result<Vec<Folder>> {
        let params = Params::new().required("ids", ids, "folders/")?;
        self.get_keyed("folders/", &params).await
    }

    pub async fn new_folder(&self, params: &NewFolderParams) -> Result<Folder> {
        let params = Params::new()
            .required("title", &params.title, "folders/new")?
            .optional_opt("parent_id", params.parent_id.as_deref())
            .optional_opt("color", params.color.map(FolderColor::as_str))
            .optional("member_ids", &params.member_ids);
        self.post_object("folders/new", params).await
    }

    pub async fn add_folder_members(
        &self,
        folder_id: &str,
        member_ids: &[String],
    ) -> Result<Folder> {
        let params = membership_params(folder_id, member_ids, "folders/add-members")?;
        self.post_object("folders/add-members", params).await
    }

    pub async fn remove_folder_members(
        &self,
        folder_id: &str,
        member_ids: &[String],
    ) -> Result<Folder> {
        let params = membership_params(folder_id, member_ids, "folders/remove-members")?;
        self.post_object("folders/remove-members", params).await
    }
}

fn membership_params(folder_id: &str, member_ids: &[String], endpoint: &str) -> Result<Params> {
    Params::new()
        .required("folder_id", folder_id, endpoint)?
        .required("member_ids", member_ids, endpoint)
}

#[cfg(test)]
mod tests {
    use super::{membership_params, FolderColor, NewFolderParams};

    #[test]
    fn colors_use_api_names() {
        assert_eq!(FolderColor::Manila.as_str(), "manila");
        assert_eq!(FolderColor::Blue.as_str(), "blue");
    }

    #[test]
    fn new_folder_params_default_to_empty_optionals() {
        let params = NewFolderParams::new("Specs");
        assert_eq!(params.title, "Specs");
        assert!(params.parent_id.is_none());
        assert!(params.member_ids.is_empty());
    }

    #[test]
    fn membership_requires_members() {
        assert!(membership_params("f1", &[], "folders/add-members").is_err());
        let members = ["u1".to_owned(), "u2".to_owned()];
        let params =
            membership_params("f1", &members, "folders/add-members").expect("must build");
        assert_eq!(params.encode(), "folder_id=f1&member_ids=u1%2Cu2");
    }
}
