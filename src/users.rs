//! User endpoints.

use crate::params::ensure_present;
use crate::{Params, QuipClient, Result, User};

impl QuipClient {
    /// Fetches one user by ID or email address.
    pub async fn get_user(&self, id: &str) -> Result<User> {
        ensure_present("id", id, "users/{id}")?;
        self.get_object(&format!("users/{id}"), &Params::new())
            .await
    }

    /// Fetches several users in one request. Order is unspecified.
    pub async fn get_users(&self, ids: &[String]) -> Result<Vec<User>> {
        let params = Params::new().required("ids", ids, "users/")?;
        self.get_keyed("users/", &params).await
    }

    pub async fn get_contacts(&self) -> Result<Vec<User>> {
        self.get_array("users/contacts", &Params::new()).await
    }

    /// Fetches the user that owns the access token.
    pub async fn get_authenticated_user(&self) -> Result<User> {
        self.get_object("users/current", &Params::new()).await
    }
}
