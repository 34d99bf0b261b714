//! Wishlist operations

use reqwest::Method;
use uuid::Uuid;

use crate::StoreClient;
use crate::auth::Role;
use crate::error::Error;
use crate::model::Record;

impl StoreClient {
    /// Lists the current user's wishlist.
    ///
    /// The wishlist is small and unpaginated; the server returns the full
    /// collection.
    pub async fn wishlist(&self) -> Result<Vec<Record>, Error> {
        let url = self.endpoint_url("/wishlist");
        self.get_json(&url, Some(Role::Customer)).await
    }

    /// Adds a product to the wishlist.
    pub async fn add_to_wishlist(&self, product_id: Uuid) -> Result<(), Error> {
        let url = self.endpoint_url(&format!("/wishlist/{}", product_id));
        self.request(Method::POST, &url, None, Some(Role::Customer))
            .await?;
        Ok(())
    }

    /// Removes a product from the wishlist.
    pub async fn remove_from_wishlist(&self, product_id: Uuid) -> Result<(), Error> {
        let url = self.endpoint_url(&format!("/wishlist/{}", product_id));
        self.request(Method::DELETE, &url, None, Some(Role::Customer))
            .await?;
        Ok(())
    }
}
