//! Typed wrappers for each backend endpoint. Response `data` types are picked
//! by the caller; request parameters are validated before anything is sent.

mod ingredients;
mod jobs;
mod products;

use serde::de::DeserializeOwned;

pub use ingredients::{IngredientByName, IngredientSearch};
pub use products::{NotifNoSearch, ProductSearch};

use crate::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// `GET /hello`
    pub async fn hello<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        self.get("/hello").await
    }
}
