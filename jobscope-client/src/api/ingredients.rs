use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IngredientSearch {
    pub search_term: String,
    pub page_num: u32,
    pub page_size: u32,
}

impl IngredientSearch {
    pub fn new(search_term: impl Into<String>, page_num: u32, page_size: u32) -> Self {
        Self {
            search_term: search_term.into(),
            page_num,
            page_size,
        }
    }
}

/// Detail lookup by the exact name of a detected substance.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct IngredientByName {
    #[validate(length(min = 1))]
    pub substance_detected: String,
}

impl IngredientByName {
    pub fn new(substance_detected: impl Into<String>) -> Self {
        Self {
            substance_detected: substance_detected.into(),
        }
    }
}

impl ApiClient {
    /// `POST /api/ingredients/search`
    pub async fn search_ingredients<T: DeserializeOwned>(
        &self,
        params: &IngredientSearch,
    ) -> Result<T, ApiError> {
        self.post_checked("/api/ingredients/search", params).await
    }

    /// `POST /api/ingredients/search-by-name`
    pub async fn search_ingredients_by_name<T: DeserializeOwned>(
        &self,
        params: &IngredientByName,
    ) -> Result<T, ApiError> {
        self.post_checked("/api/ingredients/search-by-name", params)
            .await
    }
}
