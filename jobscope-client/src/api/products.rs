use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductSearch {
    pub search_term: String,
    pub page_num: u32,
    pub page_size: u32,
}

impl ProductSearch {
    pub fn new(search_term: impl Into<String>, page_num: u32, page_size: u32) -> Self {
        Self {
            search_term: search_term.into(),
            page_num,
            page_size,
        }
    }
}

/// Lookup by the product's cosmetic notification number.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotifNoSearch {
    #[validate(length(min = 1))]
    pub notif_no: String,
}

impl NotifNoSearch {
    pub fn new(notif_no: impl Into<String>) -> Self {
        Self {
            notif_no: notif_no.into(),
        }
    }
}

impl ApiClient {
    /// `POST /products/search`
    pub async fn search_products<T: DeserializeOwned>(
        &self,
        params: &ProductSearch,
    ) -> Result<T, ApiError> {
        self.post_checked("/products/search", params).await
    }

    /// `POST /products/search-by-notifNo`
    pub async fn search_products_by_notif_no<T: DeserializeOwned>(
        &self,
        params: &NotifNoSearch,
    ) -> Result<T, ApiError> {
        self.post_checked("/products/search-by-notifNo", params)
            .await
    }

    /// `POST /products/recommend` with an empty JSON object.
    pub async fn recommended_products<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        self.post("/products/recommend", &Value::Object(Map::new()))
            .await
    }
}
