mod common;

use axum::extract::{OriginalUri, Query};
use axum::routing::{get, post};
use axum::{Json, Router};
use jobscope_client::{
    ApiClient, ApiError, ClientConfig, IngredientByName, IngredientSearch, NotifNoSearch,
    ProductSearch,
};
use jobscope_i18n::Locale;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::time::Duration;

/// Answers with the request path and query string inside a success envelope.
async fn echo_query(
    OriginalUri(uri): OriginalUri,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(json!({"code": 200, "msg": "ok", "data": {"path": uri.path(), "query": query}}))
}

/// Answers with the request path and JSON body inside a success envelope.
async fn echo_body(OriginalUri(uri): OriginalUri, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({"code": 200, "msg": "ok", "data": {"path": uri.path(), "body": body}}))
}

/// Every endpoint path, each echoing what it received.
fn backend() -> Router {
    Router::new()
        .route(
            "/hello",
            get(|| async { Json(json!({"code": 200, "msg": "ok", "data": "Hello"})) }),
        )
        .route("/products/search", post(echo_body))
        .route("/products/search-by-notifNo", post(echo_body))
        .route("/products/recommend", post(echo_body))
        .route("/api/ingredients/search", post(echo_body))
        .route("/api/ingredients/search-by-name", post(echo_body))
        .route("/api/skill/getSkillLevelByLang", get(echo_query))
        .route("/api/skill/getSkillLevelByLangAndId", get(echo_query))
        .route("/api/job/getJobListByLangAndMajorGroupCode", get(echo_query))
        .route("/api/job/getDetailJobByLangAndUnitGroupCode", get(echo_query))
        .route(
            "/api/job/autoCompleteJobByLangAndUnitGroupTitle",
            get(echo_query),
        )
}

/// Client pointed at a fresh [`backend`].
async fn api() -> ApiClient {
    ApiClient::new(ClientConfig {
        base_url: common::serve(backend()).await,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn test_large_pages_are_sent_as_given() {
    let data: Value = api()
        .await
        .search_ingredients(&IngredientSearch::new("lead", 1, 200))
        .await
        .unwrap();
    assert_eq!(
        data["body"],
        json!({"searchTerm": "lead", "pageNum": 1, "pageSize": 200})
    );
}

#[tokio::test]
async fn test_hello_unwraps_greeting() {
    let greeting: String = api().await.hello().await.unwrap();
    assert_eq!(greeting, "Hello");
}

#[tokio::test]
async fn test_product_endpoints_post_camel_case_bodies() {
    let api = api().await;

    let data: Value = api
        .search_products(&ProductSearch::new("sunscreen", 2, 12))
        .await
        .unwrap();
    assert_eq!(data["path"], "/products/search");
    assert_eq!(
        data["body"],
        json!({"searchTerm": "sunscreen", "pageNum": 2, "pageSize": 12})
    );

    let data: Value = api
        .search_products_by_notif_no(&NotifNoSearch::new("NOT123456"))
        .await
        .unwrap();
    assert_eq!(data["path"], "/products/search-by-notifNo");
    assert_eq!(data["body"], json!({"notifNo": "NOT123456"}));

    let data: Value = api.recommended_products().await.unwrap();
    assert_eq!(data["path"], "/products/recommend");
    assert_eq!(data["body"], json!({}));
}

#[tokio::test]
async fn test_ingredient_endpoints_share_the_client_contract() {
    let api = api().await;

    let data: Value = api
        .search_ingredients(&IngredientSearch::new("paraben", 1, 10))
        .await
        .unwrap();
    assert_eq!(data["path"], "/api/ingredients/search");
    assert_eq!(
        data["body"],
        json!({"searchTerm": "paraben", "pageNum": 1, "pageSize": 10})
    );

    let data: Value = api
        .search_ingredients_by_name(&IngredientByName::new("Hydroquinone"))
        .await
        .unwrap();
    assert_eq!(data["path"], "/api/ingredients/search-by-name");
    assert_eq!(data["body"], json!({"substanceDetected": "Hydroquinone"}));
}

#[tokio::test]
async fn test_directory_lookups_default_lang_to_english() {
    let api = api().await;

    let data: Value = api.skill_levels(None).await.unwrap();
    assert_eq!(data["path"], "/api/skill/getSkillLevelByLang");
    assert_eq!(data["query"], json!({"lang": "en"}));

    let data: Value = api.skill_level(Some(Locale::Ms), "3").await.unwrap();
    assert_eq!(data["path"], "/api/skill/getSkillLevelByLangAndId");
    assert_eq!(data["query"], json!({"lang": "ms", "id": "3"}));
}

#[tokio::test]
async fn test_job_lookups_send_lang_and_identifier() {
    let api = api().await;

    let data: Value = api.jobs_by_major_group(Some(Locale::ZhCn), "2").await.unwrap();
    assert_eq!(data["path"], "/api/job/getJobListByLangAndMajorGroupCode");
    assert_eq!(data["query"], json!({"lang": "zh-CN", "majorGroupCode": "2"}));

    let data: Value = api.job_detail(None, "2511").await.unwrap();
    assert_eq!(data["path"], "/api/job/getDetailJobByLangAndUnitGroupCode");
    assert_eq!(data["query"], json!({"lang": "en", "unitGroupCode": "2511"}));

    let data: Value = api
        .autocomplete_jobs(Some(Locale::Ms), "software dev")
        .await
        .unwrap();
    assert_eq!(
        data["path"],
        "/api/job/autoCompleteJobByLangAndUnitGroupTitle"
    );
    assert_eq!(
        data["query"],
        json!({"lang": "ms", "unitGroupTitle": "software dev"})
    );
}

#[tokio::test]
async fn test_invalid_parameters_never_reach_the_network() {
    // nothing listens here, so any request would surface as a transport error
    let api = ApiClient::new(ClientConfig {
        base_url: common::closed_port().await,
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    let err = api
        .search_products_by_notif_no::<Value>(&NotifNoSearch::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validate(_)));

    let err = api
        .search_ingredients_by_name::<Value>(&IngredientByName::new(""))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validate(_)));

    let err = api.job_detail::<Value>(None, "").await.unwrap_err();
    assert!(matches!(err, ApiError::Validate(_)));
}
