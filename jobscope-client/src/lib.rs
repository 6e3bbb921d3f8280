//! Client side of the jobscope HTTP API.
//!
//! Every call goes through one [`ApiClient`]: the request interceptor runs
//! first, transport failures are logged and returned as [`ApiError`], and the
//! `{ code, msg, data }` envelope is unwrapped so callers only ever see `data`
//! or an error.

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
pub mod interceptor;

pub use api::{IngredientByName, IngredientSearch, NotifNoSearch, ProductSearch};
pub use client::{ApiClient, ClientConfig};
pub use envelope::Envelope;
pub use error::ApiError;
pub use interceptor::{PassThrough, RequestInterceptor};
