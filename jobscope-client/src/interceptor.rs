//! Hooks run on every outbound request before it is sent.

use reqwest::Request;

use crate::error::ApiError;

/// Sees, and may replace, each request. Returning an error fails the call
/// without any network I/O.
pub trait RequestInterceptor: Send + Sync {
    fn intercept(&self, request: Request) -> Result<Request, ApiError>;
}

/// Default interceptor: the request is sent exactly as built.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl RequestInterceptor for PassThrough {
    fn intercept(&self, request: Request) -> Result<Request, ApiError> {
        Ok(request)
    }
}

impl<F> RequestInterceptor for F
where
    F: Fn(Request) -> Result<Request, ApiError> + Send + Sync,
{
    fn intercept(&self, request: Request) -> Result<Request, ApiError> {
        self(request)
    }
}
