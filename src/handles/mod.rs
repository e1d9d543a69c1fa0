mod dashboard_handle;
mod reading_handle;
mod station_handle;

pub use dashboard_handle::*;
pub use reading_handle::*;
pub use station_handle::*;

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Identity of the caller performing a mutation, taken from the `X-Actor`
/// header. Every operation that writes an audit trail receives it
/// explicitly instead of reading an ambient session.
#[derive(Debug, Clone)]
pub struct Actor(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let usuario = parts
            .headers
            .get("x-actor")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("guest")
            .to_string();

        Ok(Actor(usuario))
    }
}
