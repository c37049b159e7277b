use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};

use super::{Claims, TokenVerifier};
use crate::error::ApiError;

/// Zero-sized marker naming the permission a route requires
pub trait Permission: Send + Sync + 'static {
    const NAME: &'static str;
}

macro_rules! permissions {
    ($($marker:ident => $name:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $marker;

            impl Permission for $marker {
                const NAME: &'static str = $name;
            }
        )*
    };
}

permissions! {
    GetActors => "get:actors",
    PostActors => "post:actors",
    PatchActors => "patch:actors",
    DeleteActors => "delete:actors",
    GetMovies => "get:movies",
    PostMovies => "post:movies",
    PatchMovies => "patch:movies",
    DeleteMovies => "delete:movies",
}

/// Verified claims of a caller holding permission `P`.
///
/// Taking this as a handler argument is the whole authorization check: the
/// handler body only runs once the bearer token is verified and grants `P`.
#[derive(Debug, Clone)]
pub struct Authorized<P: Permission> {
    pub claims: Claims,
    _permission: PhantomData<P>,
}

impl<P: Permission> Authorized<P> {
    pub fn subject(&self) -> &str {
        self.claims.sub.as_deref().unwrap_or("anonymous")
    }
}

#[async_trait]
impl<S, P> FromRequestParts<S> for Authorized<P>
where
    S: Send + Sync,
    P: Permission,
    Arc<TokenVerifier>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = Arc::<TokenVerifier>::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or_default());

        let claims = verifier.authorize(header, P::NAME)?;
        tracing::debug!("{} granted {}", claims.sub.as_deref().unwrap_or("anonymous"), P::NAME);

        Ok(Self {
            claims,
            _permission: PhantomData,
        })
    }
}
