//! Authentication extractors
//!
//! Pull the session token from the `parlor_token` cookie set at login,
//! falling back to a bearer Authorization header, then load the account
//! the token belongs to.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use parlor_core::{DomainError, User};
use parlor_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Name of the session cookie carrying the JWT
pub const SESSION_COOKIE: &str = "parlor_token";

/// Authenticated user loaded from the session token
///
/// Rejects with a JSON 401 envelope, which suits the fetch-based
/// endpoints. Page handlers want [`PageUser`] instead.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = session_token(parts, state)
            .await
            .ok_or(ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let service = AuthService::new(app_state.service_context());

        let user = service.authenticate(&token).await.map_err(|e| {
            tracing::warn!(error = %e, "Rejected session token");
            ApiError::from(e)
        })?;

        Ok(AuthUser(user))
    }
}

/// Authenticated user for rendered pages
///
/// Same lookup as [`AuthUser`], but an unauthenticated browser is sent
/// to the login page instead of receiving a JSON 401.
#[derive(Debug, Clone)]
pub struct PageUser(pub User);

/// Rejection that sends the browser to the login page
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(AuthUser(user)) => Ok(PageUser(user)),
            Err(_) => Err(LoginRedirect),
        }
    }
}

/// Authenticated user holding the admin role
///
/// Extends [`AuthUser`] with a role check; a signed-in non-admin gets
/// a 403 with the `MISSING_ADMIN_ROLE` code.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_admin {
            return Err(ApiError::Domain(DomainError::NotAdmin));
        }

        Ok(AdminUser(user))
    }
}

/// Optional authenticated user
///
/// Returns None when no usable session is present; never rejects.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state)
            .await
            .ok()
            .map(|AuthUser(user)| user);

        Ok(OptionalAuthUser(user))
    }
}

/// Find the session token in the cookie jar or the Authorization header
async fn session_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    if let Ok(jar) = CookieJar::from_request_parts(parts, state).await {
        if let Some(cookie) = jar.get(SESSION_COOKIE) {
            return Some(cookie.value().to_string());
        }
    }

    match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
        Ok(TypedHeader(Authorization(bearer))) => Some(bearer.token().to_string()),
        Err(_) => None,
    }
}
