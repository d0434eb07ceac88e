//! Page handlers
//!
//! Server-rendered pages plus the form posts behind them. Form posts
//! follow the redirect-after-post pattern, so outcomes travel back as
//! `notice` or `error` query parameters and survive the refresh.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use minijinja::context;
use parlor_service::dto::{ChangePasswordRequest, LoginRequest, RegisterRequest, UserRow};
use parlor_service::{AuthService, ChatService};
use validator::Validate;

use super::{flash_message, FlashParams};
use crate::extractors::{OptionalAuthUser, PageUser, SESSION_COOKIE};
use crate::response::{
    first_validation_message, redirect_with_error, redirect_with_notice, ApiError,
};
use crate::state::AppState;
use crate::templates::render;

/// GET / sends the browser wherever it belongs
pub async fn root(OptionalAuthUser(user): OptionalAuthUser) -> Redirect {
    if user.is_some() {
        Redirect::to("/chat")
    } else {
        Redirect::to("/login")
    }
}

/// GET /login
pub async fn login_page(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Query(flash): Query<FlashParams>,
) -> Result<Response, ApiError> {
    if user.is_some() {
        return Ok(Redirect::to("/chat").into_response());
    }

    let page = render(
        state.templates(),
        "login.html",
        context! {
            error => flash.error,
            notice => flash.notice,
        },
    )?;
    Ok(page.into_response())
}

/// POST /login
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> (CookieJar, Redirect) {
    let service = AuthService::new(state.service_context());

    match service.login(request).await {
        Ok(outcome) => {
            let jar = jar.add(session_cookie(outcome.token));
            (jar, Redirect::to("/chat"))
        }
        Err(e) => {
            tracing::debug!(error = %e, "login rejected");
            (
                jar,
                redirect_with_error("/login", "Invalid username or password"),
            )
        }
    }
}

/// POST /logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(removal), Redirect::to("/login"))
}

/// GET /register
pub async fn register_page(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Query(flash): Query<FlashParams>,
) -> Result<Response, ApiError> {
    if user.is_some() {
        return Ok(Redirect::to("/chat").into_response());
    }

    let page = render(
        state.templates(),
        "register.html",
        context! { error => flash.error },
    )?;
    Ok(page.into_response())
}

/// POST /register
pub async fn register_submit(
    State(state): State<AppState>,
    Form(request): Form<RegisterRequest>,
) -> Redirect {
    if let Err(errors) = request.validate() {
        return redirect_with_error("/register", &first_validation_message(&errors));
    }

    let service = AuthService::new(state.service_context());
    match service.register(request).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "account registered");
            redirect_with_notice("/login", "Account created. You can log in now.")
        }
        Err(e) => redirect_with_error("/register", &flash_message(&e)),
    }
}

/// GET /chat
pub async fn chat_page(
    State(state): State<AppState>,
    PageUser(user): PageUser,
) -> Result<Html<String>, ApiError> {
    let service = ChatService::new(state.service_context());
    let messages = service.history(&user).await?;
    let latest = messages.last().map(|m| m.timestamp);

    render(
        state.templates(),
        "chat.html",
        context! {
            current_user => UserRow::from(&user),
            messages => messages,
            latest => latest,
        },
    )
}

/// GET /profile
pub async fn profile_page(
    State(state): State<AppState>,
    PageUser(user): PageUser,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    render(
        state.templates(),
        "profile.html",
        context! {
            current_user => UserRow::from(&user),
            notice => flash.notice,
            error => flash.error,
        },
    )
}

/// POST /change-password
pub async fn change_password(
    State(state): State<AppState>,
    PageUser(user): PageUser,
    Form(request): Form<ChangePasswordRequest>,
) -> Redirect {
    let service = AuthService::new(state.service_context());

    match service.change_password(&user, request).await {
        Ok(()) => redirect_with_notice("/profile", "Password changed"),
        Err(e) => redirect_with_error("/profile", &flash_message(&e)),
    }
}

/// Session cookie carrying the JWT; the token itself carries the expiry
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
