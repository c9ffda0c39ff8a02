//! Sign-in callback and logout.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use crate::app::AppState;
use crate::cookies;
use crate::token::HOST_COOKIE;

#[derive(Deserialize)]
pub struct CallbackQuery {
    token: String,
    #[serde(default)]
    redirect_url: Option<String>,
}

/// Post-login landing: the identity provider redirects here with a fresh
/// token, which we store in the host-scoped cookie before returning the
/// browser to its original destination.
pub async fn callback(jar: CookieJar, Query(query): Query<CallbackQuery>) -> impl IntoResponse {
    // __Host- prefix: Secure, Path=/, no Domain, always.
    let cookie = Cookie::build((HOST_COOKIE, query.token))
        .path("/")
        .secure(true)
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    let target = query
        .redirect_url
        .filter(|url| is_local_redirect(url))
        .unwrap_or_else(|| "/".to_string());

    (jar.add(cookie), Redirect::temporary(&target))
}

/// A safe post-login target is a same-origin path. `//host` and `/\host`
/// are protocol-relative in browsers, so a bare leading-slash check would
/// still let the callback bounce the browser off-site.
fn is_local_redirect(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}

/// Clears every credential cookie variant and hands the browser back to
/// sign-in.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = cookies::clear_session_cookies(jar, state.production);
    (jar, Redirect::temporary(&state.sign_in_url))
}
