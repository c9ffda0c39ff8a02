//! Bearer-credential extraction from headers and cookies.

use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;

/// Host-bound cookie. The `__Host-` prefix requires `Secure`, `Path=/` and
/// no `Domain`, so browsers refuse it from any other host.
pub const HOST_COOKIE: &str = "__Host-clout_token";

/// Cookie name used before the host-scoped cookie existed.
pub const LEGACY_COOKIE: &str = "clout_token";

/// Generic session cookie, last-resort fallback for API callers only.
/// The gateway never reads it: an unrelated session artifact must not be
/// mistaken for a page-navigation credential.
pub const SESSION_COOKIE: &str = "session";

/// Extracts the token from an `Authorization: Bearer` header,
/// case-insensitive scheme, trimmed. Empty tokens count as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, rest) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = rest.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// First non-empty credential cookie: host-scoped, then legacy, then (only
/// when `include_session`) the generic session cookie.
pub fn cookie_token(jar: &CookieJar, include_session: bool) -> Option<String> {
    let mut names = vec![HOST_COOKIE, LEGACY_COOKIE];
    if include_session {
        names.push(SESSION_COOKIE);
    }
    names.into_iter().find_map(|name| {
        jar.get(name)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Full precedence order used by the resolver fallback path:
/// bearer header, host cookie, legacy cookie, session cookie.
pub fn extract_token(headers: &HeaderMap, jar: &CookieJar, include_session: bool) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(jar, include_session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, header::AUTHORIZATION};

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn jar_with(cookies: &[(&str, &str)]) -> CookieJar {
        let mut headers = HeaderMap::new();
        let value = cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ");
        headers.insert(axum::http::header::COOKIE, HeaderValue::from_str(&value).unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn bearer_scheme_is_case_insensitive_and_trimmed() {
        assert_eq!(bearer_token(&headers_with_auth("Bearer abc")), Some("abc".into()));
        assert_eq!(bearer_token(&headers_with_auth("bearer  abc ")), Some("abc".into()));
        assert_eq!(bearer_token(&headers_with_auth("BEARER abc")), Some("abc".into()));
        assert_eq!(bearer_token(&headers_with_auth("Basic abc")), None);
        assert_eq!(bearer_token(&headers_with_auth("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn cookie_precedence_host_then_legacy_then_session() {
        let jar = jar_with(&[(SESSION_COOKIE, "s"), (LEGACY_COOKIE, "l"), (HOST_COOKIE, "h")]);
        assert_eq!(cookie_token(&jar, true), Some("h".into()));

        let jar = jar_with(&[(SESSION_COOKIE, "s"), (LEGACY_COOKIE, "l")]);
        assert_eq!(cookie_token(&jar, true), Some("l".into()));

        let jar = jar_with(&[(SESSION_COOKIE, "s")]);
        assert_eq!(cookie_token(&jar, true), Some("s".into()));
        // The gateway call sites exclude the session cookie entirely.
        assert_eq!(cookie_token(&jar, false), None);
    }

    #[test]
    fn empty_cookie_values_are_skipped() {
        let jar = jar_with(&[(HOST_COOKIE, ""), (LEGACY_COOKIE, "l")]);
        assert_eq!(cookie_token(&jar, false), Some("l".into()));
    }

    #[test]
    fn bearer_wins_over_cookies() {
        let jar = jar_with(&[(HOST_COOKIE, "h")]);
        let headers = headers_with_auth("Bearer b");
        assert_eq!(extract_token(&headers, &jar, true), Some("b".into()));
        assert_eq!(extract_token(&HeaderMap::new(), &jar, true), Some("h".into()));
        assert_eq!(extract_token(&HeaderMap::new(), &CookieJar::new(), true), None);
    }
}
