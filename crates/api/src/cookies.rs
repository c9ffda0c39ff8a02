//! Session cookie clearing for logout.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::token::{HOST_COOKIE, LEGACY_COOKIE, SESSION_COOKIE};

/// Clears all credential cookies across the naming variants.
///
/// Removal cookies: empty value, `Path=/`, `Max-Age=0`, `SameSite=Lax`.
/// The host-scoped cookie is always `Secure` — the `__Host-` prefix demands
/// it, and a non-secure removal would be refused by the browser. The legacy
/// and session cookies are `Secure` only in production, matching how they
/// were originally set; marking them secure in non-TLS dev contexts makes
/// the clear fail silently.
pub fn clear_session_cookies(jar: CookieJar, production: bool) -> CookieJar {
    jar.add(removal(HOST_COOKIE, true))
        .add(removal(LEGACY_COOKIE, production))
        .add(removal(SESSION_COOKIE, production))
}

fn removal(name: &'static str, secure: bool) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(jar: &'a CookieJar, name: &str) -> &'a Cookie<'static> {
        jar.iter().find(|c| c.name() == name).expect("cookie missing")
    }

    #[test]
    fn clears_all_three_names_with_shared_attributes() {
        let jar = clear_session_cookies(CookieJar::new(), true);
        for name in [HOST_COOKIE, LEGACY_COOKIE, SESSION_COOKIE] {
            let c = find(&jar, name);
            assert_eq!(c.value(), "");
            assert_eq!(c.path(), Some("/"));
            assert_eq!(c.max_age(), Some(cookie::time::Duration::ZERO));
            assert_eq!(c.same_site(), Some(SameSite::Lax));
            assert_eq!(c.secure(), Some(true));
        }
    }

    #[test]
    fn host_cookie_stays_secure_outside_production() {
        let jar = clear_session_cookies(CookieJar::new(), false);
        assert_eq!(find(&jar, HOST_COOKIE).secure(), Some(true));
        assert_ne!(find(&jar, LEGACY_COOKIE).secure(), Some(true));
        assert_ne!(find(&jar, SESSION_COOKIE).secure(), Some(true));
    }
}
