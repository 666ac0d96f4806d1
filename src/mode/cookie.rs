//! The `ob_datamode` override channel.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::mode::resolver::DataMode;

/// Cookie carrying the per-client mode override.
pub const MODE_COOKIE: &str = "ob_datamode";

/// Extract a valid override from a cookie jar.
pub fn read_override(jar: &CookieJar) -> Option<DataMode> {
    jar.get(MODE_COOKIE)
        .and_then(|c| DataMode::parse_override(c.value()))
}

/// Build the override cookie. Readable by client scripts, app-wide, lax.
pub fn override_cookie(mode: DataMode) -> Cookie<'static> {
    Cookie::build((MODE_COOKIE, mode.as_str()))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .build()
}

/// `Cookie` request header value for clients that keep the override themselves.
pub fn cookie_header_value(mode: DataMode) -> String {
    format!("{}={}", MODE_COOKIE, mode)
}
