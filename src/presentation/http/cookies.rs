// src/presentation/http/cookies.rs
use chrono::{DateTime, Utc};
use std::time::SystemTime;

pub const REFRESH_COOKIE_NAME: &str = "refresh_token";
pub const REFRESH_COOKIE_PATH: &str = "/api/auth/refresh";

const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// `Set-Cookie` value carrying a freshly issued refresh token. The cookie is
/// only ever sent back to the refresh endpoint.
pub fn refresh_cookie(token: &str, expires_at: DateTime<Utc>) -> String {
    let expires = httpdate::fmt_http_date(SystemTime::from(expires_at));
    format!(
        "{REFRESH_COOKIE_NAME}={token}; HttpOnly; Secure; Path={REFRESH_COOKIE_PATH}; SameSite=Strict; Expires={expires}"
    )
}

/// `Set-Cookie` value that makes the browser drop the refresh cookie.
pub fn cleared_refresh_cookie() -> String {
    format!(
        "{REFRESH_COOKIE_NAME}=; HttpOnly; Secure; Path={REFRESH_COOKIE_PATH}; SameSite=Strict; Max-Age=0; Expires={EPOCH_HTTP_DATE}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn refresh_cookie_has_all_attributes() {
        let expires_at = Utc.with_ymd_and_hms(2030, 5, 17, 8, 30, 0).unwrap();
        let cookie = refresh_cookie("abc.def.ghi", expires_at);

        assert_eq!(
            cookie,
            "refresh_token=abc.def.ghi; HttpOnly; Secure; Path=/api/auth/refresh; SameSite=Strict; Expires=Fri, 17 May 2030 08:30:00 GMT"
        );
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let cookie = cleared_refresh_cookie();

        assert!(cookie.starts_with("refresh_token=;"));
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(cookie.contains("Path=/api/auth/refresh"));
    }
}
