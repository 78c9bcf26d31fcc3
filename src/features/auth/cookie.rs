use axum::http::{header, HeaderMap};

/// Find the access token in the request, preferring `Authorization: Bearer`
/// over the auth cookie.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value that stores the token on the client
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
        name, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the token from the client
pub fn expired_cookie(name: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Lax",
        name
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; access_token_cookie=abc.def.ghi; lang=ru"),
        );

        assert_eq!(
            extract_token(&headers, "access_token_cookie"),
            Some("abc.def.ghi".to_string())
        );
        assert_eq!(extract_token(&headers, "other_cookie"), None);
    }

    #[test]
    fn test_bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token_cookie=from-cookie"));

        assert_eq!(
            extract_token(&headers, "access_token_cookie"),
            Some("from-header".to_string())
        );
    }

    #[test]
    fn test_empty_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token_cookie="));

        assert_eq!(extract_token(&headers, "access_token_cookie"), None);
    }

    #[test]
    fn test_cookie_builders() {
        let cookie = session_cookie("access_token_cookie", "tok", 60, true);
        assert!(cookie.starts_with("access_token_cookie=tok;"));
        assert!(cookie.contains("Max-Age=60"));
        assert!(cookie.ends_with("; Secure"));

        let expired = expired_cookie("access_token_cookie", false);
        assert!(expired.starts_with("access_token_cookie=;"));
        assert!(expired.contains("Max-Age=0"));
        assert!(!expired.contains("Secure"));
    }
}
