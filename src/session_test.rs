use super::*;

fn config() -> AppConfig {
    AppConfig::for_api_base("http://upstream.test")
}

// =============================================================================
// token_from_jar
// =============================================================================

#[test]
fn token_from_jar_present() {
    let jar = CookieJar::new().add(Cookie::new("access_token", "tok"));
    assert_eq!(token_from_jar(&jar, "access_token"), Some("tok"));
}

#[test]
fn token_from_jar_absent() {
    let jar = CookieJar::new().add(Cookie::new("other", "tok"));
    assert_eq!(token_from_jar(&jar, "access_token"), None);
}

#[test]
fn token_from_jar_empty_value_is_absent() {
    let jar = CookieJar::new().add(Cookie::new("access_token", ""));
    assert_eq!(token_from_jar(&jar, "access_token"), None);
}

#[test]
fn token_from_jar_respects_configured_name() {
    let jar = CookieJar::new().add(Cookie::new("sid", "tok"));
    assert_eq!(token_from_jar(&jar, "sid"), Some("tok"));
    assert_eq!(token_from_jar(&jar, "access_token"), None);
}

// =============================================================================
// cookie builders
// =============================================================================

#[test]
fn session_cookie_attributes() {
    let cookie = session_cookie(&config(), "tok".into());
    assert_eq!(cookie.name(), "access_token");
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.secure(), Some(false));
    assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
}

#[test]
fn session_cookie_secure_follows_config() {
    let mut cfg = config();
    cfg.cookie_secure = true;
    let cookie = session_cookie(&cfg, "tok".into());
    assert_eq!(cookie.secure(), Some(true));
}

#[test]
fn cleared_cookie_is_blank_and_expired() {
    let cookie = cleared_cookie(&config());
    assert_eq!(cookie.name(), "access_token");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}
