use super::*;

#[test]
fn cookie_value_finds_named_cookie() {
    let header = "theme=dark; token=abc.def.ghi; lang=pt";
    assert_eq!(cookie_value(header, "token").as_deref(), Some("abc.def.ghi"));
}

#[test]
fn cookie_value_trims_whitespace() {
    assert_eq!(cookie_value("  token = abc ", "token").as_deref(), Some("abc"));
}

#[test]
fn cookie_value_missing_name_is_none() {
    assert!(cookie_value("theme=dark", "token").is_none());
}

#[test]
fn cookie_value_does_not_match_name_prefix() {
    assert!(cookie_value("token2=abc", "token").is_none());
}

#[test]
fn set_cookie_pair_drops_attributes() {
    let header = "JSESSIONID=9A3F; Path=/; HttpOnly; Max-Age=3600";
    assert_eq!(
        set_cookie_pair(header),
        Some(("JSESSIONID".to_owned(), "9A3F".to_owned()))
    );
}

#[test]
fn set_cookie_pair_empty_name_is_none() {
    assert!(set_cookie_pair("=value; Path=/").is_none());
    assert!(set_cookie_pair("no-equals-sign").is_none());
}

#[test]
fn set_cookie_value_matches_exact_name() {
    let header = "token=jwt-value; Path=/";
    assert_eq!(set_cookie_value(header, "token").as_deref(), Some("jwt-value"));
    assert!(set_cookie_value(header, "JSESSIONID").is_none());
}

#[test]
fn set_cookie_value_allows_empty_value() {
    assert_eq!(set_cookie_value("token=; Path=/", "token").as_deref(), Some(""));
}
