use super::*;

#[test]
fn memory_tokens_keep_refresh_when_not_rotated() {
    let tokens = MemoryTokens::new(Some("a1".into()), Some("r1".into()));
    tokens.store_tokens("a2", None);
    assert_eq!(tokens.access_token().as_deref(), Some("a2"));
    assert_eq!(tokens.refresh_token().as_deref(), Some("r1"));

    tokens.store_tokens("a3", Some("r2"));
    assert_eq!(tokens.refresh_token().as_deref(), Some("r2"));
}

#[test]
fn clear_drops_both_tokens() {
    let tokens = Arc::new(MemoryTokens::new(Some("a".into()), Some("r".into())));
    let shared = Arc::clone(&tokens);
    shared.clear();
    assert_eq!(tokens.access_token(), None);
    assert_eq!(tokens.refresh_token(), None);
}

#[test]
fn token_pair_refresh_is_optional() {
    let pair: TokenPair = serde_json::from_str(r#"{"access":"x"}"#).expect("pair");
    assert_eq!(pair, TokenPair { access: "x".into(), refresh: None });
}
