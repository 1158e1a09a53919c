use super::*;

#[test]
fn detail_field_wins() {
    let body = r#"{"detail": "Authentication credentials were not provided.", "code": "x"}"#;
    assert_eq!(backend_error_message(401, body), "Authentication credentials were not provided.");
}

#[test]
fn field_level_list_is_prefixed_with_field_name() {
    let body = r#"{"subdomain": ["This subdomain is taken."]}"#;
    assert_eq!(backend_error_message(400, body), "subdomain: This subdomain is taken.");
}

#[test]
fn non_field_errors_are_used_verbatim() {
    let body = r#"{"non_field_errors": ["Provide a subdomain or a custom domain."]}"#;
    assert_eq!(backend_error_message(400, body), "Provide a subdomain or a custom domain.");
}

#[test]
fn top_level_array_uses_first_string() {
    assert_eq!(backend_error_message(400, r#"["bad thing"]"#), "bad thing");
}

#[test]
fn html_body_falls_back_to_status_text() {
    assert_eq!(
        backend_error_message(502, "<html><body>Bad Gateway</body></html>"),
        "The server had a problem; try again."
    );
}

#[test]
fn short_plain_text_body_is_kept() {
    assert_eq!(backend_error_message(400, "nope"), "nope");
}

#[test]
fn from_response_builds_network_error() {
    let err = SiteError::from_response(404, "");
    assert!(matches!(err, SiteError::Network { status: 404, ref message } if message == "Not found."));
}

#[test]
fn retryable_covers_transport_and_server_errors() {
    assert!(SiteError::Transport("offline".into()).retryable());
    assert!(SiteError::Network { status: 503, message: String::new() }.retryable());
    assert!(!SiteError::Network { status: 400, message: String::new() }.retryable());
    assert!(!SiteError::Auth.retryable());
}
