use super::*;
use casesite::SiteError;

#[test]
fn error_text_shows_backend_message() {
    let err = SiteError::from_response(400, r#"{"subdomain":["This subdomain is taken."]}"#);
    assert_eq!(error_text(&err), "subdomain: This subdomain is taken.");
}

#[test]
fn error_text_explains_transport_failures() {
    let text = error_text(&SiteError::Transport("TypeError: Failed to fetch".into()));
    assert!(text.starts_with("Could not reach the server"));
}

#[test]
fn empty_mime_type_defaults_to_octet_stream() {
    assert_eq!(file_type_or_default(""), "application/octet-stream");
    assert_eq!(file_type_or_default("image/png"), "image/png");
}

#[test]
fn only_images_are_uploadable() {
    let file = |ct: &str| FileUpload { filename: "x".into(), content_type: ct.into(), bytes: Vec::new() };
    assert!(is_image_upload(&file("image/jpeg")));
    assert!(!is_image_upload(&file("application/pdf")));
}

#[test]
fn api_client_is_shared() {
    assert!(Arc::ptr_eq(&api(), &api()));
}
