use super::*;
use serde_json::json;

use crate::api::fake::{FakeTransport, ok};
use crate::auth::MemoryTokens;
use crate::transport::RequestBody;

fn client() -> ApiClient<FakeTransport, MemoryTokens> {
    let transport = FakeTransport::new(|_| ok(&json!({"username": "jane", "email": "jane@example.org", "avatar": "a.png"})));
    ApiClient::new(transport, MemoryTokens::new(Some("t".into()), None))
}

#[tokio::test]
async fn profile_decodes_avatar_alias() {
    let api = client();
    let profile = api.profile().await.expect("profile");
    assert_eq!(profile.avatar_url.as_deref(), Some("a.png"));
}

#[tokio::test]
async fn avatar_upload_switches_to_multipart() {
    let api = client();
    let mut fields = Map::new();
    fields.insert("first_name".into(), json!("Jane"));
    fields.insert("bio".into(), Value::Null);
    let avatar = FileUpload { filename: "me.png".into(), content_type: "image/png".into(), bytes: vec![1] };
    api.update_profile(fields.clone(), Some(avatar)).await.expect("update");

    let RequestBody::Multipart(parts) = api.transport().last().expect("request").body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.iter().map(MultipartPart::name).collect::<Vec<_>>(), ["first_name", "avatar"]);

    api.update_profile(fields, None).await.expect("update");
    assert!(matches!(api.transport().last().expect("request").body, RequestBody::Json(_)));
}
