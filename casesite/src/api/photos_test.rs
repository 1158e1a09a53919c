use super::*;

use crate::api::fake::{FakeTransport, ok};
use crate::auth::MemoryTokens;
use crate::transport::RequestBody;

fn client(transport: FakeTransport) -> ApiClient<FakeTransport, MemoryTokens> {
    ApiClient::new(transport, MemoryTokens::new(Some("t".into()), None))
}

fn portrait() -> FileUpload {
    FileUpload { filename: "jane.jpg".into(), content_type: "image/jpeg".into(), bytes: vec![0xff, 0xd8] }
}

#[tokio::test]
async fn photos_are_sorted_by_order() {
    let api = client(FakeTransport::new(|_| {
        ok(&json!([
            {"id": 2, "image": "b.jpg", "order": 1},
            {"id": 1, "image": "a.jpg", "order": 0}
        ]))
    }));
    let photos = api.photos("9").await.expect("photos");
    assert_eq!(photos.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), ["1", "2"]);
    assert_eq!(api.transport().last().map(|r| r.path).as_deref(), Some("case-photos/?case=9"));
}

#[tokio::test]
async fn upload_sends_case_and_file_parts() {
    let api = client(FakeTransport::new(|_| ok(&json!({"id": 5, "case": 9, "image_url": "https://cdn/jane.jpg"}))));
    let photo = api.upload_photo("9", portrait(), Some("  ")).await.expect("upload");
    assert_eq!(photo.case.as_deref(), Some("9"));

    let sent = api.transport().last().expect("request");
    let RequestBody::Multipart(parts) = sent.body else {
        panic!("expected multipart body");
    };
    assert_eq!(parts.iter().map(MultipartPart::name).collect::<Vec<_>>(), ["case", "image"]);
}

#[tokio::test]
async fn reorder_posts_full_id_list() {
    let api = client(FakeTransport::new(|_| ok(&json!({"status": "reordered"}))));
    api.reorder_photos("9", &["3".into(), "1".into()]).await.expect("reorder");
    let sent = api.transport().last().expect("request");
    assert_eq!(sent.body, RequestBody::Json(json!({"case": "9", "photo_ids": ["3", "1"]})));
}
