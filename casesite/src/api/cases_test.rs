use super::*;
use crate::api::fake::{FakeTransport, ok};
use crate::auth::MemoryTokens;
use crate::deploy::DeploymentStatus;
use crate::transport::RequestBody;

fn client(transport: FakeTransport) -> ApiClient<FakeTransport, MemoryTokens> {
    ApiClient::new(transport, MemoryTokens::new(Some("t".into()), Some("r".into())))
}

#[tokio::test]
async fn my_cases_accepts_paginated_body() {
    let api = client(FakeTransport::new(|_| {
        ok(&json!({"count": 1, "results": [{"id": 3, "first_name": "Jane", "last_name": "Doe"}]}))
    }));
    let cases = api.my_cases().await.expect("cases");
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].display_name(), "Jane Doe");
    assert_eq!(api.transport().last().map(|r| r.path), Some("cases/my_cases/".into()));
}

#[tokio::test]
async fn stats_decode_with_aliases() {
    let api = client(FakeTransport::new(|_| ok(&json!({"total": 4, "deployed": 1, "drafts": 3, "views": 90}))));
    let stats = api.case_stats().await.expect("stats");
    assert_eq!((stats.total_cases, stats.published_cases, stats.draft_cases), (4, 1, 3));
    assert_eq!(stats.extra["views"], 90);
}

#[tokio::test]
async fn update_uses_patch_on_case_path() {
    let api = client(FakeTransport::new(|req| ok(&json!({"id": 9, "echo": req.method.as_str()}))));
    let record = api.update_case("9", json!({"first_name": "Jane"})).await.expect("update");
    assert_eq!(record.field("echo"), Some(&json!("PATCH")));
    let sent = api.transport().last().expect("request");
    assert_eq!(sent.path, "cases/9/");
    assert_eq!(sent.body, RequestBody::Json(json!({"first_name": "Jane"})));
}

#[tokio::test]
async fn delete_accepts_empty_body() {
    let api = client(FakeTransport::new(|_| crate::transport::ApiResponse::new(204, "")));
    api.delete_case("9").await.expect("deleted");
    assert_eq!(api.transport().count(Method::Delete, "cases/9/"), 1);
}

#[tokio::test]
async fn section_update_wraps_section_and_data() {
    let api = client(FakeTransport::new(|_| ok(&json!({"status": "ok"}))));
    api.update_template_section("9", "hero", &json!({"heroImage": "a.jpg"})).await.expect("section");
    let sent = api.transport().last().expect("request");
    assert_eq!(sent.path, "cases/9/update_template_section/");
    assert_eq!(sent.body, RequestBody::Json(json!({"section": "hero", "data": {"heroImage": "a.jpg"}})));
}

#[tokio::test]
async fn deploy_and_status_decode_deployments() {
    let api = client(FakeTransport::new(|req| {
        if req.path.ends_with("deploy/") {
            ok(&json!({"case": 9, "subdomain": "janedoe", "status": "pending"}))
        } else {
            ok(&json!({"case": 9, "subdomain": "janedoe", "status": "active", "url": "https://janedoe.example.org"}))
        }
    }));
    let started = api.deploy_case("9", &DeployTarget::subdomain("janedoe")).await.expect("deploy");
    assert_eq!(started.status, DeploymentStatus::Pending);
    let sent = api.transport().last().expect("request");
    assert_eq!(sent.body, RequestBody::Json(json!({"subdomain": "janedoe", "custom_domain": null})));

    let status = api.deployment_status("9").await.expect("status");
    assert!(status.is_terminal());
    assert_eq!(status.url.as_deref(), Some("https://janedoe.example.org"));
}
