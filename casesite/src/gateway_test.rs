use super::*;
use crate::api::fake::{FakeTransport, ok};
use crate::auth::MemoryTokens;
use crate::transport::{ApiRequest, ApiResponse, Method, RequestBody};

fn backend(req: &ApiRequest) -> ApiResponse {
    match (req.method, req.path.as_str()) {
        (Method::Post, "cases/") => ok(&json!({"id": 42, "first_name": "Jane"})),
        (Method::Patch, "cases/42/") => ok(&json!({"id": 42, "first_name": "Jane", "patched": true})),
        (Method::Post, "cases/42/deploy/") => ok(&json!({"case": 42, "subdomain": "janedoe", "status": "pending"})),
        _ => ApiResponse::new(404, r#"{"detail":"Not found."}"#),
    }
}

fn gateway() -> CaseGateway<FakeTransport, MemoryTokens> {
    let api = ApiClient::new(FakeTransport::new(backend), MemoryTokens::new(Some("t".into()), None));
    CaseGateway::new(Arc::new(api))
}

fn jane() -> CaseForm {
    let mut form = CaseForm::new();
    form.set_field("first_name", "Jane");
    form.set_field("last_name", "Doe");
    form.set_field("crime_type", "missing");
    form.set_field("last_seen_date", "2024-01-01");
    form.set_field("nickname", "");
    form
}

fn template() -> Template {
    serde_json::from_value(json!({"id": 3, "name": "Beacon", "version": "2"})).expect("template")
}

#[test]
fn payload_strips_empty_fields_and_nests_customizations() {
    let payload = case_payload(&jane(), Some(&template()), &json!({"hero": {"heroImage": ""}}));
    assert_eq!(
        payload,
        json!({
            "first_name": "Jane",
            "last_name": "Doe",
            "crime_type": "missing",
            "last_seen_date": "2024-01-01",
            "template_id": "3",
            "template_version": "2",
            "template_data": {"customizations": {"hero": {"heroImage": ""}}}
        })
    );
}

#[tokio::test]
async fn first_save_creates_then_patches() {
    let gw = gateway();
    let created = gw.save(&jane(), Some(&template()), &json!({})).await.expect("create");
    assert_eq!(created.id, "42");
    assert_eq!(gw.case_id().await.as_deref(), Some("42"));

    let updated = gw.save(&jane(), Some(&template()), &json!({})).await.expect("update");
    assert_eq!(updated.field("patched"), Some(&json!(true)));
    assert_eq!(gw.api().transport().count(Method::Post, "cases/"), 1);
    assert_eq!(gw.api().transport().count(Method::Patch, "cases/42/"), 1);
}

#[tokio::test]
async fn concurrent_saves_never_create_twice() {
    let gw = gateway();
    let form = jane();
    let empty = json!({});
    let (a, b) = tokio::join!(gw.save(&form, None, &empty), gw.save(&form, None, &empty));
    assert!(a.is_ok() && b.is_ok());
    assert_eq!(gw.api().transport().count(Method::Post, "cases/"), 1);
    assert_eq!(gw.api().transport().count(Method::Patch, "cases/42/"), 1);
}

#[tokio::test]
async fn invalid_form_is_rejected_locally() {
    let gw = gateway();
    let mut form = jane();
    form.set_field("last_seen_date", "");
    let err = gw.save(&form, None, &json!({})).await.expect_err("invalid");
    assert_eq!(err.to_string(), "validation failed: last_seen_date: Required for missing persons");
    assert!(gw.api().transport().requests().is_empty());
}

#[tokio::test]
async fn deploy_requires_saved_case() {
    let gw = gateway();
    let err = gw.deploy(&DeployTarget::subdomain("janedoe")).await.expect_err("unsaved");
    assert!(matches!(err, SiteError::NotSaved));
    assert!(matches!(gw.photos().await, Err(SiteError::NotSaved)));
}

#[tokio::test]
async fn deploy_validates_target_before_anything_else() {
    let gw = CaseGateway::for_case(gateway().api.clone(), "42");
    let err = gw.deploy(&DeployTarget::subdomain("My_Case!")).await.expect_err("bad subdomain");
    assert!(err.is_validation());
    assert!(gw.api().transport().requests().is_empty());

    let deployment = gw.deploy(&DeployTarget::subdomain(" janedoe ")).await.expect("deploy");
    assert_eq!(deployment.subdomain.as_deref(), Some("janedoe"));
    let sent = gw.api().transport().last().expect("request");
    assert_eq!(sent.body, RequestBody::Json(json!({"subdomain": "janedoe", "custom_domain": null})));
}

#[tokio::test]
async fn backend_errors_surface_as_network_errors() {
    let gw = CaseGateway::for_case(gateway().api.clone(), "7");
    let err = gw.save(&jane(), None, &json!({})).await.expect_err("missing case");
    assert!(matches!(err, SiteError::Network { status: 404, ref message } if message == "Not found."));
}
