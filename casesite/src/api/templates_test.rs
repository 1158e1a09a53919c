use super::*;
use serde_json::json;

use crate::api::fake::{FakeTransport, ok};
use crate::auth::MemoryTokens;
use crate::transport::Method;

fn client(transport: FakeTransport) -> ApiClient<FakeTransport, MemoryTokens> {
    ApiClient::new(transport, MemoryTokens::new(Some("t".into()), None))
}

#[tokio::test]
async fn lists_templates_from_bare_array() {
    let api = client(FakeTransport::new(|_| {
        ok(&json!([{"id": 1, "name": "Quiet Garden", "version": "1"}, {"id": 2, "name": "Beacon"}]))
    }));
    let templates = api.templates().await.expect("templates");
    let names: Vec<_> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["Quiet Garden", "Beacon"]);
}

#[tokio::test]
async fn schema_unwraps_wrapper_object() {
    let api = client(FakeTransport::new(|_| ok(&json!({"schema": {"global": {}}}))));
    assert_eq!(api.template_schema("1").await.expect("schema"), json!({"global": {}}));
}

#[tokio::test]
async fn ensure_schema_fetches_only_when_missing() {
    let api = client(FakeTransport::new(|_| ok(&json!({"global": {"title": {"type": "text"}}}))));
    let bare: Template = serde_json::from_value(json!({"id": 5, "name": "Beacon"})).expect("template");
    let loaded = api.ensure_schema(bare).await.expect("schema");
    assert!(loaded.schema.is_some());
    assert_eq!(api.transport().count(Method::Get, "templates/5/schema/"), 1);

    api.ensure_schema(loaded).await.expect("cached");
    assert_eq!(api.transport().requests().len(), 1);
}

#[tokio::test]
async fn compare_passes_ids_as_query() {
    let api = client(FakeTransport::new(|_| ok(&json!({"templates": [], "fields": ["hero"]}))));
    let comparison = api.compare_templates(&["1", "2"]).await.expect("compare");
    assert_eq!(comparison.extra["fields"], json!(["hero"]));
    assert_eq!(api.transport().last().map(|r| r.path).as_deref(), Some("templates/compare/?ids=1,2"));
}
