//! Details -> template -> customize -> save -> deploy, against an in-memory backend.

use std::cell::RefCell;
use std::sync::Arc;

use casesite::transport::RequestBody;
use casesite::{
    ApiClient, ApiRequest, ApiResponse, CaseForm, CaseGateway, CustomizationStore, DeployTarget, MemoryTokens,
    Method, SiteError, Transport, editable_zones, get_path, initialize_customizations,
};
use serde_json::{Value, json};

#[derive(Default)]
struct Backend {
    log: RefCell<Vec<(Method, String, Value)>>,
}

impl Backend {
    fn calls(&self) -> Vec<(Method, String)> {
        self.log.borrow().iter().map(|(m, p, _)| (*m, p.clone())).collect()
    }

    fn body_of(&self, method: Method, path: &str) -> Option<Value> {
        self.log.borrow().iter().find(|(m, p, _)| *m == method && p == path).map(|(_, _, b)| b.clone())
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for Backend {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, SiteError> {
        let body = match &request.body {
            RequestBody::Json(value) => value.clone(),
            _ => Value::Null,
        };
        self.log.borrow_mut().push((request.method, request.path.clone(), body.clone()));
        let reply = match (request.method, request.path.as_str()) {
            (Method::Get, "templates/") => json!([{
                "id": 1,
                "name": "Quiet Garden",
                "version": "1.0",
                "schema": {
                    "global": {"primaryColor": {"type": "color", "default": "#3a5a40"}},
                    "sections": {"hero": {"heroImage": {"type": "image"}, "headline": {"type": "text", "default": "Help find Jane"}}}
                }
            }]),
            (Method::Post, "cases/") => {
                let mut record = body;
                record["id"] = json!(101);
                record
            }
            (Method::Patch, "cases/101/") => {
                let mut record = body;
                record["id"] = json!(101);
                record
            }
            (Method::Post, "cases/101/deploy/") => json!({"case": 101, "subdomain": "janedoe", "status": "deploying"}),
            (Method::Get, "cases/101/deployment_status/") => json!({"case": 101, "subdomain": "janedoe", "status": "active"}),
            _ => return Ok(ApiResponse::new(404, r#"{"detail":"Not found."}"#)),
        };
        Ok(ApiResponse::new(200, reply.to_string()))
    }
}

#[tokio::test]
async fn jane_doe_case_is_created_once_then_patched_and_deployed() {
    let api = Arc::new(ApiClient::new(Backend::default(), MemoryTokens::new(Some("token".into()), None)));
    let gateway = CaseGateway::new(Arc::clone(&api));

    let mut form = CaseForm::new();
    form.set_field("first_name", "Jane");
    form.set_field("last_name", "Doe");
    form.set_field("crime_type", "missing");
    form.set_field("last_seen_date", "2024-01-01");
    assert!(form.validate().is_empty());

    let template = api.templates().await.expect("templates").remove(0);
    assert_eq!(editable_zones(&template).len(), 3);
    let mut store = CustomizationStore::for_template(&template);
    assert_eq!(store.values(), &initialize_customizations(&template));
    store.set("hero.heroImage", json!("https://img.example/jane.jpg")).expect("declared zone");
    assert!(store.set("hero.subtitle", json!("nope")).is_err());

    let created = gateway.save(&form, Some(&template), store.values()).await.expect("create");
    assert_eq!(created.id, "101");
    let sent = api.transport().body_of(Method::Post, "cases/").expect("create body");
    assert_eq!(get_path(&sent, "template_data.customizations.hero.heroImage"), Some(&json!("https://img.example/jane.jpg")));
    assert_eq!(sent["template_id"], "1");

    form.set_field("nickname", "JD");
    gateway.save(&form, Some(&template), store.values()).await.expect("update");
    assert_eq!(api.transport().body_of(Method::Patch, "cases/101/").expect("patch body")["nickname"], "JD");

    let deployment = gateway.deploy(&DeployTarget::subdomain("janedoe")).await.expect("deploy");
    assert!(!deployment.is_terminal());
    assert!(gateway.deployment_status().await.expect("status").is_terminal());

    assert_eq!(
        api.transport().calls(),
        vec![
            (Method::Get, "templates/".to_owned()),
            (Method::Post, "cases/".to_owned()),
            (Method::Patch, "cases/101/".to_owned()),
            (Method::Post, "cases/101/deploy/".to_owned()),
            (Method::Get, "cases/101/deployment_status/".to_owned()),
        ]
    );
}
