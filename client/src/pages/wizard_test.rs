use super::*;
use serde_json::json;

fn deployment(value: serde_json::Value) -> Deployment {
    serde_json::from_value(value).expect("deployment")
}

#[test]
fn summary_for_live_site_includes_public_url() {
    let live = deployment(json!({"status": "active", "subdomain": "janedoe"}));
    assert_eq!(deployment_summary(&live), "Live at https://janedoe.vigil.site");

    let with_url = deployment(json!({"status": "deployed", "site_url": "https://jane.example"}));
    assert_eq!(deployment_summary(&with_url), "Live at https://jane.example");
}

#[test]
fn summary_for_failure_quotes_backend_error() {
    let failed = deployment(json!({"status": "failed", "error": "DNS not verified"}));
    assert_eq!(deployment_summary(&failed), "Deployment failed: DNS not verified");
}

#[test]
fn summary_for_in_flight_states() {
    assert_eq!(deployment_summary(&deployment(json!({"status": "pending"}))), "Queued for deployment");
    assert_eq!(deployment_summary(&deployment(json!({"status": "building"}))), "Deploying...");
}

#[test]
fn target_from_input_lowercases_and_picks_one_field() {
    assert_eq!(target_from_input(false, " JaneDoe "), DeployTarget::subdomain("janedoe"));
    assert_eq!(target_from_input(true, "Example.ORG"), DeployTarget::custom_domain("example.org"));
}

#[test]
fn target_hint_is_quiet_until_something_is_typed() {
    assert_eq!(target_hint(&DeployTarget::default()), None);
    assert_eq!(target_hint(&DeployTarget::subdomain("  ")), None);
    assert_eq!(target_hint(&DeployTarget::subdomain("janedoe")), None);
    assert!(target_hint(&DeployTarget::subdomain("ab")).is_some());
    assert!(target_hint(&DeployTarget::custom_domain("not a domain")).is_some());
}

#[test]
fn status_polling_survives_transient_errors() {
    assert!(!status_error_stops_polling(&SiteError::Transport("offline".into())));
    assert!(!status_error_stops_polling(&SiteError::Network { status: 502, message: String::new() }));
    assert!(status_error_stops_polling(&SiteError::Network { status: 404, message: String::new() }));
    assert!(status_error_stops_polling(&SiteError::Auth));
}
