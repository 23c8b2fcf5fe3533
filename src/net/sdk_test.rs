use super::*;

fn config() -> AppConfig {
    AppConfig {
        project_id: "proj-1".to_owned(),
        public_key: "pk-1".to_owned(),
        auth_target: "#authentication".to_owned(),
        notice_timeout_ms: 3000,
    }
}

#[test]
fn store_methods_map_to_sdk_names() {
    assert_eq!(StoreMethod::Fetch.js_name(), "fetchRecords");
    assert_eq!(StoreMethod::GetById.js_name(), "getRecordById");
    assert_eq!(StoreMethod::Create.js_name(), "createRecord");
    assert_eq!(StoreMethod::Update.js_name(), "updateRecord");
    assert_eq!(StoreMethod::Delete.js_name(), "deleteRecord");
}

#[test]
fn client_options_use_sdk_key_names() {
    assert_eq!(
        client_options(&config()),
        serde_json::json!({"apperProjectId": "proj-1", "apperPublicKey": "pk-1"})
    );
}

#[test]
fn surface_call_login_and_signup_take_no_options() {
    assert_eq!(surface_call(&AuthSurface::Login), Some(("showLogin", None)));
    assert_eq!(surface_call(&AuthSurface::Signup), Some(("showSignup", None)));
    assert_eq!(surface_call(&AuthSurface::Callback), Some(("showSSOVerify", None)));
}

#[test]
fn surface_call_error_is_app_rendered() {
    assert!(surface_call(&AuthSurface::Error).is_none());
}

#[test]
fn surface_call_prompt_password_passes_route_params() {
    let surface = AuthSurface::PromptPassword {
        app_id: "app-9".to_owned(),
        email_address: "ada@example.com".to_owned(),
        provider: "google".to_owned(),
    };
    let (method, extra) = surface_call(&surface).unwrap();
    assert_eq!(method, "showPromptPassword");
    assert_eq!(
        extra.unwrap(),
        serde_json::json!({"appId": "app-9", "emailAddress": "ada@example.com", "provider": "google"})
    );
}

#[test]
fn surface_call_reset_password_passes_fields() {
    let surface = AuthSurface::ResetPassword { app_id: "app-9".to_owned(), fields: "email".to_owned() };
    let (method, extra) = surface_call(&surface).unwrap();
    assert_eq!(method, "showResetPassword");
    assert_eq!(extra.unwrap(), serde_json::json!({"appId": "app-9", "fields": "email"}));
}

#[cfg(not(feature = "csr"))]
#[tokio::test]
async fn native_store_is_unavailable() {
    let store = SdkRecordStore::new(config());
    let err = store
        .fetch_records("task_c", &FetchQuery::select(&["Id"]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[cfg(not(feature = "csr"))]
#[tokio::test]
async fn native_identity_logout_is_unavailable() {
    let identity = SdkIdentity::new(config());
    assert!(matches!(identity.logout().await, Err(IdentityError::Unavailable(_))));
}

// =============================================================================
// Response envelope
// =============================================================================

#[test]
fn store_promise_resolving_to_nothing_is_malformed() {
    let err = require_response(StoreMethod::Delete, None).unwrap_err();
    assert_eq!(err, StoreError::Malformed("deleteRecord resolved with no response".to_owned()));
}

#[test]
fn store_envelope_passes_through() {
    let response: StoreResponse = serde_json::from_value(serde_json::json!({"success": true, "data": []})).unwrap();
    assert_eq!(require_response(StoreMethod::Fetch, Some(response.clone())).unwrap(), response);
}
