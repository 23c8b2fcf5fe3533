//! Bindings from the capability traits onto the browser's global SDK object.
//!
//! Client-side (csr): calls into `window.ApperSDK` through `js-sys` reflection,
//! moving payloads across the boundary with `serde-wasm-bindgen`.
//! Native builds: stubs returning `Unavailable`, since the SDK only exists in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! A missing global, a thrown exception, a rejected promise and a promise that
//! resolves to nothing all surface as typed errors; nothing here panics.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "sdk_test.rs"]
mod sdk_test;

use serde_json::Value;

use super::identity::{AuthSurface, ErrorCallback, IdentityError, IdentityProvider, IdentitySetup, SuccessCallback};
use super::store::{RecordStore, StoreError};
use super::types::{FetchQuery, StoreResponse};
use crate::config::AppConfig;

#[cfg(not(feature = "csr"))]
const NOT_IN_BROWSER: &str = "not available outside the browser";

/// Name of the SDK method for each record-store call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StoreMethod {
    Fetch,
    GetById,
    Create,
    Update,
    Delete,
}

impl StoreMethod {
    fn js_name(self) -> &'static str {
        match self {
            Self::Fetch => "fetchRecords",
            Self::GetById => "getRecordById",
            Self::Create => "createRecord",
            Self::Update => "updateRecord",
            Self::Delete => "deleteRecord",
        }
    }
}

/// Client construction options, in the SDK's key names.
fn client_options(config: &AppConfig) -> Value {
    serde_json::json!({
        "apperProjectId": config.project_id,
        "apperPublicKey": config.public_key,
    })
}

/// SDK method and options for showing a hosted surface. `None` means the
/// surface is rendered by the app alone.
fn surface_call(surface: &AuthSurface) -> Option<(&'static str, Option<Value>)> {
    match surface {
        AuthSurface::Login => Some(("showLogin", None)),
        AuthSurface::Signup => Some(("showSignup", None)),
        AuthSurface::Callback => Some(("showSSOVerify", None)),
        AuthSurface::Error => None,
        AuthSurface::PromptPassword { app_id, email_address, provider } => Some((
            "showPromptPassword",
            Some(serde_json::json!({
                "appId": app_id,
                "emailAddress": email_address,
                "provider": provider,
            })),
        )),
        AuthSurface::ResetPassword { app_id, fields } => Some((
            "showResetPassword",
            Some(serde_json::json!({ "appId": app_id, "fields": fields })),
        )),
    }
}

/// A store promise that resolved to `null`/`undefined` carries no envelope.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
fn require_response(method: StoreMethod, response: Option<StoreResponse>) -> Result<StoreResponse, StoreError> {
    response.ok_or_else(|| StoreError::Malformed(format!("{} resolved with no response", method.js_name())))
}

// =============================================================================
// RECORD STORE
// =============================================================================

/// Record store backed by the SDK's `ApperClient`.
#[derive(Clone, Debug)]
pub struct SdkRecordStore {
    config: AppConfig,
}

impl SdkRecordStore {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    async fn call(&self, method: StoreMethod, args: Vec<Value>) -> Result<StoreResponse, StoreError> {
        #[cfg(feature = "csr")]
        {
            let client = browser::new_client(&self.config).map_err(StoreError::Unavailable)?;
            let value = browser::invoke(&client, method.js_name(), &args)
                .await
                .map_err(StoreError::Request)?;
            let response = browser::from_js::<Option<StoreResponse>>(value).map_err(StoreError::Malformed)?;
            require_response(method, response)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.config, args);
            Err(StoreError::Unavailable(format!("{}: {NOT_IN_BROWSER}", method.js_name())))
        }
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|e| StoreError::Malformed(e.to_string()))
}

#[async_trait::async_trait(?Send)]
impl RecordStore for SdkRecordStore {
    async fn fetch_records(&self, kind: &str, query: &FetchQuery) -> Result<StoreResponse, StoreError> {
        self.call(StoreMethod::Fetch, vec![Value::from(kind), to_value(query)?])
            .await
    }

    async fn get_record_by_id(&self, kind: &str, id: i64, query: &FetchQuery) -> Result<StoreResponse, StoreError> {
        self.call(StoreMethod::GetById, vec![Value::from(kind), Value::from(id), to_value(query)?])
            .await
    }

    async fn create_records(&self, kind: &str, records: Vec<Value>) -> Result<StoreResponse, StoreError> {
        self.call(StoreMethod::Create, vec![Value::from(kind), serde_json::json!({ "records": records })])
            .await
    }

    async fn update_records(&self, kind: &str, records: Vec<Value>) -> Result<StoreResponse, StoreError> {
        self.call(StoreMethod::Update, vec![Value::from(kind), serde_json::json!({ "records": records })])
            .await
    }

    async fn delete_records(&self, kind: &str, ids: Vec<i64>) -> Result<StoreResponse, StoreError> {
        self.call(StoreMethod::Delete, vec![Value::from(kind), serde_json::json!({ "RecordIds": ids })])
            .await
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Identity provider backed by the SDK's `ApperUI`.
#[derive(Clone, Debug)]
pub struct SdkIdentity {
    config: AppConfig,
}

impl SdkIdentity {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait(?Send)]
impl IdentityProvider for SdkIdentity {
    fn setup(
        &self,
        options: &IdentitySetup,
        on_success: SuccessCallback,
        on_error: ErrorCallback,
    ) -> Result<(), IdentityError> {
        #[cfg(feature = "csr")]
        {
            browser::setup_identity(&self.config, options, on_success, on_error).map_err(IdentityError::Unavailable)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.config, options, on_success, on_error);
            Err(IdentityError::Unavailable(NOT_IN_BROWSER.to_owned()))
        }
    }

    fn show_surface(&self, target: &str, surface: &AuthSurface) -> Result<(), IdentityError> {
        let Some((method, extra)) = surface_call(surface) else {
            return Ok(());
        };
        #[cfg(feature = "csr")]
        {
            browser::show_surface(method, target, extra.as_ref()).map_err(IdentityError::Unavailable)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (target, method, extra);
            Err(IdentityError::Unavailable(NOT_IN_BROWSER.to_owned()))
        }
    }

    async fn logout(&self) -> Result<(), IdentityError> {
        #[cfg(feature = "csr")]
        {
            browser::logout().await.map_err(IdentityError::Logout)
        }
        #[cfg(not(feature = "csr"))]
        {
            Err(IdentityError::Unavailable(NOT_IN_BROWSER.to_owned()))
        }
    }
}

// =============================================================================
// BROWSER GLUE
// =============================================================================

#[cfg(feature = "csr")]
mod browser {
    use js_sys::{Array, Function, Promise, Reflect};
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use serde_json::Value;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::client_options;
    use crate::config::AppConfig;
    use crate::net::identity::{ErrorCallback, IdentityError, IdentitySetup, SuccessCallback};
    use crate::net::types::User;

    fn js_err(value: &JsValue) -> String {
        value
            .as_string()
            .or_else(|| {
                Reflect::get(value, &JsValue::from_str("message"))
                    .ok()
                    .and_then(|m| m.as_string())
            })
            .unwrap_or_else(|| format!("{value:?}"))
    }

    /// Plain JS objects, not `Map`s: the SDK reads options with property access.
    pub(super) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, String> {
        value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| e.to_string())
    }

    pub(super) fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, String> {
        serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string())
    }

    fn property(target: &JsValue, name: &str) -> Result<JsValue, String> {
        let value = Reflect::get(target, &JsValue::from_str(name)).map_err(|e| js_err(&e))?;
        if value.is_undefined() || value.is_null() {
            return Err(format!("{name} is not defined"));
        }
        Ok(value)
    }

    fn sdk() -> Result<JsValue, String> {
        let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
        property(&window, "ApperSDK")
    }

    fn method(target: &JsValue, name: &str) -> Result<Function, String> {
        property(target, name)?
            .dyn_into::<Function>()
            .map_err(|_| format!("{name} is not a function"))
    }

    pub(super) fn new_client(config: &AppConfig) -> Result<JsValue, String> {
        let ctor = method(&sdk()?, "ApperClient")?;
        let args = Array::of1(&to_js(&client_options(config))?);
        Reflect::construct(&ctor, &args).map_err(|e| js_err(&e))
    }

    pub(super) async fn invoke(target: &JsValue, name: &str, args: &[Value]) -> Result<JsValue, String> {
        let func = method(target, name)?;
        let js_args = Array::new();
        for arg in args {
            js_args.push(&to_js(arg)?);
        }
        let returned = func.apply(target, &js_args).map_err(|e| js_err(&e))?;
        JsFuture::from(Promise::resolve(&returned))
            .await
            .map_err(|e| js_err(&e))
    }

    pub(super) fn setup_identity(
        config: &AppConfig,
        options: &IdentitySetup,
        on_success: SuccessCallback,
        on_error: ErrorCallback,
    ) -> Result<(), String> {
        let ui = property(&sdk()?, "ApperUI")?;
        let client = new_client(config)?;
        let opts = to_js(options)?;

        let success = Closure::<dyn Fn(JsValue)>::new(move |user: JsValue| {
            let user = if user.is_null() || user.is_undefined() {
                None
            } else {
                match from_js::<User>(user) {
                    Ok(user) => Some(user),
                    Err(e) => {
                        log::error!("unreadable user record from identity sdk: {e}");
                        None
                    }
                }
            };
            on_success(user);
        });
        let error = Closure::<dyn Fn(JsValue)>::new(move |err: JsValue| {
            on_error(IdentityError::Authentication(js_err(&err)));
        });

        // Callbacks live for the whole page; hand ownership to JS.
        Reflect::set(&opts, &JsValue::from_str("onSuccess"), &success.into_js_value()).map_err(|e| js_err(&e))?;
        Reflect::set(&opts, &JsValue::from_str("onError"), &error.into_js_value()).map_err(|e| js_err(&e))?;

        method(&ui, "setup")?
            .call2(&ui, &client, &opts)
            .map_err(|e| js_err(&e))?;
        Ok(())
    }

    pub(super) fn show_surface(name: &str, target: &str, extra: Option<&Value>) -> Result<(), String> {
        let ui = property(&sdk()?, "ApperUI")?;
        let func = method(&ui, name)?;
        let target = JsValue::from_str(target);
        match extra {
            Some(extra) => func.call2(&ui, &target, &to_js(extra)?),
            None => func.call1(&ui, &target),
        }
        .map_err(|e| js_err(&e))?;
        Ok(())
    }

    pub(super) async fn logout() -> Result<(), String> {
        let ui = property(&sdk()?, "ApperUI")?;
        invoke(&ui, "logout", &[]).await.map(|_| ())
    }
}
