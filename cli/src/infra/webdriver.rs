//! WebDriver (Appium UiAutomator2) implementation of the `DeviceSession` port.
//!
//! Covers the handful of W3C commands and `mobile:` extensions the installers
//! need, nothing more.

use std::cell::Cell;
use std::path::Path;
use std::time::Duration;

use serde_json::{Value, json};

use crate::application::ports::DeviceSession;
use crate::domain::{DeviceError, ElementId, IntentLaunch, Locator};
use crate::infra::http::{HttpTransport, Method, WireResponse};

/// W3C web element reference key.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// A live Appium session.
///
/// Dropping a session that was not closed deletes it, so the endpoint sees
/// exactly one release whichever way the owner exits.
pub struct WebDriverSession<T: HttpTransport> {
    transport: T,
    base: String,
    session_id: String,
    closed: Cell<bool>,
}

impl<T: HttpTransport> WebDriverSession<T> {
    /// Create a session and set its implicit wait.
    ///
    /// # Errors
    ///
    /// Returns `DeviceError::Connection` if the endpoint is unreachable,
    /// rejects the capabilities, or rejects the timeout settings. A session
    /// created before the failure is deleted.
    pub fn open(
        transport: T,
        endpoint: &str,
        capabilities: &Value,
        implicit_wait: Duration,
    ) -> Result<Self, DeviceError> {
        let base = endpoint.trim().trim_end_matches('/').to_string();
        let connection = |reason: String| DeviceError::Connection {
            endpoint: base.clone(),
            reason,
        };

        let response = transport
            .send(Method::Post, &format!("{base}/session"), Some(capabilities))
            .map_err(|e| connection(e.0))?;
        let value = into_value(response).map_err(|e| connection(e.to_string()))?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| connection("response carries no session id".to_string()))?
            .to_string();
        tracing::debug!(%session_id, "session created");

        let session = Self {
            transport,
            base: base.clone(),
            session_id,
            closed: Cell::new(false),
        };
        let implicit_ms = u64::try_from(implicit_wait.as_millis()).unwrap_or(u64::MAX);
        session
            .command(Method::Post, "timeouts", Some(json!({ "implicit": implicit_ms })))
            .map_err(|e| connection(format!("cannot set implicit wait: {e}")))?;
        Ok(session)
    }

    /// Server-assigned session id.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, DeviceError> {
        if self.closed.get() {
            return Err(DeviceError::SessionLost("session already closed".to_string()));
        }
        let url = format!("{}/session/{}/{path}", self.base, self.session_id);
        tracing::debug!(method = method.as_str(), path, "webdriver command");
        let response = self
            .transport
            .send(method, &url, body.as_ref())
            .map_err(|e| DeviceError::SessionLost(e.0))?;
        into_value(response).map_err(WireError::into_device_error)
    }

    fn execute(&self, script: &str, args: Value) -> Result<Value, DeviceError> {
        self.command(
            Method::Post,
            "execute/sync",
            Some(json!({ "script": script, "args": [args] })),
        )
    }
}

impl<T: HttpTransport> DeviceSession for WebDriverSession<T> {
    fn launch_with_intent(&self, intent: &IntentLaunch<'_>) -> Result<(), DeviceError> {
        self.execute(
            "mobile: startActivity",
            json!({
                "component": intent.component(),
                "action": intent.action,
                "uri": intent.data_uri,
                "stop": intent.stop_app,
            }),
        )
        .map(drop)
    }

    fn find_element(&self, locator: &Locator) -> Result<ElementId, DeviceError> {
        let (using, value) = match locator {
            Locator::UiAutomator(expr) => ("-android uiautomator", expr.as_str()),
            Locator::Id(id) => ("id", id.as_str()),
        };
        let found = self
            .command(Method::Post, "element", Some(json!({ "using": using, "value": value })))
            .map_err(|e| match e {
                DeviceError::ElementNotFound { .. } => DeviceError::ElementNotFound {
                    locator: locator.to_string(),
                },
                other => other,
            })?;
        found
            .get(ELEMENT_KEY)
            .or_else(|| found.get("ELEMENT"))
            .and_then(Value::as_str)
            .map(|id| ElementId(id.to_string()))
            .ok_or_else(|| DeviceError::Automation(format!("malformed element reference: {found}")))
    }

    fn click(&self, element: &ElementId) -> Result<(), DeviceError> {
        self.command(Method::Post, &format!("element/{}/click", element.0), Some(json!({})))
            .map(drop)
    }

    fn current_activity(&self) -> Result<String, DeviceError> {
        match self.execute("mobile: getCurrentActivity", json!({}))? {
            Value::String(activity) => Ok(activity),
            other => Err(DeviceError::Automation(format!(
                "unexpected current activity: {other}"
            ))),
        }
    }

    fn is_app_installed(&self, package_name: &str) -> Result<bool, DeviceError> {
        self.execute("mobile: isAppInstalled", json!({ "appId": package_name }))?
            .as_bool()
            .ok_or_else(|| DeviceError::Automation("isAppInstalled returned a non-boolean".to_string()))
    }

    fn install_app(&self, path: &Path) -> Result<(), DeviceError> {
        self.execute(
            "mobile: installApp",
            json!({ "appPath": path.display().to_string() }),
        )
        .map(drop)
    }

    fn close(&self) -> Result<(), DeviceError> {
        if self.closed.replace(true) {
            return Ok(());
        }
        tracing::debug!(session_id = %self.session_id, "deleting session");
        let url = format!("{}/session/{}", self.base, self.session_id);
        let response = self
            .transport
            .send(Method::Delete, &url, None)
            .map_err(|e| DeviceError::SessionLost(e.0))?;
        into_value(response)
            .map(drop)
            .map_err(WireError::into_device_error)
    }
}

impl<T: HttpTransport> Drop for WebDriverSession<T> {
    fn drop(&mut self) {
        if self.closed.get() {
            return;
        }
        tracing::warn!(session_id = %self.session_id, "session dropped without close, deleting it");
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to delete session");
        }
    }
}

// ── Wire errors ───────────────────────────────────────────────────────────────

/// A W3C error payload: `{"value": {"error": ..., "message": ...}}`.
#[derive(Debug)]
struct WireError {
    status: u16,
    error: String,
    message: String,
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (HTTP {})", self.error, self.status)?;
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl WireError {
    fn into_device_error(self) -> DeviceError {
        match self.error.as_str() {
            "invalid session id" => DeviceError::SessionLost(self.to_string()),
            "no such element" => DeviceError::ElementNotFound {
                locator: self.message,
            },
            _ => DeviceError::Automation(self.to_string()),
        }
    }
}

/// Extract `value` from a response, or the W3C error it carries.
fn into_value(response: WireResponse) -> Result<Value, WireError> {
    let WireResponse { status, mut body } = response;
    let value = body.get_mut("value").map(Value::take).unwrap_or(Value::Null);
    let error = value.get("error").and_then(Value::as_str).map(str::to_string);

    if status < 400 && error.is_none() {
        return Ok(value);
    }
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| body.as_str().map(str::to_string))
        .unwrap_or_default();
    Err(WireError {
        status,
        error: error.unwrap_or_else(|| "unknown error".to_string()),
        message,
    })
}
