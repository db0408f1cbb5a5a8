use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};

use region_matrix_core::log_items::{has_required_fields, loggable_items};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Destination for accepted log items, one serialized item per call.
pub trait ItemLogger {
    fn log_item(&self, line: &str);
}

/// Writes each item as a bare line, bypassing the tracing subscriber so the
/// line is exactly the item's JSON.
#[derive(Debug)]
pub struct LineItemLogger<W> {
    out: Mutex<W>,
}

impl LineItemLogger<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> LineItemLogger<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write> ItemLogger for LineItemLogger<W> {
    fn log_item(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(failure) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            error!(error = %failure, "failed to write log item");
        }
    }
}

/// Logs the items carried in a Function URL event body and always reports
/// success. Body problems are logged and otherwise ignored.
pub fn handle_log_event(event: &Value, logger: &dyn ItemLogger) -> ApiGatewayResponse {
    match items_from_event(event) {
        Ok(items) => {
            for item in &items {
                logger.log_item(&item.to_string());
            }
            debug!(logged = items.len(), "handled log event");
        }
        Err(message) => error!(error = %message, "error parsing event body"),
    }

    success_response()
}

fn items_from_event(event: &Value) -> Result<Vec<Value>, String> {
    match event.get("body") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(text)) if text.is_empty() => Ok(Vec::new()),
        Some(Value::String(text)) => {
            loggable_items(text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        Some(Value::Array(items)) => match items.first() {
            Some(first) if has_required_fields(first) => Ok(items.clone()),
            _ => Ok(Vec::new()),
        },
        Some(_) => Err("Request body must be a JSON string".to_string()),
    }
}

fn success_response() -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 200,
        headers: json!({"Content-Type": "application/json"}),
        body: json!({"status": "success"}).to_string(),
    }
}
