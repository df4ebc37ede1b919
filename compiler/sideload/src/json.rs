//! JSON request/response contract.
//!
//! A request names the base path, module and optional member; the response
//! is a `success` or `failure` object. Failures never escape as Rust errors:
//! every outcome is a [`Response`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::{ModuleLoader, Sideload, SideloadError};

/// Value of `command` in every request.
pub const COMMAND: &str = "sideload";

/// Value of `schema_version` in every success response.
pub const SCHEMA_VERSION: &str = "sideload.run/1.0";

pub const VALIDATION_FAILED: &str = "input payload failed validation";
pub const MODULE_RESOLUTION_FAILED: &str = "module resolution failed";
pub const ATTRIBUTE_RESOLUTION_FAILED: &str = "attribute resolution failed";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Request {
    command: String,
    parameters: Parameters,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Parameters {
    base_path: String,
    module: String,
    #[serde(default)]
    attribute: Option<String>,
    #[serde(default)]
    loader_options: Map<String, JsonValue>,
}

/// Outcome of a JSON request.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Success {
        schema_version: &'static str,
        module_file: String,
        attribute: Option<String>,
        object_kind: &'static str,
        messages: Vec<String>,
        metadata: Metadata,
    },
    Failure {
        message: String,
        #[serde(skip_serializing_if = "Map::is_empty")]
        details: Map<String, JsonValue>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Metadata {
    pub module_name: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub loader_options: Map<String, JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_type: Option<String>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn to_json(&self) -> JsonValue {
        // Serializing plain maps and strings cannot fail.
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }

    fn failure(message: &str, details: impl IntoIterator<Item = (&'static str, JsonValue)>) -> Self {
        Response::Failure {
            message: message.to_string(),
            details: details
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

/// Handle a request with the default loader.
pub fn main_json(payload: &JsonValue) -> Response {
    handle_request(&Sideload::new(), payload)
}

/// Handle a request with a caller-provided service.
#[tracing::instrument(level = "debug", skip_all)]
pub fn handle_request<L: ModuleLoader>(sideload: &Sideload<L>, payload: &JsonValue) -> Response {
    let params = match validate(payload) {
        Ok(params) => params,
        Err(failure) => return failure,
    };

    let loaded = match sideload
        .module_loader()
        .load_module(Path::new(&params.base_path), &params.module)
    {
        Ok(loaded) => loaded,
        Err(err) => {
            return Response::failure(
                MODULE_RESOLUTION_FAILED,
                [
                    ("error", JsonValue::from(err.to_string())),
                    ("base_path", JsonValue::from(params.base_path)),
                    ("module", JsonValue::from(params.module)),
                ],
            );
        }
    };

    let module_file = loaded.module_file().display().to_string();
    let mut messages = vec![format!("Loaded {}", params.module)];
    let mut metadata = Metadata {
        module_name: params.module,
        loader_options: params.loader_options,
        attribute_type: None,
    };

    let object_kind = match params.attribute.as_deref() {
        None => "module",
        Some(attribute) => match sideload.module_loader().get_attribute(loaded, Some(attribute)) {
            Ok(result) => {
                metadata.attribute_type = Some(result.type_name());
                messages.push(format!("Resolved attribute {attribute}"));
                result.object_kind()
            }
            Err(err) => return attribute_failure(&err, attribute, &module_file),
        },
    };

    Response::Success {
        schema_version: SCHEMA_VERSION,
        module_file,
        attribute: params.attribute,
        object_kind,
        messages,
        metadata,
    }
}

fn attribute_failure(err: &SideloadError, attribute: &str, module_file: &str) -> Response {
    Response::failure(
        ATTRIBUTE_RESOLUTION_FAILED,
        [
            ("error", JsonValue::from(err.to_string())),
            ("attribute", JsonValue::from(attribute)),
            ("module_file", JsonValue::from(module_file)),
        ],
    )
}

fn validate(payload: &JsonValue) -> Result<Parameters, Response> {
    let invalid = |error: String, path: &[&str]| {
        Response::failure(
            VALIDATION_FAILED,
            [
                ("error", JsonValue::from(error)),
                (
                    "path",
                    JsonValue::from(path.iter().map(|p| JsonValue::from(*p)).collect::<Vec<_>>()),
                ),
            ],
        )
    };

    let request: Request =
        Request::deserialize(payload).map_err(|e| invalid(e.to_string(), &[]))?;
    if request.command != COMMAND {
        return Err(invalid(
            format!("command must be {COMMAND:?}, got {:?}", request.command),
            &["command"],
        ));
    }
    let params = request.parameters;
    for (field, value) in [("base_path", &params.base_path), ("module", &params.module)] {
        if value.is_empty() {
            return Err(invalid(
                format!("{field} must be a non-empty string"),
                &["parameters", field],
            ));
        }
    }
    if params.attribute.as_deref() == Some("") {
        return Err(invalid(
            "attribute must be a non-empty string or null".to_string(),
            &["parameters", "attribute"],
        ));
    }
    Ok(params)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
