//! Routes calls to handlers and normalizes every outcome into a [`CallResult`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::args::OperationArgs;
use crate::registry::{OperationRegistry, RegistryError};
use crate::validate::{ArgumentError, validate_arguments};

/// One incoming invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRequest {
    pub operation_name: String,
    /// Argument object; `null` is read as an empty object.
    #[serde(default)]
    pub arguments: Value,
}

impl CallRequest {
    pub fn new(operation_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            operation_name: operation_name.into(),
            arguments,
        }
    }
}

/// Failure category, stable enough for callers to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownOperation,
    InvalidParams,
    HandlerExecution,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownOperation => "unknown_operation",
            Self::InvalidParams => "invalid_params",
            Self::HandlerExecution => "handler_execution",
        }
    }

    /// JSON-RPC error code of the matching class.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::UnknownOperation => -32601,
            Self::InvalidParams => -32602,
            Self::HandlerExecution => -32603,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {name}")]
    UnknownOperation { name: String },
    #[error("Missing required argument: {field}")]
    MissingRequiredArgument { field: String },
    #[error("Invalid argument '{field}': expected {expected}")]
    InvalidArgument { field: String, expected: String },
    #[error("Error executing {operation}{}: {message}", subject_suffix(.subject.as_deref()))]
    HandlerExecution {
        operation: String,
        subject: Option<String>,
        message: String,
    },
}

fn subject_suffix(subject: Option<&str>) -> String {
    subject.map(|subject| format!(" for {subject}")).unwrap_or_default()
}

impl DispatchError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            Self::MissingRequiredArgument { .. } | Self::InvalidArgument { .. } => {
                ErrorKind::InvalidParams
            }
            Self::HandlerExecution { .. } => ErrorKind::HandlerExecution,
        }
    }
}

impl From<RegistryError> for DispatchError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::NotFound(name) => Self::UnknownOperation { name },
        }
    }
}

impl From<ArgumentError> for DispatchError {
    fn from(err: ArgumentError) -> Self {
        match err {
            ArgumentError::Missing { field } => Self::MissingRequiredArgument { field },
            ArgumentError::Invalid { field, expected } => Self::InvalidArgument { field, expected },
        }
    }
}

/// Uniform success-or-error envelope returned for every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallResult {
    pub payload: String,
    pub is_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl CallResult {
    pub fn success(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            is_error: false,
            error_kind: None,
        }
    }

    #[must_use]
    pub fn failure(err: &DispatchError) -> Self {
        Self {
            payload: err.to_string(),
            is_error: true,
            error_kind: Some(err.kind()),
        }
    }
}

impl From<Result<String, DispatchError>> for CallResult {
    fn from(outcome: Result<String, DispatchError>) -> Self {
        match outcome {
            Ok(payload) => Self::success(payload),
            Err(err) => Self::failure(&err),
        }
    }
}

/// Single entry point tying lookup, validation and handler invocation
/// together. Holds no state besides the shared, read-only registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<OperationRegistry>,
}

impl Dispatcher {
    #[must_use]
    pub const fn new(registry: Arc<OperationRegistry>) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Dispatches `request`, folding every failure into the result.
    pub async fn dispatch(&self, request: CallRequest) -> CallResult {
        let operation = request.operation_name.clone();
        let outcome = self.try_dispatch(request).await;
        match &outcome {
            Ok(payload) => debug!(operation = %operation, bytes = payload.len(), "operation completed"),
            Err(err) => warn!(operation = %operation, kind = err.kind().as_str(), error = %err, "operation failed"),
        }
        CallResult::from(outcome)
    }

    /// Dispatches `request`, keeping the tagged error.
    ///
    /// # Errors
    /// Returns [`DispatchError`] for unknown operations, invalid arguments or
    /// handler failures, including handler panics.
    pub async fn try_dispatch(&self, request: CallRequest) -> Result<String, DispatchError> {
        let CallRequest {
            operation_name,
            arguments,
        } = request;
        let (descriptor, handler) = self.registry.resolve(&operation_name)?;

        let raw = match arguments {
            Value::Null => Map::new(),
            Value::Object(map) => map,
            _ => {
                return Err(DispatchError::InvalidArgument {
                    field: "arguments".to_string(),
                    expected: "object".to_string(),
                });
            }
        };
        let validated = validate_arguments(descriptor.parameters(), &raw)?;
        let args = OperationArgs::from_validated(descriptor.kind(), &validated)?;
        let subject = Some(args.subject().trim())
            .filter(|subject| !subject.is_empty())
            .map(str::to_string);

        debug!(operation = descriptor.name(), subject = ?subject, "invoking handler");
        let outcome = AssertUnwindSafe(async move { handler.handle(args).await })
            .catch_unwind()
            .await;

        let message = match outcome {
            Ok(Ok(payload)) => return Ok(payload),
            Ok(Err(err)) => err.to_string(),
            Err(panic) => panic_message(panic.as_ref()),
        };
        Err(DispatchError::HandlerExecution {
            operation: descriptor.name().to_string(),
            subject,
            message,
        })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|message| (*message).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .map_or_else(
            || "handler panicked".to_string(),
            |message| format!("handler panicked: {message}"),
        )
}
