use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

use crate::args::OperationArgs;

pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<String, HandlerError>> + Send + 'static>>;
pub type SharedHandler = Arc<dyn OperationHandler>;

/// Failure reported by an operation handler or one of its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<fmt::Error> for HandlerError {
    fn from(_: fmt::Error) -> Self {
        Self::new("failed to render response text")
    }
}

/// The unit of work behind an operation.
///
/// Closures of the shape `Fn(OperationArgs) -> HandlerFuture` implement this
/// trait, which is how tests substitute fake handlers.
pub trait OperationHandler: Send + Sync {
    fn handle(&self, args: OperationArgs) -> HandlerFuture;
}

impl<F> OperationHandler for F
where
    F: Fn(OperationArgs) -> HandlerFuture + Send + Sync,
{
    fn handle(&self, args: OperationArgs) -> HandlerFuture {
        self(args)
    }
}
