//! Core types and services for research-mcp.
//!
//! This crate owns the operation catalog and its parameter schemas, the
//! schema-driven argument validator, the dispatcher that routes calls to
//! handlers, and the template renderers used as the production handlers.

pub mod args;
pub mod catalog;
pub mod dispatch;
pub mod handler;
pub mod registry;
pub mod templates;
pub mod validate;

pub use args::{OperationArgs, OperationKind};
pub use catalog::{CatalogError, OperationDescriptor, ParameterKind, ParameterSpec};
pub use dispatch::{CallRequest, CallResult, DispatchError, Dispatcher, ErrorKind};
pub use handler::{HandlerError, HandlerFuture, OperationHandler, SharedHandler};
pub use registry::{OperationRegistry, OperationRegistryBuilder, RegistryError};
pub use validate::{ArgumentError, ArgumentValue, ValidatedArguments};
