//! Text renderers backing the research operations.
//!
//! Every figure that appears in a rendered report is a fixed placeholder;
//! the renderers only weave the caller's arguments into pre-authored text.
//! Output is deterministic for identical arguments.

mod brief;
mod company;
mod interview;
mod linkedin;
mod plan;
mod revenue;

use std::sync::Arc;

use crate::args::OperationArgs;
use crate::catalog::{CatalogError, research_catalog};
use crate::handler::{HandlerError, HandlerFuture, OperationHandler};
use crate::registry::OperationRegistry;

/// Handler that renders the built-in report for whichever operation it is
/// handed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateHandler;

impl OperationHandler for TemplateHandler {
    fn handle(&self, args: OperationArgs) -> HandlerFuture {
        Box::pin(async move { render(&args) })
    }
}

/// Renders the report for `args`.
///
/// # Errors
/// Returns [`HandlerError`] when the text could not be assembled.
pub fn render(args: &OperationArgs) -> Result<String, HandlerError> {
    match args {
        OperationArgs::ResearchCompany(args) => company::render(args),
        OperationArgs::AnalyzeRevenueEngine(args) => revenue::render(args),
        OperationArgs::LinkedinIntelligence(args) => linkedin::render(args),
        OperationArgs::InterviewPreparation(args) => interview::render(args),
        OperationArgs::ExecutiveBrief(args) => brief::render(args),
        OperationArgs::TransitionPlan(args) => plan::render(args),
    }
}

/// Registry of the research catalog backed by [`TemplateHandler`].
///
/// # Errors
/// Returns [`CatalogError`] if the built-in catalog is malformed.
pub fn research_registry() -> Result<OperationRegistry, CatalogError> {
    OperationRegistry::from_catalog(research_catalog(), Arc::new(TemplateHandler))
}

/// Turns `snake_case` identifiers into title case labels.
fn title_case(value: &str) -> String {
    value
        .split(['_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
