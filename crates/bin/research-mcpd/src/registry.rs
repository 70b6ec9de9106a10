use std::sync::Arc;

use research_core::templates::research_registry;
use research_core::{CatalogError, OperationRegistry};
use tracing::debug;

/// Builds the shared registry served by every transport.
pub fn build_registry() -> Result<Arc<OperationRegistry>, CatalogError> {
    let registry = research_registry()?;
    for descriptor in registry.list_operations() {
        debug!(
            operation = descriptor.name(),
            parameters = descriptor.parameters().len(),
            "registered operation"
        );
    }
    Ok(Arc::new(registry))
}
