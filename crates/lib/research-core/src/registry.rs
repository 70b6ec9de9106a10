use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::catalog::{CatalogError, OperationDescriptor};
use crate::handler::{OperationHandler, SharedHandler};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unknown operation: {0}")]
    NotFound(String),
}

/// Immutable catalog of operations paired with their handlers.
pub struct OperationRegistry {
    descriptors: Vec<OperationDescriptor>,
    handlers: Vec<SharedHandler>,
    index: HashMap<&'static str, usize>,
}

impl OperationRegistry {
    #[must_use]
    pub fn builder() -> OperationRegistryBuilder {
        OperationRegistryBuilder::default()
    }

    /// Registers every descriptor of `catalog` against the same handler.
    ///
    /// # Errors
    /// Returns [`CatalogError`] when the catalog is malformed.
    pub fn from_catalog(
        catalog: Vec<OperationDescriptor>,
        handler: SharedHandler,
    ) -> Result<Self, CatalogError> {
        catalog
            .into_iter()
            .fold(Self::builder(), |builder, descriptor| {
                builder.register_shared(descriptor, handler.clone())
            })
            .build()
    }

    /// All descriptors, in declaration order.
    #[must_use]
    pub fn list_operations(&self) -> &[OperationDescriptor] {
        &self.descriptors
    }

    /// Exact, case-sensitive lookup by operation name.
    ///
    /// # Errors
    /// Returns [`RegistryError::NotFound`] when no operation has that name.
    pub fn find_operation(&self, name: &str) -> Result<&OperationDescriptor, RegistryError> {
        self.resolve(name).map(|(descriptor, _)| descriptor)
    }

    pub(crate) fn resolve(
        &self,
        name: &str,
    ) -> Result<(&OperationDescriptor, &SharedHandler), RegistryError> {
        let position = *self
            .index
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok((&self.descriptors[position], &self.handlers[position]))
    }
}

impl fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRegistry")
            .field(
                "operations",
                &self.descriptors.iter().map(OperationDescriptor::name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Collects descriptors and handlers before the registry is sealed.
#[derive(Default)]
pub struct OperationRegistryBuilder {
    entries: Vec<(OperationDescriptor, SharedHandler)>,
}

impl OperationRegistryBuilder {
    #[must_use]
    pub fn register<H>(self, descriptor: OperationDescriptor, handler: H) -> Self
    where
        H: OperationHandler + 'static,
    {
        self.register_shared(descriptor, Arc::new(handler))
    }

    #[must_use]
    pub fn register_shared(mut self, descriptor: OperationDescriptor, handler: SharedHandler) -> Self {
        self.entries.push((descriptor, handler));
        self
    }

    /// Checks every descriptor and seals the registry.
    ///
    /// # Errors
    /// Returns [`CatalogError`] for duplicate names or malformed parameters.
    pub fn build(self) -> Result<OperationRegistry, CatalogError> {
        let mut index = HashMap::with_capacity(self.entries.len());
        let mut descriptors = Vec::with_capacity(self.entries.len());
        let mut handlers = Vec::with_capacity(self.entries.len());

        for (position, (descriptor, handler)) in self.entries.into_iter().enumerate() {
            descriptor.check()?;
            if index.insert(descriptor.name(), position).is_some() {
                return Err(CatalogError::DuplicateOperation(descriptor.name().to_string()));
            }
            descriptors.push(descriptor);
            handlers.push(handler);
        }

        Ok(OperationRegistry {
            descriptors,
            handlers,
            index,
        })
    }
}
