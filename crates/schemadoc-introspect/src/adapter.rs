use async_trait::async_trait;

use schemadoc_core::{MetadataDocument, Result};

use crate::options::IntrospectOptions;

/// Trait implemented by database adapters that can introspect schemas.
#[async_trait]
pub trait Adapter {
    /// Returns the engine identifier (e.g. `postgres`).
    fn engine(&self) -> &'static str;

    /// Introspect the database and return an assembled metadata document.
    async fn introspect(&self, opts: &IntrospectOptions) -> Result<MetadataDocument>;
}
