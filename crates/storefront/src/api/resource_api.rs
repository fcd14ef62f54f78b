use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::fmt::{Debug, Display};
use store_framework::{path_segment, ApiError, ApiRequest, Transport};

/// Trait for collection endpoints to inherit the standard by-id operations.
///
/// Implementors name their collection path and the key a single entity may be nested
/// under; `get_by_id` and `delete` come for free.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    type Entity: DeserializeOwned + Send;
    type Id: Debug + Display + Send + Sync;

    /// Collection path relative to the API base, e.g. `/products`.
    const COLLECTION: &'static str;

    /// Key a single entity may be wrapped under, e.g. `product`.
    const ENTITY_KEY: &'static str;

    fn transport(&self) -> &dyn Transport;

    /// Path of one entity, with the id escaped as a single segment.
    fn entity_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION, path_segment(&id.to_string()))
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get_by_id(&self, id: &Self::Id) -> Result<Self::Entity, ApiError> {
        tracing::debug!("Sending request");
        let body = self
            .transport()
            .send(ApiRequest::get(Self::entity_path(id)))
            .await?;
        super::decode_entity(body, Self::ENTITY_KEY)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: &Self::Id) -> Result<(), ApiError> {
        tracing::debug!("Sending request");
        self.transport()
            .send(ApiRequest::delete(Self::entity_path(id)))
            .await?;
        Ok(())
    }
}
