//! Document store trait.

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::types::NationalId;
use crate::{Document, Result};

/// A stream over every document in a collection.
pub type DocumentStream<'a> = Pin<Box<dyn Stream<Item = Result<Document>> + Send + 'a>>;

/// A key-value-by-id view over one collection of a document store.
///
/// Implementations are trusted and used without retries. No call here is
/// transactional with any other: a `get` followed by a `set` may race with
/// concurrent writers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns the name of the collection this store addresses.
    fn collection(&self) -> &str;

    /// Fetch a document by id, or `None` if absent.
    async fn get(&self, id: &NationalId) -> Result<Option<Document>>;

    /// Write a document under `id`, replacing anything already there.
    async fn set(&self, id: &NationalId, document: &Document) -> Result<()>;

    /// Overwrite the fields of an existing document with those of `partial`.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) if `id` is absent.
    async fn update(&self, id: &NationalId, partial: &Document) -> Result<()>;

    /// Delete the document under `id`. Deleting an absent id is not an error.
    async fn delete(&self, id: &NationalId) -> Result<()>;

    /// Stream every document in the collection, in store order.
    fn stream_all(&self) -> DocumentStream<'_>;
}
