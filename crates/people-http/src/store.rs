//! REST-backed document store.

use async_stream::try_stream;
use async_trait::async_trait;
use reqwest::{Method, Url};
use tracing::{debug, instrument};

use people_core::error::Error;
use people_core::traits::{DocumentStore, DocumentStream};
use people_core::types::{NationalId, ServiceUrl};
use people_core::{Document, Result, StoreCredentials};

use crate::client::HttpClient;
use crate::wire::{
    DocumentResource, ListDocumentsQuery, ListDocumentsResponse, WriteDocumentRequest,
};

/// Documents fetched per page by [`DocumentStore::stream_all`].
const DEFAULT_PAGE_SIZE: u32 = 100;

/// A document store reached over its REST API.
///
/// Documents of one collection live at
/// `{base}/v1/projects/{project}/collections/{collection}/documents/{id}`.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    client: HttpClient,
    project: String,
    collection: String,
    page_size: u32,
}

impl HttpDocumentStore {
    /// Create a store for `collection`, authenticating with `credentials`.
    pub fn new(
        base: ServiceUrl,
        credentials: &StoreCredentials,
        collection: impl Into<String>,
    ) -> Result<Self> {
        let client = HttpClient::new(base, Some(credentials.access_token()))?;
        Ok(Self {
            client,
            project: credentials.project_id().to_string(),
            collection: collection.into(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Set how many documents are requested per page when streaming.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    fn documents_url(&self) -> Result<Url> {
        self.client.url([
            "v1",
            "projects",
            self.project.as_str(),
            "collections",
            self.collection.as_str(),
            "documents",
        ])
    }

    fn document_url(&self, id: &NationalId) -> Result<Url> {
        self.client.url([
            "v1",
            "projects",
            self.project.as_str(),
            "collections",
            self.collection.as_str(),
            "documents",
            id.as_str(),
        ])
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    fn collection(&self) -> &str {
        &self.collection
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn get(&self, id: &NationalId) -> Result<Option<Document>> {
        let url = self.document_url(id)?;
        match self.client.get::<_, DocumentResource>(url, &()).await {
            Ok(resource) => Ok(Some(Document::from_fields(resource.fields))),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, document), fields(collection = %self.collection))]
    async fn set(&self, id: &NationalId, document: &Document) -> Result<()> {
        let url = self.document_url(id)?;
        let request = WriteDocumentRequest {
            fields: document.fields(),
        };
        self.client.send_json(Method::PUT, url, &request).await?;

        debug!(%id, "Wrote document");
        Ok(())
    }

    #[instrument(skip(self, partial), fields(collection = %self.collection))]
    async fn update(&self, id: &NationalId, partial: &Document) -> Result<()> {
        let url = self.document_url(id)?;
        let request = WriteDocumentRequest {
            fields: partial.fields(),
        };
        match self.client.send_json(Method::PATCH, url, &request).await {
            Ok(()) => {
                debug!(%id, "Updated document");
                Ok(())
            }
            Err(err) if err.is_not_found() => Err(Error::NotFound { id: id.to_string() }),
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn delete(&self, id: &NationalId) -> Result<()> {
        let url = self.document_url(id)?;
        match self.client.delete(url).await {
            Ok(()) => {
                debug!(%id, "Deleted document");
                Ok(())
            }
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }

    fn stream_all(&self) -> DocumentStream<'_> {
        Box::pin(try_stream! {
            let mut page_token: Option<String> = None;

            loop {
                let query = ListDocumentsQuery {
                    page_size: self.page_size,
                    page_token: page_token.as_deref(),
                };
                let page: ListDocumentsResponse =
                    self.client.get(self.documents_url()?, &query).await?;
                debug!(count = page.documents.len(), "Fetched document page");

                for resource in page.documents {
                    yield Document::from_fields(resource.fields);
                }

                match page.next_page_token {
                    Some(token) if !token.is_empty() => page_token = Some(token),
                    _ => break,
                }
            }
        })
    }
}
