//! # HTTP Client
//!
//! [`BooksApi`] over JSON/HTTP with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use batoi_core::{Book, BookDraft, BookId, Module};

use crate::error::{ClientError, ClientResult};
use crate::BooksApi;

/// HTTP implementation of [`BooksApi`].
#[derive(Debug, Clone)]
pub struct HttpBooksApi {
    client: Client,
    base_url: Url,
}

impl HttpBooksApi {
    /// Creates a client rooted at `base_url`.
    ///
    /// The base may carry a path prefix (`http://host/api`); endpoints are
    /// appended below it, with or without a trailing slash.
    pub fn new(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        info!(base_url = %base_url, "Books API client ready");
        Ok(HttpBooksApi { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Checks the status and decodes the JSON body.
async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let response = ensure_success(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl BooksApi for HttpBooksApi {
    async fn fetch_books(&self) -> ClientResult<Vec<Book>> {
        let url = self.endpoint(&["books"])?;
        debug!(%url, "GET books");

        let books: Vec<Book> = read_json(self.client.get(url).send().await?).await?;

        debug!(count = books.len(), "Fetched books");
        Ok(books)
    }

    async fn create_book(&self, draft: &BookDraft) -> ClientResult<Book> {
        let url = self.endpoint(&["books"])?;
        debug!(%url, "POST book");

        read_json(self.client.post(url).json(draft).send().await?).await
    }

    async fn update_book(&self, id: &BookId, draft: &BookDraft) -> ClientResult<Book> {
        let url = self.endpoint(&["books", id.as_str()])?;
        debug!(%url, "PATCH book");

        let mut body =
            serde_json::to_value(draft).map_err(|e| ClientError::Decode(e.to_string()))?;
        if let Value::Object(fields) = &mut body {
            fields.insert("id".to_string(), Value::from(id.as_str()));
        }

        read_json(self.client.patch(url).json(&body).send().await?).await
    }

    async fn delete_book(&self, id: &BookId) -> ClientResult<()> {
        let url = self.endpoint(&["books", id.as_str()])?;
        debug!(%url, "DELETE book");

        ensure_success(self.client.delete(url).send().await?).await?;
        Ok(())
    }

    async fn fetch_modules(&self) -> ClientResult<Vec<Module>> {
        let url = self.endpoint(&["modules"])?;
        debug!(%url, "GET modules");

        read_json(self.client.get(url).send().await?).await
    }
}
