//! Generic CRUD client shared by every backend collection.
//!
//! Each collection follows the same REST layout under the API root:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/{collection}/` | List |
//! | POST   | `/{collection}/` | Create |
//! | PUT    | `/{collection}/{id}/` | Update |
//! | DELETE | `/{collection}/{id}/` | Delete |
//!
//! Collection-specific extras live in `impl ResourceClient<R>` blocks in
//! the per-resource modules.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;

/// A record type the backend exposes as a REST collection.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Primary-key type.
    type Id: Copy + Eq + fmt::Display + fmt::Debug + Send + Sync + 'static;
    /// Request body for create and update.
    type Draft: Serialize + Sync;

    /// Collection path relative to the API root, without slashes.
    const COLLECTION_PATH: &'static str;
    /// Lower-case display name of one record, e.g. `"equipment sale"`.
    const SINGULAR: &'static str;
    /// Lower-case display name of several records.
    const PLURAL: &'static str;

    fn id(&self) -> Self::Id;
}

/// Typed client for one collection.
pub struct ResourceClient<R> {
    http: reqwest::Client,
    base_url: url::Url,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("collection", &R::COLLECTION_PATH)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self {
            http,
            base_url,
            _resource: PhantomData,
        }
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Collection-relative path, e.g. `path("5/timeline")` →
    /// `/projects/5/timeline/`. An empty tail addresses the collection.
    pub(crate) fn path(&self, tail: &str) -> String {
        if tail.is_empty() {
            format!("/{}/", R::COLLECTION_PATH)
        } else {
            format!("/{}/{tail}/", R::COLLECTION_PATH)
        }
    }

    /// Absolute URL for a collection-relative path from [`Self::path`].
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// Fetch the whole collection.
    ///
    /// Calls `GET {base}/{collection}/`.
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let path = self.path("");
        let endpoint = format!("GET {path}");
        send_json(endpoint, self.http.get(self.url(&path))).await
    }

    /// Create a record and return the stored representation.
    ///
    /// Calls `POST {base}/{collection}/`.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        let path = self.path("");
        let endpoint = format!("POST {path}");
        send_json(endpoint, self.http.post(self.url(&path)).json(draft)).await
    }

    /// Replace a record and return the stored representation.
    ///
    /// Calls `PUT {base}/{collection}/{id}/`.
    pub async fn update(&self, id: R::Id, draft: &R::Draft) -> Result<R, ApiError> {
        let path = self.path(&id.to_string());
        let endpoint = format!("PUT {path}");
        send_json(endpoint, self.http.put(self.url(&path)).json(draft)).await
    }

    /// Delete a record.
    ///
    /// Calls `DELETE {base}/{collection}/{id}/`.
    pub async fn delete(&self, id: R::Id) -> Result<(), ApiError> {
        let path = self.path(&id.to_string());
        let endpoint = format!("DELETE {path}");
        send(&endpoint, self.http.delete(self.url(&path))).await?;
        Ok(())
    }
}

/// Send a request and fail on transport errors or non-2xx statuses.
pub(crate) async fn send(
    endpoint: &str,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, ApiError> {
    tracing::debug!(endpoint, "sending tracker API request");

    let resp = request.send().await.map_err(|e| ApiError::Http {
        endpoint: endpoint.to_string(),
        source: e,
    })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
            body,
        });
    }

    Ok(resp)
}

/// [`send`], then decode the JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    endpoint: String,
    request: reqwest::RequestBuilder,
) -> Result<T, ApiError> {
    let resp = send(&endpoint, request).await?;
    resp.json().await.map_err(|e| ApiError::Deserialization {
        endpoint,
        source: e,
    })
}
