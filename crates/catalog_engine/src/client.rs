use std::time::Duration;

use catalog_logging::{catalog_debug, catalog_warn};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::{
    BookDetails, FailureKind, FetchError, Mutation, MutationResponse, SearchParams,
    SearchResponse,
};

#[derive(Debug, Clone)]
pub struct Routes {
    pub search: String,
    pub items: String,
    pub readers: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            search: "search".to_string(),
            items: "items".to_string(),
            readers: "readers".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub routes: Routes,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
            routes: Routes::default(),
        }
    }
}

#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, FetchError>;

    async fn item(&self, id: &str) -> Result<BookDetails, FetchError>;

    async fn mutate(&self, mutation: &Mutation) -> Result<MutationResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestCatalogClient {
    settings: ClientSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestCatalogClient {
    pub fn new(settings: ClientSettings) -> Result<Self, FetchError> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be a base url", settings.base_url),
            ));
        }

        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// `base_url` + route segments + extra segments, each percent-encoded as a path segment.
    fn endpoint(&self, route: &str, extra: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(route.split('/').filter(|part| !part.is_empty()));
            segments.extend(extra);
        }
        url
    }

    fn search_url(&self, params: &SearchParams) -> Url {
        let mut url = self.endpoint(&self.settings.routes.search, &[]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &params.page.max(1).to_string());
            pairs.append_pair("query", &params.query);
            for (name, value) in &params.filters {
                pairs.append_pair(name, value);
            }
        }
        url
    }

    fn mutation_request(&self, mutation: &Mutation) -> Result<reqwest::RequestBuilder, FetchError> {
        let routes = &self.settings.routes;
        let (url, body) = match mutation {
            Mutation::CreateBook(body) => (self.endpoint(&routes.items, &[]), Some(body)),
            Mutation::CreateReader(body) => (self.endpoint(&routes.readers, &[]), Some(body)),
            Mutation::EditBook { id, body } => (
                self.endpoint(&routes.items, &[id.as_str(), "edit"]),
                Some(body),
            ),
            Mutation::DeleteBook { id } => (
                self.endpoint(&routes.items, &[id.as_str(), "delete"]),
                None,
            ),
        };

        let mut request = self.client.post(url).header(ACCEPT, "application/json");
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }
        Ok(request)
    }

    /// Sends the request and collects the body, enforcing `max_bytes`.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<(u16, Vec<u8>), FetchError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok((status, bytes))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        catalog_debug!("GET {}", url);
        let request = self.client.get(url).header(ACCEPT, "application/json");
        let (status, bytes) = self.execute(request).await?;
        if !(200..300).contains(&status) {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status),
                format!("unexpected status {status}"),
            ));
        }
        decode_json(&bytes)
    }
}

#[async_trait::async_trait]
impl CatalogApi for ReqwestCatalogClient {
    async fn search(&self, params: &SearchParams) -> Result<SearchResponse, FetchError> {
        self.get_json(self.search_url(params)).await
    }

    async fn item(&self, id: &str) -> Result<BookDetails, FetchError> {
        let url = self.endpoint(&self.settings.routes.items, &[id]);
        self.get_json(url).await
    }

    async fn mutate(&self, mutation: &Mutation) -> Result<MutationResponse, FetchError> {
        let request = self.mutation_request(mutation)?;
        let (status, bytes) = self.execute(request).await?;
        // Validation failures come back as 4xx with a normal reply body; show those too.
        match decode_json::<MutationResponse>(&bytes) {
            Ok(reply) => Ok(reply),
            Err(_) if !(200..300).contains(&status) => Err(FetchError::new(
                FailureKind::HttpStatus(status),
                format!("unexpected status {status}"),
            )),
            Err(err) => Err(err),
        }
    }
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(|err| {
        catalog_warn!("Undecodable response body ({} bytes): {}", bytes.len(), err);
        FetchError::new(FailureKind::MalformedBody, err.to_string())
    })
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return FetchError::new(FailureKind::InvalidUrl, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
