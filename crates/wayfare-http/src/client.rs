//! HTTP client that signs requests with a session's authenticator.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use wayfare_core::{Error, Result, Session};

use crate::error::{protocol_error, transport};

/// Authenticated JSON client for the API a session is configured for.
///
/// Every request asks the session's authenticator for headers. When the API
/// answers `401 Unauthorized` and the authenticator can refresh, the client
/// refreshes once and resends the request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    session: Session,
}

impl ApiClient {
    /// Create a client for `session`.
    pub fn new(session: Session) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wayfare/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        Ok(Self::with_http_client(session, client))
    }

    /// Create a client that sends requests through an existing `reqwest::Client`.
    pub fn with_http_client(session: Session, client: reqwest::Client) -> Self {
        Self { client, session }
    }

    /// Returns the session this client signs requests with.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        self.session.configuration().api_url().endpoint(path)
    }

    /// GET a JSON resource.
    #[instrument(skip(self), fields(mode = %self.session.mode()))]
    pub async fn get<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "GET");

        let response = self.execute(|client| client.get(&url)).await?;
        handle_response(response).await
    }

    /// GET a JSON resource with query parameters.
    #[instrument(skip(self), fields(mode = %self.session.mode()))]
    pub async fn get_with_query<Q, R>(&self, path: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + std::fmt::Debug + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "GET");
        trace!(?query, "query parameters");

        let response = self.execute(|client| client.get(&url).query(query)).await?;
        handle_response(response).await
    }

    /// POST a JSON body.
    #[instrument(skip(self, body), fields(mode = %self.session.mode()))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");

        let response = self.execute(|client| client.post(&url).json(body)).await?;
        handle_response(response).await
    }

    /// PUT a JSON body.
    #[instrument(skip(self, body), fields(mode = %self.session.mode()))]
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "PUT");

        let response = self.execute(|client| client.put(&url).json(body)).await?;
        handle_response(response).await
    }

    /// DELETE a resource, ignoring any response body.
    #[instrument(skip(self), fields(mode = %self.session.mode()))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!(%url, "DELETE");

        let response = self.execute(|client| client.delete(&url)).await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Protocol(protocol_error(response).await))
        }
    }

    /// Send a request with an arbitrary method and optional JSON body.
    ///
    /// Returns `None` when the response has no content.
    #[instrument(skip(self, body), fields(mode = %self.session.mode()))]
    pub async fn send_json(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<serde_json::Value>> {
        let url = self.url(path);
        debug!(%method, %url, "Request");

        let response = self
            .execute(|client| {
                let request = client.request(method.clone(), &url);
                match body {
                    Some(body) => request.json(body),
                    None => request,
                }
            })
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Protocol(protocol_error(response).await));
        }

        let bytes = response.bytes().await.map_err(transport)?;
        if status == StatusCode::NO_CONTENT || bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            Error::Transport(wayfare_core::error::TransportError::Decode {
                message: e.to_string(),
            })
        })
    }

    /// Sign and send a request, refreshing once on `401`.
    async fn execute<F>(&self, build: F) -> Result<Response>
    where
        F: Fn(&reqwest::Client) -> RequestBuilder,
    {
        let authenticator = self.session.authenticator();
        let mut refreshed = false;

        loop {
            let headers = authenticator.authenticate().await?;

            let mut request = build(&self.client);
            for (name, value) in headers.iter() {
                request = request.header(name, value);
            }

            let response = request.send().await.map_err(transport)?;
            trace!(status = %response.status(), "Response");

            if response.status() == StatusCode::UNAUTHORIZED
                && !refreshed
                && authenticator.can_refresh()
            {
                debug!("Request unauthorized, refreshing credential");
                authenticator.refresh().await?;
                refreshed = true;
                continue;
            }

            return Ok(response);
        }
    }
}

/// Decode a success body or turn the response into a protocol error.
async fn handle_response<R: DeserializeOwned>(response: Response) -> Result<R> {
    let status = response.status();

    if status.is_success() {
        response.json::<R>().await.map_err(transport)
    } else {
        Err(Error::Protocol(protocol_error(response).await))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use wayfare_core::{ApiUrl, CredentialsSession, SessionConfiguration, StaticCredential};

    #[test]
    fn url_joins_api_base_and_path() {
        let config = SessionConfiguration::new(
            "client",
            ApiUrl::new("https://api.example.com/v1.2").unwrap(),
        )
        .unwrap();
        let session =
            CredentialsSession::new(Arc::new(config), Arc::new(StaticCredential::new("tok")));
        let client = ApiClient::new(session.into()).unwrap();

        assert_eq!(client.url("/me"), "https://api.example.com/v1.2/me");
    }
}
