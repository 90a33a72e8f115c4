use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use super::{
    API_KEY_HEADER, ApiError, ChatRequest, ChatResponse, ConversationDetail, ConversationPage,
    DebateApi,
};
use crate::config::ApiConfig;

/// Debate replies can take a while; generous timeout, no retries.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Decide which credential, if any, goes on an outgoing request. Local and
/// unrestricted deployments never receive the header, even when a key is
/// stored.
pub fn api_key_header(config: &ApiConfig, credential: Option<&str>) -> Option<String> {
    if config.is_unrestricted() {
        return None;
    }
    credential.map(str::to_string)
}

/// reqwest-backed [`DebateApi`] implementation.
pub struct HttpDebateApi {
    client: Client,
    config: ApiConfig,
    api_key: Option<String>,
}

impl HttpDebateApi {
    pub fn new(config: ApiConfig, api_key: Option<String>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config, api_key })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn attach_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match api_key_header(&self.config, self.api_key.as_deref()) {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }
}

/// Map non-2xx statuses to [`ApiError::Status`], capturing the body text for
/// the error banner.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status: status.as_u16(), body })
}

#[async_trait]
impl DebateApi for HttpDebateApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let response = self
            .attach_auth(self.client.post(self.config.chat_url()).json(request))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn get_conversation(&self, id: &str) -> Result<ConversationDetail, ApiError> {
        let response =
            self.attach_auth(self.client.get(self.config.conversation_url(id))).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn list_conversations(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<ConversationPage, ApiError> {
        let response = self
            .attach_auth(self.client.get(self.config.conversations_url(limit, offset)))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn check_health(&self) -> Result<(), ApiError> {
        let response = self.attach_auth(self.client.get(self.config.health_url())).send().await?;
        check_status(response).await?;
        Ok(())
    }
}
