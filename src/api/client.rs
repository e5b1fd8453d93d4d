use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use url::Url;

use crate::chat::Chat;
use crate::message::Message;
use crate::{AsStr, integration, user};

use super::{ChatApi, Error};

/// Resource wrapper the backend puts around every payload.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    user_id: &'a user::Id,
    message: &'a str,
}

#[derive(Clone)]
pub struct HttpChatApi {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpChatApi {
    pub fn new(http: reqwest::Client, config: &integration::Config) -> Self {
        Self {
            http,
            base_url: config.api_base_url().clone(),
            token: config.api_token().map(String::from),
        }
    }
}

impl HttpChatApi {
    fn url(&self, path: &str) -> super::Result<Url> {
        let url = self.base_url.join(path)?;
        Ok(url)
    }

    fn post(&self, url: Url) -> RequestBuilder {
        let req = self.http.post(url).header("Accept", "application/json");
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> super::Result<Response> {
        let res = req.send().await.map_err(|e| {
            warn!("request failed: {e}");
            if e.is_timeout() || e.is_connect() {
                Error::Network
            } else {
                Error::from(e)
            }
        })?;

        if res.status().is_success() {
            return Ok(res);
        }

        Err(map_status(res).await)
    }

    async fn data<T: DeserializeOwned>(res: Response) -> super::Result<T> {
        let envelope = res.json::<Envelope<T>>().await?;
        Ok(envelope.data)
    }

    async fn post_chat_action(&self, chat: &Chat, action: &str) -> super::Result<()> {
        let url = self.url(&format!("api/chats/{}/{action}", chat.id.as_str()))?;
        debug!("{action} chat {}", chat.id);
        self.send(self.post(url)).await?;
        Ok(())
    }
}

async fn map_status(res: Response) -> Error {
    let status = res.status();
    let message = res
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| status.to_string());

    warn!("api responded with {status}: {message}");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Permission,
        StatusCode::NOT_FOUND => Error::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::Validation(message),
        StatusCode::REQUEST_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => Error::Network,
        _ => Error::Unexpected(message),
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, sender: &user::Id, body: &str) -> super::Result<Message> {
        let url = self.url("api/chats/messages")?;
        debug!("sending message as {sender}");

        let res = self
            .send(self.post(url).json(&SendMessage {
                user_id: sender,
                message: body,
            }))
            .await?;

        Self::data(res).await
    }

    async fn mark_read(&self, chat: &Chat) -> super::Result<()> {
        self.post_chat_action(chat, "mark-as-read").await
    }

    async fn mark_unread(&self, chat: &Chat) -> super::Result<()> {
        self.post_chat_action(chat, "mark-as-unread").await
    }

    async fn archive(&self, chat: &Chat) -> super::Result<()> {
        self.post_chat_action(chat, "archive").await
    }
}
