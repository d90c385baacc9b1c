//! 后端 HTTP 客户端
//!
//! 只负责发请求和取回原始响应。传输失败记录日志后返回 `None`，
//! 状态码相关的处理（成功、重复、限流）交给调用方。

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::error::Result;

/// 后端返回的原始响应
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// 把响应体解析为 JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// 尽量从错误响应中取出 `message` 字段
    pub fn message(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        value.get("message")?.as_str().map(str::to_string)
    }

    /// `message` 字段，缺失时使用给定的兜底文本
    pub fn error_message(&self, fallback: impl Into<String>) -> String {
        self.message().unwrap_or_else(|| fallback.into())
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == StatusCode::TOO_MANY_REQUESTS
    }
}

/// Rapid Sort 后端客户端
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 发送 GET 请求
    pub async fn get(&self, endpoint: &str, token: Option<&str>) -> Option<ApiResponse> {
        let request = self.request(Method::GET, endpoint, token);
        self.execute(endpoint, request).await
    }

    /// 发送带 JSON 请求体的 POST 请求
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> Option<ApiResponse> {
        let request = self.request(Method::POST, endpoint, token).json(body);
        self.execute(endpoint, request).await
    }

    fn request(&self, method: Method, endpoint: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self
            .http_client
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        request
    }

    async fn execute(&self, endpoint: &str, request: RequestBuilder) -> Option<ApiResponse> {
        match Self::send(request).await {
            Ok(response) => {
                debug!("{} -> {}", endpoint, response.status);
                Some(response)
            }
            Err(e) => {
                warn!("Request failed: {}", e);
                None
            }
        }
    }

    async fn send(request: RequestBuilder) -> Result<ApiResponse> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}
