//! 외부 요청 전송 포트.
//!
//! 구현: `appscope-network` crate (reqwest) 또는 호스트 플랫폼의 요청 API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::rpc::TransportFailure;

/// 외부로 나가는 요청
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRequest {
    /// HTTP 메서드 (예: "GET", "POST")
    pub method: String,
    /// 대상 URL (계측 키로 사용)
    pub url: String,
    /// JSON 본문
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl OutboundRequest {
    /// GET 요청 생성
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
            body: None,
        }
    }

    /// JSON 본문이 있는 POST 요청 생성
    pub fn post_json(url: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: "POST".to_string(),
            url: url.into(),
            body: Some(body),
        }
    }
}

/// 전송 완료 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundResponse {
    /// 상태 코드
    pub status: u16,
    /// 응답 본문 (원문)
    pub body: String,
}

/// 외부 요청 전송기
#[async_trait]
pub trait RequestTransport: Send + Sync {
    /// 요청 전송
    ///
    /// 응답을 받으면 상태 코드와 무관하게 `Ok`, 전송 자체가 실패하면 `Err`.
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, TransportFailure>;
}
