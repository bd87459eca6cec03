//! HTTP 어댑터.
//!
//! `RequestTransport` / `RemoteInvoker` 포트의 reqwest 구현.
//! 재시도는 하지 않는다. 실패는 한 번에 호출부로 전달된다.

use appscope_core::error::CoreError;
use appscope_core::models::rpc::{FailureReason, Payload, RpcEnvelope, TransportFailure};
use appscope_core::ports::remote::RemoteInvoker;
use appscope_core::ports::transport::{OutboundRequest, OutboundResponse, RequestTransport};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

fn build_client(timeout: Duration) -> Result<reqwest::Client, CoreError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))
}

/// reqwest 에러를 구조화된 전송 실패로 변환
fn map_reqwest_error(e: reqwest::Error) -> TransportFailure {
    if e.is_timeout() {
        TransportFailure::with_reason(FailureReason::Timeout, format!("request:fail timeout: {e}"))
    } else {
        TransportFailure::with_reason(FailureReason::Failed, format!("request:fail {e}"))
    }
}

/// reqwest 기반 요청 전송기: `RequestTransport` 포트 구현
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// 요청 타임아웃을 지정해 생성
    pub fn new(timeout: Duration) -> Result<Self, CoreError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl RequestTransport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, TransportFailure> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes()).map_err(|e| {
            TransportFailure::with_reason(
                FailureReason::Failed,
                format!("request:fail 잘못된 메서드 {}: {e}", request.method),
            )
        })?;

        let mut builder = self.client.request(method, &request.url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(map_reqwest_error)?;

        debug!("{} {} → {status}", request.method, request.url);
        Ok(OutboundResponse { status, body })
    }
}

/// HTTP 원격 함수 호출기: `RemoteInvoker` 포트 구현
///
/// `POST {base_url}/{name}` 에 페이로드를 JSON으로 보내고 응답 본문을 봉투로 해석한다.
/// 함수 이름은 경로 세그먼트 하나로 인코딩된다.
pub struct HttpRemoteInvoker {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpRemoteInvoker {
    /// 원격 함수 엔드포인트 기준 URL로 생성
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CoreError> {
        let parsed = reqwest::Url::parse(base_url)
            .map_err(|e| CoreError::Network(format!("잘못된 기준 URL {base_url}: {e}")))?;
        if parsed.cannot_be_a_base() {
            return Err(CoreError::Network(format!(
                "경로를 붙일 수 없는 기준 URL: {base_url}"
            )));
        }
        Ok(Self {
            client: build_client(timeout)?,
            base_url: parsed,
        })
    }

    /// 기준 URL 뒤에 함수 이름 세그먼트를 붙인 엔드포인트
    fn endpoint(&self, name: &str) -> Result<reqwest::Url, TransportFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                TransportFailure::with_reason(
                    FailureReason::Failed,
                    format!("request:fail 경로를 붙일 수 없는 URL: {}", self.base_url),
                )
            })?
            .pop_if_empty()
            .push(name);
        Ok(url)
    }
}

#[async_trait]
impl RemoteInvoker for HttpRemoteInvoker {
    async fn invoke(&self, name: &str, payload: &Payload) -> Result<RpcEnvelope, TransportFailure> {
        let url = self.endpoint(name)?;
        debug!("원격 호출 POST {url}");
        let resp = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let text = resp.text().await.map_err(map_reqwest_error)?;
        serde_json::from_str(&text).map_err(|e| {
            TransportFailure::with_reason(
                FailureReason::Failed,
                format!("request:fail 응답 봉투 파싱 실패: {e}"),
            )
        })
    }
}
