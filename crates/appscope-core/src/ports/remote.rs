//! 원격 함수 호출 포트.
//!
//! 구현: 호스트의 원격 호출 채널 (클라우드 함수 등)

use async_trait::async_trait;

use crate::models::rpc::{Payload, RpcEnvelope, TransportFailure};

/// 원격 함수 호출 채널
#[async_trait]
pub trait RemoteInvoker: Send + Sync {
    /// 이름으로 원격 작업 호출
    ///
    /// 전송이 완료되면 응답 봉투를, 원격에 도달하지 못하면 `TransportFailure`를 반환한다.
    async fn invoke(&self, name: &str, payload: &Payload) -> Result<RpcEnvelope, TransportFailure>;
}
