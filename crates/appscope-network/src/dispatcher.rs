//! 원격 호출 디스패처.
//!
//! 이름 기반 원격 함수를 한 번 호출하고, 결과를 항상 [`RpcResult`] 값으로 돌려준다.
//! 호출 중에는 로딩 표시기를 유지하고, 종료 시 소요 시간을 호출 시계열에 기록한다.

use appscope_core::config::AppConfig;
use appscope_core::models::rpc::{Payload, RpcEnvelope, RpcResult, TransportFailure};
use appscope_core::ports::host::{HostUi, ToastKind};
use appscope_core::ports::remote::RemoteInvoker;
use appscope_telemetry::SharedTelemetryState;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error_mapping::{classify_application_failure, classify_transport_failure};
use crate::loading::LoadingIndicator;

/// 원격 호출 디스패처
///
/// 로딩 표시기는 호스트 UI당 하나를 만들어 모든 디스패처가 공유해야 한다.
pub struct RemoteDispatcher {
    invoker: Arc<dyn RemoteInvoker>,
    ui: Arc<dyn HostUi>,
    loading: Arc<LoadingIndicator>,
    state: SharedTelemetryState,
    toast_on_failure: bool,
}

impl RemoteDispatcher {
    /// 공유 로딩 표시기 위에 디스패처 생성. 토스트는 표시기와 같은 호스트 UI로 나간다.
    pub fn new(
        invoker: Arc<dyn RemoteInvoker>,
        loading: Arc<LoadingIndicator>,
        state: SharedTelemetryState,
        config: &AppConfig,
    ) -> Self {
        Self {
            invoker,
            ui: loading.ui(),
            loading,
            state,
            toast_on_failure: config.notification.toast_on_failure,
        }
    }

    /// 공유 로딩 표시기
    pub fn loading(&self) -> Arc<LoadingIndicator> {
        self.loading.clone()
    }

    /// 원격 함수 호출
    ///
    /// 재시도하지 않는다. 실패도 `Err`가 아니라 `RpcResult::Failure`로 돌아온다.
    pub async fn call_remote(&self, name: &str, payload: &Payload) -> RpcResult {
        let guard = self.loading.acquire();
        let started = Instant::now();

        let result = normalize(self.invoker.invoke(name, payload).await);

        let elapsed = started.elapsed();
        self.state.record_call(name, elapsed, result.is_success());
        drop(guard);

        match &result {
            RpcResult::Success { .. } => {
                debug!("원격 호출 성공: {name} ({}ms)", elapsed.as_millis());
            }
            RpcResult::Failure { kind, message } => {
                warn!("원격 호출 실패: {name} kind={kind:?} message={message}");
                if self.toast_on_failure {
                    self.ui.show_toast(ToastKind::Error, message);
                }
            }
        }

        result
    }
}

/// 호출 결과를 정규화된 결과로 변환
fn normalize(outcome: Result<RpcEnvelope, TransportFailure>) -> RpcResult {
    match outcome {
        Ok(envelope) if envelope.succeeded => RpcResult::Success {
            data: envelope.data.unwrap_or_default(),
        },
        Ok(envelope) => {
            let classified = classify_application_failure(
                envelope.error_code,
                envelope.error_message.as_deref().unwrap_or_default(),
            );
            RpcResult::Failure {
                kind: classified.kind,
                message: classified.message,
            }
        }
        Err(failure) => {
            debug!("전송 실패 진단: {failure}");
            let kind = classify_transport_failure(&failure);
            RpcResult::Failure {
                kind,
                message: kind.user_message().to_string(),
            }
        }
    }
}
