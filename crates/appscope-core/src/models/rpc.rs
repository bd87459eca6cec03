//! 원격 호출 모델.
//!
//! 원격 함수 응답 봉투, 정규화된 호출 결과, 실패 분류 체계를 정의.

use serde::{Deserialize, Serialize};

/// 원격 호출 페이로드/응답 데이터 (문자열 키 매핑)
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// 원격 측 응답 봉투.
///
/// 전송은 성공했지만 `succeeded`가 false(또는 누락)이면 애플리케이션 레벨 거부로 취급한다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcEnvelope {
    /// 원격 작업 성공 여부
    #[serde(default)]
    pub succeeded: bool,
    /// 응답 데이터
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Payload>,
    /// 애플리케이션 에러 코드
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    /// 애플리케이션 에러 메시지
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RpcEnvelope {
    /// 성공 봉투 생성
    pub fn success(data: Payload) -> Self {
        Self {
            succeeded: true,
            data: Some(data),
            ..Self::default()
        }
    }

    /// 실패 봉투 생성
    pub fn failure(error_code: i64, error_message: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            data: None,
            error_code: Some(error_code),
            error_message: Some(error_message.into()),
        }
    }
}

/// 전송 계층이 제공하는 구조화된 실패 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// 시간 초과
    Timeout,
    /// 취소됨
    Aborted,
    /// 연결/요청 실패
    Failed,
}

/// 전송 계층 실패 (원격에 도달하지 못함)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportFailure {
    /// 구조화된 사유 (전송 계층이 알 수 있는 경우)
    #[serde(default)]
    pub reason: Option<FailureReason>,
    /// 진단 메시지 (자유 텍스트)
    pub message: String,
}

impl TransportFailure {
    /// 진단 메시지만 있는 실패
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            reason: None,
            message: message.into(),
        }
    }

    /// 구조화된 사유가 있는 실패
    pub fn with_reason(reason: FailureReason, message: impl Into<String>) -> Self {
        Self {
            reason: Some(reason),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            Some(reason) => write!(f, "{} ({reason:?})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// 분류된 실패 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    Aborted,
    TransportFailure,
    SystemError,
    PermissionDenied,
    ServerBusy,
    Unknown,
}

impl ErrorKind {
    /// 종류별 고정 사용자 메시지
    pub fn user_message(self) -> &'static str {
        match self {
            ErrorKind::Timeout => "네트워크 연결 시간이 초과되었습니다. 다시 시도해 주세요",
            ErrorKind::Aborted => "요청이 취소되었습니다",
            ErrorKind::TransportFailure => "네트워크 오류입니다. 네트워크 연결을 확인해 주세요",
            ErrorKind::SystemError => "시스템 오류입니다. 잠시 후 다시 시도해 주세요",
            ErrorKind::PermissionDenied => "권한이 부족합니다. 다시 로그인해 주세요",
            ErrorKind::ServerBusy => "서버가 혼잡합니다. 잠시 후 다시 시도해 주세요",
            ErrorKind::Unknown => "네트워크 연결에 실패했습니다. 네트워크 설정을 확인해 주세요",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

/// 원격 호출의 최종 결과 (호출당 정확히 한 번 반환)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RpcResult {
    /// 성공: 봉투 내부 데이터
    Success { data: Payload },
    /// 실패: 분류된 종류와 사용자 메시지
    Failure { kind: ErrorKind, message: String },
}

impl RpcResult {
    /// 성공 여부
    pub fn is_success(&self) -> bool {
        matches!(self, RpcResult::Success { .. })
    }

    /// 실패 종류 (성공이면 None)
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            RpcResult::Success { .. } => None,
            RpcResult::Failure { kind, .. } => Some(*kind),
        }
    }
}
