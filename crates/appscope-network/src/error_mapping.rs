use appscope_core::models::rpc::{ErrorKind, FailureReason, TransportFailure};

const SYSTEM_ERROR_CODE: i64 = -1;
const NETWORK_ERROR_CODE: i64 = -2;
const PERMISSION_DENIED_CODE: i64 = 87009;

/// 분류 결과: 종류 + 사용자 메시지
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: ErrorKind,
    pub message: String,
}

impl Classified {
    fn fixed(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.user_message().to_string(),
        }
    }
}

/// 전송 계층 실패 분류
///
/// 구조화된 사유가 있으면 우선 사용하고, 없으면 진단 문구의 부분 문자열로 판별한다.
/// 판별 순서: "timeout" → "abort" → "fail" → Unknown.
pub fn classify_transport_failure(failure: &TransportFailure) -> ErrorKind {
    match failure.reason {
        Some(FailureReason::Timeout) => ErrorKind::Timeout,
        Some(FailureReason::Aborted) => ErrorKind::Aborted,
        Some(FailureReason::Failed) => ErrorKind::TransportFailure,
        None => classify_diagnostic(&failure.message),
    }
}

fn classify_diagnostic(message: &str) -> ErrorKind {
    if message.contains("timeout") {
        ErrorKind::Timeout
    } else if message.contains("abort") {
        ErrorKind::Aborted
    } else if message.contains("fail") {
        ErrorKind::TransportFailure
    } else {
        ErrorKind::Unknown
    }
}

/// 애플리케이션 레벨 거부 분류
///
/// 알려진 코드만 정확히 매칭하고 나머지는 모두 ServerBusy.
/// 코드가 없거나 0이면 원격 메시지를 노출하지 않고 고정 문구를 쓴다.
/// 그 밖의 미지 코드는 원격이 준 메시지를 우선한다.
pub fn classify_application_failure(code: Option<i64>, fallback_message: &str) -> Classified {
    match code {
        None | Some(0) => Classified::fixed(ErrorKind::ServerBusy),
        Some(SYSTEM_ERROR_CODE) => Classified::fixed(ErrorKind::SystemError),
        Some(NETWORK_ERROR_CODE) => Classified::fixed(ErrorKind::TransportFailure),
        Some(PERMISSION_DENIED_CODE) => Classified::fixed(ErrorKind::PermissionDenied),
        Some(_) if !fallback_message.is_empty() => Classified {
            kind: ErrorKind::ServerBusy,
            message: fallback_message.to_string(),
        },
        _ => Classified::fixed(ErrorKind::ServerBusy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diag(message: &str) -> ErrorKind {
        classify_transport_failure(&TransportFailure::new(message))
    }

    #[test]
    fn transport_substring_rules() {
        assert_eq!(diag("request timeout"), ErrorKind::Timeout);
        assert_eq!(diag("request fail"), ErrorKind::TransportFailure);
        assert_eq!(diag("aborted by user"), ErrorKind::Aborted);
        assert_eq!(diag("unrecognized"), ErrorKind::Unknown);
    }

    #[test]
    fn transport_priority_order() {
        // timeout이 fail보다 우선
        assert_eq!(diag("request:fail timeout"), ErrorKind::Timeout);
        // abort가 fail보다 우선
        assert_eq!(diag("request:fail abort"), ErrorKind::Aborted);
    }

    #[test]
    fn structured_reason_wins_over_text() {
        let failure = TransportFailure::with_reason(FailureReason::Aborted, "request timeout");
        assert_eq!(classify_transport_failure(&failure), ErrorKind::Aborted);

        let failure = TransportFailure::with_reason(FailureReason::Failed, "");
        assert_eq!(classify_transport_failure(&failure), ErrorKind::TransportFailure);
    }

    #[test]
    fn application_known_codes() {
        assert_eq!(
            classify_application_failure(Some(-1), "").kind,
            ErrorKind::SystemError
        );
        assert_eq!(
            classify_application_failure(Some(-2), "").kind,
            ErrorKind::TransportFailure
        );
        let denied = classify_application_failure(Some(87009), "무시됨");
        assert_eq!(denied.kind, ErrorKind::PermissionDenied);
        assert_eq!(denied.message, ErrorKind::PermissionDenied.user_message());
    }

    #[test]
    fn application_unknown_code_prefers_remote_message() {
        let custom = classify_application_failure(Some(999), "custom msg");
        assert_eq!(custom.kind, ErrorKind::ServerBusy);
        assert_eq!(custom.message, "custom msg");

        let generic = classify_application_failure(Some(999), "");
        assert_eq!(generic.kind, ErrorKind::ServerBusy);
        assert_eq!(generic.message, ErrorKind::ServerBusy.user_message());
    }

    #[test]
    fn application_missing_code_uses_fixed_message() {
        for code in [None, Some(0)] {
            let c = classify_application_failure(code, "raw backend detail");
            assert_eq!(c.kind, ErrorKind::ServerBusy);
            assert_eq!(c.message, ErrorKind::ServerBusy.user_message());
        }
    }
}
