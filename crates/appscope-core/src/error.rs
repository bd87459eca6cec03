//! AppScope 핵심 에러 타입.
//!
//! 원격 호출 실패는 에러가 아니라 [`crate::models::rpc::RpcResult`] 값으로 표현된다.
//! 여기의 에러는 설정, 어댑터 구성, 화면 생명주기 콜백에서만 발생한다.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정 디렉토리를 결정할 수 없는 등 파일과 무관한 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 설정 파일 읽기/쓰기 실패
    #[error("설정 파일 접근 실패: {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 설정 파일 내용이 JSON 설정으로 파싱되지 않음
    #[error("설정 파일 파싱 실패: {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 설정 필드 유효성 검증 실패
    #[error("유효성 검증 실패: {field}: {message}")]
    Validation { field: String, message: String },

    /// 네트워크 어댑터 구성 실패
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 화면 생명주기 콜백 실패
    #[error("화면 {route} 콜백 실패: {message}")]
    View { route: String, message: String },
}
