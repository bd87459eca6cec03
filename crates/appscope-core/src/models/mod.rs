//! AppScope 도메인 모델.
//!
//! 계측 샘플, 성능 리포트, 원격 호출 봉투/결과를 정의한다.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod rpc;
pub mod telemetry;
