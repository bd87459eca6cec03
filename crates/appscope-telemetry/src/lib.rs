//! # appscope-telemetry
//!
//! 텔레메트리 코어.
//! 화면 생명주기와 외부 요청을 계측 미들웨어로 감싸 소요 시간을 수집하고,
//! 키별로 제한된 시계열을 보존하며, 평균 리포트와 최적화 권고를 생성한다.
//!
//! ## 구조
//!
//! - [`series`]: 종류/키별 제한 시계열 저장소 (FIFO 축출)
//! - [`state`]: 프로세스 단위 텔레메트리 상태 (시계열 + 스칼라 지표)
//! - [`report`]: 평균 집계 리포트
//! - [`advisor`]: 임계값 기반 최적화 권고
//! - [`interceptor`]: 뷰 팩토리/요청 전송기 계측 미들웨어
//! - [`memory`]: 주기적 프로세스 메모리 샘플러

pub mod advisor;
pub mod interceptor;
pub mod memory;
pub mod report;
pub mod series;
pub mod state;

pub use state::{LaunchTimer, SharedTelemetryState, TelemetryState};
