//! 텔레메트리 모델.
//!
//! 화면 로딩/호출 소요 시간 샘플, 집계 리포트, 최적화 권고를 정의.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 단일 측정 샘플 (생성 후 불변)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 소요 시간 (밀리초)
    pub value_ms: u64,
    /// 성공 여부
    pub success: bool,
    /// 기록 시각
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// 현재 시각으로 샘플 생성
    pub fn now(value_ms: u64, success: bool) -> Self {
        Self {
            value_ms,
            success,
            timestamp: Utc::now(),
        }
    }
}

/// 시계열 네임스페이스.
///
/// 화면 경로와 호출 이름이 충돌하지 않도록 종류별로 분리 보관한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// 화면 로딩 시간 (키: 화면 경로)
    ViewLoad,
    /// 네트워크/원격 호출 시간 (키: URL 또는 호출 이름)
    Call,
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesKind::ViewLoad => write!(f, "view_load"),
            SeriesKind::Call => write!(f, "call"),
        }
    }
}

/// 집계된 성능 리포트 (요청 시점 스냅샷)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// 앱 시작 소요 시간 (밀리초)
    pub launch_time_ms: u64,
    /// 화면 경로별 평균 로딩 시간 (밀리초)
    pub mean_by_view_route: BTreeMap<String, f64>,
    /// 호출 키별 평균 소요 시간 (밀리초)
    pub mean_by_call_key: BTreeMap<String, f64>,
    /// 프로세스 메모리 사용량 (bytes)
    pub memory_usage_bytes: u64,
    /// 캐시 적중률 (0.0 ~ 1.0)
    pub cache_hit_rate: f64,
    /// 리포트 생성 시각
    pub timestamp: DateTime<Utc>,
}

/// 권고 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    /// 앱 시작
    Launch,
    /// 화면 로딩
    View,
    /// 네트워크/원격 호출
    Network,
    /// 메모리
    Memory,
}

/// 권고 우선순위
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// 임계값 규칙에 의해 생성된 최적화 권고 (영속화하지 않음)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// 권고 종류
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    /// 우선순위
    pub priority: Priority,
    /// 사용자 표시용 메시지
    pub message: String,
}
