//! 최적화 권고 엔진.
//!
//! 성능 리포트에 고정 임계값 규칙을 독립적으로 적용한다. 일치하는 규칙은 모두 권고로 내보낸다.
//! 출력 순서: 시작 → 화면(리포트 키 순) → 네트워크(리포트 키 순) → 메모리.

use appscope_core::config::ThresholdConfig;
use appscope_core::models::telemetry::{
    PerformanceReport, Priority, Recommendation, RecommendationType,
};
use tracing::debug;

/// 임계값 기반 권고 엔진
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    thresholds: ThresholdConfig,
}

impl RecommendationEngine {
    /// 지정 임계값으로 생성
    pub fn new(thresholds: ThresholdConfig) -> Self {
        Self { thresholds }
    }

    /// 리포트 평가
    pub fn evaluate(&self, report: &PerformanceReport) -> Vec<Recommendation> {
        let t = &self.thresholds;
        let mut recommendations = Vec::new();

        if report.launch_time_ms > t.launch_ms {
            recommendations.push(Recommendation {
                kind: RecommendationType::Launch,
                priority: Priority::High,
                message: "앱 시작 시간이 깁니다. 시작 시 동기 작업을 줄이세요".to_string(),
            });
        }

        for (route, mean) in &report.mean_by_view_route {
            if *mean > t.view_load_ms as f64 {
                recommendations.push(Recommendation {
                    kind: RecommendationType::View,
                    priority: Priority::Medium,
                    message: format!(
                        "화면 {route} 로딩 시간이 깁니다 ({}ms). 데이터 로딩을 최적화하세요",
                        round_ms(*mean)
                    ),
                });
            }
        }

        for (key, mean) in &report.mean_by_call_key {
            if *mean > t.call_ms as f64 {
                recommendations.push(Recommendation {
                    kind: RecommendationType::Network,
                    priority: Priority::High,
                    message: format!(
                        "네트워크 요청 {key} 응답 시간이 깁니다 ({}ms). 인터페이스 성능을 최적화하세요",
                        round_ms(*mean)
                    ),
                });
            }
        }

        if report.memory_usage_bytes > t.memory_bytes {
            recommendations.push(Recommendation {
                kind: RecommendationType::Memory,
                priority: Priority::Medium,
                message: "메모리 사용량이 높습니다. 캐시를 정리하거나 데이터 구조를 최적화하세요"
                    .to_string(),
            });
        }

        debug!("최적화 권고 {}건 생성", recommendations.len());
        recommendations
    }
}

/// 가장 가까운 밀리초로 반올림 (0.5는 올림)
fn round_ms(mean: f64) -> u64 {
    mean.round() as u64
}
