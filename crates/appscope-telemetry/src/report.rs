//! 성능 리포트 집계.
//!
//! 키마다 현재 보존 중인 샘플의 산술 평균을 계산한다 (샘플당 동일 가중치, 시간 감쇠 없음).
//! 샘플이 없는 키는 결과에 나타나지 않는다. 평균은 순서와 무관하므로
//! 동시 호출의 완료 순서가 섞여도 결과가 같다.

use appscope_core::models::telemetry::{PerformanceReport, Sample, SeriesKind};
use chrono::Utc;
use std::collections::{BTreeMap, VecDeque};

use crate::series::MetricSeriesStore;
use crate::state::Scalars;

/// 샘플 값의 산술 평균 (빈 시계열이면 None)
pub fn mean_value(samples: &VecDeque<Sample>) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().map(|s| s.value_ms as f64).sum();
    Some(sum / samples.len() as f64)
}

fn means(store: &MetricSeriesStore, kind: SeriesKind) -> BTreeMap<String, f64> {
    store
        .iter(kind)
        .filter_map(|(key, samples)| mean_value(samples).map(|m| (key.to_string(), m)))
        .collect()
}

pub(crate) fn build_report(store: &MetricSeriesStore, scalars: &Scalars) -> PerformanceReport {
    PerformanceReport {
        launch_time_ms: scalars.launch_time_ms,
        mean_by_view_route: means(store, SeriesKind::ViewLoad),
        mean_by_call_key: means(store, SeriesKind::Call),
        memory_usage_bytes: scalars.memory_usage_bytes,
        cache_hit_rate: scalars.cache_hit_rate,
        timestamp: Utc::now(),
    }
}
