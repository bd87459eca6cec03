//! 제한 시계열 저장소.
//!
//! 종류(화면 로딩/호출)별 네임스페이스 안에서 키마다 최근 N개 샘플만 보존한다.
//! 한도를 넘으면 가장 오래된 샘플부터 축출 (FIFO).
//! 삽입 순서는 기록 순서(= 비동기 작업의 완료 순서)다.

use appscope_core::config::TelemetryConfig;
use appscope_core::models::telemetry::{Sample, SeriesKind};
use std::collections::{BTreeMap, VecDeque};

/// 종류별 보존 한도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesCaps {
    /// 화면 로딩 시계열 한도
    pub view_load: usize,
    /// 호출 시계열 한도
    pub call: usize,
}

impl SeriesCaps {
    /// 종류에 해당하는 한도
    pub fn for_kind(&self, kind: SeriesKind) -> usize {
        match kind {
            SeriesKind::ViewLoad => self.view_load,
            SeriesKind::Call => self.call,
        }
    }
}

impl Default for SeriesCaps {
    fn default() -> Self {
        Self {
            view_load: 10,
            call: 20,
        }
    }
}

impl From<&TelemetryConfig> for SeriesCaps {
    fn from(config: &TelemetryConfig) -> Self {
        Self {
            view_load: config.view_series_cap,
            call: config.call_series_cap,
        }
    }
}

/// 종류/키별 시계열 저장소
///
/// 동기화는 호출자([`crate::state::TelemetryState`]) 책임.
#[derive(Debug, Default)]
pub struct MetricSeriesStore {
    caps: SeriesCaps,
    view_load: BTreeMap<String, VecDeque<Sample>>,
    call: BTreeMap<String, VecDeque<Sample>>,
}

impl MetricSeriesStore {
    /// 새 저장소 생성
    pub fn new(caps: SeriesCaps) -> Self {
        Self {
            caps,
            view_load: BTreeMap::new(),
            call: BTreeMap::new(),
        }
    }

    fn namespace(&self, kind: SeriesKind) -> &BTreeMap<String, VecDeque<Sample>> {
        match kind {
            SeriesKind::ViewLoad => &self.view_load,
            SeriesKind::Call => &self.call,
        }
    }

    fn namespace_mut(&mut self, kind: SeriesKind) -> &mut BTreeMap<String, VecDeque<Sample>> {
        match kind {
            SeriesKind::ViewLoad => &mut self.view_load,
            SeriesKind::Call => &mut self.call,
        }
    }

    /// 샘플 추가 (현재 시각). 한도 초과분은 오래된 것부터 제거.
    pub fn record(&mut self, kind: SeriesKind, key: &str, value_ms: u64, success: bool) {
        self.push(kind, key, Sample::now(value_ms, success));
    }

    /// 이미 만들어진 샘플 추가
    pub fn push(&mut self, kind: SeriesKind, key: &str, sample: Sample) {
        let cap = self.caps.for_kind(kind);
        let series = self.namespace_mut(kind).entry(key.to_string()).or_default();
        series.push_back(sample);
        while series.len() > cap {
            series.pop_front();
        }
    }

    /// 키의 시계열 복사본 (오래된 것부터). 처음 보는 키면 빈 목록.
    pub fn series_for(&self, kind: SeriesKind, key: &str) -> Vec<Sample> {
        self.namespace(kind)
            .get(key)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// 종류별 전체 시계열 순회 (키 사전순)
    pub fn iter(&self, kind: SeriesKind) -> impl Iterator<Item = (&str, &VecDeque<Sample>)> {
        self.namespace(kind).iter().map(|(k, v)| (k.as_str(), v))
    }

    /// 종류별 키 목록 (사전순)
    pub fn keys(&self, kind: SeriesKind) -> Vec<String> {
        self.namespace(kind).keys().cloned().collect()
    }

    /// 모든 시계열 제거
    pub fn clear(&mut self) {
        self.view_load.clear();
        self.call.clear();
    }
}
