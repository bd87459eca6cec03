//! 텔레메트리 상태.
//!
//! 시계열 저장소와 스칼라 지표(시작 시간, 메모리 사용량, 캐시 적중률)를 하나의 소유 값으로 묶는다.
//! 계측 미들웨어, 원격 호출 디스패처, 메모리 샘플러가 `Arc`로 공유하며
//! 모든 접근은 내부 뮤텍스로 직렬화된다.

use appscope_core::config::TelemetryConfig;
use appscope_core::models::telemetry::{PerformanceReport, Sample, SeriesKind};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::series::{MetricSeriesStore, SeriesCaps};

/// `Duration` → 밀리초 (u64 포화)
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// 스칼라 지표
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Scalars {
    pub launch_time_ms: u64,
    pub memory_usage_bytes: u64,
    pub cache_hit_rate: f64,
}

#[derive(Debug)]
struct Inner {
    store: MetricSeriesStore,
    scalars: Scalars,
}

/// 프로세스 단위 텔레메트리 상태
#[derive(Debug)]
pub struct TelemetryState {
    inner: Mutex<Inner>,
}

/// Arc로 감싼 TelemetryState
pub type SharedTelemetryState = Arc<TelemetryState>;

impl TelemetryState {
    /// 지정 한도로 생성
    pub fn new(caps: SeriesCaps) -> Self {
        Self {
            inner: Mutex::new(Inner {
                store: MetricSeriesStore::new(caps),
                scalars: Scalars::default(),
            }),
        }
    }

    /// 설정에서 생성
    pub fn from_config(config: &TelemetryConfig) -> Self {
        Self::new(SeriesCaps::from(config))
    }

    /// 새 공유 상태 생성
    pub fn shared(caps: SeriesCaps) -> SharedTelemetryState {
        Arc::new(Self::new(caps))
    }

    /// 샘플 기록
    pub fn record(&self, kind: SeriesKind, key: &str, value_ms: u64, success: bool) {
        self.inner.lock().store.record(kind, key, value_ms, success);
    }

    /// 화면 로딩 시간 기록
    pub fn record_view_load(&self, route: &str, elapsed: Duration) {
        let ms = duration_ms(elapsed);
        self.record(SeriesKind::ViewLoad, route, ms, true);
        debug!("화면 {route} 로딩 소요: {ms}ms");
    }

    /// 호출 소요 시간 기록 (외부 요청/원격 호출 공용)
    pub fn record_call(&self, key: &str, elapsed: Duration, success: bool) {
        let ms = duration_ms(elapsed);
        self.record(SeriesKind::Call, key, ms, success);
        debug!("호출 {key} 소요: {ms}ms, 성공: {success}");
    }

    /// 키의 시계열 (오래된 것부터)
    pub fn series_for(&self, kind: SeriesKind, key: &str) -> Vec<Sample> {
        self.inner.lock().store.series_for(kind, key)
    }

    /// 종류별 키 목록 (사전순)
    pub fn series_keys(&self, kind: SeriesKind) -> Vec<String> {
        self.inner.lock().store.keys(kind)
    }

    /// 앱 시작 측정 시작
    pub fn begin_launch(&self) -> LaunchTimer<'_> {
        LaunchTimer {
            state: self,
            started: Instant::now(),
        }
    }

    /// 앱 시작 시간 설정
    pub fn set_launch_time(&self, elapsed: Duration) {
        self.inner.lock().scalars.launch_time_ms = duration_ms(elapsed);
    }

    /// 메모리 사용량 설정 (bytes)
    pub fn set_memory_usage(&self, bytes: u64) {
        self.inner.lock().scalars.memory_usage_bytes = bytes;
    }

    /// 캐시 적중률 설정 ([0, 1]로 제한, NaN은 0)
    pub fn set_cache_hit_rate(&self, rate: f64) {
        let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self.inner.lock().scalars.cache_hit_rate = rate;
    }

    /// 앱 시작 시간 (밀리초)
    pub fn launch_time_ms(&self) -> u64 {
        self.inner.lock().scalars.launch_time_ms
    }

    /// 메모리 사용량 (bytes)
    pub fn memory_usage_bytes(&self) -> u64 {
        self.inner.lock().scalars.memory_usage_bytes
    }

    /// 캐시 적중률
    pub fn cache_hit_rate(&self) -> f64 {
        self.inner.lock().scalars.cache_hit_rate
    }

    /// 모든 시계열과 스칼라 지표 초기화
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.store.clear();
        inner.scalars = Scalars::default();
        info!("텔레메트리 데이터 초기화");
    }

    /// 현재 보존 샘플 기준 성능 리포트
    pub fn compute_report(&self) -> PerformanceReport {
        let inner = self.inner.lock();
        crate::report::build_report(&inner.store, &inner.scalars)
    }
}

impl Default for TelemetryState {
    fn default() -> Self {
        Self::new(SeriesCaps::default())
    }
}

/// 앱 시작 시간 측정기
#[must_use = "finish()를 호출해야 시작 시간이 기록된다"]
pub struct LaunchTimer<'a> {
    state: &'a TelemetryState,
    started: Instant,
}

impl LaunchTimer<'_> {
    /// 측정 종료 및 기록
    pub fn finish(self) -> Duration {
        let elapsed = self.started.elapsed();
        self.state.set_launch_time(elapsed);
        info!("앱 시작 소요: {}ms", duration_ms(elapsed));
        elapsed
    }
}
