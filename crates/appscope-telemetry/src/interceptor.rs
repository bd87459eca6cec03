//! 계측 미들웨어.
//!
//! 호스트의 뷰 팩토리와 요청 전송기를 감싸서 호출부 모르게 소요 시간을 수집한다.
//! 감싼 쪽은 원래 콜백의 반환값과 부수효과를 그대로 전달한다.
//!
//! 설치는 [`HostBindings`]당 한 번만 적용된다. 두 번째 설치는 아무것도 하지 않는다
//! (이중 래핑은 모든 타이밍을 두 번 기록한다).

use appscope_core::error::CoreError;
use appscope_core::models::rpc::TransportFailure;
use appscope_core::ports::transport::{OutboundRequest, OutboundResponse, RequestTransport};
use appscope_core::ports::view::{ViewFactory, ViewLifecycle, ViewQuery};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::state::{duration_ms, SharedTelemetryState};

/// 호스트 팩토리 바인딩
///
/// 앱 초기화 시 한 번 구성되고, 계측은 이 바인딩에 미들웨어로 등록된다.
pub struct HostBindings {
    view_factory: Arc<dyn ViewFactory>,
    transport: Arc<dyn RequestTransport>,
    instrumented: bool,
}

impl HostBindings {
    /// 원본 팩토리로 바인딩 생성
    pub fn new(view_factory: Arc<dyn ViewFactory>, transport: Arc<dyn RequestTransport>) -> Self {
        Self {
            view_factory,
            transport,
            instrumented: false,
        }
    }

    /// 현재 뷰 팩토리
    pub fn view_factory(&self) -> Arc<dyn ViewFactory> {
        self.view_factory.clone()
    }

    /// 현재 요청 전송기
    pub fn transport(&self) -> Arc<dyn RequestTransport> {
        self.transport.clone()
    }

    /// 계측 설치 여부
    pub fn is_instrumented(&self) -> bool {
        self.instrumented
    }
}

/// 계측 설치기
pub struct Instrumentation {
    state: SharedTelemetryState,
}

impl Instrumentation {
    /// 새 설치기 생성
    pub fn new(state: SharedTelemetryState) -> Self {
        Self { state }
    }

    /// 바인딩에 계측 미들웨어 설치
    ///
    /// 처음 설치하면 true, 이미 설치된 바인딩이면 false.
    pub fn install(&self, bindings: &mut HostBindings) -> bool {
        if bindings.instrumented {
            debug!("계측 미들웨어 이미 설치됨, 건너뜀");
            return false;
        }

        bindings.view_factory = Arc::new(InstrumentedViewFactory {
            inner: bindings.view_factory.clone(),
            state: self.state.clone(),
        });
        bindings.transport = Arc::new(InstrumentedTransport {
            inner: bindings.transport.clone(),
            state: self.state.clone(),
        });
        bindings.instrumented = true;

        info!("계측 미들웨어 설치 완료 (뷰 생명주기, 외부 요청)");
        true
    }
}

/// 생성하는 화면마다 로딩 타이머를 붙이는 뷰 팩토리
pub struct InstrumentedViewFactory {
    inner: Arc<dyn ViewFactory>,
    state: SharedTelemetryState,
}

impl ViewFactory for InstrumentedViewFactory {
    fn create(&self, route: &str) -> Box<dyn ViewLifecycle> {
        Box::new(TimedView {
            inner: self.inner.create(route),
            state: self.state.clone(),
            load_started: None,
        })
    }
}

/// load → ready 구간을 측정하는 화면 래퍼
struct TimedView {
    inner: Box<dyn ViewLifecycle>,
    state: SharedTelemetryState,
    load_started: Option<Instant>,
}

impl ViewLifecycle for TimedView {
    fn route(&self) -> &str {
        self.inner.route()
    }

    fn on_load(&mut self, query: &ViewQuery) -> Result<(), CoreError> {
        self.load_started = Some(Instant::now());
        self.inner.on_load(query)
    }

    fn on_ready(&mut self) -> Result<(), CoreError> {
        // load 없이 ready가 오면 0ms
        let elapsed = self
            .load_started
            .map(|started| started.elapsed())
            .unwrap_or_default();
        self.state.record_view_load(self.inner.route(), elapsed);
        self.inner.on_ready()
    }

    fn on_show(&mut self) -> Result<(), CoreError> {
        let started = Instant::now();
        let result = self.inner.on_show();
        debug!(
            "화면 {} 표시 소요: {}ms",
            self.inner.route(),
            duration_ms(started.elapsed())
        );
        result
    }
}

/// 요청마다 소요 시간을 기록하는 전송기
pub struct InstrumentedTransport {
    inner: Arc<dyn RequestTransport>,
    state: SharedTelemetryState,
}

#[async_trait]
impl RequestTransport for InstrumentedTransport {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, TransportFailure> {
        let key = request.url.clone();
        let started = Instant::now();
        let result = self.inner.send(request).await;
        self.state.record_call(&key, started.elapsed(), result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TelemetryState;
    use appscope_core::models::telemetry::SeriesKind;
    use parking_lot::Mutex;
    use std::time::Duration;

    /// 호출 기록을 남기는 화면
    struct RecordingView {
        route: String,
        log: Arc<Mutex<Vec<String>>>,
        fail_ready: bool,
    }

    impl ViewLifecycle for RecordingView {
        fn route(&self) -> &str {
            &self.route
        }

        fn on_load(&mut self, query: &ViewQuery) -> Result<(), CoreError> {
            self.log.lock().push(format!("load:{}", query.len()));
            Ok(())
        }

        fn on_ready(&mut self) -> Result<(), CoreError> {
            self.log.lock().push("ready".to_string());
            if self.fail_ready {
                return Err(CoreError::View {
                    route: self.route.clone(),
                    message: "ready 실패".to_string(),
                });
            }
            Ok(())
        }

        fn on_show(&mut self) -> Result<(), CoreError> {
            self.log.lock().push("show".to_string());
            Ok(())
        }
    }

    struct RecordingFactory {
        log: Arc<Mutex<Vec<String>>>,
        fail_ready: bool,
    }

    impl ViewFactory for RecordingFactory {
        fn create(&self, route: &str) -> Box<dyn ViewLifecycle> {
            Box::new(RecordingView {
                route: route.to_string(),
                log: self.log.clone(),
                fail_ready: self.fail_ready,
            })
        }
    }

    /// 지연 후 응답하는 전송기. URL에 "down"이 있으면 실패.
    struct DelayTransport {
        delay: Duration,
    }

    #[async_trait]
    impl RequestTransport for DelayTransport {
        async fn send(
            &self,
            request: OutboundRequest,
        ) -> Result<OutboundResponse, TransportFailure> {
            tokio::time::sleep(self.delay).await;
            if request.url.contains("down") {
                return Err(TransportFailure::new("request:fail"));
            }
            Ok(OutboundResponse {
                status: 200,
                body: format!("echo {}", request.url),
            })
        }
    }

    fn bindings(log: Arc<Mutex<Vec<String>>>, fail_ready: bool, delay: Duration) -> HostBindings {
        HostBindings::new(
            Arc::new(RecordingFactory { log, fail_ready }),
            Arc::new(DelayTransport { delay }),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn view_load_to_ready_is_recorded() {
        let state = Arc::new(TelemetryState::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = bindings(log.clone(), false, Duration::ZERO);
        assert!(Instrumentation::new(state.clone()).install(&mut host));

        let mut view = host.view_factory().create("pages/home/index");
        let mut query = ViewQuery::new();
        query.insert("id".to_string(), "7".to_string());

        view.on_load(&query).unwrap();
        tokio::time::advance(Duration::from_millis(350)).await;
        view.on_ready().unwrap();
        view.on_show().unwrap();

        let series = state.series_for(SeriesKind::ViewLoad, "pages/home/index");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value_ms, 350);
        assert!(series[0].success);
        // 원래 콜백이 같은 인자로 순서대로 호출됨
        assert_eq!(*log.lock(), vec!["load:1", "ready", "show"]);
    }

    #[test]
    fn ready_without_load_records_zero() {
        let state = Arc::new(TelemetryState::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = bindings(log, false, Duration::ZERO);
        Instrumentation::new(state.clone()).install(&mut host);

        let mut view = host.view_factory().create("pages/a");
        view.on_ready().unwrap();

        let series = state.series_for(SeriesKind::ViewLoad, "pages/a");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].value_ms, 0);
    }

    #[test]
    fn lifecycle_errors_pass_through() {
        let state = Arc::new(TelemetryState::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = bindings(log, true, Duration::ZERO);
        Instrumentation::new(state.clone()).install(&mut host);

        let mut view = host.view_factory().create("pages/err");
        view.on_load(&ViewQuery::new()).unwrap();
        let err = view.on_ready().unwrap_err();
        assert!(matches!(err, CoreError::View { ref route, .. } if route == "pages/err"));
        assert_eq!(view.route(), "pages/err");
        // 실패해도 타이밍은 기록됨
        assert_eq!(state.series_for(SeriesKind::ViewLoad, "pages/err").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_success_and_failure_are_tagged() {
        let state = Arc::new(TelemetryState::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = bindings(log, false, Duration::from_millis(80));
        Instrumentation::new(state.clone()).install(&mut host);
        let transport = host.transport();

        let ok = transport
            .send(OutboundRequest::get("https://api.test/up"))
            .await
            .unwrap();
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body, "echo https://api.test/up");

        let err = transport
            .send(OutboundRequest::get("https://api.test/down"))
            .await
            .unwrap_err();
        assert_eq!(err.message, "request:fail");

        let up = state.series_for(SeriesKind::Call, "https://api.test/up");
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].value_ms, 80);
        assert!(up[0].success);

        let down = state.series_for(SeriesKind::Call, "https://api.test/down");
        assert_eq!(down.len(), 1);
        assert!(!down[0].success);
    }

    #[tokio::test(start_paused = true)]
    async fn install_is_idempotent() {
        let state = Arc::new(TelemetryState::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut host = bindings(log, false, Duration::from_millis(5));
        let instrumentation = Instrumentation::new(state.clone());

        assert!(instrumentation.install(&mut host));
        assert!(!instrumentation.install(&mut host));
        // 다른 설치기로도 이중 래핑되지 않음
        assert!(!Instrumentation::new(state.clone()).install(&mut host));
        assert!(host.is_instrumented());

        host.transport()
            .send(OutboundRequest::get("https://api.test/once"))
            .await
            .unwrap();
        let mut view = host.view_factory().create("pages/once");
        view.on_load(&ViewQuery::new()).unwrap();
        view.on_ready().unwrap();

        assert_eq!(state.series_for(SeriesKind::Call, "https://api.test/once").len(), 1);
        assert_eq!(state.series_for(SeriesKind::ViewLoad, "pages/once").len(), 1);
    }

    #[tokio::test]
    async fn uninstrumented_bindings_record_nothing() {
        let state = Arc::new(TelemetryState::default());
        let log = Arc::new(Mutex::new(Vec::new()));
        let host = bindings(log, false, Duration::ZERO);

        host.transport()
            .send(OutboundRequest::get("https://api.test/plain"))
            .await
            .unwrap();
        assert!(state.series_keys(SeriesKind::Call).is_empty());
    }
}
