//! # appscope-app
//!
//! AppScope 바이너리 진입점.
//! 설정 로드, 어댑터 DI, 계측 설치, 프로브 실행, 성능 리포트 출력.

mod console_ui;
mod lifecycle;
mod views;

use anyhow::{Context, Result};
use appscope_core::config::AppConfig;
use appscope_core::config_manager::ConfigManager;
use appscope_core::models::rpc::Payload;
use appscope_core::ports::transport::OutboundRequest;
use appscope_network::dispatcher::RemoteDispatcher;
use appscope_network::http_transport::{HttpRemoteInvoker, HttpTransport};
use appscope_network::loading::LoadingIndicator;
use appscope_telemetry::advisor::RecommendationEngine;
use appscope_telemetry::interceptor::{HostBindings, Instrumentation};
use appscope_telemetry::memory::{MemorySampler, ProcessMemoryProbe};
use appscope_telemetry::TelemetryState;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console_ui::ConsoleUi;
use crate::lifecycle::LifecycleManager;
use crate::views::ProbeViewFactory;

/// AppScope 성능 프로브
///
/// 화면 로딩, 외부 요청, 원격 함수 호출을 계측하고 성능 리포트와 권고를 출력한다.
#[derive(Parser, Debug)]
#[command(name = "appscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 계측할 화면 라우트 (`route?key=value` 형식, 반복 가능)
    #[arg(long = "view")]
    views: Vec<String>,

    /// GET 요청을 보낼 URL (반복 가능)
    #[arg(long = "probe")]
    probes: Vec<String>,

    /// 프로브 반복 횟수
    #[arg(long, default_value = "1")]
    count: u32,

    /// 원격 함수 엔드포인트 기준 URL
    #[arg(long)]
    rpc_base: Option<String>,

    /// 호출할 원격 함수 이름 (반복 가능)
    #[arg(long = "call")]
    calls: Vec<String>,

    /// 요청 타임아웃 (밀리초)
    #[arg(long, default_value = "10000")]
    timeout_ms: u64,

    /// 프로브 후 Ctrl+C까지 메모리 샘플링 유지
    #[arg(long, short = 'w')]
    watch: bool,
}

/// 설정 관리자 생성 (CLI 경로 우선)
fn load_config(path: Option<PathBuf>) -> Result<ConfigManager> {
    let manager = match path {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new().or_else(|e| {
            warn!("기본 설정 경로 사용 불가, 현재 디렉토리 사용: {e}");
            ConfigManager::with_path(PathBuf::from("./appscope.json"))
        })?,
    };
    info!("설정 파일: {:?}", manager.config_path());
    Ok(manager)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "appscope={level},appscope_app={level},appscope_core={level},appscope_telemetry={level},appscope_network={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("AppScope 시작");

    let config_manager = load_config(args.config.clone())?;
    let config = config_manager.get();
    let state = Arc::new(TelemetryState::from_config(&config.telemetry));
    let timeout = Duration::from_millis(args.timeout_ms);

    // ── 기동 구간: 바인딩 구성 + 계측 설치 ──
    let launch = state.begin_launch();
    let mut bindings = HostBindings::new(
        Arc::new(ProbeViewFactory),
        Arc::new(HttpTransport::new(timeout)?),
    );
    let mut lifecycle = LifecycleManager::new();

    if config.telemetry.enabled {
        Instrumentation::new(state.clone()).install(&mut bindings);

        let sampler = MemorySampler::new(
            state.clone(),
            Arc::new(ProcessMemoryProbe::new()),
            config.telemetry.memory_sample_interval(),
        );
        sampler.sample_once();
        lifecycle.spawn("memory-sampler", move |rx| sampler.run(rx));
    } else {
        info!("텔레메트리 비활성화: 계측 없이 실행");
    }
    launch.finish();

    run_probes(&args, &config, &bindings, state.clone(), timeout).await?;

    if args.watch {
        info!("Ctrl+C로 종료");
        lifecycle.wait_for_signal().await;
    }
    lifecycle.shutdown().await;

    let report = state.compute_report();
    let recommendations = RecommendationEngine::new(config.telemetry.thresholds.clone())
        .evaluate(&report);

    let output = serde_json::json!({
        "report": report,
        "recommendations": recommendations,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("리포트 직렬화 실패")?
    );

    info!("AppScope 종료");
    Ok(())
}

/// 화면 → 외부 요청 → 원격 호출 순으로 프로브 실행
async fn run_probes(
    args: &Args,
    config: &AppConfig,
    bindings: &HostBindings,
    state: appscope_telemetry::SharedTelemetryState,
    timeout: Duration,
) -> Result<()> {
    let factory = bindings.view_factory();
    for entry in &args.views {
        if let Err(e) = views::visit(factory.as_ref(), entry) {
            warn!("화면 {entry} 실패: {e}");
        }
    }

    let transport = bindings.transport();
    for _ in 0..args.count {
        for url in &args.probes {
            match transport.send(OutboundRequest::get(url.as_str())).await {
                Ok(resp) => info!("GET {url} → {}", resp.status),
                Err(e) => warn!("GET {url} 실패: {e}"),
            }
        }
    }

    if args.calls.is_empty() {
        return Ok(());
    }
    let Some(base) = args.rpc_base.as_deref() else {
        warn!("--call 지정됨, --rpc-base 없음: 원격 호출 생략");
        return Ok(());
    };

    // 콘솔 UI당 표시기 하나
    let loading = LoadingIndicator::new(Arc::new(ConsoleUi), config.loading.options());
    let invoker = Arc::new(HttpRemoteInvoker::new(base, timeout)?);
    let dispatcher = RemoteDispatcher::new(invoker, loading, state, config);
    for name in &args.calls {
        let result = dispatcher.call_remote(name, &Payload::new()).await;
        info!(
            "원격 호출 {name}: {}",
            serde_json::to_string(&result).context("결과 직렬화 실패")?
        );
    }
    Ok(())
}
