//! 주기적 메모리 샘플링.
//!
//! 현재 프로세스의 RSS를 일정 주기로 조회해 텔레메트리 상태의 메모리 지표를 갱신한다.
//! 조회가 실패하면 경고만 남기고 이전 값을 유지한다.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::state::SharedTelemetryState;

/// 메모리 사용량 조회기
pub trait MemoryProbe: Send + Sync {
    /// 현재 프로세스 상주 메모리 (bytes). 지원하지 않으면 None.
    fn resident_bytes(&self) -> Option<u64>;
}

/// sysinfo 기반 프로세스 메모리 조회기: `MemoryProbe` 구현
pub struct ProcessMemoryProbe {
    sys: Mutex<System>,
    pid: Option<Pid>,
}

impl ProcessMemoryProbe {
    /// 현재 프로세스 대상 조회기 생성
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                warn!("현재 프로세스 PID 조회 실패: {e}");
                None
            }
        };
        Self {
            sys: Mutex::new(System::new()),
            pid,
        }
    }
}

impl Default for ProcessMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for ProcessMemoryProbe {
    fn resident_bytes(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut sys = self.sys.lock();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        sys.process(pid).map(|p| p.memory())
    }
}

/// 샘플링 주기 하한. `tokio::time::interval`은 0 주기에서 패닉한다.
const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(1);

/// 메모리 샘플러
pub struct MemorySampler {
    state: SharedTelemetryState,
    probe: Arc<dyn MemoryProbe>,
    interval: Duration,
}

impl MemorySampler {
    /// 새 샘플러 생성. 주기는 최소 1ms로 보정된다.
    pub fn new(
        state: SharedTelemetryState,
        probe: Arc<dyn MemoryProbe>,
        interval: Duration,
    ) -> Self {
        if interval < MIN_SAMPLE_INTERVAL {
            warn!("샘플링 주기 {interval:?}가 너무 짧음: {MIN_SAMPLE_INTERVAL:?}로 보정");
        }
        Self {
            state,
            probe,
            interval: interval.max(MIN_SAMPLE_INTERVAL),
        }
    }

    /// 1회 샘플링. 성공 시 기록한 값 반환.
    pub fn sample_once(&self) -> Option<u64> {
        match self.probe.resident_bytes() {
            Some(bytes) => {
                self.state.set_memory_usage(bytes);
                debug!("메모리 사용량: {:.1}MB", bytes as f64 / 1_048_576.0);
                Some(bytes)
            }
            None => {
                warn!("메모리 사용량 조회 불가: 이전 값 유지");
                None
            }
        }
    }

    /// 종료 신호까지 주기적으로 샘플링
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        info!("메모리 샘플러 시작: 주기={}ms", self.interval.as_millis());
        let mut interval = tokio::time::interval(self.interval);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.sample_once();
                }
                _ = shutdown_rx.changed() => {
                    info!("메모리 샘플러 종료");
                    break;
                }
            }
        }
    }
}
