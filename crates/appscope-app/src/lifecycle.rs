//! 라이프사이클 관리.
//!
//! 백그라운드 작업(메모리 샘플러 등)에 종료 신호를 배포하고 종료를 기다린다.

use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<bool>,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            shutdown_tx,
            tasks: Vec::new(),
        }
    }

    /// 종료 수신기 발급
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }

    /// 종료 신호를 받는 백그라운드 작업 등록
    pub fn spawn<F, Fut>(&mut self, name: &'static str, task: F)
    where
        F: FnOnce(watch::Receiver<bool>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task(self.subscribe()));
        self.tasks.push((name, handle));
    }

    /// 등록된 작업 수
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Ctrl+C 대기
    pub async fn wait_for_signal(&self) {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Ctrl+C 수신"),
            Err(e) => warn!("시그널 핸들러 등록 실패: {e}"),
        }
    }

    /// 종료 신호 발송 후 모든 작업 종료 대기
    pub async fn shutdown(self) {
        info!("종료 신호 발송 (작업 {}개)", self.tasks.len());
        let _ = self.shutdown_tx.send(true);

        for (name, handle) in self.tasks {
            if let Err(e) = handle.await {
                warn!("{name} 작업 비정상 종료: {e}");
            }
        }
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn shutdown_stops_registered_tasks() {
        let mut lm = LifecycleManager::new();
        let stopped = Arc::new(AtomicBool::new(false));

        let flag = stopped.clone();
        lm.spawn("test", move |mut rx| async move {
            let _ = rx.changed().await;
            flag.store(*rx.borrow(), Ordering::SeqCst);
        });
        assert_eq!(lm.task_count(), 1);

        lm.shutdown().await;
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn shutdown_without_tasks_returns() {
        let lm = LifecycleManager::new();
        let rx = lm.subscribe();
        assert!(!*rx.borrow());
        lm.shutdown().await;
    }
}
