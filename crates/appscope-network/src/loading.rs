//! 참조 카운트 로딩 표시기.
//!
//! 로딩 표시기는 호스트 전역에 하나뿐이다. 호출마다 show/hide를 하면
//! 겹친 호출 중 먼저 끝난 쪽이 아직 진행 중인 호출의 표시기를 숨긴다.
//! 활성 호출 수를 세어 0→1일 때만 표시하고 1→0일 때만 숨긴다.

use appscope_core::ports::host::{HostUi, LoadingOptions};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// 공유 로딩 표시기
pub struct LoadingIndicator {
    ui: Arc<dyn HostUi>,
    options: LoadingOptions,
    active: Mutex<usize>,
}

impl LoadingIndicator {
    /// 새 표시기 생성
    pub fn new(ui: Arc<dyn HostUi>, options: LoadingOptions) -> Arc<Self> {
        Arc::new(Self {
            ui,
            options,
            active: Mutex::new(0),
        })
    }

    /// 로딩 구간 시작. 가드가 drop되면 구간 종료.
    pub fn acquire(self: &Arc<Self>) -> LoadingGuard {
        let mut active = self.active.lock();
        *active += 1;
        if *active == 1 {
            self.ui.show_loading(&self.options);
            debug!("로딩 표시");
        }
        LoadingGuard {
            indicator: Arc::clone(self),
        }
    }

    /// 표시기가 그려지는 호스트 UI
    pub fn ui(&self) -> Arc<dyn HostUi> {
        self.ui.clone()
    }

    /// 현재 활성 구간 수
    pub fn active(&self) -> usize {
        *self.active.lock()
    }

    fn release(&self) {
        let mut active = self.active.lock();
        *active = active.saturating_sub(1);
        if *active == 0 {
            self.ui.hide_loading();
            debug!("로딩 숨김");
        }
    }
}

/// 로딩 구간 토큰
#[must_use = "가드를 즉시 drop하면 로딩 표시기가 바로 숨겨진다"]
pub struct LoadingGuard {
    indicator: Arc<LoadingIndicator>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.release();
    }
}
