//! 콘솔 호스트 UI: `HostUi` 포트 구현.
//!
//! 로딩 표시와 토스트를 로그로 출력한다.

use appscope_core::ports::host::{HostUi, LoadingOptions, ToastKind};
use tracing::{info, warn};

pub struct ConsoleUi;

impl HostUi for ConsoleUi {
    fn show_loading(&self, options: &LoadingOptions) {
        info!("[로딩] {}", options.title);
    }

    fn hide_loading(&self) {
        info!("[로딩] 완료");
    }

    fn show_toast(&self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Error => warn!("[알림] {message}"),
        }
    }
}
