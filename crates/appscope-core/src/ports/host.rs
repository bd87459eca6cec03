//! 호스트 UI 포트.
//!
//! 로딩 표시기와 토스트는 호스트 전역 자원이다. 코어는 호출만 하고 렌더링하지 않는다.
//! 모든 호출은 동기 fire-and-forget으로 가정한다.

use serde::{Deserialize, Serialize};

/// 로딩 표시 옵션
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingOptions {
    /// 표시 문구
    pub title: String,
    /// 터치 차단 마스크
    pub mask: bool,
}

/// 토스트 종류. 코어는 실패 알림만 띄운다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Error,
}

/// 호스트 UI 인터페이스
pub trait HostUi: Send + Sync {
    /// 로딩 표시기 표시
    fn show_loading(&self, options: &LoadingOptions);

    /// 로딩 표시기 숨김
    fn hide_loading(&self);

    /// 토스트 표시
    fn show_toast(&self, kind: ToastKind, message: &str);
}
