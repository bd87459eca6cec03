//! 뷰(화면) 생명주기 포트.
//!
//! 호스트의 뷰 팩토리가 생성한 화면은 load → ready → show 순으로 콜백을 받는다.
//! 계측 미들웨어는 이 trait을 감싸서 타이밍만 측정하고 결과는 그대로 전달한다.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// 화면 진입 쿼리 파라미터
pub type ViewQuery = BTreeMap<String, String>;

/// 화면 생명주기 콜백
///
/// 구현하지 않은 콜백은 아무것도 하지 않는다.
pub trait ViewLifecycle: Send {
    /// 화면 경로 식별자 (예: "pages/home/index")
    fn route(&self) -> &str;

    /// 로딩 요청
    fn on_load(&mut self, _query: &ViewQuery) -> Result<(), CoreError> {
        Ok(())
    }

    /// 첫 렌더링 완료
    fn on_ready(&mut self) -> Result<(), CoreError> {
        Ok(())
    }

    /// 화면 표시
    fn on_show(&mut self) -> Result<(), CoreError> {
        Ok(())
    }
}

/// 호스트 뷰 팩토리
pub trait ViewFactory: Send + Sync {
    /// 경로에 해당하는 화면 생성
    fn create(&self, route: &str) -> Box<dyn ViewLifecycle>;
}
