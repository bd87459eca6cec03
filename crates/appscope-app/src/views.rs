//! 프로브 화면.
//!
//! CLI가 지정한 라우트마다 화면 생명주기(load → ready → show)를 한 번 재생한다.

use appscope_core::error::CoreError;
use appscope_core::ports::view::{ViewFactory, ViewLifecycle, ViewQuery};
use tracing::debug;

/// 아무 작업도 하지 않는 화면
struct ProbeView {
    route: String,
}

impl ViewLifecycle for ProbeView {
    fn route(&self) -> &str {
        &self.route
    }

    fn on_load(&mut self, query: &ViewQuery) -> Result<(), CoreError> {
        debug!("화면 로드: {} query={query:?}", self.route);
        Ok(())
    }
}

/// 프로브 화면 팩토리
pub struct ProbeViewFactory;

impl ViewFactory for ProbeViewFactory {
    fn create(&self, route: &str) -> Box<dyn ViewLifecycle> {
        Box::new(ProbeView {
            route: route.to_string(),
        })
    }
}

/// `route?key=value&...` 형식을 라우트와 쿼리로 분리
pub fn split_route(entry: &str) -> (&str, ViewQuery) {
    let Some((route, query)) = entry.split_once('?') else {
        return (entry, ViewQuery::new());
    };

    let params = query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect();
    (route, params)
}

/// 화면 하나를 열어 생명주기 재생
pub fn visit(factory: &dyn ViewFactory, entry: &str) -> Result<(), CoreError> {
    let (route, query) = split_route(entry);
    let mut view = factory.create(route);
    view.on_load(&query)?;
    view.on_ready()?;
    view.on_show()
}
