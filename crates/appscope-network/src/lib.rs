//! # appscope-network
//!
//! 원격 호출 어댑터.
//! 이름 기반 원격 작업 호출을 균일한 성공/실패 계약으로 감싸고,
//! 실패를 고정 분류 체계로 매핑하며, 로딩 표시기 수명과 호출 타이밍을 관리한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use appscope_network::dispatcher::RemoteDispatcher;
//! use appscope_network::loading::LoadingIndicator;
//!
//! // 호스트 UI당 표시기 하나
//! let loading = LoadingIndicator::new(ui, config.loading.options());
//! let dispatcher = RemoteDispatcher::new(invoker, loading.clone(), state, &config);
//! match dispatcher.call_remote("getUser", &Payload::new()).await {
//!     RpcResult::Success { data } => { /* ... */ }
//!     RpcResult::Failure { kind, message } => { /* ... */ }
//! }
//! ```

pub mod dispatcher;
pub mod error_mapping;
pub mod http_transport;
pub mod loading;
