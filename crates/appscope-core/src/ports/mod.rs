//! 포트 인터페이스 (trait).
//!
//! 호스트 플랫폼 경계. 뷰 생성, 외부 요청 전송, 원격 함수 호출,
//! 로딩/토스트 표시는 모두 외부 협력자이며 이 trait들을 통해서만 접근한다.
//! `appscope-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 비동기 trait은 `async_trait` 매크로를 사용하여 object safety를 보장한다.

pub mod host;
pub mod remote;
pub mod transport;
pub mod view;
