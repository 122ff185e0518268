//! Domain layer
//! 리뷰 답글 규칙(컨텍스트/프롬프트/정규화/대상 판정)을 외부 의존성 없이 표현한다.

pub mod context;
pub mod event;
pub mod policy;
pub mod prompt;
pub mod reply;
pub mod review;
pub mod sanitize;
