//! Interface layer
//! CLI와 운영자 HTTP 진입점, 그리고 의존성 조립을 담당한다.

pub mod cli;
pub mod composition;
pub mod http;
