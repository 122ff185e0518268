//! 애플리케이션 유스케이스 모음.

pub mod dispatch;
pub mod generate_reply;
pub mod inspect_config;
pub mod test_prompt;
