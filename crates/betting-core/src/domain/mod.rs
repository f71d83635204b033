//! 계정 서비스의 도메인 모델.

mod account;
mod role;
mod store;

pub use account::*;
pub use role::*;
pub use store::*;
