//! # Betting Core
//!
//! 베팅 플랫폼 계정 서비스의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 계정 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 계정 및 역할 레코드
//! - 계정 저장소 추상화
//! - 저장소 에러 타입
//! - 로깅 인프라

pub mod domain;
pub mod error;
pub mod logging;

pub use domain::*;
pub use error::*;
pub use logging::*;
