//! 계정 저장소 구현.
//!
//! `betting_core::AccountStore` trait의 구현체:
//!
//! - [`PgAccountStore`] - PostgreSQL 저장소 (운영용)
//! - [`MemoryAccountStore`] - 인메모리 저장소 (테스트/개발용)

mod memory;
mod postgres;

pub use memory::MemoryAccountStore;
pub use postgres::PgAccountStore;
