//! 정류탑(증류) 실험의 McCabe-Thiele 축차 계산 모듈 모음.
//! 기액평형 → 원료 열상태/물질수지 → 조작선 → 이론단 축차 계산 순으로 데이터가 흐른다.

pub mod balance;
pub mod column;
pub mod equilibrium;
pub mod error;
pub mod operating;
pub mod stages;

pub use balance::*;
pub use column::*;
pub use equilibrium::*;
pub use error::DistillationError;
pub use operating::*;
pub use stages::*;
