use serde::Serialize;

use super::error::DistillationError;

/// 액상 몰분율 x에서 평형 기상 몰분율 y를 구한다.
///
/// `y = αm·x / (1 + (αm−1)·x)`. αm > 1이면 [0, 1]에서 단조 증가한다.
pub fn vapor_from_liquid(x: f64, alpha: f64) -> f64 {
    alpha * x / (1.0 + (alpha - 1.0) * x)
}

/// 기상 몰분율 y에서 평형 액상 몰분율 x를 구한다. [`vapor_from_liquid`]의 역함수.
pub fn liquid_from_vapor(y: f64, alpha: f64) -> f64 {
    y / (alpha - (alpha - 1.0) * y)
}

/// 검증된 평균 상대휘발도 αm.
///
/// αm ≤ 1이면 평형선이 단조/가역이 아니므로 생성 단계에서 거부한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RelativeVolatility(f64);

impl RelativeVolatility {
    pub fn new(alpha: f64) -> Result<Self, DistillationError> {
        if !alpha.is_finite() || alpha <= 1.0 {
            return Err(DistillationError::InvalidConfiguration(format!(
                "상대휘발도 αm은 1보다 커야 합니다 (입력값 {alpha})"
            )));
        }
        Ok(Self(alpha))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// 평형 기상 조성
    pub fn vapor(&self, x: f64) -> f64 {
        vapor_from_liquid(x, self.0)
    }

    /// 평형 액상 조성
    pub fn liquid(&self, y: f64) -> f64 {
        liquid_from_vapor(y, self.0)
    }
}
