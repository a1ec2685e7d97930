use serde::Serialize;

use super::error::DistillationError;
use crate::composition::BinarySystem;

/// 이 값 이상의 환류비는 전환류(R → ∞)로 취급한다.
pub const TOTAL_REFLUX_THRESHOLD: f64 = 10_000.0;

/// 포화온도가 주어지지 않았을 때 가정하는 q 값 (과열증기 원료 가정).
pub const DEFAULT_FEED_QUALITY: f64 = 1.5;

/// 환류 운전 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefluxMode {
    /// 유한 환류비 운전
    Finite,
    /// 전환류 운전 (제품 인출 없음)
    Total,
}

impl RefluxMode {
    pub fn from_ratio(reflux_ratio: f64) -> Self {
        if reflux_ratio >= TOTAL_REFLUX_THRESHOLD {
            RefluxMode::Total
        } else {
            RefluxMode::Finite
        }
    }
}

/// 원료 열상태 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeedCondition {
    /// 원료 평균 몰비열
    pub cpm: f64,
    /// 원료 평균 몰증발잠열
    pub rm: f64,
    /// 원료 열상태 파라미터 q
    pub q: f64,
}

impl FeedCondition {
    /// 물성 상수로부터 cpm, rm을 구하고 q를 계산한다.
    pub fn from_system(
        system: &BinarySystem,
        saturation_temp_c: Option<f64>,
        feed_temp_c: f64,
    ) -> Self {
        let cpm = system.mean_heat_capacity();
        let rm = system.mean_latent_heat();
        Self {
            cpm,
            rm,
            q: feed_quality(cpm, rm, saturation_temp_c, feed_temp_c),
        }
    }
}

/// 원료 열상태 파라미터 q를 구한다.
///
/// 포화온도가 없거나 0이면 [`DEFAULT_FEED_QUALITY`]를 돌려준다.
pub fn feed_quality(cpm: f64, rm: f64, saturation_temp_c: Option<f64>, feed_temp_c: f64) -> f64 {
    match saturation_temp_c {
        Some(ts) if ts != 0.0 => (cpm * (ts - feed_temp_c) + rm) / rm,
        _ => DEFAULT_FEED_QUALITY,
    }
}

/// 탑 내부 환류액 유량 L.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LiquidFlow {
    /// L = R·D
    Finite(f64),
    /// 전환류에서 D = 0 이지만 L 은 발산한다
    Unbounded,
}

impl LiquidFlow {
    pub fn finite(&self) -> Option<f64> {
        match self {
            LiquidFlow::Finite(l) => Some(*l),
            LiquidFlow::Unbounded => None,
        }
    }
}

/// 전체 물질수지 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialBalance {
    /// 유출액 유량 D
    pub distillate: f64,
    /// 관출액 유량 W
    pub bottoms: f64,
    /// 환류액 유량 L
    pub liquid: LiquidFlow,
}

/// 전체 물질수지 `D + W = F`, `xD·D + xW·W = F·xF`를 푼다.
///
/// 전환류에서는 관례에 따라 D = 0, W = F 로 둔다.
pub fn solve_balance(
    reflux_ratio: f64,
    feed_flow: f64,
    xd: f64,
    xw: f64,
    xf: f64,
) -> Result<MaterialBalance, DistillationError> {
    if RefluxMode::from_ratio(reflux_ratio) == RefluxMode::Total {
        return Ok(MaterialBalance {
            distillate: 0.0,
            bottoms: feed_flow,
            liquid: LiquidFlow::Unbounded,
        });
    }

    // | 1   1  | |D|   |F   |
    // | xD  xW | |W| = |F·xF|
    let det = xw - xd;
    if det == 0.0 {
        return Err(DistillationError::DegenerateBalance { xd, xw });
    }
    let distillate = (feed_flow * xw - feed_flow * xf) / det;
    let bottoms = (feed_flow * xf - xd * feed_flow) / det;

    Ok(MaterialBalance {
        distillate,
        bottoms,
        liquid: LiquidFlow::Finite(reflux_ratio * distillate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_zero_saturation_temp_uses_default() {
        assert_eq!(feed_quality(1.0, 2.0, None, 20.0), DEFAULT_FEED_QUALITY);
        assert_eq!(feed_quality(1.0, 2.0, Some(0.0), 20.0), DEFAULT_FEED_QUALITY);
    }

    #[test]
    fn feed_at_bubble_point_is_saturated_liquid() {
        assert_eq!(feed_quality(3.0, 2.0, Some(80.0), 80.0), 1.0);
    }

    #[test]
    fn mode_switches_at_threshold() {
        assert_eq!(RefluxMode::from_ratio(9_999.9), RefluxMode::Finite);
        assert_eq!(RefluxMode::from_ratio(TOTAL_REFLUX_THRESHOLD), RefluxMode::Total);
    }

    #[test]
    fn total_reflux_liquid_is_unbounded() {
        let b = solve_balance(10_000.0, 80.0, 0.7, 0.1, 0.3).unwrap();
        assert_eq!(b.liquid, LiquidFlow::Unbounded);
        assert_eq!(b.liquid.finite(), None);
    }
}
