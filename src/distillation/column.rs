use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::balance::{solve_balance, FeedCondition, MaterialBalance, RefluxMode};
use super::equilibrium::RelativeVolatility;
use super::error::DistillationError;
use super::operating::OperatingLines;
use super::stages::{step_stages, PlateSummary, StageSequence};
use crate::composition::{BinarySystem, MeasuredCompositions};

/// 정류 실험 운전 조건.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentInputs {
    /// 환류비 R (10000 이상이면 전환류)
    pub reflux_ratio: f64,
    /// 평균 상대휘발도 αm
    pub relative_volatility: f64,
    /// 원료 유량 F (mol/h)
    pub feed_flow: f64,
    /// 원료 포화(비점) 온도 tS (°C). 없으면 q 기본값을 쓴다.
    pub saturation_temp_c: Option<f64>,
    /// 원료 온도 tF (°C)
    pub feed_temp_c: f64,
}

impl ExperimentInputs {
    pub fn mode(&self) -> RefluxMode {
        RefluxMode::from_ratio(self.reflux_ratio)
    }

    /// 계산 전에 운전 조건을 검증하고 αm을 돌려준다.
    pub fn validate(&self) -> Result<RelativeVolatility, DistillationError> {
        if !self.reflux_ratio.is_finite() || self.reflux_ratio <= 0.0 {
            return Err(DistillationError::InvalidConfiguration(format!(
                "환류비 R은 0보다 커야 합니다 (입력값 {})",
                self.reflux_ratio
            )));
        }
        if !self.feed_flow.is_finite() || self.feed_flow <= 0.0 {
            return Err(DistillationError::InvalidConfiguration(format!(
                "원료 유량 F는 0보다 커야 합니다 (입력값 {})",
                self.feed_flow
            )));
        }
        let temps_finite = self.feed_temp_c.is_finite()
            && self.saturation_temp_c.map_or(true, f64::is_finite);
        if !temps_finite {
            return Err(DistillationError::InvalidConfiguration(
                "온도 입력이 유한한 값이 아닙니다".into(),
            ));
        }
        RelativeVolatility::new(self.relative_volatility)
    }
}

/// 한 번의 정류 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistillationResult {
    pub mode: RefluxMode,
    pub reflux_ratio: f64,
    pub relative_volatility: RelativeVolatility,
    pub feed_flow: f64,
    pub feed: FeedCondition,
    pub balance: MaterialBalance,
    /// 단 계산에 사용한 탑정 조성
    pub xd: f64,
    /// 단 계산에 사용한 탑저 조성
    pub xw: f64,
    pub xf: f64,
    pub lines: OperatingLines,
    pub stages: StageSequence,
    pub plates: PlateSummary,
}

impl DistillationResult {
    /// 이론단수 NT (재비기 포함)
    pub fn theoretical_plates(&self) -> usize {
        self.plates.theoretical
    }

    /// 실제 단수 NT − 1
    pub fn actual_plates(&self) -> usize {
        self.plates.actual
    }

    /// 원료 공급단 (정류부 단 개수)
    pub fn feed_stage(&self) -> usize {
        self.plates.feed_stage
    }
}

/// 운전 조건과 측정 조성으로 이론단수를 계산한다.
///
/// 물질수지는 부분환류 조성(xD, xW, xF)으로 풀고, 단 계산은 전환류이면
/// 전환류 조성 쌍을, 아니면 부분환류 조성 쌍을 사용한다.
pub fn calculate(
    inputs: &ExperimentInputs,
    compositions: &MeasuredCompositions,
    system: &BinarySystem,
) -> Result<DistillationResult, DistillationError> {
    let alpha = inputs.validate()?;
    compositions.validate()?;
    let mode = inputs.mode();

    let feed = FeedCondition::from_system(system, inputs.saturation_temp_c, inputs.feed_temp_c);
    debug!(
        light = system.light.name,
        heavy = system.heavy.name,
        cpm = feed.cpm,
        rm = feed.rm,
        q = feed.q,
        "feed condition"
    );

    let balance = solve_balance(
        inputs.reflux_ratio,
        inputs.feed_flow,
        compositions.xd,
        compositions.xw,
        compositions.xf,
    )?;
    debug!(
        d = balance.distillate,
        w = balance.bottoms,
        l = ?balance.liquid,
        "material balance"
    );

    let (xd, xw) = match mode {
        RefluxMode::Total => (compositions.xd_total, compositions.xw_total),
        RefluxMode::Finite => (compositions.xd, compositions.xw),
    };

    let lines = OperatingLines::build(
        inputs.reflux_ratio,
        feed.q,
        inputs.feed_flow,
        compositions.xf,
        xd,
        xw,
        &balance,
    )?;
    let stages = step_stages(xd, xw, alpha, &lines)?;
    let plates = stages.summary(lines.intersection.x);

    info!(
        ?mode,
        reflux_ratio = inputs.reflux_ratio,
        q = feed.q,
        plates = plates.theoretical,
        feed_stage = plates.feed_stage,
        "distillation calculated"
    );

    Ok(DistillationResult {
        mode,
        reflux_ratio: inputs.reflux_ratio,
        relative_volatility: alpha,
        feed_flow: inputs.feed_flow,
        feed,
        balance,
        xd,
        xw,
        xf: compositions.xf,
        lines,
        stages,
        plates,
    })
}
