use serde::Serialize;
use tracing::{debug, warn};

use super::equilibrium::RelativeVolatility;
use super::error::DistillationError;
use super::operating::OperatingLines;

/// 축차 계산 반복 상한. 이 안에 탑저 조성에 이르지 못하면 오류로 보고한다.
pub const MAX_STAGE_ITERATIONS: usize = 20;

/// 이론단 하나의 평형 조성 (x_n, y_n).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stage {
    /// 액상 몰분율
    pub x: f64,
    /// 기상 몰분율
    pub y: f64,
}

/// 탑정(0단)부터 아래로 정렬된 이론단 목록.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StageSequence(Vec<Stage>);

impl StageSequence {
    pub fn stages(&self) -> &[Stage] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stage> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&Stage> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&Stage> {
        self.0.last()
    }

    /// 이론단수 NT (재비기 포함).
    pub fn theoretical_plates(&self) -> usize {
        self.0.len()
    }

    /// 실제 단수 NT − 1 (재비기 제외).
    pub fn actual_plates(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// 원료 공급 위치. 정류부(x ≥ xQ)에 속한 단의 개수로 센다.
    pub fn feed_stage(&self, xq: f64) -> usize {
        self.0.iter().filter(|stage| stage.x >= xq).count()
    }

    pub fn summary(&self, xq: f64) -> PlateSummary {
        PlateSummary {
            theoretical: self.theoretical_plates(),
            actual: self.actual_plates(),
            feed_stage: self.feed_stage(xq),
        }
    }
}

/// 보고서와 JSON 출력에 싣는 단수 요약.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlateSummary {
    /// 이론단수 NT
    pub theoretical: usize,
    /// 실제 단수 NT − 1
    pub actual: usize,
    /// 원료 공급단
    pub feed_stage: usize,
}

impl<'a> IntoIterator for &'a StageSequence {
    type Item = &'a Stage;
    type IntoIter = std::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// 탑정 조성 xD에서 시작해 평형선과 조작선을 번갈아 적용하며 이론단을 센다.
///
/// 루프 조건은 직전 기상 조성의 평형 액상 조성이 xW보다 큰지만 본다.
/// 루프가 끝난 뒤 마지막 단을 한 번 더 기록하므로 마지막 x는 xW 이하이고
/// NT = 반복 횟수 + 1 이다.
pub fn step_stages(
    xd: f64,
    xw: f64,
    alpha: RelativeVolatility,
    lines: &OperatingLines,
) -> Result<StageSequence, DistillationError> {
    if xd <= xw {
        return Err(DistillationError::InvalidCompositionOrdering { xd, xw });
    }

    let mut stages = Vec::new();
    let mut y = xd;
    let mut iterations = 0;

    while alpha.liquid(y) > xw && iterations < MAX_STAGE_ITERATIONS {
        iterations += 1;
        let x = alpha.liquid(y);
        stages.push(Stage { x, y });
        let section = lines.section(x);
        y = lines.next_vapor(x);
        debug!(stage = stages.len() - 1, x, ?section, next_y = y, "stage stepped");
    }

    let x = alpha.liquid(y);
    if x > xw {
        warn!(limit = MAX_STAGE_ITERATIONS, last_x = x, xw, "stage limit reached");
        return Err(DistillationError::StageLimitExceeded {
            limit: MAX_STAGE_ITERATIONS,
            last_x: x,
        });
    }
    stages.push(Stage { x, y });

    Ok(StageSequence(stages))
}
