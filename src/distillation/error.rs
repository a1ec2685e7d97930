use thiserror::Error;

/// 정류 계산 중 발생 가능한 오류.
///
/// 모두 계산 지점에서 바로 검출되는 전제조건 위반이며, NaN/inf를 흘려보내지 않고
/// 호출자에게 타입이 있는 값으로 돌려준다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistillationError {
    /// 계산 시작 전에 걸러지는 잘못된 입력 (αm ≤ 1, 범위를 벗어난 조성·유량 등)
    #[error("잘못된 입력: {0}")]
    InvalidConfiguration(String),

    /// 전체 물질수지 연립방정식이 특이함 (xD == xW)
    #[error("물질수지 연립방정식을 풀 수 없습니다: xD = xW = {xd:.4}")]
    DegenerateBalance { xd: f64, xw: f64 },

    /// 조작선 분모가 0 (회수부 증기 유량 0 또는 R + q = 0)
    #[error("조작선을 정의할 수 없습니다: {0}")]
    DegenerateOperatingLine(&'static str),

    /// 탑정 조성이 탑저 조성 이하라 단 계산을 시작할 수 없음
    #[error("탑정 조성 xD={xd:.4}가 탑저 조성 xW={xw:.4} 이하입니다")]
    InvalidCompositionOrdering { xd: f64, xw: f64 },

    /// 반복 상한에 도달했지만 탑저 조성에 이르지 못함
    #[error("{limit}단 안에 탑저 조성에 도달하지 못했습니다 (마지막 x = {last_x:.4})")]
    StageLimitExceeded { limit: usize, last_x: f64 },
}
