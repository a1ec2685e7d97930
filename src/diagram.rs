//! McCabe-Thiele 선도 작도용 데이터.
//! 이미지 렌더링은 하지 않고 외부 플로터가 그대로 그릴 수 있는 좌표만 만든다.

use serde::Serialize;

use crate::distillation::DistillationResult;

/// 곡선 샘플 개수 기본값 (0~1 등간격).
pub const DEFAULT_SAMPLES: usize = 100;

/// 선도 한 장에 필요한 곡선과 계단 좌표.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramData {
    pub x: Vec<f64>,
    pub equilibrium: Vec<f64>,
    pub diagonal: Vec<f64>,
    pub rectifying: Vec<f64>,
    pub stripping: Vec<f64>,
    pub feed: Vec<f64>,
    /// (xD, xD)에서 시작하는 계단 꺾은선
    pub staircase: Vec<(f64, f64)>,
}

fn linspace(samples: usize) -> Vec<f64> {
    match samples {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

fn sample(x: &[f64], f: impl Fn(f64) -> f64) -> Vec<f64> {
    x.iter().map(|&xi| f(xi)).collect()
}

impl DiagramData {
    pub fn from_result(result: &DistillationResult, samples: usize) -> Self {
        let x = linspace(samples);
        let alpha = result.relative_volatility;
        let lines = &result.lines;

        // 각 단마다 수직(평형점)과 수평(다음 단 조작선 값) 두 점을 찍는다
        let mut staircase = Vec::with_capacity(1 + 2 * result.stages.len());
        staircase.push((result.xd, result.xd));
        for stage in &result.stages {
            staircase.push((stage.x, stage.y));
            staircase.push((stage.x, lines.next_vapor(stage.x)));
        }

        Self {
            equilibrium: sample(&x, |xi| alpha.vapor(xi)),
            diagonal: x.clone(),
            rectifying: sample(&x, |xi| lines.rectifying.eval(xi)),
            stripping: sample(&x, |xi| lines.stripping.eval(xi)),
            feed: sample(&x, |xi| lines.feed.eval(xi)),
            x,
            staircase,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
