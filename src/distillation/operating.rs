use serde::Serialize;

use super::balance::{LiquidFlow, MaterialBalance};
use super::error::DistillationError;

/// y = slope·x + intercept 형태의 직선.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AffineLine {
    pub slope: f64,
    pub intercept: f64,
}

impl AffineLine {
    /// 대각선 y = x
    pub const DIAGONAL: AffineLine = AffineLine {
        slope: 1.0,
        intercept: 0.0,
    };

    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// 정류부 조작선 `y = R/(R+1)·x + xD/(R+1)`.
pub fn rectifying_line(reflux_ratio: f64, xd: f64) -> AffineLine {
    AffineLine {
        slope: reflux_ratio / (reflux_ratio + 1.0),
        intercept: xd / (reflux_ratio + 1.0),
    }
}

/// 회수부 조작선. 분자 = L + q·F, 분모 = 분자 − W.
pub fn stripping_line(
    liquid: f64,
    feed_flow: f64,
    q: f64,
    bottoms: f64,
    xw: f64,
) -> Result<AffineLine, DistillationError> {
    let numerator = liquid + q * feed_flow;
    let denominator = numerator - bottoms;
    if denominator == 0.0 {
        return Err(DistillationError::DegenerateOperatingLine(
            "회수부 증기 유량이 0입니다",
        ));
    }
    Ok(AffineLine {
        slope: numerator / denominator,
        intercept: -(bottoms * xw) / denominator,
    })
}

/// q선(원료선).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "line", rename_all = "snake_case")]
pub enum FeedLine {
    /// q == 1: 수직선이지만 작도/교점 계산에서는 y = x 로 다룬다
    Diagonal,
    Sloped(AffineLine),
}

impl FeedLine {
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            FeedLine::Diagonal => x,
            FeedLine::Sloped(line) => line.eval(x),
        }
    }
}

/// q선 `y = q/(q−1)·x − xF/(q−1)`. q == 1이면 [`FeedLine::Diagonal`].
pub fn feed_line(q: f64, xf: f64) -> FeedLine {
    if q == 1.0 {
        FeedLine::Diagonal
    } else {
        FeedLine::Sloped(AffineLine {
            slope: q / (q - 1.0),
            intercept: -xf / (q - 1.0),
        })
    }
}

/// 두 조작선(및 q선)의 교점 Q.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QPoint {
    pub x: f64,
    pub y: f64,
}

/// 교점 Q 좌표를 구한다.
pub fn intersection(
    reflux_ratio: f64,
    q: f64,
    xf: f64,
    xd: f64,
) -> Result<QPoint, DistillationError> {
    let denominator = reflux_ratio + q;
    if denominator == 0.0 {
        return Err(DistillationError::DegenerateOperatingLine("R + q = 0 입니다"));
    }
    Ok(QPoint {
        x: ((reflux_ratio + 1.0) * xf + (q - 1.0) * xd) / denominator,
        y: (reflux_ratio * xf + q * xd) / denominator,
    })
}

/// 단 계산에 쓰이는 탑 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Rectifying,
    Stripping,
}

/// 정류부·회수부 조작선, q선, 교점을 한 번에 묶은 집합.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OperatingLines {
    pub rectifying: AffineLine,
    pub stripping: AffineLine,
    pub feed: FeedLine,
    pub intersection: QPoint,
}

impl OperatingLines {
    /// 물질수지 결과로부터 조작선 집합을 만든다.
    ///
    /// 전환류(L 발산)에서는 두 조작선 모두 대각선이 된다.
    pub fn build(
        reflux_ratio: f64,
        q: f64,
        feed_flow: f64,
        xf: f64,
        xd: f64,
        xw: f64,
        balance: &MaterialBalance,
    ) -> Result<Self, DistillationError> {
        let intersection = intersection(reflux_ratio, q, xf, xd)?;
        let (rectifying, stripping) = match balance.liquid {
            LiquidFlow::Finite(liquid) => (
                rectifying_line(reflux_ratio, xd),
                stripping_line(liquid, feed_flow, q, balance.bottoms, xw)?,
            ),
            LiquidFlow::Unbounded => (AffineLine::DIAGONAL, AffineLine::DIAGONAL),
        };
        Ok(Self {
            rectifying,
            stripping,
            feed: feed_line(q, xf),
            intersection,
        })
    }

    /// 액상 조성 x가 속한 구간. x == xQ 는 정류부로 본다.
    pub fn section(&self, x: f64) -> Section {
        if x >= self.intersection.x {
            Section::Rectifying
        } else {
            Section::Stripping
        }
    }

    /// 다음 단의 기상 조성을 해당 구간 조작선으로 구한다.
    pub fn next_vapor(&self, x: f64) -> f64 {
        match self.section(x) {
            Section::Rectifying => self.rectifying.eval(x),
            Section::Stripping => self.stripping.eval(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn rectifying_line_passes_through_distillate_point() {
        let line = rectifying_line(4.0, 0.8);
        assert_abs_diff_eq!(line.eval(0.8), 0.8, epsilon = 1e-12);
    }

    #[test]
    fn stripping_line_passes_through_bottoms_point() {
        let line = stripping_line(137.0, 80.0, 1.0, 45.0, 0.1).unwrap();
        assert_abs_diff_eq!(line.eval(0.1), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn zero_vapor_in_stripping_section_is_rejected() {
        let err = stripping_line(0.0, 80.0, 1.0, 80.0, 0.1).unwrap_err();
        assert!(matches!(err, DistillationError::DegenerateOperatingLine(_)));
    }

    #[test]
    fn saturated_liquid_feed_line_is_diagonal() {
        assert_eq!(feed_line(1.0, 0.4), FeedLine::Diagonal);
        assert_eq!(feed_line(1.0, 0.4).eval(0.3), 0.3);
    }

    #[test]
    fn feed_line_passes_through_feed_point() {
        let line = feed_line(1.5, 0.35);
        assert_abs_diff_eq!(line.eval(0.35), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn intersection_lies_on_all_three_lines() {
        let (r, q, xf, xd) = (4.0, 1.5, 0.35, 0.72);
        let p = intersection(r, q, xf, xd).unwrap();
        assert_abs_diff_eq!(rectifying_line(r, xd).eval(p.x), p.y, epsilon = 1e-12);
        assert_abs_diff_eq!(feed_line(q, xf).eval(p.x), p.y, epsilon = 1e-12);
    }

    #[test]
    fn intersection_requires_nonzero_r_plus_q() {
        assert!(intersection(1.0, -1.0, 0.4, 0.8).is_err());
    }

    #[test]
    fn tie_at_q_point_goes_to_rectifying_section() {
        let lines = OperatingLines {
            rectifying: AffineLine::DIAGONAL,
            stripping: AffineLine::DIAGONAL,
            feed: FeedLine::Diagonal,
            intersection: QPoint { x: 0.4, y: 0.48 },
        };
        assert_eq!(lines.section(0.4), Section::Rectifying);
        assert_eq!(lines.section(0.399_999), Section::Stripping);
    }
}
