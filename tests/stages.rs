//! 축차 계산(이론단 스테핑) 회귀 테스트.
use approx::assert_abs_diff_eq;
use chemeng_lab_toolbox::distillation::{
    liquid_from_vapor, solve_balance, step_stages, DistillationError, OperatingLines,
    RelativeVolatility, MAX_STAGE_ITERATIONS,
};

fn lines_for(r: f64, q: f64, f: f64, xd: f64, xw: f64, xf: f64) -> OperatingLines {
    let balance = solve_balance(r, f, xd, xw, xf).expect("balance");
    OperatingLines::build(r, q, f, xf, xd, xw, &balance).expect("lines")
}

#[test]
fn saturated_liquid_feed_terminates_at_bottoms() {
    // xD=0.8, xW=0.1, xF=0.4, R=4, αm=2, q=1
    let alpha = RelativeVolatility::new(2.0).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    assert_abs_diff_eq!(lines.intersection.x, 0.4, epsilon = 1e-12);

    let stages = step_stages(0.8, 0.1, alpha, &lines).expect("stages");
    let first = stages.first().unwrap();
    assert_eq!(first.x, liquid_from_vapor(0.8, 2.0));
    assert_eq!(first.y, 0.8);
    assert!(stages.last().unwrap().x <= 0.1);
    assert!(stages.theoretical_plates() <= MAX_STAGE_ITERATIONS + 1);
    assert_eq!(stages.theoretical_plates(), 7);
    assert_abs_diff_eq!(stages.last().unwrap().x, 0.096_072_551_336_474_22, epsilon = 1e-12);
}

#[test]
fn feed_stage_counts_rectifying_stages() {
    // x: 0.667, 0.531, 0.413 | 0.325, ... (xQ = 0.4)
    let alpha = RelativeVolatility::new(2.0).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    let stages = step_stages(0.8, 0.1, alpha, &lines).unwrap();
    assert_eq!(stages.feed_stage(lines.intersection.x), 3);
    assert_eq!(stages.actual_plates(), 6);

    let summary = stages.summary(lines.intersection.x);
    assert_eq!(summary.theoretical, 7);
    assert_eq!(summary.feed_stage, 3);
}

#[test]
fn stage_on_q_point_counts_as_rectifying() {
    let alpha = RelativeVolatility::new(2.0).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    let stages = step_stages(0.8, 0.1, alpha, &lines).unwrap();
    let third = stages.stages()[2].x;
    assert_eq!(stages.feed_stage(third), 3);
    assert_eq!(stages.feed_stage(third + 1e-9), 2);
}

#[test]
fn only_the_last_stage_reaches_bottoms() {
    let alpha = RelativeVolatility::new(2.0).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    let stages = step_stages(0.8, 0.1, alpha, &lines).unwrap();
    let (last, rest) = stages.stages().split_last().unwrap();
    assert!(rest.iter().all(|s| s.x > 0.1));
    assert!(last.x <= 0.1);
}

#[test]
fn each_stage_is_an_equilibrium_pair() {
    let alpha = RelativeVolatility::new(2.0).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    for stage in &step_stages(0.8, 0.1, alpha, &lines).unwrap() {
        assert_abs_diff_eq!(alpha.vapor(stage.x), stage.y, epsilon = 1e-12);
    }
}

#[test]
fn compositions_fall_monotonically_down_the_column() {
    let alpha = RelativeVolatility::new(2.0).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    let stages = step_stages(0.8, 0.1, alpha, &lines).unwrap();
    for pair in stages.stages().windows(2) {
        assert!(pair[1].x < pair[0].x);
        assert!(pair[1].y < pair[0].y);
    }
}

#[test]
fn reversed_compositions_are_rejected_before_stepping() {
    let alpha = RelativeVolatility::new(2.0).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    let err = step_stages(0.1, 0.3, alpha, &lines).unwrap_err();
    assert_eq!(err, DistillationError::InvalidCompositionOrdering { xd: 0.1, xw: 0.3 });
    assert!(matches!(
        step_stages(0.3, 0.3, alpha, &lines),
        Err(DistillationError::InvalidCompositionOrdering { .. })
    ));
}

#[test]
fn pinched_column_reports_stage_limit() {
    // αm이 1에 가까우면 20단 안에 탑저에 닿지 못한다
    let alpha = RelativeVolatility::new(1.05).unwrap();
    let lines = lines_for(4.0, 1.0, 80.0, 0.8, 0.1, 0.4);
    match step_stages(0.8, 0.1, alpha, &lines) {
        Err(DistillationError::StageLimitExceeded { limit, last_x }) => {
            assert_eq!(limit, MAX_STAGE_ITERATIONS);
            assert!(last_x > 0.1);
        }
        other => panic!("expected stage limit, got {other:?}"),
    }
}
