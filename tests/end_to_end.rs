//! 실험 조건 → 이론단수까지 전체 계산 회귀 테스트.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use chemeng_lab_toolbox::composition::{MeasuredCompositions, ETHANOL_WATER};
use chemeng_lab_toolbox::diagram::{DiagramData, DEFAULT_SAMPLES};
use chemeng_lab_toolbox::distillation::{
    calculate, solve_balance, DistillationError, ExperimentInputs, LiquidFlow, RefluxMode,
    TOTAL_REFLUX_THRESHOLD,
};
use chemeng_lab_toolbox::experiment::ExperimentFile;
use chemeng_lab_toolbox::config::ExperimentDefaults;
use chemeng_lab_toolbox::i18n::Translator;
use chemeng_lab_toolbox::report;

fn lab_inputs(reflux_ratio: f64) -> ExperimentInputs {
    ExperimentInputs {
        reflux_ratio,
        relative_volatility: 2.0,
        feed_flow: 80.0,
        saturation_temp_c: Some(30.0),
        feed_temp_c: 26.0,
    }
}

fn lab_compositions() -> MeasuredCompositions {
    MeasuredCompositions {
        xd_total: 0.8,
        xw_total: 0.05,
        xd: 0.72,
        xw: 0.08,
        xf: 0.35,
    }
}

#[test]
fn finite_reflux_lab_run() {
    let res = calculate(&lab_inputs(4.0), &lab_compositions(), &ETHANOL_WATER).expect("calc");

    assert_eq!(res.mode, RefluxMode::Finite);
    // cpm = 78901.8, rm = 40522 → q = (cpm·4 + rm)/rm
    assert_relative_eq!(res.feed.q, 8.788_539_558_758_206, max_relative = 1e-12);
    assert_relative_eq!(res.balance.distillate, 33.75, max_relative = 1e-12);
    assert_relative_eq!(res.balance.bottoms, 46.25, max_relative = 1e-12);
    assert_eq!(res.balance.liquid, LiquidFlow::Finite(4.0 * res.balance.distillate));

    let q_point = res.lines.intersection;
    assert!(q_point.x > 0.0 && q_point.x < 1.0);
    assert_relative_eq!(q_point.x, 0.575_339_228_416_193, max_relative = 1e-12);
    assert_relative_eq!(q_point.y, 0.604_271_382_732_954_3, max_relative = 1e-12);

    assert_eq!(res.theoretical_plates(), 6);
    let xs: Vec<f64> = res.stages.iter().map(|s| s.x).collect();
    let expected = [
        0.5625,
        0.419_126_362_914_222_8,
        0.281_176_071_366_722_5,
        0.171_595_728_610_552_97,
        0.097_060_040_660_241_51,
        0.051_555_946_037_109_74,
    ];
    for (got, want) in xs.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
    }
}

#[test]
fn missing_saturation_temp_uses_default_q() {
    let mut inputs = lab_inputs(4.0);
    inputs.saturation_temp_c = None;
    let res = calculate(&inputs, &lab_compositions(), &ETHANOL_WATER).unwrap();
    assert_eq!(res.feed.q, 1.5);
    assert_eq!(res.theoretical_plates(), 7);
}

#[test]
fn total_reflux_steps_on_the_diagonal() {
    let res = calculate(
        &lab_inputs(TOTAL_REFLUX_THRESHOLD),
        &lab_compositions(),
        &ETHANOL_WATER,
    )
    .unwrap();

    assert_eq!(res.mode, RefluxMode::Total);
    assert_eq!(res.balance.distillate, 0.0);
    assert_eq!(res.balance.bottoms, 80.0);
    assert_eq!(res.balance.liquid, LiquidFlow::Unbounded);
    assert_eq!(res.xd, 0.8);
    assert_eq!(res.xw, 0.05);

    // αm = 2 이면 단마다 x/(1−x)가 절반이 된다
    let ratios: Vec<f64> = res.stages.iter().map(|s| s.x / (1.0 - s.x)).collect();
    assert_abs_diff_eq!(ratios[0], 2.0, epsilon = 1e-12);
    for pair in ratios.windows(2) {
        assert_relative_eq!(pair[1], pair[0] / 2.0, max_relative = 1e-9);
    }
    assert_eq!(res.theoretical_plates(), 7);
}

#[test]
fn total_reflux_sentinel_splits_flow_exactly() {
    let b = solve_balance(10_000.0, 80.0, 0.72, 0.08, 0.35).unwrap();
    assert_eq!(b.distillate, 0.0);
    assert_eq!(b.bottoms, 80.0);
}

#[test]
fn solved_balance_closes() {
    let cases = [
        (4.0, 80.0, 0.72, 0.08, 0.35),
        (1.5, 100.0, 0.95, 0.02, 0.4),
        (9_999.0, 12.5, 0.6, 0.3, 0.31),
    ];
    for (r, f, xd, xw, xf) in cases {
        let b = solve_balance(r, f, xd, xw, xf).unwrap();
        assert_relative_eq!(b.distillate + b.bottoms, f, max_relative = 1e-10);
        assert_relative_eq!(
            b.distillate * xd + b.bottoms * xw,
            f * xf,
            max_relative = 1e-10
        );
    }
}

#[test]
fn equal_distillate_and_bottoms_is_degenerate() {
    let mut c = lab_compositions();
    c.xw = c.xd;
    let err = calculate(&lab_inputs(4.0), &c, &ETHANOL_WATER).unwrap_err();
    assert!(matches!(err, DistillationError::DegenerateBalance { .. }));
}

#[test]
fn reversed_compositions_fail_ordering_check() {
    let mut c = lab_compositions();
    c.xd = 0.08;
    c.xw = 0.72;
    let err = calculate(&lab_inputs(4.0), &c, &ETHANOL_WATER).unwrap_err();
    assert!(matches!(err, DistillationError::InvalidCompositionOrdering { .. }));
}

#[test]
fn alpha_of_one_is_invalid_configuration() {
    let mut inputs = lab_inputs(4.0);
    inputs.relative_volatility = 1.0;
    let err = calculate(&inputs, &lab_compositions(), &ETHANOL_WATER).unwrap_err();
    assert!(matches!(err, DistillationError::InvalidConfiguration(_)));
}

#[test]
fn non_positive_feed_is_invalid_configuration() {
    let mut inputs = lab_inputs(4.0);
    inputs.feed_flow = 0.0;
    assert!(matches!(
        calculate(&inputs, &lab_compositions(), &ETHANOL_WATER),
        Err(DistillationError::InvalidConfiguration(_))
    ));
}

#[test]
fn report_lists_every_stage_and_total() {
    let res = calculate(&lab_inputs(4.0), &lab_compositions(), &ETHANOL_WATER).unwrap();
    let text = report::render(&res, &Translator::new("en"));
    assert!(text.contains("xQ: 0.5753"));
    assert!(text.contains("Stage 0: xn = 0.5625, yn = 0.7200"));
    assert!(text.contains("Stage 5:"));
    assert!(!text.contains("Stage 6:"));
    assert!(text.contains("Theoretical plates (including reboiler): 6\n"));
    assert!(text.contains("Actual plates: 5\n"));
    assert!(text.ends_with("Feed location: stage 0"));

    let ko = report::render(&res, &Translator::new("ko"));
    assert!(ko.contains("제0단: xn = 0.5625"));
    assert!(ko.ends_with("원료 공급 위치: 제0단"));
}

#[test]
fn subcooled_feed_pushes_q_point_above_first_stage() {
    // xQ = 0.5753 > x0 = 0.5625: 정류부에 속한 단이 없다
    let res = calculate(&lab_inputs(4.0), &lab_compositions(), &ETHANOL_WATER).unwrap();
    assert_eq!(res.actual_plates(), 5);
    assert_eq!(res.feed_stage(), 0);

    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(json["plates"]["theoretical"], 6);
    assert_eq!(json["plates"]["actual"], 5);
    assert_eq!(json["plates"]["feed_stage"], 0);
}

#[test]
fn diagram_staircase_follows_stages() {
    let res = calculate(&lab_inputs(4.0), &lab_compositions(), &ETHANOL_WATER).unwrap();
    let data = DiagramData::from_result(&res, DEFAULT_SAMPLES);
    assert_eq!(data.x.len(), DEFAULT_SAMPLES);
    assert_eq!(data.staircase[0], (0.72, 0.72));
    assert_eq!(data.staircase.len(), 1 + 2 * res.theoretical_plates());
    assert_eq!(data.staircase[1], (0.5625, 0.72));
    assert!(data.to_json().unwrap().contains("\"staircase\""));
}

#[test]
fn experiment_file_with_readings_runs_end_to_end() {
    let file = ExperimentFile::from_toml_str(
        r#"
[parameters]
reflux_ratio = 4.0
relative_volatility = 2.0

[readings]
distillate_total_reflux = 90.0
bottoms_total_reflux = 10.0
distillate = 85.0
bottoms = 20.0
feed = 40.0
"#,
    )
    .unwrap();
    let inputs = file.inputs(&ExperimentDefaults::default());
    let compositions = file.compositions(&ETHANOL_WATER).unwrap();
    let res = calculate(&inputs, &compositions, &ETHANOL_WATER).unwrap();

    assert!(res.theoretical_plates() >= 2);
    assert!(res.stages.last().unwrap().x <= compositions.xw);
    let json = serde_json::to_value(&res).unwrap();
    assert_eq!(json["mode"], "Finite");
    assert_eq!(json["stages"].as_array().unwrap().len(), res.theoretical_plates());
}
