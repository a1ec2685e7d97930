//! 기액평형 관계의 가역성·단조성 검사.
use approx::assert_abs_diff_eq;
use chemeng_lab_toolbox::distillation::{liquid_from_vapor, vapor_from_liquid, RelativeVolatility};

#[test]
fn inverse_recovers_liquid_composition() {
    for alpha in [1.05, 1.5, 2.0, 3.7, 10.0] {
        for i in 0..=50 {
            let x = i as f64 / 50.0;
            let back = liquid_from_vapor(vapor_from_liquid(x, alpha), alpha);
            assert_abs_diff_eq!(back, x, epsilon = 1e-9);
        }
    }
}

#[test]
fn vapor_composition_strictly_increases() {
    let alpha = RelativeVolatility::new(2.0).expect("alpha");
    let mut prev = alpha.vapor(0.0);
    for i in 1..=100 {
        let y = alpha.vapor(i as f64 / 100.0);
        assert!(y > prev, "not increasing at x={}", i as f64 / 100.0);
        prev = y;
    }
}

#[test]
fn vapor_is_richer_than_liquid_inside_the_interval() {
    let alpha = RelativeVolatility::new(2.0).expect("alpha");
    assert!(alpha.vapor(0.3) > 0.3);
    assert!(alpha.liquid(0.3) < 0.3);
}
