//! 계산 결과를 사람이 읽는 텍스트 보고서로 만든다.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::distillation::{DistillationResult, LiquidFlow, RefluxMode};
use crate::i18n::{keys, Translator};

/// 요약, Q점 좌표, 각 이론단 조성, 단수(이론/실제/원료 공급단) 순으로 보고서를 만든다.
pub fn render(result: &DistillationResult, tr: &Translator) -> String {
    let mut out = String::new();

    // String에 대한 write!는 실패하지 않는다
    let _ = writeln!(out, "=== {} ===", tr.t(keys::REPORT_TITLE));
    match result.mode {
        RefluxMode::Finite => {
            let _ = writeln!(out, "{}: {}", tr.t(keys::REPORT_REFLUX_RATIO), result.reflux_ratio);
        }
        RefluxMode::Total => {
            let _ = writeln!(
                out,
                "{}: {} ({})",
                tr.t(keys::REPORT_REFLUX_RATIO),
                result.reflux_ratio,
                tr.t(keys::REPORT_TOTAL_REFLUX)
            );
        }
    }
    let _ = writeln!(out, "{}: {:.3}", tr.t(keys::REPORT_FEED_QUALITY), result.feed.q);
    let _ = writeln!(out, "{}: {:.4}", tr.t(keys::REPORT_DISTILLATE_COMPOSITION), result.xd);
    let _ = writeln!(out, "{}: {:.4}", tr.t(keys::REPORT_BOTTOMS_COMPOSITION), result.xw);
    let _ = writeln!(
        out,
        "{}: {:.2} mol/h",
        tr.t(keys::REPORT_DISTILLATE_FLOW),
        result.balance.distillate
    );
    let _ = writeln!(
        out,
        "{}: {:.2} mol/h",
        tr.t(keys::REPORT_BOTTOMS_FLOW),
        result.balance.bottoms
    );
    match result.balance.liquid {
        LiquidFlow::Finite(l) => {
            let _ = writeln!(out, "{}: {:.2} mol/h", tr.t(keys::REPORT_LIQUID_FLOW), l);
        }
        LiquidFlow::Unbounded => {
            let _ = writeln!(
                out,
                "{}: {}",
                tr.t(keys::REPORT_LIQUID_FLOW),
                tr.t(keys::REPORT_LIQUID_UNBOUNDED)
            );
        }
    }

    let q_point = result.lines.intersection;
    let _ = writeln!(out, "\n{}", tr.t(keys::REPORT_Q_POINT_HEADING));
    let _ = writeln!(out, "xQ: {:.4}", q_point.x);
    let _ = writeln!(out, "yQ: {:.4}", q_point.y);

    let _ = writeln!(out, "\n{}", tr.t(keys::REPORT_STAGES_HEADING));
    let stage_label = tr.t(keys::REPORT_STAGE_LINE);
    for (i, stage) in result.stages.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}: xn = {:.4}, yn = {:.4}",
            stage_label.replace("{n}", &i.to_string()),
            stage.x,
            stage.y
        );
    }

    let _ = writeln!(
        out,
        "\n{}: {}",
        tr.t(keys::REPORT_PLATES_TOTAL),
        result.theoretical_plates()
    );
    let _ = writeln!(out, "{}: {}", tr.t(keys::REPORT_ACTUAL_PLATES), result.actual_plates());
    let _ = write!(
        out,
        "{}",
        tr.t(keys::REPORT_FEED_STAGE).replace("{n}", &result.feed_stage().to_string())
    );
    out
}

/// 보고서를 파일로 저장한다. 상위 디렉터리가 없으면 만든다.
pub fn save(result: &DistillationResult, tr: &Translator, path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render(result, tr))?;
    info!(path = %path.display(), "report written");
    Ok(())
}
