use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::app::{self, AppError};
use crate::composition::{RawReadings, ETHANOL_WATER};
use crate::config::{Config, ExperimentDefaults};
use crate::distillation::{self, TOTAL_REFLUX_THRESHOLD};
use crate::i18n::{keys, Translator};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FiniteReflux,
    TotalReflux,
    ExperimentFile,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_FINITE_REFLUX));
    println!("{}", tr.t(keys::MAIN_MENU_TOTAL_REFLUX));
    println!("{}", tr.t(keys::MAIN_MENU_EXPERIMENT_FILE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::FiniteReflux),
            "2" => return Ok(MenuChoice::TotalReflux),
            "3" => return Ok(MenuChoice::ExperimentFile),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 측정 도수와 운전 조건을 입력받아 이론단수를 계산한다.
pub fn handle_calculation(tr: &Translator, cfg: &Config, total_reflux: bool) -> Result<(), AppError> {
    println!("{}", tr.t(keys::CALC_HEADING));
    println!("{}", tr.t(keys::CALC_READINGS_NOTE));
    let readings = RawReadings {
        distillate_total_reflux: read_f64(tr, keys::PROMPT_READING_DISTILLATE_TOTAL)?,
        bottoms_total_reflux: read_f64(tr, keys::PROMPT_READING_BOTTOMS_TOTAL)?,
        distillate: read_f64(tr, keys::PROMPT_READING_DISTILLATE)?,
        bottoms: read_f64(tr, keys::PROMPT_READING_BOTTOMS)?,
        feed: read_f64(tr, keys::PROMPT_READING_FEED)?,
    };

    let mut inputs = read_conditions(tr, &cfg.defaults, !total_reflux)?.to_inputs();
    if total_reflux {
        inputs.reflux_ratio = TOTAL_REFLUX_THRESHOLD;
    }

    let compositions = readings.to_compositions(&ETHANOL_WATER)?;
    let result = distillation::calculate(&inputs, &compositions, &ETHANOL_WATER)?;
    println!("\n{}", report::render(&result, tr));

    let path = read_line(&tr.t(keys::PROMPT_REPORT_PATH))?;
    if !path.trim().is_empty() {
        let path = Path::new(path.trim());
        report::save(&result, tr, path)?;
        println!("{} {}", tr.t(keys::RESULT_SAVED), path.display());
    }
    Ok(())
}

/// 실험 파일 경로를 입력받아 계산한다.
pub fn handle_experiment_file(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    let path = read_line(&tr.t(keys::PROMPT_EXPERIMENT_FILE))?;
    let path = Path::new(path.trim());
    let result = app::calculate_file(cfg, path, None, false)?;
    println!("\n{}", report::render(&result, tr));

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "distillation".to_string());
    let report_path = cfg.output_dir.join(format!("{stem}_results.txt"));
    report::save(&result, tr, &report_path)?;
    app::write_diagram(&result, &cfg.output_dir.join(format!("{stem}_diagram.json")))?;
    println!("{} {}", tr.t(keys::RESULT_SAVED), cfg.output_dir.display());
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌었으면 true를 돌려준다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {:?} / lang={}", tr.t(keys::SETTINGS_CURRENT), cfg.defaults, cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => Ok(false),
        "1" => {
            cfg.defaults = read_conditions(tr, &cfg.defaults, true)?;
            Ok(false)
        }
        "2" => {
            let lang = read_line("ko / en / auto: ")?;
            match lang.trim() {
                code @ ("ko" | "en" | "auto") => {
                    cfg.language = code.to_string();
                    Ok(true)
                }
                _ => {
                    println!("{}", tr.t(keys::SETTINGS_INVALID));
                    Ok(false)
                }
            }
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            Ok(false)
        }
    }
}

/// 운전 조건을 입력받는다. 빈 입력은 기본값을 유지한다.
fn read_conditions(
    tr: &Translator,
    defaults: &ExperimentDefaults,
    ask_reflux: bool,
) -> Result<ExperimentDefaults, AppError> {
    let reflux_ratio = if ask_reflux {
        read_f64_or(tr, keys::PROMPT_REFLUX_RATIO, defaults.reflux_ratio)?
    } else {
        defaults.reflux_ratio
    };
    let saturation = read_f64_or(
        tr,
        keys::PROMPT_SATURATION_TEMP,
        defaults.saturation_temp_c.unwrap_or(0.0),
    )?;
    Ok(ExperimentDefaults {
        reflux_ratio,
        relative_volatility: read_f64_or(
            tr,
            keys::PROMPT_RELATIVE_VOLATILITY,
            defaults.relative_volatility,
        )?,
        feed_flow: read_f64_or(tr, keys::PROMPT_FEED_FLOW, defaults.feed_flow)?,
        saturation_temp_c: (saturation != 0.0).then_some(saturation),
        feed_temp_c: read_f64_or(tr, keys::PROMPT_FEED_TEMP, defaults.feed_temp_c)?,
    })
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    read_line_from(&mut io::stdin().lock())
}

/// 한 줄을 읽는다. 입력이 닫혔으면 `UnexpectedEof`로 끝낸다.
fn read_line_from(reader: &mut impl BufRead) -> Result<String, AppError> {
    let mut buf = String::new();
    if reader.read_line(&mut buf)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "입력이 닫혔습니다").into());
    }
    Ok(buf)
}

fn read_f64(tr: &Translator, key: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(&tr.t(key))?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64_or(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{}[{default}] ", tr.t(key)))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_input_is_an_error() {
        let mut empty: &[u8] = b"";
        match read_line_from(&mut empty) {
            Err(AppError::Io(err)) => assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected EOF error, got {other:?}"),
        }
    }

    #[test]
    fn lines_are_read_one_at_a_time() {
        let mut input: &[u8] = b"4.0\n\n";
        assert_eq!(read_line_from(&mut input).unwrap(), "4.0\n");
        assert_eq!(read_line_from(&mut input).unwrap(), "\n");
        assert!(read_line_from(&mut input).is_err());
    }
}
