use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::composition::ETHANOL_WATER;
use crate::config::{Config, ConfigError};
use crate::diagram::{DiagramData, DEFAULT_SAMPLES};
use crate::distillation::{self, DistillationError, DistillationResult, TOTAL_REFLUX_THRESHOLD};
use crate::experiment::{ExperimentError, ExperimentFile};
use crate::i18n::{self, keys, Translator};
use crate::report;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 실험 파일 오류
    #[error("실험 파일 오류: {0}")]
    Experiment(#[from] ExperimentError),
    /// 정류 계산 오류
    #[error("정류 계산 오류: {0}")]
    Distillation(#[from] DistillationError),
    /// 결과 직렬화 오류
    #[error("JSON 직렬화 오류: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// 사용자 입력을 고치면 다시 시도할 수 있는 오류인지
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Experiment(_) | AppError::Distillation(_))
    }
}

/// `calc` 서브커맨드 옵션.
#[derive(Debug, Clone, Default)]
pub struct CalcOptions {
    pub input: PathBuf,
    /// 실험 파일/설정의 환류비를 덮어쓴다
    pub reflux_ratio: Option<f64>,
    pub total_reflux: bool,
    pub json: bool,
    pub report: Option<PathBuf>,
    pub diagram: Option<PathBuf>,
}

/// 실험 파일을 읽어 계산한다. `total_reflux`가 켜지면 환류비를 전환류 값으로 바꾼다.
pub fn calculate_file(
    config: &Config,
    path: &Path,
    reflux_ratio: Option<f64>,
    total_reflux: bool,
) -> Result<DistillationResult, AppError> {
    let file = ExperimentFile::load(path)?;
    let mut inputs = file.inputs(&config.defaults);
    if total_reflux {
        inputs.reflux_ratio = TOTAL_REFLUX_THRESHOLD;
    } else if let Some(r) = reflux_ratio {
        inputs.reflux_ratio = r;
    }
    let compositions = file.compositions(&ETHANOL_WATER)?;
    info!(
        path = %path.display(),
        system = %ETHANOL_WATER.label(),
        reflux_ratio = inputs.reflux_ratio,
        "experiment file loaded"
    );
    Ok(distillation::calculate(&inputs, &compositions, &ETHANOL_WATER)?)
}

/// McCabe-Thiele 선도 데이터를 JSON으로 저장한다.
pub fn write_diagram(result: &DistillationResult, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let data = DiagramData::from_result(result, DEFAULT_SAMPLES);
    fs::write(path, data.to_json()?)?;
    info!(path = %path.display(), "diagram data written");
    Ok(())
}

/// 비대화형 `calc` 명령을 실행한다.
pub fn run_calc(config: &Config, tr: &Translator, opts: &CalcOptions) -> Result<(), AppError> {
    let result = calculate_file(config, &opts.input, opts.reflux_ratio, opts.total_reflux)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", report::render(&result, tr));
    }
    if let Some(path) = &opts.report {
        report::save(&result, tr, path)?;
        eprintln!("{} {}", tr.t(keys::RESULT_SAVED), path.display());
    }
    if let Some(path) = &opts.diagram {
        write_diagram(&result, path)?;
        eprintln!("{} {}", tr.t(keys::RESULT_SAVED), path.display());
    }
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::FiniteReflux => ui_cli::handle_calculation(tr, config, false),
            MenuChoice::TotalReflux => ui_cli::handle_calculation(tr, config, true),
            MenuChoice::ExperimentFile => ui_cli::handle_experiment_file(tr, config),
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    let lang = i18n::resolve_language(None, Some(&config.language));
                    *tr = Translator::new_with_pack(&lang, None);
                }
                config.save(config_path)?;
                println!("{}", tr.t(keys::SETTINGS_SAVED));
                Ok(())
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "calculation failed");
                println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            }
            other => other?,
        }
    }
    Ok(())
}
