use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chemeng_lab_toolbox::app::{self, AppError, CalcOptions};
use chemeng_lab_toolbox::config::{self, CONFIG_FILE};
use chemeng_lab_toolbox::i18n::{self, keys, Translator};

#[derive(Parser)]
#[command(
    name = "chemeng_lab_toolbox",
    about = "정류 실험 McCabe-Thiele 이론단수 계산기",
    version
)]
struct Cli {
    /// 로그 상세도 (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// 오류 로그만 출력
    #[arg(short, long, global = true)]
    quiet: bool,

    /// 표시 언어 (ko, en, auto)
    #[arg(long, value_name = "LANG", global = true)]
    lang: Option<String>,

    /// 설정 파일 경로
    #[arg(long, value_name = "FILE", default_value = CONFIG_FILE, global = true)]
    config: PathBuf,

    /// 생략하면 대화형 메뉴를 실행한다
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// 실험 파일(TOML)로 이론단수를 계산한다
    Calc(CalcArgs),
}

#[derive(Args)]
struct CalcArgs {
    /// 실험 기록 파일
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// 환류비 R (파일/설정 값을 덮어씀)
    #[arg(short, long, value_name = "R", conflicts_with = "total_reflux")]
    reflux: Option<f64>,

    /// 전환류(R → ∞)로 계산
    #[arg(long)]
    total_reflux: bool,

    /// 보고서 대신 JSON으로 출력
    #[arg(long)]
    json: bool,

    /// 텍스트 보고서 저장 경로
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// McCabe-Thiele 선도 데이터(JSON) 저장 경로
    #[arg(long, value_name = "FILE")]
    diagram: Option<PathBuf>,
}

impl From<CalcArgs> for CalcOptions {
    fn from(args: CalcArgs) -> Self {
        Self {
            input: args.input,
            reflux_ratio: args.reflux,
            total_reflux: args.total_reflux,
            json: args.json,
            report: args.report,
            diagram: args.diagram,
        }
    }
}

/// 프로그램의 엔트리 포인트. 로깅과 설정을 준비한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let mut cfg = match config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!(error = %err, "failed to load config");
            eprintln!("{}: {err}", Translator::new("ko").t(keys::ERROR_PREFIX));
            return ExitCode::FAILURE;
        }
    };
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(&cfg.language));
    let mut tr = Translator::new_with_pack(&lang, None);

    let result: Result<(), AppError> = match cli.command {
        Some(Command::Calc(args)) => app::run_calc(&cfg, &tr, &args.into()),
        None => app::run(&mut cfg, &cli.config, &mut tr),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = ?err, "command failed");
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(match verbose {
                0 => "warn",
                1 => "debug",
                _ => "trace",
            })
        })
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
