use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::distillation::ExperimentInputs;

/// 기본 설정 파일 이름.
pub const CONFIG_FILE: &str = "config.toml";

/// 실험 파일이나 대화형 입력에서 빠진 운전 조건을 채우는 기본값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentDefaults {
    pub reflux_ratio: f64,
    pub relative_volatility: f64,
    /// mol/h
    pub feed_flow: f64,
    /// °C. `None`이면 q 기본값(1.5)을 사용한다. 파일에는 0으로 기록된다.
    #[serde(with = "zero_as_none")]
    pub saturation_temp_c: Option<f64>,
    /// °C
    pub feed_temp_c: f64,
}

/// TOML에는 None이 없으므로 `None` ↔ `0.0`으로 저장한다.
mod zero_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.unwrap_or(0.0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Ok((value != 0.0).then_some(value))
    }
}

impl Default for ExperimentDefaults {
    fn default() -> Self {
        Self {
            reflux_ratio: 4.0,
            relative_volatility: 2.0,
            feed_flow: 80.0,
            saturation_temp_c: Some(30.0),
            feed_temp_c: 26.0,
        }
    }
}

impl ExperimentDefaults {
    pub fn to_inputs(&self) -> ExperimentInputs {
        ExperimentInputs {
            reflux_ratio: self.reflux_ratio,
            relative_volatility: self.relative_volatility,
            feed_flow: self.feed_flow,
            saturation_temp_c: self.saturation_temp_c,
            feed_temp_c: self.feed_temp_c,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "ko", "en" 또는 "auto"
    pub language: String,
    /// 보고서/선도 데이터 기본 저장 디렉터리
    pub output_dir: PathBuf,
    pub defaults: ExperimentDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            output_dir: PathBuf::from("results"),
            defaults: ExperimentDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        Ok(Config::from_toml_str(&content)?)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        info!(path = %path.display(), "default config created");
        Ok(cfg)
    }
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(src)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
