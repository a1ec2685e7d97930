//! TOML 실험 기록 파일.
//!
//! ```toml
//! [parameters]          # 생략한 항목은 config.toml 기본값을 쓴다
//! reflux_ratio = 4.0
//!
//! [readings]            # 20 °C 알코올 도수 (% v/v)
//! distillate_total_reflux = 90.0
//! bottoms_total_reflux = 10.0
//! distillate = 85.0
//! bottoms = 20.0
//! feed = 40.0
//! ```
//!
//! `[readings]` 대신 몰분율을 바로 적은 `[compositions]`를 쓸 수 있다.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::composition::{BinarySystem, MeasuredCompositions, RawReadings};
use crate::config::ExperimentDefaults;
use crate::distillation::{DistillationError, ExperimentInputs};

/// 실험 파일 처리 오류.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("실험 파일 {}을(를) 읽을 수 없습니다: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("실험 파일 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("[readings] 또는 [compositions] 중 하나가 필요합니다")]
    MissingData,
    #[error("[readings]와 [compositions]를 동시에 지정할 수 없습니다")]
    AmbiguousData,
    #[error(transparent)]
    Distillation(#[from] DistillationError),
}

/// 파일에서 덮어쓰는 운전 조건. 빠진 항목은 기본값으로 채운다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterOverrides {
    pub reflux_ratio: Option<f64>,
    pub relative_volatility: Option<f64>,
    pub feed_flow: Option<f64>,
    pub saturation_temp_c: Option<f64>,
    pub feed_temp_c: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentFile {
    #[serde(default)]
    pub parameters: ParameterOverrides,
    pub readings: Option<RawReadings>,
    pub compositions: Option<MeasuredCompositions>,
}

impl ExperimentFile {
    pub fn load(path: &Path) -> Result<Self, ExperimentError> {
        let content = fs::read_to_string(path).map_err(|source| ExperimentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ExperimentError> {
        Ok(toml::from_str(src)?)
    }

    /// 파일 값 → 기본값 순으로 운전 조건을 채운다.
    pub fn inputs(&self, defaults: &ExperimentDefaults) -> ExperimentInputs {
        let p = &self.parameters;
        ExperimentInputs {
            reflux_ratio: p.reflux_ratio.unwrap_or(defaults.reflux_ratio),
            relative_volatility: p.relative_volatility.unwrap_or(defaults.relative_volatility),
            feed_flow: p.feed_flow.unwrap_or(defaults.feed_flow),
            saturation_temp_c: p.saturation_temp_c.or(defaults.saturation_temp_c),
            feed_temp_c: p.feed_temp_c.unwrap_or(defaults.feed_temp_c),
        }
    }

    /// 측정 조성을 돌려준다. 도수로 적혀 있으면 몰분율로 환산한다.
    pub fn compositions(
        &self,
        system: &BinarySystem,
    ) -> Result<MeasuredCompositions, ExperimentError> {
        match (&self.readings, &self.compositions) {
            (Some(readings), None) => Ok(readings.to_compositions(system)?),
            (None, Some(compositions)) => Ok(*compositions),
            (Some(_), Some(_)) => Err(ExperimentError::AmbiguousData),
            (None, None) => Err(ExperimentError::MissingData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::ETHANOL_WATER;

    const READINGS_FILE: &str = r#"
[parameters]
reflux_ratio = 2.0

[readings]
distillate_total_reflux = 90.0
bottoms_total_reflux = 10.0
distillate = 85.0
bottoms = 20.0
feed = 40.0
"#;

    #[test]
    fn missing_parameters_fall_back_to_defaults() {
        let file = ExperimentFile::from_toml_str(READINGS_FILE).unwrap();
        let inputs = file.inputs(&ExperimentDefaults::default());
        assert_eq!(inputs.reflux_ratio, 2.0);
        assert_eq!(inputs.feed_flow, 80.0);
        assert_eq!(inputs.saturation_temp_c, Some(30.0));
    }

    #[test]
    fn readings_are_converted_to_mole_fractions() {
        let file = ExperimentFile::from_toml_str(READINGS_FILE).unwrap();
        let c = file.compositions(&ETHANOL_WATER).unwrap();
        assert_eq!(c.xd_total, ETHANOL_WATER.mole_fraction_from_volume_percent(90.0));
        assert!(c.xd > c.xf && c.xf > c.xw);
    }

    #[test]
    fn file_without_data_is_rejected() {
        let file = ExperimentFile::from_toml_str("[parameters]\nfeed_flow = 60.0\n").unwrap();
        assert!(matches!(
            file.compositions(&ETHANOL_WATER),
            Err(ExperimentError::MissingData)
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ExperimentFile::from_toml_str("[parameters]\nreflux = 4.0\n").is_err());
    }
}
