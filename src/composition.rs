//! 에탄올-물 2성분계 물성 상수와 알코올 도수 → 몰분율 환산.

use serde::{Deserialize, Serialize};

use crate::distillation::DistillationError;

/// 2성분계를 이루는 순성분 하나의 물성.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Component {
    pub name: &'static str,
    /// 밀도 (g/mL)
    pub density_g_per_ml: f64,
    /// 비열 (실험 지도서 값 그대로, J/(kg·°C))
    pub heat_capacity: f64,
    /// 증발잠열 (kJ/kg)
    pub latent_heat: f64,
    /// 몰질량 (g/mol)
    pub molar_mass: f64,
}

/// 경성분(light)과 중성분(heavy), 원료 조성 가정값을 묶은 계.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinarySystem {
    pub light: Component,
    pub heavy: Component,
    /// cpm, rm 계산에 쓰는 원료 중 경성분 몰분율 가정값
    pub assumed_feed_light_fraction: f64,
}

pub const ETHANOL: Component = Component {
    name: "ethanol",
    density_g_per_ml: 0.789,
    heat_capacity: 2.4e3,
    latent_heat: 850.0,
    molar_mass: 46.0,
};

pub const WATER: Component = Component {
    name: "water",
    density_g_per_ml: 1.0,
    heat_capacity: 4.189e3,
    latent_heat: 2260.0,
    molar_mass: 18.0,
};

/// 실험에서 쓰는 에탄올-물 계. 원료는 에탄올 0.1, 물 0.9로 가정한다.
pub const ETHANOL_WATER: BinarySystem = BinarySystem {
    light: ETHANOL,
    heavy: WATER,
    assumed_feed_light_fraction: 0.1,
};

impl Default for BinarySystem {
    fn default() -> Self {
        ETHANOL_WATER
    }
}

impl BinarySystem {
    /// "ethanol-water" 형식의 계 이름
    pub fn label(&self) -> String {
        format!("{}-{}", self.light.name, self.heavy.name)
    }

    fn fractions(&self) -> (f64, f64) {
        let xa = self.assumed_feed_light_fraction;
        (xa, 1.0 - xa)
    }

    /// 원료 평균 몰비열 cpm = Σ xi·ci·Mi
    pub fn mean_heat_capacity(&self) -> f64 {
        let (xa, xb) = self.fractions();
        xa * self.light.heat_capacity * self.light.molar_mass
            + xb * self.heavy.heat_capacity * self.heavy.molar_mass
    }

    /// 원료 평균 몰증발잠열 rm = Σ xi·ri·Mi
    pub fn mean_latent_heat(&self) -> f64 {
        let (xa, xb) = self.fractions();
        xa * self.light.latent_heat * self.light.molar_mass
            + xb * self.heavy.latent_heat * self.heavy.molar_mass
    }

    /// 경성분 체적분율(%)을 액상 몰분율로 환산한다.
    pub fn mole_fraction_from_volume_percent(&self, percent: f64) -> f64 {
        let s = percent / 100.0;
        let moles_light = s * self.light.density_g_per_ml / self.light.molar_mass;
        let moles_heavy = (1.0 - s) * self.heavy.density_g_per_ml / self.heavy.molar_mass;
        moles_light / (moles_light + moles_heavy)
    }
}

/// 20 °C 알코올 도수(% v/v) 측정값 다섯 개.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawReadings {
    /// 전환류 탑정
    pub distillate_total_reflux: f64,
    /// 전환류 탑저
    pub bottoms_total_reflux: f64,
    /// 부분환류 탑정
    pub distillate: f64,
    /// 부분환류 탑저
    pub bottoms: f64,
    /// 원료
    pub feed: f64,
}

/// 측정 조성(액상 몰분율) 다섯 개.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredCompositions {
    /// 전환류 탑정 조성 xD(∞)
    pub xd_total: f64,
    /// 전환류 탑저 조성 xW(∞)
    pub xw_total: f64,
    /// 부분환류 탑정 조성 xD
    pub xd: f64,
    /// 부분환류 탑저 조성 xW
    pub xw: f64,
    /// 원료 조성 xF
    pub xf: f64,
}

impl RawReadings {
    fn as_array(&self) -> [(&'static str, f64); 5] {
        [
            ("distillate_total_reflux", self.distillate_total_reflux),
            ("bottoms_total_reflux", self.bottoms_total_reflux),
            ("distillate", self.distillate),
            ("bottoms", self.bottoms),
            ("feed", self.feed),
        ]
    }

    /// 도수 값을 검증한 뒤 몰분율로 환산한다.
    pub fn to_compositions(
        &self,
        system: &BinarySystem,
    ) -> Result<MeasuredCompositions, DistillationError> {
        for (name, value) in self.as_array() {
            if !(0.0..=100.0).contains(&value) {
                return Err(DistillationError::InvalidConfiguration(format!(
                    "알코올 도수 {name} = {value} 가 0~100 범위를 벗어났습니다"
                )));
            }
        }
        let x = |v: f64| system.mole_fraction_from_volume_percent(v);
        Ok(MeasuredCompositions {
            xd_total: x(self.distillate_total_reflux),
            xw_total: x(self.bottoms_total_reflux),
            xd: x(self.distillate),
            xw: x(self.bottoms),
            xf: x(self.feed),
        })
    }
}

impl MeasuredCompositions {
    /// 모든 몰분율이 [0, 1] 안에 있는지 확인한다.
    pub fn validate(&self) -> Result<(), DistillationError> {
        let values = [
            ("xD(∞)", self.xd_total),
            ("xW(∞)", self.xw_total),
            ("xD", self.xd),
            ("xW", self.xw),
            ("xF", self.xf),
        ];
        for (name, value) in values {
            if !(0.0..=1.0).contains(&value) {
                return Err(DistillationError::InvalidConfiguration(format!(
                    "몰분율 {name} = {value} 가 0~1 범위를 벗어났습니다"
                )));
            }
        }
        Ok(())
    }
}
