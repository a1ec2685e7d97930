use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_FINITE_REFLUX: &str = "main_menu.finite_reflux";
    pub const MAIN_MENU_TOTAL_REFLUX: &str = "main_menu.total_reflux";
    pub const MAIN_MENU_EXPERIMENT_FILE: &str = "main_menu.experiment_file";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const CALC_HEADING: &str = "calc.heading";
    pub const CALC_READINGS_NOTE: &str = "calc.readings_note";
    pub const PROMPT_READING_DISTILLATE_TOTAL: &str = "prompt.reading_distillate_total";
    pub const PROMPT_READING_BOTTOMS_TOTAL: &str = "prompt.reading_bottoms_total";
    pub const PROMPT_READING_DISTILLATE: &str = "prompt.reading_distillate";
    pub const PROMPT_READING_BOTTOMS: &str = "prompt.reading_bottoms";
    pub const PROMPT_READING_FEED: &str = "prompt.reading_feed";
    pub const PROMPT_REFLUX_RATIO: &str = "prompt.reflux_ratio";
    pub const PROMPT_RELATIVE_VOLATILITY: &str = "prompt.relative_volatility";
    pub const PROMPT_FEED_FLOW: &str = "prompt.feed_flow";
    pub const PROMPT_SATURATION_TEMP: &str = "prompt.saturation_temp";
    pub const PROMPT_FEED_TEMP: &str = "prompt.feed_temp";
    pub const PROMPT_EXPERIMENT_FILE: &str = "prompt.experiment_file";
    pub const PROMPT_REPORT_PATH: &str = "prompt.report_path";
    pub const RESULT_SAVED: &str = "result.saved";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_REFLUX_RATIO: &str = "report.reflux_ratio";
    pub const REPORT_TOTAL_REFLUX: &str = "report.total_reflux";
    pub const REPORT_FEED_QUALITY: &str = "report.feed_quality";
    pub const REPORT_DISTILLATE_COMPOSITION: &str = "report.distillate_composition";
    pub const REPORT_BOTTOMS_COMPOSITION: &str = "report.bottoms_composition";
    pub const REPORT_DISTILLATE_FLOW: &str = "report.distillate_flow";
    pub const REPORT_BOTTOMS_FLOW: &str = "report.bottoms_flow";
    pub const REPORT_LIQUID_FLOW: &str = "report.liquid_flow";
    pub const REPORT_LIQUID_UNBOUNDED: &str = "report.liquid_unbounded";
    pub const REPORT_Q_POINT_HEADING: &str = "report.q_point_heading";
    pub const REPORT_STAGES_HEADING: &str = "report.stages_heading";
    pub const REPORT_STAGE_LINE: &str = "report.stage_line";
    pub const REPORT_PLATES_TOTAL: &str = "report.plates_total";
    pub const REPORT_ACTUAL_PLATES: &str = "report.actual_plates";
    pub const REPORT_FEED_STAGE: &str = "report.feed_stage";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides(Path::new("locales"), lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 한국어 순으로 찾고, 없으면 키를 그대로 돌려준다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let builtin = match self.lang {
            Language::En => en(key).or_else(|| ko(key)),
            Language::Ko => ko(key),
        };
        builtin.map_or_else(|| key.to_string(), str::to_string)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. `{dir}/{code}.toml`, 없으면 기본 코드 파일을 찾는다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let content = fs::read_to_string(dir.join(format!("{code}.toml"))).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

/// 중첩 테이블을 `a.b.c` 형태의 플랫 키로 펼친다.
fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 화공 실험 데이터 처리 - 정류 ===",
        MAIN_MENU_FINITE_REFLUX => "1) 부분환류 이론단수 계산",
        MAIN_MENU_TOTAL_REFLUX => "2) 전환류 이론단수 계산",
        MAIN_MENU_EXPERIMENT_FILE => "3) 실험 파일(TOML)로 계산",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        CALC_HEADING => "\n-- 정류 이론단수 계산 --",
        CALC_READINGS_NOTE => "알코올 도수는 20 °C 환산값(% v/v)으로 입력합니다.",
        PROMPT_READING_DISTILLATE_TOTAL => "전환류 탑정 알코올 도수 [%]: ",
        PROMPT_READING_BOTTOMS_TOTAL => "전환류 탑저 알코올 도수 [%]: ",
        PROMPT_READING_DISTILLATE => "부분환류 탑정 알코올 도수 [%]: ",
        PROMPT_READING_BOTTOMS => "부분환류 탑저 알코올 도수 [%]: ",
        PROMPT_READING_FEED => "원료 알코올 도수 [%]: ",
        PROMPT_REFLUX_RATIO => "환류비 R (엔터=기본값): ",
        PROMPT_RELATIVE_VOLATILITY => "평균 상대휘발도 αm (엔터=기본값): ",
        PROMPT_FEED_FLOW => "원료 유량 F [mol/h] (엔터=기본값): ",
        PROMPT_SATURATION_TEMP => "원료 포화온도 tS [°C] (엔터=기본값, 0=없음): ",
        PROMPT_FEED_TEMP => "원료 온도 tF [°C] (엔터=기본값): ",
        PROMPT_EXPERIMENT_FILE => "실험 파일 경로: ",
        PROMPT_REPORT_PATH => "결과 저장 경로 (엔터=저장 안 함): ",
        RESULT_SAVED => "결과를 저장했습니다:",
        REPORT_TITLE => "정류탑 계산 결과",
        REPORT_REFLUX_RATIO => "환류비 R",
        REPORT_TOTAL_REFLUX => "전환류",
        REPORT_FEED_QUALITY => "원료 열상태 파라미터 q",
        REPORT_DISTILLATE_COMPOSITION => "유출액 조성 xD",
        REPORT_BOTTOMS_COMPOSITION => "관출액 조성 xW",
        REPORT_DISTILLATE_FLOW => "유출액 유량 D",
        REPORT_BOTTOMS_FLOW => "관출액 유량 W",
        REPORT_LIQUID_FLOW => "환류액 유량 L",
        REPORT_LIQUID_UNBOUNDED => "무한대 (전환류)",
        REPORT_Q_POINT_HEADING => "--- Q점 좌표 ---",
        REPORT_STAGES_HEADING => "--- 각 이론단 조성 ---",
        REPORT_STAGE_LINE => "제{n}단",
        REPORT_PLATES_TOTAL => "총 이론단수(재비기 포함)",
        REPORT_ACTUAL_PLATES => "실제 단수",
        REPORT_FEED_STAGE => "원료 공급 위치: 제{n}단",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 기본값:",
        SETTINGS_OPTIONS => "1) 기본 운전 조건 변경  2) 언어 변경 (ko/en/auto)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== ChemEng Lab Toolbox - Distillation ===",
        MAIN_MENU_FINITE_REFLUX => "1) Theoretical plates at finite reflux",
        MAIN_MENU_TOTAL_REFLUX => "2) Theoretical plates at total reflux",
        MAIN_MENU_EXPERIMENT_FILE => "3) Calculate from experiment file (TOML)",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        CALC_HEADING => "\n-- Distillation theoretical plates --",
        CALC_READINGS_NOTE => "Enter alcohol degrees corrected to 20 °C (% v/v).",
        PROMPT_READING_DISTILLATE_TOTAL => "Distillate degree at total reflux [%]: ",
        PROMPT_READING_BOTTOMS_TOTAL => "Bottoms degree at total reflux [%]: ",
        PROMPT_READING_DISTILLATE => "Distillate degree at finite reflux [%]: ",
        PROMPT_READING_BOTTOMS => "Bottoms degree at finite reflux [%]: ",
        PROMPT_READING_FEED => "Feed degree [%]: ",
        PROMPT_REFLUX_RATIO => "Reflux ratio R (enter=default): ",
        PROMPT_RELATIVE_VOLATILITY => "Mean relative volatility αm (enter=default): ",
        PROMPT_FEED_FLOW => "Feed flow F [mol/h] (enter=default): ",
        PROMPT_SATURATION_TEMP => "Feed bubble point tS [°C] (enter=default, 0=none): ",
        PROMPT_FEED_TEMP => "Feed temperature tF [°C] (enter=default): ",
        PROMPT_EXPERIMENT_FILE => "Experiment file path: ",
        PROMPT_REPORT_PATH => "Report path (enter to skip): ",
        RESULT_SAVED => "Results saved to:",
        REPORT_TITLE => "Distillation column results",
        REPORT_REFLUX_RATIO => "Reflux ratio R",
        REPORT_TOTAL_REFLUX => "total reflux",
        REPORT_FEED_QUALITY => "Feed condition q",
        REPORT_DISTILLATE_COMPOSITION => "Distillate composition xD",
        REPORT_BOTTOMS_COMPOSITION => "Bottoms composition xW",
        REPORT_DISTILLATE_FLOW => "Distillate flow D",
        REPORT_BOTTOMS_FLOW => "Bottoms flow W",
        REPORT_LIQUID_FLOW => "Reflux liquid flow L",
        REPORT_LIQUID_UNBOUNDED => "unbounded (total reflux)",
        REPORT_Q_POINT_HEADING => "--- Q point ---",
        REPORT_STAGES_HEADING => "--- Stage compositions ---",
        REPORT_STAGE_LINE => "Stage {n}",
        REPORT_PLATES_TOTAL => "Theoretical plates (including reboiler)",
        REPORT_ACTUAL_PLATES => "Actual plates",
        REPORT_FEED_STAGE => "Feed location: stage {n}",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current defaults:",
        SETTINGS_OPTIONS => "1) Change default operating conditions  2) Change language (ko/en/auto)",
        SETTINGS_PROMPT_CHANGE => "Number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}
