//! 화공 실험 데이터 처리 중 정류(증류) 실험의 McCabe-Thiele 이론단수 계산을 라이브러리로 분리한다.
//! 계산 핵심은 `distillation`에 있고, 나머지는 입력 파일·보고서·설정·CLI 같은 주변 기능이다.

pub mod app;
pub mod composition;
pub mod config;
pub mod diagram;
pub mod distillation;
pub mod experiment;
pub mod i18n;
pub mod report;
pub mod ui_cli;
