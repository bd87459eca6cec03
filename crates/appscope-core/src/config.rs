//! 애플리케이션 설정 구조체.
//!
//! 텔레메트리 보존 한도, 권고 임계값, 메모리 샘플링 주기, 로딩/알림 표시 설정을 정의한다.
//! `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;
use crate::ports::host::LoadingOptions;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 텔레메트리 설정
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// 로딩 표시 설정
    #[serde(default)]
    pub loading: LoadingConfig,
    /// 알림 설정
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            telemetry: TelemetryConfig::default(),
            loading: LoadingConfig::default(),
            notification: NotificationConfig::default(),
        }
    }

    /// 설정값 유효성 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let t = &self.telemetry;
        if t.view_series_cap == 0 {
            return Err(CoreError::Validation {
                field: "telemetry.view_series_cap".to_string(),
                message: "0보다 커야 합니다".to_string(),
            });
        }
        if t.call_series_cap == 0 {
            return Err(CoreError::Validation {
                field: "telemetry.call_series_cap".to_string(),
                message: "0보다 커야 합니다".to_string(),
            });
        }
        if t.memory_sample_interval_ms == 0 {
            return Err(CoreError::Validation {
                field: "telemetry.memory_sample_interval_ms".to_string(),
                message: "0보다 커야 합니다".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================
// 텔레메트리 설정
// ============================================================

/// 텔레메트리 설정: 계측 활성화, 시계열 보존 한도, 샘플링 주기
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// 계측 전체 활성화 여부
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 화면 경로별 로딩 샘플 보존 개수
    #[serde(default = "default_view_series_cap")]
    pub view_series_cap: usize,
    /// 호출 키별 샘플 보존 개수
    #[serde(default = "default_call_series_cap")]
    pub call_series_cap: usize,
    /// 메모리 샘플링 주기 (밀리초)
    #[serde(default = "default_memory_sample_interval_ms")]
    pub memory_sample_interval_ms: u64,
    /// 권고 임계값
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            view_series_cap: default_view_series_cap(),
            call_series_cap: default_call_series_cap(),
            memory_sample_interval_ms: default_memory_sample_interval_ms(),
            thresholds: ThresholdConfig::default(),
        }
    }
}

impl TelemetryConfig {
    /// 메모리 샘플링 주기
    pub fn memory_sample_interval(&self) -> Duration {
        Duration::from_millis(self.memory_sample_interval_ms)
    }
}

/// 권고 임계값: 초과(>) 시 권고 생성
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// 앱 시작 시간 (밀리초)
    #[serde(default = "default_launch_ms")]
    pub launch_ms: u64,
    /// 화면 평균 로딩 시간 (밀리초)
    #[serde(default = "default_view_load_ms")]
    pub view_load_ms: u64,
    /// 호출 평균 소요 시간 (밀리초)
    #[serde(default = "default_call_ms")]
    pub call_ms: u64,
    /// 메모리 사용량 (bytes)
    #[serde(default = "default_memory_bytes")]
    pub memory_bytes: u64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            launch_ms: default_launch_ms(),
            view_load_ms: default_view_load_ms(),
            call_ms: default_call_ms(),
            memory_bytes: default_memory_bytes(),
        }
    }
}

// ============================================================
// 로딩/알림 설정
// ============================================================

/// 로딩 표시 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// 표시 문구
    #[serde(default = "default_loading_title")]
    pub title: String,
    /// 터치 차단 마스크
    #[serde(default = "default_true")]
    pub mask: bool,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            title: default_loading_title(),
            mask: true,
        }
    }
}

impl LoadingConfig {
    /// 호스트 UI 포트용 옵션
    pub fn options(&self) -> LoadingOptions {
        LoadingOptions {
            title: self.title.clone(),
            mask: self.mask,
        }
    }
}

/// 알림 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// 원격 호출 실패 시 에러 토스트 표시
    #[serde(default = "default_true")]
    pub toast_on_failure: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_on_failure: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_view_series_cap() -> usize {
    10
}

fn default_call_series_cap() -> usize {
    20
}

fn default_memory_sample_interval_ms() -> u64 {
    30_000
}

fn default_launch_ms() -> u64 {
    3_000
}

fn default_view_load_ms() -> u64 {
    2_000
}

fn default_call_ms() -> u64 {
    5_000
}

fn default_memory_bytes() -> u64 {
    50 * 1024 * 1024
}

fn default_loading_title() -> String {
    "로딩 중...".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"telemetry":{"call_series_cap":5,"thresholds":{"call_ms":100}}}"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.telemetry.call_series_cap, 5);
        assert_eq!(config.telemetry.view_series_cap, 10);
        assert_eq!(config.telemetry.thresholds.call_ms, 100);
        assert_eq!(config.telemetry.thresholds.launch_ms, 3_000);
        assert!(config.telemetry.enabled);
        assert_eq!(config.loading.title, "로딩 중...");
    }

    #[test]
    fn empty_json_is_default() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AppConfig::default_config());
    }

    #[test]
    fn validate_rejects_zero_cap() {
        let mut config = AppConfig::default_config();
        assert!(config.validate().is_ok());

        config.telemetry.call_series_cap = 0;
        match config.validate() {
            Err(CoreError::Validation { field, .. }) => {
                assert_eq!(field, "telemetry.call_series_cap");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let mut config = AppConfig::default_config();
        config.telemetry.memory_sample_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn loading_options_from_config() {
        let config = LoadingConfig {
            title: "잠시만요".to_string(),
            mask: false,
        };
        let opts = config.options();
        assert_eq!(opts.title, "잠시만요");
        assert!(!opts.mask);
    }
}
