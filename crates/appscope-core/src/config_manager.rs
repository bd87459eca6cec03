//! 설정 파일 관리.
//!
//! 설정은 JSON 파일 하나에 저장된다. 파일이 없으면 기본값으로 만들고,
//! 저장은 임시 파일에 쓴 뒤 rename하여 중간에 끊겨도 기존 파일이 깨지지 않는다.
//! 잘못된 설정은 메모리에도 파일에도 반영되지 않는다.

use crate::config::AppConfig;
use crate::error::CoreError;
use directories::ProjectDirs;
use parking_lot::RwLock;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const CONFIG_FILE_NAME: &str = "appscope.json";

/// 공유 설정 핸들. 복제본은 같은 설정을 본다.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    current: Arc<RwLock<AppConfig>>,
    path: PathBuf,
}

impl ConfigManager {
    /// 플랫폼 설정 디렉토리의 `appscope.json` 사용
    pub fn new() -> Result<Self, CoreError> {
        Self::with_path(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// 지정 경로의 설정 파일 사용 (없으면 기본 설정으로 생성)
    pub fn with_path(path: PathBuf) -> Result<Self, CoreError> {
        let config = load_or_create(&path)?;
        config.validate()?;
        info!("설정 로드: {}", path.display());

        Ok(Self {
            current: Arc::new(RwLock::new(config)),
            path,
        })
    }

    /// 현재 설정 스냅샷
    pub fn get(&self) -> AppConfig {
        self.current.read().clone()
    }

    /// 검증 후 파일과 메모리에 반영
    pub fn update(&self, new_config: AppConfig) -> Result<(), CoreError> {
        new_config.validate()?;
        write_atomic(&self.path, &new_config)?;
        *self.current.write() = new_config;
        debug!("설정 저장: {}", self.path.display());
        Ok(())
    }

    /// 현재 설정을 수정해 반영하고 반영된 설정을 돌려준다
    pub fn update_with<F>(&self, edit: F) -> Result<AppConfig, CoreError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut next = self.get();
        edit(&mut next);
        self.update(next.clone())?;
        Ok(next)
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    /// 외부에서 수정된 파일 다시 읽기. 실패하면 기존 설정 유지.
    pub fn reload(&self) -> Result<(), CoreError> {
        let config = read_config(&self.path)?;
        config.validate()?;
        *self.current.write() = config;
        info!("설정 다시 로드: {}", self.path.display());
        Ok(())
    }

    /// 플랫폼별 설정 디렉토리
    ///
    /// - macOS: `~/Library/Application Support/dev.appscope.appscope/`
    /// - Windows: `%APPDATA%\appscope\appscope\config\`
    /// - Linux: `~/.config/appscope/`
    pub fn config_dir() -> Result<PathBuf, CoreError> {
        ProjectDirs::from("dev", "appscope", "appscope")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| CoreError::Config("홈 디렉토리를 찾을 수 없습니다".to_string()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CoreError + '_ {
    move |source| CoreError::ConfigIo {
        path: path.to_path_buf(),
        source,
    }
}

fn load_or_create(path: &Path) -> Result<AppConfig, CoreError> {
    if path.exists() {
        return read_config(path);
    }

    let config = AppConfig::default_config();
    write_atomic(path, &config)?;
    info!("기본 설정 파일 생성: {}", path.display());
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig, CoreError> {
    let content = fs::read_to_string(path).map_err(io_error(path))?;
    serde_json::from_str(&content).map_err(|source| CoreError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, config: &AppConfig) -> Result<(), CoreError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(config)?).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))
}
