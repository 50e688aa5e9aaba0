use crate::error::{AppError, Result};
use chrono_tz::Tz;
use pasiulymas_common::TemplateRegistry;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TIMEZONE: &str = "Europe/Vilnius";
pub const DEFAULT_PREVIEW_ROWS: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 出力先ディレクトリ（未設定ならカレント）
    pub output_dir: Option<PathBuf>,
    /// 見出しテンプレートJSON（未設定なら組み込み）
    pub templates_path: Option<PathBuf>,
    /// 出力ファイル名の時刻に使うタイムゾーン
    pub timezone: String,
    /// プレビュー表示の最大行数
    pub preview_rows: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            templates_path: None,
            timezone: DEFAULT_TIMEZONE.into(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "config loaded");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pasiulymas").join("config.json"))
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// テンプレート登録簿を取得（引数 > 設定 > 組み込み）
    pub fn template_registry(&self, override_path: Option<&Path>) -> Result<TemplateRegistry> {
        match override_path.or(self.templates_path.as_deref()) {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::FileNotFound(path.display().to_string()));
                }
                let registry = TemplateRegistry::from_file(path)?;
                tracing::info!(path = %path.display(), count = registry.len(), "templates loaded");
                Ok(registry)
            }
            None => Ok(TemplateRegistry::builtin()),
        }
    }

    /// 出力先を決定（引数 > 設定 > カレント）
    pub fn resolve_output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}
