use crate::error::{Result, ValidatorError};
use punct_validator_common::CharacterMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 文字マップファイルを指定する環境変数
pub const MAP_ENV_VAR: &str = "PUNCT_VALIDATOR_MAP";

/// 出力ファイル名のデフォルト接尾辞
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_validated";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// カスタム文字マップ（JSON）
    pub map_path: Option<PathBuf>,
    /// 出力ファイル名の接尾辞
    pub output_suffix: String,
    /// 行の並列処理
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_path: None,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.into(),
            parallel: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
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
            .ok_or_else(|| ValidatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("punct-validator").join("config.json"))
    }

    /// 使用する文字マップファイル
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn resolve_map_path(&self, override_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = override_path {
            return Some(path.to_path_buf());
        }

        if let Ok(path) = std::env::var(MAP_ENV_VAR) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        self.map_path.clone()
    }

    /// 文字マップを構築（指定がなければ組み込みマップ）
    pub fn character_map(&self, override_path: Option<&Path>) -> Result<CharacterMap> {
        match self.resolve_map_path(override_path) {
            Some(path) => {
                if !path.exists() {
                    return Err(ValidatorError::FileNotFound(path.display().to_string()));
                }
                tracing::debug!(path = %path.display(), "loading character map");
                Ok(CharacterMap::from_file(&path)?)
            }
            None => Ok(CharacterMap::japanese()),
        }
    }

    pub fn set_map_path(&mut self, path: Option<PathBuf>) -> Result<()> {
        if let Some(path) = &path {
            // 保存前に妥当性を確認
            CharacterMap::from_file(path)?;
        }
        self.map_path = path;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.map_path, None);
        assert_eq!(config.output_suffix, "_validated");
        assert!(!config.parallel);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"parallel": true}"#).unwrap();
        assert!(config.parallel);
        assert_eq!(config.output_suffix, DEFAULT_OUTPUT_SUFFIX);
    }

    #[test]
    fn test_override_path_wins() {
        let config = Config {
            map_path: Some(PathBuf::from("stored.json")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_map_path(Some(Path::new("cli.json"))),
            Some(PathBuf::from("cli.json"))
        );
    }
}
