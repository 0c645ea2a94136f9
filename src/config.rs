use crate::error::{Result, VariantGridError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use variant_grid_common::{Catalog, CatalogEntry, Grid, GridSeed, Session, BUSY_WINDOW_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 初期グリッド
    pub seed: GridSeed,
    /// 画像カタログ（空なら組み込みカタログ）
    pub catalog: Vec<CatalogEntry>,
    /// 構造変更のビジー表示時間（ミリ秒）
    pub busy_window_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: GridSeed::default(),
            catalog: Catalog::builtin().entries().to_vec(),
            busy_window_ms: BUSY_WINDOW_MS as u64,
        }
    }
}

impl Config {
    /// 設定を読み込む
    ///
    /// `path` 指定時はファイル必須。未指定ならデフォルトパスを探し、無ければ組み込み値。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(VariantGridError::FileNotFound(path.display().to_string()));
                }
                Self::load_from(path)
            }
            None => {
                let config_path = Self::config_path()?;
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| VariantGridError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("variant-grid").join("config.json"))
    }

    pub fn catalog(&self) -> Catalog {
        if self.catalog.is_empty() {
            Catalog::builtin()
        } else {
            Catalog::new(self.catalog.clone())
        }
    }

    /// 設定から新しいセッションを作る（初期値の形状を検証）
    pub fn session(&self) -> Result<Session> {
        let grid = Grid::from_seed(self.seed.clone())?;
        Ok(Session::new(grid, self.catalog()))
    }

    pub fn busy_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.busy_window_ms)
    }
}
