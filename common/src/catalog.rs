//! デザイン画像カタログ
//!
//! 起動時に固定される読み取り専用のリスト。
//! ピッカーの検索は表示名に対する大文字小文字を区別しない部分一致。

use serde::{Deserialize, Serialize};

/// カタログエントリ
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// 画像の参照（セルに書き込まれる値）
    pub src: String,
    /// 表示名（検索対象）
    #[serde(alias = "alt")]
    pub name: String,
}

impl CatalogEntry {
    pub fn new(src: impl Into<String>, name: impl Into<String>) -> Self {
        Self { src: src.into(), name: name.into() }
    }

    /// 表示名が `query` を含むか（大文字小文字を区別しない）
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// 画像カタログ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// 組み込みカタログ（Design 1〜6）
    pub fn builtin() -> Self {
        let entries = (1..=6)
            .map(|n| {
                CatalogEntry::new(
                    format!("https://placehold.co/150x150?text=Design+{}", n),
                    format!("Design {}", n),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, src: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.src == src)
    }

    /// 検索語で絞り込み（元の順序を維持）
    pub fn filter(&self, query: &str) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| e.matches(query)).collect()
    }
}
