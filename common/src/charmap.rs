//! 半角⇔全角 文字マップ
//!
//! 半角記号と全角記号の対応表。宣言順を保持し、逆引き表は構築時に自動生成する。
//! 半角キーの重複・全角値の衝突は構築時にエラーとなり、使用時には発生しない。

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 組み込みの対応表（宣言順が置換順になる）
pub const JAPANESE_PUNCTUATION: &[(&str, &str)] = &[
    ("(", "（"),
    (")", "）"),
    ("[", "［"),
    ("]", "］"),
    (",", "、"),
    ("/", "／"),
    (".", "。"),
    ("X", "×"),
    (":", "："),
    ("#", "＃"),
];

/// 対応表の1エントリ（JSON入出力用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapEntry {
    pub half: String,
    pub full: String,
}

/// 半角⇔全角の双方向マップ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MapEntry>", into = "Vec<MapEntry>")]
pub struct CharacterMap {
    /// 宣言順の (half, full)
    pairs: Vec<(String, String)>,
    forward: HashMap<String, String>,
    reverse: HashMap<String, String>,
}

impl CharacterMap {
    /// (half, full) の順序付きリストから構築
    pub fn new<I, H, F>(pairs: I) -> std::result::Result<Self, MapError>
    where
        I: IntoIterator<Item = (H, F)>,
        H: Into<String>,
        F: Into<String>,
    {
        let mut ordered = Vec::new();
        let mut forward = HashMap::new();
        let mut reverse: HashMap<String, String> = HashMap::new();

        for (index, (half, full)) in pairs.into_iter().enumerate() {
            let half: String = half.into();
            let full: String = full.into();

            if half.is_empty() || full.is_empty() {
                return Err(MapError::EmptyEntry { index });
            }
            if forward.contains_key(&half) {
                return Err(MapError::DuplicateHalf(half));
            }
            if let Some(first) = reverse.get(&full) {
                return Err(MapError::AmbiguousFull {
                    full,
                    first: first.clone(),
                    second: half,
                });
            }

            forward.insert(half.clone(), full.clone());
            reverse.insert(full.clone(), half.clone());
            ordered.push((half, full));
        }

        Ok(Self {
            pairs: ordered,
            forward,
            reverse,
        })
    }

    /// 組み込みの日本語句読点マップ
    pub fn japanese() -> Self {
        Self::new(JAPANESE_PUNCTUATION.iter().copied())
            .expect("built-in punctuation table is a bijection")
    }

    /// JSON文字列から読み込み
    ///
    /// `[{"half": "(", "full": "（"}, ...]` 形式。配列の順序が宣言順になる。
    pub fn from_json(json: &str) -> Result<Self> {
        let map: Self = serde_json::from_str(json)?;
        Ok(map)
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// 宣言順でJSONに書き出し
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 半角 → 全角
    pub fn to_full(&self, half: &str) -> Option<&str> {
        self.forward.get(half).map(String::as_str)
    }

    /// 全角 → 半角
    pub fn to_half(&self, full: &str) -> Option<&str> {
        self.reverse.get(full).map(String::as_str)
    }

    /// 宣言順の (half, full)
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(h, f)| (h.as_str(), f.as_str()))
    }

    /// 宣言順の (full, half)
    pub fn reverse_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(h, f)| (f.as_str(), h.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for CharacterMap {
    fn default() -> Self {
        Self::japanese()
    }
}

impl TryFrom<Vec<MapEntry>> for CharacterMap {
    type Error = MapError;

    fn try_from(entries: Vec<MapEntry>) -> std::result::Result<Self, Self::Error> {
        Self::new(entries.into_iter().map(|e| (e.half, e.full)))
    }
}

impl From<CharacterMap> for Vec<MapEntry> {
    fn from(map: CharacterMap) -> Self {
        map.pairs
            .into_iter()
            .map(|(half, full)| MapEntry { half, full })
            .collect()
    }
}
