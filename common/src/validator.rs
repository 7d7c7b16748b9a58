//! 行検証
//!
//! 原文セルと訳文セルを比較し、句読点の幅を正規化して差異を注記する。
//!
//! ## 処理順序
//! 1. 幅の正規化: 宣言順に半角を全角へ置換（後のペアは前のペアの置換結果を見る）
//! 2. 欠落チェック: 原文に半角があり、元の訳文に全角がない
//! 3. 追加チェック: 元の訳文に全角があり、原文に半角がない
//! 4. 重複除去・辞書順ソート

use crate::charmap::CharacterMap;
use std::collections::BTreeSet;
use std::fmt;

/// 注記の区切り文字
pub const REASON_SEPARATOR: &str = "; ";

/// 1件の注記
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason<'a> {
    Replaced { half: &'a str, full: &'a str },
    Missing { full: &'a str },
    Additional { full: &'a str },
}

impl fmt::Display for Reason<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Replaced { half, full } => write!(f, "Replaced '{}' with '{}'", half, full),
            Reason::Missing { full } => write!(f, "Missing: '{}'", full),
            // 半角側は出力しない
            Reason::Additional { full } => write!(f, "Additional: '{}'", full),
        }
    }
}

/// 1行分の検証結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// 全角化した訳文
    pub fixed_text: String,
    /// 注記（重複なし・辞書順）
    pub reasons: BTreeSet<String>,
}

impl ValidationResult {
    /// 注記セルの値。注記がなければ None（セルは空欄のまま）
    pub fn annotation(&self) -> Option<String> {
        if self.reasons.is_empty() {
            return None;
        }
        let reasons: Vec<&str> = self.reasons.iter().map(String::as_str).collect();
        Some(reasons.join(REASON_SEPARATOR))
    }

    pub fn has_reasons(&self) -> bool {
        !self.reasons.is_empty()
    }
}

/// 原文と訳文を検証する
pub fn validate(source_text: &str, target_text: &str, map: &CharacterMap) -> ValidationResult {
    let mut reasons = BTreeSet::new();

    let mut fixed_text = target_text.to_string();
    for (half, full) in map.pairs() {
        if fixed_text.contains(half) {
            fixed_text = fixed_text.replace(half, full);
            reasons.insert(Reason::Replaced { half, full }.to_string());
        }
    }

    // 以降は置換前の訳文と比較する
    for (half, full) in map.pairs() {
        if source_text.contains(half) && !target_text.contains(full) {
            reasons.insert(Reason::Missing { full }.to_string());
        }
    }

    for (full, half) in map.reverse_pairs() {
        if target_text.contains(full) && !source_text.contains(half) {
            reasons.insert(Reason::Additional { full }.to_string());
        }
    }

    ValidationResult {
        fixed_text,
        reasons,
    }
}
