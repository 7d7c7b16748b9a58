//! Punctuation Validator Common Library
//!
//! 原文・訳文セルの句読点幅チェックのコア:
//! - `CharacterMap`: 半角⇔全角の対応表
//! - `validate`: 1行の検証（全角化・欠落・追加）
//! - `SheetProcessor`: シート単位の注記付け
//!
//! ファイル入出力はホスト側の `RowSource` / `RowSink` 実装が担う。

pub mod charmap;
pub mod error;
pub mod export;
pub mod memory;
pub mod processor;
pub mod sheet;
pub mod validator;

pub use charmap::{CharacterMap, MapEntry, JAPANESE_PUNCTUATION};
pub use error::{Error, MapError, Result};
pub use memory::{MemorySink, MemorySource};
pub use processor::{process_workbook, RowSink, RowSource, SheetProcessor};
pub use sheet::{CellValue, Row, Sheet, SheetSummary, FIXED_HEADER, REASON_HEADER};
pub use validator::{validate, Reason, ValidationResult, REASON_SEPARATOR};

#[cfg(feature = "excel")]
pub use export::XlsxSink;
