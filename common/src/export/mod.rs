//! 出力形式ごとの RowSink 実装

#[cfg(feature = "excel")]
pub mod excel_core;

#[cfg(feature = "excel")]
pub use excel_core::XlsxSink;
