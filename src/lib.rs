pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod workbook;
