//! Pasiulymas Common Library
//!
//! 選択行の蓄積・見出しテンプレート・出力表の組み立て

pub mod types;
pub mod templates;
pub mod header;
pub mod selection;
pub mod assemble;
pub mod error;
pub mod export;

pub use types::{CellValue, RowRecord};
pub use templates::{HeaderTemplate, TemplateRegistry};
pub use header::build_header;
pub use selection::SelectionStore;
pub use assemble::{assemble, ExportTable, SkippedGroup};
pub use error::{Error, Result};
