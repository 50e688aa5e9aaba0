//! Export core modules shared by the CLI commands.

#[cfg(feature = "excel")]
pub mod excel_core;
