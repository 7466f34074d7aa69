//! Unit tests for kubecolor library modules

#[path = "unit/helpers/mod.rs"]
pub mod helpers;

#[path = "unit/config_test.rs"]
mod config_test;

#[path = "unit/printer_test.rs"]
mod printer_test;

#[path = "unit/subcommand_test.rs"]
mod subcommand_test;

#[path = "unit/theme_test.rs"]
mod theme_test;
