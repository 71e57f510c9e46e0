//! snapshot-manifest - Keeps a UI snapshot manifest in sync with preview screenshots

pub mod catalog;
pub mod commands;
pub mod config;
pub mod logging;
pub mod manifest;
pub mod models;
pub mod sync;
pub mod validation;
