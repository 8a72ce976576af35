// Presentation layer: text rendering, export and the interactive session.

pub mod browse;
#[cfg(feature = "cli")]
pub mod commands;
pub mod export;
pub mod render;
