//! 双人同屏国际象棋终端界面
//!
//! 只负责读入点击、画出棋盘，规则全部由 `chess-core` 处理

pub mod app;
pub mod command;
pub mod render;
pub mod settings;

pub use app::{App, Flow};
pub use command::Command;
pub use settings::{BoardFlip, CliSettings, GlyphStyle, LogLevel};
