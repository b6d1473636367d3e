//! 终端设置模块
//!
//! 提供设置数据结构和 JSON 持久化

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 棋子符号风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GlyphStyle {
    /// Unicode 棋子符号（♔♛…）
    #[default]
    Unicode,
    /// FEN 字母（白方大写，黑方小写）
    Ascii,
}

impl GlyphStyle {
    pub fn display_name(&self) -> &'static str {
        match self {
            GlyphStyle::Unicode => "Unicode",
            GlyphStyle::Ascii => "ASCII",
        }
    }

    pub fn next(self) -> Self {
        match self {
            GlyphStyle::Unicode => GlyphStyle::Ascii,
            GlyphStyle::Ascii => GlyphStyle::Unicode,
        }
    }
}

/// 翻转棋盘视角
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoardFlip {
    /// 白方视角（白方在下）
    #[default]
    WhiteBottom,
    /// 黑方视角（黑方在下）
    BlackBottom,
    /// 自动（跟随走子方）
    Auto,
}

impl BoardFlip {
    pub fn display_name(&self) -> &'static str {
        match self {
            BoardFlip::WhiteBottom => "White at bottom",
            BoardFlip::BlackBottom => "Black at bottom",
            BoardFlip::Auto => "Follow side to move",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BoardFlip::WhiteBottom => BoardFlip::BlackBottom,
            BoardFlip::BlackBottom => BoardFlip::Auto,
            BoardFlip::Auto => BoardFlip::WhiteBottom,
        }
    }
}

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// 对应的 EnvFilter 指令
    pub fn directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// 终端设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliSettings {
    /// 棋子符号风格
    pub glyph_style: GlyphStyle,
    /// 翻转棋盘
    pub board_flip: BoardFlip,
    /// 走子提示
    pub show_move_hints: bool,
    /// 显示坐标
    pub show_coordinates: bool,
    /// 日志级别
    pub log_level: LogLevel,
}

impl Default for CliSettings {
    fn default() -> Self {
        Self {
            glyph_style: GlyphStyle::default(),
            board_flip: BoardFlip::default(),
            show_move_hints: true,
            show_coordinates: true,
            log_level: LogLevel::default(),
        }
    }
}

impl CliSettings {
    /// 获取设置文件路径
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("casual-chess");
            path.push("settings.json");
            path
        })
    }

    /// 从指定文件读取设置，文件不存在时返回 `None`
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("无法读取设置文件: {:?}", path))?;
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("设置文件格式无效: {:?}", path))?;
        Ok(Some(settings))
    }

    /// 保存设置到指定文件
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(self).context("序列化设置失败")?;
        std::fs::write(path, content)
            .with_context(|| format!("写入设置文件失败: {:?}", path))?;

        tracing::info!("设置已保存: {:?}", path);
        Ok(())
    }

    /// 保存设置到默认位置，返回保存路径
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::settings_path().context("无法获取配置目录")?;
        self.save_to(&path)?;
        Ok(path)
    }
}
