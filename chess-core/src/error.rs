//! 错误类型定义

use thiserror::Error;

/// 规则引擎的解析错误
///
/// 走子规则本身不会失败，只有坐标、记谱和 FEN 的解析会返回此错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// 坐标越界
    #[error("Invalid position: ({row}, {col})")]
    InvalidPosition { row: i16, col: i16 },

    /// 无效的格子名称（如 "e9"）
    #[error("Invalid square name: {input:?}")]
    InvalidSquare { input: String },

    /// 格子数量不是 64
    #[error("Invalid board: expected 64 squares, got {squares}")]
    InvalidBoard { squares: usize },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },
}

/// 规则引擎操作结果类型
pub type Result<T> = std::result::Result<T, ChessError>;
