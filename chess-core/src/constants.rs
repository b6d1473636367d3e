//! 规则常量定义

/// 棋盘边长（行数 = 列数）
pub const BOARD_SIZE: usize = 8;

/// 棋盘格子总数
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// 黑方底线所在行
pub const BLACK_HOME_ROW: u8 = 0;

/// 白方底线所在行
pub const WHITE_HOME_ROW: u8 = 7;

/// 黑方兵的初始行
pub const BLACK_PAWN_ROW: u8 = 1;

/// 白方兵的初始行
pub const WHITE_PAWN_ROW: u8 = 6;
