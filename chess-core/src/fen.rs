//! FEN 格式解析和生成
//!
//! 只使用前两个字段：`<棋盘> <走子方>`。
//! 王车易位、吃过路兵等字段即使存在也会被忽略。
//!
//! 示例：
//! `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w`

use crate::board::Board;
use crate::constants::BOARD_SIZE;
use crate::error::ChessError;
use crate::game::GameState;
use crate::piece::{Piece, Position, Side};

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为对局状态
    pub fn parse(fen: &str) -> Result<GameState, ChessError> {
        let mut parts = fen.split_whitespace();
        let Some(board_str) = parts.next() else {
            return Err(ChessError::InvalidFen {
                reason: "Empty FEN string".to_string(),
            });
        };

        let board = Self::parse_board(board_str)?;

        // 解析走子方（默认白方）
        let current_player = match parts.next() {
            Some(side) => {
                let mut chars = side.chars();
                match (chars.next().and_then(Side::from_fen_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => {
                        return Err(ChessError::InvalidFen {
                            reason: format!("Invalid side to move: {}", side),
                        })
                    }
                }
            }
            None => Side::White,
        };

        Ok(GameState::from_board(board, current_player))
    }

    /// 解析棋盘部分
    fn parse_board(board_str: &str) -> Result<Board, ChessError> {
        let mut board = Board::empty();
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(ChessError::InvalidFen {
                reason: format!("Expected {} rows, got {}", BOARD_SIZE, rows.len()),
            });
        }

        // FEN 从上到下依次是第 0 行到第 7 行
        for (row, row_str) in rows.iter().enumerate() {
            let mut col = 0usize;

            for c in row_str.chars() {
                if col >= BOARD_SIZE {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Row {} has too many columns", row),
                    });
                }

                if let Some(empty_count) = c.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    col += empty_count as usize;
                } else if let Some(piece) = Piece::from_fen_char(c) {
                    board.set(Position::new_unchecked(row as u8, col as u8), Some(piece));
                    col += 1;
                } else {
                    return Err(ChessError::InvalidFen {
                        reason: format!("Invalid piece character: {}", c),
                    });
                }
            }

            if col != BOARD_SIZE {
                return Err(ChessError::InvalidFen {
                    reason: format!("Row {} has {} columns, expected {}", row, col, BOARD_SIZE),
                });
            }
        }

        Ok(board)
    }

    /// 将对局状态转换为 FEN 字符串
    pub fn to_string(state: &GameState) -> String {
        format!(
            "{} {}",
            Self::board_to_string(state.board()),
            state.current_player().to_fen_char()
        )
    }

    /// 将棋盘转换为 FEN 棋盘部分
    pub fn board_to_string(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);

        for row in 0..BOARD_SIZE as u8 {
            let mut row_str = String::new();
            let mut empty_count = 0;

            for col in 0..BOARD_SIZE as u8 {
                if let Some(piece) = board.get(Position::new_unchecked(row, col)) {
                    if empty_count > 0 {
                        row_str.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    row_str.push(piece.to_fen_char());
                } else {
                    empty_count += 1;
                }
            }

            if empty_count > 0 {
                row_str.push_str(&empty_count.to_string());
            }

            rows.push(row_str);
        }

        rows.join("/")
    }
}
