//! 坐标记谱
//!
//! 格子用 `a1`..`h8` 表示：a 列为第 0 列，第 1 横线为第 7 行（白方底线）。
//! 走法格式：`e2-e4`，吃子为 `e4xd5`。

use crate::constants::BOARD_SIZE;
use crate::error::{ChessError, Result};
use crate::moves::Move;
use crate::piece::Position;

/// 列名
const FILES: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// 坐标记谱
pub struct Notation;

impl Notation {
    /// 获取格子名称
    ///
    /// `pos` 必须在棋盘内
    pub fn square_name(pos: Position) -> String {
        debug_assert!(pos.is_valid(), "square_name: {} 不在棋盘内", pos);
        let file = FILES[pos.col as usize];
        let rank = BOARD_SIZE - pos.row as usize;
        format!("{}{}", file, rank)
    }

    /// 解析格子名称（不区分大小写）
    pub fn parse_square(input: &str) -> Result<Position> {
        let invalid = || ChessError::InvalidSquare {
            input: input.to_string(),
        };

        let mut chars = input.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let col = FILES
            .iter()
            .position(|&f| f == file.to_ascii_lowercase())
            .ok_or_else(invalid)?;
        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=BOARD_SIZE as u32).contains(r))
            .ok_or_else(invalid)?;

        Position::new((BOARD_SIZE as u32 - rank) as u8, col as u8).ok_or_else(invalid)
    }

    /// 将走法转换为坐标记谱
    pub fn coordinate(mv: &Move) -> String {
        let separator = if mv.is_capture() { 'x' } else { '-' };
        format!(
            "{}{}{}",
            Self::square_name(mv.from),
            separator,
            Self::square_name(mv.to)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Piece, PieceType, Side};

    #[test]
    fn test_square_name() {
        assert_eq!(Notation::square_name(Position::new_unchecked(7, 0)), "a1");
        assert_eq!(Notation::square_name(Position::new_unchecked(0, 7)), "h8");
        assert_eq!(Notation::square_name(Position::new_unchecked(6, 4)), "e2");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "不在棋盘内")]
    fn test_square_name_rejects_out_of_range() {
        Notation::square_name(Position::new_unchecked(9, 9));
    }

    #[test]
    fn test_parse_square() {
        assert_eq!(Notation::parse_square("e2"), Ok(Position::new_unchecked(6, 4)));
        assert_eq!(Notation::parse_square("A8"), Ok(Position::new_unchecked(0, 0)));
        assert_eq!(Notation::parse_square(" h1 "), Ok(Position::new_unchecked(7, 7)));

        for bad in ["", "e", "e9", "e0", "i1", "e22", "22"] {
            assert_eq!(
                Notation::parse_square(bad),
                Err(ChessError::InvalidSquare {
                    input: bad.to_string()
                }),
                "{:?} 应该无效",
                bad
            );
        }
    }

    #[test]
    fn test_square_name_roundtrip() {
        for pos in Position::all() {
            assert_eq!(Notation::parse_square(&Notation::square_name(pos)), Ok(pos));
        }
    }

    #[test]
    fn test_coordinate() {
        let pawn = Piece::new(PieceType::Pawn, Side::White);
        let quiet = Move::new(Position::new_unchecked(6, 4), Position::new_unchecked(4, 4), pawn);
        assert_eq!(Notation::coordinate(&quiet), "e2-e4");

        let capture = Move::with_capture(
            Position::new_unchecked(4, 4),
            Position::new_unchecked(3, 3),
            pawn,
            Piece::new(PieceType::Pawn, Side::Black),
        );
        assert_eq!(capture.to_string(), "e4xd5");
    }
}
