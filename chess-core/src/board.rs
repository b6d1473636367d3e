//! 棋盘状态

use serde::{Deserialize, Serialize};

use crate::constants::{BLACK_HOME_ROW, BOARD_SIZE, SQUARE_COUNT, WHITE_HOME_ROW};
use crate::error::ChessError;
use crate::piece::{Piece, PieceType, Position, Side};

/// 底线棋子排列（a 列到 h 列）
const BACK_RANK: [PieceType; BOARD_SIZE] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// 棋盘
///
/// 序列化为 64 个格子的数组，反序列化时检查格子数量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<Piece>>", into = "Vec<Option<Piece>>")]
pub struct Board {
    /// 8x8 棋盘，索引为 row * 8 + col，每个格子独立持有自己的棋子
    squares: Vec<Option<Piece>>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty() -> Self {
        Self {
            squares: vec![None; SQUARE_COUNT],
        }
    }

    /// 创建初始棋盘
    pub fn initial() -> Self {
        let mut board = Self::empty();

        for (col, piece_type) in BACK_RANK.iter().enumerate() {
            let col = col as u8;

            // 黑方（上方，第 0 行为底线）
            board.set(
                Position::new_unchecked(BLACK_HOME_ROW, col),
                Some(Piece::new(*piece_type, Side::Black)),
            );
            board.set(
                Position::new_unchecked(Side::Black.pawn_row(), col),
                Some(Piece::new(PieceType::Pawn, Side::Black)),
            );

            // 白方（下方，第 7 行为底线）
            board.set(
                Position::new_unchecked(WHITE_HOME_ROW, col),
                Some(Piece::new(*piece_type, Side::White)),
            );
            board.set(
                Position::new_unchecked(Side::White.pawn_row(), col),
                Some(Piece::new(PieceType::Pawn, Side::White)),
            );
        }

        board
    }

    /// 获取指定位置的棋子
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if pos.is_valid() {
            self.squares[pos.to_index()]
        } else {
            None
        }
    }

    /// 指定位置是否为空
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos).is_none()
    }

    /// 设置指定位置的棋子
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_valid() {
            self.squares[pos.to_index()] = piece;
        }
    }

    /// 移动棋子（不检查规则），返回被吃的棋子
    pub fn move_piece(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.get(from);
        let captured = self.get(to);
        self.set(from, None);
        self.set(to, piece);
        captured
    }

    /// 获取指定阵营的所有棋子位置
    pub fn pieces(&self, side: Side) -> Vec<(Position, Piece)> {
        self.all_pieces()
            .into_iter()
            .filter(|(_, piece)| piece.side == side)
            .collect()
    }

    /// 获取所有棋子（行优先顺序）
    pub fn all_pieces(&self) -> Vec<(Position, Piece)> {
        Position::all()
            .filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
            .collect()
    }
}

impl TryFrom<Vec<Option<Piece>>> for Board {
    type Error = ChessError;

    fn try_from(squares: Vec<Option<Piece>>) -> Result<Self, Self::Error> {
        if squares.len() != SQUARE_COUNT {
            return Err(ChessError::InvalidBoard {
                squares: squares.len(),
            });
        }
        Ok(Self { squares })
    }
}

impl From<Board> for Vec<Option<Piece>> {
    fn from(board: Board) -> Self {
        board.squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
