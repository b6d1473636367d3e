//! 走法验证
//!
//! 只检查几何走法、己方阻挡和滑行路径阻挡。
//! 不判断将军、将死、和棋，也没有王车易位、吃过路兵和兵升变。

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::notation::Notation;
use crate::piece::{Piece, PieceType, Position, Side};

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始位置
    pub from: Position,
    /// 目标位置
    pub to: Position,
    /// 走动的棋子
    pub piece: Piece,
    /// 被吃的棋子（如果有）
    pub captured: Option<Piece>,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Position, to: Position, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: None,
        }
    }

    /// 创建带吃子的走法
    pub fn with_capture(from: Position, to: Position, piece: Piece, captured: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured: Some(captured),
        }
    }

    /// 是否吃子
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Notation::coordinate(self))
    }
}

/// 走法验证器
pub struct MoveValidator;

impl MoveValidator {
    /// 判断棋子从 `from` 走到 `to` 是否合法
    ///
    /// 调用方保证 `from != to` 且 `piece` 就是 `from` 上的棋子，这里不再检查起点。
    pub fn is_legal_move(board: &Board, from: Position, to: Position, piece: Piece) -> bool {
        // 不能吃己方棋子
        if let Some(target) = board.get(to) {
            if target.side == piece.side {
                return false;
            }
        }

        let dr = to.row as i8 - from.row as i8;
        let dc = to.col as i8 - from.col as i8;

        match piece.piece_type {
            PieceType::Pawn => Self::is_legal_pawn_move(board, from, to, piece.side, dr, dc),
            PieceType::Knight => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
            PieceType::Bishop => Self::is_diagonal(dr, dc) && Self::is_path_clear(board, from, to),
            PieceType::Rook => Self::is_straight(dr, dc) && Self::is_path_clear(board, from, to),
            PieceType::Queen => {
                (Self::is_straight(dr, dc) || Self::is_diagonal(dr, dc))
                    && Self::is_path_clear(board, from, to)
            }
            PieceType::King => dr.abs() <= 1 && dc.abs() <= 1,
        }
    }

    /// 兵的走法
    fn is_legal_pawn_move(
        board: &Board,
        from: Position,
        to: Position,
        side: Side,
        dr: i8,
        dc: i8,
    ) -> bool {
        let direction = side.pawn_direction();
        let occupied = board.get(to).is_some();

        if dc == 0 {
            // 直进不能吃子
            if occupied {
                return false;
            }
            if dr == direction {
                return true;
            }
            // 初始行可以走两步，中间格必须为空
            from.row == side.pawn_row()
                && dr == 2 * direction
                && from
                    .offset(direction, 0)
                    .is_some_and(|middle| board.is_empty_at(middle))
        } else {
            // 斜吃，目标有子即为敌方棋子（己方已被排除）
            dc.abs() == 1 && dr == direction && occupied
        }
    }

    /// 横线或竖线
    fn is_straight(dr: i8, dc: i8) -> bool {
        (dr == 0) != (dc == 0)
    }

    /// 斜线
    fn is_diagonal(dr: i8, dc: i8) -> bool {
        dr != 0 && dr.abs() == dc.abs()
    }

    /// 检查两点之间（不含两端）是否没有棋子
    ///
    /// 只对同一横线、竖线或斜线上的两点有意义，其他情况返回 false。
    /// 不检查目标格本身。
    pub fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
        let dr = to.row as i8 - from.row as i8;
        let dc = to.col as i8 - from.col as i8;
        if !Self::is_straight(dr, dc) && !Self::is_diagonal(dr, dc) {
            return false;
        }

        let (step_r, step_c) = (dr.signum(), dc.signum());
        let mut current = from;
        while let Some(next) = current.offset(step_r, step_c) {
            if next == to {
                return true;
            }
            if board.get(next).is_some() {
                return false;
            }
            current = next;
        }
        false
    }

    /// 枚举棋子的所有合法目标格
    ///
    /// 逐一检查全部 64 个格子（行优先顺序），结果与 `is_legal_move` 一致。
    pub fn legal_destinations(board: &Board, from: Position, piece: Piece) -> Vec<Position> {
        Position::all()
            .filter(|&to| to != from && Self::is_legal_move(board, from, to, piece))
            .collect()
    }

    /// 生成指定阵营的所有合法走法
    pub fn all_moves(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (from, piece) in board.pieces(side) {
            for to in Self::legal_destinations(board, from, piece) {
                let mv = match board.get(to) {
                    Some(target) => Move::with_capture(from, to, piece, target),
                    None => Move::new(from, to, piece),
                };
                moves.push(mv);
            }
        }

        moves
    }
}
