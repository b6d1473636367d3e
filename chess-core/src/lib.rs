//! 双人同屏国际象棋规则引擎
//!
//! 包含:
//! - 棋子、棋盘、位置等核心数据结构
//! - 走法验证（只检查几何走法和路径阻挡，不判断将军）
//! - 点击驱动的对局控制
//! - FEN、坐标记谱和 JSON 棋谱

mod board;
mod constants;
mod error;
mod fen;
mod game;
mod moves;
mod notation;
mod piece;
mod record;

pub use board::Board;
pub use constants::*;
pub use error::{ChessError, Result};
pub use fen::{Fen, INITIAL_FEN};
pub use game::{CapturedPieces, GameController, GameState, Selection, Transition};
pub use moves::{Move, MoveValidator};
pub use notation::Notation;
pub use piece::{Piece, PieceType, Position, Side};
pub use record::{GameRecord, MoveRecord, RECORD_VERSION};
