//! 棋谱记录格式
//!
//! 把一局棋导出为 JSON，便于查看和复盘。引擎本身不保存任何文件。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fen::{Fen, INITIAL_FEN};
use crate::game::GameState;
use crate::moves::Move;
use crate::notation::Notation;
use crate::piece::{Piece, Position};

/// 棋谱版本
pub const RECORD_VERSION: &str = "1.0";

/// 走法记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 起始位置 [row, col]
    pub from: [u8; 2],
    /// 目标位置 [row, col]
    pub to: [u8; 2],
    /// 坐标记谱（如 "e2-e4"）
    pub notation: String,
    /// 被吃的棋子（FEN 字符）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<char>,
}

impl MoveRecord {
    /// 从走法创建记录
    pub fn from_move(mv: &Move) -> Self {
        Self {
            from: [mv.from.row, mv.from.col],
            to: [mv.to.row, mv.to.col],
            notation: Notation::coordinate(mv),
            captured: mv.captured.map(|piece| piece.to_fen_char()),
        }
    }

    /// 获取起始位置
    pub fn from_position(&self) -> Option<Position> {
        Position::new(self.from[0], self.from[1])
    }

    /// 获取目标位置
    pub fn to_position(&self) -> Option<Position> {
        Position::new(self.to[0], self.to[1])
    }

    /// 获取被吃的棋子
    pub fn captured_piece(&self) -> Option<Piece> {
        self.captured.and_then(Piece::from_fen_char)
    }
}

/// 完整的棋谱记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// 版本号
    pub version: String,
    /// 导出时间
    pub exported_at: DateTime<Utc>,
    /// 初始局面 FEN
    pub initial_fen: String,
    /// 走法列表
    pub moves: Vec<MoveRecord>,
    /// 当前局面 FEN
    pub final_fen: String,
}

impl GameRecord {
    /// 从标准开局的对局状态生成棋谱
    pub fn from_state(state: &GameState) -> Self {
        Self::from_state_with_initial(state, INITIAL_FEN.to_string())
    }

    /// 从自定义开局的对局状态生成棋谱
    pub fn from_state_with_initial(state: &GameState, initial_fen: String) -> Self {
        Self {
            version: RECORD_VERSION.to_string(),
            exported_at: Utc::now(),
            initial_fen,
            moves: state.history().iter().map(MoveRecord::from_move).collect(),
            final_fen: Fen::to_string(state),
        }
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 生成按回合排列的文本格式
    pub fn to_text(&self) -> String {
        let mut output = String::new();

        for (i, mv) in self.moves.iter().enumerate() {
            let round = i / 2 + 1;
            if i % 2 == 0 {
                output.push_str(&format!("{}. {}", round, mv.notation));
            } else {
                output.push_str(&format!("  {}\n", mv.notation));
            }
        }
        if self.moves.len() % 2 == 1 {
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{PieceType, Side};

    fn play(clicks: &[(u8, u8)]) -> GameState {
        clicks.iter().fold(GameState::initial(), |state, &(row, col)| {
            state.apply_click(Position::new_unchecked(row, col)).0
        })
    }

    #[test]
    fn test_game_record_json() {
        // 1. e4 d5 2. exd5
        let state = play(&[(6, 4), (4, 4), (1, 3), (3, 3), (4, 4), (3, 3)]);
        let record = GameRecord::from_state(&state);

        assert_eq!(record.moves.len(), 3);
        assert_eq!(record.moves[2].notation, "e4xd5");
        assert_eq!(record.moves[2].captured, Some('p'));
        assert_eq!(record.final_fen, Fen::to_string(&state));

        let json = record.to_json().unwrap();
        let parsed = GameRecord::from_json(&json).unwrap();
        assert_eq!(parsed.moves, record.moves);
        assert_eq!(parsed.initial_fen, INITIAL_FEN);
        assert_eq!(
            parsed.moves[2].captured_piece(),
            Some(Piece::new(PieceType::Pawn, Side::Black))
        );
    }

    #[test]
    fn test_quiet_move_omits_capture_field() {
        let state = play(&[(6, 4), (4, 4)]);
        let json = GameRecord::from_state(&state).to_json().unwrap();

        assert!(json.contains("\"e2-e4\""));
        assert!(!json.contains("captured"));
    }

    #[test]
    fn test_text_format() {
        let state = play(&[(6, 4), (4, 4), (1, 3), (3, 3), (4, 4), (3, 3)]);
        let text = GameRecord::from_state(&state).to_text();

        assert_eq!(text, "1. e2-e4  d7-d5\n2. e4xd5\n");
    }

    #[test]
    fn test_move_record_positions() {
        let state = play(&[(7, 6), (5, 5)]);
        let record = GameRecord::from_state(&state);

        assert_eq!(record.moves[0].from_position(), Some(Position::new_unchecked(7, 6)));
        assert_eq!(record.moves[0].to_position(), Some(Position::new_unchecked(5, 5)));
        assert_eq!(record.moves[0].captured_piece(), None);
    }
}
