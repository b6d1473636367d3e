//! 对局控制
//!
//! 把一次次点击转换成新的对局状态。每次点击都会生成一个全新的 `GameState`，
//! 旧状态不会被原地修改。

use serde::Serialize;
use tracing::{debug, info};

use crate::board::Board;
use crate::moves::{Move, MoveValidator};
use crate::piece::{Piece, Position, Side};

/// 选子状态
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum Selection {
    /// 未选中棋子
    #[default]
    Idle,
    /// 已选中棋子，目标格已预先算好
    Armed {
        from: Position,
        valid_moves: Vec<Position>,
    },
}

impl Selection {
    /// 选中的位置
    pub fn selected_position(&self) -> Option<Position> {
        match self {
            Selection::Idle => None,
            Selection::Armed { from, .. } => Some(*from),
        }
    }

    /// 选中棋子的合法目标格（未选中时为空）
    pub fn valid_moves(&self) -> &[Position] {
        match self {
            Selection::Idle => &[],
            Selection::Armed { valid_moves, .. } => valid_moves,
        }
    }
}

/// 被吃掉的棋子，按被吃棋子自身的颜色分组
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CapturedPieces {
    white: Vec<Piece>,
    black: Vec<Piece>,
}

impl CapturedPieces {
    /// 指定颜色被吃掉的棋子（按被吃顺序）
    pub fn of(&self, side: Side) -> &[Piece] {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    /// 记录一个被吃掉的棋子
    fn push(&mut self, piece: Piece) {
        match piece.side {
            Side::White => self.white.push(piece),
            Side::Black => self.black.push(piece),
        }
    }

    /// 被吃掉的棋子总数
    pub fn len(&self) -> usize {
        self.white.len() + self.black.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 一次点击产生的状态变化
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// 走了一步棋
    Moved(Move),
    /// 选中（或改选）了一个己方棋子
    Selected {
        from: Position,
        destinations: Vec<Position>,
    },
    /// 取消选择
    Deselected,
    /// 无效点击，状态不变
    Ignored,
}

/// 对局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current_player: Side,
    selection: Selection,
    captured: CapturedPieces,
    last_move: Option<Move>,
    history: Vec<Move>,
}

impl GameState {
    /// 标准开局，白方先走
    pub fn initial() -> Self {
        Self::from_board(Board::initial(), Side::White)
    }

    /// 从任意棋盘开始
    pub fn from_board(board: Board, current_player: Side) -> Self {
        Self {
            board,
            current_player,
            selection: Selection::Idle,
            captured: CapturedPieces::default(),
            last_move: None,
            history: Vec::new(),
        }
    }

    /// 当前棋盘
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// 当前走子方
    pub fn current_player(&self) -> Side {
        self.current_player
    }

    /// 选子状态
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// 选中的位置
    pub fn selected_position(&self) -> Option<Position> {
        self.selection.selected_position()
    }

    /// 选中棋子的合法目标格
    pub fn valid_moves(&self) -> &[Position] {
        self.selection.valid_moves()
    }

    /// 被吃掉的棋子
    pub fn captured_pieces(&self) -> &CapturedPieces {
        &self.captured
    }

    /// 最后一步走法
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }

    /// 已走过的所有走法
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// 处理一次点击，返回新的状态和发生的变化
    pub fn apply_click(&self, pos: Position) -> (GameState, Transition) {
        if let Selection::Armed { from, valid_moves } = &self.selection {
            if valid_moves.contains(&pos) {
                if let Some(piece) = self.board.get(*from) {
                    let (next, mv) = self.execute_move(*from, pos, piece);
                    return (next, Transition::Moved(mv));
                }
            }
        }

        if let Some(piece) = self.own_piece_at(pos) {
            return self.select(pos, piece);
        }

        match self.selection {
            Selection::Armed { .. } => {
                let mut next = self.clone();
                next.selection = Selection::Idle;
                (next, Transition::Deselected)
            }
            Selection::Idle => (self.clone(), Transition::Ignored),
        }
    }

    /// 重新开局（任意状态都可以）
    pub fn reset(&self) -> GameState {
        Self::initial()
    }

    /// 当前走子方在该位置的棋子
    fn own_piece_at(&self, pos: Position) -> Option<Piece> {
        self.board
            .get(pos)
            .filter(|piece| piece.side == self.current_player)
    }

    /// 选中棋子并计算合法目标格
    fn select(&self, from: Position, piece: Piece) -> (GameState, Transition) {
        let destinations = MoveValidator::legal_destinations(&self.board, from, piece);

        let mut next = self.clone();
        next.selection = Selection::Armed {
            from,
            valid_moves: destinations.clone(),
        };
        (next, Transition::Selected { from, destinations })
    }

    /// 执行走法：记录吃子、移动棋子、切换走子方
    fn execute_move(&self, from: Position, to: Position, piece: Piece) -> (GameState, Move) {
        let mut board = self.board.clone();
        let mut captured = self.captured.clone();

        // 目标格只可能是空格或敌方棋子
        let mv = match board.move_piece(from, to) {
            Some(target) => {
                captured.push(target);
                Move::with_capture(from, to, piece, target)
            }
            None => Move::new(from, to, piece),
        };

        let mut history = self.history.clone();
        history.push(mv);

        let next = GameState {
            board,
            current_player: self.current_player.opponent(),
            selection: Selection::Idle,
            captured,
            last_move: Some(mv),
            history,
        };
        (next, mv)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

/// 对局控制器
///
/// 供界面层调用：点击格子、请求重开，并随时查询当前状态。
#[derive(Debug, Clone, Default)]
pub struct GameController {
    state: GameState,
}

impl GameController {
    /// 从标准开局开始
    pub fn new() -> Self {
        Self::default()
    }

    /// 从指定状态开始
    pub fn with_state(state: GameState) -> Self {
        Self { state }
    }

    /// 当前状态
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// 点击格子
    pub fn on_square_click(&mut self, pos: Position) -> Transition {
        let (next, transition) = self.state.apply_click(pos);

        match &transition {
            Transition::Moved(mv) => {
                info!(side = %mv.piece.side, "走棋 {}", mv);
                if let Some(captured) = mv.captured {
                    debug!("吃子 {:?}", captured);
                }
            }
            Transition::Selected { from, destinations } => {
                debug!("选中 {}，{} 个目标格", from, destinations.len());
            }
            Transition::Deselected => debug!("取消选择"),
            Transition::Ignored => debug!("忽略点击 {}", pos),
        }

        self.state = next;
        transition
    }

    /// 重新开局
    pub fn on_reset_requested(&mut self) {
        info!("重新开局，之前共走了 {} 步", self.state.history().len());
        self.state = self.state.reset();
    }
}
