//! 终端对局循环
//!
//! 逐行读取命令，把点击交给 `GameController`，再把棋盘画到输出。

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chess_core::{Fen, GameController, GameRecord, GameState, MoveValidator, Transition};
use tracing::{info, warn};

use crate::command::{Command, HELP};
use crate::render::{render_board, render_captured, render_status};
use crate::settings::CliSettings;

/// 执行命令后是否继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 终端应用
pub struct App {
    controller: GameController,
    settings: CliSettings,
    /// 通过 `load` 载入的起始局面，标准开局时为 `None`
    start_fen: Option<String>,
}

impl App {
    /// 创建应用（标准开局）
    pub fn new(settings: CliSettings) -> Self {
        Self::with_controller(GameController::new(), settings)
    }

    /// 使用指定的控制器创建应用
    pub fn with_controller(controller: GameController, settings: CliSettings) -> Self {
        Self {
            controller,
            settings,
            start_fen: None,
        }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    pub fn settings(&self) -> &CliSettings {
        &self.settings
    }

    /// 主循环：读到 `quit` 或输入结束为止
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "Type `help` for commands.")?;
        self.draw(&mut out)?;

        for line in input.lines() {
            let line = line.context("读取输入失败")?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(command) => {
                    if self.execute(command, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(e) => {
                    warn!("无效输入 {:?}: {:#}", line, e);
                    writeln!(out, "{:#}", e)?;
                }
            }
            out.flush()?;
        }

        info!("退出，共走了 {} 步", self.controller.state().history().len());
        Ok(())
    }

    /// 执行一条命令
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Click(pos) => {
                match self.controller.on_square_click(pos) {
                    Transition::Moved(mv) => writeln!(out, "{} played {}", mv.piece.side, mv)?,
                    Transition::Deselected => writeln!(out, "Selection cleared")?,
                    Transition::Ignored => {
                        writeln!(out, "Nothing to select there")?;
                        return Ok(Flow::Continue);
                    }
                    Transition::Selected { .. } => {}
                }
                self.draw(out)?;
            }
            Command::Reset => {
                self.controller.on_reset_requested();
                self.start_fen = None;
                writeln!(out, "New game")?;
                self.draw(out)?;
            }
            Command::Board => self.draw(out)?,
            Command::Moves => {
                let state = self.controller.state();
                let moves = MoveValidator::all_moves(state.board(), state.current_player());
                let names: Vec<String> = moves.iter().map(|mv| mv.to_string()).collect();
                writeln!(out, "{} ({}): {}", state.current_player(), moves.len(), names.join(" "))?;
            }
            Command::Captured => {
                writeln!(out, "{}", render_captured(self.controller.state(), &self.settings))?;
            }
            Command::History => {
                let record = self.record();
                if record.moves.is_empty() {
                    writeln!(out, "No moves yet")?;
                } else {
                    write!(out, "{}", record.to_text())?;
                }
            }
            Command::Fen => writeln!(out, "{}", Fen::to_string(self.controller.state()))?,
            Command::Export => {
                let record = self.record();
                writeln!(out, "{}", record.to_json().context("序列化棋谱失败")?)?;
            }
            Command::Load(fen) => match Fen::parse(&fen) {
                Ok(state) => self.load(state, out)?,
                Err(e) => {
                    warn!("载入局面失败 {:?}: {}", fen, e);
                    writeln!(out, "{}", e)?;
                }
            },
            Command::Flip => {
                self.settings.board_flip = self.settings.board_flip.next();
                writeln!(out, "Orientation: {}", self.settings.board_flip.display_name())?;
                self.draw(out)?;
            }
            Command::Hints => {
                self.settings.show_move_hints = !self.settings.show_move_hints;
                let label = if self.settings.show_move_hints { "on" } else { "off" };
                writeln!(out, "Move hints {}", label)?;
            }
            Command::Glyphs => {
                self.settings.glyph_style = self.settings.glyph_style.next();
                writeln!(out, "Pieces: {}", self.settings.glyph_style.display_name())?;
                self.draw(out)?;
            }
            Command::Save => match self.settings.save() {
                Ok(path) => writeln!(out, "Settings saved to {}", path.display())?,
                Err(e) => {
                    warn!("保存设置失败: {:#}", e);
                    writeln!(out, "Could not save settings: {:#}", e)?;
                }
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// 从指定局面开始新的一局
    fn load<W: Write>(&mut self, state: GameState, out: &mut W) -> Result<()> {
        let fen = Fen::to_string(&state);
        info!("载入局面 {}", fen);

        self.controller = GameController::with_state(state);
        self.start_fen = Some(fen);
        writeln!(out, "Position loaded")?;
        self.draw(out)
    }

    /// 当前对局的棋谱
    fn record(&self) -> GameRecord {
        let state = self.controller.state();
        match &self.start_fen {
            Some(fen) => GameRecord::from_state_with_initial(state, fen.clone()),
            None => GameRecord::from_state(state),
        }
    }

    /// 画出棋盘和状态行
    fn draw<W: Write>(&self, out: &mut W) -> Result<()> {
        let state = self.controller.state();
        write!(out, "{}", render_board(state, &self.settings))?;
        writeln!(out, "{}", render_status(state))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Piece, PieceType, Position, Side, INITIAL_FEN};
    use std::io::Cursor;

    fn run(script: &str) -> (App, String) {
        let mut app = App::new(CliSettings::default());
        let mut out = Vec::new();
        app.run(Cursor::new(script), &mut out).unwrap();
        (app, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_play_moves() {
        let (app, out) = run("e2\ne4\ne7\ne5\n");

        let state = app.controller().state();
        assert_eq!(state.current_player(), Side::White);
        assert_eq!(state.history().len(), 2);
        assert!(out.contains("White played e2-e4"));
        assert!(out.contains("Black played e7-e5"));
    }

    #[test]
    fn test_capture_and_captured_panel() {
        let (app, out) = run("e2\ne4\nd7\nd5\ne4\nd5\ncaptured\n");

        let state = app.controller().state();
        assert_eq!(
            state.captured_pieces().of(Side::Black),
            &[Piece::new(PieceType::Pawn, Side::Black)]
        );
        assert!(out.contains("White played e4xd5"));
        assert!(out.contains("Black lost: ♟"));
        assert!(out.contains("White lost: -"));
    }

    #[test]
    fn test_invalid_input_keeps_running() {
        let (app, out) = run("e9\nfoo\nclick 9 9\ne2\n");

        assert!(out.contains("Invalid square name"));
        assert!(out.contains("unknown command"));
        assert!(out.contains("Invalid position"));
        assert_eq!(
            app.controller().state().selected_position(),
            Some(Position::new_unchecked(6, 4))
        );
    }

    #[test]
    fn test_quit_stops_reading() {
        let (app, _) = run("e2\nquit\ne4\n");

        assert_eq!(app.controller().state().current_player(), Side::White);
        assert!(app.controller().state().history().is_empty());
    }

    #[test]
    fn test_reset_command() {
        let (app, out) = run("d2\nd4\nreset\n");

        assert_eq!(app.controller().state(), &GameState::initial());
        assert!(out.contains("New game"));
    }

    #[test]
    fn test_ignored_and_deselected_clicks() {
        let (_, out) = run("e7\ne2\nh5\n");

        assert!(out.contains("Nothing to select there"));
        assert!(out.contains("Selection cleared"));
    }

    #[test]
    fn test_fen_history_and_export() {
        let (_, out) = run("g1\nf3\nfen\nhistory\nexport\n");

        assert!(out.contains("rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b"));
        assert!(out.contains("1. g1-f3"));
        assert!(out.contains("\"notation\": \"g1-f3\""));
    }

    #[test]
    fn test_moves_command() {
        let (_, out) = run("moves\n");
        assert!(out.contains("White (20):"));
        assert!(out.contains("b1-a3"));
    }

    #[test]
    fn test_toggle_settings() {
        let (app, _) = run("flip\nhints\nglyphs\n");

        let settings = app.settings();
        assert_ne!(settings.board_flip, CliSettings::default().board_flip);
        assert!(!settings.show_move_hints);
        assert_ne!(settings.glyph_style, CliSettings::default().glyph_style);
    }

    #[test]
    fn test_load_position() {
        let (app, out) = run("load 4k3/8/8/8/8/8/4R3/4K3 w\ne2\ne8\nexport\n");

        let state = app.controller().state();
        assert!(out.contains("Position loaded"));
        assert!(out.contains("White played e2xe8"));
        assert_eq!(state.current_player(), Side::Black);
        assert_eq!(
            state.captured_pieces().of(Side::Black),
            &[Piece::new(PieceType::King, Side::Black)]
        );
        assert!(out.contains("\"initial_fen\": \"4k3/8/8/8/8/8/4R3/4K3 w\""));
        assert!(out.contains("\"final_fen\": \"4R3/8/8/8/8/8/8/4K3 b\""));
    }

    #[test]
    fn test_load_invalid_fen_keeps_game() {
        let (app, out) = run("e2\ne4\nload 8/8 w\n");

        assert!(out.contains("Invalid FEN string"));
        assert!(!out.contains("Position loaded"));
        assert_eq!(app.controller().state().history().len(), 1);
    }

    #[test]
    fn test_reset_after_load_exports_standard_start() {
        let (_, out) = run("load 4k3/8/8/8/8/8/8/4K3 b\nreset\nexport\n");
        assert!(out.contains(&format!("\"initial_fen\": \"{}\"", INITIAL_FEN)));
    }
}
