//! 棋盘渲染

use chess_core::{GameState, MoveValidator, Notation, Piece, Position, Side, BOARD_SIZE};

use crate::settings::{BoardFlip, CliSettings, GlyphStyle};

/// 获取棋子符号
fn glyph(piece: Piece, style: GlyphStyle) -> char {
    match style {
        GlyphStyle::Unicode => piece.display_char(),
        GlyphStyle::Ascii => piece.to_fen_char(),
    }
}

/// 屏幕最下方一行是否为白方底线
fn white_at_bottom(state: &GameState, flip: BoardFlip) -> bool {
    match flip {
        BoardFlip::WhiteBottom => true,
        BoardFlip::BlackBottom => false,
        BoardFlip::Auto => state.current_player() == Side::White,
    }
}

/// 渲染单个格子（固定 3 个字符宽）
fn render_square(state: &GameState, pos: Position, settings: &CliSettings) -> String {
    let piece = state.board().get(pos);
    let symbol = piece.map_or('.', |p| glyph(p, settings.glyph_style));

    if state.selected_position() == Some(pos) {
        return format!("[{}]", symbol);
    }

    let is_target = settings.show_move_hints && state.valid_moves().contains(&pos);
    match (is_target, piece) {
        (true, Some(_)) => format!("({})", symbol),
        (true, None) => " * ".to_string(),
        (false, _) => {
            let recent = state
                .last_move()
                .is_some_and(|mv| mv.from == pos || mv.to == pos);
            if recent {
                format!("'{}'", symbol)
            } else {
                format!(" {} ", symbol)
            }
        }
    }
}

/// 渲染棋盘
pub fn render_board(state: &GameState, settings: &CliSettings) -> String {
    let mut rows: Vec<u8> = (0..BOARD_SIZE as u8).collect();
    let mut cols: Vec<u8> = (0..BOARD_SIZE as u8).collect();
    if !white_at_bottom(state, settings.board_flip) {
        rows.reverse();
        cols.reverse();
    }

    let mut output = String::new();

    for &row in &rows {
        if settings.show_coordinates {
            output.push_str(&format!("{} ", BOARD_SIZE - row as usize));
        }
        for &col in &cols {
            output.push_str(&render_square(state, Position::new_unchecked(row, col), settings));
        }
        output.push('\n');
    }

    if settings.show_coordinates {
        output.push_str("  ");
        for &col in &cols {
            let name = Notation::square_name(Position::new_unchecked(0, col));
            output.push_str(&format!(" {} ", &name[..1]));
        }
        output.push('\n');
    }

    output
}

/// 渲染走子方提示
pub fn render_status(state: &GameState) -> String {
    let side = state.current_player();
    match state.selected_position() {
        Some(from) => format!(
            "{} to move, {} selected ({} destinations)",
            side,
            Notation::square_name(from),
            state.valid_moves().len()
        ),
        None => {
            let available = MoveValidator::all_moves(state.board(), side).len();
            format!("{} to move ({} moves available)", side, available)
        }
    }
}

/// 渲染被吃掉的棋子（按被吃棋子的颜色分组）
pub fn render_captured(state: &GameState, settings: &CliSettings) -> String {
    let captured = state.captured_pieces();
    [Side::White, Side::Black]
        .iter()
        .map(|&side| {
            let pieces: String = captured
                .of(side)
                .iter()
                .map(|&piece| glyph(piece, settings.glyph_style))
                .collect();
            format!("{} lost: {}", side, if pieces.is_empty() { "-" } else { pieces.as_str() })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii() -> CliSettings {
        CliSettings {
            glyph_style: GlyphStyle::Ascii,
            show_coordinates: false,
            ..CliSettings::default()
        }
    }

    #[test]
    fn test_render_initial_board() {
        let board = render_board(&GameState::initial(), &ascii());
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], " r  n  b  q  k  b  n  r ");
        assert_eq!(lines[7], " R  N  B  Q  K  B  N  R ");
        assert_eq!(lines[3], " .  .  .  .  .  .  .  . ");
    }

    #[test]
    fn test_render_selection_and_hints() {
        let (state, _) = GameState::initial().apply_click(Position::new_unchecked(6, 4));
        let board = render_board(&state, &ascii());
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines[6], " P  P  P  P [P] P  P  P ");
        assert_eq!(lines[5], " .  .  .  .  *  .  .  . ");
        assert_eq!(lines[4], " .  .  .  .  *  .  .  . ");

        let no_hints = CliSettings {
            show_move_hints: false,
            ..ascii()
        };
        let board = render_board(&state, &no_hints);
        assert!(!board.contains('*'));
    }

    #[test]
    fn test_render_flipped() {
        let settings = CliSettings {
            board_flip: BoardFlip::BlackBottom,
            ..ascii()
        };
        let board = render_board(&GameState::initial(), &settings);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines[0], " R  N  B  K  Q  B  N  R ");
        assert_eq!(lines[7], " r  n  b  k  q  b  n  r ");
    }

    #[test]
    fn test_render_coordinates() {
        let settings = CliSettings {
            glyph_style: GlyphStyle::Ascii,
            ..CliSettings::default()
        };
        let board = render_board(&GameState::initial(), &settings);
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("8 "));
        assert!(lines[7].starts_with("1 "));
        assert_eq!(lines[8], "   a  b  c  d  e  f  g  h ");
    }

    #[test]
    fn test_render_status() {
        let state = GameState::initial();
        assert_eq!(render_status(&state), "White to move (20 moves available)");

        let (state, _) = state.apply_click(Position::new_unchecked(7, 6));
        assert_eq!(render_status(&state), "White to move, g1 selected (2 destinations)");
    }

    #[test]
    fn test_render_captured() {
        let state = GameState::initial();
        assert_eq!(render_captured(&state, &ascii()), "White lost: -\nBlack lost: -");
    }
}
