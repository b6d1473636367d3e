//! 输入处理
//!
//! 每行输入解析为一条命令。格子可以写成 `e2`，也可以写成行列坐标 `6 4`。

use std::str::FromStr;

use anyhow::{bail, Context};
use chess_core::{Notation, Position};

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 点击格子
    Click(Position),
    /// 重新开局
    Reset,
    /// 显示棋盘
    Board,
    /// 列出走子方的全部走法
    Moves,
    /// 显示被吃掉的棋子
    Captured,
    /// 显示走法记录
    History,
    /// 输出当前局面 FEN
    Fen,
    /// 输出 JSON 棋谱
    Export,
    /// 从 FEN 局面开始新的一局
    Load(String),
    /// 切换棋盘视角
    Flip,
    /// 切换走子提示
    Hints,
    /// 切换棋子符号
    Glyphs,
    /// 保存设置
    Save,
    /// 显示帮助
    Help,
    /// 退出
    Quit,
}

/// 帮助文本
pub const HELP: &str = "\
Commands:
  <square>            click a square, e.g. e2
  click <square>      same as above
  click <row> <col>   click by grid coordinates (row 0 = black's home rank)
  reset               start a new game
  board               redraw the board
  moves               list every move available to the side to move
  captured            show captured pieces
  history             show the moves played so far
  fen                 print the current position as FEN
  export              print the game record as JSON
  load <fen>          start from a FEN position, e.g. load 4k3/8/8/8/8/8/8/4K3 w
  flip                cycle the board orientation
  hints               toggle destination hints
  glyphs              toggle Unicode/ASCII pieces
  save                save the current settings
  help                show this help
  quit                leave";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();

        let command = match words.as_slice() {
            [] => bail!("empty command"),
            ["click", square] => Command::Click(Notation::parse_square(square)?),
            ["click", row, col] => Command::Click(parse_coordinates(row, col)?),
            ["reset"] | ["new"] => Command::Reset,
            ["board"] | ["show"] => Command::Board,
            ["moves"] => Command::Moves,
            ["captured"] => Command::Captured,
            ["history"] => Command::History,
            ["fen"] => Command::Fen,
            ["export"] => Command::Export,
            ["load", fields @ ..] if !fields.is_empty() => Command::Load(fields.join(" ")),
            ["flip"] => Command::Flip,
            ["hints"] => Command::Hints,
            ["glyphs"] => Command::Glyphs,
            ["save"] => Command::Save,
            ["help"] | ["?"] => Command::Help,
            ["quit"] | ["exit"] | ["q"] => Command::Quit,
            [square] if square.len() == 2 => Command::Click(Notation::parse_square(square)?),
            _ => bail!("unknown command: {:?} (type `help` for a list)", line.trim()),
        };

        Ok(command)
    }
}

/// 解析行列坐标
fn parse_coordinates(row: &str, col: &str) -> anyhow::Result<Position> {
    let row: i16 = row
        .parse()
        .with_context(|| format!("invalid row: {:?}", row))?;
    let col: i16 = col
        .parse()
        .with_context(|| format!("invalid column: {:?}", col))?;
    Ok(Position::try_from((row, col))?)
}
