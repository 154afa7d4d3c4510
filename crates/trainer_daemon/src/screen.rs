//! Screen layout and the text of each screen region.
//!
//! Rows, top to bottom: title, device board, level line, mascot, message,
//! solution menu, input prompt. The board height depends on the devices, so
//! the layout is computed once from their first snapshot.

use trainer_control::Progress;
use trainer_core::{DeviceSnapshot, Mood, ParamValue, SOLUTIONS_PER_MALFUNCTION};

pub const TITLE: &str = "Equipment fault trainer. Commands: start, stop, exit";
pub const MASCOT_ROWS: usize = 3;
pub const CHOICE_ROWS: usize = SOLUTIONS_PER_MALFUNCTION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub title_row: u16,
    pub board_top: u16,
    pub progress_row: u16,
    pub mascot_top: u16,
    pub message_row: u16,
    pub choices_top: u16,
    pub prompt_row: u16,
}

impl Layout {
    pub fn for_board(devices: &[DeviceSnapshot]) -> Self {
        let board_rows: usize = devices.iter().map(|d| d.parameters.len() + 1).sum();
        let board_top = 2;
        let progress_row = board_top + board_rows + 1;
        let mascot_top = progress_row + 2;
        let message_row = mascot_top + MASCOT_ROWS + 1;
        let choices_top = message_row + 2;
        let prompt_row = choices_top + CHOICE_ROWS + 1;
        Self {
            title_row: 0,
            board_top: row(board_top),
            progress_row: row(progress_row),
            mascot_top: row(mascot_top),
            message_row: row(message_row),
            choices_top: row(choices_top),
            prompt_row: row(prompt_row),
        }
    }
}

fn row(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// One header line per device, then one line per parameter. Values outside
/// the normal band are flagged with `!`.
pub fn board_lines(devices: &[DeviceSnapshot]) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, device) in devices.iter().enumerate() {
        lines.push(format!("{}. {}", index + 1, device.name));
        for param in &device.parameters {
            let value = param.value.as_f64();
            let shown = param.value.to_string();
            let flag = if value < param.normal_min || value > param.normal_max {
                " !"
            } else {
                ""
            };
            lines.push(format!(
                "    {:<16}{shown:>8}   normal {}{flag}",
                param.name,
                normal_band(param.normal_min, param.normal_max, param.value),
            ));
        }
    }
    lines
}

fn normal_band(min: f64, max: f64, value: ParamValue) -> String {
    if value.is_discrete() {
        format!("{min:.0}..{max:.0}")
    } else {
        format!("{min:.1}..{max:.1}")
    }
}

/// Empty when no game is on.
pub fn progress_line(progress: Option<Progress>) -> String {
    match progress {
        Some(p) => format!(
            "Level {}    Score {}/{}",
            p.level, p.score.total, p.score.max
        ),
        None => String::new(),
    }
}

pub fn mascot_face(mood: Mood) -> [&'static str; MASCOT_ROWS] {
    match mood {
        Mood::Happy => [" .---. ", "( ^_^ )", " '---' "],
        Mood::Neutral => [" .---. ", "( o_o )", " '---' "],
        Mood::Sad => [" .---. ", "( ;_; )", " '---' "],
        Mood::Angry => [" .---. ", "( >_< )", " '---' "],
        Mood::Blank => [" .---. ", "(     )", " '---' "],
    }
}

/// The menu padded to a fixed height so shorter menus blank the old lines.
pub fn choice_rows(choices: &[String]) -> Vec<String> {
    let mut rows: Vec<String> = choices.iter().take(CHOICE_ROWS).cloned().collect();
    rows.resize(CHOICE_ROWS, String::new());
    rows
}

pub fn prompt_line(buffer: &str) -> String {
    format!("> {buffer}")
}
