//! The only writer to the terminal. Every region update goes through one
//! lock so loops drawing at the same time can't interleave escape sequences.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::Print,
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use parking_lot::Mutex;

use crate::screen::{self, Layout};

struct Sink {
    out: Box<dyn Write + Send>,
    /// Column just past the echoed input, where the cursor rests between draws.
    prompt_col: u16,
}

pub struct Console {
    sink: Mutex<Sink>,
    layout: Layout,
}

impl Console {
    pub fn new(out: impl Write + Send + 'static, layout: Layout) -> Self {
        Self {
            sink: Mutex::new(Sink {
                out: Box::new(out),
                prompt_col: 0,
            }),
            layout,
        }
    }

    pub fn stdout(layout: Layout) -> Self {
        Self::new(io::stdout(), layout)
    }

    /// Clears the screen and draws the title and an empty prompt.
    pub fn draw_frame(&self) -> io::Result<()> {
        let mut sink = self.sink.lock();
        sink.out.queue(Clear(ClearType::All))?;
        write_row(&mut *sink.out, self.layout.title_row, screen::TITLE)?;
        self.write_prompt(&mut sink, "")?;
        sink.out.flush()
    }

    pub fn draw_board(&self, lines: &[String]) -> io::Result<()> {
        self.draw_rows(self.layout.board_top, lines)
    }

    pub fn draw_progress(&self, line: &str) -> io::Result<()> {
        self.draw_rows(self.layout.progress_row, &[line.to_string()])
    }

    pub fn draw_mascot(&self, face: &[&str]) -> io::Result<()> {
        let lines: Vec<String> = face.iter().map(|l| (*l).to_string()).collect();
        self.draw_rows(self.layout.mascot_top, &lines)
    }

    pub fn draw_message(&self, text: &str) -> io::Result<()> {
        self.draw_rows(self.layout.message_row, &[text.to_string()])
    }

    pub fn draw_choices(&self, choices: &[String]) -> io::Result<()> {
        self.draw_rows(self.layout.choices_top, &screen::choice_rows(choices))
    }

    pub fn draw_prompt(&self, buffer: &str) -> io::Result<()> {
        let mut sink = self.sink.lock();
        self.write_prompt(&mut sink, buffer)?;
        sink.out.flush()
    }

    /// Overwrites consecutive rows starting at `top`, then parks the cursor
    /// back at the end of the prompt.
    fn draw_rows(&self, top: u16, lines: &[String]) -> io::Result<()> {
        let mut sink = self.sink.lock();
        for (row, line) in (top..).zip(lines) {
            write_row(&mut *sink.out, row, line)?;
        }
        let col = sink.prompt_col;
        sink.out.queue(cursor::MoveTo(col, self.layout.prompt_row))?;
        sink.out.flush()
    }

    fn write_prompt(&self, sink: &mut Sink, buffer: &str) -> io::Result<()> {
        let line = screen::prompt_line(buffer);
        write_row(&mut *sink.out, self.layout.prompt_row, &line)?;
        sink.prompt_col = u16::try_from(line.len()).unwrap_or(u16::MAX);
        Ok(())
    }
}

fn write_row(out: &mut dyn Write, row: u16, text: &str) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, row))?
        .queue(Clear(ClearType::CurrentLine))?
        .queue(Print(text))?;
    Ok(())
}
