mod line;

pub use line::{banner, status_line};

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use crate::app::App;
use crate::format::truncate_unicode;
use crate::system::sampler::CpuTimeSource;

/// Repaints the status line in place: return to column zero, clear, print.
/// The line never scrolls; each cycle overwrites the previous one.
pub fn draw<S: CpuTimeSource>(out: &mut impl Write, app: &App<S>) -> io::Result<()> {
    let mut text = status_line(&app.utilization, &app.memory, app.show_per_core);
    if let Ok((cols, _rows)) = crossterm::terminal::size() {
        text = truncate_unicode(&text, cols as usize);
    }
    crossterm::queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(text)
    )?;
    out.flush()
}
