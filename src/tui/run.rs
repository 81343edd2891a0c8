use std::io;
use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::state::TuiState;
use super::views::{draw_help_overlay, draw_main_view};
use crate::model::Metric;

pub fn run(mut state: TuiState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut terminal = match enter_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            restore_terminal();
            return Err(err);
        }
    };

    let result = event_loop(&mut terminal, &mut state);

    execute!(io::stdout(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    result
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;
    Ok(terminal)
}

/// Best effort; the setup error is what gets reported.
fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, state: &mut TuiState) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.size();
            draw_main_view(f, size, state);
            if state.show_help {
                draw_help_overlay(f, size);
            }
        })?;

        if !poll(std::time::Duration::from_millis(200))? {
            continue;
        }
        if let Event::Key(key_event) = read()? {
            if key_event.kind != KeyEventKind::Press {
                continue;
            }
            if !handle_key(state, key_event.code) {
                return Ok(());
            }
        }
    }
}

/// Applies one key press; `false` means quit.
pub fn handle_key(state: &mut TuiState, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Char('h') | KeyCode::F(1) => state.show_help = !state.show_help,
        KeyCode::Char('a') => state.enable_all(),
        KeyCode::Tab => state.cycle_solo(),
        KeyCode::Char(c @ '1'..='4') => {
            let idx = c as usize - '1' as usize;
            state.toggle(Metric::ALL[idx]);
        }
        _ => {}
    }
    true
}
