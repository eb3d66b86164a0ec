use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;

use super::app::{App, Mode};
use super::ui;

/// Handle text editing operations on a buffer with UTF-8 aware cursor
/// movement.
fn handle_text_input(buffer: &mut String, cursor: &mut usize, key: event::KeyEvent) {
    match key.code {
        KeyCode::Left => {
            if *cursor > 0 {
                let mut new_pos = *cursor - 1;
                while new_pos > 0 && !buffer.is_char_boundary(new_pos) {
                    new_pos -= 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Right => {
            if *cursor < buffer.len() {
                let mut new_pos = *cursor + 1;
                while new_pos < buffer.len() && !buffer.is_char_boundary(new_pos) {
                    new_pos += 1;
                }
                *cursor = new_pos;
            }
        }
        KeyCode::Home => {
            *cursor = 0;
        }
        KeyCode::End => {
            *cursor = buffer.len();
        }
        KeyCode::Backspace => {
            if *cursor > 0 {
                let mut del_start = *cursor - 1;
                while del_start > 0 && !buffer.is_char_boundary(del_start) {
                    del_start -= 1;
                }
                buffer.drain(del_start..*cursor);
                *cursor = del_start;
            }
        }
        KeyCode::Delete => {
            if *cursor < buffer.len() {
                let mut del_end = *cursor + 1;
                while del_end < buffer.len() && !buffer.is_char_boundary(del_end) {
                    del_end += 1;
                }
                buffer.drain(*cursor..del_end);
            }
        }
        KeyCode::Char(c) => {
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT {
                buffer.insert(*cursor, c);
                *cursor += c.len_utf8();
            }
        }
        _ => {}
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match event::read()? {
            Event::Key(key) => {
                // Only process key press events (Windows reports Press + Release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let quit = match app.mode {
                    Mode::Normal => handle_normal_key(app, key),
                    Mode::Edit => {
                        handle_edit_key(app, key);
                        false
                    }
                    Mode::Command => handle_command_key(app, key),
                };
                if quit {
                    return Ok(());
                }
            }
            Event::Resize(..) => {}
            _ => {}
        }
    }
}

fn handle_normal_key(app: &mut App, key: event::KeyEvent) -> bool {
    let previous_status = std::mem::take(&mut app.status_message);
    match key.code {
        KeyCode::Char('q') => return app.request_quit(),
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1, 0),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(0, 1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(0, -1),
        KeyCode::PageDown => app.move_cursor(0, app.visible_rows as i32),
        KeyCode::PageUp => app.move_cursor(0, -(app.visible_rows as i32)),
        KeyCode::Home => app.move_cursor(-(planline_core::Field::ALL.len() as i32), 0),
        KeyCode::End => app.move_cursor(planline_core::Field::ALL.len() as i32, 0),
        KeyCode::Char('g') => app.goto_first(),
        KeyCode::Char('G') => app.goto_last(),
        KeyCode::Char('i') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('a') => app.add_row(),
        KeyCode::Char('d') => app.delete_row(),
        KeyCode::Char(':') => {
            app.mode = Mode::Command;
            app.command_buffer.clear();
            app.command_cursor = 0;
        }
        KeyCode::Esc => {}
        _ => {
            // Unhandled keys keep a pending status message visible.
            app.status_message = previous_status;
        }
    }
    false
}

fn handle_edit_key(app: &mut App, key: event::KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        // Tab commits and edits the next field in the row.
        KeyCode::Tab => {
            app.commit_edit();
            app.move_cursor(1, 0);
            app.begin_edit();
        }
        _ => handle_text_input(&mut app.edit_buffer, &mut app.edit_cursor, key),
    }
}

fn handle_command_key(app: &mut App, key: event::KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.command_buffer.clear();
            app.command_cursor = 0;
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => return app.execute_command(),
        KeyCode::Backspace if app.command_buffer.is_empty() => {
            app.mode = Mode::Normal;
        }
        _ => handle_text_input(&mut app.command_buffer, &mut app.command_cursor, key),
    }
    false
}
