//! UI rendering

use super::app::{App, Mode};
use planline_core::storage::{SEQUENCE_HEADER, field_header};
use planline_core::{Field, Summary};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

pub(crate) const FIELD_BAR_HEIGHT: u16 = 3;
pub(crate) const SUMMARY_BAR_HEIGHT: u16 = 3;
pub(crate) const TABLE_MIN_HEIGHT: u16 = 5;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_BAR_HEIGHT),
            Constraint::Length(SUMMARY_BAR_HEIGHT),
            Constraint::Min(TABLE_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = split_main_chunks(f.area());

    // Visible data rows: table area minus borders and the header row.
    let table_height = chunks[2].height.saturating_sub(3) as usize;
    app.visible_rows = table_height.max(1);
    app.update_viewport();

    draw_field_bar(f, app, chunks[0]);
    draw_summary_bar(f, app, chunks[1]);
    draw_table(f, app, chunks[2]);
    draw_status_bar(f, app, chunks[3]);
}

fn draw_field_bar(f: &mut Frame, app: &App, area: Rect) {
    let label = field_header(app.current_field());

    let content = match app.mode {
        Mode::Edit => {
            let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
            format!("{}: {}│{}", label, before, after)
        }
        Mode::Command => {
            let (before, after) = app.command_buffer.split_at(app.command_cursor);
            format!(":{}│{}", before, after)
        }
        Mode::Normal => match app.document.records().get(app.cursor_row) {
            Some(record) => format!("{}: {}", label, record.get(app.current_field())),
            None => format!("{}: (no rows)", label),
        },
    };

    let title = match app.mode {
        Mode::Edit => " Edit ",
        Mode::Command => " Command ",
        Mode::Normal => " Field ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(match app.mode {
            Mode::Edit => Color::Yellow,
            Mode::Command => Color::Cyan,
            Mode::Normal => Color::White,
        }));

    f.render_widget(Paragraph::new(content).block(block), area);
}

fn draw_summary_bar(f: &mut Frame, app: &App, area: Rect) {
    let summary: Summary = app.document.summary();

    let remaining_style = if summary.remaining_budget < 0.0 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let line = Line::from(vec![
        Span::raw(format!("โครงการ: {}", summary.project_count)),
        Span::raw("  │  "),
        Span::raw(format!("ใช้ไป: {}", format_amount(summary.total_amount))),
        Span::raw("  │  "),
        Span::raw(format!("งบประมาณ: {}", format_amount(app.document.budget()))),
        Span::raw("  │  "),
        Span::styled(
            format!("คงเหลือ: {}", format_amount(summary.remaining_budget)),
            remaining_style,
        ),
    ]);

    let title = format!(
        " แผนงานและโครงการ ปีงบประมาณ {}{} ",
        app.document.fiscal_year(),
        if app.document.modified { " [+]" } else { "" },
    );

    let block = Block::default().borders(Borders::ALL).title(title);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_table(f: &mut Frame, app: &mut App, area: Rect) {
    let mut header_cells = vec![Cell::from(SEQUENCE_HEADER)];
    for field in Field::ALL {
        header_cells.push(Cell::from(field_header(field)));
    }
    let header = Row::new(header_cells)
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .height(1);

    let records = app.document.records();
    let mut rows = Vec::new();
    for row_idx in app.viewport_row..(app.viewport_row + app.visible_rows).min(records.len()) {
        let record = &records[row_idx];
        let cursor_here = row_idx == app.cursor_row;

        let seq_style = if cursor_here {
            Style::default().fg(Color::Black).bg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut cells = vec![Cell::from(format!("{}", row_idx + 1)).style(seq_style)];

        for (col_idx, field) in Field::ALL.into_iter().enumerate() {
            let editing_here =
                app.mode == Mode::Edit && cursor_here && col_idx == app.cursor_col;
            let text = if editing_here {
                app.edit_buffer.clone()
            } else {
                record.get(field).to_string()
            };
            let style = if cursor_here && col_idx == app.cursor_col {
                Style::default()
                    .fg(Color::Black)
                    .bg(if editing_here { Color::Yellow } else { Color::White })
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            cells.push(Cell::from(text).style(style));
        }
        rows.push(Row::new(cells).height(1));
    }

    let widths = [
        Constraint::Length(8),
        Constraint::Percentage(26),
        Constraint::Percentage(20),
        Constraint::Percentage(18),
        Constraint::Percentage(20),
        Constraint::Percentage(16),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let line = if !app.status_message.is_empty() {
        Line::from(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "hjkl:move  i:edit  a:add row  d:delete row  :import <f>  :w:export  :q:quit",
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

/// Format a monetary amount with comma grouping; two decimals when the
/// value is fractional.
pub(crate) fn format_amount(n: f64) -> String {
    let negative = n < 0.0;
    let abs = n.abs();

    let (int_part, frac_part) = if abs.fract() == 0.0 {
        (format!("{:.0}", abs), String::new())
    } else {
        let fixed = format!("{:.2}", abs);
        match fixed.split_once('.') {
            Some((i, f)) => (i.to_string(), format!(".{f}")),
            None => (fixed, String::new()),
        }
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}", if negative { "-" } else { "" }, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(1000.0), "1,000");
        assert_eq!(format_amount(235000.0), "235,000");
        assert_eq!(format_amount(1234567.0), "1,234,567");
    }

    #[test]
    fn test_format_amount_negative_and_fractional() {
        assert_eq!(format_amount(-135000.0), "-135,000");
        assert_eq!(format_amount(1234.5), "1,234.50");
    }

    #[test]
    fn test_split_main_chunks_layout() {
        let area = Rect::new(0, 0, 80, 24);
        let [field_bar, summary, table, status] = split_main_chunks(area);
        assert_eq!(field_bar.height, FIELD_BAR_HEIGHT);
        assert_eq!(summary.height, SUMMARY_BAR_HEIGHT);
        assert_eq!(status.height, STATUS_BAR_HEIGHT);
        assert!(table.height >= TABLE_MIN_HEIGHT);
    }
}
