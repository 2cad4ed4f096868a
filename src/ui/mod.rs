pub mod controls;
pub mod plot;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, ColorPicker, ColorTarget, RunState, PALETTE, PICKER_COLS};

const PANEL_WIDTH: u16 = 36;

pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PANEL_WIDTH), Constraint::Min(0)])
        .split(rows[0]);

    controls::render_controls(frame, cols[0], app);
    plot::render_plot(frame, cols[1], app);
    render_help(frame, rows[1], app);

    // Color picker overlay (renders on top of everything)
    if let Some(picker) = &app.picker {
        render_color_picker(frame, frame.area(), picker);
    }
}

/// Display name for a palette color; user-visible wherever a swatch is shown.
pub fn color_name(color: Color) -> &'static str {
    PALETTE
        .iter()
        .find(|(_, c)| *c == color)
        .map(|(name, _)| *name)
        .unwrap_or("Custom")
}

fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default()
        .fg(Color::Rgb(80, 200, 255))
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::Rgb(120, 120, 140));
    let sep = Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 80)));

    let spans = if app.picker.is_some() {
        vec![
            Span::styled(" ↑↓←→", key_style),
            Span::styled(" Choose swatch", text_style),
            sep.clone(),
            Span::styled("Enter", key_style),
            Span::styled(" Apply", text_style),
            sep,
            Span::styled("Esc", key_style),
            Span::styled(" Cancel", text_style),
        ]
    } else if app.run_state == RunState::Running {
        vec![
            Span::styled(" X", key_style),
            Span::styled(" Stop", text_style),
            sep.clone(),
            Span::styled("←→", key_style),
            Span::styled(" Adjust", text_style),
            sep,
            Span::styled("Q", key_style),
            Span::styled(" Quit", text_style),
        ]
    } else {
        vec![
            Span::styled(" ↑↓", key_style),
            Span::styled(" Focus", text_style),
            sep.clone(),
            Span::styled("←→", key_style),
            Span::styled(" Adjust", text_style),
            sep.clone(),
            Span::styled("Enter", key_style),
            Span::styled(" Activate", text_style),
            sep.clone(),
            Span::styled("S", key_style),
            Span::styled(" Start", text_style),
            sep,
            Span::styled("Q", key_style),
            Span::styled(" Quit", text_style),
        ]
    };

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn picker_title(target: ColorTarget) -> String {
    match target {
        ColorTarget::Trajectory(i) => format!(" Trajectory {} color ", i + 1),
        ColorTarget::Axis => " Axis color ".to_string(),
        ColorTarget::Background => " Background color ".to_string(),
    }
}

fn render_color_picker(frame: &mut Frame, area: Rect, picker: &ColorPicker) {
    let overlay_w = 52u16.min(area.width.saturating_sub(4));
    let overlay_h = 10u16.min(area.height.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    // Clear background
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(picker_title(picker.target))
        .title_style(
            Style::default()
                .fg(Color::Rgb(255, 220, 80))
                .add_modifier(Modifier::BOLD),
        )
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (row_idx, row) in PALETTE.chunks(PICKER_COLS).enumerate() {
        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for (col_idx, (name, color)) in row.iter().enumerate() {
            let selected = row_idx * PICKER_COLS + col_idx == picker.cursor;
            let marker = if selected { "▶" } else { " " };
            let name_style = if selected {
                Style::default()
                    .fg(Color::Rgb(255, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(120, 120, 140))
            };
            spans.push(Span::styled(
                marker.to_string(),
                Style::default().fg(Color::Rgb(255, 220, 80)),
            ));
            spans.push(Span::styled("██ ", Style::default().fg(*color)));
            spans.push(Span::styled(format!("{name:<8}"), name_style));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " Enter",
            Style::default()
                .fg(Color::Rgb(80, 200, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" apply  ", Style::default().fg(Color::Rgb(100, 100, 130))),
        Span::styled(
            "Esc",
            Style::default()
                .fg(Color::Rgb(80, 200, 255))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" keep current", Style::default().fg(Color::Rgb(100, 100, 130))),
    ]));

    let p = Paragraph::new(lines).style(Style::default().bg(Color::Rgb(15, 15, 25)));
    frame.render_widget(p, inner);
}
