use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Control, RunState};
use crate::ui::color_name;

const SLIDER_WIDTH: usize = 10;

pub fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" Controls ")
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![status_line(app), Line::from("")];
    for (idx, control) in app.controls().into_iter().enumerate() {
        lines.push(control_line(app, control, idx == app.focus));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn status_line(app: &App) -> Line<'static> {
    let (label, color) = match app.run_state {
        RunState::Idle => ("IDLE", Color::Rgb(120, 120, 140)),
        RunState::Running => ("RUNNING", Color::Rgb(80, 220, 80)),
        RunState::Stopped => ("STOPPED", Color::Rgb(255, 220, 80)),
    };
    let mut spans = vec![
        Span::styled(" ● ", Style::default().fg(color)),
        Span::styled(
            label.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ];
    if app.run_state != RunState::Idle {
        spans.push(Span::styled(
            format!("  {}/{}", app.sim.steps_taken(), app.sim.params.total_steps),
            Style::default().fg(Color::Rgb(120, 120, 140)),
        ));
    }
    Line::from(spans)
}

fn control_line(app: &App, control: Control, focused: bool) -> Line<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Rgb(180, 180, 200))
    };
    let dim = Style::default().fg(Color::Rgb(120, 120, 140));

    let mut spans = vec![Span::styled(
        marker.to_string(),
        Style::default().fg(Color::Rgb(255, 220, 80)),
    )];

    match control {
        Control::TrajectoryCount => {
            spans.push(Span::styled("Trajectories ", label_style));
            spans.push(Span::styled(
                format!("◂ {} ▸", app.config.trajectory_count),
                Style::default().fg(Color::White),
            ));
        }
        Control::HideAxis => {
            let mark = if app.config.hide_axis { "x" } else { " " };
            spans.push(Span::styled(format!("[{mark}] "), Style::default().fg(Color::White)));
            spans.push(Span::styled("Hide axis", label_style));
        }
        Control::Scale => {
            spans.push(Span::styled("Scale ", label_style));
            let frac = (app.config.view_scale - 0.5) / 1.5;
            spans.push(Span::styled(slider(frac), Style::default().fg(Color::Rgb(80, 200, 255))));
            spans.push(Span::styled(
                format!(" {:.1}", app.config.view_scale),
                Style::default().fg(Color::White),
            ));
        }
        Control::Speed => {
            spans.push(Span::styled("Speed ", label_style));
            let frac = (app.config.speed as f64 - 10.0) / 490.0;
            spans.push(Span::styled(slider(frac), Style::default().fg(Color::Rgb(80, 200, 255))));
            spans.push(Span::styled(
                format!(" {}", app.config.speed),
                Style::default().fg(Color::White),
            ));
        }
        Control::TrajectoryColor(i) => {
            let color = app.config.trajectory_colors[i];
            spans.push(Span::styled(format!("Trajectory {} ", i + 1), label_style));
            spans.push(Span::styled("████ ", Style::default().fg(color)));
            spans.push(Span::styled(color_name(color).to_string(), dim));
        }
        Control::AxisColor => {
            let color = app.config.axis_color;
            spans.push(Span::styled("Axis color ", label_style));
            spans.push(Span::styled("████ ", Style::default().fg(color)));
            spans.push(Span::styled(color_name(color).to_string(), dim));
        }
        Control::BackgroundColor => {
            let color = app.config.background_color;
            spans.push(Span::styled("Background ", label_style));
            spans.push(Span::styled("████ ", Style::default().fg(color)));
            spans.push(Span::styled(color_name(color).to_string(), dim));
        }
        Control::Start => {
            let enabled = app.run_state != RunState::Running;
            let style = if enabled {
                Style::default()
                    .fg(Color::Rgb(80, 220, 80))
                    .add_modifier(Modifier::BOLD)
            } else {
                dim
            };
            spans.push(Span::styled("[ Start ]", style));
        }
        Control::Stop => {
            let enabled = app.run_state == RunState::Running;
            let style = if enabled {
                Style::default()
                    .fg(Color::Rgb(220, 80, 80))
                    .add_modifier(Modifier::BOLD)
            } else {
                dim
            };
            spans.push(Span::styled("[ Stop ]", style));
        }
    }

    Line::from(spans)
}

fn slider(frac: f64) -> String {
    let filled = ((frac.clamp(0.0, 1.0)) * SLIDER_WIDTH as f64).round() as usize;
    let filled = filled.min(SLIDER_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(SLIDER_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_fills_across_its_range() {
        assert_eq!(slider(0.0), "░".repeat(SLIDER_WIDTH));
        assert_eq!(slider(1.0), "█".repeat(SLIDER_WIDTH));
        assert_eq!(slider(2.0), "█".repeat(SLIDER_WIDTH));
        let half = slider(0.5);
        assert_eq!(half.chars().filter(|&c| c == '█').count(), 5);
    }
}
