use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, BorderType, Borders};

use crate::app::{App, DisplayConfig, RunState, MAX_TRAJECTORIES};

// Fixed orthographic viewing angle, the usual 3D-plot default.
const AZIMUTH_DEG: f64 = -60.0;
const ELEVATION_DEG: f64 = 30.0;

/// Orthographic projection of a phase-space point onto the screen plane.
pub fn project(p: [f64; 3]) -> (f64, f64) {
    let (sin_a, cos_a) = AZIMUTH_DEG.to_radians().sin_cos();
    let (sin_e, cos_e) = ELEVATION_DEG.to_radians().sin_cos();
    let [x, y, z] = p;
    // Screen right is (-sin a, cos a, 0); screen up tilts z by the elevation.
    let sx = -x * sin_a + y * cos_a;
    let sy = -x * cos_a * sin_e - y * sin_a * sin_e + z * cos_e;
    (sx, sy)
}

/// Canvas bounds that contain the projected axis box at the current scale,
/// with a small margin so the axis labels stay inside the viewport.
pub fn canvas_bounds(config: &DisplayConfig) -> ([f64; 2], [f64; 2]) {
    let (xb, yb, zb) = config.axis_bounds();
    let mut min = (f64::MAX, f64::MAX);
    let mut max = (f64::MIN, f64::MIN);
    for &x in &xb {
        for &y in &yb {
            for &z in &zb {
                let (sx, sy) = project([x, y, z]);
                min.0 = min.0.min(sx);
                min.1 = min.1.min(sy);
                max.0 = max.0.max(sx);
                max.1 = max.1.max(sy);
            }
        }
    }
    let pad_x = (max.0 - min.0) * 0.05;
    let pad_y = (max.1 - min.1) * 0.05;
    (
        [min.0 - pad_x, max.0 + pad_x],
        [min.1 - pad_y, max.1 + pad_y],
    )
}

pub fn render_plot(frame: &mut Frame, area: Rect, app: &App) {
    let total = app.sim.params.total_steps;
    let title = match app.run_state {
        RunState::Idle => " Lorenz Attractor ".to_string(),
        RunState::Running => format!(
            " Lorenz Attractor — step {}/{} ",
            app.sim.steps_taken(),
            total
        ),
        RunState::Stopped => format!(
            " Lorenz Attractor — stopped at {}/{} ",
            app.sim.steps_taken(),
            total
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );

    let (x_bounds, y_bounds) = canvas_bounds(&app.config);
    let canvas = Canvas::default()
        .block(block)
        .background_color(app.config.background_color)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            if !app.config.hide_axis {
                draw_axes(ctx, app);
            }
            draw_trajectories(ctx, app);
        });
    frame.render_widget(canvas, area);
}

fn draw_axes(ctx: &mut Context, app: &App) {
    let (xb, yb, zb) = app.config.axis_bounds();
    let color = app.config.axis_color;
    let axes = [
        ([xb[0], 0.0, 0.0], [xb[1], 0.0, 0.0], "x"),
        ([0.0, yb[0], 0.0], [0.0, yb[1], 0.0], "y"),
        ([0.0, 0.0, zb[0]], [0.0, 0.0, zb[1]], "z"),
    ];
    for (from, to, label) in axes {
        let (x1, y1) = project(from);
        let (x2, y2) = project(to);
        ctx.draw(&CanvasLine {
            x1,
            y1,
            x2,
            y2,
            color,
        });
        ctx.print(x2, y2, Span::styled(label, Style::default().fg(color)));
    }
}

fn draw_trajectories(ctx: &mut Context, app: &App) {
    for (i, trajectory) in app.sim.trajectories.iter().enumerate() {
        let color = app.config.trajectory_colors[i.min(MAX_TRAJECTORIES - 1)];
        // Full-history re-plot every frame, matching the run controller's
        // clear-and-redraw contract.
        for pair in trajectory.history.windows(2) {
            let (x1, y1) = project(pair[0]);
            let (x2, y2) = project(pair[1]);
            ctx.draw(&CanvasLine {
                x1,
                y1,
                x2,
                y2,
                color,
            });
        }
    }
}
