use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;

use crate::sim::{LorenzParams, Simulation};

pub const MAX_TRAJECTORIES: usize = 5;

/// Swatch grid width in the color picker overlay.
pub const PICKER_COLS: usize = 4;

/// Named swatches offered by the color picker. The first five are the
/// default trajectory colors, in order.
pub const PALETTE: [(&str, Color); 16] = [
    ("Blue", Color::Rgb(50, 130, 220)),
    ("Red", Color::Rgb(220, 50, 50)),
    ("Green", Color::Rgb(50, 200, 50)),
    ("Purple", Color::Rgb(150, 50, 220)),
    ("Orange", Color::Rgb(255, 165, 0)),
    ("Cyan", Color::Rgb(80, 200, 255)),
    ("Yellow", Color::Rgb(220, 200, 30)),
    ("Magenta", Color::Rgb(220, 80, 220)),
    ("White", Color::Rgb(230, 230, 230)),
    ("Gray", Color::Rgb(120, 120, 140)),
    ("Slate", Color::Rgb(70, 70, 95)),
    ("Black", Color::Rgb(0, 0, 0)),
    ("Lime", Color::Rgb(140, 230, 60)),
    ("Pink", Color::Rgb(255, 120, 180)),
    ("Teal", Color::Rgb(0, 150, 140)),
    ("Navy", Color::Rgb(30, 50, 120)),
];

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum RunState {
    Idle,
    Running,
    Stopped,
}

/// Euler steps taken between consecutive redraws, derived from the speed
/// slider. Integer division would hit zero for speeds >= 1000, so the
/// interval is clamped to at least one step.
pub fn redraw_interval(speed: u32) -> u32 {
    (1000 / speed.max(1)).max(1)
}

/// Everything the render step reads and the control panel mutates.
pub struct DisplayConfig {
    pub trajectory_count: usize,
    pub trajectory_colors: [Color; MAX_TRAJECTORIES],
    pub axis_color: Color,
    pub background_color: Color,
    pub hide_axis: bool,
    pub view_scale: f64,
    pub speed: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            trajectory_count: 1,
            trajectory_colors: [
                PALETTE[0].1,
                PALETTE[1].1,
                PALETTE[2].1,
                PALETTE[3].1,
                PALETTE[4].1,
            ],
            axis_color: Color::Rgb(230, 230, 230),
            background_color: Color::Rgb(0, 0, 0),
            hide_axis: false,
            view_scale: 1.0,
            speed: 100,
        }
    }
}

impl DisplayConfig {
    pub fn steps_per_redraw(&self) -> u32 {
        redraw_interval(self.speed)
    }

    /// Axis extents under the view scale slider: x spans ±20·s, y spans
    /// ±30·s, z spans [0, 50·s].
    pub fn axis_bounds(&self) -> ([f64; 2], [f64; 2], [f64; 2]) {
        let s = self.view_scale;
        ([-20.0 * s, 20.0 * s], [-30.0 * s, 30.0 * s], [0.0, 50.0 * s])
    }
}

/// A row in the control panel. The color rows track the configured
/// trajectory count, so the full list is built per frame by
/// [`App::controls`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Control {
    TrajectoryCount,
    HideAxis,
    Scale,
    Speed,
    TrajectoryColor(usize),
    AxisColor,
    BackgroundColor,
    Start,
    Stop,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ColorTarget {
    Trajectory(usize),
    Axis,
    Background,
}

/// Modal color picker state. While present, it captures all key input;
/// Esc closes it without touching the configured color.
pub struct ColorPicker {
    pub target: ColorTarget,
    pub cursor: usize,
}

pub struct App {
    pub should_quit: bool,
    pub run_state: RunState,
    pub config: DisplayConfig,
    pub sim: Simulation,
    pub focus: usize,
    pub picker: Option<ColorPicker>,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            run_state: RunState::Idle,
            config: DisplayConfig::default(),
            sim: Simulation::new(LorenzParams::default()),
            focus: 0,
            picker: None,
        }
    }

    pub fn controls(&self) -> Vec<Control> {
        let mut list = vec![
            Control::TrajectoryCount,
            Control::HideAxis,
            Control::Scale,
            Control::Speed,
        ];
        for i in 0..self.config.trajectory_count {
            list.push(Control::TrajectoryColor(i));
        }
        list.push(Control::AxisColor);
        list.push(Control::BackgroundColor);
        list.push(Control::Start);
        list.push(Control::Stop);
        list
    }

    pub fn focused_control(&self) -> Control {
        let controls = self.controls();
        controls[self.focus.min(controls.len() - 1)]
    }

    /// One scheduler tick: while running, advance the redraw interval's
    /// worth of steps. The frame drawn right after shows the new state, so
    /// cancellation latency is bounded by one tick.
    pub fn on_tick(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.sim.step_batch(self.config.steps_per_redraw());
        if self.sim.exhausted() {
            self.run_state = RunState::Stopped;
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // An open color picker intercepts all input
        if self.picker.is_some() {
            self.handle_picker_input(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('s') | KeyCode::Char('S') => self.start(),
            KeyCode::Char('x') | KeyCode::Char('X') => self.stop(),
            KeyCode::Up | KeyCode::BackTab => self.focus_prev(),
            KeyCode::Down | KeyCode::Tab => self.focus_next(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => {}
        }
    }

    /// Begin a fresh run. Ignored while one is already in progress; from
    /// Idle or Stopped all prior trajectory state is discarded first.
    pub fn start(&mut self) {
        if self.run_state == RunState::Running {
            return;
        }
        self.sim.reset(self.config.trajectory_count);
        self.run_state = RunState::Running;
    }

    /// Halt the current run, keeping its histories on screen.
    pub fn stop(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Stopped;
        }
    }

    fn focus_next(&mut self) {
        let len = self.controls().len();
        self.focus = (self.focus + 1) % len;
    }

    fn focus_prev(&mut self) {
        let len = self.controls().len();
        self.focus = (self.focus + len - 1) % len;
    }

    /// Left/Right on the focused control. All ranges saturate at their
    /// bounds rather than wrapping.
    fn adjust(&mut self, delta: i32) {
        match self.focused_control() {
            Control::TrajectoryCount => {
                let count = self.config.trajectory_count as i32 + delta;
                self.config.trajectory_count = count.clamp(1, MAX_TRAJECTORIES as i32) as usize;
                self.clamp_focus();
            }
            Control::HideAxis => self.config.hide_axis = !self.config.hide_axis,
            Control::Scale => {
                // Step by 0.1 in integer tenths to avoid float drift
                let tenths = (self.config.view_scale * 10.0).round() as i32 + delta;
                self.config.view_scale = tenths.clamp(5, 20) as f64 / 10.0;
            }
            Control::Speed => {
                let speed = self.config.speed as i32 + 10 * delta;
                self.config.speed = speed.clamp(10, 500) as u32;
            }
            _ => {}
        }
    }

    /// Shrinking the trajectory count shortens the control list; keep the
    /// focus on a real row.
    fn clamp_focus(&mut self) {
        let len = self.controls().len();
        if self.focus >= len {
            self.focus = len - 1;
        }
    }

    fn activate(&mut self) {
        match self.focused_control() {
            Control::HideAxis => self.config.hide_axis = !self.config.hide_axis,
            Control::TrajectoryColor(i) => self.open_picker(ColorTarget::Trajectory(i)),
            Control::AxisColor => self.open_picker(ColorTarget::Axis),
            Control::BackgroundColor => self.open_picker(ColorTarget::Background),
            Control::Start => self.start(),
            Control::Stop => self.stop(),
            _ => {}
        }
    }

    fn open_picker(&mut self, target: ColorTarget) {
        let current = self.target_color(target);
        let cursor = PALETTE
            .iter()
            .position(|(_, c)| *c == current)
            .unwrap_or(0);
        self.picker = Some(ColorPicker { target, cursor });
    }

    pub fn target_color(&self, target: ColorTarget) -> Color {
        match target {
            ColorTarget::Trajectory(i) => self.config.trajectory_colors[i],
            ColorTarget::Axis => self.config.axis_color,
            ColorTarget::Background => self.config.background_color,
        }
    }

    fn apply_color(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Trajectory(i) => self.config.trajectory_colors[i] = color,
            ColorTarget::Axis => self.config.axis_color = color,
            ColorTarget::Background => self.config.background_color = color,
        }
    }

    fn handle_picker_input(&mut self, key: KeyEvent) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let n = PALETTE.len();
        match key.code {
            KeyCode::Left => picker.cursor = (picker.cursor + n - 1) % n,
            KeyCode::Right => picker.cursor = (picker.cursor + 1) % n,
            KeyCode::Up => picker.cursor = (picker.cursor + n - PICKER_COLS) % n,
            KeyCode::Down => picker.cursor = (picker.cursor + PICKER_COLS) % n,
            KeyCode::Enter => {
                let target = picker.target;
                let color = PALETTE[picker.cursor].1;
                self.apply_color(target, color);
                self.picker = None;
            }
            // Cancel: the prior color is untouched
            KeyCode::Esc => self.picker = None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn redraw_interval_is_never_zero() {
        for speed in [10, 50, 100, 250, 500, 1000, 2000, 5000] {
            assert!(redraw_interval(speed) >= 1, "speed {speed}");
        }
        assert_eq!(redraw_interval(10), 100);
        assert_eq!(redraw_interval(100), 10);
        assert_eq!(redraw_interval(500), 2);
        assert_eq!(redraw_interval(1000), 1);
    }

    #[test]
    fn axis_bounds_follow_scale() {
        let mut config = DisplayConfig::default();
        config.view_scale = 2.0;
        assert_eq!(
            config.axis_bounds(),
            ([-40.0, 40.0], [-60.0, 60.0], [0.0, 100.0])
        );
        config.view_scale = 0.5;
        assert_eq!(
            config.axis_bounds(),
            ([-10.0, 10.0], [-15.0, 15.0], [0.0, 25.0])
        );
    }

    #[test]
    fn start_stop_state_machine() {
        let mut app = App::new();
        assert_eq!(app.run_state, RunState::Idle);

        // Stop before any run is a no-op
        app.on_key(key(KeyCode::Char('x')));
        assert_eq!(app.run_state, RunState::Idle);

        app.on_key(key(KeyCode::Char('s')));
        assert_eq!(app.run_state, RunState::Running);
        app.on_tick();
        let len = app.sim.trajectories[0].history.len();
        assert!(len > 0);

        app.on_key(key(KeyCode::Char('x')));
        assert_eq!(app.run_state, RunState::Stopped);

        // Histories are retained but no longer grow
        app.on_tick();
        app.on_tick();
        assert_eq!(app.sim.trajectories[0].history.len(), len);
    }

    #[test]
    fn start_is_ignored_while_running() {
        let mut app = App::new();
        app.start();
        app.on_tick();
        let len = app.sim.trajectories[0].history.len();
        app.start();
        assert_eq!(app.run_state, RunState::Running);
        assert_eq!(app.sim.trajectories[0].history.len(), len);
    }

    #[test]
    fn restart_resets_history() {
        let mut app = App::new();
        app.config.trajectory_count = 3;
        app.start();
        for _ in 0..5 {
            app.on_tick();
        }
        app.stop();

        app.start();
        assert_eq!(app.run_state, RunState::Running);
        assert_eq!(app.sim.steps_taken(), 0);
        assert_eq!(app.sim.trajectories.len(), 3);
        assert!(app.sim.trajectories.iter().all(|t| t.history.is_empty()));
    }

    #[test]
    fn run_stops_when_budget_exhausted() {
        let mut app = App::new();
        app.sim.params.total_steps = 25;
        app.config.speed = 10; // 100 steps per tick
        app.start();
        app.on_tick();
        assert_eq!(app.run_state, RunState::Stopped);
        assert_eq!(app.sim.trajectories[0].history.len(), 25);
    }

    #[test]
    fn controls_saturate_at_their_bounds() {
        let mut app = App::new();

        // Trajectory count spinner: 1..=5
        app.focus = 0;
        for _ in 0..10 {
            app.on_key(key(KeyCode::Right));
        }
        assert_eq!(app.config.trajectory_count, 5);
        for _ in 0..10 {
            app.on_key(key(KeyCode::Left));
        }
        assert_eq!(app.config.trajectory_count, 1);

        // Scale slider: 0.5..=2.0
        app.focus = 2;
        assert_eq!(app.focused_control(), Control::Scale);
        for _ in 0..30 {
            app.on_key(key(KeyCode::Right));
        }
        assert_eq!(app.config.view_scale, 2.0);
        for _ in 0..30 {
            app.on_key(key(KeyCode::Left));
        }
        assert_eq!(app.config.view_scale, 0.5);

        // Speed slider: 10..=500
        app.focus = 3;
        assert_eq!(app.focused_control(), Control::Speed);
        for _ in 0..100 {
            app.on_key(key(KeyCode::Left));
        }
        assert_eq!(app.config.speed, 10);
        for _ in 0..100 {
            app.on_key(key(KeyCode::Right));
        }
        assert_eq!(app.config.speed, 500);
    }

    #[test]
    fn color_rows_track_trajectory_count() {
        let mut app = App::new();
        app.config.trajectory_count = 4;
        let colors = app
            .controls()
            .into_iter()
            .filter(|c| matches!(c, Control::TrajectoryColor(_)))
            .count();
        assert_eq!(colors, 4);
    }

    #[test]
    fn shrinking_count_keeps_focus_in_range() {
        let mut app = App::new();
        app.config.trajectory_count = 5;
        // Focus the last row, then shrink the list from the spinner
        app.focus = app.controls().len() - 1;
        let focused_before = app.focus;
        app.focus = 0;
        for _ in 0..4 {
            app.on_key(key(KeyCode::Left));
        }
        assert_eq!(app.config.trajectory_count, 1);
        assert!(app.controls().len() <= focused_before);
        assert!(app.focus < app.controls().len());
    }

    #[test]
    fn picker_cancel_keeps_prior_color() {
        let mut app = App::new();
        let before = app.config.trajectory_colors[0];

        // Row 4 is the first trajectory color when count is 1
        app.focus = 4;
        assert_eq!(app.focused_control(), Control::TrajectoryColor(0));
        app.on_key(key(KeyCode::Enter));
        assert!(app.picker.is_some());

        app.on_key(key(KeyCode::Right));
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Esc));
        assert!(app.picker.is_none());
        assert_eq!(app.config.trajectory_colors[0], before);
    }

    #[test]
    fn picker_apply_sets_only_the_target() {
        let mut app = App::new();
        app.config.trajectory_count = 2;
        let other = app.config.trajectory_colors[0];
        let axis = app.config.axis_color;

        app.open_picker(ColorTarget::Trajectory(1));
        app.on_key(key(KeyCode::Right));
        let expected = PALETTE[app.picker.as_ref().unwrap().cursor].1;
        app.on_key(key(KeyCode::Enter));
        assert!(app.picker.is_none());
        assert_eq!(app.config.trajectory_colors[1], expected);
        assert_eq!(app.config.trajectory_colors[0], other);
        assert_eq!(app.config.axis_color, axis);
    }

    #[test]
    fn picker_opens_on_current_color() {
        let mut app = App::new();
        app.config.axis_color = PALETTE[6].1;
        app.open_picker(ColorTarget::Axis);
        assert_eq!(app.picker.as_ref().unwrap().cursor, 6);
    }

    #[test]
    fn picker_captures_navigation_keys() {
        let mut app = App::new();
        app.open_picker(ColorTarget::Background);
        let focus = app.focus;
        app.on_key(key(KeyCode::Down));
        app.on_key(key(KeyCode::Up));
        // Focus and run state are untouched while the overlay is open
        assert_eq!(app.focus, focus);
        assert_eq!(app.run_state, RunState::Idle);
    }
}
