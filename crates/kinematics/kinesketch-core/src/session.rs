//! Simulation session: owns the editable curves, the dense series and the
//! playback cursor, and re-runs reconciliation on every edit.
//!
//! Playback is a two-state machine (paused / playing). While playing the
//! session keeps exactly one frame request outstanding with its
//! [`FrameScheduler`]; each delivered frame advances the cursor by the wall
//! clock delta since the previous frame. The first frame after `play()` only
//! sets the baseline. Reaching `max_time` clamps the cursor and pauses.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::data::{ControlPointSequence, CurveKind, DenseSeries};
use crate::display;
use crate::error::Result;
use crate::inputs::SessionCommand;
use crate::integrate::enforce_zero_end_velocity;
use crate::interp::functions::lerp;
use crate::outputs::SessionEvent;
use crate::presets;
use crate::reconcile::{
    compute_from_acceleration, compute_from_position_with_tolerance,
    compute_from_velocity_with_tolerance, Reconciliation,
};
use crate::scheduler::{FrameScheduler, FrameToken, ManualScheduler};

/// Values of all three curves at the playback cursor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cursor {
    pub time: f64,
    pub acceleration: f64,
    pub velocity: f64,
    pub position: f64,
}

/// What a delivered frame did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Stale token or paused session; nothing changed.
    Ignored,
    /// Cursor advanced and the next frame was requested.
    Continued,
    /// Cursor reached the end of the window; playback paused.
    Ended,
}

#[derive(Debug)]
pub struct Session<S: FrameScheduler = ManualScheduler> {
    cfg: SimulationConfig,

    // Curves
    acceleration_points: ControlPointSequence,
    velocity_points: ControlPointSequence,
    position_points: ControlPointSequence,
    series: DenseSeries,
    lock_end_velocity: bool,

    // Playback
    current_time: f64,
    real_elapsed_time: f64,
    is_playing: bool,
    scheduler: S,
    pending_frame: Option<FrameToken>,
    last_frame_ms: Option<f64>,

    // Notifications
    events: Vec<SessionEvent>,
    revision: u64,
}

impl Session<ManualScheduler> {
    /// Create a session driven by a [`ManualScheduler`].
    pub fn new(cfg: SimulationConfig) -> Result<Self> {
        Self::with_scheduler(cfg, ManualScheduler::new())
    }

    /// Deliver the oldest outstanding frame request at `timestamp_ms`.
    pub fn pump_frame(&mut self, timestamp_ms: f64) -> FrameOutcome {
        match self.scheduler.take_next() {
            Some(token) => self.on_frame(token, timestamp_ms),
            None => FrameOutcome::Ignored,
        }
    }
}

impl<S: FrameScheduler> Session<S> {
    /// Create a session and compute the curves for the default acceleration.
    pub fn with_scheduler(cfg: SimulationConfig, scheduler: S) -> Result<Self> {
        cfg.validate()?;
        let mut session = Self {
            acceleration_points: ControlPointSequence::default(),
            velocity_points: ControlPointSequence::default(),
            position_points: ControlPointSequence::default(),
            series: DenseSeries::default(),
            lock_end_velocity: cfg.lock_end_velocity,
            current_time: 0.0,
            real_elapsed_time: 0.0,
            is_playing: false,
            scheduler,
            pending_frame: None,
            last_frame_ms: None,
            events: Vec::new(),
            revision: 0,
            cfg,
        };
        let initial = session.cfg.default_acceleration.clone();
        session.update_acceleration(initial);
        session.events.clear();
        session.revision = 0;
        Ok(session)
    }

    // ----- read access -----

    pub fn config(&self) -> &SimulationConfig {
        &self.cfg
    }

    pub fn series(&self) -> &DenseSeries {
        &self.series
    }

    pub fn acceleration_points(&self) -> &ControlPointSequence {
        &self.acceleration_points
    }

    pub fn velocity_points(&self) -> &ControlPointSequence {
        &self.velocity_points
    }

    pub fn position_points(&self) -> &ControlPointSequence {
        &self.position_points
    }

    pub fn points(&self, kind: CurveKind) -> &ControlPointSequence {
        match kind {
            CurveKind::Acceleration => &self.acceleration_points,
            CurveKind::Velocity => &self.velocity_points,
            CurveKind::Position => &self.position_points,
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    /// Wall-clock seconds accumulated since playback last started from zero.
    pub fn real_elapsed_time(&self) -> f64 {
        self.real_elapsed_time
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn lock_end_velocity(&self) -> bool {
        self.lock_end_velocity
    }

    /// Bumped on every state change; renderers can poll it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Drain notifications recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: SessionEvent) {
        self.revision += 1;
        self.events.push(event);
    }

    // ----- edits -----

    /// Enable or disable the zero end-velocity lock.
    ///
    /// Takes effect on the next acceleration update; current curves are kept.
    pub fn set_lock_end_velocity(&mut self, enabled: bool) {
        if self.lock_end_velocity != enabled {
            self.lock_end_velocity = enabled;
            self.emit(SessionEvent::LockEndVelocityChanged { enabled });
        }
    }

    fn check_edit(&self, kind: CurveKind, points: &ControlPointSequence) {
        if let Err(err) = points.validate(kind, self.cfg.max_time) {
            log::warn!("{} edit is malformed ({}): {err}", kind, err.category());
        }
    }

    fn replace(&mut self, result: Reconciliation, source: CurveKind) {
        let Reconciliation {
            series,
            acceleration_points,
            velocity_points,
            position_points,
        } = result;
        self.series = series;
        self.acceleration_points = acceleration_points;
        self.velocity_points = velocity_points;
        self.position_points = position_points;
        log::debug!(
            "{source} edit: {} control points, {} samples",
            self.acceleration_points.len(),
            self.series.len()
        );
        self.emit(SessionEvent::CurvesRecomputed { source });
    }

    /// Replace the acceleration points and rebuild everything.
    ///
    /// With the lock enabled the whole curve is first shifted so its area over
    /// the window is zero, which brings the final velocity back to zero.
    pub fn update_acceleration(&mut self, points: ControlPointSequence) {
        self.check_edit(CurveKind::Acceleration, &points);
        let points = if self.lock_end_velocity {
            enforce_zero_end_velocity(&points, self.cfg.max_time)
        } else {
            points
        };
        let result = compute_from_acceleration(&points, self.cfg.max_time, self.cfg.dt);
        self.replace(result, CurveKind::Acceleration);
    }

    /// Replace the velocity points, back-derive acceleration and rebuild everything.
    pub fn update_velocity(&mut self, points: ControlPointSequence) {
        self.check_edit(CurveKind::Velocity, &points);
        let result = compute_from_velocity_with_tolerance(
            &points,
            &self.acceleration_points,
            self.cfg.max_time,
            self.cfg.dt,
            self.cfg.match_tolerance,
        );
        self.replace(result, CurveKind::Velocity);
    }

    /// Replace the position points, back-derive velocity and acceleration and rebuild.
    pub fn update_position(&mut self, points: ControlPointSequence) {
        self.check_edit(CurveKind::Position, &points);
        let result = compute_from_position_with_tolerance(
            &points,
            &self.velocity_points,
            &self.acceleration_points,
            self.cfg.max_time,
            self.cfg.dt,
            self.cfg.match_tolerance,
        );
        self.replace(result, CurveKind::Position);
    }

    /// Load the symmetric ease-in-out acceleration profile.
    pub fn preset_ease_in_out(&mut self) {
        self.update_acceleration(presets::ease_in_out(self.cfg.max_time));
    }

    // ----- playback -----

    fn set_time(&mut self, new_time: f64) {
        let old_time = self.current_time;
        self.current_time = new_time;
        if old_time != new_time {
            self.emit(SessionEvent::TimeChanged { old_time, new_time });
        }
    }

    /// Start playback, rewinding first when the cursor is already at the end.
    pub fn play(&mut self) {
        if self.current_time >= self.cfg.max_time {
            self.set_time(0.0);
            self.real_elapsed_time = 0.0;
        }
        if let Some(token) = self.pending_frame.take() {
            self.scheduler.cancel_frame(token);
        }
        self.is_playing = true;
        self.last_frame_ms = None;
        self.pending_frame = Some(self.scheduler.request_frame());
        log::debug!("playback started at t = {}", self.current_time);
        self.emit(SessionEvent::PlaybackStarted {
            time: self.current_time,
        });
    }

    /// Stop advancing the cursor and withdraw the outstanding frame request.
    pub fn pause(&mut self) {
        let was_playing = self.is_playing;
        self.is_playing = false;
        self.last_frame_ms = None;
        if let Some(token) = self.pending_frame.take() {
            self.scheduler.cancel_frame(token);
        }
        if was_playing {
            log::debug!("playback paused at t = {}", self.current_time);
            self.emit(SessionEvent::PlaybackPaused {
                time: self.current_time,
            });
        }
    }

    /// Pause, then advance the cursor by one step increment.
    pub fn step(&mut self) {
        self.pause();
        let next = (self.current_time + self.cfg.step_increment).min(self.cfg.max_time);
        self.set_time(next);
    }

    /// Pause, rewind both clocks and restore the default acceleration curve.
    pub fn reset(&mut self) {
        self.pause();
        self.set_time(0.0);
        self.real_elapsed_time = 0.0;
        let defaults = self.cfg.default_acceleration.clone();
        self.update_acceleration(defaults);
    }

    /// Handle a frame delivered by the scheduler at `timestamp_ms` (milliseconds).
    ///
    /// Frames arriving while paused, or carrying a token other than the one
    /// currently outstanding, are ignored. A timestamp earlier than the
    /// previous frame's counts as zero elapsed time and becomes the new
    /// baseline.
    pub fn on_frame(&mut self, token: FrameToken, timestamp_ms: f64) -> FrameOutcome {
        if !self.is_playing || self.pending_frame != Some(token) {
            log::trace!("ignoring frame {token:?}");
            return FrameOutcome::Ignored;
        }
        self.pending_frame = None;

        let real_delta = match self.last_frame_ms {
            Some(prev) => ((timestamp_ms - prev) / 1000.0).max(0.0),
            None => 0.0,
        };
        self.last_frame_ms = Some(timestamp_ms);
        log::trace!("frame {token:?}: +{real_delta}s");

        self.real_elapsed_time += real_delta;
        let next = self.current_time + real_delta * self.cfg.playback_speed;

        if next >= self.cfg.max_time {
            self.set_time(self.cfg.max_time);
            self.is_playing = false;
            self.last_frame_ms = None;
            log::debug!("playback ended after {}s", self.real_elapsed_time);
            self.emit(SessionEvent::PlaybackEnded {
                time: self.current_time,
            });
            return FrameOutcome::Ended;
        }

        self.set_time(next);
        self.pending_frame = Some(self.scheduler.request_frame());
        FrameOutcome::Continued
    }

    /// Apply one adapter command.
    pub fn apply(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Play => self.play(),
            SessionCommand::Pause => self.pause(),
            SessionCommand::Step => self.step(),
            SessionCommand::Reset => self.reset(),
            SessionCommand::UpdateAcceleration { points } => self.update_acceleration(points),
            SessionCommand::UpdateVelocity { points } => self.update_velocity(points),
            SessionCommand::UpdatePosition { points } => self.update_position(points),
            SessionCommand::SetLockEndVelocity { enabled } => self.set_lock_end_velocity(enabled),
            SessionCommand::PresetEaseInOut => self.preset_ease_in_out(),
        }
    }

    // ----- queries -----

    /// Dense value of `kind` at `t`, linearly interpolated between samples.
    pub fn sample_at(&self, kind: CurveKind, t: f64) -> f64 {
        let time = &self.series.time;
        let values = self.series.values(kind);
        let n = time.len().min(values.len());
        if n == 0 {
            return 0.0;
        }
        let i = time[..n].partition_point(|&x| x < t);
        if i == 0 {
            return values[0];
        }
        if i >= n {
            return values[n - 1];
        }
        if time[i] == t {
            return values[i];
        }
        let span = time[i] - time[i - 1];
        if span <= 0.0 {
            return values[i];
        }
        lerp(values[i - 1], values[i], (t - time[i - 1]) / span)
    }

    /// All three curves at the playback cursor.
    pub fn cursor(&self) -> Cursor {
        let t = self.current_time;
        Cursor {
            time: t,
            acceleration: self.sample_at(CurveKind::Acceleration, t),
            velocity: self.sample_at(CurveKind::Velocity, t),
            position: self.sample_at(CurveKind::Position, t),
        }
    }

    /// First time the position reaches the configured finish distance.
    pub fn finish_time(&self) -> Option<f64> {
        let target = self.cfg.finish_position;
        let time = &self.series.time;
        let position = &self.series.position;
        let i = position.iter().position(|&x| x >= target)?;
        if i == 0 {
            return time.first().copied();
        }
        let (x0, x1) = (position[i - 1], position[i]);
        let frac = if x1 > x0 { (target - x0) / (x1 - x0) } else { 1.0 };
        Some(lerp(time[i - 1], time[i], frac))
    }

    /// Suggested axis range for plotting `kind`.
    pub fn axis_range(&self, kind: CurveKind) -> (f64, f64) {
        display::axis_range(self.series.values(kind), self.cfg.display.style(kind))
    }
}
