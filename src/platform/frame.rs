//! Frame scheduling
//!
//! The host calls [`FrameLoop::frame`] once per display refresh with its
//! clock. Elapsed time is clamped, accumulated, and spent on fixed ticks.
//! Pausing is just not calling `frame` (or letting it go inactive); there is
//! never a tick in flight to interrupt.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// Tick-if-active driver for a host frame callback
#[derive(Debug, Clone, Default)]
pub struct FrameLoop {
    active: bool,
    /// Host clock at the previous frame (seconds)
    last_time: Option<f64>,
    accumulator: f32,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start (or resume) scheduling from `now`; time spent stopped is not
    /// caught up
    pub fn begin(&mut self, now: f64) {
        self.active = true;
        self.last_time = Some(now);
        self.accumulator = 0.0;
    }

    /// Stop scheduling. Stopping twice is fine.
    pub fn stop(&mut self) {
        self.active = false;
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Run the ticks owed at host time `now`. Returns how many ran.
    ///
    /// Goes inactive as soon as the session leaves Running (pause, level
    /// complete, end of game); the host calls [`FrameLoop::begin`] again
    /// after resuming or advancing.
    pub fn frame(&mut self, state: &mut GameState, input: &TickInput, now: f64) -> u32 {
        if !self.active {
            return 0;
        }
        if state.phase != GamePhase::Running {
            self.stop();
            return 0;
        }

        let last = self.last_time.replace(now).unwrap_or(now);
        let dt = ((now - last) as f32).clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            if state.phase != GamePhase::Running {
                self.stop();
                break;
            }
        }
        substeps
    }
}
