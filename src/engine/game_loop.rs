/// Fixed timestep stepping and simulation clock
///
/// Frame time is accumulated and converted into a whole number of fixed
/// simulation steps. Each step carries its `dt` and the absolute simulation
/// time, which is what timers, cooldowns and combo windows are measured
/// against.
use std::time::Duration;

/// Target simulation rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
pub const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation steps per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Timing information handed to every controller for one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepTime {
    /// Seconds covered by this step
    pub dt: f32,
    /// Simulation time at the end of this step, in seconds
    pub now: f32,
}

impl StepTime {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Accumulated time for fixed timestep updates
    accumulator: Duration,

    /// Whether the game is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total simulation steps executed
    step_count: u64,

    /// Simulation clock in seconds
    now: f32,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            paused: false,
            frame_count: 0,
            step_count: 0,
            now: 0.0,
        }
    }

    /// Begin a new frame of `frame_time`, returns the number of fixed steps to run
    pub fn begin_frame(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        steps
    }

    /// Advance the simulation clock by one fixed step
    pub fn step(&mut self) -> StepTime {
        self.step_count += 1;
        self.now = self.step_count as f32 * FIXED_TIMESTEP;
        StepTime::new(FIXED_TIMESTEP, self.now)
    }

    /// Get the fixed timestep (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get the interpolation alpha between simulation steps
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    /// Current simulation time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of simulation steps executed
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
