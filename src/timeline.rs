use std::time::{Duration, Instant};

/// A monotonic source of "now", in fractional seconds.
pub trait Clock {
    fn now(&self) -> f64;
}

pub struct Timeline {
    start_time: Instant,
    previous_frame_time: Instant,
    previous_frame_duration: Duration,
}

impl Timeline {
    pub fn new() -> Timeline {
        let now = Instant::now();
        Timeline {
            start_time: now,
            previous_frame_time: now,
            previous_frame_duration: Duration::from_secs(0),
        }
    }

    /// Closes the current frame and records how long it took.
    pub fn next_frame(&mut self) -> &mut Self {
        let now = Instant::now();
        let duration = now.duration_since(self.previous_frame_time);
        self.previous_frame_time = now;
        self.previous_frame_duration = duration;
        self
    }

    /// Duration of the previous frame.
    pub fn previous_frame_duration(&self) -> Duration {
        self.previous_frame_duration
    }

    /// Duration of the previous frame in fractional seconds.
    pub fn previous_frame_time(&self) -> f64 {
        self.previous_frame_duration.as_secs_f64()
    }

    /// Time elapsed between construction and the start of the current frame.
    pub fn frame_start(&self) -> f64 {
        self.previous_frame_time
            .duration_since(self.start_time)
            .as_secs_f64()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Timeline::new()
    }
}

impl Clock for Timeline {
    fn now(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new(now: f64) -> ManualClock {
        ManualClock { now }
    }

    pub fn advance(&mut self, seconds: f64) -> &mut Self {
        self.now += seconds;
        self
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}
