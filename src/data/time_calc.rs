use std::time::Duration;

/// Wall-clock timings of the sequences scored in a run.
#[derive(Debug, Default, Clone)]
pub struct TimeCalc {
    frames: usize,
    duration: Vec<Duration>,
}

impl TimeCalc {
    pub fn total(&self) -> Duration {
        self.duration.iter().sum::<Duration>()
    }

    /// Number of timed sequences.
    pub fn n(&self) -> usize {
        self.duration.len()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Average time spent per sequence, zero before anything was recorded.
    pub fn avg(&self) -> Duration {
        match self.n() {
            0 => Duration::ZERO,
            n => self.total() / n as u32,
        }
    }

    /// Average time spent per frame, zero before anything was recorded.
    pub fn avg_frame(&self) -> Duration {
        match self.frames {
            0 => Duration::ZERO,
            n => self.total() / n as u32,
        }
    }

    pub fn ts(&self) -> &Vec<Duration> {
        &self.duration
    }

    pub fn push(&mut self, x: Duration, frames: usize) {
        self.duration.push(x);
        self.frames += frames;
    }

    pub fn clear(&mut self) {
        self.frames = Default::default();
        self.duration = Default::default();
    }
}
