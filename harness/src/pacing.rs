use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::config::FrameLimit;

const FPS_SAMPLES: usize = 100;

/// Frame timing: delta time, a rolling fps average and the optional
/// sleep that caps the frame rate.
#[derive(Debug)]
pub struct Pacer {
    limit: FrameLimit,
    start: Instant,
    last: Instant,
    frame: u64,
    samples: VecDeque<f32>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tick {
    pub frame: u64,
    pub dt: Duration,
    pub elapsed: Duration,
    pub fps: f32,
}

impl Pacer {
    pub fn new(limit: FrameLimit) -> Pacer {
        let now = Instant::now();
        Pacer {
            limit,
            start: now,
            last: now,
            frame: 0,
            samples: VecDeque::with_capacity(FPS_SAMPLES),
        }
    }

    /// Marks the start of a frame.
    pub fn tick(&mut self) -> Tick {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        self.frame += 1;

        if self.frame > 1 {
            if self.samples.len() == FPS_SAMPLES {
                self.samples.pop_front();
            }
            self.samples.push_back(dt.as_secs_f32());
        }

        Tick {
            frame: self.frame,
            dt,
            elapsed: now - self.start,
            fps: self.fps(),
        }
    }

    pub fn fps(&self) -> f32 {
        let total: f32 = self.samples.iter().sum();
        if total <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f32 / total
    }

    /// Sleeps out the rest of the frame budget when a fps cap is set.
    pub fn wait(&self) {
        if let Some(budget) = frame_budget(self.limit) {
            let spent = self.last.elapsed();
            if spent < budget {
                std::thread::sleep(budget - spent);
            }
        }
    }
}

pub fn frame_budget(limit: FrameLimit) -> Option<Duration> {
    match limit {
        FrameLimit::Fps(n) if n > 0 => Some(Duration::new(0, 1_000_000_000u32 / n)),
        _ => None,
    }
}
