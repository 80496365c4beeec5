use std::time::Instant;

use rand::Rng;

use crate::{core::StarfieldState, types::Vec2};

#[derive(Clone, Copy, Debug)]
pub struct FrameDriver {
    last_frame: Instant,
    frames: u64,
}

impl FrameDriver {
    pub fn new(now: Instant) -> Self {
        Self {
            last_frame: now,
            frames: 0,
        }
    }

    pub fn elapsed_since_last(&self, now: Instant) -> f32 {
        now.saturating_duration_since(self.last_frame).as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn advance<R, F>(
        &mut self,
        now: Instant,
        state: &StarfieldState,
        steering: F,
        rng: &mut R,
    ) -> StarfieldState
    where
        R: Rng + ?Sized,
        F: FnOnce(f32) -> Vec2,
    {
        let dt = self.elapsed_since_last(now);
        self.last_frame = now;
        self.frames += 1;
        state.update(dt, steering(dt), rng)
    }
}
