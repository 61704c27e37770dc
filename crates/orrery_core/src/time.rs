use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Variable-timestep frame clock. `begin_frame` measures the wall-clock delta
/// used to scale camera movement and the scene bobbing animation, and keeps a
/// smoothed FPS estimate for the overlay.
pub struct FrameClock {
    /// Seconds elapsed during the previous frame, capped at `max_dt`.
    pub dt: f32,
    /// Cap applied to `dt` so a stall (window drag, debugger) does not teleport
    /// the camera on the next frame.
    pub max_dt: f32,
    /// Total seconds since startup; drives the time-based scene animation.
    pub total_time: f32,
    pub frame_count: u64,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            dt: 0.0,
            max_dt: 0.25,
            total_time: 0.0,
            frame_count: 0,
            last_instant: Instant::now(),
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        let real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;

        self.dt = (real_dt as f32).min(self.max_dt);
        self.total_time += self.dt;
        self.frame_count += 1;

        self.fps_samples[self.fps_sample_index] = real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_frame_advances_time() {
        let mut clock = FrameClock::new();
        clock.begin_frame();
        std::thread::sleep(std::time::Duration::from_millis(2));
        clock.begin_frame();
        assert!(clock.dt > 0.0);
        assert!(clock.total_time >= clock.dt);
        assert_eq!(clock.frame_count, 2);
    }

    #[test]
    fn test_dt_is_capped() {
        let mut clock = FrameClock::new();
        clock.max_dt = 0.0;
        std::thread::sleep(std::time::Duration::from_millis(2));
        clock.begin_frame();
        assert_eq!(clock.dt, 0.0);
    }
}
