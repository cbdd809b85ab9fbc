use std::time::{Duration, Instant};

/// Frame delta plus a title bar fps readout refreshed twice a second.
pub struct FrameTiming {
    last_frame_time: Option<Instant>,
    last_fps_time: Instant,
    frame_count: u32,
    pub frame_dt: f32,
    base_title: String,
}

impl FrameTiming {
    pub fn new(base_title: String) -> Self {
        Self {
            last_frame_time: None,
            last_fps_time: Instant::now(),
            frame_count: 0,
            frame_dt: 1.0 / 60.0,
            base_title,
        }
    }

    /// Returns a new window title when the fps readout is due.
    pub fn update(&mut self, now: Instant) -> Option<String> {
        let dt_duration = match self.last_frame_time {
            Some(last) => now.saturating_duration_since(last),
            None => Duration::from_millis(16),
        };
        self.last_frame_time = Some(now);
        self.frame_dt = dt_duration.as_secs_f32().max(0.0);

        self.frame_count = self.frame_count.saturating_add(1);
        let elapsed = now.saturating_duration_since(self.last_fps_time);
        if elapsed.as_secs_f32() < 0.5 {
            return None;
        }
        let fps = self.frame_count as f32 / elapsed.as_secs_f32();
        self.frame_count = 0;
        self.last_fps_time = now;
        Some(format!(
            "{} - {:.1} fps ({:.2} ms)",
            self.base_title,
            fps,
            self.frame_dt * 1000.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_assumes_sixty_hz() {
        let mut timing = FrameTiming::new("Panel".to_string());
        let start = Instant::now();
        timing.update(start);
        assert!((timing.frame_dt - 0.016).abs() < 1e-6);
        timing.update(start + Duration::from_millis(10));
        assert!((timing.frame_dt - 0.010).abs() < 1e-6);
    }

    #[test]
    fn title_refreshes_after_half_a_second() {
        let mut timing = FrameTiming::new("Panel".to_string());
        let start = timing.last_fps_time;
        assert_eq!(timing.update(start + Duration::from_millis(100)), None);
        let title = timing.update(start + Duration::from_millis(600)).unwrap();
        assert!(title.starts_with("Panel - "));
        assert!(title.contains("fps"));
        assert_eq!(timing.update(start + Duration::from_millis(700)), None);
    }
}
