use egui::{Slider, SliderClamping, Ui};

/// Bounded numeric slider. Holds no value; the owner supplies it every frame.
#[derive(Debug, Clone, Copy)]
pub struct Range {
    value: f32,
    min: f32,
    max: f32,
    step: f32,
}

impl Range {
    pub fn new(value: f32, min: f32, max: f32, step: f32) -> Self {
        Self {
            value,
            min,
            max,
            step,
        }
    }

    /// Returns the new value when the user moved or typed into the slider.
    ///
    /// The supplied value is never snapped or clamped just by drawing it.
    /// Reported values always lie within `[min, max]`.
    pub fn show(self, ui: &mut Ui) -> Option<f32> {
        let mut value = self.value;
        let response = ui.add(
            Slider::new(&mut value, self.min..=self.max)
                .step_by(self.step as f64)
                .clamping(SliderClamping::Never)
                .custom_parser(|raw| Self::parse(raw).map(f64::from)),
        );
        if !response.changed() {
            return None;
        }
        self.settle(value)
    }

    /// Bounds a value the slider produced. Step snapping can land past `max`.
    fn settle(&self, raw: f32) -> Option<f32> {
        let value = raw.clamp(self.min, self.max);
        (value != self.value).then_some(value)
    }

    /// Raw text entry to a number. Anything non-numeric yields nothing.
    pub fn parse(raw: &str) -> Option<f32> {
        raw.trim()
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::{drag_frames, frame, widget_rect};

    #[test]
    fn parses_numbers_only() {
        assert_eq!(Range::parse("0.25"), Some(0.25));
        assert_eq!(Range::parse(" 3 "), Some(3.0));
        assert_eq!(Range::parse("abc"), None);
        assert_eq!(Range::parse(""), None);
        assert_eq!(Range::parse("inf"), None);
    }

    #[test]
    fn settle_clamps_and_skips_unchanged_values() {
        let range = Range::new(1.0, 0.00001, 3.0, 0.01);
        assert_eq!(range.settle(3.00001), Some(3.0));
        assert_eq!(range.settle(-1.0), Some(0.00001));
        assert_eq!(range.settle(1.0), None);
        assert_eq!(range.settle(0.5), Some(0.5));
    }

    #[test]
    fn idle_frames_leave_an_off_step_value_alone() {
        let ctx = egui::Context::default();
        for _ in 0..3 {
            let _ = ctx.run(frame(Vec::new()), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    assert_eq!(Range::new(1.0, 0.00001, 3.0, 0.01).show(ui), None);
                    assert_eq!(Range::new(0.5, 0.0, 1.0, 0.01).show(ui), None);
                });
            });
        }
    }

    #[test]
    fn dragging_past_the_end_reports_max() {
        let ctx = egui::Context::default();
        let mut value = 1.0;
        let mut reported = Vec::new();
        let rect = widget_rect(&ctx, |ui| {
            Range::new(value, 0.00001, 3.0, 0.01).show(ui);
        });

        let start = egui::pos2(rect.left() + 5.0, rect.center().y);
        let end = egui::pos2(rect.right() + 400.0, rect.center().y);
        for input in drag_frames(start, end) {
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(next) = Range::new(value, 0.00001, 3.0, 0.01).show(ui) {
                        reported.push(next);
                        value = next;
                    }
                });
            });
        }

        assert!(!reported.is_empty());
        assert!(reported.iter().all(|v| (0.00001..=3.0).contains(v)));
        assert_eq!(value, 3.0);
    }
}
