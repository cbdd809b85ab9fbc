use egui::{PointerButton, Pos2, Rect, Vec2};

/// Per-frame pointer delta while one mouse button is held.
///
/// A drag only starts when the button goes down inside the surface; it then
/// keeps tracking outside the surface until the button is released.
#[derive(Debug, Clone)]
pub struct MouseDrag {
    button: PointerButton,
    last: Option<Pos2>,
}

impl MouseDrag {
    pub fn new(button: PointerButton) -> Self {
        Self { button, last: None }
    }

    #[cfg(test)]
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn update(&mut self, input: &egui::InputState, surface: Rect) -> Option<Vec2> {
        let down = input.pointer.button_down(self.button);
        let pos = input.pointer.latest_pos();
        self.sample(down, pos, surface)
    }

    pub fn sample(&mut self, down: bool, pos: Option<Pos2>, surface: Rect) -> Option<Vec2> {
        let (true, Some(pos)) = (down, pos) else {
            self.last = None;
            return None;
        };
        match self.last.replace(pos) {
            Some(previous) => {
                let delta = pos - previous;
                (delta != Vec2::ZERO).then_some(delta)
            }
            None => {
                if !surface.contains(pos) {
                    self.last = None;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::splat(100.0))
    }

    #[test]
    fn reports_deltas_while_held() {
        let mut drag = MouseDrag::new(PointerButton::Primary);
        assert_eq!(drag.sample(true, Some(Pos2::new(10.0, 10.0)), surface()), None);
        assert_eq!(
            drag.sample(true, Some(Pos2::new(20.0, 12.0)), surface()),
            Some(Vec2::new(10.0, 2.0))
        );
        assert_eq!(drag.sample(true, Some(Pos2::new(20.0, 12.0)), surface()), None);
        assert!(drag.is_dragging());
        assert_eq!(drag.sample(false, Some(Pos2::new(30.0, 12.0)), surface()), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn drag_must_start_inside_surface() {
        let mut drag = MouseDrag::new(PointerButton::Primary);
        assert_eq!(drag.sample(true, Some(Pos2::new(150.0, 10.0)), surface()), None);
        assert_eq!(drag.sample(true, Some(Pos2::new(160.0, 10.0)), surface()), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn continues_outside_surface_once_started() {
        let mut drag = MouseDrag::new(PointerButton::Primary);
        drag.sample(true, Some(Pos2::new(90.0, 50.0)), surface());
        assert_eq!(
            drag.sample(true, Some(Pos2::new(130.0, 50.0)), surface()),
            Some(Vec2::new(40.0, 0.0))
        );
    }
}
