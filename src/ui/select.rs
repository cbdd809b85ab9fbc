use egui::{ComboBox, Ui};

/// Dropdown over a fixed list of strings. Labels and values are the same.
pub struct Select<'a> {
    id: &'a str,
    value: &'a str,
    items: &'a [&'a str],
}

impl<'a> Select<'a> {
    pub fn new(id: &'a str, value: &'a str, items: &'a [&'a str]) -> Self {
        Self { id, value, items }
    }

    /// Returns the newly chosen item. Re-picking the current one is not a change.
    pub fn show(self, ui: &mut Ui) -> Option<String> {
        let mut chosen = None;
        ComboBox::from_id_salt(self.id)
            .selected_text(self.value)
            .show_ui(ui, |ui| {
                for item in self.items {
                    let selected = *item == self.value;
                    if ui.selectable_label(selected, *item).clicked() && !selected {
                        chosen = Some(item.to_string());
                    }
                }
            });
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::{click_frames, frame};

    const SKYBOXES: [&str; 3] = ["Yokohama", "Chapel", "Cloud"];

    #[test]
    fn closed_dropdown_reports_nothing() {
        let ctx = egui::Context::default();
        let _ = ctx.run(frame(Vec::new()), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert_eq!(Select::new("skybox", "Chapel", &SKYBOXES).show(ui), None);
            });
        });
    }

    /// One frame of the skybox dropdown: its button rect, its popup id and what it reported.
    fn show_frame(
        ctx: &egui::Context,
        input: egui::RawInput,
    ) -> (egui::Rect, egui::Id, Option<String>) {
        let mut out = (egui::Rect::NOTHING, egui::Id::NULL, None);
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let popup_id = ui.make_persistent_id("skybox").with("popup");
                let inner = ui.scope(|ui| Select::new("skybox", "Chapel", &SKYBOXES).show(ui));
                out = (inner.response.rect, popup_id, inner.inner.or(out.2.take()));
            });
        });
        out
    }

    #[test]
    fn clicking_an_entry_reports_it() {
        let ctx = egui::Context::default();
        let mut chosen = Vec::new();

        let (button, popup_id, _) = show_frame(&ctx, frame(Vec::new()));
        for input in click_frames(button.center()) {
            chosen.extend(show_frame(&ctx, input).2);
        }
        assert!(chosen.is_empty());

        let popup = ctx
            .memory(|memory| memory.area_rect(popup_id))
            .expect("dropdown should be open");
        // Entries share the popup height evenly; aim at the last one.
        let slot = popup.height() / SKYBOXES.len() as f32;
        let cloud = egui::pos2(popup.center().x, popup.top() + slot * 2.5);
        for input in click_frames(cloud) {
            chosen.extend(show_frame(&ctx, input).2);
        }
        assert_eq!(chosen, vec!["Cloud".to_string()]);
    }
}
