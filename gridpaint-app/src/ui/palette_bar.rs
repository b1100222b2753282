use eframe::egui;

use crate::app::GridPaintApp;

const SWATCH_SIZE: f32 = 28.0;

impl GridPaintApp {
    pub(crate) fn draw_palette_bar(&mut self, ctx: &egui::Context) {
        let active = self.session.active_value();
        let entries: Vec<_> = self.session.palette().entries().collect();
        let mut picked = None;

        egui::SidePanel::left("palette_bar")
            .resizable(false)
            .exact_width(SWATCH_SIZE * 2.0 + 24.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.label(egui::RichText::new("Palette").strong());
                ui.add_space(4.0);
                egui::ScrollArea::vertical().show(ui, |ui| {
                    egui::Grid::new("palette_swatches")
                        .num_columns(2)
                        .spacing([4.0, 4.0])
                        .show(ui, |ui| {
                            for (i, (index, color)) in entries.iter().enumerate() {
                                let (rect, response) = ui.allocate_exact_size(
                                    egui::vec2(SWATCH_SIZE, SWATCH_SIZE),
                                    egui::Sense::click(),
                                );
                                let [r, g, b] = color.to_array();
                                let fill = egui::Color32::from_rgb(r, g, b);
                                ui.painter().rect_filled(rect, 2.0, fill);
                                let stroke = if *index == active {
                                    egui::Stroke::new(2.0, egui::Color32::from_rgb(255, 200, 0))
                                } else {
                                    egui::Stroke::new(1.0, egui::Color32::from_gray(90))
                                };
                                ui.painter()
                                    .rect_stroke(rect, 2.0, stroke, egui::StrokeKind::Inside);
                                if response.on_hover_text(format!("{index}: {color}")).clicked() {
                                    picked = Some(*index);
                                }
                                if i % 2 == 1 {
                                    ui.end_row();
                                }
                            }
                        });
                });
            });

        if let Some(index) = picked {
            self.session.set_active_value(index);
        }
    }
}
