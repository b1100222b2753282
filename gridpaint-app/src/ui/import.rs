use eframe::egui;

use crate::app::GridPaintApp;

impl GridPaintApp {
    /// Paste-in dialog accepting JSON payloads or bare array literals.
    pub(crate) fn show_import_window(&mut self, ctx: &egui::Context) {
        if !self.show_import {
            return;
        }

        let mut open = true;
        let mut load = false;
        let mut cancel = false;
        egui::Window::new("Import Bitmap")
            .open(&mut open)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.label("Paste a JSON object with a \"bitmap\" array, or an array literal:");
                ui.add_space(4.0);
                egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.import_buf)
                            .code_editor()
                            .desired_rows(12)
                            .desired_width(f32::INFINITY),
                    );
                });
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("Load").clicked() {
                        load = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancel = true;
                    }
                });
            });

        if load {
            self.load_import_buffer();
        }
        if cancel || !open {
            self.show_import = false;
        }
    }
}
