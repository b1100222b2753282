use eframe::egui;

use crate::app::GridPaintApp;

const KEYBOARD: &[(&str, &str)] = &[
    ("P", "Paint tool"),
    ("E", "Erase tool"),
    ("F", "Fill tool"),
    ("I", "Pick tool"),
    ("0 - 9", "Select palette index"),
    ("Ctrl+Z", "Undo"),
    ("Ctrl+Shift+Z / Ctrl+Y", "Redo"),
    ("Ctrl+Shift+C", "Copy grid as JSON"),
    ("H", "Toggle this window"),
];

const MOUSE: &[(&str, &str)] = &[
    ("Left drag", "Paint with the active value"),
    ("Left drag (Erase)", "Paint the background value 0"),
    ("Left click (Fill)", "Flood-fill the connected region"),
    ("Left click (Pick)", "Take the value under the cursor"),
    ("Palette swatch", "Select the active value"),
];

impl GridPaintApp {
    pub(crate) fn show_help_window(&mut self, ctx: &egui::Context) {
        if !self.show_help {
            return;
        }

        let mut open = true;
        egui::Window::new("Controls & Shortcuts")
            .open(&mut open)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                binding_table(ui, "Keyboard", KEYBOARD);
                ui.add_space(8.0);
                binding_table(ui, "Mouse", MOUSE);
            });
        self.show_help &= open;
    }
}

fn binding_table(ui: &mut egui::Ui, title: &str, bindings: &[(&str, &str)]) {
    ui.heading(title);
    ui.add_space(2.0);
    egui::Grid::new(title)
        .num_columns(2)
        .spacing([12.0, 2.0])
        .striped(true)
        .show(ui, |ui| {
            for (binding, action) in bindings {
                ui.label(egui::RichText::new(*binding).strong());
                ui.label(*action);
                ui.end_row();
            }
        });
}
