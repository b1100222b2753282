use eframe::egui;

use crate::app::GridPaintApp;

impl GridPaintApp {
    /// Draw the top menu bar. Must be called **before** `CentralPanel` so that
    /// `egui` reserves vertical space for it.
    pub(crate) fn draw_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                self.menu_file(ui, ctx);
                self.menu_edit(ui, ctx);
                self.menu_view(ui);
            });
        });
    }

    fn menu_file(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Open…").clicked() {
                ui.close();
                self.open_file_dialog();
            }
            if ui.button("Import Text…").clicked() {
                ui.close();
                self.show_import = true;
            }
            ui.separator();
            if ui.button("Save JSON…").clicked() {
                ui.close();
                self.save_json_dialog();
            }
            if ui.button("Export PNG…").clicked() {
                ui.close();
                self.export_png_dialog();
            }
            ui.separator();
            if ui.button("Reload Palette").clicked() {
                ui.close();
                self.reload_palette();
            }
            ui.separator();
            if ui.button("Quit").clicked() {
                ui.close();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn menu_edit(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("Edit", |ui| {
            if ui
                .add_enabled(self.session.can_undo(), shortcut_item("Undo", "Ctrl+Z"))
                .clicked()
            {
                ui.close();
                self.undo();
            }
            if ui
                .add_enabled(self.session.can_redo(), shortcut_item("Redo", "Ctrl+Y"))
                .clicked()
            {
                ui.close();
                self.redo();
            }
            ui.separator();
            if ui.add(shortcut_item("Copy JSON", "Ctrl+Shift+C")).clicked() {
                ui.close();
                self.copy_export(ctx);
            }
            ui.separator();
            if ui.button("Clear").clicked() {
                ui.close();
                self.clear_grid();
            }
            if ui.button("Invert Colors").clicked() {
                ui.close();
                self.invert_grid();
            }
        });
    }

    fn menu_view(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("View", |ui| {
            ui.checkbox(&mut self.preferences.show_grid_lines, "Grid lines");
            ui.checkbox(&mut self.preferences.export_grid_lines, "Grid lines in PNG export");
            ui.separator();
            if ui.add(shortcut_item("Controls", "H")).clicked() {
                ui.close();
                self.show_help = !self.show_help;
            }
        });
    }
}

/// `Button` with the keyboard shortcut appended to its label.
fn shortcut_item(label: &str, shortcut: &str) -> egui::Button<'static> {
    let text = format!("{label}    {shortcut}");
    egui::Button::new(egui::RichText::new(text)).wrap_mode(egui::TextWrapMode::Extend)
}
