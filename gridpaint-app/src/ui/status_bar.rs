use eframe::egui;

use crate::app::GridPaintApp;

impl GridPaintApp {
    pub(crate) fn draw_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let grid = self.session.grid();
                ui.label(format!(
                    "{}×{} @ {} px",
                    grid.rows(),
                    grid.cols(),
                    self.session.cell_size()
                ));
                ui.separator();
                ui.label(format!("Tool: {}", self.session.tool().label()));
                ui.separator();
                ui.label(format!("Value: {}", self.session.active_value()));

                if let Some(cell) = self.hover_cell {
                    ui.separator();
                    let value = grid.get(cell.row, cell.col).unwrap_or_default();
                    ui.label(format!("({}, {}) = {value}", cell.row, cell.col));
                }

                if let Some(status) = &self.status {
                    ui.separator();
                    let color = if status.is_error {
                        egui::Color32::from_rgb(230, 90, 90)
                    } else {
                        egui::Color32::from_rgb(170, 170, 170)
                    };
                    ui.label(egui::RichText::new(&status.text).color(color));
                }
            });
        });
    }
}
