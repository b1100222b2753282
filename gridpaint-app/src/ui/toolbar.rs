use eframe::egui;

use gridpaint_core::Tool;

use crate::app::GridPaintApp;
use crate::preferences::{MAX_CELL_SIZE, MAX_GRID_SIDE};

const TOOLS: [Tool; 4] = [Tool::Paint, Tool::Erase, Tool::Fill, Tool::Pick];

impl GridPaintApp {
    /// Tool selection, history buttons, resize controls and the grid toggle.
    pub(crate) fn draw_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tool in TOOLS {
                    if ui
                        .selectable_label(self.session.tool() == tool, tool.label())
                        .clicked()
                    {
                        self.session.set_tool(tool);
                    }
                }

                ui.separator();

                if ui
                    .add_enabled(self.session.can_undo(), egui::Button::new("Undo"))
                    .on_hover_text("Ctrl+Z")
                    .clicked()
                {
                    self.undo();
                }
                if ui
                    .add_enabled(self.session.can_redo(), egui::Button::new("Redo"))
                    .on_hover_text("Ctrl+Y")
                    .clicked()
                {
                    self.redo();
                }
                if ui.button("Clear").clicked() {
                    self.clear_grid();
                }
                if ui
                    .button("Invert")
                    .on_hover_text("Map every cell to the palette entry nearest its inverse")
                    .clicked()
                {
                    self.invert_grid();
                }

                ui.separator();

                ui.label("Rows");
                ui.add(egui::DragValue::new(&mut self.resize_rows).range(1..=MAX_GRID_SIDE));
                ui.label("Cols");
                ui.add(egui::DragValue::new(&mut self.resize_cols).range(1..=MAX_GRID_SIDE));
                ui.label("Cell");
                ui.add(
                    egui::DragValue::new(&mut self.resize_cell)
                        .range(1..=MAX_CELL_SIZE)
                        .suffix(" px"),
                );
                if ui.button("Apply").clicked() {
                    self.apply_resize();
                }

                ui.separator();
                ui.checkbox(&mut self.preferences.show_grid_lines, "Grid");
            });
        });
    }
}
