use eframe::egui;

use gridpaint_core::{pointer_to_cell, Tool};

use crate::app::GridPaintApp;

/// Keys `0`–`9` select the matching palette index.
const DIGIT_KEYS: [(egui::Key, u32); 10] = [
    (egui::Key::Num0, 0),
    (egui::Key::Num1, 1),
    (egui::Key::Num2, 2),
    (egui::Key::Num3, 3),
    (egui::Key::Num4, 4),
    (egui::Key::Num5, 5),
    (egui::Key::Num6, 6),
    (egui::Key::Num7, 7),
    (egui::Key::Num8, 8),
    (egui::Key::Num9, 9),
];

impl GridPaintApp {
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let origin = response.rect.min;
        let cell = self.session.cell_size() as f32;
        let rows = self.session.grid().rows();
        let cols = self.session.grid().cols();
        let to_cell =
            |pos: egui::Pos2| pointer_to_cell(pos.x, pos.y, origin.x, origin.y, cell, rows, cols);

        self.hover_cell = response.hover_pos().and_then(to_cell);

        let (pressed, down, released, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });

        if pressed && response.hovered() {
            self.session.press(pos.and_then(to_cell));
        } else if down && self.session.is_drawing() {
            self.session.drag(pos.and_then(to_cell));
        }

        // Releasing anywhere, even outside the canvas, ends the stroke.
        if released || (!down && self.session.is_drawing()) {
            self.session.release();
        }
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let text_editing = ctx.memory(|m| m.focused().is_some());
        if text_editing {
            return;
        }

        let mut copy_requested = false;
        ctx.input(|input| {
            let cmd = input.modifiers.command;

            if input.key_pressed(egui::Key::P) && !cmd {
                self.session.set_tool(Tool::Paint);
            }
            if input.key_pressed(egui::Key::E) && !cmd {
                self.session.set_tool(Tool::Erase);
            }
            if input.key_pressed(egui::Key::F) && !cmd {
                self.session.set_tool(Tool::Fill);
            }
            if input.key_pressed(egui::Key::I) && !cmd {
                self.session.set_tool(Tool::Pick);
            }
            if input.key_pressed(egui::Key::H) && !cmd {
                self.show_help = !self.show_help;
            }

            if cmd && input.key_pressed(egui::Key::Z) {
                if input.modifiers.shift {
                    self.redo();
                } else {
                    self.undo();
                }
            }
            if cmd && input.key_pressed(egui::Key::Y) {
                self.redo();
            }
            if cmd && input.modifiers.shift && input.key_pressed(egui::Key::C) {
                copy_requested = true;
            }

            if !cmd {
                for (key, index) in DIGIT_KEYS {
                    if input.key_pressed(key) {
                        self.session.set_active_value(index);
                    }
                }
            }
        });

        if copy_requested {
            self.copy_export(ctx);
        }
    }
}
