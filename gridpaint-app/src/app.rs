use std::path::PathBuf;
use std::sync::mpsc;

use eframe::egui;
use tracing::{info, warn};

use gridpaint_core::{import_text, CellPos, EditorSession, Grid};
use gridpaint_render::{rasterize, ExportMetadata};

use crate::io_worker::{spawn_io_worker, IoRequest, IoResponse};
use crate::palette_file;
use crate::preferences::{check_grid_side, AppPreferences, LastSize};

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

/// Last message shown in the status bar.
pub(crate) struct StatusLine {
    pub(crate) text: String,
    pub(crate) is_error: bool,
}

// ---------------------------------------------------------------------------
// App state
// ---------------------------------------------------------------------------

pub(crate) struct GridPaintApp {
    pub(crate) session: EditorSession,
    pub(crate) preferences: AppPreferences,
    pub(crate) palette_path: PathBuf,

    /// Grid rasterized at one pixel per cell, scaled up with nearest filtering.
    pub(crate) texture: Option<egui::TextureHandle>,
    /// Session revision the texture was built from.
    pub(crate) texture_revision: Option<u64>,
    pub(crate) hover_cell: Option<CellPos>,

    // Resize fields in the toolbar (applied on demand).
    pub(crate) resize_rows: u32,
    pub(crate) resize_cols: u32,
    pub(crate) resize_cell: u32,

    pub(crate) show_import: bool,
    pub(crate) import_buf: String,
    pub(crate) show_help: bool,
    pub(crate) status: Option<StatusLine>,

    io_tx: mpsc::Sender<IoRequest>,
    io_rx: mpsc::Receiver<IoResponse>,
}

impl GridPaintApp {
    pub(crate) fn new(preferences: AppPreferences) -> Self {
        let palette_path = palette_file::palette_path(&preferences.palette_file);
        palette_file::ensure_default_palette(&palette_path);
        let palette = palette_file::load_palette(&palette_path);

        let size = preferences.startup_size();
        let session =
            EditorSession::new(Grid::new(size.rows, size.cols), palette, size.cell_size);
        let (io_tx, io_rx) = spawn_io_worker();

        Self {
            session,
            preferences,
            palette_path,
            texture: None,
            texture_revision: None,
            hover_cell: None,
            resize_rows: size.rows,
            resize_cols: size.cols,
            resize_cell: size.cell_size,
            show_import: false,
            import_buf: String::new(),
            show_help: false,
            status: None,
            io_tx,
            io_rx,
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            is_error: false,
        });
    }

    pub(crate) fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!("{text}");
        self.status = Some(StatusLine {
            text,
            is_error: true,
        });
    }

    /// Copy the current grid dimensions into the toolbar resize fields.
    pub(crate) fn sync_resize_fields(&mut self) {
        self.resize_rows = self.session.grid().rows();
        self.resize_cols = self.session.grid().cols();
        self.resize_cell = self.session.cell_size();
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    pub(crate) fn apply_resize(&mut self) {
        let (rows, cols, cell) = (self.resize_rows, self.resize_cols, self.resize_cell);
        if self.session.resize(rows as i64, cols as i64, cell as i64) {
            self.set_status(format!("Resized to {rows}×{cols} at {cell} px"));
        }
        self.sync_resize_fields();
    }

    pub(crate) fn undo(&mut self) {
        if self.session.undo() {
            self.sync_resize_fields();
        }
    }

    pub(crate) fn redo(&mut self) {
        if self.session.redo() {
            self.sync_resize_fields();
        }
    }

    pub(crate) fn clear_grid(&mut self) {
        if self.session.clear() {
            self.set_status("Cleared");
        }
    }

    pub(crate) fn invert_grid(&mut self) {
        if self.session.invert() {
            self.set_status("Inverted colors");
        }
    }

    /// Replace the grid from text. On failure, including grids too large for
    /// the canvas, the grid is kept and the error is shown.
    pub(crate) fn load_text(&mut self, text: &str, source: &str) -> bool {
        let grid = match import_text(text) {
            Ok(grid) => grid,
            Err(e) => {
                self.set_error(format!("Import from {source} failed: {e}"));
                return false;
            }
        };
        if let Err(msg) = check_grid_side(grid.rows(), grid.cols()) {
            self.set_error(format!("Import from {source} failed: {msg}"));
            return false;
        }
        let msg = format!("Loaded {}×{} grid from {source}", grid.rows(), grid.cols());
        self.session.load_grid(grid);
        self.sync_resize_fields();
        self.set_status(msg);
        true
    }

    pub(crate) fn load_import_buffer(&mut self) {
        let text = std::mem::take(&mut self.import_buf);
        if self.load_text(&text, "pasted text") {
            self.show_import = false;
        } else {
            self.import_buf = text;
        }
    }

    pub(crate) fn copy_export(&mut self, ctx: &egui::Context) {
        match self.session.export_json() {
            Ok(json) => {
                ctx.copy_text(json);
                self.set_status("Copied grid JSON to clipboard");
            }
            Err(e) => self.set_error(format!("Copy failed: {e}")),
        }
    }

    pub(crate) fn open_file_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Grid", &["json", "png", "txt", "js"])
            .add_filter("All files", &["*"])
            .pick_file();
        if let Some(path) = picked {
            let _ = self.io_tx.send(IoRequest::ReadGrid { path });
        }
    }

    pub(crate) fn save_json_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("bitmap.json")
            .save_file();
        let Some(path) = picked else {
            return;
        };
        match self.session.export_json() {
            Ok(content) => {
                let _ = self.io_tx.send(IoRequest::WriteText { path, content });
            }
            Err(e) => self.set_error(format!("Save failed: {e}")),
        }
    }

    pub(crate) fn export_png_dialog(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .set_file_name("bitmap.png")
            .save_file();
        let Some(path) = picked else {
            return;
        };
        let grid = self.session.grid();
        let cell = self.session.cell_size();
        let lines = self.preferences.export_grid_lines;
        let prepared = rasterize(grid, self.session.palette(), cell, lines)
            .and_then(|buffer| Ok((buffer, ExportMetadata::for_grid(grid, cell)?)));
        match prepared {
            Ok((buffer, metadata)) => {
                let _ = self.io_tx.send(IoRequest::WritePng {
                    path,
                    buffer,
                    metadata,
                });
            }
            Err(e) => self.set_error(format!("PNG export failed: {e}")),
        }
    }

    pub(crate) fn reload_palette(&mut self) {
        let palette = palette_file::load_palette(&self.palette_path);
        self.session.set_palette(palette);
        self.set_status(format!("Reloaded palette from {}", self.palette_path.display()));
    }

    fn poll_io_responses(&mut self) {
        while let Ok(response) = self.io_rx.try_recv() {
            match response {
                IoResponse::Saved { path } => {
                    self.set_status(format!("Saved {}", path.display()));
                }
                IoResponse::Loaded { path, text } => {
                    let source = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    self.load_text(&text, &source);
                }
                IoResponse::Failed { path, message } => {
                    self.set_error(format!("{}: {message}", path.display()));
                }
            }
        }
    }

    /// Re-upload the canvas texture if the session changed since the last frame.
    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let revision = self.session.revision();
        if self.texture.is_some() && self.texture_revision == Some(revision) {
            return;
        }
        match rasterize(self.session.grid(), self.session.palette(), 1, false) {
            Ok(buffer) => {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [buffer.width as usize, buffer.height as usize],
                    &buffer.pixels,
                );
                match self.texture.as_mut() {
                    Some(tex) => tex.set(image, egui::TextureOptions::NEAREST),
                    None => {
                        self.texture =
                            Some(ctx.load_texture("grid", image, egui::TextureOptions::NEAREST));
                    }
                }
            }
            Err(e) => self.set_error(format!("Render failed: {e}")),
        }
        self.texture_revision = Some(revision);
    }

    fn capture_last_size(&self) -> LastSize {
        LastSize {
            rows: self.session.grid().rows(),
            cols: self.session.grid().cols(),
            cell_size: self.session.cell_size(),
        }
    }

    // -----------------------------------------------------------------------
    // Canvas
    // -----------------------------------------------------------------------

    fn draw_canvas(&mut self, ctx: &egui::Context) {
        self.refresh_texture(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let cell = self.session.cell_size() as f32;
            let rows = self.session.grid().rows();
            let cols = self.session.grid().cols();
            let size = egui::vec2(cols as f32 * cell, rows as f32 * cell);

            egui::ScrollArea::both()
                .drag_to_scroll(false)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let (response, painter) =
                        ui.allocate_painter(size, egui::Sense::click_and_drag());
                    let rect = response.rect;

                    if let Some(tex) = &self.texture {
                        let uv =
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                        painter.image(tex.id(), rect, uv, egui::Color32::WHITE);
                    }

                    if self.preferences.show_grid_lines && cell >= 4.0 {
                        let stroke = egui::Stroke::new(
                            1.0,
                            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 60),
                        );
                        for c in 0..=cols {
                            let x = rect.min.x + c as f32 * cell;
                            painter.line_segment(
                                [egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)],
                                stroke,
                            );
                        }
                        for r in 0..=rows {
                            let y = rect.min.y + r as f32 * cell;
                            painter.line_segment(
                                [egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)],
                                stroke,
                            );
                        }
                    }

                    self.handle_canvas_input(ctx, &response);

                    if let Some(hc) = self.hover_cell {
                        let min =
                            rect.min + egui::vec2(hc.col as f32 * cell, hc.row as f32 * cell);
                        let cell_rect = egui::Rect::from_min_size(min, egui::vec2(cell, cell));
                        painter.rect_stroke(
                            cell_rect,
                            0.0,
                            egui::Stroke::new(1.5, egui::Color32::from_rgb(80, 200, 255)),
                            egui::StrokeKind::Inside,
                        );
                    }
                });
        });
    }
}

// ---------------------------------------------------------------------------
// eframe::App
// ---------------------------------------------------------------------------

impl eframe::App for GridPaintApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());
        self.poll_io_responses();

        self.draw_menu_bar(ctx);
        self.draw_toolbar(ctx);
        self.draw_status_bar(ctx);
        self.draw_palette_bar(ctx);
        self.draw_canvas(ctx);

        self.show_import_window(ctx);
        self.show_help_window(ctx);
        self.handle_keyboard(ctx);

        if self.session.is_drawing() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.preferences.last_size = Some(self.capture_last_size());
        self.preferences.save();
        info!("Saved preferences on exit");
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub(crate) fn run() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting GridPaint");

    let prefs = AppPreferences::load();

    let viewport = egui::ViewportBuilder::default()
        .with_title("GridPaint")
        .with_inner_size([prefs.window_width, prefs.window_height]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "GridPaint",
        options,
        Box::new(move |_cc| Ok(Box::new(GridPaintApp::new(prefs)))),
    )
}
