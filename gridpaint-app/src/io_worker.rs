use std::path::{Path, PathBuf};
use std::sync::mpsc;

use tracing::{debug, error};

use gridpaint_render::{export_png, read_png_bitmap, ExportMetadata, RenderBuffer, RenderError};

/// Request sent from the UI thread to the I/O worker.
pub(crate) enum IoRequest {
    /// Write `content` (already serialised JSON) to `path`, creating parent dirs.
    WriteText { path: PathBuf, content: String },
    /// Encode `buffer` as a PNG carrying `metadata`.
    WritePng {
        path: PathBuf,
        buffer: RenderBuffer,
        metadata: ExportMetadata,
    },
    /// Read grid text from a `.json` file or from the metadata of a `.png`.
    ReadGrid { path: PathBuf },
}

/// Response sent from the I/O worker back to the UI thread.
pub(crate) enum IoResponse {
    Saved { path: PathBuf },
    Loaded { path: PathBuf, text: String },
    Failed { path: PathBuf, message: String },
}

/// Spawn a dedicated I/O worker thread.
///
/// Returns the send-side for requests and the receive-side for responses.
/// The thread runs until the request sender is dropped.  Grid state is never
/// touched here; loaded text is handed back for the UI thread to apply.
pub(crate) fn spawn_io_worker() -> (mpsc::Sender<IoRequest>, mpsc::Receiver<IoResponse>) {
    let (req_tx, req_rx) = mpsc::channel::<IoRequest>();
    let (resp_tx, resp_rx) = mpsc::channel::<IoResponse>();

    std::thread::Builder::new()
        .name("io-worker".into())
        .spawn(move || {
            debug!("IO worker thread started");
            while let Ok(request) = req_rx.recv() {
                let response = handle(request);
                if let IoResponse::Failed { path, message } = &response {
                    error!("IO worker: {} failed: {message}", path.display());
                }
                if resp_tx.send(response).is_err() {
                    break;
                }
            }
            debug!("IO worker thread exiting");
        })
        .expect("Failed to spawn IO worker thread");

    (req_tx, resp_rx)
}

fn handle(request: IoRequest) -> IoResponse {
    match request {
        IoRequest::WriteText { path, content } => {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match std::fs::write(&path, &content) {
                Ok(()) => IoResponse::Saved { path },
                Err(e) => IoResponse::Failed {
                    path,
                    message: e.to_string(),
                },
            }
        }
        IoRequest::WritePng {
            path,
            buffer,
            metadata,
        } => match export_png(&buffer, &path, &metadata) {
            Ok(()) => IoResponse::Saved { path },
            Err(e) => IoResponse::Failed {
                path,
                message: e.to_string(),
            },
        },
        IoRequest::ReadGrid { path } => match read_grid_text(&path) {
            Ok(text) => IoResponse::Loaded { path, text },
            Err(message) => IoResponse::Failed { path, message },
        },
    }
}

fn read_grid_text(path: &Path) -> Result<String, String> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if is_png {
        read_png_bitmap(path)
            .and_then(|t| t.ok_or(RenderError::MissingBitmap))
            .map_err(|e| e.to_string())
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())
    }
}
