// Windows only: an `icon.ico` beside this manifest becomes the GridPaint.exe
// icon. Builds without the file skip the resource step.

fn main() {
    println!("cargo:rerun-if-changed=icon.ico");

    #[cfg(target_os = "windows")]
    {
        let icon = std::path::Path::new("icon.ico");
        if !icon.exists() {
            return;
        }
        let mut res = winres::WindowsResource::new();
        res.set_icon("icon.ico");
        if let Err(e) = res.compile() {
            panic!(
                "embedding icon.ico failed ({e}); \
                 a resource compiler such as rc.exe must be on PATH"
            );
        }
    }
}
