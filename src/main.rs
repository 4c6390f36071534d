use log::{error, info};
use slide_editor::{EditorConfig, SlideEditorApp};

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Optional first argument: path to a JSON editor config
    let config = match std::env::args().nth(1) {
        Some(path) => EditorConfig::load(&path).unwrap_or_else(|err| {
            error!("Ignoring config {}: {}", path, err);
            EditorConfig::default()
        }),
        None => EditorConfig::default(),
    };
    info!("Starting slide editor ({}x{} slides)", config.slide_width, config.slide_height);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Slide Editor"),
        ..Default::default()
    };
    eframe::run_native(
        "Slide Editor",
        native_options,
        Box::new(move |cc| Ok(Box::new(SlideEditorApp::new(cc, config)))),
    )
}
