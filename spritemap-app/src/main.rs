use anyhow::Context as _;
use spritemap::{
    ui::{MapView, UiViewerExt},
    Viewer, ViewerConfig,
};

/// Path of a JSON viewer configuration
const CONFIG_ENV: &str = "SPRITEMAP_CONFIG";
/// Map document path or URL, overriding the configuration
const MAP_ENV: &str = "SPRITEMAP_MAP";

/// Desktop sprite map viewer
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    spritemap::init_logging();

    let config = load_config()?;
    log::info!("viewing {}", config.map_source);
    let runtime = tokio::runtime::Handle::current();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Spritemap"),
        ..Default::default()
    };

    eframe::run_native(
        "spritemap-app",
        options,
        Box::new(move |_cc| Box::new(SpritemapApp::new(config, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("viewer window failed: {e}"))
}

fn load_config() -> anyhow::Result<ViewerConfig> {
    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => ViewerConfig::from_file(&path)
            .with_context(|| format!("reading viewer config {path}"))?,
        Err(_) => ViewerConfig::default(),
    };

    let map = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(MAP_ENV).ok());
    Ok(match map {
        Some(map) => config.with_map_source(map),
        None => config,
    })
}

struct SpritemapApp {
    viewer: Viewer,
    map_view: MapView,
    runtime: tokio::runtime::Handle,
    show_layer_panel: bool,
}

impl SpritemapApp {
    fn new(config: ViewerConfig, runtime: tokio::runtime::Handle) -> Self {
        let mut viewer = Viewer::new(config);
        viewer.request_load(&runtime);
        Self {
            viewer,
            map_view: MapView::new(),
            runtime,
            show_layer_panel: true,
        }
    }
}

impl eframe::App for SpritemapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_layer_panel, "Layer Panel");
                    if ui.button("Fit to window").clicked() {
                        self.viewer.fit_to_view();
                        ui.close_menu();
                    }
                });

                if ui
                    .add_enabled(!self.viewer.is_loading(), egui::Button::new("Reload"))
                    .clicked()
                {
                    self.viewer.request_load(&self.runtime);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(self.viewer.config().map_source.as_str());
                });
            });
        });

        if self.show_layer_panel {
            egui::SidePanel::right("layer_panel")
                .resizable(true)
                .show(ctx, |ui| {
                    ui.heading("Layers");
                    ui.separator();
                    ui.layer_list(&mut self.viewer);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                ui.sprite_map(&mut self.map_view, &mut self.viewer);
            });
    }
}
