//! DeFi Unite: a native Stellar DeFi frontend with a Soroban counter demo

use eyre::WrapErr;

use defi_unite_adapters::AdapterConfig;

mod app;
mod bridge;
mod state;
mod ui;
mod views;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting DeFi Unite");

    let config = AdapterConfig::from_env();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("defi-unite-worker")
        .build()
        .wrap_err("failed to start the background runtime")?;
    let bridge = bridge::AppBridge::new(&config).wrap_err("failed to set up wallet backends")?;
    let handle = runtime.handle().clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("DeFi Unite")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DeFi Unite",
        native_options,
        Box::new(move |cc| Ok(Box::new(app::App::new(cc, bridge, &config, handle)))),
    )
    .map_err(|e| eyre::eyre!("window closed with an error: {e}"))
}
