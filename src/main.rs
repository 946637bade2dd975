#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod markup;
mod scenario;
mod sim;
mod theme;

use app::GuideApp;
use eframe::egui;

/// egui 애플리케이션을 초기화하고 실행하는 진입점입니다.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_app_id("Forum Guide")
            .with_inner_size([980.0, 840.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "포럼 온보딩 가이드",
        native_options,
        Box::new(|cc| Box::new(GuideApp::new(cc))),
    )
}
