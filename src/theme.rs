use crate::sim::WatchStatus;
use eframe::egui::{self, Color32};

include!(concat!(env!("OUT_DIR"), "/guide_font.rs"));

/// UI 전체에서 참조할 공통 테마 정보.
pub struct Theme {
    /// 페이지 배경(따뜻한 종이 색).
    pub page: Color32,
    /// 카드/패널 바탕색.
    pub panel: Color32,
    /// 기본 본문 잉크색.
    pub ink: Color32,
    /// 보조 텍스트색.
    pub muted: Color32,
    /// 주 강조색(등록, 긍정 동작).
    pub accent: Color32,
    /// 보조 강조색(답글 등).
    pub accent_alt: Color32,
    /// 패널 테두리 색상.
    pub frame: Color32,
    /// 굵은 강조 배경색.
    pub highlight: Color32,
    /// 인용 블록 테두리 색상.
    pub quote_bar: Color32,
    /// 인라인 코드 글자색.
    pub code: Color32,
}

impl Default for Theme {
    /// 기본 테마 색상을 정의한다.
    fn default() -> Self {
        Self {
            page: Color32::from_rgb(249, 247, 241),
            panel: Color32::from_rgb(255, 255, 255),
            ink: Color32::from_rgb(62, 47, 28),
            muted: Color32::from_rgb(139, 115, 85),
            accent: Color32::from_rgb(39, 174, 96),
            accent_alt: Color32::from_rgb(41, 128, 185),
            frame: Color32::from_rgb(230, 204, 178),
            highlight: Color32::from_rgb(255, 245, 212),
            quote_bar: Color32::from_rgb(212, 163, 115),
            code: Color32::from_rgb(192, 57, 43),
        }
    }
}

impl Theme {
    /// egui Context에 테마 기반 스타일을 적용한다.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.window_rounding = egui::Rounding::same(8.0);
        visuals.panel_fill = self.page;
        visuals.widgets.inactive.bg_fill = self.panel;
        visuals.override_text_color = Some(self.ink);
        ctx.set_visuals(visuals);
        install_custom_font(ctx);
    }

    /// 알림 수신 상태에 대응하는 버튼 색상을 반환한다.
    pub fn watch_color(&self, status: WatchStatus) -> Color32 {
        match status {
            WatchStatus::NotWatching => self.muted,
            WatchStatus::Watching => self.accent,
        }
    }
}

/// build.rs에서 추출한 폰트를 egui에 등록한다.
pub fn install_custom_font(ctx: &egui::Context) {
    if let Some(bytes) = embedded_font_bytes() {
        let mut fonts = egui::FontDefinitions::default();
        fonts
            .font_data
            .insert("custom".into(), egui::FontData::from_static(bytes));
        fonts
            .families
            .entry(egui::FontFamily::Proportional)
            .or_default()
            .insert(0, "custom".into());
        fonts
            .families
            .entry(egui::FontFamily::Monospace)
            .or_default()
            .insert(0, "custom".into());
        ctx.set_fonts(fonts);
    }
}
