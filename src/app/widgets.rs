use crate::theme::Theme;
use eframe::egui::{self, Color32, RichText, Rounding, Sense, Stroke, Vec2};

/// 목업 전용 알약형 버튼을 그린다. 시청자 입력에는 반응하지 않는다.
pub(super) fn pill_button(
    ui: &mut egui::Ui,
    label: &str,
    fill: Color32,
    text_color: Color32,
) -> egui::Response {
    let padding = Vec2::new(16.0, 8.0);
    let galley = ui.painter().layout_no_wrap(
        label.to_string(),
        egui::FontId::proportional(14.0),
        text_color,
    );
    let size = galley.size() + padding * 2.0;
    let (rect, response) = ui.allocate_exact_size(size, Sense::hover());
    ui.painter().rect_filled(rect, Rounding::same(8.0), fill);
    ui.painter().galley(rect.min + padding, galley, text_color);
    response
}

/// 이름 첫 글자를 담은 원형 아바타를 그린다.
pub(super) fn avatar_circle(
    ui: &mut egui::Ui,
    initial: &str,
    diameter: f32,
    fill: Color32,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(diameter), Sense::hover());
    ui.painter().circle_filled(rect.center(), diameter / 2.0, fill);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial,
        egui::FontId::proportional(diameter * 0.45),
        Color32::WHITE,
    );
    response
}

/// 작성기 도구 모음의 사각 버튼을 그린다. 활성 도구는 강조색으로 채운다.
pub(super) fn tool_button(
    ui: &mut egui::Ui,
    theme: &Theme,
    label: &str,
    active: bool,
) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(32.0), Sense::hover());
    let (fill, text_color, stroke) = if active {
        (theme.accent, Color32::WHITE, Stroke::new(2.0, theme.accent))
    } else {
        (theme.panel, theme.muted, Stroke::new(1.0, theme.frame))
    };
    ui.painter().rect(rect, Rounding::same(6.0), fill, stroke);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(15.0),
        text_color,
    );
    response
}

/// 내용이 비어 있는 게시글 자리 표시 줄을 그린다.
pub(super) fn ghost_row(ui: &mut egui::Ui, theme: &Theme) {
    egui::Frame::none()
        .fill(theme.panel)
        .stroke(Stroke::new(1.0, theme.frame))
        .rounding(Rounding::same(10.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let (circle, _) = ui.allocate_exact_size(Vec2::splat(36.0), Sense::hover());
                ui.painter()
                    .circle_filled(circle.center(), 18.0, theme.frame);
                ui.vertical(|ui| {
                    let width = ui.available_width();
                    for (bar_width, height) in [(width * 0.5, 10.0), (width * 0.3, 8.0)] {
                        let (bar, _) =
                            ui.allocate_exact_size(Vec2::new(bar_width, height), Sense::hover());
                        ui.painter()
                            .rect_filled(bar, Rounding::same(4.0), theme.frame);
                        ui.add_space(4.0);
                    }
                });
            });
        });
}

/// 게시글/답글 카드의 작성자 헤더 한 줄을 그린다.
pub(super) fn author_header(ui: &mut egui::Ui, theme: &Theme, name: &str, when: &str) {
    ui.horizontal(|ui| {
        let initial: String = name.chars().take(1).collect();
        avatar_circle(ui, &initial, 32.0, theme.accent_alt);
        ui.label(RichText::new(name).strong().color(theme.ink));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(when).size(11.0).color(theme.muted));
        });
    });
}
