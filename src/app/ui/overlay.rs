use crate::sim::SimulationState;
use crate::theme::Theme;
use eframe::egui::{self, Color32, FontId, Pos2, Rect, Rounding, Stroke, Vec2};

/// 커서가 목표 좌표에 도달하기까지의 보간 시간(초).
const CURSOR_EASE_SECS: f32 = 0.9;

/// 현재 단계 안내문을 담은 말풍선을 컨테이너 상단 중앙에 그린다.
pub(super) fn instruction_bubble(
    ui: &mut egui::Ui,
    theme: &Theme,
    container: Rect,
    snap: &SimulationState,
    step_total: u32,
) {
    let painter = ui.painter();
    let max_width = container.width() - 120.0;
    let galley = painter.layout(
        snap.instruction.clone(),
        FontId::proportional(14.0),
        Color32::WHITE,
        max_width,
    );

    let padding = Vec2::new(16.0, 12.0);
    let badge = 26.0;
    let size = Vec2::new(
        galley.rect.width() + badge + padding.x * 2.0 + 10.0,
        (galley.rect.height() + padding.y * 2.0).max(badge + padding.y),
    );
    let rect = Rect::from_min_size(
        Pos2::new(container.center().x - size.x / 2.0, container.top() + 10.0),
        size,
    );

    painter.rect(
        rect,
        Rounding::same(12.0),
        Color32::from_rgba_unmultiplied(40, 32, 22, 240),
        Stroke::NONE,
    );

    // 단계 번호 배지.
    let badge_center = Pos2::new(rect.left() + padding.x + badge / 2.0, rect.center().y);
    painter.circle_filled(badge_center, badge / 2.0, theme.accent);
    painter.text(
        badge_center,
        egui::Align2::CENTER_CENTER,
        snap.step.to_string(),
        FontId::proportional(13.0),
        Color32::WHITE,
    );

    painter.galley(
        Pos2::new(
            rect.left() + padding.x + badge + 10.0,
            rect.center().y - galley.rect.height() / 2.0,
        ),
        galley,
        Color32::WHITE,
    );

    if step_total > 0 {
        painter.text(
            Pos2::new(rect.right() - 6.0, rect.bottom() - 4.0),
            egui::Align2::RIGHT_BOTTOM,
            format!("{} / {}", snap.step, step_total),
            FontId::proportional(10.0),
            Color32::from_gray(170),
        );
    }
}

/// 시뮬레이션 커서를 그린다. 드라이버가 정한 목표 좌표를 향해
/// 프레임마다 부드럽게 보간한다.
pub(super) fn cursor(
    ui: &mut egui::Ui,
    theme: &Theme,
    id: egui::Id,
    container: Rect,
    snap: &SimulationState,
) {
    let ctx = ui.ctx().clone();
    let x = ctx.animate_value_with_time(id.with("cursor_x"), snap.cursor_pos.x, CURSOR_EASE_SECS);
    let y = ctx.animate_value_with_time(id.with("cursor_y"), snap.cursor_pos.y, CURSOR_EASE_SECS);
    let pos = Pos2::new(container.left() + x, container.top() + y);

    let painter = ui.painter();
    if snap.is_clicking {
        painter.circle_stroke(pos, 13.0, Stroke::new(2.0, theme.accent));
        painter.circle_filled(pos, 6.0, Color32::from_rgb(40, 32, 22));
    } else {
        painter.circle_filled(pos, 8.0, Color32::from_rgb(40, 32, 22));
    }
    painter.circle_stroke(pos, if snap.is_clicking { 6.0 } else { 8.0 }, Stroke::new(2.0, Color32::WHITE));
}
