use super::super::widgets::{pill_button, tool_button};
use super::{MockView, track};
use crate::sim::{ComposerTool, SimulationState, TargetId, TargetRegistry};
use crate::theme::Theme;
use eframe::egui::{self, Color32, Pos2, Rect, RichText, Rounding, Sense, Stroke, Vec2};

/// 작성기 패널이 열리고 닫힐 때의 슬라이드 시간(초).
const SLIDE_SECS: f32 = 0.6;

/// 화면 하단에서 올라오는 글 작성기 패널을 그린다.
///
/// 닫혀 있는 동안에는 입력란 타겟을 등록 해제해서 드라이버가
/// 보이지 않는 요소로 이동하지 않게 한다.
pub(super) fn draw(
    ui: &mut egui::Ui,
    theme: &Theme,
    id: egui::Id,
    view: MockView,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
) {
    let openness = ui.ctx().animate_bool_with_time(
        id.with("composer"),
        snap.is_composer_open,
        SLIDE_SECS,
    );
    if openness <= 0.0 {
        targets.forget(TargetId::TitleInput);
        targets.forget(TargetId::BodyEditor);
        targets.forget(TargetId::BoldButton);
        targets.forget(TargetId::SubmitButton);
        return;
    }

    let height = 250.0;
    let panel_rect = Rect::from_min_size(
        Pos2::new(
            container.left() + 12.0,
            container.bottom() - height * openness,
        ),
        Vec2::new(container.width() - 24.0, height),
    );
    let mut panel = ui.child_ui(panel_rect, egui::Layout::top_down(egui::Align::Min));
    egui::Frame::none()
        .fill(theme.panel)
        .stroke(Stroke::new(1.0, theme.frame))
        .rounding(Rounding::same(12.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(&mut panel, |ui| {
            header(ui, theme, view);
            toolbar(ui, theme, snap, targets, container);
            ui.add_space(6.0);
            if view == MockView::TopicList {
                title_input(ui, theme, snap, targets, container);
                ui.add_space(6.0);
            }
            body_editor(ui, theme, snap, targets, container);
            ui.add_space(8.0);
            footer(ui, theme, targets, container);
        });
}

fn header(ui: &mut egui::Ui, theme: &Theme, view: MockView) {
    let title = match view {
        MockView::TopicList => "새 글 쓰기",
        MockView::Thread => "답글 쓰기",
    };
    ui.label(RichText::new(title).size(15.0).strong().color(theme.ink));
    ui.add_space(6.0);
}

/// 서식 도구 줄. 굵게 버튼만 드라이버 타겟으로 쓰인다.
fn toolbar(
    ui: &mut egui::Ui,
    theme: &Theme,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
) {
    ui.horizontal(|ui| {
        let bold = tool_button(ui, theme, "B", snap.active_tool == Some(ComposerTool::Bold));
        track(targets, container, TargetId::BoldButton, bold.rect);
        tool_button(ui, theme, "I", snap.active_tool == Some(ComposerTool::Italic));
        tool_button(ui, theme, "🖼", snap.active_tool == Some(ComposerTool::Image));
        tool_button(ui, theme, "🔗", snap.active_tool == Some(ComposerTool::Link));
    });
}

fn title_input(
    ui: &mut egui::Ui,
    theme: &Theme,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), 30.0),
        Sense::hover(),
    );
    ui.painter()
        .rect(rect, Rounding::same(6.0), theme.page, Stroke::new(1.0, theme.frame));
    let (shown, color) = if snap.title.is_empty() {
        ("제목을 입력하세요", theme.muted)
    } else {
        (snap.title.as_str(), theme.ink)
    };
    ui.painter().text(
        Pos2::new(rect.left() + 8.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        shown,
        egui::FontId::proportional(13.0),
        color,
    );
    track(targets, container, TargetId::TitleInput, rect);
}

/// 본문 입력란. 원문 마크업을 그대로 보여 주고 깜빡이는 캐럿을 붙인다.
fn body_editor(
    ui: &mut egui::Ui,
    theme: &Theme,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), 100.0),
        Sense::hover(),
    );
    ui.painter()
        .rect(rect, Rounding::same(6.0), theme.page, Stroke::new(1.0, theme.frame));

    let painter = ui.painter();
    let galley = painter.layout(
        snap.body.clone(),
        egui::FontId::proportional(13.0),
        theme.ink,
        rect.width() - 16.0,
    );
    let text_pos = Pos2::new(rect.left() + 8.0, rect.top() + 8.0);
    painter.galley(text_pos, galley.clone(), theme.ink);

    // 입력 중임을 보여 주는 깜빡이는 캐럿. 0.6초 간격으로 점멸한다.
    let blink_on = ui.input(|i| i.time) % 1.2 < 0.6;
    if blink_on {
        let end = galley.rect.size();
        let caret_x = text_pos.x + end.x.min(rect.width() - 16.0);
        let caret_top = text_pos.y + (end.y - 16.0).max(0.0);
        painter.line_segment(
            [
                Pos2::new(caret_x + 1.0, caret_top),
                Pos2::new(caret_x + 1.0, caret_top + 16.0),
            ],
            Stroke::new(1.5, theme.ink),
        );
    }
    track(targets, container, TargetId::BodyEditor, rect);
}

fn footer(ui: &mut egui::Ui, theme: &Theme, targets: &TargetRegistry, container: Rect) {
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        let submit = pill_button(ui, "등록", theme.accent, Color32::WHITE);
        track(targets, container, TargetId::SubmitButton, submit.rect);
        ui.add_space(6.0);
        pill_button(ui, "취소", theme.panel, theme.muted);
    });
}
