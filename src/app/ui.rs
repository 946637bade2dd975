use super::instance::SimulatorInstance;
use crate::sim::{TargetId, TargetRegistry, element_center};
use crate::theme::Theme;
use eframe::egui::{self, Rounding, Sense, Stroke, Vec2};

mod composer;
mod forum;
mod overlay;

/// 어떤 목업 화면 위에서 시나리오를 재생할지 결정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MockView {
    /// 게시판 목록 화면. 새 글 쓰기 안내에 사용한다.
    TopicList,
    /// 게시글 상세(스레드) 화면. 답글/알림/작성자 안내에 사용한다.
    Thread,
}

/// 시뮬레이터 위젯 전체(목업 화면 + 작성기 + 안내 버블 + 커서)를 그린다.
///
/// 시청자 입력은 어디에도 연결되어 있지 않으며, 모든 움직임은
/// 드라이버가 만든 상태 스냅샷에서 나온다.
pub(crate) fn simulator(
    ui: &mut egui::Ui,
    theme: &Theme,
    id: egui::Id,
    view: MockView,
    instance: &SimulatorInstance,
) {
    let snap = instance.snapshot();
    let size = Vec2::new(ui.available_width(), 540.0);
    let (container, _) = ui.allocate_exact_size(size, Sense::hover());
    ui.painter().rect(
        container,
        Rounding::same(12.0),
        theme.panel,
        Stroke::new(1.0, theme.frame),
    );

    let content_rect = container.shrink(16.0);
    let mut content = ui.child_ui(content_rect, egui::Layout::top_down(egui::Align::Min));
    forum::draw(&mut content, theme, view, &snap, instance.targets(), container);

    composer::draw(ui, theme, id, view, &snap, instance.targets(), container);
    overlay::instruction_bubble(ui, theme, container, &snap, instance.step_total());
    overlay::cursor(ui, theme, id, container, &snap);
}

/// 타겟 사각형의 중심을 컨테이너 기준 좌표로 기록한다.
pub(super) fn track(
    targets: &TargetRegistry,
    container: egui::Rect,
    id: TargetId,
    rect: egui::Rect,
) {
    targets.record(
        id,
        element_center(
            (container.min.x, container.min.y),
            (rect.min.x, rect.min.y),
            (rect.width(), rect.height()),
        ),
    );
}
