use super::super::widgets::{author_header, avatar_circle, ghost_row, pill_button};
use super::{MockView, track};
use crate::markup::{Block, Inline, parse_markup};
use crate::sim::{SimulationState, TargetId, TargetRegistry, WatchStatus};
use crate::theme::Theme;
use eframe::egui::{self, Color32, Pos2, Rect, RichText, Rounding, Sense, Stroke, Vec2};

/// 목업 포럼 화면(상단바 + 본문 뷰)을 그린다.
pub(super) fn draw(
    ui: &mut egui::Ui,
    theme: &Theme,
    view: MockView,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
) {
    navbar(ui, theme);
    ui.add_space(10.0);
    match view {
        MockView::TopicList => topic_list(ui, theme, snap, targets, container),
        MockView::Thread => thread_view(ui, theme, snap, targets, container),
    }
}

/// 커뮤니티 상단바를 그린다. 장식 요소라 타겟을 등록하지 않는다.
fn navbar(ui: &mut egui::Ui, theme: &Theme) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("책벌레 마을")
                .size(19.0)
                .strong()
                .color(theme.ink),
        );
        ui.add_space(14.0);
        ui.label(RichText::new("게시판").size(13.0).color(theme.muted));
        ui.label(RichText::new("태그").size(13.0).color(theme.muted));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            avatar_circle(ui, "나", 28.0, theme.accent);
        });
    });
    ui.separator();
}

/// 게시판 목록 화면을 그린다. 새 글 쓰기 버튼이 유일한 타겟이다.
fn topic_list(
    ui: &mut egui::Ui,
    theme: &Theme,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("자유 게시판")
                .size(16.0)
                .strong()
                .color(theme.ink),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let response = pill_button(ui, "새 글 쓰기 +", theme.accent, Color32::WHITE);
            track(targets, container, TargetId::NewTopicButton, response.rect);
        });
    });
    ui.add_space(8.0);
    ghost_row(ui, theme);
    ui.add_space(6.0);
    ghost_row(ui, theme);
    ui.add_space(6.0);

    if snap.is_submitted {
        egui::Frame::none()
            .fill(theme.panel)
            .stroke(Stroke::new(2.0, theme.accent))
            .rounding(Rounding::same(10.0))
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    avatar_circle(ui, "나", 36.0, theme.accent);
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&snap.title)
                                .size(15.0)
                                .strong()
                                .color(theme.ink),
                        );
                        ui.label(
                            RichText::new("방금 작성됨")
                                .size(11.0)
                                .strong()
                                .color(theme.accent),
                        );
                    });
                });
            });
    }
}

/// 게시글 상세 화면을 그린다. 답글/알림/작성자 타겟이 여기에 있다.
fn thread_view(
    ui: &mut egui::Ui,
    theme: &Theme,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
) {
    ui.label(
        RichText::new("가족이 함께 읽을 책을 찾고 있어요")
            .size(17.0)
            .strong()
            .color(theme.ink),
    );
    ui.add_space(8.0);

    let mut avatar_rect = Rect::NOTHING;
    let mut watch_rect = Rect::NOTHING;
    egui::Frame::none()
        .fill(theme.panel)
        .stroke(Stroke::new(1.0, theme.frame))
        .rounding(Rounding::same(10.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let response = avatar_circle(ui, "책", 36.0, theme.accent_alt);
                avatar_rect = response.rect;
                track(targets, container, TargetId::AuthorAvatar, response.rect);
                ui.label(RichText::new("책벌레조아").strong().color(theme.ink));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new("1시간 전").size(11.0).color(theme.muted));
                });
            });
            ui.add_space(6.0);
            ui.label(
                RichText::new("가족 모두가 좋아할 만한 따뜻한 책이 있으면 추천해 주세요!")
                    .size(14.0)
                    .color(theme.ink),
            );
            ui.add_space(8.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let reply = pill_button(ui, "답글 ↩", theme.accent_alt, Color32::WHITE);
                track(targets, container, TargetId::ReplyButton, reply.rect);
                let watch_label = match snap.watch_status {
                    WatchStatus::Watching => "🔔 알림 받는 중",
                    WatchStatus::NotWatching => "🔔 알림 설정",
                };
                let watch = pill_button(
                    ui,
                    watch_label,
                    theme.panel,
                    theme.watch_color(snap.watch_status),
                );
                ui.painter().rect_stroke(
                    watch.rect,
                    Rounding::same(8.0),
                    Stroke::new(1.0, theme.watch_color(snap.watch_status)),
                );
                watch_rect = watch.rect;
                track(targets, container, TargetId::WatchButton, watch.rect);
            });
        });

    watch_menu(ui, theme, snap, targets, container, watch_rect);
    user_card(ui, theme, snap, targets, container, avatar_rect);

    if snap.is_submitted {
        ui.add_space(8.0);
        egui::Frame::none()
            .fill(theme.panel)
            .stroke(Stroke::new(2.0, theme.accent_alt))
            .rounding(Rounding::same(10.0))
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                author_header(ui, theme, "나그네독자", "방금 전");
                ui.add_space(6.0);
                markdown(ui, theme, &snap.body);
            });
    }
}

/// 알림 설정 메뉴 팝업을 알림 버튼 위쪽에 그린다.
fn watch_menu(
    ui: &mut egui::Ui,
    theme: &Theme,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
    watch_rect: Rect,
) {
    if !snap.is_watch_menu_open || watch_rect == Rect::NOTHING {
        targets.forget(TargetId::WatchMenuOption);
        return;
    }
    let menu_rect = Rect::from_min_size(
        Pos2::new(watch_rect.left() - 30.0, watch_rect.bottom() + 6.0),
        Vec2::new(190.0, 92.0),
    );
    let mut popup = ui.child_ui(menu_rect, egui::Layout::top_down(egui::Align::Min));
    egui::Frame::none()
        .fill(theme.panel)
        .stroke(Stroke::new(1.0, theme.frame))
        .rounding(Rounding::same(10.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(&mut popup, |ui| {
            ui.label(RichText::new("알림 상태").size(10.0).strong().color(theme.muted));
            ui.add_space(4.0);
            let option = ui.label(
                RichText::new("● 알림 받기")
                    .size(13.0)
                    .strong()
                    .color(theme.accent),
            );
            track(targets, container, TargetId::WatchMenuOption, option.rect);
            ui.label(RichText::new("알림 끄기").size(13.0).color(theme.muted));
        });
}

/// 작성자 사용자 카드를 아바타 아래쪽에 그린다.
fn user_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    snap: &SimulationState,
    targets: &TargetRegistry,
    container: Rect,
    avatar_rect: Rect,
) {
    if !snap.is_user_card_open || avatar_rect == Rect::NOTHING {
        targets.forget(TargetId::MessageButton);
        return;
    }
    let card_rect = Rect::from_min_size(
        Pos2::new(avatar_rect.left(), avatar_rect.bottom() + 8.0),
        Vec2::new(240.0, 130.0),
    );
    let mut popup = ui.child_ui(card_rect, egui::Layout::top_down(egui::Align::Min));
    egui::Frame::none()
        .fill(theme.panel)
        .stroke(Stroke::new(1.0, theme.quote_bar))
        .rounding(Rounding::same(10.0))
        .inner_margin(egui::Margin::same(12.0))
        .show(&mut popup, |ui| {
            ui.horizontal(|ui| {
                avatar_circle(ui, "책", 40.0, theme.accent_alt);
                ui.vertical(|ui| {
                    ui.label(RichText::new("책벌레조아").strong().color(theme.ink));
                    ui.label(
                        RichText::new("가입일 2023년 3월")
                            .size(11.0)
                            .color(theme.muted),
                    );
                    ui.label(
                        RichText::new("글 128 · 답글 1,024")
                            .size(11.0)
                            .color(theme.muted),
                    );
                });
            });
            ui.add_space(6.0);
            let message = pill_button(ui, "✉ 메시지 보내기", theme.accent_alt, Color32::WHITE);
            track(targets, container, TargetId::MessageButton, message.rect);
        });
}

/// 파싱된 마크업 블록들을 egui 라벨로 그린다.
pub(super) fn markdown(ui: &mut egui::Ui, theme: &Theme, text: &str) {
    for block in parse_markup(text) {
        match block {
            Block::Paragraph(inlines) if inlines.is_empty() => {
                ui.add_space(8.0);
            }
            Block::Paragraph(inlines) => {
                inline_row(ui, theme, &inlines);
            }
            Block::Quote(inlines) => {
                ui.horizontal(|ui| {
                    let (bar, _) =
                        ui.allocate_exact_size(Vec2::new(4.0, 20.0), Sense::hover());
                    ui.painter()
                        .rect_filled(bar, Rounding::same(2.0), theme.quote_bar);
                    inline_row(ui, theme, &inlines);
                });
            }
            Block::List(items) => {
                for item in items {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("•").color(theme.quote_bar));
                        inline_row(ui, theme, &item);
                    });
                }
            }
        }
    }
}

/// 한 줄의 인라인 조각들을 서식에 맞게 이어 그린다.
fn inline_row(ui: &mut egui::Ui, theme: &Theme, inlines: &[Inline]) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for inline in inlines {
            match inline {
                Inline::Text(text) => {
                    ui.label(RichText::new(text).size(14.0).color(theme.ink));
                }
                Inline::Bold(text) => {
                    ui.label(
                        RichText::new(text)
                            .size(14.0)
                            .strong()
                            .color(theme.ink)
                            .background_color(theme.highlight),
                    );
                }
                Inline::Italic(text) => {
                    ui.label(RichText::new(text).size(14.0).italics().color(theme.muted));
                }
                Inline::Code(text) => {
                    ui.label(
                        RichText::new(text)
                            .size(13.0)
                            .monospace()
                            .color(theme.code)
                            .background_color(theme.highlight),
                    );
                }
                Inline::Link { text, .. } => {
                    // 시뮬레이션 환경이므로 클릭해도 아무 곳으로도 이동하지 않는다.
                    let _ = ui.link(
                        RichText::new(text)
                            .size(14.0)
                            .underline()
                            .color(theme.accent_alt),
                    );
                }
                Inline::Image { alt, .. } => {
                    image_placeholder(ui, theme, alt);
                }
            }
        }
    });
}

/// 네트워크 요청 없이 이미지를 자리 표시 틀로 그린다.
fn image_placeholder(ui: &mut egui::Ui, theme: &Theme, alt: &str) {
    let (rect, _) = ui.allocate_exact_size(Vec2::new(200.0, 96.0), Sense::hover());
    ui.painter().rect(
        rect,
        Rounding::same(8.0),
        theme.page,
        Stroke::new(1.0, theme.frame),
    );
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        format!("🖼 {alt}"),
        egui::FontId::proportional(13.0),
        theme.muted,
    );
}
