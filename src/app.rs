use crate::scenario::{Scenario, ScenarioKind, load_scenario_from_file};
use crate::theme::Theme;
use eframe::egui::{self, RichText};
use instance::SimulatorInstance;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use ui::MockView;

mod instance;
mod ui;
mod widgets;

/// 열려 있는 섹션이 있을 때의 프레임 간격. 약 30fps.
const ACTIVE_FRAME: std::time::Duration = std::time::Duration::from_millis(33);

/// 아코디언 한 칸. 질문 제목과 해당 시나리오, 재생 중인 인스턴스를 묶는다.
struct GuideSection {
    /// 아코디언 머리글에 보이는 질문.
    title: String,
    /// 머리글 왼쪽 아이콘.
    icon: &'static str,
    /// 이 섹션이 재생할 대본.
    scenario: Scenario,
    /// 대본이 펼쳐지는 목업 화면.
    view: MockView,
    /// 펼침 여부.
    open: bool,
    /// 펼쳐져 있는 동안만 존재하는 재생 인스턴스.
    instance: Option<SimulatorInstance>,
}

impl GuideSection {
    fn builtin(kind: ScenarioKind) -> Self {
        let view = match kind {
            ScenarioKind::Create => MockView::TopicList,
            _ => MockView::Thread,
        };
        let icon = match kind {
            ScenarioKind::Create => "✏",
            ScenarioKind::Reply => "💬",
            ScenarioKind::Follow => "🔔",
            ScenarioKind::UserInfo => "👤",
        };
        Self {
            title: kind.heading().to_string(),
            icon,
            scenario: kind.script(),
            view,
            open: false,
            instance: None,
        }
    }
}

/// egui 애플리케이션의 전체 상태를 보관한다.
pub struct GuideApp {
    /// UI 테마 정보.
    theme: Theme,
    /// 드라이버 태스크를 돌릴 Tokio 런타임.
    runtime: Runtime,
    /// 아코디언 섹션 목록.
    sections: Vec<GuideSection>,
    /// 마지막으로 불러온 사용자 대본 경로.
    custom_path: Option<PathBuf>,
    /// 마지막 오류 메시지.
    last_error: Option<String>,
}

impl GuideApp {
    /// egui Context를 받아 초기 상태를 구성한다.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let theme = Theme::default();
        theme.apply(&cc.egui_ctx);
        let runtime = Runtime::new().expect("Tokio 런타임 생성 실패");
        let sections = ScenarioKind::ALL
            .into_iter()
            .map(GuideSection::builtin)
            .collect();
        Self {
            theme,
            runtime,
            sections,
            custom_path: None,
            last_error: None,
        }
    }

    /// 파일 다이얼로그로부터 사용자 대본을 불러와 섹션으로 추가한다.
    fn load_scenario_from_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("YAML", &["yaml", "yml"])
            .pick_file()
        {
            self.apply_scenario_path(path);
        }
    }

    /// 주어진 경로의 YAML을 파싱해 사용자 섹션을 추가하거나 교체한다.
    fn apply_scenario_path(&mut self, path: PathBuf) {
        match load_scenario_from_file(&path) {
            Ok(scenario) => {
                // 기존 사용자 섹션이 있으면 교체한다.
                if self.custom_path.is_some() {
                    self.sections.retain(|s| s.icon != "📄");
                }
                self.sections.push(GuideSection {
                    title: scenario.name.clone(),
                    icon: "📄",
                    scenario,
                    view: MockView::TopicList,
                    open: false,
                    instance: None,
                });
                self.custom_path = Some(path);
                self.last_error = None;
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// 섹션 펼침 상태를 토글한다. 펼치면 재생을 시작하고
    /// 접으면 인스턴스를 버려서 드라이버를 취소시킨다.
    fn toggle_section(&mut self, index: usize) {
        let runtime = &self.runtime;
        if let Some(section) = self.sections.get_mut(index) {
            section.open = !section.open;
            if section.open {
                section.instance =
                    Some(SimulatorInstance::spawn(runtime, section.scenario.clone()));
            } else {
                section.instance = None;
            }
        }
    }

    /// 페이지 상단 소개 영역을 그린다.
    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.label(
            RichText::new("처음 오셨나요?")
                .size(24.0)
                .strong()
                .color(self.theme.ink),
        );
        ui.label(
            RichText::new("궁금한 질문을 누르면 화면이 직접 시연해 드립니다.")
                .size(14.0)
                .color(self.theme.muted),
        );
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("📂 대본 열기").clicked() {
                self.load_scenario_from_dialog();
            }
            if let Some(path) = &self.custom_path {
                ui.label(
                    RichText::new(format!("불러옴 · {}", path.display()))
                        .size(12.0)
                        .color(self.theme.muted),
                );
            }
            if let Some(err) = &self.last_error {
                ui.label(RichText::new(err).color(self.theme.code).strong());
            }
        });
        ui.add_space(10.0);
        ui.separator();
    }

    /// 아코디언 섹션 하나를 그린다. 클릭된 머리글의 인덱스를 반환한다.
    fn render_section(&self, ui: &mut egui::Ui, index: usize) -> bool {
        let section = &self.sections[index];
        let header = egui::Frame::none()
            .fill(self.theme.panel)
            .stroke(egui::Stroke::new(1.0, self.theme.frame))
            .rounding(egui::Rounding::same(10.0))
            .inner_margin(egui::Margin::symmetric(14.0, 12.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(section.icon).size(18.0));
                    ui.label(
                        RichText::new(&section.title)
                            .size(16.0)
                            .strong()
                            .color(self.theme.ink),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(if section.open { "▲" } else { "▼" })
                                .color(self.theme.muted),
                        );
                    });
                });
            });
        let clicked = header
            .response
            .interact(egui::Sense::click())
            .clicked();

        if section.open {
            if let Some(instance) = &section.instance {
                ui.add_space(6.0);
                ui::simulator(
                    ui,
                    &self.theme,
                    egui::Id::new(("guide_section", index)),
                    section.view,
                    instance,
                );
            }
        }
        ui.add_space(10.0);
        clicked
    }
}

impl eframe::App for GuideApp {
    /// egui 메인 루프에서 호출되어 UI를 갱신한다.
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        let page_frame = egui::Frame {
            fill: self.theme.page,
            inner_margin: egui::Margin::symmetric(28.0, 18.0),
            ..Default::default()
        };
        let mut toggled = None;
        egui::CentralPanel::default()
            .frame(page_frame)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_header(ui);
                    ui.add_space(8.0);
                    for index in 0..self.sections.len() {
                        if self.render_section(ui, index) {
                            toggled = Some(index);
                        }
                    }
                });
            });
        if let Some(index) = toggled {
            self.toggle_section(index);
        }

        // 시뮬레이션이 재생 중일 때만 프레임을 계속 요청한다.
        if self.sections.iter().any(|s| s.open) {
            ctx.request_repaint_after(ACTIVE_FRAME);
        }
    }
}
