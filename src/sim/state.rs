use std::sync::{Arc, Mutex};

/// 시뮬레이션 컨테이너 좌상단 기준의 픽셀 좌표이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// 가로 오프셋.
    pub x: f32,
    /// 세로 오프셋.
    pub y: f32,
}

impl Coordinate {
    /// 좌표 값을 생성한다.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 본문/제목 내 선택 영역을 표현한다. 현재 시나리오에서는 사용하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// 시작 오프셋.
    pub start: usize,
    /// 끝 오프셋.
    pub end: usize,
}

/// 게시글 알림 수신 상태를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WatchStatus {
    /// 알림을 받지 않는 상태.
    #[default]
    NotWatching,
    /// 새 답글 알림을 받는 상태.
    Watching,
}

/// 작성기 도구 모음에서 강조 표시되는 서식 도구이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComposerTool {
    /// 굵게 쓰기 버튼.
    Bold,
    /// 기울임 쓰기 버튼.
    Italic,
    /// 이미지 삽입 버튼.
    Image,
    /// 링크 삽입 버튼.
    Link,
}

/// 한 프레임을 그리는 데 필요한 시뮬레이션 전체 상태이다.
///
/// 드라이버 태스크만이 이 레코드를 변경하며, UI는 매 프레임 스냅샷을
/// 복제해 읽기만 한다.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    /// 현재 안내 단계(1부터 시작).
    pub step: u32,
    /// 현재 단계의 안내 문구.
    pub instruction: String,
    /// 작성기 패널이 열려 있는지 여부.
    pub is_composer_open: bool,
    /// 지금까지 입력된 제목 텍스트.
    pub title: String,
    /// 지금까지 입력된 본문 텍스트.
    pub body: String,
    /// 이번 회차에서 등록 동작이 실행되었는지 여부.
    pub is_submitted: bool,
    /// 시뮬레이션 커서의 현재 위치.
    pub cursor_pos: Coordinate,
    /// 커서가 누름 동작 중인지 여부.
    pub is_clicking: bool,
    /// 강조 표시 중인 서식 도구.
    pub active_tool: Option<ComposerTool>,
    /// 선택 영역 강조용 예약 필드.
    pub selection_range: Option<SelectionRange>,
    /// 알림 수신 상태.
    pub watch_status: WatchStatus,
    /// 알림 설정 메뉴가 열려 있는지 여부.
    pub is_watch_menu_open: bool,
    /// 사용자 카드가 열려 있는지 여부.
    pub is_user_card_open: bool,
}

impl SimulationState {
    /// 위젯 마운트 직후의 초기 상태를 생성한다.
    pub fn new() -> Self {
        Self {
            step: 1,
            instruction: "시뮬레이션을 불러오는 중...".into(),
            is_composer_open: false,
            title: String::new(),
            body: String::new(),
            is_submitted: false,
            cursor_pos: Coordinate::new(50.0, 50.0),
            is_clicking: false,
            active_tool: None,
            selection_range: None,
            watch_status: WatchStatus::default(),
            is_watch_menu_open: false,
            is_user_card_open: false,
        }
    }

    /// 회차 시작 시점의 필드들을 기본값으로 되돌린다. 커서 위치는 유지한다.
    pub fn reset_for_pass(&mut self) {
        self.is_composer_open = false;
        self.title.clear();
        self.body.clear();
        self.is_submitted = false;
        self.active_tool = None;
        self.selection_range = None;
        self.watch_status = WatchStatus::default();
        self.is_watch_menu_open = false;
        self.is_user_card_open = false;
    }
}

impl Default for SimulationState {
    /// SimulationState의 기본값을 정의한다.
    fn default() -> Self {
        Self::new()
    }
}

/// SimulationState를 드라이버와 UI가 공유하기 위한 타입 별칭이다.
///
/// 드라이버는 일시 중단 지점 사이에서만 잠그고, await를 잡은 채로
/// 잠금을 유지하지 않는다.
pub type SharedSimState = Arc<Mutex<SimulationState>>;

/// 공유 시뮬레이션 상태를 초기값으로 생성한다.
pub fn new_shared_state() -> SharedSimState {
    Arc::new(Mutex::new(SimulationState::new()))
}

/// 잠금 오염 여부와 무관하게 현재 스냅샷을 복제한다.
pub fn snapshot(state: &SharedSimState) -> SimulationState {
    state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}
