use super::state::Coordinate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 프레젠테이션 계층의 목업 요소를 가리키는 불투명 핸들이다.
///
/// 드라이버는 이 핸들로 중심 좌표 조회와 누름 연출만 수행하며,
/// 요소의 내용은 절대 들여다보지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetId {
    /// 새 글 쓰기 버튼.
    NewTopicButton,
    /// 답글 버튼.
    ReplyButton,
    /// 알림 설정(종) 버튼.
    WatchButton,
    /// 알림 설정 메뉴의 '알림 받기' 항목.
    WatchMenuOption,
    /// 게시글 작성자의 프로필 사진.
    AuthorAvatar,
    /// 사용자 카드의 '메시지 보내기' 버튼.
    MessageButton,
    /// 작성기 제목 입력란.
    TitleInput,
    /// 작성기 본문 편집 영역.
    BodyEditor,
    /// 작성기 굵게 쓰기 버튼.
    BoldButton,
    /// 작성기 등록 버튼.
    SubmitButton,
}

/// 타겟 핸들을 현재 화면상 중심 좌표로 해석한다.
///
/// 아직 그려지지 않은 요소는 `None`을 반환하며, 드라이버는 이를
/// 조용한 건너뛰기로 처리한다.
pub trait TargetResolver: Send + Sync {
    /// 타겟의 컨테이너 기준 중심 좌표를 반환한다.
    fn resolve(&self, target: TargetId) -> Option<Coordinate>;
}

/// TargetResolver를 드라이버 태스크와 공유하기 위한 타입 별칭이다.
pub type SharedResolver = Arc<dyn TargetResolver>;

/// UI가 매 프레임 기록하는 타겟별 중심 좌표 맵이다.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    /// 타겟별 최신 중심 좌표.
    centers: Mutex<HashMap<TargetId, Coordinate>>,
}

impl TargetRegistry {
    /// 비어 있는 레지스트리를 공유 가능한 형태로 생성한다.
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 타겟의 중심 좌표를 기록한다. 매 프레임 덮어쓴다.
    pub fn record(&self, target: TargetId, center: Coordinate) {
        let mut centers = self
            .centers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        centers.insert(target, center);
    }

    /// 이번 프레임에 그려지지 않은 타겟을 제거한다.
    pub fn forget(&self, target: TargetId) {
        let mut centers = self
            .centers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        centers.remove(&target);
    }
}

impl TargetResolver for TargetRegistry {
    /// 기록된 좌표가 있으면 반환하고 없으면 `None`을 반환한다.
    fn resolve(&self, target: TargetId) -> Option<Coordinate> {
        let centers = self
            .centers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        centers.get(&target).copied()
    }
}

/// 컨테이너 좌상단 기준으로 요소 사각형의 중심 좌표를 계산한다.
///
/// # 매개변수
/// - `container_min`: 컨테이너 좌상단의 화면 좌표 (x, y).
/// - `rect_min`: 요소 좌상단의 화면 좌표 (x, y).
/// - `rect_size`: 요소의 (너비, 높이).
pub fn element_center(
    container_min: (f32, f32),
    rect_min: (f32, f32),
    rect_size: (f32, f32),
) -> Coordinate {
    Coordinate::new(
        (rect_min.0 - container_min.0) + rect_size.0 / 2.0,
        (rect_min.1 - container_min.1) + rect_size.1 / 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 컨테이너 기준 중심 좌표 계산을 검증한다.
    #[test]
    fn element_center_is_relative_to_container() {
        let center = element_center((100.0, 50.0), (140.0, 70.0), (20.0, 10.0));
        assert_eq!(center, Coordinate::new(50.0, 25.0));
    }

    /// 기록되지 않은 타겟은 None으로 해석되는지 확인한다.
    #[test]
    fn registry_resolves_only_recorded_targets() {
        let registry = TargetRegistry::new_shared();
        assert_eq!(registry.resolve(TargetId::ReplyButton), None);

        registry.record(TargetId::ReplyButton, Coordinate::new(12.0, 34.0));
        assert_eq!(
            registry.resolve(TargetId::ReplyButton),
            Some(Coordinate::new(12.0, 34.0))
        );

        registry.forget(TargetId::ReplyButton);
        assert_eq!(registry.resolve(TargetId::ReplyButton), None);
    }
}
