use super::state::{SharedSimState, SimulationState, WatchStatus};
use super::target::SharedResolver;
use crate::scenario::{Action, PressEffect, Scenario, TypeField};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// 누름 연출이 유지되는 고정 시간(밀리초)이다.
pub const PRESS_HOLD_MS: u64 = 300;

/// 시나리오 하나를 무한 반복 실행한다.
///
/// 소유 위젯이 내려갈 때 취소 토큰으로만 종료되며, 취소 이후에는
/// 어떤 상태 변경도 일어나지 않는다.
pub async fn run_scenario(
    scenario: Scenario,
    state: SharedSimState,
    resolver: SharedResolver,
    cancel: CancellationToken,
) {
    debug!(name = %scenario.name, "시나리오 드라이버 시작");
    loop {
        if cancel.is_cancelled() {
            break;
        }
        run_pass(&scenario, &state, &resolver, &cancel).await;
    }
    debug!(name = %scenario.name, "시나리오 드라이버 종료");
}

/// 액션 목록을 처음부터 끝까지 한 회차 실행한다.
///
/// 액션은 엄격히 순차 실행되며, 이전 액션의 대기가 끝나기 전에는
/// 다음 액션이 시작되지 않는다. 취소되면 즉시 반환한다.
pub async fn run_pass(
    scenario: &Scenario,
    state: &SharedSimState,
    resolver: &SharedResolver,
    cancel: &CancellationToken,
) {
    let pacing = scenario.pacing;
    for action in &scenario.actions {
        match action {
            Action::Announce {
                step,
                instruction,
                reset,
                hold_ms,
            } => {
                let applied = mutate(state, cancel, |sim| {
                    if let Some(step) = step {
                        sim.step = *step;
                    }
                    sim.instruction = instruction.clone();
                    if *reset {
                        sim.reset_for_pass();
                    }
                });
                if !applied || !suspend(cancel, Duration::from_millis(*hold_ms)).await {
                    return;
                }
            }
            Action::Move { target } => {
                // 아직 그려지지 않은 타겟은 조용히 건너뛴다.
                let Some(center) = resolver.resolve(*target) else {
                    debug!(?target, "타겟이 화면에 없어 이동을 건너뜁니다");
                    continue;
                };
                if !mutate(state, cancel, |sim| sim.cursor_pos = center) {
                    return;
                }
                if !suspend(cancel, Duration::from_millis(pacing.move_ms)).await {
                    return;
                }
            }
            Action::Press { target, effect } => {
                if resolver.resolve(*target).is_none() {
                    debug!(?target, "타겟이 화면에 없어 누름을 건너뜁니다");
                    continue;
                }
                if !mutate(state, cancel, |sim| sim.is_clicking = true) {
                    return;
                }
                if !suspend(cancel, Duration::from_millis(PRESS_HOLD_MS)).await {
                    return;
                }
                let applied = mutate(state, cancel, |sim| {
                    sim.is_clicking = false;
                    if let Some(effect) = effect {
                        apply_effect(sim, effect);
                    }
                });
                if !applied {
                    return;
                }
            }
            Action::Type { field, text } => {
                for ch in text.chars() {
                    if !mutate(state, cancel, |sim| field_mut(sim, *field).push(ch)) {
                        return;
                    }
                    if !suspend(cancel, Duration::from_millis(pacing.keystroke_ms)).await {
                        return;
                    }
                }
            }
            Action::Paste { field, text } => {
                if !mutate(state, cancel, |sim| field_mut(sim, *field).push_str(text)) {
                    return;
                }
            }
            Action::Tool { tool } => {
                if !mutate(state, cancel, |sim| sim.active_tool = *tool) {
                    return;
                }
            }
            Action::Pause { ms } => {
                let duration = Duration::from_millis(ms.unwrap_or(pacing.reading_ms));
                if !suspend(cancel, duration).await {
                    return;
                }
            }
        }
    }
}

/// 누름 부수 효과를 상태에 반영한다.
fn apply_effect(sim: &mut SimulationState, effect: &PressEffect) {
    match effect {
        PressEffect::OpenComposer => sim.is_composer_open = true,
        PressEffect::Submit => {
            sim.is_submitted = true;
            sim.is_composer_open = false;
        }
        PressEffect::ActivateTool { tool } => sim.active_tool = Some(*tool),
        PressEffect::OpenWatchMenu => sim.is_watch_menu_open = true,
        PressEffect::SelectWatching => {
            sim.watch_status = WatchStatus::Watching;
            sim.is_watch_menu_open = false;
        }
        PressEffect::OpenUserCard => sim.is_user_card_open = true,
    }
}

/// 입력 대상 필드의 가변 참조를 반환한다.
fn field_mut(sim: &mut SimulationState, field: TypeField) -> &mut String {
    match field {
        TypeField::Title => &mut sim.title,
        TypeField::Body => &mut sim.body,
    }
}

/// 취소되지 않았을 때만 상태를 변경한다. 변경 여부를 반환한다.
///
/// 해체 이후의 상태 변이를 막는 생존 가드이며, 잠금은 클로저 실행
/// 동안만 유지된다.
fn mutate(
    state: &SharedSimState,
    cancel: &CancellationToken,
    f: impl FnOnce(&mut SimulationState),
) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    let mut guard = state
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard);
    true
}

/// 지정 시간 동안 대기한다. 취소로 깨어나면 false를 반환한다.
async fn suspend(cancel: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = sleep(duration) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{Pacing, ScenarioKind};
    use crate::sim::state::{Coordinate, new_shared_state, snapshot};
    use crate::sim::target::{TargetId, TargetResolver};
    use std::sync::Arc;
    use tokio::time::advance;

    /// 모든 타겟을 고정 좌표로 해석하는 목업 리졸버이다.
    struct FixedResolver;

    impl TargetResolver for FixedResolver {
        /// 어떤 타겟이든 (120, 80)으로 해석한다.
        fn resolve(&self, _target: TargetId) -> Option<Coordinate> {
            Some(Coordinate::new(120.0, 80.0))
        }
    }

    /// 아무 타겟도 해석하지 못하는 목업 리졸버이다.
    struct EmptyResolver;

    impl TargetResolver for EmptyResolver {
        fn resolve(&self, _target: TargetId) -> Option<Coordinate> {
            None
        }
    }

    fn fixed_resolver() -> SharedResolver {
        Arc::new(FixedResolver)
    }

    fn empty_resolver() -> SharedResolver {
        Arc::new(EmptyResolver)
    }

    /// 드라이버 태스크가 스케줄링될 기회를 충분히 준다.
    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    /// 빠른 속도의 타이핑 전용 테스트 시나리오를 만든다.
    fn typing_scenario(text: &str, keystroke_ms: u64) -> Scenario {
        Scenario {
            name: "테스트".into(),
            pacing: Pacing {
                keystroke_ms,
                move_ms: 10,
                reading_ms: 10,
            },
            actions: vec![
                Action::Announce {
                    step: Some(1),
                    instruction: "타이핑 테스트".into(),
                    reset: true,
                    hold_ms: 0,
                },
                Action::Type {
                    field: TypeField::Body,
                    text: text.into(),
                },
            ],
        }
    }

    /// 새 글 시나리오 한 회차가 제출까지 도달하는지 검증한다.
    #[tokio::test(start_paused = true)]
    async fn create_pass_reaches_submission() {
        let state = new_shared_state();
        let cancel = CancellationToken::new();
        let scenario = ScenarioKind::Create.script();

        run_pass(&scenario, &state, &fixed_resolver(), &cancel).await;

        let snap = snapshot(&state);
        assert_eq!(snap.step, 4);
        assert!(snap.is_submitted);
        assert!(!snap.is_composer_open);
        assert!(!snap.is_clicking);
        assert!(snap.active_tool.is_none());
        assert_eq!(snap.title, "이번 주에 나온 새 책 추천");
        assert!(snap.body.contains("**『마음의 빛』**"));
        assert!(snap.body.ends_with("정말 따뜻한 이야기입니다."));
    }

    /// 타이핑이 키 간격마다 정확히 한 글자씩 누적되는지 검증한다.
    #[tokio::test(start_paused = true)]
    async fn typing_appends_one_char_per_tick() {
        let state = new_shared_state();
        let cancel = CancellationToken::new();
        let scenario = typing_scenario("가나다", 100);

        let task = tokio::spawn(run_pass_owned(
            scenario,
            state.clone(),
            fixed_resolver(),
            cancel.clone(),
        ));
        settle().await;
        assert_eq!(snapshot(&state).body, "가");

        advance(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(snapshot(&state).body, "가나");

        advance(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(snapshot(&state).body, "가나다");

        advance(Duration::from_millis(100)).await;
        let _ = task.await;
    }

    /// 누름 연출이 고정 시간 동안만 유지되는지 검증한다.
    #[tokio::test(start_paused = true)]
    async fn press_flag_lasts_exactly_press_hold() {
        let state = new_shared_state();
        let cancel = CancellationToken::new();
        let scenario = Scenario {
            name: "누름 테스트".into(),
            pacing: Pacing::default(),
            actions: vec![
                Action::Announce {
                    step: Some(1),
                    instruction: "누름".into(),
                    reset: true,
                    hold_ms: 0,
                },
                Action::Press {
                    target: TargetId::ReplyButton,
                    effect: Some(PressEffect::OpenComposer),
                },
            ],
        };

        let task = tokio::spawn(run_pass_owned(
            scenario,
            state.clone(),
            fixed_resolver(),
            cancel.clone(),
        ));
        settle().await;
        assert!(snapshot(&state).is_clicking);

        advance(Duration::from_millis(PRESS_HOLD_MS)).await;
        settle().await;
        let snap = snapshot(&state);
        assert!(!snap.is_clicking);
        assert!(snap.is_composer_open);

        let _ = task.await;
    }

    /// 타겟이 없으면 이동/누름만 건너뛰고 타이핑은 계속되는지 검증한다.
    #[tokio::test(start_paused = true)]
    async fn missing_target_skips_move_and_press_only() {
        let state = new_shared_state();
        let cancel = CancellationToken::new();
        let scenario = ScenarioKind::Create.script();
        let initial_cursor = snapshot(&state).cursor_pos;

        run_pass(&scenario, &state, &empty_resolver(), &cancel).await;

        let snap = snapshot(&state);
        // 이동이 전부 건너뛰어져 커서는 초기 위치 그대로다.
        assert_eq!(snap.cursor_pos, initial_cursor);
        assert!(!snap.is_clicking);
        // 등록 누름도 건너뛰었으므로 제출 플래그는 꺼져 있다.
        assert!(!snap.is_submitted);
        assert!(!snap.is_composer_open);
        // 안내와 타이핑은 계속 진행된다.
        assert_eq!(snap.step, 4);
        assert_eq!(snap.title, "이번 주에 나온 새 책 추천");
        assert!(snap.body.contains("**『마음의 빛』**"));
    }

    /// 해체(취소) 이후에는 어떤 상태 변이도 없는지 검증한다.
    #[tokio::test(start_paused = true)]
    async fn no_mutation_after_cancellation() {
        let state = new_shared_state();
        let cancel = CancellationToken::new();
        let scenario = typing_scenario("가나다라마바사", 100);

        let task = tokio::spawn(run_scenario(
            scenario,
            state.clone(),
            fixed_resolver(),
            cancel.clone(),
        ));
        settle().await;
        advance(Duration::from_millis(250)).await;
        settle().await;

        cancel.cancel();
        settle().await;
        let frozen = snapshot(&state);

        advance(Duration::from_secs(30)).await;
        settle().await;
        assert_eq!(snapshot(&state), frozen);
        assert!(task.is_finished());
        let _ = task.await;
    }

    /// 무한 반복 중에도 단계 번호가 유효 범위를 벗어나지 않는지 검증한다.
    #[tokio::test(start_paused = true)]
    async fn step_stays_in_range_across_passes() {
        let state = new_shared_state();
        let cancel = CancellationToken::new();
        let scenario = Scenario {
            name: "반복 테스트".into(),
            pacing: Pacing {
                keystroke_ms: 10,
                move_ms: 10,
                reading_ms: 10,
            },
            actions: vec![
                Action::Announce {
                    step: Some(1),
                    instruction: "첫 단계".into(),
                    reset: true,
                    hold_ms: 10,
                },
                Action::Type {
                    field: TypeField::Body,
                    text: "ab".into(),
                },
                Action::Announce {
                    step: Some(2),
                    instruction: "둘째 단계".into(),
                    reset: false,
                    hold_ms: 0,
                },
                Action::Pause { ms: Some(10) },
            ],
        };
        let max_step = scenario.step_count();

        let task = tokio::spawn(run_scenario(
            scenario,
            state.clone(),
            fixed_resolver(),
            cancel.clone(),
        ));

        let mut saw_full_body = false;
        let mut saw_reset_after_full = false;
        for _ in 0..40 {
            advance(Duration::from_millis(5)).await;
            settle().await;
            let snap = snapshot(&state);
            assert!(snap.step >= 1 && snap.step <= max_step);
            assert!(snap.body.len() <= "ab".len());
            if snap.body == "ab" {
                saw_full_body = true;
            } else if saw_full_body && snap.body.is_empty() {
                saw_reset_after_full = true;
            }
        }
        assert!(saw_full_body, "본문이 끝까지 입력된 프레임을 보지 못했습니다");
        assert!(saw_reset_after_full, "회차 재시작 시 본문 초기화를 보지 못했습니다");

        cancel.cancel();
        settle().await;
        let _ = task.await;
    }

    /// 동시에 띄운 두 인스턴스가 서로의 상태를 건드리지 않는지 검증한다.
    #[tokio::test(start_paused = true)]
    async fn concurrent_instances_stay_independent() {
        let create_state = new_shared_state();
        let follow_state = new_shared_state();
        let cancel = CancellationToken::new();

        let create_script = ScenarioKind::Create.script();
        let follow_script = ScenarioKind::Follow.script();
        let create_resolver = fixed_resolver();
        let follow_resolver = fixed_resolver();
        tokio::join!(
            run_pass(&create_script, &create_state, &create_resolver, &cancel),
            run_pass(&follow_script, &follow_state, &follow_resolver, &cancel),
        );

        let create_snap = snapshot(&create_state);
        let follow_snap = snapshot(&follow_state);
        assert!(create_snap.is_submitted);
        assert_eq!(create_snap.watch_status, WatchStatus::NotWatching);
        assert_eq!(follow_snap.watch_status, WatchStatus::Watching);
        assert!(follow_snap.title.is_empty());
        assert!(follow_snap.body.is_empty());
        assert_ne!(create_snap.instruction, follow_snap.instruction);
    }

    /// spawn에 넘기기 위해 소유값을 받는 run_pass 래퍼이다.
    async fn run_pass_owned(
        scenario: Scenario,
        state: SharedSimState,
        resolver: SharedResolver,
        cancel: CancellationToken,
    ) {
        run_pass(&scenario, &state, &resolver, &cancel).await;
    }
}
