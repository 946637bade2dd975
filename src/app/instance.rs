use crate::scenario::Scenario;
use crate::sim::{
    SharedResolver, SharedSimState, SimulationState, TargetRegistry, new_shared_state,
    run_scenario, snapshot,
};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

/// 화면에 마운트된 시뮬레이터 위젯 한 개를 표현한다.
///
/// 상태 레코드, 타겟 레지스트리, 드라이버 태스크를 소유하며 이들은
/// 다른 인스턴스와 절대 공유되지 않는다. 드롭 시 취소 토큰으로
/// 드라이버를 멈춰 해체 후 상태 변이를 차단한다.
pub struct SimulatorInstance {
    /// 드라이버가 변경하고 UI가 읽는 공유 상태.
    state: SharedSimState,
    /// UI가 매 프레임 기록하는 타겟 좌표 레지스트리.
    targets: Arc<TargetRegistry>,
    /// 드라이버 해체용 취소 토큰.
    cancel: CancellationToken,
    /// 안내 버블에 표시할 전체 단계 수.
    step_total: u32,
}

impl SimulatorInstance {
    /// 시나리오 드라이버를 런타임에 띄우고 인스턴스를 생성한다.
    pub fn spawn(runtime: &Runtime, scenario: Scenario) -> Self {
        let state = new_shared_state();
        let targets = TargetRegistry::new_shared();
        let cancel = CancellationToken::new();
        let step_total = scenario.step_count();
        let resolver: SharedResolver = targets.clone();
        runtime.spawn(run_scenario(
            scenario,
            state.clone(),
            resolver,
            cancel.clone(),
        ));
        Self {
            state,
            targets,
            cancel,
            step_total,
        }
    }

    /// 현재 프레임을 그릴 상태 스냅샷을 복제한다.
    pub fn snapshot(&self) -> SimulationState {
        snapshot(&self.state)
    }

    /// 타겟 좌표 레지스트리를 반환한다.
    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// 안내 버블에 표시할 전체 단계 수를 반환한다.
    pub fn step_total(&self) -> u32 {
        self.step_total
    }
}

impl Drop for SimulatorInstance {
    /// 위젯 해체 시 드라이버를 취소한다.
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
