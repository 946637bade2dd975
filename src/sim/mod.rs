mod driver;
mod state;
mod target;

pub use driver::{PRESS_HOLD_MS, run_pass, run_scenario};
pub use state::{
    ComposerTool, Coordinate, SelectionRange, SharedSimState, SimulationState, WatchStatus,
    new_shared_state, snapshot,
};
pub use target::{SharedResolver, TargetId, TargetRegistry, TargetResolver, element_center};
