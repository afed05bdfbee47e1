use crate::{codec, presets, rules, Coord, Grid, History, NullRenderer, Renderer};
use anyhow::{anyhow, Result};

/// The lifecycle phase of an [`Engine`].
///
/// Owned exclusively by the engine; the only way to change it is through the
/// engine's operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Freshly constructed or reset; the grid is editable.
    Inited,
    /// Autoplay is running; mutation other than ticking is rejected.
    Started,
    /// Halted, either explicitly or by a terminal condition. `start` resumes
    /// from the current grid.
    Stopped,
}

/// Why a started engine stopped on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The next generation equals the current one (empty diff).
    Stable,
    /// The new generation already occurred `period` generations ago.
    Cycle { period: usize },
}

/// Result of advancing the simulation by one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The grid changed and no earlier generation was revisited.
    Advanced,
    /// The diff was empty; the grid was left untouched.
    Stable,
    /// The grid changed but re-entered a state recorded `period` steps ago.
    Cycle { period: usize },
}

/// The simulation engine: grid, history ledger and lifecycle state machine.
///
/// The engine owns its [`Grid`] and [`History`] exclusively; external layers
/// mutate them only through the operations here, so the renderer's diff-based
/// repaint can never fall out of sync with engine state. The renderer and the
/// state observer are injected collaborators, which keeps the engine testable
/// without any UI harness.
///
/// # Example
///
/// ```rust
/// use gol_sim::{Engine, LifecycleState, StepOutcome};
///
/// let mut engine = Engine::headless(5, 5);
/// // A vertical blinker.
/// engine.toggle_cell(1, 2);
/// engine.toggle_cell(2, 2);
/// engine.toggle_cell(3, 2);
/// engine.start();
/// engine.tick();
/// assert_eq!(engine.tick(), Some(StepOutcome::Cycle { period: 2 }));
/// assert_eq!(engine.state(), LifecycleState::Stopped);
/// ```
pub struct Engine {
    grid: Grid,
    history: History,
    renderer: Box<dyn Renderer>,
    observer: Option<Box<dyn FnMut(LifecycleState)>>,
    state: LifecycleState,
    stop_reason: Option<StopReason>,
}

impl Engine {
    /// Creates an engine with an all-dead grid of the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize, renderer: Box<dyn Renderer>) -> Self {
        Self {
            grid: Grid::new(width, height),
            history: History::new(),
            renderer,
            observer: None,
            state: LifecycleState::Inited,
            stop_reason: None,
        }
    }

    /// Creates an engine with a [`NullRenderer`], for headless use.
    pub fn headless(width: usize, height: usize) -> Self {
        Self::new(width, height, Box::new(NullRenderer))
    }

    /// Attaches the state observer and immediately notifies it of the current
    /// state so the consumer starts in sync.
    ///
    /// The observer is called synchronously on every transition. It returns
    /// nothing, so a consumer failure has no way back into the engine's
    /// control flow.
    pub fn set_observer(&mut self, observer: impl FnMut(LifecycleState) + 'static) {
        let mut observer = Box::new(observer);
        observer(self.state);
        self.observer = Some(observer);
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Why the engine auto-stopped, if it did. Cleared by `start` and `reset`.
    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    fn set_state(&mut self, state: LifecycleState) {
        self.state = state;
        if let Some(observer) = self.observer.as_mut() {
            observer(state);
        }
    }

    /// Begins (or resumes) autoplay from the current grid.
    ///
    /// Records the current generation as the history baseline. No-op if
    /// already started. The periodic ticking itself is driven externally,
    /// see [`crate::run_until_stopped`].
    pub fn start(&mut self) {
        if self.state == LifecycleState::Started {
            return;
        }
        self.stop_reason = None;
        self.history.record(codec::encode(&self.grid));
        self.set_state(LifecycleState::Started);
    }

    /// Halts autoplay. No-op unless started.
    pub fn stop(&mut self) {
        if self.state != LifecycleState::Started {
            return;
        }
        self.set_state(LifecycleState::Stopped);
    }

    /// Reinitializes the grid to all-dead and clears history.
    ///
    /// Rejected (silent no-op) while started, to guard against resetting
    /// mid-tick.
    pub fn reset(&mut self) {
        if self.state == LifecycleState::Started {
            return;
        }
        self.grid.clear();
        self.history.clear();
        self.renderer.reset();
        self.stop_reason = None;
        self.set_state(LifecycleState::Inited);
    }

    /// Flips one cell and repaints it.
    ///
    /// Rejected (silent no-op) while started, so manual edits cannot race the
    /// tick loop.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of range.
    pub fn toggle_cell(&mut self, row: usize, col: usize) {
        if self.state == LifecycleState::Started {
            return;
        }
        if self.grid.toggle(row, col) {
            self.renderer.revive_cell(row, col);
        } else {
            self.renderer.kill_cell(row, col);
        }
    }

    /// Advances the simulation by one generation, permitted in every
    /// lifecycle state.
    ///
    /// Stability (empty diff) is checked before anything is recorded, so a
    /// stable grid never pollutes the ledger. Otherwise the diff is applied
    /// and repainted, the new code is probed against history for a cycle and
    /// then recorded. A reported cycle or stability does not change the
    /// lifecycle state here; [`Engine::tick`] is what turns terminal
    /// outcomes into an automatic stop.
    pub fn step_forward(&mut self) -> StepOutcome {
        if self.history.is_empty() {
            self.history.record(codec::encode(&self.grid));
        }
        let diff = rules::next_diff(&self.grid);
        if diff.is_empty() {
            return StepOutcome::Stable;
        }
        self.apply_and_paint(&diff);
        let code = codec::encode(&self.grid);
        let cycle = self.history.index_of(&code).map(|i| self.history.len() - i);
        self.history.record(code);
        match cycle {
            Some(period) => StepOutcome::Cycle { period },
            None => StepOutcome::Advanced,
        }
    }

    /// Steps one generation backward by rewinding history and restoring the
    /// grid to the previous recorded code, repainting only changed cells.
    ///
    /// Permitted in every lifecycle state; silent no-op with fewer than two
    /// recorded generations.
    pub fn step_back(&mut self) {
        let Some(code) = self.history.rewind().map(str::to_owned) else {
            return;
        };
        let target = codec::decode(&code, self.grid.width())
            .expect("History holds only codes produced by encode");
        let diff = rules::grid_diff(&self.grid, &target);
        self.apply_and_paint(&diff);
    }

    /// One autoplay step, as invoked by the periodic scheduler.
    ///
    /// Re-checks that the engine is still started and otherwise does nothing,
    /// so a tick that was already pending when `stop` ran is a no-op rather
    /// than a stale mutation. A terminal outcome (stability or cycle)
    /// transitions the engine to `Stopped` and retains the reason.
    pub fn tick(&mut self) -> Option<StepOutcome> {
        if self.state != LifecycleState::Started {
            return None;
        }
        let outcome = self.step_forward();
        match outcome {
            StepOutcome::Stable => {
                self.stop_reason = Some(StopReason::Stable);
                self.set_state(LifecycleState::Stopped);
            }
            StepOutcome::Cycle { period } => {
                self.stop_reason = Some(StopReason::Cycle { period });
                self.set_state(LifecycleState::Stopped);
            }
            StepOutcome::Advanced => {}
        }
        Some(outcome)
    }

    /// Resets the engine and loads a named preset pattern, anchored at the
    /// origin, through the same diff-apply path as ordinary transitions.
    ///
    /// An unknown preset name is an error even while started. A known preset
    /// rides on the reset guard: while started this is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the pattern does not fit
    /// the grid.
    pub fn load_preset(&mut self, name: &str) -> Result<()> {
        let cells = presets::cells(name)?;
        if let Some(&(row, col)) = cells
            .iter()
            .find(|&&(row, col)| row >= self.grid.height() || col >= self.grid.width())
        {
            return Err(anyhow!(
                "Preset '{}' does not fit: cell ({}, {}) is outside a {}x{} grid",
                name,
                row,
                col,
                self.grid.height(),
                self.grid.width()
            ));
        }
        if self.state == LifecycleState::Started {
            return Ok(());
        }
        self.reset();
        self.apply_and_paint(&cells);
        Ok(())
    }

    fn apply_and_paint(&mut self, diff: &[Coord]) {
        rules::apply_diff(&mut self.grid, diff);
        for &(row, col) in diff {
            if self.grid.get(row, col) {
                self.renderer.revive_cell(row, col);
            } else {
                self.renderer.kill_cell(row, col);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every paint call, standing in for a real front end.
    #[derive(Default)]
    struct EventLog(Rc<RefCell<Vec<String>>>);

    impl Renderer for EventLog {
        fn revive_cell(&mut self, row: usize, col: usize) {
            self.0.borrow_mut().push(format!("revive {} {}", row, col));
        }

        fn kill_cell(&mut self, row: usize, col: usize) {
            self.0.borrow_mut().push(format!("kill {} {}", row, col));
        }

        fn reset(&mut self) {
            self.0.borrow_mut().push("reset".to_string());
        }
    }

    fn engine_with_log(width: usize, height: usize) -> (Engine, Rc<RefCell<Vec<String>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let engine = Engine::new(width, height, Box::new(EventLog(events.clone())));
        (engine, events)
    }

    #[test]
    fn test_initial_state() {
        let engine = Engine::headless(10, 10);
        assert_eq!(engine.state(), LifecycleState::Inited);
        assert!(engine.grid().is_blank());
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_observer_sees_transitions() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut engine = Engine::headless(5, 5);
        engine.set_observer(move |state| sink.borrow_mut().push(state));
        engine.start();
        engine.stop();
        engine.reset();
        assert_eq!(
            *seen.borrow(),
            vec![
                LifecycleState::Inited,
                LifecycleState::Started,
                LifecycleState::Stopped,
                LifecycleState::Inited,
            ]
        );
    }

    #[test]
    fn test_toggle_paints_and_flips() {
        let (mut engine, events) = engine_with_log(5, 5);
        engine.toggle_cell(1, 1);
        assert!(engine.grid().get(1, 1));
        engine.toggle_cell(1, 1);
        assert!(!engine.grid().get(1, 1));
        assert_eq!(*events.borrow(), vec!["revive 1 1", "kill 1 1"]);
    }

    #[test]
    fn test_toggle_rejected_while_started() {
        let mut engine = Engine::headless(5, 5);
        engine.toggle_cell(1, 1);
        engine.start();
        engine.toggle_cell(2, 2);
        assert!(!engine.grid().get(2, 2));
        engine.stop();
        engine.toggle_cell(2, 2);
        assert!(engine.grid().get(2, 2));
    }

    #[test]
    fn test_reset_rejected_while_started() {
        let mut engine = Engine::headless(5, 5);
        engine.toggle_cell(1, 1);
        engine.start();
        engine.reset();
        assert_eq!(engine.state(), LifecycleState::Started);
        assert!(engine.grid().get(1, 1));
        engine.stop();
        engine.reset();
        assert_eq!(engine.state(), LifecycleState::Inited);
        assert!(engine.grid().is_blank());
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn test_stable_block_stops_with_reason() {
        let mut engine = Engine::headless(6, 6);
        for (row, col) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            engine.toggle_cell(row, col);
        }
        engine.start();
        assert_eq!(engine.tick(), Some(StepOutcome::Stable));
        assert_eq!(engine.state(), LifecycleState::Stopped);
        assert_eq!(engine.stop_reason(), Some(StopReason::Stable));
        // the stable generation was never re-recorded
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_blinker_cycle_stops_with_period() {
        let mut engine = Engine::headless(5, 5);
        for (row, col) in [(1, 2), (2, 2), (3, 2)] {
            engine.toggle_cell(row, col);
        }
        engine.start();
        assert_eq!(engine.tick(), Some(StepOutcome::Advanced));
        assert_eq!(engine.tick(), Some(StepOutcome::Cycle { period: 2 }));
        assert_eq!(engine.state(), LifecycleState::Stopped);
        assert_eq!(engine.stop_reason(), Some(StopReason::Cycle { period: 2 }));
    }

    #[test]
    fn test_tick_pending_after_stop_is_noop() {
        let mut engine = Engine::headless(5, 5);
        for (row, col) in [(1, 2), (2, 2), (3, 2)] {
            engine.toggle_cell(row, col);
        }
        engine.start();
        engine.stop();
        let before = engine.grid().clone();
        assert_eq!(engine.tick(), None);
        assert_eq!(*engine.grid(), before);
    }

    #[test]
    fn test_step_forward_matches_full_evaluation() {
        let mut engine = Engine::headless(5, 5);
        for (row, col) in [(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)] {
            engine.toggle_cell(row, col);
        }
        let expected = rules::next_generation(engine.grid());
        engine.step_forward();
        assert_eq!(*engine.grid(), expected);
    }

    #[test]
    fn test_rewind_inverse() {
        let mut engine = Engine::headless(8, 8);
        // a glider: every generation is distinct until it laps the torus
        for (row, col) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            engine.toggle_cell(row, col);
        }
        let start = engine.grid().clone();
        let steps = 6;
        for _ in 0..steps {
            assert_eq!(engine.step_forward(), StepOutcome::Advanced);
        }
        assert_ne!(*engine.grid(), start);
        for _ in 0..steps {
            engine.step_back();
        }
        assert_eq!(*engine.grid(), start);
        assert_eq!(engine.history_len(), 1);
        // further rewinds are no-ops
        engine.step_back();
        assert_eq!(*engine.grid(), start);
        assert_eq!(engine.history_len(), 1);
    }

    #[test]
    fn test_resume_after_stop_continues() {
        let mut engine = Engine::headless(8, 8);
        for (row, col) in [(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)] {
            engine.toggle_cell(row, col);
        }
        engine.start();
        engine.tick();
        engine.stop();
        let paused_at = engine.grid().clone();
        engine.start();
        assert_eq!(engine.state(), LifecycleState::Started);
        assert_eq!(*engine.grid(), paused_at);
        engine.tick();
        assert_ne!(*engine.grid(), paused_at);
    }

    #[test]
    fn test_load_preset_unknown_name_fails() {
        let mut engine = Engine::headless(10, 10);
        assert!(engine.load_preset("no-such-pattern").is_err());
    }

    #[test]
    fn test_load_preset_replaces_grid() {
        let (mut engine, events) = engine_with_log(10, 10);
        engine.toggle_cell(9, 9);
        engine.load_preset("glider").unwrap();
        assert_eq!(engine.grid().population(), 5);
        assert!(!engine.grid().get(9, 9));
        assert!(events.borrow().iter().any(|e| e == "reset"));
    }

    #[test]
    fn test_load_preset_too_large_fails() {
        let mut engine = Engine::headless(4, 4);
        let err = engine.load_preset("gosper-glider-gun").unwrap_err();
        assert!(err.to_string().contains("does not fit"));
    }

    #[test]
    fn test_load_preset_while_started_is_noop() {
        let mut engine = Engine::headless(10, 10);
        engine.toggle_cell(0, 0);
        engine.start();
        assert!(engine.load_preset("glider").is_ok());
        assert!(engine.load_preset("no-such-pattern").is_err());
        assert_eq!(engine.grid().population(), 1);
        assert_eq!(engine.state(), LifecycleState::Started);
    }
}
