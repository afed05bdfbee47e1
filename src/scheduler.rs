use crate::{Engine, LifecycleState, StopReason};
use std::time::Duration;

/// Drives a started engine with a periodic tick until it leaves `Started`.
///
/// One generation is computed per interval. The loop re-reads the lifecycle
/// state before every tick, and [`Engine::tick`] re-checks it again, so
/// stopping the engine (explicitly or through a terminal condition) cancels
/// all future ticks without any stale mutation. Returns the engine's stop
/// reason, `None` if it was stopped explicitly or was never started.
pub async fn run_until_stopped(engine: &mut Engine, interval: Duration) -> Option<StopReason> {
    let mut ticker = tokio::time::interval(interval);
    while engine.state() == LifecycleState::Started {
        ticker.tick().await;
        engine.tick();
    }
    engine.stop_reason()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_runs_blinker_to_cycle() {
        let mut engine = Engine::headless(5, 5);
        for (row, col) in [(1, 2), (2, 2), (3, 2)] {
            engine.toggle_cell(row, col);
        }
        engine.start();
        let reason = run_until_stopped(&mut engine, Duration::from_millis(50)).await;
        assert_eq!(reason, Some(StopReason::Cycle { period: 2 }));
        assert_eq!(engine.state(), LifecycleState::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_block_to_stability() {
        let mut engine = Engine::headless(6, 6);
        for (row, col) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            engine.toggle_cell(row, col);
        }
        engine.start();
        let reason = run_until_stopped(&mut engine, Duration::from_millis(50)).await;
        assert_eq!(reason, Some(StopReason::Stable));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_started_returns_immediately() {
        let mut engine = Engine::headless(5, 5);
        let reason = run_until_stopped(&mut engine, Duration::from_millis(50)).await;
        assert_eq!(reason, None);
        assert_eq!(engine.state(), LifecycleState::Inited);
    }
}
