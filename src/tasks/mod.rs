//! Background tasks for the application.
//!
//! Sessions live only in memory; the sweeper drops the ones an operator has
//! abandoned so the process does not grow without bound.
//! Call `spawn_all` once during startup.

use crate::services::DrawSessionService;

const SWEEP_INTERVAL_SECS: u64 = 60;

/// Spawn all background tasks. Detaches via `tokio::spawn`; does not block.
pub fn spawn_all(draw_session_service: DrawSessionService) {
    let idle_timeout =
        chrono::Duration::seconds(draw_session_service.config().session_idle_timeout_secs);

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(SWEEP_INTERVAL_SECS)).await;
            let removed = draw_session_service.sweep_idle(idle_timeout).await;
            if removed > 0 {
                log::info!("Removed {removed} idle draw sessions");
            } else {
                log::debug!("No idle draw sessions to remove");
            }
        }
    });
}
