use lottery_domain::ports::{Clock, RemoteFetcher};
use lottery_domain::{plan_sync, GameId};
use tokio::time::sleep;
use tracing::{info, Instrument};

use crate::{AppError, AppState, GameHistory, Metrics, ProgressSink, SyncProgress, SyncSettings};

/// Brings one game's history up to date with the remote source and returns
/// the number of stored draws afterwards.
pub async fn sync_history(
    state: &AppState,
    game: GameId,
    progress: &ProgressSink,
) -> Result<usize, AppError> {
    let history = state.history(game)?;
    let mut history = history.lock().await;
    let span = history.span().clone();
    let total = run_sync(
        &mut history,
        state.fetcher.as_ref(),
        state.clock.as_ref(),
        &state.settings,
        &state.metrics,
        progress,
    )
    .instrument(span)
    .await;
    Ok(total)
}

/// Runs every enabled game in turn; one game's outcome never stops the next.
pub async fn sync_all(state: &AppState, progress: &ProgressSink) -> Vec<(GameId, usize)> {
    let mut totals = Vec::new();
    for game in state.games() {
        match sync_history(state, game, progress).await {
            Ok(total) => totals.push((game, total)),
            Err(err) => tracing::warn!("sync skipped for {}: {}", game, err),
        }
    }
    totals
}

/// Best effort: a failed request only leaves its time unit empty.
pub async fn run_sync(
    history: &mut GameHistory,
    fetcher: &dyn RemoteFetcher,
    clock: &dyn Clock,
    settings: &SyncSettings,
    metrics: &Metrics,
    progress: &ProgressSink,
) -> usize {
    let game = history.profile().id;
    let plan = plan_sync(history.profile(), history.store(), clock.today());
    metrics.record_sync_run();

    if plan.is_empty() {
        info!("already up to date with {} draws", history.len());
        progress.send(SyncProgress::Finished {
            game,
            total_records: history.len(),
        });
        return history.len();
    }

    progress.send(SyncProgress::Started {
        game,
        units: plan.len(),
    });
    let mut added_total = 0;
    for (index, selector) in plan.selectors.iter().enumerate() {
        if index > 0 && !settings.request_delay.is_zero() {
            sleep(settings.request_delay).await;
        }
        let label = selector.label();
        progress.send(SyncProgress::Fetching {
            game,
            label: label.clone(),
            index,
            total: plan.len(),
        });

        let draws = fetcher.fetch(history.profile(), *selector).await;
        metrics.record_fetch(draws.len());
        let added = history.merge(draws);
        metrics.record_added(added);
        added_total += added;
        progress.send(SyncProgress::Merged { game, label, added });
    }

    if let Some(limit) = plan.retention_limit {
        let dropped = history.retain_newest(limit);
        if dropped > 0 {
            info!("retention dropped {} old draws (limit {})", dropped, limit);
        }
    }
    if !history.finalize().await {
        metrics.record_snapshot_error();
    }

    info!(
        "sync finished: {} requests, {} new draws, {} stored",
        plan.len(),
        added_total,
        history.len()
    );
    progress.send(SyncProgress::Finished {
        game,
        total_records: history.len(),
    });
    history.len()
}
