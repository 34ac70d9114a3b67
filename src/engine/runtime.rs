// src/engine/runtime.rs

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::dag::ScheduledNode;
use crate::errors::Result;

use super::shared::SharedSchedule;
use super::{ConsumerEvent, ConsumerOptions};

/// Spawn `options.workers` consumers over `schedule` and collect their
/// events until all of them have stopped.
///
/// `on_event` sees every event in arrival order. The returned vector holds
/// every processed node in that same order.
pub async fn run_consumers(
    schedule: SharedSchedule,
    options: ConsumerOptions,
    mut on_event: impl FnMut(&ConsumerEvent),
) -> Result<Vec<ScheduledNode>> {
    let workers = options.workers.max(1);
    let (tx, mut rx) = mpsc::channel::<ConsumerEvent>(64);

    info!(
        workers,
        resolve = options.resolve_processed,
        "starting schedule consumers"
    );

    let mut handles = JoinSet::new();
    for worker in 0..workers {
        let schedule = schedule.clone();
        let tx = tx.clone();
        handles.spawn(consume(worker, schedule, options.resolve_processed, tx));
    }
    // Only consumers hold senders now; the loop below ends once they are done.
    drop(tx);

    let mut processed = Vec::new();
    while let Some(event) = rx.recv().await {
        debug!(?event, "collector received event");
        on_event(&event);
        if let ConsumerEvent::Processed { node, .. } = event {
            processed.push(node);
        }
    }

    while let Some(joined) = handles.join_next().await {
        joined.map_err(anyhow::Error::from)??;
    }

    info!(processed = processed.len(), "all consumers finished");
    Ok(processed)
}

async fn consume(
    worker: usize,
    schedule: SharedSchedule,
    resolve: bool,
    tx: mpsc::Sender<ConsumerEvent>,
) -> Result<()> {
    loop {
        let next = if resolve {
            schedule.next_resolved().await?
        } else {
            schedule.next().await
        };

        let Some(node) = next else {
            break;
        };

        debug!(worker, node = %node.id, "consumer took node");
        if tx
            .send(ConsumerEvent::Processed { worker, node })
            .await
            .is_err()
        {
            warn!(worker, "collector gone; consumer stopping");
            return Ok(());
        }

        // Let other consumers at the lock between nodes.
        tokio::task::yield_now().await;
    }

    let _ = tx.send(ConsumerEvent::Finished { worker }).await;
    Ok(())
}
