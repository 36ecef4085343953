//! Stdio front end for the contact list service.
//!
//! Commands arrive on stdin as JSON lines. Every published snapshot, the
//! reply to a `snapshot` command, and every error are written to stdout as
//! one JSON line each. Logs go to stderr.
//!
//! When stdin closes the server keeps printing until the snapshot for the
//! last accepted update has been written.

pub mod commands;

pub use commands::{Command, ErrorLine};

use crate::error::ServiceResult;
use crate::pipeline::{ContactListSnapshot, SnapshotReceiver};
use crate::services::ContactListService;
use serde::Serialize;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{watch, Mutex};

type SharedWriter<W> = Arc<Mutex<W>>;

/// Run the stdio loop until stdin is closed.
pub async fn run_server(service: Arc<dyn ContactListService>) -> std::io::Result<()> {
    serve(service, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Serve commands read from `reader`, writing JSON lines to `writer`.
pub async fn serve<R, W>(
    service: Arc<dyn ContactListService>,
    reader: R,
    writer: W,
) -> std::io::Result<()>
where
    R: tokio::io::AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let writer: SharedWriter<W> = Arc::new(Mutex::new(writer));

    // The list published before we subscribed is printed too.
    let mut snapshots = service.subscribe();
    let initial = snapshots.borrow_and_update().clone();
    let (stop_tx, stop_rx) = watch::channel(None);
    let printer = tokio::spawn(print_snapshots(snapshots, stop_rx, initial, writer.clone()));

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = handle_line(service.as_ref(), &line, &writer).await {
            tracing::debug!(error = %e, "Command failed");
            write_line(&writer, &ErrorLine::new(&e)).await?;
        }
    }

    let last_requested = service.requested_generation();
    tracing::info!(
        generation = last_requested,
        "Input closed, waiting for the last snapshot"
    );
    stop_tx.send_replace(Some(last_requested));

    match printer.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Snapshot printer ended abnormally");
            Ok(())
        }
    }
}

/// Write each newly published snapshot as one line.
///
/// Returns once a generation at or past the one sent on `stop_at` has been
/// written, or when either channel closes.
async fn print_snapshots<W>(
    mut snapshots: SnapshotReceiver,
    mut stop_at: watch::Receiver<Option<u64>>,
    initial: Option<Arc<ContactListSnapshot>>,
    writer: SharedWriter<W>,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut printed = 0;
    let mut pending = initial;
    loop {
        if let Some(snapshot) = pending.take() {
            if snapshot.generation > printed {
                write_line(&writer, snapshot.as_ref()).await?;
                printed = snapshot.generation;
            }
        }

        let target = *stop_at.borrow();
        if target.is_some_and(|target| printed >= target) {
            return Ok(());
        }

        let published = tokio::select! {
            changed = snapshots.changed() => changed.map(|_| true),
            changed = stop_at.changed() => changed.map(|_| false),
        };
        match published {
            Ok(true) => pending = snapshots.borrow_and_update().clone(),
            Ok(false) => {}
            Err(_) => return Ok(()),
        }
    }
}

async fn handle_line<W>(
    service: &dyn ContactListService,
    line: &str,
    writer: &SharedWriter<W>,
) -> ServiceResult<()>
where
    W: AsyncWrite + Unpin,
{
    match Command::parse(line)? {
        Command::UpdateQuery { text } => service.update_query(text).await,
        Command::UpdateFilterTypes { types } => {
            let types = commands::parse_types(&types)?;
            service.update_filter_types(types).await
        }
        Command::UpdateSortPolicy { policy } => service.update_sort_policy(&policy).await,
        Command::Snapshot => {
            match service.latest_snapshot() {
                Some(snapshot) => write_line(writer, snapshot.as_ref()).await?,
                None => write_line(writer, &ErrorLine::new("No snapshot published yet")).await?,
            }
            Ok(())
        }
    }
}

async fn write_line<W, T>(writer: &SharedWriter<W>, value: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize + ?Sized,
{
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');

    let mut writer = writer.lock().await;
    writer.write_all(&line).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merging::ContactMerger;
    use crate::observability::MetricsTracker;
    use crate::repositories::JsonContactStore;
    use crate::services::ContactListServiceImpl;
    use crate::sorting::SortPolicy;
    use tokio::io::AsyncReadExt;

    fn service() -> Arc<dyn ContactListService> {
        let store = Arc::new(
            JsonContactStore::from_json(
                r#"{"sources": [{"name": "device"}],
                    "contacts": [
                        {"sourceName": "device", "firstName": "Bob", "type": "PHONE"},
                        {"sourceName": "device", "firstName": "Ann", "type": "TELEGRAM"}
                    ]}"#,
            )
            .unwrap(),
        );
        Arc::new(ContactListServiceImpl::new(
            store.clone(),
            store,
            ContactMerger::default(),
            SortPolicy::ByName,
            MetricsTracker::new(),
        ))
    }

    #[tokio::test]
    async fn test_errors_are_reported_as_lines() {
        let service = service();
        let input = b"{\"command\": \"update_sort_policy\", \"policy\": \"BY_AGE\"}\nnot json\n{\"command\": \"snapshot\"}\n";
        let (writer, mut output) = tokio::io::duplex(64 * 1024);

        serve(service, &input[..], writer).await.unwrap();

        let mut text = String::new();
        output.read_to_string(&mut text).await.unwrap();
        let lines = json_lines(&text);

        assert_eq!(lines.len(), 3);
        assert!(lines[0]["error"].as_str().unwrap().contains("BY_AGE"));
        assert!(lines[1]["error"].as_str().unwrap().contains("Malformed"));
        assert_eq!(lines[2]["error"], "No snapshot published yet");
    }

    fn json_lines(text: &str) -> Vec<serde_json::Value> {
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_prints_initial_and_final_snapshots() {
        let service = service();
        let mut receiver = service.subscribe();
        service.init_load().await.unwrap();
        receiver.changed().await.unwrap();

        let input = b"{\"command\": \"update_query\", \"text\": \"ann\"}\n";
        let (writer, mut output) = tokio::io::duplex(64 * 1024);
        serve(service.clone(), &input[..], writer).await.unwrap();

        let mut text = String::new();
        output.read_to_string(&mut text).await.unwrap();
        let lines = json_lines(&text);

        assert_eq!(lines.len(), 2, "unexpected output: {}", text);
        assert_eq!(lines[0]["generation"], 1);
        assert_eq!(lines[0]["contacts"].as_array().unwrap().len(), 2);
        assert_eq!(lines[1]["generation"], 2);
        assert_eq!(lines[1]["state"]["query"], "ann");
        assert_eq!(lines[1]["contacts"][0]["displayName"], "Ann");
        assert_eq!(lines[1]["contacts"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_last_update_printed_after_burst() {
        let service = service();
        service.init_load().await.unwrap();

        let input = b"{\"command\": \"update_query\", \"text\": \"b\"}\n\
{\"command\": \"update_sort_policy\", \"policy\": \"BY_NAME_REVERSED\"}\n\
{\"command\": \"update_query\", \"text\": \"\"}\n";
        let (writer, mut output) = tokio::io::duplex(64 * 1024);
        serve(service.clone(), &input[..], writer).await.unwrap();

        let mut text = String::new();
        output.read_to_string(&mut text).await.unwrap();
        let lines = json_lines(&text);

        let last = lines.last().unwrap();
        assert_eq!(last["generation"], 4);
        assert_eq!(last["contacts"][0]["displayName"], "Bob");
        let generations: Vec<u64> = lines
            .iter()
            .map(|line| line["generation"].as_u64().unwrap())
            .collect();
        assert!(generations.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[tokio::test]
    async fn test_snapshot_command_after_load() {
        let service = service();
        let mut receiver = service.subscribe();
        service.init_load().await.unwrap();
        receiver.changed().await.unwrap();

        let (writer, mut output) = tokio::io::duplex(64 * 1024);
        handle_line(
            service.as_ref(),
            r#"{"command": "snapshot"}"#,
            &Arc::new(Mutex::new(writer)),
        )
        .await
        .unwrap();

        let mut text = String::new();
        output.read_to_string(&mut text).await.unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(snapshot["generation"], 1);
        assert_eq!(snapshot["contacts"][0]["displayName"], "Ann");
        assert_eq!(snapshot["totalCount"], 2);
    }
}
