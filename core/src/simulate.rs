use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, RwLock,
    },
    time::Duration,
};

use tokio::time::interval;
use tracing::{debug, info};

use dropzone_entities::{FileStatus, TrackedFile};

use crate::{
    area::{update_files, UploadArea},
    error::SimulatedTransferError,
    events::{
        notify_subscribers, FileCompletedEvent, FileFailedEvent,
        SubscriberMap,
    },
    random::RandomSource,
};

impl UploadArea {
    /// Start a simulated upload run over every tracked entry.
    ///
    /// - an empty area emits one "no files" notification and nothing else;
    /// - a call while a run is in progress is a silent no-op, so repeated
    ///   clicks never spawn duplicate tickers;
    /// - otherwise every non-`Error` entry is re-marked `Uploading` with
    ///   progress 0 (`Completed` entries included: a repeated start
    ///   re-uploads them), `Error` entries stay untouched and are not
    ///   ticked.
    ///
    /// Each surviving entry is driven by its own ticker task; a separate
    /// watcher task clears the uploading flag once every entry is
    /// terminal. There is no explicit cancel: tickers stop on their own
    /// when their entry is gone, completed or failed.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_upload(&self) {
        if self.files.read().unwrap().is_empty() {
            self.notify(|s| s.notify_no_files());
            return;
        }

        let already_running = self
            .is_uploading
            .compare_exchange(
                false,
                true,
                Ordering::AcqRel,
                Ordering::Relaxed,
            )
            .unwrap_or(true);
        if already_running {
            return;
        }

        let ids = update_files(&self.files, |files| {
            let files: Vec<TrackedFile> = files
                .into_iter()
                .map(|mut entry| {
                    if entry.status != FileStatus::Error {
                        entry.status = FileStatus::Uploading;
                        entry.progress = 0.0;
                    }
                    entry
                })
                .collect();
            let ids: Vec<String> = files
                .iter()
                .filter(|entry| entry.status != FileStatus::Error)
                .map(|entry| entry.id.clone())
                .collect();
            (files, ids)
        });

        info!("simulated upload started for {} file(s)", ids.len());

        let run = UploadRun {
            files: self.files.clone(),
            subscribers: self.subscribers.clone(),
            is_uploading: self.is_uploading.clone(),
            random: self.random.clone(),
            tick_period: self.config.tick_period,
            watch_period: self.config.watch_period,
        };

        for id in ids {
            let run = run.clone();
            tokio::spawn(async move { run.tick_entry(id).await });
        }
        tokio::spawn(async move { run.watch_all_done().await });
    }
}

/// Shared state of one simulated run, cloned into each ticker task.
#[derive(Clone)]
struct UploadRun {
    files: Arc<RwLock<Vec<TrackedFile>>>,
    subscribers: Arc<RwLock<SubscriberMap>>,
    is_uploading: Arc<AtomicBool>,
    random: Arc<Mutex<dyn RandomSource>>,
    tick_period: Duration,
    watch_period: Duration,
}

enum TickOutcome {
    /// Progress advanced, entry still uploading.
    Continue,
    /// Entry reached exactly 100 on this tick.
    Completed { name: String },
    /// Failure roll hit; progress frozen, error message set.
    Failed { name: String, error: String },
    /// Entry gone or already at 100; nothing to do.
    Stop,
}

impl UploadRun {
    /// Drive one entry until it leaves the `Uploading` state.
    async fn tick_entry(&self, id: String) {
        let mut timer = interval(self.tick_period);
        // the first interval tick completes immediately
        timer.tick().await;

        loop {
            timer.tick().await;
            match self.advance(&id) {
                TickOutcome::Continue => {}
                TickOutcome::Completed { name } => {
                    info!("upload of {name} completed");
                    notify_subscribers(&self.subscribers, |s| {
                        s.notify_completed(FileCompletedEvent {
                            id: id.clone(),
                            name: name.clone(),
                        })
                    });
                    break;
                }
                TickOutcome::Failed { name, error } => {
                    info!("upload of {name} failed");
                    notify_subscribers(&self.subscribers, |s| {
                        s.notify_failed(FileFailedEvent {
                            id: id.clone(),
                            name: name.clone(),
                            error: error.clone(),
                        })
                    });
                    break;
                }
                TickOutcome::Stop => break,
            }
        }
    }

    /// One progress step for the entry with the given id.
    fn advance(&self, id: &str) -> TickOutcome {
        update_files(&self.files, |mut files| {
            let index = match files.iter().position(|entry| entry.id == id) {
                Some(index) => index,
                None => return (files, TickOutcome::Stop),
            };
            if files[index].progress >= 100.0 {
                return (files, TickOutcome::Stop);
            }

            let (increment, failed) = {
                let mut random = self.random.lock().unwrap();
                (random.progress_increment(), random.roll_failure())
            };

            let entry = &mut files[index];
            let outcome = if failed {
                entry.status = FileStatus::Error;
                entry.error = Some(SimulatedTransferError.to_string());
                TickOutcome::Failed {
                    name: entry.file.name.clone(),
                    error: SimulatedTransferError.to_string(),
                }
            } else {
                let progress = (entry.progress + increment).min(100.0);
                entry.progress = progress;
                if progress >= 100.0 {
                    entry.status = FileStatus::Completed;
                    TickOutcome::Completed {
                        name: entry.file.name.clone(),
                    }
                } else {
                    entry.status = FileStatus::Uploading;
                    TickOutcome::Continue
                }
            };
            (files, outcome)
        })
    }

    /// Clear the uploading flag once every entry is terminal.
    async fn watch_all_done(&self) {
        let mut timer = interval(self.watch_period);
        timer.tick().await;

        loop {
            timer.tick().await;
            let all_done = {
                let files = self.files.read().unwrap();
                !files.is_empty()
                    && files.iter().all(|entry| entry.status.is_terminal())
            };
            if all_done {
                self.is_uploading.store(false, Ordering::Release);
                debug!("every entry terminal, upload run finished");
                break;
            }
        }
    }
}
