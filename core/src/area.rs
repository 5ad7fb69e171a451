use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, RwLock,
};

use tracing::{debug, info};
use uuid::Uuid;

use dropzone_entities::{File, TrackedFile};

use crate::{
    config::UploadConfig,
    error::Rejection,
    events::{
        notify_subscribers, FilesAddedEvent, FilesRejectedEvent,
        SubscriberMap, UploadSubscriber,
    },
    random::{RandomSource, ThreadRandom},
    validate::validate,
};

/// The owned state of the file-selection widget.
///
/// Holds the ordered registry of tracked files, the drag and upload flags,
/// the subscriber map and the injected random source. Every mutation of
/// the registry goes through a read-modify-write of the whole collection,
/// so concurrent tickers never lose each other's updates.
pub struct UploadArea {
    pub(crate) files: Arc<RwLock<Vec<TrackedFile>>>,
    pub(crate) is_uploading: Arc<AtomicBool>,
    is_dragging: AtomicBool,
    pub(crate) subscribers: Arc<RwLock<SubscriberMap>>,
    pub(crate) random: Arc<Mutex<dyn RandomSource>>,
    pub(crate) config: UploadConfig,
}

impl UploadArea {
    pub fn new(config: UploadConfig) -> Self {
        Self::with_random_source(config, ThreadRandom)
    }

    /// Build an area with a custom random source, e.g. a scripted one for
    /// deterministic simulation runs.
    pub fn with_random_source(
        config: UploadConfig,
        random: impl RandomSource + 'static,
    ) -> Self {
        Self {
            files: Arc::new(RwLock::new(Vec::new())),
            is_uploading: Arc::new(AtomicBool::new(false)),
            is_dragging: AtomicBool::new(false),
            subscribers: Arc::new(RwLock::new(SubscriberMap::new())),
            random: Arc::new(Mutex::new(random)),
            config,
        }
    }

    /// Validate and track a batch of candidate files.
    ///
    /// Each file is handled independently: rejected ones are collected and
    /// reported in a single aggregated notification, accepted ones are
    /// appended in input order with a fresh id, in one collection update.
    /// A success notification with the accepted count follows when at
    /// least one file made it in.
    pub fn add_files(&self, batch: Vec<File>) {
        let mut rejections: Vec<Rejection> = Vec::new();

        let accepted = update_files(&self.files, |mut files| {
            let mut accepted: Vec<TrackedFile> = Vec::new();
            for file in batch {
                if let Err(rejection) = validate(&file, &self.config) {
                    rejections.push(rejection);
                    continue;
                }
                let duplicate = files
                    .iter()
                    .chain(accepted.iter())
                    .any(|tracked| tracked.file.name == file.name);
                if duplicate {
                    rejections.push(Rejection::DuplicateName {
                        name: file.name.clone(),
                    });
                    continue;
                }
                accepted.push(TrackedFile::new(
                    Uuid::new_v4().to_string(),
                    file,
                ));
            }
            let count = accepted.len();
            files.extend(accepted);
            (files, count)
        });

        debug!(
            accepted,
            rejected = rejections.len(),
            "processed a batch of candidate files"
        );

        if !rejections.is_empty() {
            let details: Vec<String> =
                rejections.iter().map(|r| r.to_string()).collect();
            let message = if details.len() == 1 {
                details[0].clone()
            } else {
                format!("{} files couldn't be added", details.len())
            };
            self.notify(|s| {
                s.notify_rejected(FilesRejectedEvent {
                    message: message.clone(),
                    details: details.clone(),
                })
            });
        }

        if accepted > 0 {
            info!("{} file(s) added to the upload area", accepted);
            self.notify(|s| s.notify_added(FilesAddedEvent { accepted }));
        }
    }

    /// Remove the entry with the given id; silent no-op when absent.
    pub fn remove_file(&self, id: &str) {
        update_files(&self.files, |mut files| {
            files.retain(|tracked| tracked.id != id);
            (files, ())
        });
    }

    /// Drop every entry.
    pub fn clear_files(&self) {
        update_files(&self.files, |_| (Vec::new(), ()));
    }

    /// Snapshot of the registry in insertion order, for rendering.
    pub fn files(&self) -> Vec<TrackedFile> {
        self.files.read().unwrap().clone()
    }

    /// Number of tracked entries.
    pub fn len(&self) -> usize {
        self.files.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().unwrap().is_empty()
    }

    /// True while a simulated upload run is in progress.
    pub fn is_uploading(&self) -> bool {
        self.is_uploading.load(Ordering::Acquire)
    }

    /// Drag-state flag for the drop target.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging.load(Ordering::Relaxed)
    }

    pub fn set_dragging(&self, dragging: bool) {
        self.is_dragging.store(dragging, Ordering::Relaxed);
    }

    pub fn subscribe(&self, subscriber: Arc<dyn UploadSubscriber>) {
        self.subscribers
            .write()
            .unwrap()
            .insert(subscriber.get_id(), subscriber);
    }

    pub fn unsubscribe(&self, subscriber: Arc<dyn UploadSubscriber>) {
        self.subscribers
            .write()
            .unwrap()
            .remove(&subscriber.get_id());
    }

    pub(crate) fn notify(&self, send: impl Fn(&Arc<dyn UploadSubscriber>)) {
        notify_subscribers(&self.subscribers, send);
    }
}

/// Replace the whole collection under the write lock.
///
/// The closure receives the current vector by value and returns its
/// successor plus an arbitrary result, mirroring the single-writer
/// discipline the widget state was designed around.
pub(crate) fn update_files<R>(
    files: &RwLock<Vec<TrackedFile>>,
    update: impl FnOnce(Vec<TrackedFile>) -> (Vec<TrackedFile>, R),
) -> R {
    let mut guard = files.write().unwrap();
    let (next, result) = update(std::mem::take(&mut *guard));
    *guard = next;
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use dropzone_entities::FileStatus;

    use super::*;
    use crate::events::{FileCompletedEvent, FileFailedEvent};

    #[derive(Default)]
    struct Recorder {
        added: Mutex<Vec<usize>>,
        rejected: Mutex<Vec<FilesRejectedEvent>>,
        no_files: Mutex<usize>,
    }

    impl UploadSubscriber for Recorder {
        fn get_id(&self) -> String {
            "recorder".to_string()
        }

        fn notify_added(&self, event: FilesAddedEvent) {
            self.added.lock().unwrap().push(event.accepted);
        }

        fn notify_rejected(&self, event: FilesRejectedEvent) {
            self.rejected.lock().unwrap().push(event);
        }

        fn notify_completed(&self, _event: FileCompletedEvent) {}

        fn notify_failed(&self, _event: FileFailedEvent) {}

        fn notify_no_files(&self) {
            *self.no_files.lock().unwrap() += 1;
        }
    }

    fn area_with_recorder(
        config: UploadConfig,
    ) -> (UploadArea, Arc<Recorder>) {
        let area = UploadArea::new(config);
        let recorder = Arc::new(Recorder::default());
        area.subscribe(recorder.clone());
        (area, recorder)
    }

    fn file_of(name: &str, content_type: &str, size: usize) -> File {
        File::in_memory(name, content_type, vec![0u8; size])
    }

    #[test]
    fn add_preserves_input_order() {
        let (area, recorder) =
            area_with_recorder(UploadConfig::unrestricted());

        area.add_files(vec![
            file_of("a.txt", "text/plain", 1),
            file_of("b.txt", "text/plain", 2),
            file_of("c.txt", "text/plain", 3),
        ]);

        let names: Vec<String> = area
            .files()
            .iter()
            .map(|t| t.file.name.clone())
            .collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
        assert_eq!(*recorder.added.lock().unwrap(), [3]);
        assert!(recorder.rejected.lock().unwrap().is_empty());
    }

    #[test]
    fn generated_ids_are_unique() {
        let (area, _) = area_with_recorder(UploadConfig::unrestricted());

        area.add_files(vec![
            file_of("a.txt", "text/plain", 1),
            file_of("b.txt", "text/plain", 1),
        ]);

        let files = area.files();
        assert_ne!(files[0].id, files[1].id);
    }

    #[test]
    fn oversized_file_is_never_inserted() {
        let config = UploadConfig {
            max_file_size: Some(1048576),
            ..UploadConfig::default()
        };
        let (area, recorder) = area_with_recorder(config);

        area.add_files(vec![file_of("big.bin", "application/zip", 1048577)]);

        assert!(area.is_empty());
        let rejected = recorder.rejected.lock().unwrap();
        assert_eq!(rejected.len(), 1);
        // exactly one rejection: the message is the rejection itself
        assert_eq!(
            rejected[0].message,
            "File big.bin exceeds maximum size of 1MB"
        );
        assert!(recorder.added.lock().unwrap().is_empty());
    }

    #[test]
    fn disallowed_type_is_never_inserted() {
        let config = UploadConfig {
            max_file_size: None,
            allowed_file_types: vec!["image/*".to_string()],
            ..UploadConfig::default()
        };
        let (area, _) = area_with_recorder(config);

        area.add_files(vec![file_of("clip.mp4", "video/mp4", 8)]);

        assert!(area.is_empty());
    }

    #[test]
    fn wildcard_category_is_inserted() {
        let config = UploadConfig {
            max_file_size: Some(10 * 1024 * 1024),
            allowed_file_types: vec!["image/*".to_string()],
            ..UploadConfig::default()
        };
        let (area, _) = area_with_recorder(config);

        // 5MB image against a 10MB limit
        area.add_files(vec![file_of(
            "photo.jpg",
            "image/jpeg",
            5 * 1024 * 1024,
        )]);

        let files = area.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].status, FileStatus::Pending);
        assert_eq!(files[0].progress, 0.0);
    }

    #[test]
    fn duplicate_name_across_calls_keeps_one_entry() {
        let (area, recorder) =
            area_with_recorder(UploadConfig::unrestricted());

        area.add_files(vec![file_of("a.txt", "text/plain", 1)]);
        area.add_files(vec![file_of("a.txt", "text/plain", 2)]);

        assert_eq!(area.len(), 1);
        let rejected = recorder.rejected.lock().unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].message, "File a.txt already added");
    }

    #[test]
    fn duplicate_name_within_one_batch_keeps_one_entry() {
        let (area, _) = area_with_recorder(UploadConfig::unrestricted());

        area.add_files(vec![
            file_of("a.txt", "text/plain", 1),
            file_of("a.txt", "text/plain", 2),
        ]);

        assert_eq!(area.len(), 1);
    }

    #[test]
    fn several_rejections_are_aggregated_into_one_notification() {
        let config = UploadConfig {
            max_file_size: Some(4),
            ..UploadConfig::default()
        };
        let (area, recorder) = area_with_recorder(config);

        area.add_files(vec![
            file_of("big1.bin", "application/zip", 5),
            file_of("ok.txt", "text/plain", 1),
            file_of("big2.bin", "application/zip", 6),
        ]);

        assert_eq!(area.len(), 1);
        let rejected = recorder.rejected.lock().unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].message, "2 files couldn't be added");
        assert_eq!(rejected[0].details.len(), 2);
        assert_eq!(*recorder.added.lock().unwrap(), [1]);
    }

    #[test]
    fn remove_drops_only_the_matching_entry() {
        let (area, _) = area_with_recorder(UploadConfig::unrestricted());

        area.add_files(vec![
            file_of("a.txt", "text/plain", 1),
            file_of("b.txt", "text/plain", 1),
        ]);
        let id = area.files()[0].id.clone();

        area.remove_file(&id);

        let files = area.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file.name, "b.txt");
    }

    #[test]
    fn remove_of_absent_id_is_a_no_op() {
        let (area, _) = area_with_recorder(UploadConfig::unrestricted());

        area.add_files(vec![file_of("a.txt", "text/plain", 1)]);
        area.remove_file("not-an-id");

        assert_eq!(area.len(), 1);
    }

    #[test]
    fn clear_empties_the_registry() {
        let (area, _) = area_with_recorder(UploadConfig::unrestricted());

        area.add_files(vec![
            file_of("a.txt", "text/plain", 1),
            file_of("b.txt", "text/plain", 1),
        ]);
        area.clear_files();
        assert!(area.is_empty());

        // clearing an already empty registry stays a no-op
        area.clear_files();
        assert!(area.is_empty());
    }

    #[test]
    fn drag_state_flag_round_trip() {
        let (area, _) = area_with_recorder(UploadConfig::default());

        assert!(!area.is_dragging());
        area.set_dragging(true);
        assert!(area.is_dragging());
        area.set_dragging(false);
        assert!(!area.is_dragging());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let (area, recorder) =
            area_with_recorder(UploadConfig::unrestricted());

        area.unsubscribe(recorder.clone());
        area.add_files(vec![file_of("a.txt", "text/plain", 1)]);

        assert!(recorder.added.lock().unwrap().is_empty());
    }
}
