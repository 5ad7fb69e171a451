use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

/// Receiver of the upload area's user-facing notifications, rendered as
/// toasts by a typical presentation layer.
///
/// Implementations must be `Send + Sync`; notifications are emitted from
/// the operation that caused them or from a simulator task, never while
/// the registry lock is held, so a subscriber may call back into the area.
pub trait UploadSubscriber: Send + Sync {
    fn get_id(&self) -> String;

    /// A batch of files was accepted.
    fn notify_added(&self, event: FilesAddedEvent);

    /// One aggregated report for every rejection in a batch.
    fn notify_rejected(&self, event: FilesRejectedEvent);

    /// An entry finished uploading; emitted once per entry and run.
    fn notify_completed(&self, event: FileCompletedEvent);

    /// An entry hit the simulated failure; emitted once per entry and run.
    fn notify_failed(&self, event: FileFailedEvent);

    /// The upload was started with an empty area.
    fn notify_no_files(&self);
}

#[derive(Clone, Debug)]
pub struct FilesAddedEvent {
    pub accepted: usize,
}

#[derive(Clone, Debug)]
pub struct FilesRejectedEvent {
    /// The single rejection message, or a count headline for several.
    pub message: String,
    /// Every rejection message of the batch, in input order.
    pub details: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct FileCompletedEvent {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug)]
pub struct FileFailedEvent {
    pub id: String,
    pub name: String,
    pub error: String,
}

pub(crate) type SubscriberMap = HashMap<String, Arc<dyn UploadSubscriber>>;

pub(crate) fn notify_subscribers(
    subscribers: &RwLock<SubscriberMap>,
    send: impl Fn(&Arc<dyn UploadSubscriber>),
) {
    subscribers
        .read()
        .unwrap()
        .iter()
        .for_each(|(_, subscriber)| send(subscriber));
}
