//! Minimal driver for the upload-simulation core: adds a few in-memory
//! files, prints every notification and waits for the run to finish.
//!
//! Run with `cargo run --example simulate`.

use std::{sync::Arc, time::Duration};

use dropzone_core::{
    FileCompletedEvent, FileFailedEvent, FilesAddedEvent,
    FilesRejectedEvent, UploadArea, UploadConfig, UploadSubscriber,
};
use dropzone_entities::{format_file_size, File};

struct Toasts;

impl UploadSubscriber for Toasts {
    fn get_id(&self) -> String {
        "toasts".to_string()
    }

    fn notify_added(&self, event: FilesAddedEvent) {
        println!(
            "{} file{} added",
            event.accepted,
            if event.accepted == 1 { "" } else { "s" }
        );
    }

    fn notify_rejected(&self, event: FilesRejectedEvent) {
        println!("rejected: {}", event.message);
        for detail in event.details {
            println!("  - {detail}");
        }
    }

    fn notify_completed(&self, event: FileCompletedEvent) {
        println!("uploaded {}", event.name);
    }

    fn notify_failed(&self, event: FileFailedEvent) {
        println!("error uploading {}: {}", event.name, event.error);
    }

    fn notify_no_files(&self) {
        println!("no files to upload");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let area = UploadArea::new(UploadConfig {
        max_file_size: Some(10 * 1024 * 1024),
        allowed_file_types: vec![
            "image/*".to_string(),
            "application/pdf".to_string(),
            "text/*".to_string(),
        ],
        ..UploadConfig::default()
    });
    area.subscribe(Arc::new(Toasts));

    area.add_files(vec![
        File::in_memory("photo.png", "image/png", vec![0u8; 2048]),
        File::in_memory("notes.txt", "text/plain", b"hello".to_vec()),
        File::in_memory("clip.mp4", "video/mp4", vec![0u8; 512]),
    ]);

    area.start_upload();
    while area.is_uploading() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    for entry in area.files() {
        println!(
            "{:<12} {:>10} {:>4.0}% {:?}",
            entry.file.name,
            format_file_size(entry.file.size()),
            entry.progress,
            entry.status,
        );
    }
}
