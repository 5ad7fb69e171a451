use std::sync::Mutex;

/// A thread-safe, sequential source of bytes.
///
/// Implementors must be `Send + Sync` so instances can be shared behind
/// `Arc` while remaining safe to read concurrently. Reads are consuming:
/// each call advances an internal cursor.
///
/// Contract:
/// - `len()` returns the total length of the underlying data in bytes and
///   must not change over the lifetime of the object.
/// - `read()` returns the next byte, or `None` at end-of-stream.
/// - `read_chunk(size)` returns up to `size` bytes from the current
///   position; fewer when fewer remain, and an empty `Vec` at
///   end-of-stream.
pub trait Data: Send + Sync {
    /// Total length of the data in bytes, not the number of unread bytes.
    fn len(&self) -> u64;

    /// True when the data has length 0.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the next byte from the current position.
    fn read(&self) -> Option<u8>;

    /// Read up to `size` bytes from the current position.
    fn read_chunk(&self, size: u64) -> Vec<u8>;
}

/// In-memory [`Data`] implementation with a mutex-protected cursor.
pub struct InMemoryData {
    bytes: Vec<u8>,
    cursor: Mutex<usize>,
}

impl InMemoryData {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            cursor: Mutex::new(0),
        }
    }
}

impl Data for InMemoryData {
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read(&self) -> Option<u8> {
        let mut cursor = self.cursor.lock().unwrap();
        if *cursor >= self.bytes.len() {
            return None;
        }
        let byte = self.bytes[*cursor];
        *cursor += 1;
        Some(byte)
    }

    fn read_chunk(&self, size: u64) -> Vec<u8> {
        let mut cursor = self.cursor.lock().unwrap();
        if *cursor >= self.bytes.len() {
            return Vec::new();
        }
        let end = (*cursor + size as usize).min(self.bytes.len());
        let chunk = self.bytes[*cursor..end].to_vec();
        *cursor = end;
        chunk
    }
}
