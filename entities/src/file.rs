use std::sync::Arc;

use crate::{Data, InMemoryData};

/// A candidate file handed to the upload area by the presentation layer.
///
/// The core never inspects the payload beyond `name`, `content_type` and
/// `size()`.
#[derive(Clone)]
pub struct File {
    pub name: String,
    pub content_type: String,
    pub data: Arc<dyn Data>,
}

impl File {
    /// Convenience constructor over [`InMemoryData`].
    pub fn in_memory(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data: Arc::new(InMemoryData::new(bytes)),
        }
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> u64 {
        self.data.len()
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size())
            .finish()
    }
}
