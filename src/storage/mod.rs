//! Storage abstractions for scraped data.
//!
//! - Catalog records stream to a delimited file through a [`RecordSink`].
//! - Mars snapshots are persisted as JSON documents by a [`SnapshotStore`].
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── current.json          # Replace policy: the single current document
//! └── history/              # History policy: one document per run
//!     ├── 20260101T120000.000000Z.json
//!     └── 20260102T120000.000000Z.json
//! ```

pub mod local;
pub mod records;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{MarsDocument, PersistencePolicy};

// Re-export for convenience
pub use local::LocalStorage;
pub use records::{CsvSink, RecordSink};

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Key the document was written to
    pub location: String,
    /// Policy the write followed
    pub policy: PersistencePolicy,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for Mars snapshot storage backends.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist a new snapshot document.
    async fn save(&self, document: &MarsDocument) -> Result<WriteMetadata>;

    /// The document considered current, if any has been saved.
    async fn load_current(&self) -> Result<Option<MarsDocument>>;
}
