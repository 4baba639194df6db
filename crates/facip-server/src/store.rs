//! In-memory home for each faculty member's linked scholar profile.
//!
//! The extractor's record is kept verbatim next to the URL that was
//! submitted; nothing inspects its inner shape. Contents live for the
//! lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use facip_scholar::ProfileRecord;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct ScholarLink {
    pub faculty_id: Uuid,
    pub profile_url: String,
    pub scholar_data: ProfileRecord,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    links: Arc<RwLock<HashMap<Uuid, ScholarLink>>>,
}

impl ProfileStore {
    /// Stores `link`, replacing and returning any previous link for the same
    /// faculty member.
    pub async fn upsert(&self, link: ScholarLink) -> Option<ScholarLink> {
        self.links.write().await.insert(link.faculty_id, link)
    }

    pub async fn get(&self, faculty_id: Uuid) -> Option<ScholarLink> {
        self.links.read().await.get(&faculty_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }
}
