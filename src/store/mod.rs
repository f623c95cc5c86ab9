//! Document store for leads and status checks
//!
//! JSON-lines files under the data directory, one per collection, mirrored
//! in memory. The store is constructed once at startup and injected into the
//! HTTP handlers; there is no lazily-initialized global client.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

const LEADS_FILE: &str = "leads.jsonl";
const STATUS_FILE: &str = "status_checks.jsonl";

/// Newest-first cap on lead listings
const LEADS_CAP: usize = 100;
/// Cap on status-check listings
const STATUS_CAP: usize = 1000;

/// Store failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failure: {0}")]
    Json(#[from] serde_json::Error),
}

/// A submitted lead from the contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "agreeToTerms")]
    pub agree_to_terms: bool,
    #[serde(rename = "submittedAt")]
    pub submitted_at: DateTime<Utc>,
    pub status: String,
}

impl Lead {
    /// Build a new lead with a generated id and a server-assigned timestamp
    pub fn new(name: String, email: String, phone: String, address: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            phone,
            address,
            agree_to_terms: true,
            submitted_at: Utc::now(),
            status: "new".to_string(),
        }
    }
}

/// A stored heartbeat/ping record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name,
            timestamp: Utc::now(),
        }
    }
}

/// Persisted envelope: the internal sequence number never leaves the store
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Stored<T> {
    #[serde(rename = "_seq")]
    seq: u64,
    #[serde(flatten)]
    doc: T,
}

struct Collections {
    leads: Vec<Stored<Lead>>,
    status_checks: Vec<Stored<StatusCheck>>,
}

/// File-backed document store
pub struct Store {
    data_dir: PathBuf,
    collections: Mutex<Collections>,
}

impl Store {
    /// Open the store, creating the data directory and reloading any
    /// previously persisted documents.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;

        let leads = load_collection(&data_dir.join(LEADS_FILE))?;
        let status_checks = load_collection(&data_dir.join(STATUS_FILE))?;

        Ok(Self {
            data_dir,
            collections: Mutex::new(Collections {
                leads,
                status_checks,
            }),
        })
    }

    /// Persist a lead. Returns the stored document.
    pub async fn insert_lead(&self, lead: Lead) -> Result<Lead, StoreError> {
        let mut collections = self.collections.lock().await;
        let stored = Stored {
            seq: collections.leads.len() as u64 + 1,
            doc: lead,
        };
        append_line(&self.data_dir.join(LEADS_FILE), &stored)?;
        collections.leads.push(stored.clone());
        Ok(stored.doc)
    }

    /// Persist a status check. Returns the stored document.
    pub async fn insert_status(&self, check: StatusCheck) -> Result<StatusCheck, StoreError> {
        let mut collections = self.collections.lock().await;
        let stored = Stored {
            seq: collections.status_checks.len() as u64 + 1,
            doc: check,
        };
        append_line(&self.data_dir.join(STATUS_FILE), &stored)?;
        collections.status_checks.push(stored.clone());
        Ok(stored.doc)
    }

    /// Stored leads, newest first, capped at 100, envelope stripped
    pub async fn leads(&self) -> Vec<Lead> {
        let collections = self.collections.lock().await;
        let mut leads: Vec<Lead> = collections.leads.iter().map(|s| s.doc.clone()).collect();
        leads.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        leads.truncate(LEADS_CAP);
        leads
    }

    /// Stored status checks in insertion order, capped at 1000
    pub async fn status_checks(&self) -> Vec<StatusCheck> {
        let collections = self.collections.lock().await;
        let mut checks: Vec<StatusCheck> = collections
            .status_checks
            .iter()
            .map(|s| s.doc.clone())
            .collect();
        checks.truncate(STATUS_CAP);
        checks
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<Stored<T>>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)?;
    let mut docs = Vec::new();
    for line in content.lines().filter(|l| !l.trim().is_empty()) {
        match serde_json::from_str(line) {
            Ok(doc) => docs.push(doc),
            Err(e) => {
                tracing::warn!("Skipping corrupt record in {:?}: {}", path, e);
            }
        }
    }
    Ok(docs)
}

fn append_line<T: Serialize>(path: &Path, doc: &T) -> Result<(), StoreError> {
    let line = serde_json::to_string(doc)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_list_leads() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();

        let lead = Lead::new(
            "Ada".into(),
            "ada@example.com".into(),
            "555-0100".into(),
            "1 Main St".into(),
        );
        let id = lead.id.clone();
        store.insert_lead(lead).await.unwrap();

        let leads = store.leads().await;
        assert_eq!(leads.len(), 1);
        assert_eq!(leads[0].id, id);
        assert_eq!(leads[0].status, "new");
    }

    #[tokio::test]
    async fn test_leads_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();

        let mut first = Lead::new("A".into(), "a@x".into(), "1".into(), "a".into());
        let mut second = Lead::new("B".into(), "b@x".into(), "2".into(), "b".into());
        first.submitted_at = Utc::now() - chrono::Duration::hours(1);
        second.submitted_at = Utc::now();
        store.insert_lead(first).await.unwrap();
        store.insert_lead(second).await.unwrap();

        let leads = store.leads().await;
        assert_eq!(leads[0].name, "B");
        assert_eq!(leads[1].name, "A");
    }

    #[tokio::test]
    async fn test_reopen_reloads_documents() {
        let tmp = tempfile::tempdir().unwrap();
        {
            let store = Store::open(tmp.path()).unwrap();
            store
                .insert_status(StatusCheck::new("probe".into()))
                .await
                .unwrap();
        }

        let store = Store::open(tmp.path()).unwrap();
        let checks = store.status_checks().await;
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].client_name, "probe");
    }

    #[tokio::test]
    async fn test_envelope_seq_not_serialized_on_doc() {
        let tmp = tempfile::tempdir().unwrap();
        let store = Store::open(tmp.path()).unwrap();
        let check = store
            .insert_status(StatusCheck::new("probe".into()))
            .await
            .unwrap();

        let json = serde_json::to_value(&check).unwrap();
        assert!(json.get("_seq").is_none());
        assert!(json.get("timestamp").is_some());

        // But the persisted line does carry the envelope
        let raw = fs::read_to_string(tmp.path().join(STATUS_FILE)).unwrap();
        assert!(raw.contains("\"_seq\""));
    }
}
