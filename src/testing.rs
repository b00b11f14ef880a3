use crate::ec2_volume_client::Enumerate;
use crate::error::ShrinkError;
use crate::model::{Record, Volume};
use crate::record_store::{Collection, RecordStore};
use crate::sts_client::{Exchange, Identify, TemporaryCredentials};
use crate::workflow::StartExecution;
use async_trait::async_trait;
use rusoto_core::signature::{SignedRequest, SignedRequestPayload};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(record) => record,
        other => panic!("not an object: {}", other),
    }
}

/// The buffered payload a rusoto client handed to its dispatcher.
pub fn request_body(request: &SignedRequest) -> String {
    match &request.payload {
        Some(SignedRequestPayload::Buffer(buffer)) => String::from_utf8_lossy(buffer).into_owned(),
        _ => String::new(),
    }
}

/// Keeps insertion order per collection and overwrites by key, like a single-page table scan.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<Record>>>,
    pub batch_writes: Mutex<usize>,
    fail_scans: bool,
}

impl MemoryStore {
    pub fn with(collection: Collection, records: Vec<Value>) -> Self {
        let store = MemoryStore::default();
        store.seed(collection, records);
        store
    }

    /// Every scan fails, as when the table is missing.
    pub fn failing() -> Self {
        MemoryStore {
            fail_scans: true,
            ..MemoryStore::default()
        }
    }

    pub fn seed(&self, collection: Collection, records: Vec<Value>) {
        for value in records {
            self.insert(collection, record(value));
        }
    }

    pub fn records(&self, collection: Collection) -> Vec<Record> {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn insert(&self, collection: Collection, record: Record) {
        let key = collection.key_attribute();
        let mut collections = self.collections.lock().unwrap();
        let records = collections.entry(collection).or_default();
        match records
            .iter_mut()
            .find(|existing| existing.get(key).is_some() && existing.get(key) == record.get(key))
        {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn scan_all(&self, collection: Collection) -> Result<Vec<Record>, ShrinkError> {
        if self.fail_scans {
            return Err(ShrinkError::MissingValue("Items"));
        }
        Ok(self.records(collection))
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Record>, ShrinkError> {
        let attribute = collection.key_attribute();
        Ok(self
            .records(collection)
            .into_iter()
            .find(|record| record.get(attribute).and_then(Value::as_str) == Some(key)))
    }

    async fn put(&self, collection: Collection, record: Record) -> Result<(), ShrinkError> {
        self.insert(collection, record);
        Ok(())
    }

    async fn put_many(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<(), ShrinkError> {
        *self.batch_writes.lock().unwrap() += 1;
        for record in records {
            self.insert(collection, record);
        }
        Ok(())
    }
}

/// Hands out credentials whose access key is the account id; accounts listed in
/// `denied` fail the exchange.
#[derive(Default)]
pub struct FakeExchange {
    pub denied: Vec<String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Exchange for FakeExchange {
    async fn assume(
        &self,
        account_id: &str,
        external_id: &str,
    ) -> Result<TemporaryCredentials, ShrinkError> {
        self.calls
            .lock()
            .unwrap()
            .push((account_id.to_string(), external_id.to_string()));
        if self.denied.iter().any(|denied| denied == account_id) {
            return Err(ShrinkError::MissingCredentials(account_id.to_string()));
        }
        Ok(TemporaryCredentials {
            access_key: account_id.to_string(),
            secret_key: "secret".to_string(),
            session_token: "token".to_string(),
        })
    }
}

/// Returns the volumes registered for the account behind the credentials' access key.
#[derive(Default)]
pub struct FakeEnumerator {
    pub volumes: HashMap<String, Vec<Volume>>,
}

#[async_trait]
impl Enumerate for FakeEnumerator {
    async fn enumerate(
        &self,
        credentials: &TemporaryCredentials,
    ) -> Result<Vec<Volume>, ShrinkError> {
        Ok(self
            .volumes
            .get(&credentials.access_key)
            .cloned()
            .unwrap_or_default())
    }
}

pub struct FakeIdentity(pub &'static str);

#[async_trait]
impl Identify for FakeIdentity {
    async fn current_account_id(&self) -> Result<String, ShrinkError> {
        Ok(self.0.to_string())
    }
}

#[derive(Default)]
pub struct FakeEngine {
    pub started: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl StartExecution for FakeEngine {
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: String,
    ) -> Result<String, ShrinkError> {
        self.started
            .lock()
            .unwrap()
            .push((state_machine_arn.to_string(), input));
        Ok(format!("{}:execution-1", state_machine_arn))
    }
}
