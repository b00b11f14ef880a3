use crate::ec2_volume_client::Enumerate;
use crate::error::ShrinkError;
use crate::model::{Account, Record, Volume};
use crate::record_store::{Collection, RecordStore};
use crate::sts_client::Exchange;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

const INSERT_EVENT: &str = "INSERT";

#[derive(Debug, Deserialize)]
struct StreamRecord {
    #[serde(rename = "eventName", default)]
    event_name: Option<String>,
    #[serde(default)]
    dynamodb: Option<StreamPayload>,
}

#[derive(Debug, Deserialize)]
struct StreamPayload {
    #[serde(rename = "NewImage", default)]
    new_image: Option<HashMap<String, StreamAttribute>>,
}

#[derive(Debug, Deserialize)]
struct StreamAttribute {
    #[serde(rename = "S", default)]
    s: Option<String>,
}

impl StreamRecord {
    /// The typed new image of an insert, flattened to a plain account record.
    fn into_inserted_account(self) -> Option<Record> {
        if self.event_name.as_deref() != Some(INSERT_EVENT) {
            return None;
        }
        let image = self.dynamodb?.new_image?;
        let string = |name: &str| {
            image
                .get(name)
                .and_then(|attribute| attribute.s.clone())
                .map_or(Value::Null, Value::String)
        };
        let mut record = Record::new();
        record.insert("accountId".to_string(), string("accountId"));
        record.insert("externalId".to_string(), string("externalId"));
        Some(record)
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DiscoveryOutput {
    pub items: Vec<Volume>,
}

pub struct Discoverer<S, X, E> {
    store: S,
    exchange: X,
    enumerator: E,
}

impl<S, X, E> Discoverer<S, X, E>
where
    S: RecordStore + Sync,
    X: Exchange + Sync,
    E: Enumerate + Sync,
{
    pub fn new(store: S, exchange: X, enumerator: E) -> Self {
        Discoverer {
            store,
            exchange,
            enumerator,
        }
    }

    pub async fn discover(&self, event: &Value) -> Result<DiscoveryOutput, ShrinkError> {
        tracing::info!(event = %event, "Starting discovery");

        let mut items = Vec::new();
        for candidate in self.resolve_accounts(event).await? {
            let account = match Account::from_record(&candidate) {
                Some(account) => account,
                None => {
                    let record = Value::Object(candidate);
                    tracing::warn!(record = %record, "Skipping invalid account record");
                    continue;
                }
            };
            match self.discover_account(&account).await {
                Ok(volumes) => items.extend(volumes),
                Err(error) => tracing::error!(
                    account_id = %account.account_id,
                    error = %error,
                    "Failed to discover account"
                ),
            }
        }

        let records = items
            .iter()
            .map(Volume::to_record)
            .collect::<Result<Vec<_>, _>>()?;
        self.store.put_many(Collection::Volumes, records).await?;
        Ok(DiscoveryOutput { items })
    }

    async fn resolve_accounts(&self, event: &Value) -> Result<Vec<Record>, ShrinkError> {
        if let Some(accounts) = event.get("accounts") {
            let accounts: Vec<Value> = serde_json::from_value(accounts.clone())?;
            return Ok(accounts
                .into_iter()
                .map(|account| match account {
                    Value::Object(record) => record,
                    _ => Record::new(),
                })
                .collect());
        }

        if let Some(records) = event.get("Records") {
            let records: Vec<StreamRecord> = serde_json::from_value(records.clone())?;
            let accounts: Vec<Record> = records
                .into_iter()
                .filter_map(StreamRecord::into_inserted_account)
                .collect();
            tracing::info!(count = accounts.len(), "Triggered by DynamoDB Stream. Found new accounts");
            return Ok(accounts);
        }

        tracing::info!("No specific target found. Scanning all accounts");
        self.store.scan_all(Collection::Accounts).await
    }

    async fn discover_account(&self, account: &Account) -> Result<Vec<Volume>, ShrinkError> {
        let credentials = self
            .exchange
            .assume(&account.account_id, &account.external_id)
            .await?;
        self.enumerator.enumerate(&credentials).await
    }
}
