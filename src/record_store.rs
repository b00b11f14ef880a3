use crate::attribute::{from_item, to_attribute, to_item};
use crate::config::TableNames;
use crate::error::ShrinkError;
use crate::model::Record;
use async_trait::async_trait;
use rusoto_dynamodb::{
    BatchWriteItemInput, DynamoDb, DynamoDbClient, GetItemInput, PutItemInput, PutRequest,
    ScanInput, WriteRequest,
};
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

const BATCH_WRITE_LIMIT: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Accounts,
    Policies,
    Volumes,
    Operations,
}

impl Collection {
    pub fn key_attribute(&self) -> &'static str {
        match self {
            Collection::Accounts => "accountId",
            Collection::Volumes => "volumeId",
            Collection::Policies | Collection::Operations => "id",
        }
    }
}

#[async_trait]
pub trait RecordStore {
    /// Single page only; later pages of a large collection are not read.
    async fn scan_all(&self, collection: Collection) -> Result<Vec<Record>, ShrinkError>;
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Record>, ShrinkError>;
    async fn put(&self, collection: Collection, record: Record) -> Result<(), ShrinkError>;
    async fn put_many(&self, collection: Collection, records: Vec<Record>)
        -> Result<(), ShrinkError>;
}

pub struct DynamoRecordStore {
    client: DynamoDbClient,
    tables: TableNames,
}

impl DynamoRecordStore {
    pub fn new_with_client(client: DynamoDbClient, tables: TableNames) -> Self {
        DynamoRecordStore { client, tables }
    }

    fn table_name(&self, collection: Collection) -> String {
        self.tables.table(collection).to_string()
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn scan_all(&self, collection: Collection) -> Result<Vec<Record>, ShrinkError> {
        let output = self
            .client
            .scan(ScanInput {
                table_name: self.table_name(collection),
                ..ScanInput::default()
            })
            .await?;
        output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(from_item)
            .collect()
    }

    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Record>, ShrinkError> {
        let mut item_key = HashMap::new();
        item_key.insert(
            collection.key_attribute().to_string(),
            to_attribute(&Value::String(key.to_string())),
        );
        let output = self
            .client
            .get_item(GetItemInput {
                table_name: self.table_name(collection),
                key: item_key,
                ..GetItemInput::default()
            })
            .await?;
        output.item.map(from_item).transpose()
    }

    async fn put(&self, collection: Collection, record: Record) -> Result<(), ShrinkError> {
        self.client
            .put_item(PutItemInput {
                table_name: self.table_name(collection),
                item: to_item(&record),
                ..PutItemInput::default()
            })
            .await?;
        Ok(())
    }

    async fn put_many(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<(), ShrinkError> {
        let table_name = self.table_name(collection);
        let records = last_write_per_key(collection, records);
        for chunk in records.chunks(BATCH_WRITE_LIMIT) {
            let requests: Vec<WriteRequest> = chunk
                .iter()
                .map(|record| WriteRequest {
                    put_request: Some(PutRequest {
                        item: to_item(record),
                    }),
                    ..WriteRequest::default()
                })
                .collect();
            let mut request_items = HashMap::new();
            request_items.insert(table_name.clone(), requests);

            let output = self
                .client
                .batch_write_item(BatchWriteItemInput {
                    request_items,
                    ..BatchWriteItemInput::default()
                })
                .await?;

            let unprocessed = output
                .unprocessed_items
                .and_then(|mut items| items.remove(&table_name))
                .unwrap_or_default();
            if !unprocessed.is_empty() {
                tracing::warn!(
                    table = %table_name,
                    count = unprocessed.len(),
                    "Batch write left unprocessed items, writing them individually"
                );
            }
            for put_request in unprocessed.into_iter().filter_map(|request| request.put_request) {
                self.client
                    .put_item(PutItemInput {
                        table_name: table_name.clone(),
                        item: put_request.item,
                        ..PutItemInput::default()
                    })
                    .await?;
            }
        }
        Ok(())
    }
}

/// BatchWriteItem rejects a request that puts the same key twice, so repeated keys collapse
/// to the last record written, kept at the position of the first.
fn last_write_per_key(collection: Collection, records: Vec<Record>) -> Vec<Record> {
    let key_attribute = collection.key_attribute();
    let mut positions = HashMap::new();
    let mut unique: Vec<Record> = Vec::with_capacity(records.len());
    for record in records {
        let key = match record.get(key_attribute) {
            Some(key) => key.to_string(),
            None => {
                unique.push(record);
                continue;
            }
        };
        match positions.entry(key) {
            Entry::Occupied(position) => unique[*position.get()] = record,
            Entry::Vacant(position) => {
                position.insert(unique.len());
                unique.push(record);
            }
        }
    }
    unique
}
