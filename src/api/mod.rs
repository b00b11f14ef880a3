pub mod request;
pub mod response;
pub mod routes;

use crate::error::ShrinkError;
use crate::model::{OperationStatus, Record};
use crate::record_store::{Collection, RecordStore};
use crate::sts_client::Identify;
use request::ApiRequest;
use response::ApiResponse;
use routes::Route;
use serde::Serialize;
use serde_json::Value;

const DEFAULT_VOLUME_FILTER: &str = "eligible";
const SAVINGS_PLACEHOLDER: &str = "0 GB-month";

#[derive(Debug, Serialize)]
struct Items {
    items: Vec<Record>,
}

#[derive(Debug, Serialize)]
struct Dashboard {
    savings: &'static str,
    protected_volumes: usize,
    account_count: usize,
    config: DashboardConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardConfig {
    current_account_id: String,
    external_id: String,
}

pub struct ApiHandler<S, I> {
    store: S,
    identity: I,
    external_id: String,
}

impl<S, I> ApiHandler<S, I>
where
    S: RecordStore + Sync,
    I: Identify + Sync,
{
    pub fn new(store: S, identity: I, external_id: String) -> Self {
        ApiHandler {
            store,
            identity,
            external_id,
        }
    }

    /// Never fails: routing errors become a 500 carrying the error text.
    pub async fn handle(&self, event: Value) -> ApiResponse {
        tracing::info!(event = %event, "Received event");
        match self.route(event).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(error = %error, "Unhandled error");
                ApiResponse::error(&error.to_string(), 500)
            }
        }
    }

    async fn route(&self, event: Value) -> Result<ApiResponse, ShrinkError> {
        let request: ApiRequest = serde_json::from_value(event)?;
        let route = match Route::resolve(&request.route_key()) {
            Some(route) => route,
            None => return Ok(ApiResponse::error("Not found", 404)),
        };

        match route {
            Route::ListAccounts => self.list(Collection::Accounts).await,
            Route::CreateAccount => self.create(Collection::Accounts, &request).await,
            Route::ListPolicies => self.list(Collection::Policies).await,
            Route::CreatePolicy => self.create(Collection::Policies, &request).await,
            Route::ListVolumes => self.list_volumes(&request).await,
            Route::CreateOperation => self.create_operation(&request).await,
            Route::GetOperation => self.get_operation(&request).await,
            Route::AcceptScan => {
                ApiResponse::ok(&serde_json::json!({"message": "Scan trigger accepted"}))
            }
            Route::Dashboard => self.dashboard().await,
        }
    }

    async fn list(&self, collection: Collection) -> Result<ApiResponse, ShrinkError> {
        let items = self.store.scan_all(collection).await?;
        ApiResponse::ok(&Items { items })
    }

    async fn create(
        &self,
        collection: Collection,
        request: &ApiRequest,
    ) -> Result<ApiResponse, ShrinkError> {
        let record = request.body_record()?;
        self.store.put(collection, record.clone()).await?;
        ApiResponse::created(&record)
    }

    async fn list_volumes(&self, request: &ApiRequest) -> Result<ApiResponse, ShrinkError> {
        let filter = request
            .query_parameter("filter")
            .unwrap_or(DEFAULT_VOLUME_FILTER);
        let items = self
            .store
            .scan_all(Collection::Volumes)
            .await?
            .into_iter()
            .filter(|volume| matches_filter(volume, filter))
            .collect();
        ApiResponse::ok(&Items { items })
    }

    async fn create_operation(&self, request: &ApiRequest) -> Result<ApiResponse, ShrinkError> {
        let mut operation = request.body_record()?;
        let id = operation.get("volumeId").cloned().unwrap_or(Value::Null);
        operation.insert("id".to_string(), id);
        operation.insert(
            "status".to_string(),
            serde_json::to_value(OperationStatus::Queued)?,
        );
        self.store
            .put(Collection::Operations, operation.clone())
            .await?;
        ApiResponse::created(&operation)
    }

    async fn get_operation(&self, request: &ApiRequest) -> Result<ApiResponse, ShrinkError> {
        let id = request
            .path_parameter("id")
            .ok_or(ShrinkError::MissingPathParameter("id"))?;
        let item = self.store.get(Collection::Operations, id).await?;
        ApiResponse::ok(&item.unwrap_or_default())
    }

    async fn dashboard(&self) -> Result<ApiResponse, ShrinkError> {
        let accounts = self.store.scan_all(Collection::Accounts).await?;
        let volumes = self.store.scan_all(Collection::Volumes).await?;
        let protected_volumes = volumes
            .iter()
            .filter(|volume| eligible_text(volume, "") == "true")
            .count();
        let current_account_id = self.identity.current_account_id().await?;

        ApiResponse::ok(&Dashboard {
            savings: SAVINGS_PLACEHOLDER,
            protected_volumes,
            account_count: accounts.len(),
            config: DashboardConfig {
                current_account_id,
                external_id: self.external_id.clone(),
            },
        })
    }
}

/// `all` keeps everything. Any other filter compares the volume's lowercased eligibility text
/// against whether the filter equals `eligible`, so every value but `eligible` and `all`
/// selects volumes whose flag reads `false`.
pub fn matches_filter(volume: &Record, filter: &str) -> bool {
    filter == "all"
        || eligible_text(volume, "false") == (filter == DEFAULT_VOLUME_FILTER).to_string()
}

fn eligible_text(volume: &Record, missing: &str) -> String {
    match volume.get("eligible") {
        None => missing.to_string(),
        Some(Value::Null) => "none".to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::String(text)) => text.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
    }
}
