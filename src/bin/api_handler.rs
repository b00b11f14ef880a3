use cloud_shrink::api::response::ApiResponse;
use cloud_shrink::api::ApiHandler;
use cloud_shrink::aws;
use cloud_shrink::config::Config;
use cloud_shrink::record_store::{DynamoRecordStore, RecordStore};
use cloud_shrink::sts_client::{Identify, StsCredentialClient};
use cloud_shrink::telemetry;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use rusoto_core::Region;
use rusoto_dynamodb::DynamoDbClient;
use rusoto_sts::StsClient;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = Config::from_env();
    let region = Region::default();

    let dynamo = aws::client(|http, credentials| {
        DynamoDbClient::new_with(http, credentials, region.clone())
    })?;
    let sts = aws::client(|http, credentials| StsClient::new_with(http, credentials, region))?;

    let store = DynamoRecordStore::new_with_client(dynamo, config.tables);
    let identity = StsCredentialClient::new_with_client(sts, config.satellite_role_name);
    let handler = ApiHandler::new(store, identity, config.satellite_external_id);

    lambda_runtime::run(service_fn(|event| api_handler(event, &handler))).await?;
    Ok(())
}

async fn api_handler<S, I>(
    event: LambdaEvent<Value>,
    handler: &ApiHandler<S, I>,
) -> Result<ApiResponse, Error>
where
    S: RecordStore + Sync,
    I: Identify + Sync,
{
    Ok(handler.handle(event.payload).await)
}
