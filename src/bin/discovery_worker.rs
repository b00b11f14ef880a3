use cloud_shrink::aws;
use cloud_shrink::config::Config;
use cloud_shrink::discovery::{Discoverer, DiscoveryOutput};
use cloud_shrink::ec2_volume_client::{Ec2Enumerator, Enumerate};
use cloud_shrink::record_store::{DynamoRecordStore, RecordStore};
use cloud_shrink::sts_client::{Exchange, StsCredentialClient};
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
    let sts = aws::client(|http, credentials| {
        StsClient::new_with(http, credentials, region.clone())
    })?;

    let store = DynamoRecordStore::new_with_client(dynamo, config.tables);
    let exchange = StsCredentialClient::new_with_client(sts, config.satellite_role_name);
    let discoverer = Discoverer::new(store, exchange, Ec2Enumerator::new(region));

    lambda_runtime::run(service_fn(|event| discovery_handler(event, &discoverer))).await?;
    Ok(())
}

async fn discovery_handler<S, X, E>(
    event: LambdaEvent<Value>,
    discoverer: &Discoverer<S, X, E>,
) -> Result<DiscoveryOutput, Error>
where
    S: RecordStore + Sync,
    X: Exchange + Sync,
    E: Enumerate + Sync,
{
    Ok(discoverer.discover(&event.payload).await?)
}
