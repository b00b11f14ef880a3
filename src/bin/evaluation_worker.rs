use cloud_shrink::aws;
use cloud_shrink::config::Config;
use cloud_shrink::evaluation::{EvaluationOutput, Evaluator};
use cloud_shrink::record_store::{DynamoRecordStore, RecordStore};
use cloud_shrink::telemetry;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use rusoto_core::Region;
use rusoto_dynamodb::DynamoDbClient;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = Config::from_env();

    let dynamo = aws::client(|http, credentials| {
        DynamoDbClient::new_with(http, credentials, Region::default())
    })?;
    let evaluator = Evaluator::new(DynamoRecordStore::new_with_client(dynamo, config.tables));

    lambda_runtime::run(service_fn(|event| evaluation_handler(event, &evaluator))).await?;
    Ok(())
}

async fn evaluation_handler<S>(
    event: LambdaEvent<Value>,
    evaluator: &Evaluator<S>,
) -> Result<EvaluationOutput, Error>
where
    S: RecordStore + Sync,
{
    Ok(evaluator.evaluate(&event.payload).await?)
}
