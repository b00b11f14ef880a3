use cloud_shrink::aws;
use cloud_shrink::config::Config;
use cloud_shrink::telemetry;
use cloud_shrink::workflow::{StartExecution, StepFunctionsEngine, TriggerOutput, WorkflowTrigger};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use rusoto_core::Region;
use rusoto_stepfunctions::StepFunctionsClient;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = Config::from_env();

    let client = aws::client(|http, credentials| {
        StepFunctionsClient::new_with(http, credentials, Region::default())
    })?;
    // An unset state machine only fails once an event arrives.
    let trigger = WorkflowTrigger::new(
        config.state_machine_arn,
        StepFunctionsEngine::new_with_client(client),
    );

    lambda_runtime::run(service_fn(|event| trigger_handler(event, &trigger))).await?;
    Ok(())
}

async fn trigger_handler<E>(
    event: LambdaEvent<Value>,
    trigger: &WorkflowTrigger<E>,
) -> Result<TriggerOutput, Error>
where
    E: StartExecution + Sync,
{
    Ok(trigger.trigger(&event.payload).await?)
}
