use crate::error::ShrinkError;
use async_trait::async_trait;
use rusoto_stepfunctions::{StartExecutionInput, StepFunctions, StepFunctionsClient};
use serde::Serialize;
use serde_json::Value;

#[async_trait]
pub trait StartExecution {
    /// Returns the execution handle of the started run.
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: String,
    ) -> Result<String, ShrinkError>;
}

pub struct StepFunctionsEngine {
    client: StepFunctionsClient,
}

impl StepFunctionsEngine {
    pub fn new_with_client(client: StepFunctionsClient) -> Self {
        StepFunctionsEngine { client }
    }
}

#[async_trait]
impl StartExecution for StepFunctionsEngine {
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: String,
    ) -> Result<String, ShrinkError> {
        let output = self
            .client
            .start_execution(StartExecutionInput {
                state_machine_arn: state_machine_arn.to_string(),
                input: Some(input),
                ..StartExecutionInput::default()
            })
            .await?;
        Ok(output.execution_arn)
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct TriggerOutput {
    #[serde(rename = "executionArn")]
    pub execution_arn: String,
}

pub struct WorkflowTrigger<E> {
    state_machine_arn: Option<String>,
    engine: E,
}

impl<E> WorkflowTrigger<E>
where
    E: StartExecution + Sync,
{
    pub fn new(state_machine_arn: Option<String>, engine: E) -> Self {
        WorkflowTrigger {
            state_machine_arn,
            engine,
        }
    }

    pub async fn trigger(&self, event: &Value) -> Result<TriggerOutput, ShrinkError> {
        tracing::info!(event = %event, "Triggering workflow");
        let state_machine_arn = self
            .state_machine_arn
            .as_deref()
            .ok_or(ShrinkError::MissingConfig("STATE_MACHINE_ARN"))?;
        let execution_arn = self
            .engine
            .start_execution(state_machine_arn, serde_json::to_string(event)?)
            .await?;
        Ok(TriggerOutput { execution_arn })
    }
}
