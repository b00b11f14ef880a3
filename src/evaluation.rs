use crate::error::ShrinkError;
use crate::model::Record;
use crate::record_store::{Collection, RecordStore};
use bigdecimal::BigDecimal;
use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, PartialEq, Serialize)]
pub struct EvaluationOutput {
    pub items: Vec<Record>,
}

pub struct Evaluator<S> {
    store: S,
}

impl<S> Evaluator<S>
where
    S: RecordStore + Sync,
{
    pub fn new(store: S) -> Self {
        Evaluator { store }
    }

    /// Recomputes `eligible` on every volume and writes all of them back.
    pub async fn evaluate(&self, event: &Value) -> Result<EvaluationOutput, ShrinkError> {
        tracing::info!(event = %event, "Evaluating policies");
        let policies = self.store.scan_all(Collection::Policies).await?;
        let volumes = self.store.scan_all(Collection::Volumes).await?;

        let mut updated = Vec::with_capacity(volumes.len());
        for mut volume in volumes {
            let eligible = is_eligible(&volume, &policies)?;
            volume.insert("eligible".to_string(), Value::Bool(eligible));
            updated.push(volume);
        }

        self.store
            .put_many(Collection::Volumes, updated.clone())
            .await?;
        Ok(EvaluationOutput { items: updated })
    }
}

/// Only the first policy in scan order is consulted.
pub fn is_eligible(volume: &Record, policies: &[Record]) -> Result<bool, ShrinkError> {
    let policy = match policies.first() {
        Some(policy) => policy,
        None => return Ok(false),
    };
    Ok(decimal(volume, "sizeGb")? >= decimal(policy, "minSizeGb")?)
}

fn decimal(record: &Record, field: &'static str) -> Result<BigDecimal, ShrinkError> {
    match record.get(field) {
        None => Ok(BigDecimal::from(0)),
        Some(Value::Number(number)) => {
            BigDecimal::from_str(&number.to_string()).map_err(|_| ShrinkError::InvalidNumber {
                field,
                value: number.to_string(),
            })
        }
        Some(other) => Err(ShrinkError::InvalidNumber {
            field,
            value: other.to_string(),
        }),
    }
}
