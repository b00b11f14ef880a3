use rusoto_core::request::TlsError;
use rusoto_core::RusotoError;
use rusoto_dynamodb::{BatchWriteItemError, GetItemError, PutItemError, ScanError};
use rusoto_ec2::DescribeVolumesError;
use rusoto_stepfunctions::StartExecutionError;
use rusoto_sts::{AssumeRoleError, GetCallerIdentityError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShrinkError {
    #[error("Value is None: {0}")]
    MissingValue(&'static str),
    #[error("{0} not configured")]
    MissingConfig(&'static str),
    #[error("No credentials returned for account {0}")]
    MissingCredentials(String),
    #[error("Missing path parameter: {0}")]
    MissingPathParameter(&'static str),
    #[error("Expected a JSON object, got {0}")]
    InvalidRecord(String),
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Unsupported attribute type for {0}")]
    UnsupportedAttribute(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tls(#[from] TlsError),
    #[error(transparent)]
    Scan(#[from] RusotoError<ScanError>),
    #[error(transparent)]
    GetItem(#[from] RusotoError<GetItemError>),
    #[error(transparent)]
    PutItem(#[from] RusotoError<PutItemError>),
    #[error(transparent)]
    BatchWriteItem(#[from] RusotoError<BatchWriteItemError>),
    #[error(transparent)]
    AssumeRole(#[from] RusotoError<AssumeRoleError>),
    #[error(transparent)]
    GetCallerIdentity(#[from] RusotoError<GetCallerIdentityError>),
    #[error(transparent)]
    DescribeVolumes(#[from] RusotoError<DescribeVolumesError>),
    #[error(transparent)]
    StartExecution(#[from] RusotoError<StartExecutionError>),
}
