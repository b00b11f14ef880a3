use crate::error::ShrinkError;
use async_trait::async_trait;
use rusoto_sts::{AssumeRoleRequest, GetCallerIdentityRequest, Sts, StsClient};

const SESSION_NAME: &str = "cloudshrink-discovery";

/// Short-lived credentials scoped to one customer account.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporaryCredentials {
    pub access_key: String,
    pub secret_key: String,
    pub session_token: String,
}

#[async_trait]
pub trait Exchange {
    /// Both identifiers are required; credentials are never requested without the external id.
    async fn assume(
        &self,
        account_id: &str,
        external_id: &str,
    ) -> Result<TemporaryCredentials, ShrinkError>;
}

#[async_trait]
pub trait Identify {
    async fn current_account_id(&self) -> Result<String, ShrinkError>;
}

pub struct StsCredentialClient {
    client: StsClient,
    role_name: String,
}

impl StsCredentialClient {
    pub fn new_with_client(client: StsClient, role_name: String) -> Self {
        StsCredentialClient { client, role_name }
    }

    fn role_arn(&self, account_id: &str) -> String {
        format!("arn:aws:iam::{}:role/{}", account_id, self.role_name)
    }
}

#[async_trait]
impl Exchange for StsCredentialClient {
    async fn assume(
        &self,
        account_id: &str,
        external_id: &str,
    ) -> Result<TemporaryCredentials, ShrinkError> {
        let request = AssumeRoleRequest {
            role_arn: self.role_arn(account_id),
            role_session_name: SESSION_NAME.to_string(),
            external_id: Some(external_id.to_string()),
            ..AssumeRoleRequest::default()
        };

        let credentials = self
            .client
            .assume_role(request)
            .await?
            .credentials
            .ok_or_else(|| ShrinkError::MissingCredentials(account_id.to_string()))?;

        Ok(TemporaryCredentials {
            access_key: credentials.access_key_id,
            secret_key: credentials.secret_access_key,
            session_token: credentials.session_token,
        })
    }
}

#[async_trait]
impl Identify for StsCredentialClient {
    async fn current_account_id(&self) -> Result<String, ShrinkError> {
        self.client
            .get_caller_identity(GetCallerIdentityRequest {})
            .await?
            .account
            .ok_or(ShrinkError::MissingValue("Account"))
    }
}
