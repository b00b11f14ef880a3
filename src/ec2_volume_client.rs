use async_trait::async_trait;
use rusoto_core::credential::StaticProvider;
use rusoto_core::{HttpClient, Region};
use rusoto_ec2::{DescribeVolumesRequest, Ec2, Ec2Client, Filter};

use crate::error::ShrinkError;
use crate::model::Volume;
use crate::sts_client::TemporaryCredentials;

const MANAGEMENT_TAG_FILTER: &str = "tag:cloudshrink_enable";
const MANAGEMENT_TAG_VALUE: &str = "true";

pub struct Ec2VolumeClient {
    client: Ec2Client,
}

#[async_trait]
pub trait Describe {
    async fn describe_managed_volumes(&self) -> Result<Vec<Volume>, ShrinkError>;
}

#[async_trait]
impl Describe for Ec2VolumeClient {
    /// One record per attachment that survives instance termination.
    async fn describe_managed_volumes(&self) -> Result<Vec<Volume>, ShrinkError> {
        let request = DescribeVolumesRequest {
            filters: Some(vec![Filter {
                name: Some(MANAGEMENT_TAG_FILTER.to_string()),
                values: Some(vec![MANAGEMENT_TAG_VALUE.to_string()]),
            }]),
            ..DescribeVolumesRequest::default()
        };

        let result = self.client.describe_volumes(request).await?;

        let mut volumes = Vec::<Volume>::new();
        for volume in result.volumes.unwrap_or_default() {
            let volume_id = volume.volume_id.ok_or(ShrinkError::MissingValue("VolumeId"))?;
            let size_gb = volume.size.ok_or(ShrinkError::MissingValue("Size"))?;
            for attachment in volume.attachments.unwrap_or_default() {
                if attachment.delete_on_termination.unwrap_or(false) {
                    continue;
                }
                volumes.push(Volume::discovered(
                    volume_id.clone(),
                    attachment
                        .instance_id
                        .ok_or(ShrinkError::MissingValue("InstanceId"))?,
                    size_gb,
                ))
            }
        }
        Ok(volumes)
    }
}

impl Ec2VolumeClient {
    pub fn new_with_client(client: Ec2Client) -> Self {
        Ec2VolumeClient { client }
    }
}

#[async_trait]
pub trait Enumerate {
    async fn enumerate(&self, credentials: &TemporaryCredentials)
        -> Result<Vec<Volume>, ShrinkError>;
}

/// Builds a fresh EC2 client per customer account from its assumed-role credentials.
pub struct Ec2Enumerator {
    region: Region,
}

impl Ec2Enumerator {
    pub fn new(region: Region) -> Self {
        Ec2Enumerator { region }
    }
}

#[async_trait]
impl Enumerate for Ec2Enumerator {
    async fn enumerate(
        &self,
        credentials: &TemporaryCredentials,
    ) -> Result<Vec<Volume>, ShrinkError> {
        let provider = StaticProvider::new(
            credentials.access_key.clone(),
            credentials.secret_key.clone(),
            Some(credentials.session_token.clone()),
            None,
        );
        let client = Ec2Client::new_with(HttpClient::new()?, provider, self.region.clone());
        Ec2VolumeClient::new_with_client(client)
            .describe_managed_volumes()
            .await
    }
}
