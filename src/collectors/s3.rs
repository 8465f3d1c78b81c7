use anyhow::Result;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3 as s3;
use tracing::info;

use crate::collector_core::{sdk_config, Cell, Collector, Table};

pub const COLUMNS: &[&str] = &["Bucket Name"];

/// Bucket names are a global namespace; the listing goes through one fixed
/// region no matter where the buckets live.
const GLOBAL_REGION: &str = "us-east-1";

pub struct S3BucketCollector {
    credentials: Credentials,
}

impl S3BucketCollector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl Collector for S3BucketCollector {
    fn name(&self) -> &'static str {
        "s3-buckets"
    }

    fn sheet(&self) -> &'static str {
        "S3-Buckets"
    }

    async fn discover(&self, _regions: &[String]) -> Result<Table> {
        info!("listing S3 buckets");
        let conf = sdk_config(&self.credentials, GLOBAL_REGION).await;
        let client = s3::Client::new(&conf);

        let resp = client.list_buckets().send().await?;

        let mut out = Table::new(COLUMNS);
        for bucket in resp.buckets() {
            out.push(vec![Cell::from(bucket.name().unwrap_or_default())]);
        }
        info!(count = out.len(), "S3 buckets found");
        Ok(out)
    }
}
