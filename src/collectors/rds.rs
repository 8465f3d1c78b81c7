use anyhow::Result;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_rds as rds;
use tracing::info;

use crate::collector_core::{sdk_config, Cell, Collector, Table};

pub const COLUMNS: &[&str] = &["DB Instance Identifier", "DB Engine"];

pub struct RdsInstanceCollector {
    credentials: Credentials,
}

impl RdsInstanceCollector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

pub fn flatten_db_instance(instance: &rds::types::DbInstance) -> Vec<Cell> {
    vec![
        Cell::from(instance.db_instance_identifier().unwrap_or_default()),
        Cell::from(instance.engine().unwrap_or_default()),
    ]
}

#[async_trait]
impl Collector for RdsInstanceCollector {
    fn name(&self) -> &'static str {
        "rds-instances"
    }

    fn sheet(&self) -> &'static str {
        "RDS"
    }

    async fn discover(&self, regions: &[String]) -> Result<Table> {
        let mut out = Table::new(COLUMNS);
        for region in regions {
            info!(%region, "listing RDS instances");
            let conf = sdk_config(&self.credentials, region).await;
            let client = rds::Client::new(&conf);

            let before = out.len();
            let mut marker: Option<String> = None;
            loop {
                let resp = client
                    .describe_db_instances()
                    .set_marker(marker.clone())
                    .send()
                    .await?;

                for instance in resp.db_instances() {
                    out.push(flatten_db_instance(instance));
                }

                marker = resp.marker().map(|s| s.to_string());
                if marker.is_none() {
                    break;
                }
            }
            info!(%region, count = out.len() - before, "RDS instances found");
        }
        Ok(out)
    }
}
