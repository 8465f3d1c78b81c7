use anyhow::Result;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_ec2 as ec2;
use tracing::info;

use crate::collector_core::{sdk_config, Cell, Collector, Table};

pub const COLUMNS: &[&str] = &["Snapshot ID", "Volume Size", "State", "Region"];

pub struct EbsSnapshotCollector {
    credentials: Credentials,
}

impl EbsSnapshotCollector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

pub fn flatten_snapshot(snapshot: &ec2::types::Snapshot, region: &str) -> Vec<Cell> {
    vec![
        Cell::from(snapshot.snapshot_id().unwrap_or_default()),
        Cell::from(snapshot.volume_size()),
        Cell::from(snapshot.state().map(|s| s.as_str()).unwrap_or_default()),
        Cell::from(region),
    ]
}

#[async_trait]
impl Collector for EbsSnapshotCollector {
    fn name(&self) -> &'static str {
        "ebs-snapshots"
    }

    fn sheet(&self) -> &'static str {
        "EC2-Snapshots"
    }

    async fn discover(&self, regions: &[String]) -> Result<Table> {
        let mut out = Table::new(COLUMNS);
        for region in regions {
            info!(%region, "listing EBS snapshots");
            let conf = sdk_config(&self.credentials, region).await;
            let client = ec2::Client::new(&conf);

            let before = out.len();
            let mut token: Option<String> = None;
            loop {
                // Own-account snapshots only, never snapshots shared in from
                // other accounts.
                let resp = client
                    .describe_snapshots()
                    .owner_ids("self")
                    .set_next_token(token.clone())
                    .send()
                    .await?;

                for snapshot in resp.snapshots() {
                    out.push(flatten_snapshot(snapshot, region));
                }

                token = resp.next_token().map(|s| s.to_string());
                if token.is_none() {
                    break;
                }
            }
            info!(%region, count = out.len() - before, "EBS snapshots found");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{Snapshot, SnapshotState};

    #[test]
    fn flattens_snapshot_fields() {
        let snapshot = Snapshot::builder()
            .snapshot_id("snap-0def")
            .volume_size(100)
            .state(SnapshotState::Completed)
            .build();
        let row = flatten_snapshot(&snapshot, "us-east-1");
        assert_eq!(
            row,
            vec![
                Cell::Text("snap-0def".into()),
                Cell::Int(100),
                Cell::Text("completed".into()),
                Cell::Text("us-east-1".into()),
            ]
        );
    }
}
