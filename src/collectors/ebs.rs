use anyhow::Result;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_ec2 as ec2;
use tracing::info;

use crate::collector_core::{sdk_config, Cell, Collector, Table};

pub const COLUMNS: &[&str] = &["Volume ID", "Size", "State", "Region"];

pub struct EbsVolumeCollector {
    credentials: Credentials,
}

impl EbsVolumeCollector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

pub fn flatten_volume(volume: &ec2::types::Volume, region: &str) -> Vec<Cell> {
    vec![
        Cell::from(volume.volume_id().unwrap_or_default()),
        Cell::from(volume.size()),
        Cell::from(volume.state().map(|s| s.as_str()).unwrap_or_default()),
        Cell::from(region),
    ]
}

#[async_trait]
impl Collector for EbsVolumeCollector {
    fn name(&self) -> &'static str {
        "ebs-volumes"
    }

    fn sheet(&self) -> &'static str {
        "EC2-Volumes"
    }

    async fn discover(&self, regions: &[String]) -> Result<Table> {
        let mut out = Table::new(COLUMNS);
        for region in regions {
            info!(%region, "listing EBS volumes");
            let conf = sdk_config(&self.credentials, region).await;
            let client = ec2::Client::new(&conf);

            let before = out.len();
            let mut token: Option<String> = None;
            loop {
                let resp = client
                    .describe_volumes()
                    .set_next_token(token.clone())
                    .send()
                    .await?;

                for volume in resp.volumes() {
                    out.push(flatten_volume(volume, region));
                }

                token = resp.next_token().map(|s| s.to_string());
                if token.is_none() {
                    break;
                }
            }
            info!(%region, count = out.len() - before, "EBS volumes found");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{Volume, VolumeState};

    #[test]
    fn flattens_volume_fields() {
        let volume = Volume::builder()
            .volume_id("vol-0abc")
            .size(8)
            .state(VolumeState::InUse)
            .build();
        let row = flatten_volume(&volume, "sa-east-1");
        assert_eq!(
            row,
            vec![
                Cell::Text("vol-0abc".into()),
                Cell::Int(8),
                Cell::Text("in-use".into()),
                Cell::Text("sa-east-1".into()),
            ]
        );
    }
}
