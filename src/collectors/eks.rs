use anyhow::Result;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_eks as eks;
use tracing::info;

use crate::collector_core::{sdk_config, Cell, Collector, Table};

pub const COLUMNS: &[&str] = &["Cluster Name"];

pub struct EksClusterCollector {
    credentials: Credentials,
}

impl EksClusterCollector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl Collector for EksClusterCollector {
    fn name(&self) -> &'static str {
        "eks-clusters"
    }

    fn sheet(&self) -> &'static str {
        "EKS"
    }

    async fn discover(&self, regions: &[String]) -> Result<Table> {
        let mut out = Table::new(COLUMNS);
        for region in regions {
            info!(%region, "listing EKS clusters");
            let conf = sdk_config(&self.credentials, region).await;
            let client = eks::Client::new(&conf);

            let before = out.len();
            let mut token: Option<String> = None;
            loop {
                let resp = client
                    .list_clusters()
                    .set_next_token(token.clone())
                    .send()
                    .await?;

                for cluster in resp.clusters() {
                    out.push(vec![Cell::from(cluster.as_str())]);
                }

                token = resp.next_token().map(|s| s.to_string());
                if token.is_none() {
                    break;
                }
            }
            info!(%region, count = out.len() - before, "EKS clusters found");
        }
        Ok(out)
    }
}
