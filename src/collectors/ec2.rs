use anyhow::Result;
use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_ec2 as ec2;
use tracing::info;

use crate::collector_core::{sdk_config, Cell, Collector, Table};

pub const COLUMNS: &[&str] = &["Name", "Instance ID", "Type", "OS", "Region", "State"];

pub struct Ec2InstanceCollector {
    credentials: Credentials,
}

impl Ec2InstanceCollector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

/// The `Name` tag value, empty when the instance carries no such tag.
fn name_tag(tags: &[ec2::types::Tag]) -> &str {
    tags.iter()
        .find(|t| t.key() == Some("Name"))
        .and_then(|t| t.value())
        .unwrap_or_default()
}

pub fn flatten_instance(instance: &ec2::types::Instance, region: &str) -> Vec<Cell> {
    vec![
        Cell::from(name_tag(instance.tags())),
        Cell::from(instance.instance_id().unwrap_or_default()),
        Cell::from(instance.instance_type().map(|t| t.as_str()).unwrap_or_default()),
        Cell::from(instance.platform_details().unwrap_or_default()),
        Cell::from(region),
        Cell::from(
            instance
                .state()
                .and_then(|s| s.name())
                .map(|n| n.as_str())
                .unwrap_or_default(),
        ),
    ]
}

#[async_trait]
impl Collector for Ec2InstanceCollector {
    fn name(&self) -> &'static str {
        "ec2-instances"
    }

    fn sheet(&self) -> &'static str {
        "EC2"
    }

    async fn discover(&self, regions: &[String]) -> Result<Table> {
        let mut out = Table::new(COLUMNS);
        for region in regions {
            info!(%region, "listing EC2 instances");
            let conf = sdk_config(&self.credentials, region).await;
            let client = ec2::Client::new(&conf);

            let before = out.len();
            let mut token: Option<String> = None;
            loop {
                let resp = client
                    .describe_instances()
                    .set_next_token(token.clone())
                    .send()
                    .await?;

                for reservation in resp.reservations() {
                    for instance in reservation.instances() {
                        out.push(flatten_instance(instance, region));
                    }
                }

                token = resp.next_token().map(|s| s.to_string());
                if token.is_none() {
                    break;
                }
            }
            info!(%region, count = out.len() - before, "EC2 instances found");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ec2::types::{Instance, InstanceState, InstanceStateName, InstanceType, Tag};

    fn tagged_instance() -> Instance {
        Instance::builder()
            .tags(Tag::builder().key("env").value("prod").build())
            .tags(Tag::builder().key("Name").value("web-1").build())
            .instance_id("i-0123456789abcdef0")
            .instance_type(InstanceType::T3Micro)
            .platform_details("Linux/UNIX")
            .state(InstanceState::builder().name(InstanceStateName::Running).build())
            .build()
    }

    #[test]
    fn flattens_the_fixed_field_subset() {
        let row = flatten_instance(&tagged_instance(), "us-east-1");
        assert_eq!(
            row,
            vec![
                Cell::Text("web-1".into()),
                Cell::Text("i-0123456789abcdef0".into()),
                Cell::Text("t3.micro".into()),
                Cell::Text("Linux/UNIX".into()),
                Cell::Text("us-east-1".into()),
                Cell::Text("running".into()),
            ]
        );
    }

    #[test]
    fn missing_name_tag_flattens_to_empty_string() {
        let instance = Instance::builder()
            .instance_id("i-0aaa")
            .instance_type(InstanceType::T3Micro)
            .platform_details("Linux/UNIX")
            .state(InstanceState::builder().name(InstanceStateName::Stopped).build())
            .build();
        let row = flatten_instance(&instance, "eu-west-1");
        assert_eq!(row[0], Cell::Text(String::new()));
        assert_eq!(row[5], Cell::Text("stopped".into()));
    }
}
