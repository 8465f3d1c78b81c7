pub mod ebs;
pub mod ec2;
pub mod eks;
pub mod rds;
pub mod s3;
pub mod snapshots;

use std::sync::Arc;

use aws_credential_types::Credentials;

use crate::collector_core::Collector;

/// Closed set of services the inventory knows how to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Ec2Instances,
    RdsInstances,
    EksClusters,
    EbsVolumes,
    EbsSnapshots,
    S3Buckets,
}

impl ServiceKind {
    /// Every kind, in report sheet order.
    pub fn all() -> &'static [ServiceKind] {
        &[
            ServiceKind::Ec2Instances,
            ServiceKind::RdsInstances,
            ServiceKind::EksClusters,
            ServiceKind::EbsVolumes,
            ServiceKind::EbsSnapshots,
            ServiceKind::S3Buckets,
        ]
    }
}

pub fn build_collectors(kinds: &[ServiceKind], credentials: &Credentials) -> Vec<Arc<dyn Collector>> {
    kinds
        .iter()
        .map(|kind| -> Arc<dyn Collector> {
            match kind {
                ServiceKind::Ec2Instances => {
                    Arc::new(ec2::Ec2InstanceCollector::new(credentials.clone()))
                }
                ServiceKind::RdsInstances => {
                    Arc::new(rds::RdsInstanceCollector::new(credentials.clone()))
                }
                ServiceKind::EksClusters => {
                    Arc::new(eks::EksClusterCollector::new(credentials.clone()))
                }
                ServiceKind::EbsVolumes => {
                    Arc::new(ebs::EbsVolumeCollector::new(credentials.clone()))
                }
                ServiceKind::EbsSnapshots => {
                    Arc::new(snapshots::EbsSnapshotCollector::new(credentials.clone()))
                }
                ServiceKind::S3Buckets => {
                    Arc::new(s3::S3BucketCollector::new(credentials.clone()))
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collectors_come_out_in_sheet_order() {
        let credentials = Credentials::new("id", "secret", None, None, "test");
        let collectors = build_collectors(ServiceKind::all(), &credentials);
        let sheets: Vec<&str> = collectors.iter().map(|c| c.sheet()).collect();
        assert_eq!(
            sheets,
            vec!["EC2", "RDS", "EKS", "EC2-Volumes", "EC2-Snapshots", "S3-Buckets"]
        );
    }
}
