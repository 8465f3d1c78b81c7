//! Credentials file loading.
//!
//! The inventory authenticates with a static key pair read once at startup
//! from a YAML file; nothing else (environment, instance profile) is
//! consulted.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use aws_credential_types::Credentials;
use thiserror::Error;

pub const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read credentials file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("credentials file {path} is not valid YAML")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("credentials file {path} is missing required key {key}")]
    MissingKey { path: PathBuf, key: &'static str },
}

/// The access key pair, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl AwsCredentials {
    /// Parse the credentials file and look up both required keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let doc: BTreeMap<String, String> =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let lookup = |key: &'static str| {
            doc.get(key).cloned().ok_or(ConfigError::MissingKey {
                path: path.to_path_buf(),
                key,
            })
        };
        Ok(Self {
            access_key_id: lookup(ACCESS_KEY_ID)?,
            secret_access_key: lookup(SECRET_ACCESS_KEY)?,
        })
    }

    /// Static credentials provider handed to every SDK client.
    pub fn provider(&self) -> Credentials {
        Credentials::new(
            self.access_key_id.clone(),
            self.secret_access_key.clone(),
            None,
            None,
            "credentials-file",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_credentials(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("aws_credentials.yml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_both_keys_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials(
            &dir,
            "AWS_ACCESS_KEY_ID: AKIA_TEST\nAWS_SECRET_ACCESS_KEY: secret_test\n",
        );
        let creds = AwsCredentials::load(&path).unwrap();
        assert_eq!(creds.access_key_id, "AKIA_TEST");
        assert_eq!(creds.secret_access_key, "secret_test");
    }

    #[test]
    fn missing_key_is_a_lookup_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials(&dir, "AWS_ACCESS_KEY_ID: AKIA_TEST\n");
        let err = AwsCredentials::load(&path).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingKey {
                key: SECRET_ACCESS_KEY,
                ..
            }
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_credentials(&dir, "AWS_ACCESS_KEY_ID: [unclosed\n");
        let err = AwsCredentials::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_an_io_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = AwsCredentials::load(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
