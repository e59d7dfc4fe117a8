//! SWORD deposit client
//!
//! Performs the client side of the SWORD create-resource exchange: a single
//! authenticated POST of the package archive to a deposit point's endpoint,
//! accepted on any 2xx response. One attempt per call; retry policy belongs
//! to the coordinator, which currently retries nothing.

use crate::core::config::DepositPoint;
use crate::core::error::DepositError;
use crate::core::traits::Depositor;
use crate::packaging::DepositPackage;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::time::Duration;

/// SWORD packaging format announced with each deposit
pub const METS_PACKAGING: &str = "http://purl.org/net/sword-types/METSDSpaceSIP";

/// Header carrying the optional deposit-point API key
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Maximum number of response-body characters copied into an error message
const BODY_SNIPPET_LEN: usize = 200;

/// HTTP client for SWORD deposits
///
/// The timeout bounds the whole request; an unresponsive endpoint surfaces
/// as [`DepositError::Timeout`] rather than blocking the dispatch run.
pub struct SwordClient {
    http: reqwest::Client,
}

impl SwordClient {
    /// Create a client with the given per-request timeout
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Depositor for SwordClient {
    async fn deposit(
        &self,
        package: &DepositPackage,
        point: &DepositPoint,
    ) -> Result<(), DepositError> {
        let archive = tokio::fs::read(&package.archive_path)
            .await
            .map_err(|error| DepositError::UnreadablePackage {
                deposit_point: point.name.clone(),
                message: error.to_string(),
            })?;

        let mut request = self
            .http
            .post(&point.sword_url)
            .basic_auth(&point.username, Some(point.password.expose_secret()))
            .header(reqwest::header::CONTENT_TYPE, "application/zip")
            .header(
                reqwest::header::CONTENT_DISPOSITION,
                format!("filename={}.zip", package.directory_name),
            )
            .header("X-Packaging", METS_PACKAGING)
            .body(archive);
        if let Some(api_key) = &point.api_key {
            request = request.header(API_KEY_HEADER, api_key.expose_secret());
        }

        let response = request.send().await.map_err(|error| {
            if error.is_timeout() {
                DepositError::Timeout {
                    deposit_point: point.name.clone(),
                }
            } else {
                DepositError::Network {
                    deposit_point: point.name.clone(),
                    message: error.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DepositError::AuthenticationFailed {
                deposit_point: point.name.clone(),
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DepositError::Rejected {
                deposit_point: point.name.clone(),
                status: status.as_u16(),
                message: body.chars().take(BODY_SNIPPET_LEN).collect(),
            });
        }

        tracing::info!(
            deposit_point = %point.name,
            status = status.as_u16(),
            "deposit accepted"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::DepositPointType;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use secrecy::SecretString;
    use std::path::Path;
    use tempfile::TempDir;

    fn package_in(dir: &Path) -> DepositPackage {
        let archive_path = dir.join("deposit.zip");
        std::fs::write(&archive_path, b"PK\x03\x04test").unwrap();
        DepositPackage {
            directory_name: "sword-1-42".to_string(),
            dir: dir.to_path_buf(),
            archive_path,
            metadata_path: dir.join("mets.xml"),
        }
    }

    fn point(url: String, api_key: Option<&str>) -> DepositPoint {
        DepositPoint {
            id: 10,
            name: "Test Repository".to_string(),
            point_type: DepositPointType::Automatic,
            sword_url: url,
            username: "depositor".to_string(),
            password: SecretString::new("hunter2hunter2".into()),
            api_key: api_key.map(|key| SecretString::new(key.into())),
        }
    }

    #[tokio::test]
    async fn test_deposit_accepted_on_created() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/sword/deposit")
                .header("X-Packaging", METS_PACKAGING)
                .header_exists("authorization");
            then.status(201);
        });

        let work = TempDir::new().unwrap();
        let client = SwordClient::new(Duration::from_secs(5)).unwrap();
        let result = client
            .deposit(
                &package_in(work.path()),
                &point(format!("{}/sword/deposit", server.base_url()), None),
            )
            .await;

        assert!(result.is_ok());
        mock.assert();
    }

    #[tokio::test]
    async fn test_deposit_sends_api_key_header() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/sword/deposit")
                .header(API_KEY_HEADER, "secret-api-key");
            then.status(200);
        });

        let work = TempDir::new().unwrap();
        let client = SwordClient::new(Duration::from_secs(5)).unwrap();
        let result = client
            .deposit(
                &package_in(work.path()),
                &point(
                    format!("{}/sword/deposit", server.base_url()),
                    Some("secret-api-key"),
                ),
            )
            .await;

        assert!(result.is_ok());
        mock.assert();
    }

    #[tokio::test]
    async fn test_deposit_unauthorized_maps_to_auth_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/sword/deposit");
            then.status(401);
        });

        let work = TempDir::new().unwrap();
        let client = SwordClient::new(Duration::from_secs(5)).unwrap();
        let error = client
            .deposit(
                &package_in(work.path()),
                &point(format!("{}/sword/deposit", server.base_url()), None),
            )
            .await
            .unwrap_err();

        assert_eq!(error.code(), "AUTHENTICATION_FAILED");
        assert_eq!(error.deposit_point(), "Test Repository");
    }

    #[tokio::test]
    async fn test_deposit_server_error_maps_to_rejected() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/sword/deposit");
            then.status(500).body("repository unavailable");
        });

        let work = TempDir::new().unwrap();
        let client = SwordClient::new(Duration::from_secs(5)).unwrap();
        let error = client
            .deposit(
                &package_in(work.path()),
                &point(format!("{}/sword/deposit", server.base_url()), None),
            )
            .await
            .unwrap_err();

        match error {
            DepositError::Rejected { status, message, .. } => {
                assert_eq!(status, 500);
                assert!(message.contains("repository unavailable"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_deposit_times_out_on_unresponsive_endpoint() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/sword/deposit");
            then.status(201).delay(Duration::from_secs(5));
        });

        let work = TempDir::new().unwrap();
        let client = SwordClient::new(Duration::from_millis(250)).unwrap();
        let error = client
            .deposit(
                &package_in(work.path()),
                &point(format!("{}/sword/deposit", server.base_url()), None),
            )
            .await
            .unwrap_err();

        assert_eq!(error.code(), "TIMEOUT");
    }

    #[tokio::test]
    async fn test_deposit_unreachable_endpoint_maps_to_network_error() {
        let work = TempDir::new().unwrap();
        let client = SwordClient::new(Duration::from_secs(2)).unwrap();
        // Port 1 is never listening locally.
        let error = client
            .deposit(
                &package_in(work.path()),
                &point("http://127.0.0.1:1/sword/deposit".to_string(), None),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            error,
            DepositError::Network { .. } | DepositError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn test_deposit_missing_archive_is_unreadable_package() {
        let server = MockServer::start_async().await;
        let work = TempDir::new().unwrap();
        let package = DepositPackage {
            directory_name: "sword-1-42".to_string(),
            dir: work.path().to_path_buf(),
            archive_path: work.path().join("never-created.zip"),
            metadata_path: work.path().join("mets.xml"),
        };

        let client = SwordClient::new(Duration::from_secs(5)).unwrap();
        let error = client
            .deposit(&package, &point(server.base_url(), None))
            .await
            .unwrap_err();

        assert_eq!(error.code(), "UNREADABLE_PACKAGE");
    }
}
