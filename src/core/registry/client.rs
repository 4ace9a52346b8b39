// ─── Modrinth Client ───
// Talks to the Modrinth v2 JSON API: project lookup, version lookup and the
// raw artifact download.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::io::StreamReader;
use tracing::debug;

use super::api::{ByteStream, RegistryApi};
use super::model::{ProjectRecord, VersionRecord};
use crate::core::error::{InstallerError, InstallerResult};

pub struct ModrinthClient {
    client: Client,
    base: Url,
}

impl ModrinthClient {
    pub fn new(client: Client, api_base: &str) -> InstallerResult<Self> {
        let base = Url::parse(api_base)
            .map_err(|e| InstallerError::InvalidUrl(format!("{api_base}: {e}")))?;

        if base.cannot_be_a_base() {
            return Err(InstallerError::InvalidUrl(api_base.to_string()));
        }

        Ok(Self { client, base })
    }

    /// Append path segments to the API base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> InstallerResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| InstallerError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a JSON document. A missing resource or a body that is not a JSON
    /// object both count as "not found".
    async fn fetch_document(&self, url: Url, resource: &str) -> InstallerResult<Value> {
        debug!("GET {}", url);

        let resp = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(InstallerError::NotFound {
                resource: resource.to_string(),
            });
        }
        if !status.is_success() {
            return Err(InstallerError::RequestFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        match serde_json::from_str::<Value>(&body) {
            Ok(value) if value.is_object() => Ok(value),
            _ => Err(InstallerError::NotFound {
                resource: format!("{resource} (response is not a JSON object)"),
            }),
        }
    }

    fn decode<T: DeserializeOwned>(document: Value, resource: &str) -> InstallerResult<T> {
        serde_json::from_value(document).map_err(|e| InstallerError::Malformed {
            resource: resource.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RegistryApi for ModrinthClient {
    async fn fetch_project(&self, slug: &str) -> InstallerResult<ProjectRecord> {
        let resource = format!("project '{slug}'");
        let url = self.endpoint(&["v2", "project", slug])?;
        let document = self.fetch_document(url, &resource).await?;
        Self::decode(document, &resource)
    }

    async fn fetch_version(&self, version_id: &str) -> InstallerResult<VersionRecord> {
        let resource = format!("version {version_id}");
        let url = self.endpoint(&["v2", "version", version_id])?;
        let document = self.fetch_document(url, &resource).await?;
        Self::decode(document, &resource)
    }

    async fn fetch_file_bytes(&self, url: &str) -> InstallerResult<ByteStream> {
        debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(InstallerError::RequestFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes_stream().map_err(std::io::Error::other);
        Ok(Box::pin(StreamReader::new(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::http::build_http_client;
    use crate::core::state::InstallerSettings;
    use serde_json::json;
    use tokio::io::AsyncReadExt;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ModrinthClient {
        let settings = InstallerSettings::default();
        let http = build_http_client(&settings).unwrap();
        ModrinthClient::new(http, &server.uri()).unwrap()
    }

    #[test]
    fn endpoint_encodes_segments() {
        let http = Client::new();
        let client = ModrinthClient::new(http, "https://api.modrinth.com/").unwrap();
        let url = client.endpoint(&["v2", "project", "a b"]).unwrap();
        assert_eq!(url.as_str(), "https://api.modrinth.com/v2/project/a%20b");
    }

    #[test]
    fn rejects_unusable_base() {
        assert!(ModrinthClient::new(Client::new(), "not a url").is_err());
        assert!(ModrinthClient::new(Client::new(), "mailto:someone@example.com").is_err());
    }

    #[tokio::test]
    async fn fetch_project_sends_accept_header_and_parses_versions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/project/itemlore"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "AABBCCDD",
                "slug": "itemlore",
                "title": "Item Lore",
                "versions": ["v1", "v2", "v3"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let project = client_for(&server).fetch_project("itemlore").await.unwrap();
        assert_eq!(project.id, "AABBCCDD");
        assert_eq!(project.versions, vec!["v1", "v2", "v3"]);
    }

    #[tokio::test]
    async fn fetch_project_404_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/project/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_project("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn fetch_project_non_object_body_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/project/weird"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_project("weird").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn fetch_project_server_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/project/busy"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_project("busy").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(
            err,
            InstallerError::RequestFailed { status: 503, .. }
        ));
    }

    #[tokio::test]
    async fn fetch_project_without_versions_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/project/bare"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "X" })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_project("bare").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn fetch_version_missing_files_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/version/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "v1",
                "game_versions": ["1.21.3"],
                "loaders": ["fabric"]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_version("v1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn fetch_version_keeps_files_in_listed_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/version/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "v2",
                "version_number": "2.0.1",
                "game_versions": ["1.21.3"],
                "loaders": ["fabric"],
                "files": [
                    { "url": "https://example.com/extra", "filename": "" },
                    { "url": "https://example.com/a.jar", "filename": "a.jar", "primary": true, "size": 3 }
                ]
            })))
            .mount(&server)
            .await;

        let version = client_for(&server).fetch_version("v2").await.unwrap();
        assert_eq!(version.version_number.as_deref(), Some("2.0.1"));
        assert_eq!(version.files.len(), 2);
        assert_eq!(version.files[1].filename, "a.jar");
        assert_eq!(version.files[1].size, Some(3));
    }

    #[tokio::test]
    async fn fetch_file_bytes_streams_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/mod.jar"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04jar".to_vec()))
            .mount(&server)
            .await;

        let url = format!("{}/data/mod.jar", server.uri());
        let mut stream = client_for(&server).fetch_file_bytes(&url).await.unwrap();
        let mut body = Vec::new();
        stream.read_to_end(&mut body).await.unwrap();
        assert_eq!(body, b"PK\x03\x04jar");
    }

    #[tokio::test]
    async fn fetch_file_bytes_error_status_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/gone.jar"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let url = format!("{}/data/gone.jar", server.uri());
        let err = match client_for(&server).fetch_file_bytes(&url).await {
            Ok(_) => panic!("expected a failure"),
            Err(e) => e,
        };
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
