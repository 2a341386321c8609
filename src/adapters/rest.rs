use crate::domain::model::{ListMember, ListResponse, ListSummary};
use crate::domain::ports::{ConfigProvider, ListDataService};
use crate::utils::error::{PatientListError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_REST_PATH: &str = "/ws/rest/v2/patientlist";
const SUMMARY_RESOURCE: &str = "list";
const MEMBER_RESOURCE: &str = "data";
const REPRESENTATION: &str = "default";

/// Patient list endpoints of an OpenMRS server.
pub struct RestListDataService {
    client: Client,
    resource_url: String,
    credentials: Option<(String, String)>,
}

impl RestListDataService {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(session_id) = config.session_id() {
            let cookie = HeaderValue::from_str(&format!("JSESSIONID={}", session_id)).map_err(|e| {
                PatientListError::InvalidConfigValueError {
                    field: "session_id".to_string(),
                    value: session_id.to_string(),
                    reason: e.to_string(),
                }
            })?;
            headers.insert(COOKIE, cookie);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            resource_url: format!(
                "{}{}",
                config.base_url().trim_end_matches('/'),
                config.rest_path().trim_end_matches('/')
            ),
            credentials: config
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
        })
    }

    pub fn resource_url(&self) -> &str {
        &self.resource_url
    }

    async fn get_json<T: DeserializeOwned>(&self, resource: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.resource_url, resource);
        tracing::debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url).query(query);
        if let Some((user, pass)) = &self.credentials {
            request = request.basic_auth(user, Some(pass));
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(PatientListError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ListDataService for RestListDataService {
    async fn fetch_summaries(&self) -> Result<ListResponse<ListSummary>> {
        self.get_json(SUMMARY_RESOURCE, &[("v", REPRESENTATION.to_string())])
            .await
    }

    async fn fetch_members(
        &self,
        list_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<ListResponse<ListMember>> {
        // The paging layer reads `startIndex` as the 1-based page number.
        let query = [
            ("patientList", list_id.to_string()),
            ("startIndex", page.to_string()),
            ("limit", limit.to_string()),
            ("v", REPRESENTATION.to_string()),
        ];
        self.get_json(MEMBER_RESOURCE, &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::collections::HashMap;

    struct MockConfig {
        base_url: String,
        credentials: Option<(String, String)>,
        session_id: Option<String>,
    }

    impl MockConfig {
        fn new(base_url: String) -> Self {
            Self {
                base_url,
                credentials: None,
                session_id: None,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn rest_path(&self) -> &str {
            DEFAULT_REST_PATH
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn credentials(&self) -> Option<(&str, &str)> {
            self.credentials
                .as_ref()
                .map(|(u, p)| (u.as_str(), p.as_str()))
        }

        fn session_id(&self) -> Option<&str> {
            self.session_id.as_deref()
        }

        fn page_limit(&self) -> u32 {
            5
        }

        fn messages(&self) -> HashMap<String, String> {
            HashMap::new()
        }
    }

    #[test]
    fn test_resource_url_joins_without_double_slash() {
        let config = MockConfig::new("http://localhost:8080/openmrs/".to_string());
        let service = RestListDataService::new(&config).unwrap();
        assert_eq!(
            service.resource_url(),
            "http://localhost:8080/openmrs/ws/rest/v2/patientlist"
        );
    }

    #[tokio::test]
    async fn test_fetch_summaries() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/openmrs/ws/rest/v2/patientlist/list")
                .query_param("v", "default");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "results": [
                        {"uuid": "l2", "name": "Discharged"},
                        {"uuid": "l1", "name": "Admitted", "description": "Current inpatients"}
                    ]
                }));
        });

        let config = MockConfig::new(server.url("/openmrs"));
        let service = RestListDataService::new(&config).unwrap();
        let response = service.fetch_summaries().await.unwrap();

        api_mock.assert();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[0].id, "l2");
        assert_eq!(response.results[1].display_name, "Admitted");
    }

    #[tokio::test]
    async fn test_fetch_members_sends_paging_params() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/openmrs/ws/rest/v2/patientlist/data")
                .query_param("patientList", "abc")
                .query_param("startIndex", "2")
                .query_param("limit", "3");
            then.status(200).json_body(serde_json::json!({
                "results": [
                    {"uuid": "m1", "headerContent": "Jane Roe"},
                    {"uuid": "m2"},
                    {"uuid": "m3"}
                ],
                "length": 17
            }));
        });

        let config = MockConfig::new(server.url("/openmrs"));
        let service = RestListDataService::new(&config).unwrap();
        let response = service.fetch_members("abc", 2, 3).await.unwrap();

        api_mock.assert();
        assert_eq!(response.length, 17);
        assert_eq!(response.results.len(), 3);
        assert_eq!(response.results[0].header_content(), Some("Jane Roe"));
    }

    #[tokio::test]
    async fn test_session_and_credentials_are_sent() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ws/rest/v2/patientlist/list")
                .header("Cookie", "JSESSIONID=s3ss10n")
                .header_exists("Authorization");
            then.status(200).json_body(serde_json::json!({"results": []}));
        });

        let mut config = MockConfig::new(server.base_url());
        config.session_id = Some("s3ss10n".to_string());
        config.credentials = Some(("admin".to_string(), "Admin123".to_string()));
        let service = RestListDataService::new(&config).unwrap();

        let response = service.fetch_summaries().await.unwrap();

        api_mock.assert();
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ws/rest/v2/patientlist/list");
            then.status(401);
        });

        let config = MockConfig::new(server.base_url());
        let service = RestListDataService::new(&config).unwrap();
        let err = service.fetch_summaries().await.unwrap_err();

        match err {
            PatientListError::UnexpectedStatus { status, .. } => assert_eq!(status, 401),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ws/rest/v2/patientlist/list");
            then.status(200).body("<html>login</html>");
        });

        let config = MockConfig::new(server.base_url());
        let service = RestListDataService::new(&config).unwrap();
        let err = service.fetch_summaries().await.unwrap_err();

        assert!(matches!(err, PatientListError::SerializationError(_)));
    }
}
