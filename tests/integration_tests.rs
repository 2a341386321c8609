use anyhow::Result;
use httpmock::prelude::*;
use patient_list::{
    ControllerSettings, ListPageController, LoadOutcome, Navigation, RestListDataService,
    TomlConfig,
};

fn config_for(server: &MockServer) -> Result<TomlConfig> {
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[server]
base_url = "{}"
session_id = "integration"

[page]
limit = 3

[messages]
"patientlist.page" = "Patient lists"
"#,
        server.url("/openmrs")
    ))?;
    Ok(config)
}

#[tokio::test]
async fn test_open_page_and_browse_list_over_http() -> Result<()> {
    let server = MockServer::start();
    let summaries_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/openmrs/ws/rest/v2/patientlist/list")
            .header("Cookie", "JSESSIONID=integration");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "results": [
                    {"uuid": "abc", "name": "Admitted today"},
                    {"uuid": "def", "name": "Awaiting discharge"}
                ]
            }));
    });
    let page_two_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/openmrs/ws/rest/v2/patientlist/data")
            .query_param("patientList", "abc")
            .query_param("startIndex", "2")
            .query_param("limit", "3");
        then.status(200).json_body(serde_json::json!({
            "results": [
                {"uuid": "m1", "headerContent": "Jane Roe", "bodyContent": "Ward 2"},
                {"uuid": "m2", "headerContent": "John Doe"},
                {"uuid": "m3", "headerContent": "Ann Lee"}
            ],
            "length": 17
        }));
    });

    let config = config_for(&server)?;
    let service = RestListDataService::new(&config)?;
    let controller = ListPageController::new(service, config.controller_settings());

    assert_eq!(controller.open().await, LoadOutcome::Applied);
    summaries_mock.assert();
    assert_eq!(controller.identity().unwrap().title, "Patient lists");

    let view = controller.view().snapshot().await;
    assert_eq!(view.page.limit, 3);
    assert_eq!(view.page.current_page, 1);
    assert_eq!(view.summaries.len(), 2);
    assert_eq!(view.summaries[1].display_name, "Awaiting discharge");

    assert_eq!(
        controller.load_list_members("abc", 2, 3).await,
        LoadOutcome::Applied
    );
    page_two_mock.assert();

    let view = controller.view().snapshot().await;
    assert_eq!(view.members.len(), 3);
    assert_eq!(view.members[0].header_content(), Some("Jane Roe"));
    assert_eq!(view.page.total_results, 17);
    assert_eq!(view.display_range(), Some((4, 6)));
    assert_eq!(view.total_pages(), 6);

    assert_eq!(controller.cancel().await, Navigation::Stay);
    Ok(())
}

#[tokio::test]
async fn test_server_failure_is_absorbed_by_controller() -> Result<()> {
    let server = MockServer::start();
    let summaries_mock = server.mock(|when, then| {
        when.method(GET).path("/openmrs/ws/rest/v2/patientlist/list");
        then.status(500);
    });
    let members_mock = server.mock(|when, then| {
        when.method(GET).path("/openmrs/ws/rest/v2/patientlist/data");
        then.status(503);
    });

    let config = config_for(&server)?;
    let service = RestListDataService::new(&config)?;
    let controller = ListPageController::new(service, ControllerSettings::default());

    assert_eq!(controller.open().await, LoadOutcome::Failed);
    assert_eq!(controller.select_list("abc").await, LoadOutcome::Failed);
    summaries_mock.assert();
    members_mock.assert();

    let view = controller.view().snapshot().await;
    assert!(view.summaries.is_empty());
    assert!(view.members.is_empty());
    assert_eq!(view.page.total_results, 0);
    assert!(!view.is_loading());
    assert!(view.last_error.as_deref().unwrap_or_default().contains("503"));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_server_is_reported_as_failure() -> Result<()> {
    let config = TomlConfig::from_toml_str(
        r#"
[server]
base_url = "http://127.0.0.1:9"
timeout_seconds = 2
"#,
    )?;
    let service = RestListDataService::new(&config)?;
    let controller = ListPageController::new(service, config.controller_settings());

    assert_eq!(controller.load_list_summaries().await, LoadOutcome::Failed);
    assert!(controller.view().snapshot().await.last_error.is_some());
    Ok(())
}
