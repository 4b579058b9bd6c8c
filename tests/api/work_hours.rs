use crate::helpers::{
    add_member, add_work_hours, get_json_response_body, result_ids, TestApp,
};
use resource_manager::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_for_valid_requests(app: &mut TestApp) {
    let schema = json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "string", "minLength": 36, "maxLength": 36 },
        "start": { "type": "string", "pattern": "^[0-9]{2}:[0-9]{2}:[0-9]{2}$" },
        "end": { "type": "string", "pattern": "^[0-9]{2}:[0-9]{2}:[0-9]{2}$" },
        "timezone": { "type": "string" }
      },
      "required": ["id", "start", "end", "timezone"]
    });

    let response = app
        .post(
            "/workhours",
            &json!({ "start": "09:00", "end": "17:30", "timezone": "Europe/Kyiv" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert!(jsonschema::is_valid(&schema, &body), "response does not match schema");
    assert_eq!(body["start"], "09:00:00");
    assert_eq!(body["end"], "17:30:00");
    assert_eq!(body["timezone"], "Europe/Kyiv");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_default_timezone_to_utc(app: &mut TestApp) {
    let response = app
        .post("/workhours", &json!({ "start": "22:00:00", "end": "06:00:00" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);
    assert_eq!(get_json_response_body(response).await["timezone"], "UTC");
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_input(app: &mut TestApp) {
    let test_cases = [
        json!({ "start": "09:00" }),
        json!({ "start": "9am", "end": "17:00" }),
        json!({ "start": "09:00", "end": "25:00" }),
        json!({ "start": "09:00", "end": "17:00", "timezone": "Mars/Olympus" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post("/workhours", test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_list_update_and_delete_work_hours(app: &mut TestApp) {
    let late = add_work_hours(app, "13:00", "21:00", "UTC").await;
    let early = add_work_hours(app, "07:00", "15:00", "UTC").await;
    assert_eq!(
        result_ids(app.get("/workhours").await).await,
        vec![early.clone(), late]
    );

    let path = format!("/workhours/{early}");
    let response = app
        .put(&path, &json!({ "start": "08:00", "end": "16:00", "timezone": "UTC" }))
        .await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        get_json_response_body(app.get(&path).await).await,
        json!({ "id": &early, "start": "08:00:00", "end": "16:00:00", "timezone": "UTC" })
    );

    assert_eq!(app.delete(&path).await.status().as_u16(), 204);
    assert_eq!(app.get(&path).await.status().as_u16(), 404);
    assert_eq!(app.delete(&path).await.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn deleting_work_hours_detaches_members(app: &mut TestApp) {
    let work_hours_id = add_work_hours(app, "09:00", "17:00", "UTC").await;
    let member_id = add_member(
        app,
        &json!({
            "first_name": "Jack",
            "last_name": "Hackett",
            "workhours": &work_hours_id
        }),
    )
    .await;

    app.delete(&format!("/workhours/{work_hours_id}")).await;

    let body = get_json_response_body(
        app.get(&format!("/members/{member_id}")).await,
    )
    .await;
    assert_eq!(body["workhours"], serde_json::Value::Null);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_malformed_request(app: &mut TestApp) {
    let test_cases = [
        json!({ "start": 9, "end": "17:00" }),
        json!({ "start": "09:00", "end": "17:00", "timezone": 3 }),
        json!("09:00-17:00"),
    ];

    for test_case in test_cases.iter() {
        let response = app.post("/workhours", test_case).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            test_case
        );
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse");
    }
}
