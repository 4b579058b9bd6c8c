use crate::helpers::{
    add_member, add_project, add_skill, add_work_hours, get_json_response_body,
    TestApp,
};
use resource_manager::ErrorResponse;
use serde_json::json;
use test_context::test_context;

fn member_schema() -> serde_json::Value {
    json!({
      "$schema": "http://json-schema.org/draft-04/schema#",
      "type": "object",
      "properties": {
        "id": { "type": "string", "minLength": 36, "maxLength": 36 },
        "first_name": { "type": "string", "minLength": 1, "maxLength": 50 },
        "last_name": { "type": "string", "minLength": 1, "maxLength": 50 },
        "skills": {
          "type": "array",
          "items": {
            "type": "object",
            "properties": {
              "id": { "type": "string" },
              "name": { "type": "string" }
            },
            "required": ["id", "name"]
          }
        },
        "project": { "type": ["object", "null"] },
        "manager_id": { "type": ["string", "null"] },
        "workhours": { "type": ["object", "null"] },
        "on_holidays_till": { "type": ["string", "null"] },
        "available": { "type": "boolean" }
      },
      "required": [
        "id", "first_name", "last_name", "skills", "project", "manager_id",
        "workhours", "on_holidays_till", "available"
      ]
    })
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_201_with_resolved_references(app: &mut TestApp) {
    let skill_id = add_skill(app, "js").await;
    let project_id = add_project(app, "Craggy Island").await;
    let work_hours_id = add_work_hours(app, "09:00", "17:00", "Europe/Kyiv").await;

    let response = app
        .post(
            "/members",
            &json!({
                "first_name": "Ted",
                "last_name": "Crilly",
                "skills": [&skill_id],
                "project": &project_id,
                "workhours": &work_hours_id,
                "on_holidays_till": "2024-06-10"
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let body = get_json_response_body(response).await;
    assert!(
        jsonschema::is_valid(&member_schema(), &body),
        "response does not match schema"
    );
    assert_eq!(body["first_name"], "Ted");
    assert_eq!(body["skills"], json!([{ "id": &skill_id, "name": "js" }]));
    assert_eq!(
        body["project"],
        json!({ "id": &project_id, "name": "Craggy Island" })
    );
    assert_eq!(
        body["workhours"],
        json!({
            "id": &work_hours_id,
            "start": "09:00:00",
            "end": "17:00:00",
            "timezone": "Europe/Kyiv"
        })
    );
    assert_eq!(body["on_holidays_till"], "2024-06-10");
    assert_eq!(body["available"], false);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_invalid_names(app: &mut TestApp) {
    let test_cases = [
        json!({ "first_name": "", "last_name": "Crilly" }),
        json!({ "first_name": "Ted" }),
        json!({ "first_name": "Ted", "last_name": "a".repeat(51) }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post("/members", test_case).await;
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

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_references(app: &mut TestApp) {
    let unknown = uuid::Uuid::new_v4().to_string();
    let test_cases = [
        json!({ "first_name": "Ted", "last_name": "Crilly", "skills": [&unknown] }),
        json!({ "first_name": "Ted", "last_name": "Crilly", "project": &unknown }),
        json!({ "first_name": "Ted", "last_name": "Crilly", "workhours": &unknown }),
        json!({ "first_name": "Ted", "last_name": "Crilly", "manager_id": &unknown }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post("/members", test_case).await;
        assert_eq!(
            response.status().as_u16(),
            404,
            "Should fail with HTTP404 for input: {}",
            test_case
        );
    }

    let body = get_json_response_body(app.get_members(&[]).await).await;
    assert_eq!(body["count"], 0);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_get_member_or_404(app: &mut TestApp) {
    let member_id =
        add_member(app, &json!({ "first_name": "Ted", "last_name": "Crilly" })).await;

    let response = app.get(&format!("/members/{member_id}")).await;
    assert_eq!(response.status().as_u16(), 200);
    let body = get_json_response_body(response).await;
    assert_eq!(body["id"], member_id.as_str());
    assert_eq!(body["available"], true);

    let response = app.get(&format!("/members/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app.get("/members/not-a-uuid").await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_replace_member_on_update(app: &mut TestApp) {
    let skill_id = add_skill(app, "js").await;
    let manager_id =
        add_member(app, &json!({ "first_name": "Len", "last_name": "Brennan" })).await;
    let member_id = add_member(
        app,
        &json!({
            "first_name": "Ted",
            "last_name": "Crilly",
            "skills": [&skill_id],
            "on_holidays_till": "2024-06-10"
        }),
    )
    .await;

    let response = app
        .put(
            &format!("/members/{member_id}"),
            &json!({
                "first_name": "Dougal",
                "last_name": "McGuire",
                "manager_id": &manager_id
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert!(jsonschema::is_valid(&member_schema(), &body));
    assert_eq!(body["id"], member_id.as_str());
    assert_eq!(body["first_name"], "Dougal");
    assert_eq!(body["manager_id"], manager_id.as_str());
    assert_eq!(body["skills"], json!([]));
    assert_eq!(body["on_holidays_till"], serde_json::Value::Null);
    assert_eq!(body["available"], true);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_reject_self_management(app: &mut TestApp) {
    let member_id =
        add_member(app, &json!({ "first_name": "Ted", "last_name": "Crilly" })).await;

    let response = app
        .put(
            &format!("/members/{member_id}"),
            &json!({
                "first_name": "Ted",
                "last_name": "Crilly",
                "manager_id": &member_id
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_when_updating_unknown_member(app: &mut TestApp) {
    let response = app
        .put(
            &format!("/members/{}", uuid::Uuid::new_v4()),
            &json!({ "first_name": "Ted", "last_name": "Crilly" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_delete_member_and_clear_manager_references(app: &mut TestApp) {
    let manager_id =
        add_member(app, &json!({ "first_name": "Len", "last_name": "Brennan" })).await;
    let report_id = add_member(
        app,
        &json!({
            "first_name": "Ted",
            "last_name": "Crilly",
            "manager_id": &manager_id
        }),
    )
    .await;

    let path = format!("/members/{manager_id}");
    assert_eq!(app.delete(&path).await.status().as_u16(), 204);
    assert_eq!(app.get(&path).await.status().as_u16(), 404);
    assert_eq!(app.delete(&path).await.status().as_u16(), 404);

    let body = get_json_response_body(
        app.get(&format!("/members/{report_id}")).await,
    )
    .await;
    assert_eq!(body["manager_id"], serde_json::Value::Null);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_malformed_request(app: &mut TestApp) {
    let test_cases = [
        json!({ "first_name": "Ted", "last_name": "Crilly", "on_holidays_till": "not-a-date" }),
        json!({ "first_name": "Ted", "last_name": "Crilly", "skills": ["x"] }),
        json!({ "first_name": "Ted", "last_name": "Crilly", "project": 5 }),
        json!({ "first_name": true, "last_name": "Crilly" }),
    ];

    for test_case in test_cases.iter() {
        let response = app.post("/members", test_case).await;
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

    let member_id =
        add_member(app, &json!({ "first_name": "Ted", "last_name": "Crilly" })).await;
    let response = app
        .put(
            &format!("/members/{member_id}"),
            &json!({ "first_name": "Ted", "last_name": "Crilly", "workhours": "soon" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_with_error_body_for_malformed_member_id(app: &mut TestApp) {
    let response = app.get("/members/not-a-uuid").await;
    assert_eq!(response.status().as_u16(), 400);
    response
        .json::<ErrorResponse>()
        .await
        .expect("Could not deserialise response body to ErrorResponse");
}
