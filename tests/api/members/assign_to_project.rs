use crate::helpers::{add_member, add_project, get_json_response_body, TestApp};
use resource_manager::ErrorResponse;
use serde_json::json;
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_assign_available_member(app: &mut TestApp) {
    let project_id = add_project(app, "Craggy Island").await;
    // Holidays ending today leave the member available.
    let member_id = add_member(
        app,
        &json!({
            "first_name": "Ted",
            "last_name": "Crilly",
            "on_holidays_till": app.now.date_naive().to_string()
        }),
    )
    .await;

    let response = app
        .post_assign_to_project(&member_id, &json!({ "id": &project_id }))
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let body = get_json_response_body(response).await;
    assert_eq!(
        body["project"],
        json!({ "id": &project_id, "name": "Craggy Island" })
    );

    let stored = get_json_response_body(
        app.get(&format!("/members/{member_id}")).await,
    )
    .await;
    assert_eq!(stored["project"]["id"], project_id.as_str());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_409_for_member_on_holiday(app: &mut TestApp) {
    let old_project = add_project(app, "Rugged Island").await;
    let project_id = add_project(app, "Craggy Island").await;
    let member_id = add_member(
        app,
        &json!({
            "first_name": "Dougal",
            "last_name": "McGuire",
            "project": &old_project,
            "on_holidays_till": "2024-06-04"
        }),
    )
    .await;

    let response = app
        .post_assign_to_project(&member_id, &json!({ "id": &project_id }))
        .await;
    assert_eq!(response.status().as_u16(), 409);

    let body = get_json_response_body(response).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["member_id"], member_id.as_str());
    assert_eq!(body["on_holidays_till"], "2024-06-04");
    assert!(body["reason"].as_str().is_some_and(|r| r.contains("2024-06-04")));

    let stored = get_json_response_body(
        app.get(&format!("/members/{member_id}")).await,
    )
    .await;
    assert_eq!(stored["project"]["id"], old_project.as_str());
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_404_for_unknown_ids(app: &mut TestApp) {
    let project_id = add_project(app, "Craggy Island").await;
    let member_id =
        add_member(app, &json!({ "first_name": "Ted", "last_name": "Crilly" })).await;

    let response = app
        .post_assign_to_project(
            &uuid::Uuid::new_v4().to_string(),
            &json!({ "id": &project_id }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .post_assign_to_project(
            &member_id,
            &json!({ "id": uuid::Uuid::new_v4().to_string() }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let stored = get_json_response_body(
        app.get(&format!("/members/{member_id}")).await,
    )
    .await;
    assert_eq!(stored["project"], serde_json::Value::Null);
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_for_malformed_project_id(app: &mut TestApp) {
    let member_id =
        add_member(app, &json!({ "first_name": "Ted", "last_name": "Crilly" })).await;

    for body in [json!({ "id": "" }), json!({ "id": "nope" }), json!({})] {
        let response = app.post_assign_to_project(&member_id, &body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            body
        );
    }
}

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_400_if_malformed_request(app: &mut TestApp) {
    let member_id =
        add_member(app, &json!({ "first_name": "Ted", "last_name": "Crilly" })).await;

    for body in [json!({ "id": 5 }), json!({ "id": ["nope"] }), json!("id")] {
        let response = app.post_assign_to_project(&member_id, &body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "Should fail with HTTP400 for input: {}",
            body
        );
        response
            .json::<ErrorResponse>()
            .await
            .expect("Could not deserialise response body to ErrorResponse");
    }
}
