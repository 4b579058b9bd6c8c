use crate::helpers::{get_json_response_body, TestApp};
use test_context::test_context;

#[test_context(TestApp)]
#[tokio::test]
async fn should_return_200(app: &mut TestApp) {
    let response = app.get("/health").await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(
        get_json_response_body(response).await,
        serde_json::json!({ "status": "ok" })
    );
}
