use super::*;

#[test]
fn user_deserializes_camel_case_and_keeps_extra_fields() {
    let user: User = serde_json::from_value(serde_json::json!({
        "userId": "u-1",
        "firstName": "Ada",
        "emailAddress": "ada@example.com",
        "accounts": [{"id": 7}]
    }))
    .unwrap();
    assert_eq!(user.user_id.as_deref(), Some("u-1"));
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert!(user.last_name.is_none());
    assert_eq!(user.extra["accounts"][0]["id"], 7);
}

#[test]
fn display_name_prefers_first_name_then_email() {
    let mut user = User {
        first_name: Some("Ada".to_owned()),
        email_address: Some("ada@example.com".to_owned()),
        ..User::default()
    };
    assert_eq!(user.display_name(), "Ada");

    user.first_name = Some(String::new());
    assert_eq!(user.display_name(), "ada@example.com");

    user.email_address = None;
    assert_eq!(user.display_name(), "");
}

#[test]
fn fetch_query_serializes_sdk_shape() {
    let query = FetchQuery::select(&["Id", "title_c"]).order_by("created_at_c", SortType::Desc);
    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        serde_json::json!({
            "fields": [{"field": {"Name": "Id"}}, {"field": {"Name": "title_c"}}],
            "orderBy": [{"fieldName": "created_at_c", "sorttype": "DESC"}]
        })
    );
}

#[test]
fn fetch_query_without_order_omits_order_by() {
    let query = FetchQuery::select(&["Id"]);
    let value = serde_json::to_value(&query).unwrap();
    assert!(value.get("orderBy").is_none());
}

#[test]
fn store_response_parses_partial_results() {
    let resp: StoreResponse = serde_json::from_value(serde_json::json!({
        "success": true,
        "results": [
            {"success": true, "data": {"Id": 1}},
            {"success": false, "errors": [{"fieldLabel": "Title", "message": "required"}], "message": "bad row"}
        ]
    }))
    .unwrap();
    let results = resp.results.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].success);
    assert_eq!(results[1].errors.as_ref().unwrap()[0].field_label, "Title");
    assert_eq!(results[1].message.as_deref(), Some("bad row"));
}

#[test]
fn store_response_rows_ignores_non_array_data() {
    let resp = StoreResponse { success: true, data: Some(serde_json::json!({"Id": 1})), ..Default::default() };
    assert!(resp.rows().is_empty());

    let resp = StoreResponse { success: true, data: Some(serde_json::json!([{"Id": 1}])), ..Default::default() };
    assert_eq!(resp.rows().len(), 1);
}

#[test]
fn failure_message_falls_back_when_blank() {
    let resp = StoreResponse { success: false, message: Some(String::new()), ..Default::default() };
    assert_eq!(resp.failure_message(), "Request failed");

    let resp = StoreResponse { success: false, message: Some("quota exceeded".to_owned()), ..Default::default() };
    assert_eq!(resp.failure_message(), "quota exceeded");
}
