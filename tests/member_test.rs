use myemma::{Account, Credentials, Field, FieldId, Member, MemberError, SaveOptions};
use resource_framework::mock::{MockAdapter, RecordedCall};
use resource_framework::{AdapterError, Attributes, Method, RemoteEntity};
use serde_json::{json, Value};

fn attributes(value: Value) -> Attributes {
    value.as_object().cloned().expect("fixture must be an object")
}

/// Account over `mock` with the `first_name`/`last_name` fields already known.
fn account(mock: &MockAdapter) -> Account {
    let account = Account::new(Credentials::new("100", "xxx", "yyy"), mock.clone());
    account.fields().seed([
        Field::new(FieldId(2000), "first_name"),
        Field::new(FieldId(2001), "last_name"),
    ]);
    account
}

fn member(account: &Account, status: &str) -> Member {
    account.new_member(attributes(json!({
        "member_id": 1000,
        "email": "test@example.com",
        "status": status
    })))
}

fn save_reply() -> Value {
    json!({"status": "a", "added": true, "member_id": 1024})
}

#[test]
fn shortcut_fields_round_trip_through_nested_fields() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let mut member = member(&account, "opt-out");

    member.set_attribute("first_name", json!("Emma"));

    assert_eq!(member["first_name"], "Emma");
    assert_eq!(member.custom_fields().unwrap()["first_name"], "Emma");
    assert!(member.attributes().get("first_name").is_none());
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn raw_attributes_round_trip_at_top_level() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let mut member = member(&account, "active");

    member.set_attribute("plaintext_preferred", json!(true));

    assert_eq!(member["plaintext_preferred"], true);
    assert_eq!(member.attributes()["plaintext_preferred"], true);
    assert_eq!(member["never_set"], Value::Null);
}

#[tokio::test]
async fn set_field_rejects_unknown_shortcut() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let mut member = member(&account, "active");

    let err = member.set_field("favourite_colour", json!("blue")).await.unwrap_err();

    assert!(matches!(err, MemberError::UnknownField(name) if name == "favourite_colour"));
    assert!(member.custom_fields().is_none());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn set_field_loads_the_catalog_once() {
    let mock = MockAdapter::new();
    mock.respond_with(json!([
        {"field_id": 2000, "shortcut_name": "first_name"},
        {"field_id": 2001, "shortcut_name": "last_name"}
    ]));
    let account = Account::new(Credentials::new("100", "xxx", "yyy"), mock.clone());
    let mut member = member(&account, "active");

    member.set_field("first_name", json!("Emma")).await.unwrap();
    member.set_field("last_name", json!("Smith")).await.unwrap();

    assert_eq!(mock.calls(), vec![RecordedCall::new(Method::Get, "/fields", json!({}))]);
    assert_eq!(
        member.custom_fields().cloned().map(Value::Object),
        Some(json!({"first_name": "Emma", "last_name": "Smith"}))
    );
    assert!(account.fields().is_shortcut("last_name"));
}

#[tokio::test]
async fn opt_out_detail_is_fetched_for_member() {
    let mock = MockAdapter::new();
    mock.respond_with(json!([]));
    let account = account(&mock);
    let member = member(&account, "opt-out");

    let detail = member.get_opt_out_detail().await.unwrap();

    assert!(detail.is_empty());
    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(Method::Get, "/members/1000/optout", json!({})))
    );
}

#[tokio::test]
async fn opt_out_detail_requires_member_id() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let member = Member::new(account.client());

    let err = member.get_opt_out_detail().await.unwrap_err();

    assert!(matches!(err, MemberError::NoMemberId));
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn has_opted_out_compares_local_status() {
    let mock = MockAdapter::new();
    let account = account(&mock);

    assert!(member(&account, "opt-out").has_opted_out().unwrap());
    assert!(!member(&account, "active").has_opted_out().unwrap());
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn has_opted_out_requires_status() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let member = Member::new(account.client());

    assert!(matches!(member.has_opted_out(), Err(MemberError::NoMemberStatus)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn opt_out_requires_email() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let mut member = Member::new(account.client());

    let err = member.opt_out().await.unwrap_err();

    assert!(matches!(err, MemberError::NoMemberEmail));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn opt_out_puts_by_email_and_updates_status() {
    let mock = MockAdapter::new();
    mock.respond_with(json!(true));
    let account = account(&mock);
    let mut member = member(&account, "active");
    assert!(!member.has_opted_out().unwrap());

    member.opt_out().await.unwrap();

    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Put,
            "/members/email/optout/test@example.com",
            json!({})
        ))
    );
    assert!(member.has_opted_out().unwrap());
}

#[tokio::test]
async fn opt_out_escapes_email_in_path() {
    let mock = MockAdapter::new();
    mock.respond_with(json!(true));
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({
        "email": "a/b?c#d@example.com",
        "status": "active"
    })));

    member.opt_out().await.unwrap();

    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Put,
            "/members/email/optout/a%2Fb%3Fc%23d@example.com",
            json!({})
        ))
    );
}

#[tokio::test]
async fn unacknowledged_opt_out_keeps_status() {
    let mock = MockAdapter::new();
    mock.respond_with(json!(false));
    let account = account(&mock);
    let mut member = member(&account, "active");

    member.opt_out().await.unwrap();

    assert_eq!(member.status(), Some("active"));
}

#[tokio::test]
async fn save_posts_email_only() {
    let mock = MockAdapter::new();
    mock.respond_with(save_reply());
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({"email": "test@example.com"})));

    member.save(SaveOptions::new()).await.unwrap();

    assert_eq!(mock.call_count(), 1);
    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Post,
            "/members/add",
            json!({"email": "test@example.com"})
        ))
    );
    assert_eq!(member["member_id"], 1024);
    assert_eq!(member["status_code"], "a");
    assert_eq!(member["added"], true);
    assert!(member.is_persisted());
}

#[tokio::test]
async fn save_nests_custom_fields() {
    let mock = MockAdapter::new();
    mock.respond_with(save_reply());
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({
        "email": "test@example.com",
        "first_name": "Emma"
    })));

    member.save(SaveOptions::new()).await.unwrap();

    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Post,
            "/members/add",
            json!({"email": "test@example.com", "fields": {"first_name": "Emma"}})
        ))
    );
    assert_eq!(member["member_id"], 1024);
    assert_eq!(member["status_code"], "a");
}

#[test]
fn constructor_custom_fields_read_back_through_shortcut() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let member = account.new_member(attributes(json!({
        "email": "test@example.com",
        "first_name": "Emma"
    })));

    assert_eq!(member["first_name"], "Emma");
    assert_eq!(member.attribute("first_name"), Some(&json!("Emma")));
}

#[tokio::test]
async fn updated_custom_field_replaces_constructor_value_on_save() {
    let mock = MockAdapter::new();
    mock.respond_with(save_reply());
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({
        "email": "test@example.com",
        "first_name": "Emma"
    })));

    member.set_attribute("first_name", json!("Jane"));
    assert_eq!(member["first_name"], "Jane");
    assert!(member.attributes().get("first_name").is_none());

    member.save(SaveOptions::new()).await.unwrap();

    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Post,
            "/members/add",
            json!({"email": "test@example.com", "fields": {"first_name": "Jane"}})
        ))
    );
}

#[tokio::test]
async fn save_sends_fields_set_by_shortcut() {
    let mock = MockAdapter::new();
    mock.respond_with(save_reply());
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({"email": "test@example.com"})));

    member.set_field("last_name", json!("Smith")).await.unwrap();
    member.set_attribute("first_name", json!("Jane"));
    member.save(SaveOptions::new()).await.unwrap();

    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Post,
            "/members/add",
            json!({
                "email": "test@example.com",
                "fields": {"first_name": "Jane", "last_name": "Smith"}
            })
        ))
    );
}

#[tokio::test]
async fn resave_does_not_echo_reply_attributes() {
    let mock = MockAdapter::new();
    mock.respond_with(save_reply());
    mock.respond_with(save_reply());
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({"email": "test@example.com"})));

    member.save(SaveOptions::new()).await.unwrap();
    member.save(SaveOptions::new()).await.unwrap();

    assert_eq!(mock.call_count(), 2);
    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Post,
            "/members/add",
            json!({"email": "test@example.com"})
        ))
    );
    assert_eq!(member["member_id"], 1024);
}

#[tokio::test]
async fn save_merges_options_at_top_level() {
    let mock = MockAdapter::new();
    mock.respond_with(save_reply());
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({
        "email": "test@example.com",
        "first_name": "Emma"
    })));

    member
        .save(SaveOptions::new().signup_form_id("http://example.com/signup"))
        .await
        .unwrap();

    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(
            Method::Post,
            "/members/add",
            json!({
                "email": "test@example.com",
                "fields": {"first_name": "Emma"},
                "signup_form_id": "http://example.com/signup"
            })
        ))
    );
    assert_eq!(member["member_id"], 1024);
    assert_eq!(member["status_code"], "a");
}

#[tokio::test]
async fn save_requires_email() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({"first_name": "Emma"})));

    let err = member.save(SaveOptions::new()).await.unwrap_err();

    assert!(matches!(err, MemberError::NoMemberEmail));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn failed_save_leaves_member_untouched() {
    let mock = MockAdapter::new();
    mock.fail_with(AdapterError::Status {
        status: 400,
        message: "invalid email".into(),
    });
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({"email": "not-an-email"})));

    let err = member.save(SaveOptions::new()).await.unwrap_err();

    assert!(matches!(err, MemberError::Adapter(AdapterError::Status { status: 400, .. })));
    assert_eq!(member.attributes(), &attributes(json!({"email": "not-an-email"})));
    assert!(!member.is_persisted());
}

#[tokio::test]
async fn save_rejects_non_object_reply() {
    let mock = MockAdapter::new();
    mock.respond_with(json!([1024]));
    let account = account(&mock);
    let mut member = account.new_member(attributes(json!({"email": "test@example.com"})));

    let err = member.save(SaveOptions::new()).await.unwrap_err();

    assert!(matches!(err, MemberError::UnexpectedResponse { expected: "object", .. }));
    assert!(member.id().is_none());
}

#[tokio::test]
async fn delete_requires_member_id() {
    let mock = MockAdapter::new();
    let account = account(&mock);
    let member = account.new_member(attributes(json!({"email": "test@example.com"})));

    assert!(matches!(member.delete().await, Err(MemberError::NoMemberId)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn delete_reports_acknowledgement() {
    let mock = MockAdapter::new();
    mock.respond_with(json!(true));
    let account = account(&mock);
    let member = member(&account, "active");

    assert!(member.delete().await.unwrap());
    assert_eq!(
        mock.last_call(),
        Some(RecordedCall::new(Method::Delete, "/members/1000", json!({})))
    );
    // local state is not cleared by a remote delete
    assert_eq!(member["email"], "test@example.com");
}
