use super::*;

#[test]
fn test_new_turn_sources_follow_role() {
    let user = NewTurn::user("s1", "What is the capital of France?");
    assert_eq!(user.role(), Role::User);
    assert_eq!(user.sources(), None);

    let assistant = NewTurn::assistant("s1", "Paris.", vec!["wikipedia.org".to_string()]);
    assert_eq!(assistant.role(), Role::Assistant);
    assert_eq!(assistant.sources(), Some(&["wikipedia.org".to_string()][..]));
}

#[test]
fn test_role_from_str() {
    assert_eq!("user".parse::<Role>().unwrap(), Role::User);
    assert_eq!("assistant".parse::<Role>().unwrap(), Role::Assistant);
    assert!("system".parse::<Role>().is_err());
    assert_eq!(Role::Assistant.to_string(), "assistant");
}

#[test]
fn test_chat_turn_serializes_camel_case() {
    let created_at = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
    let turn = NewTurn::user("s1", "hello").into_turn(7, created_at);

    let value = serde_json::to_value(&turn).expect("failed to serialize turn");
    assert_eq!(value["id"], 7);
    assert_eq!(value["sessionId"], "s1");
    assert_eq!(value["role"], "user");
    assert_eq!(value["content"], "hello");
    assert!(value["sources"].is_null());
    assert_eq!(value["createdAt"], "2023-11-14T22:13:20Z");
}
