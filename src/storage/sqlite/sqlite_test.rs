use super::*;

#[test]
fn test_filter_to_query() {
    let mut filter = TurnFilter::default();

    let (query, params) = filter_to_query(&filter);
    assert_eq!(
        query,
        "SELECT id, session_id, role, content, sources, created_at FROM turns WHERE 1=1 ORDER BY created_at ASC, id ASC"
    );
    assert_eq!(params.len(), 0);

    filter.session_id = Some("s1".to_string());
    let (query, params) = filter_to_query(&filter);
    assert_eq!(
        query,
        "SELECT id, session_id, role, content, sources, created_at FROM turns WHERE 1=1 AND session_id = :session_id ORDER BY created_at ASC, id ASC"
    );
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].0, ":session_id");

    filter.newest_first = true;
    filter.limit = Some(4);
    let (query, params) = filter_to_query(&filter);
    assert_eq!(
        query,
        "SELECT id, session_id, role, content, sources, created_at FROM turns WHERE 1=1 AND session_id = :session_id ORDER BY created_at DESC, id DESC LIMIT :limit"
    );
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].0, ":session_id");
    assert_eq!(params[1].0, ":limit");
}

#[tokio::test]
async fn test_append_turn() {
    let db = Sqlite::new(None).await.unwrap();

    let user = db
        .append_turn(NewTurn::user("s1", "What is the capital of France?"))
        .await
        .unwrap();
    assert!(user.id() > 0);
    assert_eq!(user.session_id(), "s1");
    assert_eq!(user.role(), Role::User);
    assert_eq!(user.sources(), None);

    let assistant = db
        .append_turn(NewTurn::assistant(
            "s1",
            "Paris.",
            vec!["wikipedia.org".to_string()],
        ))
        .await
        .unwrap();
    assert!(assistant.id() > user.id());
    assert!(assistant.created_at() >= user.created_at());

    let turns = db.list_turns(Some("s1")).await.unwrap();
    assert_eq!(turns, vec![user, assistant]);
}

#[tokio::test]
async fn test_list_turns_by_session() {
    let db = Sqlite::new(None).await.unwrap();

    db.append_turn(NewTurn::user("s1", "first")).await.unwrap();
    db.append_turn(NewTurn::user("s2", "other")).await.unwrap();
    db.append_turn(NewTurn::assistant("s1", "second", vec!["a.com".to_string()]))
        .await
        .unwrap();
    db.append_turn(NewTurn::assistant("s2", "other reply", vec![]))
        .await
        .unwrap();

    let turns = db.list_turns(Some("s1")).await.unwrap();
    assert_eq!(turns.len(), 2);
    assert!(turns.iter().all(|t| t.session_id() == "s1"));
    assert_eq!(turns[0].content(), "first");
    assert_eq!(turns[1].content(), "second");
    assert_eq!(turns[1].sources(), Some(&["a.com".to_string()][..]));

    let turns = db.list_turns(Some("s2")).await.unwrap();
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[1].sources(), Some(&[][..]));

    let all = db.list_turns(None).await.unwrap();
    let contents = all.iter().map(|t| t.content()).collect::<Vec<_>>();
    assert_eq!(contents, vec!["first", "other", "second", "other reply"]);

    assert!(db.list_turns(Some("missing")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_recent_turns() {
    let db = Sqlite::new(None).await.unwrap();

    for i in 0..5 {
        db.append_turn(NewTurn::user("s1", format!("message {i}")))
            .await
            .unwrap();
    }
    db.append_turn(NewTurn::user("s2", "elsewhere")).await.unwrap();

    let turns = db.recent_turns("s1", 3).await.unwrap();
    let contents = turns.iter().map(|t| t.content()).collect::<Vec<_>>();
    assert_eq!(contents, vec!["message 2", "message 3", "message 4"]);

    let turns = db.recent_turns("s1", 10).await.unwrap();
    assert_eq!(turns.len(), 5);
    assert_eq!(turns[0].content(), "message 0");

    assert!(db.recent_turns("s1", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_open_file_database() {
    let path = std::env::temp_dir().join(format!("globalrate-{}.db", uuid::Uuid::new_v4()));
    let path = path.to_string_lossy().to_string();

    {
        let db = Sqlite::new(Some(&path)).await.unwrap();
        db.append_turn(NewTurn::user("s1", "persisted")).await.unwrap();
    }

    let db = Sqlite::new(Some(&path)).await.unwrap();
    let turns = db.list_turns(Some("s1")).await.unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].content(), "persisted");

    let _ = std::fs::remove_file(&path);
}
