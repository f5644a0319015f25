use super::*;

const ANSWER: &str = "Live confirmed data is not available right now.";
const SOURCE: &str = "Live confirmed data is not available right now";

#[test]
fn test_parse_valid_reply() {
    let reply = ParsedReply::parse(Some(
        r#"{"answer": "Paris is the capital of France.", "sources": ["britannica.com", "wikipedia.org"]}"#,
    ))
    .expect("reply should parse");

    assert_eq!(reply.answer, "Paris is the capital of France.");
    assert_eq!(reply.sources, vec!["britannica.com", "wikipedia.org"]);
}

#[test]
fn test_parse_missing_or_null_sources() {
    let reply = ParsedReply::parse(Some(r#"{"answer": "Paris."}"#)).unwrap();
    assert!(reply.sources.is_empty());

    let reply = ParsedReply::parse(Some(r#"{"answer": "Paris.", "sources": null}"#)).unwrap();
    assert!(reply.sources.is_empty());
}

#[test]
fn test_parse_faults() {
    assert!(matches!(ParsedReply::parse(None), Err(ParseFault::Empty)));
    assert!(matches!(ParsedReply::parse(Some("   ")), Err(ParseFault::Empty)));
    assert!(matches!(
        ParsedReply::parse(Some("Paris is the capital.")),
        Err(ParseFault::Malformed(_))
    ));
    assert!(matches!(
        ParsedReply::parse(Some("{}")),
        Err(ParseFault::Malformed(_))
    ));
    assert!(matches!(
        ParsedReply::parse(Some(r#"{"answer": "x", "sources": "a.com"}"#)),
        Err(ParseFault::Malformed(_))
    ));
}

#[test]
fn test_fallback() {
    let reply = ParsedReply::fallback(Some("Paris is the capital."));
    assert_eq!(reply.answer, "Paris is the capital.");
    assert_eq!(reply.sources, vec![PARSE_FAULT_SOURCE]);

    let reply = ParsedReply::fallback(None);
    assert_eq!(reply.answer, PARSE_FAULT_ANSWER);
    assert_eq!(reply.sources, vec![PARSE_FAULT_SOURCE]);

    let reply = ParsedReply::parse_or_fallback(Some("not json"));
    assert_eq!(reply.answer, "not json");
    assert_eq!(reply.sources, vec![PARSE_FAULT_SOURCE]);
}

#[test]
fn test_normalize() {
    let reply = ParsedReply::new("Paris.", vec![]).normalize(ANSWER, SOURCE);
    assert_eq!(reply.answer, "Paris.");
    assert_eq!(reply.sources, vec![SOURCE]);

    let reply = ParsedReply::new("  ", vec!["".to_string(), "a.com".to_string()])
        .normalize(ANSWER, SOURCE);
    assert_eq!(reply.answer, ANSWER);
    assert_eq!(reply.sources, vec!["a.com"]);
}
