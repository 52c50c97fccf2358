use deduce::{DeduceError, Engine};

fn error_for(code: &str) -> DeduceError {
    match Engine::from_source(code, "rules.txt") {
        Ok(_) => panic!("Expected an error for {:?}", code),
        Err(e) => e,
    }
}

#[test]
fn test_parse_error_location() {
    let error = error_for("A => B\nA + => C\n?C");
    match &error {
        DeduceError::Parse(details) => {
            assert_eq!(details.span.line, 2);
            assert_eq!(details.source_id, "rules.txt");
            assert_eq!(&*details.source_text, "A => B\nA + => C\n?C");
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
    assert!(error.to_string().starts_with("Parse error:"));
    assert!(error.to_string().contains("rules.txt:2:"));
}

#[test]
fn test_duplicate_fact_message() {
    let error = error_for("A => B\n=AB\n=A\n?B");
    assert!(error
        .to_string()
        .starts_with("Semantic error: Duplicate fact: 'A'"));
    assert!(error.to_string().contains("rules.txt:3:2"));
}

#[test]
fn test_missing_queries_message() {
    let error = error_for("A => B\n=A\n");
    assert!(error.to_string().contains("No queries provided in input"));
}

#[test]
fn test_contradiction_message_names_the_rule() {
    let mut engine = Engine::from_source("A => C\nB => !C\n=AB\n?C", "rules.txt").unwrap();
    let error = engine.evaluate().unwrap_err();
    assert_eq!(
        error.to_string(),
        "Contradiction: rules force conflicting values onto C (while applying 'B => !C')"
    );
}
