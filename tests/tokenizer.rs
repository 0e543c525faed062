use pretty_assertions::assert_eq;

use cwsend::model::{GapKind, Token};
use cwsend::tokenizer::tokenize_messages;

fn messages(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|s| s.to_string()).collect()
}

fn char_token(token: &Token) -> (&str, &str, bool) {
    match token {
        Token::Char {
            raw,
            display,
            add_char_space,
            ..
        } => (raw.as_str(), display.as_str(), *add_char_space),
        other => panic!("expected char token, got {other:?}"),
    }
}

#[test]
fn cq_cq_tokenizes_to_chars_and_a_space() {
    let stream = tokenize_messages(&messages(&["CQ CQ"]));

    assert_eq!(stream.display_messages, vec!["CQ CQ".to_string()]);
    assert_eq!(stream.tokens.len(), 7);

    assert_eq!(
        stream.tokens[0],
        Token::Gap {
            message_index: 0,
            gap: GapKind::Lead,
        }
    );
    assert_eq!(char_token(&stream.tokens[1]), ("C", "C", true));
    assert_eq!(char_token(&stream.tokens[2]), ("Q", "Q", false));
    assert_eq!(stream.tokens[3], Token::Space { message_index: 0 });
    assert_eq!(char_token(&stream.tokens[4]), ("C", "C", true));
    assert_eq!(char_token(&stream.tokens[5]), ("Q", "Q", false));
    assert_eq!(
        stream.tokens[6],
        Token::Gap {
            message_index: 0,
            gap: GapKind::Tail,
        }
    );
}

#[test]
fn prosign_extends_to_the_next_space_and_drops_its_marker() {
    let stream = tokenize_messages(&messages(&["@SK TEST"]));

    assert_eq!(stream.display_messages, vec!["SK TEST".to_string()]);

    assert_eq!(char_token(&stream.tokens[1]), ("@SK", "SK", false));
    assert_eq!(stream.tokens[2], Token::Space { message_index: 0 });
    assert_eq!(char_token(&stream.tokens[3]), ("T", "T", true));
    assert_eq!(char_token(&stream.tokens[4]), ("E", "E", true));
    assert_eq!(char_token(&stream.tokens[5]), ("S", "S", true));
    assert_eq!(char_token(&stream.tokens[6]), ("T", "T", false));
}

#[test]
fn prosign_at_end_of_message_has_no_trailing_char_space() {
    let stream = tokenize_messages(&messages(&["73 @SK"]));

    assert_eq!(stream.display_messages, vec!["73 SK".to_string()]);
    let last_char = &stream.tokens[stream.tokens.len() - 2];
    assert_eq!(char_token(last_char), ("@SK", "SK", false));
}

#[test]
fn every_message_is_wrapped_in_lead_and_tail_gaps() {
    let stream = tokenize_messages(&messages(&["CQ", "K"]));

    let gaps: Vec<(usize, GapKind)> = stream
        .tokens
        .iter()
        .filter_map(|token| match token {
            Token::Gap { message_index, gap } => Some((*message_index, *gap)),
            _ => None,
        })
        .collect();

    assert_eq!(
        gaps,
        vec![
            (0, GapKind::Lead),
            (0, GapKind::Tail),
            (1, GapKind::Lead),
            (1, GapKind::Tail),
        ]
    );

    let indices: Vec<usize> = stream.tokens.iter().map(Token::message_index).collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(indices, sorted, "message indices must be non-decreasing");
}

#[test]
fn display_string_is_the_concatenation_of_token_displays() {
    let stream = tokenize_messages(&messages(&["CQ DE @BT K1AB"]));

    let concatenated: String = stream
        .tokens
        .iter()
        .filter_map(|token| match token {
            Token::Char { display, .. } => Some(display.clone()),
            Token::Space { .. } => Some(" ".to_string()),
            Token::Gap { .. } => None,
        })
        .collect();

    assert_eq!(concatenated, stream.display_messages[0]);
    assert!(!stream.display_messages[0].contains('@'));
}

#[test]
fn empty_message_list_yields_an_empty_stream() {
    let stream = tokenize_messages(&[]);
    assert!(stream.tokens.is_empty());
    assert!(stream.display_messages.is_empty());
}
