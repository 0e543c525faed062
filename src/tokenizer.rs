use crate::code::PROSIGN_MARKER;
use crate::model::{GapKind, Token};

/// A flattened message queue plus the per-message display strings.
///
/// The concatenation of the `display` fields of a message's tokens, in
/// order, is exactly that message's entry in `display_messages`; the
/// display layer slices it for highlighting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub display_messages: Vec<String>,
}

/// Flatten an ordered message list into a token stream.
///
/// Each message is wrapped in a lead and a tail gap. A `@` introduces a
/// prosign extending to the next space (or end of message); it becomes a
/// single `Char` token whose display drops the marker. Only the plain
/// space character separates words.
pub fn tokenize_messages(messages: &[String]) -> TokenStream {
    let mut tokens = Vec::new();
    let mut display_messages = Vec::with_capacity(messages.len());

    for (message_index, message) in messages.iter().enumerate() {
        tokens.push(Token::Gap {
            message_index,
            gap: GapKind::Lead,
        });

        let chars: Vec<char> = message.chars().collect();
        let mut display = String::new();
        let mut i = 0usize;

        while i < chars.len() {
            let c = chars[i];

            if c == ' ' {
                tokens.push(Token::Space { message_index });
                display.push(' ');
                i += 1;
                continue;
            }

            if c == PROSIGN_MARKER {
                let mut j = i + 1;
                while j < chars.len() && chars[j] != ' ' {
                    j += 1;
                }
                let raw: String = chars[i..j].iter().collect();
                let shown: String = chars[i + 1..j].iter().collect();
                let add_char_space = matches!(chars.get(j), Some(&next) if next != ' ');

                tokens.push(Token::Char {
                    message_index,
                    raw,
                    display: shown.clone(),
                    add_char_space,
                });
                display.push_str(&shown);
                i = j;
                continue;
            }

            let add_char_space = matches!(chars.get(i + 1), Some(&next) if next != ' ');
            tokens.push(Token::Char {
                message_index,
                raw: c.to_string(),
                display: c.to_string(),
                add_char_space,
            });
            display.push(c);
            i += 1;
        }

        tokens.push(Token::Gap {
            message_index,
            gap: GapKind::Tail,
        });
        display_messages.push(display);
    }

    TokenStream {
        tokens,
        display_messages,
    }
}
