//! Shell-style word handling for instruction arguments.

/// An opening quote with no matching close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unterminated {0} quote")]
pub(crate) struct UnterminatedQuote(pub(crate) char);

/// Splits `input` into words on unquoted whitespace, removing quotes and
/// escapes.
pub(crate) fn split_words(input: &str) -> Result<Vec<String>, UnterminatedQuote> {
    lex(input, true)
}

/// Removes quotes and escapes from `input` but keeps unquoted whitespace.
pub(crate) fn unquote(input: &str) -> Result<String, UnterminatedQuote> {
    Ok(lex(input, false)?.concat())
}

/// Finds the byte offset of the first variable reference (`$NAME` or
/// `${NAME}`), ignoring `\$`.
pub(crate) fn find_variable_reference(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' => {
                if matches!(
                    bytes.get(i + 1),
                    Some(b'{' | b'_' | b'a'..=b'z' | b'A'..=b'Z')
                ) {
                    return Some(i);
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    None
}

fn lex(input: &str, split: bool) -> Result<Vec<String>, UnterminatedQuote> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(ch) => current.push(ch),
                        None => return Err(UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(ch @ ('"' | '\\' | '$' | '`')) => current.push(ch),
                            Some(ch) => {
                                current.push('\\');
                                current.push(ch);
                            }
                            None => return Err(UnterminatedQuote('"')),
                        },
                        Some(ch) => current.push(ch),
                        None => return Err(UnterminatedQuote('"')),
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.push(chars.next().unwrap_or('\\'));
            }
            c if split && c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_unquoted_whitespace() {
        assert_eq!(
            split_words("A=1   B=two").unwrap(),
            vec!["A=1".to_owned(), "B=two".to_owned()]
        );
    }

    #[test]
    fn double_quotes_keep_spaces_and_unescape() {
        assert_eq!(
            split_words(r#"MSG="hello \"world\"" X=y"#).unwrap(),
            vec![r#"MSG=hello "world""#.to_owned(), "X=y".to_owned()]
        );
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(split_words(r"A='a\b c'").unwrap(), vec![r"A=a\b c".to_owned()]);
    }

    #[test]
    fn backslash_escapes_space() {
        assert_eq!(split_words(r"A=a\ b").unwrap(), vec!["A=a b".to_owned()]);
    }

    #[test]
    fn empty_quotes_produce_empty_value() {
        assert_eq!(split_words(r#"A="""#).unwrap(), vec!["A=".to_owned()]);
        assert_eq!(split_words(r#""""#).unwrap(), vec![String::new()]);
    }

    #[test]
    fn unterminated_quotes_are_errors() {
        assert_eq!(split_words(r#"A="open"#), Err(UnterminatedQuote('"')));
        assert_eq!(unquote("'open"), Err(UnterminatedQuote('\'')));
    }

    #[test]
    fn unquote_keeps_inner_whitespace() {
        assert_eq!(unquote(r#"hello   "big world""#).unwrap(), "hello   big world");
    }

    #[test]
    fn detects_variable_references() {
        assert_eq!(find_variable_reference("echo $HOME"), Some(5));
        assert_eq!(find_variable_reference("${FOO}"), Some(0));
        assert_eq!(find_variable_reference("a$_x"), Some(1));
    }

    #[test]
    fn ignores_non_references() {
        assert_eq!(find_variable_reference(r"price \$5"), None);
        assert_eq!(find_variable_reference("cost $5"), None);
        assert_eq!(find_variable_reference("trailing $"), None);
        assert_eq!(find_variable_reference(r"escaped \$HOME"), None);
    }

    proptest! {
        #[test]
        fn lexing_never_panics(s in "\\PC*") {
            let _ = split_words(&s);
            let _ = unquote(&s);
            let _ = find_variable_reference(&s);
        }

        #[test]
        fn plain_words_survive_splitting(
            words in proptest::collection::vec("[a-zA-Z0-9=/._-]{1,12}", 1..6),
        ) {
            let joined = words.join(" ");
            prop_assert_eq!(split_words(&joined).unwrap(), words);
        }
    }
}
