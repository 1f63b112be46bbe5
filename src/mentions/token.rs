//! Mention token detection and replacement.
//!
//! A mention token is the run of non-whitespace characters ending at the
//! cursor, provided it starts with a sigil such as `@` or `#`. Positions are
//! char indices, not byte offsets.

/// A partially typed mention at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionToken {
    /// The sigil that opened the token
    pub sigil: char,

    /// Text typed after the sigil, up to the cursor
    pub query: String,

    /// Char index of the sigil
    pub start: usize,

    /// Char index just past the token (the cursor)
    pub end: usize,
}

/// Finds the mention token ending at `cursor`, if any.
///
/// `cursor` is clamped to the length of `text`. Returns `None` when the word
/// before the cursor is empty or does not begin with one of `sigils`.
pub fn extract_token(text: &str, cursor: usize, sigils: &[char]) -> Option<MentionToken> {
    let chars: Vec<char> = text.chars().collect();
    let end = cursor.min(chars.len());
    let start = chars[..end]
        .iter()
        .rposition(|c| c.is_whitespace())
        .map_or(0, |i| i + 1);

    let (&sigil, query) = chars[start..end].split_first()?;
    if !sigils.contains(&sigil) {
        return None;
    }

    Some(MentionToken {
        sigil,
        query: query.iter().collect(),
        start,
        end,
    })
}

/// Replaces `token` in `text` with the completed mention.
///
/// The completed mention is the sigil followed by `identity`, then a single
/// space unless whitespace already follows the token. Only the token up to
/// the cursor is replaced: with the cursor inside a word, the rest of that
/// word is kept after the inserted space (`#zt|123` becomes `#ZTF 123`).
///
/// # Returns
///
/// The new text and the cursor position (char index) just past the space.
pub fn splice(text: &str, token: &MentionToken, identity: &str) -> (String, usize) {
    let mut chars = text.chars();
    let mut spliced = String::with_capacity(text.len() + identity.len() + 2);

    spliced.extend(chars.by_ref().take(token.start));
    spliced.push(token.sigil);
    spliced.push_str(identity);

    let mut rest = chars.skip(token.end.saturating_sub(token.start)).peekable();
    if !rest.peek().map_or(false, |c| c.is_whitespace()) {
        spliced.push(' ');
    }
    let cursor = token.start + 1 + identity.chars().count() + 1;
    spliced.extend(rest);

    (spliced, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SIGILS: &[char] = &['@', '#'];

    #[test_case("@al", 3, Some(('@', "al", 0)) ; "token at start")]
    #[test_case("hi @al", 6, Some(('@', "al", 3)) ; "token after space")]
    #[test_case("see #ZT", 7, Some(('#', "ZT", 4)) ; "instrument sigil")]
    #[test_case("hi @", 4, Some(('@', "", 3)) ; "bare sigil")]
    #[test_case("hi @alice and", 9, Some(('@', "alice", 3)) ; "cursor mid text")]
    #[test_case("hi @alice and", 6, Some(('@', "al", 3)) ; "cursor inside token")]
    #[test_case("mail a@b", 8, None ; "sigil not at word start")]
    #[test_case("hi al", 5, None ; "no sigil")]
    #[test_case("hi @al ", 7, None ; "after trailing space")]
    #[test_case("", 0, None ; "empty text")]
    #[test_case("ok\n#p4", 6, Some(('#', "p4", 3)) ; "newline is whitespace")]
    #[test_case("@al", 99, Some(('@', "al", 0)) ; "cursor clamped")]
    #[test_case("héllo @Zoë", 10, Some(('@', "Zoë", 6)) ; "unicode char indices")]
    fn test_extract_token(text: &str, cursor: usize, expected: Option<(char, &str, usize)>) {
        let token = extract_token(text, cursor, SIGILS);
        let token = token.map(|t| (t.sigil, t.query, t.start));
        assert_eq!(
            token,
            expected.map(|(sigil, query, start)| (sigil, query.to_string(), start))
        );
    }

    #[test]
    fn test_splice_at_end() {
        let text = "thanks @al";
        let token = extract_token(text, 10, SIGILS).unwrap();
        let (spliced, cursor) = splice(text, &token, "alice");
        assert_eq!(spliced, "thanks @alice ");
        assert_eq!(cursor, spliced.chars().count());
    }

    #[test]
    fn test_splice_keeps_following_text() {
        let text = "ping @al about this";
        let token = extract_token(text, 8, SIGILS).unwrap();
        let (spliced, cursor) = splice(text, &token, "albert");
        assert_eq!(spliced, "ping @albert about this");
        assert_eq!(cursor, "ping @albert ".chars().count());
    }

    #[test]
    fn test_splice_mid_word() {
        let text = "#zt123 observed";
        let token = extract_token(text, 3, SIGILS).unwrap();
        assert_eq!(token.query, "zt");
        let (spliced, cursor) = splice(text, &token, "ZTF");
        assert_eq!(spliced, "#ZTF 123 observed");
        assert_eq!(cursor, 5);
    }

    #[test]
    fn test_splice_unicode() {
        let text = "merci @zo";
        let token = extract_token(text, 9, SIGILS).unwrap();
        let (spliced, cursor) = splice(text, &token, "zoë");
        assert_eq!(spliced, "merci @zoë ");
        assert_eq!(cursor, 11);
    }
}
