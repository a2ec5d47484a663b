//! Scanner for template sources.
//!
//! Splits template text into [`Token`]s on demand. Literal content becomes
//! `Text`; every `{% name contents %}` tag yields a `TagName` followed by a
//! `TagContents` (possibly empty).

use super::error::ScanError;
use super::token::{Position, Token, TokenKind, TokenSource};

const TAG_OPEN: &str = "{%";
const TAG_CLOSE: &str = "%}";

pub struct Scanner {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    current: Option<Token>,
    pending: Option<Token>,
    error: Option<ScanError>,
    done: bool,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            current: None,
            pending: None,
            error: None,
            done: false,
        }
    }

    /// Drain the scanner into a vector, stopping at the first error.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        while self.advance() {
            if let Some(t) = self.current.take() {
                tokens.push(t);
            }
        }
        match self.error {
            Some(e) => Err(e),
            None => Ok(tokens),
        }
    }

    fn scan_text(&mut self) -> Token {
        let start = self.position();
        let mut value = String::new();
        while !self.is_at_end() && !self.at(TAG_OPEN) {
            value.push(self.bump());
        }
        Token::new(TokenKind::Text, value, start)
    }

    /// Scan one tag, returning its name token and queueing its contents.
    fn scan_tag(&mut self) -> Result<Token, ScanError> {
        let tag_pos = self.position();
        self.bump_str(TAG_OPEN);
        self.skip_whitespace();

        let name_pos = self.position();
        let mut name = String::new();
        while !self.is_at_end() && is_name_char(self.peek()) {
            name.push(self.bump());
        }
        if name.is_empty() {
            let mut found = String::new();
            while !self.is_at_end() && !self.peek().is_whitespace() && !self.at(TAG_CLOSE) {
                found.push(self.bump());
            }
            return Err(ScanError::InvalidTagName {
                found,
                pos: name_pos,
            });
        }

        self.skip_whitespace();
        let contents_pos = self.position();
        let mut contents = String::new();
        loop {
            if self.is_at_end() {
                return Err(ScanError::UnterminatedTag { pos: tag_pos });
            }
            if self.at(TAG_CLOSE) {
                self.bump_str(TAG_CLOSE);
                break;
            }
            contents.push(self.bump());
        }
        let contents = contents.trim_end().to_string();

        self.pending = Some(Token::new(TokenKind::TagContents, contents, contents_pos));
        Ok(Token::new(TokenKind::TagName, name, name_pos))
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    fn peek(&self) -> char {
        self.chars[self.pos]
    }

    fn bump(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        ch
    }

    fn bump_str(&mut self, s: &str) {
        for _ in s.chars() {
            self.bump();
        }
    }

    fn at(&self, s: &str) -> bool {
        let mut i = self.pos;
        for c in s.chars() {
            if self.chars.get(i) != Some(&c) {
                return false;
            }
            i += 1;
        }
        true
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.peek().is_whitespace() {
            self.bump();
        }
    }
}

impl TokenSource for Scanner {
    fn advance(&mut self) -> bool {
        self.current = None;
        if self.done {
            return false;
        }
        if let Some(t) = self.pending.take() {
            self.current = Some(t);
            return true;
        }
        if self.is_at_end() {
            self.done = true;
            return false;
        }

        if self.at(TAG_OPEN) {
            match self.scan_tag() {
                Ok(t) => self.current = Some(t),
                Err(e) => {
                    self.error = Some(e);
                    self.done = true;
                    return false;
                }
            }
        } else {
            self.current = Some(self.scan_text());
        }
        true
    }

    fn current(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn last_error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_values(src: &str) -> Vec<(TokenKind, String)> {
        Scanner::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.value))
            .collect()
    }

    #[test]
    fn scan_plain_text() {
        let tokens = kinds_and_values("hello world");
        assert_eq!(tokens, vec![(TokenKind::Text, "hello world".to_string())]);
    }

    #[test]
    fn scan_empty_source() {
        assert!(kinds_and_values("").is_empty());
    }

    #[test]
    fn scan_tag_yields_name_and_contents() {
        let tokens = kinds_and_values("{% func Page(title string) %}");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::TagName, "func".to_string()),
                (TokenKind::TagContents, "Page(title string)".to_string()),
            ]
        );
    }

    #[test]
    fn scan_tag_without_contents_yields_empty_contents() {
        let tokens = kinds_and_values("{% endfunc %}");
        assert_eq!(tokens[0], (TokenKind::TagName, "endfunc".to_string()));
        assert_eq!(tokens[1], (TokenKind::TagContents, String::new()));
    }

    #[test]
    fn scan_tag_without_spaces() {
        let tokens = kinds_and_values("{%s name%}");
        assert_eq!(tokens[0], (TokenKind::TagName, "s".to_string()));
        assert_eq!(tokens[1], (TokenKind::TagContents, "name".to_string()));
    }

    #[test]
    fn scan_text_between_tags() {
        let tokens = kinds_and_values("<b>{% s x %}</b>");
        let kinds: Vec<TokenKind> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Text,
                TokenKind::TagName,
                TokenKind::TagContents,
                TokenKind::Text,
            ]
        );
        assert_eq!(tokens[0].1, "<b>");
        assert_eq!(tokens[3].1, "</b>");
    }

    #[test]
    fn scan_lone_percent_and_brace_are_text() {
        let tokens = kinds_and_values("100% {x}");
        assert_eq!(tokens, vec![(TokenKind::Text, "100% {x}".to_string())]);
    }

    #[test]
    fn scan_positions_track_lines_and_columns() {
        let tokens = Scanner::new("ab\n  {% d n %}").tokenize().unwrap();
        assert_eq!(tokens[0].pos, Position::new(1, 1));
        assert_eq!(tokens[1].pos, Position::new(2, 6));
        assert_eq!(tokens[2].pos, Position::new(2, 8));
    }

    #[test]
    fn scan_unterminated_tag_is_an_error() {
        let err = Scanner::new("text {% s name").tokenize().unwrap_err();
        assert_eq!(
            err,
            ScanError::UnterminatedTag {
                pos: Position::new(1, 6)
            }
        );
    }

    #[test]
    fn scan_invalid_tag_name_is_an_error() {
        let err = Scanner::new("{% ( %}").tokenize().unwrap_err();
        match err {
            ScanError::InvalidTagName { found, pos } => {
                assert_eq!(found, "(");
                assert_eq!(pos, Position::new(1, 4));
            }
            other => panic!("expected InvalidTagName, got {other:?}"),
        }
    }

    #[test]
    fn error_is_reported_after_preceding_tokens() {
        let mut scanner = Scanner::new("hi {%");
        assert!(scanner.advance());
        assert_eq!(scanner.current().map(|t| t.kind), Some(TokenKind::Text));
        assert!(scanner.last_error().is_none());
        assert!(!scanner.advance());
        assert!(scanner.current().is_none());
        assert!(scanner.last_error().is_some());
        assert!(!scanner.advance());
    }
}
