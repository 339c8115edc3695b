//! MCS tokenizer

// SPDX-FileCopyrightText: © 2023 Marcus Rowe <undisbeliever@gmail.com>
//
// SPDX-License-Identifier: MIT

use crate::errors::{ErrorWithLine, TokenizeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// All-uppercase definition keyword (`NAMESPACE`, `FUNC`, `SET`, ...)
    Def,
    Ident,
    /// Backtick-delimited command text, delimiters included
    Command,
    StartBlock,
    EndBlock,
    /// `=`, `+=`, `-=`, `*=`, `/=`, `%=`
    Assignment,
    /// Double-quoted string literal, quotes included
    Str,
    Integer,
    /// Comment text, including the leading `;`
    Comment,
    /// `==`, `>`, `<`, `>=`, `<=`
    Condition,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
    pub(crate) kind: TokenKind,
    pub(crate) text: &'a str,
    pub(crate) line: u32,
}

enum State {
    Main,
    Comment,
    Def,
    Ident,
    Str,
    Command,
    Number,
    Value,
}

struct Scanner<'a> {
    src: &'a str,

    // start of the pending token and the current position, both byte offsets
    start: usize,
    pos: usize,

    // 1-based
    line: u32,
    // line the pending token started on
    token_line: u32,

    tokens: Vec<Token<'a>>,
}

fn is_linear_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n')
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            start: 0,
            pos: 0,
            line: 1,
            token_line: 1,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_second(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos + 1).copied()
    }

    fn bump(&mut self) {
        if self.start == self.pos {
            self.token_line = self.line;
        }
        if let Some(c) = self.peek() {
            if c == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn emit(&mut self, kind: TokenKind) {
        let line = match self.start == self.pos {
            true => self.line,
            false => self.token_line,
        };
        self.tokens.push(Token {
            kind,
            text: &self.src[self.start..self.pos],
            line,
        });
        self.start = self.pos;
    }

    // The offending character, decoded so multi-byte characters are reported whole.
    fn current_char(&self) -> char {
        self.src[self.pos..].chars().next().unwrap_or('\0')
    }

    fn run(&mut self) -> Result<(), ErrorWithLine> {
        let mut state = State::Main;

        loop {
            state = match state {
                State::Main => match self.scan_main()? {
                    Some(next) => next,
                    None => return Ok(()),
                },
                State::Comment => self.scan_comment(),
                State::Def => self.scan_def(),
                State::Ident => self.scan_ident(),
                State::Str => self.scan_string()?,
                State::Command => self.scan_command()?,
                State::Number => self.scan_number(),
                State::Value => self.scan_value()?,
            };
        }
    }

    /// Dispatches on the next character.  Returns `None` once the source is
    /// exhausted and the `End` token has been emitted.
    fn scan_main(&mut self) -> Result<Option<State>, ErrorWithLine> {
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => {
                    self.ignore();
                    self.emit(TokenKind::End);
                    return Ok(None);
                }
            };

            match c {
                b';' => {
                    self.bump();
                    return Ok(Some(State::Comment));
                }
                c if is_linear_whitespace(c) => {
                    self.bump();
                    self.ignore();
                }
                b'A'..=b'Z' | b'_' => {
                    self.bump();
                    return Ok(Some(State::Def));
                }
                b'{' => {
                    self.bump();
                    self.emit(TokenKind::StartBlock);
                }
                b'}' => {
                    self.bump();
                    self.emit(TokenKind::EndBlock);
                }
                b'=' => {
                    self.bump();
                    // a second `=` turns the assignment into an equality condition
                    if self.peek() == Some(b'=') {
                        self.bump();
                        self.emit(TokenKind::Condition);
                    } else {
                        self.emit(TokenKind::Assignment);
                    }
                    return Ok(Some(State::Value));
                }
                b'"' => {
                    self.bump();
                    return Ok(Some(State::Str));
                }
                b'`' => {
                    self.bump();
                    return Ok(Some(State::Command));
                }
                b'>' | b'<' => {
                    self.bump();
                    if self.peek() == Some(b'=') {
                        self.bump();
                    }
                    self.emit(TokenKind::Condition);
                    return Ok(Some(State::Value));
                }
                b'+' | b'-' | b'*' | b'/' | b'%' if self.peek_second() == Some(b'=') => {
                    self.bump();
                    self.bump();
                    self.emit(TokenKind::Assignment);
                    return Ok(Some(State::Value));
                }
                b'0'..=b'9' | b'-' => {
                    self.bump();
                    return Ok(Some(State::Number));
                }
                _ => {
                    return Err(ErrorWithLine(
                        self.line,
                        TokenizeError::UnrecognizedCharacter(self.current_char()),
                    ));
                }
            }
        }
    }

    fn scan_comment(&mut self) -> State {
        while let Some(c) = self.peek() {
            if c == b'\n' {
                break;
            }
            self.bump();
        }
        self.emit(TokenKind::Comment);
        State::Main
    }

    fn scan_def(&mut self) -> State {
        while let Some(b'A'..=b'Z' | b'_') = self.peek() {
            self.bump();
        }
        self.emit(TokenKind::Def);

        // exactly one separating space is skipped before the identifier
        if self.peek() == Some(b' ') {
            self.bump();
            self.ignore();
        }
        State::Ident
    }

    fn scan_ident(&mut self) -> State {
        while let Some(b'A'..=b'Z' | b'a'..=b'z' | b'_') = self.peek() {
            self.bump();
        }
        self.emit(TokenKind::Ident);
        State::Main
    }

    fn scan_string(&mut self) -> Result<State, ErrorWithLine> {
        loop {
            match self.peek() {
                None => {
                    return Err(ErrorWithLine(
                        self.token_line,
                        TokenizeError::UnterminatedString,
                    ));
                }
                Some(b'"') => {
                    self.bump();
                    self.emit(TokenKind::Str);
                    return Ok(State::Main);
                }
                Some(b'\\') => {
                    // an escaped quote does not terminate the string
                    self.bump();
                    if self.peek() == Some(b'"') {
                        self.bump();
                    }
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn scan_command(&mut self) -> Result<State, ErrorWithLine> {
        loop {
            match self.peek() {
                None => {
                    return Err(ErrorWithLine(
                        self.token_line,
                        TokenizeError::UnterminatedCommand,
                    ));
                }
                Some(b'`') => {
                    self.bump();
                    self.emit(TokenKind::Command);
                    return Ok(State::Main);
                }
                Some(_) => self.bump(),
            }
        }
    }

    // The digits are not validated, the token text is embedded into the
    // generated commands verbatim.
    fn scan_number(&mut self) -> State {
        while let Some(c) = self.peek() {
            if is_linear_whitespace(c) {
                break;
            }
            self.bump();
        }
        self.emit(TokenKind::Integer);
        State::Main
    }

    /// Right-hand operand of an assignment or condition.
    fn scan_value(&mut self) -> Result<State, ErrorWithLine> {
        loop {
            match self.peek() {
                None => return Ok(State::Main),
                Some(c) if is_linear_whitespace(c) => {
                    self.bump();
                    self.ignore();
                }
                Some(b'0'..=b'9' | b'-') => {
                    self.bump();
                    return Ok(State::Number);
                }
                Some(b'A'..=b'Z' | b'a'..=b'z' | b'_') => {
                    self.bump();
                    return Ok(State::Ident);
                }
                Some(b'"') => {
                    self.bump();
                    return Ok(State::Str);
                }
                Some(_) => {
                    return Err(ErrorWithLine(
                        self.line,
                        TokenizeError::InvalidValueCharacter(self.current_char()),
                    ));
                }
            }
        }
    }
}

/// Tokenizes an entire source file.  Aborts on the first lexical error.
///
/// The returned sequence always ends with an `End` token.
pub(crate) fn tokenize(src: &str) -> Result<Vec<Token>, ErrorWithLine> {
    let mut scanner = Scanner::new(src);
    scanner.run()?;
    Ok(scanner.tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str) -> Vec<(TokenKind, &str, u32)> {
        tokenize(src)
            .unwrap()
            .iter()
            .map(|t| (t.kind, t.text, t.line))
            .collect()
    }

    fn first_error(src: &str) -> ErrorWithLine {
        tokenize(src).unwrap_err()
    }

    use TokenKind::*;

    #[test]
    fn namespace_line() {
        assert_eq!(
            tokens("NAMESPACE foo"),
            [(Def, "NAMESPACE", 1), (Ident, "foo", 1), (End, "", 1)]
        );
    }

    #[test]
    fn blocks() {
        assert_eq!(
            tokens("FUNC main { }"),
            [
                (Def, "FUNC", 1),
                (Ident, "main", 1),
                (StartBlock, "{", 1),
                (EndBlock, "}", 1),
                (End, "", 1),
            ]
        );
    }

    #[test]
    fn assignment_and_condition_operators() {
        let inputs = [
            ("= 5", (Assignment, "="), (Integer, "5")),
            ("== 5", (Condition, "=="), (Integer, "5")),
            ("> x", (Condition, ">"), (Ident, "x")),
            ("< x", (Condition, "<"), (Ident, "x")),
            (">= 12", (Condition, ">="), (Integer, "12")),
            ("<= -3", (Condition, "<="), (Integer, "-3")),
            ("+= 1", (Assignment, "+="), (Integer, "1")),
            ("-= 2", (Assignment, "-="), (Integer, "2")),
            ("*= x", (Assignment, "*="), (Ident, "x")),
            ("/= y", (Assignment, "/="), (Ident, "y")),
            ("%= 7", (Assignment, "%="), (Integer, "7")),
        ];

        for (input, op, value) in inputs {
            let expected = [
                (op.0, op.1, 1),
                (value.0, value.1, 1),
                (End, "", 1),
            ];
            assert_eq!(tokens(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(
            tokens("; first\nFUNC x"),
            [
                (Comment, "; first", 1),
                (Def, "FUNC", 2),
                (Ident, "x", 2),
                (End, "", 2),
            ]
        );
    }

    #[test]
    fn comment_at_end_of_input() {
        assert_eq!(tokens("; done"), [(Comment, "; done", 1), (End, "", 1)]);
    }

    #[test]
    fn string_keeps_delimiters() {
        assert_eq!(
            tokens(r#""hi there""#),
            [(Str, r#""hi there""#, 1), (End, "", 1)]
        );
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        assert_eq!(
            tokens(r#""a\"b""#),
            [(Str, r#""a\"b""#, 1), (End, "", 1)]
        );
    }

    #[test]
    fn command_keeps_delimiters() {
        assert_eq!(
            tokens("`say #{greeting}`"),
            [(Command, "`say #{greeting}`", 1), (End, "", 1)]
        );
    }

    #[test]
    fn negative_integer() {
        assert_eq!(tokens("-12"), [(Integer, "-12", 1), (End, "", 1)]);
    }

    #[test]
    fn number_runs_to_whitespace() {
        // the digits are never validated
        assert_eq!(tokens("12ab"), [(Integer, "12ab", 1), (End, "", 1)]);
    }

    #[test]
    fn value_after_newline() {
        assert_eq!(
            tokens("=\n5"),
            [(Assignment, "=", 1), (Integer, "5", 2), (End, "", 2)]
        );
    }

    #[test]
    fn missing_value_at_end_of_input() {
        assert_eq!(tokens("= "), [(Assignment, "=", 1), (End, "", 1)]);
    }

    #[test]
    fn keyword_without_separating_space() {
        // no space after the keyword: the identifier is empty
        assert_eq!(
            tokens("FUNC{"),
            [
                (Def, "FUNC", 1),
                (Ident, "", 1),
                (StartBlock, "{", 1),
                (End, "", 1),
            ]
        );
    }

    #[test]
    fn keyword_may_contain_underscores() {
        assert_eq!(
            tokens("_DEBUG x"),
            [(Def, "_DEBUG", 1), (Ident, "x", 1), (End, "", 1)]
        );
    }

    #[test]
    fn line_numbers() {
        assert_eq!(
            tokens("FUNC a\n{\n`x`\n}"),
            [
                (Def, "FUNC", 1),
                (Ident, "a", 1),
                (StartBlock, "{", 2),
                (Command, "`x`", 3),
                (EndBlock, "}", 4),
                (End, "", 4),
            ]
        );
    }

    #[test]
    fn unterminated_string() {
        assert_eq!(
            first_error("\"abc"),
            ErrorWithLine(1, TokenizeError::UnterminatedString)
        );
    }

    #[test]
    fn unterminated_string_reports_starting_line() {
        assert_eq!(
            first_error("\n\n\"abc\ndef"),
            ErrorWithLine(3, TokenizeError::UnterminatedString)
        );
    }

    #[test]
    fn unterminated_command() {
        assert_eq!(
            first_error("`say hi"),
            ErrorWithLine(1, TokenizeError::UnterminatedCommand)
        );
    }

    #[test]
    fn unrecognized_character() {
        assert_eq!(
            first_error("NAMESPACE ns\n?"),
            ErrorWithLine(2, TokenizeError::UnrecognizedCharacter('?'))
        );
    }

    #[test]
    fn lone_operator_is_unrecognized() {
        assert_eq!(
            first_error("+"),
            ErrorWithLine(1, TokenizeError::UnrecognizedCharacter('+'))
        );
    }

    #[test]
    fn invalid_value_character() {
        assert_eq!(
            first_error("= ?"),
            ErrorWithLine(1, TokenizeError::InvalidValueCharacter('?'))
        );
    }

    #[test]
    fn empty_source() {
        assert_eq!(tokens(""), [(End, "", 1)]);
    }
}
