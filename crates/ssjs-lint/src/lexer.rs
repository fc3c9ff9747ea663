//! Character classification for script text.
//!
//! [`Lexer`] walks script text as a four-state machine (code, inside a quoted
//! literal, inside a line comment, inside a block comment) and labels every
//! character with the context it appears in. The boundary scanner uses it to
//! find a closing delimiter that is really in code, and the line rules use it
//! to blank literals and comments before pattern matching.

use std::iter::Peekable;
use std::str::CharIndices;

/// The quoting style of a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QuoteKind {
    Single,
    Double,
    Template,
}

impl QuoteKind {
    const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            '`' => Some(Self::Template),
            _ => None,
        }
    }

    const fn closing(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
            Self::Template => '`',
        }
    }

    /// Single- and double-quoted literals cannot span lines.
    const fn spans_lines(self) -> bool {
        matches!(self, Self::Template)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    Quote { kind: QuoteKind, escaped: bool },
    LineComment,
    BlockComment { opened_at: usize, after_star: bool },
}

/// The context a character appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Ordinary code, including line breaks that end a comment or literal.
    Code,
    /// An opening or closing quote character.
    Quote,
    /// A character inside a literal, escapes included.
    Literal,
    /// A character inside a comment, its markers included.
    Comment,
}

/// One classified character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lexeme {
    pub(crate) offset: usize,
    pub(crate) ch: char,
    pub(crate) class: CharClass,
}

/// Iterator classifying each character of script text.
pub(crate) struct Lexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    state: State,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices().peekable(),
            state: State::Code,
        }
    }

    fn classify_code(&mut self, offset: usize, ch: char) -> CharClass {
        if let Some(kind) = QuoteKind::from_char(ch) {
            self.state = State::Quote {
                kind,
                escaped: false,
            };
            return CharClass::Quote;
        }
        if ch != '/' {
            return CharClass::Code;
        }
        match self.chars.peek() {
            Some((_, '/')) => {
                self.state = State::LineComment;
                CharClass::Comment
            }
            Some((_, '*')) => {
                self.state = State::BlockComment {
                    opened_at: offset,
                    after_star: false,
                };
                CharClass::Comment
            }
            _ => CharClass::Code,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, ch) = self.chars.next()?;
        let class = match self.state {
            State::Code => self.classify_code(offset, ch),
            State::Quote { escaped: true, kind } => {
                self.state = State::Quote {
                    kind,
                    escaped: false,
                };
                CharClass::Literal
            }
            State::Quote { kind, .. } if ch == kind.closing() => {
                self.state = State::Code;
                CharClass::Quote
            }
            State::Quote { kind, .. } if ch == '\n' && !kind.spans_lines() => {
                self.state = State::Code;
                CharClass::Code
            }
            State::Quote { kind, .. } => {
                self.state = State::Quote {
                    kind,
                    escaped: ch == '\\',
                };
                CharClass::Literal
            }
            State::LineComment if ch == '\n' => {
                self.state = State::Code;
                CharClass::Code
            }
            State::LineComment => CharClass::Comment,
            State::BlockComment {
                after_star: true, ..
            } if ch == '/' => {
                self.state = State::Code;
                CharClass::Comment
            }
            State::BlockComment { opened_at, .. } => {
                // The star of the opening marker cannot also close the comment.
                let after_star = ch == '*' && offset > opened_at + 1;
                self.state = State::BlockComment {
                    opened_at,
                    after_star,
                };
                CharClass::Comment
            }
        };
        Some(Lexeme { offset, ch, class })
    }
}

/// Replaces literal contents and comments with spaces, one space per
/// character, keeping quote characters and line breaks.
///
/// Every line keeps its character count, so character columns computed on
/// the result match the input.
pub(crate) fn blank_literals(text: &str) -> String {
    Lexer::new(text)
        .map(|lexeme| match lexeme.class {
            CharClass::Code | CharClass::Quote => lexeme.ch,
            CharClass::Literal | CharClass::Comment if is_line_break(lexeme.ch) => lexeme.ch,
            CharClass::Literal | CharClass::Comment => ' ',
        })
        .collect()
}

/// Replaces every character except line breaks with spaces, keeping the byte
/// length of the input.
pub(crate) fn blank_preserving_bytes(text: &str, out: &mut String) {
    for ch in text.chars() {
        if is_line_break(ch) {
            out.push(ch);
        } else {
            out.extend(std::iter::repeat_n(' ', ch.len_utf8()));
        }
    }
}

const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r')
}
