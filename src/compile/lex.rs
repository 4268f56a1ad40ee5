use crate::types::span::Span;
use crate::types::syntax::Syntax;

/// A lexer that tokenizes the formula source into distinct chunks so that the
/// parser doesn't have to operate on raw text.
///
/// The lexer never fails, malformed formulas are reported by the parser. It
/// is implemented as an iterator over tokens and their spans.
#[cfg_attr(test, derive(Debug))]
pub struct Lexer<'engine, 'source> {
    /// The syntax configuration.
    syntax: &'engine Syntax,

    /// The original formula source.
    pub source: &'source str,

    /// A cursor over the formula source.
    cursor: usize,

    /// How many blocks we are currently nested within.
    depth: usize,

    /// Whether an alias guard may start at the cursor.
    guard: bool,

    /// Tokens that have already been lexed but not yet returned, in reverse
    /// order.
    pending: Vec<(Token, Span)>,
}

/// The unit yielded by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Literal text
    Text,
    /// The start of a variable, e.g. `$`
    Dollar,
    /// A variable or alias name
    Ident,
    /// Begin block, e.g. `$[`
    BlockOpen,
    /// End block, e.g. `]`
    BlockClose,
    /// Alternation, e.g. `##`
    Alternation,
    /// One side of an alias guard, e.g. `:`
    Colon,
}

impl<'engine, 'source> Lexer<'engine, 'source> {
    /// Construct a new lexer.
    pub fn new(syntax: &'engine Syntax, source: &'source str) -> Self {
        Self {
            syntax,
            source,
            cursor: 0,
            depth: 0,
            guard: false,
            pending: Vec::new(),
        }
    }

    /// Returns the next token and span.
    fn lex(&mut self) -> Option<(Token, Span)> {
        if let Some(next) = self.pending.pop() {
            return Some(next);
        }

        let i = self.cursor;

        if self.source[i..].is_empty() {
            return None;
        }

        if std::mem::take(&mut self.guard) {
            if let Some(guard) = self.lex_guard(i) {
                return Some(guard);
            }
        }

        match self.find_at(i) {
            // The cursor is exactly at a token.
            Some((tk, j, k)) if i == j => Some(self.lex_token(tk, j, k)),
            // Emit the literal text leading up to the token, the token itself
            // is lexed on the next call.
            Some((_, j, _)) => {
                self.cursor = j;
                Some((Token::Text, Span::from(i..j)))
            }
            None => {
                let j = self.source.len();
                self.cursor = j;
                Some((Token::Text, Span::from(i..j)))
            }
        }
    }

    /// Updates the cursor and lexer state for a token found at `j..k`.
    fn lex_token(&mut self, tk: Token, j: usize, k: usize) -> (Token, Span) {
        self.cursor = k;
        match tk {
            Token::BlockOpen => {
                self.depth += 1;
                self.guard = true;
            }
            Token::BlockClose => {
                self.depth -= 1;
            }
            Token::Alternation => {
                self.guard = self.depth > 0;
            }
            Token::Dollar => {
                let n = self.lex_while(k, is_ident);
                self.cursor = n;
                self.pending.push((Token::Ident, Span::from(k..n)));
            }
            Token::Text | Token::Ident | Token::Colon => {
                panic!("lexer bug: `{}` is not searched for", tk.human())
            }
        }
        (tk, Span::from(j..k))
    }

    /// Attempts to lex an alias guard, e.g. `:name:`, at the start of a block
    /// or alternation branch. Any whitespace before the guard is skipped.
    fn lex_guard(&mut self, i: usize) -> Option<(Token, Span)> {
        let guard = self.syntax.guard.as_str();

        // xxxx  :nnnn:xxxx
        //    ^  ^^   ^^
        //    i  ma   bn

        let rest = &self.source[i..];
        let m = i + rest.len() - rest.trim_start().len();
        if !self.source[m..].starts_with(guard) {
            return None;
        }
        let a = m + guard.len();
        let b = self.lex_while(a, is_ident);
        if a == b || !self.source[b..].starts_with(guard) {
            return None;
        }
        let n = b + guard.len();

        self.cursor = n;
        self.pending.push((Token::Colon, Span::from(b..n)));
        self.pending.push((Token::Ident, Span::from(a..b)));
        Some((Token::Colon, Span::from(m..a)))
    }

    /// Finds the next token at or after `i`, returning the token and its
    /// start and end offsets.
    fn find_at(&self, i: usize) -> Option<(Token, usize, usize)> {
        self.source[i..]
            .char_indices()
            .map(|(d, _)| i + d)
            .find_map(|j| self.starts_with(j).map(|(tk, len)| (tk, j, j + len)))
    }

    /// Returns the token that starts exactly at `j` and its length.
    fn starts_with(&self, j: usize) -> Option<(Token, usize)> {
        let Syntax {
            variable,
            begin_block,
            end_block,
            alternation,
            ..
        } = self.syntax;
        let rest = &self.source[j..];

        if rest.starts_with(begin_block.as_str()) {
            return Some((Token::BlockOpen, begin_block.len()));
        }
        if self.depth > 0 && rest.starts_with(end_block.as_str()) {
            return Some((Token::BlockClose, end_block.len()));
        }
        if rest.starts_with(alternation.as_str()) {
            return Some((Token::Alternation, alternation.len()));
        }
        if rest.starts_with(variable.as_str())
            && rest[variable.len()..].chars().next().map_or(false, is_ident)
        {
            return Some((Token::Dollar, variable.len()));
        }
        None
    }

    /// Returns the offset of the first character at or after `i` that does
    /// not satisfy the predicate.
    fn lex_while<P>(&self, i: usize, pred: P) -> usize
    where
        P: Fn(char) -> bool,
    {
        self.source[i..]
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map(|(d, _)| i + d)
            .unwrap_or(self.source.len())
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = (Token, Span);

    fn next(&mut self) -> Option<Self::Item> {
        self.lex()
    }
}

impl Token {
    pub fn human(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Dollar => "variable",
            Self::Ident => "identifier",
            Self::BlockOpen => "begin block",
            Self::BlockClose => "end block",
            Self::Alternation => "alternation",
            Self::Colon => "alias guard",
        }
    }
}

#[cfg(feature = "unicode")]
fn is_ident(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_ident(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='Z' | 'a'..='z' | '_')
}
