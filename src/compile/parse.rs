use crate::compile::lex::{Lexer, Token};
use crate::types::ast;
use crate::types::span::Span;
use crate::types::syntax::Syntax;
use crate::{Error, ErrorKind, Result};

/// The maximum number of blocks that may be nested within each other.
pub const MAX_DEPTH: usize = 128;

/// A parser that constructs an AST from a token stream.
///
/// The parser is implemented as a hand written recursive descent parser, one
/// level of recursion for each nested block up to [`MAX_DEPTH`]. It sometimes
/// needs to peek at the next token to know how to proceed and uses the
/// `peeked` buffer to do this.
pub struct Parser<'engine, 'source> {
    /// A lexer that tokenizes the formula source.
    tokens: Lexer<'engine, 'source>,

    /// Remember a peeked value, even if it was `None`
    peeked: Option<Option<(Token, Span)>>,

    /// How many blocks we are currently nested within.
    depth: usize,
}

impl<'engine, 'source> Parser<'engine, 'source> {
    /// Construct a new parser.
    pub fn new(syntax: &'engine Syntax, source: &'source str) -> Self {
        Self {
            tokens: Lexer::new(syntax, source),
            peeked: None,
            depth: 0,
        }
    }

    /// Parses a formula.
    pub fn parse_formula(mut self) -> Result<ast::Formula> {
        let nodes = self.parse_sequence()?;
        match self.next() {
            None => Ok(ast::Formula { nodes }),
            Some((Token::Alternation, span)) => Err(self.err_alternation_outside_block(span)),
            Some((tk, span)) => {
                panic!("lexer bug: received token `{tk:?}` at {span:?} outside of a block");
            }
        }
    }

    /// Parses nodes until the end of the current block, an alternation or
    /// the end of the formula. The terminating token is not consumed.
    fn parse_sequence(&mut self) -> Result<Vec<ast::Node>> {
        let mut nodes = Vec::new();

        while let Some((tk, span)) = self.peek() {
            let node = match tk {
                Token::BlockClose | Token::Alternation => break,

                // Simply literal text, emit a single node for it.
                Token::Text => {
                    self.next();
                    ast::Node::Text(span)
                }

                // A variable, e.g. `$name`
                Token::Dollar => {
                    self.next();
                    let span = self.expect(Token::Ident);
                    ast::Node::Variable(ast::Ident { span })
                }

                // The start of a block, e.g. `$[ ... ]`
                Token::BlockOpen => {
                    self.next();
                    if self.depth == MAX_DEPTH {
                        return Err(self.err_nesting_too_deep(span));
                    }
                    self.depth += 1;
                    let block = self.parse_block(span)?;
                    self.depth -= 1;
                    ast::Node::Block(block)
                }

                Token::Colon => {
                    let span = self.parse_guard().span;
                    return Err(self.err_misplaced_guard(span));
                }

                Token::Ident => {
                    panic!("lexer bug: received unexpected identifier at {span:?}");
                }
            };
            nodes.push(node);
        }

        Ok(nodes)
    }

    /// Parses the remainder of a block after the begin block token. All of
    /// the following are valid blocks.
    ///
    ///   $[in folder '$folder']
    ///
    ///   $[$name has ## You have]
    ///
    ///   $[:target: for $[$targetName ## you]]
    ///
    fn parse_block(&mut self, begin: Span) -> Result<ast::Block> {
        let guard = match self.peek() {
            Some((Token::Colon, _)) => Some(self.parse_guard().ident),
            _ => None,
        };

        let primary = self.parse_sequence()?;

        match self.next() {
            Some((Token::BlockClose, _)) => Ok(ast::Block {
                guard,
                primary,
                fallback: None,
            }),
            Some((Token::Alternation, alt)) => {
                let fallback = self.parse_fallback(begin, alt)?;
                Ok(ast::Block {
                    guard,
                    primary,
                    fallback: Some(fallback),
                })
            }
            None => Err(self.err_unterminated_block(begin)),
            Some((tk, span)) => {
                panic!("parser bug: sequence ended at token `{tk:?}` at {span:?}");
            }
        }
    }

    /// Parses the raw fallback text following an alternation, up to and
    /// including the matching end block token. Nested blocks are skipped over
    /// without being interpreted.
    ///
    /// Returns the span of the fallback text.
    fn parse_fallback(&mut self, begin: Span, alt: Span) -> Result<Span> {
        let mut depth = 0usize;

        if let Some((Token::Colon, _)) = self.peek() {
            let span = self.parse_guard().span;
            return Err(self.err_misplaced_guard(span));
        }

        loop {
            match self.next() {
                None => return Err(self.err_unterminated_block(begin)),
                Some((Token::BlockOpen, _)) => depth += 1,
                Some((Token::BlockClose, end)) if depth == 0 => {
                    return Ok(Span::from(alt.n..end.m));
                }
                Some((Token::BlockClose, _)) => depth -= 1,
                Some((Token::Colon, span)) if depth == 0 => {
                    let ident = self.expect(Token::Ident);
                    let end = self.expect(Token::Colon);
                    return Err(self.err_misplaced_guard(span.combine(ident).combine(end)));
                }
                Some(_) => {}
            }
        }
    }

    /// Parses an alias guard, e.g. `:target:`.
    fn parse_guard(&mut self) -> GuardSpan {
        let begin = self.expect(Token::Colon);
        let span = self.expect(Token::Ident);
        let end = self.expect(Token::Colon);
        GuardSpan {
            ident: ast::Ident { span },
            span: begin.combine(end),
        }
    }

    /// Parses the specified token and returns its span.
    ///
    /// Only used where the lexer guarantees the token sequence.
    fn expect(&mut self, exp: Token) -> Span {
        match self.next() {
            Some((tk, span)) if tk == exp => span,
            Some((tk, span)) => panic!(
                "lexer bug: expected {}, found {} at {span:?}",
                exp.human(),
                tk.human()
            ),
            None => panic!("lexer bug: expected {}, found EOF", exp.human()),
        }
    }

    /// Returns a copy of the next token without affecting the result of the
    /// following `.next()` call.
    fn peek(&mut self) -> Option<(Token, Span)> {
        if let o @ None = &mut self.peeked {
            *o = Some(self.tokens.next());
        }
        self.peeked.flatten()
    }

    /// Returns the next token and span in the stream.
    fn next(&mut self) -> Option<(Token, Span)> {
        match self.peeked.take() {
            Some(v) => v,
            None => self.tokens.next(),
        }
    }

    fn source(&self) -> &str {
        self.tokens.source
    }

    fn err_unterminated_block(&self, begin: Span) -> Error {
        Error::syntax(
            ErrorKind::UnterminatedBlock,
            "unterminated block",
            self.source(),
            begin,
        )
    }

    fn err_alternation_outside_block(&self, span: Span) -> Error {
        Error::syntax(
            ErrorKind::AlternationOutsideBlock,
            "alternation outside of a block",
            self.source(),
            span,
        )
    }

    fn err_nesting_too_deep(&self, begin: Span) -> Error {
        Error::syntax(
            ErrorKind::NestingTooDeep,
            format!("blocks nested deeper than {MAX_DEPTH} levels"),
            self.source(),
            begin,
        )
    }

    fn err_misplaced_guard(&self, span: Span) -> Error {
        Error::syntax(
            ErrorKind::MisplacedAliasGuard,
            "alias guard must directly follow the start of a block",
            self.source(),
            span,
        )
    }
}

/// A parsed alias guard along with the span of its delimiters.
struct GuardSpan {
    ident: ast::Ident,
    span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::types::ast::{Block, Formula, Ident, Node};

    #[test]
    fn parse_empty() {
        assert_eq!(parse("").unwrap(), Formula { nodes: vec![] });
    }

    #[test]
    fn parse_text_and_variable() {
        let formula = parse("Hello, $name").unwrap();
        assert_eq!(
            formula,
            Formula {
                nodes: vec![
                    Node::Text(Span::from(0..7)),
                    Node::Variable(Ident {
                        span: Span::from(8..12)
                    }),
                ]
            }
        );
    }

    #[test]
    fn parse_block_with_fallback() {
        let formula = parse("$[$name has ## You have]").unwrap();
        assert_eq!(
            formula,
            Formula {
                nodes: vec![Node::Block(Block {
                    guard: None,
                    primary: vec![
                        Node::Variable(Ident {
                            span: Span::from(3..7)
                        }),
                        Node::Text(Span::from(7..12)),
                    ],
                    fallback: Some(Span::from(14..23)),
                })]
            }
        );
    }

    #[test]
    fn parse_block_with_guard() {
        let source = "$[:target: for $[$targetName ## you]]";
        let formula = parse(source).unwrap();
        let block = match &formula.nodes[..] {
            [Node::Block(block)] => block,
            nodes => panic!("unexpected nodes {nodes:?}"),
        };
        assert_eq!(&source[block.guard.unwrap().span], "target");
        assert_eq!(block.fallback, None);
        match &block.primary[..] {
            [Node::Text(text), Node::Block(nested)] => {
                assert_eq!(&source[*text], " for ");
                assert_eq!(nested.guard, None);
                assert_eq!(&source[nested.fallback.unwrap()], " you");
            }
            nodes => panic!("unexpected nodes {nodes:?}"),
        }
    }

    #[test]
    fn parse_fallback_is_raw() {
        let source = "$[$a ## see $b or $[$c ## d] ## e]!";
        let formula = parse(source).unwrap();
        match &formula.nodes[..] {
            [Node::Block(block), Node::Text(bang)] => {
                assert_eq!(&source[block.fallback.unwrap()], " see $b or $[$c ## d] ## e");
                assert_eq!(&source[*bang], "!");
            }
            nodes => panic!("unexpected nodes {nodes:?}"),
        }
    }

    #[test]
    fn parse_empty_block() {
        let formula = parse("$[]").unwrap();
        assert_eq!(
            formula,
            Formula {
                nodes: vec![Node::Block(Block {
                    guard: None,
                    primary: vec![],
                    fallback: None,
                })]
            }
        );
    }

    #[test]
    fn parse_err_unterminated_block() {
        let err = parse("lorem $[ipsum").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedBlock);
        assert_eq!(err.span(), 6..8);
    }

    #[test]
    fn parse_err_unterminated_nested_block() {
        let err = parse("$[lorem $[ipsum]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedBlock);
        assert_eq!(err.span(), 0..2);
    }

    #[test]
    fn parse_err_unterminated_fallback() {
        let err = parse("$[lorem ## ipsum $[dolor]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnterminatedBlock);
        assert_eq!(err.span(), 0..2);
    }

    #[test]
    fn parse_err_alternation_outside_block() {
        let err = parse("lorem ## ipsum").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlternationOutsideBlock);
        assert_eq!(err.span(), 6..8);
    }

    #[test]
    fn parse_err_guard_after_alternation() {
        let err = parse("$[:none: no coupons ## :one: one coupon]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MisplacedAliasGuard);
        assert_eq!(err.span(), 23..28);
    }

    #[test]
    fn parse_err_guard_after_second_alternation() {
        let err = parse("$[a ## b ## :c: d]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MisplacedAliasGuard);
        assert_eq!(err.span(), 12..15);
    }

    #[test]
    fn parse_nesting_at_limit() {
        let source = nested(MAX_DEPTH);
        let formula = parse(&source).unwrap();
        let mut nodes = &formula.nodes;
        let mut depth = 0;
        while let [Node::Block(block)] = &nodes[..] {
            depth += 1;
            nodes = &block.primary;
        }
        assert_eq!(depth, MAX_DEPTH);
    }

    #[test]
    fn parse_err_nesting_too_deep() {
        let err = parse(&nested(MAX_DEPTH + 1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
        assert_eq!(err.span(), 2 * MAX_DEPTH..2 * MAX_DEPTH + 2);
    }

    #[test]
    fn parse_err_nesting_too_deep_unterminated() {
        let source = "$[".repeat(100_000);
        let err = parse(&source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
    }

    #[test]
    fn parse_nesting_in_fallback_is_not_limited() {
        let source = format!("$[$a ## {}]", nested(10 * MAX_DEPTH));
        let formula = parse(&source).unwrap();
        assert_eq!(formula.nodes.len(), 1);
    }

    fn nested(depth: usize) -> String {
        format!("{}x{}", "$[".repeat(depth), "]".repeat(depth))
    }

    #[track_caller]
    fn parse(source: &str) -> Result<Formula> {
        let syntax = Syntax::default();
        Parser::new(&syntax, source).parse_formula()
    }
}
