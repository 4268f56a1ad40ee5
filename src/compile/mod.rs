//! Compile the formula into an AST that can be evaluated by the renderer.
//!
//! This process has two stages:
//! - The lexer chunks the formula source into tokens.
//! - The parser constructs an AST from the token stream.

mod lex;
mod parse;

use crate::types::ast;
use crate::types::syntax::Syntax;
use crate::Result;

/// Compile a formula into an AST.
pub fn formula(syntax: &Syntax, source: &str) -> Result<ast::Formula> {
    parse::Parser::new(syntax, source).parse_formula()
}
