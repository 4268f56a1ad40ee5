//! AST representing a formula.
//!
//! Every node refers back into the formula source using a [`Span`], the tree
//! itself never owns any text.

use crate::types::span::Span;

#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
pub struct Formula {
    pub nodes: Vec<Node>,
}

#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
pub enum Node {
    /// Literal text, emitted verbatim.
    Text(Span),
    /// A `$name` reference.
    Variable(Ident),
    /// A `$[ ... ]` block.
    Block(Block),
}

#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
pub struct Block {
    /// The alias from a `:name:` guard.
    pub guard: Option<Ident>,
    pub primary: Vec<Node>,
    /// The raw text following the alternation, up to the closing delimiter.
    pub fallback: Option<Span>,
}

#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq, Eq))]
pub struct Ident {
    pub span: Span,
}

impl Block {
    /// Returns the variables directly within the primary content, skipping
    /// over any nested blocks.
    pub fn direct_variables(&self) -> impl Iterator<Item = &Ident> {
        self.primary.iter().filter_map(|node| match node {
            Node::Variable(ident) => Some(ident),
            _ => None,
        })
    }
}
