use crate::symbols::SymbolTable;
use crate::types::ast::{Block, Formula, Ident, Node};

/// Walks the formula AST depth first, writing the output into a buffer.
pub struct RendererImpl<'render> {
    source: &'render str,
    symbols: &'render SymbolTable,
    out: Rendered,
}

/// The raw output of a render.
#[derive(Debug, Default)]
pub struct Rendered {
    /// The concatenated output of every node.
    pub buf: String,
    /// Offsets into `buf` where a node rendered nothing because it was
    /// suppressed, in ascending order.
    pub suppressed: Vec<usize>,
}

/// The resolved state of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    /// The guard's alias is enabled.
    AliasActive,
    /// The guard's alias is disabled.
    AliasInactive,
    /// Every variable in the block is assigned a non-empty value.
    VarActive,
    /// A variable is missing and the fallback is used instead.
    VarInactiveWithFallback,
    /// A variable is missing and there is no fallback.
    VarInactiveEmpty,
}

impl<'render> RendererImpl<'render> {
    pub fn new(source: &'render str, symbols: &'render SymbolTable) -> Self {
        Self {
            source,
            symbols,
            out: Rendered::default(),
        }
    }

    pub fn render(mut self, formula: &Formula) -> Rendered {
        self.out.buf.reserve(self.source.len());
        self.render_nodes(&formula.nodes);
        self.out
    }

    fn render_nodes(&mut self, nodes: &[Node]) {
        for node in nodes {
            if !self.render_node(node) {
                self.out.suppressed.push(self.out.buf.len());
            }
        }
    }

    /// Renders a single node, returning whether it contributed to the output.
    fn render_node(&mut self, node: &Node) -> bool {
        match node {
            Node::Text(span) => {
                self.out.buf.push_str(&self.source[*span]);
                true
            }
            Node::Variable(ident) => match self.lookup(ident) {
                Some(value) => {
                    self.out.buf.push_str(value);
                    !value.is_empty()
                }
                None => false,
            },
            Node::Block(block) => self.render_block(block),
        }
    }

    fn render_block(&mut self, block: &Block) -> bool {
        let state = self.resolve(block);
        trace!(
            guard = ?block.guard.map(|guard| &self.source[guard.span]),
            variables = block.direct_variables().count(),
            state = ?state,
            "resolved block"
        );
        match state {
            BlockState::AliasActive | BlockState::VarActive => {
                self.render_nodes(&block.primary);
                true
            }
            BlockState::VarInactiveWithFallback => {
                if let Some(fallback) = block.fallback {
                    self.out.buf.push_str(&self.source[fallback]);
                }
                true
            }
            BlockState::AliasInactive | BlockState::VarInactiveEmpty => false,
        }
    }

    fn resolve(&self, block: &Block) -> BlockState {
        if let Some(guard) = &block.guard {
            let alias = &self.source[guard.span];
            return match self.symbols.is_alias_enabled(alias) {
                true => BlockState::AliasActive,
                false => BlockState::AliasInactive,
            };
        }

        let active = block
            .direct_variables()
            .all(|ident| self.lookup(ident).map_or(false, |v| !v.is_empty()));

        match (active, block.fallback.is_some()) {
            (true, _) => BlockState::VarActive,
            (false, true) => BlockState::VarInactiveWithFallback,
            (false, false) => BlockState::VarInactiveEmpty,
        }
    }

    fn lookup(&self, ident: &Ident) -> Option<&'render str> {
        self.symbols.get_variable(&self.source[ident.span])
    }
}
