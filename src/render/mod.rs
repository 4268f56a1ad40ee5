mod core;
mod whitespace;

use crate::render::core::RendererImpl;
use crate::symbols::SymbolTable;
use crate::types::ast::Formula;

/// Render a compiled formula to a string.
pub(crate) fn formula(
    source: &str,
    formula: &Formula,
    symbols: &SymbolTable,
    collapse_spaces: bool,
) -> String {
    let rendered = RendererImpl::new(source, symbols).render(formula);
    if collapse_spaces {
        whitespace::collapse(&rendered.buf, &rendered.suppressed)
    } else {
        rendered.buf
    }
}
