//! A tiny formula language for rendering human readable messages.
//!
//! # Features
//!
//! ### Syntax
//!
//! - Variables: `Hello, $name`
//! - Blocks that disappear when a variable is missing:
//!   `You saved it $[in folder '$folder'].`
//! - Fallbacks: `$[$name has ## You have]`
//! - Alias guards that are switched on and off by the caller:
//!   `changed reminder $[:target: for $targetName]`
//! - Configurable tokens: `%{@vip@ dear %name || guest}`
//!
//! ### Engine
//!
//! - Cleans up the spaces and punctuation left behind by missing blocks
//! - Clear error messages pointing at the offending part of the formula
//! - Save and restore the engine state using any `serde` data format
//!
//! # Getting started
//!
//! Your entry point is the [`Engine`] struct. The engine stores the syntax
//! config and the variables and aliases that formulas are executed against.
//!
//! ```
//! let mut engine = pure_formula::Engine::new();
//! engine.assign_variable("name", "Stan");
//!
//! let result = engine.execute("Hello, $name", true, true)?;
//! assert_eq!(result, "Hello, Stan");
//! # Ok::<(), pure_formula::Error>(())
//! ```
//!
//! # Formulas
//!
//! ### Blocks
//!
//! A block `$[ ... ]` is only rendered when every variable directly inside of
//! it is assigned a non-empty value. Variables inside nested blocks do not
//! count, nested blocks are resolved on their own. When a block is not
//! rendered the spaces around it are collapsed and a space before closing
//! punctuation is removed.
//!
//! ```
//! let mut engine = pure_formula::Engine::new();
//!
//! let formula = "Congrats! You saved it $[in folder '$folder'].";
//! assert_eq!(engine.execute(formula, true, false)?, "Congrats! You saved it.");
//!
//! engine.assign_variable("folder", "Documents");
//! assert_eq!(
//!     engine.execute(formula, true, false)?,
//!     "Congrats! You saved it in folder 'Documents'."
//! );
//! # Ok::<(), pure_formula::Error>(())
//! ```
//!
//! ### Fallbacks
//!
//! Text after `##` is used verbatim when the block is not rendered.
//!
//! ```
//! let mut engine = pure_formula::Engine::new();
//! engine.assign_variable("number", "7");
//! engine.assign_variable("date", "11/11/19");
//!
//! let result = engine.execute(
//!     "$[$name has ## You have] $[$number coupon(s) ## no coupons] expiring on $date",
//!     true,
//!     true,
//! )?;
//! assert_eq!(result, "You have 7 coupon(s) expiring on 11/11/19");
//! # Ok::<(), pure_formula::Error>(())
//! ```
//!
//! ### Aliases
//!
//! A block starting with `:alias:` is rendered only if the alias is enabled,
//! regardless of the variables inside it. The fallback of such a block is
//! never used.
//!
//! ```
//! let mut engine = pure_formula::Engine::new();
//! engine.enable_alias("target");
//!
//! let result = engine.execute("changed reminder $[:target: for $[$targetName ## you]]", true, true)?;
//! assert_eq!(result, "changed reminder for you");
//! # Ok::<(), pure_formula::Error>(())
//! ```
//!
//! ### Custom syntax
//!
//! The tokens can be changed by constructing an engine using
//! [`Engine::with_syntax`].
//!
//! ```
//! let syntax = pure_formula::Syntax::builder()
//!     .variable("%")
//!     .block("{", "}")
//!     .alternation("||")
//!     .guard("@")
//!     .build();
//!
//! let mut engine = pure_formula::Engine::with_syntax(syntax);
//! engine.enable_alias("vip");
//! engine.assign_variable("name", "Stan");
//!
//! let result = engine.execute("Hello %{@vip@ dear %name}!", true, true)?;
//! assert_eq!(result, "Hello dear Stan!");
//! # Ok::<(), pure_formula::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

mod compile;
mod error;
mod render;
mod symbols;
mod types;

use std::fmt;

pub use crate::error::{Error, ErrorKind};
pub use crate::symbols::SymbolTable;
pub use crate::types::syntax::{Syntax, SyntaxBuilder};

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// The formula engine.
///
/// The engine owns the syntax config and a [`SymbolTable`] of variables and
/// aliases. Formulas are compiled and rendered on every call, nothing is
/// cached between calls.
///
/// Mutating the engine requires a `&mut` reference, to share an engine
/// between threads wrap it in a mutex or use one engine per thread.
#[derive(Clone, Default)]
pub struct Engine {
    syntax: Syntax,
    symbols: SymbolTable,
}

impl Engine {
    /// Construct a new engine.
    #[inline]
    pub fn new() -> Self {
        Self::with_syntax(Syntax::default())
    }

    /// Construct a new engine with custom syntax.
    ///
    /// # Examples
    ///
    /// ```
    /// use pure_formula::{Engine, Syntax};
    ///
    /// let syntax = Syntax::builder().variable("%").block("<", ">").build();
    /// let engine = Engine::with_syntax(syntax);
    /// ```
    #[inline]
    pub fn with_syntax(syntax: Syntax) -> Self {
        Self {
            syntax,
            symbols: SymbolTable::new(),
        }
    }

    /// Replace the variables and aliases of this engine.
    #[inline]
    pub fn with_symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    /// Returns the syntax config.
    #[inline]
    pub fn syntax(&self) -> &Syntax {
        &self.syntax
    }

    /// Returns the variables and aliases of this engine.
    #[inline]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Returns a mutable reference to the variables and aliases of this
    /// engine.
    #[inline]
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Assign a value to the variable, or discard it if `value` is `None`.
    #[inline]
    pub fn set_variable(&mut self, name: &str, value: Option<&str>) {
        self.symbols.set_variable(name, value);
    }

    /// Assign a value to the variable.
    #[inline]
    pub fn assign_variable(&mut self, name: &str, value: &str) {
        self.symbols.set_variable(name, Some(value));
    }

    /// Discard the variable.
    #[inline]
    pub fn discard_variable(&mut self, name: &str) {
        self.symbols.set_variable(name, None);
    }

    /// Enable or disable the alias.
    #[inline]
    pub fn set_alias(&mut self, name: &str, enabled: bool) {
        self.symbols.set_alias(name, enabled);
    }

    /// Enable the alias.
    #[inline]
    pub fn enable_alias(&mut self, name: &str) {
        self.symbols.set_alias(name, true);
    }

    /// Disable the alias.
    #[inline]
    pub fn disable_alias(&mut self, name: &str) {
        self.symbols.set_alias(name, false);
    }

    /// Discard all variables and disable all aliases.
    pub fn reset(&mut self) {
        debug!("resetting symbol table");
        self.symbols.reset();
    }

    /// Render a formula using the current variables and aliases.
    ///
    /// If `collapse_spaces` is set then runs of whitespace are collapsed into
    /// a single space, spaces left before closing punctuation by missing
    /// blocks are removed and the result is trimmed.
    ///
    /// Blocks may be nested at most 128 levels deep, deeper formulas fail
    /// with [`ErrorKind::NestingTooDeep`].
    pub fn render(&self, formula: &str, collapse_spaces: bool) -> Result<String> {
        let ast = compile::formula(&self.syntax, formula).map_err(|err| {
            debug!(error = %err, "failed to compile formula");
            err
        })?;
        Ok(render::formula(formula, &ast, &self.symbols, collapse_spaces))
    }

    /// Execute a formula using the current variables and aliases.
    ///
    /// This is the same as [`.render(..)`][Engine::render] except that if
    /// `reset_on_finish` is set all variables and aliases are discarded after
    /// a successful render, ready for the next formula. A formula that fails
    /// to compile leaves the engine untouched.
    pub fn execute(
        &mut self,
        formula: &str,
        collapse_spaces: bool,
        reset_on_finish: bool,
    ) -> Result<String> {
        debug!(len = formula.len(), collapse_spaces, reset_on_finish, "executing formula");
        let result = self.render(formula, collapse_spaces)?;
        if reset_on_finish {
            self.reset();
        }
        Ok(result)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("syntax", &self.syntax)
            .field("symbols", &self.symbols)
            .finish()
    }
}
