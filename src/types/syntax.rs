/// The formula syntax configuration.
///
/// Use [`Syntax::default()`] to get the default syntax configuration and
/// [`Syntax::builder()`] to create a custom syntax configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    /// Introduces variables and blocks, e.g. `$`
    pub(crate) variable: String,
    /// The full block opener including the variable token, e.g. `$[`
    pub(crate) begin_block: String,
    /// The block closer, e.g. `]`
    pub(crate) end_block: String,
    /// Separates the primary content from the fallback, e.g. `##`
    pub(crate) alternation: String,
    /// Surrounds an alias name, e.g. `:`
    pub(crate) guard: String,
}

/// A builder for the syntax configuration.
///
/// This struct is typically created using [`Syntax::builder()`].
#[derive(Debug, Clone)]
pub struct SyntaxBuilder<'a> {
    variable: &'a str,
    block: (&'a str, &'a str),
    alternation: &'a str,
    guard: &'a str,
}

impl Default for Syntax {
    /// Returns the default syntax configuration.
    ///
    /// This is equivalent to the following.
    /// ```
    /// use pure_formula::Syntax;
    ///
    /// let syntax = Syntax::builder()
    ///     .variable("$")
    ///     .block("[", "]")
    ///     .alternation("##")
    ///     .guard(":")
    ///     .build();
    /// assert_eq!(syntax, Syntax::default());
    /// ```
    #[inline]
    fn default() -> Self {
        Syntax::builder().build()
    }
}

impl Syntax {
    /// Create a new syntax builder.
    ///
    /// # Examples
    ///
    /// ```
    /// let syntax = pure_formula::Syntax::builder()
    ///     .variable("%")
    ///     .block("{", "}")
    ///     .alternation("||")
    ///     .build();
    /// ```
    #[inline]
    pub fn builder<'a>() -> SyntaxBuilder<'a> {
        SyntaxBuilder::new()
    }
}

impl<'a> SyntaxBuilder<'a> {
    /// Creates a new syntax builder, starting from the default tokens.
    #[inline]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            variable: "$",
            block: ("[", "]"),
            alternation: "##",
            guard: ":",
        }
    }

    /// Set the token that introduces variables and blocks.
    ///
    /// # Panics
    ///
    /// If the string is empty.
    #[inline]
    pub fn variable(&mut self, variable: &'a str) -> &mut Self {
        assert!(!variable.is_empty());
        self.variable = variable;
        self
    }

    /// Set the block delimiters.
    ///
    /// The begin delimiter is only recognized directly after the variable
    /// token, so with the default variable token `"["` opens a block as `$[`.
    ///
    /// # Panics
    ///
    /// If either of the strings are empty.
    #[inline]
    pub fn block(&mut self, begin_block: &'a str, end_block: &'a str) -> &mut Self {
        assert!(!begin_block.is_empty() && !end_block.is_empty());
        self.block = (begin_block, end_block);
        self
    }

    /// Set the token that separates a block's content from its fallback.
    ///
    /// # Panics
    ///
    /// If the string is empty.
    #[inline]
    pub fn alternation(&mut self, alternation: &'a str) -> &mut Self {
        assert!(!alternation.is_empty());
        self.alternation = alternation;
        self
    }

    /// Set the delimiter surrounding an alias guard, e.g. `:name:`.
    ///
    /// # Panics
    ///
    /// If the string is empty.
    #[inline]
    pub fn guard(&mut self, guard: &'a str) -> &mut Self {
        assert!(!guard.is_empty());
        self.guard = guard;
        self
    }

    /// Builds the syntax configuration.
    pub fn build(&self) -> Syntax {
        let (begin, end) = self.block;
        Syntax {
            variable: self.variable.into(),
            begin_block: format!("{}{begin}", self.variable),
            end_block: end.into(),
            alternation: self.alternation.into(),
            guard: self.guard.into(),
        }
    }
}
