use std::collections::HashMap;

use tracing::trace;

/// Dense index of a declared variable.
///
/// Symbols are handed out in declaration order starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Returns the position of the symbol in declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The name→declared table filled by the parser.
///
/// A name enters the table at most once.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: Vec<String>,
    index: HashMap<String, Symbol>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name`, returning its new symbol, or `None` if the name is
    /// already declared.
    ///
    /// # Example
    /// ```
    /// use core_interp::interpreter::environment::SymbolTable;
    ///
    /// let mut symbols = SymbolTable::new();
    /// assert!(symbols.declare("A").is_some());
    /// assert!(symbols.declare("A").is_none());
    /// ```
    pub fn declare(&mut self, name: &str) -> Option<Symbol> {
        if self.index.contains_key(name) {
            return None;
        }
        let symbol = Symbol(u32::try_from(self.names.len()).ok()?);
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), symbol);
        trace!(name, index = symbol.index(), "declared variable");
        Some(symbol)
    }

    /// Looks up a declared name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Symbol> {
        self.index.get(name).copied()
    }

    /// Returns the name of a symbol.
    ///
    /// # Panics
    /// Panics if `symbol` was not handed out by this table.
    #[must_use]
    pub fn name(&self, symbol: Symbol) -> &str {
        &self.names[symbol.index()]
    }

    /// Returns the number of declared names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over the declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// The name→value table used during execution.
///
/// Every declared name owns exactly one slot, shared by all of its
/// occurrences. Slots start unset.
#[derive(Debug, Clone)]
pub struct Environment<'s> {
    symbols: &'s SymbolTable,
    values:  Vec<Option<i64>>,
}

impl<'s> Environment<'s> {
    /// Creates an environment with one unset slot per declared name.
    #[must_use]
    pub fn new(symbols: &'s SymbolTable) -> Self {
        Self { symbols,
               values: vec![None; symbols.len()] }
    }

    /// Returns the symbol table the environment was built from.
    #[must_use]
    pub const fn symbols(&self) -> &'s SymbolTable {
        self.symbols
    }

    /// Returns the value of a symbol, or `None` while it is unset.
    #[must_use]
    pub fn get(&self, symbol: Symbol) -> Option<i64> {
        self.values.get(symbol.index()).copied().flatten()
    }

    /// Stores a value for a symbol. Returns `false`, storing nothing, if the
    /// symbol does not belong to this environment's table.
    #[must_use]
    pub fn set(&mut self, symbol: Symbol, value: i64) -> bool {
        let Some(slot) = self.values.get_mut(symbol.index()) else {
            return false;
        };
        *slot = Some(value);
        true
    }

    /// Returns the value stored under `name`, or `None` if the name is unset
    /// or undeclared.
    ///
    /// # Example
    /// ```
    /// use core_interp::interpreter::environment::{Environment, SymbolTable};
    ///
    /// let mut symbols = SymbolTable::new();
    /// symbols.declare("X");
    ///
    /// let mut env = Environment::new(&symbols);
    /// assert_eq!(env.get_by_name("X"), None);
    /// assert!(env.set_by_name("X", 5));
    /// assert_eq!(env.get_by_name("X"), Some(5));
    /// ```
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<i64> {
        self.symbols.resolve(name).and_then(|symbol| self.get(symbol))
    }

    /// Stores a value under `name`. Returns `false` if the name is undeclared.
    pub fn set_by_name(&mut self, name: &str, value: i64) -> bool {
        self.symbols
            .resolve(name)
            .is_some_and(|symbol| self.set(symbol, value))
    }

    /// Iterates over every declared name with its current value.
    pub fn bindings(&self) -> impl Iterator<Item = (&'s str, Option<i64>)> + '_ {
        self.symbols.names().zip(self.values.iter().copied())
    }
}
