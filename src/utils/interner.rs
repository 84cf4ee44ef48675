//! Global Class-Name Interner
//!
//! Actor class names key the variation cache and are compared on every
//! lookup. Interning turns them into compact integer symbols that hash and
//! compare in O(1).

use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

/// Global interner instance
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

/// Compact identifier of an interned string.
pub type Symbol = Spur;

/// Interns a string, returning the existing symbol if already present.
#[inline]
pub fn intern(s: &str) -> Symbol {
    INTERNER.get_or_intern(s)
}

/// Looks up a string without interning it.
#[inline]
#[must_use]
pub fn get(s: &str) -> Option<Symbol> {
    INTERNER.get(s)
}

/// Resolves a symbol back to its string.
#[inline]
#[must_use]
pub fn resolve(sym: Symbol) -> &'static str {
    INTERNER.resolve(&sym)
}

/// Stable identifier of an actor class.
///
/// Every instance of the same class shares one variation cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName(Symbol);

impl ClassName {
    #[inline]
    pub fn new(name: &str) -> Self {
        Self(intern(name))
    }

    /// Returns the class name only if it was interned before.
    #[inline]
    #[must_use]
    pub fn existing(name: &str) -> Option<Self> {
        get(name).map(Self)
    }

    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        resolve(self.0)
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ClassName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
