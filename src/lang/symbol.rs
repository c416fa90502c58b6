use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::convert::From;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::{Arc, RwLock};

/// Immutable shared string used for categories and words.
///
/// Cloning only bumps a reference count, and two symbols handed out by the
/// same [`Interner`] compare by pointer before falling back to the text.
pub struct Symbol(Arc<str>);

impl Symbol {
    pub fn new<S: AsRef<str>>(string: S) -> Self {
        Symbol(Arc::from(string.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Symbol {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Clone for Symbol {
    #[inline]
    fn clone(&self) -> Symbol {
        Symbol(self.0.clone())
    }
}

impl PartialEq for Symbol {
    #[inline(always)]
    fn eq(&self, other: &Symbol) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for Symbol {}

impl PartialEq<str> for Symbol {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl<'a> PartialEq<&'a str> for Symbol {
    #[inline]
    fn eq(&self, other: &&'a str) -> bool {
        &*self.0 == *other
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Symbol) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Symbol) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for Symbol {
    fn from(string: String) -> Self {
        Symbol(Arc::from(string))
    }
}

impl<'a> From<&'a str> for Symbol {
    fn from(string: &'a str) -> Self {
        Symbol::new(string)
    }
}

impl<'a> From<&'a Symbol> for Symbol {
    fn from(symbol: &'a Symbol) -> Self {
        symbol.clone()
    }
}

impl Borrow<str> for Symbol {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

mod serialize {
    use serde::de::Deserializer;
    use serde::ser::Serializer;
    use serde::{Deserialize, Serialize};

    use super::Symbol;

    impl Serialize for Symbol {
        #[inline]
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Symbol {
        fn deserialize<D>(deserializer: D) -> Result<Symbol, D::Error>
        where
            D: Deserializer<'de>,
        {
            String::deserialize(deserializer).map(Symbol::from)
        }
    }
}

/// Append-only symbol table that may be shared between threads.
#[derive(Debug, Default)]
pub struct Interner {
    table: RwLock<HashSet<Symbol>>,
}

impl Interner {
    pub fn new() -> Self {
        Interner {
            table: RwLock::new(HashSet::new()),
        }
    }

    /// Returns the symbol stored for `string`, inserting it on first sight.
    pub fn intern(&self, string: &str) -> Symbol {
        {
            let table = self.table.read().unwrap_or_else(|e| e.into_inner());
            if let Some(symbol) = table.get(string) {
                return symbol.clone();
            }
        }
        let mut table = self.table.write().unwrap_or_else(|e| e.into_inner());
        // another writer may have won the race between the two locks
        if let Some(symbol) = table.get(string) {
            return symbol.clone();
        }
        let symbol = Symbol::new(string);
        table.insert(symbol.clone());
        symbol
    }

    pub fn contains(&self, string: &str) -> bool {
        self.table
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains(string)
    }

    pub fn len(&self) -> usize {
        self.table.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
