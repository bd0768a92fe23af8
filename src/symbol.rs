use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, RwLock};

/// An interned symbol — the atom-like primitive of the value model.
///
/// Symbols with the same spelling share one table entry, so equality and
/// hashing are O(1) integer operations. The intern table is process-global
/// and append-only; symbols are never reclaimed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

struct Interner {
    ids: HashMap<String, Symbol>,
    names: Vec<String>,
}

static INTERNER: OnceLock<RwLock<Interner>> = OnceLock::new();

fn interner() -> &'static RwLock<Interner> {
    INTERNER.get_or_init(|| {
        RwLock::new(Interner {
            ids: HashMap::new(),
            names: Vec::new(),
        })
    })
}

impl Symbol {
    /// Intern a spelling and return its `Symbol`. Idempotent: interning the
    /// same spelling twice yields the same symbol.
    pub fn intern(name: &str) -> Symbol {
        // Fast path: read lock only.
        {
            let table = interner().read().unwrap();
            if let Some(&sym) = table.ids.get(name) {
                return sym;
            }
        }
        let mut table = interner().write().unwrap();
        // Re-check: another thread may have interned between the locks.
        if let Some(&sym) = table.ids.get(name) {
            return sym;
        }
        let sym = Symbol(table.names.len() as u32);
        table.names.push(name.to_owned());
        table.ids.insert(name.to_owned(), sym);
        sym
    }

    /// Look up the spelling for this symbol.
    pub fn resolve(&self) -> String {
        let table = interner().read().unwrap();
        table.names[self.0 as usize].clone()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = interner().read().unwrap();
        write!(f, "Symbol({}: {:?})", self.0, &table.names[self.0 as usize])
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = interner().read().unwrap();
        f.write_str(&table.names[self.0 as usize])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let a = Symbol::intern("json");
        let b = Symbol::intern("json");
        assert_eq!(a, b);
    }

    #[test]
    fn different_spellings_differ() {
        assert_ne!(Symbol::intern("xml_fmt"), Symbol::intern("json_fmt"));
    }

    #[test]
    fn resolve_roundtrip() {
        let sym = Symbol::intern("roundtrip_sym");
        assert_eq!(sym.resolve(), "roundtrip_sym");
    }

    #[test]
    fn display_shows_spelling() {
        assert_eq!(Symbol::intern("display_sym").to_string(), "display_sym");
    }

    #[test]
    fn usable_as_hash_key() {
        let mut map = HashMap::new();
        map.insert(Symbol::intern("key_sym"), 1);
        assert_eq!(map.get(&Symbol::intern("key_sym")), Some(&1));
    }
}
