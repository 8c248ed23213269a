//! Source locations attached to symbols, attribute applications and diagnostics.

use std::fmt;

/// A position in the analysed source, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// Path of the source file
    pub path: String,
    /// 1-based line
    pub line: u32,
    /// 1-based column
    pub column: u32,
}

impl Location {
    /// Creates a new location
    pub fn new(path: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Picks the most specific known location.
    ///
    /// The attribute application site wins over the symbol's first declared location, which in
    /// turn wins over the syntactic node currently under analysis.
    #[must_use]
    pub fn most_specific(
        attribute: Option<&Location>,
        symbol: Option<&Location>,
        node: &Location,
    ) -> Location {
        attribute.or(symbol).unwrap_or(node).clone()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.path, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_specific_prefers_attribute_then_symbol() {
        let attr = Location::new("a.cs", 3, 5);
        let sym = Location::new("a.cs", 4, 1);
        let node = Location::new("a.cs", 1, 1);

        assert_eq!(Location::most_specific(Some(&attr), Some(&sym), &node), attr);
        assert_eq!(Location::most_specific(None, Some(&sym), &node), sym);
        assert_eq!(Location::most_specific(None, None, &node), node);
    }

    #[test]
    fn display_format() {
        assert_eq!(Location::new("Foo.cs", 12, 4).to_string(), "Foo.cs(12,4)");
    }
}
