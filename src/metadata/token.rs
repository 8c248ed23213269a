//! Stable symbol identity handed over by the host.
//!
//! Every type the host exposes (declared types, base types and types referenced from attribute
//! arguments) is identified by a [`Token`]. Two references denote the same type exactly when
//! their tokens are equal, which is what include de-duplication and subtype checks rely on.
//! The layout mirrors a metadata token: the high byte is a table/kind tag chosen by the host,
//! the low 24 bits are a row index within that kind.

use std::fmt;

/// A 32-bit identity for a type symbol.
///
/// A value of `0` is the null token and never identifies a real type.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(pub u32);

impl Token {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Token(value)
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the kind tag from the token (high byte)
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Extracts the row index from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Token {
    fn from(value: u32) -> Self {
        Token(value)
    }
}

impl From<Token> for u32 {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_parts() {
        let token = Token::new(0x02000005);
        assert_eq!(token.value(), 0x02000005);
        assert_eq!(token.table(), 0x02);
        assert_eq!(token.row(), 5);
    }

    #[test]
    fn test_token_is_null() {
        assert!(Token(0).is_null());
        assert!(!Token(0x02000001).is_null());
    }

    #[test]
    fn test_token_display_and_debug() {
        let token = Token(0x02000001);
        assert_eq!(format!("{}", token), "0x02000001");

        let debug_str = format!("{:?}", token);
        assert!(debug_str.contains("Token(0x02000001"));
        assert!(debug_str.contains("table: 0x02"));
        assert!(debug_str.contains("row: 1"));
    }

    #[test]
    fn test_token_identity() {
        let mut set = HashSet::new();
        set.insert(Token(0x02000001));
        set.insert(Token(0x02000002));
        set.insert(Token::from(0x02000001));
        assert_eq!(set.len(), 2);

        let raw: u32 = Token(0x02000003).into();
        assert_eq!(raw, 0x02000003);
    }
}
