use serde::{Deserialize, Serialize};
use std::fmt;

/// A pooled token identified by its symbol.
///
/// Symbols are stored lowercase so that `SOL`, `Sol` and `sol` refer to the
/// same token; [`Token::display_symbol`] gives the uppercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
}

impl Token {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self {
            symbol: symbol.as_ref().trim().to_lowercase(),
        }
    }

    pub fn display_symbol(&self) -> String {
        self.symbol.to_uppercase()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_symbol())
    }
}

impl From<&str> for Token {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}
