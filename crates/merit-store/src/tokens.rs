//! Token directory.
//!
//! Maps token ids to their subject and current price. Token CRUD belongs to
//! the wider platform; here the directory is seeded at startup and read on
//! the trading path.

use dashmap::DashMap;
use merit_core::{TokenId, TokenInfo};

/// Lookup of tradeable tokens.
pub trait TokenDirectory: Send + Sync {
    fn get(&self, id: TokenId) -> Option<TokenInfo>;

    fn insert(&self, info: TokenInfo);

    fn list(&self) -> Vec<TokenInfo>;
}

/// In-memory token directory.
#[derive(Debug, Default)]
pub struct InMemoryTokenDirectory {
    tokens: DashMap<TokenId, TokenInfo>,
}

impl InMemoryTokenDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenDirectory for InMemoryTokenDirectory {
    fn get(&self, id: TokenId) -> Option<TokenInfo> {
        self.tokens.get(&id).map(|e| e.value().clone())
    }

    fn insert(&self, info: TokenInfo) {
        self.tokens.insert(info.token_id, info);
    }

    fn list(&self) -> Vec<TokenInfo> {
        self.tokens.iter().map(|e| e.value().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use merit_core::{Price, SubjectId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_insert_and_get() {
        let dir = InMemoryTokenDirectory::new();
        let info = TokenInfo {
            token_id: TokenId::generate(),
            subject_id: SubjectId::generate(),
            symbol: "RPT-ALPHA".to_string(),
            price: Price::new(dec!(0.015)),
        };
        dir.insert(info.clone());

        assert_eq!(dir.get(info.token_id), Some(info));
        assert_eq!(dir.len(), 1);
        assert!(dir.get(TokenId::generate()).is_none());
    }

    #[test]
    fn test_insert_replaces_existing() {
        let dir = InMemoryTokenDirectory::new();
        let token_id = TokenId::generate();
        let subject_id = SubjectId::generate();
        dir.insert(TokenInfo {
            token_id,
            subject_id,
            symbol: "RPT-ALPHA".to_string(),
            price: Price::new(dec!(0.01)),
        });
        dir.insert(TokenInfo {
            token_id,
            subject_id,
            symbol: "RPT-ALPHA".to_string(),
            price: Price::new(dec!(0.02)),
        });

        assert_eq!(dir.len(), 1);
        assert_eq!(dir.get(token_id).unwrap().price, Price::new(dec!(0.02)));
    }
}
