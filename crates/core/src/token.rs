use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_CONTEXT: AtomicU32 = AtomicU32::new(1);

/// Identity of a [`TokenContext`]. Tokens minted by different contexts never
/// compare equal, whatever their kind and serial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextId(u32);

/// Opaque identifier a pile uses to refer to another pile without owning a
/// reference to it. Two tokens denote the same target iff context, kind and
/// serial all match. Resolution happens lazily through the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentToken {
    context: ContextId,
    kind: String,
    serial: u32,
}

impl IdentToken {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn serial(&self) -> u32 {
        self.serial
    }

    pub fn context(&self) -> ContextId {
        self.context
    }

    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Same context and kind, serial ignored.
    pub fn same_kind(&self, other: &IdentToken) -> bool {
        self.context == other.context && self.kind == other.kind
    }
}

/// Mints tokens with per-kind sequential serials. Tokens are minted at
/// game-assembly time only; piles keep them verbatim afterwards.
#[derive(Debug)]
pub struct TokenContext {
    id: ContextId,
    counters: BTreeMap<String, u32>,
}

impl TokenContext {
    pub fn new() -> Self {
        Self {
            id: ContextId(NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed)),
            counters: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Serials start at 1 and count up per kind.
    pub fn mint(&mut self, kind: &str) -> IdentToken {
        let counter = self.counters.entry(kind.to_string()).or_insert(0);
        *counter += 1;
        IdentToken {
            context: self.id,
            kind: kind.to_string(),
            serial: *counter,
        }
    }

    pub fn minted(&self, kind: &str) -> u32 {
        self.counters.get(kind).copied().unwrap_or(0)
    }

    /// Display name for a token of this context: the kind, suffixed with the
    /// serial once a kind has more than one member.
    pub fn suggested_name(&self, token: &IdentToken) -> Option<String> {
        if token.context != self.id || token.serial > self.minted(&token.kind) {
            return None;
        }
        if self.minted(&token.kind) > 1 {
            Some(format!("{}{}", token.kind, token.serial))
        } else {
            Some(token.kind.clone())
        }
    }
}

impl Default for TokenContext {
    fn default() -> Self {
        Self::new()
    }
}
