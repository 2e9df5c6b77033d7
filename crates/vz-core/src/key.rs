use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for key tokens — fast comparisons, low memory.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A normalized, interned keyboard key token.
///
/// Normalization lower-cases the raw `KeyboardEvent.key` value and collapses
/// the common aliases (`cmd` → `meta`, `ctrl` → `control`, `option` → `alt`),
/// so tokens coming from chord specs and tokens coming from live key events
/// always compare equal. Internally a `Spur` index — 4 bytes, Copy, Eq,
/// Hash in O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyToken(Spur);

impl KeyToken {
    /// Normalize and intern a raw key name.
    ///
    /// Normalization is idempotent: `normalize("CTRL")` and
    /// `normalize("control")` yield the same token.
    pub fn normalize(raw: &str) -> Self {
        let lower = raw.to_lowercase();
        let canonical = match lower.as_str() {
            "cmd" => "meta",
            "ctrl" => "control",
            "option" => "alt",
            other => other,
        };
        KeyToken(INTERNER.get_or_intern(canonical))
    }

    /// Resolve back to the canonical token string.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key:{}", self.as_str())
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
