//! Key chords and the held-key tracker.
//!
//! A chord spec is a `"+"`-joined string like `"ctrl+shift+e"`. Specs are
//! parsed once, up front, into normalized [`KeyToken`] sequences; matching
//! against the live held-set is then a cheap interned-id comparison.
//! Built on `winnow` 0.7, same as the rest of the parsing in this workspace.

use crate::key::KeyToken;
use smallvec::SmallVec;
use winnow::ascii::space0;
use winnow::combinator::{delimited, separated};
use winnow::prelude::*;
use winnow::token::take_while;

/// A parsed key chord: a non-empty set of normalized key tokens.
///
/// Order is irrelevant for matching; duplicate tokens in the spec collapse
/// into one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    tokens: SmallVec<[KeyToken; 4]>,
}

impl KeyChord {
    /// Parse a `"+"`-joined chord spec (e.g. `"CTRL+Shift+E"`) into a chord.
    ///
    /// Tokens are lower-cased and alias-collapsed, so `"cmd+z"` and
    /// `"Meta+Z"` parse to the same chord. Empty specs and empty tokens
    /// (e.g. `"shift+"`) are errors.
    pub fn parse(spec: &str) -> Result<Self, String> {
        let mut rest = spec;
        let raw: Vec<KeyToken> = parse_chord
            .parse_next(&mut rest)
            .map_err(|e| format!("invalid chord spec {spec:?}: {e}"))?;
        if !rest.trim().is_empty() {
            return Err(format!("invalid chord spec {spec:?}: trailing {rest:?}"));
        }

        let mut tokens: SmallVec<[KeyToken; 4]> = SmallVec::new();
        for token in raw {
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        Ok(KeyChord { tokens })
    }

    /// The normalized, deduplicated token set.
    pub fn tokens(&self) -> &[KeyToken] {
        &self.tokens
    }
}

fn parse_token(input: &mut &str) -> ModalResult<KeyToken> {
    delimited(
        space0,
        take_while(1.., |c: char| c != '+' && !c.is_whitespace()),
        space0,
    )
    .map(KeyToken::normalize)
    .parse_next(input)
}

fn parse_chord(input: &mut &str) -> ModalResult<Vec<KeyToken>> {
    separated(1.., parse_token, '+').parse_next(input)
}

/// Tracks the set of currently-depressed keys.
///
/// Mutated only by key-down (insert, dedup), key-up (remove), and a full
/// clear on loss of input focus. The owning [`ShortcutRouter`] re-evaluates
/// its subscriptions synchronously after every mutating call.
///
/// [`ShortcutRouter`]: crate::router::ShortcutRouter
#[derive(Debug, Default)]
pub struct ChordTracker {
    /// Held keys in press order. Stays tiny, so a Vec beats a set here.
    down: Vec<KeyToken>,
}

impl ChordTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. No-op if the key is already held.
    pub fn key_down(&mut self, key: &str) {
        let token = KeyToken::normalize(key);
        if !self.down.contains(&token) {
            self.down.push(token);
            log::trace!("key down: {token} (held: {:?})", self.down);
        }
    }

    /// Record a key release. Total: releasing a key that was never held
    /// is still a (vacuous) state change, not an error.
    pub fn key_up(&mut self, key: &str) {
        let token = KeyToken::normalize(key);
        self.down.retain(|held| *held != token);
        log::trace!("key up: {token} (held: {:?})", self.down);
    }

    /// Forget all held keys. Called when the window loses focus, since
    /// key-up events for keys released while unfocused never arrive.
    pub fn clear(&mut self) {
        self.down.clear();
    }

    /// The currently held tokens, in press order.
    pub fn held(&self) -> &[KeyToken] {
        &self.down
    }

    /// Strict chord match: the held-set must equal the chord's token set
    /// exactly — same members, same cardinality. Holding one extra
    /// unrelated key breaks the match.
    pub fn is_chord_held(&self, chord: &KeyChord) -> bool {
        chord.tokens().len() == self.down.len()
            && chord.tokens().iter().all(|t| self.down.contains(t))
    }
}
