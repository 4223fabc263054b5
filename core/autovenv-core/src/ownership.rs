//! Session-lifetime record of whether autovenv activated the current
//! environment. This flag is the only thing distinguishing our own
//! activations from manual ones, so every controller decision keys off it.

/// Tracks whether this session owns the currently active environment.
///
/// Defaults to not-owned; there is no persistence, the flag lives and dies
/// with the session that holds it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ownership {
    owned: bool,
}

impl Ownership {
    pub fn new(owned: bool) -> Self {
        Self { owned }
    }

    /// Marks the active environment as ours. Call only after a successful
    /// activation.
    pub fn set_owned(&mut self) {
        self.owned = true;
    }

    /// Releases ownership. Call only once the environment is confirmed gone.
    pub fn clear_owned(&mut self) {
        self.owned = false;
    }

    pub fn is_owned(&self) -> bool {
        self.owned
    }
}
