//! Platform-independent key representation

use serde::{Deserialize, Serialize};

/// Key event routed to the expansion command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    // Printable
    Char(char),

    // Tab stop keys
    Tab,
    BackTab,

    // Everything else the host may route through
    Enter,
    Escape,
    Space,
}

impl Key {
    /// Keys the expansion command may consume
    pub fn is_tab_stop_key(&self) -> bool {
        matches!(self, Key::Tab | Key::BackTab)
    }
}
