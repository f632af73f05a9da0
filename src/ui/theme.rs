use crossterm::style::Color;

/// Design tokens for the archsecure terminal UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons and markers must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const PENDING: &str = "○";
    pub const SKIPPED: &str = "–";
    pub const POINTER: &str = "❯";

    // Selection states.
    pub const CHECKED: &str = "■";
    pub const UNCHECKED: &str = "□";
    pub const RADIO_ON: &str = "◉";
    pub const RADIO_OFF: &str = "○";
    pub const GROUP_ON: &str = "▣";
    pub const GROUP_OFF: &str = "▢";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const PENDING: &str = "[  ]";
    pub const SKIPPED: &str = "[--]";
    pub const POINTER: &str = ">";

    // Selection states.
    pub const CHECKED: &str = "[x]";
    pub const UNCHECKED: &str = "[ ]";
    pub const RADIO_ON: &str = "(*)";
    pub const RADIO_OFF: &str = "( )";
    pub const GROUP_ON: &str = "[+]";
    pub const GROUP_OFF: &str = "[>]";
}

pub mod borders {
    pub const VERTICAL: &str = "│";
}

pub mod borders_ascii {
    pub const VERTICAL: &str = "|";
}

pub fn vertical(unicode: bool) -> &'static str {
    if unicode {
        borders::VERTICAL
    } else {
        borders_ascii::VERTICAL
    }
}
