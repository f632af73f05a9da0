use crossterm::style::Stylize;

use archsecure::domain::selection::Indicator;
use archsecure::domain::value_objects::RunStatus;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Pending,
    Skipped,
    Pointer,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Pending) => theme::icons::PENDING,
            (true, Icon::Skipped) => theme::icons::SKIPPED,
            (true, Icon::Pointer) => theme::icons::POINTER,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Pending) => theme::icons_ascii::PENDING,
            (false, Icon::Skipped) => theme::icons_ascii::SKIPPED,
            (false, Icon::Pointer) => theme::icons_ascii::POINTER,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Pending | Icon::Skipped => theme::colors::DIM,
            Icon::Pointer => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }

    /// Final-state icon for a run status; `None` while running
    pub fn for_status(status: RunStatus) -> Option<Self> {
        match status {
            RunStatus::NotStarted => Some(Icon::Pending),
            RunStatus::Skipped => Some(Icon::Skipped),
            RunStatus::Succeeded => Some(Icon::Success),
            RunStatus::Failed => Some(Icon::Error),
            RunStatus::Running => None,
        }
    }
}

/// Marker for a menu row; empty for navigation entries
pub fn indicator(indicator: Indicator, supports_unicode: bool) -> &'static str {
    use theme::{icons, icons_ascii};
    match (supports_unicode, indicator) {
        (_, Indicator::None) => "",
        (true, Indicator::Checkbox(true)) => icons::CHECKED,
        (true, Indicator::Checkbox(false)) => icons::UNCHECKED,
        (true, Indicator::Radio(true)) => icons::RADIO_ON,
        (true, Indicator::Radio(false)) => icons::RADIO_OFF,
        (true, Indicator::Group(true)) => icons::GROUP_ON,
        (true, Indicator::Group(false)) => icons::GROUP_OFF,
        (false, Indicator::Checkbox(true)) => icons_ascii::CHECKED,
        (false, Indicator::Checkbox(false)) => icons_ascii::UNCHECKED,
        (false, Indicator::Radio(true)) => icons_ascii::RADIO_ON,
        (false, Indicator::Radio(false)) => icons_ascii::RADIO_OFF,
        (false, Indicator::Group(true)) => icons_ascii::GROUP_ON,
        (false, Indicator::Group(false)) => icons_ascii::GROUP_OFF,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_renders_ascii_when_unicode_unsupported() {
        assert_eq!(Icon::Success.render(false), "[OK]");
        assert_eq!(Icon::Error.render(false), "[FAIL]");
    }

    #[test]
    fn colored_without_color_is_plain() {
        assert_eq!(Icon::Skipped.colored(false, true), theme::icons::SKIPPED);
    }

    #[test]
    fn group_indicator_follows_effective_state() {
        assert_eq!(indicator(Indicator::Group(true), false), "[+]");
        assert_eq!(indicator(Indicator::Group(false), false), "[>]");
        assert_eq!(indicator(Indicator::None, true), "");
    }

    #[test]
    fn running_has_no_static_icon() {
        assert_eq!(Icon::for_status(RunStatus::Running), None);
        assert_eq!(Icon::for_status(RunStatus::Failed), Some(Icon::Error));
    }
}
