use archsecure::config::{AnimationMode, ColorMode, Config};

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// Resolved output settings for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    pub animation: bool,
}

impl UiContext {
    pub fn new(
        json: bool,
        cli_color: Option<ColorMode>,
        cli_no_animation: bool,
        config: &Config,
    ) -> Self {
        Self::from_caps(json, cli_color, cli_no_animation, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        cli_color: Option<ColorMode>,
        cli_no_animation: bool,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color.unwrap_or(config.output.color) {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        let animation = if json || cli_no_animation || caps.is_ci {
            false
        } else {
            match config.output.animation {
                AnimationMode::Never => false,
                AnimationMode::Always | AnimationMode::Auto => caps.is_tty,
            }
        };

        Self {
            json,
            caps,
            color,
            unicode,
            animation,
        }
    }

    /// The menu needs a terminal on both ends
    pub fn interactive(&self) -> bool {
        self.caps.is_tty && self.caps.stdin_is_tty && !self.json
    }
}
