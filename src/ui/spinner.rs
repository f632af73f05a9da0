const SPINNER_FRAMES_BRAILLE: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
const SPINNER_FRAMES_ASCII: &[char] = &['-', '\\', '|', '/'];

/// Indicator frame `n`, wrapping around the frame set
pub fn frame(n: usize, supports_unicode: bool) -> char {
    let frames = if supports_unicode {
        SPINNER_FRAMES_BRAILLE
    } else {
        SPINNER_FRAMES_ASCII
    };
    frames[n % frames.len()]
}
