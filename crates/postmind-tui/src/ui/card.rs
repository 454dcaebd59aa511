pub const SPACER: &str = "  ";
pub const BULLET: &str = "\u{25cf} ";
pub const HOLLOW_BULLET: &str = "\u{25cb} ";
pub const META_SEPARATOR: &str = " \u{2022} ";
pub const SPARKLES: &str = "\u{2728}";
pub const WARNING_GLYPH: &str = "\u{26a0} ";
pub const TRASH_GLYPH: &str = "\u{2717} ";
pub const REPLY_GLYPH: &str = "\u{21b3} ";
pub const CHECKMARK: &str = "\u{2713} ";

/// Left edge of every message and inbox card
pub const CARD_EDGE: &str = "\u{2502}";

/// Placeholder bar drawn in skeleton cards
pub const SKELETON_FILL: char = '\u{2591}';
