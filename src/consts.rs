pub const LINE_SIGNATURE_HEADER: &str = "X-Line-Signature";
pub const BOT_TAG: &str = "[bot-line]";
pub const UNKNOWN_DISPLAY_NAME: &str = "unknown";
pub const MESSAGE_SEPARATOR: &str = "---";
pub const MISSING_ID_PLACEHOLDER: &str = "-";
