//! Telegram Bot API constants.

pub struct TelegramConfig {
    pub api_base_url: &'static str,
    pub parse_mode: &'static str,
    pub timeout_ms: u64,
}

pub const TELEGRAM: TelegramConfig = TelegramConfig {
    api_base_url: "https://api.telegram.org",
    parse_mode: "Markdown",
    timeout_ms: 10_000,
};
