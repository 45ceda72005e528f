//! Console lines shown to the person running the tool. Translations live in
//! `locales/*.yml`.

use rust_i18n::t;

pub const DEFAULT_LOCALE: &str = "en";
pub const SUPPORTED_LOCALES: &[&str] = &["en", "nb"];

pub fn wrote_chunk(locale: &str, file: &str, count: usize) -> String {
    t!("wrote_chunk", locale = locale, file = file, count = count).to_string()
}

pub fn dry_run_chunk(locale: &str, file: &str, count: usize) -> String {
    t!("dry_run_chunk", locale = locale, file = file, count = count).to_string()
}

pub fn total_summary(locale: &str, total: usize, chunks: usize) -> String {
    t!("total_summary", locale = locale, total = total, chunks = chunks).to_string()
}
