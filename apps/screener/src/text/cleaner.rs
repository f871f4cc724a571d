//! Résumé text normalisation shared by the trainer and the inference service.

use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)http\S+\s*").expect("valid URL pattern"));
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\S+").expect("valid hashtag pattern"));
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\S+").expect("valid mention pattern"));

/// Retweet / carbon-copy markers dropped as whole tokens.
const NOISE_TOKENS: [&str; 2] = ["rt", "cc"];

/// Normalises raw résumé text into lower-case ASCII words separated by single spaces.
///
/// Removes URLs, hashtags, @-mentions, punctuation, non-ASCII and control
/// characters, and standalone `RT`/`cc` tokens. The output only contains
/// `[a-z0-9 ]`, never starts or ends with a space, and cleaning it again
/// returns it unchanged.
pub fn clean_resume(text: &str) -> String {
    let text = URL.replace_all(text, " ");
    let text = HASHTAG.replace_all(&text, " ");
    let text = MENTION.replace_all(&text, " ");

    let folded: String = text
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();

    folded
        .split_whitespace()
        .filter(|token| !NOISE_TOKENS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}
