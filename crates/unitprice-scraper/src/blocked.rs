//! Bot-protection detection.
//!
//! Both phrase lists are heuristics matched against vendor wording and will
//! need extending as retailers change their block pages.

/// Phrases that mark a whole page as a block or challenge page.
const BLOCK_PAGE_PHRASES: &[&str] = &[
    "we like real shoppers",
    "not robots",
    "captcha",
    "verify you are a human",
    "please verify",
    "enter the characters",
    "are you human",
    "are you a human",
    "attention required! | cloudflare",
];

/// Markers that identify a Cloudflare challenge only on an interstitial page.
const CLOUDFLARE_CHALLENGE_MARKERS: &[&str] = &["cf-chl-", "/cdn-cgi/challenge-platform/"];

/// Phrases that mark an extracted product *name* as a block-page placeholder.
const PLACEHOLDER_NAME_PHRASES: &[&str] = &[
    "we like real shoppers",
    "not robots",
    "robot or human",
    "are you a human",
    "access denied",
];

/// Returns `true` when `html` looks like an automated-access block page
/// rather than product content. Empty input is never blocked.
#[must_use]
pub fn looks_blocked(html: &str) -> bool {
    if html.trim().is_empty() {
        return false;
    }
    let lowered = html.to_lowercase();

    // Cloudflare's interstitial only counts with a challenge marker; plenty
    // of real pages say "just a moment" somewhere, and the challenge-platform
    // script is also injected into ordinary pages.
    let cloudflare_interstitial = lowered.contains("just a moment...")
        && CLOUDFLARE_CHALLENGE_MARKERS.iter().any(|m| lowered.contains(m));

    cloudflare_interstitial || BLOCK_PAGE_PHRASES.iter().any(|p| lowered.contains(p))
}

/// Returns `true` when `name` is a bot-protection placeholder instead of a
/// real product title.
#[must_use]
pub fn is_placeholder_name(name: &str) -> bool {
    let lowered = name.to_lowercase();
    PLACEHOLDER_NAME_PHRASES.iter().any(|p| lowered.contains(p))
}

/// Trims `name` and drops it when blank or a placeholder.
#[must_use]
pub fn usable_name(name: Option<String>) -> Option<String> {
    let name = name?;
    let trimmed = name.trim();
    if trimmed.is_empty() || is_placeholder_name(trimmed) {
        if !trimmed.is_empty() {
            tracing::debug!(name = trimmed, "discarding bot-protection placeholder name");
        }
        return None;
    }
    Some(trimmed.to_string())
}
