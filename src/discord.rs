// Discord identifiers.
// CDN avatar URLs and snowflake creation times for users in the package.

use chrono::{DateTime, Utc};

const CDN_BASE: &str = "https://cdn.discordapp.com";

/// First millisecond of 2015, the origin of Discord snowflakes.
pub const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// CDN URL for a user's avatar.
///
/// Animated hashes (prefixed `a_`) resolve to GIF, others to WebP. Users
/// without an avatar get one of the five default embeds.
pub fn avatar_url(user_id: u64, avatar_hash: Option<&str>, discriminator: u16) -> String {
    match avatar_hash.filter(|hash| !hash.is_empty()) {
        Some(hash) => {
            let ext = if hash.starts_with("a_") { "gif" } else { "webp" };
            format!("{}/avatars/{}/{}.{}", CDN_BASE, user_id, hash, ext)
        }
        None => format!("{}/embed/avatars/{}.png", CDN_BASE, discriminator % 5),
    }
}

/// Creation time of a snowflake, in epoch milliseconds.
pub fn snowflake_timestamp(id: u64) -> i64 {
    (id >> 22) as i64 + DISCORD_EPOCH_MS
}

/// Creation time of a snowflake.
pub fn snowflake_datetime(id: u64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(snowflake_timestamp(id)).unwrap_or_default()
}
