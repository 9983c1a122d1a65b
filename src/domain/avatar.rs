use sha2::{Digest, Sha256};

use crate::domain::EmailAddress;

/// Sentinel URL set by older clients when no image was chosen
const PLACEHOLDER: &str = "/images/avatar-placeholder.png";

/// Resolve the avatar for a submitter: an uploaded image URL wins, otherwise
/// fall back to a deterministic hash-of-email URL so that the same submitter
/// always renders the same generated avatar.
pub fn resolve_avatar(email: &EmailAddress, uploaded: Option<&str>) -> String {
    match uploaded {
        Some(url) if !url.trim().is_empty() && url != PLACEHOLDER => url.to_string(),
        _ => {
            // EmailAddress is already trimmed and lowercased
            let hash = Sha256::digest(email.as_ref().as_bytes());
            format!(
                "https://www.gravatar.com/avatar/{:x}?d=identicon",
                hash
            )
        }
    }
}
