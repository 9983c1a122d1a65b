use std::fmt;

use uuid::Uuid;

/// A URL-safe project slug, derived once from the title at creation time
/// and immutable afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct Slug(String);

impl Slug {
    /// Derive a slug from a free-form title: lowercase, runs of
    /// non-alphanumeric characters collapsed to a single '-', plus a short
    /// random suffix so that two projects with the same title never collide.
    pub fn derive(title: &str) -> Self {
        let mut base = String::with_capacity(title.len());
        let mut last_was_sep = true;
        for c in title.chars() {
            if c.is_alphanumeric() {
                base.extend(c.to_lowercase());
                last_was_sep = false;
            } else if !last_was_sep {
                base.push('-');
                last_was_sep = true;
            }
        }
        let base = base.trim_end_matches('-');
        let base = if base.is_empty() { "project" } else { base };

        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", base, &suffix[..8]))
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
