use anyhow::{bail, Result};

const ALLOWED_SCHEMES: &[&str] = &["http://", "https://", "mailto:", "tel:"];

/// Open an external link with the system handler, without waiting on it
pub fn open_link(url: &str) -> Result<()> {
    if !is_openable(url) {
        bail!("refusing to open '{}'", url);
    }
    open::that_detached(url)?;
    tracing::info!("Opened {}", url);
    Ok(())
}

/// Only web, mail and phone links are handed to the system
pub fn is_openable(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    ALLOWED_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme) && lower.len() > scheme.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openable_schemes() {
        assert!(is_openable("https://github.com/alexmorgan"));
        assert!(is_openable("mailto:alex@example.com"));
        assert!(is_openable("HTTP://EXAMPLE.COM"));
        assert!(!is_openable("file:///etc/passwd"));
        assert!(!is_openable("javascript:alert(1)"));
        assert!(!is_openable("https://"));
    }

    #[test]
    fn test_open_link_rejects_before_spawning() {
        assert!(open_link("/usr/bin/yes").is_err());
    }
}
