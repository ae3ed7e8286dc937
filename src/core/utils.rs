use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Ensure directory exists.
pub fn ensure_dir(path: &Path) -> Result<(), String> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| format!("Unable to create directory {}: {}", path.display(), e))?;
    }
    #[cfg(unix)]
    {
        fs::set_permissions(path, fs::Permissions::from_mode(0o700)).ok();
    }
    Ok(())
}

/// Restrict a file to its owner.
pub fn restrict_file(path: &Path) {
    #[cfg(unix)]
    {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).ok();
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

/// Short random lowercase identifier, nine characters long.
pub fn new_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|c| (c as char).to_ascii_lowercase())
        .collect()
}

/// Hide the middle of a secret, keeping the first and last four characters.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    if chars.len() <= 8 {
        return "•".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "•".repeat(chars.len() - 8), tail)
}

/// Lowercase, hyphen-separated form of a topic, suitable for file names.
pub fn slugify(text: &str) -> String {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_keeps_edges() {
        assert_eq!(
            mask_key("pplx-1234567890abcd"),
            format!("pplx{}abcd", "•".repeat(11))
        );
        assert_eq!(mask_key(""), "");
        assert_eq!(mask_key("short"), "•••••");
    }

    #[test]
    fn ids_are_nine_lowercase_chars() {
        let id = new_id();
        assert_eq!(id.len(), 9);
        assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        assert_ne!(id, new_id());
    }

    #[test]
    fn slug_collapses_whitespace() {
        assert_eq!(slugify("  Remote   Work Tips "), "remote-work-tips");
    }
}
