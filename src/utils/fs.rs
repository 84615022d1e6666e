//! Path display helpers

use std::path::{Component, Path};

/// Shortens a path for display, keeping its last two components
///
/// Paths within `max_length` characters, or with two components or fewer,
/// are returned unchanged.
pub fn shorten_path(path: &Path, max_length: usize) -> String {
    let display = path.to_string_lossy();
    if display.chars().count() <= max_length {
        return display.into_owned();
    }

    let names: Vec<_> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();

    match names.as_slice() {
        [.., parent, name] if names.len() > 2 => format!(".../{parent}/{name}"),
        _ => display.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_paths_are_unchanged() {
        assert_eq!(shorten_path(Path::new("/r/a"), 40), "/r/a");
    }

    #[test]
    fn test_long_paths_keep_last_two_components() {
        let path = Path::new("/home/someone/projects/clients/acme/backend/services/billing");
        assert_eq!(shorten_path(path, 20), ".../services/billing");
    }

    #[test]
    fn test_too_few_components_to_shorten() {
        let path = Path::new("/a-very-long-directory-name/another-long-name");
        assert_eq!(shorten_path(path, 10), path.to_string_lossy());
    }
}
