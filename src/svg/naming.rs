//! Icon identifiers and search tags derived from file names.

/// Lowercase the file name and join its alphanumeric runs with `-`.
///
/// The extension is kept, so `test-icon.svg` becomes `test-icon-svg`.
pub fn icon_name(filename: &str) -> String {
    words(filename).collect::<Vec<_>>().join("-")
}

/// Search tags: the category first (when non-empty), then every word of
/// the file name longer than one character. Duplicates are dropped,
/// keeping the first occurrence.
pub fn icon_tags(filename: &str, category: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let category = category.trim();
    let candidates = (!category.is_empty())
        .then(|| category.to_owned())
        .into_iter()
        .chain(words(filename).filter(|w| w.chars().count() > 1));

    for tag in candidates {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Lowercased ASCII alphanumeric runs.
fn words(filename: &str) -> impl Iterator<Item = String> {
    filename
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect::<Vec<_>>()
        .into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_name() {
        assert_eq!(icon_name("test-icon.svg"), "test-icon-svg");
        assert_eq!(icon_name("My Icon (2).SVG"), "my-icon-2-svg");
        assert_eq!(icon_name("--a__b--"), "a-b");
        assert_eq!(icon_name("café.svg"), "caf-svg");
    }

    #[test]
    fn test_icon_tags() {
        assert_eq!(icon_tags("test-icon.svg", "test"), ["test", "icon", "svg"]);
        assert_eq!(icon_tags("a-b-arrow.svg", ""), ["arrow", "svg"]);
        assert_eq!(icon_tags("brand/x.svg", "brand"), ["brand", "svg"]);
    }
}
