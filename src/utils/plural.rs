//! Pluralization for log messages.

#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// `plural_count(3, "icon")` → `"3 icons"`.
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "icon"), "0 icons");
        assert_eq!(plural_count(1, "icon"), "1 icon");
        assert_eq!(plural_count(12, "file"), "12 files");
    }
}
