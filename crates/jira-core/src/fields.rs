//! Field selector strings for issue requests.

/// Selector sent when the caller asks for no particular fields.
pub const DEFAULT_FIELDS: &str = "id,summary";

/// Join field names into the comma-separated selector the API expects.
///
/// Order is preserved and nothing is deduplicated or validated; the server
/// rejects unknown fields itself. An empty list yields [`DEFAULT_FIELDS`].
#[must_use]
pub fn field_selector<S: AsRef<str>>(fields: &[S]) -> String {
    if fields.is_empty() {
        return DEFAULT_FIELDS.to_string();
    }

    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_uses_default() {
        let fields: [&str; 0] = [];
        assert_eq!(field_selector(&fields), "id,summary");
        assert_eq!(field_selector::<String>(&[]), DEFAULT_FIELDS);
    }

    #[test]
    fn preserves_order() {
        assert_eq!(
            field_selector(&["id", "summary", "project"]),
            "id,summary,project"
        );
        assert_eq!(field_selector(&["project", "id"]), "project,id");
    }

    #[test]
    fn keeps_duplicates() {
        let fields = vec!["id".to_string(), "id".to_string()];
        assert_eq!(field_selector(&fields), "id,id");
    }
}
