//! JQL helpers.

/// Build `id = k1 or id = k2 ... or id = kN` for the given keys.
///
/// An empty slice yields an empty query, which is sent to the server as-is.
#[must_use]
pub fn issue_id_query(keys: &[&str]) -> String {
    keys.iter()
        .map(|key| format!("id = {key}"))
        .collect::<Vec<_>>()
        .join(" or ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_keys_with_or() {
        assert_eq!(
            issue_id_query(&["ABC-01", "ABC-02", "ABC-03"]),
            "id = ABC-01 or id = ABC-02 or id = ABC-03"
        );
    }

    #[test]
    fn single_key_has_no_operator() {
        assert_eq!(issue_id_query(&["ABC-01"]), "id = ABC-01");
    }

    #[test]
    fn empty_keys_give_empty_query() {
        assert_eq!(issue_id_query(&[]), "");
    }
}
