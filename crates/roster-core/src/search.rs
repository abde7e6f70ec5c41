//! Query preparation for full-name search.
//!
//! User input is reduced to ASCII letters and digits, then turned into a
//! prefix match: `"O'Brien"` becomes the phrase `"OBrien"` followed by the
//! `*` wildcard. Matching itself is left to the backend's full-text index.

/// Keep only ASCII alphanumerics.
pub fn sanitize(query: &str) -> String {
  query.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// The full-text expression for `query`, or `None` if nothing survives
/// sanitization (in which case the search has no results).
pub fn match_expression(query: &str) -> Option<String> {
  let term = sanitize(query);
  if term.is_empty() {
    return None;
  }
  // Quoting keeps bare words such as `AND`/`NOT` from parsing as operators.
  Some(format!("\"{term}\"*"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_punctuation() {
    assert_eq!(sanitize("O'Brien"), "OBrien");
    assert_eq!(sanitize("Anne-Marie  Smith!"), "AnneMarieSmith");
    assert_eq!(sanitize("R2-D2"), "R2D2");
  }

  #[test]
  fn drops_non_ascii() {
    assert_eq!(sanitize("Zoë"), "Zo");
  }

  #[test]
  fn expression_is_quoted_prefix() {
    assert_eq!(match_expression("O'Brien").as_deref(), Some("\"OBrien\"*"));
    assert_eq!(match_expression("and").as_deref(), Some("\"and\"*"));
  }

  #[test]
  fn empty_after_sanitize_has_no_expression() {
    assert_eq!(match_expression(""), None);
    assert_eq!(match_expression("'\"*()"), None);
  }
}
