//! CSS class name merging

/// Merges class lists into one space-separated string.
///
/// Empty parts are skipped and a repeated class keeps its last position, so
/// `cn(["btn btn--primary", "btn--primary active"])` gives
/// `"btn btn--primary active"`.
pub fn cn<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut classes: Vec<String> = Vec::new();
    for part in parts {
        for class in part.as_ref().split_whitespace() {
            classes.retain(|c| c != class);
            classes.push(class.to_string());
        }
    }
    classes.join(" ")
}

/// `class` when `condition` holds, empty otherwise
pub fn when(condition: bool, class: &str) -> &str {
    if condition {
        class
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_and_dedupes() {
        assert_eq!(cn(["btn", "", "  btn--primary  "]), "btn btn--primary");
        assert_eq!(cn(["a b", "b c"]), "a b c");
        assert_eq!(cn(["a b", "a"]), "b a");
    }

    #[test]
    fn conditional_class() {
        assert_eq!(cn(["nav__item", when(true, "nav__item--active")]), "nav__item nav__item--active");
        assert_eq!(cn(["nav__item", when(false, "nav__item--active")]), "nav__item");
    }
}
