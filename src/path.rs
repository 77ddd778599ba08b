//! Route path composition shared by every scanner.

/// Joins route fragments into a normalized absolute path.
///
/// Empty fragments and fragments equal to `/` contribute nothing, surrounding
/// slashes are stripped and runs of `/` collapse, so the result always starts
/// with exactly one `/`, never contains `//` and has no trailing `/` unless it
/// is the root itself.
///
/// # Example
///
/// ```
/// use apinav::combine_paths;
///
/// assert_eq!(combine_paths(["/", "users"]), "/users");
/// assert_eq!(combine_paths(["", "/users/", "/42/"]), "/users/42");
/// assert_eq!(combine_paths::<_, &str>([]), "/");
/// ```
pub fn combine_paths<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut combined = String::new();
    for segment in segments {
        for piece in segment.as_ref().split('/').filter(|p| !p.is_empty()) {
            combined.push('/');
            combined.push_str(piece);
        }
    }
    if combined.is_empty() {
        combined.push('/');
    }
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normalized(path: &str) {
        assert!(path.starts_with('/'), "{path:?} must start with /");
        assert!(!path.contains("//"), "{path:?} must not contain //");
        assert!(path == "/" || !path.ends_with('/'), "{path:?} has a trailing /");
    }

    #[test]
    fn test_root_segment_is_dropped() {
        assert_eq!(combine_paths(["/", "users"]), "/users");
        assert_eq!(combine_paths(["/"]), "/");
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        assert_eq!(combine_paths(["", "/users/", "/42/"]), "/users/42");
        assert_eq!(combine_paths(["", ""]), "/");
    }

    #[test]
    fn test_base_and_method_paths_join() {
        assert_eq!(combine_paths(["/api", "/users"]), "/api/users");
        assert_eq!(combine_paths(["api/", "users/{id}"]), "/api/users/{id}");
        assert_eq!(combine_paths(["v1", ":id"]), "/v1/:id");
    }

    #[test]
    fn test_degenerate_segments_keep_invariants() {
        for segments in [
            vec!["///", "x"],
            vec!["a//b", "/c/"],
            vec!["//", "//"],
            vec!["/api/", "", "/", "users//"],
        ] {
            assert_normalized(&combine_paths(&segments));
        }
        assert_eq!(combine_paths(["///", "x"]), "/x");
        assert_eq!(combine_paths(["a//b"]), "/a/b");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        for (a, b) in [("/api", "users"), ("", "/"), ("x/", "/y/z/"), ("//", "q//r")] {
            let once = combine_paths([a, b]);
            assert_eq!(combine_paths([once.as_str()]), once);
            assert_normalized(&once);
        }
    }
}
