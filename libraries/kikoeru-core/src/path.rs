//! URL path joining
//!
//! Offload redirect targets are built from a configured base plus values that
//! come from the filesystem (root folder name, work dir, subdirectory, file
//! name). Those values may carry native Windows separators, so every fragment
//! is normalized to forward slashes before it reaches a URL.

/// Join a base URL path and any number of fragments with `/`
///
/// - Backslashes in the base and in fragments become `/`
/// - Empty fragments and empty or `.` segments are skipped
/// - `..` drops the previous fragment segment but never climbs into the base
/// - The base keeps its own prefix (`/`, `https://host`), minus trailing slashes
///
/// The result never contains a backslash.
pub fn join_fragments<I, S>(base: &str, fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    join_segments(base, fragment_segments(fragments))
}

/// Split fragments into normalized path segments
///
/// Segments never contain `/` or `\` and are never empty, `.` or `..`.
pub fn fragment_segments<I, S>(fragments: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut segments: Vec<String> = Vec::new();
    for fragment in fragments {
        let fragment = fragment.as_ref().replace('\\', "/");
        for segment in fragment.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                _ => segments.push(segment.to_string()),
            }
        }
    }
    segments
}

/// Append already normalized segments to a base URL path
pub fn join_segments<I, S>(base: &str, segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let base = base.replace('\\', "/");
    let mut url = base.trim_end_matches('/').to_string();

    for segment in segments {
        url.push('/');
        url.push_str(segment.as_ref());
    }

    if url.is_empty() {
        url.push('/');
    }
    url
}
