//! Knuth-Morris-Pratt substring scanning over an in-memory byte window, plus
//! a direct scan used for needles shorter than 3 bytes (see
//! [`MIN_TRIGRAM_NEEDLE_LEN`](fossick_runtime::MIN_TRIGRAM_NEEDLE_LEN)).

/// Failure function (longest proper prefix which is also a suffix, per
/// position) for `pattern`.
fn failure_function(pattern: &[u8]) -> Vec<usize> {
    let mut pf = vec![0usize; pattern.len()];
    let mut k = 0usize;
    for i in 1..pattern.len() {
        while k > 0 && pattern[i] != pattern[k] {
            k = pf[k - 1];
        }
        if pattern[i] == pattern[k] {
            k += 1;
        }
        pf[i] = k;
    }
    pf
}

/// Scan `haystack` for every (possibly overlapping) occurrence of `pattern`,
/// returning the start index of each match within `haystack`.
///
/// Empty patterns never match. Degenerate but harmless for patterns of
/// length 1 or 2; callers route those through [`direct_scan`] instead purely
/// to avoid allocating a trivial failure function per chunk.
pub fn kmp_search(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() || haystack.len() < pattern.len() {
        return Vec::new();
    }

    let pf = failure_function(pattern);
    let mut matches = Vec::new();
    let mut k = 0usize;
    for (i, &b) in haystack.iter().enumerate() {
        while k > 0 && k < pattern.len() && pattern[k] != b {
            k = pf[k - 1];
        }
        if k < pattern.len() && pattern[k] == b {
            k += 1;
        }
        if k == pattern.len() {
            matches.push(i + 1 - pattern.len());
            k = pf[k - 1];
        }
    }
    matches
}

/// Direct byte-by-byte scan for short needles (`|n| <= 2`), used instead of
/// [`kmp_search`] since the failure-function machinery is unnecessary
/// overhead at that length.
pub fn direct_scan(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.is_empty() || haystack.len() < pattern.len() {
        return Vec::new();
    }
    haystack
        .windows(pattern.len())
        .enumerate()
        .filter(|(_, w)| *w == pattern)
        .map(|(i, _)| i)
        .collect()
}

/// Dispatches to [`direct_scan`] or [`kmp_search`] depending on pattern
/// length.
pub fn scan(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
    if pattern.len() <= 2 {
        direct_scan(haystack, pattern)
    } else {
        kmp_search(haystack, pattern)
    }
}

#[cfg(test)]
#[path = "kmp_tests.rs"]
mod tests;
