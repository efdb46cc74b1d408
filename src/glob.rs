/// Whole-string match where `*` stands for any run of bytes, including
/// none, and every other byte matches itself. Names are compared as raw
/// bytes, so entries that are not valid UTF-8 still match.
///
/// Walks a table over (pattern position, name position) from the end of both
/// strings, so patterns like `a****b` cost O(pattern * name) instead of the
/// exponential blowup of naive backtracking.
pub fn matches(pattern: impl AsRef<[u8]>, name: impl AsRef<[u8]>) -> bool {
    let pat = pattern.as_ref();
    let txt = name.as_ref();
    // next[j]: pat[i+1..] matches txt[j..]
    let mut next = vec![false; txt.len() + 1];
    next[txt.len()] = true;
    for &p in pat.iter().rev() {
        let mut cur = vec![false; txt.len() + 1];
        for j in (0..=txt.len()).rev() {
            cur[j] = if p == b'*' {
                next[j] || (j < txt.len() && cur[j + 1])
            } else {
                j < txt.len() && txt[j] == p && next[j + 1]
            };
        }
        next = cur;
    }
    next[0]
}
