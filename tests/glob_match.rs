use mysh::matches;

#[test]
fn literal_patterns_need_identical_names() {
    for (p, n) in [("abc", "abc"), ("", ""), ("a.txt", "a.txt")] {
        assert!(matches(p, n), "{p} vs {n}");
    }
    for (p, n) in [("abc", "abd"), ("abc", "ab"), ("ab", "abc"), ("", "x"), ("x", "")] {
        assert!(!matches(p, n), "{p} vs {n}");
    }
}

#[test]
fn star_matches_everything() {
    for n in ["", "a", ".hidden", "with space", "ünïcode"] {
        assert!(matches("*", n), "{n}");
    }
}

#[test]
fn star_in_the_middle() {
    assert!(matches("a*c", "abc"));
    assert!(matches("a*c", "ac"));
    assert!(matches("a*c", "abbbbc"));
    assert!(!matches("a*c", "ab"));
    assert!(!matches("a*c", "bac"));
}

#[test]
fn suffix_and_prefix_patterns() {
    assert!(matches("*.txt", "notes.txt"));
    assert!(matches("*.txt", ".txt"));
    assert!(!matches("*.txt", "notes.txt.bak"));
    assert!(matches("notes*", "notes"));
    assert!(matches("*o*e*", "notes"));
    assert!(!matches("*x*", "notes"));
}

#[test]
fn question_mark_is_literal() {
    assert!(matches("a?c", "a?c"));
    assert!(!matches("a?c", "abc"));
}

#[test]
fn adjacent_stars_stay_fast() {
    let pattern = "*".repeat(40) + "b";
    let name = "a".repeat(60);
    assert!(!matches(&pattern, &name));
    assert!(matches(&pattern, &(name + "b")));
}

#[test]
fn names_are_compared_as_bytes() {
    assert!(matches("*.txt", b"a\xff.txt"));
    assert!(matches(b"a\xff*", b"a\xff.txt"));
    assert!(!matches("a*.log", b"a\xff.txt"));
    assert!(matches("*ë", "noël"));
}
