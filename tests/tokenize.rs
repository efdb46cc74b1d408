use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

use mysh::{tokenize, ShellError};

const MAX: usize = 1024;

fn words(line: &str) -> Vec<OsString> {
    tokenize(line, MAX).unwrap().tokens
}

#[test]
fn pipe_is_recorded() {
    let s = tokenize("ls -l | wc -l", MAX).unwrap();
    assert_eq!(s.tokens, ["ls", "-l", "|", "wc", "-l"]);
    assert_eq!(s.pipe, Some(2));
    assert!(s.wildcards.is_empty());
}

#[test]
fn no_pipe_means_no_split_point() {
    let s = tokenize("echo hi", MAX).unwrap();
    assert_eq!(s.pipe, None);
}

#[test]
fn first_pipe_wins() {
    let s = tokenize("a | b | c", MAX).unwrap();
    assert_eq!(s.pipe, Some(1));
    assert_eq!(s.tokens, ["a", "|", "b", "|", "c"]);
}

#[test]
fn operators_split_words() {
    assert_eq!(words("cat<in.txt>out.txt"), ["cat", "<", "in.txt", ">", "out.txt"]);
    assert_eq!(words("a|b"), ["a", "|", "b"]);
    assert_eq!(words("x>>y"), ["x", ">", ">", "y"]);
}

#[test]
fn whitespace_runs_collapse() {
    assert_eq!(words("  echo \t a   b \r"), ["echo", "a", "b"]);
    assert!(words("   ").is_empty());
    assert!(words("").is_empty());
}

#[test]
fn wildcard_tokens_are_flagged_once() {
    let s = tokenize("echo *.txt plain *a*b*", MAX).unwrap();
    assert_eq!(s.wildcards, [1, 3]);
    let s = tokenize("ls src/* | grep x*", MAX).unwrap();
    assert_eq!(s.wildcards, [1, 4]);
}

#[test]
fn quotes_are_not_special() {
    assert_eq!(words("echo 'a b'"), ["echo", "'a", "b'"]);
}

#[test]
fn overlong_line_is_rejected() {
    let line = "x".repeat(MAX - 1);
    assert!(tokenize(&line, MAX).is_ok());
    let line = "x".repeat(MAX);
    assert!(matches!(tokenize(&line, MAX), Err(ShellError::LineTooLong { max: MAX })));
}

#[test]
fn split_rebases_wildcards() {
    let s = tokenize("ls *.c | grep *.h x", MAX).unwrap();
    let (left, right) = s.split_at_pipe().unwrap();
    assert_eq!(left.tokens, ["ls", "*.c"]);
    assert_eq!(left.wildcards, [1]);
    assert_eq!(right.tokens, ["grep", "*.h", "x"]);
    assert_eq!(right.wildcards, [1]);
}

#[test]
fn second_pipe_stays_on_the_right() {
    let s = tokenize("a | b | c", MAX).unwrap();
    let (left, right) = s.split_at_pipe().unwrap();
    assert_eq!(left.tokens, ["a"]);
    assert_eq!(right.tokens, ["b", "|", "c"]);
}

#[test]
fn invalid_utf8_words_pass_through() {
    let s = tokenize(b"cat caf\xe9|wc", MAX).unwrap();
    assert_eq!(s.tokens[1], OsString::from_vec(b"caf\xe9".to_vec()));
    assert_eq!(s.pipe, Some(2));
}
