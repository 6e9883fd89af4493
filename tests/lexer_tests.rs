// tests/lexer_tests.rs

use tq_lang::ast::TokenKind;
use tq_lang::lexer::{LexErrorKind, Lexer};
use tq_lang::scanner::scan;

fn kinds(input: &str) -> Vec<TokenKind> {
    let chars = scan(input);
    let mut lexer = Lexer::new(&chars);
    let mut result = vec![];
    while let Some(token) = lexer.scan() {
        result.push(token.kind);
    }
    result
}

fn lexemes(input: &str, ignore_whitespace: bool) -> Vec<String> {
    let chars = scan(input);
    Lexer::new(&chars)
        .scan_all(ignore_whitespace)
        .unwrap()
        .iter()
        .map(|t| t.lexeme())
        .collect()
}

fn error_kinds(input: &str) -> Vec<(LexErrorKind, usize)> {
    let chars = scan(input);
    match Lexer::new(&chars).scan_all(false) {
        Ok(_) => vec![],
        Err(errors) => errors.iter().map(|e| (e.kind(), e.offset())).collect(),
    }
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        (".", TokenKind::Dot),
        (":", TokenKind::Colon),
        ("[", TokenKind::ArrayOpen),
        ("]", TokenKind::ArrayClose),
    ];

    for (input, expected) in test_cases {
        assert_eq!(kinds(input), vec![expected], "Failed for input: {}", input);
    }
}

#[test]
fn test_empty_input() {
    assert!(kinds("").is_empty());
    assert!(error_kinds("").is_empty());
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_double_quoted_string() {
    assert_eq!(kinds(r#""foo""#), vec![TokenKind::String]);
    assert_eq!(lexemes(r#""foo""#, false), vec![r#""foo""#]);
}

#[test]
fn test_single_quoted_string() {
    assert_eq!(lexemes("'foo bar'", false), vec!["'foo bar'"]);
}

#[test]
fn test_other_quote_inside_string() {
    assert_eq!(lexemes(r#""it's""#, false), vec![r#""it's""#]);
    assert_eq!(lexemes(r#"'say "hi"'"#, false), vec![r#"'say "hi"'"#]);
}

#[test]
fn test_key_chars_inside_string() {
    assert_eq!(kinds(r#""a.b[0]:c""#), vec![TokenKind::String]);
}

#[test]
fn test_integer_is_maximal_digit_run() {
    assert_eq!(kinds("1234"), vec![TokenKind::Integer]);
    assert_eq!(lexemes("[12:345]", false), vec!["[", "12", ":", "345", "]"]);
}

#[test]
fn test_whitespace_run_is_one_token() {
    assert_eq!(kinds(" \t  "), vec![TokenKind::Whitespace]);
    assert_eq!(
        kinds(". ["),
        vec![TokenKind::Dot, TokenKind::Whitespace, TokenKind::ArrayOpen]
    );
}

#[test]
fn test_scan_all_can_drop_whitespace() {
    assert_eq!(lexemes(" [ 1 ] ", true), vec!["[", "1", "]"]);
    assert_eq!(lexemes(" [ 1 ] ", false), vec![" ", "[", " ", "1", " ", "]", " "]);
}

#[test]
fn test_token_offsets() {
    let chars = scan(r#".["key"]"#);
    let tokens = Lexer::new(&chars).scan_all(false).unwrap();
    let ranges: Vec<(usize, usize)> = tokens.iter().map(|t| (t.start, t.end)).collect();
    assert_eq!(ranges, vec![(0, 1), (1, 2), (2, 7), (7, 8)]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unterminated_string_at_end() {
    assert_eq!(
        error_kinds(r#"["foo"#),
        vec![(LexErrorKind::UnterminatedString, 1)]
    );
}

#[test]
fn test_mismatched_quotes_are_unterminated() {
    assert_eq!(
        error_kinds(r#""foo'"#),
        vec![(LexErrorKind::UnterminatedString, 0)]
    );
}

#[test]
fn test_newline_terminates_string_with_error() {
    let chars = scan("\"fo\no\"");
    let mut lexer = Lexer::new(&chars);
    let token = lexer.scan().unwrap();
    assert_eq!(token.kind, TokenKind::Undefined);
    assert_eq!(token.lexeme(), "\"fo\n");
    assert_eq!(lexer.errors()[0].kind(), LexErrorKind::UnterminatedString);
}

#[test]
fn test_crlf_terminates_string_once() {
    let chars = scan("[\"a\r\n\"]");
    let mut lexer = Lexer::new(&chars);
    lexer.scan();
    let token = lexer.scan().unwrap();
    assert_eq!(token.kind, TokenKind::Undefined);
    assert_eq!(token.lexeme(), "\"a\r\n");
    assert_eq!(
        error_kinds("[\"a\r\n\"]"),
        vec![
            (LexErrorKind::UnterminatedString, 1),
            (LexErrorKind::UnterminatedString, 5),
        ]
    );
}

#[test]
fn test_disallowed_characters() {
    assert_eq!(error_kinds("a"), vec![(LexErrorKind::DisallowedChar, 0)]);
    assert_eq!(error_kinds(".\n"), vec![(LexErrorKind::DisallowedChar, 1)]);
}

#[test]
fn test_negative_integers_are_rejected() {
    assert_eq!(kinds("-1"), vec![TokenKind::Undefined, TokenKind::Integer]);
    assert_eq!(error_kinds("[-1]"), vec![(LexErrorKind::DisallowedChar, 1)]);
}

#[test]
fn test_non_ascii_digits_are_disallowed() {
    assert_eq!(error_kinds("[١]"), vec![(LexErrorKind::DisallowedChar, 1)]);
}

#[test]
fn test_errors_accumulate_over_whole_input() {
    assert_eq!(
        error_kinds("\"a\n\"b"),
        vec![
            (LexErrorKind::UnterminatedString, 0),
            (LexErrorKind::UnterminatedString, 3),
        ]
    );
    assert_eq!(
        error_kinds("x.y[z]"),
        vec![
            (LexErrorKind::DisallowedChar, 0),
            (LexErrorKind::DisallowedChar, 2),
            (LexErrorKind::DisallowedChar, 4),
        ]
    );
}

#[test]
fn test_scanning_continues_after_error() {
    assert_eq!(
        kinds("x[0]"),
        vec![
            TokenKind::Undefined,
            TokenKind::ArrayOpen,
            TokenKind::Integer,
            TokenKind::ArrayClose,
        ]
    );
}

#[test]
fn test_nil_scanner() {
    let err = Lexer::with_source(None).err().unwrap();
    assert_eq!(err.kind(), LexErrorKind::NilScanner);
    assert!(Lexer::with_source(Some(&scan("."))).is_ok());
}

#[test]
fn test_error_rendering() {
    let chars = scan(r#"["foo"#);
    let errors = Lexer::new(&chars).scan_all(true).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors.render(),
        "[\"foo\n ^\nLexer error: unterminated string literal"
    );
    assert_eq!(errors.to_string(), "Lexer error: unterminated string literal");
}
