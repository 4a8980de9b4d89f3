use super::*;

fn lex(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let file: Rc<str> = Rc::from("test.cflat");
    Lexer::new(source, file).tokenize()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, errors) = lex(source);
    assert!(errors.is_empty(), "unexpected lex errors: {:?}", errors);
    tokens.into_iter().map(|t| t.kind).collect()
}

#[test]
fn test_punctuation_and_operators() {
    let ks = kinds("(){}[];,.:");
    assert_eq!(
        ks,
        vec![
            TokenKind::LeftParen,
            TokenKind::RightParen,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operator_run_is_maximal() {
    let ks = kinds(">>>");
    assert_eq!(ks, vec![TokenKind::Operator(">>>".into()), TokenKind::Eof]);
}

#[test]
fn test_double_slash_is_one_operator_token_not_a_comment() {
    let ks = kinds("a // b");
    assert_eq!(
        ks,
        vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Operator("//".into()),
            TokenKind::Identifier("b".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_keywords() {
    let ks = kinds("func void var arr switch case default break if else for while return import continue do true false null");
    assert_eq!(
        ks,
        vec![
            TokenKind::Func,
            TokenKind::Void,
            TokenKind::Var,
            TokenKind::Arr,
            TokenKind::Switch,
            TokenKind::Case,
            TokenKind::Default,
            TokenKind::Break,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::For,
            TokenKind::While,
            TokenKind::Return,
            TokenKind::Import,
            TokenKind::Continue,
            TokenKind::Do,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_identifier() {
    let ks = kinds("fib");
    assert_eq!(ks, vec![TokenKind::Identifier("fib".into()), TokenKind::Eof]);
}

#[test]
fn test_string_literal_no_escape_processing() {
    let ks = kinds(r#""a\nb""#);
    assert_eq!(ks, vec![TokenKind::StringLiteral("a\\nb".into()), TokenKind::Eof]);
}

#[test]
fn test_unterminated_string_is_an_error() {
    let (tokens, errors) = lex("\"oops");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), LexErrorKind::UnterminatedString);
    assert_eq!(tokens, vec![Token::new(TokenKind::Eof, Span::new(5, 5, 1), Rc::from("test.cflat"))]);
}

#[test]
fn test_char_literal() {
    let ks = kinds("'x'");
    assert_eq!(ks, vec![TokenKind::StringLiteral("x".into()), TokenKind::Eof]);
}

#[test]
fn test_malformed_char_literal() {
    let (_, errors) = lex("'xy'");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), LexErrorKind::MalformedCharLiteral);
}

#[test]
fn test_integer_literal() {
    let ks = kinds("42");
    assert_eq!(ks, vec![TokenKind::IntLiteral(42), TokenKind::Eof]);
}

#[test]
fn test_double_literal() {
    let ks = kinds("3.14");
    assert_eq!(ks, vec![TokenKind::DoubleLiteral(3.14), TokenKind::Eof]);
}

#[test]
fn test_digit_run_consumes_letters_and_is_malformed() {
    let (tokens, errors) = lex("123abc");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind(), LexErrorKind::MalformedNumber);
    // The whole run was consumed as one lexeme, not split into 123 + abc.
    assert_eq!(tokens.len(), 1);
    assert!(matches!(tokens[0].kind, TokenKind::Eof));
}

#[test]
fn test_unknown_character_is_dropped_silently() {
    let (tokens, errors) = lex("a ` b");
    assert!(errors.is_empty());
    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Identifier("a".into()), Span::new(0, 1, 1), Rc::from("test.cflat")),
            Token::new(TokenKind::Identifier("b".into()), Span::new(4, 5, 1), Rc::from("test.cflat")),
            Token::new(TokenKind::Eof, Span::new(5, 5, 1), Rc::from("test.cflat")),
        ]
    );
}

#[test]
fn test_line_tracking_across_newlines() {
    let (tokens, _) = lex("a\nb\nc");
    let lines: Vec<usize> = tokens.iter().map(|t| t.span.line).collect();
    assert_eq!(lines, vec![1, 2, 3, 3]);
}

#[test]
fn test_compound_assignment_lexes_as_one_operator_token() {
    let ks = kinds("x += 1");
    assert_eq!(
        ks,
        vec![
            TokenKind::Identifier("x".into()),
            TokenKind::Operator("+=".into()),
            TokenKind::IntLiteral(1),
            TokenKind::Eof,
        ]
    );
}
