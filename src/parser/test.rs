use super::{
    parse, tokenize_string, Expression, Literal, ParserState, SyntaxError, SyntaxErrorKind,
    Tokenizer,
};

fn lexemes(input: &str) -> Vec<String> {
    tokenize_string(input)
        .iter()
        .map(|t| t.lexeme().to_string())
        .collect()
}

fn parse_tree_matches(input: &str, tree_repr: &str) {
    let result = parse(input);
    assert!(result.is_ok(), "failed to parse \"{input}\": {result:?}");
    if let Ok(ref tree) = result {
        let result_repr = format!("{tree:?}");
        assert!(
            result_repr.contains(tree_repr),
            "\nFailed to parse \"{}\":\nexpected \"{}\" somewhere in \"{}\"\n",
            input,
            tree_repr,
            result_repr
        )
    }
}

fn assert_raises_error(input: &str, kind: SyntaxErrorKind) -> SyntaxError {
    match parse(input) {
        Err(err) => {
            assert_eq!(kind, err.kind);
            err
        }
        Ok(tree) => panic!("expected {kind:?} for \"{input}\", got {tree:?}"),
    }
}

fn program(forms: Vec<Expression>) -> Expression {
    Expression::List(forms)
}

#[test]
fn test_parentheses_are_isolated() {
    assert_eq!(lexemes("(+ 1 2)"), vec!["(", "+", "1", "2", ")"]);
    assert_eq!(lexemes("((a)b)"), vec!["(", "(", "a", ")", "b", ")"]);
    assert_eq!(lexemes("  \t(x\n  y)  "), vec!["(", "x", "y", ")"]);
    assert!(lexemes("").is_empty());
    assert!(lexemes(" \n\t ").is_empty());
}

#[test]
fn test_strings_with_spaces_are_split() {
    assert_eq!(lexemes("(print \"a b\")"), vec!["(", "print", "\"a", "b\"", ")"]);
}

#[test]
fn test_token_spans() {
    let tokens = tokenize_string("(head\n  xs)");
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[1].span.start.line, 0);
    assert_eq!(tokens[1].span.start.column, 1);
    assert_eq!(tokens[1].span.end.column, 5);
    assert_eq!(tokens[2].span.start.line, 1);
    assert_eq!(tokens[2].span.start.column, 2);
}

#[test]
fn test_tokenizer_state() {
    let mut tokenizer = Tokenizer::new();
    let state = tokenizer.tokenize(vec!["(let ((x 1))".to_string()].into_iter());
    assert_eq!(state, ParserState::ContinuationNeeded);
    let state = tokenizer.tokenize(vec!["  x)".to_string()].into_iter());
    assert_eq!(state, ParserState::Ok);
    assert_eq!(tokenizer.finalize().len(), 10);

    let mut tokenizer = Tokenizer::new();
    let state = tokenizer.tokenize(vec!["(a))".to_string()].into_iter());
    assert!(matches!(state, ParserState::Error(ref e) if e.kind == SyntaxErrorKind::UnexpectedClose));
}

#[test]
fn test_simple_call() {
    let tree = parse("(+ 1 2)").unwrap();
    assert_eq!(
        tree,
        program(vec![Expression::List(vec![
            Expression::identifier("+"),
            Expression::int(1),
            Expression::int(2),
        ])])
    );
}

#[test]
fn test_nested_lists() {
    let tree = parse("(let ((x 5)) (+ x 1))").unwrap();
    assert_eq!(
        tree,
        program(vec![Expression::List(vec![
            Expression::identifier("let"),
            Expression::List(vec![Expression::List(vec![
                Expression::identifier("x"),
                Expression::int(5),
            ])]),
            Expression::List(vec![
                Expression::identifier("+"),
                Expression::identifier("x"),
                Expression::int(1),
            ]),
        ])])
    );
    parse_tree_matches("()", "List([List([])])");
    parse_tree_matches("(a) (b)", "List([List([Identifier(\"a\")]), List([Identifier(\"b\")])])");
}

#[test]
fn test_literal_categories() {
    parse_tree_matches("42", "Int(42)");
    parse_tree_matches("-7", "Int(-7)");
    parse_tree_matches("+7", "Int(7)");
    parse_tree_matches("007", "Int(7)");
    parse_tree_matches("1_000", "Int(1000)");
    parse_tree_matches("1.5", "Float(1.5)");
    parse_tree_matches("-.5", "Float(-0.5)");
    parse_tree_matches("3.", "Float(3.0)");
    parse_tree_matches("1e3", "Float(1000.0)");
    parse_tree_matches("2.5E-1", "Float(0.25)");
    parse_tree_matches("inf", "Float(inf)");
    parse_tree_matches("-Infinity", "Float(-inf)");
    parse_tree_matches("NaN", "Float(NaN)");
    parse_tree_matches("\"hello\"", "Str(\"hello\")");
    parse_tree_matches("\"\"", "Str(\"\")");
    parse_tree_matches("\"a\"b\"", "Str(\"a\\\"b\")");
}

#[test]
fn test_identifiers() {
    parse_tree_matches("+", "Identifier(\"+\")");
    parse_tree_matches("-", "Identifier(\"-\")");
    parse_tree_matches("1_", "Identifier(\"1_\")");
    parse_tree_matches("1__0", "Identifier(\"1__0\")");
    parse_tree_matches("e5", "Identifier(\"e5\")");
    parse_tree_matches(".", "Identifier(\".\")");
    parse_tree_matches("lambda", "Identifier(\"lambda\")");
    parse_tree_matches("x1", "Identifier(\"x1\")");
}

#[test]
fn test_unbalanced_parentheses() {
    let err = assert_raises_error("(+ 1 2", SyntaxErrorKind::UnclosedList);
    assert_eq!(err.span().start().column, 0);
    assert_eq!(err.span().end().column, 6);

    let err = assert_raises_error("(a (b)", SyntaxErrorKind::UnclosedList);
    assert_eq!(err.span().start().column, 0);

    let err = assert_raises_error("(a))", SyntaxErrorKind::UnexpectedClose);
    assert_eq!(err.span().start().column, 3);

    assert_raises_error(")", SyntaxErrorKind::UnexpectedClose);
}

#[test]
fn test_empty_program() {
    assert_raises_error("", SyntaxErrorKind::EmptyProgram);
    assert_raises_error("   \n  ", SyntaxErrorKind::EmptyProgram);
}

#[test]
fn test_malformed_literals() {
    assert_raises_error(
        "99999999999999999999",
        SyntaxErrorKind::IntegerOutOfRange("99999999999999999999".to_string()),
    );
    assert_raises_error(
        "(print \"a b\")",
        SyntaxErrorKind::UnterminatedString("\"a".to_string()),
    );
    assert_raises_error("\"", SyntaxErrorKind::UnterminatedString("\"".to_string()));
    assert_raises_error("oops\"", SyntaxErrorKind::UnterminatedString("oops\"".to_string()));
}

#[test]
fn test_error_message() {
    let err = assert_raises_error("(a\n  (b)", SyntaxErrorKind::UnclosedList);
    assert_eq!(
        err.to_string(),
        "Error: unbalanced parentheses: this '(' is never closed in line 1, column 1 till line 2, column 6"
    );
}

#[test]
fn test_rendering_round_trip() {
    let trees = vec![
        Expression::int(-12),
        Expression::float(0.1),
        Expression::float(1e300),
        Expression::float(-2.0),
        Expression::float(f64::INFINITY),
        Expression::string("text"),
        Expression::string(""),
        Expression::identifier("head"),
        Expression::List(vec![]),
        Expression::List(vec![
            Expression::identifier("lambda"),
            Expression::List(vec![Expression::identifier("x")]),
            Expression::List(vec![
                Expression::identifier("+"),
                Expression::identifier("x"),
                Expression::float(2.5),
            ]),
        ]),
    ];
    for tree in trees {
        let source = tree.to_string();
        assert_eq!(parse(&source), Ok(program(vec![tree])), "rendered as {source}");
    }
}

#[test]
fn test_nan_renders_as_float() {
    let tree = parse(&Expression::float(f64::NAN).to_string()).unwrap();
    assert!(matches!(
        tree.as_list(),
        Some([Expression::Literal(Literal::Float(r))]) if r.is_nan()
    ));
}

#[test]
fn test_deep_nesting() {
    let depth = 100_000;
    let source = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let tree = parse(&source).unwrap();
    let mut levels = 0;
    let mut node = tree.as_list().and_then(<[Expression]>::first);
    while let Some(inner) = node {
        levels += 1;
        node = inner.as_list().and_then(<[Expression]>::first);
    }
    assert_eq!(levels, depth);
}

#[test]
fn test_deep_stray_close() {
    let depth = 100_000;
    let source = format!("{}{}", "(".repeat(depth), ")".repeat(depth + 1));
    let err = parse(&source).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnexpectedClose);
    assert_eq!(err.span().start().column, 2 * depth);
}

#[test]
fn test_deep_unclosed_list() {
    let depth = 100_000;
    let source = format!("({}{}", "(".repeat(depth), ")".repeat(depth));
    let err = parse(&source).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::UnclosedList);
    assert_eq!(err.span().start().column, 0);
}
