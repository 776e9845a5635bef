//! End-to-end tests: expression text in, truth table and verdict out.

use test_log::test;

use whopper::enumerate::assignments;
use whopper::error::{Found, ParseError};
use whopper::token::TokenKind;
use whopper::{parse, run, Checker, Config, Error, LexPolicy};

fn names(text: &str) -> Vec<String> {
    let (_, identifiers) = parse(text).unwrap();
    identifiers.iter().map(|name| name.to_string()).collect()
}

// ─── Enumeration ───────────────────────────────────────────────────────────────

#[test]
fn enumeration_counts() {
    assert_eq!(assignments(0).count(), 1);
    assert_eq!(assignments(1).count(), 2);
    assert_eq!(assignments(5).count(), 32);
}

#[test]
fn enumeration_order() {
    let rows: Vec<Vec<bool>> = assignments(3).collect();
    for (index, row) in rows.iter().enumerate() {
        for (position, &value) in row.iter().enumerate() {
            let bit = (index >> (2 - position)) & 1 == 1;
            assert_eq!(value, bit, "row {} position {}", index, position);
        }
    }
    assert_eq!(rows[0], [false, false, false]);
    assert_eq!(rows[7], [true, true, true]);
}

// ─── Parsing ───────────────────────────────────────────────────────────────────

#[test]
fn identifiers_are_deduplicated() {
    assert_eq!(names("A and A or B"), ["A", "B"]);
    assert_eq!(names("Z or (A and Z)"), ["Z", "A"]);
}

#[test]
fn keywords_are_case_sensitive() {
    assert_eq!(names("And or NOT"), ["And", "NOT"]);
}

#[test]
fn reparse_starts_fresh() {
    let _ = parse("A and B and C").unwrap();
    assert_eq!(names("D"), ["D"]);

    let _ = parse("A and (").unwrap_err();
    assert_eq!(names("E or F"), ["E", "F"]);
}

#[test]
fn mixed_implies_equals_chain_groups_left() {
    let (ast, _) = parse("A implies B equals C").unwrap();
    let (explicit, _) = parse("(A implies B) equals C").unwrap();
    let table = run("A implies B equals C").unwrap();
    let grouped = run("(A implies B) equals C").unwrap();
    assert_eq!(
        table.results().collect::<Vec<_>>(),
        grouped.results().collect::<Vec<_>>()
    );
    assert_eq!(ast.to_string(), "A implies B equals C");
    assert_eq!(explicit.to_string(), "(A implies B) equals C");
}

#[test]
fn and_or_chain_groups_left() {
    // `(A or B) and C`, not `A or (B and C)`: differs at A = true, C = false.
    let table = run("A or B and C").unwrap();
    let grouped = run("(A or B) and C").unwrap();
    assert_eq!(
        table.results().collect::<Vec<_>>(),
        grouped.results().collect::<Vec<_>>()
    );
}

// ─── Validity ──────────────────────────────────────────────────────────────────

#[test]
fn excluded_middle_is_valid() {
    assert!(run("A or not A").unwrap().is_valid());
}

#[test]
fn contradiction_is_invalid() {
    let table = run("A and not A").unwrap();
    assert!(!table.is_valid());
    assert!(table.results().all(|value| !value));
}

#[test]
fn reflexive_connectives_are_valid() {
    assert!(run("A implies A").unwrap().is_valid());
    assert!(run("A equals A").unwrap().is_valid());
    assert!(run("not not A equals A").unwrap().is_valid());
}

#[test]
fn equals_of_distinct_identifiers_is_invalid() {
    let table = run("A equals B").unwrap();
    assert!(!table.is_valid());
    assert_eq!(table.results().collect::<Vec<_>>(), [true, false, false, true]);
}

#[test]
fn classic_tautologies() {
    for text in [
        "(A implies B) and (B implies C) implies (A implies C)",
        "not (A and B) equals (not A or not B)",
        "((P implies Q) implies P) implies P",
        "A and (B or C) equals ((A and B) or (A and C))",
    ] {
        assert!(run(text).unwrap().is_valid(), "{}", text);
    }
}

#[test]
fn evaluation_is_deterministic() {
    let first = run("(A or B) implies not C equals A").unwrap();
    let second = run("(A or B) implies not C equals A").unwrap();
    assert_eq!(first, second);
}

// ─── Table layout ──────────────────────────────────────────────────────────────

#[test]
fn and_table() {
    let table = run("A and B").unwrap();
    assert_eq!(table.header(), ["A", "B", "A and B", "A and B"]);
    assert_eq!(
        table.rows(),
        [
            [false, false, false, false],
            [false, true, false, false],
            [true, false, false, false],
            [true, true, true, true],
        ]
    );
}

#[test]
fn shared_subexpression_has_one_column() {
    let table = run("not A and not A").unwrap();
    assert_eq!(table.header(), ["A", "not A", "not A and not A", "not A and not A"]);
    for row in table.rows() {
        assert_eq!(row.len(), table.header().len());
    }
}

#[test]
fn identifier_columns_lead() {
    let table = run("C or B and A").unwrap();
    assert_eq!(table.identifier_count(), 3);
    assert_eq!(table.header()[..3], ["C", "B", "A"]);
}

// ─── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn dangling_operator() {
    let err = run("A and").unwrap_err();
    assert_eq!(err.offset(), Some(5));
    match err {
        Error::Parse(ParseError::Syntax(e)) => assert!(e.is_end_of_input()),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn unclosed_paren() {
    let err = run("(A and B").unwrap_err();
    assert_eq!(err.offset(), Some(8));
}

#[test]
fn stray_close_paren() {
    let err = run("A and B)").unwrap_err();
    assert_eq!(err.offset(), Some(7));
    match err {
        Error::Parse(ParseError::Syntax(e)) => {
            assert!(matches!(e.found, Found::Token(ref token) if token.kind == TokenKind::RParen));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn empty_input() {
    let err = run("").unwrap_err();
    assert_eq!(err.offset(), Some(0));
    assert!(run("   ").is_err());
}

#[test]
fn adjacent_identifiers() {
    let err = run("A B").unwrap_err();
    assert_eq!(err.offset(), Some(2));
}

#[test]
fn illegal_character() {
    let err = run("A $ B").unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::Lex(whopper::error::LexError { character: '$', offset: 2 })));
    assert_eq!(err.to_string(), "illegal character '$' at offset 2");
}

#[test]
fn skipping_illegal_characters() {
    let checker = Checker::new(Config::default().with_lex_policy(LexPolicy::Skip));
    let table = checker.check("A & or not A").unwrap();
    assert!(table.is_valid());
}

#[test]
fn deep_nesting_is_an_error() {
    let err = run(&format!("{}A", "not ".repeat(100_000))).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::Depth(_))));
    assert_eq!(err.offset(), Some(1024));

    let err = run(&format!("{}A{}", "(".repeat(50_000), ")".repeat(50_000))).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::Depth(_))));
}

#[test]
fn long_operator_chain_is_evaluated() {
    let table = run(&vec!["A"; 200].join(" implies ")).unwrap();
    assert!(table.is_valid());
    assert_eq!(table.rows().len(), 2);
}

#[test]
fn identifier_limit() {
    let checker = Checker::new(Config::default().with_max_identifiers(3));
    assert!(checker.check("a or b or c").is_ok());
    assert_eq!(
        checker.check("a or b or c or d").unwrap_err(),
        Error::TooManyIdentifiers { count: 4, limit: 3 }
    );
}
