use super::*;
use crate::lang::token::Builtin;

#[test]
fn test_let_literal() {
    assert_eq!(
        statements("10 LET A = 123"),
        vec![Statement::Let(
            1..4,
            Variable::Unary(5..6, float("A")),
            Expression::Number(9..12, 123.0)
        )]
    );
}

#[test]
fn test_bare_number_is_goto() {
    assert_eq!(statements("10 100"), vec![Statement::Goto(1..4, 100)]);
}

#[test]
fn test_for_step_next() {
    assert_eq!(
        statements("10 FOR I=1 TO 9 STEP 2:NEXT I"),
        vec![
            Statement::For(
                1..4,
                float("I"),
                Expression::Number(7..8, 1.0),
                Expression::Number(12..13, 9.0),
                Some(Expression::Number(19..20, 2.0)),
            ),
            Statement::Next(21..25, vec![float("I")]),
        ]
    );
}

#[test]
fn test_next_list() {
    assert_eq!(
        statements("10 NEXT J,I"),
        vec![Statement::Next(1..5, vec![float("J"), float("I")])]
    );
    assert_eq!(statements("10 NEXT"), vec![Statement::Next(1..5, vec![])]);
}

#[test]
fn test_input_prompt() {
    assert_eq!(
        statements("10 INPUT \"AGE\";A,N$"),
        vec![Statement::Input(
            1..6,
            Some("AGE".to_string()),
            vec![
                Variable::Unary(13..14, float("A")),
                Variable::Unary(15..17, Ident::new("N", VarType::String)),
            ]
        )]
    );
}

#[test]
fn test_on_gosub() {
    assert_eq!(
        statements("10 ON X GOSUB 100,200"),
        vec![Statement::OnGosub(
            1..3,
            Expression::Var(4..5, float("X")),
            vec![100, 200]
        )]
    );
}

#[test]
fn test_if_consumes_rest_of_line() {
    assert_eq!(
        statements("10 IF A THEN END:STOP"),
        vec![Statement::If(
            1..3,
            Expression::Var(4..5, float("A")),
            vec![Statement::End(11..14), Statement::Stop(15..19)]
        )]
    );
}

#[test]
fn test_if_goto() {
    assert_eq!(
        statements("10 IF A GOTO 50"),
        vec![Statement::If(
            1..3,
            Expression::Var(4..5, float("A")),
            vec![Statement::Goto(6..10, 50)]
        )]
    );
}

#[test]
fn test_def_fn() {
    let body = Expression::Multiply(
        15..16,
        Box::new(Expression::Var(14..15, float("X"))),
        Box::new(Expression::Number(16..17, 2.0)),
    );
    assert_eq!(
        statements("10 DEF FNA(X) = X*2"),
        vec![Statement::Def(
            1..4,
            float("A"),
            vec![float("X")],
            std::rc::Rc::new(body)
        )]
    );
}

#[test]
fn test_dim_requires_array() {
    let e = Line::from_str("10 DIM A", 1).unwrap_err();
    assert_eq!(e.text(), "EXPECTED ARRAY");
    assert_eq!(
        statements("10 DIM A(3,4)"),
        vec![Statement::Dim(
            1..4,
            vec![Variable::Array(
                5..11,
                float("A"),
                vec![Expression::Number(7..8, 3.0), Expression::Number(9..10, 4.0)]
            )]
        )]
    );
}

#[test]
fn test_remark_and_data() {
    assert_eq!(
        statements("10 PRINT:REM HI"),
        vec![Statement::Print(1..6, vec![]), Statement::Rem(7..13)]
    );
    assert_eq!(
        statements("10 DATA 1, \"A\""),
        vec![Statement::Data(1..12, " 1, \"A\"".to_string())]
    );
}

#[test]
fn test_trailing_apostrophe_remark() {
    assert_eq!(
        statements("10 PRINT 1 ' HI"),
        vec![
            Statement::Print(1..6, vec![PrintItem::Expression(Expression::Number(7..8, 1.0))]),
            Statement::Rem(9..13)
        ]
    );
    assert_eq!(
        statements("10 A=2 ' C"),
        vec![
            Statement::Let(1..2, Variable::Unary(1..2, float("A")), Expression::Number(3..4, 2.0)),
            Statement::Rem(5..8)
        ]
    );
    assert_eq!(
        statements("10 NEXT ' C"),
        vec![Statement::Next(1..5, vec![]), Statement::Rem(6..9)]
    );
}

#[test]
fn test_not_binds_below_relational() {
    assert_eq!(
        statements("10 A=NOT B=C"),
        vec![Statement::Let(
            1..2,
            Variable::Unary(1..2, float("A")),
            Expression::Not(
                3..6,
                Box::new(Expression::Equal(
                    8..9,
                    Box::new(Expression::Var(7..8, float("B"))),
                    Box::new(Expression::Var(9..10, float("C"))),
                ))
            )
        )]
    );
}

#[test]
fn test_rnd_without_parens() {
    assert_eq!(
        statements("10 A=RND"),
        vec![Statement::Let(
            1..2,
            Variable::Unary(1..2, float("A")),
            Expression::Builtin(3..6, Builtin::Rnd, vec![])
        )]
    );
}

#[test]
fn test_unexpected_token() {
    let e = Line::from_str("10 PRINT 1)", 1).unwrap_err();
    assert_eq!(e.code(), ErrorCode::SyntaxError);
    assert_eq!(e.column(), 8..9);
}
