mod common;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_primes() {
    let source = r#"
10 FOR N=2 TO 20
20 P=1
30 FOR D=2 TO N-1
40 IF D<N AND N/D=INT(N/D) THEN P=0
50 NEXT D
60 IF P THEN PRINT N;
70 NEXT N
80 PRINT
"#;
    assert_eq!(exec(source), " 2  3  5  7  11  13  17  19 \n");
}

#[test]
fn test_fibonacci_subroutine() {
    let source = r#"
10 A=0:B=1
20 FOR I=1 TO 8
30 GOSUB 100
40 NEXT I
50 PRINT
60 END
100 PRINT A;
110 C=A+B:A=B:B=C
120 RETURN
"#;
    assert_eq!(exec(source), " 0  1  1  2  3  5  8  13 \n");
}

#[test]
fn test_bubble_sort() {
    let source = r#"
10 DIM A(4)
20 FOR I=0 TO 4:READ A(I):NEXT I
30 FOR I=0 TO 3
40 FOR J=0 TO 3-I
50 IF A(J)>A(J+1) THEN T=A(J):A(J)=A(J+1):A(J+1)=T
60 NEXT J
70 NEXT I
80 FOR I=0 TO 4:PRINT A(I);:NEXT I
90 DATA 5,3,9,1,7
"#;
    assert_eq!(exec(source), " 1  3  5  7  9 ");
}

#[test]
fn test_reverse_string() {
    let source = r#"
10 S$="HELLO":R$=""
20 FOR I=LEN(S$) TO 1 STEP -1
30 R$=R$+MID$(S$,I,1)
40 NEXT I
50 PRINT R$
"#;
    assert_eq!(exec(source), "OLLEH\n");
}

#[test]
fn test_guessing_game() {
    let source = r#"
10 T=42
20 INPUT "GUESS";G
30 IF G<T THEN PRINT "HIGHER":GOTO 20
40 IF G>T THEN PRINT "LOWER":GOTO 20
50 PRINT "RIGHT"
"#;
    assert_eq!(
        exec_with_input(source, &["10", "50", "42"]),
        "GUESS? HIGHER\nGUESS? LOWER\nGUESS? RIGHT\n"
    );
}
