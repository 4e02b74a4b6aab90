mod common;
use basic::lang::ErrorCode;
use common::*;
use pretty_assertions::assert_eq;

#[test]
fn test_dim_and_fill() {
    let source = "10 DIM A(3)\n20 FOR I=0 TO 3:A(I)=I*I:NEXT I\n30 PRINT A(3)";
    assert_eq!(exec(source), " 9 \n");
}

#[test]
fn test_implicit_dimension() {
    assert_eq!(exec("10 A(10)=5\n20 PRINT A(10);A(0)"), " 5  0 \n");
    let e = exec_err("10 A(11)=1");
    assert_eq!(e.code(), ErrorCode::OutOfArrayBounds);
}

#[test]
fn test_two_dimensions() {
    let source = "10 DIM B(2,3)\n20 B(2,3)=7\n30 PRINT B(2,3);B(1,1)";
    assert_eq!(exec(source), " 7  0 \n");
}

#[test]
fn test_string_array() {
    let source = "10 DIM N$(2)\n20 N$(1)=\"X\"\n30 PRINT N$(1);N$(0);\".\"";
    assert_eq!(exec(source), "X.\n");
}

#[test]
fn test_array_names_alias() {
    assert_eq!(exec("10 DIM ABC(2)\n20 ABD(1)=4\n30 PRINT ABC(1)"), " 4 \n");
}

#[test]
fn test_array_errors() {
    let e = exec_err("10 DIM A(5)\n20 DIM A(5)");
    assert_eq!(e.code(), ErrorCode::RedimensionedArray);
    assert_eq!(e.line_number(), Some(20));
    let e = exec_err("10 A(1)=1\n20 DIM A(5)");
    assert_eq!(e.code(), ErrorCode::RedimensionedArray);
    let e = exec_err("10 DIM A(-1)");
    assert_eq!(e.code(), ErrorCode::NegativeArrayDim);
    let e = exec_err("10 DIM A(2)\n20 A(1,1)=0");
    assert_eq!(e.code(), ErrorCode::MismatchedArrayDimensions);
    let e = exec_err("10 A(-1)=0");
    assert_eq!(e.code(), ErrorCode::OutOfArrayBounds);
    let e = exec_err("10 DIM A");
    assert_eq!(e.code(), ErrorCode::SyntaxError);
}
