use super::*;

fn nothing() -> u8 {
    7
}

fn sum3(a: i32, b: i64, c: u8) -> i64 {
    i64::from(a) + b + i64::from(c)
}

fn join(a: String, b: &'static str) -> String {
    format!("{a}{b}")
}

#[derive(Debug, PartialEq)]
struct Tally(i32);

impl Tally {
    fn bump(&mut self, by: i32) -> i32 {
        self.0 += by;
        self.0
    }

    fn peek(&self, offset: i32) -> i32 {
        self.0 + offset
    }
}

#[test]
fn calls_zero_arity_function() {
    let f: fn() -> u8 = nothing;
    assert_eq!(f.call(()), 7);
}

#[test]
fn calls_multi_arity_function_with_tuple() {
    let f: fn(i32, i64, u8) -> i64 = sum3;
    assert_eq!(f.call((1, 2, 3)), 6);
}

#[test]
fn passes_owned_arguments_through() {
    let f: fn(String, &'static str) -> String = join;
    assert_eq!(f.call(("ab".to_string(), "cd")), "abcd");
}

#[test]
fn calls_mutating_method_on_receiver() {
    let mut tally = Tally(1);
    let out = <fn(i32) -> i32 as Signature>::call_method::<Tally>(Tally::bump, &mut tally, (4,));
    assert_eq!(out, 5);
    assert_eq!(tally, Tally(5));
}

#[test]
fn calls_const_method_on_receiver() {
    let tally = Tally(3);
    let out =
        <fn(i32) -> i32 as Signature>::call_const_method::<Tally>(Tally::peek, &tally, (10,));
    assert_eq!(out, 13);
}

#[test]
fn same_function_has_same_address() {
    let a: fn(i32, i64, u8) -> i64 = sum3;
    let b: fn(i32, i64, u8) -> i64 = sum3;
    assert_eq!(a.address(), b.address());
}

#[test]
fn distinct_methods_have_distinct_addresses() {
    let bump = <fn(i32) -> i32 as Signature>::method_address::<Tally>(Tally::bump);
    let peek = <fn(i32) -> i32 as Signature>::const_method_address::<Tally>(Tally::peek);
    assert_ne!(bump, peek);
}
