use std::cell::{Cell, RefCell};
use std::io::Cursor;
use std::rc::Rc;

use crate::{
    environment::prelude::Environment,
    eval::prelude::{Interpreter, RuntimeError},
    parser::prelude::parse_module
};

fn run_with_input(src: &str, input: &str) -> Result<String, RuntimeError> {
    let parsed = parse_module(src).expect("source should parse");

    let env = Rc::new(RefCell::new(Environment::new()));
    let mut output = Vec::new();
    let mut input = Cursor::new(input.as_bytes().to_vec());

    // Run on a temporary so the sink borrows end before the output is read
    Interpreter::new(&mut output, &mut input).run(&parsed.module.program, &env)?;

    Ok(String::from_utf8(output).expect("output should be utf8"))
}

fn run(src: &str) -> Result<String, RuntimeError> {
    run_with_input(src, "")
}

fn output_of(src: &str) -> String {
    run(src).expect("source should run")
}

fn kind_of(src: &str) -> &'static str {
    run(src).expect_err("source should fail").kind()
}

#[test]
fn hello_world() {
    assert_eq!(output_of(r#"print "Hello, world!""#), "Hello, world!\n");
}

#[test]
fn arithmetic_stays_integer() {
    assert_eq!(output_of("print 2 + 3 * 4"), "14\n");
    assert_eq!(output_of("print 7 % 3"), "1\n");
    assert_eq!(output_of("print -(2 + 3)"), "-5\n");
}

#[test]
fn mixed_arithmetic_widens_to_float() {
    assert_eq!(output_of("print 1 + 0.5"), "1.5\n");
    assert_eq!(output_of("print 2 * 1.5"), "3.0\n");
}

#[test]
fn division_is_always_float() {
    assert_eq!(output_of("print 7 / 2"), "3.5\n");
    assert_eq!(output_of("print 4 / 2"), "2.0\n");
}

#[test]
fn floats_render_with_fractional_part() {
    assert_eq!(output_of("print 3.0"), "3.0\n");
    assert_eq!(output_of("print .5"), "0.5\n");
    assert_eq!(output_of("print 5."), "5.0\n");
}

#[test]
fn division_by_zero() {
    assert_eq!(kind_of("print 1 / 0"), "DivisionByZeroError");
    assert_eq!(kind_of("print 1 / 0.0"), "DivisionByZeroError");
    assert_eq!(kind_of("print 1 % 0"), "DivisionByZeroError");
}

#[test]
fn modulo_is_floored() {
    assert_eq!(output_of("print 7 % 3"), "1\n");
    // The result takes the sign of the divisor
    assert_eq!(output_of("print -7 % 3"), "2\n");
    assert_eq!(output_of("print 7 % -3"), "-2\n");
    assert_eq!(output_of("print -7 % -3"), "-1\n");
}

#[test]
fn modulo_is_integer_only() {
    assert_eq!(kind_of("print 7.0 % 3"), "TypeError");
}

#[test]
fn string_concatenation() {
    assert_eq!(output_of(r#"print "Score: " + 42"#), "Score: 42\n");
    assert_eq!(output_of(r#"print 1.5 + " points""#), "1.5 points\n");
    assert_eq!(output_of(r#"print "a" + "b""#), "ab\n");
}

#[test]
fn comparisons() {
    assert_eq!(output_of("print 1 < 2"), "true\n");
    assert_eq!(output_of("print 2 <= 2.0"), "true\n");
    assert_eq!(output_of("print 3 > 4"), "false\n");
    assert_eq!(kind_of(r#"print "a" < "b""#), "TypeError");
}

#[test]
fn large_integer_comparisons_stay_exact() {
    // 2^53 and 2^53 + 1 collapse to the same f64
    assert_eq!(output_of("print 9007199254740992 < 9007199254740993"), "true\n");
    assert_eq!(output_of("print 9007199254740993 <= 9007199254740992"), "false\n");
    assert_eq!(output_of("print 9007199254740993 > 9007199254740992"), "true\n");
}

#[test]
fn equality_is_false_across_kinds() {
    assert_eq!(output_of("print 1 == 1.0"), "false\n");
    assert_eq!(output_of(r#"print 1 == "1""#), "false\n");
    assert_eq!(output_of("print nil == nil"), "true\n");
    assert_eq!(output_of("print [1, 2] == [1, 2]"), "true\n");
    assert_eq!(output_of("print 1 != 2"), "true\n");
}

#[test]
fn unary_operators() {
    assert_eq!(output_of("print -2.5"), "-2.5\n");
    assert_eq!(output_of("print not false"), "true\n");
    assert_eq!(kind_of("print not 1"), "TypeError");
    assert_eq!(kind_of(r#"print -"x""#), "TypeError");
}

#[test]
fn conditions_must_be_boolean() {
    assert_eq!(kind_of("if 1 then print 1 end"), "TypeError");
    assert_eq!(kind_of(r#"while "x" do print 1 end"#), "TypeError");
    assert_eq!(kind_of("if nil then print 1 end"), "TypeError");
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(output_of("print false and undefined_fn()"), "false\n");
    assert_eq!(output_of("print true or undefined_fn()"), "true\n");
    assert_eq!(output_of("print true and false"), "false\n");
    assert_eq!(kind_of("print 1 and true"), "TypeError");
    assert_eq!(kind_of("print false or 1"), "TypeError");
}

#[test]
fn if_else_branches() {
    assert_eq!(output_of(r#"if 1 < 2 then print "yes" else print "no" end"#), "yes\n");
    assert_eq!(output_of(r#"if 1 > 2 then print "yes" else print "no" end"#), "no\n");
    assert_eq!(output_of("if false then print 1 end"), "");
}

#[test]
fn while_loop_counts() {
    let src = "
        let i = 1
        while i <= 5 do
            print i
            let i = i + 1
        end
    ";

    assert_eq!(output_of(src), "1\n2\n3\n4\n5\n");
}

#[test]
fn blocks_do_not_introduce_scope() {
    assert_eq!(output_of("if true then let x = 1 end print x"), "1\n");
}

#[test]
fn let_rebinds_nearest_enclosing_binding() {
    let src = "
        let counter = 0
        func bump()
            let counter = counter + 1
        end
        bump()
        bump()
        print counter
    ";

    assert_eq!(output_of(src), "2\n");
}

#[test]
fn parameters_shadow_outer_bindings() {
    let src = "
        func f(x)
            let x = x + 1
            return x
        end
        let x = 10
        print f(1)
        print x
    ";

    assert_eq!(output_of(src), "2\n10\n");
}

#[test]
fn factorial() {
    let src = "
        func fact(n)
            if n <= 1 then
                return 1
            end
            return n * fact(n - 1)
        end
        print fact(10)
    ";

    assert_eq!(output_of(src), "3628800\n");
}

#[test]
fn functions_without_return_yield_nil() {
    assert_eq!(output_of("func f() end print f()"), "nil\n");
    assert_eq!(output_of("func f() return end print f()"), "nil\n");
}

#[test]
fn return_propagates_through_loops() {
    let src = "
        func first_even(xs)
            let i = 0
            while i < len(xs) do
                if xs[i] % 2 == 0 then
                    return xs[i]
                end
                let i = i + 1
            end
            return nil
        end
        print first_even([1, 3, 4, 5])
    ";

    assert_eq!(output_of(src), "4\n");
}

#[test]
fn closures_capture_environment_by_reference() {
    let src = "
        func make()
            let n = 0
            func get()
                return n
            end
            let n = 5
            return get
        end
        let g = make()
        print g()
    ";

    assert_eq!(output_of(src), "5\n");
}

#[test]
fn functions_are_values() {
    let src = "
        func double(x)
            return x * 2
        end
        let f = double
        print f(21)
    ";

    // Calls resolve through the environment, so an alias works
    assert_eq!(output_of(src), "42\n");
    assert_eq!(output_of("func double(x) return x * 2 end print double"), "<func double>\n");
}

#[test]
fn list_literals_and_indexing() {
    assert_eq!(output_of("print [1, 2, 3][0]"), "1\n");
    assert_eq!(output_of("let grid = [[1, 2], [3, 4]] print grid[0][1]"), "2\n");
    assert_eq!(output_of("print [1, 2.0, \"x\"]"), "[1, 2.0, x]\n");
}

#[test]
fn index_errors() {
    assert_eq!(kind_of("print [1][2]"), "IndexError");
    assert_eq!(kind_of("print [1][-1]"), "IndexError");
    assert_eq!(kind_of(r#"print [1]["a"]"#), "IndexError");
    assert_eq!(kind_of(r#"print "abc"[0]"#), "TypeError");
}

#[test]
fn lists_are_aliased() {
    let src = "
        let a = [1]
        let b = a
        let ignored = append(a, 2)
        print b[1]
        print len(b)
        print pop(b)
        print len(a)
    ";

    assert_eq!(output_of(src), "2\n2\n2\n1\n");
}

#[test]
fn pop_from_empty_list() {
    assert_eq!(kind_of("print pop([])"), "IndexError");
}

#[test]
fn undefined_names() {
    assert_eq!(kind_of("print x"), "NameError");
    assert_eq!(kind_of("foo()"), "NameError");
}

#[test]
fn calling_a_non_function() {
    assert_eq!(kind_of("let x = 1 x()"), "NameError");
}

#[test]
fn arity_mismatch() {
    assert_eq!(kind_of("func f(a) return a end f(1, 2)"), "ArityError");
    assert_eq!(kind_of("func f(a) return a end f()"), "ArityError");
    assert_eq!(kind_of("len()"), "ArityError");
}

#[test]
fn return_outside_function() {
    assert_eq!(kind_of("return 1"), "SyntaxContextError");
    assert_eq!(kind_of("if true then return end"), "SyntaxContextError");
}

#[test]
fn deep_recursion_overflows() {
    // The interpreter recurses on the native stack, give the thread room
    // to hit the depth limit first
    std::thread::Builder::new()
        .stack_size(16 * 1024 * 1024)
        .spawn(|| assert_eq!(kind_of("func f() return f() end f()"), "StackOverflowError"))
        .expect("thread should spawn")
        .join()
        .expect("thread should not panic");
}

#[test]
fn user_function_shadows_builtin() {
    assert_eq!(output_of(r#"func len(x) return 99 end print len("abc")"#), "99\n");
}

#[test]
fn builtin_len() {
    assert_eq!(output_of(r#"print len("abc")"#), "3\n");
    assert_eq!(output_of("print len([1, 2])"), "2\n");
    assert_eq!(kind_of("print len(1)"), "TypeError");
}

#[test]
fn builtin_type() {
    assert_eq!(output_of("print type(1)"), "int\n");
    assert_eq!(output_of("print type(1.0)"), "float\n");
    assert_eq!(output_of(r#"print type("x")"#), "string\n");
    assert_eq!(output_of("print type(true)"), "bool\n");
    assert_eq!(output_of("print type(nil)"), "nil\n");
    assert_eq!(output_of("print type([])"), "list\n");
    assert_eq!(output_of("func f() end print type(f)"), "function\n");
}

#[test]
fn builtin_str() {
    assert_eq!(output_of("print str(1.5)"), "1.5\n");
    assert_eq!(output_of("print str(nil)"), "nil\n");
    assert_eq!(output_of(r#"print str(42) + "!""#), "42!\n");
}

#[test]
fn builtin_int() {
    assert_eq!(output_of(r#"print int("12")"#), "12\n");
    assert_eq!(output_of("print int(3.9)"), "3\n");
    assert_eq!(output_of("print int(-3.9)"), "-3\n");
    assert_eq!(kind_of(r#"print int("twelve")"#), "TypeError");
    assert_eq!(kind_of("print int(true)"), "TypeError");
}

#[test]
fn builtin_float() {
    assert_eq!(output_of("print float(2)"), "2.0\n");
    assert_eq!(output_of(r#"print float("2.5")"#), "2.5\n");
    assert_eq!(kind_of(r#"print float("x")"#), "TypeError");
}

#[test]
fn builtin_abs() {
    assert_eq!(output_of("print abs(-5)"), "5\n");
    assert_eq!(output_of("print abs(-2.5)"), "2.5\n");
    assert_eq!(output_of("print abs(3)"), "3\n");
}

#[test]
fn builtin_max_min() {
    assert_eq!(output_of("print max(1, 2.5, 2)"), "2.5\n");
    assert_eq!(output_of("print min(3, 1, 2)"), "1\n");
    assert_eq!(output_of("print max([3, 7, 5])"), "7\n");
    assert_eq!(kind_of("print max()"), "ArityError");
    assert_eq!(kind_of("print max([])"), "ArityError");
    assert_eq!(kind_of(r#"print max("a", "b")"#), "TypeError");
}

#[test]
fn builtin_input() {
    assert_eq!(run_with_input("print input()", "hi\n"), Ok("hi\n".to_string()));
    assert_eq!(
        run_with_input(r#"print "Hello, " + input("? ")"#, "Ada\n"),
        Ok("? Hello, Ada\n".to_string())
    );
    // End of input reads as the empty string
    assert_eq!(run_with_input("print len(input())", ""), Ok("0\n".to_string()));
}

#[test]
fn comments_are_ignored() {
    let src = "
        # a comment on its own line
        print 1 # trailing comment
        print 2
    ";

    assert_eq!(output_of(src), "1\n2\n");
}

#[test]
fn interrupt_stops_execution() {
    let parsed = parse_module("let i = 0 while true do let i = i + 1 end")
        .expect("source should parse");

    let env = Rc::new(RefCell::new(Environment::new()));
    let mut output = Vec::new();
    let mut input = Cursor::new(Vec::new());
    let polls = Cell::new(0u32);

    let mut interpreter = Interpreter::new(&mut output, &mut input)
        .with_interrupt(|| {
            polls.set(polls.get() + 1);
            polls.get() > 10
        });

    let error = interpreter.run(&parsed.module.program, &env)
        .expect_err("should be interrupted");

    assert_eq!(error.kind(), "InterruptedError");
}

#[test]
fn environment_persists_across_runs() {
    let env = Rc::new(RefCell::new(Environment::new()));

    for (src, expected) in [("let x = 2", ""), ("print x * 21", "42\n")] {
        let parsed = parse_module(src).expect("source should parse");

        let mut output = Vec::new();
        let mut input = Cursor::new(Vec::new());

        Interpreter::new(&mut output, &mut input)
            .run(&parsed.module.program, &env)
            .expect("source should run");

        assert_eq!(String::from_utf8(output).expect("utf8"), expected);
    }
}
