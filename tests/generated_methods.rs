use std::cell::RefCell;
use std::rc::Rc;

use stubclass::{
    Args, Error, Generator, RANDOM_INT_BOUND, RANDOM_TOKEN_LEN, RandomSource, Symbol, TypeMarker,
    Value, Xoshiro256StarStar, generate,
};

fn seeded(seed: u64) -> Rc<RefCell<dyn RandomSource>> {
    Rc::new(RefCell::new(Xoshiro256StarStar::from_seed(seed)))
}

#[test]
fn fixed_return_value_ignores_arguments() {
    let class = generate(|g| {
        g.public_method("hello", |m| {
            m.required("name")?;
            m.returns("world");
            Ok(())
        })
    })
    .unwrap();
    let instance = class.instantiate();
    for arg in ["Alice", "Bob", "anything"] {
        let got = instance.call("hello", Args::new().pos(arg)).unwrap();
        assert_eq!(got, Value::from("world"));
    }
}

#[test]
fn one_required_parameter_enforces_arity() {
    let class = generate(|g| {
        g.public_method("echo", |m| {
            m.required("x")?;
            m.returns(1);
            Ok(())
        })
    })
    .unwrap();
    let instance = class.instantiate();

    assert_eq!(
        instance.call("echo", Args::new()).unwrap_err(),
        Error::Arity("Too few positionals passed; expected 1 arguments but got 0".into())
    );
    assert_eq!(
        instance.call("echo", Args::new().pos(1).pos(2)).unwrap_err(),
        Error::Arity("Too many positionals passed; expected 1 arguments but got 2".into())
    );
    assert_eq!(
        instance.call("echo", Args::new().pos(1)).unwrap(),
        Value::Int(1)
    );
}

#[test]
fn random_integer_is_fresh_each_call() {
    let mut g = Generator::new();
    g.public_method("lucky", |m| {
        m.returns(TypeMarker::Int).generate(true);
        Ok(())
    })
    .unwrap();
    let class = g.build_with_rng(seeded(42));
    let instance = class.instantiate();

    let mut seen = Vec::new();
    for _ in 0..5 {
        match instance.call("lucky", Args::new()).unwrap() {
            Value::Int(n) => {
                assert!((0..RANDOM_INT_BOUND as i64).contains(&n), "out of range: {n}");
                seen.push(n);
            }
            other => panic!("expected Int, got {other:?}"),
        }
    }
    let first = seen[0];
    assert!(
        seen.iter().any(|&n| n != first),
        "five consecutive draws were identical: {seen:?}"
    );
}

#[test]
fn random_string_is_ten_alphanumeric_chars() {
    let mut g = Generator::new();
    g.public_method("token", |m| {
        m.returns(TypeMarker::Str).generate(true);
        Ok(())
    })
    .unwrap();
    let class = g.build_with_rng(seeded(7));
    let instance = class.instantiate();

    for _ in 0..10 {
        match instance.call("token", Args::new()).unwrap() {
            Value::Str(s) => {
                assert_eq!(s.len(), RANDOM_TOKEN_LEN);
                assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
            }
            other => panic!("expected Str, got {other:?}"),
        }
    }
}

#[test]
fn random_symbol_is_ten_alphanumeric_chars() {
    let mut g = Generator::new();
    g.public_method("tag", |m| {
        m.returns(TypeMarker::Sym).generate(true);
        Ok(())
    })
    .unwrap();
    let class = g.build_with_rng(seeded(9));
    let instance = class.instantiate();

    match instance.call("tag", Args::new()).unwrap() {
        Value::Sym(sym) => {
            let spelling = sym.resolve();
            assert_eq!(spelling.len(), RANDOM_TOKEN_LEN);
            assert!(spelling.chars().all(|c| c.is_ascii_alphanumeric()));
        }
        other => panic!("expected Sym, got {other:?}"),
    }
}

#[test]
fn marker_without_generate_flag_returns_the_marker() {
    let class = generate(|g| {
        g.public_method("kind", |m| {
            m.returns(TypeMarker::Str);
            Ok(())
        })
    })
    .unwrap();
    let got = class.instantiate().call("kind", Args::new()).unwrap();
    assert_eq!(got, Value::Marker(TypeMarker::Str));
}

#[test]
fn generate_flag_is_a_noop_for_literal_returns() {
    let class = generate(|g| {
        g.public_method("five", |m| {
            m.returns(5).generate(true);
            Ok(())
        })
    })
    .unwrap();
    let instance = class.instantiate();
    for _ in 0..3 {
        assert_eq!(instance.call("five", Args::new()).unwrap(), Value::Int(5));
    }
}

#[test]
fn unconfigured_return_is_nil() {
    let class = generate(|g| g.public_method("noop", |_| Ok(()))).unwrap();
    let got = class.instantiate().call("noop", Args::new()).unwrap();
    assert_eq!(got, Value::Nil);
}

#[test]
fn greet_end_to_end() {
    let class = generate(|g| {
        g.public_method("greet", |m| {
            m.required("name")?
                .optional("greeting", "Hello")?
                .keyword_required("format")?;
            m.returns(true);
            Ok(())
        })
    })
    .unwrap();
    let instance = class.instantiate();

    let args = Args::new().pos("Alice").named("format", Symbol::intern("json"));
    assert_eq!(instance.call("greet", args).unwrap(), Value::Bool(true));

    let args = Args::new()
        .pos("Bob")
        .pos("Hi")
        .named("format", Symbol::intern("xml"));
    assert_eq!(instance.call("greet", args).unwrap(), Value::Bool(true));

    assert_eq!(
        instance.call("greet", Args::new().pos("Alice")).unwrap_err(),
        Error::Arity("Required named argument 'format' not passed".into())
    );
}

#[test]
fn repeated_builds_are_independent_classes() {
    let mut g = Generator::new();
    g.public_method("ping", |m| {
        m.returns("pong");
        Ok(())
    })
    .unwrap();
    let a = g.build();
    let b = g.build();

    assert_ne!(a.id(), b.id());
    assert_eq!(
        a.instantiate().call("ping", Args::new()).unwrap(),
        Value::from("pong")
    );
    assert_eq!(
        b.instantiate().call("ping", Args::new()).unwrap(),
        Value::from("pong")
    );
}

#[test]
fn class_level_methods_dispatch_on_the_class() {
    let class = generate(|g| {
        g.public_class_method("version", |m| {
            m.returns(3);
            Ok(())
        })
    })
    .unwrap();
    assert_eq!(class.call_class("version", Args::new()).unwrap(), Value::Int(3));
    // Class-level members are not reachable through an instance.
    assert_eq!(
        class.instantiate().call("version", Args::new()).unwrap_err(),
        Error::NoSuchMethod("version".into())
    );
}

#[test]
fn seeded_builds_reproduce_random_sequences() {
    let mut g = Generator::new();
    g.public_method("token", |m| {
        m.returns(TypeMarker::Str).generate(true);
        Ok(())
    })
    .unwrap();

    let first = g.build_with_rng(seeded(1234));
    let second = g.build_with_rng(seeded(1234));
    let a = first.instantiate();
    let b = second.instantiate();

    for _ in 0..5 {
        assert_eq!(
            a.call("token", Args::new()).unwrap(),
            b.call("token", Args::new()).unwrap()
        );
    }
}

#[test]
fn unknown_method_is_reported() {
    let class = generate(|g| g.public_method("known", |_| Ok(()))).unwrap();
    assert_eq!(
        class.instantiate().call("unknown", Args::new()).unwrap_err(),
        Error::NoSuchMethod("unknown".into())
    );
}
