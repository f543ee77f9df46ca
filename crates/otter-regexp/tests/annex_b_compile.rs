//! RegExp.prototype.compile
//!
//! Only instances created by the current realm's own %RegExp% may be
//! recompiled; everything else is a TypeError that leaves the object alone.

use otter_regexp::{Context, RegExpConfig, RegExpErrorKind, RegExpObject, Value, VmError};

fn create(ctx: &mut Context, pattern: &str, flags: &str) -> RegExpObject {
    RegExpObject::create(ctx, &Value::from(pattern), &Value::from(flags)).unwrap()
}

#[test]
fn test_compile_reinitializes_canonical_instance() {
    let mut ctx = Context::new();
    let mut regexp = create(&mut ctx, "a", "g");

    regexp
        .compile(&mut ctx, &Value::from("b+"), &Value::from("im"))
        .unwrap();
    assert_eq!(regexp.original_source().unwrap(), "b+");
    assert_eq!(regexp.flags(), "im");
    assert!(!regexp.global());
    assert_eq!(regexp.last_index(), Value::number(0.0));
}

#[test]
fn test_compile_with_undefined_arguments() {
    let mut ctx = Context::new();
    let mut regexp = create(&mut ctx, "a", "g");

    regexp
        .compile(&mut ctx, &Value::undefined(), &Value::undefined())
        .unwrap();
    assert_eq!(regexp.source(), "(?:)");
    assert_eq!(regexp.flags(), "");
}

#[test]
fn test_compile_on_subclass_instance_throws() {
    let mut ctx = Context::new();
    let subclass = ctx.realm().create_regexp_subclass();
    let mut regexp = RegExpObject::alloc(&ctx, &subclass).unwrap();
    regexp
        .initialize(&mut ctx, &Value::from("a"), &Value::from("g"))
        .unwrap();

    let err = regexp
        .compile(&mut ctx, &Value::from("b"), &Value::undefined())
        .unwrap_err();
    assert!(matches!(err, VmError::TypeError(_)));
    assert_eq!(regexp.original_source().unwrap(), "a");
    assert!(regexp.global());
}

#[test]
fn test_compile_from_another_realm_throws() {
    let mut ctx = Context::new();
    let mut regexp = create(&mut ctx, "a", "");

    let other = ctx.create_realm();
    let home = ctx.enter_realm(other);
    let err = regexp
        .compile(&mut ctx, &Value::from("b"), &Value::undefined())
        .unwrap_err();
    assert!(matches!(err, VmError::TypeError(_)));
    assert_eq!(regexp.original_source().unwrap(), "a");

    ctx.enter_realm(home);
    regexp
        .compile(&mut ctx, &Value::from("b"), &Value::undefined())
        .unwrap();
    assert_eq!(regexp.original_source().unwrap(), "b");
}

#[test]
fn test_compile_disabled_by_config() {
    let config = RegExpConfig::from_json(r#"{ "annexB": false }"#).unwrap();
    let mut ctx = Context::with_config(config);
    let mut regexp = create(&mut ctx, "a", "");

    let err = regexp
        .compile(&mut ctx, &Value::from("b"), &Value::undefined())
        .unwrap_err();
    assert!(matches!(err, VmError::TypeError(_)));
}

#[test]
fn test_compile_rejects_bad_flags_without_changes() {
    let mut ctx = Context::new();
    let mut regexp = create(&mut ctx, "a", "s");

    let err = regexp
        .compile(&mut ctx, &Value::from("b"), &Value::from("ss"))
        .unwrap_err();
    assert_eq!(err.regexp_error_kind(), Some(RegExpErrorKind::DuplicateFlag));
    assert_eq!(regexp.original_source().unwrap(), "a");
    assert!(regexp.dot_all());
}

#[test]
fn test_compile_from_copies_source_and_flags() {
    let mut ctx = Context::new();
    let template = create(&mut ctx, "x\ny", "gm");
    let mut regexp = create(&mut ctx, "a", "");

    regexp
        .compile_from(&mut ctx, &template, &Value::undefined())
        .unwrap();
    assert_eq!(regexp.original_source().unwrap(), "x\ny");
    assert_eq!(regexp.original_flags().unwrap(), "gm");
    assert_eq!(regexp.source(), "x\\ny");
    assert!(regexp.global());
    assert!(regexp.multiline());
}

#[test]
fn test_compile_from_with_flags_throws() {
    let mut ctx = Context::new();
    let template = create(&mut ctx, "x", "g");
    let mut regexp = create(&mut ctx, "a", "");

    let err = regexp
        .compile_from(&mut ctx, &template, &Value::from("i"))
        .unwrap_err();
    assert!(matches!(err, VmError::TypeError(_)));
    assert_eq!(regexp.original_source().unwrap(), "a");
}
