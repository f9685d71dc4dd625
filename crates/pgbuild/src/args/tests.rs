//! Tests for the registry and template compiler.

use super::{Args, list, nested, raw};
use crate::builder::build;
use crate::param::Param;

fn debug(params: &[Param]) -> String {
    format!("{:?}", params)
}

fn staged(values: &[i32]) -> Args {
    let mut args = Args::new();
    for v in values {
        args.add(*v);
    }
    args
}

#[test]
fn test_add_returns_position_tokens() {
    let mut args = Args::new();
    assert_eq!(args.add(1), "$0");
    assert_eq!(args.add("a"), "$1");
    assert_eq!(args.add(raw("NOW()")), "$2");
    assert_eq!(args.len(), 3);
}

#[test]
fn test_successive_in_staging_order() {
    let args = staged(&[1, 2]);
    let (sql, params) = args.compile("x IN ($?, $?)", Vec::new());
    assert_eq!(sql, "x IN ($1, $2)");
    assert_eq!(debug(&params), "[1, 2]");
}

#[test]
fn test_dollar_escape_keeps_cursor() {
    let args = staged(&[7, 8]);
    let (sql, params) = args.compile("a = $? AND b = '$$' AND c = $?", Vec::new());
    assert_eq!(sql, "a = $1 AND b = '$' AND c = $2");
    assert_eq!(debug(&params), "[7, 8]");
}

#[test]
fn test_explicit_reference_moves_cursor() {
    let args = staged(&[10, 20, 30, 40]);
    let (sql, params) = args.compile("$1 $? $?", Vec::new());
    assert_eq!(sql, "$1 $2 $3");
    assert_eq!(debug(&params), "[20, 30, 40]");
}

#[test]
fn test_mixed_digit_successive_and_named() {
    let mut args = Args::new();
    args.add(10);
    args.add(20);
    args.add_named("x", 30).unwrap();

    let (sql, params) = args.compile("a = $1 AND b = $? AND c = ${x}", Vec::new());
    assert_eq!(sql, "a = $1 AND b = $2 AND c = $3");
    assert_eq!(debug(&params), "[20, 30, 30]");
}

#[test]
fn test_named_reference_moves_cursor() {
    let mut args = Args::new();
    args.add_named("first", 1).unwrap();
    args.add(2);
    args.add(3);

    let (sql, params) = args.compile("${first}, $?, $?", Vec::new());
    assert_eq!(sql, "$1, $2, $3");
    assert_eq!(debug(&params), "[1, 2, 3]");
}

#[test]
fn test_duplicate_reference_duplicates_value() {
    let args = staged(&[5]);
    let (sql, params) = args.compile("$0 = $0", Vec::new());
    assert_eq!(sql, "$1 = $2");
    assert_eq!(params.len(), 2);
    assert!(params[0].ptr_eq(&params[1]));
    assert_eq!(debug(&params), "[5, 5]");
}

#[test]
fn test_raw_binds_nothing() {
    let mut args = Args::new();
    args.add(1);
    args.add(raw("NOW()"));
    args.add(2);

    let (sql, params) = args.compile("$?, $?, $?", Vec::new());
    assert_eq!(sql, "$1, NOW(), $2");
    assert_eq!(debug(&params), "[1, 2]");
}

#[test]
fn test_list_expands_in_order() {
    let mut args = Args::new();
    let token = args.add(list(["a", "b", "c"]));

    let (sql, params) = args.compile(&format!("name IN ({})", token), Vec::new());
    assert_eq!(sql, "name IN ($1, $2, $3)");
    assert_eq!(debug(&params), r#"["a", "b", "c"]"#);
}

#[test]
fn test_empty_list_writes_nothing() {
    let mut args = Args::new();
    args.add(list(Vec::<i32>::new()));
    args.add(1);

    let (sql, params) = args.compile("($?) $?", Vec::new());
    assert_eq!(sql, "() $1");
    assert_eq!(debug(&params), "[1]");
}

#[test]
fn test_nested_list_and_raw_in_list() {
    let mut args = Args::new();
    args.add(list([list([1, 2]), list([3])]));
    args.add(list([crate::Arg::from(4), raw("DEFAULT")]));

    let (sql, params) = args.compile("($?) ($?)", Vec::new());
    assert_eq!(sql, "($1, $2, $3) ($4, DEFAULT)");
    assert_eq!(debug(&params), "[1, 2, 3, 4]");
}

#[test]
fn test_nested_builder_continues_numbering() {
    let inner = build("SELECT id FROM t WHERE a = $? AND b = $?", [2, 3]);

    let mut args = Args::new();
    args.add(1);
    args.add(nested(inner));
    args.add(4);

    let (sql, params) = args.compile("x = $? AND id IN ($?) AND y = $?", Vec::new());
    assert_eq!(
        sql,
        "x = $1 AND id IN (SELECT id FROM t WHERE a = $2 AND b = $3) AND y = $4"
    );
    assert_eq!(debug(&params), "[1, 2, 3, 4]");
}

#[test]
fn test_list_of_builders() {
    let a = build("SELECT $?", [1]);
    let b = build("SELECT $?", [2]);

    let mut args = Args::new();
    args.add(list([nested(a), nested(b)]));

    let (sql, params) = args.compile("$0", Vec::new());
    assert_eq!(sql, "SELECT $1, SELECT $2");
    assert_eq!(debug(&params), "[1, 2]");
}

#[test]
fn test_initial_values_offset_placeholders() {
    let args = staged(&[9]);
    let (sql, params) = args.compile("v = $?", vec![Param::new("lead")]);
    assert_eq!(sql, "v = $2");
    assert_eq!(debug(&params), r#"["lead", 9]"#);
}

#[test]
fn test_trailing_dollar_is_literal() {
    let args = staged(&[1]);
    let (sql, params) = args.compile("price > 5$", Vec::new());
    assert_eq!(sql, "price > 5$");
    assert!(params.is_empty());
}

#[test]
fn test_unknown_form_is_literal() {
    let args = staged(&[1]);
    let (sql, params) = args.compile("a $x $ b $?", Vec::new());
    assert_eq!(sql, "a $x $ b $1");
    assert_eq!(debug(&params), "[1]");
}

#[test]
fn test_unterminated_named_reference() {
    let mut args = Args::new();
    args.add_alias("a", 1).unwrap();
    args.add(2);

    let (sql, params) = args.compile("x = ${a", Vec::new());
    assert_eq!(sql, "x = ${a");
    assert!(params.is_empty());

    // The rest of the template is still scanned.
    let (sql, params) = args.compile("${a $1", Vec::new());
    assert_eq!(sql, "${a $1");
    assert_eq!(debug(&params), "[2]");
}

#[test]
fn test_unknown_name_is_dropped() {
    let args = staged(&[1, 2]);
    let (sql, params) = args.compile("a = ${missing} AND b = $?", Vec::new());
    assert_eq!(sql, "a =  AND b = $1");
    assert_eq!(debug(&params), "[1]");
}

#[test]
fn test_out_of_range_references_are_dropped() {
    let args = staged(&[1]);
    let (sql, params) = args.compile("a = $5, b = $?, c = $0, d = $?", Vec::new());
    assert_eq!(sql, "a = , b = , c = $1, d = ");
    assert_eq!(debug(&params), "[1]");
}

#[test]
fn test_overflowing_digits_are_dropped() {
    let args = staged(&[1]);
    let (sql, params) = args.compile("a = $99999999999999999999999 b = $?", Vec::new());
    assert_eq!(sql, "a =  b = $1");
    assert_eq!(debug(&params), "[1]");
}

#[test]
fn test_only_named_ignores_digits_and_successive() {
    let mut args = Args::only_named();
    args.add_alias("id", 42).unwrap();

    let (sql, params) = args.compile("SELECT '$1', '$?', $$ WHERE id = ${id}", Vec::new());
    assert_eq!(sql, "SELECT '$1', '$?', $ WHERE id = $1");
    assert_eq!(debug(&params), "[42]");
}

#[test]
fn test_unreferenced_named_values_are_appended_by_position() {
    let mut args = Args::new();
    args.add_named("zeta", "z").unwrap();
    args.add(1);
    args.add_named("alpha", "a").unwrap();
    args.add_named("mid", "m").unwrap();

    let (sql, params) = args.compile("v = $1 AND m = ${mid}", Vec::new());
    assert_eq!(sql, "v = $1 AND m = $2");
    assert_eq!(debug(&params), r#"[1, "m", "z", "a"]"#);

    // Stable across repeated compilations.
    for _ in 0..8 {
        let (_, again) = args.compile("v = $1 AND m = ${mid}", Vec::new());
        assert_eq!(debug(&again), r#"[1, "m", "z", "a"]"#);
    }
}

#[test]
fn test_positional_reference_does_not_consume_named() {
    let mut args = Args::new();
    args.add_named("n", 7).unwrap();

    let (sql, params) = args.compile("$0", Vec::new());
    assert_eq!(sql, "$1");
    assert_eq!(debug(&params), "[7, 7]");
}

#[test]
fn test_unreferenced_alias_binds_nothing() {
    let mut args = Args::new();
    args.add_alias("unused", 1).unwrap();
    let (sql, params) = args.compile("SELECT 1", Vec::new());
    assert_eq!(sql, "SELECT 1");
    assert!(params.is_empty());
}

#[test]
fn test_duplicate_name_fails_fast() {
    let mut args = Args::new();
    assert_eq!(args.add_named("id", 1).unwrap(), "${id}");

    let err = args.add_named("id", 2).unwrap_err();
    assert!(err.is_named_arg_conflict());
    let err = args.add_alias("id", 3).unwrap_err();
    assert!(err.is_named_arg_conflict());
    assert_eq!(args.len(), 1);
}

#[test]
fn test_invalid_name_rejected() {
    let mut args = Args::new();
    let err = args.add_named("a}b", 1).unwrap_err();
    assert!(err.is_invalid_arg_name());
    assert!(args.is_empty());
}

#[test]
fn test_deferred_named_must_be_value() {
    let mut args = Args::new();
    args.add(1);

    let sub = nested(build("x = $?", [5]));
    let err = args.add_named("sub", sub.clone()).unwrap_err();
    assert!(err.is_deferred_not_value());
    let err = args.add_named("now", raw("NOW()")).unwrap_err();
    assert!(err.is_deferred_not_value());
    let err = args.add_named("ids", list([1, 2])).unwrap_err();
    assert!(err.is_deferred_not_value());
    assert_eq!(args.len(), 1);

    // The same arguments are fine as aliases, which are never appended.
    args.add_alias("sub", sub).unwrap();
    let (sql, params) = args.compile("v = $0", Vec::new());
    assert_eq!(sql, "v = $1");
    assert_eq!(debug(&params), "[1]");

    let (sql, params) = args.compile("v = $0 AND ${sub}", Vec::new());
    assert_eq!(sql, "v = $1 AND x = $2");
    assert_eq!(debug(&params), "[1, 5]");
}

#[test]
fn test_set_only_named_on_existing_registry() {
    let mut args = staged(&[1, 2]);
    args.add_alias("id", 3).unwrap();
    assert!(!args.is_only_named());

    let (sql, params) = args.compile("$1 = ${id}", Vec::new());
    assert_eq!(sql, "$1 = $2");
    assert_eq!(debug(&params), "[2, 3]");

    args.set_only_named(true);
    assert!(args.is_only_named());
    let (sql, params) = args.compile("$1 = ${id} AND $? = $$", Vec::new());
    assert_eq!(sql, "$1 = $1 AND $? = $");
    assert_eq!(debug(&params), "[3]");

    args.set_only_named(false);
    let (sql, _) = args.compile("$?", Vec::new());
    assert_eq!(sql, "$1");
}

#[test]
fn test_get_by_position() {
    let mut args = Args::new();
    args.add(1);
    args.add(raw("NOW()"));
    args.add(list(["a", "b"]));

    assert_eq!(format!("{:?}", args.get(0)), "Some(Value(1))");
    assert_eq!(format!("{:?}", args.get(1)), r#"Some(Raw("NOW()"))"#);
    assert_eq!(
        format!("{:?}", args.get(2)),
        r#"Some(List([Value("a"), Value("b")]))"#
    );
    assert!(args.get(3).is_none());
}

#[test]
fn test_compile_is_repeatable() {
    let args = staged(&[1, 2, 3]);
    let first = args.compile("$? $? $?", Vec::new());
    let second = args.compile("$? $? $?", Vec::new());
    assert_eq!(first.0, second.0);
    assert_eq!(debug(&first.1), debug(&second.1));
}

#[test]
fn test_multibyte_text_is_preserved() {
    let args = staged(&[1]);
    let (sql, _) = args.compile("名前 = $? -- ✓", Vec::new());
    assert_eq!(sql, "名前 = $1 -- ✓");
}
