//! Placeholder numbering through the public API.

use pgbuild::{
    Arg, Args, Builder, Cond, Param, SelectBuilder, build, build_named, list, params_ref,
};

fn debug(params: &[Param]) -> String {
    format!("{:?}", params)
}

#[test]
fn successive_references_follow_staging_order() {
    let (sql, params) = build("x IN ($?, $?)", [1, 2]).build();
    assert_eq!(sql, "x IN ($1, $2)");
    assert_eq!(debug(&params), "[1, 2]");
}

#[test]
fn explicit_named_and_successive_share_one_cursor() {
    let mut args = Args::new();
    args.add(10);
    args.add(20);
    args.add_named("x", 30).unwrap();

    let (sql, params) = args.compile("a = $1 AND b = $? AND c = ${x}", Vec::new());
    assert_eq!(sql, "a = $1 AND b = $2 AND c = $3");
    assert_eq!(debug(&params), "[20, 30, 30]");
}

#[test]
fn placeholders_continue_after_initial_params() {
    let initial = vec![Param::new("a"), Param::new("b")];
    let (sql, params) = build("id = $0 AND tag = $1", [7, 8]).build_with(initial);
    assert_eq!(sql, "id = $3 AND tag = $4");
    assert_eq!(debug(&params), r#"["a", "b", 7, 8]"#);
}

#[test]
fn dollar_escape_and_literal_text() {
    let (sql, params) = build("SELECT '$$' || $?, 'US$x', price$", ["v"]).build();
    assert_eq!(sql, "SELECT '$' || $1, 'US$x', price$");
    assert_eq!(debug(&params), r#"["v"]"#);
}

#[test]
fn unterminated_named_reference_is_literal() {
    let mut args = Args::new();
    args.add_named("id", 1).unwrap();
    let (sql, params) = args.compile("WHERE x = ${id", Vec::new());
    assert_eq!(sql, "WHERE x = ${id");
    assert_eq!(debug(&params), "[1]");
}

#[test]
fn only_named_leaves_positional_text_alone() {
    let b = build_named(
        "CREATE FUNCTION f() RETURNS int AS $1$ SELECT ${n} $1$",
        [("n", 5)],
    )
    .unwrap();
    let (sql, params) = b.build();
    assert_eq!(sql, "CREATE FUNCTION f() RETURNS int AS $1$ SELECT $1 $1$");
    assert_eq!(debug(&params), "[5]");
}

#[test]
fn unreferenced_named_values_are_appended() {
    let mut args = Args::new();
    args.add(1);
    args.add_named("zeta", "z").unwrap();
    args.add_named("alpha", "a").unwrap();
    args.add_named("used", "u").unwrap();

    let (sql, params) = args.compile("SELECT $0, ${used}", Vec::new());
    assert_eq!(sql, "SELECT $1, $2");
    assert_eq!(debug(&params), r#"[1, "u", "z", "a"]"#);
}

#[test]
fn nested_builders_renumber_inside_lists() {
    let inner = build("SELECT id FROM t WHERE k = $?", ["key"]);
    let (sql, params) = build(
        "a = $? AND b IN ($?) AND c IN ($?)",
        [
            Arg::from(1),
            list([Arg::from(2), Arg::from(3)]),
            Arg::from(inner),
        ],
    )
    .build();
    assert_eq!(
        sql,
        "a = $1 AND b IN ($2, $3) AND c IN (SELECT id FROM t WHERE k = $4)"
    );
    assert_eq!(debug(&params), r#"[1, 2, 3, "key"]"#);
}

#[test]
fn driver_types_bind_through_params_ref() {
    let day = chrono::NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let id = uuid::Uuid::nil();
    let payload = serde_json::json!({ "plan": "pro" });

    let mut sb = SelectBuilder::new();
    let owner = sb.eq("owner_id", id);
    let since = sb.ge("created_on", day);
    let meta = sb.expr("meta", "@>", payload);
    sb.select(["id"])
        .from(["accounts"])
        .and_where([owner, since, meta]);

    let (sql, params) = sb.build();
    assert_eq!(
        sql,
        "SELECT id FROM accounts WHERE owner_id = $1 AND created_on >= $2 AND meta @> $3"
    );
    assert_eq!(params_ref(&params).len(), 3);
    assert_eq!(format!("{:?}", params[1]), "2024-02-29");
}

#[test]
fn compiling_twice_gives_identical_output() {
    let mut sb = SelectBuilder::new();
    let a = sb.eq("a", 1);
    let b = sb.not_in("b", Vec::<i32>::new());
    sb.select(["*"]).from(["t"]).and_where([a, b]);

    let first = sb.build();
    let second = sb.build();
    assert_eq!(first.0, "SELECT * FROM t WHERE a = $1 AND 1=1");
    assert_eq!(first.0, second.0);
    assert!(first.1[0].ptr_eq(&second.1[0]));
}
