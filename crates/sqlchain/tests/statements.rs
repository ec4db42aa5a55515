use sqlchain::prelude::*;
use sqlchain::{Predicate, SetValue};

#[test]
fn username_in_list_renders_where_clause() {
    let (sql, args) = qb::filter()
        .where_(Predicate::eq().column("username", ["moe", "larry", "curly", "shemp"]))
        .to_sql()
        .unwrap();

    assert_eq!(sql, " WHERE username IN (?,?,?,?)");
    assert_eq!(
        args,
        vec![
            Value::from("moe"),
            Value::from("larry"),
            Value::from("curly"),
            Value::from("shemp"),
        ]
    );
}

#[test]
fn update_without_set_clause_is_rejected() {
    let err = qb::update("users").eq("id", 1).to_sql().unwrap_err();
    match err {
        SqlError::MissingRequiredField { statement, field } => {
            assert_eq!(statement, "update");
            assert!(field.contains("SET"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn offset_without_limit_is_omitted() {
    let (sql, _) = qb::select(["*"])
        .from("users")
        .offset(100)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users");

    let (sql, _) = qb::select(["*"])
        .from("users")
        .limit(0)
        .offset(100)
        .to_sql()
        .unwrap();
    assert_eq!(sql, "SELECT * FROM users");
}

#[test]
fn nil_and_list_values_pick_the_right_operator() {
    let (sql, args) = qb::select(["*"])
        .from("t")
        .eq("a", None::<i32>)
        .not_eq("b", None::<i32>)
        .eq("c", vec![1, 2])
        .not_eq("d", vec![3])
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM t WHERE a IS NULL AND b IS NOT NULL AND c IN (?,?) AND d NOT IN (?)"
    );
    assert_eq!(args, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

#[test]
fn ordering_predicates_reject_nil_and_lists() {
    for err in [
        qb::select(["*"]).from("t").gt("a", Value::Null).to_sql(),
        qb::select(["*"]).from("t").gt_or_eq("a", vec![1]).to_sql(),
        qb::select(["*"]).from("t").lt("a", Value::Null).to_sql(),
        qb::select(["*"]).from("t").lt_or_eq("a", vec![1, 2]).to_sql(),
    ] {
        assert!(err.unwrap_err().is_not_comparable());
    }
}

#[test]
fn nested_groups_parenthesize_mixed_kinds_only() {
    let cond = Expr::or([
        Expr::and([Expr::eq("a", 1), Expr::eq("b", 2)]),
        Expr::or([Expr::eq("c", 3), Expr::eq("d", 4)]),
    ]);
    let (sql, _) = cond.to_sql().unwrap();
    assert_eq!(sql, "(a = ? AND b = ?) OR c = ? OR d = ?");
}

#[test]
fn postgres_statement_round_trip() {
    let psql = StatementBuilder::new().with_placeholder_format(PlaceholderFormat::Dollar);

    let built = psql
        .update("accounts")
        .set_value("balance", SetValue::Decrement(Value::from(25)))
        .set_expr("updated_at", "NOW()")
        .eq("id", 9)
        .gt_or_eq("balance", 25)
        .returning("balance")
        .build()
        .unwrap();

    assert_eq!(
        built.sql,
        "UPDATE accounts SET balance = balance - $1, updated_at = NOW() \
         WHERE id = $2 AND balance >= $3 RETURNING balance"
    );
    assert_eq!(built.params, vec![Value::Int(25), Value::Int(9), Value::Int(25)]);
    assert_eq!(built.params_ref().len(), 3);
}

#[test]
fn placeholder_format_from_config_string() {
    let format: PlaceholderFormat = "at_p".parse().unwrap();
    let sql = qb::delete("t")
        .with_placeholder_format(format)
        .eq("a", 1)
        .to_sql_string()
        .unwrap();
    assert_eq!(sql, "DELETE FROM t WHERE a = @p1");
}
