//! Integration tests for the full compile contract.

use crate::{QbError, QueryBuilder, Value, query, table};
use std::cell::Cell;

#[test]
fn select_star_by_default() {
    assert_eq!(table("users").to_sql().unwrap(), "select * from `users`");
}

#[test]
fn select_columns_are_quoted() {
    let qb = table("users").select(&["id", "name"]);
    assert_eq!(qb.to_sql().unwrap(), "select `id`, `name` from `users`");
}

#[test]
fn select_raw_is_verbatim() {
    let qb = table("users").select_raw("count(*) as total");
    assert_eq!(qb.to_sql().unwrap(), "select count(*) as total from `users`");
}

#[test]
fn select_mixes_columns_and_raw() {
    let qb = table("users").select(&["id"]).select_raw("count(*)");
    assert_eq!(qb.to_sql().unwrap(), "select `id`, count(*) from `users`");
}

#[test]
fn select_distinct() {
    let qb = table("users").distinct().select(&["email"]);
    assert_eq!(qb.to_sql().unwrap(), "select distinct `email` from `users`");
}

#[test]
fn where_column_renders_every_operator() {
    for op in ["=", "<", ">", "<=", ">=", "<>", "!="] {
        let sql = table("t").where_column("a", op, "b").unwrap().to_sql().unwrap();
        assert!(
            sql.contains(&format!("`a` {op} `b`")),
            "missing `a` {op} `b` in {sql}"
        );
    }
}

#[test]
fn dotted_column_quotes_each_segment() {
    let sql = table("posts")
        .where_column("id", "=", "users.id")
        .unwrap()
        .to_sql()
        .unwrap();
    assert_eq!(sql, "select * from `posts` where `id` = `users`.`id`");
}

#[test]
fn scalar_subquery_reference_statement() {
    let qb = table("users")
        .where_sub(
            |q| {
                Ok(q.from("posts")
                    .where_column("id", "=", "users.id")?
                    .select_raw("count(*)"))
            },
            "<",
            3,
        )
        .unwrap();

    assert_eq!(
        qb.to_sql().unwrap(),
        "select * from `users` where (select count(*) from `posts` where `id` = `users`.`id`) < ?"
    );
    assert_eq!(qb.to_params().unwrap(), vec![Value::Int(3)]);
}

#[test]
fn subquery_params_splice_before_bound_value() {
    let qb = table("users")
        .where_sub(
            |q| {
                Ok(q.from("posts")
                    .where_value("status", "=", "published")?
                    .select_raw("count(*)"))
            },
            ">=",
            10,
        )
        .unwrap();

    let (sql, params) = qb.build().unwrap();
    assert_eq!(
        sql,
        "select * from `users` where (select count(*) from `posts` where `status` = ?) >= ?"
    );
    assert_eq!(
        params,
        vec![Value::Text("published".to_string()), Value::Int(10)]
    );
}

#[test]
fn sequential_subqueries_keep_param_order() {
    let qb = table("users")
        .where_sub(|q| Ok(q.from("posts").select_raw("count(*)")), "<", 1)
        .unwrap()
        .where_sub(|q| Ok(q.from("comments").select_raw("count(*)")), ">", 2)
        .unwrap();

    let (sql, params) = qb.build().unwrap();
    assert_eq!(
        sql,
        "select * from `users` where (select count(*) from `posts`) < ? \
         and (select count(*) from `comments`) > ?"
    );
    assert_eq!(params, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn prebuilt_subquery_builder() {
    let sub = table("posts")
        .where_column("id", "=", "users.id")
        .unwrap()
        .select_raw("count(*)");
    let qb = table("users").add_where_subquery(sub, "<", 3).unwrap();

    assert_eq!(
        qb.to_sql().unwrap(),
        "select * from `users` where (select count(*) from `posts` where `id` = `users`.`id`) < ?"
    );
}

#[test]
fn render_is_idempotent() {
    let qb = table("users")
        .where_value("age", ">=", 18)
        .unwrap()
        .where_sub(|q| Ok(q.from("posts").select_raw("count(*)")), "<", 3)
        .unwrap();

    let first = qb.build().unwrap();
    let second = qb.build().unwrap();
    assert_eq!(first, second);
    assert_eq!(qb.to_sql().unwrap(), qb.to_sql().unwrap());
}

#[test]
fn placeholder_count_matches_param_count() {
    let qb = table("orders")
        .where_value("status", "=", "open")
        .unwrap()
        .where_in("region", vec![1, 2, 3])
        .where_between("total", 10.0, 99.5)
        .where_raw("a = ? or b = ?", vec![7, 8])
        .where_sub(
            |q| Ok(q.from("items").where_value("qty", ">", 0)?.select_raw("count(*)")),
            ">=",
            5,
        )
        .unwrap();

    let (sql, params) = qb.build().unwrap();
    assert_eq!(sql.matches('?').count(), params.len());
    assert_eq!(params.len(), 10);
}

#[test]
fn no_where_clause_without_predicates() {
    let sql = table("users").to_sql().unwrap();
    assert!(!sql.contains("where"));
}

#[test]
fn missing_table_is_an_error() {
    assert_eq!(QueryBuilder::new().to_sql(), Err(QbError::MissingTable));
    assert_eq!(query().select(&["id"]).to_sql(), Err(QbError::MissingTable));
}

#[test]
fn missing_table_in_subquery_propagates() {
    let qb = table("users")
        .where_sub(|q| Ok(q.select_raw("1")), "<", 1)
        .unwrap();
    assert_eq!(qb.to_sql(), Err(QbError::MissingTable));
}

#[test]
fn repeated_table_calls_last_write_wins() {
    let qb = table("audit").from("users");
    assert_eq!(qb.to_sql().unwrap(), "select * from `users`");
}

#[test]
fn invalid_operator_fails_at_construction() {
    let err = table("t").where_column("a", "DROP", "b").unwrap_err();
    assert_eq!(err, QbError::InvalidOperator("DROP".to_string()));

    assert!(table("t").where_value("a", "; --", 1).is_err());
}

#[test]
fn invalid_operator_rejected_before_subquery_closure_runs() {
    let ran = Cell::new(false);
    let result = table("users").where_sub(
        |q| {
            ran.set(true);
            Ok(q.from("posts"))
        },
        "DROP",
        1,
    );

    assert_eq!(result.unwrap_err(), QbError::InvalidOperator("DROP".to_string()));
    assert!(!ran.get());
}

#[test]
fn where_null_variants() {
    let qb = table("users").where_null("deleted_at").where_not_null("email");
    let (sql, params) = qb.build().unwrap();
    assert_eq!(
        sql,
        "select * from `users` where `deleted_at` is null and `email` is not null"
    );
    assert!(params.is_empty());
}

#[test]
fn where_in_and_empty_list_constants() {
    let qb = table("users").where_in("id", vec![1, 2]);
    let (sql, params) = qb.build().unwrap();
    assert_eq!(sql, "select * from `users` where `id` in (?, ?)");
    assert_eq!(params, vec![Value::Int(1), Value::Int(2)]);

    let sql = table("users").where_in::<i64>("id", vec![]).to_sql().unwrap();
    assert_eq!(sql, "select * from `users` where 0 = 1");

    let sql = table("users")
        .where_not_in::<i64>("id", vec![])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "select * from `users` where 1 = 1");
}

#[test]
fn where_between_param_order() {
    let (sql, params) = table("users").where_between("age", 18, 65).build().unwrap();
    assert_eq!(sql, "select * from `users` where `age` between ? and ?");
    assert_eq!(params, vec![Value::Int(18), Value::Int(65)]);
}

#[test]
fn where_raw_splices_between_neighbors() {
    let (sql, params) = table("t")
        .where_value("a", "=", 1)
        .unwrap()
        .where_raw("b = ? or c = ?", vec![2, 3])
        .where_value("d", "=", 4)
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(
        sql,
        "select * from `t` where `a` = ? and b = ? or c = ? and `d` = ?"
    );
    assert_eq!(
        params,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn where_exists_variants() {
    let qb = table("users")
        .where_exists(|q| {
            Ok(q.from("posts")
                .where_column("user_id", "=", "users.id")?
                .select_raw("1"))
        })
        .unwrap();
    assert_eq!(
        qb.to_sql().unwrap(),
        "select * from `users` where exists (select 1 from `posts` where `user_id` = `users`.`id`)"
    );

    let qb = table("users")
        .where_not_exists(|q| Ok(q.from("bans").where_column("user_id", "=", "users.id")?))
        .unwrap();
    assert_eq!(
        qb.to_sql().unwrap(),
        "select * from `users` where not exists (select * from `bans` where `user_id` = `users`.`id`)"
    );
}

#[test]
fn quote_char_override() {
    let sql = table("users")
        .quote_char('"')
        .select(&["id"])
        .to_sql()
        .unwrap();
    assert_eq!(sql, "select \"id\" from \"users\"");
}

#[test]
fn subquery_inherits_quote_char() {
    let sql = table("users")
        .quote_char('"')
        .where_sub(|q| Ok(q.from("posts").select_raw("count(*)")), "<", 3)
        .unwrap()
        .to_sql()
        .unwrap();
    assert_eq!(
        sql,
        "select * from \"users\" where (select count(*) from \"posts\") < ?"
    );
}

#[test]
fn params_serialize_as_plain_json() {
    let params = table("posts")
        .where_value("status", "=", "published")
        .unwrap()
        .where_value("views", ">", 100)
        .unwrap()
        .to_params()
        .unwrap();

    assert_eq!(serde_json::to_string(&params).unwrap(), r#"["published",100]"#);
}
