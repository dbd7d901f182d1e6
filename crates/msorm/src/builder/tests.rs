use chrono::NaiveDate;

use super::*;
use crate::dialect::Dialect;
use crate::error::OrmError;
use crate::filter::{FilterQuery, SubQuery};
use crate::mutate::{Mutate, Mutates, set_all};
use crate::query::{JoinQuery, Query};
use crate::schema::{
    Column, ColumnType, ForeignKeyReference, Index, Key, SchemaOp, Table,
};
use crate::value::Value;

fn select(query: Query) -> (String, Vec<Value>) {
    Dialect::mssql().query().build(&query)
}

fn where_sql(filter: FilterQuery) -> (String, Vec<Value>) {
    select(Query::from("t").filter(filter))
}

// ==================== SELECT ====================

#[test]
fn test_select_all() {
    let (sql, args) = select(Query::from("users"));
    assert_eq!(sql, "SELECT * FROM [users];");
    assert!(args.is_empty());
}

#[test]
fn test_select_fields_distinct() {
    let (sql, _) = select(Query::from("users").select(["id", "name"]).distinct());
    assert_eq!(sql, "SELECT DISTINCT [id], [name] FROM [users];");
}

#[test]
fn test_limit_uses_top() {
    let (sql, _) = select(Query::from("users").limit(10));
    assert_eq!(sql, "SELECT TOP 10 * FROM [users];");
}

#[test]
fn test_offset_without_sort_injects_order() {
    let (sql, _) = select(Query::from("users").limit(10).offset(20));
    assert_eq!(
        sql,
        "SELECT * FROM [users] ORDER BY 1 ASC OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY;"
    );
}

#[test]
fn test_offset_with_sort_and_no_limit() {
    let (sql, _) = select(Query::from("users").sort_asc("id").offset(5));
    assert_eq!(sql, "SELECT * FROM [users] ORDER BY [id] ASC OFFSET 5 ROWS;");
}

#[test]
fn test_multiple_sorts() {
    let (sql, _) = select(Query::from("users").sort_asc("name").sort_desc("id"));
    assert_eq!(sql, "SELECT * FROM [users] ORDER BY [name] ASC,[id] DESC;");
}

#[test]
fn test_group_by_having() {
    let (sql, args) = select(
        Query::from("orders")
            .select(["user_id", "SUM(total) AS total"])
            .group(["user_id"])
            .having(FilterQuery::gt("SUM(total)", 100)),
    );
    assert_eq!(
        sql,
        "SELECT [user_id], SUM([total]) AS [total] FROM [orders] GROUP BY [user_id] HAVING SUM([total])>@p1;"
    );
    assert_eq!(args, vec![Value::Int(100)]);
}

#[test]
fn test_having_without_group_is_skipped() {
    let (sql, args) = select(Query::from("orders").having(FilterQuery::gt("total", 1)));
    assert_eq!(sql, "SELECT * FROM [orders];");
    assert!(args.is_empty());
}

#[test]
fn test_lock_clause() {
    let (sql, _) = select(Query::from("users").lock("WITH (NOLOCK)"));
    assert_eq!(sql, "SELECT * FROM [users] WITH (NOLOCK);");
}

#[test]
fn test_empty_raw_statement_renders_structured() {
    let mut query = Query::raw("", [Value::Int(1)]);
    query.table = "users".into();
    let (sql, args) = select(query);
    assert_eq!(sql, "SELECT * FROM [users];");
    assert!(args.is_empty());
}

#[test]
fn test_raw_statement_passthrough() {
    let (sql, args) = select(Query::raw(
        "SELECT * FROM users WHERE id = @p1",
        [Value::Int(1)],
    ));
    assert_eq!(sql, "SELECT * FROM users WHERE id = @p1");
    assert_eq!(args, vec![Value::Int(1)]);
}

// ==================== JOIN ====================

#[test]
fn test_join_on() {
    let (sql, _) = select(Query::from("users").join_on("roles", "users.role_id", "roles.id"));
    assert_eq!(
        sql,
        "SELECT * FROM [users] JOIN [roles] ON [users].[role_id]=[roles].[id];"
    );
}

#[test]
fn test_join_with_filter() {
    let join = JoinQuery::new("LEFT JOIN", "roles", "users.role_id", "roles.id")
        .with_filter(FilterQuery::eq("roles.active", true));
    let (sql, args) = select(Query::from("users").join(join));
    assert_eq!(
        sql,
        "SELECT * FROM [users] LEFT JOIN [roles] ON [users].[role_id]=[roles].[id] AND [roles].[active]=@p1;"
    );
    assert_eq!(args, vec![Value::Bool(true)]);
}

#[test]
fn test_raw_join_arguments_come_first() {
    let (sql, args) = select(
        Query::from("users")
            .join(JoinQuery::raw("JOIN roles ON roles.id = @p1", [Value::Int(3)]))
            .filter(FilterQuery::eq("a", 1)),
    );
    assert_eq!(
        sql,
        "SELECT * FROM [users] JOIN roles ON roles.id = @p1 WHERE [a]=@p2;"
    );
    assert_eq!(args, vec![Value::Int(3), Value::Int(1)]);
}

// ==================== FILTER ====================

#[test]
fn test_single_condition_not_parenthesized() {
    let (sql, args) = where_sql(FilterQuery::and([FilterQuery::eq("a", 1)]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [a]=@p1;");
    assert_eq!(args, vec![Value::Int(1)]);
}

#[test]
fn test_and_parenthesized() {
    let (sql, args) = where_sql(FilterQuery::and([
        FilterQuery::eq("a", 1),
        FilterQuery::eq("b", 2),
    ]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE ([a]=@p1 AND [b]=@p2);");
    assert_eq!(args, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_nested_or_and() {
    let (sql, args) = where_sql(FilterQuery::or([
        FilterQuery::eq("a", 1),
        FilterQuery::and([FilterQuery::ne("b", 2), FilterQuery::lte("c", 3)]),
    ]));
    assert_eq!(
        sql,
        "SELECT * FROM [t] WHERE ([a]=@p1 OR ([b]<>@p2 AND [c]<=@p3));"
    );
    assert_eq!(args.len(), 3);
}

#[test]
fn test_empty_children_are_skipped() {
    let (sql, _) = where_sql(FilterQuery::or([
        FilterQuery::default(),
        FilterQuery::gte("a", 1),
    ]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [a]>=@p1;");
}

#[test]
fn test_not() {
    let (sql, _) = where_sql(FilterQuery::not([FilterQuery::eq("a", 1)]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE NOT [a]=@p1;");

    let (sql, _) = where_sql(FilterQuery::not([
        FilterQuery::eq("a", 1),
        FilterQuery::lt("b", 2),
    ]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE NOT ([a]=@p1 AND [b]<@p2);");
}

#[test]
fn test_empty_or_renders_no_where() {
    let (sql, args) = where_sql(FilterQuery::or(Vec::new()));
    assert_eq!(sql, "SELECT * FROM [t];");
    assert!(args.is_empty());
}

#[test]
fn test_not_of_empty_or_renders_no_where() {
    let (sql, _) = where_sql(FilterQuery::not([FilterQuery::or(Vec::new())]));
    assert_eq!(sql, "SELECT * FROM [t];");

    let (sql, _) = where_sql(FilterQuery::and([
        FilterQuery::not([FilterQuery::or(Vec::new())]),
        FilterQuery::eq("a", 1),
    ]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [a]=@p1;");
}

#[test]
fn test_empty_or_in_having_join_and_delete() {
    let dialect = Dialect::mssql();

    let (sql, _) = select(
        Query::from("orders")
            .group(["user_id"])
            .having(FilterQuery::or(Vec::new())),
    );
    assert_eq!(sql, "SELECT * FROM [orders] GROUP BY [user_id];");

    let join = JoinQuery::new("JOIN", "roles", "users.role_id", "roles.id")
        .with_filter(FilterQuery::or(Vec::new()));
    let (sql, _) = select(Query::from("users").join(join));
    assert_eq!(
        sql,
        "SELECT * FROM [users] JOIN [roles] ON [users].[role_id]=[roles].[id];"
    );

    let (sql, _) = dialect.delete().build("users", &FilterQuery::or(Vec::new()));
    assert_eq!(sql, "DELETE FROM [users];");
}

#[test]
fn test_nil_checks() {
    let (sql, args) = where_sql(FilterQuery::nil("deleted_at"));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [deleted_at] IS NULL;");
    assert!(args.is_empty());

    let (sql, _) = where_sql(FilterQuery::not_nil("deleted_at"));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [deleted_at] IS NOT NULL;");
}

#[test]
fn test_in_values() {
    let (sql, args) = where_sql(FilterQuery::in_("id", [1, 2, 3]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [id] IN (@p1,@p2,@p3);");
    assert_eq!(args, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);

    let (sql, _) = where_sql(FilterQuery::nin("id", ["a", "b"]));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [id] NOT IN (@p1,@p2);");
}

#[test]
fn test_in_empty() {
    let (sql, args) = where_sql(FilterQuery::in_("id", Vec::<i32>::new()));
    assert_eq!(sql, "SELECT * FROM [t] WHERE 1=0;");
    assert!(args.is_empty());

    let (sql, _) = where_sql(FilterQuery::nin("id", Vec::<i32>::new()));
    assert_eq!(sql, "SELECT * FROM [t] WHERE 1=1;");
}

#[test]
fn test_in_subquery_shares_numbering() {
    let sub = Query::from("orders")
        .select(["user_id"])
        .filter(FilterQuery::eq("total", 100));
    let (sql, args) = select(
        Query::from("users")
            .filter(FilterQuery::eq("active", true))
            .filter(FilterQuery::in_("id", [sub])),
    );
    assert_eq!(
        sql,
        "SELECT * FROM [users] WHERE ([active]=@p1 AND [id] IN (SELECT [user_id] FROM [orders] WHERE [total]=@p2));"
    );
    assert_eq!(args, vec![Value::Bool(true), Value::Int(100)]);
}

#[test]
fn test_in_raw_subquery() {
    let (sql, _) = where_sql(FilterQuery::in_(
        "id",
        [Query::raw("SELECT id FROM admins", Vec::new())],
    ));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [id] IN (SELECT id FROM admins);");
}

#[test]
fn test_in_prefixed_subquery_drops_prefix() {
    let (sql, _) = where_sql(FilterQuery::in_(
        "a",
        [SubQuery::new("EXISTS", Query::from("u"))],
    ));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [a] IN (SELECT * FROM [u]);");
}

#[test]
fn test_compare_with_subqueries() {
    let (sql, _) = where_sql(FilterQuery::eq(
        "score",
        SubQuery::new("ANY", Query::from("scores").select(["value"])),
    ));
    assert_eq!(
        sql,
        "SELECT * FROM [t] WHERE [score]=ANY(SELECT [value] FROM [scores]);"
    );

    let (sql, _) = where_sql(FilterQuery::gt(
        "total",
        Query::from("orders").select(["AVG(total)"]),
    ));
    assert_eq!(
        sql,
        "SELECT * FROM [t] WHERE [total]>(SELECT AVG([total]) FROM [orders]);"
    );
}

#[test]
fn test_like() {
    let (sql, args) = where_sql(FilterQuery::like("name", "%ab%"));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [name] LIKE @p1;");
    assert_eq!(args, vec![Value::from("%ab%")]);

    let (sql, _) = where_sql(FilterQuery::not_like("name", "x%"));
    assert_eq!(sql, "SELECT * FROM [t] WHERE [name] NOT LIKE @p1;");
}

#[test]
fn test_fragment_arguments_take_their_positions() {
    let (sql, args) = select(
        Query::from("t")
            .filter(FilterQuery::fragment("age > @p1", [Value::Int(18)]))
            .filter(FilterQuery::eq("a", 1)),
    );
    assert_eq!(sql, "SELECT * FROM [t] WHERE (age > @p1 AND [a]=@p2);");
    assert_eq!(args, vec![Value::Int(18), Value::Int(1)]);
}

// ==================== INSERT ====================

#[test]
fn test_insert() {
    let mutates = set_all([("name", Value::from("alice")), ("age", Value::from(30))]);
    let (sql, args) = Dialect::mssql().insert().build("users", "id", &mutates);
    assert_eq!(
        sql,
        "INSERT INTO [users] ([age],[name]) OUTPUT [INSERTED].[id] VALUES (@p1,@p2);"
    );
    assert_eq!(args, vec![Value::Int(30), Value::from("alice")]);
}

#[test]
fn test_insert_identity() {
    let mutates = set_all([("id", Value::from(5)), ("name", Value::from("a"))]);
    let (sql, args) = Dialect::mssql().insert().build("users", "id", &mutates);
    assert_eq!(
        sql,
        "SET IDENTITY_INSERT [users] ON; INSERT INTO [users] ([id],[name]) OUTPUT [INSERTED].[id] VALUES (@p1,@p2); SET IDENTITY_INSERT [users] OFF;"
    );
    assert_eq!(args.len(), 2);
}

#[test]
fn test_insert_primary_increment_skips_identity() {
    let mut mutates = set_all([("name", "a")]);
    mutates.insert("id".into(), Mutate::Inc(Value::Int(1)));
    let (sql, args) = Dialect::mssql().insert().build("users", "id", &mutates);
    assert_eq!(
        sql,
        "INSERT INTO [users] ([name]) OUTPUT [INSERTED].[id] VALUES (@p1);"
    );
    assert_eq!(args, vec![Value::from("a")]);
}

#[test]
fn test_insert_only_set_ops() {
    let mut mutates = set_all([("name", "a")]);
    mutates.insert("count".into(), Mutate::Inc(Value::Int(1)));
    let (sql, args) = Dialect::mssql().insert().build("users", "", &mutates);
    assert_eq!(sql, "INSERT INTO [users] ([name]) VALUES (@p1);");
    assert_eq!(args, vec![Value::from("a")]);
}

#[test]
fn test_insert_default_values() {
    let (sql, args) = Dialect::mssql()
        .insert()
        .build("users", "id", &Mutates::new());
    assert_eq!(sql, "INSERT INTO [users] OUTPUT [INSERTED].[id] DEFAULT VALUES;");
    assert!(args.is_empty());
}

#[test]
fn test_insert_placeholders_match_arguments() {
    let mutates = set_all((0..12).map(|i| (format!("c{i}"), i)));
    let (sql, args) = Dialect::mssql().insert().build("t", "", &mutates);
    assert_eq!(sql.matches("@p").count(), 12);
    assert_eq!(args.len(), 12);
    assert!(sql.contains("@p12)"));
}

#[test]
fn test_insert_all_defaults_missing_fields() {
    let fields: Vec<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
    let rows = vec![
        set_all([("a", 1), ("b", 2), ("c", 3)]),
        set_all([("a", 4), ("b", 5)]),
    ];
    let (sql, args) = Dialect::mssql()
        .insert_all()
        .build("t", "id", &fields, &rows);
    assert_eq!(
        sql,
        "INSERT INTO [t] ([a],[b],[c]) OUTPUT [INSERTED].[id] VALUES (@p1,@p2,@p3),(@p4,@p5,DEFAULT);"
    );
    assert_eq!(args.len(), 5);
    assert_eq!(sql.matches("),(").count() + 1, rows.len());
}

#[test]
fn test_insert_all_identity() {
    let fields: Vec<String> = vec!["id".into(), "name".into()];
    let rows = vec![set_all([("id", Value::from(1)), ("name", Value::from("x"))])];
    let (sql, _) = Dialect::mssql()
        .insert_all()
        .build("users", "id", &fields, &rows);
    assert!(sql.starts_with("SET IDENTITY_INSERT [users] ON; INSERT INTO [users] ([id],[name])"));
    assert!(sql.ends_with("VALUES (@p1,@p2); SET IDENTITY_INSERT [users] OFF;"));
}

// ==================== UPDATE / DELETE ====================

#[test]
fn test_update() {
    let mut mutates = Mutates::new();
    mutates.insert("name".into(), Mutate::Set("bob".into()));
    mutates.insert("count".into(), Mutate::Inc(Value::Int(1)));
    mutates.insert("id".into(), Mutate::Set(Value::Int(9)));

    let (sql, args) =
        Dialect::mssql()
            .update()
            .build("users", "id", &mutates, &FilterQuery::eq("id", 5));
    assert_eq!(
        sql,
        "UPDATE [users] SET [count]=[count]+@p1,[name]=@p2 WHERE [id]=@p3;"
    );
    assert_eq!(args, vec![Value::Int(1), Value::from("bob"), Value::Int(5)]);
}

#[test]
fn test_update_fragment() {
    let mut mutates = Mutates::new();
    mutates.insert("name".into(), Mutate::Set("x".into()));
    mutates.insert(
        "version = version + @p2".into(),
        Mutate::Fragment(vec![Value::Int(1)]),
    );
    let (sql, args) =
        Dialect::mssql()
            .update()
            .build("t", "id", &mutates, &FilterQuery::default());
    assert_eq!(sql, "UPDATE [t] SET [name]=@p1,version = version + @p2;");
    assert_eq!(args, vec![Value::from("x"), Value::Int(1)]);
}

#[test]
fn test_update_with_subquery_filter() {
    let filter = FilterQuery::in_("id", [Query::from("banned").select(["user_id"])]);
    let (sql, _) = Dialect::mssql().update().build(
        "users",
        "id",
        &set_all([("active", false)]),
        &filter,
    );
    assert_eq!(
        sql,
        "UPDATE [users] SET [active]=@p1 WHERE [id] IN (SELECT [user_id] FROM [banned]);"
    );
}

#[test]
fn test_update_has_assignments() {
    assert!(!UpdateBuilder::has_assignments("id", &set_all([("id", 1)])));
    assert!(UpdateBuilder::has_assignments("id", &set_all([("name", "a")])));
}

#[test]
fn test_delete() {
    let dialect = Dialect::mssql();
    let (sql, args) = dialect.delete().build("users", &FilterQuery::eq("id", 1));
    assert_eq!(sql, "DELETE FROM [users] WHERE [id]=@p1;");
    assert_eq!(args, vec![Value::Int(1)]);

    let (sql, _) = dialect.delete().build("users", &FilterQuery::default());
    assert_eq!(sql, "DELETE FROM [users];");
}

// ==================== TABLE ====================

fn table_sql(table: Table) -> String {
    Dialect::mssql().table().build(&table).unwrap()
}

#[test]
fn test_create_table() {
    let sql = table_sql(
        Table::create("users")
            .column(Column::new("id", ColumnType::Id))
            .column(
                Column::new("name", ColumnType::String)
                    .limit(100)
                    .unique()
                    .required(),
            )
            .column(Column::new("active", ColumnType::Bool).default_value(true))
            .column(
                Column::new("price", ColumnType::Decimal)
                    .precision(10)
                    .scale(2)
                    .default_value(1.5),
            ),
    );
    assert_eq!(
        sql,
        "CREATE TABLE [users] ([id] INT NOT NULL IDENTITY(1,1), [name] NVARCHAR(100) UNIQUE NOT NULL, [active] BIT DEFAULT 1, [price] DECIMAL(10,2) DEFAULT 1.5);"
    );
}

#[test]
fn test_create_table_optional_raw_and_options() {
    let sql = table_sql(
        Table::create("logs")
            .optional()
            .column(Column::new("msg", ColumnType::Text))
            .raw("CONSTRAINT ck CHECK (1=1)")
            .options("WITH (DATA_COMPRESSION = PAGE)"),
    );
    assert_eq!(
        sql,
        "IF OBJECT_ID('[logs]', 'U') IS NULL CREATE TABLE [logs] ([msg] NVARCHAR(MAX), CONSTRAINT ck CHECK (1=1)) WITH (DATA_COMPRESSION = PAGE);"
    );
}

#[test]
fn test_create_table_without_definitions() {
    assert_eq!(table_sql(Table::create("empty")), "CREATE TABLE [empty];");
}

#[test]
fn test_column_defaults() {
    let date = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let at = date.and_hms_opt(3, 4, 5).unwrap();
    let sql = table_sql(
        Table::create("t")
            .column(Column::new("s", ColumnType::String).default_value("it's"))
            .column(Column::new("d", ColumnType::Date).default_value(date))
            .column(Column::new("at", ColumnType::DateTime).default_value(at))
            .column(Column::new("n", ColumnType::Int).default_value(0)),
    );
    assert_eq!(
        sql,
        "CREATE TABLE [t] ([s] NVARCHAR(255) DEFAULT 'it''s', [d] DATE DEFAULT '2020-01-02', [at] DATETIMEOFFSET DEFAULT '2020-01-02 03:04:05', [n] INT DEFAULT 0);"
    );
}

#[test]
fn test_keys() {
    let sql = table_sql(
        Table::create("orders")
            .column(Column::new("id", ColumnType::BigId))
            .column(Column::new("user_id", ColumnType::BigInt))
            .key(Key::primary(["id"]).named("pk_orders"))
            .key(Key::foreign(
                ["user_id"],
                ForeignKeyReference {
                    table: "users".into(),
                    columns: vec!["id".into()],
                    on_delete: "CASCADE".into(),
                    on_update: String::new(),
                },
            )),
    );
    assert_eq!(
        sql,
        "CREATE TABLE [orders] ([id] BIGINT NOT NULL IDENTITY(1,1), [user_id] BIGINT, CONSTRAINT [pk_orders] PRIMARY KEY ([id]), FOREIGN KEY ([user_id]) REFERENCES [users] ([id]) ON DELETE CASCADE);"
    );
}

#[test]
fn test_alter_table() {
    let sql = table_sql(
        Table::alter("users")
            .column(Column::new("age", ColumnType::Int))
            .column(Column::rename("name", "full_name"))
            .column(Column::drop("legacy"))
            .key(Key::unique(["email"]))
            .raw("ADD CONSTRAINT x UNIQUE ([a])"),
    );
    assert_eq!(
        sql,
        "ALTER TABLE [users] ADD [age] INT;\
         EXEC sp_rename '[users].[name]', [full_name], 'COLUMN';\
         ALTER TABLE [users] DROP COLUMN [legacy];\
         ALTER TABLE [users] ADD UNIQUE ([email]);\
         ALTER TABLE [users] ADD CONSTRAINT x UNIQUE ([a]);"
    );
}

#[test]
fn test_alter_unsupported() {
    let dialect = Dialect::mssql();

    let mut column = Column::new("age", ColumnType::BigInt);
    column.op = SchemaOp::Alter;
    let err = dialect
        .table()
        .build(&Table::alter("users").column(column))
        .unwrap_err();
    assert!(matches!(err, OrmError::Unsupported(_)));

    let mut key = Key::unique(["email"]).named("uq_email");
    key.op = SchemaOp::Drop;
    let err = dialect
        .table()
        .build(&Table::alter("users").key(key))
        .unwrap_err();
    assert!(matches!(err, OrmError::Unsupported(_)));
}

#[test]
fn test_rename_and_drop_table() {
    assert_eq!(
        table_sql(Table::rename("users", "people")),
        "EXEC sp_rename [users], [people];"
    );
    assert_eq!(table_sql(Table::drop("users")), "DROP TABLE [users];");
    assert_eq!(
        table_sql(Table::drop("users").optional()),
        "IF OBJECT_ID('[users]', 'U') IS NOT NULL DROP TABLE [users];"
    );
}

// ==================== INDEX ====================

fn index_sql(index: Index) -> String {
    Dialect::mssql().index().build(&index).unwrap()
}

#[test]
fn test_create_index() {
    assert_eq!(
        index_sql(Index::create("users", "idx_users_email", ["email"])),
        "CREATE INDEX [idx_users_email] ON [users] ([email]);"
    );
}

#[test]
fn test_unique_index_ignores_nulls() {
    assert_eq!(
        index_sql(Index::create("t", "ux", ["a", "b"]).unique()),
        "CREATE UNIQUE NONCLUSTERED INDEX [ux] ON [t] ([a], [b]) WHERE [a] IS NOT NULL AND [b] IS NOT NULL;"
    );
}

#[test]
fn test_filtered_index_inlines_values() {
    assert_eq!(
        index_sql(
            Index::create("t", "ux", ["a"])
                .unique()
                .filter(FilterQuery::eq("deleted", false))
        ),
        "CREATE UNIQUE NONCLUSTERED INDEX [ux] ON [t] ([a]) WHERE [a] IS NOT NULL AND [deleted]=0;"
    );
    assert_eq!(
        index_sql(Index::create("t", "i", ["a"]).filter(FilterQuery::eq("status", "active"))),
        "CREATE INDEX [i] ON [t] ([a]) WHERE [status]='active';"
    );
}

#[test]
fn test_optional_index() {
    assert_eq!(
        index_sql(Index::create("t", "i", ["a"]).optional()),
        "IF NOT EXISTS (SELECT 1 FROM sys.indexes WHERE name = 'i' AND object_id = OBJECT_ID('[t]')) CREATE INDEX [i] ON [t] ([a]);"
    );
}

#[test]
fn test_drop_index() {
    assert_eq!(index_sql(Index::drop("t", "i")), "DROP INDEX [i] ON [t];");
    assert_eq!(
        index_sql(Index::drop("t", "i").optional()),
        "DROP INDEX IF EXISTS [i] ON [t];"
    );
}

#[test]
fn test_index_options() {
    assert_eq!(
        index_sql(Index::create("t", "i", ["a"]).options("WITH (ONLINE = ON)")),
        "CREATE INDEX [i] ON [t] ([a]) WITH (ONLINE = ON);"
    );
}

#[test]
fn test_index_alter_unsupported() {
    let mut index = Index::create("t", "i", ["a"]);
    index.op = SchemaOp::Rename;
    let err = Dialect::mssql().index().build(&index).unwrap_err();
    assert!(matches!(err, OrmError::Unsupported(_)));
}

#[test]
fn test_default_writers_match_dialect() {
    let query = Query::from("users").filter(FilterQuery::eq("id", 1));
    assert_eq!(QueryBuilder::default().build(&query), select(query));
    assert_eq!(
        TableBuilder::default()
            .build(&Table::create("t").column(Column::new("b", ColumnType::Bool).default_value(false)))
            .unwrap(),
        "CREATE TABLE [t] ([b] BIT DEFAULT 0);"
    );
}
