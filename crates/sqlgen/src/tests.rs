//! End-to-end builder scenarios.

use crate::{
    AliasedSource, BuildError, Column, DeleteBuilder, DistinctQualifier, Expr, Filter,
    FilterGroup, Formatter, FrameBound, Function, InsertBuilder, Join, OrderBy, Placeholder,
    RenderOptions, SelectBuilder, SetOperation, Statement, StatementKind, StatementRef, Table,
    Token, TokenKind, UpdateBuilder, ValueList, Window, WindowFrame, render,
};

fn select_one() -> SelectBuilder {
    let mut select = SelectBuilder::new();
    select.add_projection(1);
    select
}

fn customer_orders() -> SelectBuilder {
    let customer = AliasedSource::aliased(Table::new("Customer").unwrap(), "c").unwrap();
    let order = AliasedSource::aliased(Table::new("Order").unwrap(), "o").unwrap();
    let join = Join::start(customer.clone())
        .left_outer_join(order.clone())
        .unwrap()
        .on(Filter::equal_to(
            customer.column("Id").unwrap(),
            order.column("CustomerId").unwrap(),
        ))
        .unwrap();

    let mut select = SelectBuilder::new();
    select.add_join(join).unwrap();
    select
        .add_projection(customer.column("Name").unwrap())
        .add_projection_as(
            Function::new("COUNT").unwrap().arg(order.column("Id").unwrap()),
            "orders",
        )
        .unwrap();
    select
        .add_where(Filter::is_not_null(customer.column("Email").unwrap()))
        .add_group_by(customer.column("Name").unwrap());
    select
}

#[test]
fn test_render_is_idempotent() {
    let select = customer_orders();
    let formatter = Formatter::new();
    assert_eq!(formatter.render(&select), formatter.render(&select));
    assert_eq!(
        render(&select),
        "SELECT c.Name, COUNT(o.Id) AS orders FROM Customer c LEFT OUTER JOIN Order o ON c.Id = o.CustomerId WHERE c.Email IS NOT NULL GROUP BY c.Name"
    );
}

#[test]
fn test_alias_as_toggle_only_inserts_as() {
    let select = customer_orders();
    let plain = render(&select);
    let with_as = Formatter::with_options(
        RenderOptions::new().with_alias_column_sources_using_as(true),
    )
    .render(&select);

    assert_eq!(
        with_as,
        "SELECT c.Name, COUNT(o.Id) AS orders FROM Customer AS c LEFT OUTER JOIN Order AS o ON c.Id = o.CustomerId WHERE c.Email IS NOT NULL GROUP BY c.Name"
    );
    assert_eq!(with_as.replace("Customer AS c", "Customer c").replace("Order AS o", "Order o"), plain);
}

#[test]
fn test_alias_as_precedes_alias_for_every_source_kind() {
    let options = RenderOptions::new().with_alias_column_sources_using_as(true);
    let formatter = Formatter::with_options(options);
    let sources = [
        AliasedSource::aliased(Table::new("T").unwrap(), "a").unwrap(),
        AliasedSource::aliased(Function::new("F").unwrap(), "a").unwrap(),
        AliasedSource::aliased(select_one(), "a").unwrap(),
    ];
    for source in sources {
        let mut select = SelectBuilder::new();
        select.add_source(source).unwrap();
        let tokens: Vec<Token> = formatter.tokens(&select).into_iter().collect();
        let as_positions: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.kind() == TokenKind::Keyword && t.text() == "AS")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(as_positions.len(), 1);
        let alias = &tokens[as_positions[0] + 1];
        assert_eq!(alias.text(), "a");
        assert_eq!(as_positions[0] + 2, tokens.len());
    }
}

#[test]
fn test_union_shares_one_builder() {
    let one = select_one();
    let union = SetOperation::union(one.clone(), one.clone());
    assert_eq!(render(&union), "SELECT 1 UNION SELECT 1");
    let union_all = union.with_distinct(DistinctQualifier::All);
    assert_eq!(render(&union_all), "SELECT 1 UNION ALL SELECT 1");
    let union_distinct = SetOperation::union(one.clone(), one).with_distinct(DistinctQualifier::Distinct);
    assert_eq!(render(&union_distinct), "SELECT 1 UNION DISTINCT SELECT 1");
}

#[test]
fn test_nested_set_operations_are_not_implicitly_wrapped() {
    let inner = SetOperation::intersect(select_one(), select_one());
    let outer = SetOperation::union(select_one(), inner.clone());
    assert_eq!(render(&outer), "SELECT 1 UNION SELECT 1 INTERSECT SELECT 1");

    let outer = SetOperation::union(select_one(), inner.wrapped());
    assert_eq!(render(&outer), "SELECT 1 UNION (SELECT 1 INTERSECT SELECT 1)");

    let outer = SetOperation::except(select_one().wrapped(), select_one());
    assert_eq!(render(&outer), "(SELECT 1) EXCEPT SELECT 1");
}

#[test]
fn test_wrapped_query_gets_one_pair_in_subquery_contexts() {
    let mut select = SelectBuilder::new();
    select.add_projection(select_one().wrapped());
    select.add_where(Filter::exists(select_one().wrapped()));
    assert_eq!(render(&select), "SELECT (SELECT 1) WHERE EXISTS(SELECT 1)");
    assert_eq!(render(&select_one().wrapped()), "(SELECT 1)");
}

#[test]
fn test_top_percent_with_ties_order_is_fixed() {
    let mut select = select_one();
    select.set_top(Some(crate::Top::new(10).with_ties().percent()));
    assert_eq!(render(&select), "SELECT TOP 10 PERCENT WITH TIES 1");
}

#[test]
fn test_window_partition_unbounded_frame() {
    let x = Column::new("x").unwrap();
    let y = Column::new("y").unwrap();
    let mut window = Window::new();
    window
        .add_partition(x.clone())
        .add_order_by(OrderBy::new(y))
        .set_frame(Some(WindowFrame::between(
            FrameBound::UnboundedPreceding,
            FrameBound::UnboundedFollowing,
        )));
    let mut select = SelectBuilder::new();
    select.add_projection(Function::new("SUM").unwrap().arg(x).over(window));
    assert_eq!(
        render(&select),
        "SELECT SUM(x) OVER (PARTITION BY x ORDER BY y ROWS BETWEEN UNBOUNDED PRECEDING AND UNBOUNDED FOLLOWING)"
    );
}

#[test]
fn test_empty_where_filters_are_omitted() {
    let mut select = select_one();
    select.add_where(FilterGroup::and().into());
    select.add_where(Filter::not(FilterGroup::or().into()).wrapped());
    assert_eq!(render(&select), "SELECT 1");

    select.add_where(Filter::equal_to(1, 1));
    assert_eq!(render(&select), "SELECT 1 WHERE 1 = 1");
}

#[test]
fn test_select_without_projections() {
    let mut select = SelectBuilder::new();
    select.add_table("T").unwrap();
    assert_eq!(render(&select), "SELECT FROM T");
}

#[test]
fn test_remove_source_keeps_join_intact() {
    let mut select = customer_orders();
    assert!(select.remove_source("o").is_some());
    assert!(!select.sources().contains("o"));
    assert!(render(&select).contains("LEFT OUTER JOIN Order o"));
}

#[test]
fn test_duplicate_source_reported() {
    let mut select = SelectBuilder::new();
    select.add_table("T").unwrap();
    let err = select.add_table("T").unwrap_err();
    assert_eq!(err, BuildError::DuplicateSource("T".to_string()));
    assert_eq!(err.to_string(), "Duplicate source: T");
}

#[test]
fn test_dml_column_qualification_options() {
    let mut update = UpdateBuilder::aliased(Table::new("Account").unwrap(), "a").unwrap();
    let balance = update.target().column("Balance").unwrap();
    let id = update.target().column("Id").unwrap();
    update
        .add_setter(balance.clone(), Expr::add(balance.clone(), Placeholder::new("@amount").unwrap()))
        .add_where(Filter::equal_to(id.clone(), Placeholder::new("@id").unwrap()));
    assert_eq!(
        render(&update),
        "UPDATE Account a SET Balance = (Balance + @amount) WHERE Id = @id"
    );
    let qualified = Formatter::with_options(RenderOptions::new().with_qualify_update_columns(true));
    assert_eq!(
        qualified.render(&update),
        "UPDATE Account a SET a.Balance = (a.Balance + @amount) WHERE a.Id = @id"
    );

    let mut delete = DeleteBuilder::new(Table::new("Account").unwrap());
    let id = delete.target().column("Id").unwrap();
    delete.add_where(Filter::equal_to(id.clone().with_qualify(true), 1));
    assert_eq!(render(&delete), "DELETE FROM Account WHERE Account.Id = 1");
    delete.add_where(Filter::equal_to(id, 2));
    let qualified = Formatter::with_options(RenderOptions::new().with_qualify_delete_columns(true));
    assert_eq!(
        qualified.render(&delete),
        "DELETE FROM Account WHERE Account.Id = 1 AND Account.Id = 2"
    );

    let mut insert = InsertBuilder::new(Table::new("Account").unwrap(), ValueList::from_iter([7]));
    let id = insert.target().column("Id").unwrap();
    insert.add_column(id);
    let qualified = Formatter::with_options(RenderOptions::new().with_qualify_insert_columns(true));
    assert_eq!(qualified.render(&insert), "INSERT INTO Account (Account.Id) VALUES(7)");
}

#[test]
fn test_subquery_in_dml_qualifies_its_columns() {
    let mut archived = SelectBuilder::new();
    let archive = archived.add_table("Archive").unwrap();
    archived.add_projection(archive.column("AccountId").unwrap());

    let mut delete = DeleteBuilder::new(Table::new("Account").unwrap());
    let id = delete.target().column("Id").unwrap();
    delete.add_where(Filter::in_values(id, archived));
    assert_eq!(
        render(&delete),
        "DELETE FROM Account WHERE Id IN (SELECT Archive.AccountId FROM Archive)"
    );
}

#[test]
fn test_literals_and_negation() {
    let mut select = SelectBuilder::new();
    select
        .add_projection(Expr::string("O'Brien"))
        .add_projection(Expr::negate(Expr::add(1, 2)))
        .add_projection(Expr::float(2.5).unwrap())
        .add_projection(Placeholder::new("$1").unwrap());
    assert_eq!(render(&select), "SELECT 'O''Brien', -(1 + 2), 2.5, $1");
}

#[test]
fn test_non_finite_floats_are_rejected() {
    assert!(Expr::float(f64::NAN).unwrap_err().is_invalid_literal());
    assert!(Expr::float(f64::INFINITY).unwrap_err().is_invalid_literal());

    let mut select = SelectBuilder::new();
    select.add_projection(Expr::float(-1.5).unwrap());
    assert_eq!(render(&select), "SELECT -1.5");
}

#[test]
fn test_placeholders_cannot_break_out_of_the_statement() {
    for marker in ["--", "-1", "/*", "'", "@id--"] {
        assert!(Placeholder::new(marker).is_err(), "{marker:?} should be rejected");
    }

    let mut select = SelectBuilder::new();
    select
        .add_projection(1)
        .add_where(Filter::equal_to(1, Placeholder::new(":p1").unwrap()))
        .add_where(Filter::equal_to(2, 2));
    assert_eq!(render(&select), "SELECT 1 WHERE 1 = :p1 AND 2 = 2");

    let mut negated = SelectBuilder::new();
    negated.add_projection(Expr::negate(Expr::negate(Placeholder::new("?").unwrap())));
    assert_eq!(render(&negated), "SELECT -(-?)");
}

#[test]
fn test_statement_enum_dispatch() {
    let statements: Vec<Statement> = vec![
        select_one().into(),
        DeleteBuilder::new(Table::new("T").unwrap()).into(),
        SetOperation::union(select_one(), select_one()).into(),
    ];
    let kinds: Vec<StatementKind> = statements
        .iter()
        .map(|s| StatementRef::from(s).kind())
        .collect();
    assert_eq!(
        kinds,
        [StatementKind::Select, StatementKind::Delete, StatementKind::SetOperation]
    );
    assert_eq!(render(&statements[1]), "DELETE FROM T");
}

#[test]
fn test_concurrent_rendering_of_shared_graph() {
    let select = std::sync::Arc::new(customer_orders());
    let expected = render(select.as_ref());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let select = select.clone();
            std::thread::spawn(move || render(select.as_ref()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_cross_join_on_is_rejected() {
    let err = Join::start(AliasedSource::new(Table::new("A").unwrap()))
        .cross_join(AliasedSource::new(Table::new("B").unwrap()))
        .unwrap()
        .on(Filter::equal_to(1, 1))
        .unwrap_err();
    assert!(matches!(err, BuildError::InvalidJoin(_)));
}

#[cfg(feature = "toml")]
#[test]
fn test_options_from_toml_drive_rendering() {
    let options = RenderOptions::from_toml_str(
        "alias_column_sources_using_as = true\nverbose_inner_join = true\n",
    )
    .unwrap();
    let a = AliasedSource::aliased(Table::new("A").unwrap(), "x").unwrap();
    let b = AliasedSource::aliased(Table::new("B").unwrap(), "y").unwrap();
    let mut select = SelectBuilder::new();
    select
        .add_join(Join::start(a.clone()).inner_join(b).unwrap())
        .unwrap()
        .add_projection(a.all_columns());
    assert_eq!(
        Formatter::with_options(options).render(&select),
        "SELECT x.* FROM A AS x INNER JOIN B AS y"
    );
}
