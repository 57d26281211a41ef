//! Build a paged sales report and print it in two dialects.
//!
//! Run with: `cargo run -p sqlgen --example report_query`

use sqlgen::{
    AliasedSource, BuildResult, Expr, Filter, Formatter, Function, Join, OrderBy, RenderOptions,
    SelectBuilder, Table, Window,
};

fn main() -> BuildResult<()> {
    let customer = AliasedSource::aliased(Table::new("sales.Customer")?, "c")?;
    let order = AliasedSource::aliased(Table::new("sales.Order")?, "o")?;
    let join = Join::start(customer.clone())
        .inner_join(order.clone())?
        .on(Filter::equal_to(customer.column("Id")?, order.column("CustomerId")?))?;

    let mut window = Window::new();
    window.add_order_by(OrderBy::descending(Function::new("SUM")?.arg(order.column("Total")?)));

    let mut ranked = SelectBuilder::new();
    ranked.add_join(join)?;
    ranked
        .add_projection_as(customer.column("Name")?, "name")?
        .add_projection_as(Function::new("SUM")?.arg(order.column("Total")?), "total")?
        .add_projection_as(Function::new("ROW_NUMBER")?.over(window), "rn")?;
    ranked
        .add_where(Filter::greater_than_equal_to(
            order.column("PlacedOn")?,
            Expr::string("2024-01-01"),
        ))
        .add_group_by(customer.column("Name")?);

    let mut page = SelectBuilder::new();
    let report = page.add_select_as(ranked, "report")?;
    page.add_projection(report.column("name")?)
        .add_projection(report.column("total")?)
        .add_where(Filter::between(report.column("rn")?, 11, 20));

    println!("{}", sqlgen::render(&page));

    let verbose = Formatter::with_options(
        RenderOptions::new()
            .with_alias_column_sources_using_as(true)
            .with_verbose_inner_join(true),
    );
    println!("{}", verbose.render(&page));

    Ok(())
}
