/// Dashboard Example
///
/// This example demonstrates:
/// - Seeding a view with the demo sales
/// - Filtering by field and by global search
/// - Toggling sort columns
/// - Adding, selecting and deleting records
/// - Reading aggregates and chart series

use salesview::{
    DashboardConfig, Field, FieldFilter, MatchMode, SaleCandidate, SalesView, ViewChange,
};

fn print_rows(view: &SalesView) {
    for row in view.visible_rows() {
        println!(
            "   {}  {:<14} {:<11} {:>7.2}",
            row.date(),
            row.region(),
            row.product(),
            row.sales()
        );
    }
    println!();
}

fn main() {
    println!("=== SalesView Dashboard Example ===\n");

    // 1. Seed
    println!("1. Seeding demo sales...");
    let mut view = SalesView::with_demo_data(DashboardConfig::default());
    view.subscribe(|change: &ViewChange, view: &SalesView| {
        println!("   [change] {:?} -> {} visible", change, view.visible_len());
    });
    print_rows(&view);

    // 2. Field filter
    println!("2. Region equals Asia...");
    view.set_field_filter(Field::Region, FieldFilter::single(MatchMode::Equals, "Asia"));
    print_rows(&view);

    // 3. Global search
    println!("3. Global search for 'phone'...");
    view.clear_filters();
    view.set_global_filter("phone");
    print_rows(&view);

    // 4. Sort
    println!("4. Sorting by sales, descending...");
    view.set_global_filter("");
    view.toggle_sort(Field::Sales);
    view.toggle_sort(Field::Sales);
    print_rows(&view);

    // 5. Add a record
    println!("5. Adding a Speaker sale in Asia...");
    match view.add_record(&SaleCandidate::new("2025-04-28", "Asia", "Speaker", 50.0)) {
        Ok(record) => {
            println!("   Added {}\n", record.id());
            view.set_selection([record.id()]);
        }
        Err(errors) => {
            for error in errors {
                println!("   invalid: {}", error);
            }
        }
    }

    // 6. Rejected record
    println!("6. Adding a sale without a region...");
    if let Err(errors) = view.add_record(&SaleCandidate::new("2025-04-28", "", "Speaker", 50.0)) {
        for error in errors {
            println!("   invalid: {}", error);
        }
    }
    println!();

    // 7. Aggregates
    println!("7. Aggregates:");
    for chart in view.charts() {
        println!("   {} ({:?})", chart.title, chart.kind);
        for (label, value) in chart.labels.iter().zip(chart.values.iter()) {
            println!("     {:<14} {:>8.2}", label, value);
        }
    }
    let summary = view.summary();
    println!(
        "   total {:.2}, {} orders, average {:.2}\n",
        summary.total_sales,
        summary.orders,
        summary.average_sale_rounded()
    );

    // 8. Delete selection
    println!("8. Deleting the selected sale...");
    let deleted = view.delete_selected();
    println!("   Deleted {} record(s)", deleted);
    println!(
        "   Asia is back to {:.2}\n",
        view.aggregates().by_region.get("Asia").unwrap_or(0.0)
    );

    println!("=== Example Complete ===");
}
