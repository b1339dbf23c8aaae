//! Renders a [`cellswap_db::Report`] to the terminal. The walker itself
//! never prints; this is the only place output happens, mirroring how a
//! migration tool's `migrate info`/`migrate run` report lines are built up
//! with `console::style` rather than scattered through the library.

use cellswap_db::Report;
use console::style;

pub fn print_report(report: &Report) {
    for table in &report.tables {
        if table.skipped {
            println!("{} {}", style(&table.name).dim(), style("(skipped)").dim());
            continue;
        }

        if table.rows_updated > 0 {
            println!(
                "{} {} rows examined, {} updated ({})",
                style(&table.name).cyan(),
                table.rows_examined,
                style(table.rows_updated).green(),
                table.columns_examined.join(", "),
            );
        } else {
            println!(
                "{} {} rows examined, none updated",
                style(&table.name).cyan(),
                table.rows_examined,
            );
        }
    }

    for error in &report.errors {
        println!("{} {}", style("error:").bold().red(), error);
    }

    println!(
        "\n{} rows examined, {} rows updated across {} tables",
        report.total_rows_examined(),
        style(report.total_rows_updated()).bold(),
        report.tables.len(),
    );
}
