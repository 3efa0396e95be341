//! Output formatting utilities for CLI commands

use anyhow::{Context, Result};
use arrow::array::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

/// How query results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    println!("{}", table);
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

/// Column names and formatted cell values of `batch`. Nulls render empty.
pub fn batch_rows(batch: &RecordBatch) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let headers = batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();

    let options = FormatOptions::default().with_null("");
    let formatters = batch
        .columns()
        .iter()
        .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
        .collect::<std::result::Result<Vec<_>, _>>()
        .context("Failed to format result table")?;

    let rows = (0..batch.num_rows())
        .map(|row| {
            formatters
                .iter()
                .map(|formatter| formatter.value(row).to_string())
                .collect()
        })
        .collect();

    Ok((headers, rows))
}

pub fn batch_to_csv(batch: &RecordBatch) -> Result<String> {
    let mut buffer = Vec::new();
    {
        let mut writer = arrow::csv::WriterBuilder::new()
            .with_header(true)
            .build(&mut buffer);
        writer.write(batch).context("Failed to write CSV")?;
    }
    String::from_utf8(buffer).context("CSV output is not UTF-8")
}

pub fn batch_to_json(batch: &RecordBatch) -> Result<String> {
    let mut writer = arrow::json::ArrayWriter::new(Vec::new());
    writer.write(batch).context("Failed to write JSON")?;
    writer.finish().context("Failed to write JSON")?;
    String::from_utf8(writer.into_inner()).context("JSON output is not UTF-8")
}

pub fn print_batch(batch: &RecordBatch, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let (headers, rows) = batch_rows(batch)?;
            let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
            print_table(&headers, rows);
        }
        OutputFormat::Csv => print!("{}", batch_to_csv(batch)?),
        OutputFormat::Json => println!("{}", batch_to_json(batch)?),
    }
    Ok(())
}
