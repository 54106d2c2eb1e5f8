//! Tab-separated table helpers shared by the readers and writers.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use polars::io::mmap::MmapBytesReader;
use polars::prelude::*;

/// Reads a tab-separated table with a header line.
///
/// With `infer_types == false` every column is read as a string, which lets
/// callers parse coordinate lists and ids themselves. Otherwise the whole
/// file is scanned to infer column types, so a non-numeric cell anywhere in
/// a column turns it into a string column. Columns listed in
/// `string_columns` are read as strings either way.
pub fn read_tsv<R: MmapBytesReader>(
    reader: R,
    infer_types: bool,
    string_columns: &[&str],
) -> anyhow::Result<DataFrame> {
    let infer_schema_length = if infer_types { None } else { Some(0) };
    let schema_overwrite = (infer_types && !string_columns.is_empty()).then(|| {
        Arc::new(
            string_columns
                .iter()
                .map(|name| (PlSmallStr::from(*name), DataType::String))
                .collect::<Schema>(),
        )
    });
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer_schema_length)
        .with_schema_overwrite(schema_overwrite)
        .with_parse_options(CsvParseOptions::default().with_separator(b'\t'))
        .into_reader_with_file_handle(reader)
        .finish()?;
    Ok(df)
}

/// Writes a data frame as a tab-separated table with a header line.
pub fn write_tsv<W: Write>(
    df: &mut DataFrame,
    writer: W,
) -> anyhow::Result<()> {
    CsvWriter::new(writer)
        .with_separator(b'\t')
        .include_header(true)
        .finish(df)?;
    Ok(())
}

/// Fails with a schema error unless every column in `required` is present.
pub fn require_columns(
    df: &DataFrame,
    table: &str,
    required: &[&str],
) -> anyhow::Result<()> {
    let missing = required
        .iter()
        .filter(|name| df.column(name).is_err())
        .cloned()
        .collect::<Vec<_>>();
    anyhow::ensure!(
        missing.is_empty(),
        "Schema error: {} table is missing required columns {:?} (found {:?})",
        table,
        missing,
        df.get_column_names()
    );
    Ok(())
}

/// Returns a required string column.
pub fn string_column<'a>(
    df: &'a DataFrame,
    table: &str,
    name: &str,
) -> anyhow::Result<&'a StringChunked> {
    require_columns(df, table, &[name])?;
    df.column(name)?
        .str()
        .with_context(|| format!("Schema error: column '{}' of {} table must contain strings", name, table))
}
