use crate::{pg_client, test_connection, test_pg_url};
use connectors::sql::{base::adapter::SqlAdapter, postgres::adapter::PgAdapter};
use engine_runtime::{
    error::IngestError,
    execution::{executor::run, report::IngestReport},
};
use flate2::{Compression, write::GzEncoder};
use model::{
    core::data_type::DataType,
    execution::pipeline::{DataDestination, DataSource, Pipeline, PipelineSettings},
};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use url::Url;

pub const TRIPS_HEADER: &str =
    "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,store_and_fwd_flag";

/// One synthetic taxi trip per row, with a pickup every minute.
pub fn trip_rows(start: usize, count: usize) -> Vec<String> {
    (start..start + count)
        .map(|i| {
            let (hour, minute) = ((i / 60) % 24, i % 60);
            format!(
                "{},2021-01-01 {hour:02}:{minute:02}:00,2021-01-01 {hour:02}:{minute:02}:50,{},{:.2},{}",
                i % 2 + 1,
                i % 5,
                (i % 97) as f64 / 10.0,
                if i % 3 == 0 { "Y" } else { "N" }
            )
        })
        .collect()
}

/// Writes `header` and `rows` to `dir/name`, gzipped when `name` ends in `.gz`.
pub fn write_source(dir: &Path, name: &str, header: &str, rows: &[String]) -> PathBuf {
    let mut body = String::from(header);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }

    let path = dir.join(name);
    let mut file = File::create(&path).expect("create source file");
    if name.ends_with(".gz") {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(body.as_bytes()).expect("write gzip");
        encoder.finish().expect("finish gzip");
    } else {
        file.write_all(body.as_bytes()).expect("write csv");
    }
    path
}

pub fn file_url(path: &Path) -> String {
    Url::from_file_path(path)
        .expect("absolute source path")
        .to_string()
}

pub fn pipeline(url: &str, table: &str, work_dir: &Path, chunk_size: usize) -> Pipeline {
    Pipeline {
        source: DataSource {
            url: url.to_string(),
        },
        destination: DataDestination {
            connection: test_connection(),
            table: table.to_string(),
        },
        settings: PipelineSettings {
            chunk_size,
            work_dir: work_dir.to_path_buf(),
            ..Default::default()
        },
    }
}

pub async fn ingest(pipeline: Pipeline) -> Result<IngestReport, IngestError> {
    run(pipeline).await
}

/// Runs a query returning a single BIGINT.
pub async fn query_i64(sql: &str) -> i64 {
    pg_client()
        .await
        .query_one(sql, &[])
        .await
        .expect("query")
        .get(0)
}

pub async fn get_row_count(table: &str) -> i64 {
    query_i64(&format!("SELECT COUNT(*) FROM \"{table}\"")).await
}

pub async fn assert_row_count(table: &str, expected: i64) {
    assert_eq!(get_row_count(table).await, expected, "row count of {table}");
}

pub async fn assert_table_exists(table: &str, should: bool) {
    let adapter = PgAdapter::connect(&test_pg_url())
        .await
        .expect("connect adapter");
    let exists = adapter.table_exists(table).await.expect("table_exists");
    assert_eq!(exists, should, "existence of table {table}");
}

/// Destination column types as seen by the server, mapped back to `DataType`.
pub async fn get_column_types(table: &str) -> Vec<(String, DataType)> {
    let adapter = PgAdapter::connect(&test_pg_url())
        .await
        .expect("connect adapter");
    adapter
        .table_columns(table)
        .await
        .expect("table_columns")
        .into_iter()
        .map(|(name, type_name)| {
            let data_type = DataType::from_postgres_type(&type_name).expect("known type");
            (name, data_type)
        })
        .collect()
}
