use crate::{
    error::{ChunkLoadError, DownloadError, IngestError, ParseError},
    execution::executor::Ingestor,
    tests::support::{FakeFetcher, MemorySink, gzip, pipeline, trips_csv},
};
use connectors::{
    file::{compression::Compression, csv::error::FileError},
    http::error::FetchError,
    sql::base::error::DbError,
};
use engine_core::error::{SinkError, TransformError};
use model::core::{data_type::DataType, value::Value};
use tracing_test::traced_test;

const URL: &str = "https://example.com/trip-data/yellow_tripdata_2021-01.csv";
const GZ_URL: &str = "https://example.com/trip-data/yellow_tripdata_2021-01.csv.gz";
const TABLE: &str = "yellow_taxi_data";

fn connect(
    sink: &MemorySink,
) -> impl FnOnce() -> std::future::Ready<Result<MemorySink, SinkError>> + '_ {
    move || std::future::ready(Ok(sink.clone()))
}

#[tokio::test]
async fn test_loads_every_row_in_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 100_000),
        FakeFetcher::body(trips_csv(250_000)),
    );

    let report = ingestor.execute(connect(&sink)).await.unwrap();

    assert_eq!(sink.appends(), vec![100_000, 100_000, 50_000]);
    assert_eq!(sink.replaces(), 1);
    assert_eq!(sink.table(TABLE).unwrap().rows.len(), 250_000);
    assert_eq!(report.chunks_loaded, 3);
    assert_eq!(report.rows_loaded, 250_000);
    assert_eq!(report.table, TABLE);
    assert_eq!(report.source_file, dir.path().join("output.csv"));

    let snapshot = ingestor.metrics().snapshot();
    assert_eq!(snapshot.records_processed, 250_000);
    assert_eq!(snapshot.batches_processed, 3);
    assert_eq!(snapshot.failure_count, 0);
}

#[tokio::test]
async fn test_row_count_holds_for_uneven_chunks() {
    for (rows, chunk_size) in [(1, 1), (7, 3), (9, 3), (10, 100)] {
        let dir = tempfile::tempdir().unwrap();
        let sink = MemorySink::new();
        let ingestor = Ingestor::new(
            pipeline(URL, dir.path(), chunk_size),
            FakeFetcher::body(trips_csv(rows)),
        );

        let report = ingestor.execute(connect(&sink)).await.unwrap();

        assert_eq!(report.rows_loaded, rows as u64);
        assert_eq!(report.chunks_loaded, rows.div_ceil(chunk_size));
        assert_eq!(sink.table(TABLE).unwrap().rows.len(), rows);
    }
}

#[tokio::test]
async fn test_datetime_columns_are_timestamps() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 4),
        FakeFetcher::body(trips_csv(10)),
    );

    ingestor.execute(connect(&sink)).await.unwrap();

    let table = sink.table(TABLE).unwrap();
    let pickup = table.schema.index_of("tpep_pickup_datetime").unwrap();
    let dropoff = table.schema.index_of("tpep_dropoff_datetime").unwrap();
    assert_eq!(table.schema.columns[pickup].data_type, DataType::Timestamp);
    assert_eq!(table.schema.columns[dropoff].data_type, DataType::Timestamp);
    assert_eq!(
        table.schema.column("VendorID").unwrap().data_type,
        DataType::Long
    );
    assert_eq!(
        table.schema.column("fare_amount").unwrap().data_type,
        DataType::Double
    );

    for row in &table.rows {
        assert!(matches!(row.get_value(pickup), Value::Timestamp(_)));
        assert!(matches!(row.get_value(dropoff), Value::Timestamp(_)));
    }
}

#[tokio::test]
async fn test_gzip_source_is_saved_and_decoded() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(
        pipeline(GZ_URL, dir.path(), 3),
        FakeFetcher::body(gzip(&trips_csv(8))),
    );

    let report = ingestor.execute(connect(&sink)).await.unwrap();

    assert_eq!(report.source_file, dir.path().join("output.csv.gz"));
    assert_eq!(
        Compression::Infer.resolve(&report.source_file),
        Compression::Gzip
    );
    assert_eq!(report.rows_loaded, 8);
    assert_eq!(sink.appends(), vec![3, 3, 2]);
}

#[tokio::test]
async fn test_download_failure_leaves_destination_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(pipeline(URL, dir.path(), 10), FakeFetcher::failing());

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::Download(DownloadError::Fetch(FetchError::Status { status: 503, .. }))
    ));
    assert_eq!(err.phase(), "download");
    assert_eq!(sink.replaces(), 0);
    assert!(sink.table(TABLE).is_none());
}

#[tokio::test]
async fn test_missing_file_after_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(pipeline(URL, dir.path(), 10), FakeFetcher::silent());

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    match err {
        IngestError::Download(DownloadError::Missing(path)) => {
            assert_eq!(path, dir.path().join("output.csv"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.replaces(), 0);
}

#[tokio::test]
async fn test_sink_failure_keeps_committed_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::failing_on(3);
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 10),
        FakeFetcher::body(trips_csv(50)),
    );

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    match err {
        IngestError::ChunkLoad {
            chunk,
            committed_rows,
            source: ChunkLoadError::Sink(SinkError::Database(DbError::Write(_))),
        } => {
            assert_eq!(chunk, 3);
            assert_eq!(committed_rows, 20);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(sink.appends(), vec![10, 10]);
    assert_eq!(sink.table(TABLE).unwrap().rows.len(), 20);
    assert_eq!(ingestor.metrics().snapshot().failure_count, 1);
}

#[tokio::test]
async fn test_bad_timestamp_in_later_chunk_stops_loading() {
    let mut csv = trips_csv(4);
    csv.push_str("1,yesterday,2021-01-01 10:00:00,1,3.5\n");
    let more = trips_csv(4);
    let (_, rows) = more.split_once('\n').unwrap();
    csv.push_str(rows);

    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(pipeline(URL, dir.path(), 4), FakeFetcher::body(csv));

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::ChunkLoad {
            chunk: 2,
            committed_rows: 4,
            source: ChunkLoadError::Transform(TransformError::InvalidValue { row: 4, .. }),
        }
    ));
    assert_eq!(sink.appends(), vec![4]);
}

#[tokio::test]
async fn test_later_chunk_accepts_values_postgres_would_cast() {
    let csv = "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count\n\
               1,2021-01-01 00:30:10,2021-01-01 00:36:12,1\n\
               2,2021-01-01 00:40:10,2021-01-01 00:46:12,1.0\n";
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(pipeline(URL, dir.path(), 1), FakeFetcher::body(csv));

    let report = ingestor.execute(connect(&sink)).await.unwrap();

    assert_eq!(report.rows_loaded, 2);
    let table = sink.table(TABLE).unwrap();
    let passengers = table.schema.column("passenger_count").unwrap();
    assert_eq!(passengers.data_type, DataType::Long);
    assert_eq!(table.rows[1].get_value(passengers.ordinal), Value::Int(1));
}

#[tokio::test]
async fn test_unconvertible_text_in_later_chunk_fails() {
    let csv = "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime\n\
               1,2021-01-01 00:30:10,2021-01-01 00:36:12\n\
               N/A,2021-01-01 00:40:10,2021-01-01 00:46:12\n";
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(pipeline(URL, dir.path(), 1), FakeFetcher::body(csv));

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::ChunkLoad {
            chunk: 2,
            committed_rows: 1,
            source: ChunkLoadError::Transform(TransformError::InvalidValue { .. }),
        }
    ));
    assert_eq!(sink.table(TABLE).unwrap().rows.len(), 1);
}

#[tokio::test]
async fn test_ragged_record_is_a_read_failure() {
    let csv = "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime\n\
               1,2021-01-01 00:30:10,2021-01-01 00:36:12\n\
               2,2021-01-01 00:40:10\n";
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(pipeline(URL, dir.path(), 1), FakeFetcher::body(csv));

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::ChunkLoad {
            chunk: 2,
            committed_rows: 1,
            source: ChunkLoadError::Read(_),
        }
    ));
}

#[tokio::test]
async fn test_missing_datetime_column_is_a_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 10),
        FakeFetcher::body("a,b\n1,2\n"),
    );

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::Parse(ParseError::Transform(TransformError::MissingColumn(ref c)))
            if c == "tpep_pickup_datetime"
    ));
    assert_eq!(err.phase(), "parse");
    assert_eq!(sink.replaces(), 0);
}

#[tokio::test]
async fn test_empty_file_is_a_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(pipeline(URL, dir.path(), 10), FakeFetcher::body(""));

    let err = ingestor.execute(connect(&sink)).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::Parse(ParseError::Read(FileError::InvalidFormat(_)))
    ));
    assert_eq!(sink.replaces(), 0);
}

#[tokio::test]
async fn test_header_only_file_creates_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 10),
        FakeFetcher::body("VendorID,tpep_pickup_datetime,tpep_dropoff_datetime\n"),
    );

    let report = ingestor.execute(connect(&sink)).await.unwrap();

    let table = sink.table(TABLE).unwrap();
    assert!(table.rows.is_empty());
    assert_eq!(table.schema.len(), 3);
    assert_eq!(
        table.schema.column("tpep_pickup_datetime").unwrap().data_type,
        DataType::Timestamp
    );
    assert_eq!(
        table.schema.column("VendorID").unwrap().data_type,
        DataType::String
    );
    assert_eq!(report.rows_loaded, 0);
}

#[tokio::test]
async fn test_rerun_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();

    for _ in 0..2 {
        let ingestor = Ingestor::new(
            pipeline(URL, dir.path(), 10),
            FakeFetcher::body(trips_csv(25)),
        );
        ingestor.execute(connect(&sink)).await.unwrap();
    }

    assert_eq!(sink.replaces(), 2);
    assert_eq!(sink.table(TABLE).unwrap().rows.len(), 25);
}

#[tokio::test]
async fn test_rerun_after_partial_failure_starts_over() {
    let dir = tempfile::tempdir().unwrap();
    let failing = MemorySink::failing_on(2);
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 10),
        FakeFetcher::body(trips_csv(25)),
    );
    assert!(ingestor.execute(connect(&failing)).await.is_err());
    assert_eq!(failing.table(TABLE).unwrap().rows.len(), 10);

    let sink = failing.healthy();
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 10),
        FakeFetcher::body(trips_csv(25)),
    );
    ingestor.execute(connect(&sink)).await.unwrap();

    assert_eq!(sink.table(TABLE).unwrap().rows.len(), 25);
}

#[tokio::test]
async fn test_connection_failure_is_first_chunk_failure() {
    let dir = tempfile::tempdir().unwrap();
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 10),
        FakeFetcher::body(trips_csv(5)),
    );

    let refused = || {
        let err = SinkError::from(DbError::Write("connection refused".to_string()));
        std::future::ready(Err::<MemorySink, _>(err))
    };

    let err = ingestor.execute(refused).await.unwrap_err();

    assert!(matches!(
        err,
        IngestError::ChunkLoad {
            chunk: 1,
            committed_rows: 0,
            source: ChunkLoadError::Sink(_),
        }
    ));
    assert_eq!(err.phase(), "chunk_load");
}

#[tokio::test]
async fn test_index_column_numbers_rows_across_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let mut pipeline = pipeline(URL, dir.path(), 3);
    pipeline.settings.index_column = Some("index".to_string());
    let ingestor = Ingestor::new(pipeline, FakeFetcher::body(trips_csv(7)));

    ingestor.execute(connect(&sink)).await.unwrap();

    let table = sink.table(TABLE).unwrap();
    let index = table.schema.column("index").unwrap();
    assert_eq!(index.ordinal, 0);
    assert_eq!(index.data_type, DataType::Long);
    assert!(!index.is_nullable);

    let numbers: Vec<_> = table.rows.iter().map(|row| row.get_value(0)).collect();
    assert_eq!(numbers, (0..7).map(Value::Int).collect::<Vec<_>>());
}

#[tokio::test]
#[traced_test]
async fn test_logs_each_chunk_and_completion() {
    let dir = tempfile::tempdir().unwrap();
    let sink = MemorySink::new();
    let ingestor = Ingestor::new(
        pipeline(URL, dir.path(), 5),
        FakeFetcher::body(trips_csv(12)),
    );

    ingestor.execute(connect(&sink)).await.unwrap();

    assert!(logs_contain("Inserted chunk 1 (5 rows), took"));
    assert!(logs_contain("Inserted chunk 3 (2 rows), took"));
    assert!(logs_contain("All chunks have been processed"));
}
