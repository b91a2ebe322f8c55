use async_trait::async_trait;
use connectors::{
    http::{error::FetchError, fetcher::Fetcher},
    sql::base::error::DbError,
};
use engine_core::{connectors::sink::Sink, error::SinkError};
use flate2::{Compression, write::GzEncoder};
use model::{
    execution::{
        connection::Connection,
        pipeline::{DataDestination, DataSource, Pipeline, PipelineSettings},
    },
    records::{batch::Batch, row::RowData, schema::TableSchema},
};
use std::{
    collections::HashMap,
    io::Write,
    path::Path,
    sync::{Arc, Mutex},
};

#[derive(Debug, Clone)]
pub struct MemoryTable {
    pub schema: TableSchema,
    pub rows: Vec<RowData>,
}

#[derive(Debug, Default)]
pub struct SinkState {
    pub tables: HashMap<String, MemoryTable>,
    pub appends: Vec<usize>,
    pub replaces: usize,
}

/// Sink keeping tables in memory. Appends are all-or-nothing per batch.
#[derive(Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<SinkState>>,
    fail_on_chunk: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(chunk: usize) -> Self {
        MemorySink {
            fail_on_chunk: Some(chunk),
            ..Self::default()
        }
    }

    /// Same tables, but appends never fail.
    pub fn healthy(&self) -> Self {
        MemorySink {
            state: Arc::clone(&self.state),
            fail_on_chunk: None,
        }
    }

    pub fn table(&self, name: &str) -> Option<MemoryTable> {
        self.state.lock().unwrap().tables.get(name).cloned()
    }

    pub fn appends(&self) -> Vec<usize> {
        self.state.lock().unwrap().appends.clone()
    }

    pub fn replaces(&self) -> usize {
        self.state.lock().unwrap().replaces
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn replace_table(&self, table: &str, schema: &TableSchema) -> Result<(), SinkError> {
        let mut state = self.state.lock().unwrap();
        state.replaces += 1;
        state.tables.insert(
            table.to_string(),
            MemoryTable {
                schema: schema.clone(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    async fn write_batch(&self, table: &str, batch: &Batch) -> Result<u64, SinkError> {
        if self.fail_on_chunk == Some(batch.index) {
            return Err(DbError::Write(format!("chunk {} rejected", batch.index)).into());
        }

        let mut state = self.state.lock().unwrap();
        let stored = state
            .tables
            .get_mut(table)
            .ok_or_else(|| DbError::Write(format!("table {table} does not exist")))?;
        stored.rows.extend(batch.rows.iter().cloned());
        state.appends.push(batch.len());
        Ok(batch.len() as u64)
    }
}

pub enum FakeResponse {
    Body(Vec<u8>),
    Fail,
    Nothing,
}

/// Serves a canned response for every URL.
pub struct FakeFetcher {
    response: FakeResponse,
}

impl FakeFetcher {
    pub fn body(body: impl Into<Vec<u8>>) -> Arc<Self> {
        Arc::new(FakeFetcher {
            response: FakeResponse::Body(body.into()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(FakeFetcher {
            response: FakeResponse::Fail,
        })
    }

    pub fn silent() -> Arc<Self> {
        Arc::new(FakeFetcher {
            response: FakeResponse::Nothing,
        })
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        match &self.response {
            FakeResponse::Body(body) => {
                tokio::fs::write(dest, body).await?;
                Ok(body.len() as u64)
            }
            FakeResponse::Fail => Err(FetchError::Status {
                status: 503,
                url: url.to_string(),
            }),
            FakeResponse::Nothing => Ok(0),
        }
    }
}

pub fn gzip(data: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// `rows` taxi trips, one per minute.
pub fn trips_csv(rows: usize) -> String {
    let mut csv = String::from(
        "VendorID,tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,fare_amount\n",
    );
    for i in 0..rows {
        let hour = (i / 60) % 24;
        let minute = i % 60;
        csv.push_str(&format!(
            "{},2021-01-01 {hour:02}:{minute:02}:00,2021-01-01 {hour:02}:{minute:02}:45,{},{}.5\n",
            i % 2 + 1,
            i % 4,
            i % 50
        ));
    }
    csv
}

pub fn pipeline(url: &str, work_dir: &Path, chunk_size: usize) -> Pipeline {
    Pipeline {
        source: DataSource {
            url: url.to_string(),
        },
        destination: DataDestination {
            connection: Connection {
                user: "root".to_string(),
                password: "root".to_string(),
                host: "localhost".to_string(),
                port: 5432,
                database: "ny_taxi".to_string(),
            },
            table: "yellow_taxi_data".to_string(),
        },
        settings: PipelineSettings {
            chunk_size,
            work_dir: work_dir.to_path_buf(),
            ..Default::default()
        },
    }
}
