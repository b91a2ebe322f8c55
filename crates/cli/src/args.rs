use clap::Parser;
use model::execution::{
    connection::Connection,
    pipeline::{DataDestination, DataSource, Pipeline, PipelineSettings},
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "csv-ingest",
    version,
    about = "Ingest a remote CSV file into PostgreSQL in chunks"
)]
pub struct Cli {
    #[arg(long, help = "User name for postgres")]
    pub user: String,

    #[arg(long, help = "Password for postgres")]
    pub password: String,

    #[arg(long, help = "Host for postgres")]
    pub host: String,

    #[arg(long, help = "Port for postgres")]
    pub port: u16,

    #[arg(long, help = "Database name for postgres")]
    pub db: String,

    #[arg(
        long = "table_name",
        help = "Name of the table the results are written to"
    )]
    pub table_name: String,

    #[arg(long, help = "URL of the CSV file (.csv or .csv.gz)")]
    pub url: String,

    #[arg(
        long,
        default_value_t = 100_000,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Number of rows read and inserted per chunk"
    )]
    pub chunk_size: u64,

    #[arg(
        long,
        help = "Comma-separated columns to load as TIMESTAMP; empty disables parsing"
    )]
    pub datetime_columns: Option<String>,

    #[arg(
        long,
        help = "Name of a leading BIGINT column holding the 0-based source row number; \
                none is added unless set (pass `index` for a pandas-style index)"
    )]
    pub index_column: Option<String>,

    #[arg(
        long,
        default_value = ".",
        help = "Directory the downloaded file is written to"
    )]
    pub output_dir: PathBuf,

    #[arg(long, help = "Write a JSON run report to this file")]
    pub report: Option<PathBuf>,
}

impl Cli {
    pub fn pipeline(&self) -> Pipeline {
        let defaults = PipelineSettings::default();
        let datetime_columns = match &self.datetime_columns {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from)
                .collect(),
            None => defaults.datetime_columns,
        };

        Pipeline {
            source: DataSource {
                url: self.url.clone(),
            },
            destination: DataDestination {
                connection: Connection {
                    user: self.user.clone(),
                    password: self.password.clone(),
                    host: self.host.clone(),
                    port: self.port,
                    database: self.db.clone(),
                },
                table: self.table_name.clone(),
            },
            settings: PipelineSettings {
                chunk_size: usize::try_from(self.chunk_size).unwrap_or(usize::MAX),
                datetime_columns,
                index_column: self.index_column.clone(),
                work_dir: self.output_dir.clone(),
            },
        }
    }
}
