use model::records::schema::TableSchema;
use planner::query::{
    builder::{copy::CopyBuilder, create_table::CreateTableBuilder, drop_table::DropTableBuilder},
    dialect::Dialect,
    renderer::render_sql,
    table_ref,
};

pub struct QueryGenerator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    pub fn drop_table(&self, table: &str) -> String {
        let ast = DropTableBuilder::new(table_ref(table)).if_exists().build();
        render_sql(&ast, self.dialect)
    }

    pub fn create_table(&self, table: &str, schema: &TableSchema) -> String {
        let ast = CreateTableBuilder::new(table_ref(table))
            .columns_from(schema)
            .build();
        render_sql(&ast, self.dialect)
    }

    /// `COPY ... FROM STDIN` in CSV format with `\N` as the NULL marker, so
    /// that a quoted empty string stays distinct from NULL.
    pub fn copy_from_stdin(&self, table: &str, schema: &TableSchema) -> String {
        let columns = schema.names();
        let ast = CopyBuilder::new(table_ref(table))
            .columns(&columns)
            .option("FORMAT", Some("csv"))
            .option("NULL", Some(r"'\N'"))
            .build();
        render_sql(&ast, self.dialect)
    }
}
