use crate::query::{
    ast::create_table::CreateTable,
    renderer::{Render, Renderer},
};

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TABLE ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.render_table_ref(&self.table);
        r.sql.push_str(" (");

        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.sql.push_str(&r.dialect.quote_identifier(&column.name));
            r.sql.push(' ');
            r.sql.push_str(&r.dialect.render_data_type(&column.data_type));
            if !column.is_nullable {
                r.sql.push_str(" NOT NULL");
            }
        }

        r.sql.push_str(");");
    }
}
