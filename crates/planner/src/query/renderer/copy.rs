use crate::query::{ast::copy::Copy, renderer::Render};

impl Render for Copy {
    fn render(&self, r: &mut super::Renderer) {
        r.sql.push_str("COPY ");
        r.render_table_ref(&self.table);

        if !self.columns.is_empty() {
            r.sql.push_str(" (");
            let cols: Vec<String> = self
                .columns
                .iter()
                .map(|col| r.dialect.quote_identifier(col))
                .collect();
            r.sql.push_str(&cols.join(", "));
            r.sql.push(')');
        }

        r.sql.push_str(" FROM STDIN");

        if !self.options.is_empty() {
            r.sql.push_str(" WITH (");
            for (i, option) in self.options.iter().enumerate() {
                if i > 0 {
                    r.sql.push_str(", ");
                }
                r.sql.push_str(&option.key);
                if let Some(value) = &option.value {
                    r.sql.push(' ');
                    r.sql.push_str(value);
                }
            }
            r.sql.push(')');
        }
    }
}
