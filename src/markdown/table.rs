use crate::markdown::{Column, NBSP};

pub struct TableBuilder {
    columns: Vec<Box<dyn Column>>,
    row_count: Option<usize>,
}

impl TableBuilder {
    pub(crate) fn new() -> Self {
        Self {
            columns: Vec::new(),
            row_count: None,
        }
    }

    pub(crate) fn add_column(mut self, column: impl Into<Box<dyn Column>>) -> Self {
        let column = column.into();
        let column_len = column.len();

        match self.row_count {
            None => self.row_count = Some(column_len),
            Some(existing) if existing == column_len => {}
            Some(existing) => {
                panic!(
                    "column length mismatch: expected {} rows but received {}",
                    existing, column_len
                );
            }
        }

        self.columns.push(column);
        self
    }

    /// Renders a header row followed by one line per data row. Trailing
    /// padding is stripped; internal alignment is preserved.
    pub(crate) fn build(self) -> Vec<String> {
        let row_count = self.row_count.unwrap_or(0);
        if row_count == 0 {
            return vec!["No data available.".to_string()];
        }

        let widths: Vec<usize> = self.columns.iter().map(|col| col.width()).collect();

        let header_cells: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, &width)| col.header(width))
            .collect();

        let mut lines = vec![join_cells(&header_cells)];

        for row_index in 0..row_count {
            let cells: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, &width)| col.cell(row_index, width))
                .collect();
            lines.push(join_cells(&cells));
        }

        lines
    }
}

fn join_cells(cells: &[String]) -> String {
    cells
        .join(" ")
        .trim_end_matches(|c| c == ' ' || c == NBSP)
        .to_string()
}
