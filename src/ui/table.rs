//! Fixed-width bordered tables.

use console::Style;

/// Horizontal alignment of a column's data cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A table column. Headers are always left-aligned.
#[derive(Debug, Clone)]
pub struct Column {
    title: String,
    width: usize,
    align: Align,
}

impl Column {
    /// Left-aligned column.
    pub fn left(title: &str, width: usize) -> Self {
        Self {
            title: title.to_string(),
            width,
            align: Align::Left,
        }
    }

    /// Right-aligned column.
    pub fn right(title: &str, width: usize) -> Self {
        Self {
            title: title.to_string(),
            width,
            align: Align::Right,
        }
    }
}

/// A table cell with an optional style.
///
/// Styles are applied after padding so escape codes never affect
/// alignment.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    text: String,
    style: Option<Style>,
}

impl Cell {
    /// Unstyled cell.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Styled cell.
    pub fn styled(text: impl Into<String>, style: &Style) -> Self {
        Self {
            text: text.into(),
            style: Some(style.clone()),
        }
    }
}

#[derive(Debug)]
enum Line {
    Row(Vec<Cell>),
    Separator,
}

/// A table with fixed column widths.
#[derive(Debug)]
pub struct Table {
    columns: Vec<Column>,
    lines: Vec<Line>,
    border: Style,
    header: Style,
}

impl Table {
    /// Create a new table with the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            lines: Vec::new(),
            border: Style::new(),
            header: Style::new(),
        }
    }

    /// Use styles for the borders and the header row.
    pub fn with_styles(mut self, border: &Style, header: &Style) -> Self {
        self.border = border.clone();
        self.header = header.clone();
        self
    }

    /// Add a row to the table. Missing cells render empty.
    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.lines.push(Line::Row(row));
    }

    /// Add a horizontal separator.
    pub fn add_separator(&mut self) {
        self.lines.push(Line::Separator);
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, Line::Row(_)))
            .count()
    }

    /// Check if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Render the table, one string per line.
    pub fn render(&self) -> Vec<String> {
        let mut output = Vec::with_capacity(self.lines.len() + 4);

        output.push(self.render_border('┌', '┬', '┐'));
        output.push(self.render_header());
        output.push(self.render_border('├', '┼', '┤'));

        for line in &self.lines {
            match line {
                Line::Row(cells) => output.push(self.render_row(cells)),
                Line::Separator => output.push(self.render_border('├', '┼', '┤')),
            }
        }

        output.push(self.render_border('└', '┴', '┘'));
        output
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let mut s = String::new();
        s.push(left);

        for (i, column) in self.columns.iter().enumerate() {
            s.push_str(&"─".repeat(column.width + 2));
            if i < self.columns.len() - 1 {
                s.push(mid);
            }
        }

        s.push(right);
        self.border.apply_to(s).to_string()
    }

    fn render_header(&self) -> String {
        let bar = self.border.apply_to("│").to_string();
        let mut s = bar.clone();

        for column in &self.columns {
            let padded = format!("{:<width$}", column.title, width = column.width);
            s.push_str(&format!(" {} {}", self.header.apply_to(padded), bar));
        }

        s
    }

    fn render_row(&self, row: &[Cell]) -> String {
        let bar = self.border.apply_to("│").to_string();
        let mut s = bar.clone();

        for (i, column) in self.columns.iter().enumerate() {
            let cell = row.get(i).cloned().unwrap_or_default();
            let padded = match column.align {
                Align::Left => format!("{:<width$}", cell.text, width = column.width),
                Align::Right => format!("{:>width$}", cell.text, width = column.width),
            };
            let rendered = match &cell.style {
                Some(style) if !cell.text.is_empty() => style.apply_to(padded).to_string(),
                _ => padded,
            };
            s.push_str(&format!(" {} {}", rendered, bar));
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![Column::left("Name", 6), Column::right("Count", 5)])
    }

    #[test]
    fn table_empty() {
        let table = sample();
        assert!(table.is_empty());

        let output = table.render();
        assert_eq!(
            output,
            vec![
                "┌────────┬───────┐",
                "│ Name   │ Count │",
                "├────────┼───────┤",
                "└────────┴───────┘",
            ]
        );
    }

    #[test]
    fn table_aligns_cells() {
        let mut table = sample();
        table.add_row(vec![Cell::plain("a"), Cell::plain("12")]);
        table.add_separator();
        table.add_row(vec![Cell::plain("total")]);

        let output = table.render();

        assert_eq!(table.row_count(), 2);
        assert_eq!(output[3], "│ a      │    12 │");
        assert_eq!(output[4], "├────────┼───────┤");
        assert_eq!(output[5], "│ total  │       │");
    }

    #[test]
    fn plain_styles_do_not_change_layout() {
        let mut table = sample().with_styles(&Style::new(), &Style::new());
        table.add_row(vec![Cell::styled("x", &Style::new()), Cell::plain("1")]);

        assert_eq!(table.render()[3], "│ x      │     1 │");
    }

    #[test]
    fn all_lines_have_equal_width() {
        let mut table = sample();
        table.add_row(vec![Cell::plain("abc"), Cell::plain("7")]);

        let widths: Vec<usize> = table.render().iter().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
