use crate::markdown::NBSP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

pub struct Text {
    header: String,
    values: Vec<String>,
    align: Align,
}

impl Text {
    pub fn new(header: &str, values: Vec<String>) -> Self {
        Self {
            header: header.into(),
            values,
            align: Align::Left,
        }
    }

    pub fn right_aligned(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    fn pad(&self, content: &str, width: usize) -> String {
        // Widths count chars, not bytes: glyphs like ▲ are one cell wide.
        let padding = width.saturating_sub(content.chars().count());
        let fill: String = std::iter::repeat(NBSP).take(padding).collect();
        match self.align {
            Align::Left => format!("{content}{fill}"),
            Align::Right => format!("{fill}{content}"),
        }
    }
}

impl crate::markdown::Column for Text {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn width(&self) -> usize {
        let max_value_width = self
            .values
            .iter()
            .map(|value| value.chars().count())
            .max()
            .unwrap_or(0);

        max_value_width.max(self.header.chars().count())
    }

    fn header(&self, width: usize) -> String {
        self.pad(&self.header, width)
    }

    fn cell(&self, row_index: usize, width: usize) -> String {
        self.pad(&self.values[row_index], width)
    }
}

impl From<Text> for Box<dyn crate::markdown::Column> {
    fn from(t: Text) -> Self {
        Box::new(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::Column;

    #[test]
    fn left_alignment_pads_on_the_right() {
        let col = Text::new("Name", vec!["Bo".to_string()]);
        assert_eq!(col.cell(0, 4), "Bo\u{a0}\u{a0}");
    }

    #[test]
    fn right_alignment_pads_on_the_left() {
        let col = Text::new("#", vec!["7".to_string()]).right_aligned();
        assert_eq!(col.cell(0, 3), "\u{a0}\u{a0}7");
    }

    #[test]
    fn width_covers_header_and_widest_value() {
        let col = Text::new("#", vec!["10".to_string(), "9".to_string()]);
        assert_eq!(col.width(), 2);

        let col = Text::new("Distance", vec!["1.0".to_string()]);
        assert_eq!(col.width(), 8);
    }

    #[test]
    fn glyphs_count_as_one_cell() {
        let col = Text::new("", vec!["▲".to_string()]);
        assert_eq!(col.width(), 1);
        assert_eq!(col.cell(0, 1), "▲");
    }
}
