pub trait Column {
    fn len(&self) -> usize;
    fn width(&self) -> usize;
    fn header(&self, width: usize) -> String;
    fn cell(&self, row_index: usize, width: usize) -> String;
}

impl std::fmt::Debug for dyn Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Column")
    }
}
