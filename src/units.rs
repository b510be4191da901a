/// Number of cells in one row of a grid, i.e. the grid width.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowLength(pub usize);

/// Number of cells in one column of a grid, i.e. the grid height.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnLength(pub usize);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct RowsCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct ColumnsCount(pub usize);
