use polars::prelude::*;
use std::collections::HashMap;

/// One value of a flattened record.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Str(Option<String>),
    Float(Option<f64>),
    Int(Option<i64>),
}

#[derive(Debug)]
enum ColumnData {
    Str(Vec<Option<String>>),
    Float(Vec<Option<f64>>),
    Int(Vec<Option<i64>>),
}

impl ColumnData {
    fn with_nulls(template: &Cell, len: usize) -> Self {
        match template {
            Cell::Str(_) => ColumnData::Str(vec![None; len]),
            Cell::Float(_) => ColumnData::Float(vec![None; len]),
            Cell::Int(_) => ColumnData::Int(vec![None; len]),
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnData::Str(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Int(v) => v.len(),
        }
    }

    fn push(&mut self, cell: Cell) {
        match (self, cell) {
            (ColumnData::Str(v), Cell::Str(value)) => v.push(value),
            (ColumnData::Float(v), Cell::Float(value)) => v.push(value),
            (ColumnData::Int(v), Cell::Int(value)) => v.push(value),
            // Integral values arriving in a float column (e.g. a percentage of exactly 50).
            (ColumnData::Float(v), Cell::Int(value)) => v.push(value.map(|i| i as f64)),
            (column, _) => column.push_null(),
        }
    }

    fn push_null(&mut self) {
        match self {
            ColumnData::Str(v) => v.push(None),
            ColumnData::Float(v) => v.push(None),
            ColumnData::Int(v) => v.push(None),
        }
    }

    fn into_column(self, name: &str) -> Column {
        match self {
            ColumnData::Str(v) => Column::new(name.into(), v),
            ColumnData::Float(v) => Column::new(name.into(), v),
            ColumnData::Int(v) => Column::new(name.into(), v),
        }
    }
}

/// Accumulates flattened records row by row and materialises them as a `DataFrame`.
///
/// Columns are created the first time a name is seen and keep that position. Rows that lack a
/// column get a null in it, so sparse fuel lists line up.
#[derive(Debug, Default)]
pub(crate) struct FrameBuilder {
    names: Vec<String>,
    positions: HashMap<String, usize>,
    columns: Vec<ColumnData>,
    rows: usize,
}

impl FrameBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Builder whose frame starts with the given columns, present even when no row arrives.
    pub(crate) fn with_columns(columns: &[(&str, Cell)]) -> Self {
        let mut builder = Self::new();
        for (name, template) in columns {
            builder.positions.insert(name.to_string(), builder.columns.len());
            builder.names.push(name.to_string());
            builder.columns.push(ColumnData::with_nulls(template, 0));
        }
        builder
    }

    pub(crate) fn push_row(&mut self, cells: Vec<(String, Cell)>) {
        for (name, cell) in cells {
            let position = match self.positions.get(&name) {
                Some(&position) => position,
                None => {
                    self.columns.push(ColumnData::with_nulls(&cell, self.rows));
                    self.names.push(name.clone());
                    self.positions.insert(name, self.columns.len() - 1);
                    self.columns.len() - 1
                }
            };
            let column = &mut self.columns[position];
            // A name repeated within one row keeps its first value.
            if column.len() == self.rows {
                column.push(cell);
            }
        }
        self.rows += 1;
        for column in self.columns.iter_mut() {
            if column.len() < self.rows {
                column.push_null();
            }
        }
    }

    pub(crate) fn finish(self) -> PolarsResult<DataFrame> {
        let columns = self
            .names
            .iter()
            .zip(self.columns)
            .map(|(name, data)| data.into_column(name))
            .collect::<Vec<_>>();
        DataFrame::new(columns)
    }
}
