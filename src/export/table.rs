//! Format-neutral tabular data and its CSV / XLSX encoders.

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};

use super::ExportError;

/// Column widths never exceed this many characters.
const MAX_COLUMN_WIDTH: usize = 50;

const HEADER_FILL: u32 = 0x0036_6092;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Int(i64),
}

impl Cell {
    fn display_len(&self) -> usize {
        match self {
            Self::Text(s) => s.chars().count(),
            Self::Int(n) => n.to_string().len(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

/// One header row plus data rows, destined for a single CSV file or worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            name: name.into(),
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Width per column: longest cell (header included) plus padding, capped.
    #[must_use]
    pub fn column_widths(&self) -> Vec<usize> {
        (0..self.headers.len())
            .map(|col| {
                let longest = std::iter::once(self.headers[col].chars().count())
                    .chain(
                        self.rows
                            .iter()
                            .filter_map(|row| row.get(col))
                            .map(Cell::display_len),
                    )
                    .max()
                    .unwrap_or(0);
                (longest + 2).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    pub fn to_csv(&self) -> Result<Vec<u8>, ExportError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(ToString::to_string))?;
        }
        writer
            .into_inner()
            .map_err(|e| ExportError::Io(e.into_error()))
    }

    fn to_worksheet(&self) -> Result<Worksheet, ExportError> {
        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let mut worksheet = Worksheet::new();
        worksheet.set_name(&self.name)?;

        for (col, header) in self.headers.iter().enumerate() {
            worksheet.write_string_with_format(0, column(col)?, header, &header_format)?;
        }

        for (offset, row) in self.rows.iter().enumerate() {
            let row_num = u32::try_from(offset + 1)
                .map_err(|_| ExportError::TooLarge(format!("{} rows", self.rows.len())))?;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(row_num, column(col)?, s)?;
                    }
                    #[allow(clippy::cast_precision_loss)]
                    Cell::Int(n) => {
                        worksheet.write_number(row_num, column(col)?, *n as f64)?;
                    }
                }
            }
        }

        for (col, width) in self.column_widths().into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            worksheet.set_column_width(column(col)?, width as f64)?;
        }

        Ok(worksheet)
    }
}

fn column(index: usize) -> Result<u16, ExportError> {
    u16::try_from(index).map_err(|_| ExportError::TooLarge(format!("column {index}")))
}

/// Encodes the tables as worksheets of one workbook, in order.
pub fn to_xlsx(tables: &[&Table]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    for table in tables {
        workbook.push_worksheet(table.to_worksheet()?);
    }
    Ok(workbook.save_to_buffer()?)
}
