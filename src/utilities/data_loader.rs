use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::io::Read;

/// Named integer columns read from a CSV file with a header row.
#[derive(Debug, Clone, Default)]
pub struct Series {
    pub names: Vec<String>,
    pub columns: Vec<Vec<i64>>,
}

impl Series {
    pub fn new(names: Vec<String>, columns: Vec<Vec<i64>>) -> Self {
        Series { names, columns }
    }

    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column(&self, name: &str) -> Result<&[i64], Box<dyn Error>> {
        source_type(self, name).ok_or_else(|| format!("Invalid column: {}", name).into())
    }
}

/// Case-insensitive column lookup used by scanner inputs, `None` for an unknown name.
#[inline]
pub fn source_type<'a>(series: &'a Series, column: &str) -> Option<&'a [i64]> {
    let wanted = column.trim().to_lowercase();
    series
        .names
        .iter()
        .position(|n| n.to_lowercase() == wanted)
        .map(|i| series.columns[i].as_slice())
}

pub fn read_series_from_csv(file_path: &str) -> Result<Series, Box<dyn Error>> {
    let file = File::open(file_path)?;
    read_series(file)
}

pub fn read_series<R: Read>(reader: R) -> Result<Series, Box<dyn Error>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);

    let names: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut columns: Vec<Vec<i64>> = vec![Vec::new(); names.len()];

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        for (col, cell) in record.iter().enumerate() {
            let value = cell
                .parse::<i64>()
                .map_err(|e| format!("row {}, column {}: {:?}: {}", row + 1, names[col], cell, e))?;
            columns[col].push(value);
        }
    }

    Ok(Series::new(names, columns))
}
