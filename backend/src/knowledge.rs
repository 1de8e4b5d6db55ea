//! Loading of the crop nutrient reference table

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use shared::{NutrientReferenceRow, NutrientTable, TableError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed nutrient table: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Table(#[from] TableError),
}

/// One CSV record; extra columns (index, pH, soil moisture) are ignored
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Crop")]
    crop: String,
    #[serde(rename = "N")]
    nitrogen: i64,
    #[serde(rename = "P")]
    phosphorus: i64,
    #[serde(rename = "K")]
    potassium: i64,
}

impl From<CsvRow> for NutrientReferenceRow {
    fn from(row: CsvRow) -> Self {
        NutrientReferenceRow {
            crop: row.crop,
            nitrogen: row.nitrogen,
            phosphorus: row.phosphorus,
            potassium: row.potassium,
        }
    }
}

/// Parse a nutrient table from any CSV source with a header row
pub fn read_nutrient_table<R: Read>(reader: R) -> Result<NutrientTable, KnowledgeError> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let rows = csv
        .deserialize::<CsvRow>()
        .map(|row| row.map(NutrientReferenceRow::from))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(NutrientTable::new(rows)?)
}

/// Load the nutrient table from disk
pub fn load_nutrient_table(path: &Path) -> Result<NutrientTable, KnowledgeError> {
    let file = std::fs::File::open(path).map_err(|source| KnowledgeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_nutrient_table(file)
}
