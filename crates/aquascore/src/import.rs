//! CSV import of stored scan history.
//!
//! Expected header: `label,profile,ph,calcium,magnesium,sodium,potassium,
//! chloride,sulfate,bicarbonate,nitrate,fluoride,silica,carbonation,tds`.
//! Every column is optional; blank or non-numeric cells are absent.

use crate::scoring::{
    parse_measurement, Analyte, AnalyteReadings, Profile, ScanRecord, UnknownProfile,
};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Profile { row: usize, source: UnknownProfile },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read scan export: {}", err),
            ImportError::Csv(err) => write!(f, "invalid scan CSV data: {}", err),
            ImportError::Profile { row, source } => write!(f, "row {}: {}", row, source),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Profile { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ScanImporter;

impl ScanImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ScanRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ScanRecord>, ImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut scans = Vec::new();

        for (index, record) in csv_reader.deserialize::<ScanRow>().enumerate() {
            let row = record?;
            // Header is line 1.
            let line = index + 2;
            scans.push(row.into_scan(line)?);
        }

        Ok(scans)
    }
}

#[derive(Debug, Deserialize)]
struct ScanRow {
    #[serde(default, alias = "name", deserialize_with = "empty_string_as_none")]
    label: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    profile: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ph: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    calcium: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    magnesium: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sodium: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    potassium: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    chloride: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    sulfate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    bicarbonate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    nitrate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fluoride: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    silica: Option<String>,
    #[serde(default, alias = "co2", deserialize_with = "empty_string_as_none")]
    carbonation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tds: Option<String>,
}

impl ScanRow {
    fn into_scan(self, line: usize) -> Result<ScanRecord, ImportError> {
        let profile = self
            .profile
            .as_deref()
            .map(str::parse::<Profile>)
            .transpose()
            .map_err(|source| ImportError::Profile { row: line, source })?;

        let cells = [
            (Analyte::Ph, &self.ph),
            (Analyte::Calcium, &self.calcium),
            (Analyte::Magnesium, &self.magnesium),
            (Analyte::Sodium, &self.sodium),
            (Analyte::Potassium, &self.potassium),
            (Analyte::Chloride, &self.chloride),
            (Analyte::Sulfate, &self.sulfate),
            (Analyte::Bicarbonate, &self.bicarbonate),
            (Analyte::Nitrate, &self.nitrate),
            (Analyte::Fluoride, &self.fluoride),
            (Analyte::Silica, &self.silica),
            (Analyte::Carbonation, &self.carbonation),
            (Analyte::Tds, &self.tds),
        ];

        let mut readings = AnalyteReadings::default();
        for (analyte, cell) in cells {
            readings.set(analyte, cell.as_deref().and_then(parse_measurement));
        }

        Ok(ScanRecord {
            label: self.label.unwrap_or_else(|| format!("scan-{line}")),
            profile,
            readings,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const EXPORT: &str = "label,profile,ph,calcium,magnesium,sodium,nitrate\n\
        Alpine Spring,infant,7.2,40,12,4.5,2\n\
        Quarry Sparkling,,6.1,,n/a,180,\n";

    #[test]
    fn imports_rows_with_sparse_cells() {
        let scans = ScanImporter::from_reader(Cursor::new(EXPORT)).expect("valid export");

        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].label, "Alpine Spring");
        assert_eq!(scans[0].profile, Some(Profile::Infant));
        assert_eq!(scans[0].readings.magnesium, Some(12.0));

        assert_eq!(scans[1].profile, None);
        assert_eq!(scans[1].readings.calcium, None);
        assert_eq!(scans[1].readings.magnesium, None);
        assert_eq!(scans[1].readings.sodium, Some(180.0));
        assert_eq!(scans[1].readings.nitrate, None);
    }

    #[test]
    fn unknown_profile_names_the_row() {
        let export = "label,profile,ph\nOne,standard,7\nTwo,astronaut,7\n";
        let error = ScanImporter::from_reader(Cursor::new(export)).expect_err("bad profile");

        match error {
            ImportError::Profile { row, .. } => assert_eq!(row, 3),
            other => panic!("expected profile error, got {other:?}"),
        }
    }

    #[test]
    fn missing_label_falls_back_to_line_number() {
        let export = "ph,sodium\n7.1,12\n";
        let scans = ScanImporter::from_reader(Cursor::new(export)).expect("valid export");
        assert_eq!(scans[0].label, "scan-2");
        assert_eq!(scans[0].readings.ph, Some(7.1));
    }
}
