//! Dataset store: the launch records CSV, loaded once and read-only afterwards.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use launchdash_common::{DashError, Result};

pub const LAUNCH_SITE_COLUMN: &str = "Launch Site";
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
pub const BOOSTER_CATEGORY_COLUMN: &str = "Booster Version Category";
pub const OUTCOME_COLUMN: &str = "class";

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    LAUNCH_SITE_COLUMN,
    PAYLOAD_COLUMN,
    BOOSTER_CATEGORY_COLUMN,
    OUTCOME_COLUMN,
];

/// Binary launch result. `Failure` orders before `Success` on chart axes and legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub const ORDER: [Outcome; 2] = [Outcome::Failure, Outcome::Success];

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }

    /// Parse the dataset's `class` column: 1 is success, 0 is failure.
    pub fn from_class(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" | "1.0" => Some(Outcome::Success),
            "0" | "0.0" => Some(Outcome::Failure),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub booster_category: String,
    pub outcome: Outcome,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        booster_category: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            booster_category: booster_category.into(),
            outcome,
            flight_number: None,
            booster_version: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
    #[serde(rename = "class")]
    class: String,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<String>,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
}

/// Ordered, immutable sequence of launch records.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
}

impl Dataset {
    /// Load the dataset from a CSV file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| DashError::DataLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let dataset = Self::from_reader(file)?;
        info!("Loaded {} launch records from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    /// Parse CSV from any reader. The header row must name every required column
    /// (surrounding whitespace is ignored); extra columns are ignored.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = reader.headers()?.clone();
        debug!("Dataset columns: {:?}", headers.iter().collect::<Vec<_>>());

        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(DashError::MissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let raw: RawRecord = row.deserialize(Some(&headers)).map_err(|e| {
                DashError::MalformedRow { line, reason: e.to_string() }
            })?;
            records.push(parse_record(raw, line)?);
        }

        Ok(Self { records })
    }

    /// Build a dataset from already-parsed records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            check_payload(record.payload_mass_kg, i as u64 + 1)?;
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_payload(&self) -> Result<f64> {
        self.records
            .iter()
            .map(|r| r.payload_mass_kg)
            .reduce(f64::min)
            .ok_or(DashError::EmptyDataset)
    }

    pub fn max_payload(&self) -> Result<f64> {
        self.records
            .iter()
            .map(|r| r.payload_mass_kg)
            .reduce(f64::max)
            .ok_or(DashError::EmptyDataset)
    }

    /// `(min, max)` payload mass across the whole dataset.
    pub fn payload_bounds(&self) -> Result<(f64, f64)> {
        Ok((self.min_payload()?, self.max_payload()?))
    }

    /// Distinct launch sites in order of first appearance.
    pub fn sites(&self) -> Vec<&str> {
        let mut sites: Vec<&str> = Vec::new();
        for record in &self.records {
            if !sites.contains(&record.site.as_str()) {
                sites.push(&record.site);
            }
        }
        sites
    }
}

fn parse_record(raw: RawRecord, line: u64) -> Result<LaunchRecord> {
    let malformed = |reason: String| DashError::MalformedRow { line, reason };

    let site = raw.site.trim().to_string();
    if site.is_empty() {
        return Err(malformed(format!("empty {LAUNCH_SITE_COLUMN}")));
    }

    let payload_mass_kg: f64 = raw
        .payload
        .trim()
        .parse()
        .map_err(|_| malformed(format!("{PAYLOAD_COLUMN} is not a number: {:?}", raw.payload)))?;
    check_payload(payload_mass_kg, line)?;

    let outcome = Outcome::from_class(&raw.class)
        .ok_or_else(|| malformed(format!("{OUTCOME_COLUMN} must be 0 or 1, got {:?}", raw.class)))?;

    let flight_number = raw
        .flight_number
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u32);

    let booster_version = raw
        .booster_version
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    Ok(LaunchRecord {
        site,
        payload_mass_kg,
        booster_category: raw.booster_category.trim().to_string(),
        outcome,
        flight_number,
        booster_version,
    })
}

fn check_payload(payload: f64, line: u64) -> Result<()> {
    if !payload.is_finite() || payload < 0.0 {
        return Err(DashError::MalformedRow {
            line,
            reason: format!("payload mass must be finite and non-negative, got {payload}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
,Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
1,2,CCAFS LC-40,0,525.0,F9 v1.0  B0004,v1.0
2,3,VAFB SLC-4E,1,500.0,F9 v1.1  B1003,v1.1
3,4,KSC LC-39A,1,9600.0,F9 FT B1031.1,FT
4,5,CCAFS LC-40,1,3170.0,F9 v1.1,v1.1
";

    #[test]
    fn test_parse_sample() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 5);

        let first = &dataset.records()[0];
        assert_eq!(first.site, "CCAFS LC-40");
        assert_eq!(first.outcome, Outcome::Failure);
        assert_eq!(first.flight_number, Some(1));
        assert_eq!(first.booster_version.as_deref(), Some("F9 v1.0  B0003"));
        assert_eq!(dataset.records()[3].booster_category, "FT");
    }

    #[test]
    fn test_payload_bounds() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.min_payload().unwrap(), 0.0);
        assert_eq!(dataset.max_payload().unwrap(), 9600.0);
    }

    #[test]
    fn test_sites_first_appearance_order() {
        let dataset = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.sites(), vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,1\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.records()[0].flight_number, None);
        assert_eq!(dataset.records()[0].booster_version, None);
    }

    #[test]
    fn test_missing_column() {
        let csv = "Launch Site,Payload Mass (kg),class\nA,100,1\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashError::MissingColumn(ref c) if c == BOOSTER_CATEGORY_COLUMN));
    }

    #[test]
    fn test_padded_headers_are_accepted() {
        let csv = "Launch Site , Payload Mass (kg),Booster Version Category, class\nA,100,FT,1\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].site, "A");
        assert_eq!(dataset.records()[0].outcome, Outcome::Success);
    }

    #[test]
    fn test_malformed_outcome_reports_line() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,100,FT,1\nA,200,FT,maybe\n";
        match Dataset::from_reader(csv.as_bytes()).unwrap_err() {
            DashError::MalformedRow { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_payload_rejected() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nA,-5,FT,1\n";
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes()),
            Err(DashError::MalformedRow { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load("/nonexistent/launches.csv").unwrap_err();
        assert!(matches!(err, DashError::DataLoad { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 5);
    }

    #[test]
    fn test_empty_dataset_bounds_fail() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n";
        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
        assert!(dataset.is_empty());
        assert!(matches!(dataset.min_payload(), Err(DashError::EmptyDataset)));
        assert!(matches!(dataset.payload_bounds(), Err(DashError::EmptyDataset)));
    }

    #[test]
    fn test_outcome_ordering() {
        assert!(Outcome::Failure < Outcome::Success);
        assert_eq!(Outcome::from_class("1.0"), Some(Outcome::Success));
        assert_eq!(Outcome::from_class("2"), None);
    }
}
