//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Windscope integration tests.

use std::path::PathBuf;

use app_lib::{AppConfig, AppState, Session};
use dataset::ColumnMap;
use tempfile::TempDir;

/// Headers of the wind farm export, in file order.
pub const HEADERS: &[&str] = &[
    "Wind farm",
    "Developer",
    "Operator",
    "Owner",
    "turbine_manufacturer",
    "turbine_model",
    "country",
    "region",
    "state",
    "Online",
    "lat",
    "long",
    "Cap. (MW)",
    "No.",
    "Power per turbine (MW)",
];

/// Small wind farm table with known totals.
///
/// | farm    | country  | operator | year | MW  | turbines |
/// |---------|----------|----------|------|-----|----------|
/// | Alpha   | England  | RWE      | 2005 | 100 | 40       |
/// | Bravo   | England  | SSE      | 2010 | 50  | 20       |
/// | Charlie | Scotland | SSE      | 2010 | 200 | 80       |
/// | Delta   | England  | RWE      |      | 30  | 10       |
/// | Echo    | Wales    | EDF      | 2015 | 20  | 8        |
pub struct WindFarmFixture;

impl WindFarmFixture {
    pub const LINES: &'static [&'static str] = &[
        "Alpha,Dev A,RWE,RWE,Vestas,V90,England,North West,Cumbria,2005,54.5,-3.1,100,40,2.5",
        "Bravo,Dev B,SSE,SSE,Siemens,SWT-2.5,England,North East,Durham,2010,54.7,-1.6,50,20,2.5",
        "Charlie,Dev C,SSE,SSE,Siemens,SWT-2.5,Scotland,,Highland,2010.0,57.4,-4.2,200,80,2.5",
        "Delta,Dev A,RWE,RWE,Vestas,V90,England,North West,Lancashire,,53.8,-2.4,30,10,3",
        "Echo,Dev E,EDF,EDF,Nordex,N80,Wales,,Powys,2015,52.3,-3.4,20,8,2.5",
    ];

    pub fn rows() -> Vec<Vec<&'static str>> {
        Self::LINES.iter().map(|line| line.split(',').collect()).collect()
    }

    pub fn csv() -> String {
        let mut out = HEADERS.join(",");
        for line in Self::LINES {
            out.push('\n');
            out.push_str(line);
        }
        out.push('\n');
        out
    }
}

/// Test harness owning a temp directory with the fixture written as CSV.
pub struct TestHarness {
    pub dir: TempDir,
    pub data_path: PathBuf,
    pub state: AppState,
}

impl TestHarness {
    /// Harness over the fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_csv(&WindFarmFixture::csv(), config)
    }

    /// Harness over arbitrary CSV content.
    pub fn with_csv(csv: &str, config: AppConfig) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let data_path = dir.path().join("wind_farms.csv");
        std::fs::write(&data_path, csv).expect("write fixture");

        let dataset =
            persistence::load_csv(&data_path, &config.column_map()).expect("load fixture");
        TestHarness { dir, data_path, state: AppState::new(dataset, config) }
    }

    pub fn session(&self) -> Session {
        self.state.open_session()
    }

    /// Writes an extra file next to the data, returning its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write file");
        path
    }
}

/// Default column map, for tests that read CSV directly.
pub fn default_map() -> ColumnMap {
    ColumnMap::default()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
