//! Per-project auction constants and simulation settings
//!
//! Projects come from a built-in table and may be extended or overridden by a
//! TOML file:
//!
//! ```toml
//! [projects.azuki]
//! csv_data_file = "azuki.csv"
//!
//! [projects.azuki.auction]
//! collection_size = 9800
//! start_time = 1642010410
//! start_block = 13992202
//! duration = 600
//! step_duration = 1
//! start_price = 1000000000000000000
//! floor_price = 150000000000000000
//! price_delta = 50000000000000000
//! esmr = 200
//! ```

use crate::errors::ReplayError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use stepped_auction::{AuctionConfig, Clock, ClockAxis, Price, Quantity};
use tracing::debug;

/// Environment variable overriding the tape directory
pub const DATA_DIR_ENV: &str = "AUCTION_SIM_DATA";

/// Default tape directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "./sim_data";

/// 10^18, the smallest-unit scale of ether prices
const WEI: i64 = 1_000_000_000_000_000_000;

/// `units * 10^-scale` ether expressed in wei
fn ether(units: i64, scale: u32) -> Price {
    (Decimal::new(units, scale) * Decimal::from(WEI)).normalize()
}

/// Auction constants for one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAuction {
    pub collection_size: Quantity,
    /// Auction start as a unix timestamp (GDA clock)
    pub start_time: Clock,
    /// Auction start as a block number (CRA clock)
    pub start_block: Clock,
    pub duration: u64,
    pub step_duration: u64,
    pub start_price: Price,
    pub floor_price: Price,
    pub price_delta: Price,
    /// Expected step mint rate
    #[serde(alias = "expected_step_mint_rate")]
    pub esmr: Quantity,
}

impl ProjectAuction {
    /// Start clock for the given axis
    pub fn start_clock(&self, axis: ClockAxis) -> Clock {
        match axis {
            ClockAxis::Block => self.start_block,
            ClockAxis::Timestamp => self.start_time,
        }
    }

    /// The seven engine parameters for the given axis
    pub fn to_auction_config(&self, axis: ClockAxis) -> AuctionConfig {
        AuctionConfig {
            start_clock: self.start_clock(axis),
            duration: self.duration,
            step_duration: self.step_duration,
            start_price: self.start_price,
            floor_price: self.floor_price,
            price_delta: self.price_delta,
            expected_step_mint_rate: self.esmr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Tape file name, resolved against the data directory
    pub csv_data_file: String,
    pub auction: ProjectAuction,
}

/// Named project configurations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectTable {
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectConfig>,
}

impl ProjectTable {
    pub fn from_toml_str(content: &str) -> Result<Self, ReplayError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let table = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), projects = table.projects.len(), "loaded project table");
        Ok(table)
    }

    /// Built-in projects overlaid with the ones in `path`, if any
    pub fn with_overrides(path: Option<&Path>) -> Result<Self, ReplayError> {
        let mut table = builtin_projects();
        if let Some(path) = path {
            table.merge(Self::load(path)?);
        }
        Ok(table)
    }

    /// Insert or replace every project from `other`
    pub fn merge(&mut self, other: ProjectTable) {
        self.projects.extend(other.projects);
    }

    pub fn get(&self, name: &str) -> Result<&ProjectConfig, ReplayError> {
        self.projects
            .get(name)
            .ok_or_else(|| ReplayError::UnknownProject(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.projects.keys().map(String::as_str)
    }
}

/// Collections with exported mint tapes
pub fn builtin_projects() -> ProjectTable {
    let mut projects = BTreeMap::new();

    projects.insert(
        "azuki".to_string(),
        ProjectConfig {
            csv_data_file: "azuki-6360cf85-97e9-4cb5-80e6-4240f2a2d59d.csv".to_string(),
            auction: ProjectAuction {
                collection_size: 9800,
                start_time: 1_642_010_410,
                start_block: 13_992_202,
                duration: 600,    // blocks
                step_duration: 1, // blocks
                start_price: ether(1, 0),
                floor_price: ether(15, 2),
                price_delta: ether(5, 2),
                esmr: 200,
            },
        },
    );

    projects.insert(
        "moonbirds".to_string(),
        ProjectConfig {
            csv_data_file: "moonbirds-8f01836d-d6e5-44d0-94e3-3e9ef70855d8.csv".to_string(),
            auction: ProjectAuction {
                collection_size: 7875,
                start_time: 1_650_121_200,
                start_block: 14_597_286,
                duration: 200,    // blocks
                step_duration: 3, // blocks
                start_price: ether(25, 1),
                floor_price: ether(1, 1),
                price_delta: ether(1, 1),
                esmr: 40,
            },
        },
    );

    ProjectTable { projects }
}

/// Where tapes live on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationSettings {
    pub data_dir: PathBuf,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl SimulationSettings {
    /// Resolve settings: explicit flag, then environment, then default
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir
            .or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self { data_dir }
    }

    pub fn tape_path(&self, project: &ProjectConfig) -> PathBuf {
        self.data_dir.join(&project.csv_data_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_projects_are_valid_auctions() {
        let table = builtin_projects();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["azuki", "moonbirds"]);

        for name in ["azuki", "moonbirds"] {
            let project = table.get(name).unwrap();
            for axis in [ClockAxis::Block, ClockAxis::Timestamp] {
                assert!(project.auction.to_auction_config(axis).validate().is_ok());
            }
        }

        let moonbirds = &table.get("moonbirds").unwrap().auction;
        assert_eq!(
            moonbirds.start_price,
            Decimal::from(2_500_000_000_000_000_000i64)
        );
        assert_eq!(moonbirds.floor_price, Decimal::from(100_000_000_000_000_000i64));
    }

    #[test]
    fn test_start_clock_follows_axis() {
        let table = builtin_projects();
        let azuki = &table.get("azuki").unwrap().auction;
        assert_eq!(azuki.to_auction_config(ClockAxis::Block).start_clock, 13_992_202);
        assert_eq!(
            azuki.to_auction_config(ClockAxis::Timestamp).start_clock,
            1_642_010_410
        );
    }

    #[test]
    fn test_project_without_tape_is_rejected() {
        let result = ProjectTable::from_toml_str(
            r#"
            [projects.tiny.auction]
            collection_size = 10
            start_time = 0
            start_block = 0
            duration = 10
            step_duration = 1
            start_price = 1.5
            floor_price = 0.5
            price_delta = 0.25
            esmr = 1
            "#,
        );
        assert!(matches!(result, Err(ReplayError::Toml(_))));
    }

    #[test]
    fn test_toml_overrides_merge_over_builtins() {
        let overrides = ProjectTable::from_toml_str(
            r#"
            [projects.azuki]
            csv_data_file = "azuki-small.csv"

            [projects.azuki.auction]
            collection_size = 100
            start_time = 0
            start_block = 10
            duration = 30
            step_duration = 2
            start_price = 10000
            floor_price = 5000
            price_delta = "500"
            expected_step_mint_rate = 6
            "#,
        )
        .unwrap();

        let mut table = builtin_projects();
        table.merge(overrides);
        let azuki = table.get("azuki").unwrap();
        assert_eq!(azuki.csv_data_file, "azuki-small.csv");
        assert_eq!(azuki.auction.esmr, 6);
        assert_eq!(azuki.auction.price_delta, Decimal::from(500));
        assert!(table.get("moonbirds").is_ok());
    }

    #[test]
    fn test_unknown_project() {
        let table = builtin_projects();
        assert!(matches!(
            table.get("cryptopunks"),
            Err(ReplayError::UnknownProject(name)) if name == "cryptopunks"
        ));
    }

    #[test]
    fn test_tape_path_joins_data_dir() {
        let settings = SimulationSettings::resolve(Some(PathBuf::from("/tmp/tapes")));
        let table = builtin_projects();
        let path = settings.tape_path(table.get("azuki").unwrap());
        assert!(path.starts_with("/tmp/tapes"));
        assert!(path.ends_with("azuki-6360cf85-97e9-4cb5-80e6-4240f2a2d59d.csv"));
    }
}
