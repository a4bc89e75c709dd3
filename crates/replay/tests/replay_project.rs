//! Filesystem-backed replay of a small project through both clock axes.

use rust_decimal::Decimal;
use std::fs;
use stepped_auction::{AuctionError, ClockAxis, PriceDirection};
use stepped_auction_replay::*;
use tempfile::TempDir;

const PROJECTS: &str = r#"
[projects.demo]
csv_data_file = "demo.csv"

[projects.demo.auction]
collection_size = 30
start_time = 5000
start_block = 100
duration = 30
step_duration = 2
start_price = 10000
floor_price = 5000
price_delta = 500
esmr = 2
"#;

// Rows before the start block are dropped, rows past block 130 are ignored.
const TAPE: &str = "\
block_number,timestamp,num_minted_in_block
98,4980,9
100,5000,3
101,5010,1
105,5050,2
112,5120,0
131,5310,4
";

fn setup(tape: &str) -> (TempDir, ProjectTable, SimulationSettings) {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("demo.csv"), tape).unwrap();
    let projects_path = dir.path().join("projects.toml");
    fs::write(&projects_path, PROJECTS).unwrap();

    let table = ProjectTable::with_overrides(Some(projects_path.as_path())).unwrap();
    let settings = SimulationSettings::resolve(Some(dir.path().to_path_buf()));
    (dir, table, settings)
}

#[test]
fn test_block_axis_replay() {
    let (_dir, table, settings) = setup(TAPE);
    let project = table.get("demo").unwrap();
    assert!(table.get("azuki").is_ok());

    let (auction, stats) = run_project(project, &settings, ClockAxis::Block, false).unwrap();
    assert_eq!(stats.applied, 4);
    assert_eq!(stats.ignored_after_close, 1);
    assert_eq!(auction.total_minted(), 6);

    // step 1 (blocks 100-102): 4 minted > 2 -> step 3 = 10000 + 500 - 500
    assert_eq!(auction.ledger().price(3), Some(Decimal::from(10_000)));
    assert_eq!(auction.ledger().minted(3), 2);
    // step 3 minted 2 == rate holds, steps 4 and 5 are empty
    assert_eq!(auction.ledger().price(6), Some(Decimal::from(9_000)));

    let report = AuctionReport::build("demo", &auction, stats, Some(30)).unwrap();
    let steps: Vec<u64> = report.steps.iter().map(|r| r.step_index).collect();
    assert_eq!(steps, vec![1, 3, 6]);
    assert_eq!(report.steps[1].direction, PriceDirection::Hold);
    assert!(!report.sold_out);
}

#[test]
fn test_timestamp_axis_replay() {
    let (_dir, table, settings) = setup(TAPE);
    let project = table.get("demo").unwrap();

    let (auction, stats) = run_project(project, &settings, ClockAxis::Timestamp, false).unwrap();
    assert_eq!(auction.axis(), ClockAxis::Timestamp);
    // window is 5000..=5030 seconds: only the first two rows at/after start fit
    assert_eq!(stats.applied, 2);
    assert_eq!(stats.ignored_after_close, 3);
    assert_eq!(auction.total_minted(), 4);
    assert_eq!(auction.current_step(), 5);
}

#[test]
fn test_out_of_order_tape_fails_unless_sorted() {
    let unsorted = "\
block_number,num_minted_in_block
100,1
110,1
103,1
";
    let (_dir, table, settings) = setup(unsorted);
    let project = table.get("demo").unwrap();

    let err = run_project(project, &settings, ClockAxis::Block, false).unwrap_err();
    match err {
        ReplayError::Event { index, source } => {
            assert_eq!(index, 2);
            assert_eq!(
                source,
                AuctionError::OutOfOrderEvent {
                    clock: 103,
                    step: 2,
                    current_step: 5
                }
            );
        }
        other => panic!("unexpected error {other}"),
    }

    let (auction, stats) = run_project(project, &settings, ClockAxis::Block, true).unwrap();
    assert_eq!(stats.applied, 3);
    assert_eq!(auction.total_minted(), 3);
}

#[test]
fn test_missing_tape_file() {
    let (dir, table, _) = setup(TAPE);
    let settings = SimulationSettings::resolve(Some(dir.path().join("nowhere")));
    let project = table.get("demo").unwrap();
    assert!(matches!(
        run_project(project, &settings, ClockAxis::Block, false),
        Err(ReplayError::Io(_))
    ));
}
