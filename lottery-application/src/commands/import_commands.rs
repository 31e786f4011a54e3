use std::path::Path;

use lottery_domain::{normalize_date, DrawRecord, GameId, GameProfile};
use thiserror::Error;
use tracing::{error, info, warn, Instrument};

use crate::{AppError, AppState, GameHistory, Metrics};

/// Rows shorter than this are rejected outright.
pub const MIN_COLUMNS: usize = 20;
pub const PERIOD_COLUMN: usize = 0;
pub const DATE_COLUMN: usize = 1;
pub const FIRST_NUMBER_COLUMN: usize = 2;
pub const NUMBER_COLUMNS: usize = 20;
/// Read only when the row is long enough to have it.
pub const SPECIAL_COLUMN: usize = 26;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added: usize,
    pub skipped: usize,
    /// Set when the file could not be read; both counts are then zero.
    pub unreadable: bool,
}

impl ImportOutcome {
    fn unreadable() -> Self {
        Self {
            unreadable: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("row has {0} columns, need at least 20")]
    TooShort(usize),
    #[error("period column is empty")]
    MissingPeriod,
    #[error("no drawn numbers")]
    NoNumbers,
}

pub async fn import_file(
    state: &AppState,
    game: GameId,
    path: &Path,
) -> Result<ImportOutcome, AppError> {
    let history = state.history(game)?;
    let mut history = history.lock().await;
    let span = history.span().clone();
    Ok(import_into(&mut history, path, &state.metrics)
        .instrument(span)
        .await)
}

/// Merges every parseable row of the file and finalizes once. Every data row
/// that does not become a new draw (malformed, empty, or already stored)
/// counts as skipped. An unreadable file yields `(0, 0)` flagged as unreadable.
pub async fn import_into(history: &mut GameHistory, path: &Path, metrics: &Metrics) -> ImportOutcome {
    let content = match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(err) => {
            error!("cannot open import file {}: {}", path.display(), err);
            return ImportOutcome::unreadable();
        }
    };

    let (records, rows) = parse_csv(history.profile(), &content);
    let added = history.merge(records);
    let outcome = ImportOutcome {
        added,
        skipped: rows - added,
        unreadable: false,
    };
    if !history.finalize().await {
        metrics.record_snapshot_error();
    }
    metrics.record_added(outcome.added);
    metrics.record_import_skipped(outcome.skipped);
    info!(
        "imported {}: {} added, {} skipped",
        path.display(),
        outcome.added,
        outcome.skipped
    );
    outcome
}

/// Returns the parsed draws and the number of data rows seen.
pub fn parse_csv(profile: &GameProfile, content: &[u8]) -> (Vec<DrawRecord>, usize) {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content);

    let mut records = Vec::new();
    let mut rows = 0;
    for (index, row) in reader.records().enumerate() {
        rows += 1;
        // header is line 1
        let line = index + 2;
        match row {
            Ok(row) => match parse_row(profile, &row) {
                Ok(record) => records.push(record),
                Err(err) => warn!("skipping line {}: {}", line, err),
            },
            Err(err) => warn!("skipping unreadable line {}: {}", line, err),
        }
    }
    (records, rows)
}

pub fn parse_row(profile: &GameProfile, row: &csv::StringRecord) -> Result<DrawRecord, RowError> {
    if row.len() < MIN_COLUMNS {
        return Err(RowError::TooShort(row.len()));
    }
    let period = row.get(PERIOD_COLUMN).unwrap_or_default();
    if period.is_empty() {
        return Err(RowError::MissingPeriod);
    }
    let draw_date = normalize_date(row.get(DATE_COLUMN).unwrap_or_default());

    let numbers: Vec<u32> = (FIRST_NUMBER_COLUMN..FIRST_NUMBER_COLUMN + NUMBER_COLUMNS)
        .filter_map(|column| row.get(column))
        .filter_map(|cell| cell.parse::<u32>().ok())
        .collect();
    if numbers.is_empty() {
        return Err(RowError::NoNumbers);
    }

    let separate = row
        .get(SPECIAL_COLUMN)
        .and_then(|cell| cell.parse::<u32>().ok());
    let special_number = profile.special_rule.resolve(&numbers, separate);
    Ok(DrawRecord::new(period, draw_date, numbers, special_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use crate::testing::{day, test_state, FakeFetcher, MemoryRepository};

    fn bingo_row(period: &str, date: &str, special: &str) -> String {
        let mut cells = vec![period.to_string(), date.to_string()];
        cells.extend((1..=20).map(|n| n.to_string()));
        cells.extend(["", "", "", ""].iter().map(|s| s.to_string()));
        cells.push(special.to_string());
        cells.join(",")
    }

    fn header() -> String {
        let mut cells = vec!["期別".to_string(), "開獎日期".to_string()];
        cells.extend((1..=20).map(|n| format!("獎號{}", n)));
        cells.extend((0..4).map(|n| format!("備註{}", n)));
        cells.push("超級獎號".to_string());
        cells.join(",")
    }

    fn write_csv(dir: &tempfile::TempDir, name: &str, lines: &[String]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("create csv");
        file.write_all(UTF8_BOM).expect("bom");
        file.write_all(lines.join("\n").as_bytes()).expect("write csv");
        path
    }

    async fn bingo_state(repo: Arc<MemoryRepository>) -> AppState {
        test_state(
            GameProfile::builtin(GameId::BingoBingo),
            repo,
            Arc::new(FakeFetcher::new()),
            day(2025, 1, 2),
        )
        .await
    }

    #[test]
    fn parse_row_extracts_fixed_columns() {
        let profile = GameProfile::builtin(GameId::BingoBingo);
        let line = bingo_row("114000001", "2025/01/01", "7");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(line.as_bytes());
        let row = reader.records().next().expect("row").expect("csv");

        let record = parse_row(&profile, &row).expect("record");
        assert_eq!(record.period, "114000001");
        assert_eq!(record.draw_date, "2025-01-01");
        assert_eq!(record.numbers, (1..=20).collect::<Vec<u32>>());
        assert_eq!(record.special_number, Some(7));
    }

    #[test]
    fn non_numeric_cells_are_dropped() {
        let profile = GameProfile::builtin(GameId::BingoBingo);
        let mut cells: Vec<String> = vec!["114000002".into(), "2025/01/02".into()];
        cells.extend((1..=20).map(|n| if n % 2 == 0 { "x".to_string() } else { n.to_string() }));
        let row = csv::StringRecord::from(cells);
        let record = parse_row(&profile, &row).expect("record");
        assert_eq!(record.numbers.len(), 10);
        assert_eq!(record.special_number, None);
    }

    #[test]
    fn rows_without_numbers_or_period_are_rejected() {
        let profile = GameProfile::builtin(GameId::BingoBingo);
        let mut cells: Vec<String> = vec!["114000003".into(), "2025/01/03".into()];
        cells.extend((0..20).map(|_| "-".to_string()));
        assert_eq!(
            parse_row(&profile, &csv::StringRecord::from(cells.clone())),
            Err(RowError::NoNumbers)
        );
        cells[0] = String::new();
        assert_eq!(
            parse_row(&profile, &csv::StringRecord::from(cells)),
            Err(RowError::MissingPeriod)
        );
        let short = csv::StringRecord::from(vec!["1"; 10]);
        assert_eq!(parse_row(&profile, &short), Err(RowError::TooShort(10)));
    }

    #[tokio::test]
    async fn import_then_reimport_skips_existing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_csv(&dir, "bingo.csv", &[header(), bingo_row("114000001", "2025/01/01", "7")]);
        let repo = Arc::new(MemoryRepository::default());
        let state = bingo_state(repo.clone()).await;

        let first = import_file(&state, GameId::BingoBingo, &path).await.expect("import");
        assert_eq!(
            first,
            ImportOutcome {
                added: 1,
                skipped: 0,
                unreadable: false
            }
        );
        let second = import_file(&state, GameId::BingoBingo, &path).await.expect("import");
        assert_eq!(
            second,
            ImportOutcome {
                added: 0,
                skipped: 1,
                unreadable: false
            }
        );

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].special_number, Some(7));

        let history = state.history(GameId::BingoBingo).expect("history");
        let history = history.lock().await;
        assert_eq!(history.frequency().primary_total(), 20);
        assert_eq!(history.frequency().special_total(), 1);
    }

    #[tokio::test]
    async fn short_row_is_skipped_without_aborting() {
        let dir = tempfile::tempdir().expect("tempdir");
        let short = (0..10).map(|n| n.to_string()).collect::<Vec<_>>().join(",");
        let path = write_csv(
            &dir,
            "mixed.csv",
            &[header(), bingo_row("114000001", "2025/01/01", "7"), short],
        );
        let state = bingo_state(Arc::new(MemoryRepository::default())).await;

        let outcome = import_file(&state, GameId::BingoBingo, &path).await.expect("import");
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.skipped, 1);
    }

    #[tokio::test]
    async fn missing_file_imports_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Arc::new(MemoryRepository::default());
        let state = bingo_state(repo.clone()).await;

        let outcome = import_file(&state, GameId::BingoBingo, &dir.path().join("absent.csv"))
            .await
            .expect("import");
        assert_eq!((outcome.added, outcome.skipped), (0, 0));
        assert!(outcome.unreadable);
        assert!(repo.saved().is_empty());
    }

    #[tokio::test]
    async fn existing_but_unreadable_path_is_flagged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let repo = Arc::new(MemoryRepository::default());
        let state = bingo_state(repo.clone()).await;

        // A directory exists on disk but cannot be read as a file.
        let outcome = import_file(&state, GameId::BingoBingo, dir.path())
            .await
            .expect("import");
        assert!(outcome.unreadable);
        assert_eq!((outcome.added, outcome.skipped), (0, 0));
        assert!(repo.saved().is_empty());
    }
}
