use std::fmt;
use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::CsvError;
use crate::roster::{Champion, Name, Person, Rank, Role, RosterStore};

pub const MINIMAL_HEADER: [&str; 4] = ["Name", "Role", "Rank", "Champion"];
pub const RECORD_HEADER: [&str; 6] = ["Name", "Role", "Rank", "Champion", "Wins", "Losses"];
pub const DERIVED_HEADER: [&str; 8] = [
    "Name", "Role", "Rank", "Champion", "Wins", "Losses", "WinRate%", "AvgGrade",
];

/// The accepted header layouts. Derived columns are read past, never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderShape {
    Minimal,
    WithRecord,
    WithDerived,
}

impl HeaderShape {
    pub fn detect(header: &StringRecord) -> Option<Self> {
        let tokens: Vec<&str> = header
            .iter()
            .enumerate()
            .map(|(i, field)| if i == 0 { field.trim_start_matches('\u{feff}') } else { field })
            .collect();

        if tokens == MINIMAL_HEADER {
            Some(HeaderShape::Minimal)
        } else if tokens == RECORD_HEADER {
            Some(HeaderShape::WithRecord)
        } else if tokens == DERIVED_HEADER {
            Some(HeaderShape::WithDerived)
        } else {
            None
        }
    }

    pub fn columns(&self) -> usize {
        match self {
            HeaderShape::Minimal => MINIMAL_HEADER.len(),
            HeaderShape::WithRecord => RECORD_HEADER.len(),
            HeaderShape::WithDerived => DERIVED_HEADER.len(),
        }
    }

    fn has_record(&self) -> bool {
        !matches!(self, HeaderShape::Minimal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Duplicate,
    Invalid,
}

/// A rejected data row, by 1-based line number in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub line: u64,
    pub outcome: RowOutcome,
    pub reason: String,
}

/// Per-row classification of one import call. Blank rows are not counted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates: usize,
    pub invalid: usize,
    pub issues: Vec<RowIssue>,
}

impl ImportResult {
    pub fn total_rows(&self) -> usize {
        self.imported + self.duplicates + self.invalid
    }

    fn reject(&mut self, line: u64, outcome: RowOutcome, reason: String) {
        log::debug!("Line {line}: {outcome:?} ({reason})");
        match outcome {
            RowOutcome::Duplicate => self.duplicates += 1,
            RowOutcome::Invalid => self.invalid += 1,
        }
        self.issues.push(RowIssue { line, outcome, reason });
    }
}

impl fmt::Display for ImportResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} imported, {} duplicate, {} invalid",
            self.imported, self.duplicates, self.invalid
        )
    }
}

/// Import players from a CSV file into `store`.
///
/// Only an unreadable file or an unrecognized header fails the call; every
/// data row lands in exactly one of the imported/duplicate/invalid buckets.
pub fn import_persons(store: &mut RosterStore, source: &Path) -> Result<ImportResult, CsvError> {
    let raw = fs::read(source).map_err(|source_err| CsvError::Io {
        path: source.display().to_string(),
        source: source_err,
    })?;
    let result = import_persons_from_bytes(store, &raw)?;
    log::info!("Imported {} from {}: {}", result.total_rows(), source.display(), result);
    Ok(result)
}

pub fn import_persons_from_bytes(store: &mut RosterStore, raw: &[u8]) -> Result<ImportResult, CsvError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(raw);

    let mut records = reader.records();
    let header = match records.next() {
        Some(header) => header?,
        None => return Err(CsvError::InvalidCsv("file is empty, expected a header row".to_string())),
    };
    let shape = HeaderShape::detect(&header).ok_or_else(|| {
        CsvError::InvalidCsv(format!(
            "unrecognized header `{}`; expected `{}`, `{}` or `{}`",
            header.iter().collect::<Vec<_>>().join(","),
            MINIMAL_HEADER.join(","),
            RECORD_HEADER.join(","),
            DERIVED_HEADER.join(","),
        ))
    })?;

    let mut result = ImportResult::default();
    for row in records {
        let record = match row {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map_or(0, |p| p.line());
                result.reject(line, RowOutcome::Invalid, err.to_string());
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        if record.iter().all(str::is_empty) {
            continue;
        }

        let person = match parse_row(&record, shape) {
            Ok(person) => person.with_stats(store.empty_stats()),
            Err(reason) => {
                result.reject(line, RowOutcome::Invalid, reason);
                continue;
            }
        };

        if store.find_person_by_name(person.name.as_str()).is_some() {
            result.reject(line, RowOutcome::Duplicate, format!("{} already exists", person.name));
            continue;
        }

        match store.add_person(person) {
            Ok(()) => result.imported += 1,
            Err(err) => result.reject(line, RowOutcome::Duplicate, err.to_string()),
        }
    }

    Ok(result)
}

fn parse_row(record: &StringRecord, shape: HeaderShape) -> Result<Person, String> {
    if record.len() < shape.columns() {
        return Err(format!(
            "expected {} fields, found {}",
            shape.columns(),
            record.len()
        ));
    }

    let field = |i: usize| record.get(i).unwrap_or_default();
    let name = Name::new(field(0)).map_err(|e| e.to_string())?;
    let role = field(1).parse::<Role>().map_err(|e| e.to_string())?;
    let rank = Rank::new(field(2)).map_err(|e| e.to_string())?;
    let champion = Champion::new(field(3)).map_err(|e| e.to_string())?;

    let person = Person::new(name, role, rank, champion);
    if !shape.has_record() {
        return Ok(person);
    }

    let wins = parse_count(field(4), "Wins")?;
    let losses = parse_count(field(5), "Losses")?;
    Ok(person.with_record(wins, losses))
}

fn parse_count(raw: &str, column: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("{column} should be a non-negative integer, got `{raw}`"))
}
