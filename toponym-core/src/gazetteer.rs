use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::Instant;

use ahash::{AHashMap, AHashSet};
use calamine::{open_workbook_auto, Data, Reader};
use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use strsim::levenshtein;
use tracing::{debug, info};

use crate::error::{GazetteerUnavailable, LoadFailure};
use crate::normalize;
use crate::search::SearchTerm;

/// Column holding canonical names in the reference sheet.
pub const DEFAULT_COLUMN: &str = "cleaned_location_name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GazetteerEntry {
    pub canonical: String,
    pub comparison: String,
}

impl GazetteerEntry {
    /// Canonical names are taken to be suffix free, so only case folding
    /// and substitution apply.
    pub fn from_canonical(canonical: impl Into<String>) -> Self {
        let canonical = canonical.into();
        let comparison = normalize(&canonical);
        Self {
            canonical,
            comparison,
        }
    }
}

/// Position of an entry in the gazetteer and its edit distance to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ranked {
    pub index: usize,
    pub distance: usize,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct GazetteerSource {
    pub path: PathBuf,
    pub column: String,
}

impl GazetteerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            column: DEFAULT_COLUMN.to_string(),
        }
    }
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = column.into();
        self
    }
}

#[derive(Debug, Default)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
}

type Cache = RwLock<AHashMap<GazetteerSource, Arc<Gazetteer>>>;

fn cache() -> &'static Cache {
    static CACHE: OnceLock<Cache> = OnceLock::new();
    CACHE.get_or_init(Cache::default)
}

impl Gazetteer {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(names.into_iter().map(Into::into).collect())
    }

    fn from_rows(rows: Vec<String>) -> Self {
        let entries = rows
            .into_par_iter()
            .enumerate()
            .filter_map(|(row, name)| {
                let name = name.trim();
                if name.is_empty() {
                    debug!("Skipping empty name at row {row}");
                    return None;
                }
                Some(GazetteerEntry::from_canonical(name))
            })
            .collect();
        Gazetteer { entries }
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&GazetteerEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the process wide gazetteer for `source`, reading it on first use.
    ///
    /// Later calls with an equal source share the same snapshot and never
    /// touch the file again. A failed read is not remembered.
    pub fn load(source: &GazetteerSource) -> Result<Arc<Self>, GazetteerUnavailable> {
        if let Some(gaz) = cache()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(source)
        {
            return Ok(Arc::clone(gaz));
        }
        // file I/O stays outside the cache lock
        let gaz = Arc::new(Self::read(source)?);
        let mut loaded = cache().write().unwrap_or_else(PoisonError::into_inner);
        // the first snapshot inserted wins a concurrent first load
        let gaz = loaded.entry(source.clone()).or_insert(gaz);
        Ok(Arc::clone(gaz))
    }

    /// Reads `source` from disk, bypassing the cache.
    pub fn read(source: &GazetteerSource) -> Result<Self, GazetteerUnavailable> {
        let start = Instant::now();
        info!("Path {:?}", source.path);
        let rows = read_rows(&source.path, &source.column)
            .map_err(|cause| GazetteerUnavailable::new(&source.path, cause))?;
        info!("Read {} rows: {:.2?}", rows.len(), start.elapsed());
        let gaz = Self::from_rows(rows);
        info!(
            "parsed {} gazetteer entries in: {:.2?}",
            gaz.len(),
            start.elapsed()
        );
        Ok(gaz)
    }

    /// Every entry ordered by edit distance to the query, best first.
    ///
    /// Ties keep gazetteer order and only the first entry of each
    /// comparison form survives.
    pub fn rank(&self, term: &SearchTerm) -> Vec<Ranked> {
        let mut ranked = self
            .entries
            .par_iter()
            .enumerate()
            .map(|(index, entry)| Ranked {
                index,
                distance: levenshtein(&term.normalized, &entry.comparison),
            })
            .collect::<Vec<_>>();
        ranked.sort_by_key(|r| r.distance);
        let mut seen = AHashSet::with_capacity(ranked.len());
        ranked.retain(|r| seen.insert(self.entries[r.index].comparison.as_str()));
        ranked
    }
}

fn read_rows(path: &Path, column: &str) -> Result<Vec<String>, LoadFailure> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => read_delimited(path, b',', column),
        "tsv" => read_delimited(path, b'\t', column),
        "json" => read_json(path, column),
        "xlsx" | "xlsm" | "xls" | "ods" => read_spreadsheet(path, column),
        _ => Err(LoadFailure::UnsupportedFormat(extension)),
    }
}

fn read_delimited(path: &Path, delimiter: u8, column: &str) -> Result<Vec<String>, LoadFailure> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)?;
    let idx = reader
        .headers()?
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| LoadFailure::MissingColumn(column.to_string()))?;
    let mut rows = vec![];
    for record in reader.records() {
        let record = record?;
        rows.push(record.get(idx).unwrap_or_default().to_string());
    }
    Ok(rows)
}

/// First worksheet, header in the first row.
fn read_spreadsheet(path: &Path, column: &str) -> Result<Vec<String>, LoadFailure> {
    let mut workbook = open_workbook_auto(path)?;
    let missing = || LoadFailure::MissingColumn(column.to_string());
    let range = workbook.worksheet_range_at(0).ok_or_else(missing)??;
    let mut rows = range.rows();
    let idx = rows
        .next()
        .and_then(|header| header.iter().position(|h| h.to_string().trim() == column))
        .ok_or_else(missing)?;
    Ok(rows
        .map(|row| row.get(idx).map(Data::to_string).unwrap_or_default())
        .collect())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonRow {
    Name(String),
    Record(serde_json::Map<String, Value>),
}

fn read_json(path: &Path, column: &str) -> Result<Vec<String>, LoadFailure> {
    let reader = BufReader::new(File::open(path)?);
    let rows: Vec<JsonRow> = serde_json::from_reader(reader)?;
    rows.into_iter()
        .map(|row| match row {
            JsonRow::Name(name) => Ok(name),
            JsonRow::Record(mut record) => match record.remove(column) {
                None => Err(LoadFailure::MissingColumn(column.to_string())),
                Some(Value::String(name)) => Ok(name),
                Some(Value::Null) => Ok(String::new()),
                Some(other) => Ok(other.to_string()),
            },
        })
        .collect()
}
