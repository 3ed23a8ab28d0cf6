//! Collections of entity time series
//!
//! A [`SeriesStore`] holds every track (or every truth) for one evaluation
//! run, keyed by entity ID. It owns the observed time axis, including
//! timestamps contributed by heartbeat rows, and performs the truth-side
//! resampling requested by the engine.
//!
//! Input tables are whitespace-delimited text: `#` starts a comment line,
//! the first content line names the columns, and every data row carries one
//! scalar per column. The time column is `T` or `TIME`; an `ID` column is
//! required. Rows with a negative ID are heartbeats: they extend the time
//! axis but never become entities.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::EvalError;
use crate::series::entity::EntitySeries;

/// All entities of one category (tracks or truths) plus the category's
/// observed time axis.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    time_field: String,
    entities: BTreeMap<u32, EntitySeries>,
    timestamps: Vec<f64>,
}

impl SeriesStore {
    /// Build a store from already-constructed series, using the union of
    /// their time vectors as the axis.
    pub fn from_entities(entities: Vec<EntitySeries>) -> Self {
        let mut timestamps: Vec<f64> = entities
            .iter()
            .flat_map(|e| e.times().iter().copied())
            .collect();
        sort_dedup(&mut timestamps);
        Self {
            time_field: "T".to_string(),
            entities: entities.into_iter().map(|e| (e.id(), e)).collect(),
            timestamps,
        }
    }

    /// Parse a whitespace-delimited table.
    pub fn parse_table(text: &str) -> Result<Self, EvalError> {
        let mut header: Option<Header> = None;
        let mut entities: BTreeMap<u32, EntitySeries> = BTreeMap::new();
        let mut timestamps: Vec<f64> = Vec::new();

        for (line_idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_no = line_idx + 1;

            let header = match &header {
                Some(h) => h,
                None => {
                    header = Some(Header::parse(line)?);
                    continue;
                }
            };

            let cells = parse_row(line, header.names.len(), line_no)?;
            let time = cells[header.time_idx];
            if !time.is_finite() {
                return Err(EvalError::MalformedTable {
                    line: line_no,
                    reason: format!("non-finite time value {}", time),
                });
            }
            timestamps.push(time);

            let raw_id = cells[header.id_idx];
            if raw_id < 0.0 {
                // Heartbeat: contributes only its timestamp.
                continue;
            }
            let id = integral_id(raw_id, line_no)?;

            let values: Vec<(String, f64)> = header
                .names
                .iter()
                .enumerate()
                .filter(|(idx, _)| *idx != header.time_idx)
                .map(|(idx, name)| (name.clone(), cells[idx]))
                .collect();
            entities
                .entry(id)
                .or_insert_with(|| EntitySeries::new(id))
                .push_record(time, &values);
        }

        let header = header.ok_or_else(|| EvalError::MalformedTable {
            line: 0,
            reason: "no header line".to_string(),
        })?;
        sort_dedup(&mut timestamps);
        Ok(Self {
            time_field: header.names[header.time_idx].clone(),
            entities,
            timestamps,
        })
    }

    /// Read and parse a table file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EvalError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EvalError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse_table(&text)
    }

    /// Name of the time column as found in the source (`T` or `TIME`).
    #[inline]
    pub fn time_field(&self) -> &str {
        &self.time_field
    }

    /// Sorted, deduplicated timestamps across every row of the source,
    /// heartbeat rows included.
    #[inline]
    pub fn unique_timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    /// Number of entities (heartbeats excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store has no entities.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entities.keys().copied()
    }

    /// Look up one entity.
    pub fn entity(&self, id: u32) -> Option<&EntitySeries> {
        self.entities.get(&id)
    }

    /// Entities in ascending ID order.
    pub fn entities(&self) -> impl Iterator<Item = &EntitySeries> {
        self.entities.values()
    }

    /// Fail if any entity has more than one record at a single timestamp.
    pub fn ensure_unique_times(&self) -> Result<(), EvalError> {
        for entity in self.entities.values() {
            entity.ensure_unique_times()?;
        }
        Ok(())
    }

    /// Resample every entity onto `axis` in place; the store's own time
    /// axis becomes `axis` as well.
    pub fn resample_to_axis(&mut self, axis: &[f64]) {
        for entity in self.entities.values_mut() {
            entity.resample_to_axis(axis);
        }
        self.timestamps = axis.to_vec();
    }
}

struct Header {
    names: Vec<String>,
    time_idx: usize,
    id_idx: usize,
}

impl Header {
    fn parse(line: &str) -> Result<Self, EvalError> {
        let names: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        let time_idx = names
            .iter()
            .position(|n| n == "T")
            .or_else(|| names.iter().position(|n| n == "TIME"))
            .ok_or_else(|| EvalError::MissingTimeField {
                fields: names.clone(),
            })?;
        let id_idx = names
            .iter()
            .position(|n| n == "ID")
            .ok_or(EvalError::MissingIdField)?;
        Ok(Self {
            names,
            time_idx,
            id_idx,
        })
    }
}

fn parse_row(line: &str, expected: usize, line_no: usize) -> Result<Vec<f64>, EvalError> {
    let cells: Result<Vec<f64>, EvalError> = line
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| EvalError::MalformedTable {
                line: line_no,
                reason: format!("cannot parse {:?} as a number", token),
            })
        })
        .collect();
    let cells = cells?;
    if cells.len() != expected {
        return Err(EvalError::MalformedTable {
            line: line_no,
            reason: format!("expected {} columns, found {}", expected, cells.len()),
        });
    }
    Ok(cells)
}

fn integral_id(raw: f64, line_no: usize) -> Result<u32, EvalError> {
    if !raw.is_finite() || raw.fract() != 0.0 || raw > u32::MAX as f64 {
        return Err(EvalError::MalformedTable {
            line: line_no,
            reason: format!("ID {} is not a non-negative integer", raw),
        });
    }
    Ok(raw as u32)
}

fn sort_dedup(times: &mut Vec<f64>) {
    times.sort_by(f64::total_cmp);
    times.dedup();
}
