//! Per-entity time-indexed records

use std::collections::BTreeMap;

use crate::errors::EvalError;
use crate::series::interp::resample_linear;

/// The field values of one entity at one timestamp.
///
/// A `None` value means the field is missing at that time (typically
/// because truth was resampled beyond its original span), and is never
/// conflated with zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Option<f64>>,
}

impl Record {
    /// Value of a field, flattened: `None` if the field is absent from the
    /// series or missing at this timestamp.
    pub fn value(&self, field: &str) -> Option<f64> {
        self.fields.get(field).copied().flatten()
    }

    /// Field names carried by this record.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// One entity's time series: an ordered time vector plus named scalar
/// fields, each parallel to the time vector.
#[derive(Debug, Clone)]
pub struct EntitySeries {
    id: u32,
    times: Vec<f64>,
    fields: BTreeMap<String, Vec<Option<f64>>>,
}

impl EntitySeries {
    /// Create an empty series for an entity.
    pub fn new(id: u32) -> Self {
        Self {
            id,
            times: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Entity ID.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether the series has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Time vector.
    #[inline]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// One field's value vector, parallel to [`times`](Self::times).
    pub fn field(&self, name: &str) -> Option<&[Option<f64>]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Append one record. Every field of the series must be supplied on
    /// every push; new fields may only appear on the first push.
    pub(crate) fn push_record(&mut self, time: f64, values: &[(String, f64)]) {
        if self.times.is_empty() {
            for (name, _) in values {
                self.fields.insert(name.clone(), Vec::new());
            }
        }
        self.times.push(time);
        for (name, value) in values {
            if let Some(column) = self.fields.get_mut(name) {
                column.push(Some(*value));
            }
        }
    }

    /// The record at `time`, if the entity has exactly one.
    ///
    /// Zero matches is simply "absent at this time". More than one match is
    /// a data integrity error: assignment at that timestep would be
    /// ambiguous, so the run must abort.
    pub fn record_at(&self, time: f64) -> Result<Option<Record>, EvalError> {
        let mut found: Option<usize> = None;
        for (idx, &t) in self.times.iter().enumerate() {
            if t == time {
                if found.is_some() {
                    return Err(EvalError::DuplicateTimestamp { id: self.id, time });
                }
                found = Some(idx);
            }
        }
        Ok(found.map(|idx| Record {
            fields: self
                .fields
                .iter()
                .map(|(name, column)| (name.clone(), column[idx]))
                .collect(),
        }))
    }

    /// Fail if any timestamp occurs more than once in this series.
    pub fn ensure_unique_times(&self) -> Result<(), EvalError> {
        let mut sorted = self.times.clone();
        sorted.sort_by(f64::total_cmp);
        for pair in sorted.windows(2) {
            if pair[0] == pair[1] {
                return Err(EvalError::DuplicateTimestamp {
                    id: self.id,
                    time: pair[0],
                });
            }
        }
        Ok(())
    }

    /// Resample every field onto `axis` with linear interpolation, then
    /// make `axis` the new time vector. Axis points outside a field's
    /// original support become missing. Missing source values are not
    /// support points.
    pub fn resample_to_axis(&mut self, axis: &[f64]) {
        for column in self.fields.values_mut() {
            let mut sample_times = Vec::with_capacity(column.len());
            let mut sample_values = Vec::with_capacity(column.len());
            for (&t, v) in self.times.iter().zip(column.iter()) {
                if let Some(v) = v {
                    sample_times.push(t);
                    sample_values.push(*v);
                }
            }
            *column = resample_linear(&sample_times, &sample_values, axis);
        }
        self.times = axis.to_vec();
    }
}
