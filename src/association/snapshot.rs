//! Per-timestep entity snapshots

use nalgebra::DVector;

use crate::errors::EvalError;
use crate::series::SeriesStore;

/// The entities of one category that are valid at one timestamp, with
/// their position vectors.
///
/// An entity is valid when it has exactly one record at the timestamp and
/// every configured position field is present in that record. Zero records
/// means absent; more than one is a data integrity error surfaced by
/// [`Snapshot::at`].
#[derive(Debug, Clone)]
pub struct Snapshot {
    ids: Vec<u32>,
    positions: Vec<DVector<f64>>,
}

impl Snapshot {
    /// Extract the valid entities of `store` at `time`.
    ///
    /// Entities appear in ascending ID order, which fixes the row/column
    /// order of the cost matrix built from the snapshot.
    pub fn at(
        store: &SeriesStore,
        time: f64,
        position_fields: &[String],
    ) -> Result<Self, EvalError> {
        let mut ids = Vec::new();
        let mut positions = Vec::new();

        for entity in store.entities() {
            let record = match entity.record_at(time)? {
                Some(record) => record,
                None => continue,
            };
            let coords: Option<Vec<f64>> = position_fields
                .iter()
                .map(|field| record.value(field))
                .collect();
            if let Some(coords) = coords {
                ids.push(entity.id());
                positions.push(DVector::from_vec(coords));
            }
        }

        Ok(Self { ids, positions })
    }

    /// Number of valid entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no entity is valid at this timestamp.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// IDs of the valid entities, in snapshot order.
    #[inline]
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    /// ID of the entity at `index`.
    #[inline]
    pub fn id(&self, index: usize) -> u32 {
        self.ids[index]
    }

    /// Position vector of the entity at `index`.
    #[inline]
    pub fn position(&self, index: usize) -> &DVector<f64> {
        &self.positions[index]
    }
}
