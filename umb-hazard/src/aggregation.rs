//! The all-or-wait join over per-district rainfall fetches.
//!
//! A snapshot is keyed by district id, never by arrival order, and only
//! reports `Complete` once every known district holds exactly one
//! measurement.

use crate::{
    district::{District, DistrictId},
    error::{HazardError, Result},
    measurement::{ClassifiedDistrict, RainfallMeasurement},
};
use serde::Serialize;
use std::collections::BTreeMap;

#[cfg(feature = "api")]
use crate::fetcher::{PrecipitationSource, RainfallFetcher};
#[cfg(feature = "api")]
use futures::future::join_all;
#[cfg(feature = "api")]
use log::{info, warn};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SnapshotStatus {
    Pending,
    Complete,
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct AggregationSnapshot {
    expected: Vec<DistrictId>,
    measurements: BTreeMap<DistrictId, RainfallMeasurement>,
}

impl AggregationSnapshot {
    /// Empty snapshot for the given districts, before any fetch resolves.
    pub fn pending<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<DistrictId>,
    {
        let mut expected: Vec<DistrictId> = ids.into_iter().map(Into::into).collect();
        expected.sort();
        expected.dedup();
        Self {
            expected,
            measurements: BTreeMap::new(),
        }
    }

    /// Complete exactly when every expected district has an entry, so a
    /// snapshot over no districts is complete from the start.
    pub fn status(&self) -> SnapshotStatus {
        if self.measurements.len() == self.expected.len() {
            SnapshotStatus::Complete
        } else {
            SnapshotStatus::Pending
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == SnapshotStatus::Complete
    }

    pub fn measurements(&self) -> &BTreeMap<DistrictId, RainfallMeasurement> {
        &self.measurements
    }

    pub fn get(&self, id: &str) -> Option<&RainfallMeasurement> {
        self.measurements.get(id)
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    pub fn missing(&self) -> usize {
        self.expected.len() - self.measurements.len()
    }

    pub fn live_count(&self) -> usize {
        self.measurements.values().filter(|m| !m.is_fallback()).count()
    }

    pub fn fallback_count(&self) -> usize {
        self.measurements.values().filter(|m| m.is_fallback()).count()
    }

    /// Store one district's result. Each district owns its own key, so a
    /// second write or a write for an unknown district is refused.
    pub fn record(&mut self, measurement: RainfallMeasurement) -> Result<()> {
        let id = &measurement.district_id;
        if self.expected.binary_search(id).is_err() {
            return Err(HazardError::UnknownDistrict(id.clone()));
        }
        if self.measurements.contains_key(id) {
            return Err(HazardError::DuplicateId(id.clone()));
        }
        self.measurements.insert(id.clone(), measurement);
        Ok(())
    }

    /// Join every district's measurement with its catalog entry, in the
    /// order `districts` is given. Refused while the snapshot is pending.
    pub fn classify(&self, districts: &[District]) -> Result<Vec<ClassifiedDistrict>> {
        if !self.is_complete() {
            return Err(HazardError::SnapshotPending {
                missing: self.missing(),
            });
        }
        districts
            .iter()
            .map(|district| {
                self.measurements
                    .get(&district.id)
                    .map(|m| ClassifiedDistrict::new(district.clone(), m.clone()))
                    .ok_or_else(|| HazardError::UnknownDistrict(district.id.clone()))
            })
            .collect()
    }
}

/// Fetch every district concurrently and wait for all of them.
///
/// Fetches are polled together on the current task, so none blocks another.
/// The returned snapshot is always complete: failures arrive as fallback
/// measurements and stalls are cut off by the fetcher's deadline.
#[cfg(feature = "api")]
pub async fn aggregate<S: PrecipitationSource>(
    fetcher: &RainfallFetcher<S>,
    districts: &[District],
) -> AggregationSnapshot {
    let mut snapshot = AggregationSnapshot::pending(districts.iter().map(|d| d.id.clone()));
    let results = join_all(districts.iter().map(|district| fetcher.fetch_rainfall(district))).await;
    for measurement in results {
        // Repeated catalog ids collapse onto the first result for that key.
        if let Err(e) = snapshot.record(measurement) {
            warn!("Dropping rainfall result: {}", e);
        }
    }
    info!(
        "Rainfall join complete: {} live, {} fallback",
        snapshot.live_count(),
        snapshot.fallback_count()
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Provenance;

    fn districts() -> Vec<District> {
        District::get_district_vector().unwrap()
    }

    #[test]
    fn test_pending_until_full_coverage() {
        let districts = districts();
        let mut snapshot = AggregationSnapshot::pending(districts.iter().map(|d| d.id.as_str()));
        for (n, district) in districts.iter().enumerate() {
            assert!(!snapshot.is_complete());
            assert_eq!(snapshot.missing(), districts.len() - n);
            snapshot
                .record(RainfallMeasurement::live(&district.id, 1.0, None))
                .unwrap();
        }
        assert!(snapshot.is_complete());
        assert_eq!(snapshot.len(), 5);
    }

    #[test]
    fn test_no_districts_is_complete() {
        let snapshot = AggregationSnapshot::pending(Vec::<String>::new());
        assert!(snapshot.is_complete());
        assert_eq!(snapshot.missing(), 0);
        assert!(snapshot.classify(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_record_rejects_foreign_and_repeat_keys() {
        let mut snapshot = AggregationSnapshot::pending(["chamoli", "uttarkashi"]);
        assert!(matches!(
            snapshot.record(RainfallMeasurement::live("haridwar", 1.0, None)),
            Err(HazardError::UnknownDistrict(_))
        ));
        snapshot
            .record(RainfallMeasurement::live("chamoli", 1.0, None))
            .unwrap();
        assert!(matches!(
            snapshot.record(RainfallMeasurement::live("chamoli", 9.0, None)),
            Err(HazardError::DuplicateId(_))
        ));
        assert_eq!(snapshot.get("chamoli").unwrap().millimeters_48hr, 1.0);
        assert_eq!(snapshot.status(), SnapshotStatus::Pending);
    }

    #[test]
    fn test_classify_refused_while_pending() {
        let districts = districts();
        let snapshot = AggregationSnapshot::pending(districts.iter().map(|d| d.id.as_str()));
        assert!(matches!(
            snapshot.classify(&districts),
            Err(HazardError::SnapshotPending { missing: 5 })
        ));
    }

    #[test]
    fn test_classify_keeps_catalog_order_and_provenance() {
        let districts = districts();
        let mut snapshot = AggregationSnapshot::pending(districts.iter().map(|d| d.id.as_str()));
        for district in districts.iter().rev() {
            let measurement = if district.id == "chamoli" {
                RainfallMeasurement::fallback(&district.id, &HazardError::BadStatus(500))
            } else {
                RainfallMeasurement::live(&district.id, 120.0, None)
            };
            snapshot.record(measurement).unwrap();
        }
        let classified = snapshot.classify(&districts).unwrap();
        let order: Vec<&str> = classified.iter().map(|c| c.district.id.as_str()).collect();
        let expected: Vec<&str> = districts.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(order, expected);
        let chamoli = classified.iter().find(|c| c.district.id == "chamoli").unwrap();
        assert_eq!(chamoli.measurement.provenance, Provenance::Fallback);
        assert_eq!(chamoli.risk, crate::risk::RiskTier::Low);
        assert_eq!(snapshot.live_count(), 4);
        assert_eq!(snapshot.fallback_count(), 1);
    }

    #[cfg(feature = "api")]
    mod join {
        use super::*;
        use crate::fetcher::testing::{Script, ScriptedSource};
        use crate::fetcher::{RainfallFetcher, DEFAULT_TIMEOUT};
        use std::time::Duration;

        fn scripted(delays: [u64; 5]) -> ScriptedSource {
            ScriptedSource::default()
                .with("uttarkashi", Script::Delayed(delays[0], vec![Some(0.0), Some(80.0), Some(40.0)]))
                .with("chamoli", Script::Status(503))
                .with("rudraprayag", Script::Delayed(delays[2], vec![Some(10.0), Some(40.0), Some(30.0)]))
                .with("tehri-garhwal", Script::Delayed(delays[3], vec![Some(1.0), Some(2.0), Some(3.0)]))
                .with("pithoragarh", Script::Delayed(delays[4], vec![Some(0.0), Some(60.0), Some(5.0)]))
        }

        #[tokio::test(start_paused = true)]
        async fn test_join_covers_every_district() {
            let districts = districts();
            let fetcher = RainfallFetcher::new(scripted([30, 0, 10, 20, 40]), DEFAULT_TIMEOUT);
            let snapshot = aggregate(&fetcher, &districts).await;
            assert!(snapshot.is_complete());
            assert_eq!(snapshot.len(), districts.len());
            assert_eq!(snapshot.get("uttarkashi").unwrap().millimeters_48hr, 120.0);
            assert_eq!(snapshot.get("rudraprayag").unwrap().millimeters_48hr, 70.0);
            assert_eq!(snapshot.get("pithoragarh").unwrap().millimeters_48hr, 65.0);
            assert!(snapshot.get("chamoli").unwrap().is_fallback());
        }

        #[tokio::test(start_paused = true)]
        async fn test_resolution_order_does_not_change_snapshot() {
            let districts = districts();
            let forward = RainfallFetcher::new(scripted([10, 0, 20, 30, 40]), DEFAULT_TIMEOUT);
            let reverse = RainfallFetcher::new(scripted([40, 0, 30, 20, 10]), DEFAULT_TIMEOUT);
            let a = aggregate(&forward, &districts).await;
            let b = aggregate(&reverse, &districts).await;
            assert_eq!(a, b);
        }

        #[tokio::test(start_paused = true)]
        async fn test_fetches_run_concurrently() {
            let districts = districts();
            let fetcher = RainfallFetcher::new(scripted([1000, 0, 1000, 1000, 1000]), DEFAULT_TIMEOUT);
            let started = tokio::time::Instant::now();
            let snapshot = aggregate(&fetcher, &districts).await;
            assert!(snapshot.is_complete());
            assert!(started.elapsed() < Duration::from_millis(2000));
        }

        #[tokio::test]
        async fn test_join_over_no_districts_completes() {
            let fetcher = RainfallFetcher::new(ScriptedSource::default(), DEFAULT_TIMEOUT);
            let snapshot = aggregate(&fetcher, &[]).await;
            assert!(snapshot.is_complete());
            assert!(snapshot.is_empty());
        }

        #[tokio::test(start_paused = true)]
        async fn test_stalled_district_does_not_hold_the_join() {
            let districts = districts();
            let source = scripted([0, 0, 0, 0, 0]).with("tehri-garhwal", Script::Stall);
            let fetcher = RainfallFetcher::new(source, Duration::from_secs(3));
            let snapshot = aggregate(&fetcher, &districts).await;
            assert!(snapshot.is_complete());
            assert!(snapshot.get("tehri-garhwal").unwrap().is_fallback());
            assert_eq!(snapshot.live_count(), 3);
        }
    }
}
