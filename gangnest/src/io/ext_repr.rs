//! External (serializable) representations of jobs and nest results.
//!
//! Jobs reference artwork by id only; payload bytes never travel through
//! job files.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::entities::{Artwork, SheetConfig, SheetSession, WorkItem};
use crate::nesting::engine::NestReport;

/// A nesting job: sheet configuration plus the work queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtJob {
    pub sheet: SheetConfig,
    pub queue: Vec<ExtWorkItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtWorkItem {
    pub image_ref: u64,
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_qty")]
    pub qty: usize,
}

fn default_qty() -> usize {
    1
}

/// Serializable mirror of [`NestReport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtReport {
    pub placed: usize,
    pub unplaced: Vec<ExtUnplacedItem>,
    pub efficiency_pct: u32,
    pub wasted_pct: u32,
    pub sheet_length: f32,
    pub sheet_cost: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtUnplacedItem {
    pub image_ref: u64,
    pub width: f32,
    pub height: f32,
}

/// Imports a job into a fresh session, validating every queue entry.
pub fn import_job(job: &ExtJob) -> Result<SheetSession> {
    let mut session = SheetSession::new(job.sheet);
    for ext_item in &job.queue {
        session.add_to_queue(WorkItem {
            artwork: Artwork::by_ref(ext_item.image_ref),
            width: ext_item.width,
            height: ext_item.height,
            qty: ext_item.qty,
        })?;
    }
    Ok(session)
}

/// Exports a nest report out of the library.
pub fn export_report(report: &NestReport) -> ExtReport {
    ExtReport {
        placed: report.placed,
        unplaced: report
            .unplaced
            .iter()
            .map(|u| ExtUnplacedItem {
                image_ref: u.artwork_id,
                width: u.width,
                height: u.height,
            })
            .collect(),
        efficiency_pct: report.efficiency_pct,
        wasted_pct: report.wasted_pct,
        sheet_length: report.sheet_length,
        sheet_cost: report.sheet_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::SheetLength;

    #[test]
    fn job_roundtrips_through_json() {
        let job = ExtJob {
            sheet: SheetConfig::default(),
            queue: vec![ExtWorkItem {
                image_ref: 3,
                width: 4.0,
                height: 6.0,
                qty: 2,
            }],
        };

        let json = serde_json::to_string(&job).unwrap();
        let parsed: ExtJob = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.queue[0].image_ref, 3);
        assert_eq!(parsed.sheet, job.sheet);
    }

    #[test]
    fn length_accepts_auto_and_fixed() {
        let auto: SheetLength = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(auto, SheetLength::Auto);

        let fixed: SheetLength = serde_json::from_str("{\"fixed\": 24.0}").unwrap();
        assert_eq!(fixed, SheetLength::Fixed(24.0));
    }

    #[test]
    fn import_rejects_invalid_dimensions() {
        let job = ExtJob {
            sheet: SheetConfig::default(),
            queue: vec![ExtWorkItem {
                image_ref: 0,
                width: -1.0,
                height: 6.0,
                qty: 1,
            }],
        };
        assert!(import_job(&job).is_err());
    }

    #[test]
    fn import_builds_a_ready_session() {
        let job = ExtJob {
            sheet: SheetConfig::default(),
            queue: vec![
                ExtWorkItem {
                    image_ref: 1,
                    width: 4.0,
                    height: 6.0,
                    qty: 2,
                },
                ExtWorkItem {
                    image_ref: 2,
                    width: 3.0,
                    height: 3.0,
                    qty: 1,
                },
            ],
        };

        let session = import_job(&job).unwrap();
        assert_eq!(session.total_queued(), 3);
        assert_eq!(session.queue[0].artwork.id, 1);
    }
}
