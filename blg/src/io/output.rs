use serde::{Deserialize, Serialize};

use gangnest::io::PageDescription;
use gangnest::io::ext_repr::{ExtJob, ExtReport};

use crate::config::BlgConfig;

/// Full output of a blg run: the job it solved, the configuration used,
/// the nest report and the exported page description.
#[derive(Serialize, Deserialize)]
pub struct BlgOutput {
    pub job: ExtJob,
    pub config: BlgConfig,
    pub report: ExtReport,
    pub page: PageDescription,
}
