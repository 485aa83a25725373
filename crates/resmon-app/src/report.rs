//! Change-report sink for the demo host.

use resmon_cluster::{AttributeChangeListener, AttributePath};
use tracing::info;

/// Logs every attribute change a cluster reports. A production host would
/// feed its subscription/reporting machinery here instead.
#[derive(Default)]
pub struct LogReporter {
    pub reported: usize,
}

impl AttributeChangeListener for LogReporter {
    fn attribute_changed(&mut self, path: AttributePath) {
        self.reported += 1;
        info!(
            endpoint = path.endpoint,
            cluster = format_args!("{:#06x}", path.cluster),
            attribute = format_args!("{:#06x}", path.attribute),
            "attribute changed"
        );
    }
}
