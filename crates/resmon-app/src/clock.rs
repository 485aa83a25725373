//! Wall-clock adapters.

use chrono::Utc;
use resmon_cluster::WallClock;

/// Clock backed by the system real-time clock.
pub struct SystemClock;

impl WallClock for SystemClock {
    fn unix_time(&self) -> Option<u32> {
        // Pre-epoch or post-2106 times do not fit the attribute; treat them
        // as "no trustworthy wall clock".
        u32::try_from(Utc::now().timestamp()).ok()
    }
}

/// Clock for hosts without trustworthy wall-clock time.
pub struct NoWallClock;

impl WallClock for NoWallClock {
    fn unix_time(&self) -> Option<u32> {
        None
    }
}
