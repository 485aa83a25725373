//! Identifiers, enums and value types shared by every resource monitoring
//! cluster variant.

use serde::{Deserialize, Serialize};

pub type EndpointId = u16;
pub type ClusterId = u32;
pub type AttributeId = u32;
pub type CommandId = u32;

/// Revision of the cluster definition implemented by this crate.
pub const CLUSTER_REVISION: u16 = 1;

/// The fixed set of cluster ids recognized as resource monitoring variants.
///
/// Read-only for the lifetime of the process. An [`crate::Instance`] built
/// with a cluster id outside this set is a configuration bug and fails its
/// init-time precondition check.
pub const ALIASED_CLUSTERS: [ClusterId; 12] = [
    clusters::HEPA_FILTER_MONITORING,
    clusters::ACTIVATED_CARBON_FILTER_MONITORING,
    clusters::CERAMIC_FILTER_MONITORING,
    clusters::ELECTROSTATIC_FILTER_MONITORING,
    clusters::UV_FILTER_MONITORING,
    clusters::IONIZING_FILTER_MONITORING,
    clusters::ZEOLITE_FILTER_MONITORING,
    clusters::OZONE_FILTER_MONITORING,
    clusters::WATER_TANK_MONITORING,
    clusters::FUEL_TANK_MONITORING,
    clusters::INK_CARTRIDGE_MONITORING,
    clusters::TONER_CARTRIDGE_MONITORING,
];

/// True if `cluster` is one of the recognized resource monitoring variants.
pub fn is_valid_alias_cluster(cluster: ClusterId) -> bool {
    ALIASED_CLUSTERS.contains(&cluster)
}

/// Cluster ids of the aliased resource monitoring clusters.
pub mod clusters {
    use super::ClusterId;

    pub const HEPA_FILTER_MONITORING: ClusterId = 0x0071;
    pub const ACTIVATED_CARBON_FILTER_MONITORING: ClusterId = 0x0072;
    pub const CERAMIC_FILTER_MONITORING: ClusterId = 0x0073;
    pub const ELECTROSTATIC_FILTER_MONITORING: ClusterId = 0x0074;
    pub const UV_FILTER_MONITORING: ClusterId = 0x0075;
    pub const IONIZING_FILTER_MONITORING: ClusterId = 0x0076;
    pub const ZEOLITE_FILTER_MONITORING: ClusterId = 0x0077;
    pub const OZONE_FILTER_MONITORING: ClusterId = 0x0078;
    pub const WATER_TANK_MONITORING: ClusterId = 0x0079;
    pub const FUEL_TANK_MONITORING: ClusterId = 0x007A;
    pub const INK_CARTRIDGE_MONITORING: ClusterId = 0x007B;
    pub const TONER_CARTRIDGE_MONITORING: ClusterId = 0x007C;
}

/// Attribute ids of the cluster, business attributes first, then the
/// protocol-standard globals.
pub mod attributes {
    use super::AttributeId;

    pub const CONDITION: AttributeId = 0x0000;
    pub const DEGRADATION_DIRECTION: AttributeId = 0x0001;
    pub const CHANGE_INDICATION: AttributeId = 0x0002;
    pub const IN_PLACE_INDICATOR: AttributeId = 0x0003;
    pub const LAST_CHANGED_TIME: AttributeId = 0x0004;

    pub const GENERATED_COMMAND_LIST: AttributeId = 0xFFF8;
    pub const ACCEPTED_COMMAND_LIST: AttributeId = 0xFFF9;
    pub const ATTRIBUTE_LIST: AttributeId = 0xFFFB;
    pub const FEATURE_MAP: AttributeId = 0xFFFC;
    pub const CLUSTER_REVISION: AttributeId = 0xFFFD;
}

/// Command ids accepted by the cluster.
pub mod commands {
    use super::CommandId;

    pub const RESET_CONDITION: CommandId = 0x0000;
}

/// Coarse severity signal, independent of the numeric condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeIndication {
    Ok,
    Warning,
    Critical,
    /// Catch-all for raw values outside the defined range. Never transmitted.
    Unknown,
}

impl ChangeIndication {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => ChangeIndication::Ok,
            1 => ChangeIndication::Warning,
            2 => ChangeIndication::Critical,
            _ => ChangeIndication::Unknown,
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            ChangeIndication::Ok => 0,
            ChangeIndication::Warning => 1,
            ChangeIndication::Critical => 2,
            ChangeIndication::Unknown => 3,
        }
    }
}

/// Whether the condition value trends toward 0 or 100 as the physical
/// resource wears out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegradationDirection {
    Up,
    Down,
    /// Catch-all for raw values outside the defined range. Never transmitted.
    Unknown,
}

impl DegradationDirection {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0 => DegradationDirection::Up,
            1 => DegradationDirection::Down,
            _ => DegradationDirection::Unknown,
        }
    }

    pub fn raw(self) -> u8 {
        match self {
            DegradationDirection::Up => 0,
            DegradationDirection::Down => 1,
            DegradationDirection::Unknown => 2,
        }
    }
}

/// Optional capabilities of a cluster instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Feature {
    /// Numeric condition reporting is supported.
    Condition = 0x01,
    /// The Warning change indication is supported.
    Warning = 0x02,
}

/// Per-instance bitmap of enabled [`Feature`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMap(u32);

impl FeatureMap {
    pub const NONE: FeatureMap = FeatureMap(0);

    pub fn new(bits: u32) -> Self {
        FeatureMap(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn with(self, feature: Feature) -> Self {
        FeatureMap(self.0 | feature as u32)
    }

    pub fn has(self, feature: Feature) -> bool {
        self.0 & feature as u32 != 0
    }
}

/// Address of one attribute on one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributePath {
    pub endpoint: EndpointId,
    pub cluster: ClusterId,
    pub attribute: AttributeId,
}

/// Address of one command on one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandPath {
    pub endpoint: EndpointId,
    pub cluster: ClusterId,
    pub command: CommandId,
}

/// Typed value produced by an attribute read.
///
/// Wire encoding is the dispatcher's concern; the cluster only hands back
/// the typed field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Condition percentage in [0, 100].
    Percent(u8),
    DegradationDirection(DegradationDirection),
    ChangeIndication(ChangeIndication),
    Boolean(bool),
    /// Nullable Unix timestamp, seconds.
    NullableEpochSeconds(Option<u32>),
    Bitmap32(u32),
    Revision(u16),
    CommandList(Vec<CommandId>),
    AttributeList(Vec<AttributeId>),
}

/// Result statuses returned across the attribute and command boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    InvalidCommand,
    InvalidValue,
    InvalidDataType,
    UnsupportedAttribute,
    UnsupportedWrite,
    UnsupportedCommand,
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}
