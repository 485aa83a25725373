//! Demo host: an air purifier and a printer exposing five resource
//! monitoring clusters through an in-process dispatcher. Simulates resource
//! wear, then resets every monitor through the command path.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use resmon_cluster::{
    attributes, commands, AttributeValue, ChangeIndication, CommandPath, DegradationDirection,
    Feature,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use resmon_app::clock::SystemClock;
use resmon_app::device::{build_device, MONITOR_PATHS};
use resmon_app::dispatch::Dispatcher;
use resmon_app::persistence::FilePersistence;

#[derive(Parser)]
#[command(name = "resmon-app")]
#[command(about = "Resource monitoring demo device", long_about = None)]
#[command(version)]
struct Cli {
    /// File the attribute store persists to
    #[arg(long, default_value = "resmon-attributes.json")]
    store: PathBuf,

    /// Wear ticks to simulate before resetting the monitors
    #[arg(long, default_value_t = 6)]
    wear_ticks: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    info!("resource monitoring demo v{} starting", env!("CARGO_PKG_VERSION"));

    let store = FilePersistence::open(&cli.store);
    let mut device = build_device(store, || Box::new(SystemClock))?;

    for tick in 1..=cli.wear_ticks {
        apply_wear(&mut device);
        info!("wear tick {tick}/{} applied", cli.wear_ticks);
    }
    log_conditions(&device);

    for (endpoint, cluster) in MONITOR_PATHS {
        let path = CommandPath {
            endpoint,
            cluster,
            command: commands::RESET_CONDITION,
        };
        let status = device.invoke(path, &[]);
        info!("ResetCondition on {endpoint}/{cluster:#06x}: {status:?}");
    }
    log_conditions(&device);

    Ok(())
}

/// One tick of simulated wear on every monitor, with the coarse indication
/// tracking how close the resource is to exhaustion.
fn apply_wear(device: &mut Dispatcher) {
    for (endpoint, cluster) in MONITOR_PATHS {
        let Some(instance) = device.instance_mut(endpoint, cluster) else {
            continue;
        };
        let worn = match instance.degradation_direction() {
            DegradationDirection::Down => instance.condition().saturating_sub(9),
            DegradationDirection::Up => (instance.condition() + 9).min(100),
            DegradationDirection::Unknown => instance.condition(),
        };
        instance.update_condition(worn);

        let exhausted = match instance.degradation_direction() {
            DegradationDirection::Down => worn <= 10,
            DegradationDirection::Up => worn >= 90,
            DegradationDirection::Unknown => false,
        };
        let worrying = match instance.degradation_direction() {
            DegradationDirection::Down => worn <= 40,
            DegradationDirection::Up => worn >= 60,
            DegradationDirection::Unknown => false,
        };
        let indication = if exhausted {
            ChangeIndication::Critical
        } else if worrying && instance.has_feature(Feature::Warning) {
            ChangeIndication::Warning
        } else {
            ChangeIndication::Ok
        };
        instance.update_change_indication(indication);
    }
}

fn log_conditions(device: &Dispatcher) {
    for (endpoint, cluster) in MONITOR_PATHS {
        let condition = device.read(endpoint, cluster, attributes::CONDITION);
        let indication = device.read(endpoint, cluster, attributes::CHANGE_INDICATION);
        let last_changed = device.read(endpoint, cluster, attributes::LAST_CHANGED_TIME);
        if let (
            Some(AttributeValue::Percent(condition)),
            Some(AttributeValue::ChangeIndication(indication)),
        ) = (condition, indication)
        {
            let last_changed = match last_changed {
                Some(AttributeValue::NullableEpochSeconds(Some(time))) => time.to_string(),
                _ => "null".to_string(),
            };
            info!(
                "{endpoint}/{cluster:#06x}: condition {condition}%, \
                 indication {indication:?}, last changed {last_changed}"
            );
        }
    }
}
