//! A mounted screen fragment
//!
//! A [`Session`] behaves like one list fragment on a portal page: it
//! subscribes to the view-state bus when mounted, re-derives its list on every
//! broadcast, and unsubscribes when dropped.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use fop_common::bus::{Delivery, Subscription, ViewMode, ViewState, ViewStateBus, ViewStatePatch};
use fop_common::classify::CategoryLabel;
use fop_common::config::PortalConfig;
use fop_common::pipeline::{Identity, ListPipeline};
use fop_common::resolve::records_from;
use fop_common::screens::{bulletins, reports, requests, review_queue, schedules, Screen};
use serde_json::Value;
use tracing::debug;

use crate::render::ScreenReport;

/// Read a record dump
///
/// Accepts a bare array or an object wrapping the array under `value`. Any
/// other shape yields no records.
pub fn load_records(path: &Path) -> fop_common::Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    let collection = match &value {
        Value::Object(map) => map.get("value"),
        other => Some(other),
    };
    Ok(records_from(collection).to_vec())
}

/// Filter controls as given on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewRequest {
    pub query: Option<String>,
    pub status: Option<String>,
    pub secondary: Option<String>,
    pub mine: bool,
}

impl ViewRequest {
    /// Patch carrying only the controls that were set
    pub fn to_patch(&self) -> ViewStatePatch {
        ViewStatePatch {
            query: self.query.clone(),
            status_filter: self.status.clone(),
            view_mode: self.mine.then_some(ViewMode::Mine),
            secondary_filter: self.secondary.clone(),
        }
    }
}

/// Derive `screen` over `records` with its preset tuned by `config`
pub fn derive_report(
    screen: Screen,
    records: &[Value],
    state: &ViewState,
    identity: Option<&Identity>,
    config: &PortalConfig,
) -> ScreenReport {
    match screen {
        Screen::Bulletins => report(screen, config, bulletins::pipeline(), records, state),
        Screen::Reports => report(screen, config, reports::pipeline(identity), records, state),
        Screen::Requests => report(screen, config, requests::pipeline(identity), records, state),
        Screen::ReviewQueue => {
            report(screen, config, review_queue::pipeline(identity), records, state)
        }
        Screen::Schedules => report(screen, config, schedules::pipeline(identity), records, state),
    }
}

fn report<L: CategoryLabel>(
    screen: Screen,
    config: &PortalConfig,
    preset: ListPipeline<L>,
    records: &[Value],
    state: &ViewState,
) -> ScreenReport {
    let pipeline = config.tune(screen, preset);
    ScreenReport::from_list(screen, &pipeline.derive(records, state))
}

struct Fragment {
    screen: Screen,
    records: Vec<Value>,
    identity: Option<Identity>,
    config: PortalConfig,
}

impl Fragment {
    fn render(&self, state: &ViewState) -> ScreenReport {
        derive_report(self.screen, &self.records, state, self.identity.as_ref(), &self.config)
    }
}

/// One screen mounted on a bus
pub struct Session {
    bus: Arc<ViewStateBus>,
    fragment: Arc<Fragment>,
    latest: Arc<Mutex<Option<ScreenReport>>>,
    subscription: Subscription,
}

impl Session {
    /// Subscribe a re-deriving fragment to `bus`
    pub fn mount(
        bus: Arc<ViewStateBus>,
        screen: Screen,
        records: Vec<Value>,
        identity: Option<Identity>,
        config: PortalConfig,
    ) -> Self {
        let fragment = Arc::new(Fragment {
            screen,
            records,
            identity,
            config,
        });
        let latest = Arc::new(Mutex::new(None));

        // Weak handle: the bus owns this callback, so a strong one would cycle
        let weak_bus: Weak<ViewStateBus> = Arc::downgrade(&bus);
        let on_change = {
            let fragment = Arc::clone(&fragment);
            let latest = Arc::clone(&latest);
            move |_notice: &fop_common::bus::BusNotice<'_>| {
                if let Some(bus) = weak_bus.upgrade() {
                    let report = fragment.render(&bus.read());
                    *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(report);
                }
            }
        };
        let subscription = bus.subscribe(on_change);
        debug!(screen = %screen, key = bus.key(), "Fragment mounted");

        Self {
            bus,
            fragment,
            latest,
            subscription,
        }
    }

    /// Write a patch to the bus; the fragment re-derives during the broadcast
    pub fn apply(&self, patch: &ViewStatePatch) -> Delivery {
        self.bus.write(patch)
    }

    /// Report produced by the most recent broadcast, if any
    pub fn latest(&self) -> Option<ScreenReport> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Derive from the bus's current state without a broadcast
    pub fn render_now(&self) -> ScreenReport {
        self.fragment.render(&self.bus.read())
    }

    /// Report after the latest broadcast, falling back to a direct render
    pub fn current(&self) -> ScreenReport {
        self.latest().unwrap_or_else(|| self.render_now())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscription);
        debug!(screen = %self.fragment.screen, "Fragment unmounted");
    }
}
