//! Minimal metrics registry for the gateway.
//!
//! No external dependencies are used; counters and gauges are plain atomics
//! rendered in Prometheus text exposition format. The lifecycle gauges are
//! driven by the channel server's join/leave and create/close hooks.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

#[derive(Default)]
pub struct Counter(AtomicU64);

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} counter");
        let _ = writeln!(out, "{name} {}", self.get());
    }
}

#[derive(Default)]
pub struct Gauge(AtomicI64);

impl Gauge {
    /// Increment by 1.
    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrement by 1.
    pub fn dec(&self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Relaxed)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {name} gauge");
        let _ = writeln!(out, "{name} {}", self.get());
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    /// Completed WS upgrade handshakes.
    pub ws_upgrades: Counter,
    /// Peers currently attached across all channels.
    pub connections_active: Gauge,
    /// Channels currently open.
    pub channels_active: Gauge,
    /// Envelopes received from peers.
    pub channel_messages: Counter,
}

impl GatewayMetrics {
    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.ws_upgrades
            .render("paybridge_ws_upgrades_total", &mut out);
        self.connections_active
            .render("paybridge_channel_connections_active", &mut out);
        self.channels_active
            .render("paybridge_channels_active", &mut out);
        self.channel_messages
            .render("paybridge_channel_messages_total", &mut out);
        out
    }
}
