// ===============================
// src/metrics.rs
// ===============================
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

// Single custom registry (we register everything here)
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

// -------- Purchase outcomes --------
pub static PURCHASES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("ticket_purchases_total", "purchases that passed every check")
        .expect("valid metric: ticket_purchases_total")
});

pub static REJECTIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticket_purchase_rejections_total", "purchases refused before any collaborator call"),
        &["reason"],
    )
    .expect("valid metric: ticket_purchase_rejections_total")
});

pub static AMOUNT_CHARGED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("ticket_amount_charged_total", "sum of amounts sent to the payment service")
        .expect("valid metric: ticket_amount_charged_total")
});

pub static SEATS_RESERVED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("ticket_seats_reserved_total", "sum of seats sent to the reservation service")
        .expect("valid metric: ticket_seats_reserved_total")
});

// -------- Collaborators --------
pub static COLLABORATOR_CALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticket_collaborator_calls_total", "collaborator calls (labels: collaborator, outcome)"),
        &["collaborator", "outcome"],
    )
    .expect("valid metric: ticket_collaborator_calls_total")
});

// ---- Config visibility ----
pub static CONFIG_SETTLEMENT_MODE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("config_compensating_settlement", "1 if seat failures trigger a refund")
        .expect("valid metric: config_compensating_settlement")
});

pub fn init() {
    // Register all metrics to the custom registry; re-registration is ignored
    for m in [
        REGISTRY.register(Box::new(PURCHASES.clone())),
        REGISTRY.register(Box::new(REJECTIONS.clone())),
        REGISTRY.register(Box::new(AMOUNT_CHARGED.clone())),
        REGISTRY.register(Box::new(SEATS_RESERVED.clone())),
        REGISTRY.register(Box::new(COLLABORATOR_CALLS.clone())),
        REGISTRY.register(Box::new(CONFIG_SETTLEMENT_MODE.clone())),
    ] {
        let _ = m;
    }
}

/// Prometheus text exposition of everything in [`REGISTRY`].
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let families = REGISTRY.gather();
    let mut buf = Vec::new();
    if encoder.encode(&families, &mut buf).is_err() || buf.is_empty() {
        return "# no metrics\n".to_string();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_registered_families() {
        init();
        init();
        PURCHASES.inc();
        REJECTIONS.with_label_values(&["no_tickets"]).inc();
        let text = render();
        assert!(text.contains("ticket_purchases_total"));
        assert!(text.contains("ticket_purchase_rejections_total{reason=\"no_tickets\"}"));
    }
}
