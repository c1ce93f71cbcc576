// ===============================
// src/config.rs
// ===============================
/*
=============================================================================
Project : ticket_service — ticket purchase validation & pricing in Rust
Module  : config.rs
Version : 0.1.0
Author  : Kukuh Tripamungkas Wicaksono (Kukuh TW)
License : MIT (see LICENSE)

Summary : Validates a ticket purchase (account, counts, adult/child/infant
          rules), prices it, then calls the payment and seat reservation
          services in that order. Logs with tracing and counts outcomes
          in Prometheus metrics.

(c) 2025 Kukuh TW. All rights reserved where applicable.
=============================================================================
*/
use std::env;

use clap::Parser;
use dotenvy::dotenv;
use thiserror::Error;

use crate::domain::TicketTypeRequest;
use crate::rules::InvalidPurchase;

/// Apa yang terjadi jika reservasi kursi gagal setelah pembayaran sukses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SettlementMode {
    /// Payment stays taken; the seat error is returned as-is.
    #[default]
    FireAndForget,
    /// Payment is refunded once before the seat error is returned.
    Compensating,
}

impl SettlementMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire_and_forget" | "fireandforget" | "none" => Some(SettlementMode::FireAndForget),
            "compensating" | "refund" => Some(SettlementMode::Compensating),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementMode::FireAndForget => "fire_and_forget",
            SettlementMode::Compensating => "compensating",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Ticket(#[from] InvalidPurchase),
    #[error("invalid --json ticket list: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    /// Same tags as [`InvalidPurchase::code`]; a broken JSON list is a malformed request.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Ticket(e) => e.code(),
            ConfigError::Json(_) => "malformed_request",
        }
    }
}

/// Command line: `ticket_service --account 2 ADULT=2 CHILD=1 INFANT=1`
#[derive(Parser, Clone, Debug)]
#[command(name = "ticket_service", about = "Validate, price and book one ticket purchase")]
pub struct Cli {
    /// Account id (integer > 0). Kept as text so bad input reports a purchase error.
    #[arg(short, long, allow_hyphen_values = true)]
    pub account: String,

    /// Ticket requests as TYPE=COUNT (ADULT, CHILD, INFANT)
    #[arg(value_name = "TYPE=COUNT")]
    pub tickets: Vec<String>,

    /// Ticket requests as JSON, e.g. '[{"type":"ADULT","count":2}]'
    #[arg(long)]
    pub json: Option<String>,

    /// Print Prometheus metrics after the run
    #[arg(long)]
    pub print_metrics: bool,
}

impl Cli {
    /// Positional requests first, then the JSON list, order preserved.
    pub fn ticket_requests(&self) -> Result<Vec<TicketTypeRequest>, ConfigError> {
        let mut out = self
            .tickets
            .iter()
            .map(|t| t.parse::<TicketTypeRequest>())
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(raw) = &self.json {
            let extra: Vec<TicketTypeRequest> = serde_json::from_str(raw)?;
            out.extend(extra);
        }
        Ok(out)
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub log_level: String,
    pub settlement: SettlementMode,

    // mock collaborators (binary only)
    pub mock_payment_fail: Option<String>,
    pub mock_seat_fail: Option<String>,
    pub mock_refund_fail: Option<String>,

    pub print_metrics: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let log_level = non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let settlement = non_empty("SETTLEMENT_MODE")
            .and_then(|s| SettlementMode::parse(&s))
            .unwrap_or_default();
        let print_metrics = non_empty("PRINT_METRICS")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            log_level,
            settlement,
            mock_payment_fail: non_empty("MOCK_PAYMENT_FAIL"),
            mock_seat_fail: non_empty("MOCK_SEAT_FAIL"),
            mock_refund_fail: non_empty("MOCK_REFUND_FAIL"),
            print_metrics,
        }
    }
}

pub fn load() -> (Cli, Settings) {
    // Pastikan .env dibaca sebelum env var lain
    let _ = dotenv();

    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    settings.print_metrics |= cli.print_metrics;
    (cli, settings)
}
