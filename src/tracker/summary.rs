// src/tracker/summary.rs
// =============================================================================
// The end-of-run snapshot of the tracker's counters, plus the ways we show it:
// a structured log line, a terminal table, or JSON.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

/// Final counters for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
    pub cancelled: usize,
    /// Response code -> how many times it was seen
    pub codes: BTreeMap<u16, usize>,
}

impl Summary {
    pub fn is_consistent(&self) -> bool {
        self.total == self.ok + self.errors + self.cancelled
    }

    /// Emits the one "finished" log event for the run
    pub fn log(&self) {
        info!(
            total = self.total,
            ok = self.ok,
            errors = self.errors,
            cancelled = self.cancelled,
            codes = ?self.codes,
            "Probing finished"
        );
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        out.push_str("📊 Summary:\n");
        out.push_str(&format!("   ✅ OK: {}\n", self.ok));
        out.push_str(&format!("   ❌ Errors: {}\n", self.errors));
        out.push_str(&format!("   🛑 Cancelled: {}\n", self.cancelled));
        out.push_str(&format!("   📋 Total: {}\n", self.total));

        if !self.codes.is_empty() {
            out.push_str("\n   CODE  COUNT\n");
            for (code, count) in &self.codes {
                out.push_str(&format!("   {:<5} {}\n", code, count));
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
