use serde::{Deserialize, Serialize};

/// The fixed set of views a chat turn can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SetFilter,
    ExportCsv,
    Gex,
    Unusual,
    TopStrikes,
    CallPut,
    PriceFlow,
    FlowSummary,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SetFilter => "set_filter",
            Intent::ExportCsv => "export_csv",
            Intent::Gex => "gex",
            Intent::Unusual => "unusual",
            Intent::TopStrikes => "top_strikes",
            Intent::CallPut => "call_put",
            Intent::PriceFlow => "price_flow",
            Intent::FlowSummary => "flow_summary",
        }
    }

    pub fn parse(name: &str) -> Option<Intent> {
        match name {
            "set_filter" => Some(Intent::SetFilter),
            "export_csv" => Some(Intent::ExportCsv),
            "gex" => Some(Intent::Gex),
            "unusual" => Some(Intent::Unusual),
            "top_strikes" => Some(Intent::TopStrikes),
            "call_put" => Some(Intent::CallPut),
            "price_flow" => Some(Intent::PriceFlow),
            "flow_summary" => Some(Intent::FlowSummary),
            _ => None,
        }
    }
}

/// Keyword-priority classification: an ordered rule list over the lower-cased
/// message, first match wins. The order is load-bearing; "gamma csv export"
/// must hit the export rule before the gex rule.
pub fn classify(message: &str) -> Intent {
    let msg = message.to_lowercase();

    type Rule = (fn(&str) -> bool, Intent);
    let rules: &[Rule] = &[
        (
            |m| {
                m.starts_with("set ")
                    || m.contains("ticker=")
                    || m.contains("window=")
                    || m.contains("min_premium=")
            },
            Intent::SetFilter,
        ),
        (|m| m.contains("export") || m.contains("csv"), Intent::ExportCsv),
        (|m| m.contains("gex") || m.contains("gamma"), Intent::Gex),
        (|m| m.contains("unusual"), Intent::Unusual),
        (
            |m| m.contains("top strikes") || m.contains("strikes"),
            Intent::TopStrikes,
        ),
        (
            |m| m.contains("call vs put") || m.contains("call/put"),
            Intent::CallPut,
        ),
        (
            |m| m.contains("price") && m.contains("flow"),
            Intent::PriceFlow,
        ),
        (|m| m.contains("flow"), Intent::FlowSummary),
    ];

    for (predicate, intent) in rules {
        if predicate(&msg) {
            return *intent;
        }
    }
    Intent::FlowSummary
}
