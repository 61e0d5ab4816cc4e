use serde::Serialize;

use crate::model::{ChainRow, OptionType, TableData};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GexStrike {
    pub strike: f64,
    pub gex: f64,
}

/// Dealer gamma exposure aggregated per strike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GexSummary {
    /// Per-strike exposure, strikes ascending.
    pub by_strike: Vec<GexStrike>,
    /// Strike with the largest absolute exposure.
    pub gamma_wall: f64,
    /// First strike at which exposure changes sign; equals `gamma_wall` when
    /// no sign change exists.
    pub gamma_flip: f64,
    pub total_gex: f64,
}

impl GexSummary {
    pub fn table(&self) -> TableData {
        let mut table = TableData::new(vec!["strike", "gex"]);
        for r in &self.by_strike {
            table.push_row(vec![r.strike.to_string(), r.gex.to_string()]);
        }
        table
    }
}

/// Signed gamma exposure: each row contributes -gamma x OI x 100, positive
/// for PUTs and negative for CALLs, summed per strike. An empty chain yields
/// an empty summary with zeroed wall/flip/total.
pub fn compute_gex(chain: &[ChainRow]) -> GexSummary {
    let mut by_strike: Vec<GexStrike> = Vec::new();
    for row in chain {
        let sign = match row.call_put {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        };
        let gex = -row.gamma * row.oi as f64 * 100.0 * sign;
        match by_strike.iter_mut().find(|s| s.strike == row.strike) {
            Some(s) => s.gex += gex,
            None => by_strike.push(GexStrike {
                strike: row.strike,
                gex,
            }),
        }
    }

    by_strike.sort_by(|a, b| {
        a.strike
            .partial_cmp(&b.strike)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_gex: f64 = by_strike.iter().map(|s| s.gex).sum();

    // Ties keep the lowest strike: only a strictly larger |gex| displaces
    // the current wall.
    let gamma_wall = by_strike
        .iter()
        .reduce(|best, s| if s.gex.abs() > best.gex.abs() { s } else { best })
        .map(|s| s.strike)
        .unwrap_or(0.0);

    let gamma_flip = by_strike
        .windows(2)
        .find(|w| sign_of(w[1].gex) != sign_of(w[0].gex))
        .map(|w| w[1].strike)
        .unwrap_or(gamma_wall);

    GexSummary {
        by_strike,
        gamma_wall,
        gamma_flip,
        total_gex,
    }
}

fn sign_of(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
