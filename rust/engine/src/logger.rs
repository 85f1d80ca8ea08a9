use serde::{Deserialize, Serialize};

use crate::cards::{Card, DeckCard};
use crate::engine::{ExchangeRecord, Seat};
use crate::events::{EndReason, SeatLabels};
use crate::roulette::RouletteOutcome;

/// How a round was settled.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Showdown tie, redealt without a draw
    Tie,
    /// Decisive showdown followed by the elimination draw
    Roulette { outcome: RouletteOutcome },
    /// A seat surrendered or disconnected mid-round
    Forfeit { loser: Seat, reason: EndReason },
}

/// Showdown information when both hands were ranked.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    /// `None` on a tie
    pub winner: Option<Seat>,
    pub labels: SeatLabels,
}

/// Complete record of one round, serialized to JSONL for round history.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Match identifier (format: YYYYMMDD-NNNNNN), shared by all rounds of a match
    #[serde(default)]
    pub match_id: Option<String>,
    pub round: u32,
    /// Seed of this round's deck shuffle
    pub deck_seed: u64,
    pub opener: Seat,
    pub board: [Card; 5],
    /// Final private hands, P1 then P2
    pub hands: [[DeckCard; 2]; 2],
    pub exchanges: Vec<ExchangeRecord>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
    pub outcome: RoundOutcome,
    /// Timestamp when the record was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

pub fn format_match_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_match_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_ids_are_sequential() {
        let mut logger = RoundLogger::with_seq_for_test("20261018");
        assert_eq!(logger.next_id(), "20261018-000001");
        assert_eq!(logger.next_id(), "20261018-000002");
    }

    #[test]
    fn outcome_is_tagged() {
        let json = serde_json::to_value(RoundOutcome::Tie).unwrap();
        assert_eq!(json["kind"], "tie");
    }
}
