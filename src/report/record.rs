//! Timed two-phase solve and CSV records.

use std::io::Write;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;

use crate::error::Result;
use crate::greedy::{GreedyConstructor, GreedyResult};
use crate::instance::{Amount, Instance};
use crate::sa::{SaConfig, SaResult, SaRunner};

/// One result row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceReport<V = i64> {
    pub instance: String,
    pub greedy_profit: V,
    pub sa_profit: V,
    pub greedy_ms: u64,
    pub sa_ms: u64,
    pub total_ms: u64,
}

/// Both phase results alongside the report row built from them.
#[derive(Debug, Clone)]
pub struct SolveOutcome<V = i64> {
    pub report: InstanceReport<V>,
    pub greedy: GreedyResult<V>,
    pub annealing: SaResult<V>,
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Runs the greedy constructor and then the annealing engine on one
/// instance, timing each phase.
pub fn solve_instance<V: Amount, R: Rng>(
    name: impl Into<String>,
    instance: &Instance<V>,
    config: &SaConfig,
    rng: &mut R,
) -> Result<SolveOutcome<V>> {
    let started = Instant::now();
    let greedy = GreedyConstructor::construct(instance);
    let greedy_ms = millis(started.elapsed());

    let started = Instant::now();
    let annealing = SaRunner::run(instance, config, rng)?;
    let sa_ms = millis(started.elapsed());

    let report = InstanceReport {
        instance: name.into(),
        greedy_profit: greedy.profit,
        sa_profit: annealing.best_profit,
        greedy_ms,
        sa_ms,
        total_ms: greedy_ms.saturating_add(sa_ms),
    };
    Ok(SolveOutcome {
        report,
        greedy,
        annealing,
    })
}

/// CSV sink for [`InstanceReport`] rows.
pub struct ReportWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    /// Writes a header row before the first record when `header` is set.
    pub fn new(writer: W, header: bool) -> Self {
        let inner = csv::WriterBuilder::new()
            .has_headers(header)
            .from_writer(writer);
        Self { inner }
    }

    pub fn write<V: Amount>(&mut self, report: &InstanceReport<V>) -> Result<()> {
        self.inner.serialize(report)?;
        Ok(())
    }

    /// Flushes buffered rows; call after each row for incremental output.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_solve_scenario() {
        let instance = Instance::new([(60i64, 10), (100, 20), (120, 30)], 50).unwrap();
        let outcome =
            solve_instance("scenario", &instance, &SaConfig::default(), &mut create_rng(42))
                .unwrap();
        assert_eq!(outcome.report.instance, "scenario");
        assert_eq!(outcome.report.greedy_profit, 160);
        assert_eq!(outcome.report.sa_profit, 220);
        assert_eq!(
            outcome.report.total_ms,
            outcome.report.greedy_ms + outcome.report.sa_ms
        );
        assert_eq!(outcome.annealing.best_profit, 220);
    }

    #[test]
    fn test_csv_header_and_row_order() {
        let mut writer = ReportWriter::new(Vec::new(), true);
        writer
            .write(&InstanceReport::<i64> {
                instance: "a/test.in".into(),
                greedy_profit: 160,
                sa_profit: 220,
                greedy_ms: 0,
                sa_ms: 12,
                total_ms: 12,
            })
            .unwrap();
        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "instance,greedy_profit,sa_profit,greedy_ms,sa_ms,total_ms\na/test.in,160,220,0,12,12\n"
        );
    }

    #[test]
    fn test_csv_without_header() {
        let mut writer = ReportWriter::new(Vec::new(), false);
        writer
            .write(&InstanceReport::<u32> {
                instance: "x".into(),
                greedy_profit: 1,
                sa_profit: 2,
                greedy_ms: 3,
                sa_ms: 4,
                total_ms: 7,
            })
            .unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "x,1,2,3,4,7\n");
    }
}
