/*
Round orchestration for the aggregation-stage model.

Each round is one process/refill alternation: the working set tears down
every co-resident edge it can, then, if slots freed up, the cursor pulls
replacement vertices in from off-chip. The driver owns the store, tracks
the per-round counters, and decides between the two terminal outcomes.
*/

use log::info;
use serde::Serialize;

use crate::config::BufferConfig;
use crate::error::{Result, SimError};
use crate::graph::VertexStore;
use crate::sim::cursor::RefillCursor;
use crate::sim::metrics::{ceil_div, RoundMetrics, RunMetrics, RunReport};
use crate::sim::working_set::WorkingSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SimStatus {
    Running,
    /// Every adjacency list was consumed within the round budget.
    Converged { round: usize },
    /// The round budget ran out first; a reported outcome, not a fault.
    Exhausted,
}

#[derive(Debug)]
pub struct SimulationDriver {
    store: VertexStore,
    working_set: WorkingSet,
    cursor: RefillCursor,
    buffer: BufferConfig,
    max_rounds: usize,
    metrics: RunMetrics,
    status: SimStatus,
    rounds_completed: usize,
}

impl SimulationDriver {
    pub fn new(store: VertexStore, buffer: &BufferConfig, max_rounds: usize) -> Result<Self> {
        buffer.validate()?;
        if max_rounds == 0 {
            return Err(SimError::InvalidConfiguration(
                "max_rounds must be at least 1".into(),
            ));
        }
        if store.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "vertex store is empty".into(),
            ));
        }

        let mut store = store;
        let mut working_set = WorkingSet::with_capacity(buffer.buffer_cap);
        // a capacity beyond the store just means the whole graph fits
        let seed_count = buffer.buffer_cap.min(store.len());
        working_set.seed(&mut store, seed_count)?;
        let cursor = RefillCursor::new(buffer.buffer_cap, store.len());

        Ok(SimulationDriver {
            store,
            working_set,
            cursor,
            buffer: *buffer,
            max_rounds,
            metrics: RunMetrics::new(buffer.initial_fetch_cost),
            status: SimStatus::Running,
            rounds_completed: 0,
        })
    }

    pub fn store(&self) -> &VertexStore {
        &self.store
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working_set
    }

    pub fn cursor(&self) -> &RefillCursor {
        &self.cursor
    }

    pub fn status(&self) -> SimStatus {
        self.status
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// Run rounds until convergence or budget exhaustion and produce the
    /// final report.
    pub fn simulate(&mut self) -> Result<RunReport> {
        for round in 1..=self.max_rounds {
            let outcome = self.working_set.process(&mut self.store, self.buffer.gamma)?;
            let fetches = if outcome.evicted.is_empty() {
                0
            } else {
                self.cursor.refill(&mut self.store, &mut self.working_set)?
            };

            let record = RoundMetrics {
                round,
                edges_processed: outcome.edges_processed,
                cycles: ceil_div(outcome.edges_processed, self.buffer.lane_width),
                evictions: outcome.evicted.len() as u64,
                fetches,
            };
            info!(
                "round {}: {} edges, {} evictions, {} fetches",
                round, record.edges_processed, record.evictions, record.fetches
            );
            self.metrics.record_round(record);
            self.rounds_completed = round;

            if self.store.all_consumed() {
                info!("all vertices processed in round {}", round);
                self.status = SimStatus::Converged { round };
                break;
            }
        }

        if self.status == SimStatus::Running {
            info!(
                "completed {} rounds without processing all vertices",
                self.rounds_completed
            );
            self.status = SimStatus::Exhausted;
        }
        Ok(self.report())
    }

    fn report(&self) -> RunReport {
        let accesses = self.metrics.off_chip_accesses();
        RunReport {
            status: self.status,
            rounds_completed: self.rounds_completed,
            total_vertices: self.store.len(),
            processed_vertices: self.store.fully_processed_count(),
            total_edges_processed: self.metrics.total_edges_processed(),
            total_cycles: self.metrics.total_cycles(),
            total_evictions: self.metrics.total_evictions(),
            off_chip_accesses: accesses,
            off_chip_volume_mib: (accesses * self.buffer.word_size_bytes) as f64
                / (1024.0 * 1024.0),
            rounds: self.metrics.rounds().to_vec(),
        }
    }
}
