//! Convergence Loop
//!
//! The polling core: measure every pending probe against the baseline
//! box, prune the ones that diverged, and stop once everything converged
//! or the try budget runs out.

use crate::clock::Clock;
use crate::env::RenderEnv;
use crate::registry::FontRegistry;
use fontwatch_core::ProbeBox;
use std::time::Duration;

/// Where a registry's check cycle currently stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CheckState {
    /// No check started yet
    #[default]
    Idle,
    /// Comparison passes in progress
    Polling,
    /// Callback fired; a later `check` re-enters `Polling`
    Done,
}

/// Timing parameters for one `check` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Overall budget before giving up on unconverged fonts
    pub timeout: Duration,
    /// Pause between comparison passes
    pub period: Duration,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(1000),
            period: Duration::from_millis(25),
        }
    }
}

impl CheckOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }
}

impl<E: RenderEnv> FontRegistry<E> {
    /// Poll until every registered font converged or the budget runs out,
    /// then invoke `callback` exactly once.
    ///
    /// Runs one pass immediately, then at most `floor(timeout / period)`
    /// further passes separated by `period` sleeps. A timeout is not an
    /// error: the callback fires either way, and callers distinguish the
    /// two by inspecting [`pending`](FontRegistry::pending) and
    /// [`settled`](FontRegistry::settled).
    pub fn check<C: Clock>(&mut self, clock: &C, options: CheckOptions, callback: impl FnOnce()) {
        let start = clock.now();

        // Nothing registered: complete without a timer or a baseline read.
        if self.pending.is_empty() {
            self.state = CheckState::Done;
            callback();
            return;
        }

        let baseline = self.baseline_box();
        let period = options.period.max(Duration::from_millis(1));
        let max_tries = (options.timeout.as_millis() / period.as_millis()) as u64;
        let mut tries = max_tries;

        self.state = CheckState::Polling;
        loop {
            if self.single_pass(baseline) {
                break;
            }
            if tries == 0 {
                break;
            }
            tries -= 1;
            clock.sleep(period);
        }

        self.release_settled_probes();
        self.state = CheckState::Done;
        tracing::debug!(
            "Font check finished in {}ms ({} settled, {} pending)",
            (clock.now() - start).as_millis(),
            self.settled.len(),
            self.pending.len(),
        );
        callback();
    }

    /// Baseline box from the fallback probe, measured once per registry
    /// lifetime and reused across `check` calls.
    fn baseline_box(&mut self) -> ProbeBox {
        if let Some(baseline) = self.baseline_box {
            return baseline;
        }
        let baseline = self.env.measure(self.baseline_probe);
        tracing::debug!(
            "Baseline '{}' box is {}x{}",
            self.fallback_family,
            baseline.width,
            baseline.height,
        );
        self.baseline_box = Some(baseline);
        baseline
    }

    /// One comparison pass over the pending set.
    ///
    /// Walks indices in reverse so in-place removal is safe. A probe box
    /// equal to the baseline in both dimensions means the fallback is
    /// still rendering; any difference means the real font took over, so
    /// the descriptor moves to the settled list. Returns true when every
    /// font converged (vacuously, when the set is empty).
    fn single_pass(&mut self, baseline: ProbeBox) -> bool {
        if self.pending.is_empty() {
            return true;
        }
        let mut all_converged = true;
        for i in (0..self.pending.len()).rev() {
            if self.pending[i].converged {
                continue;
            }
            let Some(probe) = self.pending[i].probe else {
                all_converged = false;
                continue;
            };
            if self.env.measure(probe) == baseline {
                all_converged = false;
            } else {
                let mut desc = self.pending.remove(i);
                desc.converged = true;
                self.settled.push(desc);
            }
        }
        all_converged
    }

    /// Probes of settled fonts are only needed while comparisons run;
    /// release them once the loop finishes.
    fn release_settled_probes(&mut self) {
        for desc in &mut self.settled {
            if let Some(probe) = desc.probe.take() {
                self.env.detach_probe(probe);
            }
        }
    }
}
