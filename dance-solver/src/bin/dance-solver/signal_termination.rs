use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use log::info;
use pumpkin_solver::termination::TerminationCondition;
use signal_hook::consts::SIGINT;
use signal_hook::consts::SIGTERM;

/// Stops the search for dances once the process is asked to stop by SIGINT or SIGTERM; the
/// best assignment found so far is still reported.
#[derive(Debug)]
pub(crate) struct SignalTermination {
    /// The number of the last stop signal received, or 0.
    received: Arc<AtomicUsize>,
    reported: bool,
}

impl SignalTermination {
    pub(crate) fn install() -> std::io::Result<SignalTermination> {
        let received = Arc::new(AtomicUsize::new(0));

        [SIGINT, SIGTERM].into_iter().try_for_each(|signal| {
            // Signal numbers are small and positive.
            let value = usize::try_from(signal).unwrap_or(usize::MAX);
            signal_hook::flag::register_usize(signal, Arc::clone(&received), value).map(|_| ())
        })?;

        Ok(SignalTermination {
            received,
            reported: false,
        })
    }
}

impl TerminationCondition for SignalTermination {
    fn should_stop(&mut self) -> bool {
        let signal = self.received.load(Ordering::Relaxed);
        if signal == 0 {
            return false;
        }

        if !self.reported {
            info!("Received signal {signal}, stopping the search");
            self.reported = true;
        }
        true
    }
}
