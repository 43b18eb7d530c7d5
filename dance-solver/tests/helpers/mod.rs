//! Shared helpers for the integration tests of the dance solver.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;
use std::time::Duration;

use dance_solver::Dance;
use dance_solver::DancePreference;
use dance_solver::DanceSolver;
use dance_solver::Dancer;
use dance_solver::DancerPosition;
use dance_solver::Position;
use dance_solver::SolveOutcome;
use dance_solver::SolverStatus;
use wait_timeout::ChildExt;

/// The input of a single solve.
#[derive(Clone, Debug, Default)]
pub(crate) struct Problem {
    pub(crate) dancers: Vec<Dancer>,
    pub(crate) dances: Vec<Dance>,
    pub(crate) preferences: Vec<DancerPosition>,
}

impl Problem {
    /// `dancers` are `(id, active)` pairs, `dances` are `(id, positions)` pairs and
    /// `preferences` are `(dancer, dance, position, preference)` tuples.
    pub(crate) fn new(
        dancers: &[(i64, bool)],
        dances: &[(i64, &[i64])],
        preferences: &[(i64, i64, i64, DancePreference)],
    ) -> Problem {
        Problem {
            dancers: dancers
                .iter()
                .map(|&(id, active)| Dancer::new(id, active))
                .collect(),
            dances: dances
                .iter()
                .map(|&(id, positions)| {
                    Dance::new(id, positions.iter().map(|&position| Position::new(position)))
                })
                .collect(),
            preferences: preferences
                .iter()
                .map(|&(dancer, dance, position, preference)| {
                    DancerPosition::new(dancer, dance, position, preference)
                })
                .collect(),
        }
    }

    pub(crate) fn solver(&self) -> DanceSolver<'_> {
        DanceSolver::new(&self.dancers, &self.dances, &self.preferences)
    }

    /// Solves the problem and checks that the outcome is valid for it.
    pub(crate) fn solve(&self) -> SolveOutcome {
        let outcome = self.solver().get_possible_dances();
        self.assert_valid(&outcome);
        outcome
    }

    /// Checks the properties every outcome has to satisfy, whatever the input.
    pub(crate) fn assert_valid(&self, outcome: &SolveOutcome) {
        let solution = &outcome.solution;

        assert_eq!(
            solution.performed().count(),
            self.dances.len(),
            "every dance of the input has a performed flag"
        );
        assert_eq!(solution.num_assignments(), solution.assignments().count());

        if !solution.status().has_assignment() {
            assert_eq!(solution.num_assignments(), 0);
            assert_eq!(solution.num_dances_performed(), 0);
            assert!(outcome.diagnostics.is_none());
            return;
        }

        for dance in &self.dances {
            if !solution.is_performed(dance.id) {
                assert!(dance
                    .positions
                    .iter()
                    .all(|position| solution.dancer_for(dance.id, position.id).is_none()));
                continue;
            }

            let mut seen = BTreeSet::new();
            for position in &dance.positions {
                let dancer = solution
                    .dancer_for(dance.id, position.id)
                    .unwrap_or_else(|| {
                        panic!("position {} of dance {} is empty", position.id, dance.id)
                    });
                assert!(
                    seen.insert(dancer),
                    "dancer {dancer} dances twice in dance {}",
                    dance.id
                );

                let roster_entry = self
                    .dancers
                    .iter()
                    .find(|candidate| candidate.id == dancer)
                    .unwrap_or_else(|| panic!("dancer {dancer} is not in the roster"));
                assert!(roster_entry.active, "dancer {dancer} is not active");

                let preference = self
                    .preferences
                    .iter()
                    .rev()
                    .find(|record| {
                        record.dancer == dancer
                            && record.dance == dance.id
                            && record.position == position.id
                    })
                    .map(|record| record.preference)
                    .unwrap_or_default();
                assert_ne!(
                    preference,
                    DancePreference::No,
                    "dancer {dancer} does not want position {} of dance {}",
                    position.id,
                    dance.id
                );
            }
        }

        assert!(outcome.diagnostics.is_some());
    }
}

pub(crate) fn assert_infeasible(outcome: &SolveOutcome) {
    assert_eq!(outcome.solution.status(), SolverStatus::Infeasible);
    assert_eq!(outcome.solution.num_assignments(), 0);
    assert_eq!(outcome.solution.assignments().count(), 0);
    assert!(outcome
        .solution
        .performed()
        .all(|(_, performed)| !performed));
}

pub(crate) fn instance_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("instances")
        .join(format!("{name}.json"))
}

/// The exit status and the standard output of a run of the binary.
#[derive(Debug)]
pub(crate) struct SolverRun {
    pub(crate) success: bool,
    pub(crate) stdout: String,
}

pub(crate) fn run_solver(
    instance_path: impl AsRef<Path>,
    args: impl IntoIterator<Item = &'static str>,
) -> SolverRun {
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let solver = PathBuf::from(env!("CARGO_BIN_EXE_dance-solver"));

    let mut command = Command::new(solver);
    for arg in args {
        let _ = command.arg(arg);
    }

    let mut child = command
        .arg(instance_path.as_ref())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs()),
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let mut stdout = String::new();
    let _ = child
        .stdout
        .take()
        .expect("stdout is piped")
        .read_to_string(&mut stdout)
        .expect("the output is valid UTF-8");

    SolverRun {
        success: status.success(),
        stdout,
    }
}

pub(crate) fn temporary_instance(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dance-solver-{}-{name}.json", std::process::id()));
    let mut file = File::create(&path).expect("Failed to create instance file.");
    std::io::Write::write_all(&mut file, contents.as_bytes())
        .expect("Failed to write instance file.");
    path
}
