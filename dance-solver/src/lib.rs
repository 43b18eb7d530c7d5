//! # Dance solver
//! Decides which dances of a set can be performed and which dancer dances which position.
//!
//! Every dancer states a [`DancePreference`] per position of a dance. A dance is only performed
//! when all of its positions are filled by distinct, active dancers who did not say
//! [`DancePreference::No`]; dances without enough willing dancers are left out. Among all valid
//! assignments the solver picks one which maximises
//! ```text
//! 3 * favourites + 2 * yeses + maybes + dances performed - (max dances - min dances)
//! ```
//! where the last term measures how unevenly the dances are spread over the dancers.
//!
//! The model is solved by the constraint solver of [`pumpkin_solver`]. Problems are given either
//! directly through [`DanceSolver`], or as a JSON [`Instance`].
mod compiler;
mod decode;
mod error;
pub mod instance;
mod model;
mod options;
mod preferences;
pub mod report;
mod solution;
mod solver;

pub use error::DanceSolverError;
pub use instance::Instance;
pub use model::Dance;
pub use model::DanceId;
pub use model::DancePreference;
pub use model::DanceSlot;
pub use model::Dancer;
pub use model::DancerId;
pub use model::DancerPosition;
pub use model::Position;
pub use model::PositionId;
pub use options::SolverOptions;
pub use solution::SolveDiagnostics;
pub use solution::SolveOutcome;
pub use solution::Solution;
pub use solution::SolverStatus;
pub use solver::DanceSolver;
