//! Obstacle motion models in state-space form.
//!
//! [`continuous`] builds the physical model, [`discretize`] samples it with a
//! zero-order hold and [`obstacle::ObstacleModel`] composes both. Propagation
//! goes through the [`model::DiscreteStateSpaceModel`] trait.

pub mod continuous;
pub mod discretize;
pub mod error;
pub mod expm;
pub mod model;
pub mod obstacle;
pub mod simulator;
pub mod trajectory;

pub use continuous::{build_1d, build_2d, Parameters};
pub use discretize::discretize;
pub use error::{ModelError, ModelResult};
pub use expm::expm;
pub use model::{ContinuousModel, DiscreteModel, DiscreteStateSpaceModel};
pub use obstacle::{Axes, ObstacleModel};
