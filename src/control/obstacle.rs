extern crate nalgebra as na;

use tracing::debug;

use crate::control::continuous::{build_1d, build_2d, Parameters};
use crate::control::discretize::discretize;
use crate::control::error::{ModelError, ModelResult};
use crate::control::model::{ContinuousModel, DiscreteModel, DiscreteStateSpaceModel};

/// Number of independent motion axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axes {
    One,
    Two,
}

impl Axes {
    pub fn count(self) -> usize {
        match self {
            Axes::One => 1,
            Axes::Two => 2,
        }
    }

    pub fn build_continuous(self, params: &Parameters) -> ContinuousModel {
        match self {
            Axes::One => build_1d(params),
            Axes::Two => build_2d(params),
        }
    }
}

/// Sampled obstacle motion model.
///
/// Both representations are derived once at construction; afterwards the
/// model is read-only and [`DiscreteStateSpaceModel::step`] can be called
/// from any number of threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleModel {
    params: Parameters,
    axes: Axes,
    continuous: ContinuousModel,
    discrete: DiscreteModel,
}

impl ObstacleModel {
    pub fn new(params: Parameters, sampling_dt: f64, axes: Axes) -> ModelResult<ObstacleModel> {
        validate_parameters(&params)?;

        let continuous = axes.build_continuous(&params);
        let discrete = discretize(&continuous, sampling_dt)?;

        debug!(
            axes = axes.count(),
            cx = params.cx,
            w0 = params.w0,
            zeta = params.zeta,
            sampling_dt,
            "built obstacle model"
        );

        Ok(ObstacleModel {
            params,
            axes,
            continuous,
            discrete,
        })
    }

    pub fn one_dimensional(params: Parameters, sampling_dt: f64) -> ModelResult<ObstacleModel> {
        ObstacleModel::new(params, sampling_dt, Axes::One)
    }

    pub fn two_dimensional(params: Parameters, sampling_dt: f64) -> ModelResult<ObstacleModel> {
        ObstacleModel::new(params, sampling_dt, Axes::Two)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn axes(&self) -> Axes {
        self.axes
    }

    pub fn continuous(&self) -> &ContinuousModel {
        &self.continuous
    }

    pub fn discrete(&self) -> &DiscreteModel {
        &self.discrete
    }

    /// Zero state for this model's dimension.
    pub fn rest_state(&self) -> na::DVector<f64> {
        na::DVector::zeros(self.state_dim())
    }
}

impl DiscreteStateSpaceModel for ObstacleModel {
    fn get_mat_a(&self) -> &na::DMatrix<f64> {
        self.discrete.get_mat_a()
    }

    fn get_mat_b(&self) -> &na::DMatrix<f64> {
        self.discrete.get_mat_b()
    }

    fn get_mat_c(&self) -> &na::DMatrix<f64> {
        self.discrete.get_mat_c()
    }

    fn get_mat_d(&self) -> &na::DMatrix<f64> {
        self.discrete.get_mat_d()
    }

    fn get_sampling_dt(&self) -> f64 {
        self.discrete.get_sampling_dt()
    }
}

pub(crate) fn validate_parameters(params: &Parameters) -> ModelResult<()> {
    let fields = [
        ("drag coefficient", params.cx),
        ("natural frequency", params.w0),
        ("damping ratio", params.zeta),
    ];

    match fields.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, value)) => Err(ModelError::InvalidParameter {
            what: format!("{name} must be finite, got {value}"),
        }),
        None => Ok(()),
    }
}
