extern crate nalgebra as na;

use crate::control::error::{ModelError, ModelResult};

/// A linear time-invariant system sampled at a fixed interval.
///
/// Implementors only expose their matrices; propagation is shared so that
/// every discrete model checks shapes and steps the same way.
pub trait DiscreteStateSpaceModel {
    fn get_mat_a(&self) -> &na::DMatrix<f64>;
    fn get_mat_b(&self) -> &na::DMatrix<f64>;
    fn get_mat_c(&self) -> &na::DMatrix<f64>;
    fn get_mat_d(&self) -> &na::DMatrix<f64>;
    fn get_sampling_dt(&self) -> f64;

    fn state_dim(&self) -> usize {
        self.get_mat_a().nrows()
    }

    fn input_dim(&self) -> usize {
        self.get_mat_b().ncols()
    }

    fn output_dim(&self) -> usize {
        self.get_mat_c().nrows()
    }

    /// Advances `state` by one sample interval with `command` held constant.
    ///
    /// Returns `Ad * state + Bd * command` as a new vector.
    fn step(
        &self,
        state: &na::DVector<f64>,
        command: &na::DVector<f64>,
    ) -> ModelResult<na::DVector<f64>> {
        ModelError::check_len("state", self.state_dim(), state.len())?;
        ModelError::check_len("command", self.input_dim(), command.len())?;

        Ok(self.get_mat_a() * state + self.get_mat_b() * command)
    }

    /// Observation `Cd * state + Dd * command`.
    fn output(
        &self,
        state: &na::DVector<f64>,
        command: &na::DVector<f64>,
    ) -> ModelResult<na::DVector<f64>> {
        ModelError::check_len("state", self.state_dim(), state.len())?;
        ModelError::check_len("command", self.input_dim(), command.len())?;

        Ok(self.get_mat_c() * state + self.get_mat_d() * command)
    }
}

/// Continuous-time state-space matrices `(A, B, C, D)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContinuousModel {
    pub mat_a: na::DMatrix<f64>,
    pub mat_b: na::DMatrix<f64>,
    pub mat_c: na::DMatrix<f64>,
    pub mat_d: na::DMatrix<f64>,
}

impl ContinuousModel {
    /// Full-state observation without feedthrough: `C = I`, `D = 0`.
    pub fn with_full_state_output(mat_a: na::DMatrix<f64>, mat_b: na::DMatrix<f64>) -> Self {
        let n = mat_a.nrows();
        let m = mat_b.ncols();

        ContinuousModel {
            mat_a,
            mat_b,
            mat_c: na::DMatrix::identity(n, n),
            mat_d: na::DMatrix::zeros(n, m),
        }
    }

    pub fn state_dim(&self) -> usize {
        self.mat_a.nrows()
    }

    pub fn input_dim(&self) -> usize {
        self.mat_b.ncols()
    }

    /// Stacks two systems without any cross-coupling.
    ///
    /// State and input of `self` come first. The result observes the full
    /// state of both systems and has no feedthrough.
    pub fn block_diagonal(&self, other: &ContinuousModel) -> ContinuousModel {
        let mat_a = block_diag(&self.mat_a, &other.mat_a);
        let mat_b = block_diag(&self.mat_b, &other.mat_b);

        ContinuousModel::with_full_state_output(mat_a, mat_b)
    }
}

fn block_diag(top: &na::DMatrix<f64>, bottom: &na::DMatrix<f64>) -> na::DMatrix<f64> {
    let (r1, c1) = top.shape();
    let (r2, c2) = bottom.shape();

    let mut mat = na::DMatrix::<f64>::zeros(r1 + r2, c1 + c2);
    mat.view_mut((0, 0), (r1, c1)).copy_from(top);
    mat.view_mut((r1, c1), (r2, c2)).copy_from(bottom);

    mat
}

/// Discrete-time state-space matrices `(Ad, Bd, Cd, Dd)` and their sample interval.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteModel {
    pub(crate) mat_a: na::DMatrix<f64>,
    pub(crate) mat_b: na::DMatrix<f64>,
    pub(crate) mat_c: na::DMatrix<f64>,
    pub(crate) mat_d: na::DMatrix<f64>,
    pub(crate) sampling_dt: f64,
}

impl DiscreteStateSpaceModel for DiscreteModel {
    fn get_mat_a(&self) -> &na::DMatrix<f64> {
        &self.mat_a
    }

    fn get_mat_b(&self) -> &na::DMatrix<f64> {
        &self.mat_b
    }

    fn get_mat_c(&self) -> &na::DMatrix<f64> {
        &self.mat_c
    }

    fn get_mat_d(&self) -> &na::DMatrix<f64> {
        &self.mat_d
    }

    fn get_sampling_dt(&self) -> f64 {
        self.sampling_dt
    }
}
