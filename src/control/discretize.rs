extern crate nalgebra as na;

use tracing::debug;

use crate::control::error::{ModelError, ModelResult};
use crate::control::expm::expm;
use crate::control::model::{ContinuousModel, DiscreteModel};

/// Zero-order-hold discretization of a continuous model.
///
/// Exponentiates the augmented matrix `[[A·dt, B·dt], [0, 0]]` and reads
/// `Ad` and `Bd` from its top block row. Output matrices are unchanged.
/// The result is exact for commands held constant over each interval.
pub fn discretize(model: &ContinuousModel, sampling_dt: f64) -> ModelResult<DiscreteModel> {
    validate_sampling_dt(sampling_dt)?;

    let n = model.mat_a.nrows();
    let m = model.mat_b.ncols();
    let p = model.mat_c.nrows();

    ModelError::check_len("A columns", n, model.mat_a.ncols())?;
    ModelError::check_len("B rows", n, model.mat_b.nrows())?;
    ModelError::check_len("C columns", n, model.mat_c.ncols())?;
    ModelError::check_len("D rows", p, model.mat_d.nrows())?;
    ModelError::check_len("D columns", m, model.mat_d.ncols())?;

    let mut mat_m = na::DMatrix::<f64>::zeros(n + m, n + m);
    mat_m
        .view_mut((0, 0), (n, n))
        .copy_from(&model.mat_a.scale(sampling_dt));
    mat_m
        .view_mut((0, n), (n, m))
        .copy_from(&model.mat_b.scale(sampling_dt));

    let mat_e = expm(&mat_m)?;

    debug!(states = n, inputs = m, sampling_dt, "discretized continuous model");

    Ok(DiscreteModel {
        mat_a: mat_e.view((0, 0), (n, n)).into_owned(),
        mat_b: mat_e.view((0, n), (n, m)).into_owned(),
        mat_c: model.mat_c.clone(),
        mat_d: model.mat_d.clone(),
        sampling_dt,
    })
}

pub(crate) fn validate_sampling_dt(sampling_dt: f64) -> ModelResult<()> {
    if sampling_dt.is_finite() && sampling_dt > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            what: format!("sample interval must be finite and positive, got {sampling_dt}"),
        })
    }
}
