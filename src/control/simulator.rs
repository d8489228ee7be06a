use nalgebra as na;
use tracing::trace;

use crate::control::error::{ModelError, ModelResult};
use crate::control::model::DiscreteStateSpaceModel;

/// Rolls `model` forward from `x0` under one command per column of `mat_u`.
///
/// Returns `(mat_y, mat_x)`: outputs `y_k = C x_k + D u_k` (one column per
/// command) and states `x_0 ..= x_T` (one more column than commands).
pub fn system_simulate(
    model: &impl DiscreteStateSpaceModel,
    mat_u: &na::DMatrix<f64>,
    x0: &na::DVector<f64>,
) -> ModelResult<(na::DMatrix<f64>, na::DMatrix<f64>)> {
    ModelError::check_len("initial state", model.state_dim(), x0.len())?;
    ModelError::check_len("command rows", model.input_dim(), mat_u.nrows())?;

    let sim_time = mat_u.ncols();
    let mut mat_x = na::DMatrix::<f64>::zeros(model.state_dim(), sim_time + 1);
    let mut mat_y = na::DMatrix::<f64>::zeros(model.output_dim(), sim_time);

    mat_x.column_mut(0).copy_from(x0);
    let mut state = x0.clone();

    for i in 0..sim_time {
        let command = mat_u.column(i).into_owned();

        mat_y
            .column_mut(i)
            .copy_from(&model.output(&state, &command)?);

        state = model.step(&state, &command)?;
        mat_x.column_mut(i + 1).copy_from(&state);
    }

    trace!(steps = sim_time, "simulated rollout");

    Ok((mat_y, mat_x))
}

/// One output channel of [`system_simulate`] as a plain series.
pub fn compute_system_response(
    model: &impl DiscreteStateSpaceModel,
    input: &na::DMatrix<f64>,
    initial_state: &na::DVector<f64>,
    output_index: usize,
) -> ModelResult<Vec<f64>> {
    if output_index >= model.output_dim() {
        return Err(ModelError::ShapeMismatch {
            what: "output index",
            expected: model.output_dim(),
            actual: output_index,
        });
    }

    let (mat_y, _mat_x) = system_simulate(model, input, initial_state)?;

    Ok(mat_y.row(output_index).iter().copied().collect())
}
