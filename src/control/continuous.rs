//! Continuous-time obstacle dynamics.
//!
//! One axis is a position integrator with linear drag, fed by a damped
//! second-order oscillator that tracks the command:
//!
//! ```text
//! ẋ0 = x1
//! ẋ1 = -Cx·x1 + x2
//! ẋ2 = x3
//! ẋ3 = -w0²·x2 - 2·zeta·w0·x3 + w0²·u
//! ```

extern crate nalgebra as na;

use serde::{Deserialize, Serialize};

use crate::control::model::ContinuousModel;

/// Physical parameters shared by every axis of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Linear drag coefficient `Cx`.
    #[serde(rename = "drag")]
    pub cx: f64,
    /// Natural frequency `w0` of the command oscillator.
    #[serde(rename = "natural_frequency")]
    pub w0: f64,
    /// Damping ratio `zeta` of the command oscillator.
    #[serde(rename = "damping_ratio")]
    pub zeta: f64,
}

impl Default for Parameters {
    fn default() -> Parameters {
        Parameters {
            cx: 0.1,
            w0: 1.0,
            zeta: 0.5,
        }
    }
}

impl Parameters {
    pub fn new(cx: f64, w0: f64, zeta: f64) -> Parameters {
        Parameters { cx, w0, zeta }
    }
}

/// Builds the fourth-order single-axis model.
///
/// No range checks are made; non-finite parameters show up unchanged in the
/// returned matrices.
pub fn build_1d(params: &Parameters) -> ContinuousModel {
    let w0_sq = params.w0 * params.w0;

    let mat_a = na::dmatrix![
        0.0, 1.0, 0.0, 0.0;
        0.0, -params.cx, 1.0, 0.0;
        0.0, 0.0, 0.0, 1.0;
        0.0, 0.0, -w0_sq, -2.0 * params.zeta * params.w0
    ];
    let mat_b = na::dmatrix![0.0; 0.0; 0.0; w0_sq];

    ContinuousModel::with_full_state_output(mat_a, mat_b)
}

/// Builds two decoupled copies of [`build_1d`], one per planar axis.
///
/// State is `[x-axis (4), y-axis (4)]` and command is `[u_x, u_y]`.
pub fn build_2d(params: &Parameters) -> ContinuousModel {
    let axis = build_1d(params);
    axis.block_diagonal(&axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn one_axis_matrices() {
        let sys = build_1d(&Parameters::new(0.1, 2.0, 0.5));

        let expected_a = na::dmatrix![
            0.0, 1.0, 0.0, 0.0;
            0.0, -0.1, 1.0, 0.0;
            0.0, 0.0, 0.0, 1.0;
            0.0, 0.0, -4.0, -2.0
        ];
        assert_eq!(sys.mat_a, expected_a);
        assert_eq!(sys.mat_b, na::dmatrix![0.0; 0.0; 0.0; 4.0]);
        assert_eq!(sys.mat_c, na::DMatrix::<f64>::identity(4, 4));
        assert_eq!(sys.mat_d, na::DMatrix::<f64>::zeros(4, 1));
    }

    #[test]
    fn zero_frequency_is_degenerate_but_defined() {
        let sys = build_1d(&Parameters::new(0.3, 0.0, 0.7));

        assert_eq!(sys.mat_a[(3, 2)], 0.0);
        assert_eq!(sys.mat_a[(3, 3)], 0.0);
        assert_eq!(sys.mat_b[(3, 0)], 0.0);
    }

    #[test]
    fn non_finite_parameters_pass_through() {
        let sys = build_1d(&Parameters::new(f64::NAN, f64::INFINITY, 0.5));

        assert!(sys.mat_a[(1, 1)].is_nan());
        assert_eq!(sys.mat_a[(3, 2)], f64::NEG_INFINITY);
        assert_eq!(sys.mat_b[(3, 0)], f64::INFINITY);
    }

    #[test]
    fn two_axes_are_block_diagonal() {
        let params = Parameters::default();
        let axis = build_1d(&params);
        let planar = build_2d(&params);

        assert_eq!(planar.state_dim(), 8);
        assert_eq!(planar.input_dim(), 2);
        assert_eq!(planar.mat_a.view((0, 0), (4, 4)), axis.mat_a);
        assert_eq!(planar.mat_a.view((4, 4), (4, 4)), axis.mat_a);
        assert!(planar.mat_a.view((0, 4), (4, 4)).iter().all(|v| *v == 0.0));
        assert!(planar.mat_a.view((4, 0), (4, 4)).iter().all(|v| *v == 0.0));
        assert_eq!(planar.mat_b.view((0, 0), (4, 1)), axis.mat_b);
        assert_eq!(planar.mat_b.view((4, 1), (4, 1)), axis.mat_b);
        assert!(planar.mat_b.view((4, 0), (4, 1)).iter().all(|v| *v == 0.0));
        assert!(planar.mat_b.view((0, 1), (4, 1)).iter().all(|v| *v == 0.0));
        assert_eq!(planar.mat_c, na::DMatrix::<f64>::identity(8, 8));
        assert_eq!(planar.mat_d, na::DMatrix::<f64>::zeros(8, 2));
    }

    proptest! {
        #[test]
        fn state_matrix_structure_is_fixed(
            cx in -10.0_f64..10.0,
            w0 in -10.0_f64..10.0,
            zeta in -5.0_f64..5.0,
        ) {
            let sys = build_1d(&Parameters::new(cx, w0, zeta));

            prop_assert_eq!(sys.mat_a[(0, 1)], 1.0);
            prop_assert_eq!(sys.mat_a[(2, 3)], 1.0);
            prop_assert_eq!(sys.mat_a[(1, 1)], -cx);
            prop_assert_eq!(sys.mat_a[(3, 2)], -(w0 * w0));
            prop_assert_eq!(sys.mat_a[(3, 3)], -2.0 * zeta * w0);
            prop_assert_eq!(sys.mat_b[(3, 0)], w0 * w0);
        }
    }
}
