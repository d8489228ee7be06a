extern crate nalgebra as na;

/// Pulse command profile, one column per sample.
///
/// Every input channel holds `amplitude` over the first and last thirds of
/// the horizon and zero in between.
pub fn generate_pulse_commands(
    n_inputs: usize,
    time_steps: usize,
    amplitude: f64,
) -> na::DMatrix<f64> {
    let third = time_steps / 3;
    let mut commands = na::DMatrix::<f64>::zeros(n_inputs, time_steps);

    commands.columns_range_mut(0..third).fill(amplitude);
    commands
        .columns_range_mut(time_steps - third..time_steps)
        .fill(amplitude);

    commands
}

/// Constant command profile.
pub fn generate_step_commands(
    n_inputs: usize,
    time_steps: usize,
    amplitude: f64,
) -> na::DMatrix<f64> {
    na::DMatrix::from_element(n_inputs, time_steps, amplitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_is_high_low_high() {
        let commands = generate_pulse_commands(2, 9, 1.5);

        assert_eq!(commands.shape(), (2, 9));
        for row in 0..2 {
            let samples: Vec<f64> = commands.row(row).iter().copied().collect();
            assert_eq!(samples, vec![1.5, 1.5, 1.5, 0.0, 0.0, 0.0, 1.5, 1.5, 1.5]);
        }
    }

    #[test]
    fn pulse_keeps_remainder_in_middle() {
        let commands = generate_pulse_commands(1, 5, 1.0);
        let samples: Vec<f64> = commands.row(0).iter().copied().collect();

        assert_eq!(samples, vec![1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn short_horizons_stay_at_zero() {
        assert!(generate_pulse_commands(1, 2, 1.0).iter().all(|v| *v == 0.0));
        assert_eq!(generate_pulse_commands(1, 0, 1.0).ncols(), 0);
    }

    #[test]
    fn step_is_constant() {
        let commands = generate_step_commands(2, 4, -0.5);
        assert!(commands.iter().all(|v| *v == -0.5));
        assert_eq!(commands.shape(), (2, 4));
    }
}
