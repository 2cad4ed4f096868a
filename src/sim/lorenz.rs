/// Lorenz system constants plus the integration schedule.
///
/// The classic chaotic regime is sigma=10, rho=28, beta=8/3; `dt` and
/// `total_steps` fix the Euler step size and the per-run step budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParams {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    pub dt: f64,
    pub total_steps: u32,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
            total_steps: 10_000,
        }
    }
}

/// Instantaneous derivatives of the Lorenz system at `p`.
///
///   dx/dt = sigma * (y - x)
///   dy/dt = x * (rho - z) - y
///   dz/dt = x * y - beta * z
pub fn derivatives(p: [f64; 3], params: &LorenzParams) -> [f64; 3] {
    let [x, y, z] = p;
    [
        params.sigma * (y - x),
        x * (params.rho - z) - y,
        x * y - params.beta * z,
    ]
}

/// Advance `p` in place by one explicit Euler step.
pub fn euler_step(p: &mut [f64; 3], params: &LorenzParams) {
    let d = derivatives(*p, params);
    p[0] += d[0] * params.dt;
    p[1] += d[1] * params.dt;
    p[2] += d[2] * params.dt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivatives_at_classic_point() {
        let params = LorenzParams::default();
        let [dx, dy, dz] = derivatives([1.0, 1.0, 1.0], &params);
        assert_eq!(dx, 0.0);
        assert_eq!(dy, 26.0);
        assert_eq!(dz, 1.0 - 8.0 / 3.0);
    }

    #[test]
    fn derivatives_match_equations() {
        let params = LorenzParams {
            sigma: 3.0,
            rho: 7.0,
            beta: 0.5,
            ..LorenzParams::default()
        };
        let (x, y, z) = (-2.0, 4.5, 1.25);
        let [dx, dy, dz] = derivatives([x, y, z], &params);
        assert_eq!(dx, 3.0 * (y - x));
        assert_eq!(dy, x * (7.0 - z) - y);
        assert_eq!(dz, x * y - 0.5 * z);
    }

    #[test]
    fn euler_step_advances_by_derivative_times_dt() {
        let params = LorenzParams::default();
        let start = [0.1, 0.0, 0.0];
        let d = derivatives(start, &params);
        let mut p = start;
        euler_step(&mut p, &params);
        assert_eq!(p[0], start[0] + d[0] * params.dt);
        assert_eq!(p[1], start[1] + d[1] * params.dt);
        assert_eq!(p[2], start[2] + d[2] * params.dt);
    }
}
