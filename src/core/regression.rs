use thiserror::Error;

/// Upper bound on coordinate descent sweeps
const MAX_SWEEPS: usize = 100_000;

/// Largest standardized coefficient change still treated as movement
const TOLERANCE: f64 = 1e-13;

/// Errors in regression input data
#[derive(Debug, Error, PartialEq)]
pub enum RegressionError {
    #[error("Cannot fit a regression on an empty dataset")]
    Empty,

    #[error("Feature rows ({rows}) and targets ({targets}) differ in length")]
    LengthMismatch { rows: usize, targets: usize },

    #[error("Non-finite value in regression input at row {0}")]
    NonFinite(usize),
}

/// Fitted ordinary-least-squares model with an intercept
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit<const N: usize> {
    pub coefficients: [f64; N],
    pub intercept: f64,
    pub r_squared: f64,
    pub n_samples: usize,
}

impl<const N: usize> LinearFit<N> {
    #[inline]
    pub fn predict(&self, features: &[f64; N]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

/// Centered and standardized second moments of the training data
struct Moments<const N: usize> {
    x_mean: [f64; N],
    y_mean: f64,
    /// Column norms after centering; 0 for columns without variance
    x_scale: [f64; N],
    y_scale: f64,
    /// Correlation matrix of the centered features
    corr: [[f64; N]; N],
    /// Correlation of each centered feature with the centered target
    rhs: [f64; N],
}

impl<const N: usize> Moments<N> {
    fn accumulate(x: &[[f64; N]], y: &[f64]) -> Self {
        let n = x.len() as f64;

        let mut x_mean = [0.0; N];
        for features in x {
            for (mean, value) in x_mean.iter_mut().zip(features.iter()) {
                *mean += value;
            }
        }
        for mean in x_mean.iter_mut() {
            *mean /= n;
        }
        let y_mean = y.iter().sum::<f64>() / n;

        let mut gram = [[0.0; N]; N];
        let mut cross = [0.0; N];
        let mut raw_sq = [0.0; N];
        let mut y_sq = 0.0;
        for (features, target) in x.iter().zip(y.iter()) {
            let yc = target - y_mean;
            y_sq += yc * yc;
            for i in 0..N {
                let xi = features[i] - x_mean[i];
                raw_sq[i] += features[i] * features[i];
                cross[i] += xi * yc;
                for j in i..N {
                    gram[i][j] += xi * (features[j] - x_mean[j]);
                }
            }
        }

        // A column whose centered energy is rounding noise relative to its
        // magnitude is constant and gets no weight
        let mut x_scale = [0.0; N];
        for i in 0..N {
            if gram[i][i] > f64::EPSILON * raw_sq[i] {
                x_scale[i] = gram[i][i].sqrt();
            }
        }
        let y_scale = y_sq.sqrt();

        let mut corr = [[0.0; N]; N];
        let mut rhs = [0.0; N];
        for i in 0..N {
            if x_scale[i] == 0.0 {
                continue;
            }
            if y_scale > 0.0 {
                rhs[i] = cross[i] / (x_scale[i] * y_scale);
            }
            for j in 0..N {
                if x_scale[j] == 0.0 {
                    continue;
                }
                let g = if i <= j { gram[i][j] } else { gram[j][i] };
                corr[i][j] = g / (x_scale[i] * x_scale[j]);
            }
        }

        Self {
            x_mean,
            y_mean,
            x_scale,
            y_scale,
            corr,
            rhs,
        }
    }

    fn is_active(&self, feature: usize) -> bool {
        self.x_scale[feature] > 0.0
    }
}

/// Fit `y ≈ intercept + Σ coefficients[i] * x[i]` by ordinary least squares
///
/// Features and target are centered and scaled to unit norm, then the normal
/// equations are solved by sequential coordinate descent: each sweep sets one
/// standardized coefficient at a time to the value that zeroes its partial
/// residual given the others. Constant columns are skipped and keep a zero
/// weight. Collinear columns still converge to a least-squares solution; how
/// the weight is split between them depends on column order.
pub fn fit_ols<const N: usize>(x: &[[f64; N]], y: &[f64]) -> Result<LinearFit<N>, RegressionError> {
    if x.len() != y.len() {
        return Err(RegressionError::LengthMismatch {
            rows: x.len(),
            targets: y.len(),
        });
    }
    if x.is_empty() {
        return Err(RegressionError::Empty);
    }
    for (row, (features, target)) in x.iter().zip(y.iter()).enumerate() {
        if !target.is_finite() || features.iter().any(|v| !v.is_finite()) {
            return Err(RegressionError::NonFinite(row));
        }
    }

    let moments = Moments::accumulate(x, y);
    let beta = solve_coordinate_descent(&moments);

    let mut coefficients = [0.0; N];
    for (i, coefficient) in coefficients.iter_mut().enumerate() {
        if moments.is_active(i) {
            *coefficient = beta[i] * moments.y_scale / moments.x_scale[i];
        }
    }

    let intercept = moments.y_mean
        - coefficients
            .iter()
            .zip(moments.x_mean.iter())
            .map(|(c, m)| c * m)
            .sum::<f64>();

    let mut fit = LinearFit {
        coefficients,
        intercept,
        r_squared: 0.0,
        n_samples: x.len(),
    };
    fit.r_squared = r_squared(&fit, x, y, moments.y_mean);

    Ok(fit)
}

/// Gauss-Seidel sweeps over the standardized normal equations
///
/// The correlation matrix has a unit diagonal, so each coordinate update is
/// its partial residual. Stops once a full sweep moves no coefficient by more
/// than [`TOLERANCE`].
fn solve_coordinate_descent<const N: usize>(moments: &Moments<N>) -> [f64; N] {
    let mut beta = [0.0; N];
    if moments.y_scale == 0.0 {
        return beta;
    }

    for _ in 0..MAX_SWEEPS {
        let mut max_delta = 0.0_f64;

        for i in (0..N).filter(|&i| moments.is_active(i)) {
            let mut residual = moments.rhs[i];
            for j in (0..N).filter(|&j| j != i) {
                residual -= moments.corr[i][j] * beta[j];
            }
            max_delta = max_delta.max((residual - beta[i]).abs());
            beta[i] = residual;
        }

        if max_delta < TOLERANCE {
            return beta;
        }
    }

    // Only near-duplicate columns converge this slowly; the remaining error
    // lies along a direction that barely changes predictions
    tracing::warn!(
        "Coordinate descent stopped after {} sweeps without converging",
        MAX_SWEEPS
    );
    beta
}

fn r_squared<const N: usize>(fit: &LinearFit<N>, x: &[[f64; N]], y: &[f64], y_mean: f64) -> f64 {
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (features, target) in x.iter().zip(y.iter()) {
        let residual = target - fit.predict(features);
        ss_res += residual * residual;
        ss_tot += (target - y_mean) * (target - y_mean);
    }

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
