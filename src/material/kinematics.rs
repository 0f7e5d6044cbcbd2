use crate::StrError;
use russell_tensor::{t2_add, t2_dot_t2, Mandel, Tensor2};

/// Returns the symmetric part of a tensor as a symmetric tensor
///
/// In the [Mandel::General] basis, the first six components hold the symmetric part
/// and the last three hold the skew part.
pub fn symmetric_part(tt: &Tensor2) -> Tensor2 {
    let general = tt.as_general();
    let mut res = Tensor2::new(Mandel::Symmetric);
    res.set_mandel_vector(1.0, &general.vector().as_data()[..6]);
    res
}

/// Returns the skew part of a tensor as a general tensor
pub fn skew_part(tt: &Tensor2) -> Tensor2 {
    let mut res = tt.as_general();
    let vec = res.vector_mut();
    for m in 0..6 {
        vec[m] = 0.0;
    }
    res
}

/// Splits the velocity gradient into the rate of deformation D and the spin W
///
/// ```text
/// D = (L + Lᵀ)/2   (symmetric)
/// W = (L - Lᵀ)/2   (general)
/// ```
pub fn split_velocity_gradient(ll: &Tensor2) -> (Tensor2, Tensor2) {
    (symmetric_part(ll), skew_part(ll))
}

/// Applies one half of the co-rotational (Jaumann) correction
///
/// ```text
/// σ ← σ + ½ h (σ Wᵀ + W σ) = σ + ½ h (W σ - σ W)
/// ```
///
/// `sigma` is symmetric and `ww` is the (general) spin tensor; the result is symmetric.
pub fn spin_half_step(sigma: &Tensor2, ww: &Tensor2, h: f64) -> Tensor2 {
    let sg = sigma.as_general();
    let mut w_sigma = Tensor2::new(Mandel::General);
    let mut sigma_w = Tensor2::new(Mandel::General);
    t2_dot_t2(&mut w_sigma, ww, &sg);
    t2_dot_t2(&mut sigma_w, &sg, ww);
    let mut rate = Tensor2::new(Mandel::General);
    t2_add(&mut rate, 1.0, &w_sigma, -1.0, &sigma_w);
    let mut res = symmetric_part(sigma);
    res.update(0.5 * h, &symmetric_part(&rate));
    res
}

/// Calculates the density ratio ρ_new/ρ_old of the explicit midpoint rule
///
/// ```text
/// ρ_new / ρ_old = det(I - ½ h L) / det(I + ½ h L)
/// ```
pub fn density_ratio(ll: &Tensor2, h: f64) -> Result<f64, StrError> {
    let ll = ll.as_general();
    let ii = Tensor2::identity(Mandel::General);
    let mut minus = Tensor2::new(Mandel::General);
    let mut plus = Tensor2::new(Mandel::General);
    t2_add(&mut minus, 1.0, &ii, -0.5 * h, &ll);
    t2_add(&mut plus, 1.0, &ii, 0.5 * h, &ll);
    let det_plus = plus.determinant();
    if det_plus <= 0.0 {
        return Err("the time step is too large for the midpoint density update");
    }
    let ratio = minus.determinant() / det_plus;
    if ratio <= 0.0 {
        return Err("the midpoint density update gives a non-positive density");
    }
    Ok(ratio)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
