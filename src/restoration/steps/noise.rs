use crate::buffer::FloatBuffer;
use crate::error::DenoiseError;
use rand::Rng;

/// Value written for "salt" impulses
const SALT: f64 = 1.0;
/// Value written for "pepper" impulses
const PEPPER: f64 = 0.0;

/// Apply salt-and-pepper impulse noise
///
/// Each pixel is corrupted independently with probability `density`; a
/// corrupted pixel becomes `SALT` or `PEPPER` with equal probability.
pub fn apply_impulse_noise(
    image: &FloatBuffer,
    density: f64,
    rng: &mut impl Rng,
) -> Result<FloatBuffer, DenoiseError> {
    if !(0.0..=1.0).contains(&density) {
        return Err(DenoiseError::InvalidArgument(format!(
            "noise density must be within [0, 1], got {}",
            density
        )));
    }

    let (width, height) = image.dimensions();
    let mut corrupted = 0usize;
    let data: Vec<f64> = image
        .data()
        .iter()
        .map(|&v| {
            if rng.gen_bool(density) {
                corrupted += 1;
                if rng.gen_bool(0.5) {
                    SALT
                } else {
                    PEPPER
                }
            } else {
                v
            }
        })
        .collect();

    tracing::debug!(
        "Impulse noise corrupted {} of {} pixels (density {})",
        corrupted,
        data.len(),
        density
    );

    FloatBuffer::from_vec(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn gray(width: usize, height: usize) -> FloatBuffer {
        FloatBuffer::filled(width, height, 0.5).unwrap()
    }

    #[test]
    fn test_zero_density_is_identity() {
        let img = FloatBuffer::from_fn(20, 10, |x, y| ((x + y) % 7) as f64 / 7.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let noisy = apply_impulse_noise(&img, 0.0, &mut rng).unwrap();
        assert_eq!(noisy, img);
    }

    #[test]
    fn test_full_density_corrupts_every_pixel() {
        let img = gray(32, 32);
        let mut rng = StdRng::seed_from_u64(7);
        let noisy = apply_impulse_noise(&img, 1.0, &mut rng).unwrap();
        assert!(noisy.data().iter().all(|&v| v == SALT || v == PEPPER));

        // both impulse kinds show up
        assert!(noisy.data().iter().any(|&v| v == SALT));
        assert!(noisy.data().iter().any(|&v| v == PEPPER));
    }

    #[test]
    fn test_corruption_rate_tracks_density() {
        let img = gray(100, 100);
        let mut rng = StdRng::seed_from_u64(42);
        let noisy = apply_impulse_noise(&img, 0.1, &mut rng).unwrap();

        let corrupted = noisy.data().iter().filter(|&&v| v != 0.5).count();
        // expectation 1000, standard deviation 30
        assert!(
            (850..=1150).contains(&corrupted),
            "Expected about 1000 corrupted pixels, got {}",
            corrupted
        );

        let salt = noisy.data().iter().filter(|&&v| v == SALT).count();
        assert!(
            salt > corrupted / 3 && salt < corrupted * 2 / 3,
            "salt/pepper split should be balanced: {} of {}",
            salt,
            corrupted
        );
    }

    #[test]
    fn test_same_seed_same_noise() {
        let img = gray(40, 40);
        let a = apply_impulse_noise(&img, 0.3, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = apply_impulse_noise(&img, 0.3, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_out_of_range_density() {
        let img = gray(4, 4);
        let mut rng = StdRng::seed_from_u64(0);
        for density in [-0.1, 1.01, f64::NAN] {
            let err = apply_impulse_noise(&img, density, &mut rng).unwrap_err();
            assert!(matches!(err, DenoiseError::InvalidArgument(_)));
        }
    }
}
