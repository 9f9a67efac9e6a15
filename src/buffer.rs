//! Grayscale sample container
//!
//! A `PixelBuffer` is a row-major `width x height` grid of samples in one of
//! two domains: real-valued `[0, 1]` (`f64`) or integer `[0, 255]` (`u8`).
//! Buffers are never mutated after construction; every stage produces a new one.

use crate::error::DenoiseError;

/// Sample domain tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Float01,
    Uint8,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float01 => "float01",
            Self::Uint8 => "uint8",
        }
    }
}

/// A sample type with a declared valid range
pub trait Sample: Copy + PartialOrd + Send + Sync + 'static {
    const DOMAIN: Domain;

    /// Whether the value lies inside the domain's range
    fn is_valid(self) -> bool;

    /// Raw value as `f64`, without rescaling
    fn to_f64(self) -> f64;
}

impl Sample for f64 {
    const DOMAIN: Domain = Domain::Float01;

    fn is_valid(self) -> bool {
        (0.0..=1.0).contains(&self)
    }

    fn to_f64(self) -> f64 {
        self
    }
}

impl Sample for u8 {
    const DOMAIN: Domain = Domain::Uint8;

    fn is_valid(self) -> bool {
        true
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

pub type FloatBuffer = PixelBuffer<f64>;
pub type ByteBuffer = PixelBuffer<u8>;

impl<T: Sample> PixelBuffer<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, DenoiseError> {
        if width == 0 || height == 0 {
            return Err(DenoiseError::InvalidArgument(format!(
                "buffer must not be empty, got {}x{}",
                width, height
            )));
        }

        let expected = width.checked_mul(height).ok_or_else(|| {
            DenoiseError::InvalidArgument(format!("buffer size {}x{} overflows", width, height))
        })?;
        if data.len() != expected {
            return Err(DenoiseError::InvalidArgument(format!(
                "expected {} samples for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }

        if let Some(pos) = data.iter().position(|v| !v.is_valid()) {
            return Err(DenoiseError::InvalidArgument(format!(
                "sample at ({}, {}) is outside the {} range",
                pos % width,
                pos / width,
                T::DOMAIN.as_str()
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel
    #[cfg(test)]
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, DenoiseError>
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::from_vec(width, height, data)
    }

    #[cfg(test)]
    pub fn filled(width: usize, height: usize, value: T) -> Result<Self, DenoiseError> {
        Self::from_vec(width, height, vec![value; width.saturating_mul(height)])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn domain(&self) -> Domain {
        T::DOMAIN
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Sample at a possibly out-of-bounds position, replicating the nearest edge
    pub fn get_clamped(&self, x: isize, y: isize) -> T {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.data[cy * self.width + cx]
    }

    /// Fail with `DimensionMismatch` unless `other` has the same size
    pub fn ensure_same_size<U>(&self, other: &PixelBuffer<U>) -> Result<(), DenoiseError> {
        if self.dimensions() != (other.width, other.height) {
            return Err(DenoiseError::DimensionMismatch {
                expected: self.dimensions(),
                actual: (other.width, other.height),
            });
        }
        Ok(())
    }
}

impl FloatBuffer {
    /// `round(v * 255)`
    pub fn to_uint8(&self) -> ByteBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
                .collect(),
        }
    }
}

impl ByteBuffer {
    /// `v / 255`
    pub fn to_float01(&self) -> FloatBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| v as f64 / 255.0).collect(),
        }
    }
}
