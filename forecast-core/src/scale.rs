//! Linear domain → pixel mapping shared by the temperature and precipitation axes.

/// Affine mapping from a data domain onto a pixel range.
///
/// `domain_low` lands on `pixel_low` and `domain_high` on `pixel_high`, so an
/// axis is inverted simply by passing the bottom edge as `pixel_low`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain_low: f64,
    pub domain_high: f64,
    pub pixel_low: f64,
    pub pixel_high: f64,
}

impl LinearScale {
    pub fn new(domain_low: f64, domain_high: f64, pixel_low: f64, pixel_high: f64) -> Self {
        Self { domain_low, domain_high, pixel_low, pixel_high }
    }

    /// Width of the domain, never zero.
    pub fn span(&self) -> f64 {
        let span = self.domain_high - self.domain_low;
        if span == 0.0 || !span.is_finite() { 1.0 } else { span }
    }

    pub fn map(&self, value: f64) -> f64 {
        let t = (value - self.domain_low) / self.span();
        self.pixel_low + t * (self.pixel_high - self.pixel_low)
    }

    /// `count` evenly spaced domain values from low to high, inclusive.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.domain_low],
            _ => {
                let steps = (count - 1) as f64;
                (0..count)
                    .map(|s| self.domain_low + (s as f64 / steps) * (self.domain_high - self.domain_low))
                    .collect()
            }
        }
    }
}

fn bounds(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values
        .iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Scale over `[min - padding, max + padding]` of the present values.
///
/// Absent values are ignored; with nothing present the domain is centred on 0.
pub fn linear_scale(
    values: &[Option<f64>],
    pixel_low: f64,
    pixel_high: f64,
    padding: f64,
) -> LinearScale {
    let (lo, hi) = bounds(values).unwrap_or((0.0, 0.0));
    LinearScale::new(lo - padding, hi + padding, pixel_low, pixel_high)
}

/// Scale over `[0, max(values, 1)]`, used for precipitation volumes.
pub fn zero_based_scale(values: &[Option<f64>], pixel_low: f64, pixel_high: f64) -> LinearScale {
    let max = bounds(values).map_or(1.0, |(_, hi)| hi.max(1.0));
    LinearScale::new(0.0, max, pixel_low, pixel_high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_ends_onto_pixel_ends() {
        let scale = linear_scale(&[Some(10.0), Some(20.0)], 0.0, 100.0, 0.0);
        assert_eq!(scale.map(10.0), 0.0);
        assert_eq!(scale.map(20.0), 100.0);
        assert_eq!(scale.map(15.0), 50.0);
    }

    #[test]
    fn inverted_axis_puts_larger_values_higher() {
        // bottom edge first: larger temperature → smaller y
        let scale = linear_scale(&[Some(0.0), Some(30.0)], 200.0, 20.0, 2.0);
        assert!(scale.map(30.0) < scale.map(0.0));
        assert_eq!(scale.domain_low, -2.0);
        assert_eq!(scale.domain_high, 32.0);
    }

    #[test]
    fn single_value_without_padding_stays_finite() {
        let scale = linear_scale(&[Some(5.0)], 0.0, 100.0, 0.0);
        let y = scale.map(5.0);
        assert!(y.is_finite());
        assert_eq!(y, 0.0);
        assert!(scale.map(6.0).is_finite());
    }

    #[test]
    fn constant_series_stays_finite() {
        let scale = linear_scale(&[Some(3.0), Some(3.0), Some(3.0)], 10.0, 0.0, 0.0);
        assert_eq!(scale.span(), 1.0);
        assert!(scale.map(3.0).is_finite());
    }

    #[test]
    fn absent_values_are_skipped() {
        let scale = linear_scale(&[None, Some(-4.0), None, Some(8.0)], 0.0, 1.0, 0.0);
        assert_eq!(scale.domain_low, -4.0);
        assert_eq!(scale.domain_high, 8.0);
    }

    #[test]
    fn empty_series_still_defined() {
        let scale = linear_scale(&[None, None], 0.0, 100.0, 2.0);
        assert_eq!((scale.domain_low, scale.domain_high), (-2.0, 2.0));
        assert_eq!(scale.map(0.0), 50.0);
    }

    #[test]
    fn zero_based_floor_and_ceiling() {
        let dry = zero_based_scale(&[Some(0.0), Some(0.0)], 100.0, 0.0);
        assert_eq!((dry.domain_low, dry.domain_high), (0.0, 1.0));
        assert_eq!(dry.map(0.0), 100.0);

        let wet = zero_based_scale(&[Some(0.2), Some(12.5), None], 100.0, 0.0);
        assert_eq!(wet.domain_high, 12.5);
        assert_eq!(wet.map(12.5), 0.0);
    }

    #[test]
    fn five_ticks_cover_the_domain() {
        let scale = LinearScale::new(-2.0, 18.0, 0.0, 1.0);
        assert_eq!(scale.ticks(5), vec![-2.0, 3.0, 8.0, 13.0, 18.0]);
        assert!(scale.ticks(0).is_empty());
    }
}
