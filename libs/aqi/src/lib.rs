//! AQI library
//!
//! This library converts PM2.5 and PM10 mass concentrations into US EPA
//! AQI sub-index values and maps AQI values onto the EPA color ranges.
//! It supports both std and no_std environments, but is best used on
//! systems with hardware floating point support.
//!
//! Every function is pure: there is no shared state, so conversions may be
//! called from any number of threads or tasks without coordination.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// Trace output for whichever logging backend is enabled.
macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        defmt::trace!($($arg)*);
        #[cfg(feature = "log")]
        log::trace!($($arg)*);
    }};
}
pub(crate) use trace;

mod breakpoints;
mod color;
mod error;

pub use breakpoints::{
    get_pm10_breakpoints, get_pm25_breakpoints, lookup, BreakpointInterval, Pollutant,
};
pub use color::{get_aqi_color, Color};
pub use error::{AqiError, AqiResult};

/// Calculate the AQI for a PM2.5 concentration.
///
/// # Arguments
///
/// * `pm25` - The PM2.5 concentration in ug/m3
///
/// # Returns
///
/// The calculated AQI value using breakpoints and a formula
/// provided by the EPA, or an `AqiError` when the concentration
/// is negative or above the hazardous range.
///
/// # Examples
///
/// ```
/// use aqi::{convert_pm25_to_aqi, AqiError};
///
/// assert_eq!(convert_pm25_to_aqi(12.0), Ok(50));
/// assert_eq!(convert_pm25_to_aqi(12.1), Ok(51));
/// assert_eq!(convert_pm25_to_aqi(501.0), Err(AqiError::OutOfRange));
/// ```
pub fn convert_pm25_to_aqi(pm25: f64) -> AqiResult<u16> {
    convert(pm25, Pollutant::Pm25)
}

/// Calculate the AQI for a PM10 concentration.
///
/// # Examples
///
/// ```
/// use aqi::convert_pm10_to_aqi;
///
/// assert_eq!(convert_pm10_to_aqi(54.0), Ok(50));
/// assert_eq!(convert_pm10_to_aqi(604.0), Ok(500));
/// ```
pub fn convert_pm10_to_aqi(pm10: f64) -> AqiResult<u16> {
    convert(pm10, Pollutant::Pm10)
}

/// Looks up the breakpoint interval for `concentration` and interpolates
/// the AQI within it.
pub fn convert(concentration: f64, pollutant: Pollutant) -> AqiResult<u16> {
    let bp = lookup(concentration, pollutant)?;
    Ok(interpolate(concentration, &bp))
}

/// Maps a concentration onto the AQI range of a breakpoint interval.
///
/// The concentration is used as given, without the table truncation
/// applied during lookup.
pub fn interpolate(concentration: f64, bp: &BreakpointInterval) -> u16 {
    get_aqi(concentration, bp.conc_lo, bp.conc_hi, bp.aqi_lo, bp.aqi_hi)
}

/// Linear interpolation between two breakpoints.
///
/// # Arguments
///
/// * `conc` - The measured concentration
/// * `conc_lo`, `conc_hi` - Concentration breakpoints, `conc_lo < conc_hi`
/// * `aqi_lo`, `aqi_hi` - AQI values at those breakpoints
///
/// # Returns
///
/// The interpolated AQI rounded half to even. Results below zero
/// saturate to 0.
///
/// # Examples
///
/// ```
/// use aqi::get_aqi;
///
/// assert_eq!(get_aqi(41.0, 35.5, 55.4, 101, 150), 115);
/// // Exact halves round to the even neighbour
/// assert_eq!(get_aqi(2.0, 0.0, 8.0, 0, 10), 2);
/// ```
pub fn get_aqi(conc: f64, conc_lo: f64, conc_hi: f64, aqi_lo: u16, aqi_hi: u16) -> u16 {
    // Linear interpolation formula transcribed from EPA documentation
    // AQI = ((AQIhigh - AQIlow) / (PMhigh - PMlow)) * (PMactual - PMlow) + AQIlow
    let aqi_lo = f64::from(aqi_lo);
    let aqi_hi = f64::from(aqi_hi);
    let raw = ((aqi_hi - aqi_lo) / (conc_hi - conc_lo)) * (conc - conc_lo) + aqi_lo;

    // Float to int casts saturate, so negative results become 0
    round_half_even(raw) as u16
}

fn round_half_even(x: f64) -> f64 {
    if libm::fabs(x - libm::trunc(x)) == 0.5 {
        2.0 * libm::round(x / 2.0)
    } else {
        libm::round(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(6.0, 25)]
    #[case(12.0, 50)]
    #[case(12.04, 50)]
    #[case(12.06, 51)]
    #[case(12.1, 51)]
    #[case(23.0, 74)]
    #[case(35.4, 100)]
    #[case(35.5, 101)]
    #[case(45.0, 124)]
    #[case(55.4, 150)]
    #[case(55.5, 151)]
    #[case(100.0, 174)]
    #[case(150.4, 200)]
    #[case(150.5, 201)]
    #[case(200.0, 250)]
    #[case(250.4, 300)]
    #[case(250.5, 301)]
    #[case(300.0, 340)]
    #[case(500.4, 500)]
    #[case(500.44, 500)]
    // Stored just below the .x5 tie, so they stay in the lower interval
    #[case(55.449999999999996, 150)]
    #[case(150.45, 200)]
    #[case(250.45, 300)]
    #[case(500.45, 500)]
    #[case(12.25, 51)]
    fn test_convert_pm25_to_aqi(#[case] conc: f64, #[case] expected: u16) {
        assert_eq!(convert_pm25_to_aqi(conc), Ok(expected));
    }

    #[rstest]
    #[case(0.0, 0)]
    #[case(27.0, 25)]
    #[case(54.0, 50)]
    #[case(54.9, 51)]
    #[case(55.0, 51)]
    #[case(100.0, 73)]
    #[case(154.0, 100)]
    #[case(155.0, 101)]
    #[case(200.0, 123)]
    #[case(254.0, 150)]
    #[case(255.0, 151)]
    #[case(300.0, 173)]
    #[case(354.0, 200)]
    #[case(355.0, 201)]
    #[case(400.0, 266)]
    #[case(424.0, 300)]
    #[case(425.0, 301)]
    #[case(500.0, 384)]
    #[case(604.0, 500)]
    #[case(604.9, 501)]
    fn test_convert_pm10_to_aqi(#[case] conc: f64, #[case] expected: u16) {
        assert_eq!(convert_pm10_to_aqi(conc), Ok(expected));
    }

    #[test]
    fn test_convert_errors() {
        assert_eq!(convert_pm25_to_aqi(-1.0), Err(AqiError::InvalidInput));
        assert_eq!(convert_pm25_to_aqi(501.0), Err(AqiError::OutOfRange));
        assert_eq!(convert_pm10_to_aqi(-1.0), Err(AqiError::InvalidInput));
        assert_eq!(convert_pm10_to_aqi(605.0), Err(AqiError::OutOfRange));
    }

    #[test]
    fn test_small_negative_pm25_rounds_to_zero() {
        // -0.04 reports as 0.0, so it is accepted and the AQI saturates at 0
        assert_eq!(convert_pm25_to_aqi(-0.04), Ok(0));
    }

    #[test]
    fn test_get_aqi_rounding() {
        assert_eq!(get_aqi(1.0, 0.0, 4.0, 0, 10), 2); // 2.5
        assert_eq!(get_aqi(3.0, 0.0, 4.0, 0, 10), 8); // 7.5
        assert_eq!(get_aqi(5.0, 0.0, 4.0, 0, 10), 12); // 12.5
        assert_eq!(get_aqi(1.2, 0.0, 4.0, 0, 10), 3); // 3.0
    }

    #[test]
    fn test_interpolate_uses_untruncated_concentration() {
        let bp = get_pm10_breakpoints(54.9).unwrap();
        // Lookup sees 54, interpolation sees 54.9
        assert_eq!(interpolate(54.0, &bp), 50);
        assert_eq!(interpolate(54.9, &bp), 51);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(0.5), 0.0);
        assert_eq!(round_half_even(1.5), 2.0);
        assert_eq!(round_half_even(2.5), 2.0);
        assert_eq!(round_half_even(-2.5), -2.0);
        assert_eq!(round_half_even(2.4), 2.0);
        assert_eq!(round_half_even(2.6), 3.0);
    }

    proptest! {
        #[test]
        fn pm25_monotonic(a in 0.0f64..=500.45, b in 0.0f64..=500.45) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(convert_pm25_to_aqi(lo).unwrap() <= convert_pm25_to_aqi(hi).unwrap());
        }

        #[test]
        fn pm10_monotonic(a in 0.0f64..605.0, b in 0.0f64..605.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(convert_pm10_to_aqi(lo).unwrap() <= convert_pm10_to_aqi(hi).unwrap());
        }

        #[test]
        fn convert_is_idempotent(conc in -10.0f64..700.0) {
            for pollutant in [Pollutant::Pm25, Pollutant::Pm10] {
                prop_assert_eq!(convert(conc, pollutant), convert(conc, pollutant));
            }
        }
    }
}
