//! Breakpoint tables
//!
//! EPA breakpoint tables for PM2.5 and PM10 and the lookup that selects
//! the interval a concentration falls in. See the EPA technical assistance
//! document for the reporting of daily air quality:
//! https://document.airnow.gov/technical-assistance-document-for-the-reporting-of-daily-air-quailty.pdf

use core::fmt::{self, Write};

use crate::error::{AqiError, AqiResult};

/// Particulate pollutants with an AQI breakpoint table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pollutant {
    /// Fine particulate matter, diameter of 2.5 um or less
    Pm25,
    /// Coarse particulate matter, diameter of 10 um or less
    Pm10,
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pollutant::Pm25 => f.write_str("PM2.5"),
            Pollutant::Pm10 => f.write_str("PM10"),
        }
    }
}

/// One row of a breakpoint table: a concentration range in ug/m3 and
/// the AQI range it maps onto. Both ranges are closed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BreakpointInterval {
    pub conc_lo: f64,
    pub conc_hi: f64,
    pub aqi_lo: u16,
    pub aqi_hi: u16,
}

impl BreakpointInterval {
    pub const fn new(conc_lo: f64, conc_hi: f64, aqi_lo: u16, aqi_hi: u16) -> Self {
        Self {
            conc_lo,
            conc_hi,
            aqi_lo,
            aqi_hi,
        }
    }
}

impl From<BreakpointInterval> for (f64, f64, u16, u16) {
    fn from(bp: BreakpointInterval) -> Self {
        (bp.conc_lo, bp.conc_hi, bp.aqi_lo, bp.aqi_hi)
    }
}

// PM2.5 breakpoints in ug/m3, 24-hour average
const PM25_BREAKPOINTS: [BreakpointInterval; 6] = [
    BreakpointInterval::new(0.0, 12.0, 0, 50),       // Good
    BreakpointInterval::new(12.1, 35.4, 51, 100),    // Moderate
    BreakpointInterval::new(35.5, 55.4, 101, 150),   // Unhealthy for Sensitive Groups
    BreakpointInterval::new(55.5, 150.4, 151, 200),  // Unhealthy
    BreakpointInterval::new(150.5, 250.4, 201, 300), // Very Unhealthy
    BreakpointInterval::new(250.5, 500.4, 301, 500), // Hazardous
];

// PM10 breakpoints in ug/m3, 24-hour average
const PM10_BREAKPOINTS: [BreakpointInterval; 6] = [
    BreakpointInterval::new(0.0, 54.0, 0, 50),      // Good
    BreakpointInterval::new(55.0, 154.0, 51, 100),  // Moderate
    BreakpointInterval::new(155.0, 254.0, 101, 150), // Unhealthy for Sensitive Groups
    BreakpointInterval::new(255.0, 354.0, 151, 200), // Unhealthy
    BreakpointInterval::new(355.0, 424.0, 201, 300), // Very Unhealthy
    BreakpointInterval::new(425.0, 604.0, 301, 500), // Hazardous
];

impl Pollutant {
    /// The breakpoint table for this pollutant, ordered by concentration.
    pub fn breakpoints(self) -> &'static [BreakpointInterval] {
        match self {
            Pollutant::Pm25 => &PM25_BREAKPOINTS,
            Pollutant::Pm10 => &PM10_BREAKPOINTS,
        }
    }

    /// Highest concentration covered by the breakpoint table.
    pub fn max_concentration(self) -> f64 {
        match self {
            Pollutant::Pm25 => PM25_BREAKPOINTS[PM25_BREAKPOINTS.len() - 1].conc_hi,
            Pollutant::Pm10 => PM10_BREAKPOINTS[PM10_BREAKPOINTS.len() - 1].conc_hi,
        }
    }

    /// Reduces a concentration to the precision of this pollutant's table.
    ///
    /// PM2.5 is reported to one decimal place: the exact binary value is
    /// rounded to the nearest tenth, with exact ties going to the even
    /// digit. So 150.45, stored as 150.4499..., becomes 150.4.
    /// PM10 is reported in whole ug/m3 and always floored.
    pub fn truncate(self, concentration: f64) -> f64 {
        match self {
            Pollutant::Pm25 => round_to_tenths(concentration),
            Pollutant::Pm10 => libm::floor(concentration),
        }
    }
}

// Every f64 at or above 2^52 is already a whole number
const WHOLE_NUMBERS_FROM: f64 = 4_503_599_627_370_496.0;

/// Stack buffer for formatting a single number.
struct NumBuf {
    buf: [u8; 32],
    len: usize,
}

impl Write for NumBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.buf.len() {
            return Err(fmt::Error);
        }
        self.buf[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

// Scaling by 10 in binary can land a value just below a .x5 tie exactly
// on it, so the rounding is done on the decimal expansion instead.
fn round_to_tenths(concentration: f64) -> f64 {
    if !concentration.is_finite() || libm::fabs(concentration) >= WHOLE_NUMBERS_FROM {
        return concentration;
    }

    let mut num = NumBuf {
        buf: [0; 32],
        len: 0,
    };
    if write!(num, "{:.1}", concentration).is_err() {
        return concentration;
    }
    core::str::from_utf8(&num.buf[..num.len])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(concentration)
}

/// Finds the breakpoint interval containing `concentration`.
///
/// Only the lookup works on the truncated concentration; interpolation
/// must still be given the untruncated value.
///
/// # Arguments
///
/// * `concentration` - Concentration in ug/m3
/// * `pollutant` - Which table to search
///
/// # Returns
///
/// The matching interval, `AqiError::InvalidInput` for a negative (or NaN)
/// concentration, or `AqiError::OutOfRange` above the top of the table.
///
/// # Examples
///
/// ```
/// use aqi::{lookup, BreakpointInterval, Pollutant};
///
/// let bp = lookup(41.0, Pollutant::Pm25).unwrap();
/// assert_eq!(bp, BreakpointInterval::new(35.5, 55.4, 101, 150));
/// ```
pub fn lookup(concentration: f64, pollutant: Pollutant) -> AqiResult<BreakpointInterval> {
    let truncated = pollutant.truncate(concentration);
    if truncated.is_nan() || truncated < 0.0 {
        return Err(AqiError::InvalidInput);
    }

    if truncated > pollutant.max_concentration() {
        crate::trace!(
            "{} {} above table maximum {}",
            pollutant,
            truncated,
            pollutant.max_concentration()
        );
        return Err(AqiError::OutOfRange);
    }

    // First interval whose upper bound is not exceeded
    let bp = pollutant
        .breakpoints()
        .iter()
        .find(|bp| truncated <= bp.conc_hi)
        .copied()
        .ok_or(AqiError::OutOfRange)?;

    crate::trace!(
        "{} {} -> [{}, {}]",
        pollutant,
        truncated,
        bp.conc_lo,
        bp.conc_hi
    );
    Ok(bp)
}

/// Breakpoint interval for a PM2.5 concentration.
pub fn get_pm25_breakpoints(concentration: f64) -> AqiResult<BreakpointInterval> {
    lookup(concentration, Pollutant::Pm25)
}

/// Breakpoint interval for a PM10 concentration.
pub fn get_pm10_breakpoints(concentration: f64) -> AqiResult<BreakpointInterval> {
    lookup(concentration, Pollutant::Pm10)
}
