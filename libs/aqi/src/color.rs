/// Color enum provides colors corresponding to EPA AQI levels,
/// ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Green,
    Yellow,
    Orange,
    Red,
    Purple,
    DarkPurple,
}

impl Color {
    /// The more severe of two categories.
    ///
    /// The overall AQI for a location is the highest pollutant sub-index,
    /// so this is what a single display should show.
    pub fn worst(self, other: Color) -> Color {
        self.max(other)
    }
}

/// Provides a Color enum variant value based on the
/// specified AQI value. Uses the ranges provided by the
/// EPA for mapping AQI to color.
///
/// # Arguments
///
/// * `aqi` - The calculated AQI
///
/// # Returns
///
/// A Color enum variant.
///
/// # Examples
///
/// ```
/// use aqi::{convert_pm25_to_aqi, get_aqi_color, Color};
///
/// let aqi = convert_pm25_to_aqi(41.0).unwrap();
/// assert_eq!(get_aqi_color(aqi), Color::Orange);
/// ```
pub fn get_aqi_color(aqi: u16) -> Color {
    match aqi {
        0..=50 => Color::Green,
        51..=100 => Color::Yellow,
        101..=150 => Color::Orange,
        151..=200 => Color::Red,
        201..=300 => Color::Purple,
        _ => Color::DarkPurple,
    }
}
