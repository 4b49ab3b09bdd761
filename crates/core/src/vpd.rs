//! Vapor-pressure deficit from temperature and relative humidity

/// Convert degrees Fahrenheit to degrees Celsius
pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) * 5.0 / 9.0
}

/// Saturation vapor pressure in kPa (Tetens form)
pub fn saturation_vapor_pressure_kpa(temp_c: f64) -> f64 {
    0.6108 * ((17.27 * temp_c) / (temp_c + 237.3)).exp()
}

/// Vapor-pressure deficit in kPa for a temperature in °F and a relative
/// humidity in percent.
///
/// Inputs are not validated; non-finite inputs give a non-finite result.
pub fn vpd_kpa(temp_f: f64, relative_humidity: f64) -> f64 {
    let es = saturation_vapor_pressure_kpa(fahrenheit_to_celsius(temp_f));
    let ea = es * (relative_humidity / 100.0);
    es - ea
}
