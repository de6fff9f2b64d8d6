//! Utilidades de validación
//!
//! Helpers de validación en el borde de la API que no caben en los
//! atributos derive.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Formato de matrícula: bloques alfanuméricos separados por guiones,
    /// p. ej. "ABC-123" o "YUC-123-A"
    pub static ref LICENSE_PLATE_RE: Regex =
        Regex::new(r"^[A-Z0-9]{2,4}(-[A-Z0-9]{1,4}){0,2}$").unwrap();
}

/// Validar coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(20.97, -89.62).is_ok());
        assert!(validate_coordinates(91.0, -75.0).is_err());
        assert!(validate_coordinates(45.0, -181.0).is_err());
    }

    #[test]
    fn test_license_plate_regex() {
        assert!(LICENSE_PLATE_RE.is_match("ABC-123"));
        assert!(LICENSE_PLATE_RE.is_match("YUC-123-A"));
        assert!(LICENSE_PLATE_RE.is_match("AB12"));
        assert!(!LICENSE_PLATE_RE.is_match("abc-123"));
        assert!(!LICENSE_PLATE_RE.is_match("A"));
        assert!(!LICENSE_PLATE_RE.is_match("ABC 123"));
    }
}
