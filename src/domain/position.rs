// Vehicle position domain model

/// Current GPS fix. Replaced wholesale on each poll; equality is strict,
/// so repeated identical fixes are detectable and can be dropped upstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_requires_both_coordinates() {
        let held = Position::new(43.65647222, -79.73763889);
        assert_eq!(held, Position::new(43.65647222, -79.73763889));
        assert_ne!(held, Position::new(43.65647222, -79.7));
        assert_ne!(held, Position::new(43.7, -79.73763889));
    }
}
