use crate::models::Coordinates;

/// Source of the device's current position, if there is one.
pub trait Geolocator: Send + Sync {
    fn locate(&self) -> Option<Coordinates>;
}

/// Always reports the same configured position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

impl Geolocator for FixedLocation {
    fn locate(&self) -> Option<Coordinates> {
        Some(self.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl Geolocator for NoGeolocation {
    fn locate(&self) -> Option<Coordinates> {
        None
    }
}

/// Initial text for the location field.
pub fn prefill<G: Geolocator + ?Sized>(geolocator: &G) -> String {
    geolocator
        .locate()
        .map(|c| c.to_location_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefill_uses_position_when_available() {
        let geo = FixedLocation(Coordinates::new(12.9716, 77.5946));
        assert_eq!(prefill(&geo), "12.9716,77.5946");
        assert_eq!(prefill(&NoGeolocation), "");
    }
}
