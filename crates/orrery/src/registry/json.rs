//! JSON form of the registry.
//!
//! Field names follow the authored data (`orbitSpeed`, `innerRadius`, ...) and
//! colors are `0xRRGGBB` integers. Parsing is lenient about missing optional
//! fields; everything else is checked by [`Registry::validate`].

use serde::{Deserialize, Serialize};

use super::error::RegistryError;
use super::spec::{CelestialBodySpec, OrbitSpec, PlanetSpec, Registry, RingSpec, Rgb, STAR_SPIN_RATE};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistryJson {
    #[serde(alias = "star")]
    sun: BodyJson,
    #[serde(default)]
    planets: Vec<BodyJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BodyJson {
    name: String,
    #[serde(default)]
    description: String,
    radius: f64,
    color: u32,
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    orbit_speed: Option<f64>,
    #[serde(default)]
    rotation_speed: Option<f64>,
    #[serde(default)]
    moons: Vec<BodyJson>,
    #[serde(default)]
    rings: Option<RingJson>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RingJson {
    inner_radius: f64,
    outer_radius: f64,
    color: u32,
}

impl BodyJson {
    fn into_star(self) -> Result<CelestialBodySpec, RegistryError> {
        if self.distance.is_some() || self.orbit_speed.is_some() {
            return Err(RegistryError::StarHasOrbit { body: self.name });
        }
        Ok(CelestialBodySpec {
            rotation_speed: self.rotation_speed.unwrap_or(STAR_SPIN_RATE),
            name: self.name,
            description: self.description,
            radius: self.radius,
            color: Rgb::from_hex(self.color),
            orbit: None,
        })
    }

    fn into_orbiting(self) -> Result<CelestialBodySpec, RegistryError> {
        let distance = self.distance.ok_or_else(|| RegistryError::MissingField {
            body: self.name.clone(),
            field: "distance",
        })?;
        let angular_speed = self.orbit_speed.ok_or_else(|| RegistryError::MissingField {
            body: self.name.clone(),
            field: "orbitSpeed",
        })?;
        Ok(CelestialBodySpec {
            rotation_speed: self.rotation_speed.unwrap_or(0.0),
            name: self.name,
            description: self.description,
            radius: self.radius,
            color: Rgb::from_hex(self.color),
            orbit: Some(OrbitSpec { distance, angular_speed }),
        })
    }

    fn into_moon(self) -> Result<CelestialBodySpec, RegistryError> {
        if !self.moons.is_empty() {
            return Err(RegistryError::UnsupportedNesting { body: self.name, what: "moons" });
        }
        if self.rings.is_some() {
            return Err(RegistryError::UnsupportedNesting { body: self.name, what: "rings" });
        }
        self.into_orbiting()
    }

    fn into_planet(mut self) -> Result<PlanetSpec, RegistryError> {
        let moons = std::mem::take(&mut self.moons)
            .into_iter()
            .map(BodyJson::into_moon)
            .collect::<Result<Vec<_>, _>>()?;
        let ring = self.rings.take().map(|r| RingSpec {
            inner_radius: r.inner_radius,
            outer_radius: r.outer_radius,
            color: Rgb::from_hex(r.color),
        });
        Ok(PlanetSpec {
            body: self.into_orbiting()?,
            moons,
            ring,
        })
    }
}

impl Registry {
    /// Parse and validate a registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    /// Same as [`Registry::from_json`], for a registry embedded in a larger
    /// JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, RegistryError> {
        Self::from_raw(serde_json::from_value(value)?)
    }

    fn from_raw(raw: RegistryJson) -> Result<Self, RegistryError> {
        let star = raw.sun.into_star()?;
        let planets = raw
            .planets
            .into_iter()
            .map(BodyJson::into_planet)
            .collect::<Result<Vec<_>, _>>()?;
        Registry::new(star, planets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "sun": { "name": "Sun", "description": "The star.", "radius": 5, "color": 16777215 },
        "planets": [
            {
                "name": "Saturn",
                "description": "Known for its rings.",
                "distance": 45, "radius": 1.3,
                "orbitSpeed": 0.017, "rotationSpeed": 0.04,
                "color": 16113331,
                "moons": [
                    { "name": "Titan", "distance": 2.5, "radius": 0.4,
                      "orbitSpeed": 0.1, "rotationSpeed": 0.05, "color": 16770244 }
                ],
                "rings": { "innerRadius": 1.5, "outerRadius": 2.2, "color": 11184810 }
            }
        ]
    }"#;

    #[test]
    fn parse_authored_layout() {
        let registry = Registry::from_json(SMALL).unwrap();
        assert_eq!(registry.star().name, "Sun");
        assert_eq!(registry.star().rotation_speed, STAR_SPIN_RATE);
        let saturn = &registry.planets()[0];
        assert_eq!(saturn.body.orbit.unwrap().distance, 45.0);
        assert_eq!(saturn.moons.len(), 1);
        assert_eq!(saturn.moons[0].description, "");
        assert_eq!(saturn.ring.unwrap().outer_radius, 2.2);
    }

    #[test]
    fn star_alias_is_accepted() {
        let json = r#"{ "star": { "name": "Sol", "radius": 3, "color": 0, "rotationSpeed": 0.5 } }"#;
        let registry = Registry::from_json(json).unwrap();
        assert_eq!(registry.star().name, "Sol");
        assert_eq!(registry.star().rotation_speed, 0.5);
        assert!(registry.planets().is_empty());
    }

    #[test]
    fn missing_distance_names_the_body() {
        let json = r#"{
            "sun": { "name": "Sun", "radius": 5, "color": 0 },
            "planets": [ { "name": "Lost", "radius": 1, "orbitSpeed": 0.1, "color": 0 } ]
        }"#;
        match Registry::from_json(json).unwrap_err() {
            RegistryError::MissingField { body, field } => {
                assert_eq!(body, "Lost");
                assert_eq!(field, "distance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn moon_with_moons_is_rejected() {
        let json = r#"{
            "sun": { "name": "Sun", "radius": 5, "color": 0 },
            "planets": [ { "name": "P", "radius": 1, "distance": 10, "orbitSpeed": 0.1, "color": 0,
                "moons": [ { "name": "M", "radius": 0.1, "distance": 1, "orbitSpeed": 0.1, "color": 0,
                    "moons": [ { "name": "MM", "radius": 0.01, "distance": 0.2, "orbitSpeed": 0.1, "color": 0 } ] } ] } ]
        }"#;
        assert!(matches!(
            Registry::from_json(json),
            Err(RegistryError::UnsupportedNesting { what: "moons", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(Registry::from_json("{ nope"), Err(RegistryError::Parse(_))));
    }

    #[test]
    fn parsed_values_still_validated() {
        let json = r#"{
            "sun": { "name": "Sun", "radius": 5, "color": 0 },
            "planets": [ { "name": "Flat", "radius": 0, "distance": 10, "orbitSpeed": 0.1, "color": 0 } ]
        }"#;
        assert!(matches!(
            Registry::from_json(json),
            Err(RegistryError::InvalidRadius { .. })
        ));
    }
}
