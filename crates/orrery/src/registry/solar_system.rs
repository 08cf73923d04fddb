//! The default solar system table.
//!
//! Distances, radii and speeds are display values in scene units and rad/s,
//! not physical ones.

use super::error::RegistryError;
use super::spec::{CelestialBodySpec, PlanetSpec, Registry, RingSpec, Rgb};

fn body(
    name: &str,
    description: &str,
    distance: f64,
    radius: f64,
    orbit_speed: f64,
    rotation_speed: f64,
    color: u32,
) -> CelestialBodySpec {
    CelestialBodySpec::orbiting(
        name,
        description,
        radius,
        Rgb::from_hex(color),
        distance,
        orbit_speed,
        rotation_speed,
    )
}

fn planets() -> Vec<PlanetSpec> {
    vec![
        PlanetSpec::new(body("Mercury", "Closest planet to the Sun.", 10.0, 0.38, 0.04, 0.02, 0xaaaaaa)),
        PlanetSpec::new(body("Venus", "Second planet from the Sun.", 15.0, 0.95, 0.035, 0.02, 0xdaa520)),
        PlanetSpec::new(body("Earth", "Our home planet.", 20.0, 1.0, 0.03, 0.03, 0x0000ff))
            .with_moon(body("Moon", "Earth's only natural satellite.", 2.5, 0.27, 0.1, 0.05, 0x888888)),
        PlanetSpec::new(body("Mars", "The red planet.", 25.0, 0.53, 0.025, 0.03, 0xff4500))
            .with_moon(body("Phobos", "One of Mars' moons.", 1.5, 0.1, 0.15, 0.1, 0x999999))
            .with_moon(body("Deimos", "One of Mars' moons.", 2.0, 0.08, 0.12, 0.08, 0xaaaaaa)),
        PlanetSpec::new(body("Jupiter", "The largest planet.", 35.0, 1.5, 0.02, 0.04, 0xffa500))
            .with_moon(body("Io", "Volcanically active moon.", 2.0, 0.3, 0.1, 0.05, 0xffff00))
            .with_moon(body("Europa", "Icy surface moon.", 2.5, 0.28, 0.09, 0.05, 0xffffff))
            .with_moon(body("Ganymede", "Largest moon in the solar system.", 3.0, 0.35, 0.08, 0.05, 0xdddddd))
            .with_moon(body("Callisto", "Heavily cratered moon.", 3.5, 0.32, 0.07, 0.05, 0xbbbbbb)),
        PlanetSpec::new(body("Saturn", "Known for its rings.", 45.0, 1.3, 0.017, 0.04, 0xf5deb3))
            .with_moon(body("Titan", "Largest moon of Saturn.", 2.5, 0.4, 0.1, 0.05, 0xffe4c4))
            .with_ring(RingSpec {
                inner_radius: 1.5,
                outer_radius: 2.2,
                color: Rgb::from_hex(0xaaaaaa),
            }),
        PlanetSpec::new(body("Uranus", "An ice giant with a blue hue.", 55.0, 1.1, 0.015, 0.03, 0x66ccff))
            .with_moon(body("Miranda", "Small moon of Uranus.", 1.5, 0.2, 0.1, 0.05, 0xcccccc)),
        PlanetSpec::new(body("Neptune", "Furthest known planet.", 65.0, 1.1, 0.013, 0.03, 0x00008b))
            .with_moon(body("Triton", "Largest moon of Neptune.", 2.0, 0.3, 0.1, 0.05, 0xaaaaaa)),
    ]
}

impl Registry {
    /// The Sun, eight planets, their major moons and Saturn's ring.
    pub fn solar_system() -> Result<Self, RegistryError> {
        let sun = CelestialBodySpec::star(
            "Sun",
            "The star at the center of our solar system.",
            5.0,
            Rgb::from_hex(0xffffff),
        );
        Registry::new(sun, planets())
    }
}
