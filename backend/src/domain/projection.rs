//! Planar projection of WGS84 footprints for area measurement.
//!
//! Footprints arrive in EPSG:4326 degrees, where areas are distorted. They are
//! projected into a Universal Transverse Mercator zone (EPSG:326xx north,
//! EPSG:327xx south) before measuring. The forward transform uses the Krüger
//! series truncated at third order, which is accurate to well below a
//! millimetre inside a zone.

use geo::{BoundingRect, Coord, MapCoords, MultiPolygon, Polygon};
use thiserror::Error;

const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
const WGS84_INVERSE_FLATTENING: f64 = 298.257_223_563;
const UTM_SCALE_FACTOR: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Zone used when none is configured: 35N covers the Istanbul area.
pub const DEFAULT_UTM_ZONE: u8 = 35;

/// Errors raised while configuring a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProjectionError {
    /// UTM zone numbers run from 1 to 60.
    #[error("UTM zone must be within 1..=60, got {zone}")]
    ZoneOutOfRange {
        /// Rejected zone number.
        zone: u8,
    },
}

/// Hemisphere selecting the false northing of a UTM zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    /// Northern hemisphere (EPSG:326xx).
    North,
    /// Southern hemisphere (EPSG:327xx).
    South,
}

/// One UTM zone.
///
/// # Examples
/// ```
/// use solar_backend::domain::{Hemisphere, UtmZone};
///
/// let zone = UtmZone::new(35, Hemisphere::North).expect("valid zone");
/// assert_eq!(zone.epsg(), 32635);
/// assert_eq!(zone.central_meridian(), 27.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone {
    number: u8,
    hemisphere: Hemisphere,
}

impl UtmZone {
    /// Build a zone, rejecting numbers outside `1..=60`.
    pub fn new(number: u8, hemisphere: Hemisphere) -> Result<Self, ProjectionError> {
        if !(1..=60).contains(&number) {
            return Err(ProjectionError::ZoneOutOfRange { zone: number });
        }
        Ok(Self { number, hemisphere })
    }

    /// Zone containing a WGS84 position.
    ///
    /// The Norway and Svalbard zone exceptions are not applied.
    pub fn containing(longitude: f64, latitude: f64) -> Self {
        // Wrapped longitude is in [0, 360), so the band index fits in u8.
        let wrapped = (longitude + 180.0).rem_euclid(360.0);
        let index = (wrapped / 6.0).floor() as u8;
        let hemisphere = if latitude < 0.0 {
            Hemisphere::South
        } else {
            Hemisphere::North
        };
        Self {
            number: index.min(59) + 1,
            hemisphere,
        }
    }

    /// Zone number, `1..=60`.
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Hemisphere of the zone.
    pub fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// EPSG code of the WGS84 / UTM coordinate reference system.
    pub fn epsg(&self) -> u32 {
        let base = match self.hemisphere {
            Hemisphere::North => 32_600,
            Hemisphere::South => 32_700,
        };
        base + u32::from(self.number)
    }

    /// Central meridian in degrees.
    pub fn central_meridian(&self) -> f64 {
        f64::from(self.number) * 6.0 - 183.0
    }

    /// Project a `(longitude, latitude)` coordinate to `(easting, northing)` metres.
    pub fn project(&self, coord: Coord<f64>) -> Coord<f64> {
        let flattening = 1.0 / WGS84_INVERSE_FLATTENING;
        let n = flattening / (2.0 - flattening);
        let n2 = n * n;
        let n3 = n2 * n;
        let rectifying_radius =
            WGS84_SEMI_MAJOR_AXIS / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0);
        let alpha = [
            n / 2.0 - 2.0 * n2 / 3.0 + 5.0 * n3 / 16.0,
            13.0 * n2 / 48.0 - 3.0 * n3 / 5.0,
            61.0 * n3 / 240.0,
        ];

        let phi = coord.y.to_radians();
        let lambda = (coord.x - self.central_meridian()).to_radians();
        let eccentricity = 2.0 * n.sqrt() / (1.0 + n);
        let t = (phi.sin().atanh() - eccentricity * (eccentricity * phi.sin()).atanh()).sinh();
        let xi = t.atan2(lambda.cos());
        let eta = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

        let mut easting_series = eta;
        let mut northing_series = xi;
        for (order, coefficient) in [2.0_f64, 4.0, 6.0].into_iter().zip(alpha) {
            easting_series += coefficient * (order * xi).cos() * (order * eta).sinh();
            northing_series += coefficient * (order * xi).sin() * (order * eta).cosh();
        }

        let false_northing = match self.hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => UTM_FALSE_NORTHING_SOUTH,
        };
        Coord {
            x: UTM_FALSE_EASTING + UTM_SCALE_FACTOR * rectifying_radius * easting_series,
            y: false_northing + UTM_SCALE_FACTOR * rectifying_radius * northing_series,
        }
    }

    /// Project every vertex of a WGS84 polygon.
    pub fn project_polygon(&self, polygon: &Polygon<f64>) -> Polygon<f64> {
        polygon.map_coords(|coord| self.project(coord))
    }
}

impl Default for UtmZone {
    fn default() -> Self {
        Self {
            number: DEFAULT_UTM_ZONE,
            hemisphere: Hemisphere::North,
        }
    }
}

/// How the calculator chooses the planar projection for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionStrategy {
    /// Always project into one zone.
    Fixed(UtmZone),
    /// Use the zone containing the centre of the footprints being measured.
    Auto,
}

impl Default for ProjectionStrategy {
    fn default() -> Self {
        Self::Fixed(UtmZone::default())
    }
}

impl ProjectionStrategy {
    /// Pick the zone for a batch of WGS84 polygons.
    ///
    /// `Auto` falls back to the default zone when the batch has no extent.
    pub fn resolve<'a>(&self, polygons: impl IntoIterator<Item = &'a Polygon<f64>>) -> UtmZone {
        match self {
            Self::Fixed(zone) => *zone,
            Self::Auto => {
                let batch: MultiPolygon<f64> = polygons.into_iter().cloned().collect();
                batch
                    .bounding_rect()
                    .map(|rect| {
                        let centre = rect.center();
                        UtmZone::containing(centre.x, centre.y)
                    })
                    .unwrap_or_default()
            }
        }
    }
}
