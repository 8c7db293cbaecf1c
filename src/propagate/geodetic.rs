pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

// WGS-84 constants
const EQUATORIAL_RADIUS_KM: f64 = 6378.137;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const LATITUDE_ITERATIONS: usize = 20;

/// Geodetic coordinates as produced by the frame conversion. Height is in
/// mean Earth radii above the ellipsoid.
#[derive(Debug, Clone, Copy)]
pub struct Geodetic {
    pub latitude_rad: f64,
    pub longitude_rad: f64,
    pub height_er: f64,
}

impl Geodetic {
    pub fn latitude_deg(&self) -> f64 {
        self.latitude_rad.to_degrees()
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude_rad.to_degrees()
    }

    pub fn height_km(&self) -> f64 {
        self.height_er * MEAN_EARTH_RADIUS_KM
    }
}

/// Convert a TEME position (km) to geodetic coordinates using the Greenwich
/// sidereal angle `gmst` (rad).
pub fn teme_to_geodetic(pos_teme: [f64; 3], gmst: f64) -> Geodetic {
    let ecef = teme_to_ecef_position(pos_teme, gmst);
    ecef_to_geodetic(ecef)
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

fn ecef_to_geodetic(ecef: [f64; 3]) -> Geodetic {
    let [x, y, z] = ecef;
    let e2 = FLATTENING * (2.0 - FLATTENING);
    let r = (x * x + y * y).sqrt();
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(r);
    let mut c = 1.0;
    for _ in 0..LATITUDE_ITERATIONS {
        let sin_lat = latitude.sin();
        c = 1.0 / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        latitude = (z + EQUATORIAL_RADIUS_KM * c * e2 * sin_lat).atan2(r);
    }

    let height_km = if latitude.cos().abs() > 1e-9 {
        r / latitude.cos() - EQUATORIAL_RADIUS_KM * c
    } else {
        // Over a pole
        z.abs() - EQUATORIAL_RADIUS_KM * (1.0 - FLATTENING)
    };

    Geodetic {
        latitude_rad: latitude,
        longitude_rad: longitude,
        height_er: height_km / MEAN_EARTH_RADIUS_KM,
    }
}
