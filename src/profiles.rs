//! Reference data: print mediums, viewing distances and upscaling methods.
//!
//! Every lookup falls back to a documented default instead of failing:
//! `coated_paper`, `standard` and `none` respectively.

use serde::Serialize;
use std::collections::BTreeMap;

/// Reciprocal of one arcminute in radians, `1 / tan(pi / 10800)`.
/// At viewing distance `d` inches the eye stops resolving detail above `3438 / d` DPI.
pub const HUMAN_EYE_CONSTANT: f64 = 3438.0;

pub const DEFAULT_MEDIUM: &str = "coated_paper";
pub const DEFAULT_VIEWING_DISTANCE: &str = "standard";
pub const DEFAULT_UPSCALE: &str = "none";

const SUBLIMATION_MEDIUMS: [&str; 4] = ["polyester_fabric", "ceramic", "phone_case", "metal"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediumProfile {
    #[serde(skip)]
    pub key: &'static str,
    pub label: &'static str,
    /// Material absorption factor in `(0, 1]`. Ink spread lowers usable sharpness.
    pub maf: f64,
    pub recommended_dpi: u32,
    pub min_acceptable_dpi: u32,
    /// Safety margin over the perceptual minimum, specific to the medium.
    pub quality_threshold_multiplier: f64,
    pub typical_viewing_inches: f64,
    pub note: &'static str,
}

impl MediumProfile {
    /// Dye-sublimation substrates, printed from RGB with an ICC profile.
    pub fn is_sublimation(&self) -> bool {
        SUBLIMATION_MEDIUMS.contains(&self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewingDistanceProfile {
    #[serde(skip)]
    pub key: &'static str,
    pub label: &'static str,
    pub inches: f64,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleProfile {
    #[serde(skip)]
    pub key: &'static str,
    pub label: &'static str,
    /// Claimed linear resolution gain, `>= 1`.
    pub pixel_multiplier: f64,
    /// Share of the claimed gain that turns into real detail, in `(0, 1]`.
    pub quality_retention: f64,
}

impl UpscaleProfile {
    pub fn is_none(&self) -> bool {
        self.key == DEFAULT_UPSCALE
    }
}

// First entry of each table is its fallback.
pub static MEDIUMS: [MediumProfile; 9] = [
    MediumProfile {
        key: "coated_paper",
        label: "Coated Paper (Brochures, Magazines)",
        maf: 1.0,
        recommended_dpi: 300,
        min_acceptable_dpi: 250,
        quality_threshold_multiplier: 2.0,
        typical_viewing_inches: 24.0,
        note: "Highest sharpness. Standard for professional photo and commercial print.",
    },
    MediumProfile {
        key: "uncoated_paper",
        label: "Uncoated Paper (Flyers, Newsprint)",
        maf: 0.85,
        recommended_dpi: 300,
        min_acceptable_dpi: 200,
        quality_threshold_multiplier: 2.0,
        typical_viewing_inches: 24.0,
        note: "Ink spreads ~15% on uncoated stock. Slightly higher source resolution helps compensate.",
    },
    MediumProfile {
        key: "canvas",
        label: "Canvas (Art Prints, Wall Decor)",
        maf: 0.80,
        recommended_dpi: 150,
        min_acceptable_dpi: 100,
        quality_threshold_multiplier: 2.1,
        typical_viewing_inches: 48.0,
        note: "Canvas texture naturally masks detail variation. 150 DPI is the genuine industry standard for wall art canvas.",
    },
    MediumProfile {
        key: "polyester_fabric",
        label: "Polyester Fabric (Sublimation T-Shirts, Flags)",
        maf: 0.75,
        recommended_dpi: 150,
        min_acceptable_dpi: 120,
        quality_threshold_multiplier: 2.0,
        typical_viewing_inches: 36.0,
        note: "Fabric weave absorbs ink spread. 150 DPI is the accepted sublimation standard for garments.",
    },
    MediumProfile {
        key: "ceramic",
        label: "Ceramic (Sublimation Mugs, Tiles)",
        maf: 0.90,
        recommended_dpi: 200,
        min_acceptable_dpi: 150,
        quality_threshold_multiplier: 2.0,
        typical_viewing_inches: 18.0,
        note: "Glazed ceramic holds detail well. 200 DPI recommended for photo-quality mug prints.",
    },
    MediumProfile {
        key: "metal",
        label: "Metal / Aluminum (Sublimation Panels)",
        maf: 0.95,
        recommended_dpi: 300,
        min_acceptable_dpi: 200,
        quality_threshold_multiplier: 2.0,
        typical_viewing_inches: 24.0,
        note: "Powder-coated aluminum gives excellent sharpness. Ideal for high-detail photo prints.",
    },
    MediumProfile {
        key: "phone_case",
        label: "Phone Case (Sublimation Insert)",
        maf: 0.88,
        recommended_dpi: 300,
        min_acceptable_dpi: 200,
        quality_threshold_multiplier: 2.0,
        typical_viewing_inches: 12.0,
        note: "Viewed close-up, so always use 300 DPI for sharp logos and fine text.",
    },
    MediumProfile {
        key: "banner_vinyl",
        label: "Vinyl Banner (Outdoor/Indoor Signage)",
        maf: 0.82,
        recommended_dpi: 100,
        min_acceptable_dpi: 72,
        quality_threshold_multiplier: 1.8,
        typical_viewing_inches: 120.0,
        note: "Viewed from 5-15 feet. 72-100 DPI is the accepted industry standard for vinyl banners.",
    },
    MediumProfile {
        key: "billboard",
        label: "Billboard / Large Format (30ft+ viewing)",
        maf: 0.80,
        recommended_dpi: 30,
        min_acceptable_dpi: 15,
        quality_threshold_multiplier: 1.5,
        typical_viewing_inches: 480.0,
        note: "Viewed from 30-100 feet. 15-50 DPI is standard. Higher DPI wastes file size with zero visible benefit.",
    },
];

pub static VIEWING_DISTANCES: [ViewingDistanceProfile; 5] = [
    ViewingDistanceProfile {
        key: "standard",
        label: "Standard: Photo Prints, Brochures, Posters",
        inches: 24.0,
        description: "Typical arm-length viewing distance.",
    },
    ViewingDistanceProfile {
        key: "close",
        label: "Close View: Books, Packaging, Business Cards",
        inches: 12.0,
        description: "Held in hand or read at desk. Maximum detail required.",
    },
    ViewingDistanceProfile {
        key: "wall_art",
        label: "Wall Art: Framed Prints, Canvas",
        inches: 48.0,
        description: "Hanging on wall, viewed from across a room.",
    },
    ViewingDistanceProfile {
        key: "signage",
        label: "Signage / Banner: 5 to 15 feet",
        inches: 120.0,
        description: "Indoor or outdoor signage at medium distance.",
    },
    ViewingDistanceProfile {
        key: "billboard",
        label: "Billboard / Large Format: 30 feet or more",
        inches: 480.0,
        description: "Roadside or venue large format.",
    },
];

pub static UPSCALE_PROFILES: [UpscaleProfile; 4] = [
    UpscaleProfile {
        key: "none",
        label: "No upscaling",
        pixel_multiplier: 1.0,
        quality_retention: 1.0,
    },
    UpscaleProfile {
        key: "basic",
        label: "Basic interpolation (Photoshop Bicubic)",
        pixel_multiplier: 1.5,
        quality_retention: 0.55,
    },
    UpscaleProfile {
        key: "ai_standard",
        label: "AI 2x (Topaz Photo AI / Adobe Super Resolution)",
        pixel_multiplier: 2.0,
        quality_retention: 0.88,
    },
    UpscaleProfile {
        key: "ai_high",
        label: "AI 4x (Topaz Gigapixel AI / Magnific AI)",
        pixel_multiplier: 4.0,
        quality_retention: 0.78,
    },
];

/// Resolve a medium key, falling back to `coated_paper`.
pub fn medium(key: &str) -> &'static MediumProfile {
    MEDIUMS.iter().find(|m| m.key == key).unwrap_or_else(|| {
        tracing::debug!(key, fallback = DEFAULT_MEDIUM, "unknown medium key");
        &MEDIUMS[0]
    })
}

/// Resolve a viewing-distance key, falling back to `standard` (24 in).
pub fn viewing_distance(key: &str) -> &'static ViewingDistanceProfile {
    VIEWING_DISTANCES.iter().find(|v| v.key == key).unwrap_or_else(|| {
        tracing::debug!(key, fallback = DEFAULT_VIEWING_DISTANCE, "unknown viewing distance key");
        &VIEWING_DISTANCES[0]
    })
}

/// Resolve an upscaling key, falling back to `none`.
pub fn upscale(key: &str) -> &'static UpscaleProfile {
    UPSCALE_PROFILES.iter().find(|u| u.key == key).unwrap_or_else(|| {
        tracing::debug!(key, fallback = DEFAULT_UPSCALE, "unknown upscale key");
        &UPSCALE_PROFILES[0]
    })
}

pub fn list_mediums() -> BTreeMap<&'static str, &'static MediumProfile> {
    MEDIUMS.iter().map(|m| (m.key, m)).collect()
}

pub fn list_viewing_distances() -> BTreeMap<&'static str, &'static ViewingDistanceProfile> {
    VIEWING_DISTANCES.iter().map(|v| (v.key, v)).collect()
}

pub fn list_upscale_profiles() -> BTreeMap<&'static str, &'static UpscaleProfile> {
    UPSCALE_PROFILES.iter().map(|u| (u.key, u)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_are_documented_defaults() {
        assert_eq!(MEDIUMS[0].key, DEFAULT_MEDIUM);
        assert_eq!(VIEWING_DISTANCES[0].key, DEFAULT_VIEWING_DISTANCE);
        assert_eq!(UPSCALE_PROFILES[0].key, DEFAULT_UPSCALE);
    }

    #[test]
    fn unknown_keys_fall_back() {
        assert_eq!(medium("velvet").key, "coated_paper");
        assert_eq!(viewing_distance("").key, "standard");
        assert_eq!(viewing_distance("orbit").inches, 24.0);
        assert_eq!(upscale("8x_magic").key, "none");
        assert!(upscale("8x_magic").is_none());
    }

    #[test]
    fn known_keys_resolve() {
        assert_eq!(medium("canvas").maf, 0.80);
        assert_eq!(viewing_distance("wall_art").inches, 48.0);
        assert_eq!(upscale("ai_high").pixel_multiplier, 4.0);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        assert_eq!(medium("Canvas").key, "coated_paper");
    }

    #[test]
    fn medium_profiles_are_consistent() {
        for m in &MEDIUMS {
            assert!(m.maf > 0.0 && m.maf <= 1.0, "{}: maf out of range", m.key);
            assert!(m.recommended_dpi > 0, "{}", m.key);
            assert!(m.min_acceptable_dpi <= m.recommended_dpi, "{}", m.key);
            assert!(m.quality_threshold_multiplier > 1.0, "{}", m.key);
            assert!(m.typical_viewing_inches > 0.0, "{}", m.key);
        }
    }

    #[test]
    fn upscale_profiles_are_consistent() {
        for u in &UPSCALE_PROFILES {
            assert!(u.pixel_multiplier >= 1.0, "{}", u.key);
            assert!(u.quality_retention > 0.0 && u.quality_retention <= 1.0, "{}", u.key);
        }
    }

    #[test]
    fn sublimation_set() {
        let subl: Vec<&str> = MEDIUMS.iter().filter(|m| m.is_sublimation()).map(|m| m.key).collect();
        assert_eq!(subl, vec!["polyester_fabric", "ceramic", "metal", "phone_case"]);
    }

    #[test]
    fn listings_cover_every_profile() {
        assert_eq!(list_mediums().len(), MEDIUMS.len());
        assert_eq!(list_viewing_distances().len(), VIEWING_DISTANCES.len());
        assert_eq!(list_upscale_profiles().len(), UPSCALE_PROFILES.len());
        assert_eq!(list_mediums()["billboard"].recommended_dpi, 30);
    }

    #[test]
    fn profile_serializes_camel_case() {
        let json = serde_json::to_value(medium("canvas")).unwrap();
        assert_eq!(json["recommendedDpi"], 150);
        assert_eq!(json["qualityThresholdMultiplier"], 2.1);
        assert!(json.get("key").is_none());
    }
}
