//! Perceptual print quality scoring: will these pixels print well at this
//! size, on this medium, from this distance?

pub mod config;
pub mod error;
pub mod metadata;
pub mod probe;
pub mod profiles;
pub mod scorer;
pub mod suggest;
pub mod sweet_spot;
pub mod types;
pub mod units;

pub use config::{CalculatorConfig, load_config};
pub use error::{InputError, MetadataError, PrintScoreError, Result};
pub use metadata::{read_resolution_metadata, try_read_resolution_metadata};
pub use profiles::{
    MediumProfile, UpscaleProfile, ViewingDistanceProfile, list_mediums, list_upscale_profiles,
    list_viewing_distances,
};
pub use scorer::calculate;
pub use sweet_spot::sweet_spot;
pub use types::{
    CalculationInput, CalculationResult, MetadataSource, Priority, Rating, ResolutionMetadata,
    Suggestion, SuggestionKind, SweetSpotResult, UnitConversion,
};
pub use units::convert_units;
