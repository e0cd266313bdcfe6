pub mod app_config;
pub mod config;
pub mod filters;
pub mod products;
pub mod stores;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use filters::{
    FacetOption, FacetSection, Facets, FilterGroup, FilterState, PriceRange, RangeOption,
    TypeSpecificFacets,
};
pub use products::{
    format_rupees, parse_launch_date, BatteryInfo, CameraInfo, Category, ConnectivityInfo,
    DeviceDetails, DisplayInfo, NormalizedProduct, NumericFields, PerformanceInfo, RawRecord,
    StoreOffer, Variant, VariantCard,
};
pub use stores::{load_stores, StoreDirectory, StoreInfo, StoreStatus, StoresFile};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read stores file {path}: {source}")]
    StoresFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse stores file: {0}")]
    StoresFileParse(#[source] serde_yaml::Error),

    #[error("stores validation failed: {0}")]
    Validation(String),
}
