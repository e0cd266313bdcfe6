//! Candidate-path tables for every field the normalizer reads.
//!
//! Each list is tried in order and the first non-empty value wins. Paths
//! follow the syntax documented in [`crate::extract`]. Adding a historical
//! key name means adding a string here, never a new branch in the normalizer.

use gadgetcmp_core::Category;

/// Keys used in [`gadgetcmp_core::NormalizedProduct::specs`].
pub mod spec_keys {
    pub const DISPLAY: &str = "display";
    pub const DISPLAY_TYPE: &str = "displayType";
    pub const REFRESH_RATE: &str = "refreshRate";
    pub const RESOLUTION: &str = "resolution";
    pub const PROCESSOR: &str = "processor";
    pub const GPU: &str = "gpu";
    pub const RAM: &str = "ram";
    pub const STORAGE: &str = "storage";
    pub const BATTERY: &str = "battery";
    pub const CHARGING: &str = "charging";
    pub const REAR_CAMERA: &str = "rearCamera";
    pub const FRONT_CAMERA: &str = "frontCamera";
    pub const NETWORK: &str = "network";
    pub const OS: &str = "os";
    pub const FINGERPRINT: &str = "fingerprint";
    pub const WEIGHT: &str = "weight";
    pub const COLOR: &str = "color";
    pub const TYPE: &str = "type";
    pub const SUB_TYPE: &str = "subType";
    pub const CAPACITY: &str = "capacity";
    pub const ENERGY_RATING: &str = "energyRating";
    pub const POWER_CONSUMPTION: &str = "powerConsumption";
    pub const WARRANTY: &str = "warranty";
}

/// One entry of a category's spec table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpecField {
    pub key: &'static str,
    pub paths: &'static [&'static str],
    /// Appended when the resolved value is a bare number (`6000` → `"6000 mAh"`).
    pub unit: Option<&'static str>,
}

const fn field(
    key: &'static str,
    paths: &'static [&'static str],
    unit: Option<&'static str>,
) -> SpecField {
    SpecField { key, paths, unit }
}

// ---------------------------------------------------------------------------
// Product-level identity and shared fields
// ---------------------------------------------------------------------------

pub(crate) const PRODUCT_ID: &[&str] = &[
    "id",
    "_id.$oid",
    "_id",
    "productId",
    "product_id",
    "slug",
    "sku",
];
pub(crate) const NAME: &[&str] = &[
    "name",
    "title",
    "productName",
    "product_name",
    "modelName",
    "model_name",
];
pub(crate) const BRAND: &[&str] = &["brand", "brandName", "brand_name", "manufacturer", "make"];
pub(crate) const MODEL: &[&str] = &[
    "model",
    "modelNumber",
    "model_number",
    "modelName",
    "model_name",
];
pub(crate) const IMAGES: &[&str] = &[
    "images",
    "imageUrls",
    "image_urls",
    "media.images",
    "image",
    "imageUrl",
    "image_url",
    "thumbnail",
];
pub(crate) const LAUNCH_DATE: &[&str] = &[
    "launchDate",
    "launch_date",
    "releaseDate",
    "release_date",
    "launched",
    "createdAt",
    "created_at",
];
pub(crate) const RATING: &[&str] = &[
    "rating.average",
    "rating.value",
    "ratings.average",
    "rating",
    "averageRating",
    "average_rating",
    "userRating",
];
pub(crate) const FEATURES: &[&str] = &[
    "features",
    "keyFeatures",
    "key_features",
    "highlights",
    "tags",
];
pub(crate) const DESCRIPTION: &[&str] = &["description", "summary", "overview", "about"];
pub(crate) const VARIANTS: &[&str] = &["variants", "configurations", "variant_options", "skus"];

/// Product-level price fields, consulted after every variant-level source.
pub(crate) const PRODUCT_PRICE: &[&str] = &[
    "price",
    "basePrice",
    "base_price",
    "startingPrice",
    "starting_price",
    "mrp",
];

/// Sub-keys that hold the amount when a price arrives as an object.
pub(crate) const PRICE_AMOUNT: &[&str] = &["amount", "value", "price", "current"];

/// Category-type field. Appliances carry the appliance kind, laptops a
/// segment such as `"Gaming"`.
pub(crate) fn product_type_paths(category: Category) -> &'static [&'static str] {
    match category {
        Category::HomeAppliance => &[
            "type",
            "applianceType",
            "appliance_type",
            "productType",
            "product_type",
            "category_type",
        ],
        Category::Laptop => &[
            "type",
            "laptopType",
            "laptop_type",
            "segment",
            "productType",
            "product_type",
        ],
        Category::Smartphone => &["type", "productType", "product_type"],
    }
}

// ---------------------------------------------------------------------------
// Variants and store offers
// ---------------------------------------------------------------------------

pub(crate) const VARIANT_ID: &[&str] = &["variant_id", "variantId", "id", "_id.$oid", "_id", "sku"];
pub(crate) const VARIANT_RAM: &[&str] = &["ram", "RAM", "memory", "specs.ram"];
pub(crate) const VARIANT_STORAGE: &[&str] = &[
    "storage",
    "rom",
    "internal_storage",
    "internalStorage",
    "specs.storage",
];
pub(crate) const VARIANT_COLOR: &[&str] = &["color", "colour", "colorName", "color_name"];
pub(crate) const VARIANT_CAPACITY: &[&str] = &["capacity", "size", "tonnage", "volume"];
pub(crate) const VARIANT_ENERGY: &[&str] = &[
    "energy_rating",
    "energyRating",
    "star_rating",
    "starRating",
    "stars",
];
pub(crate) const VARIANT_BASE_PRICE: &[&str] = &["base_price", "basePrice", "price", "mrp"];

/// Offer lists, used at variant level and as a product-level fallback.
pub(crate) const OFFERS: &[&str] = &[
    "store_prices",
    "storePrices",
    "stores",
    "offers",
    "store_offers",
    "storeOffers",
    "retailers",
];

pub(crate) const OFFER_STORE: &[&str] = &[
    "store_name",
    "storeName",
    "store",
    "retailer",
    "platform",
    "name",
];
pub(crate) const OFFER_PRICE: &[&str] = &[
    "price",
    "amount",
    "selling_price",
    "sellingPrice",
    "offer_price",
];
pub(crate) const OFFER_URL: &[&str] = &["url", "link", "productUrl", "product_url", "buy_link"];
pub(crate) const OFFER_TEXT: &[&str] = &["offer_text", "offerText", "offer", "offers", "discount"];
pub(crate) const OFFER_DELIVERY: &[&str] = &[
    "delivery_info",
    "deliveryInfo",
    "delivery",
    "shipping",
];

// ---------------------------------------------------------------------------
// Display specs per category
// ---------------------------------------------------------------------------

const OS_PATHS: &[&str] = &["os", "operatingSystem", "operating_system", "software.os"];
const WEIGHT_PATHS: &[&str] = &[
    "weight",
    "physical.weight",
    "dimensions.weight",
    "design.weight",
    "build.weight",
];
const REFRESH_PATHS: &[&str] = &[
    "display.refresh_rate",
    "display.refreshRate",
    "refresh_rate",
    "refreshRate",
];
const PROCESSOR_PATHS: &[&str] = &[
    "performance.processor",
    "performance.chipset",
    "processor",
    "chipset",
    "soc",
    "cpu",
];
const RAM_PATHS: &[&str] = &["performance.ram", "memory.ram", "ram", "RAM"];
const STORAGE_PATHS: &[&str] = &[
    "performance.storage",
    "memory.storage",
    "storage",
    "internal_storage",
    "internalStorage",
];

const SMARTPHONE_SPECS: &[SpecField] = &[
    field(
        spec_keys::DISPLAY,
        &["display.size", "display_size", "displaySize", "screen_size", "screenSize", "display"],
        Some("inch"),
    ),
    field(
        spec_keys::DISPLAY_TYPE,
        &["display.type", "display.panel", "display_type", "displayType", "panel_type"],
        None,
    ),
    field(spec_keys::REFRESH_RATE, REFRESH_PATHS, Some("Hz")),
    field(spec_keys::PROCESSOR, PROCESSOR_PATHS, None),
    field(spec_keys::RAM, RAM_PATHS, Some("GB")),
    field(spec_keys::STORAGE, STORAGE_PATHS, Some("GB")),
    field(
        spec_keys::BATTERY,
        &["battery.capacity", "battery_capacity", "batteryCapacity", "battery"],
        Some("mAh"),
    ),
    field(
        spec_keys::CHARGING,
        &["battery.fast_charging", "battery.charging", "fast_charging", "fastCharging", "charging"],
        Some("W"),
    ),
    field(
        spec_keys::REAR_CAMERA,
        &["rear_camera", "rearCamera", "camera.rear", "camera.main"],
        Some("MP"),
    ),
    field(
        spec_keys::FRONT_CAMERA,
        &["front_camera", "frontCamera", "selfie_camera", "camera.selfie"],
        Some("MP"),
    ),
    field(
        spec_keys::NETWORK,
        &["connectivity.network", "network", "networkType", "network_type"],
        None,
    ),
    field(spec_keys::OS, OS_PATHS, None),
    field(
        spec_keys::FINGERPRINT,
        &["security.fingerprint", "fingerprint", "fingerprint_sensor", "biometrics"],
        None,
    ),
    field(spec_keys::WEIGHT, WEIGHT_PATHS, Some("g")),
];

const LAPTOP_SPECS: &[SpecField] = &[
    field(spec_keys::PROCESSOR, PROCESSOR_PATHS, None),
    field(
        spec_keys::GPU,
        &[
            "performance.gpu",
            "performance.graphics",
            "graphics",
            "gpu",
            "graphicsCard",
            "graphics_card",
        ],
        None,
    ),
    field(spec_keys::RAM, RAM_PATHS, Some("GB")),
    field(spec_keys::STORAGE, STORAGE_PATHS, Some("GB")),
    field(
        spec_keys::DISPLAY,
        &["display.size", "display_size", "displaySize", "screen_size", "screenSize", "display"],
        Some("inch"),
    ),
    field(spec_keys::REFRESH_RATE, REFRESH_PATHS, Some("Hz")),
    field(
        spec_keys::BATTERY,
        &["battery.capacity", "battery_capacity", "batteryCapacity", "battery"],
        Some("Wh"),
    ),
    field(spec_keys::WEIGHT, WEIGHT_PATHS, Some("kg")),
    field(spec_keys::OS, OS_PATHS, None),
];

const APPLIANCE_SPECS: &[SpecField] = &[
    field(
        spec_keys::TYPE,
        &["type", "applianceType", "appliance_type", "productType", "product_type"],
        None,
    ),
    field(
        spec_keys::SUB_TYPE,
        &["subType", "sub_type", "subtype", "specifications.sub_type"],
        None,
    ),
    field(
        spec_keys::CAPACITY,
        &["capacity", "specifications.capacity", "specs.capacity"],
        None,
    ),
    field(
        spec_keys::ENERGY_RATING,
        &[
            "energy_rating",
            "energyRating",
            "star_rating",
            "starRating",
            "specifications.energy_rating",
        ],
        Some("Star"),
    ),
    field(
        spec_keys::POWER_CONSUMPTION,
        &["power_consumption", "powerConsumption", "power", "wattage"],
        Some("W"),
    ),
    field(spec_keys::WARRANTY, &["warranty", "warranty_period", "warrantyPeriod"], None),
    field(
        spec_keys::DISPLAY,
        &["display.size", "screen_size", "screenSize", "display_size"],
        Some("inch"),
    ),
    field(
        spec_keys::RESOLUTION,
        &["display.resolution", "resolution"],
        None,
    ),
    field(spec_keys::WEIGHT, WEIGHT_PATHS, Some("kg")),
];

pub(crate) fn spec_fields(category: Category) -> &'static [SpecField] {
    match category {
        Category::Smartphone => SMARTPHONE_SPECS,
        Category::Laptop => LAPTOP_SPECS,
        Category::HomeAppliance => APPLIANCE_SPECS,
    }
}

// ---------------------------------------------------------------------------
// Structured detail paths (nested sub-objects only)
// ---------------------------------------------------------------------------

pub(crate) const DETAIL_DISPLAY_SIZE: &[
    &str] = &["display.size",
    "display.size_inches",
    "display.screen_size",
];
pub(crate) const DETAIL_DISPLAY_PANEL: &[
    &str] = &["display.type",
    "display.panel",
    "display.technology",
];
pub(crate) const DETAIL_REFRESH: &[&str] = &["display.refresh_rate", "display.refreshRate"];
pub(crate) const DETAIL_RESOLUTION: &[&str] = &["display.resolution"];

pub(crate) const DETAIL_BATTERY_MAH: &[
    &str] = &["battery.capacity_mah",
    "battery.mah",
    "battery.capacity",
];
pub(crate) const DETAIL_BATTERY_WH: &[
    &str] = &["battery.capacity_wh",
    "battery.wh",
    "battery.capacity",
];
pub(crate) const DETAIL_FAST_CHARGING: &[&str] = &[
    "battery.fast_charging",
    "battery.fastCharging",
    "battery.charging_speed",
    "battery.charging.wattage",
];
pub(crate) const DETAIL_WIRELESS_CHARGING: &[&str] = &[
    "battery.wireless_charging",
    "battery.wirelessCharging",
    "battery.charging.wireless",
];

pub(crate) const DETAIL_REAR_CAMERA: &[
    &str] = &["camera.rear_camera",
    "camera.rear",
    "camera.main",
];
pub(crate) const DETAIL_FRONT_CAMERA: &[
    &str] = &["camera.front_camera",
    "camera.front",
    "camera.selfie",
];
pub(crate) const DETAIL_OIS: &[&str] = &["camera.ois", "camera.rear_camera.ois", "camera.rear.ois"];
pub(crate) const DETAIL_CAMERA_FEATURES: &[&str] = &["camera.features", "camera.modes"];
/// Sub-keys that hold a sensor's megapixel figure.
pub(crate) const MEGAPIXEL_KEYS: &[&str] = &["megapixels", "mp", "resolution"];

pub(crate) const DETAIL_PROCESSOR: &[
    &str] = &["performance.processor",
    "performance.chipset",
    "performance.cpu",
];
pub(crate) const DETAIL_GPU: &[&str] = &[
    "performance.gpu",
    "performance.graphics",
    "graphics.model",
    "graphics.name",
];
pub(crate) const DETAIL_RAM: &[&str] = &["performance.ram", "memory.ram"];
pub(crate) const DETAIL_STORAGE: &[&str] = &["performance.storage", "memory.storage"];

pub(crate) const DETAIL_NETWORK: &[&str] = &["connectivity.network"];
pub(crate) const DETAIL_FIVE_G: &[
    &str] = &["connectivity.5g",
    "connectivity.five_g",
    "connectivity.fiveG",
];
pub(crate) const DETAIL_FINGERPRINT: &[&str] = &["security.fingerprint", "biometrics.fingerprint"];
pub(crate) const DETAIL_AI_FEATURES: &[
    &str] = &["ai_features",
    "aiFeatures",
    "software.ai_features",
];
pub(crate) const DETAIL_INVERTER: &[&str] = &[
    "inverter",
    "specifications.inverter",
    "compressor.inverter",
];
