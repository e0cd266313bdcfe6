use gadgetcmp_core::Category;

use super::*;
use crate::test_support::{card, with_spec};

fn phone() -> VariantCard {
    card("p1", Category::Smartphone, Some(20_000))
}

fn laptop() -> VariantCard {
    card("l1", Category::Laptop, Some(60_000))
}

// -----------------------------------------------------------------------
// FeatureId
// -----------------------------------------------------------------------

#[test]
fn feature_ids_parse_names_and_aliases() {
    for id in FeatureId::ALL {
        assert_eq!(id.as_str().parse::<FeatureId>(), Ok(id));
    }
    assert_eq!("5G".parse::<FeatureId>(), Ok(FeatureId::FiveG));
    assert_eq!("fast_charging".parse::<FeatureId>(), Ok(FeatureId::FastCharging));
    assert!("teleport".parse::<FeatureId>().is_err());
}

#[test]
fn feature_catalogue_is_category_specific() {
    assert!(FeatureId::for_category(Category::Smartphone).contains(&FeatureId::Ois));
    assert!(!FeatureId::for_category(Category::Smartphone).contains(&FeatureId::Inverter));
    assert!(FeatureId::for_category(Category::Laptop).contains(&FeatureId::DedicatedGpu));
    assert!(FeatureId::for_category(Category::HomeAppliance).contains(&FeatureId::Inverter));
}

// -----------------------------------------------------------------------
// Measured features
// -----------------------------------------------------------------------

#[test]
fn fast_charging_threshold_is_inclusive() {
    let mut c = phone();
    c.details.battery.fast_charging_watts = Some(65.0);
    assert_eq!(
        detect_feature(&c, FeatureId::FastCharging),
        FeatureMatch {
            matches: true,
            strength: Some(65.0)
        }
    );
}

#[test]
fn below_threshold_still_reports_strength() {
    let mut c = phone();
    c.details.battery.fast_charging_watts = Some(33.0);
    let found = detect_feature(&c, FeatureId::FastCharging);
    assert!(!found.matches);
    assert_eq!(found.strength, Some(33.0));
}

#[test]
fn structured_value_wins_over_display_text() {
    let mut c = with_spec(phone(), "charging", "120W HyperCharge");
    c.details.battery.fast_charging_watts = Some(18.0);
    assert!(!has_feature(&c, FeatureId::FastCharging));
}

#[test]
fn fast_charging_falls_back_to_spec_text() {
    let c = with_spec(phone(), "charging", "67W SUPERVOOC");
    assert_eq!(detect_feature(&c, FeatureId::FastCharging).strength, Some(67.0));
    assert!(has_feature(&c, FeatureId::FastCharging));
}

#[test]
fn missing_data_yields_no_strength() {
    assert_eq!(detect_feature(&phone(), FeatureId::FastCharging), FeatureMatch::none());
    assert_eq!(detect_feature(&phone(), FeatureId::HighCamera), FeatureMatch::none());
}

#[test]
fn high_refresh_reads_display_text() {
    let c = with_spec(phone(), "display", "6.7 inch AMOLED, 144Hz");
    let found = detect_feature(&c, FeatureId::HighRefreshRate);
    assert!(found.matches);
    assert_eq!(found.strength, Some(144.0));
}

#[test]
fn high_ram_uses_variant_ram() {
    let mut c = phone();
    c.numeric.ram_gb = Some(12.0);
    assert!(has_feature(&c, FeatureId::HighRam));
    c.numeric.ram_gb = Some(8.0);
    assert!(!has_feature(&c, FeatureId::HighRam));
}

#[test]
fn high_camera_takes_largest_sensor() {
    let mut c = phone();
    c.details.camera.rear_megapixels = vec![12.0, 50.0, 8.0];
    assert_eq!(detect_feature(&c, FeatureId::HighCamera).strength, Some(50.0));
    assert!(has_feature(&c, FeatureId::HighCamera));
}

#[test]
fn phone_long_battery_needs_six_thousand_mah() {
    let c = with_spec(phone(), "battery", "6000 mAh");
    assert!(has_feature(&c, FeatureId::LongBattery));
    let c = with_spec(phone(), "battery", "5000 mAh");
    let found = detect_feature(&c, FeatureId::LongBattery);
    assert!(!found.matches);
    assert_eq!(found.strength, Some(5000.0));
}

#[test]
fn laptop_long_battery_is_strictly_above_threshold() {
    let c = with_spec(laptop(), "battery", "3-cell, 50 Wh");
    assert!(!has_feature(&c, FeatureId::LongBattery));
    let c = with_spec(laptop(), "battery", "4-cell, 70 Wh");
    assert_eq!(detect_feature(&c, FeatureId::LongBattery).strength, Some(70.0));
    assert!(has_feature(&c, FeatureId::LongBattery));
}

#[test]
fn energy_efficient_uses_star_rating() {
    let mut c = card("a1", Category::HomeAppliance, None);
    c.numeric.energy_rating = Some(4.0);
    assert!(has_feature(&c, FeatureId::EnergyEfficient));
    c.numeric.energy_rating = Some(3.0);
    assert!(!has_feature(&c, FeatureId::EnergyEfficient));
}

// -----------------------------------------------------------------------
// Flag features
// -----------------------------------------------------------------------

#[test]
fn five_g_flag_overrides_name() {
    let mut c = phone();
    c.name = "Galaxy A35 5G".to_string();
    assert!(has_feature(&c, FeatureId::FiveG));
    c.details.connectivity.five_g = Some(false);
    assert!(!has_feature(&c, FeatureId::FiveG));
}

#[test]
fn five_g_token_must_be_a_whole_word() {
    let c = with_spec(phone(), "network", "LTE, 5GHz Wi-Fi");
    assert!(!has_feature(&c, FeatureId::FiveG));
}

#[test]
fn amoled_detects_oled_panels() {
    let mut c = phone();
    c.details.display.panel = Some("Dynamic AMOLED 2X".to_string());
    assert_eq!(
        detect_feature(&c, FeatureId::Amoled),
        FeatureMatch {
            matches: true,
            strength: Some(1.0)
        }
    );
    c.details.display.panel = Some("IPS LCD".to_string());
    assert_eq!(detect_feature(&c, FeatureId::Amoled), FeatureMatch::none());
}

#[test]
fn ois_falls_back_to_camera_text() {
    let c = with_spec(phone(), "rearCamera", "50MP (OIS) + 8MP");
    assert!(has_feature(&c, FeatureId::Ois));
    let mut c = with_spec(phone(), "rearCamera", "50MP (OIS) + 8MP");
    c.details.camera.ois = Some(false);
    assert!(!has_feature(&c, FeatureId::Ois));
}

#[test]
fn ai_token_scan_matches_whole_word_only() {
    let mut c = phone();
    c.features = vec!["Galaxy AI".to_string()];
    assert!(has_feature(&c, FeatureId::AiFeatures));

    let mut c = phone();
    c.features = vec!["Dual SIM, Rain Touch".to_string()];
    c.description = Some("Available in two colours".to_string());
    assert!(!has_feature(&c, FeatureId::AiFeatures));
}

#[test]
fn ai_scan_reads_camera_metadata() {
    let mut c = phone();
    c.details.camera.features = vec!["AI scene detection".to_string()];
    assert!(has_feature(&c, FeatureId::AiFeatures));
}

#[test]
fn structured_ai_list_counts_as_strength() {
    let mut c = phone();
    c.details.ai_features = vec!["Live Translate".to_string(), "Circle to Search".to_string()];
    assert_eq!(detect_feature(&c, FeatureId::AiFeatures).strength, Some(2.0));
}

#[test]
fn in_display_fingerprint_variants() {
    let mut c = phone();
    c.details.fingerprint = Some("Under-display, optical".to_string());
    assert!(has_feature(&c, FeatureId::InDisplayFingerprint));
    c.details.fingerprint = Some("Side-mounted".to_string());
    assert!(!has_feature(&c, FeatureId::InDisplayFingerprint));
}

#[test]
fn wireless_charging_from_text() {
    let c = with_spec(phone(), "charging", "45W wired, 15W wireless");
    assert!(has_feature(&c, FeatureId::WirelessCharging));
}

#[test]
fn dedicated_gpu_substring_heuristic() {
    let c = with_spec(laptop(), "gpu", "NVIDIA GeForce RTX 4060 8GB");
    assert!(has_feature(&c, FeatureId::DedicatedGpu));
    let c = with_spec(laptop(), "gpu", "Intel Iris Xe Graphics");
    assert!(!has_feature(&c, FeatureId::DedicatedGpu));
    let c = with_spec(laptop(), "gpu", "Intel Arc A370M");
    assert!(has_feature(&c, FeatureId::DedicatedGpu));
}

#[test]
fn inverter_from_flag_or_text() {
    let mut c = card("a1", Category::HomeAppliance, None);
    c.name = "1.5 Ton 5 Star Inverter Split AC".to_string();
    assert!(has_feature(&c, FeatureId::Inverter));
    c.details.inverter = Some(false);
    assert!(!has_feature(&c, FeatureId::Inverter));
}
