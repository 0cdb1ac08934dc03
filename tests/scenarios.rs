mod common;

use common::{ids, vehicle};
use vehicle_catalog::ranks::SafetyRating;
use vehicle_catalog::{
    delta, effective_value, filter, sort, Context, DeltaPolarity, Field, FieldValue, FilterConfig,
    SortConfig, SortDirection, Vehicle,
};

#[test]
fn width_falls_back_to_body_width_plus_buffer() {
    let a = Vehicle { body_width_inches: 70.0, mirror_width_inches: None, ..vehicle("a") };
    let ctx = Context::with_mirror_buffer(6.0);
    assert_eq!(effective_value(&a, Field::Width, &ctx), Some(FieldValue::Number(76.0)));
}

#[test]
fn max_price_keeps_used_only_vehicle() {
    let records = vec![
        Vehicle { msrp: Some(30000.0), ..vehicle("1") },
        Vehicle { msrp: Some(45000.0), ..vehicle("2") },
        Vehicle { msrp: None, used_price_high: Some(20000.0), ..vehicle("3") },
    ];
    let cfg = FilterConfig { max_price: Some(40000.0), ..Default::default() };
    let out = filter(&records, &cfg, &Context::default());
    assert_eq!(ids(&out), ["1", "3"]);
}

#[test]
fn safety_descending_ranks_unrated_last() {
    let records = vec![
        Vehicle { safety_rating: SafetyRating::TspPlus, ..vehicle("tsp-plus") },
        vehicle("unrated"),
        Vehicle { safety_rating: SafetyRating::Acceptable, ..vehicle("acceptable") },
    ];
    let config = SortConfig::new("safetyRating", SortDirection::Desc);
    let out = sort(&records, &config, &Context::default());
    assert_eq!(ids(&out), ["tsp-plus", "acceptable", "unrated"]);
    let ranks: Vec<i32> = out.iter().map(|v| v.safety_rating.rank()).collect();
    assert_eq!(ranks, [5, 2, -1]);
}

#[test]
fn cheaper_comparison_is_a_favorable_currency_delta() {
    let baseline = Vehicle { msrp: Some(30000.0), ..vehicle("base") };
    let comparison = Vehicle { msrp: Some(25000.0), ..vehicle("cmp") };
    let d = delta(&baseline, &comparison, "msrp".parse().unwrap(), &Context::default()).unwrap();
    assert_eq!(d.magnitude, -5000.0);
    assert_eq!(d.polarity, DeltaPolarity::Favorable);
    assert_eq!(d.label, "-$5,000");
}

#[test]
fn model_sort_is_case_insensitive() {
    let records = vec![
        Vehicle { model: "RAV4".into(), ..vehicle("rav4") },
        Vehicle { model: "camry".into(), ..vehicle("camry") },
    ];
    let out = sort(&records, &SortConfig::new("model", SortDirection::Asc), &Context::default());
    let models: Vec<&str> = out.iter().map(|v| v.model.as_str()).collect();
    assert_eq!(models, ["camry", "RAV4"]);
}

#[test]
fn stale_sort_field_leaves_order_unchanged() {
    let records = vec![vehicle("c"), vehicle("a"), vehicle("b")];
    let out = sort(&records, &SortConfig::new("colour", SortDirection::Asc), &Context::default());
    assert_eq!(ids(&out), ["c", "a", "b"]);
}

#[test]
fn dataset_file_loads_and_exports() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/vehicles.json");
    let catalog = vehicle_catalog::Catalog::load(path).unwrap();
    assert!(!catalog.is_empty());
    let ctx = Context::default();
    let rows = catalog.view(&FilterConfig::default(), &SortConfig::default(), &ctx);
    let csv = vehicle_catalog::export::to_csv_string(rows.iter().copied(), &ctx).unwrap();
    assert_eq!(csv.lines().count(), catalog.len() + 1);
}
