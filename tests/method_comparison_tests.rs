//! Method Comparison Integration Tests
//!
//! Runs full comparisons through the public API: scenario parsing, method
//! evaluation, report flattening and CSV export.

use approx::assert_relative_eq;
use ewaste_recovery_rust::methods::defaults::{bioleaching, pyrometallurgy};
use ewaste_recovery_rust::report::{format_money, method_frame, method_records};
use ewaste_recovery_rust::{
    cheapest_per_kg_mixture, evaluate, metal_map, BioConditionCosts, BioCulture,
    BioleachResponseModel, CombinationRule, Currency, EconomicParameters, Feedstock, Metal,
    MethodComparison, MethodProfile, OperatingPoint, Organism, Scenario,
};

fn reference_economics() -> EconomicParameters {
    EconomicParameters::new(0.06, 50.0, 20.0, Currency::USD).unwrap()
}

#[test]
fn test_gold_only_reference_scenario() {
    let feed = Feedstock::new(1.0, metal_map([(Metal::Au, 0.0005)])).unwrap();
    let method =
        MethodProfile::new("Pyro", 1500.0, 30.0, 200.0, metal_map([(Metal::Au, 0.95)])).unwrap();

    let r = evaluate(&feed, &method, &reference_economics());

    assert_relative_eq!(r.energy_cost, 90.0, epsilon = 1e-9);
    assert_relative_eq!(r.total_cost_per_tonne, 390.0, epsilon = 1e-9);
    assert_relative_eq!(r.recovered(Metal::Au), 0.475, epsilon = 1e-12);
    assert_relative_eq!(r.total_recovered_kg, 0.475, epsilon = 1e-12);
    assert_relative_eq!(r.cost_per_kg_mixture.unwrap(), 390.0 / 0.475, max_relative = 1e-12);
    assert_relative_eq!(r.cost_per_kg_of(Metal::Au).unwrap(), 390.0 / 0.475, max_relative = 1e-12);
    assert!(r.cost_per_kg_of(Metal::Cu).is_none());
}

#[test]
fn test_placeholder_comparison_properties() {
    let comparison = MethodComparison::placeholder(BioCulture::Consortium);
    let results = comparison.run();
    assert_eq!(results.len(), 4);

    for r in &results {
        // Additivity
        let sum: f64 = Metal::ALL.iter().map(|&m| r.recovered(m)).sum();
        assert_relative_eq!(r.total_recovered_kg, sum, max_relative = 1e-12);

        // Never recover more than was fed
        for metal in Metal::ALL {
            assert!(r.recovered(metal) <= comparison.feedstock().metal_mass_kg(metal));
        }

        // Blended rate times mass gives back the total
        let mixture = r.cost_per_kg_mixture.unwrap();
        assert_relative_eq!(mixture * r.total_recovered_kg, r.total_cost_per_tonne, max_relative = 1e-9);

        assert_relative_eq!(
            r.operating_cost + r.capex_per_tonne,
            r.total_cost_per_tonne,
            max_relative = 1e-12
        );
    }

    // 80 kWh * 0.06 + (30 + 20 + 15 * 1.4) + 50 + 50 + 20
    let bio = &results[2];
    assert_eq!(bio.method, "Bioleaching (Consortium)");
    assert_relative_eq!(bio.total_cost_per_tonne, 195.8, epsilon = 1e-9);
}

#[test]
fn test_zero_recovery_method_is_undefined_not_panicking() {
    let feed = Feedstock::placeholder();
    let idle = MethodProfile::new("Idle", 0.0, 0.0, 0.0, Default::default()).unwrap();

    let r = evaluate(&feed, &idle, &reference_economics());

    assert_eq!(r.total_recovered_kg, 0.0);
    assert!(r.cost_per_kg_mixture.is_none());
    for metal in Metal::ALL {
        assert!(r.cost_per_kg_of(metal).is_none());
    }
    assert_eq!(format_money(r.cost_per_kg_mixture, Currency::USD), "N/A");
}

#[test]
fn test_predicted_bioleaching_recovery_feeds_comparison() {
    let model = BioleachResponseModel::new(CombinationRule::MultiplicativeWeighted);
    let profile = Organism::AcidithiobacillusFerrooxidans.profile();
    let point = OperatingPoint::new(2.0, 30.0, 3.0).unwrap();
    let prediction = model.predict_all(&profile, &point).unwrap();

    let culture = BioCulture::Single(Organism::AcidithiobacillusFerrooxidans);
    let bio = bioleaching(culture, &BioConditionCosts::default(), Some(prediction.recovery.clone()))
        .unwrap();
    assert_relative_eq!(bio.recovery(Metal::Cu), prediction.recovery_of(Metal::Cu));

    let comparison = MethodComparison::new(
        Feedstock::placeholder(),
        reference_economics(),
        vec![pyrometallurgy(), bio],
    );
    let results = comparison.run();

    // Cu at the ferrooxidans optimum: 0.85 * (0.6 + 0.4 * 3/3.5) ≈ 0.801
    assert_relative_eq!(results[1].recovered(Metal::Cu), 200.0 * 0.801, epsilon = 0.3);

    let best = cheapest_per_kg_mixture(&results).unwrap();
    assert!(best.cost_per_kg_mixture.unwrap() <= results[0].cost_per_kg_mixture.unwrap());
}

#[test]
fn test_scenario_json_to_report_frame() {
    let json = r#"{
        "economics": { "electricity_price": 0.06, "labor_cost": 50, "env_cost_proxy": 20 },
        "feedstock": { "mass_tonnes": 1.0, "metal_fractions": { "Au": 0.0005, "Pd": 0.0002, "Cu": 0.2 } },
        "methods": [
            { "name": "Pyrometallurgy", "energy_kwh_per_tonne": 1500, "chemical_cost_per_tonne": 30,
              "capex_per_tonne": 200, "recovery": { "Au": 0.95, "Pd": 0.9, "Cu": 0.95 } },
            { "name": "Gold only", "energy_kwh_per_tonne": 10, "chemical_cost_per_tonne": 5,
              "capex_per_tonne": 10, "recovery": { "Au": 0.5 } }
        ]
    }"#;
    let scenario: Scenario = serde_json::from_str(json).unwrap();
    let results = scenario.comparison().unwrap().run();

    let records = method_records(&results);
    assert!(records[1].cost_per_kg_cu.is_none());
    assert!(records[1].cost_per_kg_au.is_some());

    let df = method_frame(&records).unwrap();
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("cost_per_kg_cu").unwrap().null_count(), 1);
}
