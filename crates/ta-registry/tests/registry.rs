//! Registry-level behaviour across every indicator.

use std::thread;

use ta_core::{Bar, Diagnostics, IndicatorError, Output};
use ta_registry::{IndicatorRegistry, IndicatorType};

fn random_walk(n: usize, seed: u64) -> Vec<Bar> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    };

    let mut close: f64 = 100.0;
    (0..n)
        .map(|i| {
            let open = close;
            close = (close + (next() - 0.5) * 4.0).max(1.0);
            let high = open.max(close) + next() * 2.0;
            let low = (open.min(close) - next() * 2.0).max(0.5);
            Bar::new(1_700_000_000 + i as i64 * 3600, open, high, low, close, next() * 5000.0)
        })
        .collect()
}

#[test]
fn every_indicator_produces_finite_output() {
    let registry = IndicatorRegistry::new();
    let bars = random_walk(300, 17);

    for entry in registry.list() {
        let mut diagnostics = Diagnostics::new();
        let output = registry
            .calculate_with(entry.type_id.as_str(), &bars, None, &mut diagnostics)
            .unwrap();

        assert!(!output.is_empty(), "{} produced no output", entry.type_id);
        assert!(output.is_finite(), "{} leaked a non-finite value", entry.type_id);
        assert!(diagnostics.is_empty(), "{}: {:?}", entry.type_id, diagnostics);
        for (name, points) in output.lines() {
            assert!(points.len() <= bars.len(), "{}.{name} too long", entry.type_id);
        }
    }
}

#[test]
fn repeated_calculations_are_bit_identical() {
    let registry = IndicatorRegistry::new();
    let bars = random_walk(200, 23);

    for kind in IndicatorType::ALL {
        let first = registry.calculate(kind.as_str(), &bars, None).unwrap();
        let second = registry.calculate(kind.as_str(), &bars, None).unwrap();
        assert_eq!(first, second, "{kind}");
    }
}

#[test]
fn concurrent_calculations_match_sequential() {
    let registry = IndicatorRegistry::global();
    let bars = random_walk(500, 31);

    let sequential: Vec<Output> = IndicatorType::ALL
        .into_iter()
        .map(|kind| registry.calculate(kind.as_str(), &bars, None).unwrap())
        .collect();

    let concurrent: Vec<Output> = thread::scope(|scope| {
        let handles: Vec<_> = IndicatorType::ALL
            .into_iter()
            .map(|kind| {
                let bars = &bars;
                scope.spawn(move || registry.calculate(kind.as_str(), bars, None).unwrap())
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, concurrent);
}

#[test]
fn short_series_yield_empty_output_not_errors() {
    let registry = IndicatorRegistry::new();
    let bars = random_walk(1, 5);

    for kind in IndicatorType::ALL {
        let output = registry.calculate(kind.as_str(), &bars, None).unwrap();
        match kind {
            // Defined from the first bar
            IndicatorType::Obv | IndicatorType::Vwap => assert!(!output.is_empty()),
            _ => assert!(output.is_empty(), "{kind}"),
        }
    }
}

#[test]
fn unknown_type_is_a_hard_error() {
    let registry = IndicatorRegistry::new();

    assert_eq!(
        registry.calculate("keltner", &random_walk(50, 1), None),
        Err(IndicatorError::UnknownIndicatorType("keltner".to_string()))
    );
}

#[test]
fn entries_serialize_for_listing() {
    let registry = IndicatorRegistry::new();
    let json = serde_json::to_value(registry.list()).unwrap();

    assert_eq!(json[0]["type_id"], "sma");
    assert_eq!(json[0]["default_params"]["period"], 20);
    assert!(json[0].get("calculate").is_none());
}

#[test]
fn huge_periods_yield_empty_output_instead_of_panicking() {
    let registry = IndicatorRegistry::new();
    let bars = random_walk(50, 5);

    for entry in registry.list() {
        let defaults = serde_json::to_value(&entry.default_params).unwrap();
        let integer_fields = defaults
            .as_object()
            .into_iter()
            .flatten()
            .filter(|(_, value)| value.is_u64())
            .map(|(key, _)| key.clone());

        for field in integer_fields {
            let mut fields = serde_json::Map::new();
            fields.insert(field.clone(), u64::MAX.into());
            let params = serde_json::Value::Object(fields);
            let mut diagnostics = Diagnostics::new();
            let output = registry
                .calculate_with(entry.type_id.as_str(), &bars, Some(&params), &mut diagnostics)
                .unwrap();

            assert!(output.is_finite(), "{}.{field}", entry.type_id);
            assert!(!diagnostics.has_errors(), "{}.{field}: {:?}", entry.type_id, diagnostics);
        }
    }

    let mut diagnostics = Diagnostics::new();
    let aroon = registry
        .calculate_with("aroon", &bars, Some(&serde_json::json!({"period": u64::MAX})), &mut diagnostics)
        .unwrap();
    assert!(aroon.is_empty());
    assert_eq!(diagnostics.len(), 1);

    let stoch_rsi = registry
        .calculate(
            "stoch_rsi",
            &bars,
            Some(&serde_json::json!({"rsi_period": u64::MAX, "stoch_period": 2})),
        )
        .unwrap();
    assert!(stoch_rsi.is_empty());
}

#[test]
fn awesome_oscillator_reports_direction_line() {
    let registry = IndicatorRegistry::new();
    let bars = random_walk(120, 31);
    let output = registry.calculate("ao", &bars, None).unwrap();

    let values = output.line(Output::VALUE).unwrap();
    let direction = output.line("direction").unwrap();
    assert_eq!(values.len(), direction.len());
    assert!(!values.is_empty());

    let mut previous = 0.0;
    for (value, sign) in values.iter().zip(direction) {
        assert_eq!(value.time, sign.time);
        let expected = if value.value > previous { 1.0 } else { -1.0 };
        assert_eq!(sign.value, expected);
        previous = value.value;
    }
}
