use chrono::NaiveDate;
use record_mapper::{ErrorReason, Mappable, Mapper, MapperConfig, map};

use crate::utils::{Geo, GeoDto};

#[derive(Debug, Default, Mappable)]
struct PriceText {
    amount: String,
}

#[derive(Debug, Default, Mappable)]
struct Price {
    amount: f64,
}

#[derive(Debug, Default, Mappable)]
struct Quantity {
    amount: u8,
}

#[test]
fn test_numeric_text_parses_into_floats() {
    let mut price = Price::default();
    map(
        &mut price,
        &PriceText {
            amount: "12.5".into(),
        },
    )
    .unwrap();
    assert_eq!(price.amount, 12.5);
}

#[test]
fn test_unparsable_text_fails_conversion() {
    let mut price = Price {
        amount: 3.0,
    };
    let err = map(
        &mut price,
        &PriceText {
            amount: "abc".into(),
        },
    )
    .unwrap_err();

    assert_eq!(err.reason, ErrorReason::ConversionFailed);
    assert_eq!(err.field_path, "amount");
    assert_eq!(err.src_type, "PriceText");
    assert_eq!(err.dst_type, "Price");
    assert!(err.detail.unwrap().contains("abc"));
    assert_eq!(price.amount, 3.0);
}

#[test]
fn test_narrowing_is_range_checked() {
    let mut quantity = Quantity::default();
    let err = map(&mut quantity, &Price { amount: 300.0 }).unwrap_err();
    assert_eq!(err.reason, ErrorReason::ConversionFailed);

    let err = map(&mut quantity, &Price { amount: 2.5 }).unwrap_err();
    assert_eq!(err.reason, ErrorReason::ConversionFailed);

    map(&mut quantity, &Price { amount: 200.0 }).unwrap();
    assert_eq!(quantity.amount, 200);
}

#[test]
fn test_numbers_format_as_text() {
    let mut text = PriceText::default();
    map(&mut text, &Quantity { amount: 7 }).unwrap();
    assert_eq!(text.amount, "7");

    map(&mut text, &Price { amount: 0.25 }).unwrap();
    assert_eq!(text.amount, "0.25");
}

#[test]
fn test_source_directive_routes_through_an_intermediate_kind() {
    #[derive(Debug, Default, Mappable)]
    struct Counter {
        #[map(conv = "int")]
        amount: String,
    }

    let mut price = Price::default();
    map(
        &mut price,
        &Counter {
            amount: "42".into(),
        },
    )
    .unwrap();
    assert_eq!(price.amount, 42.0);

    // Valid as a float, but not as the directive's integer
    let err = map(
        &mut price,
        &Counter {
            amount: "42.5".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.reason, ErrorReason::ConversionFailed);
}

#[test]
fn test_source_directive_wins_over_destination_directive() {
    #[derive(Debug, Default, Mappable)]
    struct Counter {
        #[map(conv = "int")]
        amount: String,
    }

    #[derive(Debug, Default, Mappable)]
    struct Measured {
        #[map(conv = "float32")]
        amount: f64,
    }

    let mut measured = Measured::default();
    map(
        &mut measured,
        &Counter {
            amount: "42".into(),
        },
    )
    .unwrap();
    assert_eq!(measured.amount, 42.0);

    // Would pass through float32, but the source's int directive applies
    let err = map(
        &mut measured,
        &Counter {
            amount: "42.5".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.reason, ErrorReason::ConversionFailed);
    assert_eq!(measured.amount, 42.0);
}

#[test]
fn test_directive_is_ignored_for_matching_kinds() {
    let dto = GeoDto {
        lat: "40.7".into(),
        lng: "-74.0".into(),
    };
    let mut copy = GeoDto::default();

    map(&mut copy, &dto).unwrap();

    assert_eq!(copy, dto);
}

#[test]
fn test_missing_coercion_is_reported() {
    #[derive(Debug, Default, Mappable)]
    struct Dated {
        amount: NaiveDate,
    }

    let mut price = Price::default();
    let err = map(
        &mut price,
        &Dated {
            amount: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        },
    )
    .unwrap_err();

    assert_eq!(err.reason, ErrorReason::NoCoercionAvailable);
    assert_eq!(err.field_path, "amount");
    assert_eq!(err.detail.as_deref(), Some("no coercion from date to float64"));
}

#[test]
fn test_record_and_scalar_shapes_do_not_mix() {
    #[derive(Debug, Default, Mappable)]
    struct Located {
        geo: Geo,
    }

    #[derive(Debug, Default, Mappable)]
    struct Flattened {
        geo: String,
    }

    let mut flat = Flattened::default();
    let err = map(&mut flat, &Located::default()).unwrap_err();

    assert_eq!(err.reason, ErrorReason::NoCoercionAvailable);
    assert_eq!(err.field_path, "geo");
    assert_eq!(err.detail.as_deref(), Some("cannot map Geo into string"));
}

#[test]
fn test_dates_parse_and_format_through_text() {
    #[derive(Debug, Default, Mappable)]
    struct Event {
        day: NaiveDate,
    }

    #[derive(Debug, Default, Mappable)]
    struct EventText {
        day: String,
    }

    let mut event = Event::default();
    map(
        &mut event,
        &EventText {
            day: "15.01.2023".into(),
        },
    )
    .unwrap();
    assert_eq!(event.day, NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());

    let mut text = EventText::default();
    map(&mut text, &event).unwrap();
    assert_eq!(text.day, "2023-01-15");

    let err = map(
        &mut event,
        &EventText {
            day: "someday".into(),
        },
    )
    .unwrap_err();
    assert_eq!(err.reason, ErrorReason::ConversionFailed);
}

#[test]
fn test_date_output_format_is_configurable() {
    #[derive(Debug, Default, Mappable)]
    struct Event {
        day: NaiveDate,
    }

    #[derive(Debug, Default, Mappable)]
    struct EventText {
        day: String,
    }

    let mut config = MapperConfig::default();
    config.date_format_config.default_format = "%d/%m/%Y".to_string();
    let mapper = Mapper::new(std::sync::Arc::default(), config);

    let mut text = EventText::default();
    mapper
        .map(
            &mut text,
            &Event {
                day: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            },
        )
        .unwrap();
    assert_eq!(text.day, "15/01/2023");
}

#[test]
fn test_invalid_date_output_format_fails_conversion() {
    #[derive(Debug, Default, Mappable)]
    struct When {
        day: NaiveDate,
    }

    #[derive(Debug, Default, Mappable)]
    struct WhenText {
        day: String,
    }

    let mut config = MapperConfig::default();
    config.date_format_config.default_format = "%Q".to_string();
    let mapper = Mapper::new(std::sync::Arc::default(), config);

    let mut text = WhenText::default();
    let err = mapper
        .map(
            &mut text,
            &When {
                day: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            },
        )
        .unwrap_err();

    assert_eq!(err.reason, ErrorReason::ConversionFailed);
    assert_eq!(err.field_path, "day");
    assert_eq!(err.src_type, "When");
    assert_eq!(err.dst_type, "WhenText");
    assert!(text.day.is_empty());
}

#[test]
fn test_scalar_lists_are_resized_and_coerced() {
    #[derive(Debug, Default, Mappable)]
    struct Readings {
        values: Vec<String>,
    }

    #[derive(Debug, Default, Mappable)]
    struct Samples {
        values: Vec<f32>,
    }

    let mut samples = Samples {
        values: vec![9.0; 5],
    };
    map(
        &mut samples,
        &Readings {
            values: vec!["1.5".into(), "2".into()],
        },
    )
    .unwrap();
    assert_eq!(samples.values, vec![1.5, 2.0]);

    let err = map(
        &mut samples,
        &Readings {
            values: vec!["3".into(), "x".into()],
        },
    )
    .unwrap_err();
    assert_eq!(err.reason, ErrorReason::ConversionFailed);
    assert_eq!(err.field_path, "values[1]");
}

#[test]
fn test_record_lists_map_elementwise() {
    #[derive(Debug, Default, Mappable)]
    struct Route {
        stops: Vec<GeoDto>,
    }

    #[derive(Debug, Default, Mappable)]
    struct Track {
        stops: Vec<Geo>,
    }

    let route = Route {
        stops: vec![
            GeoDto {
                lat: "1".into(),
                lng: "2".into(),
            },
            GeoDto {
                lat: "3".into(),
                lng: "oops".into(),
            },
        ],
    };

    let mut track = Track::default();
    let err = map(&mut track, &route).unwrap_err();

    assert_eq!(err.reason, ErrorReason::ConversionFailed);
    assert_eq!(err.field_path, "stops[1].longitude");
    assert_eq!(err.src_type, "GeoDto");
    assert_eq!(err.dst_type, "Geo");
    // The destination was resized and the first element written
    assert_eq!(track.stops.len(), 2);
    assert_eq!(
        track.stops[0],
        Geo {
            latitude: 1.0,
            longitude: 2.0,
        }
    );
    assert_eq!(track.stops[1].latitude, 3.0);
}

#[test]
fn test_list_and_scalar_shapes_do_not_mix() {
    #[derive(Debug, Default, Mappable)]
    struct Tagged {
        tags: Vec<String>,
    }

    #[derive(Debug, Default, Mappable)]
    struct Labelled {
        tags: String,
    }

    let mut labelled = Labelled::default();
    let err = map(
        &mut labelled,
        &Tagged {
            tags: vec!["a".into()],
        },
    )
    .unwrap_err();
    assert_eq!(err.reason, ErrorReason::NoCoercionAvailable);
}

#[test]
fn test_boxed_records_are_walked_through() {
    #[derive(Debug, Default, Mappable)]
    struct Boxed {
        geo: Box<GeoDto>,
    }

    #[derive(Debug, Default, Mappable)]
    struct Plain {
        geo: Geo,
    }

    let mut plain = Plain::default();
    map(
        &mut plain,
        &Boxed {
            geo: Box::new(GeoDto {
                lat: "10".into(),
                lng: "20".into(),
            }),
        },
    )
    .unwrap();
    assert_eq!(plain.geo.longitude, 20.0);
}
