use record_mapper::{ErrorReason, MapOptions, Mappable, map, map_with_options};

use crate::utils::{
    AddressDto, AddressResponse, Company, CompanyDto, CreateUserRequestDto, CreateUserResponseDto,
    Geo, GeoDto, User, UserResponse, sample_user, sample_user_dto,
};

#[test]
fn test_geo_text_coordinates_become_floats() {
    let dto = GeoDto {
        lat: "40.7".into(),
        lng: "-74.0".into(),
    };
    let mut geo = Geo::default();

    map(&mut geo, &dto).unwrap();

    assert_eq!(
        geo,
        Geo {
            latitude: 40.7,
            longitude: -74.0,
        }
    );
}

#[test]
fn test_geo_floats_become_text() {
    let geo = Geo {
        latitude: 40.7,
        longitude: -74.0,
    };
    let mut dto = GeoDto::default();

    map(&mut dto, &geo).unwrap();

    assert_eq!(dto.lat, "40.7");
    assert_eq!(dto.lng, "-74");
}

#[test]
fn test_catch_phrase_alias_pairs_differently_named_fields() {
    let dto = CompanyDto {
        name: "Romaguera-Crona".into(),
        catch_phrase: "Multi-layered client-server neural-net".into(),
        bs: "harness real-time e-markets".into(),
    };
    let mut company = Company::default();

    map_with_options(&mut company, &dto, &MapOptions::new().with_strict_mode()).unwrap();

    assert_eq!(company.catch_phrase, "Multi-layered client-server neural-net");
    assert_eq!(company.bs, "harness real-time e-markets");
}

#[test]
fn test_alias_mismatch_is_reported_by_destination_path() {
    // Same shape as `Company` but without the aliases
    #[derive(Debug, Default, Mappable)]
    struct PlainCompany {
        name: String,
        catch_phrase: String,
        bs: String,
    }

    let source = PlainCompany {
        name: "Acme".into(),
        catch_phrase: "We make everything".into(),
        bs: "synergy".into(),
    };
    let mut company = Company::default();

    let err = map_with_options(&mut company, &source, &MapOptions::new().with_strict_mode())
        .unwrap_err();

    assert_eq!(err.reason, ErrorReason::UnmappedField);
    assert_eq!(err.field_path, "catch_phrase");
    assert_eq!(err.src_type, "PlainCompany");
    assert_eq!(err.dst_type, "Company");
    let detail = err.detail.unwrap();
    assert!(detail.contains("`CatchPhrase`"));
    assert!(detail.contains("catch_phrase, bs"));
}

#[test]
fn test_user_dto_maps_strictly_into_domain() {
    let dto = sample_user_dto();
    let mut user = User::default();

    map_with_options(&mut user, &dto, &MapOptions::new().with_strict_mode()).unwrap();

    assert_eq!(user, sample_user());
}

#[test]
fn test_domain_maps_strictly_into_response() {
    let user = sample_user();
    let mut response = UserResponse::default();

    map_with_options(
        &mut response,
        &user,
        &MapOptions::new().with_strict_mode().with_max_depth(10),
    )
    .unwrap();

    assert_eq!(response.id, 1);
    assert_eq!(response.address.geo.latitude, -37.3159);
    assert_eq!(response.company.catch_phrase, user.company.catch_phrase);
}

#[test]
fn test_create_request_skips_zero_fields() {
    let user = User {
        name: "Palinho".into(),
        email: "palinho@example.com".into(),
        ..User::default()
    };
    let mut request = CreateUserRequestDto {
        website: "kept.example".into(),
        ..CreateUserRequestDto::default()
    };

    map_with_options(
        &mut request,
        &user,
        &MapOptions::new().with_ignore_zero_source(),
    )
    .unwrap();

    assert_eq!(request.name, "Palinho");
    assert_eq!(request.email, "palinho@example.com");
    // Zero in the source, so the destination keeps its value
    assert_eq!(request.website, "kept.example");
    // The all-zero address is skipped as a whole
    assert_eq!(request.address, AddressDto::default());
}

#[test]
fn test_create_response_merges_into_request_echo() {
    let request = CreateUserRequestDto {
        name: "Palinho".into(),
        username: "usuario PCD".into(),
        email: "palinho@example.com".into(),
        address: AddressDto {
            city: "Lisbon".into(),
            geo: GeoDto {
                lat: "38.72".into(),
                lng: "-9.14".into(),
            },
            ..AddressDto::default()
        },
        ..CreateUserRequestDto::default()
    };
    let created = CreateUserResponseDto {
        id: 11,
        name: "Palinho".into(),
        username: String::new(),
        email: "palinho@example.com".into(),
    };

    let mut response = UserResponse::default();
    map(&mut response, &request).unwrap();
    map_with_options(
        &mut response,
        &created,
        &MapOptions::new().with_ignore_zero_source(),
    )
    .unwrap();

    assert_eq!(response.id, 11);
    assert_eq!(response.username, "usuario PCD");
    assert_eq!(response.address.city, "Lisbon");
    assert_eq!(response.address.geo.latitude, 38.72);
    assert_eq!(response.address.geo.longitude, -9.14);
}

#[test]
fn test_mapping_is_idempotent() {
    let dto = sample_user_dto();

    let mut first = User::default();
    map(&mut first, &dto).unwrap();
    let mut second = User::default();
    map(&mut second, &dto).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, sample_user());
}

#[test]
fn test_merge_law_preserves_fields_without_source() {
    #[derive(Debug, Default, Mappable)]
    struct CityOnly {
        city: String,
    }

    let mut address = AddressResponse {
        street: "Kulas Light".into(),
        city: "Gwenborough".into(),
        ..AddressResponse::default()
    };
    map(
        &mut address,
        &CityOnly {
            city: "Wisokyburgh".into(),
        },
    )
    .unwrap();

    assert_eq!(address.city, "Wisokyburgh");
    assert_eq!(address.street, "Kulas Light");
}

#[test]
fn test_failed_mapping_leaves_earlier_fields_written() {
    let mut dto = sample_user_dto();
    dto.address.geo.lat = "north".into();
    let mut user = User::default();

    let err = map(&mut user, &dto).unwrap_err();

    assert_eq!(err.reason, ErrorReason::ConversionFailed);
    assert_eq!(err.field_path, "address.geo.latitude");
    assert_eq!(err.src_type, "GeoDto");
    assert_eq!(err.dst_type, "Geo");
    // Fields before the failing one were already copied
    assert_eq!(user.name, "Leanne Graham");
    assert_eq!(user.address.city, "Gwenborough");
    // Fields after it were not
    assert_eq!(user.company, Company::default());
}
