use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{info, warn};
use record_mapper::{MapOption, MapOptions, MappingError, map, map_with_options};

use model::{Patch, User, UserDto, UserResponse};

/// A user payload in the shape a typical JSON API returns it
const SAMPLE_USER: &str = r#"{
    "id": 2,
    "name": "Ervin Howell",
    "username": "Antonette",
    "email": "Shanna@melissa.tv",
    "phone": "010-692-6593 x09125",
    "website": "anastasia.net",
    "address": {
        "street": "Victor Plains",
        "suite": "Suite 879",
        "city": "Wisokyburgh",
        "zipcode": "90566-7771",
        "geo": { "lat": "-43.9509", "lng": "-34.4618" }
    },
    "company": {
        "name": "Deckow-Crist",
        "catchPhrase": "Proactive didactic contingency",
        "bs": "synergize scalable supply-chains"
    }
}"#;

mod model {
    use record_mapper::Mappable;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Deserialize, Mappable)]
    pub struct GeoDto {
        #[map(name = "latitude", conv = "float64")]
        pub lat: String,
        #[map(name = "longitude", conv = "float64")]
        pub lng: String,
    }

    #[derive(Debug, Default, Deserialize, Mappable)]
    pub struct AddressDto {
        pub street: String,
        pub suite: String,
        pub city: String,
        pub zipcode: String,
        pub geo: GeoDto,
    }

    #[derive(Debug, Default, Deserialize, Mappable)]
    pub struct CompanyDto {
        pub name: String,
        #[serde(rename = "catchPhrase")]
        #[map(name = "CatchPhrase")]
        pub catch_phrase: String,
        #[map(name = "BS")]
        pub bs: String,
    }

    #[derive(Debug, Default, Deserialize, Mappable)]
    pub struct UserDto {
        pub id: i64,
        pub name: String,
        pub username: String,
        pub email: String,
        pub phone: String,
        pub website: String,
        pub address: AddressDto,
        pub company: CompanyDto,
    }

    #[derive(Debug, Default, Mappable)]
    pub struct Geo {
        pub latitude: f64,
        pub longitude: f64,
    }

    #[derive(Debug, Default, Mappable)]
    pub struct Address {
        pub street: String,
        pub suite: String,
        pub city: String,
        pub zipcode: String,
        pub geo: Geo,
    }

    #[derive(Debug, Default, Mappable)]
    pub struct Company {
        pub name: String,
        #[map(name = "CatchPhrase")]
        pub catch_phrase: String,
        #[map(name = "BS")]
        pub bs: String,
    }

    #[derive(Debug, Default, Mappable)]
    pub struct User {
        pub id: i32,
        pub name: String,
        pub username: String,
        pub email: String,
        pub phone: String,
        pub website: String,
        pub address: Address,
        pub company: Company,
    }

    /// Partial update, empty strings mean "unchanged"
    #[derive(Debug, Default, Mappable)]
    pub struct Patch {
        pub email: String,
        pub website: String,
    }

    #[derive(Debug, Default, Serialize, Mappable)]
    pub struct GeoResponse {
        pub latitude: f64,
        pub longitude: f64,
    }

    #[derive(Debug, Default, Serialize, Mappable)]
    pub struct AddressResponse {
        pub street: String,
        pub suite: String,
        pub city: String,
        pub zipcode: String,
        pub geo: GeoResponse,
    }

    #[derive(Debug, Default, Serialize, Mappable)]
    pub struct CompanyResponse {
        pub name: String,
        #[serde(rename = "catch_phrase")]
        #[map(name = "CatchPhrase")]
        pub catch_phrase: String,
        #[map(name = "BS")]
        pub bs: String,
    }

    #[derive(Debug, Default, Serialize, Mappable)]
    pub struct UserResponse {
        pub id: i64,
        pub name: String,
        pub username: String,
        pub email: String,
        pub phone: String,
        pub website: String,
        pub address: AddressResponse,
        pub company: CompanyResponse,
    }
}

/// Print the error body a handler would send, then hand the error back
fn report(err: MappingError, message: &str) -> anyhow::Error {
    match serde_json::to_string_pretty(&err.report(message)) {
        Ok(body) => warn!("{message}:\n{body}"),
        Err(e) => warn!("{message}: {err} (report not serializable: {e})"),
    }
    err.into()
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Read the payload from the first argument, or use the built-in sample
    let payload = match std::env::args().nth(1) {
        Some(path) => {
            info!("Reading user payload from: {path}");
            std::fs::read_to_string(Path::new(&path))
                .with_context(|| format!("failed to read {path}"))?
        }
        None => {
            info!("No payload given, using the built-in sample");
            SAMPLE_USER.to_string()
        }
    };
    let dto: UserDto = serde_json::from_str(&payload).context("failed to decode user payload")?;

    // Transport to domain, every field must be filled
    let start = Instant::now();
    let mut user = User::default();
    map_with_options(&mut user, &dto, &MapOptions::from(MapOption::StrictMode))
        .map_err(|err| report(err, "failed to map payload to domain"))?;
    info!("Mapped {} into the domain model in {:?}", user.username, start.elapsed());

    // Merge a partial update, keeping fields the patch leaves empty
    let patch = Patch {
        email: "ervin@example.org".to_string(),
        website: String::new(),
    };
    map_with_options(&mut user, &patch, &MapOptions::new().with_ignore_zero_source())
        .map_err(|err| report(err, "failed to apply patch"))?;
    info!("Patched email to {}, website still {}", user.email, user.website);

    // Domain to response
    let start = Instant::now();
    let mut response = UserResponse::default();
    let options: MapOptions = [MapOption::StrictMode, MapOption::MaxDepth(10)]
        .into_iter()
        .collect();
    map_with_options(&mut response, &user, &options)
        .map_err(|err| report(err, "mapping failed"))?;
    info!("Mapped the response in {:?}", start.elapsed());

    // Mapping back into a fresh DTO renders coordinates as text again
    let mut echo = UserDto::default();
    map(&mut echo, &user).map_err(|err| report(err, "failed to map domain to transport"))?;
    info!(
        "Coordinates as text: lat={} lng={}",
        echo.address.geo.lat, echo.address.geo.lng
    );

    println!("{}", serde_json::to_string_pretty(&response)?);

    let stats = record_mapper::SchemaCache::global().stats();
    info!(
        "Schema cache: {} schemas, {} plans, {} hits",
        stats.schema_resolutions, stats.plan_resolutions, stats.plan_hits
    );

    Ok(())
}
