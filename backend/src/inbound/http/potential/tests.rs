//! Handler tests for `POST /api/potential`.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::Trace;
use crate::domain::ports::MockSolarPotentialQuery;
use crate::domain::{
    BoundingBox, BuildingFeature, Error, FeatureCollection, PotentialCalculator, Properties,
};
use crate::inbound::http::validation::{INVALID_COORDS_MESSAGE, MISSING_COORDS_MESSAGE};

fn valid_body() -> Value {
    json!({"coords": {"south": 40.99, "west": 29.0, "north": 41.01, "east": 29.02}})
}

async fn post(
    query: MockSolarPotentialQuery,
    request: test::TestRequest,
) -> (StatusCode, Option<String>, Value) {
    let state = HttpState::new(Arc::new(query));
    let app = test::init_service(
        App::new()
            .wrap(Trace)
            .app_data(web::Data::new(state))
            .service(web::scope("/api").service(compute_potential)),
    )
    .await;
    let response = test::call_service(&app, request.uri("/api/potential").to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(crate::domain::TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body: Value = test::read_body_json(response).await;
    (status, trace_id, body)
}

fn untouched_query() -> MockSolarPotentialQuery {
    let mut query = MockSolarPotentialQuery::new();
    query.expect_potential_for().never();
    query
}

#[rstest]
#[case::empty_object(json!({}))]
#[case::null_coords(json!({"coords": null}))]
#[actix_web::test]
async fn missing_coords_is_bad_request(#[case] body: Value) {
    let (status, trace_id, body) =
        post(untouched_query(), test::TestRequest::post().set_json(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_COORDS_MESSAGE);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["traceId"].as_str(), trace_id.as_deref());
}

#[rstest]
#[actix_web::test]
async fn non_json_body_is_bad_request() {
    let request = test::TestRequest::post()
        .insert_header(("content-type", "text/plain"))
        .set_payload("south=40.99");

    let (status, _, body) = post(untouched_query(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], MISSING_COORDS_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn non_numeric_bound_is_bad_request() {
    let body = json!({"coords": {"south": "forty", "west": 29.0, "north": 41.01, "east": 29.02}});

    let (status, _, body) =
        post(untouched_query(), test::TestRequest::post().set_json(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_COORDS_MESSAGE);
    assert_eq!(body["details"]["field"], "coords.south");
}

#[rstest]
#[actix_web::test]
async fn numeric_strings_reach_the_query() {
    let expected = BoundingBox::try_new(40.99, 29.0, 41.01, 29.02).expect("finite bounds");
    let mut query = MockSolarPotentialQuery::new();
    query
        .expect_potential_for()
        .withf(move |bounds| *bounds == expected)
        .times(1)
        .returning(|_| Ok(PotentialOutcome::NoBuildings));
    let body = json!({"coords": {"south": "40.99", "west": "29.0", "north": "41.01", "east": "29.02"}});

    let (status, _, _) = post(query, test::TestRequest::post().set_json(body)).await;

    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[actix_web::test]
async fn no_buildings_returns_message() {
    let mut query = MockSolarPotentialQuery::new();
    query
        .expect_potential_for()
        .returning(|_| Ok(PotentialOutcome::NoBuildings));

    let (status, _, body) = post(query, test::TestRequest::post().set_json(valid_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": NO_BUILDINGS_MESSAGE}));
}

#[rstest]
#[actix_web::test]
async fn computed_report_is_returned_as_geojson() {
    let report = PotentialCalculator::default().compute_potential(FeatureCollection::new(vec![
        BuildingFeature::from_lon_lat(
            [(29.0, 41.0), (29.001, 41.0), (29.0, 41.001)],
            Properties::from([("building".to_owned(), "apartments".to_owned())]),
        ),
    ]));
    let mut query = MockSolarPotentialQuery::new();
    query
        .expect_potential_for()
        .return_once(move |_| Ok(PotentialOutcome::Computed(report)));

    let (status, _, body) = post(query, test::TestRequest::post().set_json(valid_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    let properties = &body["features"][0]["properties"];
    assert_eq!(properties["building"], "apartments");
    assert_eq!(properties["potential_level"], "high");
    let area = properties["area_sqm"].as_f64().expect("area is numeric");
    let kwh = properties["potential_kwh"].as_f64().expect("kwh is numeric");
    assert_eq!(kwh, area * 288.0);
}

#[rstest]
#[actix_web::test]
async fn internal_failure_returns_message_with_500() {
    let mut query = MockSolarPotentialQuery::new();
    query
        .expect_potential_for()
        .returning(|_| Err(Error::internal("projection failed")));

    let (status, _, body) = post(query, test::TestRequest::post().set_json(valid_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "projection failed");
    assert_eq!(body["code"], "internal_error");
}
