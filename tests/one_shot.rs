mod common;

use chrono::{FixedOffset, TimeZone, Utc};
use nimbus_weather::{
    app::settings::load_saved_location,
    domain::alignment::Reference,
    one_shot_report,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn reference() -> Reference {
    Reference::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 2, 0, 0).unwrap(),
        FixedOffset::east_opt(9 * 3600).unwrap(),
    )
}

async fn mock_backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ipwho/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::ipwho_honolulu()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ipapi/json/"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timezone", "Pacific/Honolulu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::honolulu_payload()))
        .mount(&server)
        .await;
    server
}

fn cli_for(server: &MockServer) -> nimbus_weather::cli::Cli {
    let mut cli = common::cli();
    cli.forecast_url = Some(format!("{}/v1/forecast", server.uri()));
    cli.ipapi_url = Some(format!("{}/ipapi/json/", server.uri()));
    cli.ipwho_url = Some(format!("{}/ipwho/", server.uri()));
    cli
}

#[tokio::test]
async fn snapshot_starts_on_honolulu_today_for_a_tokyo_observer() {
    let server = mock_backend().await;
    let report = one_shot_report(&cli_for(&server), None, reference())
        .await
        .expect("report");

    insta::assert_snapshot!(report, @r"
    Honolulu, United States
    Now    PCL  27°C  Partly cloudy
    Today  PCL  29° / 22°  Partly cloudy
    Sat    RAN  27° / 22°  Rain
    Sun    SHW  27° / 22°  Showers
    Mon    PCL  28° / 21°  Partly cloudy
    ");
}

#[tokio::test]
async fn fahrenheit_and_day_count_apply() {
    let server = mock_backend().await;
    let mut cli = cli_for(&server);
    cli.units = nimbus_weather::cli::UnitsArg::Fahrenheit;
    cli.days = 7;

    let report = one_shot_report(&cli, None, reference()).await.expect("report");
    let lines: Vec<&str> = report.lines().collect();
    // Location and current conditions, then six days left in the series.
    assert_eq!(lines.len(), 8);
    assert!(lines[1].contains("81°F"));
    assert!(lines[6].starts_with("Tue"));
    assert!(lines[6].contains("-- / 70°"));
}

#[tokio::test]
async fn remember_persists_and_is_reused() {
    let server = mock_backend().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let preference = dir.path().join("location.json");

    let mut cli = cli_for(&server);
    cli.remember = true;
    one_shot_report(&cli, Some(preference.clone()), reference())
        .await
        .expect("first report");

    let saved = load_saved_location(&preference).expect("location saved");
    assert_eq!(saved, common::honolulu_fix());

    // With lookups broken, the saved preference still resolves.
    cli.remember = false;
    cli.ipapi_url = Some("http://127.0.0.1:9/".to_string());
    cli.ipwho_url = Some("http://127.0.0.1:9/".to_string());
    let report = one_shot_report(&cli, Some(preference), reference())
        .await
        .expect("second report");
    assert!(report.starts_with("Honolulu, United States\n"));
}
