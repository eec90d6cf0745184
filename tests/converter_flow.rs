use httpmock::prelude::*;
use the_converter::{
    convert, format_result, Conversion, Converter, ConverterSettings, UnitDomain,
};

fn settings_for(server: &MockServer) -> ConverterSettings {
    ConverterSettings {
        rates_url: server.url("/v6/latest/USD"),
        ..ConverterSettings::default()
    }
}

#[tokio::test]
async fn currency_tab_fetches_rates_and_formats_rupees() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v6/latest/USD");
            then.status(200).json_body(serde_json::json!({
                "result": "success",
                "base_code": "USD",
                "time_last_update_unix": 1_700_000_000,
                "rates": { "USD": 1, "EUR": 0.9, "INR": 83.0 }
            }));
        })
        .await;

    let converter = Converter::from_settings(settings_for(&server)).unwrap();
    let mut session = converter.new_session();

    let status = converter.switch_domain(&mut session, UnitDomain::Currency).await;
    assert!(status.error.is_none());
    assert!(status.last_updated.is_some());

    session.set_amount("2,00,000");
    session.select_from("INR");
    session.select_to("INR");
    let view = converter.view(&session);
    assert_eq!(view.amount, "2,00,000");
    assert_eq!(view.result, "2.00 L");

    session.select_to("USD");
    session.set_amount("830000000");
    assert_eq!(converter.view(&session).result, "10M");

    // Only the first activation fetches
    converter.switch_domain(&mut session, UnitDomain::Length).await;
    converter.switch_domain(&mut session, UnitDomain::Currency).await;
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn unreachable_service_reports_error_and_physical_tabs_still_work() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v6/latest/USD");
            then.status(500);
        })
        .await;

    let converter = Converter::from_settings(settings_for(&server)).unwrap();
    let mut session = converter.new_session();

    let status = converter.switch_domain(&mut session, UnitDomain::Currency).await;
    assert_eq!(status.error.as_deref(), Some("Unable to connect to currency service."));
    assert!(!status.loading);

    converter.switch_domain(&mut session, UnitDomain::Length).await;
    session.select_from("km");
    session.select_to("m");
    assert_eq!(converter.view(&session).result, "1,000");
}

#[test]
fn documented_examples() {
    assert_eq!(convert(UnitDomain::Weight, "1000", "g", "kg", None), Conversion::Value(1.0));
    assert_eq!(convert(UnitDomain::Length, "1", "km", "m", None), Conversion::Value(1000.0));
    assert_eq!(format_result(150_000.0, "USD"), "150K");
    assert_eq!(format_result(15_000_000.0, "INR"), "1.50 Cr");
    assert_eq!(format_result(99_999.0, "USD"), "99,999");
}
