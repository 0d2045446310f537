use market_cli::logging;

#[test]
fn second_subscriber_install_is_reported() {
    logging::init(false).unwrap();
    let err = logging::init(true).unwrap_err();
    assert!(err.to_string().contains("failed to initialise logging"));
}
