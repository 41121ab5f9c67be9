use mtg_proxy::*;

#[test]
fn test_default_options() {
    let options = ProxyOptions::default();
    assert_eq!(options.dpi, 300);
    assert_eq!(options.cards_per_page(), 9);
    assert_eq!(options.paper_size, PaperSize::Letter);
    assert!(options.use_cache);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_zero_grid() {
    let options = ProxyOptions {
        columns: 0,
        ..Default::default()
    };
    match options.validate() {
        Err(ProxyError::Config(msg)) => assert!(msg.contains("at least one")),
        _ => panic!("Expected Config error"),
    }
}

#[tokio::test]
async fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");

    let options = ProxyOptions {
        dpi: 600,
        use_cache: false,
        paper_size: PaperSize::Custom {
            width_mm: 250.0,
            height_mm: 300.0,
        },
        ..Default::default()
    };
    options.save(&path).await.unwrap();

    let loaded = ProxyOptions::load(&path).await.unwrap();
    assert_eq!(loaded, options);
}

#[tokio::test]
async fn test_partial_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    std::fs::write(&path, r#"{ "dpi": 150, "paper_size": "A4" }"#).unwrap();

    let loaded = ProxyOptions::load(&path).await.unwrap();

    assert_eq!(loaded.dpi, 150);
    assert_eq!(loaded.paper_size, PaperSize::A4);
    assert_eq!(loaded.rows, 3);
    assert_eq!(loaded.request_delay_ms, 100);
}

#[tokio::test]
async fn test_load_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("options.json");
    std::fs::write(&path, "not json").unwrap();

    let result = ProxyOptions::load(&path).await;
    assert!(matches!(result, Err(ProxyError::Config(_))));
}
