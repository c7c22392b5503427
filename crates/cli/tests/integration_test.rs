use airline_forecast_backtest::run_from_files;
use airline_forecast_core::{
    AppConfig, Dataset, ForecastError, MalformedRecordPolicy, MetricsFormatter, ModelKind,
};
use airline_forecast_data::CsvStorage;
use std::io::Write;

const TRAINING_CSV: &str = "\
departure_date,booking_date,cum_bookings
3/6/2017,2/20/2017,40
3/6/2017,2/27/2017,70
3/6/2017,3/6/2017,100
3/13/2017,2/27/2017,50
3/13/2017,3/6/2017,80
3/13/2017,3/13/2017,120
";

const VALIDATION_CSV: &str = "\
departure_date,booking_date,cum_bookings,naive_forecast
3/20/2017,3/13/2017,80,90
3/20/2017,3/20/2017,110,110
";

fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create csv");
    file.write_all(contents.as_bytes()).expect("write csv");
    path.to_string_lossy().into_owned()
}

fn config_with(dir: &tempfile::TempDir, validation_csv: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.data.training_path = write_csv(dir, "airline_booking_trainingData.csv", TRAINING_CSV);
    config.data.validation_path =
        write_csv(dir, "airline_booking_validationData.csv", validation_csv);
    config
}

#[test]
fn test_evaluate_us_formatted_dates() {
    let dir = tempfile::tempdir().unwrap();
    let results = run_from_files(&config_with(&dir, VALIDATION_CSV)).expect("evaluation failed");

    assert_eq!(results.training_rows, 6);
    assert_eq!(results.validation_rows, 2);
    assert!((results.benchmark.total_abs_error - 20.0).abs() < 1e-9);

    for (model, expected) in ModelKind::ALL.into_iter().zip([0.0, 25.0, 35.37]) {
        let score = results.score(model).unwrap().score;
        assert!((score - expected).abs() < 1e-9, "{model}: expected {expected}, got {score}");
    }
}

#[test]
fn test_report_lists_models_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let results = run_from_files(&config_with(&dir, VALIDATION_CSV)).unwrap();
    let report = MetricsFormatter::format(&results.evaluations, 2);

    let flat = report.find("Flat forecast error: 0.00").unwrap();
    let additive = report.find("Additive forecast error: 25.00").unwrap();
    let multiplicative = report.find("Multiplicative forecast error: 35.37").unwrap();
    assert!(flat < additive && additive < multiplicative);
}

#[test]
fn test_missing_naive_forecast_column() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "departure_date,booking_date,cum_bookings\n3/20/2017,3/13/2017,80\n";
    let err = run_from_files(&config_with(&dir, csv)).unwrap_err();

    match err.downcast_ref::<ForecastError>() {
        Some(ForecastError::Schema { dataset, column }) => {
            assert_eq!(*dataset, Dataset::Validation);
            assert_eq!(column, "naive_forecast");
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_skip_policy_drops_unparseable_rows() {
    let dir = tempfile::tempdir().unwrap();
    let csv = format!("{VALIDATION_CSV}3/20/2017,not-a-date,70,90\n");
    let mut config = config_with(&dir, &csv);

    let err = run_from_files(&config).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ForecastError>(),
        Some(ForecastError::MalformedRecord { line: 4, .. })
    ));

    config.evaluation.malformed_records = MalformedRecordPolicy::Skip;
    let results = run_from_files(&config).unwrap();
    assert!((results.score(ModelKind::Additive).unwrap().score - 25.0).abs() < 1e-9);
}

#[test]
fn test_skip_policy_drops_short_rows() {
    let dir = tempfile::tempdir().unwrap();
    let csv = format!("{VALIDATION_CSV}3/20/2017,3/14/2017,81\n");
    let mut config = config_with(&dir, &csv);

    let err = run_from_files(&config).unwrap_err();
    match err.downcast_ref::<ForecastError>() {
        Some(ForecastError::MalformedRecord { dataset, line, reason }) => {
            assert_eq!(*dataset, Dataset::Validation);
            assert_eq!(*line, 4);
            assert!(reason.contains("found 3"), "{reason}");
        }
        other => panic!("expected malformed record, got {other:?}"),
    }

    config.evaluation.malformed_records = MalformedRecordPolicy::Skip;
    let results = run_from_files(&config).unwrap();
    assert_eq!(results.validation_rows, 2);
    assert!((results.score(ModelKind::Additive).unwrap().score - 25.0).abs() < 1e-9);
}

#[test]
fn test_perfect_naive_forecast_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let csv = "\
departure_date,booking_date,cum_bookings,naive_forecast
3/20/2017,3/13/2017,80,110
3/20/2017,3/20/2017,110,110
";
    let err = run_from_files(&config_with(&dir, csv)).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ForecastError>(),
        Some(ForecastError::ZeroBenchmark { rows: 2 })
    ));
}

#[test]
fn test_exported_forecast_tables() {
    let dir = tempfile::tempdir().unwrap();
    let results = run_from_files(&config_with(&dir, VALIDATION_CSV)).unwrap();

    let table = results.table(ModelKind::Additive).unwrap();
    let path = dir.path().join("additive_forecast.csv");
    CsvStorage::write_forecasts(&path, table).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written.lines().collect::<Vec<_>>(),
        vec![
            "departure_date,booking_date,forecast_demand",
            "2017-03-20,2017-03-13,115",
            "2017-03-20,2017-03-20,",
        ]
    );
}
