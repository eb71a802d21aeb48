use std::io;

use structura::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::ArtifactExistsError {
        kind: "Action".to_string(),
        path: "app/Actions/SampleAction.php".to_string(),
    };
    assert_eq!(err.to_string(), "Action already exists: 'app/Actions/SampleAction.php'.");

    let err = Error::UnsupportedValueError {
        option: "backed".to_string(),
        value: "float".to_string(),
        expected: "string or int".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid backed value 'float'. Use string or int.");

    let err = Error::ConfigurationMissingError {
        kind: "cache".to_string(),
        setting: "path".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Unable to resolve the path for 'cache'. Check config/structura.yaml."
    );
}
