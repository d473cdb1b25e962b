use super::*;

#[test]
fn display_messages() {
    assert_eq!(CanvasError::invalid("bad").to_string(), "invalid argument: bad");
    assert_eq!(CanvasError::ContextLost.to_string(), "graphics context lost");
    assert_eq!(CanvasError::Shader("x".into()).to_string(), "shader error: x");
    assert_eq!(CanvasError::Browser("y".into()).to_string(), "browser error: y");
    assert_eq!(CanvasError::Config("z".into()).to_string(), "invalid configuration: z");
}

#[test]
fn fatal_classification() {
    assert!(CanvasError::ContextLost.is_fatal());
    assert!(CanvasError::Shader(String::new()).is_fatal());
    assert!(CanvasError::Browser(String::new()).is_fatal());
    assert!(!CanvasError::invalid("n").is_fatal());
    assert!(!CanvasError::Config(String::new()).is_fatal());
}

#[test]
fn json_error_converts_to_config() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(CanvasError::from(err), CanvasError::Config(_)));
}
