use clap::CommandFactory;

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("modmul-cli").chain(args.iter().copied())).unwrap()
}

fn run_to_string(args: &[&str]) -> Result<String, CliError> {
    let mut out = Vec::new();
    run(parse(args).command, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn segments_plain_output() {
    let out = run_to_string(&["segments", "--points", "12", "--multiplier", "5"]).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "0 -> 0");
    assert_eq!(lines[1], "1 -> 5");
    assert_eq!(lines[11], "11 -> 7");
}

#[test]
fn segments_json_output() {
    let out = run_to_string(&["segments", "--points", "4", "--multiplier", "2", "--json"]).unwrap();
    let pairs: Vec<[u32; 2]> = serde_json::from_str(out.trim()).unwrap();
    assert_eq!(pairs, vec![[0, 0], [1, 2], [2, 0], [3, 2]]);
}

#[test]
fn segments_rejects_zero_points() {
    let err = run_to_string(&["segments", "--points", "0"]).unwrap_err();
    assert!(matches!(err, CliError::Canvas(CanvasError::InvalidArgument(_))));
}

#[test]
fn segments_rejects_negative_points() {
    let err = run_to_string(&["segments", "--points", "-5"]).unwrap_err();
    assert!(matches!(err, CliError::Canvas(CanvasError::InvalidArgument(_))));
}

#[test]
fn svg_to_stdout() {
    let out = run_to_string(&["svg", "--points", "6", "--multiplier", "2", "--size", "100"]).unwrap();
    assert!(out.starts_with("<svg"));
    assert!(out.contains("viewBox=\"0 0 100 100\""));
    assert_eq!(out.matches("<circle").count(), 6);
}

#[test]
fn svg_custom_colors() {
    let out = run_to_string(&["svg", "--points", "6", "--multiplier", "2", "--color", "#ff0000", "--background", "000000"])
        .unwrap();
    assert!(out.contains("stroke=\"#ff0000\""));
    assert!(out.contains("fill=\"#000000\""));
}

#[test]
fn svg_to_file() {
    let path = std::env::temp_dir().join(format!("modmul-cli-test-{}.svg", std::process::id()));
    let path_str = path.to_string_lossy().to_string();
    let stdout = run_to_string(&["svg", "--points", "8", "--multiplier", "3", "--output", &path_str]).unwrap();
    assert!(stdout.is_empty());
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert!(written.contains("</svg>"));
}

#[test]
fn parse_hex_color_accepts_both_forms() {
    assert_eq!(parse_hex_color("#0a0B0c").unwrap(), Rgb::new(10, 11, 12));
    assert_eq!(parse_hex_color("fafafa").unwrap(), Rgb::new(250, 250, 250));
}

#[test]
fn parse_hex_color_rejects_bad_input() {
    for text in ["", "#fff", "#gggggg", "#12345678", "#ééé", "#+f+f+f", "-1-1-1"] {
        assert!(parse_hex_color(text).is_err(), "{text:?} should be rejected");
    }
}

#[test]
fn svg_layout_flags() {
    let out = run_to_string(&[
        "svg",
        "--points",
        "4",
        "--multiplier",
        "2",
        "--size",
        "200",
        "--margin",
        "50",
        "--point-radius",
        "3",
        "--stroke-width",
        "1.5",
    ])
    .unwrap();
    assert!(out.contains("<circle cx=\"150.000\" cy=\"100.000\" r=\"3\"/>"));
    assert!(out.contains("stroke-width=\"1.5\""));
}
