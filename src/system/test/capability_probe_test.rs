use crate::{
    external::command::mock::MockCommandRunner,
    system::{
        capability_probe::{parse_detect_output, probe},
        output::ParseError,
    },
};

const DETECT_OUTPUT: &str = "Display 1
   I2C bus:  /dev/i2c-6
   DRM connector:           card1-DP-1
   Monitor:                 DEL:DELL U2720Q:SN2

Invalid display
   I2C bus:  /dev/i2c-7
   DRM connector:           card1-eDP-1
   Monitor:                 BOE:0x0BCA:SN9
";

#[test]
fn test_valid_records_only() {
    let serials = parse_detect_output(DETECT_OUTPUT).unwrap();
    assert_eq!(serials.len(), 1);
    assert!(serials.contains("SN2"));
}

#[test]
fn test_multiple_displays() {
    let output = format!(
        "{}\n\nDisplay 2\n   I2C bus: /dev/i2c-8\n   DRM connector: card1-HDMI-A-1\n   Monitor: GSM:LG HDR 4K:SN3\n",
        DETECT_OUTPUT.trim_end()
    );
    let serials = parse_detect_output(&output).unwrap();
    assert_eq!(serials.len(), 2);
    assert!(serials.contains("SN2"));
    assert!(serials.contains("SN3"));
    assert!(!serials.contains("SN9"));
}

#[test]
fn test_monitor_without_serial_is_skipped() {
    let output = format!(
        "{}\n\nDisplay 2\n   I2C bus: /dev/i2c-9\n   DRM connector: card1-DP-3\n   Monitor: AOC:Q27G2G4:\n",
        DETECT_OUTPUT.trim_end()
    );
    let serials = parse_detect_output(&output).unwrap();
    assert_eq!(serials.len(), 1);
    assert!(serials.contains("SN2"));
    assert!(!serials.contains(""));
}

#[test]
fn test_truncated_display_record() {
    let res = parse_detect_output("Display 1\n   I2C bus:  /dev/i2c-6\n");
    assert!(matches!(res, Err(ParseError::MissingSerial(_))));
    assert!(parse_detect_output("").unwrap().is_empty());
}

#[test]
fn test_header_with_trailing_text() {
    let output = "Display 1 (DDC/CI enabled)
   I2C bus:  /dev/i2c-6
   DRM connector:           card1-DP-1
   Monitor:                 DEL:DELL U2720Q:SN2

Display X
   I2C bus:  /dev/i2c-7
   DRM connector:           card1-DP-2
   Monitor:                 DEL:DELL U2720Q:SN7
";
    let serials = parse_detect_output(output).unwrap();
    assert_eq!(serials.len(), 1);
    assert!(serials.contains("SN2"));
}

#[tokio::test]
async fn test_probe() {
    let runner = MockCommandRunner::new();
    runner.respond("ddcutil detect --brief", DETECT_OUTPUT);
    let serials = probe(&runner).await;
    assert!(serials.contains("SN2"));
    assert_eq!(runner.issued(), vec!["ddcutil detect --brief".to_owned()]);
}

#[tokio::test]
async fn test_probe_failures_yield_empty_set() {
    let runner = MockCommandRunner::new();
    runner.fail("ddcutil detect");
    assert!(probe(&runner).await.is_empty());

    runner.respond("ddcutil detect", "Display 1\n   garbage\n");
    assert!(probe(&runner).await.is_empty());
}
