use super::super::mock;
use crate::external::command::{CommandError, CommandLine, CommandRunner};
use std::time::Duration;

#[tokio::test]
async fn test_longest_prefix_wins() {
    let runner = mock::MockCommandRunner::new();
    runner.respond("ddcutil", "generic");
    runner.respond("ddcutil --sn SN1 getvcp", "VCP 10 C 30 100");
    let specific = CommandLine::new("ddcutil", ["--sn", "SN1", "getvcp", "10", "--brief"]);
    let generic = CommandLine::new("ddcutil", ["detect"]);
    assert_eq!(runner.run(&specific).await.unwrap(), "VCP 10 C 30 100");
    assert_eq!(runner.run_sync(&generic).unwrap(), "generic");
    assert_eq!(
        runner.issued(),
        vec![
            "ddcutil --sn SN1 getvcp 10 --brief".to_owned(),
            "ddcutil detect".to_owned()
        ]
    );
}

#[tokio::test]
async fn test_errors() {
    let runner = mock::MockCommandRunner::new();
    runner.respond("brightnessctl get", "10").fail("brightnessctl max");
    let unknown = CommandLine::new("xrandr", Vec::<String>::new());
    assert!(matches!(
        runner.run(&unknown).await,
        Err(CommandError::Spawn { .. })
    ));
    let max = CommandLine::new("brightnessctl", ["max"]);
    assert!(matches!(
        runner.run_sync(&max),
        Err(CommandError::Failed { .. })
    ));

    let get = CommandLine::new("brightnessctl", ["get"]);
    assert!(runner.run(&get).await.is_ok());
    runner.set_failure_mode(true);
    assert!(runner.run(&get).await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_delayed_response() {
    let runner = mock::MockCommandRunner::new();
    runner.respond_after("sleepy", "done", Duration::from_secs(3));
    let start = tokio::time::Instant::now();
    let res = runner
        .run(&CommandLine::new("sleepy", Vec::<String>::new()))
        .await;
    assert_eq!(res.unwrap(), "done");
    assert!(start.elapsed() >= Duration::from_secs(3));
}
