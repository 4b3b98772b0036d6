mod common;

use std::io::Write;
use std::sync::Arc;

use camera_watch::config::Config;
use camera_watch::frames::{open_source, FrameReader};
use camera_watch::monitor::{Monitor, Pipeline, StopReason};
use camera_watch::notify::{Dispatcher, HttpTransport};
use camera_watch::signals::Event;
use common::fixtures::{drowsy_episode_ears, frame_line, overhead_pose, relaxed_pose};
use common::listener::MockListener;

const FPS: f64 = 32.0;

fn replay_file(lines: &[String]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    for line in lines {
        writeln!(file, "{line}").expect("write frame");
    }
    file.flush().expect("flush");
    file
}

fn monitor_for(config: &Config) -> Monitor {
    let pipeline = Pipeline::from_config(config).expect("pipeline");
    let dispatcher = Dispatcher::new(
        &config.notify,
        &config.server_url,
        Arc::new(HttpTransport::new()),
    );
    Monitor::new(pipeline, dispatcher, config.debug_overlay)
}

#[tokio::test]
async fn it_reports_sleepy_then_awake_at_expected_frames() {
    let config = Config::default();
    let mut pipeline = Pipeline::from_config(&config).expect("pipeline");

    let lines: Vec<String> = drowsy_episode_ears()
        .into_iter()
        .enumerate()
        .map(|(i, ear)| frame_line(i as f64 / FPS, Some(ear), None))
        .collect();
    let input = lines.join("\n");
    let mut reader = FrameReader::new(input.as_bytes());

    let mut events = Vec::new();
    while let Some(frame) = reader.next_frame().await.expect("frame") {
        for event in pipeline.process(&frame) {
            events.push((frame.index, event));
        }
    }

    assert_eq!(events, vec![(52, Event::Sleepy), (53, Event::Awake)]);
}

#[tokio::test]
async fn it_replays_file_end_to_end_over_http() {
    let listener = MockListener::spawn().await;
    let config = Config {
        server_url: format!("{}/", listener.base_url),
        debug_overlay: true,
        ..Config::default()
    };

    let mut lines: Vec<String> = drowsy_episode_ears()
        .into_iter()
        .enumerate()
        .map(|(i, ear)| frame_line(i as f64 / FPS, Some(ear), None))
        .collect();
    lines.insert(10, "{not a frame".to_string());
    let file = replay_file(&lines);

    let reader = open_source(file.path().to_str().expect("utf8 path"))
        .await
        .expect("open replay");
    let mut monitor = monitor_for(&config);
    let reason = monitor.run(reader, std::future::pending()).await;

    assert_eq!(reason, StopReason::EndOfStream);
    let summary = monitor.summary();
    assert_eq!(summary.frames, 54);
    assert_eq!(summary.malformed_frames, 1);
    assert_eq!(summary.events_sent, 2);

    listener.wait_for_hits(2).await;
    assert_eq!(listener.paths(), vec!["/camera_awake", "/camera_sleepy"]);
    assert!(listener
        .hits()
        .iter()
        .all(|h| h.body["source"] == "camera_drowsiness"));
}

#[tokio::test]
async fn it_runs_both_detectors_from_one_loop() {
    let listener = MockListener::spawn().await;
    let config = Config {
        server_url: listener.base_url.clone(),
        ..Config::default()
    };

    // 2 秒：眼睛一直睁开，前 1 秒伸展，之后放下手臂
    let stretch = overhead_pose();
    let relaxed = relaxed_pose();
    let lines: Vec<String> = (0..64)
        .map(|i| {
            let pose = if i < 32 { &stretch } else { &relaxed };
            frame_line(f64::from(i) / FPS, Some(0.35), Some(pose))
        })
        .collect();
    let input = lines.join("\n");

    let mut monitor = monitor_for(&config);
    let reason = monitor
        .run(FrameReader::new(input.as_bytes()), std::future::pending())
        .await;

    assert_eq!(reason, StopReason::EndOfStream);
    let summary = monitor.summary();
    // 第 16 - 31 帧每帧一个 Stretching，冷却窗口内去重后只发出一次
    assert_eq!(summary.events_emitted, 16);
    assert_eq!(summary.events_sent, 1);

    listener.wait_for_hits(1).await;
    assert_eq!(listener.paths(), vec!["/camera_stretching"]);
}

#[tokio::test]
async fn it_drowsiness_only_mode_ignores_stretching() {
    let listener = MockListener::spawn().await;
    let config = Config {
        server_url: listener.base_url.clone(),
        detectors: "drowsiness".to_string(),
        ..Config::default()
    };

    let stretch = overhead_pose();
    let lines: Vec<String> = (0..40)
        .map(|i| frame_line(f64::from(i) / FPS, Some(0.35), Some(&stretch)))
        .collect();
    let input = lines.join("\n");

    let mut monitor = monitor_for(&config);
    monitor
        .run(FrameReader::new(input.as_bytes()), std::future::pending())
        .await;

    assert_eq!(monitor.summary().events_emitted, 0);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert!(listener.hits().is_empty());
}

#[tokio::test]
async fn it_keeps_monitoring_after_a_non_utf8_line() {
    let listener = MockListener::spawn().await;
    let config = Config {
        server_url: listener.base_url.clone(),
        ..Config::default()
    };

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    for (i, ear) in drowsy_episode_ears().into_iter().enumerate() {
        if i == 1 {
            file.write_all(b"{\"timestamp\":\xff}\n").expect("write bad frame");
        }
        writeln!(file, "{}", frame_line(i as f64 / FPS, Some(ear), None)).expect("write frame");
    }
    file.flush().expect("flush");

    let reader = open_source(file.path().to_str().expect("utf8 path"))
        .await
        .expect("open replay");
    let mut monitor = monitor_for(&config);
    let reason = monitor.run(reader, std::future::pending()).await;

    assert_eq!(reason, StopReason::EndOfStream);
    let summary = monitor.summary();
    assert_eq!(summary.frames, 54);
    assert_eq!(summary.malformed_frames, 1);
    assert_eq!(summary.events_sent, 2);

    listener.wait_for_hits(2).await;
    assert_eq!(listener.paths(), vec!["/camera_awake", "/camera_sleepy"]);
}
