use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coursehub_rust::config::ClientOptions;
use coursehub_rust::progress::TrackerState;
use coursehub_rust::CourseHub;

fn fast_options() -> ClientOptions {
    ClientOptions::default().with_save_quiet_period(Duration::from_millis(20))
}

#[tokio::test]
async fn saved_progress_round_trips() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/progress/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "progress": {
                "currentTime": 42.5,
                "duration": 120.0,
                "percentage": 35.4,
                "completed": false
            }
        })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let record = hub.progress().get("c1").await.unwrap().unwrap();
    assert_eq!(record.current_time, 42.5);
    assert!(!record.is_completed);
}

#[tokio::test]
async fn unsuccessful_lookup_means_no_saved_progress() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/progress/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    assert!(hub.progress().get("c1").await.unwrap().is_none());
}

#[tokio::test]
async fn missing_progress_record_starts_from_the_beginning() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/progress/c1"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "No progress found" })),
        )
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    assert!(hub.progress().get("c1").await.unwrap().is_none());
}

#[tokio::test]
async fn resume_offset_waits_for_both_startup_events() {
    let mock_server = MockServer::start().await;
    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let mut tracker = hub.progress_tracker("c1");
    assert_eq!(tracker.state(), TrackerState::Loading);

    let record = serde_json::from_value(json!({
        "currentTime": 42.5,
        "duration": 120.0,
        "percentage": 35.4
    }))
    .unwrap();

    // Record arrives first: no offset yet, metadata is still pending.
    assert_eq!(tracker.record_loaded(Some(record)), None);
    // Metadata lands last and releases the offset exactly once.
    assert_eq!(tracker.metadata_ready(), Some(42.5));
    assert_eq!(tracker.state(), TrackerState::Playing);
}

#[tokio::test]
async fn zero_offset_and_missing_record_start_from_the_beginning() {
    let mock_server = MockServer::start().await;
    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let mut tracker = hub.progress_tracker("c1");
    assert_eq!(tracker.metadata_ready(), None);
    assert_eq!(tracker.record_loaded(None), None);
    assert_eq!(tracker.state(), TrackerState::Playing);
}

#[tokio::test]
async fn time_updates_coalesce_into_one_save() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .and(body_partial_json(json!({ "courseId": "c1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new_with_options(&mock_server.uri(), fast_options()).unwrap();
    hub.session().set_session("test_token", None);

    let mut tracker = hub.progress_tracker("c1");
    tracker.record_loaded(None);
    tracker.metadata_ready();

    for i in 0..5 {
        let percentage = tracker.on_time_update(10.0 + f64::from(i), 120.0);
        assert!(percentage > 0.0);
    }
    assert!(tracker.save_pending());

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(!tracker.save_pending());
}

#[tokio::test]
async fn cancel_suppresses_the_pending_save() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new_with_options(&mock_server.uri(), fast_options()).unwrap();
    hub.session().set_session("test_token", None);

    let mut tracker = hub.progress_tracker("c1");
    tracker.record_loaded(None);
    tracker.metadata_ready();
    tracker.on_time_update(15.0, 120.0);
    tracker.cancel();

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(tracker.state(), TrackerState::Idle);
}

#[tokio::test]
async fn ended_saves_the_final_position_immediately() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/progress"))
        .and(body_partial_json(json!({ "currentTime": 120.0, "duration": 120.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new_with_options(&mock_server.uri(), fast_options()).unwrap();
    hub.session().set_session("test_token", None);

    let mut tracker = hub.progress_tracker("c1");
    tracker.record_loaded(None);
    tracker.metadata_ready();
    tracker.on_time_update(120.0, 120.0);
    tracker.ended();

    assert_eq!(tracker.state(), TrackerState::Ended);
    assert!(tracker.is_complete());

    // The final save bypasses the quiet period.
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn completion_follows_the_configured_threshold() {
    let mock_server = MockServer::start().await;
    let options = fast_options().with_completion_threshold(50.0);
    let hub = CourseHub::new_with_options(&mock_server.uri(), options).unwrap();
    hub.session().set_session("test_token", None);

    let mut tracker = hub.progress_tracker("c1");
    tracker.record_loaded(None);
    tracker.metadata_ready();

    tracker.on_time_update(30.0, 120.0);
    assert!(!tracker.is_complete());
    tracker.on_time_update(70.0, 120.0);
    assert!(tracker.is_complete());
    tracker.cancel();
}

#[tokio::test]
async fn user_progress_listing_flattens_records() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/progress/user/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "progress": [
                {
                    "course": { "_id": "c1", "title": "Rust Basics" },
                    "currentTime": 10.0,
                    "duration": 100.0,
                    "percentage": 10.0
                },
                {
                    "course": "c2",
                    "currentTime": 95.0,
                    "duration": 100.0,
                    "percentage": 95.0,
                    "completed": true
                }
            ]
        })))
        .mount(&mock_server)
        .await;

    let hub = CourseHub::new(&mock_server.uri()).unwrap();
    hub.session().set_session("test_token", None);

    let entries = hub.progress().user_all().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].course.id(), "c1");
    assert_eq!(entries[1].course.id(), "c2");
    assert!(entries[1].record.is_completed);
}
