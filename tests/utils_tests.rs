use std::{
    thread,
    time::{Duration, Instant},
};

use chrono::{Datelike, Timelike};
use club_backend::{
    entities::stats::{ResourceCounts, SiteStats, FALLBACK_MEMBERS},
    errors::AppError,
    limiter::rate_limiter::SubmissionLimiter,
    utils::{
        date::parse_datetime,
        sanitize::{strip_html, strip_html_opt},
        valid_uuid::valid_uuid,
    },
};

#[test]
fn parses_plain_dates_as_midnight_utc() {
    let date = parse_datetime("2025-03-14").unwrap();
    assert_eq!((date.year(), date.month(), date.day()), (2025, 3, 14));
    assert_eq!((date.hour(), date.minute()), (0, 0));
}

#[test]
fn parses_offsets_and_local_datetimes() {
    let with_offset = parse_datetime("2025-03-14T18:30:00+01:00").unwrap();
    assert_eq!(with_offset.hour(), 17);

    let local = parse_datetime(" 2025-03-14T09:15 ").unwrap();
    assert_eq!((local.hour(), local.minute()), (9, 15));

    assert!(parse_datetime("next friday").is_none());
    assert!(parse_datetime("").is_none());
}

#[test]
fn strips_markup_from_text() {
    assert_eq!(strip_html("<b>Hello</b> <script>alert(1)</script>there"), "Hello there");
    assert_eq!(strip_html("  plain  "), "plain");
    assert_eq!(strip_html_opt(Some("<i></i>".into())), None);
    assert_eq!(strip_html_opt(None), None);
}

#[test]
fn rejects_malformed_ids() {
    assert!(valid_uuid(" 1b4e28ba-2fa1-11d2-883f-0016d3cca427 ").is_ok());
    assert!(matches!(valid_uuid("42"), Err(AppError::InvalidInput(_))));
}

#[test]
fn stats_fall_back_when_no_members_are_approved() {
    let stats = SiteStats::default();
    assert_eq!(stats.members, FALLBACK_MEMBERS);
    assert_eq!((stats.partners, stats.years), (50, 5));

    let stats = SiteStats::from(ResourceCounts {
        events: 12,
        approved_members: 37,
        team_members: 8,
        gallery_images: 64,
    });
    assert_eq!(stats.members, 37);
    assert_eq!(stats.events, 12);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["teamMembers"], 8);
    assert_eq!(json["galleryImages"], 64);
}

#[test]
fn limiter_blocks_after_limit_until_window_passes() {
    let limiter = SubmissionLimiter::new(2, Duration::from_secs(60));
    let start = Instant::now();

    assert!(limiter.check_at("contact:10.0.0.1", start).is_ok());
    assert!(limiter.check_at("contact:10.0.0.1", start).is_ok());

    let retry = limiter.check_at("contact:10.0.0.1", start + Duration::from_secs(10)).unwrap_err();
    assert_eq!(retry, 50);

    // Other forms and clients have their own windows.
    assert!(limiter.check_at("membership:10.0.0.1", start).is_ok());
    assert!(limiter.check_at("contact:10.0.0.2", start).is_ok());

    assert!(limiter.check_at("contact:10.0.0.1", start + Duration::from_secs(61)).is_ok());
}

#[test]
fn limiter_reports_at_least_one_second() {
    let limiter = SubmissionLimiter::new(1, Duration::from_millis(500));
    let now = Instant::now();

    limiter.check_at("k", now).unwrap();
    assert_eq!(limiter.check_at("k", now), Err(1));
}

#[test]
fn zero_limit_disables_the_limiter() {
    let limiter = SubmissionLimiter::new(0, Duration::from_secs(60));
    for _ in 0..20 {
        assert!(limiter.check("contact:10.0.0.1").is_ok());
    }
    assert_eq!(limiter.tracked_clients(), 0);
}

#[test]
fn idle_clients_are_evicted() {
    let limiter = SubmissionLimiter::new(5, Duration::from_millis(20));
    limiter.check("contact:10.0.0.1").unwrap();
    limiter.check("contact:10.0.0.2").unwrap();
    assert_eq!(limiter.tracked_clients(), 2);

    thread::sleep(Duration::from_millis(50));

    assert_eq!(limiter.evict_idle(), 2);
    assert_eq!(limiter.tracked_clients(), 0);
}
