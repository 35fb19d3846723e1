//! Integration tests for slot eligibility and ordering.

use jiff::{Timestamp, ToSpan};
use testresult::TestResult;

use marquee::{
    device::{DeviceClass, Viewport},
    fixtures::PromotionBuilder,
    promotions::{PromotionRecord, Slot, eligibility::select, wire::decode},
};

const HERO: &str = "homepage_hero_banner";

fn priorities(records: &[PromotionRecord]) -> Vec<i64> {
    records.iter().map(|record| record.priority).collect()
}

#[test]
fn hero_banner_orders_by_priority_descending() {
    let records = [1, 5, 3].map(|priority| {
        PromotionBuilder::new(&format!("p{priority}"), HERO)
            .desktop_image(&format!("{priority}.png"))
            .priority(priority)
            .build()
    });

    let selected = select(&records, &Slot::new(HERO), DeviceClass::Desktop, Timestamp::now());

    assert_eq!(priorities(&selected), [5, 3, 1]);
}

#[test]
fn expired_records_are_excluded() -> TestResult {
    let now = Timestamp::now();
    let yesterday = now.checked_sub(24.hours())?;

    let records = [PromotionBuilder::new("expired", HERO)
        .desktop_image("old.png")
        .window(None, Some(yesterday))
        .build()];

    assert!(select(&records, &Slot::new(HERO), DeviceClass::Desktop, now).is_empty());

    Ok(())
}

#[test]
fn advertisement_slots_need_image_url_only() {
    let slot = Slot::new("sidebar_advertisement");
    let now = Timestamp::now();

    let with_url = [PromotionBuilder::new("ad", slot.as_str())
        .image_url("ad.png")
        .build()];
    let without_url = [PromotionBuilder::new("ad", slot.as_str())
        .image_url("")
        .image("fallback.png")
        .build()];

    assert_eq!(select(&with_url, &slot, DeviceClass::Mobile, now).len(), 1);
    assert_eq!(select(&with_url, &slot, DeviceClass::Desktop, now).len(), 1);
    assert!(select(&without_url, &slot, DeviceClass::Desktop, now).is_empty());
}

#[test]
fn resizing_reevaluates_device_specific_images() {
    let slot = Slot::new(HERO);
    let now = Timestamp::now();
    let records = [PromotionBuilder::new("wide-only", HERO)
        .desktop_image("wide.png")
        .build()];

    let narrow = Viewport::new(400);
    let wide = narrow.resized(1024);

    assert!(select(&records, &slot, narrow.device_class(), now).is_empty());
    assert_eq!(select(&records, &slot, wide.device_class(), now).len(), 1);
}

#[test]
fn outside_window_excluded_regardless_of_priority() -> TestResult {
    let start: Timestamp = "2026-05-01T00:00:00Z".parse()?;
    let end: Timestamp = "2026-05-31T00:00:00Z".parse()?;
    let slot = Slot::new(HERO);

    let records = [PromotionBuilder::new("may", HERO)
        .desktop_image("may.png")
        .window(Some(start), Some(end))
        .priority(i64::MAX)
        .build()];

    for instant in [
        start.checked_sub(1.nanosecond())?,
        end.checked_add(1.nanosecond())?,
        "2027-01-01T00:00:00Z".parse()?,
    ] {
        assert!(
            select(&records, &slot, DeviceClass::Desktop, instant).is_empty(),
            "record must be excluded at {instant}"
        );
    }

    assert_eq!(select(&records, &slot, DeviceClass::Desktop, start).len(), 1);

    Ok(())
}

#[test]
fn output_is_an_active_sorted_subset_and_repeatable() -> TestResult {
    let now: Timestamp = "2026-10-19T12:00:00Z".parse()?;
    let slot = Slot::new(HERO);

    let records: Vec<PromotionRecord> = (0_i64..40)
        .map(|i| -> Result<PromotionRecord, jiff::Error> {
            let mut builder = PromotionBuilder::new(&format!("r{i}"), HERO)
                .priority((i * 7) % 11)
                .active(i % 3 != 0);

            if i % 4 != 0 {
                builder = builder.desktop_image(&format!("{i}.png"));
            }

            if i % 5 == 0 {
                builder = builder.window(None, Some("2026-01-01T00:00:00Z".parse()?));
            }

            Ok(builder.build())
        })
        .collect::<Result<_, _>>()?;

    let first = select(&records, &slot, DeviceClass::Desktop, now);
    let second = select(&records, &slot, DeviceClass::Desktop, now);

    assert_eq!(first, second);
    assert!(!first.is_empty());
    assert!(first.iter().all(|record| records.contains(record)));
    assert!(first.iter().all(|record| record.is_active));
    assert!(
        first
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.priority >= b.priority)),
        "priorities must be non-increasing"
    );

    Ok(())
}

#[test]
fn decoded_payloads_flow_into_selection() -> TestResult {
    let body = br#"{"banners": [
        {"_id": "1", "position": "homepage_hero_banner", "isActive": true, "priority": 1, "desktopImages": ["a.png"]},
        {"_id": "2", "position": "homepage_hero_banner", "isActive": true, "priority": 5, "desktopImages": ["b.png"], "extra": {"nested": true}},
        {"_id": "3", "position": "homepage_hero_banner", "isActive": false, "priority": 9, "desktopImages": ["c.png"]}
    ]}"#;

    let decoded = decode(body)?;
    let selected = select(
        &decoded.records,
        &Slot::new(HERO),
        DeviceClass::Desktop,
        Timestamp::now(),
    );
    let ids: Vec<&str> = selected.iter().map(|record| record.id.as_str()).collect();

    assert_eq!(ids, ["2", "1"]);

    Ok(())
}
