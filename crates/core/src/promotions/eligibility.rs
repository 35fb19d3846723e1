//! Eligibility Filter
//!
//! Narrows the fetched record list down to what a slot may show at an
//! instant on a device class, ordered by priority.

use jiff::{SignedDuration, Timestamp};

use crate::{
    device::DeviceClass,
    promotions::{PromotionRecord, Slot},
};

/// Whether `record` may appear in `slot` at `now` on `device`.
#[must_use]
pub fn is_eligible(
    record: &PromotionRecord,
    slot: &Slot,
    device: DeviceClass,
    now: Timestamp,
) -> bool {
    record.slot == *slot && record.is_live_at(now) && record.image_for(device).is_some()
}

/// Eligible records for `slot`, highest priority first.
///
/// The sort is stable, so records sharing a priority keep their fetch order.
#[must_use]
pub fn select(
    records: &[PromotionRecord],
    slot: &Slot,
    device: DeviceClass,
    now: Timestamp,
) -> Vec<PromotionRecord> {
    let mut eligible: Vec<PromotionRecord> = records
        .iter()
        .filter(|record| is_eligible(record, slot, device, now))
        .cloned()
        .collect();

    eligible.sort_by(|a, b| b.priority.cmp(&a.priority));

    eligible
}

/// Highest-priority eligible record, for single-item placements.
#[must_use]
pub fn first_eligible(
    records: &[PromotionRecord],
    slot: &Slot,
    device: DeviceClass,
    now: Timestamp,
) -> Option<PromotionRecord> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| is_eligible(record, slot, device, now))
        // Earlier fetch order wins ties.
        .max_by_key(|(position, record)| (record.priority, std::cmp::Reverse(*position)))
        .map(|(_, record)| record.clone())
}

/// Earliest instant after `now` at which a record of `slot` enters or
/// leaves its date window.
///
/// Windows are inclusive, so a record leaves one nanosecond after its end.
#[must_use]
pub fn next_window_change(
    records: &[PromotionRecord],
    slot: &Slot,
    now: Timestamp,
) -> Option<Timestamp> {
    records
        .iter()
        .filter(|record| record.slot == *slot && record.is_active)
        .flat_map(|record| {
            let opens = record.start_date.filter(|start| *start > now);
            let closes = record
                .end_date
                .filter(|end| *end >= now)
                .and_then(|end| end.checked_add(SignedDuration::from_nanos(1)).ok());

            [opens, closes]
        })
        .flatten()
        .min()
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;
    use testresult::TestResult;

    use crate::{fixtures::PromotionBuilder, promotions::PromotionId};

    use super::*;

    const HERO: &str = "homepage_hero_banner";

    fn ids(records: &[PromotionRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn empty_input_selects_nothing() {
        let selected = select(&[], &Slot::new(HERO), DeviceClass::Desktop, Timestamp::now());

        assert!(selected.is_empty());
    }

    #[test]
    fn other_slots_and_inactive_records_are_dropped() {
        let records = [
            PromotionBuilder::new("a", HERO).desktop_image("a.png").build(),
            PromotionBuilder::new("b", "footer_banner").desktop_image("b.png").build(),
            PromotionBuilder::new("c", HERO)
                .desktop_image("c.png")
                .active(false)
                .build(),
        ];

        let selected = select(&records, &Slot::new(HERO), DeviceClass::Desktop, Timestamp::now());

        assert_eq!(ids(&selected), ["a"]);
    }

    #[test]
    fn ties_keep_fetch_order() {
        let records = [
            PromotionBuilder::new("first", HERO).desktop_image("1.png").priority(2).build(),
            PromotionBuilder::new("top", HERO).desktop_image("2.png").priority(9).build(),
            PromotionBuilder::new("second", HERO).desktop_image("3.png").priority(2).build(),
        ];

        let selected = select(&records, &Slot::new(HERO), DeviceClass::Desktop, Timestamp::now());

        assert_eq!(ids(&selected), ["top", "first", "second"]);
    }

    #[test]
    fn not_yet_started_records_are_excluded() -> TestResult {
        let now = Timestamp::now();
        let records = [PromotionBuilder::new("soon", HERO)
            .desktop_image("soon.png")
            .window(Some(now.checked_add(1.hour())?), None)
            .build()];

        assert!(select(&records, &Slot::new(HERO), DeviceClass::Desktop, now).is_empty());

        Ok(())
    }

    #[test]
    fn next_window_change_picks_the_nearest_boundary() -> TestResult {
        let now: Timestamp = "2026-10-19T12:00:00Z".parse()?;
        let slot = Slot::new(HERO);
        let records = [
            PromotionBuilder::new("ends", HERO)
                .desktop_image("e.png")
                .window(None, Some(now.checked_add(3.hours())?))
                .build(),
            PromotionBuilder::new("starts", HERO)
                .desktop_image("s.png")
                .window(Some(now.checked_add(2.hours())?), None)
                .build(),
            PromotionBuilder::new("ended", HERO)
                .desktop_image("x.png")
                .window(None, Some(now.checked_sub(1.hour())?))
                .build(),
            PromotionBuilder::new("elsewhere", "footer_banner")
                .desktop_image("f.png")
                .window(Some(now.checked_add(1.minute())?), None)
                .build(),
        ];

        assert_eq!(
            next_window_change(&records, &slot, now),
            Some(now.checked_add(2.hours())?)
        );

        let closes_at = now.checked_add(3.hours())?;

        assert_eq!(
            next_window_change(&records, &slot, closes_at),
            Some(closes_at.checked_add(1.nanosecond())?)
        );
        assert_eq!(
            next_window_change(&records, &slot, closes_at.checked_add(1.second())?),
            None
        );

        Ok(())
    }

    #[test]
    fn first_eligible_matches_head_of_select() {
        let records = [
            PromotionBuilder::new("low", HERO).desktop_image("l.png").priority(1).build(),
            PromotionBuilder::new("high-a", HERO).desktop_image("a.png").priority(4).build(),
            PromotionBuilder::new("high-b", HERO).desktop_image("b.png").priority(4).build(),
        ];
        let slot = Slot::new(HERO);
        let now = Timestamp::now();

        let first = first_eligible(&records, &slot, DeviceClass::Desktop, now);
        let selected = select(&records, &slot, DeviceClass::Desktop, now);

        assert_eq!(first.as_ref(), selected.first());
        assert_eq!(first.map(|record| record.id), Some(PromotionId::new("high-a")));
    }
}
