//! Next-prayer highlighting over rendered schedule containers.

use crate::dom::{
    Dom,
    NodeId,
    SCHEDULE_CONTAINER_CLASS,
    SLOT_CLASS,
    SLOT_HOUR_CLASS,
};
use crate::types::TimeOfDay;

/// Index of the slot to highlight.
///
/// The first slot strictly later than `now` wins; when there is none (the
/// day's last time has passed, or no slot holds a readable time) the first
/// slot is chosen as the next day's opening prayer. `None` only for an
/// empty slot list.
#[must_use]
pub fn next_slot_index(slot_minutes: &[Option<u16>], now: u16) -> Option<usize> {
    if slot_minutes.is_empty() {
        return None;
    }
    Some(slot_minutes.iter().position(|minutes| minutes.is_some_and(|m| m > now)).unwrap_or(0))
}

/// Minutes since midnight shown by `slot`, read from its hour element.
#[must_use]
pub fn slot_minutes<D: Dom>(dom: &D, slot: NodeId) -> Option<u16> {
    let hour = dom.query_class_within(slot, SLOT_HOUR_CLASS).into_iter().next()?;
    TimeOfDay::parse_lenient(&dom.text(hour)).map(TimeOfDay::minutes_since_midnight)
}

/// Recomputes the active slot of every schedule container from the text
/// currently rendered. Returns the chosen index per container.
///
/// Only what is on the page is read, so calling this before the schedule
/// arrives highlights slot 0 and the next call after rendering corrects it.
pub fn update_active_highlight<D: Dom>(dom: &mut D, now: TimeOfDay) -> Vec<Option<usize>> {
    let now = now.minutes_since_midnight();

    dom.query_class(SCHEDULE_CONTAINER_CLASS)
        .into_iter()
        .map(|container| {
            let slots = dom.query_class_within(container, SLOT_CLASS);
            let minutes: Vec<Option<u16>> =
                slots.iter().map(|&slot| slot_minutes(dom, slot)).collect();

            let selected = next_slot_index(&minutes, now);
            dom.activate_exclusive(&slots, selected.and_then(|index| slots.get(index).copied()));
            selected
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::dom::{
        ACTIVE_CLASS,
        Element,
        MemoryDom,
    };

    const fn hm(hour: u16, minute: u16) -> Option<u16> {
        Some(hour * 60 + minute)
    }

    fn day() -> Vec<Option<u16>> {
        vec![hm(3, 45), hm(5, 20), hm(12, 45), hm(16, 30), hm(19, 50), hm(21, 15)]
    }

    #[rstest]
    #[case::after_dhuhr(13, 0, 3)]
    #[case::after_isha(22, 0, 0)]
    #[case::before_fajr(1, 0, 0)]
    #[case::exactly_at_asr(16, 30, 4)]
    #[case::one_minute_before(16, 29, 3)]
    #[case::exactly_at_isha(21, 15, 0)]
    fn next_slot_for_time(#[case] hour: u16, #[case] minute: u16, #[case] expected: usize) {
        assert_that!(next_slot_index(&day(), hour * 60 + minute), some(eq(expected)));
    }

    #[rstest]
    fn all_unknown_selects_first() {
        assert_that!(next_slot_index(&[None; 6], 12 * 60), some(eq(0)));
    }

    #[rstest]
    fn unknown_slots_are_never_selected_by_comparison() {
        let minutes = [hm(3, 45), None, None, hm(16, 30), None, None];

        assert_that!(next_slot_index(&minutes, 13 * 60), some(eq(3)));
        assert_that!(next_slot_index(&minutes, 17 * 60), some(eq(0)));
    }

    #[rstest]
    fn empty_container_selects_nothing() {
        assert_that!(next_slot_index(&[], 0), none());
    }

    fn container(dom: &mut MemoryDom, times: &[&str]) -> Vec<NodeId> {
        let root = dom.root();
        let container = dom.append(root, Element::new("div").class(SCHEDULE_CONTAINER_CLASS));
        times
            .iter()
            .map(|time| {
                let slot = dom.append(container, Element::new("div").class(SLOT_CLASS));
                dom.append(slot, Element::new("span").class(SLOT_HOUR_CLASS).text(*time));
                slot
            })
            .collect()
    }

    fn active(dom: &MemoryDom, slots: &[NodeId]) -> Vec<usize> {
        slots
            .iter()
            .enumerate()
            .filter(|&(_, &slot)| dom.has_class(slot, ACTIVE_CLASS))
            .map(|(index, _)| index)
            .collect()
    }

    #[rstest]
    fn highlights_each_container_independently() {
        let mut dom = MemoryDom::new();
        let full = container(&mut dom, &["03:45", "05:20", "12:45", "16:30", "19:50", "21:15"]);
        let pending = container(&mut dom, &["--:--"; 6]);

        let selected = update_active_highlight(&mut dom, TimeOfDay::new(13, 0).unwrap());

        assert_that!(selected, elements_are![some(eq(&3)), some(eq(&0))]);
        assert_that!(active(&dom, &full), elements_are![eq(&3)]);
        assert_that!(active(&dom, &pending), elements_are![eq(&0)]);
    }

    #[rstest]
    fn moves_highlight_and_keeps_it_exclusive() {
        let mut dom = MemoryDom::new();
        let slots = container(&mut dom, &["03:45", "05:20", "12:45", "16:30", "19:50", "21:15"]);

        update_active_highlight(&mut dom, TimeOfDay::new(13, 0).unwrap());
        update_active_highlight(&mut dom, TimeOfDay::new(22, 0).unwrap());

        assert_that!(active(&dom, &slots), elements_are![eq(&0)]);
    }

    #[rstest]
    fn slot_without_hour_element_reads_as_unknown() {
        let mut dom = MemoryDom::new();
        let root = dom.root();
        let slot = dom.append(root, Element::new("div").class(SLOT_CLASS).text("12:00"));

        assert_that!(slot_minutes(&dom, slot), none());
    }

    #[rstest]
    fn no_containers_is_a_no_op() {
        let mut dom = MemoryDom::new();

        assert_that!(update_active_highlight(&mut dom, TimeOfDay::default()), is_empty());
    }
}
