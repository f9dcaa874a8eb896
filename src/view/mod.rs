//! Read-only derived views over fetched content. These are pure
//! functions: they partition, filter, and order what the store handed
//! back and never write anything.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{
    Achievement, ArchiveStatus, CommitteeMember, CommitteeStatus, Event, EventStatus, Minutes,
    Notice, NoticeVisibility, Report, Visit,
};
use crate::store::DateValue;

#[derive(Debug, Clone, Serialize)]
pub struct EventsView {
    pub upcoming: Vec<Event>,
    pub past: Vec<Event>,
}

/// Split published events around `now`. Upcoming runs soonest-first,
/// past runs most-recent-first. An event with no date sorts to the end
/// of past; one whose date is present but unreadable shows in neither
/// list.
pub fn events_view(events: Vec<Event>, now: DateTime<Utc>) -> EventsView {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for event in events {
        if !matches!(event.status, EventStatus::Published | EventStatus::Completed) {
            continue;
        }
        match event.date_time.as_ref().map(DateValue::instant) {
            None => past.push((None, event)),
            Some(Some(instant)) if instant >= now => upcoming.push((instant, event)),
            Some(Some(instant)) => past.push((Some(instant), event)),
            Some(None) => {}
        }
    }

    upcoming.sort_by_key(|(instant, _)| *instant);
    past.sort_by(|(a, _), (b, _)| b.cmp(a));

    EventsView {
        upcoming: upcoming.into_iter().map(|(_, e)| e).collect(),
        past: past.into_iter().map(|(_, e)| e).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VisitsView {
    pub upcoming: Vec<Visit>,
    pub past: Vec<Visit>,
}

/// Visits partition on the calendar day alone, today counting as
/// upcoming. The incoming query order is preserved in both halves and
/// no status filter applies.
pub fn visits_view(visits: Vec<Visit>, today: NaiveDate) -> VisitsView {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for visit in visits {
        let day = DateValue::Text(visit.date_of_visit.clone()).day();
        match day {
            Some(day) if day >= today => upcoming.push(visit),
            _ => past.push(visit),
        }
    }

    VisitsView { upcoming, past }
}

#[derive(Debug, Clone, Serialize)]
pub struct NoticesView {
    pub pinned: Vec<Notice>,
    pub regular: Vec<Notice>,
}

/// Public notices only, pinned ones surfaced as a leading group. Each
/// group keeps the query's start-date-descending order.
pub fn notices_view(notices: Vec<Notice>) -> NoticesView {
    let mut pinned = Vec::new();
    let mut regular = Vec::new();

    for notice in notices {
        if notice.visibility != NoticeVisibility::Public {
            continue;
        }
        if notice.is_pinned {
            pinned.push(notice);
        } else {
            regular.push(notice);
        }
    }

    NoticesView { pinned, regular }
}

/// Active reports, newest year first. Years are stored as text but
/// compared numerically when they parse.
pub fn reports_view(reports: Vec<Report>) -> Vec<Report> {
    let mut active: Vec<Report> = reports
        .into_iter()
        .filter(|r| r.status == ArchiveStatus::Active)
        .collect();
    active.sort_by(|a, b| match (a.year.parse::<i32>(), b.year.parse::<i32>()) {
        (Ok(a), Ok(b)) => b.cmp(&a),
        _ => b.year.cmp(&a.year),
    });
    active
}

/// Active committee members in priority order, lowest number first.
pub fn committee_view(members: Vec<CommitteeMember>) -> Vec<CommitteeMember> {
    let mut active: Vec<CommitteeMember> = members
        .into_iter()
        .filter(|m| m.status == CommitteeStatus::Active)
        .collect();
    active.sort_by_key(|m| m.priority);
    active
}

/// Meeting minutes that have not been archived, in the query's order.
pub fn minutes_view(minutes: Vec<Minutes>) -> Vec<Minutes> {
    minutes
        .into_iter()
        .filter(|m| m.status == ArchiveStatus::Active)
        .collect()
}

/// Achievements newest-first by their date field.
pub fn achievements_view(achievements: Vec<Achievement>) -> Vec<Achievement> {
    let mut items = achievements;
    items.sort_by(|a, b| {
        let a_day = DateValue::Text(a.date.clone()).day();
        let b_day = DateValue::Text(b.date.clone()).day();
        b_day.cmp(&a_day)
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(title: &str, status: EventStatus, date_time: Option<DateValue>) -> Event {
        Event {
            id: title.to_string(),
            title: title.to_string(),
            event_type: crate::domain::EventType::Workshop,
            date: String::new(),
            event_time: String::new(),
            date_time,
            venue: String::new(),
            eligibility: String::new(),
            fee_type: crate::domain::FeeType::Free,
            fee_amount: "0".to_string(),
            description: String::new(),
            faculty_in_charge: String::new(),
            speaker: String::new(),
            status,
            poster_url: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn events_partition_around_now_with_mixed_encodings() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let before = now - chrono::Duration::hours(1);
        let after = now + chrono::Duration::hours(1);

        // One side is a native timestamp, the other an ISO string; both
        // must land on the correct side of the split.
        let events = vec![
            event(
                "past",
                EventStatus::Published,
                Some(DateValue::Timestamp { seconds: before.timestamp(), nanos: 0 }),
            ),
            event(
                "upcoming",
                EventStatus::Published,
                Some(DateValue::Text(after.to_rfc3339())),
            ),
        ];

        let view = events_view(events, now);
        assert_eq!(view.upcoming.len(), 1);
        assert_eq!(view.upcoming[0].title, "upcoming");
        assert_eq!(view.past.len(), 1);
        assert_eq!(view.past[0].title, "past");
    }

    #[test]
    fn draft_and_archived_events_are_hidden() {
        let now = Utc::now();
        let events = vec![
            event("draft", EventStatus::Draft, Some(DateValue::Text(now.to_rfc3339()))),
            event("archived", EventStatus::Archived, Some(DateValue::Text(now.to_rfc3339()))),
            event("done", EventStatus::Completed, Some(DateValue::Millis(now.timestamp_millis() - 1000))),
        ];
        let view = events_view(events, now);
        assert!(view.upcoming.is_empty());
        assert_eq!(view.past.len(), 1);
        assert_eq!(view.past[0].title, "done");
    }

    #[test]
    fn unreadable_dates_hide_the_event_but_missing_dates_sort_last() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let events = vec![
            event(
                "garbled",
                EventStatus::Published,
                Some(DateValue::Text("not a date".to_string())),
            ),
            event("undated", EventStatus::Published, None),
            event(
                "recent",
                EventStatus::Published,
                Some(DateValue::Text((now - chrono::Duration::hours(1)).to_rfc3339())),
            ),
        ];

        let view = events_view(events, now);
        assert!(view.upcoming.is_empty());
        let past: Vec<_> = view.past.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(past, ["recent", "undated"]);
    }

    #[test]
    fn upcoming_sorted_soonest_first_past_most_recent_first() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        let mk = |title: &str, offset_h: i64| {
            event(
                title,
                EventStatus::Published,
                Some(DateValue::Text((now + chrono::Duration::hours(offset_h)).to_rfc3339())),
            )
        };
        let view = events_view(vec![mk("far", 48), mk("older", -48), mk("soon", 24), mk("recent", -24)], now);
        let upcoming: Vec<_> = view.upcoming.iter().map(|e| e.title.as_str()).collect();
        let past: Vec<_> = view.past.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(upcoming, ["soon", "far"]);
        assert_eq!(past, ["recent", "older"]);
    }

    fn visit(title: &str, date: &str) -> Visit {
        Visit {
            id: title.to_string(),
            visit_title: title.to_string(),
            industry_name: String::new(),
            date_of_visit: date.to_string(),
            faculty_incharge: String::new(),
            eligibility: String::new(),
            report_url: String::new(),
            photo_urls: vec![],
            created_at: None,
        }
    }

    #[test]
    fn a_visit_today_counts_as_upcoming() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let view = visits_view(
            vec![visit("today", "2025-06-15"), visit("yesterday", "2025-06-14")],
            today,
        );
        assert_eq!(view.upcoming.len(), 1);
        assert_eq!(view.upcoming[0].visit_title, "today");
        assert_eq!(view.past.len(), 1);
    }

    fn notice(title: &str, visibility: NoticeVisibility, pinned: bool) -> Notice {
        Notice {
            id: title.to_string(),
            title: title.to_string(),
            content: String::new(),
            category: crate::domain::NoticeCategory::General,
            start_date: String::new(),
            end_date: String::new(),
            visibility,
            is_pinned: pinned,
            file_url: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn internal_notices_never_reach_the_public_view() {
        let view = notices_view(vec![
            notice("public", NoticeVisibility::Public, false),
            notice("internal", NoticeVisibility::InternalOnly, true),
        ]);
        assert_eq!(view.pinned.len(), 0);
        assert_eq!(view.regular.len(), 1);
        assert_eq!(view.regular[0].title, "public");
    }

    #[test]
    fn pinned_notices_lead_preserving_group_order() {
        let view = notices_view(vec![
            notice("a", NoticeVisibility::Public, false),
            notice("b", NoticeVisibility::Public, true),
            notice("c", NoticeVisibility::Public, false),
            notice("d", NoticeVisibility::Public, true),
        ]);
        let pinned: Vec<_> = view.pinned.iter().map(|n| n.title.as_str()).collect();
        let regular: Vec<_> = view.regular.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(pinned, ["b", "d"]);
        assert_eq!(regular, ["a", "c"]);
    }

    fn member(name: &str, priority: i64, status: CommitteeStatus) -> CommitteeMember {
        CommitteeMember {
            id: name.to_string(),
            name: name.to_string(),
            role: crate::domain::CommitteeRole::Secretary,
            contact: String::new(),
            tenure: String::new(),
            status,
            priority,
            profile_pic_url: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn committee_sorts_by_priority_ascending() {
        let members = vec![
            member("thirty", 30, CommitteeStatus::Active),
            member("ten", 10, CommitteeStatus::Active),
            member("twenty", 20, CommitteeStatus::Active),
        ];
        let ordered: Vec<i64> = committee_view(members).iter().map(|m| m.priority).collect();
        assert_eq!(ordered, [10, 20, 30]);
    }

    #[test]
    fn past_committee_members_are_filtered_out() {
        let members = vec![
            member("old", 1, CommitteeStatus::PastCommittee),
            member("current", 5, CommitteeStatus::Active),
        ];
        let view = committee_view(members);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].name, "current");
    }

    fn report(year: &str, status: ArchiveStatus) -> Report {
        Report {
            id: year.to_string(),
            title: format!("Report {year}"),
            year: year.to_string(),
            description: String::new(),
            file_url: String::new(),
            status,
            created_at: None,
        }
    }

    #[test]
    fn reports_active_only_year_descending() {
        let reports = vec![
            report("2022", ArchiveStatus::Active),
            report("2024", ArchiveStatus::Active),
            report("2023", ArchiveStatus::Archived),
        ];
        let years: Vec<_> = reports_view(reports).iter().map(|r| r.year.clone()).collect();
        assert_eq!(years, ["2024", "2022"]);
    }
}
