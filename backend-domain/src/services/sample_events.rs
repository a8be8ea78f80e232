// Built-in sample collection used to seed an empty or reset store.
// Dates are laid out relative to the seeding day so the set always has
// upcoming sessions.

use chrono::{Days, NaiveDate};

use crate::entities::NewEvent;
use crate::value_objects::{EventStatus, EVENT_DATE_FORMAT};

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    category: &'static str,
    level: &'static str,
    location: &'static str,
    city: &'static str,
    days_from_now: u64,
    time: &'static str,
    fee: &'static str,
    ages: &'static str,
    venue_type: &'static str,
    max: u32,
    current: u32,
}

const SAMPLES: &[Sample] = &[
    Sample {
        id: "sample-001",
        title: "Beginner Drop-in Volleyball",
        description: "Relaxed rotations for new players. Balls provided.",
        category: "Drop-in",
        level: "Beginner",
        location: "Bonsor Recreation Complex",
        city: "Burnaby",
        days_from_now: 1,
        time: "6:30 PM - 8:30 PM",
        fee: "$4.50",
        ages: "19+",
        venue_type: "Indoor",
        max: 18,
        current: 6,
    },
    Sample {
        id: "sample-002",
        title: "Intermediate Drop-in Volleyball",
        description: "Six-a-side play with overhand serving.",
        category: "Drop-in",
        level: "Intermediate",
        location: "Edmonds Community Centre",
        city: "Burnaby",
        days_from_now: 2,
        time: "7:00 PM - 9:00 PM",
        fee: "$4.50",
        ages: "19+",
        venue_type: "Indoor",
        max: 18,
        current: 17,
    },
    Sample {
        id: "sample-003",
        title: "Advanced Drop-in Volleyball",
        description: "Fast-paced games for experienced players.",
        category: "Drop-in",
        level: "Advanced",
        location: "Queen's Park Arena",
        city: "New Westminster",
        days_from_now: 3,
        time: "8:00 PM - 10:00 PM",
        fee: "$5.25",
        ages: "19+",
        venue_type: "Indoor",
        max: 12,
        current: 12,
    },
    Sample {
        id: "sample-004",
        title: "Spring Beach Doubles Tournament",
        description: "Double elimination, prizes for the top three teams.",
        category: "Tournament",
        level: "Intermediate",
        location: "Spanish Banks",
        city: "Vancouver",
        days_from_now: 10,
        time: "9:00 AM - 5:00 PM",
        fee: "$40 per team",
        ages: "16+",
        venue_type: "Beach",
        max: 32,
        current: 14,
    },
    Sample {
        id: "sample-005",
        title: "Youth Skills Clinic",
        description: "Passing, setting and serving fundamentals with certified coaches.",
        category: "Clinic",
        level: "Beginner",
        location: "Moody Park Arena",
        city: "New Westminster",
        days_from_now: 5,
        time: "10:00 AM - 12:00 PM",
        fee: "Free",
        ages: "13-18",
        venue_type: "Indoor",
        max: 20,
        current: 3,
    },
    Sample {
        id: "sample-006",
        title: "Co-ed League Night",
        description: "Weekly league matches, teams of six.",
        category: "League",
        level: "All Levels",
        location: "Christine Sinclair Community Centre",
        city: "Burnaby",
        days_from_now: 7,
        time: "7:30 PM - 10:30 PM",
        fee: "$120 per team",
        ages: "19+",
        venue_type: "Indoor",
        max: 8,
        current: 5,
    },
    Sample {
        id: "sample-007",
        title: "Grass Triples Meetup",
        description: "Casual triples on the field by the lake.",
        category: "Meetup",
        level: "All Levels",
        location: "Burnaby Lake Sports Complex Grass Field",
        city: "Burnaby",
        days_from_now: 14,
        time: "1:00 PM - 4:00 PM",
        fee: "Free",
        ages: "All Ages",
        venue_type: "Grass",
        max: 24,
        current: 0,
    },
];

pub fn sample_events(today: NaiveDate) -> Vec<NewEvent> {
    SAMPLES
        .iter()
        .map(|sample| {
            let date = today
                .checked_add_days(Days::new(sample.days_from_now))
                .unwrap_or(today);
            NewEvent {
                id: Some(sample.id.to_string()),
                title: sample.title.to_string(),
                description: Some(sample.description.to_string()),
                category: Some(sample.category.to_string()),
                level: Some(sample.level.to_string()),
                location: Some(sample.location.to_string()),
                city: Some(sample.city.to_string()),
                event_date: Some(date.format(EVENT_DATE_FORMAT).to_string()),
                event_time: Some(sample.time.to_string()),
                status: Some(EventStatus::for_occupancy(sample.current, sample.max)),
                max_participants: Some(sample.max),
                current_participants: Some(sample.current),
                fee: Some(sample.fee.to_string()),
                ages: Some(sample.ages.to_string()),
                venue_type: Some(sample.venue_type.to_string()),
                is_public: Some(true),
                ..NewEvent::default()
            }
        })
        .collect()
}
