//! Default dataset used when the backend holds no data yet.
//!
//! Timestamps are relative to the `now` passed in, so a freshly seeded inbox
//! always shows recent activity.

mod properties;

use chrono::{DateTime, Duration, Utc};

use soho_core::thread::{
    AiMeta, Assignment, CustomerType, Guest, Message, Platform, Priority, Sentiment, Thread,
    ThreadStatus,
};

use properties::{city_center, mountain_peak, ocean_view};

fn ago(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes)
}

struct GuestSeed<'a> {
    name: &'a str,
    username: &'a str,
    location: &'a str,
    avatar: &'a str,
    customer_type: CustomerType,
    email: Option<&'a str>,
    phone: Option<&'a str>,
    last_stayed: Option<&'a str>,
}

impl GuestSeed<'_> {
    fn build(self) -> Guest {
        Guest {
            name: self.name.to_string(),
            username: Some(self.username.to_string()),
            avatar_url: Some(self.avatar.to_string()),
            location: Some(self.location.to_string()),
            language: Some("en-IN".to_string()),
            customer_type: self.customer_type,
            email: self.email.map(str::to_string),
            phone: self.phone.map(str::to_string),
            last_stayed: self.last_stayed.map(str::to_string),
        }
    }
}

fn ai(summary: &str, sentiment: Sentiment, emotion: Option<&str>, tags: &[&str], replies: &[&str]) -> AiMeta {
    AiMeta {
        summary: summary.to_string(),
        sentiment,
        emotion: emotion.map(str::to_string),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        suggested_replies: replies.iter().map(|r| r.to_string()).collect(),
    }
}

fn msg(
    id: &str,
    thread_id: &str,
    platform: Platform,
    sender: &str,
    text: &str,
    at: DateTime<Utc>,
    inbound: bool,
) -> Message {
    Message {
        id: id.to_string(),
        thread_id: thread_id.to_string(),
        platform,
        sender_name: sender.to_string(),
        text: text.to_string(),
        timestamp: at,
        inbound,
        attachments: Vec::new(),
    }
}

/// Builds the seeded inbox as of `now`.
pub fn seed_threads(now: DateTime<Utc>) -> Vec<Thread> {
    vec![
        Thread {
            id: "t1".into(),
            platform: Platform::Google,
            title: "Great stay at OceanView Resort".into(),
            last_updated: ago(now, 5),
            assignment: Some(
                Assignment::new("Alex", Priority::Medium).with_department("Guest Relations"),
            ),
            status: ThreadStatus::Open,
            guest: Some(
                GuestSeed {
                    name: "Priya",
                    username: "priya.g",
                    location: "Mumbai, IN",
                    avatar: "/avatars/priya.svg",
                    customer_type: CustomerType::Vip,
                    email: Some("priya@example.com"),
                    phone: Some("+91 90000 00001"),
                    last_stayed: Some("2025-09-12T10:00:00.000Z"),
                }
                .build(),
            ),
            messages: vec![
                msg("m1", "t1", Platform::Google, "Priya", "Loved my stay! The ocean view was stunning.", ago(now, 10), true),
                msg("m2", "t1", Platform::Google, "Hotel", "Thank you for choosing us! 💙", ago(now, 8), false),
            ],
            ai: ai(
                "Guest complimented room view and breakfast.",
                Sentiment::Positive,
                Some("delight"),
                &["compliment", "breakfast"],
                &[
                    "Thanks for the kind words! 💙",
                    "We’re thrilled you enjoyed the view and breakfast!",
                ],
            ),
            property: ocean_view(true),
        },
        Thread {
            id: "t4".into(),
            platform: Platform::X,
            title: "Noise complaint near pool area".into(),
            last_updated: ago(now, 50),
            assignment: Some(Assignment::new("Jordan", Priority::High).with_department("Operations")),
            status: ThreadStatus::Open,
            guest: Some(
                GuestSeed {
                    name: "Akhil",
                    username: "akhil_91",
                    location: "Delhi, IN",
                    avatar: "/avatars/priya.svg",
                    customer_type: CustomerType::Regular,
                    email: None,
                    phone: None,
                    last_stayed: None,
                }
                .build(),
            ),
            messages: vec![msg("m5", "t4", Platform::X, "Akhil", "Music was too loud after 11 pm.", ago(now, 55), true)],
            ai: ai(
                "Guest reported loud music past quiet hours near pool.",
                Sentiment::Negative,
                None,
                &["noise", "pool", "policy"],
                &["We’re sorry about the disturbance. We’ll address it immediately."],
            ),
            property: ocean_view(false),
        },
        Thread {
            id: "t5".into(),
            platform: Platform::Google,
            title: "Breakfast buffet timing question".into(),
            last_updated: ago(now, 8),
            assignment: None,
            status: ThreadStatus::Open,
            guest: Some(
                GuestSeed {
                    name: "Arjun",
                    username: "arjun.travel",
                    location: "Mumbai, IN",
                    avatar: "/avatars/leena.svg",
                    customer_type: CustomerType::Member,
                    email: Some("arjun@example.com"),
                    phone: Some("+91 90000 00002"),
                    last_stayed: Some("2025-06-01T10:00:00.000Z"),
                }
                .build(),
            ),
            messages: vec![msg("m6", "t5", Platform::Google, "Arjun", "What time is breakfast? Do you have kids menu?", ago(now, 9), true)],
            ai: ai(
                "Asked about breakfast and kids options.",
                Sentiment::Neutral,
                None,
                &["breakfast", "kids"],
                &["Breakfast is 7AM–11AM. We have kid-friendly options."],
            ),
            property: city_center(false, true),
        },
        Thread {
            id: "t6".into(),
            platform: Platform::Tripadvisor,
            title: "Shuttle from airport".into(),
            last_updated: ago(now, 70),
            assignment: None,
            status: ThreadStatus::Open,
            guest: Some(
                GuestSeed {
                    name: "Neha",
                    username: "neha.fly",
                    location: "Bengaluru, IN",
                    avatar: "/avatars/liza.svg",
                    customer_type: CustomerType::Regular,
                    email: None,
                    phone: None,
                    last_stayed: None,
                }
                .build(),
            ),
            messages: vec![msg("m7", "t6", Platform::Tripadvisor, "Neha", "Do you offer airport shuttle late night?", ago(now, 75), true)],
            ai: ai(
                "Asking about airport shuttle timings and cost.",
                Sentiment::Positive,
                None,
                &["transport", "shuttle"],
                &["Yes, shuttle runs hourly. Cost ₹500 per person."],
            ),
            property: mountain_peak(false, true),
        },
        Thread {
            id: "t8".into(),
            platform: Platform::Facebook,
            title: "Did not get promo discount at CityCenter".into(),
            last_updated: ago(now, 1),
            assignment: None,
            status: ThreadStatus::Open,
            guest: Some(
                GuestSeed {
                    name: "Anita",
                    username: "anita.travel",
                    location: "Mumbai, IN",
                    avatar: "/avatars/leena.svg",
                    customer_type: CustomerType::Member,
                    email: Some("anita@example.com"),
                    phone: None,
                    last_stayed: None,
                }
                .build(),
            ),
            messages: vec![
                msg("m9", "t8", Platform::Facebook, "Anita", "I used SPRING20 but got charged full price.", ago(now, 2), true),
                msg("m10", "t8", Platform::Facebook, "Hotel", "We’re checking this for you.", ago(now, 1), false),
            ],
            ai: ai(
                "Guest claims SPRING20 was not applied during booking.",
                Sentiment::Negative,
                None,
                &["promotion", "discount", "billing"],
                &[
                    "I’m sorry this happened. May I confirm your booking ID to check the code?",
                    "We’ll honor SPRING20 if eligible. I can apply the difference right away.",
                    "The code works for stays till May 31 and select room types. I’ll verify yours.",
                ],
            ),
            property: city_center(false, true),
        },
        Thread {
            id: "t7".into(),
            platform: Platform::Instagram,
            title: "Housekeeping request not addressed".into(),
            last_updated: ago(now, 150),
            assignment: Some(
                Assignment::new("Alex", Priority::High).with_department("Guest Relations"),
            ),
            status: ThreadStatus::Open,
            guest: Some(
                GuestSeed {
                    name: "Riya",
                    username: "riya.trips",
                    location: "Delhi, IN",
                    avatar: "/avatars/priya.svg",
                    customer_type: CustomerType::Member,
                    email: Some("riya@example.com"),
                    phone: Some("+91 90000 00003"),
                    last_stayed: Some("2025-04-20T10:00:00.000Z"),
                }
                .build(),
            ),
            messages: vec![msg("m8", "t7", Platform::Instagram, "Riya", "No one came since morning.", ago(now, 180), true)],
            ai: ai(
                "Guest reported housekeeping delay since morning.",
                Sentiment::Negative,
                None,
                &["housekeeping", "delay"],
                &["We’re escalating this immediately. Sorry for the delay."],
            ),
            property: city_center(false, false),
        },
        Thread {
            id: "t2".into(),
            platform: Platform::Facebook,
            title: "Late check-in and refund request".into(),
            last_updated: ago(now, 2),
            assignment: Some(Assignment::new("Sam", Priority::High).with_department("Support")),
            status: ThreadStatus::Open,
            guest: Some(
                GuestSeed {
                    name: "Liza",
                    username: "liza.travel",
                    location: "Delhi, IN",
                    avatar: "/avatars/liza.svg",
                    customer_type: CustomerType::Member,
                    email: Some("liza@example.com"),
                    phone: Some("+91 90000 00004"),
                    last_stayed: Some("2025-10-28T14:00:00.000Z"),
                }
                .build(),
            ),
            messages: vec![msg(
                "m3",
                "t2",
                Platform::Facebook,
                "Liza",
                "Checked in 2 hours late. This is unacceptable. I want a refund.",
                ago(now, 3),
                true,
            )],
            ai: ai(
                "Guest unhappy with late check-in; requested refund.",
                Sentiment::Negative,
                Some("frustration"),
                &["check-in delay", "refund"],
                &[
                    "We’re sorry about the delay. Please DM your booking ID so we can assist.",
                    "Apologies for the inconvenience, our team will review this right away.",
                    "Search booking id",
                ],
            ),
            property: city_center(true, false),
        },
        Thread {
            id: "t3".into(),
            platform: Platform::Instagram,
            title: "Question about suite availability".into(),
            last_updated: ago(now, 20),
            assignment: None,
            status: ThreadStatus::Pending,
            guest: Some(
                GuestSeed {
                    name: "Leena",
                    username: "leena.me",
                    location: "Bengaluru, IN",
                    avatar: "/avatars/leena.svg",
                    customer_type: CustomerType::Vip,
                    email: Some("leena@example.com"),
                    phone: Some("+91 90000 00005"),
                    last_stayed: Some("2025-08-18T10:00:00.000Z"),
                }
                .build(),
            ),
            messages: vec![msg("m4", "t3", Platform::Instagram, "Leena", "Do you have suites available next weekend?", ago(now, 21), true)],
            ai: ai(
                "Guest asked about suite availability for next weekend.",
                Sentiment::Neutral,
                None,
                &["availability", "suite"],
                &[
                    "Suites are available next weekend. Would you like us to hold one?",
                    "We’d love to host you. Here are current rates and options.",
                ],
            ),
            property: mountain_peak(true, false),
        },
    ]
}
