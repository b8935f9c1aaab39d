use chrono::{DateTime, TimeZone, Utc};

use soho_core::property::{Policies, Promotion, PropertyInfo, Restaurant, Room};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .unwrap_or_default()
}

fn promotion(title: &str, code: &str, description: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Promotion {
    Promotion {
        title: title.to_string(),
        code: code.to_string(),
        description: Some(description.to_string()),
        start,
        end,
    }
}

fn rooms(list: &[(&str, &str)]) -> Vec<Room> {
    list.iter()
        .map(|(name, price)| Room {
            name: name.to_string(),
            price: price.to_string(),
        })
        .collect()
}

fn policies(check_in: &str, check_out: &str) -> Policies {
    Policies {
        check_in: check_in.to_string(),
        check_out: check_out.to_string(),
    }
}

fn restaurants(list: &[(&str, &str)]) -> Vec<Restaurant> {
    list.iter()
        .map(|(cuisine, hours)| Restaurant {
            cuisine: cuisine.to_string(),
            hours: hours.to_string(),
        })
        .collect()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// OceanView Resort; `detailed` adds the full profile and promotions.
pub(super) fn ocean_view(detailed: bool) -> PropertyInfo {
    let mut property = PropertyInfo {
        name: "OceanView Resort".into(),
        address: "123 Beach Rd".into(),
        contact: "+1 (555) 123-4567".into(),
        rooms: rooms(&[("Deluxe", "₹8,000"), ("Suite", "₹12,000")]),
        policies: policies("2PM", "11AM"),
        ..Default::default()
    };
    if detailed {
        property.rating = Some(4.6);
        property.reviews_count = Some(1287);
        property.amenities = strings(&["Pool", "Spa", "Gym", "Free Wi-Fi", "Breakfast"]);
        property.timezone = Some("Asia/Kolkata".into());
        property.website = Some("https://oceanview.example".into());
        property.email = Some("contact@oceanview.example".into());
        property.restaurants = restaurants(&[
            ("Multi-cuisine Restaurant", "7AM–11PM"),
            ("Seafood Bar", "5PM–12AM"),
        ]);
        property.pool_hours = Some("6AM–10PM".into());
        property.parking = Some("On-site parking, complimentary valet".into());
        property.promotions = vec![
            promotion(
                "Monsoon Getaway 20% off",
                "MONSOON20",
                "Applicable on Deluxe & Suite stays, min 2 nights",
                utc(2025, 6, 1, 0, 0, 0),
                utc(2025, 8, 31, 23, 59, 59),
            ),
            promotion(
                "Festive Offer 15% off",
                "FESTIVE15",
                "Breakfast included",
                utc(2025, 10, 15, 0, 0, 0),
                utc(2026, 1, 10, 23, 59, 59),
            ),
        ];
    }
    property
}

/// CityCenter Hotel with optional profile details and promotions.
pub(super) fn city_center(detailed: bool, with_promotions: bool) -> PropertyInfo {
    let mut property = PropertyInfo {
        name: "CityCenter Hotel".into(),
        address: "456 Downtown Ave".into(),
        contact: "+1 (555) 987-6543".into(),
        rooms: rooms(&[("Standard", "₹5,500"), ("Executive", "₹9,500")]),
        policies: policies("2PM", "11AM"),
        ..Default::default()
    };
    if detailed {
        property.rating = Some(4.1);
        property.reviews_count = Some(842);
        property.amenities = strings(&["Free Wi-Fi", "Gym", "Bar"]);
        property.timezone = Some("Asia/Kolkata".into());
        property.website = Some("https://citycenter.example".into());
        property.email = Some("hello@citycenter.example".into());
        property.restaurants = restaurants(&[
            ("All-day Café", "6:30AM–11PM"),
            ("Lobby Bar", "5PM–1AM"),
        ]);
        property.parking = Some("Basement self-parking, ₹200/hour; valet available".into());
    }
    if with_promotions {
        property.promotions = vec![
            promotion(
                "Spring Sale 20% off",
                "SPRING20",
                "Use before end of May",
                utc(2025, 3, 1, 0, 0, 0),
                utc(2025, 5, 31, 23, 59, 59),
            ),
            promotion(
                "Weekend Saver 10% off",
                "WEEKEND10",
                "Fri–Sun stays only",
                utc(2025, 1, 1, 0, 0, 0),
                utc(2025, 12, 31, 23, 59, 59),
            ),
        ];
    }
    property
}

/// MountainPeak Lodge with optional profile details and promotions.
pub(super) fn mountain_peak(detailed: bool, with_promotions: bool) -> PropertyInfo {
    let mut property = PropertyInfo {
        name: "MountainPeak Lodge".into(),
        address: "789 Summit Dr".into(),
        contact: "+1 (555) 555-0000".into(),
        rooms: rooms(&[("Cabin", "₹7,000"), ("Suite", "₹11,000")]),
        policies: policies("3PM", "10AM"),
        ..Default::default()
    };
    if detailed {
        property.rating = Some(4.4);
        property.reviews_count = Some(621);
        property.amenities = strings(&["Cabins", "Hiking Trails", "Fireplace"]);
        property.timezone = Some("Asia/Kolkata".into());
        property.website = Some("https://mountainpeak.example".into());
        property.email = Some("stay@mountainpeak.example".into());
        property.restaurants = restaurants(&[
            ("Local Cuisine Restaurant", "7:30AM–10PM"),
            ("Coffee House", "7AM–9PM"),
        ]);
        property.parking = Some("Outdoor self-parking, free".into());
    }
    if with_promotions {
        property.promotions = vec![promotion(
            "Hikers Special 12% off",
            "HIKE12",
            "Complimentary trail map",
            utc(2025, 2, 1, 0, 0, 0),
            utc(2025, 11, 30, 23, 59, 59),
        )];
    }
    property
}
