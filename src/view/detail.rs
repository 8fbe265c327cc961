//! Detail view of a single restaurant.

use super::badges::price_badge;
use super::stars::star_line;
use crate::models::Restaurant;

/// Full text of the detail view.
pub fn render_detail(restaurant: &Restaurant) -> String {
    let attrs = &restaurant.attributes;
    let mut lines = vec![
        restaurant.name.clone(),
        format!(
            "{}  {} reviews",
            star_line(restaurant.stars),
            restaurant.review_count
        ),
        String::new(),
        restaurant.address.clone(),
        format!("{}, {}", restaurant.city, restaurant.state),
    ];

    let categories = restaurant.category_list();
    if !categories.is_empty() {
        lines.push(String::new());
        lines.push(
            categories
                .iter()
                .map(|c| format!("({})", c))
                .collect::<Vec<_>>()
                .join(" "),
        );
    }

    lines.push(String::new());
    lines.push(price_badge(attrs));
    if let Some(wifi) = attrs.wifi {
        lines.push(format!("WiFi: {}", wifi.as_str()));
    }
    if let Some(alcohol) = attrs.alcohol {
        lines.push(alcohol.as_str().to_string());
    }
    if attrs.parking.is_some() {
        lines.push("Parking Available".to_string());
    }
    if attrs.dogs_allowed == Some(true) {
        lines.push("Dogs Allowed".to_string());
    }

    let hours = restaurant.weekly_hours();
    if !hours.is_empty() {
        lines.push(String::new());
        lines.push("Hours".to_string());
        for (day, open) in hours {
            lines.push(format!("  {:<10} {}", day, open));
        }
    }

    lines.join("\n")
}
