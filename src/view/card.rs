//! Restaurant cards, click dispatch and the pagination footer.

use super::badges::badges;
use super::stars::star_line;
use crate::models::{Restaurant, RestaurantId};

/// Part of a card the user activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget {
    Body,
    EditIcon,
    DeleteIcon,
}

/// Action resulting from a card click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    View(RestaurantId),
    Edit(RestaurantId),
    Delete(RestaurantId),
}

/// Resolve a click to exactly one action. Icon clicks never fall through to
/// the card body, so editing or deleting does not also open the detail view.
pub fn dispatch(restaurant: &Restaurant, target: CardTarget) -> CardAction {
    let id = restaurant.id.clone();
    match target {
        CardTarget::Body => CardAction::View(id),
        CardTarget::EditIcon => CardAction::Edit(id),
        CardTarget::DeleteIcon => CardAction::Delete(id),
    }
}

/// Render one card. `position` is the 1-based number the user types to select it.
pub fn render_card(position: usize, restaurant: &Restaurant) -> String {
    let badge_line = badges(&restaurant.attributes)
        .iter()
        .map(|b| format!("[{}]", b))
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines = vec![
        format!(
            "{:>3}. {}  {}  {} reviews",
            position,
            restaurant.name,
            star_line(restaurant.stars),
            restaurant.review_count
        ),
        format!("     {}", restaurant.location_line()),
    ];
    if let Some(categories) = restaurant.categories.as_deref().filter(|c| !c.trim().is_empty()) {
        lines.push(format!("     {}", categories.trim()));
    }
    lines.push(format!("     {}", badge_line));
    lines.join("\n")
}

/// `Page X of Y`.
pub fn pagination_footer(page: u32, total_pages: u32) -> String {
    format!("Page {} of {}", page, total_pages)
}

/// Render the whole page of cards followed by the footer.
pub fn render_list(restaurants: &[Restaurant], page: u32, total_pages: u32) -> String {
    let mut out = String::new();
    if restaurants.is_empty() {
        out.push_str("No restaurants found.\n");
    }
    for (i, restaurant) in restaurants.iter().enumerate() {
        out.push_str(&render_card(i + 1, restaurant));
        out.push_str("\n\n");
    }
    out.push_str(&pagination_footer(page, total_pages));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Restaurant {
        Restaurant::from_value(json!({
            "_id": { "$oid": "r1" },
            "name": "Blue Plate",
            "address": "9 Bay St",
            "city": "Tampa",
            "state": "FL",
            "stars": 3.0,
            "review_count": 42,
            "categories": "Diners, Breakfast & Brunch",
            "attributes": { "RestaurantsPriceRange2": "2", "WiFi": "free", "RestaurantsDelivery": true }
        }))
        .unwrap()
    }

    #[test]
    fn test_dispatch_one_action_per_click() {
        let restaurant = sample();
        let id = RestaurantId::new("r1");
        assert_eq!(dispatch(&restaurant, CardTarget::Body), CardAction::View(id.clone()));
        assert_eq!(dispatch(&restaurant, CardTarget::EditIcon), CardAction::Edit(id.clone()));
        assert_eq!(dispatch(&restaurant, CardTarget::DeleteIcon), CardAction::Delete(id));
    }

    #[test]
    fn test_render_card() {
        let card = render_card(1, &sample());
        assert!(card.contains("1. Blue Plate  ★★★☆☆  42 reviews"));
        assert!(card.contains("9 Bay St, Tampa, FL"));
        assert!(card.contains("Diners, Breakfast & Brunch"));
        assert!(card.contains("[$$] [WiFi: free] [Delivery Available]"));
    }

    #[test]
    fn test_render_list_footer() {
        let out = render_list(&[sample()], 2, 7);
        assert!(out.ends_with("Page 2 of 7"));
        assert!(render_list(&[], 1, 0).starts_with("No restaurants found."));
    }
}
