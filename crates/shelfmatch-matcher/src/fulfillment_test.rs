use shelfmatch_core::ShipmentType;

use super::*;

fn bag(values: &[(&str, &str)]) -> Vec<TextSource> {
    values
        .iter()
        .map(|(name, value)| TextSource::new(*name, *value))
        .collect()
}

fn extract_one(text: &str) -> Option<FulfillmentFact> {
    extract_fulfillment(&bag(&[("fulfillment_text", text)]))
}

#[test]
fn sold_by_and_shipped_by_amazon() {
    let fact = extract_one("Sold by MilleLoom and Shipped by Amazon").expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("MilleLoom"));
    assert_eq!(fact.shipped_by.as_deref(), Some("Amazon"));
    assert_eq!(fact.shipment_type, ShipmentType::ShippedByAmazon);
    assert_eq!(fact.matched_pattern, MatchedPattern::SoldByAndShippedBy);
    assert_eq!(fact.source_text, "Sold by MilleLoom and Shipped by Amazon");
}

#[test]
fn sold_by_and_shipped_by_third_party() {
    let fact = extract_one("Sold by ThirdPartySeller and Shipped by FedEx").expect("fact");
    assert_eq!(fact.shipment_type, ShipmentType::ShippedBySeller);
    assert_eq!(fact.shipped_by.as_deref(), Some("FedEx"));
}

#[test]
fn ships_from_and_sold_by_sets_both_names() {
    let fact = extract_one("Ships from and sold by Amazon.com").expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("Amazon.com"));
    assert_eq!(fact.shipped_by.as_deref(), Some("Amazon.com"));
    assert_eq!(fact.shipment_type, ShipmentType::ShippedByAmazon);
    assert_eq!(fact.matched_pattern, MatchedPattern::ShipsFromAndSoldBy);
}

#[test]
fn sold_by_only_leaves_shipper_unknown() {
    let fact = extract_one("Sold by Brightline Goods, ships in 2 days").expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("Brightline Goods"));
    assert!(fact.shipped_by.is_none());
    assert_eq!(fact.shipment_type, ShipmentType::Unknown);
    assert_eq!(fact.matched_pattern, MatchedPattern::SoldBy);
}

#[test]
fn shipped_by_only() {
    let fact = extract_one("Fast delivery. Shipped by Amazon; returns accepted").expect("fact");
    assert_eq!(fact.shipped_by.as_deref(), Some("Amazon"));
    assert!(fact.seller_name.is_none());
    assert_eq!(fact.matched_pattern, MatchedPattern::ShippedBy);
}

#[test]
fn ships_from_only() {
    let fact = extract_one("Ships from Warehouse Direct").expect("fact");
    assert_eq!(fact.shipped_by.as_deref(), Some("Warehouse Direct"));
    assert_eq!(fact.shipment_type, ShipmentType::ShippedBySeller);
    assert_eq!(fact.matched_pattern, MatchedPattern::ShipsFrom);
}

#[test]
fn combined_phrase_beats_single_phrase_in_same_source() {
    let fact = extract_one("Shipped by UPS. Sold by Acme and shipped by Amazon").expect("fact");
    assert_eq!(fact.matched_pattern, MatchedPattern::SoldByAndShippedBy);
    assert_eq!(fact.seller_name.as_deref(), Some("Acme"));
}

#[test]
fn earlier_source_wins_over_more_specific_later_source() {
    let sources = bag(&[
        ("seller_info", "Sold by Early Bird Traders"),
        ("raw_html", "Sold by Someone Else and Shipped by Amazon"),
    ]);
    let fact = extract_fulfillment(&sources).expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("Early Bird Traders"));
}

#[test]
fn markup_is_stripped_before_matching() {
    let html = r#"<div id="merchant-info">Ships from <b>Amazon</b>. Sold by <a href="/s">Brightline Goods Inc.</a></div>"#;
    let fact = extract_one(html).expect("fact");
    assert_eq!(fact.matched_pattern, MatchedPattern::SoldBy);
    assert_eq!(fact.seller_name.as_deref(), Some("Brightline Goods Inc."));
}

#[test]
fn name_stops_at_sentence_period() {
    let fact = extract_one("Sold by Acme. Free returns within 30 days.").expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("Acme"));
}

#[test]
fn trailing_parenthetical_is_dropped() {
    let fact = extract_one("Sold by Acme Outlet (4.8 out of 5 stars)").expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("Acme Outlet"));
}

#[test]
fn overlong_name_is_not_a_match() {
    let long = "x".repeat(MAX_NAME_CHARS + 1);
    assert!(extract_one(&format!("Sold by {long}")).is_none());
}

#[test]
fn overlong_first_occurrence_falls_through_to_next() {
    let long = "y".repeat(MAX_NAME_CHARS + 5);
    let fact = extract_one(&format!("Sold by {long}, Sold by Real Seller")).expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("Real Seller"));
}

#[test]
fn empty_and_whitespace_bags_yield_none() {
    assert!(extract_fulfillment(&[]).is_none());
    assert!(extract_fulfillment(&bag(&[("a", ""), ("b", "   \n\t ")])).is_none());
}

#[test]
fn placeholder_values_are_skipped() {
    let sources = bag(&[
        ("fulfillment_text", "None"),
        ("seller_info", "{}"),
        ("shipping_info", "null"),
        ("description", "Sold by Real Seller"),
    ]);
    let fact = extract_fulfillment(&sources).expect("fact");
    assert_eq!(fact.seller_name.as_deref(), Some("Real Seller"));
}

#[test]
fn text_without_phrases_yields_none() {
    assert!(extract_one("Great chair, very comfortable. Five stars.").is_none());
}

#[test]
fn extraction_is_idempotent() {
    let sources = bag(&[("raw_html", "<p>Sold by MilleLoom and Shipped by Amazon</p>")]);
    assert_eq!(extract_fulfillment(&sources), extract_fulfillment(&sources));
}

#[test]
fn clean_seller_name_cuts_follow_on_clause() {
    assert_eq!(clean_seller_name("Acme fulfilled by Amazon"), "Acme");
}

#[test]
fn clean_seller_name_trims_quotes_and_punctuation() {
    assert_eq!(clean_seller_name("  \"Acme Co.\"  "), "Acme Co.");
    assert_eq!(clean_seller_name("'Widget World';"), "Widget World");
}

#[test]
fn clean_seller_name_strips_markup() {
    assert_eq!(clean_seller_name("<span>Acme\u{200b} Goods</span>."), "Acme Goods");
}
