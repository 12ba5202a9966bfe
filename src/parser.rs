use scraper::{ElementRef, Html, Selector};

use crate::models::ProductRecord;

const FALLBACK_TITLE: &str = "Product Title Not Found";
const FALLBACK_IMAGE: &str = "https://placehold.co/400?text=No+Image";
const FALLBACK_SELLER: &str = "Unknown / Third-Party";
const FALLBACK_RATING: &str = "0";
const FALLBACK_REVIEWS: &str = "0 ratings";
const FALLBACK_FEATURES: [&str; 2] = [
    "Official manufacturer warranty",
    "Standard retail packaging",
];

/// Extract a normalized record from raw product-page markup.
///
/// Each field is looked up independently; a missing marker degrades to
/// that field's fallback without affecting the others, so this never
/// fails. Fetch-level failures are the caller's concern.
pub fn extract(html: &str) -> ProductRecord {
    let doc = Html::parse_document(html);

    let title = first_text(&doc, "span#productTitle").unwrap_or_else(|| FALLBACK_TITLE.into());

    let price = first_text(&doc, "span.a-price-whole")
        .and_then(|t| t.replace([',', '.'], "").parse().ok())
        .unwrap_or(0);

    // Struck-through reference price lives in an offscreen accessibility
    // node. Absent either marker, no discount is implied.
    let mrp = first_text(&doc, "span.a-text-price span.a-offscreen")
        .and_then(|t| parse_offscreen_price(&t))
        .unwrap_or(price);

    let image_selector = Selector::parse("img#landingImage").unwrap();
    let image = doc
        .select(&image_selector)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_IMAGE.into());

    let seller = first_text(&doc, "div#merchant-info").unwrap_or_else(|| FALLBACK_SELLER.into());

    // Alt text reads "4.3 out of 5 stars"; keep the leading token.
    let rating = first_text(&doc, "span.a-icon-alt")
        .and_then(|t| t.split_whitespace().next().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_RATING.into());

    let reviews =
        first_text(&doc, "span#acrCustomerReviewText").unwrap_or_else(|| FALLBACK_REVIEWS.into());

    let bullets_selector = Selector::parse("div#feature-bullets").unwrap();
    let li_selector = Selector::parse("li").unwrap();
    let features = match doc.select(&bullets_selector).next() {
        Some(container) => container
            .select(&li_selector)
            .take(4)
            .map(element_text)
            .collect(),
        None => FALLBACK_FEATURES.iter().map(|s| s.to_string()).collect(),
    };

    ProductRecord {
        title,
        price,
        mrp,
        image,
        seller,
        rating,
        reviews,
        features,
    }
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    doc.select(&selector).next().map(element_text)
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// "₹2,599.00" -> 2599: drop everything from the decimal point on,
/// then keep digits only.
fn parse_offscreen_price(text: &str) -> Option<u64> {
    let whole = match text.split_once('.') {
        Some((whole, _)) => whole,
        None => text,
    };
    let digits: String = whole.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENTS: [(&str, &str); 8] = [
        (
            "title",
            r#"<span id="productTitle"> Noise Cancelling Headphones </span>"#,
        ),
        ("price", r#"<span class="a-price-whole">1,299</span>"#),
        (
            "mrp",
            r#"<span class="a-text-price"><span class="a-offscreen">₹2,599.00</span></span>"#,
        ),
        (
            "image",
            r#"<img id="landingImage" src="https://img.example/p.jpg">"#,
        ),
        (
            "seller",
            r#"<div id="merchant-info"> Sold by Appario Retail Private Ltd </div>"#,
        ),
        (
            "rating",
            r#"<span class="a-icon-alt">4.3 out of 5 stars</span>"#,
        ),
        (
            "reviews",
            r#"<span id="acrCustomerReviewText"> 1,024 ratings </span>"#,
        ),
        (
            "bullets",
            r#"<div id="feature-bullets"><ul>
                <li> Active noise cancellation </li>
                <li>40h battery</li>
                <li>USB-C fast charge</li>
                <li>Multipoint pairing</li>
                <li>Carry case included</li>
            </ul></div>"#,
        ),
    ];

    fn full_page() -> String {
        page_without("")
    }

    fn page_without(skip: &str) -> String {
        let body: String = FRAGMENTS
            .iter()
            .filter(|(name, _)| *name != skip)
            .map(|(_, fragment)| *fragment)
            .collect();
        format!("<html><body>{body}</body></html>")
    }

    #[test]
    fn extracts_every_field_from_a_full_page() {
        let record = extract(&full_page());
        assert_eq!(record.title, "Noise Cancelling Headphones");
        assert_eq!(record.price, 1299);
        assert_eq!(record.mrp, 2599);
        assert_eq!(record.image, "https://img.example/p.jpg");
        assert_eq!(record.seller, "Sold by Appario Retail Private Ltd");
        assert_eq!(record.rating, "4.3");
        assert_eq!(record.reviews, "1,024 ratings");
        assert_eq!(
            record.features,
            vec![
                "Active noise cancellation",
                "40h battery",
                "USB-C fast charge",
                "Multipoint pairing",
            ]
        );
    }

    #[test]
    fn missing_title_falls_back_without_touching_other_fields() {
        let record = extract(&page_without("title"));
        assert_eq!(record.title, FALLBACK_TITLE);
        assert_eq!(record.price, 1299);
        assert_eq!(record.rating, "4.3");
    }

    #[test]
    fn missing_price_is_zero_and_mrp_still_reads_the_page() {
        let record = extract(&page_without("price"));
        assert_eq!(record.price, 0);
        assert_eq!(record.mrp, 2599);
        assert_eq!(record.title, "Noise Cancelling Headphones");
    }

    #[test]
    fn missing_reference_price_collapses_to_current_price() {
        let record = extract(&page_without("mrp"));
        assert_eq!(record.mrp, record.price);
        assert_eq!(record.price, 1299);
    }

    #[test]
    fn reference_price_without_offscreen_node_collapses_to_current_price() {
        let html = r#"<html><body><span class="a-price-whole">500</span><span class="a-text-price">₹999</span></body></html>"#;
        let record = extract(html);
        assert_eq!(record.mrp, 500);
    }

    #[test]
    fn missing_image_uses_placeholder() {
        let record = extract(&page_without("image"));
        assert_eq!(record.image, FALLBACK_IMAGE);
        assert_eq!(record.seller, "Sold by Appario Retail Private Ltd");
    }

    #[test]
    fn missing_seller_falls_back() {
        let record = extract(&page_without("seller"));
        assert_eq!(record.seller, FALLBACK_SELLER);
        assert_eq!(record.reviews, "1,024 ratings");
    }

    #[test]
    fn missing_rating_is_zero_string() {
        let record = extract(&page_without("rating"));
        assert_eq!(record.rating, "0");
        assert_eq!(record.price, 1299);
    }

    #[test]
    fn missing_review_count_falls_back() {
        let record = extract(&page_without("reviews"));
        assert_eq!(record.reviews, FALLBACK_REVIEWS);
    }

    #[test]
    fn missing_bullet_container_uses_boilerplate_features() {
        let record = extract(&page_without("bullets"));
        assert_eq!(
            record.features,
            vec![
                "Official manufacturer warranty",
                "Standard retail packaging",
            ]
        );
        assert_eq!(record.title, "Noise Cancelling Headphones");
    }

    #[test]
    fn features_cap_at_four_bullets() {
        let record = extract(&full_page());
        assert_eq!(record.features.len(), 4);
    }

    #[test]
    fn empty_document_is_all_fallbacks() {
        let record = extract("<html></html>");
        assert_eq!(record.title, FALLBACK_TITLE);
        assert_eq!(record.price, 0);
        assert_eq!(record.mrp, 0);
        assert_eq!(record.image, FALLBACK_IMAGE);
        assert_eq!(record.seller, FALLBACK_SELLER);
        assert_eq!(record.rating, "0");
        assert_eq!(record.reviews, FALLBACK_REVIEWS);
        assert_eq!(record.features.len(), 2);
    }
}
