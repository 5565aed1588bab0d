use super::*;

#[test]
fn catalog_page_url_appends_offset_and_filters() {
    let url = catalog_page_url("https://www.moonpig.com/us/personalised-cards/all/", 24, "occ:5")
        .unwrap();
    assert_eq!(
        url,
        "https://www.moonpig.com/us/personalised-cards/all/?offset=24&filters=occ%3A5"
    );
}

#[test]
fn catalog_page_url_replaces_existing_paging_params() {
    let url = catalog_page_url(
        "https://shop.example.com/cards/?sort=new&offset=99&filters=x:y",
        0,
        "topic:cats",
    )
    .unwrap();
    assert_eq!(
        url,
        "https://shop.example.com/cards/?sort=new&offset=0&filters=topic%3Acats"
    );
}

#[test]
fn catalog_page_url_rejects_invalid_base() {
    let result = catalog_page_url("not a url", 0, "occ:5");
    assert!(
        matches!(result, Err(ScraperError::InvalidUrl { .. })),
        "expected InvalidUrl, got: {result:?}"
    );
}

#[test]
fn extract_hydration_data_reads_script_text() {
    let html = r#"<html><head></head><body>
        <script id="__NEXT_DATA__" type="application/json">{"props":{"a":1}}</script>
    </body></html>"#;
    assert_eq!(
        extract_hydration_data(html).as_deref(),
        Some(r#"{"props":{"a":1}}"#)
    );
}

#[test]
fn extract_hydration_data_ignores_other_scripts() {
    let html = r#"<script id="other">{"x":1}</script>
        <script id="__NEXT_DATA__">{"y":2}</script>"#;
    assert_eq!(extract_hydration_data(html).as_deref(), Some(r#"{"y":2}"#));
}

#[test]
fn extract_hydration_data_none_when_absent() {
    assert!(extract_hydration_data("<html><body><p>hi</p></body></html>").is_none());
}

#[test]
fn extract_hydration_data_none_for_empty_document() {
    assert!(extract_hydration_data("").is_none());
}

#[test]
fn extract_hydration_data_none_when_element_blank() {
    let html = r#"<script id="__NEXT_DATA__">   </script>"#;
    assert!(extract_hydration_data(html).is_none());
}
